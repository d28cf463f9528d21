//! Geometry section writer.
//!
//! Writes one topological context per entity, in representation item order,
//! so context `i` belongs to item `i` of the tree section.

use super::SectionWriter;
use crate::entities::{Entity, PrcEntity};
use crate::error::Result;
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::{type_codes, SectionKind};

/// Writer for a file structure's Geometry section.
pub struct GeometryWriter<'a> {
    entities: &'a [PrcEntity],
}

impl<'a> GeometryWriter<'a> {
    pub fn new(entities: &'a [PrcEntity]) -> Self {
        Self { entities }
    }
}

impl SectionWriter for GeometryWriter<'_> {
    fn section_kind(&self) -> SectionKind {
        SectionKind::Geometry
    }

    fn write_data(&self, sink: &mut ByteSink) -> Result<()> {
        sink.write_u32(type_codes::ASM_FILE_STRUCTURE_GEOMETRY)?;
        sink.write_count(self.entities.len())?;
        for entity in self.entities {
            entity.as_entity().write_topological_context(sink)?;
        }
        Ok(())
    }
}

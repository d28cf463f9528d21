//! Extra geometry section writer.

use super::SectionWriter;
use crate::entities::{Entity, PrcEntity};
use crate::error::Result;
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::{type_codes, SectionKind};

/// Writer for a file structure's ExtraGeometry section: one bounding box and
/// continuity record per entity, in representation item order.
pub struct ExtraGeometryWriter<'a> {
    entities: &'a [PrcEntity],
}

impl<'a> ExtraGeometryWriter<'a> {
    pub fn new(entities: &'a [PrcEntity]) -> Self {
        Self { entities }
    }
}

impl SectionWriter for ExtraGeometryWriter<'_> {
    fn section_kind(&self) -> SectionKind {
        SectionKind::ExtraGeometry
    }

    fn write_data(&self, sink: &mut ByteSink) -> Result<()> {
        sink.write_u32(type_codes::ASM_FILE_STRUCTURE_EXTRA_GEOMETRY)?;
        sink.write_count(self.entities.len())?;
        for entity in self.entities {
            entity.as_entity().write_extra_geometry_context(sink)?;
        }
        Ok(())
    }
}

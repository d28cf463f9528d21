//! Model file writer.
//!
//! The model file is the only section outside the file structures. It names
//! the model, lists every structure by identifier, roots one product
//! occurrence per structure and references every entity of the document.
//!
//! Layout:
//! ```text
//! RL  type code (301)
//! TV  model name
//! RD  unit in millimetres
//! B   unit from CAD file (true)
//! RL  number of file structures, then per structure:
//!     4RL identifier
//!     RL  index
//! RL  number of root occurrences, then per occurrence:
//!     RL  file structure index
//!     RL  product occurrence index (0)
//! RL  number of entity references, then per reference:
//!     RL  file structure index
//!     RL  representation item ordinal
//!     RL  colour index
//! ```

use super::SectionWriter;
use crate::document::{EntityReference, PrcWriterConfiguration};
use crate::error::{to_u32, Result};
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::{type_codes, SectionKind};
use crate::types::Uid;

pub struct ModelFileWriter<'a> {
    config: &'a PrcWriterConfiguration,
    structure_uids: &'a [Uid],
    entity_refs: &'a [EntityReference],
}

impl<'a> ModelFileWriter<'a> {
    pub fn new(
        config: &'a PrcWriterConfiguration,
        structure_uids: &'a [Uid],
        entity_refs: &'a [EntityReference],
    ) -> Self {
        Self {
            config,
            structure_uids,
            entity_refs,
        }
    }
}

impl SectionWriter for ModelFileWriter<'_> {
    fn section_kind(&self) -> SectionKind {
        SectionKind::ModelFile
    }

    fn write_data(&self, sink: &mut ByteSink) -> Result<()> {
        sink.write_u32(type_codes::ASM_MODEL_FILE)?;
        sink.write_string(&self.config.model_name)?;
        sink.write_f64(self.config.unit_in_mm)?;
        sink.write_bool(true)?;

        sink.write_count(self.structure_uids.len())?;
        for (index, uid) in self.structure_uids.iter().enumerate() {
            sink.write_uid(uid)?;
            sink.write_u32(to_u32(index, "file structure index")?)?;
        }

        sink.write_count(self.structure_uids.len())?;
        for index in 0..self.structure_uids.len() {
            sink.write_u32(to_u32(index, "file structure index")?)?;
            sink.write_u32(0)?;
        }

        sink.write_count(self.entity_refs.len())?;
        for reference in self.entity_refs {
            sink.write_u32(reference.structure)?;
            sink.write_u32(reference.ordinal)?;
            sink.write_u32(reference.colour_index)?;
        }
        Ok(())
    }
}

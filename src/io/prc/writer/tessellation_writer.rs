//! Tessellation section writer.
//!
//! Entities are written as exact geometry only, so the payload is empty. The
//! section is still compressed and framed so readers find all five sections.

use super::SectionWriter;
use crate::error::Result;
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::SectionKind;

/// Writer for a file structure's Tessellation section.
#[derive(Debug, Clone, Copy, Default)]
pub struct TessellationWriter;

impl TessellationWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SectionWriter for TessellationWriter {
    fn section_kind(&self) -> SectionKind {
        SectionKind::Tessellation
    }

    fn write_data(&self, _sink: &mut ByteSink) -> Result<()> {
        Ok(())
    }
}

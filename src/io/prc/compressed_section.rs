//! Compressed section with a one-shot prepare/measure/write protocol.
//!
//! A section's on-disk size depends on its compressed length, which is only
//! known after the payload has been serialized and deflated. Every offset in
//! the file header depends on those sizes, so sections are prepared first and
//! only measured and written afterwards.
//!
//! Frame layout:
//! ```text
//! RL  uncompressed payload length
//! RL  compressed payload length
//! RL  section type code
//! ..  zlib stream
//! ```

use crate::error::{PrcError, Result};
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::{SectionKind, SECTION_HEADER_SIZE};
use crate::io::prc::writer::SectionWriter;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::trace;

use std::io::Write;

/// Lifecycle of a compressed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Empty,
    Prepared,
}

/// One independently compressed chunk of a PRC file.
#[derive(Debug)]
pub struct CompressedSection {
    kind: SectionKind,
    compression_level: u32,
    sink: ByteSink,
    state: SectionState,
}

impl CompressedSection {
    /// Create an empty section of the given kind.
    pub fn new(kind: SectionKind, compression_level: u32) -> Self {
        Self {
            kind,
            compression_level,
            sink: ByteSink::new(),
            state: SectionState::Empty,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn is_prepared(&self) -> bool {
        self.state == SectionState::Prepared
    }

    /// Serialize the payload with `writer`, compress it, and mark the section
    /// prepared. Later calls do nothing.
    pub fn prepare(&mut self, writer: &dyn SectionWriter) -> Result<()> {
        if self.is_prepared() {
            trace!(section = %self.kind, "section already prepared");
            return Ok(());
        }
        if writer.section_kind() != self.kind {
            return Err(PrcError::InvalidState(format!(
                "{} payload offered to {} section",
                writer.section_kind(),
                self.kind
            )));
        }

        // the section keeps no partial payload if serialization fails
        let mut sink = ByteSink::new();
        writer.write_data(&mut sink)?;
        sink.compress(self.compression_level)?;
        self.sink = sink;
        self.state = SectionState::Prepared;

        trace!(
            section = %self.kind,
            uncompressed = self.sink.uncompressed_len().unwrap_or(0),
            compressed = self.sink.len(),
            "section prepared"
        );
        Ok(())
    }

    fn require_prepared(&self) -> Result<(u32, u32)> {
        match (self.sink.uncompressed_len(), self.sink.compressed_len()) {
            (Some(raw), Some(packed)) if self.is_prepared() => Ok((raw, packed)),
            _ => Err(PrcError::NotPrepared(self.kind.to_string())),
        }
    }

    /// Bytes this section occupies on disk: frame header plus zlib stream.
    pub fn size(&self) -> Result<u32> {
        let (_, packed) = self.require_prepared()?;
        packed
            .checked_add(SECTION_HEADER_SIZE)
            .ok_or_else(|| PrcError::SizeOverflow(format!("{} section", self.kind)))
    }

    /// Payload length before compression.
    pub fn uncompressed_len(&self) -> Result<u32> {
        self.require_prepared().map(|(raw, _)| raw)
    }

    /// Compressed payload bytes.
    pub fn compressed_data(&self) -> Result<&[u8]> {
        self.require_prepared()?;
        Ok(self.sink.data())
    }

    /// Emit the frame header and the compressed payload; exactly `size()` bytes.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let (raw, packed) = self.require_prepared()?;
        out.write_u32::<LittleEndian>(raw)?;
        out.write_u32::<LittleEndian>(packed)?;
        out.write_u32::<LittleEndian>(self.kind.type_code())?;
        out.write_all(self.sink.data())?;
        Ok(())
    }
}

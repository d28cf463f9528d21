//! File header and per-structure offset table.
//!
//! Layout:
//! ```text
//! START HEADER
//! RL  number of file structures
//! per file structure:
//!     4RL identifier
//!     RL  reserved (0)
//!     RL  number of offsets
//!     RL  offsets[]
//! RL  model file offset
//! RL  file size
//! RL  number of uncompressed files
//!     uncompressed files
//! ```
//!
//! The header's size depends only on counts, so it can be measured before
//! any offset is known.

use super::start_header::{write_uid, StartHeader};
use super::uncompressed_file::{table_size, write_table, UncompressedFile};
use crate::error::{to_u32, PrcError, Result};
use crate::types::Uid;

use byteorder::{LittleEndian, WriteBytesExt};

use std::io::Write;

/// Offset table entry for one file structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStructureInformation {
    /// Must equal the identifier in the structure's own start header
    pub uid: Uid,
    pub reserved: u32,
    /// Structure start, then the start of each of its sections
    pub offsets: Vec<u32>,
}

impl FileStructureInformation {
    /// Entry with `offset_count` zeroed offsets, to be filled after measuring.
    pub fn with_placeholder_offsets(uid: Uid, offset_count: u32) -> Self {
        Self {
            uid,
            reserved: 0,
            offsets: vec![0; offset_count as usize],
        }
    }

    /// Offset of the file structure itself.
    pub fn structure_offset(&self) -> Option<u32> {
        self.offsets.first().copied()
    }

    pub fn size(&self) -> Result<u32> {
        to_u32(16 + 4 + 4 + 4 * self.offsets.len(), "file structure information")
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_uid(out, &self.uid)?;
        out.write_u32::<LittleEndian>(self.reserved)?;
        out.write_u32::<LittleEndian>(to_u32(self.offsets.len(), "offset count")?)?;
        for offset in &self.offsets {
            out.write_u32::<LittleEndian>(*offset)?;
        }
        Ok(())
    }
}

/// Top-level record at the start of every PRC file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrcHeader {
    pub start_header: StartHeader,
    pub file_structures: Vec<FileStructureInformation>,
    pub model_file_offset: u32,
    pub file_size: u32,
    pub uncompressed_files: Vec<UncompressedFile>,
}

impl PrcHeader {
    pub fn new(start_header: StartHeader) -> Self {
        Self {
            start_header,
            file_structures: Vec::new(),
            model_file_offset: 0,
            file_size: 0,
            uncompressed_files: Vec::new(),
        }
    }

    pub fn size(&self) -> Result<u32> {
        let mut total = u64::from(self.start_header.size()) + 4;
        for info in &self.file_structures {
            total += u64::from(info.size()?);
        }
        total += 4 + 4;
        total += u64::from(table_size(&self.uncompressed_files)?);
        u32::try_from(total).map_err(|_| PrcError::SizeOverflow("file header".into()))
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.start_header.write(out)?;
        out.write_u32::<LittleEndian>(to_u32(self.file_structures.len(), "file structure count")?)?;
        for info in &self.file_structures {
            info.write(out)?;
        }
        out.write_u32::<LittleEndian>(self.model_file_offset)?;
        out.write_u32::<LittleEndian>(self.file_size)?;
        write_table(out, &self.uncompressed_files)
    }
}

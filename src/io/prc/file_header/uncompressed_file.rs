//! Uncompressed payload block, stored verbatim with a length prefix.

use crate::error::{to_u32, Result};

use byteorder::{LittleEndian, WriteBytesExt};

use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UncompressedFile {
    pub data: Vec<u8>,
}

impl UncompressedFile {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Length prefix plus data.
    pub fn size(&self) -> Result<u32> {
        to_u32(self.data.len() + 4, "uncompressed file")
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_u32::<LittleEndian>(to_u32(self.data.len(), "uncompressed file")?)?;
        out.write_all(&self.data)?;
        Ok(())
    }
}

/// Count prefix plus every file.
pub(crate) fn table_size(files: &[UncompressedFile]) -> Result<u32> {
    let mut total: u64 = 4;
    for file in files {
        total += u64::from(file.size()?);
    }
    to_u32(total as usize, "uncompressed file table")
}

pub(crate) fn write_table<W: Write + ?Sized>(out: &mut W, files: &[UncompressedFile]) -> Result<()> {
    out.write_u32::<LittleEndian>(to_u32(files.len(), "uncompressed file count")?)?;
    for file in files {
        file.write(out)?;
    }
    Ok(())
}

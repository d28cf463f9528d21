//! Start header shared by the file header and every file structure.
//!
//! Layout (43 bytes):
//! ```text
//! 3   "PRC"
//! RL  minimal version for read
//! RL  authoring version
//! 4RL file structure identifier
//! 4RL application identifier
//! ```

use crate::error::Result;
use crate::io::prc::constants::{PRC_MAGIC, START_HEADER_SIZE};
use crate::types::Uid;

use byteorder::{LittleEndian, WriteBytesExt};

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartHeader {
    pub minimal_version_for_read: u32,
    pub authoring_version: u32,
    pub file_structure_uid: Uid,
    pub application_uid: Uid,
}

impl StartHeader {
    pub fn new(
        file_structure_uid: Uid,
        application_uid: Uid,
        minimal_version_for_read: u32,
        authoring_version: u32,
    ) -> Self {
        Self {
            minimal_version_for_read,
            authoring_version,
            file_structure_uid,
            application_uid,
        }
    }

    pub fn size(&self) -> u32 {
        START_HEADER_SIZE
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_all(&PRC_MAGIC)?;
        out.write_u32::<LittleEndian>(self.minimal_version_for_read)?;
        out.write_u32::<LittleEndian>(self.authoring_version)?;
        write_uid(out, &self.file_structure_uid)?;
        write_uid(out, &self.application_uid)?;
        Ok(())
    }
}

pub(crate) fn write_uid<W: Write + ?Sized>(out: &mut W, uid: &Uid) -> Result<()> {
    for word in uid.words() {
        out.write_u32::<LittleEndian>(word)?;
    }
    Ok(())
}

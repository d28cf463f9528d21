//! One PRC file structure: a start header, verbatim blocks, and the five
//! compressed sections.
//!
//! Layout:
//! ```text
//! START HEADER
//! RL  number of uncompressed blocks, then each block
//! SECTION  Globals
//! SECTION  Tree
//! SECTION  Tessellation
//! SECTION  Geometry
//! SECTION  ExtraGeometry
//! ```

use crate::document::PrcWriterConfiguration;
use crate::entities::PrcEntity;
use crate::error::{PrcError, Result};
use crate::io::prc::compressed_section::CompressedSection;
use crate::io::prc::constants::SectionKind;
use crate::io::prc::file_header::{table_size, write_table, StartHeader, UncompressedFile};
use crate::io::prc::writer::{
    ExtraGeometryWriter, GeometryWriter, GlobalsWriter, TessellationWriter, TreeWriter,
};
use crate::palette::Palette;
use crate::types::Uid;

use tracing::trace;

use std::io::Write;

#[derive(Debug)]
pub struct FileStructure {
    index: u32,
    start_header: StartHeader,
    uncompressed_blocks: Vec<UncompressedFile>,
    entities: Vec<PrcEntity>,
    globals: CompressedSection,
    tree: CompressedSection,
    tessellation: CompressedSection,
    geometry: CompressedSection,
    extra_geometry: CompressedSection,
}

impl FileStructure {
    /// Empty structure at position `index` with its own start header.
    pub fn new(index: u32, start_header: StartHeader, compression_level: u32) -> Self {
        Self {
            index,
            start_header,
            uncompressed_blocks: Vec::new(),
            entities: Vec::new(),
            globals: CompressedSection::new(SectionKind::Globals, compression_level),
            tree: CompressedSection::new(SectionKind::Tree, compression_level),
            tessellation: CompressedSection::new(SectionKind::Tessellation, compression_level),
            geometry: CompressedSection::new(SectionKind::Geometry, compression_level),
            extra_geometry: CompressedSection::new(SectionKind::ExtraGeometry, compression_level),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn uid(&self) -> Uid {
        self.start_header.file_structure_uid
    }

    pub fn start_header(&self) -> &StartHeader {
        &self.start_header
    }

    pub fn entities(&self) -> &[PrcEntity] {
        &self.entities
    }

    pub fn uncompressed_blocks(&self) -> &[UncompressedFile] {
        &self.uncompressed_blocks
    }

    /// Append an entity; returns its representation item ordinal.
    pub(crate) fn add_entity(&mut self, entity: PrcEntity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub(crate) fn add_uncompressed_block(&mut self, data: Vec<u8>) {
        self.uncompressed_blocks.push(UncompressedFile::new(data));
    }

    /// The five sections in write order.
    pub fn sections(&self) -> impl Iterator<Item = &CompressedSection> {
        [
            &self.globals,
            &self.tree,
            &self.tessellation,
            &self.geometry,
            &self.extra_geometry,
        ]
        .into_iter()
    }

    pub fn is_prepared(&self) -> bool {
        self.sections().all(CompressedSection::is_prepared)
    }

    /// Serialize and compress every section, in write order.
    pub fn prepare(&mut self, palette: &Palette, config: &PrcWriterConfiguration) -> Result<()> {
        trace!(structure = self.index, entities = self.entities.len(), "preparing file structure");
        self.globals.prepare(&GlobalsWriter::new(palette, config))?;
        self.tree.prepare(&TreeWriter::new(self.index, &self.entities))?;
        self.tessellation.prepare(&TessellationWriter::new())?;
        self.geometry.prepare(&GeometryWriter::new(&self.entities))?;
        self.extra_geometry
            .prepare(&ExtraGeometryWriter::new(&self.entities))?;
        Ok(())
    }

    /// Bytes before the first section.
    fn preamble_size(&self) -> Result<u32> {
        self.start_header
            .size()
            .checked_add(table_size(&self.uncompressed_blocks)?)
            .ok_or_else(|| self.overflow())
    }

    /// Bytes this structure occupies on disk.
    pub fn size(&self) -> Result<u32> {
        let mut total = self.preamble_size()?;
        for section in self.sections() {
            total = total.checked_add(section.size()?).ok_or_else(|| self.overflow())?;
        }
        Ok(total)
    }

    /// Header table offsets for a structure placed at `start`: the structure
    /// itself, then the start of each section.
    pub fn section_offsets(&self, start: u32) -> Result<Vec<u32>> {
        let mut offsets = vec![start];
        let mut cursor = start
            .checked_add(self.preamble_size()?)
            .ok_or_else(|| self.overflow())?;
        for section in self.sections() {
            offsets.push(cursor);
            cursor = cursor.checked_add(section.size()?).ok_or_else(|| self.overflow())?;
        }
        Ok(offsets)
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.start_header.write(out)?;
        write_table(out, &self.uncompressed_blocks)?;
        for section in self.sections() {
            section.write(out)?;
        }
        Ok(())
    }

    fn overflow(&self) -> PrcError {
        PrcError::SizeOverflow(format!("file structure {}", self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Polyline;
    use crate::io::prc::constants::{OFFSETS_PER_FILE_STRUCTURE, SECTION_HEADER_SIZE, START_HEADER_SIZE};
    use crate::types::{RgbaColor, Vector3};

    fn structure() -> FileStructure {
        FileStructure::new(0, StartHeader::new(Uid::new([1, 2, 3, 4]), Uid::NIL, 7094, 7094), 6)
    }

    fn prepared_with_line() -> FileStructure {
        let mut palette = Palette::new();
        let mut fs = structure();
        let mut line = Polyline::new(vec![Vector3::ZERO, Vector3::UNIT_X]).unwrap();
        line.common.colour_index = Some(palette.intern(RgbaColor::BLACK).unwrap());
        fs.add_entity(line.into());
        fs.prepare(&palette, &PrcWriterConfiguration::default()).unwrap();
        fs
    }

    #[test]
    fn test_size_requires_prepare() {
        assert!(matches!(structure().size(), Err(PrcError::NotPrepared(_))));
    }

    #[test]
    fn test_write_matches_size() {
        let mut fs = prepared_with_line();
        let mut out = Vec::new();
        fs.write(&mut out).unwrap();
        assert_eq!(out.len() as u32, fs.size().unwrap());

        // prepare again is a no-op
        let before = fs.size().unwrap();
        fs.prepare(&Palette::new(), &PrcWriterConfiguration::default()).unwrap();
        assert_eq!(fs.size().unwrap(), before);
    }

    #[test]
    fn test_section_offsets() {
        let fs = prepared_with_line();
        let offsets = fs.section_offsets(100).unwrap();
        assert_eq!(offsets.len(), OFFSETS_PER_FILE_STRUCTURE as usize);
        assert_eq!(offsets[0], 100);
        assert_eq!(offsets[1], 100 + START_HEADER_SIZE + 4);

        let mut out = Vec::new();
        fs.write(&mut out).unwrap();
        for (section, offset) in fs.sections().zip(&offsets[1..]) {
            let at = (offset - 100) as usize;
            let tag = u32::from_le_bytes(out[at + 8..at + 12].try_into().unwrap());
            assert_eq!(tag, section.kind().type_code());
        }
    }

    #[test]
    fn test_uncompressed_blocks_precede_sections() {
        let mut fs = structure();
        fs.add_uncompressed_block(vec![7; 10]);
        fs.prepare(&Palette::new(), &PrcWriterConfiguration::default()).unwrap();
        let offsets = fs.section_offsets(0).unwrap();
        assert_eq!(offsets[1], START_HEADER_SIZE + 4 + 4 + 10);

        let mut out = Vec::new();
        fs.write(&mut out).unwrap();
        let tessellation = fs.sections().nth(2).unwrap();
        assert_eq!(tessellation.size().unwrap(), SECTION_HEADER_SIZE + tessellation.compressed_data().unwrap().len() as u32);
        assert_eq!(tessellation.uncompressed_len().unwrap(), 0);
    }
}

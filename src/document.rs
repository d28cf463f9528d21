//! PRC document: owns the file structures, the model file and the palette,
//! and drives the prepare / measure / write pipeline.

use crate::entities::{Entity, PrcEntity};
use crate::error::{to_u32, PrcError, Result};
use crate::io::prc::compressed_section::CompressedSection;
use crate::io::prc::constants::{
    SectionKind, DEFAULT_PRC_VERSION, MAX_FILE_STRUCTURES, MAX_UID_ATTEMPTS,
    OFFSETS_PER_FILE_STRUCTURE,
};
use crate::io::prc::file_header::{
    FileStructureInformation, PrcHeader, StartHeader, UncompressedFile,
};
use crate::io::prc::file_structure::FileStructure;
use crate::io::prc::uid_source::{RandomUidSource, UidSource};
use crate::io::prc::writer::ModelFileWriter;
use crate::palette::Palette;
use crate::types::{RgbaColor, Uid};

use ahash::AHashSet;
use tracing::{debug, trace};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Settings applied when a document is built and written.
#[derive(Debug, Clone, PartialEq)]
pub struct PrcWriterConfiguration {
    /// Number of file structures, `1..=65536`; fixed for the life of the document.
    ///
    /// Default: `1`.
    pub file_structure_count: u32,

    /// zlib level for every section, `0..=9`.
    ///
    /// Default: `6`.
    pub compression_level: u32,

    pub minimal_version_for_read: u32,
    pub authoring_version: u32,

    /// Identifier of the producing application, written in every start header.
    pub application_uid: Uid,

    pub tessellation_chord_height_ratio: f64,
    pub tessellation_angle_degrees: f64,
    pub default_font_family: String,

    /// Name recorded in the model file.
    pub model_name: String,
    /// Length of one model unit in millimetres.
    pub unit_in_mm: f64,

    /// Structure that receives entities passed to [`PrcDocument::add`].
    pub default_structure: u32,
}

impl Default for PrcWriterConfiguration {
    fn default() -> Self {
        Self {
            file_structure_count: 1,
            compression_level: 6,
            minimal_version_for_read: DEFAULT_PRC_VERSION,
            authoring_version: DEFAULT_PRC_VERSION,
            application_uid: Uid::NIL,
            tessellation_chord_height_ratio: 2000.0,
            tessellation_angle_degrees: 40.0,
            default_font_family: String::new(),
            model_name: String::from("PRC file"),
            unit_in_mm: 1.0,
            default_structure: 0,
        }
    }
}

impl PrcWriterConfiguration {
    pub fn validate(&self) -> Result<()> {
        if self.file_structure_count == 0 {
            return Err(PrcError::InvalidConfiguration(
                "at least one file structure is required".into(),
            ));
        }
        if self.file_structure_count > MAX_FILE_STRUCTURES {
            return Err(PrcError::InvalidConfiguration(format!(
                "{} file structures exceeds the limit of {MAX_FILE_STRUCTURES}",
                self.file_structure_count
            )));
        }
        if self.compression_level > 9 {
            return Err(PrcError::InvalidConfiguration(format!(
                "compression level {} is outside 0..=9",
                self.compression_level
            )));
        }
        if self.default_structure >= self.file_structure_count {
            return Err(PrcError::InvalidConfiguration(format!(
                "default structure {} but only {} file structures",
                self.default_structure, self.file_structure_count
            )));
        }
        if !self.unit_in_mm.is_finite() || self.unit_in_mm <= 0.0 {
            return Err(PrcError::InvalidConfiguration(
                "unit must be finite and positive".into(),
            ));
        }
        if !self.tessellation_chord_height_ratio.is_finite()
            || !self.tessellation_angle_degrees.is_finite()
        {
            return Err(PrcError::InvalidConfiguration(
                "tessellation parameters must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Lifecycle of a document. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentPhase {
    /// Accepting entities
    Building,
    /// `finish` has started; sections are being prepared, measured or written
    Prepared,
    /// The file has been written
    Written,
}

/// Where an added entity ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityReference {
    /// File structure index
    pub structure: u32,
    /// Representation item ordinal within the structure
    pub ordinal: u32,
    /// Palette index of the entity's colour
    pub colour_index: u32,
}

/// A PRC file under construction.
///
/// # Usage
/// ```no_run
/// use prcrust::{PrcDocument, Polyline, RgbaColor, Vector3};
///
/// let mut doc = PrcDocument::new()?;
/// let line = Polyline::new(vec![Vector3::ZERO, Vector3::UNIT_X])?.with_colour(RgbaColor::RED);
/// doc.add(line)?;
/// doc.finish_to_file("out.prc")?;
/// # Ok::<(), prcrust::PrcError>(())
/// ```
#[derive(Debug)]
pub struct PrcDocument {
    config: PrcWriterConfiguration,
    phase: DocumentPhase,
    header_uid: Uid,
    structures: Vec<FileStructure>,
    model_file: CompressedSection,
    palette: Palette,
    entity_refs: Vec<EntityReference>,
    uncompressed_files: Vec<UncompressedFile>,
    header: Option<PrcHeader>,
}

impl PrcDocument {
    /// Document with the default configuration and random identifiers.
    pub fn new() -> Result<Self> {
        Self::with_configuration(PrcWriterConfiguration::default())
    }

    pub fn with_configuration(config: PrcWriterConfiguration) -> Result<Self> {
        Self::with_uid_source(config, RandomUidSource)
    }

    /// Document drawing its identifiers from `source`.
    pub fn with_uid_source<S: UidSource>(
        config: PrcWriterConfiguration,
        mut source: S,
    ) -> Result<Self> {
        config.validate()?;

        let mut seen = AHashSet::new();
        let header_uid = draw_unique(&mut source, &mut seen)?;
        let mut structures = Vec::with_capacity(config.file_structure_count as usize);
        for index in 0..config.file_structure_count {
            let uid = draw_unique(&mut source, &mut seen)?;
            let start_header = StartHeader::new(
                uid,
                config.application_uid,
                config.minimal_version_for_read,
                config.authoring_version,
            );
            structures.push(FileStructure::new(index, start_header, config.compression_level));
        }

        debug!(
            structures = structures.len(),
            header_uid = %header_uid,
            "created PRC document"
        );

        Ok(Self {
            model_file: CompressedSection::new(SectionKind::ModelFile, config.compression_level),
            config,
            phase: DocumentPhase::Building,
            header_uid,
            structures,
            palette: Palette::new(),
            entity_refs: Vec::new(),
            uncompressed_files: Vec::new(),
            header: None,
        })
    }

    pub fn configuration(&self) -> &PrcWriterConfiguration {
        &self.config
    }

    pub fn phase(&self) -> DocumentPhase {
        self.phase
    }

    /// Identifier of the file header's start header.
    pub fn header_uid(&self) -> Uid {
        self.header_uid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn structure_count(&self) -> u32 {
        self.config.file_structure_count
    }

    pub fn file_structure(&self, index: u32) -> Option<&FileStructure> {
        self.structures.get(index as usize)
    }

    pub fn file_structures(&self) -> impl Iterator<Item = &FileStructure> {
        self.structures.iter()
    }

    pub fn model_file(&self) -> &CompressedSection {
        &self.model_file
    }

    /// Every entity added so far, in insertion order.
    pub fn entity_references(&self) -> &[EntityReference] {
        &self.entity_refs
    }

    /// The measured header, available once `finish` has succeeded.
    pub fn header(&self) -> Option<&PrcHeader> {
        self.header.as_ref()
    }

    /// Palette index of `colour`, inserting it if new.
    ///
    /// Only allowed while the document is being built; the palette is frozen
    /// once `finish` starts.
    pub fn colour_index(&mut self, colour: RgbaColor) -> Result<u32> {
        self.require_building("intern a colour")?;
        self.intern_colour(colour)
    }

    /// Add an entity to the default file structure.
    pub fn add(&mut self, entity: impl Into<PrcEntity>) -> Result<EntityReference> {
        self.add_to(self.config.default_structure, entity)
    }

    /// Add an entity to file structure `structure`.
    pub fn add_to(
        &mut self,
        structure: u32,
        entity: impl Into<PrcEntity>,
    ) -> Result<EntityReference> {
        self.require_building("add an entity")?;
        self.check_structure(structure)?;

        let mut entity = entity.into();
        let colour_index = self.intern_colour(entity.colour())?;
        entity.as_entity_mut().common_mut().colour_index = Some(colour_index);
        let kind = entity.kind();

        let ordinal = self.structures[structure as usize].add_entity(entity);
        let reference = EntityReference {
            structure,
            ordinal: to_u32(ordinal, "representation item ordinal")?,
            colour_index,
        };
        self.entity_refs.push(reference);

        trace!(?kind, structure, ordinal, colour_index, "entity added");
        Ok(reference)
    }

    /// Attach a verbatim block to file structure `structure`.
    pub fn add_uncompressed_block(&mut self, structure: u32, data: Vec<u8>) -> Result<()> {
        self.require_building("add an uncompressed block")?;
        self.check_structure(structure)?;
        self.structures[structure as usize].add_uncompressed_block(data);
        Ok(())
    }

    /// Attach a verbatim file to the file header.
    pub fn add_uncompressed_file(&mut self, data: Vec<u8>) -> Result<()> {
        self.require_building("add an uncompressed file")?;
        self.uncompressed_files.push(UncompressedFile::new(data));
        Ok(())
    }

    /// Prepare, measure and write the whole file to `out`.
    ///
    /// Can be called once. Returns the number of bytes written.
    pub fn finish<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<u32> {
        self.require_building("finish")?;
        self.phase = DocumentPhase::Prepared;

        self.prepare()?;
        let header = self.measure()?;

        let mut counter = CountingWriter::new(out);
        header.write(&mut counter)?;
        for structure in &self.structures {
            structure.write(&mut counter)?;
        }
        self.model_file.write(&mut counter)?;
        counter.flush()?;

        let written = counter.count();
        if written != u64::from(header.file_size) {
            return Err(PrcError::SizeMismatch {
                expected: u64::from(header.file_size),
                actual: written,
            });
        }

        debug!(bytes = written, "PRC file written");
        let file_size = header.file_size;
        self.header = Some(header);
        self.phase = DocumentPhase::Written;
        Ok(file_size)
    }

    /// Finish into a new byte vector.
    pub fn finish_to_vec(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.finish(&mut out)?;
        Ok(out)
    }

    /// Finish into a file at `path`, creating or truncating it.
    pub fn finish_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<u32> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        let size = self.finish(&mut writer)?;
        writer.flush()?;
        Ok(size)
    }

    fn prepare(&mut self) -> Result<()> {
        for structure in &mut self.structures {
            structure.prepare(&self.palette, &self.config)?;
        }

        let uids: Vec<Uid> = self.structures.iter().map(FileStructure::uid).collect();
        self.model_file
            .prepare(&ModelFileWriter::new(&self.config, &uids, &self.entity_refs))?;

        debug!(
            structures = self.structures.len(),
            entities = self.entity_refs.len(),
            colours = self.palette.len(),
            "sections prepared"
        );
        Ok(())
    }

    /// Build the header: its size depends only on counts, so structure
    /// offsets follow as a running total from it.
    fn measure(&self) -> Result<PrcHeader> {
        let mut header = PrcHeader::new(StartHeader::new(
            self.header_uid,
            self.config.application_uid,
            self.config.minimal_version_for_read,
            self.config.authoring_version,
        ));
        header.file_structures = self
            .structures
            .iter()
            .map(|s| FileStructureInformation::with_placeholder_offsets(s.uid(), OFFSETS_PER_FILE_STRUCTURE))
            .collect();
        header.uncompressed_files = self.uncompressed_files.clone();

        let header_size = header.size()?;
        let mut cursor = u64::from(header_size);
        for (info, structure) in header.file_structures.iter_mut().zip(&self.structures) {
            info.offsets = structure.section_offsets(offset(cursor)?)?;
            cursor += u64::from(structure.size()?);
        }
        header.model_file_offset = offset(cursor)?;
        cursor += u64::from(self.model_file.size()?);
        header.file_size = offset(cursor)?;

        debug!(
            header_size,
            model_file_offset = header.model_file_offset,
            file_size = header.file_size,
            "layout measured"
        );
        Ok(header)
    }

    fn intern_colour(&mut self, colour: RgbaColor) -> Result<u32> {
        if !colour.is_finite() {
            return Err(PrcError::InvalidColour(format!(
                "{colour} has a non-finite channel"
            )));
        }
        self.palette.intern(colour)
    }

    fn require_building(&self, action: &str) -> Result<()> {
        match self.phase {
            DocumentPhase::Building => Ok(()),
            phase => Err(PrcError::InvalidState(format!(
                "cannot {action}: document is {phase:?}"
            ))),
        }
    }

    fn check_structure(&self, index: u32) -> Result<()> {
        if index >= self.structure_count() {
            return Err(PrcError::StructureIndexOutOfRange {
                index,
                count: self.structure_count(),
            });
        }
        Ok(())
    }
}

fn offset(position: u64) -> Result<u32> {
    u32::try_from(position).map_err(|_| PrcError::SizeOverflow("file exceeds 4 GiB".into()))
}

fn draw_unique<S: UidSource>(source: &mut S, seen: &mut AHashSet<Uid>) -> Result<Uid> {
    let mut last = Uid::NIL;
    for _ in 0..MAX_UID_ATTEMPTS {
        last = source.next_uid();
        if seen.insert(last) {
            return Ok(last);
        }
        trace!(uid = %last, "identifier already in use, drawing again");
    }
    Err(PrcError::DuplicateIdentifier(format!(
        "{last} after {MAX_UID_ATTEMPTS} attempts"
    )))
}

/// Forwards to an inner writer and counts the bytes that went through.
struct CountingWriter<'a, W: Write + ?Sized> {
    inner: &'a mut W,
    count: u64,
}

impl<'a, W: Write + ?Sized> CountingWriter<'a, W> {
    fn new(inner: &'a mut W) -> Self {
        Self { inner, count: 0 }
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<W: Write + ?Sized> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

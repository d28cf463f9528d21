//! Shared test utilities for prcrust integration tests.
//!
//! The library only writes PRC, so the tests carry a minimal reader that
//! walks the header, file structures and section frames of a finished file.

#![allow(dead_code)]

pub mod builders;

use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;
use prcrust::Uid;
use std::io::{Cursor, Read};

pub type ParseResult<T> = std::io::Result<T>;

// ===========================================================================
// Parsed records
// ===========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStartHeader {
    pub magic: [u8; 3],
    pub minimal_version_for_read: u32,
    pub authoring_version: u32,
    pub file_structure_uid: Uid,
    pub application_uid: Uid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStructureInfo {
    pub uid: Uid,
    pub reserved: u32,
    pub offsets: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct ParsedHeader {
    pub start_header: ParsedStartHeader,
    pub structures: Vec<ParsedStructureInfo>,
    pub model_file_offset: u32,
    pub file_size: u32,
    pub uncompressed_files: Vec<Vec<u8>>,
    /// Bytes consumed by the header
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct ParsedSection {
    pub offset: u64,
    pub uncompressed_len: u32,
    pub compressed_len: u32,
    pub tag: u32,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ParsedStructure {
    pub start_header: ParsedStartHeader,
    pub uncompressed_blocks: Vec<Vec<u8>>,
    pub sections: Vec<ParsedSection>,
    /// Offset just past the last section
    pub end: u64,
}

// ===========================================================================
// Reader
// ===========================================================================

fn read_uid(cur: &mut Cursor<&[u8]>) -> ParseResult<Uid> {
    let mut words = [0u32; 4];
    for w in &mut words {
        *w = cur.read_u32::<LittleEndian>()?;
    }
    Ok(Uid::new(words))
}

fn read_blocks(cur: &mut Cursor<&[u8]>) -> ParseResult<Vec<Vec<u8>>> {
    let count = cur.read_u32::<LittleEndian>()?;
    let mut blocks = Vec::new();
    for _ in 0..count {
        let len = cur.read_u32::<LittleEndian>()? as usize;
        let mut data = vec![0u8; len];
        cur.read_exact(&mut data)?;
        blocks.push(data);
    }
    Ok(blocks)
}

pub fn read_start_header(cur: &mut Cursor<&[u8]>) -> ParseResult<ParsedStartHeader> {
    let mut magic = [0u8; 3];
    cur.read_exact(&mut magic)?;
    Ok(ParsedStartHeader {
        magic,
        minimal_version_for_read: cur.read_u32::<LittleEndian>()?,
        authoring_version: cur.read_u32::<LittleEndian>()?,
        file_structure_uid: read_uid(cur)?,
        application_uid: read_uid(cur)?,
    })
}

pub fn parse_header(bytes: &[u8]) -> ParseResult<ParsedHeader> {
    let mut cur = Cursor::new(bytes);
    let start_header = read_start_header(&mut cur)?;
    let count = cur.read_u32::<LittleEndian>()?;
    let mut structures = Vec::new();
    for _ in 0..count {
        let uid = read_uid(&mut cur)?;
        let reserved = cur.read_u32::<LittleEndian>()?;
        let n = cur.read_u32::<LittleEndian>()?;
        let mut offsets = Vec::new();
        for _ in 0..n {
            offsets.push(cur.read_u32::<LittleEndian>()?);
        }
        structures.push(ParsedStructureInfo {
            uid,
            reserved,
            offsets,
        });
    }
    let model_file_offset = cur.read_u32::<LittleEndian>()?;
    let file_size = cur.read_u32::<LittleEndian>()?;
    let uncompressed_files = read_blocks(&mut cur)?;
    Ok(ParsedHeader {
        start_header,
        structures,
        model_file_offset,
        file_size,
        uncompressed_files,
        size: cur.position(),
    })
}

/// Read one section frame at `offset` and inflate its payload.
pub fn parse_section(bytes: &[u8], offset: u64) -> ParseResult<ParsedSection> {
    let mut cur = Cursor::new(bytes);
    cur.set_position(offset);
    let uncompressed_len = cur.read_u32::<LittleEndian>()?;
    let compressed_len = cur.read_u32::<LittleEndian>()?;
    let tag = cur.read_u32::<LittleEndian>()?;
    let start = cur.position() as usize;
    let end = start + compressed_len as usize;
    let compressed = bytes.get(start..end).ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "section runs past end")
    })?;
    let mut payload = Vec::new();
    ZlibDecoder::new(compressed).read_to_end(&mut payload)?;
    Ok(ParsedSection {
        offset,
        uncompressed_len,
        compressed_len,
        tag,
        payload,
    })
}

/// Read the file structure starting at `offset`.
pub fn parse_structure(bytes: &[u8], offset: u64) -> ParseResult<ParsedStructure> {
    let mut cur = Cursor::new(bytes);
    cur.set_position(offset);
    let start_header = read_start_header(&mut cur)?;
    let uncompressed_blocks = read_blocks(&mut cur)?;
    let mut position = cur.position();
    let mut sections = Vec::new();
    for _ in 0..5 {
        let section = parse_section(bytes, position)?;
        position += 12 + u64::from(section.compressed_len);
        sections.push(section);
    }
    Ok(ParsedStructure {
        start_header,
        uncompressed_blocks,
        sections,
        end: position,
    })
}

/// Little-endian u32 at `at` within a payload.
pub fn word(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(data[at..at + 4].try_into().unwrap())
}

pub fn double(data: &[u8], at: usize) -> f64 {
    f64::from_le_bytes(data[at..at + 8].try_into().unwrap())
}

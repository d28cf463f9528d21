//! Append-only little-endian byte buffer with in-place compression.
//!
//! Every compressed section serializes its payload into a [`ByteSink`],
//! then calls [`ByteSink::compress`] once. After compression the sink is
//! frozen: it holds the zlib stream and remembers both lengths, which the
//! section frame needs.

use crate::error::{to_u32, PrcError, Result};
use crate::types::{Uid, Vector3};

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use std::io::Write;

/// Growable output buffer for one section payload.
#[derive(Debug, Default)]
pub struct ByteSink {
    data: Vec<u8>,
    /// Set once `compress` has replaced `data` with its zlib encoding.
    uncompressed_len: Option<u32>,
}

impl ByteSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bytes: the raw payload before compression, the zlib stream after.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `compress` has run.
    pub fn is_compressed(&self) -> bool {
        self.uncompressed_len.is_some()
    }

    /// Payload length before compression.
    pub fn uncompressed_len(&self) -> Option<u32> {
        self.uncompressed_len
    }

    /// Length of the zlib stream.
    pub fn compressed_len(&self) -> Option<u32> {
        self.uncompressed_len.map(|_| self.data.len() as u32)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_compressed() {
            return Err(PrcError::InvalidState(
                "write to a byte sink after compression".to_string(),
            ));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Primitive writes
    // ---------------------------------------------------------------

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.ensure_open()?;
        self.data.write_u8(value)?;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.ensure_open()?;
        self.data.write_u32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.ensure_open()?;
        self.data.write_i32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.ensure_open()?;
        self.data.write_f64::<LittleEndian>(value)?;
        Ok(())
    }

    /// Raw bytes with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_open()?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// UTF-8 string prefixed with its byte length.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let len = to_u32(value.len(), "string")?;
        self.write_u32(len)?;
        self.write_bytes(value.as_bytes())
    }

    // ---------------------------------------------------------------
    // Composite writes
    // ---------------------------------------------------------------

    /// Identifier as four u32 words.
    pub fn write_uid(&mut self, uid: &Uid) -> Result<()> {
        for word in uid.words() {
            self.write_u32(word)?;
        }
        Ok(())
    }

    /// Point as three f64 (x, y, z).
    pub fn write_point(&mut self, point: &Vector3) -> Result<()> {
        for c in point.to_array() {
            self.write_f64(c)?;
        }
        Ok(())
    }

    /// Count prefix for a list of `len` records.
    pub fn write_count(&mut self, len: usize) -> Result<()> {
        let count = to_u32(len, "record count")?;
        self.write_u32(count)
    }

    // ---------------------------------------------------------------
    // Compression
    // ---------------------------------------------------------------

    /// Replace the buffer with its zlib encoding at `level` (0–9).
    ///
    /// Records the original length. A sink can only be compressed once.
    pub fn compress(&mut self, level: u32) -> Result<()> {
        self.ensure_open()?;
        let uncompressed_len = to_u32(self.data.len(), "section payload")?;

        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(self.data.len() / 2 + 16),
            Compression::new(level),
        );
        encoder
            .write_all(&self.data)
            .map_err(|e| PrcError::Compression(format!("write failed: {e}")))?;
        let compressed = encoder
            .finish()
            .map_err(|e| PrcError::Compression(format!("finish failed: {e}")))?;
        to_u32(compressed.len(), "compressed section")?;

        self.data = compressed;
        self.uncompressed_len = Some(uncompressed_len);
        Ok(())
    }
}

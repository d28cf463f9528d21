//! # prcrust
//!
//! A pure Rust writer for PRC, the compressed 3D container format embedded in
//! PDF documents.
//!
//! ## Features
//!
//! - NURBS surfaces, NURBS curves and polylines with per-entity colours
//! - Colour palette with exact deduplication
//! - Any number of file structures, each with five zlib-compressed sections
//! - Self-consistent offset table, identifiers and file size
//!
//! ## Quick Start
//!
//! ```no_run
//! use prcrust::{PrcDocument, Polyline, RgbaColor, Vector3};
//!
//! let mut doc = PrcDocument::new()?;
//! let line = Polyline::new(vec![Vector3::ZERO, Vector3::new(1.0, 1.0, 0.0)])?
//!     .with_colour(RgbaColor::BLUE);
//! doc.add(line)?;
//! let bytes = doc.finish_to_vec()?;
//! assert_eq!(&bytes[0..3], b"PRC");
//! # Ok::<(), prcrust::error::PrcError>(())
//! ```
//!
//! ## Architecture
//!
//! - `Entity` - Trait for self-serializing geometry
//! - `PrcEntity` - Enum over every entity kind
//! - `CompressedSection` - Buffer that becomes measurable once compressed
//! - `PrcDocument` - Central document; prepares, measures and writes

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod palette;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, PrcError, Result};
pub use types::{BoundingBox3D, RgbaColor, Uid, Vector3};

// Re-export entity types
pub use entities::{ContinuityFlags, Curve, Entity, EntityKind, PrcEntity, Polyline, Surface};

// Re-export document
pub use document::{DocumentPhase, EntityReference, PrcDocument, PrcWriterConfiguration};
pub use palette::Palette;

// Re-export I/O types
pub use io::prc::{CompressedSection, PrcHeader, RandomUidSource, SequentialUidSource, UidSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

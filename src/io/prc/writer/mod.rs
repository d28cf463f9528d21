//! PRC section payload writers.
//!
//! Each compressed section gets its semantic content from one writer:
//!
//! - [`globals_writer`]: tessellation defaults, colour and style tables
//! - [`tree_writer`]: part definition with every representation item
//! - [`tessellation_writer`]: empty; no tessellated data is produced
//! - [`geometry_writer`]: topological contexts
//! - [`extra_geometry_writer`]: bounding boxes and continuity flags
//! - [`model_file_writer`]: product occurrences and document entity list

pub mod extra_geometry_writer;
pub mod geometry_writer;
pub mod globals_writer;
pub mod model_file_writer;
pub mod tessellation_writer;
pub mod tree_writer;

pub use extra_geometry_writer::ExtraGeometryWriter;
pub use geometry_writer::GeometryWriter;
pub use globals_writer::GlobalsWriter;
pub use model_file_writer::ModelFileWriter;
pub use tessellation_writer::TessellationWriter;
pub use tree_writer::TreeWriter;

use crate::error::Result;
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::SectionKind;

/// Produces the uncompressed payload of one section kind.
pub trait SectionWriter {
    /// The section this payload belongs to.
    fn section_kind(&self) -> SectionKind;

    /// Append the payload to `sink`.
    fn write_data(&self, sink: &mut ByteSink) -> Result<()>;
}

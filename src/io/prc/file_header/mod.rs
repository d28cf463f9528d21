//! PRC file header structures.
//!
//! - [`StartHeader`]: magic, versions and identifiers opening the file and
//!   every file structure
//! - [`UncompressedFile`]: verbatim payload blocks
//! - [`PrcHeader`] / [`FileStructureInformation`]: the offset table

mod header;
mod start_header;
mod uncompressed_file;

pub use header::{FileStructureInformation, PrcHeader};
pub use start_header::StartHeader;
pub use uncompressed_file::UncompressedFile;

pub(crate) use uncompressed_file::{table_size, write_table};

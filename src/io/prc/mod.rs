//! PRC binary container writer.
//!
//! A PRC file is a header with an offset table, followed by one or more file
//! structures of five compressed sections each, and a trailing model file
//! section. Sizes of compressed sections are only known after compression,
//! so everything is prepared before anything is measured or written.

pub mod byte_sink;
pub mod compressed_section;
pub mod constants;
pub mod file_header;
pub mod file_structure;
pub mod uid_source;
pub mod writer;

pub use byte_sink::ByteSink;
pub use compressed_section::{CompressedSection, SectionState};
pub use constants::SectionKind;
pub use file_header::{FileStructureInformation, PrcHeader, StartHeader, UncompressedFile};
pub use file_structure::FileStructure;
pub use uid_source::{RandomUidSource, SequentialUidSource, UidSource};
pub use writer::SectionWriter;

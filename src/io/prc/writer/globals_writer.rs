//! Globals section writer.
//!
//! Carries the tessellation tolerances, the default font family, the colour
//! table and one style per colour. Entities reference styles by palette
//! index, so every file structure repeats the whole palette.
//!
//! Layout:
//! ```text
//! RL  type code (303)
//! RL  number of referenced file structures (0)
//! RD  tessellation chord height ratio
//! RD  tessellation angle (degrees)
//! TV  default font family name
//! RL  number of fonts (0)
//! RL  number of colours, then 4RD per colour
//! RL  number of pictures (0)
//! RL  number of texture definitions (0)
//! RL  number of materials (0)
//! RL  number of styles, then per style:
//!     RL  type code (701)
//!     RD  line width
//!     B   is vpicture
//!     RL  colour index
//!     B   is transparent
//!     RC  transparency (if transparent)
//! RL  number of fill patterns (0)
//! RL  number of reference coordinate systems (0)
//! RL  user data bit count (0)
//! ```

use super::SectionWriter;
use crate::document::PrcWriterConfiguration;
use crate::error::{to_u32, Result};
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::{type_codes, SectionKind};
use crate::palette::Palette;

/// Writer for a file structure's Globals section.
pub struct GlobalsWriter<'a> {
    palette: &'a Palette,
    config: &'a PrcWriterConfiguration,
}

impl<'a> GlobalsWriter<'a> {
    pub fn new(palette: &'a Palette, config: &'a PrcWriterConfiguration) -> Self {
        Self { palette, config }
    }
}

impl SectionWriter for GlobalsWriter<'_> {
    fn section_kind(&self) -> SectionKind {
        SectionKind::Globals
    }

    fn write_data(&self, sink: &mut ByteSink) -> Result<()> {
        sink.write_u32(type_codes::ASM_FILE_STRUCTURE_GLOBALS)?;
        sink.write_u32(0)?; // referenced file structures
        sink.write_f64(self.config.tessellation_chord_height_ratio)?;
        sink.write_f64(self.config.tessellation_angle_degrees)?;
        sink.write_string(&self.config.default_font_family)?;
        sink.write_u32(0)?; // fonts

        sink.write_count(self.palette.len())?;
        for colour in self.palette.iter() {
            sink.write_f64(colour.r)?;
            sink.write_f64(colour.g)?;
            sink.write_f64(colour.b)?;
            sink.write_f64(colour.a)?;
        }

        sink.write_u32(0)?; // pictures
        sink.write_u32(0)?; // texture definitions
        sink.write_u32(0)?; // materials

        sink.write_count(self.palette.len())?;
        for (index, colour) in self.palette.iter().enumerate() {
            sink.write_u32(type_codes::GRAPH_STYLE)?;
            sink.write_f64(0.0)?;
            sink.write_bool(false)?;
            sink.write_u32(to_u32(index, "style colour index")?)?;
            sink.write_bool(colour.is_transparent())?;
            if colour.is_transparent() {
                sink.write_u8(colour.transparency_byte())?;
            }
        }

        sink.write_u32(0)?; // fill patterns
        sink.write_u32(0)?; // reference coordinate systems
        sink.write_u32(0) // user data
    }
}

//! Constants, magic bytes, and type codes for the PRC file format.

/// Magic bytes that open every start header.
pub const PRC_MAGIC: [u8; 3] = *b"PRC";

/// Default reader/authoring version written in start headers.
pub const DEFAULT_PRC_VERSION: u32 = 7094;

/// Start header: magic + two versions + two identifiers.
pub const START_HEADER_SIZE: u32 = 3 + 4 + 4 + 16 + 16;

/// Section frame: uncompressed length + compressed length + type tag.
pub const SECTION_HEADER_SIZE: u32 = 12;

/// Offsets recorded per file structure: its start and each of its sections.
pub const OFFSETS_PER_FILE_STRUCTURE: u32 = 6;

/// Upper bound on file structures per document.
pub const MAX_FILE_STRUCTURES: u32 = 65_536;

/// Attempts at drawing a fresh identifier before giving up.
pub const MAX_UID_ATTEMPTS: usize = 16;

/// PRC type codes written as record tags.
pub mod type_codes {
    // Curves
    pub const CRV_NURBS: u32 = 13;
    pub const CRV_POLYLINE: u32 = 20;

    // Surfaces
    pub const SURF_NURBS: u32 = 79;

    // Topology
    pub const TOPO_CONTEXT: u32 = 141;
    pub const TOPO_WIRE_EDGE: u32 = 145;
    pub const TOPO_FACE: u32 = 149;
    pub const TOPO_SHELL: u32 = 150;
    pub const TOPO_CONNEX: u32 = 151;
    pub const TOPO_SINGLE_WIRE_BODY: u32 = 153;
    pub const TOPO_BREP_DATA: u32 = 154;

    // Representation items
    pub const RI_BREP_MODEL: u32 = 232;
    pub const RI_CURVE: u32 = 233;
    pub const RI_POLY_WIRE: u32 = 238;

    // Assembly
    pub const ASM_MODEL_FILE: u32 = 301;
    pub const ASM_FILE_STRUCTURE_GLOBALS: u32 = 303;
    pub const ASM_FILE_STRUCTURE_TREE: u32 = 304;
    pub const ASM_FILE_STRUCTURE_TESSELLATION: u32 = 305;
    pub const ASM_FILE_STRUCTURE_GEOMETRY: u32 = 306;
    pub const ASM_FILE_STRUCTURE_EXTRA_GEOMETRY: u32 = 307;
    pub const ASM_PRODUCT_OCCURRENCE: u32 = 310;
    pub const ASM_PART_DEFINITION: u32 = 311;

    // Graphics
    pub const GRAPH_STYLE: u32 = 701;
}

/// The six compressed section kinds, in the order they appear on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Globals,
    Tree,
    Tessellation,
    Geometry,
    ExtraGeometry,
    ModelFile,
}

impl SectionKind {
    /// Sections owned by every file structure, in write order.
    pub const FILE_STRUCTURE_ORDER: [SectionKind; 5] = [
        SectionKind::Globals,
        SectionKind::Tree,
        SectionKind::Tessellation,
        SectionKind::Geometry,
        SectionKind::ExtraGeometry,
    ];

    /// Type tag written in the section frame.
    pub fn type_code(&self) -> u32 {
        match self {
            SectionKind::Globals => type_codes::ASM_FILE_STRUCTURE_GLOBALS,
            SectionKind::Tree => type_codes::ASM_FILE_STRUCTURE_TREE,
            SectionKind::Tessellation => type_codes::ASM_FILE_STRUCTURE_TESSELLATION,
            SectionKind::Geometry => type_codes::ASM_FILE_STRUCTURE_GEOMETRY,
            SectionKind::ExtraGeometry => type_codes::ASM_FILE_STRUCTURE_EXTRA_GEOMETRY,
            SectionKind::ModelFile => type_codes::ASM_MODEL_FILE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Globals => "Globals",
            SectionKind::Tree => "Tree",
            SectionKind::Tessellation => "Tessellation",
            SectionKind::Geometry => "Geometry",
            SectionKind::ExtraGeometry => "ExtraGeometry",
            SectionKind::ModelFile => "ModelFile",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//! End-to-end PRC writer tests.
//!
//! Every test finishes a document and reads the bytes back with the minimal
//! inspector in `common`.

mod common;

use common::builders;
use prcrust::io::prc::constants::{type_codes, OFFSETS_PER_FILE_STRUCTURE, START_HEADER_SIZE};
use prcrust::io::prc::SectionKind;
use prcrust::{DocumentPhase, PrcDocument, PrcError, RgbaColor};

// ===========================================================================
// Single structure, single polyline
// ===========================================================================

mod single_polyline {
    use super::*;

    fn finished() -> (PrcDocument, Vec<u8>) {
        let mut doc = builders::sequential_document(1);
        doc.add(builders::black_segment()).unwrap();
        let bytes = doc.finish_to_vec().unwrap();
        (doc, bytes)
    }

    #[test]
    fn test_first_offset_is_header_size() {
        let (_, bytes) = finished();
        let header = common::parse_header(&bytes).unwrap();
        assert_eq!(header.structures.len(), 1);
        assert_eq!(u64::from(header.structures[0].offsets[0]), header.size);
    }

    #[test]
    fn test_start_header_fields() {
        let (doc, bytes) = finished();
        let header = common::parse_header(&bytes).unwrap();
        assert_eq!(&header.start_header.magic, b"PRC");
        assert_eq!(header.start_header.minimal_version_for_read, 7094);
        assert_eq!(header.start_header.authoring_version, 7094);
        assert_eq!(header.start_header.file_structure_uid, doc.header_uid());
        assert!(header.start_header.application_uid.is_nil());
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let (_, bytes) = finished();
        let header = common::parse_header(&bytes).unwrap();
        let structure = common::parse_structure(&bytes, header.size).unwrap();

        let tags: Vec<u32> = structure.sections.iter().map(|s| s.tag).collect();
        let expected: Vec<u32> = SectionKind::FILE_STRUCTURE_ORDER
            .iter()
            .map(|k| k.type_code())
            .collect();
        assert_eq!(tags, expected);
        assert_eq!(tags, vec![303, 304, 305, 306, 307]);

        for (section, offset) in structure.sections.iter().zip(&header.structures[0].offsets[1..]) {
            assert_eq!(section.offset, u64::from(*offset));
            assert_eq!(section.payload.len() as u32, section.uncompressed_len);
        }
    }

    #[test]
    fn test_tessellation_is_empty_frame() {
        let (_, bytes) = finished();
        let header = common::parse_header(&bytes).unwrap();
        let structure = common::parse_structure(&bytes, header.size).unwrap();
        let tessellation = &structure.sections[2];
        assert_eq!(tessellation.tag, type_codes::ASM_FILE_STRUCTURE_TESSELLATION);
        assert_eq!(tessellation.uncompressed_len, 0);
        assert!(tessellation.payload.is_empty());
        // an empty zlib stream still has a header and checksum
        assert!(tessellation.compressed_len > 0);
    }

    #[test]
    fn test_model_file_follows_structure() {
        let (_, bytes) = finished();
        let header = common::parse_header(&bytes).unwrap();
        let structure = common::parse_structure(&bytes, header.size).unwrap();
        assert_eq!(u64::from(header.model_file_offset), structure.end);

        let model = common::parse_section(&bytes, structure.end).unwrap();
        assert_eq!(model.tag, type_codes::ASM_MODEL_FILE);
        assert_eq!(model.offset + 12 + u64::from(model.compressed_len), bytes.len() as u64);
        assert_eq!(header.file_size as usize, bytes.len());
    }

    #[test]
    fn test_globals_carry_palette() {
        let (doc, bytes) = finished();
        assert_eq!(doc.palette().len(), 1);
        let header = common::parse_header(&bytes).unwrap();
        let structure = common::parse_structure(&bytes, header.size).unwrap();
        let globals = &structure.sections[0].payload;

        assert_eq!(common::word(globals, 0), type_codes::ASM_FILE_STRUCTURE_GLOBALS);
        let colours_at = 8 + 16 + 4 + 4;
        assert_eq!(common::word(globals, colours_at), 1);
        assert_eq!(common::double(globals, colours_at + 4), 0.0);
        assert_eq!(common::double(globals, colours_at + 28), 1.0);
    }

    #[test]
    fn test_tree_holds_polyline() {
        let (_, bytes) = finished();
        let header = common::parse_header(&bytes).unwrap();
        let structure = common::parse_structure(&bytes, header.size).unwrap();
        let tree = &structure.sections[1].payload;

        assert_eq!(common::word(tree, 0), type_codes::ASM_FILE_STRUCTURE_TREE);
        let items_at = 16 + 48;
        assert_eq!(common::word(tree, items_at), 1);
        let item = items_at + 4;
        assert_eq!(common::word(tree, item), type_codes::RI_POLY_WIRE);
        assert_eq!(common::word(tree, item + 4), 0); // ordinal
        assert_eq!(common::word(tree, item + 8), 0); // style
        assert_eq!(common::word(tree, item + 16), 2); // points
    }
}

// ===========================================================================
// Several structures
// ===========================================================================

mod multiple_structures {
    use super::*;

    #[test]
    fn test_offsets_are_running_totals() {
        let mut doc = builders::mixed_document(3);
        let bytes = doc.finish_to_vec().unwrap();
        let header = common::parse_header(&bytes).unwrap();
        assert_eq!(header.structures.len(), 3);

        let mut expected = header.size;
        for info in &header.structures {
            assert_eq!(info.offsets.len(), OFFSETS_PER_FILE_STRUCTURE as usize);
            assert_eq!(info.reserved, 0);
            assert_eq!(u64::from(info.offsets[0]), expected);
            let structure = common::parse_structure(&bytes, expected).unwrap();
            expected = structure.end;
        }
        assert_eq!(u64::from(header.model_file_offset), expected);
        assert_eq!(header.file_size as usize, bytes.len());
    }

    #[test]
    fn test_identifiers_match_start_headers() {
        let mut doc = builders::mixed_document(4);
        let bytes = doc.finish_to_vec().unwrap();
        let header = common::parse_header(&bytes).unwrap();

        let mut seen = vec![header.start_header.file_structure_uid];
        for (index, info) in header.structures.iter().enumerate() {
            let structure = common::parse_structure(&bytes, u64::from(info.offsets[0])).unwrap();
            assert_eq!(structure.start_header.file_structure_uid, info.uid);
            assert_eq!(doc.file_structure(index as u32).unwrap().uid(), info.uid);
            assert!(!seen.contains(&info.uid));
            seen.push(info.uid);
        }
    }

    #[test]
    fn test_palette_shared_by_structures() {
        let mut doc = builders::mixed_document(2);
        assert_eq!(doc.palette().len(), 3);
        let bytes = doc.finish_to_vec().unwrap();
        let header = common::parse_header(&bytes).unwrap();

        let first = common::parse_structure(&bytes, u64::from(header.structures[0].offsets[0])).unwrap();
        let second = common::parse_structure(&bytes, u64::from(header.structures[1].offsets[0])).unwrap();
        assert_eq!(first.sections[0].payload, second.sections[0].payload);
        assert_ne!(first.sections[1].payload, second.sections[1].payload);
    }

    #[test]
    fn test_model_file_lists_structures_and_entities() {
        let mut doc = builders::mixed_document(2);
        let bytes = doc.finish_to_vec().unwrap();
        let header = common::parse_header(&bytes).unwrap();
        let model = common::parse_section(&bytes, u64::from(header.model_file_offset)).unwrap();
        let data = &model.payload;

        // tag, "PRC file", unit, flag
        let structures_at = 4 + 4 + 8 + 8 + 1;
        assert_eq!(common::word(data, structures_at), 2);
        assert_eq!(common::word(data, structures_at + 4), header.structures[0].uid.0[0]);
        let refs_at = structures_at + 4 + 2 * 20 + 4 + 2 * 8;
        assert_eq!(common::word(data, refs_at), 6);
        assert_eq!(data.len(), refs_at + 4 + 6 * 12);
    }
}

// ===========================================================================
// Uncompressed payloads
// ===========================================================================

mod uncompressed {
    use super::*;

    #[test]
    fn test_blocks_and_files_written_verbatim() {
        let mut doc = builders::sequential_document(2);
        doc.add_uncompressed_file(b"header file".to_vec()).unwrap();
        doc.add_uncompressed_block(1, vec![1, 2, 3]).unwrap();
        assert!(matches!(
            doc.add_uncompressed_block(2, vec![]),
            Err(PrcError::StructureIndexOutOfRange { .. })
        ));
        let bytes = doc.finish_to_vec().unwrap();

        let header = common::parse_header(&bytes).unwrap();
        assert_eq!(header.uncompressed_files, vec![b"header file".to_vec()]);
        let first = common::parse_structure(&bytes, u64::from(header.structures[0].offsets[0])).unwrap();
        let second = common::parse_structure(&bytes, u64::from(header.structures[1].offsets[0])).unwrap();
        assert!(first.uncompressed_blocks.is_empty());
        assert_eq!(second.uncompressed_blocks, vec![vec![1, 2, 3]]);
        assert_eq!(
            u64::from(header.structures[1].offsets[1]),
            u64::from(header.structures[1].offsets[0]) + u64::from(START_HEADER_SIZE) + 4 + 4 + 3
        );
    }
}

// ===========================================================================
// Lifecycle
// ===========================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn test_add_after_finish_rejected() {
        let mut doc = builders::sequential_document(1);
        doc.add(builders::black_segment()).unwrap();
        doc.finish_to_vec().unwrap();
        assert_eq!(doc.phase(), DocumentPhase::Written);

        let err = doc.add(builders::black_segment()).unwrap_err();
        assert!(matches!(err, PrcError::InvalidState(_)));
        assert_eq!(err.kind(), prcrust::ErrorKind::State);
        assert!(doc.finish_to_vec().is_err());
    }

    #[test]
    fn test_empty_document_is_valid() {
        let mut doc = builders::sequential_document(1);
        let bytes = doc.finish_to_vec().unwrap();
        let header = common::parse_header(&bytes).unwrap();
        assert_eq!(header.file_size as usize, bytes.len());
        let structure = common::parse_structure(&bytes, header.size).unwrap();
        assert_eq!(structure.sections.len(), 5);
    }

    #[test]
    fn test_sequential_output_is_reproducible() {
        let a = builders::mixed_document(2).finish_to_vec().unwrap();
        let b = builders::mixed_document(2).finish_to_vec().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_finish_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.prc");
        let mut doc = builders::mixed_document(1);
        let size = doc.finish_to_file(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len() as u32, size);
        assert_eq!(&bytes[0..3], b"PRC");
    }

    #[test]
    fn test_colour_dedup_through_document() {
        let mut doc = builders::sequential_document(1);
        let red = RgbaColor::new(1.0, 0.0, 0.0, 1.0);
        let green = RgbaColor::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(doc.colour_index(red).unwrap(), 0);
        assert_eq!(doc.colour_index(red).unwrap(), 0);
        assert_eq!(doc.colour_index(green).unwrap(), 1);
        let reference = doc.add(builders::unit_patch(green)).unwrap();
        assert_eq!(reference.colour_index, 1);
    }
}

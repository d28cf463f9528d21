//! Tree section writer.
//!
//! One part definition holds every representation item of the structure, in
//! the order entities were added; the item ordinal is the cross-reference
//! used by the geometry and extra geometry sections.
//!
//! Layout:
//! ```text
//! RL  type code (304)
//! RL  file structure index
//! RL  number of part definitions (1)
//!     RL  type code (311)
//!     6RD bounding box of all items
//!     RL  number of representation items, then each item
//! RL  number of product occurrences (1)
//!     RL  type code (310)
//!     RL  part definition index (0)
//!     RL  number of child occurrences (0)
//! ```

use super::SectionWriter;
use crate::entities::{Entity, PrcEntity};
use crate::error::{to_u32, Result};
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::{type_codes, SectionKind};
use crate::types::BoundingBox3D;

/// Writer for a file structure's Tree section.
pub struct TreeWriter<'a> {
    structure_index: u32,
    entities: &'a [PrcEntity],
}

impl<'a> TreeWriter<'a> {
    pub fn new(structure_index: u32, entities: &'a [PrcEntity]) -> Self {
        Self {
            structure_index,
            entities,
        }
    }

    fn bounding_box(&self) -> BoundingBox3D {
        self.entities
            .iter()
            .map(|e| e.as_entity().bounding_box())
            .reduce(|a, b| a.merge(&b))
            .unwrap_or_default()
    }
}

impl SectionWriter for TreeWriter<'_> {
    fn section_kind(&self) -> SectionKind {
        SectionKind::Tree
    }

    fn write_data(&self, sink: &mut ByteSink) -> Result<()> {
        sink.write_u32(type_codes::ASM_FILE_STRUCTURE_TREE)?;
        sink.write_u32(self.structure_index)?;

        sink.write_u32(1)?;
        sink.write_u32(type_codes::ASM_PART_DEFINITION)?;
        let bounds = self.bounding_box();
        sink.write_point(&bounds.min)?;
        sink.write_point(&bounds.max)?;
        sink.write_count(self.entities.len())?;
        for (ordinal, entity) in self.entities.iter().enumerate() {
            let index = to_u32(ordinal, "representation item index")?;
            entity.as_entity().write_representation_item(sink, index)?;
        }

        sink.write_u32(1)?;
        sink.write_u32(type_codes::ASM_PRODUCT_OCCURRENCE)?;
        sink.write_u32(0)?;
        sink.write_u32(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Polyline;
    use crate::types::Vector3;

    fn attached(points: Vec<Vector3>) -> PrcEntity {
        let mut line = Polyline::new(points).unwrap();
        line.common_mut().colour_index = Some(0);
        line.into()
    }

    #[test]
    fn test_empty_tree() {
        let mut sink = ByteSink::new();
        TreeWriter::new(0, &[]).write_data(&mut sink).unwrap();
        assert_eq!(sink.len(), 12 + 4 + 48 + 4 + 16);
    }

    #[test]
    fn test_items_use_ordinals() {
        let entities = vec![
            attached(vec![Vector3::ZERO, Vector3::UNIT_X]),
            attached(vec![Vector3::new(-1.0, 0.0, 0.0), Vector3::UNIT_Z]),
        ];
        let mut sink = ByteSink::new();
        TreeWriter::new(2, &entities).write_data(&mut sink).unwrap();
        let d = sink.data();

        assert_eq!(&d[4..8], &2u32.to_le_bytes());
        // bounding box min x
        assert_eq!(&d[16..24], &(-1.0f64).to_le_bytes());
        let first_item = 12 + 4 + 48 + 4;
        let item_len = 20 + 2 * 24;
        assert_eq!(&d[first_item + 4..first_item + 8], &0u32.to_le_bytes());
        let second = first_item + item_len;
        assert_eq!(&d[second + 4..second + 8], &1u32.to_le_bytes());
    }

    #[test]
    fn test_unattached_entity_fails() {
        let entities = vec![PrcEntity::from(
            Polyline::new(vec![Vector3::ZERO, Vector3::UNIT_X]).unwrap(),
        )];
        let mut sink = ByteSink::new();
        assert!(TreeWriter::new(0, &entities).write_data(&mut sink).is_err());
    }
}

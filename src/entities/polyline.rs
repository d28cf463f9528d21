//! Polyline entity (open chain of straight segments)

use super::{
    validate_points, write_single_wire_context, ContinuityFlags, Entity, EntityCommon,
};
use crate::error::{PrcError, Result};
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::type_codes;
use crate::types::{BoundingBox3D, RgbaColor, Vector3};

/// A polyline through two or more points
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Common entity data
    pub common: EntityCommon,
    points: Vec<Vector3>,
}

impl Polyline {
    /// Create a polyline; at least two points are required.
    pub fn new(points: Vec<Vector3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(PrcError::InvalidGeometry(format!(
                "polyline needs at least 2 points, got {}",
                points.len()
            )));
        }
        validate_points(&points)?;
        Ok(Polyline {
            common: EntityCommon::default(),
            points,
        })
    }

    /// Set the colour
    pub fn with_colour(mut self, colour: RgbaColor) -> Self {
        self.common.colour = colour;
        self
    }

    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Total length of all segments
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    pub fn is_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }
}

impl Entity for Polyline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "POLYLINE"
    }

    fn geometry_type_code(&self) -> u32 {
        type_codes::CRV_POLYLINE
    }

    fn bounding_box(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.points).unwrap_or_default()
    }

    fn continuity(&self) -> ContinuityFlags {
        let mut flags = ContinuityFlags::LINEAR;
        flags.set(ContinuityFlags::CLOSED, self.is_closed());
        flags
    }

    fn write_representation_item(&self, sink: &mut ByteSink, index: u32) -> Result<()> {
        let style = self.common.style_index()?;
        sink.write_u32(type_codes::RI_POLY_WIRE)?;
        sink.write_u32(index)?;
        sink.write_u32(style)?;

        sink.write_u32(type_codes::CRV_POLYLINE)?;
        sink.write_count(self.points.len())?;
        for point in &self.points {
            sink.write_point(point)?;
        }
        Ok(())
    }

    /// One wire parameterized by vertex index.
    fn write_topological_context(&self, sink: &mut ByteSink) -> Result<()> {
        write_single_wire_context(sink, 0.0, self.segment_count() as f64)
    }
}

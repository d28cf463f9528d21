//! NURBS curve entity

use super::{
    validate_knots, validate_points, validate_weights, write_control_points, write_knots,
    write_single_wire_context, ContinuityFlags, Entity, EntityCommon,
};
use crate::error::Result;
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::type_codes;
use crate::types::{BoundingBox3D, RgbaColor, Vector3};

/// A (possibly rational) B-spline curve
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Common entity data
    pub common: EntityCommon,
    degree: u32,
    control_points: Vec<Vector3>,
    knots: Vec<f64>,
    weights: Option<Vec<f64>>,
}

impl Curve {
    /// Create a non-rational curve.
    ///
    /// `knots` must hold `degree + control_points.len() + 1` values.
    pub fn new(degree: u32, control_points: Vec<Vector3>, knots: Vec<f64>) -> Result<Self> {
        validate_knots("curve", degree, control_points.len(), &knots)?;
        validate_points(&control_points)?;
        Ok(Curve {
            common: EntityCommon::default(),
            degree,
            control_points,
            knots,
            weights: None,
        })
    }

    /// Create a rational curve with one weight per control point.
    pub fn rational(
        degree: u32,
        control_points: Vec<Vector3>,
        knots: Vec<f64>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        validate_weights(control_points.len(), &weights)?;
        let mut curve = Self::new(degree, control_points, knots)?;
        curve.weights = Some(weights);
        Ok(curve)
    }

    /// Set the colour
    pub fn with_colour(mut self, colour: RgbaColor) -> Self {
        self.common.colour = colour;
        self
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn control_points(&self) -> &[Vector3] {
        &self.control_points
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn is_rational(&self) -> bool {
        self.weights.is_some()
    }

    /// Valid parameter interval `[knots[degree], knots[count]]`.
    pub fn domain(&self) -> (f64, f64) {
        let d = self.degree as usize;
        let n = self.control_points.len();
        (self.knots[d], self.knots[n])
    }

    pub fn is_closed(&self) -> bool {
        self.control_points.len() > 1
            && self.control_points.first() == self.control_points.last()
    }
}

impl Entity for Curve {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "CURVE"
    }

    fn geometry_type_code(&self) -> u32 {
        type_codes::CRV_NURBS
    }

    fn bounding_box(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.control_points).unwrap_or_default()
    }

    fn continuity(&self) -> ContinuityFlags {
        let mut flags = ContinuityFlags::empty();
        flags.set(ContinuityFlags::RATIONAL, self.is_rational());
        flags.set(ContinuityFlags::CLOSED, self.is_closed());
        flags.set(ContinuityFlags::LINEAR, self.degree == 1);
        flags
    }

    fn write_representation_item(&self, sink: &mut ByteSink, index: u32) -> Result<()> {
        let style = self.common.style_index()?;
        sink.write_u32(type_codes::RI_CURVE)?;
        sink.write_u32(index)?;
        sink.write_u32(style)?;

        sink.write_u32(type_codes::CRV_NURBS)?;
        sink.write_u32(self.degree)?;
        sink.write_count(self.control_points.len())?;
        sink.write_bool(self.is_rational())?;
        write_control_points(sink, &self.control_points, self.weights())?;
        write_knots(sink, &self.knots)
    }

    fn write_topological_context(&self, sink: &mut ByteSink) -> Result<()> {
        let (start, end) = self.domain();
        write_single_wire_context(sink, start, end)
    }
}

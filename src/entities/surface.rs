//! NURBS surface entity

use super::{
    validate_knots, validate_points, validate_weights, write_control_points, write_knots,
    ContinuityFlags, Entity, EntityCommon,
};
use crate::error::{PrcError, Result};
use crate::io::prc::byte_sink::ByteSink;
use crate::io::prc::constants::type_codes;
use crate::types::{BoundingBox3D, RgbaColor, Vector3};

/// A (possibly rational) tensor-product B-spline surface.
///
/// Control points are stored row by row: `count_u` rows of `count_v` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Common entity data
    pub common: EntityCommon,
    degree_u: u32,
    degree_v: u32,
    count_u: u32,
    count_v: u32,
    control_points: Vec<Vector3>,
    knots_u: Vec<f64>,
    knots_v: Vec<f64>,
    weights: Option<Vec<f64>>,
}

impl Surface {
    /// Create a non-rational surface.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        degree_u: u32,
        degree_v: u32,
        count_u: u32,
        count_v: u32,
        control_points: Vec<Vector3>,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
    ) -> Result<Self> {
        validate_knots("surface u", degree_u, count_u as usize, &knots_u)?;
        validate_knots("surface v", degree_v, count_v as usize, &knots_v)?;
        let expected = count_u as usize * count_v as usize;
        if control_points.len() != expected {
            return Err(PrcError::InvalidGeometry(format!(
                "surface: expected {count_u}x{count_v} = {expected} control points, got {}",
                control_points.len()
            )));
        }
        validate_points(&control_points)?;
        Ok(Surface {
            common: EntityCommon::default(),
            degree_u,
            degree_v,
            count_u,
            count_v,
            control_points,
            knots_u,
            knots_v,
            weights: None,
        })
    }

    /// Create a rational surface with one weight per control point.
    #[allow(clippy::too_many_arguments)]
    pub fn rational(
        degree_u: u32,
        degree_v: u32,
        count_u: u32,
        count_v: u32,
        control_points: Vec<Vector3>,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        validate_weights(control_points.len(), &weights)?;
        let mut surface = Self::new(
            degree_u,
            degree_v,
            count_u,
            count_v,
            control_points,
            knots_u,
            knots_v,
        )?;
        surface.weights = Some(weights);
        Ok(surface)
    }

    /// Set the colour
    pub fn with_colour(mut self, colour: RgbaColor) -> Self {
        self.common.colour = colour;
        self
    }

    pub fn degrees(&self) -> (u32, u32) {
        (self.degree_u, self.degree_v)
    }

    pub fn counts(&self) -> (u32, u32) {
        (self.count_u, self.count_v)
    }

    pub fn control_points(&self) -> &[Vector3] {
        &self.control_points
    }

    /// Control point at row `u`, column `v`
    pub fn control_point(&self, u: u32, v: u32) -> Option<&Vector3> {
        if u >= self.count_u || v >= self.count_v {
            return None;
        }
        self.control_points.get((u * self.count_v + v) as usize)
    }

    pub fn knots_u(&self) -> &[f64] {
        &self.knots_u
    }

    pub fn knots_v(&self) -> &[f64] {
        &self.knots_v
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn is_rational(&self) -> bool {
        self.weights.is_some()
    }

    /// Parameter domain as `(u_min, u_max, v_min, v_max)`.
    pub fn domain(&self) -> (f64, f64, f64, f64) {
        (
            self.knots_u[self.degree_u as usize],
            self.knots_u[self.count_u as usize],
            self.knots_v[self.degree_v as usize],
            self.knots_v[self.count_v as usize],
        )
    }

    /// Closed in u when the first and last rows coincide.
    fn is_closed_u(&self) -> bool {
        self.count_u > 1
            && (0..self.count_v).all(|v| self.control_point(0, v) == self.control_point(self.count_u - 1, v))
    }
}

impl Entity for Surface {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "SURFACE"
    }

    fn geometry_type_code(&self) -> u32 {
        type_codes::SURF_NURBS
    }

    fn bounding_box(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.control_points).unwrap_or_default()
    }

    fn continuity(&self) -> ContinuityFlags {
        let mut flags = ContinuityFlags::empty();
        flags.set(ContinuityFlags::RATIONAL, self.is_rational());
        flags.set(ContinuityFlags::CLOSED, self.is_closed_u());
        flags.set(ContinuityFlags::LINEAR, self.degree_u == 1 && self.degree_v == 1);
        flags
    }

    fn write_representation_item(&self, sink: &mut ByteSink, index: u32) -> Result<()> {
        let style = self.common.style_index()?;
        sink.write_u32(type_codes::RI_BREP_MODEL)?;
        sink.write_u32(index)?;
        sink.write_u32(style)?;

        sink.write_u32(type_codes::SURF_NURBS)?;
        sink.write_u32(self.degree_u)?;
        sink.write_u32(self.degree_v)?;
        sink.write_u32(self.count_u)?;
        sink.write_u32(self.count_v)?;
        sink.write_bool(self.is_rational())?;
        write_control_points(sink, &self.control_points, self.weights())?;
        write_knots(sink, &self.knots_u)?;
        write_knots(sink, &self.knots_v)
    }

    /// Single-face B-rep: one connex, one open shell, one untrimmed face.
    fn write_topological_context(&self, sink: &mut ByteSink) -> Result<()> {
        sink.write_u32(type_codes::TOPO_CONTEXT)?;
        sink.write_u32(1)?;
        sink.write_u32(type_codes::TOPO_BREP_DATA)?;
        sink.write_u32(1)?;
        sink.write_u32(type_codes::TOPO_CONNEX)?;
        sink.write_u32(1)?;
        sink.write_u32(type_codes::TOPO_SHELL)?;
        sink.write_bool(false)?; // closed
        sink.write_u32(1)?;
        sink.write_u32(type_codes::TOPO_FACE)?;
        sink.write_bool(false)?; // trimmed
        sink.write_bool(true)?; // same orientation as surface

        let (u0, u1, v0, v1) = self.domain();
        for value in [u0, u1, v0, v1] {
            sink.write_f64(value)?;
        }
        Ok(())
    }
}

//! PRC entity types and the self-serialization trait

use crate::error::{PrcError, Result};
use crate::io::prc::byte_sink::ByteSink;
use crate::types::{BoundingBox3D, RgbaColor, Vector3};

use bitflags::bitflags;

pub mod curve;
pub mod polyline;
pub mod surface;

pub use curve::Curve;
pub use polyline::Polyline;
pub use surface::Surface;

bitflags! {
    /// Continuity flags recorded in the extra geometry context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ContinuityFlags: u32 {
        /// Control points carry weights.
        const RATIONAL = 0x1;
        /// First and last control points coincide.
        const CLOSED = 0x2;
        /// Piecewise linear (degree 1 or a polyline).
        const LINEAR = 0x4;
    }
}

/// Data shared by every entity
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityCommon {
    /// Colour requested by the producer
    pub colour: RgbaColor,
    /// Palette index, assigned when the entity is added to a document
    pub colour_index: Option<u32>,
}

impl EntityCommon {
    pub fn new(colour: RgbaColor) -> Self {
        EntityCommon {
            colour,
            colour_index: None,
        }
    }

    /// Palette index used as the style reference of the representation item.
    pub fn style_index(&self) -> Result<u32> {
        self.colour_index.ok_or_else(|| {
            PrcError::InvalidState("entity serialized before being added to a document".into())
        })
    }
}

/// Self-serialization shared by surfaces, curves and polylines.
///
/// Each method writes into the sink of one section kind: the representation
/// item goes to the tree, the topological context to the geometry section,
/// and the extra geometry context to the extra geometry section.
pub trait Entity {
    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Entity type name
    fn entity_type(&self) -> &'static str;

    /// PRC type code of the underlying geometry
    fn geometry_type_code(&self) -> u32;

    fn bounding_box(&self) -> BoundingBox3D;

    fn continuity(&self) -> ContinuityFlags;

    fn colour(&self) -> RgbaColor {
        self.common().colour
    }

    /// Geometric definition, tagged with `index` for topology cross-references.
    fn write_representation_item(&self, sink: &mut ByteSink, index: u32) -> Result<()>;

    /// Minimal topology that turns the raw geometry into a usable shape.
    fn write_topological_context(&self, sink: &mut ByteSink) -> Result<()>;

    /// Bounding box and continuity flags.
    fn write_extra_geometry_context(&self, sink: &mut ByteSink) -> Result<()> {
        let bounds = self.bounding_box();
        sink.write_u32(self.geometry_type_code())?;
        sink.write_point(&bounds.min)?;
        sink.write_point(&bounds.max)?;
        sink.write_u32(self.continuity().bits())
    }
}

/// Kind of an entity, used for routing and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Surface,
    Curve,
    Polyline,
}

/// Enum wrapping all entity types
#[derive(Debug, Clone, PartialEq)]
pub enum PrcEntity {
    Surface(Surface),
    Curve(Curve),
    Polyline(Polyline),
}

impl PrcEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            PrcEntity::Surface(_) => EntityKind::Surface,
            PrcEntity::Curve(_) => EntityKind::Curve,
            PrcEntity::Polyline(_) => EntityKind::Polyline,
        }
    }

    /// Get as a trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            PrcEntity::Surface(e) => e,
            PrcEntity::Curve(e) => e,
            PrcEntity::Polyline(e) => e,
        }
    }

    /// Get as a mutable trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            PrcEntity::Surface(e) => e,
            PrcEntity::Curve(e) => e,
            PrcEntity::Polyline(e) => e,
        }
    }

    pub fn colour(&self) -> RgbaColor {
        self.as_entity().colour()
    }

    pub fn colour_index(&self) -> Option<u32> {
        self.as_entity().common().colour_index
    }
}

impl From<Surface> for PrcEntity {
    fn from(e: Surface) -> Self {
        PrcEntity::Surface(e)
    }
}

impl From<Curve> for PrcEntity {
    fn from(e: Curve) -> Self {
        PrcEntity::Curve(e)
    }
}

impl From<Polyline> for PrcEntity {
    fn from(e: Polyline) -> Self {
        PrcEntity::Polyline(e)
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Check a knot vector against `degree + count + 1` and monotonicity.
pub(crate) fn validate_knots(
    direction: &str,
    degree: u32,
    count: usize,
    knots: &[f64],
) -> Result<()> {
    if count == 0 {
        return Err(PrcError::InvalidGeometry(format!(
            "{direction}: control point count must be positive"
        )));
    }
    let expected = degree as usize + count + 1;
    if knots.len() != expected {
        return Err(PrcError::InvalidGeometry(format!(
            "{direction}: expected {expected} knots for degree {degree} and {count} control points, got {}",
            knots.len()
        )));
    }
    if knots.iter().any(|k| !k.is_finite()) {
        return Err(PrcError::InvalidGeometry(format!(
            "{direction}: knots must be finite"
        )));
    }
    if knots.windows(2).any(|w| w[1] < w[0]) {
        return Err(PrcError::InvalidGeometry(format!(
            "{direction}: knots must be non-decreasing"
        )));
    }
    Ok(())
}

pub(crate) fn validate_weights(count: usize, weights: &[f64]) -> Result<()> {
    if weights.len() != count {
        return Err(PrcError::InvalidGeometry(format!(
            "expected {count} weights, got {}",
            weights.len()
        )));
    }
    if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
        return Err(PrcError::InvalidGeometry(
            "weights must be finite and positive".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_points(points: &[Vector3]) -> Result<()> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(PrcError::InvalidGeometry(
            "coordinates must be finite".into(),
        ));
    }
    Ok(())
}

/// Control points, each followed by its weight when rational.
pub(crate) fn write_control_points(
    sink: &mut ByteSink,
    points: &[Vector3],
    weights: Option<&[f64]>,
) -> Result<()> {
    for (i, point) in points.iter().enumerate() {
        sink.write_point(point)?;
        if let Some(w) = weights {
            sink.write_f64(w[i])?;
        }
    }
    Ok(())
}

pub(crate) fn write_knots(sink: &mut ByteSink, knots: &[f64]) -> Result<()> {
    sink.write_count(knots.len())?;
    for k in knots {
        sink.write_f64(*k)?;
    }
    Ok(())
}

/// Context holding a single wire body over the parameter range `[start, end]`.
pub(crate) fn write_single_wire_context(sink: &mut ByteSink, start: f64, end: f64) -> Result<()> {
    use crate::io::prc::constants::type_codes;

    sink.write_u32(type_codes::TOPO_CONTEXT)?;
    sink.write_u32(1)?;
    sink.write_u32(type_codes::TOPO_SINGLE_WIRE_BODY)?;
    sink.write_u32(type_codes::TOPO_WIRE_EDGE)?;
    sink.write_f64(start)?;
    sink.write_f64(end)
}

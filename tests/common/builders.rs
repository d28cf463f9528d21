//! Test document builders.

#![allow(dead_code)]

use prcrust::{
    Curve, Polyline, PrcDocument, PrcWriterConfiguration, RgbaColor, SequentialUidSource,
    Surface, Vector3,
};

/// Configuration with `structures` file structures.
pub fn config(structures: u32) -> PrcWriterConfiguration {
    PrcWriterConfiguration {
        file_structure_count: structures,
        ..Default::default()
    }
}

/// Document with reproducible identifiers.
pub fn sequential_document(structures: u32) -> PrcDocument {
    PrcDocument::with_uid_source(config(structures), SequentialUidSource::new(100)).unwrap()
}

pub fn black_segment() -> Polyline {
    Polyline::new(vec![Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0)])
        .unwrap()
        .with_colour(RgbaColor::new(0.0, 0.0, 0.0, 1.0))
}

/// Bilinear patch over the unit square.
pub fn unit_patch(colour: RgbaColor) -> Surface {
    Surface::new(
        1,
        1,
        2,
        2,
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.5),
        ],
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.0, 0.0, 1.0, 1.0],
    )
    .unwrap()
    .with_colour(colour)
}

/// Rational quarter circle of radius `r`.
pub fn quarter_circle(r: f64, colour: RgbaColor) -> Curve {
    let w = std::f64::consts::FRAC_1_SQRT_2;
    Curve::rational(
        2,
        vec![
            Vector3::new(r, 0.0, 0.0),
            Vector3::new(r, r, 0.0),
            Vector3::new(0.0, r, 0.0),
        ],
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        vec![1.0, w, 1.0],
    )
    .unwrap()
    .with_colour(colour)
}

/// Document mixing every entity kind over `structures` structures.
pub fn mixed_document(structures: u32) -> PrcDocument {
    let mut doc = sequential_document(structures);
    for i in 0..structures {
        doc.add_to(i, unit_patch(RgbaColor::RED)).unwrap();
        doc.add_to(i, quarter_circle(1.0 + f64::from(i), RgbaColor::GREEN))
            .unwrap();
        doc.add_to(i, black_segment()).unwrap();
    }
    doc
}

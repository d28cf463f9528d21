//! Generate a sample PRC file with one of each entity kind.
//!
//! ## Usage
//!     cargo run --bin generate_sample_prc -- [output.prc] [structures]
//!
//! Defaults: `test_output/sample.prc`, one file structure. Set `RUST_LOG=debug`
//! to see the measured layout.

use anyhow::{Context, Result};
use prcrust::{
    Curve, Polyline, PrcDocument, PrcWriterConfiguration, RgbaColor, Surface, Vector3,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

fn saddle(offset: f64) -> Result<Surface> {
    let mut points = Vec::new();
    for u in 0..3 {
        for v in 0..3 {
            let (x, y) = (f64::from(u) - 1.0, f64::from(v) - 1.0);
            points.push(Vector3::new(x + offset, y, x * x - y * y));
        }
    }
    let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    Ok(Surface::new(2, 2, 3, 3, points, knots.clone(), knots)?
        .with_colour(RgbaColor::new(0.2, 0.5, 0.9, 0.8)))
}

fn helix_arc(offset: f64) -> Result<Curve> {
    let points = (0..6)
        .map(|i| {
            let t = f64::from(i) * std::f64::consts::FRAC_PI_4;
            Vector3::new(t.cos() + offset, t.sin(), f64::from(i) * 0.2)
        })
        .collect();
    let knots = vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0, 3.0];
    Ok(Curve::new(3, points, knots)?.with_colour(RgbaColor::RED))
}

fn frame(offset: f64) -> Result<Polyline> {
    let corners = [(-1.5, -1.5), (1.5, -1.5), (1.5, 1.5), (-1.5, 1.5), (-1.5, -1.5)];
    let points = corners
        .iter()
        .map(|(x, y)| Vector3::new(x + offset, *y, -1.0))
        .collect();
    Ok(Polyline::new(points)?.with_colour(RgbaColor::BLACK))
}

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test_output").join("sample.prc"));
    let structures: u32 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid structure count `{s}`"))?,
        None => 1,
    };

    let config = PrcWriterConfiguration {
        file_structure_count: structures,
        model_name: String::from("prcrust sample"),
        ..Default::default()
    };
    let mut doc = PrcDocument::with_configuration(config)?;

    for index in 0..structures {
        let offset = f64::from(index) * 4.0;
        doc.add_to(index, saddle(offset)?)?;
        doc.add_to(index, helix_arc(offset)?)?;
        doc.add_to(index, frame(offset)?)?;
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let size = doc
        .finish_to_file(&output)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        path = %output.display(),
        bytes = size,
        colours = doc.palette().len(),
        "sample written"
    );
    Ok(())
}

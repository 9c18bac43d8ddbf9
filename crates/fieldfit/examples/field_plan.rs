//! Inscribe a working region into a few sample fields and plan passes.
//!
//! Usage: `field_plan [work_width] [angle_step_deg] [resolution]`
//! Prints one JSON object per field on stdout; logs go to stderr
//! (`RUST_LOG`-style filtering is not wired, everything at INFO and above).

use anyhow::{Context, Result};
use fieldfit::fields::{draw_field, FieldCfg, ReplayToken};
use fieldfit::{generate_paths, plan_length, smart_inscribe, InscribeCfg, Polygon};
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;

fn arg<T: std::str::FromStr>(idx: usize, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::args().nth(idx) {
        Some(s) => s.parse().with_context(|| format!("argument {idx}: {s:?}")),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let work_width: f64 = arg(1, 6.0)?;
    let cfg = InscribeCfg::default()
        .with_angle_step(arg(2, 2.0)?)
        .with_resolution(arg(3, 400)?);
    cfg.validate()?;

    let mut fields: Vec<(String, Polygon)> = vec![
        (
            "rectangle".into(),
            Polygon::from_xy(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)])?,
        ),
        (
            "parallelogram".into(),
            Polygon::from_xy(&[(0.0, 0.0), (100.0, 0.0), (120.0, 50.0), (20.0, 50.0)])?,
        ),
        (
            "triangle".into(),
            Polygon::from_xy(&[(50.0, 0.0), (100.0, 100.0), (0.0, 100.0)])?,
        ),
    ];
    for index in 0..3 {
        let field = draw_field(FieldCfg::default(), ReplayToken::new(2024, index))
            .with_context(|| format!("drawing random field {index}"))?;
        fields.push((format!("random-{index}"), field));
    }

    for (name, boundary) in &fields {
        let result =
            smart_inscribe(boundary, &cfg).with_context(|| format!("inscribing field {name}"))?;
        let paths = generate_paths(&result.polygon, work_width, result.shape_type)?;
        tracing::info!(field = %name, %result, passes = paths.len(), "planned");
        let out = json!({
            "field": name,
            "boundary_area": boundary.area(),
            "result": result,
            "passes": paths.len(),
            "plan_length": plan_length(&paths),
        });
        println!("{out}");
    }
    Ok(())
}

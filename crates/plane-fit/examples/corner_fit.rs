//! Example: locating a box corner from noisy face planes.
//!
//! Three faces of a scanned box meet at a corner, but each face estimate is
//! slightly off. The least-squares intersection recovers the corner, and
//! adding a fourth, redundant plane shows how the residual reports the
//! disagreement.
//!
//! Run with: `RUST_LOG=plane_fit=debug cargo run --example corner_fit`

use nalgebra::Point3;
use plane_fit::{GeomResult, Plane, PlaneDistanceSolver};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> GeomResult<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let faces = vec![
        Plane::from_coords([10.02, 0.0, 0.0], [1.0, 0.003, -0.001]),
        Plane::from_coords([0.0, 19.97, 0.0], [0.002, 1.0, 0.004]),
        Plane::from_coords([0.0, 0.0, 5.01], [-0.001, 0.002, 1.0]),
    ];

    let solver = PlaneDistanceSolver::new(&faces)?;
    let report = solver.solve()?;
    print_report("three faces", &report.point, report.residual);

    let mut with_chamfer = faces.clone();
    with_chamfer.push(Plane::from_coords([10.0, 20.0, 5.0], [1.0, 1.0, 1.0]));
    let solver = PlaneDistanceSolver::new(&with_chamfer)?;
    let report = solver.solve()?;
    print_report("with chamfer plane", &report.point, report.residual);

    for (i, d) in solver.signed_distances(&report.point).iter().enumerate() {
        println!("  plane {}: {:+.4} mm", i, d);
    }

    Ok(())
}

fn print_report(label: &str, point: &Point3<f64>, residual: f64) {
    println!(
        "{:>20}: corner at ({:.3}, {:.3}, {:.3}), residual {:.6}",
        label, point.x, point.y, point.z, residual
    );
}

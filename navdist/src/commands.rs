//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use navmesh::query::{
    distance_message, parse_positions, DistanceQueryService, DistanceResult, HtmlVisualizer,
    PathVisualizer, VisualizationScene, EXTRACTION_FAILED_MESSAGE,
};
use navmesh::store::NavMesh;
use navmesh::types::Point3;
use tracing::{info, warn};

fn load(path: &Path) -> Result<Arc<NavMesh>> {
    let nav = NavMesh::load(path)
        .with_context(|| format!("failed to load navmesh from {}", path.display()))?;
    info!(
        path = %path.display(),
        vertices = nav.vertex_count(),
        faces = nav.face_count(),
        "Loaded navmesh"
    );
    Ok(Arc::new(nav))
}

/// Print mesh statistics.
pub fn info(path: &Path) -> Result<()> {
    let nav = load(path)?;
    let bounds = nav.bounds();

    println!("navmesh:    {}", path.display());
    println!("vertices:   {}", nav.vertex_count());
    println!("faces:      {}", nav.face_count());
    println!("edges:      {}", nav.edge_count());
    println!("components: {}", nav.component_count());
    println!(
        "bounds:     ({}, {}, {}) .. ({}, {}, {})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    Ok(())
}

/// Print the straight-line answer.
pub fn straight(path: &Path, start: &Point3<f64>, goal: &Point3<f64>) -> Result<()> {
    let service = DistanceQueryService::new(load(path)?);
    let distance = service.straight_line_distance(start, goal)?;
    println!("{}", distance_message(distance));
    Ok(())
}

/// Print the navigable answer, optionally writing the route as HTML.
pub fn navigable(
    path: &Path,
    start: &Point3<f64>,
    goal: &Point3<f64>,
    html: Option<&Path>,
) -> Result<()> {
    let service = DistanceQueryService::new(load(path)?);
    let result = service.navigable_distance(start, goal)?;

    if let Some(output) = html {
        write_html(&service, start, goal, &result, output)?;
    }
    println!("{}", result.message());
    Ok(())
}

/// Parse a raw completion response and print the navigable answer.
pub fn parse(path: &Path, response: &str) -> Result<()> {
    let Some((start, goal)) = parse_positions(response) else {
        warn!(response, "Response names no positions");
        println!("{EXTRACTION_FAILED_MESSAGE}");
        return Ok(());
    };
    println!("start: ({}, {}, {})", start.x, start.y, start.z);
    println!("goal:  ({}, {}, {})", goal.x, goal.y, goal.z);
    navigable(path, &start, &goal, None)
}

fn write_html(
    service: &DistanceQueryService,
    start: &Point3<f64>,
    goal: &Point3<f64>,
    result: &DistanceResult,
    output: &Path,
) -> Result<()> {
    let route = match result {
        DistanceResult::Navigable(route) => route,
        DistanceResult::Unreachable(reason) => {
            warn!(%reason, "No route to visualize");
            return Ok(());
        }
        DistanceResult::ExtractionFailed => return Ok(()),
    };

    let scene = VisualizationScene::for_route(service.nav().mesh(), start, goal, route);
    HtmlVisualizer::new()
        .render(&scene, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), "Wrote route visualization");
    Ok(())
}

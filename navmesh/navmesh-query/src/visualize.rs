//! Path visualization.
//!
//! [`HtmlVisualizer`] writes a single HTML page with an interactive Plotly
//! 3D scene: the mesh, its wireframe, the shortest path and the query
//! markers.

use std::fs;
use std::path::Path;

use navmesh_types::{IndexedMesh, Point3};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::VisualizeError;
use crate::result::Route;

/// Default location of the Plotly bundle.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Vertical padding of the Z axis range, in meters.
const Z_PADDING: f64 = 1.0;

/// A labelled point drawn in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Legend label.
    pub label: String,
    /// Position.
    pub position: Point3<f64>,
    /// CSS color name.
    pub color: String,
}

impl Marker {
    /// Create a marker.
    #[must_use]
    pub fn new(label: impl Into<String>, position: Point3<f64>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            position,
            color: color.into(),
        }
    }
}

/// Everything drawn in one visualization.
#[derive(Debug, Clone)]
pub struct VisualizationScene<'a> {
    /// The navigation mesh.
    pub mesh: &'a IndexedMesh,
    /// Shortest path polyline; empty for none.
    pub path: Vec<Point3<f64>>,
    /// Labelled points.
    pub markers: Vec<Marker>,
}

impl<'a> VisualizationScene<'a> {
    /// A scene showing only the mesh.
    #[must_use]
    pub const fn new(mesh: &'a IndexedMesh) -> Self {
        Self {
            mesh,
            path: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Scene for a navigable query: the route and the six standard markers
    /// (query points, their surface projections and their snapped vertices).
    #[must_use]
    pub fn for_route(
        mesh: &'a IndexedMesh,
        start: &Point3<f64>,
        goal: &Point3<f64>,
        route: &Route,
    ) -> Self {
        Self {
            mesh,
            path: route.path.points.clone(),
            markers: vec![
                Marker::new("start", *start, "blue"),
                Marker::new("goal", *goal, "green"),
                Marker::new("closest_start", route.start.surface_point, "darkblue"),
                Marker::new("closest_goal", route.goal.surface_point, "darkgreen"),
                Marker::new("closest_v_start", route.start.vertex_position, "lightblue"),
                Marker::new("closest_v_goal", route.goal.vertex_position, "lightgreen"),
            ],
        }
    }

    /// Add a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Set the path polyline.
    #[must_use]
    pub fn with_path(mut self, path: Vec<Point3<f64>>) -> Self {
        self.path = path;
        self
    }
}

/// Renders scenes to files.
pub trait PathVisualizer: Send + Sync {
    /// Render `scene` to `output`.
    ///
    /// # Errors
    ///
    /// Encoding or I/O failures.
    fn render(&self, scene: &VisualizationScene<'_>, output: &Path) -> Result<(), VisualizeError>;
}

/// Writes scenes as standalone Plotly HTML pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlVisualizer {
    plotly_src: String,
}

impl Default for HtmlVisualizer {
    fn default() -> Self {
        Self {
            plotly_src: PLOTLY_CDN.to_string(),
        }
    }
}

impl HtmlVisualizer {
    /// Create a visualizer loading Plotly from [`PLOTLY_CDN`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load Plotly from another URL or relative path.
    #[must_use]
    pub fn with_plotly_src(mut self, src: impl Into<String>) -> Self {
        self.plotly_src = src.into();
        self
    }

    /// The HTML page for `scene`.
    ///
    /// # Errors
    ///
    /// [`VisualizeError::EmptyScene`] for a mesh without faces, or an
    /// encoding failure.
    pub fn to_html(&self, scene: &VisualizationScene<'_>) -> Result<String, VisualizeError> {
        if scene.mesh.faces.is_empty() {
            return Err(VisualizeError::EmptyScene);
        }

        let data = serde_json::to_string(&traces(scene))?;
        let layout = serde_json::to_string(&layout(scene))?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Navigation mesh</title>
<script src="{src}"></script>
</head>
<body>
<div id="navmesh" style="width:100%;height:100vh;"></div>
<script>
Plotly.newPlot("navmesh", {data}, {layout});
</script>
</body>
</html>
"#,
            src = self.plotly_src,
            data = escape_script(&data),
            layout = escape_script(&layout),
        ))
    }
}

impl PathVisualizer for HtmlVisualizer {
    fn render(&self, scene: &VisualizationScene<'_>, output: &Path) -> Result<(), VisualizeError> {
        let html = self.to_html(scene)?;
        fs::write(output, html)?;
        debug!(path = %output.display(), "Wrote path visualization");
        Ok(())
    }
}

fn traces(scene: &VisualizationScene<'_>) -> Value {
    let mesh = scene.mesh;
    let coords = |axis: usize| -> Vec<f64> {
        mesh.vertices.iter().map(|v| v.position[axis]).collect()
    };
    let corners = |k: usize| -> Vec<u32> { mesh.faces.iter().map(|f| f[k]).collect() };

    // Each face outline is a closed loop followed by a gap
    let mut edges: [Vec<Option<f64>>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for face in &mesh.faces {
        for &corner in &[face[0], face[1], face[2], face[0]] {
            let position = mesh.vertices.get(corner as usize).map(|v| v.position);
            for (axis, column) in edges.iter_mut().enumerate() {
                column.push(position.map(|p| p[axis]));
            }
        }
        for column in &mut edges {
            column.push(None);
        }
    }

    let mut traces = vec![
        json!({
            "type": "mesh3d",
            "name": "navmesh",
            "x": coords(0), "y": coords(1), "z": coords(2),
            "i": corners(0), "j": corners(1), "k": corners(2),
            "color": "blue",
            "opacity": 0.5,
        }),
        json!({
            "type": "scatter3d",
            "mode": "lines",
            "name": "edges",
            "x": edges[0], "y": edges[1], "z": edges[2],
            "line": { "color": "black", "width": 2 },
        }),
    ];

    if !scene.path.is_empty() {
        let column = |axis: usize| -> Vec<f64> { scene.path.iter().map(|p| p[axis]).collect() };
        traces.push(json!({
            "type": "scatter3d",
            "mode": "lines",
            "name": "shortest path",
            "x": column(0), "y": column(1), "z": column(2),
            "line": { "color": "red", "width": 4 },
        }));
    }

    for marker in &scene.markers {
        let p = marker.position;
        traces.push(json!({
            "type": "scatter3d",
            "mode": "markers",
            "name": marker.label,
            "x": [p.x], "y": [p.y], "z": [p.z],
            "marker": { "color": [marker.color], "size": 4 },
        }));
    }

    Value::Array(traces)
}

/// Z range spanning every vertex coordinate, padded by [`Z_PADDING`].
fn layout(scene: &VisualizationScene<'_>) -> Value {
    let (lo, hi) = scene
        .mesh
        .vertices
        .iter()
        .flat_map(|v| v.position.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        });
    json!({
        "showlegend": true,
        "scene": { "zaxis": { "range": [lo - Z_PADDING, hi + Z_PADDING] } },
    })
}

fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

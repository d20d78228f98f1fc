//! Exact geodesic solver.
//!
//! Distances propagate across faces as windows: edge intervals that see a
//! pseudo-source along straight lines in the unfolded faces.
//! A single priority queue holds window and vertex events ordered by their
//! smallest reachable distance, so vertices settle in Dijkstra order. The
//! source and every settled boundary or saddle vertex become pseudo-sources
//! and emit windows over the opposite edge of each incident face, which lets
//! paths bend around them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use nalgebra::{Point2, Vector2};
use navmesh_store::NavMesh;
use navmesh_types::Point3;
use tracing::debug;

use crate::config::SolverConfig;
use crate::distance::DistanceField;
use crate::error::{GeodesicError, GeodesicResult};
use crate::path::{GeodesicOutcome, GeodesicPath, UnreachableReason};
use crate::window::{ray_segment_param, EdgeFrame, Window, WindowId, DEGENERATE_LENGTH};

/// Exact shortest paths on the surface of a navigation mesh.
///
/// The solver borrows the mesh and keeps no state between queries, so one
/// mesh can serve any number of solvers on any number of threads.
///
/// # Example
///
/// ```
/// use navmesh_geodesic::GeodesicSolver;
/// use navmesh_store::NavMesh;
/// use navmesh_types::unit_square;
///
/// let nav = NavMesh::from_mesh(unit_square()).unwrap();
/// let outcome = GeodesicSolver::new(&nav).shortest_path(1, 3).unwrap();
///
/// // Straight across the diagonal, not along the edges
/// let distance = outcome.distance().unwrap();
/// assert!((distance - 2.0_f64.sqrt()).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeodesicSolver<'a> {
    nav: &'a NavMesh,
    config: SolverConfig,
}

impl<'a> GeodesicSolver<'a> {
    /// Create a solver with default configuration.
    #[must_use]
    pub fn new(nav: &'a NavMesh) -> Self {
        Self::with_config(nav, SolverConfig::default())
    }

    /// Create a solver with the given configuration.
    #[must_use]
    pub const fn with_config(nav: &'a NavMesh, config: SolverConfig) -> Self {
        Self { nav, config }
    }

    /// The mesh this solver runs on.
    #[must_use]
    pub const fn nav(&self) -> &'a NavMesh {
        self.nav
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Shortest surface path from `source` to `target`.
    ///
    /// Vertices in different connected components are reported as
    /// [`UnreachableReason::DisconnectedComponents`] without propagating.
    /// That is the only way two vertices can be unreachable from each other.
    ///
    /// # Errors
    ///
    /// [`GeodesicError::InvalidVertexIndex`] if either index is out of range.
    pub fn shortest_path(&self, source: usize, target: usize) -> GeodesicResult<GeodesicOutcome> {
        let source_id = self.vertex_id(source)?;
        let target_id = self.vertex_id(target)?;

        if source_id == target_id {
            return Ok(GeodesicOutcome::Reachable(GeodesicPath {
                points: vec![self.nav.position(source_id)],
                length: 0.0,
            }));
        }

        if !matches!(self.nav.same_component(source, target), Ok(true)) {
            debug!(source, target, "Vertices lie in different components");
            return Ok(GeodesicOutcome::Unreachable(
                UnreachableReason::DisconnectedComponents,
            ));
        }

        let mut propagation = Propagation::new(self.nav, self.config.epsilon, source_id);
        propagation.run(Some(target_id));
        propagation.log_stats(source, Some(target));

        let length = propagation.labels[target];
        // Not hit once the components match: vertex events offer every
        // edge neighbour
        if !length.is_finite() {
            return Ok(GeodesicOutcome::Unreachable(
                UnreachableReason::WavefrontExhausted,
            ));
        }

        Ok(GeodesicOutcome::Reachable(GeodesicPath {
            points: propagation.trace(target_id),
            length,
        }))
    }

    /// Geodesic distance, or `None` if unreachable.
    ///
    /// # Errors
    ///
    /// [`GeodesicError::InvalidVertexIndex`] if either index is out of range.
    pub fn distance(&self, source: usize, target: usize) -> GeodesicResult<Option<f64>> {
        Ok(self.shortest_path(source, target)?.distance())
    }

    /// Exact geodesic distance from `source` to every vertex.
    ///
    /// Runs the wavefront until it is exhausted; vertices in other
    /// components stay at `f64::INFINITY`.
    ///
    /// # Errors
    ///
    /// [`GeodesicError::InvalidVertexIndex`] if `source` is out of range.
    pub fn distances_from(&self, source: usize) -> GeodesicResult<DistanceField> {
        let source_id = self.vertex_id(source)?;
        let mut propagation = Propagation::new(self.nav, self.config.epsilon, source_id);
        propagation.run(None);
        propagation.log_stats(source, None);
        Ok(DistanceField::from_distances(propagation.labels))
    }

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32, meshes with >4B vertices unsupported
    fn vertex_id(&self, index: usize) -> GeodesicResult<u32> {
        let vertex_count = self.nav.vertex_count();
        if index < vertex_count {
            Ok(index as u32)
        } else {
            Err(GeodesicError::InvalidVertexIndex {
                index,
                vertex_count,
            })
        }
    }
}

/// How a vertex received its current distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provenance {
    Unset,
    Source,
    /// Along an edge from a settled vertex.
    Vertex(u32),
    /// Straight through a window.
    Window(WindowId),
}

#[derive(Debug, Clone, Copy)]
enum EventKind {
    Vertex(u32),
    Window(WindowId),
}

#[derive(Debug, Clone, Copy)]
struct Event {
    key: f64,
    seq: u64,
    kind: EventKind,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; FIFO on equal keys
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct PropagationStats {
    windows_created: usize,
    windows_propagated: usize,
    windows_pruned: usize,
    vertices_expanded: usize,
    pseudo_sources: usize,
}

/// A segment of the unfolded face a window spills into.
#[derive(Debug, Clone, Copy)]
struct ChildSegment {
    start: (u32, Point2<f64>),
    end: (u32, Point2<f64>),
    /// The face corner not on the segment.
    apex: Point2<f64>,
}

/// State of one wavefront run.
struct Propagation<'a> {
    nav: &'a NavMesh,
    epsilon: f64,
    labels: Vec<f64>,
    provenance: Vec<Provenance>,
    expanded: Vec<bool>,
    windows: Vec<Window>,
    /// Propagated windows per `(edge, into_face)`.
    processed: HashMap<(u32, u32), Vec<WindowId>>,
    queue: BinaryHeap<Event>,
    seq: u64,
    stats: PropagationStats,
}

impl<'a> Propagation<'a> {
    fn new(nav: &'a NavMesh, epsilon: f64, source: u32) -> Self {
        let vertex_count = nav.vertex_count();
        let mut propagation = Self {
            nav,
            epsilon,
            labels: vec![f64::INFINITY; vertex_count],
            provenance: vec![Provenance::Unset; vertex_count],
            expanded: vec![false; vertex_count],
            windows: Vec::new(),
            processed: HashMap::new(),
            queue: BinaryHeap::new(),
            seq: 0,
            stats: PropagationStats::default(),
        };
        propagation.labels[source as usize] = 0.0;
        propagation.provenance[source as usize] = Provenance::Source;
        propagation.push_event(0.0, EventKind::Vertex(source));
        propagation
    }

    /// Process events until `target` is settled, or until none remain.
    fn run(&mut self, target: Option<u32>) {
        while let Some(event) = self.queue.pop() {
            if let Some(target) = target {
                // Every later offer is at least `event.key`
                if event.key + self.epsilon >= self.labels[target as usize] {
                    break;
                }
            }
            match event.kind {
                EventKind::Vertex(vertex) => self.expand_vertex(vertex, event.key),
                EventKind::Window(id) => self.process_window(id),
            }
        }
    }

    fn push_event(&mut self, key: f64, kind: EventKind) {
        self.queue.push(Event {
            key,
            seq: self.seq,
            kind,
        });
        self.seq += 1;
    }

    fn offer(&mut self, vertex: u32, distance: f64, provenance: Provenance) {
        let index = vertex as usize;
        if self.expanded[index] || distance >= self.labels[index] - self.epsilon {
            return;
        }
        self.labels[index] = distance;
        self.provenance[index] = provenance;
        self.push_event(distance, EventKind::Vertex(vertex));
    }

    fn expand_vertex(&mut self, vertex: u32, key: f64) {
        let index = vertex as usize;
        if self.expanded[index] || key > self.labels[index] {
            return;
        }
        self.expanded[index] = true;
        self.stats.vertices_expanded += 1;

        let nav = self.nav;
        let sigma = self.labels[index];

        for &edge_id in nav.vertex_edges(vertex) {
            let edge = &nav.edges()[edge_id as usize];
            if let Some(neighbor) = edge.other_vertex(vertex) {
                self.offer(neighbor, sigma + edge.length, Provenance::Vertex(vertex));
            }
        }

        if !self.emits_windows(vertex) {
            return;
        }
        self.stats.pseudo_sources += 1;

        let position = nav.position(vertex);
        for &face in nav.vertex_faces(vertex) {
            let Some(face_edges) = nav.face_edges(face) else {
                continue;
            };
            let Some(&opposite) = face_edges
                .iter()
                .find(|&&e| !nav.edges()[e as usize].vertices.contains(&vertex))
            else {
                continue;
            };
            let edge = &nav.edges()[opposite as usize];
            let [a, b] = edge.vertices;
            let Some(frame) = EdgeFrame::new(nav.position(a), nav.position(b)) else {
                continue;
            };
            let projected = frame.project(&position);
            if projected.y < DEGENERATE_LENGTH {
                continue;
            }

            for &into in &edge.faces {
                if into != face {
                    self.add_window(Window {
                        edge: opposite,
                        into_face: Some(into),
                        b0: 0.0,
                        b1: edge.length,
                        source: Point2::new(projected.x, -projected.y),
                        sigma,
                        pseudo_source: vertex,
                        parent: None,
                    });
                }
            }
        }
    }

    /// Whether shortest paths can bend at `vertex`.
    ///
    /// Straight lines pass through flat and convex interior vertices, so
    /// the windows that reached them already light up everything beyond.
    fn emits_windows(&self, vertex: u32) -> bool {
        self.provenance[vertex as usize] == Provenance::Source
            || self.nav.is_boundary_vertex(vertex)
            || self.nav.is_saddle_vertex(vertex)
    }

    /// Whether an endpoint reaches the whole interval more cheaply along the
    /// edge than the window does.
    fn dominated_by_endpoints(&self, window: &Window) -> bool {
        let edge = &self.nav.edges()[window.edge as usize];
        let [a, b] = edge.vertices;
        let via_a = self.labels[a as usize] + window.b1;
        let via_b = self.labels[b as usize] + (edge.length - window.b0);
        via_a + self.epsilon < window.distance_at(window.b1)
            || via_b + self.epsilon < window.distance_at(window.b0)
    }

    /// Whether an already propagated window on the same edge and face is
    /// strictly closer over this window's whole interval.
    fn dominated_by_processed(&self, window: &Window, into: u32) -> bool {
        let Some(ids) = self.processed.get(&(window.edge, into)) else {
            return false;
        };
        let floor = window.min_distance();
        ids.iter().any(|&id| {
            let other = &self.windows[id as usize];
            other.covers(window, self.epsilon)
                && other
                    .distance_at(window.b0)
                    .max(other.distance_at(window.b1))
                    + self.epsilon
                    < floor
        })
    }

    fn add_window(&mut self, window: Window) {
        if window.width() < self.epsilon {
            return;
        }
        if self.dominated_by_endpoints(&window) {
            self.stats.windows_pruned += 1;
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        // Truncation: window counts stay far below u32::MAX for supported meshes
        let id = self.windows.len() as WindowId;
        self.windows.push(window);
        self.stats.windows_created += 1;

        let edge = &self.nav.edges()[window.edge as usize];
        let [a, b] = edge.vertices;
        let length = edge.length;
        if window.b0 < self.epsilon {
            self.offer(a, window.distance_at(0.0), Provenance::Window(id));
        }
        if window.b1 > length - self.epsilon {
            self.offer(b, window.distance_at(length), Provenance::Window(id));
        }
        if window.into_face.is_some() {
            self.push_event(window.min_distance(), EventKind::Window(id));
        }
    }

    fn process_window(&mut self, id: WindowId) {
        let window = self.windows[id as usize];
        let Some(into) = window.into_face else {
            return;
        };
        if self.dominated_by_endpoints(&window) || self.dominated_by_processed(&window, into) {
            self.stats.windows_pruned += 1;
            return;
        }
        self.processed.entry((window.edge, into)).or_default().push(id);
        self.stats.windows_propagated += 1;
        self.propagate(id, &window, into);
    }

    /// Unfold `face` across the window's edge and push the window through it.
    fn propagate(&mut self, id: WindowId, window: &Window, face: u32) {
        // Grazing: rays run along the edge and never enter the face
        if window.source.y > -DEGENERATE_LENGTH {
            return;
        }

        let nav = self.nav;
        let edge = &nav.edges()[window.edge as usize];
        let [a, b] = edge.vertices;
        let Some(apex) = nav.opposite_vertex(face, window.edge) else {
            return;
        };
        let Some(frame) = EdgeFrame::new(nav.position(a), nav.position(b)) else {
            return;
        };
        let q = frame.project(&nav.position(apex));
        if q.y < DEGENERATE_LENGTH {
            return;
        }
        let a2 = Point2::origin();
        let b2 = Point2::new(edge.length, 0.0);
        let s = window.source;

        // Where the line from the pseudo-source through the apex meets the edge
        let xq = s.x + (q.x - s.x) * (-s.y) / (q.y - s.y);
        if xq >= window.b0 - self.epsilon && xq <= window.b1 + self.epsilon {
            self.offer(apex, window.sigma + (q - s).norm(), Provenance::Window(id));
        }

        let hi = window.b1.min(xq);
        if hi - window.b0 > self.epsilon {
            let segment = ChildSegment {
                start: (a, a2),
                end: (apex, q),
                apex: b2,
            };
            self.spawn_children(id, window, face, &segment, (window.b0, hi));
        }
        let lo = window.b0.max(xq);
        if window.b1 - lo > self.epsilon {
            let segment = ChildSegment {
                start: (apex, q),
                end: (b, b2),
                apex: a2,
            };
            self.spawn_children(id, window, face, &segment, (lo, window.b1));
        }
    }

    /// Create the windows that `range` of the parent window lights up on
    /// `segment`, one per face beyond it.
    fn spawn_children(
        &mut self,
        parent: WindowId,
        window: &Window,
        face: u32,
        segment: &ChildSegment,
        range: (f64, f64),
    ) {
        let nav = self.nav;
        let (start, p0) = segment.start;
        let (end, p1) = segment.end;
        let Some(edge_id) = nav.find_edge(start, end) else {
            return;
        };
        let edge = &nav.edges()[edge_id as usize];

        let s = window.source;
        let (Some(mu0), Some(mu1)) = (
            ray_segment_param(&s, &Point2::new(range.0, 0.0), &p0, &p1),
            ray_segment_param(&s, &Point2::new(range.1, 0.0), &p0, &p1),
        ) else {
            return;
        };

        let (origin, tip) = if edge.vertices[0] == start {
            (p0, p1)
        } else {
            (p1, p0)
        };
        let span = tip - origin;
        let length = span.norm();
        if length < DEGENERATE_LENGTH {
            return;
        }
        let axis = span / length;
        let normal = Vector2::new(-axis.y, axis.x);
        // The unfolded face must end up on -y of the child frame
        let side = if (segment.apex - origin).dot(&normal) >= 0.0 {
            1.0
        } else {
            -1.0
        };

        let along = |mu: f64| (p0 + (p1 - p0) * mu - origin).dot(&axis);
        let (c0, c1) = (along(mu0), along(mu1));
        let rel = s - origin;
        let child = Window {
            edge: edge_id,
            into_face: None,
            b0: c0.min(c1).max(0.0),
            b1: c0.max(c1).min(edge.length),
            source: Point2::new(rel.dot(&axis), -side * rel.dot(&normal)),
            sigma: window.sigma,
            pseudo_source: window.pseudo_source,
            parent: Some(parent),
        };

        let mut spawned = false;
        for &next in &edge.faces {
            if next != face {
                spawned = true;
                self.add_window(Window {
                    into_face: Some(next),
                    ..child
                });
            }
        }
        if !spawned {
            self.add_window(child);
        }
    }

    /// Polyline from the source to `target`, following provenance back.
    fn trace(&self, target: u32) -> Vec<Point3<f64>> {
        let nav = self.nav;
        let mut points = vec![nav.position(target)];
        let mut vertex = target;

        // Provenance always points at an earlier settled vertex
        for _ in 0..self.labels.len() {
            match self.provenance[vertex as usize] {
                Provenance::Source | Provenance::Unset => break,
                Provenance::Vertex(previous) => {
                    self.push_point(&mut points, nav.position(previous));
                    vertex = previous;
                }
                Provenance::Window(id) => vertex = self.trace_window(id, &mut points),
            }
        }

        points.reverse();
        points
    }

    /// Walk a window chain back to its pseudo-source, recording every edge
    /// crossing. Returns the pseudo-source.
    fn trace_window(&self, mut id: WindowId, points: &mut Vec<Point3<f64>>) -> u32 {
        let nav = self.nav;
        loop {
            let window = &self.windows[id as usize];
            let [a, b] = nav.edges()[window.edge as usize].vertices;
            if let (Some(frame), Some(&current)) =
                (EdgeFrame::new(nav.position(a), nav.position(b)), points.last())
            {
                let p = frame.project(&current);
                let s = window.source;
                let denom = p.y - s.y;
                let t = if denom > DEGENERATE_LENGTH { p.y / denom } else { 0.0 };
                let x = (p.x + t * (s.x - p.x)).max(window.b0).min(window.b1);
                self.push_point(points, frame.lift(x));
            }
            match window.parent {
                Some(parent) => id = parent,
                None => {
                    self.push_point(points, nav.position(window.pseudo_source));
                    return window.pseudo_source;
                }
            }
        }
    }

    fn push_point(&self, points: &mut Vec<Point3<f64>>, point: Point3<f64>) {
        let distinct = match points.last() {
            Some(last) => (last - point).norm() > self.epsilon,
            None => true,
        };
        if distinct {
            points.push(point);
        }
    }

    fn log_stats(&self, source: usize, target: Option<usize>) {
        debug!(
            source,
            target = ?target,
            windows_created = self.stats.windows_created,
            windows_propagated = self.stats.windows_propagated,
            windows_pruned = self.stats.windows_pruned,
            vertices_expanded = self.stats.vertices_expanded,
            pseudo_sources = self.stats.pseudo_sources,
            "Geodesic propagation finished"
        );
    }
}

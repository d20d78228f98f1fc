//! Text-in, text-out navigation answers.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use navmesh_types::Point3;
use tracing::{info, warn};

use crate::config::ResponderConfig;
use crate::extract::CoordinateExtractor;
use crate::result::{distance_message, DistanceResult, Route, EXTRACTION_FAILED_MESSAGE};
use crate::service::DistanceQueryService;
use crate::visualize::{PathVisualizer, VisualizationScene};

/// Answers natural-language distance questions.
///
/// Positions are read with a [`CoordinateExtractor`] and measured with a
/// [`DistanceQueryService`]. When a visualizer and an output directory are
/// configured, every navigable answer also writes a visualization named
/// after the rounded query points; failures there are logged and never
/// change the answer.
pub struct NavigationResponder {
    service: Arc<DistanceQueryService>,
    extractor: CoordinateExtractor,
    visualizer: Option<Arc<dyn PathVisualizer>>,
    config: ResponderConfig,
}

impl std::fmt::Debug for NavigationResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationResponder")
            .field("service", &self.service)
            .field("extractor", &self.extractor)
            .field("has_visualizer", &self.visualizer.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl NavigationResponder {
    /// Create a responder without visualization.
    #[must_use]
    pub fn new(service: Arc<DistanceQueryService>, extractor: CoordinateExtractor) -> Self {
        Self {
            service,
            extractor,
            visualizer: None,
            config: ResponderConfig::default(),
        }
    }

    /// Use `visualizer` for navigable answers.
    #[must_use]
    pub fn with_visualizer(mut self, visualizer: Arc<dyn PathVisualizer>) -> Self {
        self.visualizer = Some(visualizer);
        self
    }

    /// Set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResponderConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying query service.
    #[must_use]
    pub fn service(&self) -> &Arc<DistanceQueryService> {
        &self.service
    }

    /// Navigable distance between the positions described in `query`.
    #[must_use]
    pub fn actual_distance_from_query(&self, query: &str) -> String {
        info!("Calling the navigable distance function");
        let response = match self.extractor.extract(query) {
            Some((start, goal)) => self.navigable_answer(&start, &goal),
            None => DistanceResult::ExtractionFailed.message(),
        };
        info!(response = %response, "Navigable distance response");
        response
    }

    /// Straight-line distance between the positions described in `query`.
    #[must_use]
    pub fn straight_line_distance_from_query(&self, query: &str) -> String {
        info!("Calling the straight-line distance function");
        let response = match self.extractor.extract(query) {
            Some((start, goal)) => self.straight_line_answer(&start, &goal),
            None => EXTRACTION_FAILED_MESSAGE.to_string(),
        };
        info!(response = %response, "Straight-line distance response");
        response
    }

    /// Answer for a straight-line question between known points.
    #[must_use]
    pub fn straight_line_answer(&self, start: &Point3<f64>, goal: &Point3<f64>) -> String {
        match self.service.straight_line_distance(start, goal) {
            Ok(distance) => distance_message(distance),
            Err(e) => {
                warn!(error = %e, "Straight-line query rejected");
                EXTRACTION_FAILED_MESSAGE.to_string()
            }
        }
    }

    /// Answer for a navigable question between known points, writing a
    /// visualization when configured.
    #[must_use]
    pub fn navigable_answer(&self, start: &Point3<f64>, goal: &Point3<f64>) -> String {
        let result = match self.service.navigable_distance(start, goal) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Navigable query rejected");
                return EXTRACTION_FAILED_MESSAGE.to_string();
            }
        };
        if let Some(route) = result.route() {
            self.visualize(start, goal, route);
        }
        result.message()
    }

    fn visualize(&self, start: &Point3<f64>, goal: &Point3<f64>, route: &Route) {
        let Some(visualizer) = &self.visualizer else {
            return;
        };
        let Some(output) = visualization_path(&self.config, start, goal) else {
            return;
        };
        info!(path = %output.display(), "Saving the visualization");

        if let Some(dir) = output.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!(error = %e, dir = %dir.display(), "Could not create visualization directory");
                return;
            }
        }
        let scene = VisualizationScene::for_route(self.service.nav().mesh(), start, goal, route);
        if let Err(e) = visualizer.render(&scene, &output) {
            warn!(error = %e, path = %output.display(), "Visualization failed");
        }
    }
}

/// File name for the visualization of a query: each point's coordinates
/// rounded to two decimals and joined by `-`, start and goal joined by `_`.
///
/// # Example
///
/// ```
/// use navmesh_query::visualization_filename;
/// use navmesh_types::Point3;
///
/// let name = visualization_filename(&Point3::new(1.234, 0.0, 2.5), &Point3::new(-3.0, 4.567, 0.1));
/// assert_eq!(name, "1.23-0.0-2.5_-3.0-4.57-0.1.html");
/// ```
#[must_use]
pub fn visualization_filename(start: &Point3<f64>, goal: &Point3<f64>) -> String {
    format!("{}_{}.html", rounded(start), rounded(goal))
}

fn rounded(point: &Point3<f64>) -> String {
    point
        .iter()
        .map(|c| {
            // Normalize -0.0 so it prints as 0.0
            let r = (c * 100.0).round() / 100.0 + 0.0;
            format!("{r:?}")
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Where [`NavigationResponder`] writes the visualization for a query.
#[must_use]
pub fn visualization_path(config: &ResponderConfig, start: &Point3<f64>, goal: &Point3<f64>) -> Option<PathBuf> {
    config
        .vis_dir
        .as_ref()
        .map(|dir| dir.join(visualization_filename(start, goal)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{CompletionError, VisualizeError};
    use crate::extract::TextCompletion;
    use crate::result::UNREACHABLE_MESSAGE;
    use crate::visualize::HtmlVisualizer;
    use navmesh_store::NavMesh;
    use navmesh_types::{unit_square, Vector3};
    use std::path::Path;

    fn fixed(answer: &'static str) -> CoordinateExtractor {
        CoordinateExtractor::new(Arc::new(
            move |_: &str, _: &str| -> Result<String, CompletionError> { Ok(answer.to_string()) },
        ) as Arc<dyn TextCompletion>)
    }

    fn service() -> Arc<DistanceQueryService> {
        Arc::new(DistanceQueryService::new(Arc::new(
            NavMesh::from_mesh(unit_square()).unwrap(),
        )))
    }

    struct FailingVisualizer;

    impl PathVisualizer for FailingVisualizer {
        fn render(&self, _: &VisualizationScene<'_>, _: &Path) -> Result<(), VisualizeError> {
            Err(VisualizeError::EmptyScene)
        }
    }

    #[test]
    fn navigable_answer() {
        let responder = NavigationResponder::new(service(), fixed("(1,0,0),(0,1,0)"));
        let answer = responder.actual_distance_from_query("how far?");
        let value: f64 = answer
            .strip_prefix("The distance between specified points is ")
            .and_then(|rest| rest.strip_suffix(" meters."))
            .unwrap()
            .parse()
            .unwrap();
        assert!((value - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn straight_line_answer() {
        let responder = NavigationResponder::new(service(), fixed("(0,0,0),(3,4,0)"));
        assert_eq!(
            responder.straight_line_distance_from_query("how far?"),
            "The distance between specified points is 5.0 meters."
        );
    }

    #[test]
    fn sentinel_falls_back() {
        let responder = NavigationResponder::new(service(), fixed("None"));
        assert_eq!(
            responder.actual_distance_from_query("no positions here"),
            EXTRACTION_FAILED_MESSAGE
        );
        assert_eq!(
            responder.straight_line_distance_from_query("no positions here"),
            EXTRACTION_FAILED_MESSAGE
        );
    }

    #[test]
    fn unreachable_answer() {
        let mut mesh = unit_square();
        let mut island = unit_square();
        island.translate(Vector3::new(4.0, 0.0, 0.0));
        mesh.merge(&island);
        let service = Arc::new(DistanceQueryService::new(Arc::new(
            NavMesh::from_mesh(mesh).unwrap(),
        )));
        let responder = NavigationResponder::new(service, fixed("(0,0,0),(5,1,0)"));

        assert_eq!(responder.actual_distance_from_query("q"), UNREACHABLE_MESSAGE);
    }

    #[test]
    fn writes_visualization() {
        let dir = tempfile::tempdir().unwrap();
        let vis_dir = dir.path().join("vis");
        let config = ResponderConfig::default().with_vis_dir(&vis_dir);
        let responder = NavigationResponder::new(service(), fixed("(1,0,0),(0,1,0)"))
            .with_visualizer(Arc::new(HtmlVisualizer::new()))
            .with_config(config.clone());

        let _ = responder.actual_distance_from_query("q");

        let expected = visualization_path(
            &config,
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert_eq!(expected, vis_dir.join("1.0-0.0-0.0_0.0-1.0-0.0.html"));
        assert!(expected.exists());
    }

    #[test]
    fn no_visualization_without_dir() {
        let config = ResponderConfig::default();
        let responder = NavigationResponder::new(service(), fixed("(1,0,0),(0,1,0)"))
            .with_visualizer(Arc::new(HtmlVisualizer::new()))
            .with_config(config.clone());

        let plain = NavigationResponder::new(service(), fixed("(1,0,0),(0,1,0)"));

        assert!(visualization_path(&config, &Point3::origin(), &Point3::origin()).is_none());
        assert_eq!(
            responder.actual_distance_from_query("q"),
            plain.actual_distance_from_query("q")
        );
    }

    #[test]
    fn visualization_failure_keeps_answer() {
        let dir = tempfile::tempdir().unwrap();
        let plain = NavigationResponder::new(service(), fixed("(1,0,0),(0,1,0)"));
        let failing = NavigationResponder::new(service(), fixed("(1,0,0),(0,1,0)"))
            .with_visualizer(Arc::new(FailingVisualizer))
            .with_config(ResponderConfig::default().with_vis_dir(dir.path()));

        assert_eq!(
            failing.actual_distance_from_query("q"),
            plain.actual_distance_from_query("q")
        );
    }

    #[test]
    fn filename_rounding() {
        assert_eq!(
            visualization_filename(&Point3::new(-0.001, 1.005, 10.0), &Point3::new(2.0, 2.0, 2.0)),
            "0.0-1.0-10.0_2.0-2.0-2.0.html"
        );
    }
}

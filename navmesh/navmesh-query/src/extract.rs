//! Reading query positions out of natural language.
//!
//! A [`TextCompletion`] backend (typically a chat model) turns the user's
//! query into `"(x1,y1,z1),(x2,y2,z2)"` or the sentinel `None`;
//! [`parse_positions`] reads that answer.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use navmesh_types::Point3;
use tracing::{info, warn};

use crate::config::ExtractionConfig;
use crate::error::CompletionError;

/// Instruction sent with every extraction request.
pub const POSITIONS_SYSTEM_PROMPT: &str = "Act as a text-to-positions converter. \
Your job is to process a natural language query which contains information about 3D positions of two objects. \
Return an answer in the following format: '(x1,y1,z1),(x2,y2,z2)', where x1,y1,z1 correspond to 3D position \
of the first object and x2,y2,z2 are the coordinates of the second object. \
Make sure that the xyz positions have no more than three decimal values. \
If in the input there are no positions given, the positions do not have all 3 components each, \
the values cannot be parsed to values or if there are too few/too many objects, return 'None'. \
Do not perform actions that are not related to this task.";

/// The answer a backend gives when a query holds no usable positions.
pub const NO_POSITIONS_SENTINEL: &str = "None";

/// A text completion backend.
pub trait TextCompletion: Send + Sync {
    /// Complete `user_query` under `system_prompt`.
    ///
    /// # Errors
    ///
    /// Any backend failure.
    fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String, CompletionError>;
}

impl<F> TextCompletion for F
where
    F: Fn(&str, &str) -> Result<String, CompletionError> + Send + Sync,
{
    fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String, CompletionError> {
        self(system_prompt, user_query)
    }
}

/// Read two points from a completion response.
///
/// Accepts `"(x1,y1,z1),(x2,y2,z2)"` with arbitrary whitespace and optional
/// surrounding quotes. The sentinel, a wrong number of values, and
/// non-numeric or non-finite values all give `None`.
///
/// # Example
///
/// ```
/// use navmesh_query::parse_positions;
///
/// let (a, b) = parse_positions("'(1.5, 0, 2), (-3,4.25,0)'").unwrap();
/// assert_eq!(a.x, 1.5);
/// assert_eq!(b.y, 4.25);
///
/// assert!(parse_positions("None").is_none());
/// assert!(parse_positions("(1,2),(3,4)").is_none());
/// ```
#[must_use]
pub fn parse_positions(response: &str) -> Option<(Point3<f64>, Point3<f64>)> {
    let trimmed = response.trim().trim_matches(|c| c == '\'' || c == '"').trim();
    if trimmed.is_empty() || trimmed == NO_POSITIONS_SENTINEL {
        return None;
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != '(' && *c != ')').collect();
    let values = cleaned
        .split(',')
        .map(|field| field.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()?;

    match values.as_slice() {
        &[x1, y1, z1, x2, y2, z2] => Some((Point3::new(x1, y1, z1), Point3::new(x2, y2, z2))),
        _ => None,
    }
}

/// Turns natural-language queries into start and goal points.
///
/// Each completion runs on its own thread and is abandoned after
/// [`ExtractionConfig::timeout`]; a late answer is discarded.
#[derive(Clone)]
pub struct CoordinateExtractor {
    completion: Arc<dyn TextCompletion>,
    config: ExtractionConfig,
}

impl std::fmt::Debug for CoordinateExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CoordinateExtractor {
    /// Create an extractor with default configuration.
    #[must_use]
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self::with_config(completion, ExtractionConfig::default())
    }

    /// Create an extractor with the given configuration.
    #[must_use]
    pub fn with_config(completion: Arc<dyn TextCompletion>, config: ExtractionConfig) -> Self {
        Self { completion, config }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Start and goal points described by `query`, or `None` if the backend
    /// fails, times out, or gives an unusable answer.
    #[must_use]
    pub fn extract(&self, query: &str) -> Option<(Point3<f64>, Point3<f64>)> {
        info!(query, "Extracting positions");

        let (tx, rx) = mpsc::channel();
        let completion = Arc::clone(&self.completion);
        let owned_query = query.to_owned();
        let spawned = thread::Builder::new()
            .name("navmesh-extract".into())
            .spawn(move || {
                // The receiver is gone after a timeout
                let _ = tx.send(completion.complete(POSITIONS_SYSTEM_PROMPT, &owned_query));
            });
        if let Err(e) = spawned {
            warn!(error = %e, "Failed to start completion thread");
            return None;
        }

        let response = match rx.recv_timeout(self.config.timeout) {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(error = %e, "Position completion failed");
                return None;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(timeout = ?self.config.timeout, "Position completion timed out");
                return None;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                warn!("Position completion thread exited without a response");
                return None;
            }
        };

        info!(response = %response, "Retrieved positions");
        let parsed = parse_positions(&response);
        if parsed.is_none() {
            info!("Could not parse the positions");
        }
        parsed
    }
}

//! Navigable distance queries from the command line.
//!
//! # Commands
//!
//! - `navdist --navmesh scene.navmesh info` - Mesh counts and bounds
//! - `navdist --navmesh scene.navmesh straight 0,0,0 4,3,0` - Straight-line distance
//! - `navdist --navmesh scene.navmesh navigable 0,0,0 4,3,0 --html route.html` -
//!   Walking distance, optionally rendered to HTML
//! - `navdist --navmesh scene.navmesh parse "(0,0,0),(4,3,0)"` - Answer a raw
//!   completion response
//!
//! Logging goes to stderr. `-v` raises the level (info, debug, trace);
//! `RUST_LOG` overrides it.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use navmesh::types::Point3;
use tracing_subscriber::EnvFilter;

/// Navigable distance engine
///
/// Answers distance questions against a walkable triangle mesh.
#[derive(Parser)]
#[command(name = "navdist")]
#[command(about = "Navigable distances on triangle navigation meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Navmesh file (`<vertex_count> <face_count>` header, vertices, faces)
    #[arg(long, global = true, default_value = "navmesh.txt")]
    navmesh: PathBuf,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print vertex, face, edge and component counts and the bounds
    Info,

    /// Straight-line distance between two points
    Straight {
        /// Start point as `x,y,z`
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        start: Point3<f64>,

        /// Goal point as `x,y,z`
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        goal: Point3<f64>,
    },

    /// Walking distance over the mesh between two points
    Navigable {
        /// Start point as `x,y,z`
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        start: Point3<f64>,

        /// Goal point as `x,y,z`
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        goal: Point3<f64>,

        /// Write the route as a standalone HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Parse a raw completion response and answer for the points it names
    Parse {
        /// Response text, e.g. `(0,0,0),(4,3,0)`
        #[arg(name = "RESPONSE", allow_hyphen_values = true)]
        response: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info => commands::info(&cli.navmesh),
        Commands::Straight { start, goal } => commands::straight(&cli.navmesh, &start, &goal),
        Commands::Navigable { start, goal, html } => {
            commands::navigable(&cli.navmesh, &start, &goal, html.as_deref())
        }
        Commands::Parse { response } => commands::parse(&cli.navmesh, &response),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .init();
}

/// Parse `x,y,z` into a point.
fn parse_point(s: &str) -> Result<Point3<f64>, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in '{s}': {e}"))?;

    match coords.as_slice() {
        [x, y, z] if coords.iter().all(|c| c.is_finite()) => Ok(Point3::new(*x, *y, *z)),
        [_, _, _] => Err(format!("coordinates must be finite: '{s}'")),
        _ => Err(format!("expected x,y,z but got '{s}'")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_point_accepts_triples() {
        assert_eq!(parse_point("1,2.5,-3").unwrap(), Point3::new(1.0, 2.5, -3.0));
        assert_eq!(parse_point(" 0 , 0 , 1 ").unwrap(), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn parse_point_rejects_bad_input() {
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,2,3,4").is_err());
        assert!(parse_point("a,b,c").is_err());
        assert!(parse_point("inf,0,0").is_err());
    }

    #[test]
    fn navigable_arguments() {
        let cli = Cli::try_parse_from([
            "navdist",
            "--navmesh",
            "scene.txt",
            "navigable",
            "0,0,0",
            "-1,2,0",
            "--html",
            "out.html",
        ])
        .unwrap();

        assert_eq!(cli.navmesh, PathBuf::from("scene.txt"));
        match cli.command {
            Commands::Navigable { start, goal, html } => {
                assert_eq!(start, Point3::origin());
                assert_eq!(goal, Point3::new(-1.0, 2.0, 0.0));
                assert_eq!(html, Some(PathBuf::from("out.html")));
            }
            _ => panic!("expected navigable"),
        }
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["navdist", "-vv", "info"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}

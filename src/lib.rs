//! Edge-covering walks over rectangular lattices.
//!
//! A tour from a start cell to a finish cell is planned by cutting the
//! lattice into three column bands, duplicating edges until each band is
//! Eulerian, extracting a circuit (outer bands) or path (middle band) from
//! each, and stitching the three walks together.  See [`plan_tour`].

pub mod balance;
pub mod band;
pub mod config;
pub mod error;
pub mod euler;
pub mod lattice;
pub mod multigraph;
pub mod stitch;
pub mod tracing_support;
pub mod walk;

pub use config::TourConfig;
pub use error::{TourError, TourResult};
pub use lattice::{Coord, Lattice, VertexId};
pub use stitch::{Tour, plan_tour};
pub use walk::Walk;

//! RiskLens Layout
//!
//! Force-directed layout for the correlation network.
//!
//! # Overview
//!
//! - [`step`]: one physics tick as a pure function of nodes, edges and config
//! - [`Simulation`]: state across ticks; [`Simulation::sync`] swaps in a new
//!   network while keeping the position and velocity of every surviving id
//! - [`LayoutWorker`]: runs a simulation on a tokio task at a fixed frame rate
//!   and publishes snapshots; the returned [`LayoutHandle`] stops it explicitly
//!   or on drop
//!
//! Rendering is not part of this crate. Anything that can draw a list of
//! `(x, y)` positions can consume the snapshots.
//!
//! # Forces
//!
//! | Force | Per tick |
//! |-------|----------|
//! | Centering | `(centre − position) × 0.005` |
//! | Repulsion | `2000 / distance²` between every pair |
//! | Spring | `(distance − 100) × 0.1` along each edge |
//! | Damping | velocity `× 0.9` |
//!
//! Positions are clamped 30 units inside an 800×500 canvas. Repulsion is
//! O(n²) per tick, so keep node counts to what the analysis layer considers
//! interactive.
//!
//! # Usage
//!
//! ```
//! use risklens_analysis::build_network;
//! use risklens_domain::{BusinessUnit, Risk, RiskKind, Severity};
//! use risklens_layout::{LayoutConfig, Simulation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = vec![
//!     Risk::new("a", RiskKind::Risk, "Port congestion", "",
//!         BusinessUnit::Operations, Severity::new(3, 4)?),
//!     Risk::new("b", RiskKind::Risk, "Port congestion", "",
//!         BusinessUnit::Operations, Severity::new(3, 5)?),
//! ];
//!
//! let mut sim = Simulation::seeded(LayoutConfig::default(), 1);
//! sim.sync(build_network(&records));
//! sim.run(60);
//!
//! for node in sim.nodes() {
//!     assert!(node.x >= 30.0 && node.x <= 770.0);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod simulation;
mod worker;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use simulation::{step, SimNode, Simulation};
pub use worker::{LayoutHandle, LayoutWorker};

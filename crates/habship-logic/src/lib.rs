//! Pure habitat metrics logic for HabShip.
//!
//! This crate contains every calculation behind the habitat designer:
//! geometry, NASA net-habitable-volume requirements, life-support loads,
//! zone allocation and compliance checks. Functions take plain data and
//! return results, with no UI, storage or runtime dependency, so the same
//! code backs the web front end, the headless harness and the tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | Zone conflict/affinity tables, pluggable adjacency oracle |
//! | [`compliance`] | NHV and floor-area verdict plus opt-in ergonomic checks |
//! | [`constants`] | NASA reference values (HIDH, NASA-STD-3001) |
//! | [`error`] | Input-validation error taxonomy |
//! | [`export`] | Rounded JSON export snapshot |
//! | [`geometry`] | Shell volume, usable floor area, NHV |
//! | [`gravity`] | Gravity environment weighting of volume vs. area |
//! | [`habitat_config`] | Configuration input bundle and evaluation pipeline |
//! | [`nhv`] | NHV-per-person requirement vs. mission duration |
//! | [`recommendations`] | Mission-driven sizing recommendations |
//! | [`resources`] | Water, O₂, CO₂, food, crop area and storage volume |
//! | [`zones`] | Functional zones and crew-based area allocation |

pub mod adjacency;
pub mod compliance;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod gravity;
pub mod habitat_config;
pub mod nhv;
pub mod recommendations;
pub mod resources;
pub mod zones;

pub use error::{HabitatError, Result};
pub use habitat_config::{HabitatConfig, HabitatReport};

//! Gravity environment: how much volume vs. floor area counts.
//!
//! In microgravity every surface is usable and volume dominates; under
//! lunar or Martian gravity the crew lives on the floor, so horizontal area
//! is weighted more heavily.

use serde::{Deserialize, Serialize};

use crate::constants::AREA_TO_VOLUME_FACTOR;
use crate::error::{HabitatError, Result};

/// Gravity regime the habitat operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityEnvironment {
    /// Orbit or transit, 0 g.
    Microgravity,
    /// Lunar surface, 1/6 g.
    Lunar,
    /// Martian surface, 3/8 g.
    Mars,
}

/// Which quantity drives habitability in an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryMetric {
    Volume,
    Area,
}

/// Static environment profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GravityProfile {
    pub code: &'static str,
    pub description: &'static str,
    pub primary_metric: PrimaryMetric,
    pub use_ceiling_walls: bool,
    pub restraints_required: bool,
    pub area_weight: f64,
    pub volume_weight: f64,
}

impl GravityEnvironment {
    pub fn all() -> &'static [GravityEnvironment] {
        &[Self::Microgravity, Self::Lunar, Self::Mars]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Microgravity => "microgravity",
            Self::Lunar => "lunar",
            Self::Mars => "mars",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|e| e.key() == key)
            .ok_or_else(|| HabitatError::UnknownEnvironment(key.to_string()))
    }

    pub fn profile(&self) -> GravityProfile {
        match self {
            Self::Microgravity => GravityProfile {
                code: "0g",
                description: "Microgravity (orbit, transit)",
                primary_metric: PrimaryMetric::Volume,
                use_ceiling_walls: true,
                restraints_required: true,
                area_weight: 0.3,
                volume_weight: 0.7,
            },
            Self::Lunar => GravityProfile {
                code: "1/6g",
                description: "Lunar gravity (1/6 Earth)",
                primary_metric: PrimaryMetric::Area,
                use_ceiling_walls: false,
                restraints_required: false,
                area_weight: 0.7,
                volume_weight: 0.3,
            },
            Self::Mars => GravityProfile {
                code: "3/8g",
                description: "Martian gravity (3/8 Earth)",
                primary_metric: PrimaryMetric::Area,
                use_ceiling_walls: false,
                restraints_required: false,
                area_weight: 0.8,
                volume_weight: 0.2,
            },
        }
    }
}

/// Volume and area re-weighted for an environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GravityAdjustment {
    pub environment: GravityEnvironment,
    pub volume_m3: f64,
    pub area_m2: f64,
    pub weighted_volume: f64,
    pub weighted_area: f64,
    /// Internal ranking heuristic; not a certified metric.
    pub habitability_score: f64,
    pub primary_metric: PrimaryMetric,
    pub restraints_required: bool,
    pub use_ceiling_walls: bool,
}

/// Weight volume and floor area for `environment` and combine them into a
/// habitability score (weighted volume + 2.5 × weighted area).
pub fn gravity_adjusted_metrics(
    volume_m3: f64,
    area_m2: f64,
    environment: GravityEnvironment,
) -> GravityAdjustment {
    let p = environment.profile();
    let weighted_volume = volume_m3 * p.volume_weight;
    let weighted_area = area_m2 * p.area_weight;
    GravityAdjustment {
        environment,
        volume_m3,
        area_m2,
        weighted_volume,
        weighted_area,
        habitability_score: weighted_volume + weighted_area * AREA_TO_VOLUME_FACTOR,
        primary_metric: p.primary_metric,
        restraints_required: p.restraints_required,
        use_ceiling_walls: p.use_ceiling_walls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        for env in GravityEnvironment::all() {
            let p = env.profile();
            assert!(
                (p.area_weight + p.volume_weight - 1.0).abs() < 1e-12,
                "{env:?} weights do not sum to 1"
            );
        }
    }

    #[test]
    fn microgravity_score() {
        let adj = gravity_adjusted_metrics(100.0, 20.0, GravityEnvironment::Microgravity);
        assert!((adj.weighted_volume - 70.0).abs() < 1e-9);
        assert!((adj.weighted_area - 6.0).abs() < 1e-9);
        assert!((adj.habitability_score - 85.0).abs() < 1e-9);
        assert!(adj.restraints_required);
        assert!(adj.use_ceiling_walls);
        assert_eq!(adj.primary_metric, PrimaryMetric::Volume);
    }

    #[test]
    fn mars_prefers_area() {
        let adj = gravity_adjusted_metrics(100.0, 20.0, GravityEnvironment::Mars);
        assert!((adj.habitability_score - (20.0 + 16.0 * 2.5)).abs() < 1e-9);
        assert_eq!(adj.primary_metric, PrimaryMetric::Area);
        assert!(!adj.restraints_required);
    }

    #[test]
    fn key_round_trip() {
        for env in GravityEnvironment::all() {
            assert_eq!(GravityEnvironment::from_key(env.key()).unwrap(), *env);
        }
        assert!(matches!(
            GravityEnvironment::from_key("venus"),
            Err(HabitatError::UnknownEnvironment(k)) if k == "venus"
        ));
    }

    #[test]
    fn serde_uses_keys() {
        let json = serde_json::to_string(&GravityEnvironment::Lunar).unwrap();
        assert_eq!(json, "\"lunar\"");
    }
}

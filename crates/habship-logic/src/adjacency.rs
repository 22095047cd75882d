//! Zone adjacency advisory: reference tables and a pluggable adjacency test.
//!
//! The tables (which zones clash, which belong together, which need
//! isolation) are static reference data. Whether two zones actually touch
//! depends on a real floor plan, which this crate does not generate, so the
//! check is delegated to an [`AdjacencyOracle`]. The default oracle,
//! [`UnsupportedAdjacency`], reports [`HabitatError::NotSupported`] instead of
//! guessing. [`DeclaredAdjacency`] takes touching pairs from the caller and
//! [`PositionedAdjacency`] derives them from zone centres.
//!
//! ```
//! use habship_logic::adjacency::{validate_zone_compatibility, DeclaredAdjacency};
//! use habship_logic::zones::ZoneId;
//!
//! let plan = DeclaredAdjacency::new([(ZoneId::Sleep, ZoneId::Exercise)]);
//! let conflicts =
//!     validate_zone_compatibility(&[ZoneId::Sleep, ZoneId::Exercise], &plan).unwrap();
//! assert_eq!(conflicts.len(), 1);
//! ```

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{HabitatError, Result};
use crate::zones::ZoneId;

/// A pair of zones with a weight and rationale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZonePair {
    pub a: ZoneId,
    pub b: ZoneId,
    /// Importance, 0–1. Applied negatively for incompatible pairs.
    pub weight: f64,
    pub reason: &'static str,
}

impl ZonePair {
    fn involves(&self, zones: &[ZoneId]) -> bool {
        zones.contains(&self.a) && zones.contains(&self.b)
    }
}

/// Zones that should not share a wall.
pub const INCOMPATIBLE_ZONES: [ZonePair; 3] = [
    ZonePair {
        a: ZoneId::Sleep,
        b: ZoneId::Exercise,
        weight: 0.9,
        reason: "Noise and vibration are incompatible with rest",
    },
    ZonePair {
        a: ZoneId::Sleep,
        b: ZoneId::Kitchen,
        weight: 0.7,
        reason: "Odors, preparation noise and constant activity",
    },
    ZonePair {
        a: ZoneId::Hygiene,
        b: ZoneId::Kitchen,
        weight: 0.7,
        reason: "Sanitary and psychological reasons (odors)",
    },
];

/// Zones that should be next to each other.
pub const RECOMMENDED_ADJACENCIES: [ZonePair; 3] = [
    ZonePair {
        a: ZoneId::Hygiene,
        b: ZoneId::Sleep,
        weight: 0.9,
        reason: "Convenient access from crew quarters",
    },
    ZonePair {
        a: ZoneId::Kitchen,
        b: ZoneId::WorkLeisure,
        weight: 0.8,
        reason: "Integrated social area",
    },
    ZonePair {
        a: ZoneId::Storage,
        b: ZoneId::Kitchen,
        weight: 0.7,
        reason: "Access to food supplies",
    },
];

/// Isolation a zone needs from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IsolationRequirement {
    pub acoustic: bool,
    pub privacy_visual: bool,
    pub vibration_isolation: bool,
    pub max_noise_db: Option<f64>,
}

/// Isolation requirements, for the zones that have any.
pub fn isolation_requirement(zone: ZoneId) -> Option<IsolationRequirement> {
    match zone {
        ZoneId::Sleep => Some(IsolationRequirement {
            acoustic: true,
            privacy_visual: true,
            vibration_isolation: false,
            max_noise_db: Some(60.0),
        }),
        ZoneId::Hygiene => Some(IsolationRequirement {
            acoustic: false,
            privacy_visual: true,
            vibration_isolation: false,
            max_noise_db: Some(70.0),
        }),
        ZoneId::Exercise => Some(IsolationRequirement {
            acoustic: true,
            privacy_visual: false,
            vibration_isolation: true,
            max_noise_db: None,
        }),
        _ => None,
    }
}

/// Answers whether two zones share a boundary in some floor plan.
pub trait AdjacencyOracle {
    fn are_adjacent(&self, a: ZoneId, b: ZoneId) -> Result<bool>;
}

/// Default oracle: no floor plan exists, so adjacency cannot be decided.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedAdjacency;

impl AdjacencyOracle for UnsupportedAdjacency {
    fn are_adjacent(&self, _a: ZoneId, _b: ZoneId) -> Result<bool> {
        Err(HabitatError::NotSupported("geometric zone adjacency"))
    }
}

/// Oracle backed by an explicit list of touching zone pairs (order-free).
#[derive(Debug, Clone, Default)]
pub struct DeclaredAdjacency {
    pairs: HashSet<(ZoneId, ZoneId)>,
}

impl DeclaredAdjacency {
    pub fn new<I: IntoIterator<Item = (ZoneId, ZoneId)>>(pairs: I) -> Self {
        Self {
            pairs: pairs.into_iter().map(|(a, b)| ordered(a, b)).collect(),
        }
    }
}

impl AdjacencyOracle for DeclaredAdjacency {
    fn are_adjacent(&self, a: ZoneId, b: ZoneId) -> Result<bool> {
        Ok(self.pairs.contains(&ordered(a, b)))
    }
}

/// Default centre-to-centre distance at which zones count as touching (m).
pub const DEFAULT_ADJACENCY_THRESHOLD_M: f64 = 1.0;

/// Oracle backed by zone centre positions on a floor plan (m).
///
/// Two zones are adjacent when their centres are at most `threshold` apart.
/// A zone without a position is adjacent to nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedAdjacency {
    centres: HashMap<ZoneId, (f64, f64)>,
    threshold: f64,
}

impl PositionedAdjacency {
    pub fn new<I: IntoIterator<Item = (ZoneId, (f64, f64))>>(centres: I, threshold: f64) -> Self {
        Self {
            centres: centres.into_iter().collect(),
            threshold,
        }
    }

    /// Positions with [`DEFAULT_ADJACENCY_THRESHOLD_M`].
    pub fn with_default_threshold<I: IntoIterator<Item = (ZoneId, (f64, f64))>>(
        centres: I,
    ) -> Self {
        Self::new(centres, DEFAULT_ADJACENCY_THRESHOLD_M)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Centre-to-centre distance, when both zones are placed.
    pub fn distance(&self, a: ZoneId, b: ZoneId) -> Option<f64> {
        let (x1, y1) = *self.centres.get(&a)?;
        let (x2, y2) = *self.centres.get(&b)?;
        Some((x2 - x1).hypot(y2 - y1))
    }
}

impl AdjacencyOracle for PositionedAdjacency {
    fn are_adjacent(&self, a: ZoneId, b: ZoneId) -> Result<bool> {
        Ok(self.distance(a, b).is_some_and(|d| d <= self.threshold))
    }
}

fn ordered(a: ZoneId, b: ZoneId) -> (ZoneId, ZoneId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// An incompatible pair found adjacent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneConflict {
    pub a: ZoneId,
    pub b: ZoneId,
    pub reason: &'static str,
}

/// Incompatible pairs that are present and adjacent according to `oracle`.
pub fn validate_zone_compatibility(
    zones: &[ZoneId],
    oracle: &dyn AdjacencyOracle,
) -> Result<Vec<ZoneConflict>> {
    let mut conflicts = Vec::new();
    for pair in INCOMPATIBLE_ZONES.iter().filter(|p| p.involves(zones)) {
        if oracle.are_adjacent(pair.a, pair.b)? {
            conflicts.push(ZoneConflict {
                a: pair.a,
                b: pair.b,
                reason: pair.reason,
            });
        }
    }
    Ok(conflicts)
}

const BASE_ADJACENCY_SCORE: f64 = 75.0;
const CONFLICT_PENALTY: f64 = 10.0;
const RECOMMENDED_BONUS: f64 = 5.0;

/// Layout adjacency score, 0–100. Starts at 75, loses 10 × weight per
/// adjacent incompatible pair, gains 5 × weight per adjacent recommended pair.
pub fn adjacency_score(zones: &[ZoneId], oracle: &dyn AdjacencyOracle) -> Result<f64> {
    let mut score = BASE_ADJACENCY_SCORE;
    for pair in INCOMPATIBLE_ZONES.iter().filter(|p| p.involves(zones)) {
        if oracle.are_adjacent(pair.a, pair.b)? {
            score -= pair.weight * CONFLICT_PENALTY;
        }
    }
    for pair in RECOMMENDED_ADJACENCIES.iter().filter(|p| p.involves(zones)) {
        if oracle.are_adjacent(pair.a, pair.b)? {
            score += pair.weight * RECOMMENDED_BONUS;
        }
    }
    Ok(score.clamp(0.0, 100.0))
}

/// Plan-independent warnings: incompatible zones that are both selected and
/// therefore must be kept apart.
pub fn incompatible_zones_present(zones: &[ZoneId]) -> Vec<String> {
    INCOMPATIBLE_ZONES
        .iter()
        .filter(|p| p.involves(zones))
        .map(|p| {
            format!(
                "Incompatible zones present: {} and {} (should not be adjacent)",
                p.a.key(),
                p.b.key()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_oracle_is_not_supported() {
        let err = validate_zone_compatibility(ZoneId::all(), &UnsupportedAdjacency).unwrap_err();
        assert!(matches!(err, HabitatError::NotSupported(_)));
        assert!(adjacency_score(ZoneId::all(), &UnsupportedAdjacency).is_err());
    }

    #[test]
    fn no_relevant_pairs_needs_no_oracle() {
        // Nothing to ask about, so even the unsupported oracle is never called.
        let zones = [ZoneId::Storage, ZoneId::Exercise];
        assert!(validate_zone_compatibility(&zones, &UnsupportedAdjacency)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn declared_adjacency_is_symmetric() {
        let plan = DeclaredAdjacency::new([(ZoneId::Kitchen, ZoneId::Sleep)]);
        assert!(plan.are_adjacent(ZoneId::Sleep, ZoneId::Kitchen).unwrap());
        assert!(plan.are_adjacent(ZoneId::Kitchen, ZoneId::Sleep).unwrap());
        assert!(!plan.are_adjacent(ZoneId::Sleep, ZoneId::Hygiene).unwrap());
    }

    #[test]
    fn positioned_threshold_is_inclusive() {
        let plan = PositionedAdjacency::with_default_threshold([
            (ZoneId::Sleep, (0.0, 0.0)),
            (ZoneId::Hygiene, (1.0, 0.0)),
            (ZoneId::Exercise, (0.0, 1.000_001)),
        ]);
        assert_eq!(plan.threshold(), 1.0);
        assert_eq!(plan.distance(ZoneId::Sleep, ZoneId::Hygiene), Some(1.0));
        assert!(plan.are_adjacent(ZoneId::Sleep, ZoneId::Hygiene).unwrap());
        assert!(plan.are_adjacent(ZoneId::Hygiene, ZoneId::Sleep).unwrap());
        assert!(!plan.are_adjacent(ZoneId::Sleep, ZoneId::Exercise).unwrap());

        // 3-4-5 triangle
        let wide = PositionedAdjacency::new(
            [(ZoneId::Kitchen, (1.0, 1.0)), (ZoneId::Storage, (4.0, 5.0))],
            5.0,
        );
        assert_eq!(wide.distance(ZoneId::Kitchen, ZoneId::Storage), Some(5.0));
        assert!(wide.are_adjacent(ZoneId::Storage, ZoneId::Kitchen).unwrap());
    }

    #[test]
    fn positioned_missing_zone_is_not_adjacent() {
        let plan = PositionedAdjacency::new([(ZoneId::Sleep, (0.0, 0.0))], 50.0);
        assert_eq!(plan.distance(ZoneId::Sleep, ZoneId::Kitchen), None);
        assert!(!plan.are_adjacent(ZoneId::Sleep, ZoneId::Kitchen).unwrap());
        assert!(!plan.are_adjacent(ZoneId::Kitchen, ZoneId::Storage).unwrap());
    }

    #[test]
    fn positioned_plan_drives_conflicts_and_score() {
        let plan = PositionedAdjacency::new(
            [
                (ZoneId::Sleep, (0.0, 0.0)),
                (ZoneId::Exercise, (2.0, 0.0)),
                (ZoneId::Hygiene, (0.0, 2.5)),
            ],
            2.5,
        );
        let zones = [ZoneId::Sleep, ZoneId::Exercise, ZoneId::Hygiene];
        let conflicts = validate_zone_compatibility(&zones, &plan).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!((conflicts[0].a, conflicts[0].b), (ZoneId::Sleep, ZoneId::Exercise));
        // 75 − 0.9 × 10 + 0.9 × 5
        let score = adjacency_score(&zones, &plan).unwrap();
        assert!((score - 70.5).abs() < 1e-9);
    }

    #[test]
    fn conflicts_only_for_adjacent_incompatible_pairs() {
        let plan = DeclaredAdjacency::new([
            (ZoneId::Sleep, ZoneId::Kitchen),
            (ZoneId::Sleep, ZoneId::Hygiene),
        ]);
        let conflicts = validate_zone_compatibility(ZoneId::all(), &plan).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].b, ZoneId::Kitchen);
    }

    #[test]
    fn score_rewards_and_penalizes() {
        let none = DeclaredAdjacency::default();
        assert_eq!(adjacency_score(ZoneId::all(), &none).unwrap(), 75.0);

        let good = DeclaredAdjacency::new([(ZoneId::Hygiene, ZoneId::Sleep)]);
        assert!((adjacency_score(ZoneId::all(), &good).unwrap() - 79.5).abs() < 1e-9);

        let bad = DeclaredAdjacency::new([(ZoneId::Sleep, ZoneId::Exercise)]);
        assert!((adjacency_score(ZoneId::all(), &bad).unwrap() - 66.0).abs() < 1e-9);
    }

    #[test]
    fn presence_warnings() {
        let warnings = incompatible_zones_present(&[ZoneId::Sleep, ZoneId::Kitchen, ZoneId::Hygiene]);
        assert_eq!(warnings.len(), 2);
        assert!(incompatible_zones_present(&[ZoneId::Sleep]).is_empty());
    }

    #[test]
    fn isolation_table() {
        assert!(isolation_requirement(ZoneId::Exercise).unwrap().vibration_isolation);
        assert_eq!(isolation_requirement(ZoneId::Sleep).unwrap().max_noise_db, Some(60.0));
        assert!(isolation_requirement(ZoneId::Storage).is_none());
    }
}

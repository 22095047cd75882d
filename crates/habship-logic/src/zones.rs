//! Functional zones and crew-based area allocation.
//!
//! Each zone gets `per-person target × crew size` square metres. The
//! allocation does not look at the habitat's floor area in the default
//! mode, so the zone total can exceed or undershoot the available floor.
//! [`AllocationMode::Strict`] rejects allocations that do not fit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_crew_size, HabitatError, Result};

/// A functional zone of the habitat. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    Sleep,
    Hygiene,
    Kitchen,
    Exercise,
    Storage,
    WorkLeisure,
}

/// Display and sizing data for a zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneInfo {
    pub name: &'static str,
    /// Hex color used by renderers.
    pub color: &'static str,
    /// Default minimum area per crew member (m²).
    pub min_area_per_person: f64,
    /// Operational volume of the zone's equipment and movement envelope (m³).
    pub operational_volume: f64,
}

impl ZoneId {
    pub fn all() -> &'static [ZoneId] {
        &[
            Self::Sleep,
            Self::Hygiene,
            Self::Kitchen,
            Self::Exercise,
            Self::Storage,
            Self::WorkLeisure,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Hygiene => "hygiene",
            Self::Kitchen => "kitchen",
            Self::Exercise => "exercise",
            Self::Storage => "storage",
            Self::WorkLeisure => "work_leisure",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|z| z.key() == key)
            .ok_or_else(|| HabitatError::UnknownZone(key.to_string()))
    }

    pub fn info(&self) -> ZoneInfo {
        match self {
            Self::Sleep => ZoneInfo {
                name: "Sleep Quarters",
                color: "#667eea",
                min_area_per_person: 4.0,
                operational_volume: 2.69,
            },
            Self::Hygiene => ZoneInfo {
                name: "Hygiene Module",
                color: "#48bb78",
                min_area_per_person: 2.0,
                operational_volume: 3.0,
            },
            Self::Kitchen => ZoneInfo {
                name: "Galley Station",
                color: "#ed8936",
                min_area_per_person: 3.0,
                operational_volume: 10.09,
            },
            Self::Exercise => ZoneInfo {
                name: "Exercise Bay",
                color: "#f56565",
                min_area_per_person: 2.5,
                operational_volume: 24.0,
            },
            Self::Storage => ZoneInfo {
                name: "Storage Module",
                color: "#9f7aea",
                min_area_per_person: 3.0,
                operational_volume: 5.0,
            },
            Self::WorkLeisure => ZoneInfo {
                name: "Work & Recreation",
                color: "#4299e1",
                min_area_per_person: 5.0,
                operational_volume: 18.2,
            },
        }
    }

    /// Private zones count toward the privacy index.
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Sleep | Self::Hygiene)
    }
}

/// Per-person area targets for the zones the caller selected (m²).
pub type ZoneAreas = BTreeMap<ZoneId, f64>;

/// Every zone at its default minimum.
pub fn default_zone_areas() -> ZoneAreas {
    ZoneId::all()
        .iter()
        .map(|z| (*z, z.info().min_area_per_person))
        .collect()
}

/// Build a target map from string keys, rejecting keys not in the zone table.
pub fn zone_areas_from_keys<'a, I>(entries: I) -> Result<ZoneAreas>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    entries
        .into_iter()
        .map(|(k, v)| Ok((ZoneId::from_key(k)?, v)))
        .collect()
}

/// Allocated area per zone (m²).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneAllocation(pub BTreeMap<ZoneId, f64>);

impl ZoneAllocation {
    pub fn get(&self, zone: ZoneId) -> Option<f64> {
        self.0.get(&zone).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, f64)> + '_ {
        self.0.iter().map(|(z, a)| (*z, *a))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn zones(&self) -> Vec<ZoneId> {
        self.0.keys().copied().collect()
    }

    pub fn total_area(&self) -> f64 {
        self.0.values().sum()
    }

    /// Fraction of the allocated total taken by `zone` (0 when nothing is allocated).
    pub fn share_of(&self, zone: ZoneId) -> f64 {
        let total = self.total_area();
        match self.get(zone) {
            Some(a) if total > 0.0 => a / total,
            _ => 0.0,
        }
    }

    pub fn per_person(&self, zone: ZoneId, crew_size: u32) -> Option<f64> {
        if crew_size == 0 {
            return None;
        }
        self.get(zone).map(|a| a / crew_size as f64)
    }
}

/// Whether allocation is checked against the available floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// No check; zone totals may exceed the floor area.
    #[default]
    Compatible,
    /// Error when the zone total exceeds the floor area.
    Strict,
}

/// Allocate `per_person × crew_size` to every selected zone.
///
/// `floor_area` does not cap or rescale the result.
pub fn allocate_zones(
    floor_area: f64,
    crew_size: u32,
    per_person: &ZoneAreas,
) -> Result<ZoneAllocation> {
    allocate_zones_with_mode(floor_area, crew_size, per_person, AllocationMode::Compatible)
}

pub fn allocate_zones_with_mode(
    floor_area: f64,
    crew_size: u32,
    per_person: &ZoneAreas,
    mode: AllocationMode,
) -> Result<ZoneAllocation> {
    ensure_crew_size(crew_size)?;
    let crew = crew_size as f64;

    let mut zones = BTreeMap::new();
    for (&zone, &area) in per_person {
        if !(area >= 0.0 && area.is_finite()) {
            return Err(HabitatError::InvalidDimension {
                field: "zone_area_per_person",
                value: area,
            });
        }
        zones.insert(zone, area * crew);
    }
    let allocation = ZoneAllocation(zones);

    if mode == AllocationMode::Strict {
        let allocated = allocation.total_area();
        if allocated > floor_area {
            return Err(HabitatError::OverAllocated {
                allocated,
                floor_area,
            });
        }
    }
    Ok(allocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_ignores_floor_area() {
        let targets = zone_areas_from_keys([("sleep", 4.0), ("hygiene", 2.0)]).unwrap();
        for floor in [1.0, 24.0, 10_000.0] {
            let alloc = allocate_zones(floor, 4, &targets).unwrap();
            assert_eq!(alloc.len(), 2);
            assert_eq!(alloc.get(ZoneId::Sleep), Some(16.0));
            assert_eq!(alloc.get(ZoneId::Hygiene), Some(8.0));
        }
    }

    #[test]
    fn only_selected_zones_allocated() {
        let mut targets = ZoneAreas::new();
        targets.insert(ZoneId::Exercise, 3.0);
        let alloc = allocate_zones(50.0, 2, &targets).unwrap();
        assert_eq!(alloc.zones(), vec![ZoneId::Exercise]);
        assert_eq!(alloc.get(ZoneId::Sleep), None);
    }

    #[test]
    fn strict_mode_rejects_overflow() {
        let targets = default_zone_areas(); // 19.5 m²/person
        let err = allocate_zones_with_mode(50.0, 4, &targets, AllocationMode::Strict).unwrap_err();
        assert!(matches!(err, HabitatError::OverAllocated { allocated, .. } if allocated == 78.0));
        assert!(allocate_zones_with_mode(80.0, 4, &targets, AllocationMode::Strict).is_ok());
    }

    #[test]
    fn unknown_zone_key() {
        let err = zone_areas_from_keys([("sleep", 4.0), ("airlock", 1.0)]).unwrap_err();
        assert!(matches!(err, HabitatError::UnknownZone(k) if k == "airlock"));
    }

    #[test]
    fn rejects_zero_crew_and_negative_target() {
        let targets = default_zone_areas();
        assert!(allocate_zones(10.0, 0, &targets).is_err());
        let mut bad = ZoneAreas::new();
        bad.insert(ZoneId::Storage, -1.0);
        assert!(allocate_zones(10.0, 2, &bad).is_err());
    }

    #[test]
    fn shares_and_per_person() {
        let targets = zone_areas_from_keys([("sleep", 3.0), ("kitchen", 1.0)]).unwrap();
        let alloc = allocate_zones(0.0, 2, &targets).unwrap();
        assert_eq!(alloc.total_area(), 8.0);
        assert!((alloc.share_of(ZoneId::Sleep) - 0.75).abs() < 1e-12);
        assert_eq!(alloc.share_of(ZoneId::Storage), 0.0);
        assert_eq!(alloc.per_person(ZoneId::Kitchen, 2), Some(1.0));
    }

    #[test]
    fn zone_keys_round_trip_and_serde() {
        for z in ZoneId::all() {
            assert_eq!(ZoneId::from_key(z.key()).unwrap(), *z);
            let json = serde_json::to_string(z).unwrap();
            assert_eq!(json, format!("\"{}\"", z.key()));
        }
    }

    #[test]
    fn allocation_serializes_as_map() {
        let targets = zone_areas_from_keys([("work_leisure", 5.0)]).unwrap();
        let alloc = allocate_zones(0.0, 2, &targets).unwrap();
        let json = serde_json::to_string(&alloc).unwrap();
        assert_eq!(json, r#"{"work_leisure":10.0}"#);
        let back: ZoneAllocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alloc);
    }

    #[test]
    fn default_minimums() {
        let total: f64 = default_zone_areas().values().sum();
        assert!((total - 19.5).abs() < 1e-12);
    }
}

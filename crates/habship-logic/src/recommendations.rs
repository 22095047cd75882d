//! Layout recommendations derived from mission parameters alone.
//!
//! Answers "how big should the habitat be?" before any shell is drawn:
//! required NHV, consumables, storage, zone volumes and critical path
//! clearances for a crew, duration, gravity environment and structure.

use serde::Serialize;

use crate::constants::{ergonomics, storage};
use crate::error::Result;
use crate::gravity::{GravityEnvironment, GravityProfile};
use crate::habitat_config::StructureType;
use crate::nhv::required_nhv_per_person;
use crate::resources::{mission_resources, storage_volume, MissionResources, StorageVolume};
use crate::zones::ZoneId;

/// Volume budget for the mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeRequirements {
    pub nhv_per_person_m3: f64,
    pub total_nhv_m3: f64,
    pub storage_m3: f64,
    pub total_required_m3: f64,
}

/// Recommended volume and placement guidance for one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRecommendation {
    pub zone: ZoneId,
    pub volume_m3: f64,
    pub guidance: &'static str,
    /// Zones to keep away from.
    pub avoid: Vec<ZoneId>,
    /// Only set for zones whose fixtures need restraints in microgravity.
    pub restraints_required: Option<bool>,
}

/// Minimum clearances of crew translation paths (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalPaths {
    pub emergency_width_m: f64,
    pub emergency_height_m: f64,
    pub high_traffic_width_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRecommendations {
    pub structure_type: StructureType,
    pub volume_requirements: VolumeRequirements,
    pub resources: MissionResources,
    pub storage: StorageVolume,
    pub gravity: GravityProfile,
    pub zones: Vec<ZoneRecommendation>,
    pub critical_paths: CriticalPaths,
}

/// Build sizing recommendations for a mission.
pub fn layout_recommendations(
    crew_size: u32,
    duration_days: u32,
    environment: GravityEnvironment,
    structure_type: StructureType,
) -> Result<LayoutRecommendations> {
    let nhv_per_person = required_nhv_per_person(duration_days)?;
    let resources = mission_resources(crew_size, duration_days)?;
    let storage = storage_volume(crew_size, duration_days, storage::DEFAULT_MARGIN)?;
    let crew = crew_size as f64;
    let total_nhv = nhv_per_person * crew;
    let gravity = environment.profile();

    let zones = vec![
        ZoneRecommendation {
            zone: ZoneId::Sleep,
            volume_m3: ZoneId::Sleep.info().operational_volume * crew,
            guidance: "Acoustic isolation required",
            avoid: vec![ZoneId::Exercise, ZoneId::Kitchen],
            restraints_required: None,
        },
        ZoneRecommendation {
            zone: ZoneId::Exercise,
            volume_m3: ZoneId::Exercise.info().operational_volume,
            guidance: "Structural vibration isolation, away from rest areas",
            avoid: vec![ZoneId::Sleep],
            restraints_required: None,
        },
        ZoneRecommendation {
            zone: ZoneId::Hygiene,
            volume_m3: ZoneId::Hygiene.info().operational_volume * crew,
            guidance: "Full visual privacy, near sleep, away from the galley",
            avoid: vec![ZoneId::Kitchen],
            restraints_required: Some(gravity.restraints_required),
        },
        ZoneRecommendation {
            zone: ZoneId::Kitchen,
            volume_m3: ZoneId::Kitchen.info().operational_volume,
            guidance: "Next to the social area with storage nearby",
            avoid: vec![ZoneId::Sleep, ZoneId::Hygiene],
            restraints_required: None,
        },
        ZoneRecommendation {
            zone: ZoneId::WorkLeisure,
            volume_m3: ZoneId::WorkLeisure.info().operational_volume,
            guidance: "Shared multi-purpose space",
            avoid: Vec::new(),
            restraints_required: None,
        },
    ];

    Ok(LayoutRecommendations {
        structure_type,
        volume_requirements: VolumeRequirements {
            nhv_per_person_m3: nhv_per_person,
            total_nhv_m3: total_nhv,
            storage_m3: storage.total_m3,
            total_required_m3: total_nhv + storage.total_m3,
        },
        resources,
        storage,
        gravity,
        zones,
        critical_paths: CriticalPaths {
            emergency_width_m: ergonomics::EMERGENCY_PATH_WIDTH,
            emergency_height_m: ergonomics::EMERGENCY_PATH_HEIGHT,
            high_traffic_width_m: ergonomics::MIN_CORRIDOR_WIDTH_HIGH_TRAFFIC,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_budget_adds_storage() {
        let r = layout_recommendations(4, 180, GravityEnvironment::Lunar, StructureType::Rigid)
            .unwrap();
        let v = r.volume_requirements;
        assert!((v.total_nhv_m3 - v.nhv_per_person_m3 * 4.0).abs() < 1e-9);
        assert!((v.total_required_m3 - (v.total_nhv_m3 + v.storage_m3)).abs() < 1e-9);
    }

    #[test]
    fn per_crew_zones_scale() {
        let small = layout_recommendations(2, 90, GravityEnvironment::Mars, StructureType::Rigid)
            .unwrap();
        let sleep = small.zones.iter().find(|z| z.zone == ZoneId::Sleep).unwrap();
        assert!((sleep.volume_m3 - 5.38).abs() < 1e-9);
        let exercise = small.zones.iter().find(|z| z.zone == ZoneId::Exercise).unwrap();
        assert_eq!(exercise.volume_m3, 24.0);
    }

    #[test]
    fn hygiene_restraints_follow_gravity() {
        let hygiene = |env| {
            layout_recommendations(4, 180, env, StructureType::Inflatable)
                .unwrap()
                .zones
                .into_iter()
                .find(|z| z.zone == ZoneId::Hygiene)
                .unwrap()
                .restraints_required
        };
        assert_eq!(hygiene(GravityEnvironment::Microgravity), Some(true));
        assert_eq!(hygiene(GravityEnvironment::Lunar), Some(false));
    }

    #[test]
    fn rejects_invalid_mission() {
        assert!(layout_recommendations(0, 180, GravityEnvironment::Lunar, StructureType::Rigid)
            .is_err());
        assert!(layout_recommendations(4, 0, GravityEnvironment::Lunar, StructureType::Rigid)
            .is_err());
    }
}

//! User-facing habitat configuration and the evaluation pipeline.
//!
//! The configuration screen collects shape, dimensions, structure, crew,
//! mission length, gravity environment, usable factor and per-zone area
//! targets. This module holds that input bundle, validates it, and runs it
//! through every calculator to produce a [`HabitatReport`].
//!
//! # Pipeline
//!
//! 1. Geometry: volume, floor area, NHV, per-person metrics
//! 2. NHV requirement for the mission duration
//! 3. Zone allocation from per-person targets
//! 4. Life-support resources and storage volume
//! 5. Gravity-weighted habitability
//! 6. Compliance verdict against NASA minimums
//!
//! ```
//! use habship_logic::habitat_config::HabitatConfig;
//!
//! let config = HabitatConfig::default();
//! assert!(config.validate().is_empty());
//! let report = config.evaluate().unwrap();
//! assert_eq!(report.zones.len(), 6);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::adjacency::incompatible_zones_present;
use crate::compliance::{validate_standards, ComplianceResult, MissionType};
use crate::constants::{standards, storage};
use crate::error::{HabitatError, Result};
use crate::geometry::{
    compute_metrics, ensure_positive, Dimensions, HabitatMetrics, HabitatShape, LaunchVehicleFit,
};
use crate::gravity::{gravity_adjusted_metrics, GravityAdjustment, GravityEnvironment};
use crate::nhv::required_nhv_per_person;
use crate::resources::{mission_resources, storage_volume, total_water_liters};
use crate::resources::{MissionResources, StorageVolume};
use crate::zones::{
    allocate_zones_with_mode, default_zone_areas, zone_areas_from_keys, AllocationMode,
    ZoneAllocation, ZoneAreas,
};

// ============================================================================
// STRUCTURE TYPE
// ============================================================================

/// Pressure shell construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// Aluminium or composite hull.
    #[default]
    Rigid,
    /// Softgoods shell, packed for launch and expanded in place.
    Inflatable,
}

/// Structure reference data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureProfile {
    pub description: &'static str,
    /// Typical usable-factor range. Guidance for the UI, not enforced.
    pub usable_factor_range: (f64, f64),
    /// Shell mass per pressurized volume (kg/m³).
    pub mass_per_volume: f64,
}

impl StructureType {
    pub fn profile(&self) -> StructureProfile {
        match self {
            Self::Rigid => StructureProfile {
                description: "Rigid structure (aluminium/composite)",
                usable_factor_range: (0.70, 0.80),
                mass_per_volume: 150.0,
            },
            Self::Inflatable => StructureProfile {
                description: "Inflatable structure (softgoods)",
                usable_factor_range: (0.85, 0.90),
                mass_per_volume: 40.0,
            },
        }
    }

    /// Estimated shell mass for a pressurized volume (kg).
    pub fn shell_mass_kg(&self, total_volume: f64) -> f64 {
        total_volume * self.profile().mass_per_volume
    }

    pub fn usable_factor_in_guidance(&self, usable_factor: f64) -> bool {
        let (lo, hi) = self.profile().usable_factor_range;
        (lo..=hi).contains(&usable_factor)
    }

    /// Inflatable shells launch packed, so only rigid shells must fit a fairing.
    pub fn launches_deployed(&self) -> bool {
        matches!(self, Self::Rigid)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Everything the user chooses on the configuration screen.
///
/// Deserialization goes through [`RawHabitatConfig`] so that zone and
/// environment keys are resolved by their lookup tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHabitatConfig")]
pub struct HabitatConfig {
    pub shape: HabitatShape,
    pub dimensions: Dimensions,
    pub structure_type: StructureType,
    pub crew_size: u32,
    pub mission_duration_days: u32,
    pub gravity_environment: GravityEnvironment,
    /// Fraction of pressurized volume usable by the crew, (0, 1].
    pub usable_factor: f64,
    /// Per-person area targets for the selected zones (m²).
    pub zone_areas: ZoneAreas,
    pub mission_type: MissionType,
    pub allocation_mode: AllocationMode,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            shape: HabitatShape::Cylinder,
            dimensions: Dimensions::cylinder(6.0, 10.0),
            structure_type: StructureType::Rigid,
            crew_size: 4,
            mission_duration_days: 180,
            gravity_environment: GravityEnvironment::Microgravity,
            usable_factor: 0.75,
            zone_areas: default_zone_areas(),
            mission_type: MissionType::Surface,
            allocation_mode: AllocationMode::Compatible,
        }
    }
}

/// Configuration as written in JSON, before key lookup. Missing fields take
/// the [`HabitatConfig`] defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawHabitatConfig {
    shape: Option<HabitatShape>,
    dimensions: Option<Dimensions>,
    structure_type: Option<StructureType>,
    crew_size: Option<u32>,
    mission_duration_days: Option<u32>,
    gravity_environment: Option<String>,
    usable_factor: Option<f64>,
    zone_areas: Option<BTreeMap<String, f64>>,
    mission_type: Option<MissionType>,
    allocation_mode: Option<AllocationMode>,
}

impl TryFrom<RawHabitatConfig> for HabitatConfig {
    type Error = HabitatError;

    fn try_from(raw: RawHabitatConfig) -> Result<Self> {
        let defaults = HabitatConfig::default();
        let gravity_environment = match raw.gravity_environment {
            Some(key) => GravityEnvironment::from_key(&key)?,
            None => defaults.gravity_environment,
        };
        let zone_areas = match raw.zone_areas {
            Some(areas) => zone_areas_from_keys(areas.iter().map(|(k, v)| (k.as_str(), *v)))?,
            None => defaults.zone_areas,
        };
        Ok(Self {
            shape: raw.shape.unwrap_or(defaults.shape),
            dimensions: raw.dimensions.unwrap_or(defaults.dimensions),
            structure_type: raw.structure_type.unwrap_or(defaults.structure_type),
            crew_size: raw.crew_size.unwrap_or(defaults.crew_size),
            mission_duration_days: raw
                .mission_duration_days
                .unwrap_or(defaults.mission_duration_days),
            gravity_environment,
            usable_factor: raw.usable_factor.unwrap_or(defaults.usable_factor),
            zone_areas,
            mission_type: raw.mission_type.unwrap_or(defaults.mission_type),
            allocation_mode: raw.allocation_mode.unwrap_or(defaults.allocation_mode),
        })
    }
}

impl HabitatConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// Unknown zone or environment keys fail with [`HabitatError::UnknownZone`]
    /// or [`HabitatError::UnknownEnvironment`]; malformed JSON with
    /// [`HabitatError::Json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawHabitatConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<HabitatError> {
        let mut errors = Vec::new();

        if self.crew_size == 0 {
            errors.push(HabitatError::InvalidCrewSize(self.crew_size));
        }
        if self.mission_duration_days == 0 {
            errors.push(HabitatError::InvalidDuration(self.mission_duration_days));
        }
        if !(self.usable_factor > 0.0 && self.usable_factor <= 1.0) {
            errors.push(HabitatError::InvalidUsableFactor(self.usable_factor));
        }

        for &field in self.shape.required_fields() {
            match self.dimensions.get(field) {
                None => errors.push(HabitatError::MissingDimension {
                    shape: self.shape.name(),
                    field: field.name(),
                }),
                Some(v) => {
                    if let Err(e) = ensure_positive(field.name(), v) {
                        errors.push(e);
                    }
                }
            }
        }

        for (&zone, &area) in &self.zone_areas {
            if !(area >= 0.0 && area.is_finite()) {
                log::debug!("zone {} has invalid target {}", zone.key(), area);
                errors.push(HabitatError::InvalidDimension {
                    field: "zone_area_per_person",
                    value: area,
                });
            }
        }

        errors
    }

    /// Run the full calculation pipeline.
    ///
    /// Fails with the first validation error. Compliance shortfalls are part
    /// of the returned report, not errors.
    pub fn evaluate(&self) -> Result<HabitatReport> {
        let mut errors = self.validate();
        if !errors.is_empty() {
            log::warn!(
                "rejected habitat configuration with {} error(s)",
                errors.len()
            );
            return Err(errors.remove(0));
        }

        log::debug!(
            "evaluating {} habitat: crew={} days={} env={}",
            self.shape.name(),
            self.crew_size,
            self.mission_duration_days,
            self.gravity_environment.key()
        );

        let metrics = compute_metrics(
            self.shape,
            &self.dimensions,
            self.usable_factor,
            self.crew_size,
        )?;
        let required_nhv = required_nhv_per_person(self.mission_duration_days)?;
        let zones = allocate_zones_with_mode(
            metrics.floor_area,
            self.crew_size,
            &self.zone_areas,
            self.allocation_mode,
        )?;
        let resources = mission_resources(self.crew_size, self.mission_duration_days)?;
        let storage = storage_volume(
            self.crew_size,
            self.mission_duration_days,
            storage::DEFAULT_MARGIN,
        )?;
        let water_liters = total_water_liters(self.crew_size, self.mission_duration_days)?;
        let launch_fit = self.dimensions.launch_fit(self.shape)?;
        let gravity = gravity_adjusted_metrics(
            metrics.total_volume,
            metrics.floor_area,
            self.gravity_environment,
        );
        let compliance = validate_standards(
            metrics.nhv_per_person,
            metrics.floor_area_per_person,
            required_nhv,
            standards::MIN_FLOOR_AREA_PER_PERSON,
            self.mission_type,
        );

        if !compliance.is_valid {
            for issue in &compliance.issues {
                log::warn!("{}", issue);
            }
        }

        let mut advisories = incompatible_zones_present(&zones.zones());
        if !self.structure_type.usable_factor_in_guidance(self.usable_factor) {
            let (lo, hi) = self.structure_type.profile().usable_factor_range;
            advisories.push(format!(
                "Usable factor {:.2} outside typical range {lo:.2}-{hi:.2} for {:?} structures",
                self.usable_factor, self.structure_type
            ));
        }
        if let Some((lo, hi)) = self.mission_type.typical_duration_days() {
            let days = self.mission_duration_days;
            if !(lo..=hi).contains(&days) {
                advisories.push(format!(
                    "Mission duration {days} days outside typical {lo}-{hi} days for {} missions",
                    self.mission_type.key()
                ));
            }
        }
        if self.structure_type.launches_deployed() && !launch_fit.any() {
            advisories.push(format!(
                "Rigid shell ({:.1} m across) does not fit the SLS or Starship payload bay",
                self.dimensions.envelope_diameter(self.shape)?
            ));
        }
        if zones.total_area() > metrics.floor_area {
            advisories.push(format!(
                "Zones need {:.1} m² but the floor provides {:.1} m²",
                zones.total_area(),
                metrics.floor_area
            ));
        }

        Ok(HabitatReport {
            config: self.clone(),
            metrics,
            required_nhv_per_person: required_nhv,
            zones,
            compliance,
            resources,
            storage,
            total_water_liters: water_liters,
            gravity,
            launch_fit,
            shell_mass_kg: self.structure_type.shell_mass_kg(metrics.total_volume),
            advisories,
        })
    }
}

/// Everything computed for one configuration. Consumed by renderers and
/// the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitatReport {
    pub config: HabitatConfig,
    pub metrics: HabitatMetrics,
    /// NHV minimum for the mission duration before any mission-type floor.
    pub required_nhv_per_person: f64,
    pub zones: ZoneAllocation,
    pub compliance: ComplianceResult,
    pub resources: MissionResources,
    pub storage: StorageVolume,
    pub total_water_liters: f64,
    pub gravity: GravityAdjustment,
    /// Whether the shell fits each launcher's payload bay standing upright.
    pub launch_fit: LaunchVehicleFit,
    pub shell_mass_kg: f64,
    /// Non-blocking design notes: incompatible zones, guidance ranges, launch fit.
    pub advisories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::ZoneId;

    #[test]
    fn default_config_is_valid() {
        let config = HabitatConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "default config should be valid: {errors:?}");
    }

    #[test]
    fn collects_every_error() {
        let config = HabitatConfig {
            crew_size: 0,
            mission_duration_days: 0,
            usable_factor: 1.5,
            dimensions: Dimensions::cylinder(-1.0, 10.0),
            ..HabitatConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], HabitatError::InvalidCrewSize(0)));
        assert!(matches!(errors[1], HabitatError::InvalidDuration(0)));
        assert!(matches!(errors[2], HabitatError::InvalidUsableFactor(_)));
        assert!(matches!(
            errors[3],
            HabitatError::InvalidDimension { field: "diameter", .. }
        ));
    }

    #[test]
    fn rectangular_needs_its_own_fields() {
        let config = HabitatConfig {
            shape: HabitatShape::Rectangular,
            ..HabitatConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2); // length and width missing
        assert!(config.evaluate().is_err());
    }

    #[test]
    fn default_report_values() {
        let report = HabitatConfig::default().evaluate().unwrap();
        // π × 3² × 10
        assert!((report.metrics.total_volume - 282.743).abs() < 1e-3);
        // 0.8 × π × 3² = 22.62 m² → 5.65 m²/person, below the 10 m² minimum
        assert!(!report.compliance.meets_floor_area_requirement);
        // 282.7 × 0.75 / 4 = 53.0 m³/person, above 26.85
        assert!(report.compliance.meets_nhv_requirement);
        assert_eq!(report.compliance.issues.len(), 1);
        assert_eq!(report.zones.get(ZoneId::Sleep), Some(16.0));
        assert!((report.total_water_liters - 1800.0).abs() < 1e-9);
        assert!(report.gravity.restraints_required);
    }

    #[test]
    fn advisories_flag_overflow_and_incompatible_zones() {
        let report = HabitatConfig::default().evaluate().unwrap();
        assert!(report.advisories.iter().any(|a| a.contains("floor provides")));
        assert!(report.advisories.iter().any(|a| a.contains("sleep and exercise")));
    }

    #[test]
    fn strict_mode_surfaces_overallocation() {
        let config = HabitatConfig {
            allocation_mode: AllocationMode::Strict,
            ..HabitatConfig::default()
        };
        assert!(matches!(
            config.evaluate(),
            Err(HabitatError::OverAllocated { .. })
        ));
    }

    #[test]
    fn inflatable_guidance() {
        let s = StructureType::Inflatable;
        assert!(s.usable_factor_in_guidance(0.88));
        assert!(!s.usable_factor_in_guidance(0.75));
        assert_eq!(s.shell_mass_kg(100.0), 4000.0);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = HabitatConfig::from_json(
            r#"{"crew_size": 6, "gravity_environment": "mars", "zone_areas": {"sleep": 4.5}}"#,
        )
        .unwrap();
        assert_eq!(config.crew_size, 6);
        assert_eq!(config.gravity_environment, GravityEnvironment::Mars);
        assert_eq!(config.zone_areas.len(), 1);
        assert_eq!(config.mission_duration_days, 180);
    }

    #[test]
    fn unknown_zone_in_json_is_rejected() {
        let err = HabitatConfig::from_json(r#"{"zone_areas": {"airlock": 2.0}}"#).unwrap_err();
        assert!(matches!(&err, HabitatError::UnknownZone(k) if k == "airlock"));
        assert!(err.is_input_error());
    }

    #[test]
    fn unknown_environment_in_json_is_rejected() {
        let err = HabitatConfig::from_json(r#"{"gravity_environment": "venus"}"#).unwrap_err();
        assert!(matches!(&err, HabitatError::UnknownEnvironment(k) if k == "venus"));
        assert!(err.is_input_error());
    }

    #[test]
    fn malformed_json_is_not_an_input_error() {
        let err = HabitatConfig::from_json(r#"{"crew_size": "four"}"#).unwrap_err();
        assert!(matches!(err, HabitatError::Json(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn serde_deserialize_resolves_keys() {
        let config: HabitatConfig =
            serde_json::from_str(r#"{"shape": "rectangular", "gravity_environment": "lunar"}"#)
                .unwrap();
        assert_eq!(config.shape, HabitatShape::Rectangular);
        assert_eq!(config.gravity_environment, GravityEnvironment::Lunar);
        assert!(serde_json::from_str::<HabitatConfig>(r#"{"gravity_environment": "venus"}"#)
            .unwrap_err()
            .to_string()
            .contains("venus"));
    }

    #[test]
    fn json_round_trip_keeps_every_field() {
        let config = HabitatConfig {
            shape: HabitatShape::Rectangular,
            dimensions: Dimensions::rectangular(8.0, 5.0, 3.0),
            gravity_environment: GravityEnvironment::Lunar,
            mission_type: MissionType::LunarSurface,
            allocation_mode: AllocationMode::Strict,
            ..HabitatConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""shape":"rectangular""#));
        assert_eq!(HabitatConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn default_shell_fits_both_launchers() {
        let report = HabitatConfig::default().evaluate().unwrap();
        assert!(report.launch_fit.sls && report.launch_fit.starship);
        assert!(!report.advisories.iter().any(|a| a.contains("payload bay")));
    }

    #[test]
    fn oversized_rigid_shell_is_flagged() {
        let rigid = HabitatConfig {
            dimensions: Dimensions::cylinder(10.0, 8.0),
            ..HabitatConfig::default()
        };
        let report = rigid.evaluate().unwrap();
        assert!(!report.launch_fit.any());
        assert!(report.advisories.iter().any(|a| a.contains("payload bay")));

        let inflatable = HabitatConfig {
            structure_type: StructureType::Inflatable,
            usable_factor: 0.88,
            ..rigid
        };
        let report = inflatable.evaluate().unwrap();
        assert!(!report.launch_fit.any());
        assert!(!report.advisories.iter().any(|a| a.contains("payload bay")));
    }

    #[test]
    fn mission_length_outside_typical_range() {
        let config = HabitatConfig {
            mission_type: MissionType::MarsSurface,
            mission_duration_days: 180,
            ..HabitatConfig::default()
        };
        let report = config.evaluate().unwrap();
        assert!(report
            .advisories
            .iter()
            .any(|a| a.contains("outside typical 500-900 days")));

        let typical = HabitatConfig {
            mission_duration_days: 600,
            ..config
        };
        let report = typical.evaluate().unwrap();
        assert!(!report.advisories.iter().any(|a| a.contains("typical")));
    }
}

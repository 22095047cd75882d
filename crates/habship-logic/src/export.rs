//! JSON export snapshot of an evaluated habitat.
//!
//! The snapshot is what the UI offers as a download: configuration summary,
//! headline metrics, zone areas and the compliance verdict. Numbers are
//! rounded to two decimals here and only here; the report keeps full
//! precision.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Dimensions, HabitatShape};
use crate::habitat_config::HabitatReport;
use crate::zones::ZoneId;

/// Snapshot layout version. Bump when fields change meaning or are removed.
pub const SCHEMA_VERSION: u32 = 1;

const PROJECT_NAME: &str = "HabShip habitat layout";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub created_at: DateTime<Utc>,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitatSection {
    pub shape: HabitatShape,
    pub dimensions: Dimensions,
    pub volume_m3: f64,
    pub floor_area_m2: f64,
    pub nhv_m3: f64,
    pub nhv_per_person_m3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSection {
    pub crew_size: u32,
    pub duration_days: u32,
    pub total_water_liters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSection {
    pub meets_nhv_requirement: bool,
    pub meets_floor_area_requirement: bool,
    pub issues: Vec<String>,
}

/// Serializable export of one habitat design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub schema_version: u32,
    pub metadata: ExportMetadata,
    pub habitat: HabitatSection,
    pub mission: MissionSection,
    pub zones: BTreeMap<ZoneId, f64>,
    pub validation: ValidationSection,
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_dimensions(d: &Dimensions) -> Dimensions {
    Dimensions {
        diameter: d.diameter.map(round2),
        height: d.height.map(round2),
        length: d.length.map(round2),
        width: d.width.map(round2),
    }
}

impl ExportSnapshot {
    pub fn from_report(report: &HabitatReport, created_at: DateTime<Utc>) -> Self {
        let config = &report.config;
        let m = &report.metrics;
        Self {
            schema_version: SCHEMA_VERSION,
            metadata: ExportMetadata {
                created_at,
                project: PROJECT_NAME.to_string(),
            },
            habitat: HabitatSection {
                shape: config.shape,
                dimensions: round_dimensions(&config.dimensions),
                volume_m3: round2(m.total_volume),
                floor_area_m2: round2(m.floor_area),
                nhv_m3: round2(m.net_habitable_volume),
                nhv_per_person_m3: round2(m.nhv_per_person),
            },
            mission: MissionSection {
                crew_size: config.crew_size,
                duration_days: config.mission_duration_days,
                total_water_liters: round2(report.total_water_liters),
            },
            zones: report.zones.iter().map(|(z, a)| (z, round2(a))).collect(),
            validation: ValidationSection {
                meets_nhv_requirement: report.compliance.meets_nhv_requirement,
                meets_floor_area_requirement: report.compliance.meets_floor_area_requirement,
                issues: report.compliance.issues.clone(),
            },
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.schema_version > SCHEMA_VERSION {
            log::warn!(
                "snapshot schema version {} is newer than supported version {}",
                snapshot.schema_version,
                SCHEMA_VERSION
            );
        }
        Ok(snapshot)
    }
}

/// Download file name, e.g. `habitat_layout_20261019_143000.json`.
pub fn export_file_name(created_at: DateTime<Utc>) -> String {
    format!("habitat_layout_{}.json", created_at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habitat_config::HabitatConfig;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 0).unwrap()
    }

    fn snapshot() -> ExportSnapshot {
        let report = HabitatConfig::default().evaluate().unwrap();
        ExportSnapshot::from_report(&report, fixed_time())
    }

    #[test]
    fn rounds_to_two_decimals() {
        let s = snapshot();
        assert_eq!(s.habitat.volume_m3, 282.74);
        assert_eq!(s.habitat.floor_area_m2, 22.62);
        assert_eq!(s.habitat.nhv_m3, 212.06);
        assert_eq!(s.habitat.nhv_per_person_m3, 53.01);
        assert_eq!(s.mission.total_water_liters, 1800.0);
        assert_eq!(s.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn json_layout() {
        let json = snapshot().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["habitat"]["shape"], "cylinder");
        assert_eq!(value["habitat"]["dimensions"]["diameter"], 6.0);
        assert!(value["habitat"]["dimensions"]["length"].is_null());
        assert_eq!(value["mission"]["crew_size"], 4);
        assert_eq!(value["zones"]["work_leisure"], 20.0);
        assert_eq!(value["validation"]["meets_nhv_requirement"], true);
        assert_eq!(value["validation"]["meets_floor_area_requirement"], false);
        assert_eq!(value["metadata"]["created_at"], "2026-10-19T14:30:00Z");
    }

    #[test]
    fn json_round_trip() {
        let original = snapshot();
        let parsed = ExportSnapshot::from_json(&original.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn file_name_uses_timestamp() {
        assert_eq!(
            export_file_name(fixed_time()),
            "habitat_layout_20261019_143000.json"
        );
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-2.344), -2.34);
        assert_eq!(round2(3.0), 3.0);
    }
}

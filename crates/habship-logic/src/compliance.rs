//! NASA habitability compliance checks.
//!
//! [`validate_standards`] is the core verdict: NHV and floor area per person
//! against their minimums. The remaining checks are opt-in and cover
//! ergonomics, cabin environment, layout efficiency, privacy and egress
//! paths. A failed check is a finding, never an error; errors are reserved
//! for inputs the checks cannot evaluate.

use serde::{Deserialize, Serialize};

use crate::constants::{environment as env, ergonomics, layout, standards};
use crate::error::{ensure_crew_size, Result};
use crate::zones::{ZoneAllocation, ZoneId};

// ── Mission type ────────────────────────────────────────────────────────

/// Kind of mission the habitat serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    /// Earth–Mars transit habitat.
    Transit,
    /// Generic surface habitat.
    #[default]
    Surface,
    LunarSurface,
    MarsSurface,
}

impl MissionType {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Transit => "transit",
            Self::Surface => "surface",
            Self::LunarSurface => "lunar_surface",
            Self::MarsSurface => "mars_surface",
        }
    }

    /// Typical mission length range (days), where the reference defines one.
    pub fn typical_duration_days(&self) -> Option<(u32, u32)> {
        match self {
            Self::Transit => Some((180, 300)),
            Self::Surface => None,
            Self::LunarSurface => Some((30, 365)),
            Self::MarsSurface => Some((500, 900)),
        }
    }

    /// NHV floor imposed by the mission type regardless of duration.
    fn nhv_floor(&self) -> Option<f64> {
        match self {
            Self::Transit => Some(standards::MIN_NHV_PER_PERSON_TRANSIT),
            _ => None,
        }
    }
}

// ── Core verdict ────────────────────────────────────────────────────────

/// Outcome of [`validate_standards`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub meets_nhv_requirement: bool,
    pub meets_floor_area_requirement: bool,
    /// NHV minimum actually applied after the mission-type adjustment.
    pub effective_min_nhv: f64,
}

/// Compare per-person NHV and floor area against their minimums.
///
/// Transit missions raise the NHV minimum to at least 27 m³/person.
pub fn validate_standards(
    nhv_per_person: f64,
    floor_area_per_person: f64,
    required_nhv_per_person: f64,
    min_floor_area_per_person: f64,
    mission_type: MissionType,
) -> ComplianceResult {
    let min_nhv = match mission_type.nhv_floor() {
        Some(floor) => required_nhv_per_person.max(floor),
        None => required_nhv_per_person,
    };

    let mut issues = Vec::new();
    let meets_nhv = nhv_per_person >= min_nhv;
    if !meets_nhv {
        issues.push(format!(
            "NHV per person ({:.1} m³) below minimum ({:.1} m³) for {} mission",
            nhv_per_person,
            min_nhv,
            mission_type.key()
        ));
    }
    let meets_floor = floor_area_per_person >= min_floor_area_per_person;
    if !meets_floor {
        issues.push(format!(
            "Floor area per person ({:.1} m²) below minimum ({:.1} m²)",
            floor_area_per_person, min_floor_area_per_person
        ));
    }

    ComplianceResult {
        is_valid: issues.is_empty(),
        issues,
        meets_nhv_requirement: meets_nhv,
        meets_floor_area_requirement: meets_floor,
        effective_min_nhv: min_nhv,
    }
}

// ── Extended findings ───────────────────────────────────────────────────

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn critical(category: &'static str, message: String) -> Self {
        Self {
            category,
            severity: Severity::Critical,
            message,
        }
    }

    fn warning(category: &'static str, message: String) -> Self {
        Self {
            category,
            severity: Severity::Warning,
            message,
        }
    }
}

/// Findings from one opt-in check group. Passes only with no findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_critical(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Critical)
    }

    pub fn messages(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.message.clone()).collect()
    }
}

/// Ceiling, corridor and door clearances.
pub fn validate_dimensions(
    ceiling_height: f64,
    corridor_width: Option<f64>,
    door: Option<(f64, f64)>,
) -> CheckReport {
    use ergonomics::*;
    let mut findings = Vec::new();

    if ceiling_height < MIN_CEILING_HEIGHT {
        findings.push(Finding::critical(
            "dimensions",
            format!(
                "Ceiling height ({ceiling_height:.2} m) below minimum ({MIN_CEILING_HEIGHT} m)"
            ),
        ));
    }
    if let Some(width) = corridor_width {
        if width < MIN_CORRIDOR_WIDTH {
            findings.push(Finding::warning(
                "dimensions",
                format!("Corridor width ({width:.2} m) below minimum ({MIN_CORRIDOR_WIDTH} m)"),
            ));
        }
    }
    if let Some((width, height)) = door {
        if width < MIN_DOOR_WIDTH {
            findings.push(Finding::warning(
                "dimensions",
                format!("Door width ({width:.2} m) below minimum ({MIN_DOOR_WIDTH} m)"),
            ));
        }
        if height < MIN_DOOR_HEIGHT {
            findings.push(Finding::warning(
                "dimensions",
                format!("Door height ({height:.2} m) below minimum ({MIN_DOOR_HEIGHT} m)"),
            ));
        }
    }
    CheckReport { findings }
}

/// Cabin environment readings. Unmeasured values are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentReadings {
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub co2_mmhg: Option<f64>,
    pub noise_db: Option<f64>,
}

/// Temperature, humidity, CO₂ and noise limits. Sleep zones get the
/// stricter noise ceiling.
pub fn validate_environment(readings: &EnvironmentReadings, zone: ZoneId) -> CheckReport {
    let mut findings = Vec::new();

    if let Some(t) = readings.temperature_c {
        if !(env::TEMP_MIN_C..=env::TEMP_MAX_C).contains(&t) {
            findings.push(Finding::warning(
                "environment",
                format!(
                    "Temperature ({t} °C) outside acceptable range ({}-{} °C)",
                    env::TEMP_MIN_C,
                    env::TEMP_MAX_C
                ),
            ));
        }
    }
    if let Some(h) = readings.humidity_pct {
        if !(env::HUMIDITY_MIN_PCT..=env::HUMIDITY_MAX_PCT).contains(&h) {
            findings.push(Finding::warning(
                "environment",
                format!(
                    "Humidity ({h}%) outside acceptable range ({}-{}%)",
                    env::HUMIDITY_MIN_PCT,
                    env::HUMIDITY_MAX_PCT
                ),
            ));
        }
    }
    if let Some(co2) = readings.co2_mmhg {
        if co2 > env::MAX_CO2_MMHG {
            findings.push(Finding::critical(
                "environment",
                format!(
                    "CO₂ level ({co2} mmHg) exceeds maximum ({} mmHg)",
                    env::MAX_CO2_MMHG
                ),
            ));
        }
    }
    if let Some(noise) = readings.noise_db {
        let max = if zone == ZoneId::Sleep {
            env::MAX_NOISE_SLEEP_DB
        } else {
            env::MAX_NOISE_WORK_DB
        };
        if noise > max {
            findings.push(Finding::warning(
                "environment",
                format!(
                    "Noise level ({noise} dB) exceeds maximum for {} area ({max} dB)",
                    zone.key()
                ),
            ));
        }
    }
    CheckReport { findings }
}

/// Pass or warning for a layout index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warning,
}

/// A percentage index and its verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexCheck {
    /// Percent.
    pub value: f64,
    pub status: CheckStatus,
    pub message: String,
}

/// Space use of an allocation relative to the floor it sits on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEfficiency {
    pub space_efficiency: IndexCheck,
    pub circulation_index: IndexCheck,
    pub usable_area: f64,
    /// Floor not claimed by any zone. Negative when zones overflow the floor.
    pub circulation_area: f64,
}

/// Space efficiency (zones / floor, target ≥ 75%) and circulation index
/// (leftover / floor, target 15–25%). Both are 0 when `floor_area` ≤ 0.
pub fn layout_efficiency(zones: &ZoneAllocation, floor_area: f64) -> LayoutEfficiency {
    let usable_area = zones.total_area();
    let circulation_area = floor_area - usable_area;
    let (efficiency, circulation) = if floor_area > 0.0 {
        (
            usable_area / floor_area * 100.0,
            circulation_area / floor_area * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let efficiency_status = if efficiency >= layout::SPACE_EFFICIENCY_TARGET {
        CheckStatus::Pass
    } else {
        CheckStatus::Warning
    };
    let circulation_status =
        if (layout::CIRCULATION_MIN..=layout::CIRCULATION_MAX).contains(&circulation) {
            CheckStatus::Pass
        } else {
            CheckStatus::Warning
        };

    LayoutEfficiency {
        space_efficiency: IndexCheck {
            value: efficiency,
            status: efficiency_status,
            message: format!(
                "Space efficiency: {efficiency:.1}% (target: >={}%)",
                layout::SPACE_EFFICIENCY_TARGET
            ),
        },
        circulation_index: IndexCheck {
            value: circulation,
            status: circulation_status,
            message: format!(
                "Circulation area: {circulation:.1}% (target: {}-{}%)",
                layout::CIRCULATION_MIN,
                layout::CIRCULATION_MAX
            ),
        },
        usable_area,
        circulation_area,
    }
}

/// Private quarters relative to crew size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivacyCheck {
    /// Percent of crew members with private quarters.
    pub index: f64,
    pub adequate: bool,
    pub message: String,
}

/// Every crew member needs private quarters (index ≥ 100%).
pub fn privacy_check(crew_size: u32, private_zones: u32) -> Result<PrivacyCheck> {
    ensure_crew_size(crew_size)?;
    let index = private_zones as f64 / crew_size as f64 * 100.0;
    let adequate = index >= layout::PRIVACY_TARGET;
    let message = if adequate {
        format!("Privacy adequate: {private_zones} private quarters for {crew_size} crew members")
    } else {
        format!(
            "Privacy insufficient: {private_zones} private quarters for {crew_size} crew members (need {crew_size})"
        )
    };
    Ok(PrivacyCheck {
        index,
        adequate,
        message,
    })
}

/// Translation path classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    #[default]
    Standard,
    Emergency,
    HighTraffic,
}

/// A crew translation path (corridor, hatchway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationPath {
    pub id: String,
    #[serde(default)]
    pub kind: PathKind,
    pub width: f64,
    pub height: f64,
}

/// Emergency egress must clear 0.81 × 1.14 m; high-traffic paths should
/// allow two-way passage (1.14 m wide).
pub fn validate_translation_paths(paths: &[TranslationPath]) -> CheckReport {
    use ergonomics::*;
    let mut findings = Vec::new();
    for p in paths {
        match p.kind {
            PathKind::Emergency => {
                if p.width < EMERGENCY_PATH_WIDTH {
                    findings.push(Finding::critical(
                        "egress",
                        format!(
                            "Emergency path {} too narrow: {} m < {EMERGENCY_PATH_WIDTH} m",
                            p.id, p.width
                        ),
                    ));
                }
                if p.height < EMERGENCY_PATH_HEIGHT {
                    findings.push(Finding::critical(
                        "egress",
                        format!(
                            "Emergency path {} too low: {} m < {EMERGENCY_PATH_HEIGHT} m",
                            p.id, p.height
                        ),
                    ));
                }
            }
            PathKind::HighTraffic => {
                if p.width < MIN_CORRIDOR_WIDTH_HIGH_TRAFFIC {
                    findings.push(Finding::warning(
                        "egress",
                        format!(
                            "High-traffic path {} narrow: {} m < {MIN_CORRIDOR_WIDTH_HIGH_TRAFFIC} m for two-way passage",
                            p.id, p.width
                        ),
                    ));
                }
            }
            PathKind::Standard => {}
        }
    }
    CheckReport { findings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::{allocate_zones, zone_areas_from_keys};

    #[test]
    fn both_metrics_below_minimum() {
        let r = validate_standards(20.0, 8.0, 25.0, 10.0, MissionType::Surface);
        assert!(!r.is_valid);
        assert_eq!(r.issues.len(), 2);
        assert!(!r.meets_nhv_requirement);
        assert!(!r.meets_floor_area_requirement);
    }

    #[test]
    fn both_metrics_met() {
        let r = validate_standards(30.0, 12.0, 25.0, 10.0, MissionType::Surface);
        assert!(r.is_valid);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn exact_minimum_passes() {
        let r = validate_standards(25.0, 10.0, 25.0, 10.0, MissionType::default());
        assert!(r.is_valid);
    }

    #[test]
    fn transit_raises_nhv_floor() {
        let surface = validate_standards(26.0, 12.0, 25.0, 10.0, MissionType::Surface);
        let transit = validate_standards(26.0, 12.0, 25.0, 10.0, MissionType::Transit);
        assert!(surface.is_valid);
        assert!(!transit.is_valid);
        assert_eq!(transit.effective_min_nhv, 27.0);
        assert!(transit.issues[0].contains("transit"));
        // A requirement already above 27 is kept.
        let long = validate_standards(30.0, 12.0, 31.5, 10.0, MissionType::Transit);
        assert_eq!(long.effective_min_nhv, 31.5);
    }

    #[test]
    fn ceiling_is_critical() {
        let r = validate_dimensions(2.0, None, None);
        assert!(!r.passed());
        assert!(r.has_critical());
        let ok = validate_dimensions(2.4, Some(1.0), Some((0.8, 2.0)));
        assert!(ok.passed());
    }

    #[test]
    fn corridor_and_door_are_warnings() {
        let r = validate_dimensions(2.5, Some(0.7), Some((0.6, 1.8)));
        assert_eq!(r.findings.len(), 3);
        assert!(!r.has_critical());
    }

    #[test]
    fn environment_limits() {
        let readings = EnvironmentReadings {
            temperature_c: Some(22.0),
            humidity_pct: Some(45.0),
            co2_mmhg: Some(3.0),
            noise_db: Some(65.0),
        };
        assert!(validate_environment(&readings, ZoneId::Kitchen).passed());
        let sleep = validate_environment(&readings, ZoneId::Sleep);
        assert_eq!(sleep.findings.len(), 1);
        assert!(sleep.findings[0].message.contains("sleep"));

        let bad = EnvironmentReadings {
            temperature_c: Some(30.0),
            humidity_pct: Some(10.0),
            co2_mmhg: Some(6.0),
            noise_db: None,
        };
        let r = validate_environment(&bad, ZoneId::Kitchen);
        assert_eq!(r.findings.len(), 3);
        assert!(r.has_critical());
    }

    #[test]
    fn unmeasured_readings_pass() {
        assert!(validate_environment(&EnvironmentReadings::default(), ZoneId::Sleep).passed());
    }

    #[test]
    fn efficiency_and_circulation() {
        let targets = zone_areas_from_keys([("sleep", 5.0), ("work_leisure", 15.0)]).unwrap();
        let zones = allocate_zones(100.0, 4, &targets).unwrap(); // 80 m²
        let e = layout_efficiency(&zones, 100.0);
        assert!((e.space_efficiency.value - 80.0).abs() < 1e-9);
        assert_eq!(e.space_efficiency.status, CheckStatus::Pass);
        assert!((e.circulation_index.value - 20.0).abs() < 1e-9);
        assert_eq!(e.circulation_index.status, CheckStatus::Pass);

        let cramped = layout_efficiency(&zones, 70.0);
        assert!(cramped.circulation_area < 0.0);
        assert_eq!(cramped.circulation_index.status, CheckStatus::Warning);
    }

    #[test]
    fn efficiency_with_no_floor() {
        let e = layout_efficiency(&ZoneAllocation::default(), 0.0);
        assert_eq!(e.space_efficiency.value, 0.0);
        assert_eq!(e.space_efficiency.status, CheckStatus::Warning);
    }

    #[test]
    fn privacy() {
        let ok = privacy_check(4, 4).unwrap();
        assert_eq!(ok.index, 100.0);
        assert!(ok.adequate);
        let short = privacy_check(4, 3).unwrap();
        assert!(!short.adequate);
        assert!(short.message.contains("need 4"));
        assert!(privacy_check(0, 1).is_err());
    }

    #[test]
    fn translation_paths() {
        let paths = vec![
            TranslationPath {
                id: "egress-1".into(),
                kind: PathKind::Emergency,
                width: 0.7,
                height: 1.0,
            },
            TranslationPath {
                id: "main".into(),
                kind: PathKind::HighTraffic,
                width: 1.0,
                height: 2.0,
            },
            TranslationPath {
                id: "aft".into(),
                kind: PathKind::Standard,
                width: 0.5,
                height: 1.0,
            },
        ];
        let r = validate_translation_paths(&paths);
        assert_eq!(r.findings.len(), 3);
        assert_eq!(
            r.findings.iter().filter(|f| f.severity == Severity::Critical).count(),
            2
        );
    }
}

//! HabShip Headless Evaluation Harness
//!
//! Loads a habitat configuration, runs it through the full metrics pipeline
//! and sweeps the reference tables for internal consistency. Runs entirely
//! in-process with no UI or rendering.
//!
//! Usage:
//!   cargo run -p habship-simtest
//!   cargo run -p habship-simtest -- --verbose
//!   cargo run -p habship-simtest -- --config my_habitat.json --export out.json
//!
//! Log output is controlled with `RUST_LOG` (default `warn`).

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use habship_logic::adjacency::{
    adjacency_score, incompatible_zones_present, isolation_requirement,
    validate_zone_compatibility, AdjacencyOracle, DeclaredAdjacency, PositionedAdjacency,
    UnsupportedAdjacency,
};
use habship_logic::compliance::{
    layout_efficiency, privacy_check, validate_dimensions, validate_environment,
    validate_standards, validate_translation_paths, CheckStatus, EnvironmentReadings, MissionType,
    PathKind, TranslationPath,
};
use habship_logic::constants::{ergonomics, standards};
use habship_logic::export::{export_file_name, ExportSnapshot};
use habship_logic::geometry::{cylinder_floor_area, cylinder_volume, launch_vehicle_fit};
use habship_logic::gravity::{gravity_adjusted_metrics, GravityEnvironment, PrimaryMetric};
use habship_logic::nhv::{reference_table, required_nhv_per_person};
use habship_logic::recommendations::layout_recommendations;
use habship_logic::resources::{daily_resources, storage_volume};
use habship_logic::zones::{allocate_zones, ZoneId};
use habship_logic::{HabitatConfig, HabitatError, HabitatReport};

// ── Default configuration (same JSON the web front end ships) ───────────
const DEFAULT_CONFIG_JSON: &str = include_str!("../../../data/default_habitat.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    verbose: bool,
    config: Option<PathBuf>,
    export: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--config" => {
                args.config = Some(it.next().context("--config needs a path")?.into());
            }
            "--export" => {
                args.export = Some(it.next().context("--export needs a path")?.into());
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<HabitatConfig> {
    let json = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read config {}", p.display()))?,
        None => DEFAULT_CONFIG_JSON.to_string(),
    };
    HabitatConfig::from_json(&json).context("failed to parse habitat config")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = parse_args()?;
    let verbose = args.verbose;
    println!("=== HabShip Evaluation Harness ===\n");

    let config = load_config(args.config.as_ref())?;
    let mut results = Vec::new();

    // 1. Configuration and full pipeline
    let (config_results, report) = validate_configuration(&config, verbose);
    results.extend(config_results);

    // 2. Geometry formulas
    results.extend(validate_geometry(verbose));

    // 3. NHV requirement curve
    results.extend(validate_nhv_curve(verbose));

    // 4. Life-support resources
    results.extend(validate_resources(verbose));

    // 5. Gravity weighting
    results.extend(validate_gravity(verbose));

    // 6. Zone allocation
    results.extend(validate_zones(verbose));

    // 7. Compliance checks
    results.extend(validate_compliance(verbose));

    // 8. Adjacency rules
    results.extend(validate_adjacency(verbose));

    // 9. Sizing recommendations
    results.extend(validate_recommendations(&config, verbose));

    // 10. Export snapshot
    if let Some(report) = &report {
        results.extend(validate_export(report, args.export.as_ref(), verbose)?);
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(
    config: &HabitatConfig,
    verbose: bool,
) -> (Vec<TestResult>, Option<HabitatReport>) {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let errors = config.validate();
    results.push(TestResult::new(
        "config_valid",
        errors.is_empty(),
        if errors.is_empty() {
            format!(
                "{} crew, {} days, {}",
                config.crew_size,
                config.mission_duration_days,
                config.gravity_environment.key()
            )
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    ));

    let report = match config.evaluate() {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult::new(
                "pipeline_evaluates",
                false,
                format!("evaluation failed: {e}"),
            ));
            return (results, None);
        }
    };
    results.push(TestResult::new(
        "pipeline_evaluates",
        true,
        format!(
            "{:.1} m³ total, {:.1} m² floor",
            report.metrics.total_volume, report.metrics.floor_area
        ),
    ));

    let again = config.evaluate().ok();
    results.push(TestResult::new(
        "pipeline_deterministic",
        again.as_ref() == Some(&report),
        "second evaluation matches the first",
    ));

    let m = &report.metrics;
    results.push(TestResult::new(
        "metrics_per_person_consistent",
        (m.nhv_per_person * config.crew_size as f64 - m.net_habitable_volume).abs() < 1e-9
            && m.net_habitable_volume <= m.total_volume,
        format!("{:.2} m³/person", m.nhv_per_person),
    ));

    // Compliance shortfalls are reported, not treated as harness failures.
    println!(
        "  Compliance: {} (NHV {:.1} vs {:.1} m³/person, floor {:.1} m²/person)",
        if report.compliance.is_valid {
            "PASS"
        } else {
            "FAIL"
        },
        m.nhv_per_person,
        report.compliance.effective_min_nhv,
        m.floor_area_per_person
    );
    for issue in &report.compliance.issues {
        println!("    ! {issue}");
    }
    if verbose {
        for note in &report.advisories {
            println!("    - {note}");
        }
        println!(
            "  Shell mass: {:.0} kg ({:?})",
            report.shell_mass_kg, config.structure_type
        );
        println!(
            "  Launch fit: SLS {}, Starship {}",
            report.launch_fit.sls, report.launch_fit.starship
        );
    }

    (results, Some(report))
}

// ── 2. Geometry ─────────────────────────────────────────────────────────

fn validate_geometry(verbose: bool) -> Vec<TestResult> {
    println!("--- Geometry ---");
    let mut results = Vec::new();

    let v = cylinder_volume(6.0, 10.0).unwrap_or(f64::NAN);
    results.push(TestResult::new(
        "geometry_cylinder_volume",
        (v - 282.743).abs() < 1e-3,
        format!("6 m × 10 m cylinder → {v:.3} m³"),
    ));

    let a1 = cylinder_floor_area(6.0, 3.0).unwrap_or(f64::NAN);
    let a2 = cylinder_floor_area(6.0, 30.0).unwrap_or(f64::NAN);
    results.push(TestResult::new(
        "geometry_floor_independent_of_height",
        a1 == a2,
        format!("{a1:.2} m² at 3 m and 30 m"),
    ));

    let bad = cylinder_volume(-1.0, 10.0);
    results.push(TestResult::new(
        "geometry_rejects_negative",
        matches!(bad, Err(HabitatError::InvalidDimension { .. })),
        "negative diameter rejected",
    ));

    let fits = [
        (8.0, 10.0, true, true),
        (9.0, 10.0, false, true),
        (10.0, 10.0, false, false),
        (6.0, 20.0, true, false),
    ];
    let mut all_fit = true;
    for (d, h, sls, starship) in fits {
        match launch_vehicle_fit(d, h) {
            Ok(f) if f.sls == sls && f.starship == starship => {}
            other => {
                all_fit = false;
                if verbose {
                    println!("    {d} m × {h} m → {other:?}");
                }
            }
        }
    }
    results.push(TestResult::new(
        "geometry_launch_fit",
        all_fit,
        "SLS 8.4 × 27.4 m / Starship 9 × 17.24 m envelopes",
    ));

    results
}

// ── 3. NHV curve ────────────────────────────────────────────────────────

fn validate_nhv_curve(verbose: bool) -> Vec<TestResult> {
    println!("--- NHV Requirement ---");
    let mut results = Vec::new();

    let table = reference_table();
    if verbose {
        for (days, nhv) in &table {
            println!("    {days:>4} days → {nhv:.2} m³/person");
        }
    }
    results.push(TestResult::new(
        "nhv_table_increasing",
        table.windows(2).all(|w| w[1].1 > w[0].1),
        format!("{} reference durations", table.len()),
    ));

    let one_day = required_nhv_per_person(1).unwrap_or(f64::NAN);
    results.push(TestResult::new(
        "nhv_short_mission_unclamped",
        (one_day + 7.79).abs() < 1e-12,
        format!("1 day → {one_day:.2} m³/person"),
    ));

    results.push(TestResult::new(
        "nhv_zero_duration_rejected",
        matches!(required_nhv_per_person(0), Err(HabitatError::InvalidDuration(0))),
        "0 days rejected",
    ));

    results
}

// ── 4. Resources ────────────────────────────────────────────────────────

fn validate_resources(verbose: bool) -> Vec<TestResult> {
    println!("--- Life Support ---");
    let mut results = Vec::new();

    match daily_resources(4) {
        Ok(d) => {
            if verbose {
                println!(
                    "    crew 4/day: water {:.1} kg, O₂ {:.2} kg, CO₂ {:.2} kg, food {:.2} kg",
                    d.total_water_kg(),
                    d.oxygen_kg,
                    d.co2_produced_kg,
                    d.food_kg
                );
            }
            results.push(TestResult::new(
                "resources_daily_crew4",
                (d.total_water_kg() - 10.0).abs() < 1e-9
                    && (d.oxygen_kg - 3.28).abs() < 1e-9
                    && (d.co2_produced_kg - 4.16).abs() < 1e-9
                    && (d.food_kg - 2.48).abs() < 1e-9,
                "10 kg water, 3.28 kg O₂, 4.16 kg CO₂, 2.48 kg food",
            ));
        }
        Err(e) => results.push(TestResult::new("resources_daily_crew4", false, e.to_string())),
    }

    match storage_volume(4, 180, 0.2) {
        Ok(s) => {
            let sum = s.water_m3 + s.food_m3 + s.equipment_m3;
            results.push(TestResult::new(
                "resources_storage_total",
                (sum - s.total_m3).abs() < 1e-9 && s.total_m3 > 0.0,
                format!("{:.2} m³ in {} locations", s.total_m3, s.distributed_locations.len()),
            ));
        }
        Err(e) => results.push(TestResult::new("resources_storage_total", false, e.to_string())),
    }

    results.push(TestResult::new(
        "resources_zero_crew_rejected",
        daily_resources(0).is_err(),
        "crew 0 rejected",
    ));

    results
}

// ── 5. Gravity ──────────────────────────────────────────────────────────

fn validate_gravity(verbose: bool) -> Vec<TestResult> {
    println!("--- Gravity ---");
    let mut results = Vec::new();

    let mut weights_sum = true;
    for env in GravityEnvironment::all() {
        let p = env.profile();
        if (p.area_weight + p.volume_weight - 1.0).abs() > 1e-12 {
            weights_sum = false;
        }
        if verbose {
            println!(
                "    {:<13} {:>5}  area {:.1} / volume {:.1}",
                env.key(),
                p.code,
                p.area_weight,
                p.volume_weight
            );
        }
    }
    results.push(TestResult::new(
        "gravity_weights_sum_to_one",
        weights_sum,
        format!("{} environments", GravityEnvironment::all().len()),
    ));

    let micro = gravity_adjusted_metrics(100.0, 40.0, GravityEnvironment::Microgravity);
    let mars = gravity_adjusted_metrics(100.0, 40.0, GravityEnvironment::Mars);
    results.push(TestResult::new(
        "gravity_primary_metric",
        micro.primary_metric == PrimaryMetric::Volume
            && mars.primary_metric == PrimaryMetric::Area
            && micro.restraints_required
            && !mars.restraints_required,
        format!(
            "score 0g {:.1}, Mars {:.1}",
            micro.habitability_score, mars.habitability_score
        ),
    ));

    results
}

// ── 6. Zones ────────────────────────────────────────────────────────────

fn validate_zones(verbose: bool) -> Vec<TestResult> {
    println!("--- Zones ---");
    let mut results = Vec::new();

    let targets = habship_logic::zones::default_zone_areas();
    let small = allocate_zones(10.0, 4, &targets);
    let large = allocate_zones(1000.0, 4, &targets);
    match (small, large) {
        (Ok(s), Ok(l)) => {
            if verbose {
                for (zone, area) in s.iter() {
                    println!("    {:<24} {area:>6.1} m²", zone.info().name);
                }
            }
            results.push(TestResult::new(
                "zones_no_rescale",
                s == l && (s.total_area() - 78.0).abs() < 1e-9,
                format!("{:.1} m² regardless of floor", s.total_area()),
            ));
        }
        (s, l) => results.push(TestResult::new(
            "zones_no_rescale",
            false,
            format!("{:?} / {:?}", s.err(), l.err()),
        )),
    }

    let keys_ok = ZoneId::all()
        .iter()
        .all(|z| ZoneId::from_key(z.key()).ok() == Some(*z));
    results.push(TestResult::new(
        "zones_keys_round_trip",
        keys_ok,
        format!("{} zones", ZoneId::all().len()),
    ));

    results
}

// ── 7. Compliance ───────────────────────────────────────────────────────

fn validate_compliance(verbose: bool) -> Vec<TestResult> {
    println!("--- Compliance ---");
    let mut results = Vec::new();

    let ok = validate_standards(30.0, 12.0, 26.85, 10.0, MissionType::Surface);
    let short = validate_standards(20.0, 8.0, 26.85, 10.0, MissionType::Surface);
    results.push(TestResult::new(
        "compliance_standards",
        ok.is_valid && !short.is_valid && short.issues.len() == 2,
        format!("{} issues for an undersized habitat", short.issues.len()),
    ));

    let transit = validate_standards(26.0, 12.0, 14.9, 10.0, MissionType::Transit);
    results.push(TestResult::new(
        "compliance_transit_floor",
        transit.effective_min_nhv == standards::MIN_NHV_PER_PERSON_TRANSIT
            && !transit.meets_nhv_requirement,
        format!("effective minimum {:.1} m³", transit.effective_min_nhv),
    ));

    let dims = validate_dimensions(
        1.9,
        Some(ergonomics::MIN_CORRIDOR_WIDTH),
        Some((0.8, 2.0)),
    );
    results.push(TestResult::new(
        "compliance_low_ceiling",
        dims.has_critical() && dims.findings.len() == 1,
        dims.messages().join("; "),
    ));

    let readings = EnvironmentReadings {
        temperature_c: Some(22.0),
        humidity_pct: Some(45.0),
        co2_mmhg: Some(3.0),
        noise_db: Some(65.0),
    };
    let sleep = validate_environment(&readings, ZoneId::Sleep);
    let work = validate_environment(&readings, ZoneId::WorkLeisure);
    results.push(TestResult::new(
        "compliance_sleep_noise",
        !sleep.passed() && work.passed(),
        "65 dB fails sleep, passes work",
    ));

    let paths = [
        TranslationPath {
            id: "egress-1".into(),
            kind: PathKind::Emergency,
            width: 0.9,
            height: 1.2,
        },
        TranslationPath {
            id: "galley".into(),
            kind: PathKind::HighTraffic,
            width: 1.0,
            height: 2.0,
        },
    ];
    let path_report = validate_translation_paths(&paths);
    if verbose {
        for msg in path_report.messages() {
            println!("    {msg}");
        }
    }
    results.push(TestResult::new(
        "compliance_translation_paths",
        !path_report.passed() && !path_report.has_critical(),
        format!("{} findings", path_report.findings.len()),
    ));

    let targets = habship_logic::zones::default_zone_areas();
    match allocate_zones(96.0, 4, &targets) {
        Ok(alloc) => {
            let eff = layout_efficiency(&alloc, 96.0);
            results.push(TestResult::new(
                "compliance_layout_efficiency",
                eff.space_efficiency.status == CheckStatus::Pass
                    && eff.circulation_index.status == CheckStatus::Pass,
                format!(
                    "{} / {}",
                    eff.space_efficiency.message, eff.circulation_index.message
                ),
            ));
        }
        Err(e) => results.push(TestResult::new(
            "compliance_layout_efficiency",
            false,
            e.to_string(),
        )),
    }

    let privacy = privacy_check(4, 3).map(|p| p.adequate);
    results.push(TestResult::new(
        "compliance_privacy",
        privacy.ok() == Some(false) && privacy_check(4, 4).map(|p| p.adequate).unwrap_or(false),
        "3 quarters for 4 crew is insufficient",
    ));

    results
}

// ── 8. Adjacency ────────────────────────────────────────────────────────

fn validate_adjacency(verbose: bool) -> Vec<TestResult> {
    println!("--- Adjacency ---");
    let mut results = Vec::new();

    let zones = ZoneId::all().to_vec();
    results.push(TestResult::new(
        "adjacency_requires_plan",
        matches!(
            validate_zone_compatibility(&zones, &UnsupportedAdjacency),
            Err(HabitatError::NotSupported(_))
        ),
        "no floor plan → not supported",
    ));

    let plan = DeclaredAdjacency::new([
        (ZoneId::Exercise, ZoneId::Sleep),
        (ZoneId::Hygiene, ZoneId::Sleep),
    ]);
    match validate_zone_compatibility(&zones, &plan) {
        Ok(conflicts) => {
            if verbose {
                for c in &conflicts {
                    println!("    {} ↔ {}: {}", c.a.key(), c.b.key(), c.reason);
                }
            }
            results.push(TestResult::new(
                "adjacency_conflict_detected",
                conflicts.len() == 1,
                format!("{} conflicts in declared plan", conflicts.len()),
            ));
        }
        Err(e) => results.push(TestResult::new(
            "adjacency_conflict_detected",
            false,
            e.to_string(),
        )),
    }

    let score = adjacency_score(&zones, &plan).unwrap_or(f64::NAN);
    results.push(TestResult::new(
        "adjacency_score_range",
        (0.0..=100.0).contains(&score),
        format!("score {score:.1}"),
    ));

    let placed = PositionedAdjacency::with_default_threshold([
        (ZoneId::Sleep, (0.0, 0.0)),
        (ZoneId::Hygiene, (1.0, 0.0)),
        (ZoneId::Exercise, (0.0, 1.5)),
    ]);
    let touching = placed.are_adjacent(ZoneId::Sleep, ZoneId::Hygiene).unwrap_or(false);
    let apart = !placed.are_adjacent(ZoneId::Sleep, ZoneId::Exercise).unwrap_or(true);
    let unplaced = !placed.are_adjacent(ZoneId::Sleep, ZoneId::Kitchen).unwrap_or(true);
    results.push(TestResult::new(
        "adjacency_positioned_threshold",
        touching && apart && unplaced,
        "centres ≤ 1.0 m apart touch; unplaced zones never do",
    ));

    results.push(TestResult::new(
        "adjacency_presence_warnings",
        incompatible_zones_present(&zones).len() == 3
            && isolation_requirement(ZoneId::Sleep).is_some(),
        "3 incompatible pairs among all zones",
    ));

    results
}

// ── 9. Recommendations ──────────────────────────────────────────────────

fn validate_recommendations(config: &HabitatConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Recommendations ---");
    let mut results = Vec::new();

    match layout_recommendations(
        config.crew_size,
        config.mission_duration_days,
        config.gravity_environment,
        config.structure_type,
    ) {
        Ok(r) => {
            let v = r.volume_requirements;
            if verbose {
                println!(
                    "    NHV {:.1} m³ + storage {:.1} m³ = {:.1} m³",
                    v.total_nhv_m3, v.storage_m3, v.total_required_m3
                );
            }
            results.push(TestResult::new(
                "recommendations_volume_budget",
                (v.total_required_m3 - v.total_nhv_m3 - v.storage_m3).abs() < 1e-9,
                format!("{:.1} m³ required", v.total_required_m3),
            ));
            results.push(TestResult::new(
                "recommendations_emergency_path",
                r.critical_paths.emergency_width_m == ergonomics::EMERGENCY_PATH_WIDTH,
                format!(
                    "{} × {} m",
                    r.critical_paths.emergency_width_m, r.critical_paths.emergency_height_m
                ),
            ));
        }
        Err(e) => results.push(TestResult::new(
            "recommendations_volume_budget",
            false,
            e.to_string(),
        )),
    }

    results
}

// ── 10. Export ──────────────────────────────────────────────────────────

fn validate_export(
    report: &HabitatReport,
    path: Option<&PathBuf>,
    verbose: bool,
) -> anyhow::Result<Vec<TestResult>> {
    println!("--- Export ---");
    let mut results = Vec::new();

    let created_at = Utc::now();
    let snapshot = ExportSnapshot::from_report(report, created_at);
    let json = snapshot.to_json_pretty().context("failed to serialize export")?;
    let parsed = ExportSnapshot::from_json(&json).context("failed to re-read export")?;
    results.push(TestResult::new(
        "export_round_trip",
        parsed == snapshot,
        format!("{} bytes", json.len()),
    ));

    if let Some(path) = path {
        std::fs::write(path, &json)
            .with_context(|| format!("failed to write export {}", path.display()))?;
        log::info!("wrote export snapshot to {}", path.display());
        if verbose {
            println!(
                "    wrote {} (suggested name {})",
                path.display(),
                export_file_name(created_at)
            );
        }
    }

    Ok(results)
}

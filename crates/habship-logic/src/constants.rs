//! NASA reference constants: volume, area, life support, ergonomics.
//!
//! Plain `const` values grouped by concern. Sources are the NASA Human
//! Integration Design Handbook (HIDH), NASA-STD-3001 Vol. 2, "Defining the
//! Net Habitable Volume for Long Duration Exploration Missions" and the Deep
//! Space Habitability Design Guidelines.

/// Minimum volume and area standards.
pub mod standards {
    /// NHV per person for transit habitats (m³). Higher due to confinement stress.
    pub const MIN_NHV_PER_PERSON_TRANSIT: f64 = 27.0;
    /// Floor area per person (m²).
    pub const MIN_FLOOR_AREA_PER_PERSON: f64 = 10.0;
}

/// Life support consumption and production, per person per day.
pub mod life_support {
    /// Drinking water (kg).
    pub const WATER_POTABLE_KG: f64 = 2.0;
    /// Food rehydration water (kg).
    pub const WATER_FOOD_PREP_KG: f64 = 0.5;
    /// Metabolic oxygen consumption (kg).
    pub const OXYGEN_KG: f64 = 0.82;
    /// Metabolic CO₂ production (kg).
    pub const CO2_KG: f64 = 1.04;
    /// Dry food (kg).
    pub const FOOD_KG: f64 = 0.62;
    /// Biomass production chamber crop area per person (m²).
    pub const BPC_AREA_PER_PERSON_M2: f64 = 22.5;
}

/// Storage sizing assumptions.
pub mod storage {
    /// Water density (kg/m³).
    pub const WATER_DENSITY_KG_M3: f64 = 1000.0;
    /// Packaged dehydrated food density (kg/m³).
    pub const FOOD_DENSITY_KG_M3: f64 = 200.0;
    /// Personal equipment and supplies (m³ per person).
    pub const EQUIPMENT_M3_PER_PERSON: f64 = 2.0;
    /// Default safety margin on every storage category.
    pub const DEFAULT_MARGIN: f64 = 0.2;
}

/// Geometry conventions.
pub mod geometry {
    /// Fraction of a cylinder's cross-section counted as usable floor.
    pub const CYLINDER_FLOOR_DERATING: f64 = 0.8;
    /// SLS payload fairing diameter (m).
    pub const SLS_MAX_DIAMETER: f64 = 8.4;
    /// SLS payload bay height (m).
    pub const SLS_MAX_HEIGHT: f64 = 27.4;
    /// Starship payload bay diameter (m).
    pub const STARSHIP_MAX_DIAMETER: f64 = 9.0;
    /// Starship payload bay height (m).
    pub const STARSHIP_MAX_HEIGHT: f64 = 17.24;
}

/// Ergonomic clearances (HIDH).
pub mod ergonomics {
    pub const MIN_CEILING_HEIGHT: f64 = 2.1;
    pub const MIN_CORRIDOR_WIDTH: f64 = 0.8;
    pub const MIN_CORRIDOR_WIDTH_HIGH_TRAFFIC: f64 = 1.14;
    pub const MIN_DOOR_WIDTH: f64 = 0.7;
    pub const MIN_DOOR_HEIGHT: f64 = 1.9;
    /// Unobstructed emergency egress path.
    pub const EMERGENCY_PATH_WIDTH: f64 = 0.81;
    pub const EMERGENCY_PATH_HEIGHT: f64 = 1.14;
}

/// Environmental limits.
pub mod environment {
    pub const TEMP_MIN_C: f64 = 18.0;
    pub const TEMP_MAX_C: f64 = 27.0;
    pub const HUMIDITY_MIN_PCT: f64 = 30.0;
    pub const HUMIDITY_MAX_PCT: f64 = 70.0;
    /// CO₂ partial pressure ceiling (mmHg, 0.7 kPa).
    pub const MAX_CO2_MMHG: f64 = 5.3;
    pub const MAX_NOISE_SLEEP_DB: f64 = 60.0;
    pub const MAX_NOISE_WORK_DB: f64 = 70.0;
}

/// Layout quality targets.
pub mod layout {
    /// Usable zone area as share of floor (%).
    pub const SPACE_EFFICIENCY_TARGET: f64 = 75.0;
    /// Circulation share of floor (%), inclusive range.
    pub const CIRCULATION_MIN: f64 = 15.0;
    pub const CIRCULATION_MAX: f64 = 25.0;
    /// Private quarters per crew member (%).
    pub const PRIVACY_TARGET: f64 = 100.0;
}

/// Weight applied to floor area when folding it into the habitability score.
pub const AREA_TO_VOLUME_FACTOR: f64 = 2.5;

//! Life-support resource loads: water, oxygen, CO₂, food, crop area.
//!
//! Calculates the consumables a crew needs per day and over a mission from
//! fixed per-person rates (NASA-STD-3001 / HIDH), plus the storage volume
//! required to carry them with a safety margin.

use serde::{Deserialize, Serialize};

use crate::constants::{life_support, storage};
use crate::error::{ensure_crew_size, ensure_duration, HabitatError, Result};

/// One set of consumable quantities (kg).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLoad {
    pub water_potable_kg: f64,
    pub water_food_prep_kg: f64,
    pub oxygen_kg: f64,
    /// Produced rather than consumed; must be scrubbed.
    pub co2_produced_kg: f64,
    pub food_kg: f64,
}

impl ResourceLoad {
    fn per_person_day() -> Self {
        Self {
            water_potable_kg: life_support::WATER_POTABLE_KG,
            water_food_prep_kg: life_support::WATER_FOOD_PREP_KG,
            oxygen_kg: life_support::OXYGEN_KG,
            co2_produced_kg: life_support::CO2_KG,
            food_kg: life_support::FOOD_KG,
        }
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            water_potable_kg: self.water_potable_kg * factor,
            water_food_prep_kg: self.water_food_prep_kg * factor,
            oxygen_kg: self.oxygen_kg * factor,
            co2_produced_kg: self.co2_produced_kg * factor,
            food_kg: self.food_kg * factor,
        }
    }

    /// Potable plus food-prep water (kg).
    pub fn total_water_kg(&self) -> f64 {
        self.water_potable_kg + self.water_food_prep_kg
    }
}

/// Biomass production chamber sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpcRequirement {
    pub area_m2: f64,
    pub area_per_person_m2: f64,
}

/// Daily and whole-mission consumables for a crew.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionResources {
    pub daily: ResourceLoad,
    pub total_mission: ResourceLoad,
    pub bpc: BpcRequirement,
}

/// Storage volume per category (m³), margin included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageVolume {
    pub water_m3: f64,
    pub food_m3: f64,
    pub equipment_m3: f64,
    pub total_m3: f64,
    /// Where each category should be stowed.
    pub distributed_locations: Vec<&'static str>,
}

/// Daily consumables for the whole crew.
pub fn daily_resources(crew_size: u32) -> Result<ResourceLoad> {
    ensure_crew_size(crew_size)?;
    Ok(ResourceLoad::per_person_day().scaled(crew_size as f64))
}

/// Consumables for the whole crew over the whole mission.
pub fn total_mission_resources(crew_size: u32, duration_days: u32) -> Result<ResourceLoad> {
    ensure_duration(duration_days)?;
    Ok(daily_resources(crew_size)?.scaled(duration_days as f64))
}

/// Crop area needed to offset the crew's oxygen consumption (m²).
pub fn bpc_area(crew_size: u32) -> Result<f64> {
    ensure_crew_size(crew_size)?;
    Ok(life_support::BPC_AREA_PER_PERSON_M2 * crew_size as f64)
}

pub fn mission_resources(crew_size: u32, duration_days: u32) -> Result<MissionResources> {
    Ok(MissionResources {
        daily: daily_resources(crew_size)?,
        total_mission: total_mission_resources(crew_size, duration_days)?,
        bpc: BpcRequirement {
            area_m2: bpc_area(crew_size)?,
            area_per_person_m2: life_support::BPC_AREA_PER_PERSON_M2,
        },
    })
}

/// Mission water in litres (1 kg of water = 1 L).
pub fn total_water_liters(crew_size: u32, duration_days: u32) -> Result<f64> {
    Ok(total_mission_resources(crew_size, duration_days)?.total_water_kg())
}

/// Storage volume for a mission's consumables and personal equipment.
///
/// `margin` is a fraction (0.2 = 20% extra on every category).
pub fn storage_volume(crew_size: u32, duration_days: u32, margin: f64) -> Result<StorageVolume> {
    if !(margin >= 0.0 && margin.is_finite()) {
        return Err(HabitatError::InvalidDimension {
            field: "storage_margin",
            value: margin,
        });
    }
    let total = total_mission_resources(crew_size, duration_days)?;
    let factor = 1.0 + margin;

    let water_m3 = total.total_water_kg() / storage::WATER_DENSITY_KG_M3 * factor;
    let food_m3 = total.food_kg / storage::FOOD_DENSITY_KG_M3 * factor;
    let equipment_m3 = crew_size as f64 * storage::EQUIPMENT_M3_PER_PERSON * factor;

    Ok(StorageVolume {
        water_m3,
        food_m3,
        equipment_m3,
        total_m3: water_m3 + food_m3 + equipment_m3,
        distributed_locations: vec![
            "Near the galley (food stores)",
            "Near hygiene (water)",
            "Distributed across crew quarters (personal equipment)",
        ],
    })
}

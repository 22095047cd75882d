//! Habitat geometry: volume, usable floor area, net habitable volume.
//!
//! Two shell shapes are supported: a vertical cylinder (diameter × height)
//! and a rectangular box (length × width × height). All lengths are metres.
//!
//! ```
//! use habship_logic::geometry::{compute_metrics, Dimensions, HabitatShape};
//!
//! let dims = Dimensions::cylinder(6.0, 10.0);
//! let m = compute_metrics(HabitatShape::Cylinder, &dims, 0.75, 4).unwrap();
//! assert!((m.total_volume - 282.743).abs() < 0.001);
//! assert!((m.floor_area - 22.619).abs() < 0.001);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::geometry::*;
use crate::error::{ensure_crew_size, HabitatError, Result};

/// Shell shape of the pressurized volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitatShape {
    #[serde(alias = "Cylinder")]
    Cylinder,
    #[serde(alias = "Rectangular")]
    Rectangular,
}

impl HabitatShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cylinder => "Cylinder",
            Self::Rectangular => "Rectangular",
        }
    }

    /// Parse a UI key (case-insensitive; "box" is accepted for rectangular).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "cylinder" => Some(Self::Cylinder),
            "rectangular" | "box" => Some(Self::Rectangular),
            _ => None,
        }
    }
}

/// One dimension of a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DimField {
    Diameter,
    Height,
    Length,
    Width,
}

impl DimField {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Diameter => "diameter",
            Self::Height => "height",
            Self::Length => "length",
            Self::Width => "width",
        }
    }
}

impl HabitatShape {
    /// Dimensions this shape reads, in validation order.
    pub(crate) fn required_fields(&self) -> &'static [DimField] {
        match self {
            Self::Cylinder => &[DimField::Diameter, DimField::Height],
            Self::Rectangular => &[DimField::Length, DimField::Width, DimField::Height],
        }
    }
}

/// Shell dimensions in metres. Only the fields of the selected shape are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub diameter: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
}

impl Dimensions {
    pub fn cylinder(diameter: f64, height: f64) -> Self {
        Self {
            diameter: Some(diameter),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn rectangular(length: f64, width: f64, height: f64) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub(crate) fn get(&self, field: DimField) -> Option<f64> {
        match field {
            DimField::Diameter => self.diameter,
            DimField::Height => self.height,
            DimField::Length => self.length,
            DimField::Width => self.width,
        }
    }

    fn field(&self, shape: HabitatShape, field: DimField) -> Result<f64> {
        self.get(field).ok_or(HabitatError::MissingDimension {
            shape: shape.name(),
            field: field.name(),
        })
    }

    /// Total pressurized volume for `shape` (m³).
    pub fn volume(&self, shape: HabitatShape) -> Result<f64> {
        match shape {
            HabitatShape::Cylinder => cylinder_volume(
                self.field(shape, DimField::Diameter)?,
                self.field(shape, DimField::Height)?,
            ),
            HabitatShape::Rectangular => box_volume(
                self.field(shape, DimField::Length)?,
                self.field(shape, DimField::Width)?,
                self.field(shape, DimField::Height)?,
            ),
        }
    }

    /// Usable floor area for `shape` (m²).
    pub fn floor_area(&self, shape: HabitatShape) -> Result<f64> {
        match shape {
            HabitatShape::Cylinder => cylinder_floor_area(
                self.field(shape, DimField::Diameter)?,
                self.field(shape, DimField::Height)?,
            ),
            HabitatShape::Rectangular => box_floor_area(
                self.field(shape, DimField::Length)?,
                self.field(shape, DimField::Width)?,
            ),
        }
    }

    /// Widest horizontal extent, which has to fit inside a launch fairing.
    pub fn envelope_diameter(&self, shape: HabitatShape) -> Result<f64> {
        match shape {
            HabitatShape::Cylinder => self.field(shape, DimField::Diameter),
            HabitatShape::Rectangular => {
                let l = self.field(shape, DimField::Length)?;
                let w = self.field(shape, DimField::Width)?;
                Ok((l * l + w * w).sqrt())
            }
        }
    }

    /// Launch fit of the shell standing upright in a payload bay.
    pub fn launch_fit(&self, shape: HabitatShape) -> Result<LaunchVehicleFit> {
        launch_vehicle_fit(
            self.envelope_diameter(shape)?,
            self.field(shape, DimField::Height)?,
        )
    }
}

/// Derived habitat metrics. Recomputed from inputs on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitatMetrics {
    /// Total pressurized volume (m³).
    pub total_volume: f64,
    /// Usable floor area (m²).
    pub floor_area: f64,
    /// Net habitable volume (m³).
    pub net_habitable_volume: f64,
    pub nhv_per_person: f64,
    pub floor_area_per_person: f64,
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(HabitatError::InvalidDimension { field, value })
    }
}

/// Volume of a cylinder: π (d/2)² h.
pub fn cylinder_volume(diameter: f64, height: f64) -> Result<f64> {
    let radius = ensure_positive("diameter", diameter)? / 2.0;
    let height = ensure_positive("height", height)?;
    Ok(PI * radius * radius * height)
}

/// Usable floor of a cylinder: 80% of the cross-section disk.
///
/// Height is validated but does not enter the formula.
pub fn cylinder_floor_area(diameter: f64, height: f64) -> Result<f64> {
    let radius = ensure_positive("diameter", diameter)? / 2.0;
    ensure_positive("height", height)?;
    Ok(CYLINDER_FLOOR_DERATING * PI * radius * radius)
}

pub fn box_volume(length: f64, width: f64, height: f64) -> Result<f64> {
    Ok(ensure_positive("length", length)?
        * ensure_positive("width", width)?
        * ensure_positive("height", height)?)
}

pub fn box_floor_area(length: f64, width: f64) -> Result<f64> {
    Ok(ensure_positive("length", length)? * ensure_positive("width", width)?)
}

/// NHV = total volume × usable factor.
///
/// The bare formula accepts a factor in [0, 1]; configurations are held to
/// (0, 1] by [`crate::habitat_config::HabitatConfig::validate`].
pub fn net_habitable_volume(total_volume: f64, usable_factor: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&usable_factor) {
        return Err(HabitatError::InvalidUsableFactor(usable_factor));
    }
    if !(total_volume >= 0.0 && total_volume.is_finite()) {
        return Err(HabitatError::InvalidDimension {
            field: "total_volume",
            value: total_volume,
        });
    }
    Ok(total_volume * usable_factor)
}

/// Compute the full metrics record for one habitat configuration.
pub fn compute_metrics(
    shape: HabitatShape,
    dims: &Dimensions,
    usable_factor: f64,
    crew_size: u32,
) -> Result<HabitatMetrics> {
    ensure_crew_size(crew_size)?;
    if !(usable_factor > 0.0 && usable_factor <= 1.0) {
        return Err(HabitatError::InvalidUsableFactor(usable_factor));
    }
    let total_volume = dims.volume(shape)?;
    let floor_area = dims.floor_area(shape)?;
    let nhv = net_habitable_volume(total_volume, usable_factor)?;
    let crew = crew_size as f64;
    Ok(HabitatMetrics {
        total_volume,
        floor_area,
        net_habitable_volume: nhv,
        nhv_per_person: nhv / crew,
        floor_area_per_person: floor_area / crew,
    })
}

/// Whether a shell fits the payload envelope of each heavy launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchVehicleFit {
    pub sls: bool,
    pub starship: bool,
}

impl LaunchVehicleFit {
    pub fn any(&self) -> bool {
        self.sls || self.starship
    }
}

/// Check a shell envelope against the SLS and Starship payload bays.
pub fn launch_vehicle_fit(diameter: f64, height: f64) -> Result<LaunchVehicleFit> {
    let d = ensure_positive("diameter", diameter)?;
    let h = ensure_positive("height", height)?;
    Ok(LaunchVehicleFit {
        sls: d <= SLS_MAX_DIAMETER && h <= SLS_MAX_HEIGHT,
        starship: d <= STARSHIP_MAX_DIAMETER && h <= STARSHIP_MAX_HEIGHT,
    })
}

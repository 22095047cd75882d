//! Input-validation errors for habitat calculations.
//!
//! Compliance findings (a metric below a NASA minimum) are not errors; they
//! are normal output of [`crate::compliance`]. Everything here means the
//! caller handed over a configuration the formulas cannot evaluate.

use thiserror::Error;

/// Result type for habitat calculations.
pub type Result<T> = std::result::Result<T, HabitatError>;

/// Why a calculation request was rejected.
#[derive(Debug, Error)]
pub enum HabitatError {
    /// A geometry input (diameter, height, length, width) is not positive.
    #[error("{field} must be greater than 0 (got {value})")]
    InvalidDimension { field: &'static str, value: f64 },

    /// The selected shape needs a dimension the configuration does not carry.
    #[error("{shape} habitat requires a {field} dimension")]
    MissingDimension {
        shape: &'static str,
        field: &'static str,
    },

    /// Mission duration must be at least one day.
    #[error("mission duration must be greater than 0 days (got {0})")]
    InvalidDuration(u32),

    /// Crew size must be at least one person.
    #[error("crew size must be greater than 0 (got {0})")]
    InvalidCrewSize(u32),

    /// Usable factor outside (0, 1].
    #[error("usable factor must be in (0, 1] (got {0})")]
    InvalidUsableFactor(f64),

    /// Zone key not in the zone table.
    #[error("unknown zone: {0}")]
    UnknownZone(String),

    /// Gravity environment key not in the environment table.
    #[error("unknown gravity environment: {0}")]
    UnknownEnvironment(String),

    /// Strict allocation mode: zones need more floor than the habitat has.
    #[error("zones need {allocated:.2} m² but only {floor_area:.2} m² of floor is available")]
    OverAllocated { allocated: f64, floor_area: f64 },

    /// The requested capability has no implementation yet.
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    /// A configuration or export snapshot could not be serialized or parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl HabitatError {
    /// True for errors caused by user input, as opposed to missing capability
    /// or serialization failures.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::NotSupported(_) | Self::Json(_))
    }
}

pub(crate) fn ensure_crew_size(crew_size: u32) -> Result<()> {
    if crew_size == 0 {
        return Err(HabitatError::InvalidCrewSize(crew_size));
    }
    Ok(())
}

pub(crate) fn ensure_duration(duration_days: u32) -> Result<()> {
    if duration_days == 0 {
        return Err(HabitatError::InvalidDuration(duration_days));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_message_names_field() {
        let err = HabitatError::InvalidDimension {
            field: "diameter",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "diameter must be greater than 0 (got 0)");
    }

    #[test]
    fn input_error_classification() {
        assert!(HabitatError::InvalidCrewSize(0).is_input_error());
        assert!(HabitatError::UnknownZone("galley".into()).is_input_error());
        assert!(!HabitatError::NotSupported("adjacency").is_input_error());
    }
}

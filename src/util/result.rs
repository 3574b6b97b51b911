use crate::form::FieldId;
use crate::util::{CoordinateAxis, Degrees};
use std::result;

pub type PlannerResult<T> = result::Result<T, PlannerError>;

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("{0} is required")]
    MissingField(FieldId),
    #[error("{field} value \"{value}\" is not valid: {reason}")]
    InvalidField {
        field: FieldId,
        value: String,
        reason: String,
    },
    #[error("Catalog request failed: {0}")]
    Catalog(#[from] reqwest::Error),
    #[error("Form state could not be accessed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Form state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("There is no astronomical night at latitude {latitude} on {date}")]
    NoAstronomicalNight {
        latitude: Degrees,
        date: chrono::NaiveDate,
    },
    #[error("The object will not be visible as its altitude never reaches {0} degrees during the observation period.")]
    NotVisible(Degrees),
    #[error("Size data is missing for {0}")]
    MissingSize(String),
    #[error("Object {0} number of shoots could not be calculated")]
    NoShots(String),
}

impl PlannerError {
    pub fn invalid(field: FieldId, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PlannerError::InvalidField {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub fn check_coordinate(value: Degrees, axis: CoordinateAxis) -> PlannerResult<()> {
    let limit = axis.limit();
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        let field = match axis {
            CoordinateAxis::Latitude => FieldId::Latitude,
            CoordinateAxis::Longitude => FieldId::Longitude,
        };
        Err(PlannerError::invalid(
            field,
            value.to_string(),
            format!("{} must be between {} and {}", axis, -limit, limit),
        ))
    }
}

pub fn check_latitude(latitude: Degrees) -> PlannerResult<()> {
    check_coordinate(latitude, CoordinateAxis::Latitude)
}

pub fn check_longitude(longitude: Degrees) -> PlannerResult<()> {
    check_coordinate(longitude, CoordinateAxis::Longitude)
}

pub fn check_range<T>(field: FieldId, value: T, min: T, max: T) -> PlannerResult<T>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if min <= value && value <= max {
        Ok(value)
    } else {
        Err(PlannerError::invalid(
            field,
            value.to_string(),
            format!("must be between {} and {}", min, max),
        ))
    }
}

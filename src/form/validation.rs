use chrono::NaiveDate;
use std::str::FromStr;

use super::{FieldId, FormFields};
use crate::util::*;

/// Sensor geometry of the camera
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SensorSpec {
    pub width_mm: f64,
    pub height_mm: f64,
    pub pixels_width: u32,
    pub pixels_height: u32,
}

/// A fully validated observation form
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationForm {
    pub object_name: String,
    pub object_id: Option<String>,
    pub latitude: Degrees,
    pub longitude: Degrees,
    /// Meters
    pub altitude: Option<u32>,
    pub sensor: SensorSpec,
    pub focal_length: f64,
    pub aperture: f64,
    /// Seconds between two exposures
    pub shoot_interval: f64,
    pub camera_position: i32,
    pub observation_date: NaiveDate,
    pub min_degrees: i32,
    pub camera: Option<String>,
}

pub const DEFAULT_MIN_DEGREES: i32 = 5;

fn optional_text<F: FormFields + ?Sized>(form: &F, id: FieldId) -> Option<&str> {
    form.field(id).map(str::trim).filter(|v| !v.is_empty())
}

fn required_text<F: FormFields + ?Sized>(form: &F, id: FieldId) -> PlannerResult<&str> {
    optional_text(form, id).ok_or(PlannerError::MissingField(id))
}

fn parse_text<T: FromStr>(id: FieldId, text: &str) -> PlannerResult<T> {
    text.parse()
        .map_err(|_| PlannerError::invalid(id, text, "not a number"))
}

fn required_in_range<F, T>(form: &F, id: FieldId, min: T, max: T) -> PlannerResult<T>
where
    F: FormFields + ?Sized,
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
{
    let value = parse_text(id, required_text(form, id)?)?;
    check_range(id, value, min, max)
}

impl ObservationForm {
    pub fn from_fields<F: FormFields + ?Sized>(form: &F) -> PlannerResult<Self> {
        let object_name = required_text(form, FieldId::ObjectName)?.to_string();
        let object_id = optional_text(form, FieldId::ObjectId).map(str::to_string);

        let latitude: Degrees =
            parse_text(FieldId::Latitude, required_text(form, FieldId::Latitude)?)?;
        check_latitude(latitude)?;
        let longitude: Degrees =
            parse_text(FieldId::Longitude, required_text(form, FieldId::Longitude)?)?;
        check_longitude(longitude)?;

        let altitude = match optional_text(form, FieldId::Altitude) {
            Some(text) => Some(check_range(
                FieldId::Altitude,
                parse_text(FieldId::Altitude, text)?,
                0,
                9999,
            )?),
            None => None,
        };

        let sensor = SensorSpec {
            width_mm: required_in_range(form, FieldId::SensorWidthMm, 1., 100.)?,
            height_mm: required_in_range(form, FieldId::SensorHeightMm, 1., 100.)?,
            pixels_width: required_in_range(form, FieldId::NumberOfPixelsInWidth, 1, 9999)?,
            pixels_height: required_in_range(form, FieldId::NumberOfPixelsInHeight, 1, 9999)?,
        };

        let date_text = required_text(form, FieldId::ObservationDate)?;
        let observation_date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|_| {
            PlannerError::invalid(FieldId::ObservationDate, date_text, "expected YYYY-MM-DD")
        })?;

        let min_degrees = match optional_text(form, FieldId::MinDegrees) {
            Some(text) => check_range(
                FieldId::MinDegrees,
                parse_text(FieldId::MinDegrees, text)?,
                0,
                90,
            )?,
            None => DEFAULT_MIN_DEGREES,
        };

        Ok(ObservationForm {
            object_name,
            object_id,
            latitude,
            longitude,
            altitude,
            sensor,
            focal_length: required_in_range(form, FieldId::FocalLength, 1., 10000.)?,
            aperture: required_in_range(form, FieldId::Aperture, 0.8, 64.)?,
            shoot_interval: required_in_range(form, FieldId::ShootInterval, 0., 999.)?,
            camera_position: required_in_range(form, FieldId::CameraPosition, -90, 90)?,
            observation_date,
            min_degrees,
            camera: optional_text(form, FieldId::Camera).map(str::to_string),
        })
    }
}

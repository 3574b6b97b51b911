pub use geolocation::*;
pub use options::*;
pub use sync::*;
pub use validation::*;

use std::collections::BTreeMap;
use std::str::FromStr;

mod geolocation;
mod options;
mod sync;
mod validation;

/// The fields of the observation form, named as they appear in the HTML form
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub enum FieldId {
    ObjectName,
    ObjectId,
    Latitude,
    Longitude,
    LatitudeDeg,
    LatitudeMin,
    LatitudeSec,
    LongitudeDeg,
    LongitudeMin,
    LongitudeSec,
    Altitude,
    SensorWidthMm,
    SensorHeightMm,
    NumberOfPixelsInWidth,
    NumberOfPixelsInHeight,
    FocalLength,
    Aperture,
    ShootInterval,
    CameraPosition,
    ObservationDate,
    MinDegrees,
    Camera,
    CsrfToken,
}

impl FieldId {
    pub const ALL: [FieldId; 23] = [
        FieldId::ObjectName,
        FieldId::ObjectId,
        FieldId::Latitude,
        FieldId::Longitude,
        FieldId::LatitudeDeg,
        FieldId::LatitudeMin,
        FieldId::LatitudeSec,
        FieldId::LongitudeDeg,
        FieldId::LongitudeMin,
        FieldId::LongitudeSec,
        FieldId::Altitude,
        FieldId::SensorWidthMm,
        FieldId::SensorHeightMm,
        FieldId::NumberOfPixelsInWidth,
        FieldId::NumberOfPixelsInHeight,
        FieldId::FocalLength,
        FieldId::Aperture,
        FieldId::ShootInterval,
        FieldId::CameraPosition,
        FieldId::ObservationDate,
        FieldId::MinDegrees,
        FieldId::Camera,
        FieldId::CsrfToken,
    ];

    /// The six fields holding the sexagesimal coordinate, latitude first
    pub const DMS_GROUP: [FieldId; 6] = [
        FieldId::LatitudeDeg,
        FieldId::LatitudeMin,
        FieldId::LatitudeSec,
        FieldId::LongitudeDeg,
        FieldId::LongitudeMin,
        FieldId::LongitudeSec,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldId::ObjectName => "object_name",
            FieldId::ObjectId => "object_id",
            FieldId::Latitude => "latitude",
            FieldId::Longitude => "longitude",
            FieldId::LatitudeDeg => "latitude_deg",
            FieldId::LatitudeMin => "latitude_min",
            FieldId::LatitudeSec => "latitude_sec",
            FieldId::LongitudeDeg => "longitude_deg",
            FieldId::LongitudeMin => "longitude_min",
            FieldId::LongitudeSec => "longitude_sec",
            FieldId::Altitude => "altitude",
            FieldId::SensorWidthMm => "sensor_width_mm",
            FieldId::SensorHeightMm => "sensor_height_mm",
            FieldId::NumberOfPixelsInWidth => "number_of_pixels_in_width",
            FieldId::NumberOfPixelsInHeight => "number_of_pixels_in_height",
            FieldId::FocalLength => "focal_length",
            FieldId::Aperture => "aperture",
            FieldId::ShootInterval => "shoot_interval",
            FieldId::CameraPosition => "camera_position",
            FieldId::ObservationDate => "observation_date",
            FieldId::MinDegrees => "min_degrees",
            FieldId::Camera => "camera",
            FieldId::CsrfToken => "csrf_token",
        }
    }

    pub fn is_dms(&self) -> bool {
        Self::DMS_GROUP.contains(self)
    }
}

impl core::fmt::Display for FieldId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl core::fmt::Display for UnknownField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unknown form field \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|id| id.name() == s)
            .copied()
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Access to the text of the form's fields, whatever the form is rendered with
pub trait FormFields {
    fn field(&self, id: FieldId) -> Option<&str>;
    fn set_field(&mut self, id: FieldId, value: String);

    /// The field's text, or "" if it has never been set
    fn text(&self, id: FieldId) -> &str {
        self.field(id).unwrap_or("")
    }

    fn is_empty(&self, id: FieldId) -> bool {
        self.text(id).is_empty()
    }
}

/// In-memory form
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormState {
    values: BTreeMap<FieldId, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.values.iter().map(|(id, v)| (*id, v.as_str()))
    }
}

impl FormFields for FormState {
    fn field(&self, id: FieldId) -> Option<&str> {
        self.values.get(&id).map(String::as_str)
    }

    fn set_field(&mut self, id: FieldId, value: String) {
        self.values.insert(id, value);
    }
}

impl<const N: usize> From<[(FieldId, &str); N]> for FormState {
    fn from(fields: [(FieldId, &str); N]) -> Self {
        let mut form = FormState::new();
        for (id, value) in fields {
            form.set_field(id, value.to_string());
        }
        form
    }
}

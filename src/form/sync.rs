use tracing::{debug, info};

use super::{FieldId, FormFields, GeoPosition, GeolocationError};
use crate::astro_math::{decimal_to_dms, dms_to_decimal};
use crate::catalog::{CameraRecord, ObjectSuggestion};
use crate::util::*;

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn write_decimal<F: FormFields + ?Sized>(form: &mut F, id: FieldId, value: Degrees) {
    form.set_field(id, format!("{:.6}", value));
}

fn write_dms<F: FormFields + ?Sized>(form: &mut F, ids: &[FieldId], value: Degrees) {
    let dms = decimal_to_dms(value);
    form.set_field(ids[0], dms.degrees_text());
    form.set_field(ids[1], dms.minutes_text());
    form.set_field(ids[2], dms.seconds_text());
}

/// Recomputes the decimal `latitude`/`longitude` fields from the six DMS fields.
///
/// Nothing is written unless every DMS field holds a number.
/// Returns whether the decimal fields were written.
pub fn sync_decimal_from_dms<F: FormFields + ?Sized>(form: &mut F) -> bool {
    let mut values = [0f64; 6];
    for (value, id) in values.iter_mut().zip(FieldId::DMS_GROUP) {
        match parse_number(form.text(id)) {
            Some(v) => *value = v,
            None => {
                debug!("Skipping coordinate sync, {} is not a number", id);
                return false;
            }
        }
    }

    let latitude = dms_to_decimal(values[0], values[1], values[2], CoordinateAxis::Latitude);
    let longitude = dms_to_decimal(values[3], values[4], values[5], CoordinateAxis::Longitude);
    write_decimal(form, FieldId::Latitude, latitude);
    write_decimal(form, FieldId::Longitude, longitude);
    true
}

/// Input handler for the whole form. Only edits inside the DMS group trigger a sync.
pub fn on_field_input<F: FormFields + ?Sized>(form: &mut F, changed: FieldId) -> bool {
    changed.is_dms() && sync_decimal_from_dms(form)
}

/// Fills the location fields from a platform position.
///
/// Altitude is only written when the field is still empty. A reported altitude of zero counts as
/// unknown. Whole meters round half up.
pub fn apply_geolocation<F: FormFields + ?Sized>(form: &mut F, position: GeoPosition) {
    if form.is_empty(FieldId::Altitude) {
        let altitude = position
            .altitude
            .filter(|a| *a != 0.)
            .map(|a| format!("{}", (a + 0.5).floor()))
            .unwrap_or_default();
        form.set_field(FieldId::Altitude, altitude);
    }

    write_decimal(form, FieldId::Latitude, position.latitude);
    write_decimal(form, FieldId::Longitude, position.longitude);

    write_dms(form, &FieldId::DMS_GROUP[..3], position.latitude);
    write_dms(form, &FieldId::DMS_GROUP[3..], position.longitude);
}

pub fn on_geolocation_result<F: FormFields + ?Sized>(
    form: &mut F,
    result: Result<GeoPosition, GeolocationError>,
) {
    match result {
        Ok(position) => {
            info!(
                "Located at {:.6}, {:.6}",
                position.latitude, position.longitude
            );
            apply_geolocation(form, position)
        }
        Err(e) => debug!("Geolocation unavailable: {}", e),
    }
}

pub fn apply_object_suggestion<F: FormFields + ?Sized>(form: &mut F, suggestion: &ObjectSuggestion) {
    form.set_field(FieldId::ObjectName, suggestion.name.clone());
    form.set_field(FieldId::ObjectId, suggestion.id.clone());
}

/// Selecting a camera copies whatever sensor details the catalog knows about it
pub fn apply_camera<F: FormFields + ?Sized>(form: &mut F, camera: &CameraRecord) {
    form.set_field(FieldId::Camera, camera.value.clone());

    let dimensions = [
        (FieldId::SensorWidthMm, camera.sensor_width_mm),
        (FieldId::SensorHeightMm, camera.sensor_height_mm),
    ];
    for (id, value) in dimensions {
        if let Some(v) = value {
            form.set_field(id, v.to_string());
        }
    }

    let pixels = [
        (FieldId::NumberOfPixelsInWidth, camera.number_of_pixels_in_width),
        (FieldId::NumberOfPixelsInHeight, camera.number_of_pixels_in_height),
    ];
    for (id, value) in pixels {
        if let Some(v) = value {
            form.set_field(id, v.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;

    fn dms_form(values: [&str; 6]) -> FormState {
        let mut form = FormState::new();
        for (id, v) in FieldId::DMS_GROUP.into_iter().zip(values) {
            form.set_field(id, v.to_string());
        }
        form
    }

    #[test]
    fn test_sync_decimal_from_dms() {
        let mut form = dms_form(["40", "26", "46.30", "-79", "58", "55.90"]);
        assert!(sync_decimal_from_dms(&mut form));
        assert_eq!(form.text(FieldId::Latitude), "40.446194");
        assert_eq!(form.text(FieldId::Longitude), "-79.982194");
    }

    #[test]
    fn test_sync_clamps() {
        let mut form = dms_form(["95", "0", "0", "-200", "0", "0"]);
        assert!(sync_decimal_from_dms(&mut form));
        assert_eq!(form.text(FieldId::Latitude), "90.000000");
        assert_eq!(form.text(FieldId::Longitude), "-180.000000");
    }

    #[test]
    fn test_sync_skipped_on_malformed_input() {
        let mut form = dms_form(["40", "", "46.30", "-79", "58", "55.90"]);
        form.set_field(FieldId::Latitude, "1.000000".to_string());
        assert!(!sync_decimal_from_dms(&mut form));
        assert_eq!(form.text(FieldId::Latitude), "1.000000");
        assert_eq!(form.field(FieldId::Longitude), None);

        let mut form = dms_form(["40", "26", "abc", "-79", "58", "55.90"]);
        assert!(!sync_decimal_from_dms(&mut form));

        let mut form = dms_form(["NaN", "26", "1", "-79", "58", "55.90"]);
        assert!(!sync_decimal_from_dms(&mut form));
        assert!(form.is_empty(FieldId::Latitude));
    }

    #[test]
    fn test_sync_keeps_sign_of_negative_zero_degrees() {
        let mut form = dms_form(["-0", "30", "0", "0", "15", "0"]);
        assert!(sync_decimal_from_dms(&mut form));
        assert_eq!(form.text(FieldId::Latitude), "-0.500000");
        assert_eq!(form.text(FieldId::Longitude), "0.250000");
    }

    #[test]
    fn test_on_field_input_only_reacts_to_dms_fields() {
        let mut form = dms_form(["10", "0", "0", "20", "0", "0"]);
        assert!(!on_field_input(&mut form, FieldId::ObjectName));
        assert!(form.is_empty(FieldId::Latitude));

        assert!(on_field_input(&mut form, FieldId::LongitudeMin));
        assert_eq!(form.text(FieldId::Latitude), "10.000000");
        assert_eq!(form.text(FieldId::Longitude), "20.000000");
    }

    #[test]
    fn test_apply_geolocation() {
        let mut form = FormState::new();
        apply_geolocation(
            &mut form,
            GeoPosition {
                latitude: -33.86882,
                longitude: 151.20929,
                altitude: Some(57.6),
            },
        );

        assert_eq!(form.text(FieldId::Altitude), "58");
        assert_eq!(form.text(FieldId::Latitude), "-33.868820");
        assert_eq!(form.text(FieldId::Longitude), "151.209290");
        assert_eq!(form.text(FieldId::LatitudeDeg), "-33");
        assert_eq!(form.text(FieldId::LatitudeMin), "52");
        assert_eq!(form.text(FieldId::LatitudeSec), "7.75");
        assert_eq!(form.text(FieldId::LongitudeDeg), "151");
        assert_eq!(form.text(FieldId::LongitudeMin), "12");
        assert_eq!(form.text(FieldId::LongitudeSec), "33.44");

        // Feeding the DMS fields back reproduces the decimal coordinate
        let mut resynced = form.clone();
        assert!(sync_decimal_from_dms(&mut resynced));
        assert_eq!(resynced.text(FieldId::Latitude), "-33.868819");
        assert_eq!(resynced.text(FieldId::Longitude), "151.209289");
    }

    #[test]
    fn test_apply_geolocation_keeps_existing_altitude() {
        let mut form = FormState::from([(FieldId::Altitude, "1200")]);
        apply_geolocation(
            &mut form,
            GeoPosition {
                latitude: 10.,
                longitude: 20.,
                altitude: Some(3.),
            },
        );
        assert_eq!(form.text(FieldId::Altitude), "1200");

        let mut form = FormState::new();
        apply_geolocation(
            &mut form,
            GeoPosition {
                latitude: 10.,
                longitude: 20.,
                altitude: None,
            },
        );
        assert_eq!(form.field(FieldId::Altitude), Some(""));
    }

    #[test]
    fn test_geolocation_altitude_text() {
        let altitude_text = |altitude| {
            let mut form = FormState::new();
            apply_geolocation(
                &mut form,
                GeoPosition {
                    latitude: 10.,
                    longitude: 20.,
                    altitude,
                },
            );
            form.text(FieldId::Altitude).to_string()
        };

        assert_eq!(altitude_text(Some(0.)), "");
        assert_eq!(altitude_text(Some(2.5)), "3");
        assert_eq!(altitude_text(Some(12.4)), "12");
        assert_eq!(altitude_text(Some(-3.7)), "-4");
    }

    #[test]
    fn test_geolocation_failure_is_ignored() {
        let mut form = FormState::from([(FieldId::Latitude, "12.000000")]);
        on_geolocation_result(&mut form, Err(GeolocationError::PermissionDenied));
        assert_eq!(form.text(FieldId::Latitude), "12.000000");
        assert_eq!(form.iter().count(), 1);
    }

    #[test]
    fn test_apply_object_suggestion() {
        let mut form = FormState::new();
        apply_object_suggestion(
            &mut form,
            &ObjectSuggestion {
                id: "NGC7000".to_string(),
                name: "NGC7000 (North America Nebula)".to_string(),
            },
        );
        assert_eq!(form.text(FieldId::ObjectId), "NGC7000");
        assert_eq!(form.text(FieldId::ObjectName), "NGC7000 (North America Nebula)");
    }

    #[test]
    fn test_apply_camera() {
        let mut form = FormState::from([(FieldId::SensorHeightMm, "15.6")]);
        let camera = CameraRecord {
            value: "EOS 2000D".to_string(),
            text: "<strong>EOS 2000D</strong> (Canon)".to_string(),
            brand: Some("Canon".to_string()),
            model: Some("EOS 2000D".to_string()),
            sensor_width_mm: Some(22.3),
            sensor_height_mm: None,
            number_of_pixels_in_width: Some(6000),
            number_of_pixels_in_height: Some(4000),
            ..Default::default()
        };
        apply_camera(&mut form, &camera);
        assert_eq!(form.text(FieldId::Camera), "EOS 2000D");
        assert_eq!(form.text(FieldId::SensorWidthMm), "22.3");
        assert_eq!(form.text(FieldId::SensorHeightMm), "15.6");
        assert_eq!(form.text(FieldId::NumberOfPixelsInWidth), "6000");
        assert_eq!(form.text(FieldId::NumberOfPixelsInHeight), "4000");
    }
}

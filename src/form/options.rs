use super::{FieldId, FormFields};

/// Selectable f-numbers
pub const APERTURES: [f64; 37] = [
    1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3, 7.1, 8.0,
    9.0, 10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 29.0, 32.0, 36.0, 40.0, 45.0, 51.0,
    57.0, 64.0,
];

/// Selectable camera rotations, degrees
pub const CAMERA_POSITIONS: [i32; 13] = [-90, -75, -60, -45, -30, -15, 0, 15, 30, 45, 60, 75, 90];

pub const DEFAULT_APERTURE: &str = "1";
pub const DEFAULT_CAMERA_POSITION: &str = "0";

/// (value, label) pairs for the aperture select, e.g. ("2.8", "f/2.8")
pub fn aperture_options() -> Vec<(String, String)> {
    APERTURES
        .iter()
        .map(|a| (a.to_string(), format!("f/{}", a)))
        .collect()
}

pub fn camera_position_options() -> Vec<(String, String)> {
    CAMERA_POSITIONS
        .iter()
        .map(|p| (p.to_string(), format!("{}°", p)))
        .collect()
}

/// Selects the default aperture and camera position where nothing is selected yet
pub fn apply_selection_defaults<F: FormFields + ?Sized>(form: &mut F) {
    if form.is_empty(FieldId::Aperture) {
        form.set_field(FieldId::Aperture, DEFAULT_APERTURE.to_string());
    }
    if form.is_empty(FieldId::CameraPosition) {
        form.set_field(FieldId::CameraPosition, DEFAULT_CAMERA_POSITION.to_string());
    }
}

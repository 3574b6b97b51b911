use crate::astro_math::{deg_to_rad, rad_to_deg};
use crate::form::SensorSpec;
use crate::util::*;

/// Field of view of a camera behind a lens
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraFov {
    pub width_arcmin: f64,
    pub height_arcmin: f64,
    pub pixel_width_arcsec: f64,
    pub pixel_height_arcsec: f64,
}

/// Exposure limit before stars start to trail
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShutterSpeed {
    /// Largest standard shutter speed not above `exact`
    pub rounded: f64,
    pub exact: f64,
}

/// Shutter speeds a camera body offers, seconds
pub const STANDARD_SHUTTER_SPEEDS: [f64; 55] = [
    1. / 8000.,
    1. / 6400.,
    1. / 5000.,
    1. / 4000.,
    1. / 3200.,
    1. / 2500.,
    1. / 2000.,
    1. / 1600.,
    1. / 1250.,
    1. / 1000.,
    1. / 800.,
    1. / 640.,
    1. / 500.,
    1. / 400.,
    1. / 320.,
    1. / 250.,
    1. / 200.,
    1. / 160.,
    1. / 125.,
    1. / 100.,
    1. / 80.,
    1. / 60.,
    1. / 50.,
    1. / 40.,
    1. / 30.,
    1. / 25.,
    1. / 20.,
    1. / 15.,
    1. / 13.,
    1. / 10.,
    1. / 8.,
    1. / 6.,
    1. / 5.,
    1. / 4.,
    0.3,
    0.4,
    0.5,
    0.6,
    0.8,
    1.,
    1.3,
    1.6,
    2.,
    2.5,
    3.,
    4.,
    5.,
    6.,
    8.,
    10.,
    13.,
    15.,
    20.,
    25.,
    30.,
];

fn angular_size_arcmin(size_mm: f64, focal_length_mm: f64) -> f64 {
    rad_to_deg(2. * (size_mm / (2. * focal_length_mm)).atan()) * 60.
}

pub fn calculate_camera_fov(sensor: &SensorSpec, focal_length_mm: f64) -> CameraFov {
    let width_arcmin = angular_size_arcmin(sensor.width_mm, focal_length_mm);
    let height_arcmin = angular_size_arcmin(sensor.height_mm, focal_length_mm);

    CameraFov {
        width_arcmin,
        height_arcmin,
        pixel_width_arcsec: width_arcmin * 60. / sensor.pixels_width as f64,
        pixel_height_arcsec: height_arcmin * 60. / sensor.pixels_height as f64,
    }
}

/// NPF rule: (35 * N + 30 * pixel pitch in microns) / focal length
pub fn calculate_max_shooting_time(
    aperture: f64,
    sensor: &SensorSpec,
    focal_length_mm: f64,
) -> ShutterSpeed {
    let pixel_pitch = sensor.width_mm / sensor.pixels_width as f64 * 1000.;
    let exact = (35. * aperture + 30. * pixel_pitch) / focal_length_mm;

    ShutterSpeed {
        rounded: round_down_shutter_speed(exact),
        exact,
    }
}

/// Falls back to the fastest speed when even that is too slow
pub fn round_down_shutter_speed(shutter_speed: f64) -> f64 {
    STANDARD_SHUTTER_SPEEDS
        .iter()
        .copied()
        .filter(|s| *s <= shutter_speed)
        .last()
        .unwrap_or(STANDARD_SHUTTER_SPEEDS[0])
}

/// Projects the field of view onto the object's axes.
///
/// Landscape (0) and portrait (±90) are exact swaps, any other camera rotation is combined with
/// the object's position angle.
pub fn apply_fov_rotation(
    fov_width: f64,
    fov_height: f64,
    camera_position: i32,
    position_angle: Degrees,
) -> (f64, f64) {
    match camera_position {
        0 => (fov_width, fov_height),
        90 | -90 => (fov_height, fov_width),
        _ => {
            let angle = deg_to_rad(camera_position as f64 + position_angle);
            let (sin, cos) = angle.sin_cos();
            (
                cos * fov_width - sin * fov_height,
                sin * fov_width + cos * fov_height,
            )
        }
    }
}

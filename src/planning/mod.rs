//! Exposure planning for one deep-sky object on one night.

pub use camera::*;
pub use visibility::*;

mod camera;
mod visibility;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::astro_math::hours_to_deg;
use crate::form::ObservationForm;
use crate::util::*;

/// Catalog data of the object to photograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetObject {
    pub id: String,
    pub name: String,
    pub ra_hours: Hours,
    pub dec_degrees: Degrees,
    /// Arcminutes
    pub size_major_arcmin: Option<f64>,
    pub size_minor_arcmin: Option<f64>,
    pub position_angle: Option<Degrees>,
}

impl TargetObject {
    fn size(&self) -> PlannerResult<(f64, f64)> {
        match (self.size_major_arcmin, self.size_minor_arcmin) {
            (Some(major), Some(minor)) => Ok((major, minor)),
            _ => Err(PlannerError::MissingSize(self.name.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationReport {
    pub object_name: String,
    pub fov_width: f64,
    pub fov_height: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
    pub size_major: f64,
    pub size_minor: f64,
    /// Shutter speed actually used, seconds
    pub max_shooting_time: f64,
    pub real_max_shooting_time: f64,
    pub num_shots: u32,
    pub total_time_minutes: u32,
    pub total_time_seconds: u32,
    pub position_angle: Degrees,
    pub camera_position: i32,
    pub aperture: f64,
    pub focal_length: f64,
    pub min_degrees: i32,
    pub altitude: Option<u32>,
    pub ra: Hours,
    pub dec: Degrees,
    pub object_alt: Degrees,
    pub object_az: Degrees,
    pub visible_at: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
    pub dawn: DateTime<Utc>,
}

impl ObservationReport {
    /// `AR: <ra°> Dec: <dec°> | Alt: <alt°> Az: <az°> | Visible at: <UTC minute>`
    pub fn observation_summary(&self) -> String {
        format!(
            "AR: {:.2} Dec: {:.2} | Alt: {:.2} Az: {:.2} | Visible at: {}",
            hours_to_deg(self.ra),
            self.dec,
            self.object_alt,
            self.object_az,
            self.visible_at.format("%Y-%m-%dT%H:%MZ")
        )
    }
}

impl fmt::Display for ObservationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.object_name)?;
        writeln!(f, "  {}", self.observation_summary())?;
        writeln!(
            f,
            "  Night: {} to {}",
            self.dusk.format("%Y-%m-%d %H:%M"),
            self.dawn.format("%Y-%m-%d %H:%M")
        )?;
        writeln!(
            f,
            "  FOV: {:.2}' x {:.2}' ({:.2}\" x {:.2}\" per pixel)",
            self.fov_width, self.fov_height, self.pixel_width, self.pixel_height
        )?;
        writeln!(
            f,
            "  Object size: {:.2}' x {:.2}', PA {:.0}",
            self.size_major, self.size_minor, self.position_angle
        )?;
        writeln!(
            f,
            "  Shutter: {}s (max {:.2}s) at f/{} and {}mm, camera at {}",
            self.max_shooting_time,
            self.real_max_shooting_time,
            self.aperture,
            self.focal_length,
            self.camera_position
        )?;
        write!(
            f,
            "  Shots: {} over {}m {}s",
            self.num_shots, self.total_time_minutes, self.total_time_seconds
        )
    }
}

/// Plans the exposure sequence for `target` from the validated form
pub fn plan_observation(
    form: &ObservationForm,
    target: &TargetObject,
) -> PlannerResult<ObservationReport> {
    let (size_major, size_minor) = target.size()?;
    let position_angle = target.position_angle.unwrap_or(0.);
    let site = Site {
        latitude: form.latitude,
        longitude: form.longitude,
    };

    let night = find_astronomical_night(site, form.observation_date)?;
    debug!("Astronomical night from {} to {}", night.dusk, night.dawn);

    let sighting = find_first_visible(
        site,
        target.ra_hours,
        target.dec_degrees,
        night.dusk,
        night.dawn,
        form.min_degrees as Degrees,
    )?;

    let fov = calculate_camera_fov(&form.sensor, form.focal_length);
    let shutter = calculate_max_shooting_time(form.aperture, &form.sensor, form.focal_length);

    let framing = Framing {
        ra: target.ra_hours,
        dec: target.dec_degrees,
        size_major,
        size_minor,
        position_angle,
        fov_width: fov.width_arcmin,
        fov_height: fov.height_arcmin,
        camera_position: form.camera_position,
    };
    let plan = calculate_number_of_shots(
        site,
        &framing,
        sighting.time,
        night.dawn,
        shutter.rounded,
        form.shoot_interval,
        &target.name,
    )?;
    let (total_time_minutes, total_time_seconds) = plan.minutes_seconds();

    info!(
        "{}: {} shots of {}s starting {}",
        target.name, plan.shots, shutter.rounded, plan.start
    );

    Ok(ObservationReport {
        object_name: target.name.clone(),
        fov_width: fov.width_arcmin,
        fov_height: fov.height_arcmin,
        pixel_width: fov.pixel_width_arcsec,
        pixel_height: fov.pixel_height_arcsec,
        size_major,
        size_minor,
        max_shooting_time: shutter.rounded,
        real_max_shooting_time: shutter.exact,
        num_shots: plan.shots,
        total_time_minutes,
        total_time_seconds,
        position_angle,
        camera_position: form.camera_position,
        aperture: form.aperture,
        focal_length: form.focal_length,
        min_degrees: form.min_degrees,
        altitude: form.altitude,
        ra: target.ra_hours,
        dec: target.dec_degrees,
        object_alt: sighting.alt,
        object_az: sighting.az,
        visible_at: sighting.time,
        dusk: night.dusk,
        dawn: night.dawn,
    })
}

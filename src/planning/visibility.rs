use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::astro_math::{
    angular_distance, calculate_alt_az, calculate_sun_altitude, deg_to_hours, deg_to_rad,
};
use crate::util::*;

/// Sun altitude at which astronomical night begins
pub const ASTRONOMICAL_TWILIGHT: Degrees = -18.;

fn search_step() -> Duration {
    Duration::minutes(1)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Site {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Night {
    pub dusk: DateTime<Utc>,
    pub dawn: DateTime<Utc>,
}

/// Where an object stands in the sky at a given time
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sighting {
    pub time: DateTime<Utc>,
    pub alt: Degrees,
    pub az: Degrees,
}

/// The part of a target the exposure sequence needs
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Framing {
    pub ra: Hours,
    pub dec: Degrees,
    /// Object extent, arcminutes
    pub size_major: f64,
    pub size_minor: f64,
    pub position_angle: Degrees,
    /// Field of view, arcminutes
    pub fov_width: f64,
    pub fov_height: f64,
    pub camera_position: i32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShotPlan {
    pub shots: u32,
    /// When the sequence can start
    pub start: DateTime<Utc>,
    /// Seconds
    pub total_time: f64,
}

impl ShotPlan {
    /// Total time as whole minutes and seconds
    pub fn minutes_seconds(&self) -> (u32, u32) {
        let minutes = (self.total_time / 60.).floor();
        let seconds = (self.total_time - minutes * 60.).round();
        (minutes as u32, seconds as u32)
    }
}

fn first_time(
    from: DateTime<Utc>,
    until: DateTime<Utc>,
    condition: impl Fn(DateTime<Utc>) -> bool,
) -> Option<DateTime<Utc>> {
    let mut t = from;
    while t <= until {
        if condition(t) {
            return Some(t);
        }
        t += search_step();
    }
    None
}

/// Finds the astronomical night that starts in the evening of `date`, local solar time.
pub fn find_astronomical_night(site: Site, date: NaiveDate) -> PlannerResult<Night> {
    let midday = date
        .and_hms_opt(12, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or(PlannerError::NoAstronomicalNight {
            latitude: site.latitude,
            date,
        })?;
    let noon = midday - Duration::seconds((deg_to_hours(site.longitude) * 3600.).round() as i64);
    let next_noon = noon + Duration::days(1);

    let is_dark = |t| calculate_sun_altitude(t, site.latitude, site.longitude) < ASTRONOMICAL_TWILIGHT;

    let dusk = first_time(noon, next_noon, is_dark).ok_or(PlannerError::NoAstronomicalNight {
        latitude: site.latitude,
        date,
    })?;
    let dawn = first_time(dusk, next_noon, |t| !is_dark(t)).unwrap_or(next_noon);

    Ok(Night { dusk, dawn })
}

/// First minute between `start` and `limit` at which the object stands at least `min_degrees`
/// above the horizon.
pub fn find_first_visible(
    site: Site,
    ra: Hours,
    dec: Degrees,
    start: DateTime<Utc>,
    limit: DateTime<Utc>,
    min_degrees: Degrees,
) -> PlannerResult<Sighting> {
    let position = |t| calculate_alt_az(t, site.latitude, site.longitude, ra, dec);

    first_time(start, limit, |t| position(t).0 >= min_degrees)
        .map(|time| {
            let (alt, az) = position(time);
            Sighting { time, alt, az }
        })
        .ok_or(PlannerError::NotVisible(min_degrees))
}

/// How many exposures of `exposure` seconds, `interval` seconds apart, fit before the object
/// drifts out of the frame or the night ends.
///
/// The free margin between the rotated field of view and the object is what the object may
/// drift in altitude (first axis) and azimuth (second axis). When not a single exposure fits
/// the start is moved on step by step until `limit`.
pub fn calculate_number_of_shots(
    site: Site,
    framing: &Framing,
    start: DateTime<Utc>,
    limit: DateTime<Utc>,
    exposure: f64,
    interval: f64,
    object_name: &str,
) -> PlannerResult<ShotPlan> {
    let (fov_alt, fov_az) = super::apply_fov_rotation(
        framing.fov_width,
        framing.fov_height,
        framing.camera_position,
        framing.position_angle,
    );
    let margin_alt = (fov_alt.abs() - framing.size_major).max(0.) / 2.;
    let margin_az = (fov_az.abs() - framing.size_minor).max(0.) / 2.;
    if margin_alt <= 0. || margin_az <= 0. {
        return Err(PlannerError::NoShots(object_name.to_string()));
    }

    let step = exposure + interval;
    let step_duration = Duration::milliseconds(((step * 1000.).round() as i64).max(1));
    let position = |t| calculate_alt_az(t, site.latitude, site.longitude, framing.ra, framing.dec);

    let mut t = start;
    while t < limit {
        let (alt0, az0) = position(t);
        let (alt1, az1) = position(t + step_duration);

        // arcminutes per second
        let alt_rate = (alt1 - alt0).abs() * 60. / step;
        let az_rate = angular_distance(az1, az0) * deg_to_rad(alt0).cos() * 60. / step;

        let framed = (margin_alt / alt_rate).min(margin_az / az_rate);
        let remaining = (limit - t).num_milliseconds() as f64 / 1000.;
        let shots = (framed.min(remaining) / step).floor();

        if shots >= 1. {
            return Ok(ShotPlan {
                shots: shots as u32,
                start: t,
                total_time: shots * step,
            });
        }

        t += step_duration;
    }

    Err(PlannerError::NoShots(object_name.to_string()))
}

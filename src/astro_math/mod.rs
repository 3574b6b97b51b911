use chrono::{Datelike, Timelike};
use polynomials::poly;
use std::f64::consts::{PI, TAU};

pub use dms::*;

mod dms;

pub type Hours = f64;
pub type Degrees = f64;
pub type Radians = f64;

pub fn deg_to_rad(degrees: Degrees) -> Radians {
    PI * degrees / 180.
}

pub fn rad_to_deg(rad: Radians) -> Degrees {
    180. * rad / PI
}

pub fn hours_to_rad(hours: Hours) -> Radians {
    PI * hours / 12.
}

pub fn rad_to_hours(rad: Radians) -> Hours {
    12. * rad / PI
}

pub fn deg_to_hours(deg: Degrees) -> Hours {
    deg / 15.
}

pub fn hours_to_deg(hours: Hours) -> Degrees {
    hours * 15.
}

/// Calculates the Julian Date of a time
/// see https://scienceworld.wolfram.com/astronomy/JulianDate.html
pub fn calc_jd(time: chrono::DateTime<chrono::Utc>) -> f64 {
    let y = time.year() as f64;
    let m = time.month() as f64;
    let d = time.day() as f64;

    let mut jd = 367. * y;
    jd -= f64::floor(7. * (y + f64::floor((m + 9.) / 12.)) / 4.);
    jd -= f64::floor(3. * (f64::floor((y + (m - 9.) / 7.) / 100.) + 1.) / 4.);
    jd += f64::floor(275. * m / 9.);
    jd += d;
    jd += 1721028.5;
    let hours =
        time.hour() as f64 + time.minute() as f64 / 60. + time.second() as f64 / 3600.;
    jd + hours / 24.
}

// see https://thecynster.home.blog/2019/11/04/calculating-sidereal-time/
pub fn calculate_greenwich_sidereal_time(time: chrono::DateTime<chrono::Utc>) -> Hours {
    // The result will be off by the number of leap seconds different from this on the date given
    const LEAP_SECOND_TOTAL: u32 = 27;

    let jd_utc = calc_jd(time);

    let du = jd_utc - 2451545.0;
    let theta = rad_to_hours(modulo(
        TAU * (0.779_057_273_264f64 + 1.002_737_811_911_354_5f64 * du),
        TAU,
    ));

    let poly = poly![
        0.014506,
        4612.156534,
        1.3915817,
        -0.00000044,
        -0.000029956,
        -0.0000000368,
    ];
    let jd_tt = jd_utc + ((LEAP_SECOND_TOTAL as f64 + 32.184) / 3600.) / 24.;
    let t = (jd_tt - 2451545.0) / 36525.; // centuries

    let gmstp = deg_to_hours(modulo(poly.eval(t).unwrap_or_default() / 3600., 360.));

    modulo(theta + gmstp, 24.)
}

/// longitude in degrees
/// returns hours
pub fn calculate_local_sidereal_time(
    time: chrono::DateTime<chrono::Utc>,
    longitude: Degrees,
) -> Hours {
    let greenwich_sidereal_time = calculate_greenwich_sidereal_time(time);
    modulo(greenwich_sidereal_time + deg_to_hours(longitude), 24.)
}

/// longitude in degrees, ra in hours
/// returns hours
pub fn calculate_hour_angle(
    time: chrono::DateTime<chrono::Utc>,
    longitude: Degrees,
    ra: Hours,
) -> Hours {
    modulo(calculate_local_sidereal_time(time, longitude) - ra, 24.)
}

pub fn calculate_alt_from_ha_dec(ha: Hours, dec: Degrees, lat: Degrees) -> Degrees {
    let ha = hours_to_rad(ha);
    let dec = deg_to_rad(dec);
    let lat = deg_to_rad(lat);
    rad_to_deg((dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos()).asin())
}

pub fn calculate_az_from_ha_dec(ha: Hours, dec: Degrees, lat: Degrees) -> Degrees {
    let alt = deg_to_rad(calculate_alt_from_ha_dec(ha, dec, lat));
    let ha = hours_to_rad(ha);
    let dec = deg_to_rad(dec);
    let lat = deg_to_rad(lat);

    let cos_a = ((dec.sin() - alt.sin() * lat.sin()) / (alt.cos() * lat.cos())).clamp(-1., 1.);
    let a = rad_to_deg(cos_a.acos());

    if 0. < ha.sin() {
        360. - a
    } else {
        a
    }
}

/// Horizontal position of an equatorial coordinate seen from `latitude`/`longitude` at `time`.
/// Returns (alt, az) in degrees.
pub fn calculate_alt_az(
    time: chrono::DateTime<chrono::Utc>,
    latitude: Degrees,
    longitude: Degrees,
    ra: Hours,
    dec: Degrees,
) -> (Degrees, Degrees) {
    let ha = calculate_hour_angle(time, longitude, ra);
    (
        calculate_alt_from_ha_dec(ha, dec, latitude),
        calculate_az_from_ha_dec(ha, dec, latitude),
    )
}

/// Apparent position of the Sun, good to about a hundredth of a degree.
/// see https://aa.usno.navy.mil/faq/sun_approx
/// returns (ra in hours, dec in degrees)
pub fn calculate_sun_ra_dec(time: chrono::DateTime<chrono::Utc>) -> (Hours, Degrees) {
    let n = calc_jd(time) - 2451545.0;

    let mean_longitude = modulo(280.460 + 0.985_647_4 * n, 360.);
    let mean_anomaly = deg_to_rad(modulo(357.528 + 0.985_600_3 * n, 360.));
    let ecliptic_longitude = deg_to_rad(
        mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2. * mean_anomaly).sin(),
    );
    let obliquity = deg_to_rad(23.439 - 0.000_000_4 * n);

    let ra = (obliquity.cos() * ecliptic_longitude.sin()).atan2(ecliptic_longitude.cos());
    let dec = (obliquity.sin() * ecliptic_longitude.sin()).asin();

    (modulo(rad_to_hours(ra), 24.), rad_to_deg(dec))
}

pub fn calculate_sun_altitude(
    time: chrono::DateTime<chrono::Utc>,
    latitude: Degrees,
    longitude: Degrees,
) -> Degrees {
    let (ra, dec) = calculate_sun_ra_dec(time);
    calculate_alt_from_ha_dec(calculate_hour_angle(time, longitude, ra), dec, latitude)
}

/// Smallest angle between two directions, in degrees
pub fn angular_distance(a: Degrees, b: Degrees) -> Degrees {
    let d = modulo(a - b, 360.);
    d.min(360. - d)
}

pub fn modulo(val: f64, base: f64) -> f64 {
    ((val % base) + base) % base
}

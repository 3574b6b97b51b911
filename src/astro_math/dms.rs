use super::Degrees;
use crate::util::CoordinateAxis;

/// A coordinate decomposed into degrees, minutes and seconds.
///
/// The sign lives on `degrees` only; `minutes` and `seconds` are magnitudes.
/// `degrees` is kept as a float so that `-0` survives for coordinates between
/// -1 and 0, and so that NaN can flow through untouched.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dms {
    /// Always integral (or NaN)
    pub degrees: f64,
    /// Always integral, 0 to 59 (or NaN)
    pub minutes: f64,
    /// Rounded to hundredths of an arcsecond
    pub seconds: f64,
}

impl Dms {
    pub fn degrees_text(&self) -> String {
        format!("{}", self.degrees)
    }

    pub fn minutes_text(&self) -> String {
        format!("{}", self.minutes)
    }

    pub fn seconds_text(&self) -> String {
        format!("{:.2}", self.seconds)
    }
}

fn round_hundredths(v: f64) -> f64 {
    (v * 100.).round() / 100.
}

/// Splits a decimal degree value into degrees, minutes and seconds.
///
/// No clamping is done here, the input is assumed to already be in range.
pub fn decimal_to_dms(decimal: Degrees) -> Dms {
    let sign = if decimal < 0. { -1. } else { 1. };
    let abs_decimal = decimal.abs();
    let degrees = abs_decimal.floor();
    let minutes_raw = (abs_decimal - degrees) * 60.;
    let minutes = minutes_raw.floor();
    let seconds = (minutes_raw - minutes) * 60.;

    Dms {
        degrees: sign * degrees,
        minutes,
        seconds: round_hundredths(seconds),
    }
}

/// Joins degrees, minutes and seconds back into decimal degrees, clamped to
/// the valid range of `axis`.
///
/// NaN in any component yields NaN; the clamp never hides it.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, axis: CoordinateAxis) -> Degrees {
    let sign = if degrees.is_sign_negative() { -1. } else { 1. };
    let decimal = sign * (degrees.abs() + minutes / 60. + seconds / 3600.);
    let limit = axis.limit();
    // f64::clamp propagates NaN, unlike f64::min/max
    decimal.clamp(-limit, limit)
}

use crate::astro_math::Degrees;
use serde::{Deserialize, Serialize};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateAxis {
    /// Positive North
    Latitude,
    /// Positive East
    Longitude,
}

impl CoordinateAxis {
    /// Largest magnitude a decimal coordinate on this axis may take
    pub fn limit(&self) -> Degrees {
        match self {
            CoordinateAxis::Latitude => 90.,
            CoordinateAxis::Longitude => 180.,
        }
    }
}

impl core::fmt::Display for CoordinateAxis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordinateAxis::Latitude => write!(f, "Latitude"),
            CoordinateAxis::Longitude => write!(f, "Longitude"),
        }
    }
}

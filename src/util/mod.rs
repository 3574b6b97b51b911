pub use enums::*;
pub use result::*;

pub use crate::astro_math::{Degrees, Hours};

mod enums;
mod result;

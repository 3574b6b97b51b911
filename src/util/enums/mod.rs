pub mod coordinate_axis;

pub use coordinate_axis::*;

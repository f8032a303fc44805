//! Character LCD support.

pub mod align;
pub mod geometry;
pub mod hd44780;

//! # Rendering Module
//!
//! Tileset slicing, camera handling and viewport planning, plus the macroquad
//! display that puts the result on screen.
//!
//! Everything except [`MacroquadDisplay`] works on CPU-side data and can run
//! without a window.

pub mod atlas;
pub mod camera;
pub mod display;
pub mod viewport;

pub use atlas::*;
pub use camera::*;
pub use display::*;
pub use viewport::*;

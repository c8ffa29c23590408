//! Interactive widgets whose state lives on the Rust side.

pub mod comparison_slider;
pub mod pointer_hub;

pub use comparison_slider::{ComparisonSlider, Region};
pub use pointer_hub::{PointerEvent, PointerHub, PointerSource};

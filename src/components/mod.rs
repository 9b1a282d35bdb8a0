//! Built-in UI components

pub mod carousel;

pub use carousel::{Carousel, SlideRole};

//! swivel - A minimalist, swipe-driven image carousel for terminals
//!
//! A single-widget UI library providing:
//! - Circular slide navigation with chevron controls and dot indicators
//! - Pointer swipe gestures with a configurable distance threshold
//! - Multi-backend image output (Kitty graphics, Sixel, Unicode blocks)
//! - Automatic color degradation for older terminals

pub mod component;
pub mod components;
pub mod context;
pub mod event;
pub mod gesture;
pub mod graphics;
pub mod layout;
pub mod render;
pub mod slide;
pub mod terminal;
pub mod theme;

// Re-export commonly used types
pub use component::Component;
pub use components::{Carousel, SlideRole};
pub use context::RenderContext;
pub use event::{Event, EventHandler, EventPoller, Key, MouseButton, MouseEvent};
pub use gesture::{Swipe, SwipeTracker, SWIPE_THRESHOLD};
pub use graphics::GraphicsBackend;
pub use layout::Rect;
pub use render::Renderer;
pub use slide::{Slide, SlideImage};
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{Color, Theme};

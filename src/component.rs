//! Component system - trait and lifecycle for UI elements

use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Core component trait for all UI elements
///
/// Components keep their own state between events; rendering happens fresh
/// each frame via the render() callback within the given bounds.
pub trait Component: EventHandler {
    /// Render the component into the given rectangle
    ///
    /// The context provides the theme and terminal capabilities.
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()>;

    /// Calculate minimum size needed for this component (optional)
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Mark component as needing redraw
    fn mark_dirty(&mut self) {}

    /// Check if component needs redraw
    fn is_dirty(&self) -> bool {
        true
    }

    /// Get component name for debugging
    fn name(&self) -> &str {
        "Component"
    }
}

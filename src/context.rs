//! Rendering context - theme and terminal capabilities for components

use crate::terminal::TerminalCapabilities;
use crate::theme::Theme;

/// Context passed down the component tree during rendering
#[derive(Clone)]
pub struct RenderContext<'a> {
    /// Current theme
    pub theme: &'a Theme,

    /// Capabilities of the output terminal
    pub capabilities: &'a TerminalCapabilities,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context from a theme
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext {
            theme,
            capabilities: theme.capabilities(),
        }
    }

    /// Create a child context with a different theme
    pub fn with_theme(&self, theme: &'a Theme) -> Self {
        RenderContext {
            theme,
            capabilities: theme.capabilities(),
        }
    }
}

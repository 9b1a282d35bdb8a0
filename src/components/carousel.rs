//! Image carousel component with circular navigation and swipe gestures
//!
//! Presents one slide as active at a time, with its immediate neighbors
//! given edge previews when the widget is wide enough. Navigation happens
//! through chevron controls, dot indicators, pointer swipes, the scroll
//! wheel, or the keyboard - every path wraps circularly.
//!
//! # Example
//!
//! ```ignore
//! let mut carousel = Carousel::new(slides)?;
//! carousel.set_focused(true);
//!
//! // In the event loop:
//! carousel.handle_event(&event);
//! carousel.render(&mut renderer, bounds, &ctx)?;
//! ```

use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key, MouseButton, MouseEvent};
use crate::gesture::{Swipe, SwipeTracker};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::slide::Slide;
use crate::terminal::CHAR_WIDTH_PX;
use anyhow::{bail, Result};
use std::collections::HashSet;

/// Width of each chevron hit zone in cells
const CHEVRON_ZONE_WIDTH: u16 = 3;

/// Minimum widget width before neighbor previews are shown
const PREVIEW_MIN_WIDTH: u16 = 48;

/// A slide's visual classification relative to the active slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideRole {
    /// The slide currently presented
    Active,
    /// Immediate left neighbor (wrapping)
    Previous,
    /// Immediate right neighbor (wrapping)
    Next,
    /// Everything else; not drawn
    Hidden,
}

/// What a pointer press landed on
enum PressTarget {
    Prev,
    Next,
    Dot(usize),
    Gesture,
    Miss,
}

/// Control zones computed from the widget bounds, used for hit-testing
#[derive(Debug, Clone)]
struct Zones {
    /// Full slide strip (gestures begin here)
    strip: Rect,
    /// Main area the active slide renders into
    main: Rect,
    /// Edge previews for the previous/next slides, when width allows
    left_preview: Option<Rect>,
    right_preview: Option<Rect>,
    /// Previous/next chevron controls
    prev: Rect,
    next: Rect,
    /// Call-to-action row
    cta: Rect,
    /// One zone per dot indicator
    dots: Vec<Rect>,
}

/// Image carousel over a fixed, non-empty deck of slides
#[derive(Debug)]
pub struct Carousel {
    /// The deck; supplied at construction, never mutated
    slides: Vec<Slide>,

    /// Index of the active slide, always in [0, len)
    active: usize,

    /// In-flight swipe gesture, if any
    swipe: SwipeTracker,

    /// Cached control zones from the last arrange() call
    zones: Option<Zones>,

    /// Whether this component receives keyboard input
    focused: bool,

    /// Whether the component needs redraw
    dirty: bool,
}

impl Carousel {
    /// Create a carousel over the given deck
    ///
    /// The deck must be non-empty and slide ids must be unique; both are
    /// construction-time contract violations, not runtime conditions.
    pub fn new(slides: Vec<Slide>) -> Result<Self> {
        if slides.is_empty() {
            bail!("carousel requires at least one slide");
        }

        let mut seen = HashSet::new();
        for slide in &slides {
            if !seen.insert(slide.id()) {
                bail!("duplicate slide id {}", slide.id());
            }
        }

        Ok(Carousel {
            slides,
            active: 0,
            swipe: SwipeTracker::new(),
            zones: None,
            focused: false,
            dirty: true,
        })
    }

    /// Preset the initial active slide, wrapping modulo the deck size
    pub fn with_active(mut self, index: usize) -> Self {
        self.active = index % self.slides.len();
        self
    }

    /// Override the swipe distance threshold
    pub fn with_swipe_threshold(mut self, threshold: i32) -> Self {
        self.swipe = SwipeTracker::with_threshold(threshold);
        self
    }

    /// Number of slides in the deck
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// A constructed carousel is never empty; this exists for API symmetry
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The deck
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Index of the active slide
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active slide
    pub fn active_slide(&self) -> &Slide {
        &self.slides[self.active]
    }

    /// Go to the previous slide (circular)
    pub fn go_previous(&mut self) {
        self.active = (self.active + self.slides.len() - 1) % self.slides.len();
        self.dirty = true;
    }

    /// Go to the next slide (circular)
    pub fn go_next(&mut self) {
        self.active = (self.active + 1) % self.slides.len();
        self.dirty = true;
    }

    /// Jump directly to a slide; returns whether the index was accepted
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.slides.len() {
            self.active = index;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    /// A slide's visual role relative to the active slide
    ///
    /// Checked in priority order - active, previous, next - so the result
    /// is deterministic even when the neighbor indices coincide (a deck of
    /// one is its own neighbor on both sides; in a deck of two the other
    /// slide reports Previous).
    pub fn role_of(&self, index: usize) -> SlideRole {
        let n = self.slides.len();

        if index == self.active {
            SlideRole::Active
        } else if index == (self.active + n - 1) % n {
            SlideRole::Previous
        } else if index == (self.active + 1) % n {
            SlideRole::Next
        } else {
            SlideRole::Hidden
        }
    }

    /// Set keyboard focus
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.dirty = true;
        }
    }

    /// Check if focused
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Compute control zones for the given widget bounds
    ///
    /// Called from render(); hosts may also call it directly so pointer
    /// hit-testing works before the first frame is drawn.
    pub fn arrange(&mut self, bounds: Rect) {
        // Bottom two rows: call-to-action, then dot indicators
        let (strip, tail) = bounds.split_horizontal(bounds.height.saturating_sub(2));
        let (cta, dots_row) = tail.split_horizontal(1);

        let (prev, after_prev) = strip.split_vertical(CHEVRON_ZONE_WIDTH);
        let (middle, next) =
            after_prev.split_vertical(after_prev.width.saturating_sub(CHEVRON_ZONE_WIDTH));

        // Neighbor previews only when there is room to spare
        let preview_width = if bounds.width >= PREVIEW_MIN_WIDTH {
            middle.width / 6
        } else {
            0
        };

        let (left_preview, rest) = middle.split_vertical(preview_width);
        let (main, right_preview) = rest.split_vertical(rest.width.saturating_sub(preview_width));

        // One dot per slide, one cell wide, one cell of spacing
        let dot_count = self.slides.len() as u16;
        let dots_span = dots_row.centered_row(dot_count * 2 - 1, 0);
        let dots = (0..dot_count)
            .map(|i| Rect::new(dots_span.x + i * 2, dots_span.y, 1, 1))
            .collect();

        self.zones = Some(Zones {
            strip,
            main,
            left_preview: (preview_width > 0).then_some(left_preview),
            right_preview: (preview_width > 0).then_some(right_preview),
            prev,
            next,
            cta,
            dots,
        });
    }

    /// Convert a pointer column to swipe units
    ///
    /// One cell maps to the geometry module's estimated character width in
    /// pixels, preserving the pixel-based swipe threshold.
    fn gesture_units(col: u16) -> i32 {
        col as i32 * CHAR_WIDTH_PX as i32
    }

    fn handle_press(&mut self, col: u16, row: u16) -> bool {
        match self.press_target(col, row) {
            PressTarget::Prev => {
                self.go_previous();
                true
            }
            PressTarget::Next => {
                self.go_next();
                true
            }
            PressTarget::Dot(index) => self.go_to(index),
            PressTarget::Gesture => {
                self.swipe.begin(Self::gesture_units(col));
                true
            }
            PressTarget::Miss => false,
        }
    }

    /// Classify a press against the cached control zones
    fn press_target(&self, col: u16, row: u16) -> PressTarget {
        let Some(zones) = &self.zones else {
            // Not arranged yet; still track the gesture
            return PressTarget::Gesture;
        };

        if zones.prev.contains(col, row) {
            PressTarget::Prev
        } else if zones.next.contains(col, row) {
            PressTarget::Next
        } else if let Some(hit) = zones.dots.iter().position(|zone| zone.contains(col, row)) {
            PressTarget::Dot(hit)
        } else if zones.strip.contains(col, row) {
            PressTarget::Gesture
        } else {
            PressTarget::Miss
        }
    }

    fn handle_release(&mut self) -> bool {
        match self.swipe.finish() {
            Some(Swipe::Left) => {
                self.go_next();
                true
            }
            Some(Swipe::Right) => {
                self.go_previous();
                true
            }
            None => false,
        }
    }

    fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Left | Key::Char('h') => {
                self.go_previous();
                true
            }
            Key::Right | Key::Char('l') => {
                self.go_next();
                true
            }
            Key::Home => self.go_to(0),
            Key::End => self.go_to(self.slides.len() - 1),
            Key::Char(c) if c.is_ascii_digit() && c != '0' => {
                let index = (c as u8 - b'1') as usize;
                self.go_to(index)
            }
            _ => false,
        }
    }
}

impl EventHandler for Carousel {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Mouse(mouse) => match *mouse {
                MouseEvent::Press(MouseButton::Left, col, row) => self.handle_press(col, row),
                MouseEvent::Drag(col, _) => {
                    if self.swipe.is_tracking() {
                        self.swipe.update(Self::gesture_units(col));
                        true
                    } else {
                        false
                    }
                }
                MouseEvent::Release(_, _) => self.handle_release(),
                MouseEvent::ScrollUp(_, _) => {
                    self.go_previous();
                    true
                }
                MouseEvent::ScrollDown(_, _) => {
                    self.go_next();
                    true
                }
                _ => false,
            },
            Event::Key(key) if self.focused => self.handle_key(*key),
            Event::Resize(_, _) => {
                // Zones are stale until the next arrange()
                self.zones = None;
                self.dirty = true;
                false
            }
            _ => false,
        }
    }

    fn on_focus(&mut self) {
        self.set_focused(true);
    }

    fn on_blur(&mut self) {
        self.set_focused(false);
    }
}

impl Component for Carousel {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.arrange(bounds);
        let Some(zones) = self.zones.clone() else {
            return Ok(());
        };

        // Slides by role: active fills the main area, neighbors get edge
        // previews, hidden slides are not drawn
        for index in 0..self.slides.len() {
            let target = match self.role_of(index) {
                SlideRole::Active => Some(zones.main.inner(1)),
                SlideRole::Previous => zones.left_preview.map(|r| r.inner(1)),
                SlideRole::Next => zones.right_preview.map(|r| r.inner(1)),
                SlideRole::Hidden => None,
            };

            let Some(target) = target else { continue };
            if target.width == 0 || target.height == 0 {
                continue;
            }

            let image = self.slides[index].image();
            let (width, height) = image.dimensions();
            let pixels = image.to_rgb()?;
            renderer.render_image(
                &pixels,
                width,
                height,
                target.x,
                target.y,
                (target.width, target.height),
            )?;
        }

        draw_frame(renderer, zones.main, ctx)?;

        // Chevron controls, vertically centered in the strip
        let chevron_row = zones.strip.y + zones.strip.height / 2;
        let style = ctx.theme.chevron_style();
        renderer.move_cursor(zones.prev.x + zones.prev.width / 2, chevron_row)?;
        renderer.write_styled("❮", &style)?;
        renderer.move_cursor(zones.next.x + zones.next.width / 2, chevron_row)?;
        renderer.write_styled("❯", &style)?;

        // Call-to-action for the active slide, truncated to its row
        let label = self.slides[self.active].cta_label();
        let padded: String = format!(" {} ", label)
            .chars()
            .take(zones.cta.width as usize)
            .collect();
        let cta = zones.cta.centered_row(padded.chars().count() as u16, 0);
        renderer.move_cursor(cta.x, cta.y)?;
        renderer.write_styled(&padded, &ctx.theme.cta_style())?;

        // Dot indicators
        for (index, zone) in zones.dots.iter().enumerate() {
            let active = index == self.active;
            renderer.move_cursor(zone.x, zone.y)?;
            renderer.write_styled(
                if active { "●" } else { "○" },
                &ctx.theme.indicator_style(active),
            )?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        // Chevrons, one content cell, and the two control rows
        (CHEVRON_ZONE_WIDTH * 2 + 1, 3)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Carousel"
    }
}

/// Draw the border frame around the main slide area
fn draw_frame(renderer: &mut Renderer, area: Rect, ctx: &RenderContext) -> Result<()> {
    if area.width < 2 || area.height < 2 {
        return Ok(());
    }

    let chars = ctx.theme.border_chars();
    let style = ctx.theme.border_style_code();
    let inner_width = (area.width - 2) as usize;

    renderer.move_cursor(area.x, area.y)?;
    renderer.write_text(&style)?;
    renderer.write_text(&chars.top_left.to_string())?;
    renderer.write_repeated(chars.horizontal, inner_width)?;
    renderer.write_text(&chars.top_right.to_string())?;

    for y in (area.y + 1)..(area.bottom() - 1) {
        renderer.move_cursor(area.x, y)?;
        renderer.write_text(&chars.vertical.to_string())?;
        renderer.move_cursor(area.right() - 1, y)?;
        renderer.write_text(&chars.vertical.to_string())?;
    }

    renderer.move_cursor(area.x, area.bottom() - 1)?;
    renderer.write_text(&chars.bottom_left.to_string())?;
    renderer.write_repeated(chars.horizontal, inner_width)?;
    renderer.write_text(&chars.bottom_right.to_string())?;
    renderer.write_text("\x1b[0m")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideImage;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    fn deck(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| {
                Slide::new(
                    i as u32 + 1,
                    SlideImage::from_rgb(vec![128, 128, 128], 1, 1),
                    "Explore Now",
                    "#",
                )
            })
            .collect()
    }

    fn carousel(n: usize) -> Carousel {
        Carousel::new(deck(n)).unwrap()
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(Carousel::new(Vec::new()).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut slides = deck(2);
        slides.push(Slide::new(
            1,
            SlideImage::from_rgb(vec![0, 0, 0], 1, 1),
            "Explore Now",
            "#",
        ));
        assert!(Carousel::new(slides).is_err());
    }

    #[test]
    fn test_wraparound_previous() {
        let mut c = carousel(3);
        c.go_previous();
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_wraparound_next() {
        let mut c = carousel(3).with_active(2);
        c.go_next();
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut c = carousel(3);
        let mut visited = Vec::new();
        for _ in 0..3 {
            c.go_next();
            visited.push(c.active_index());
        }
        assert_eq!(visited, vec![1, 2, 0]);
    }

    #[test]
    fn test_next_then_previous_round_trips() {
        for n in 1..=5 {
            for start in 0..n {
                let mut c = carousel(n).with_active(start);
                c.go_next();
                c.go_previous();
                assert_eq!(c.active_index(), start, "deck of {} from {}", n, start);
            }
        }
    }

    #[test]
    fn test_go_to() {
        let mut c = carousel(4);
        assert!(c.go_to(2));
        assert_eq!(c.active_index(), 2);

        assert!(!c.go_to(4));
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_with_active_wraps() {
        let c = carousel(3).with_active(7);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_roles_three_slides() {
        let c = carousel(4).with_active(1);
        assert_eq!(c.role_of(1), SlideRole::Active);
        assert_eq!(c.role_of(0), SlideRole::Previous);
        assert_eq!(c.role_of(2), SlideRole::Next);
        assert_eq!(c.role_of(3), SlideRole::Hidden);
    }

    #[test]
    fn test_roles_wrap_at_edges() {
        let c = carousel(3);
        assert_eq!(c.role_of(0), SlideRole::Active);
        assert_eq!(c.role_of(2), SlideRole::Previous);
        assert_eq!(c.role_of(1), SlideRole::Next);
    }

    #[test]
    fn test_role_priority_single_slide() {
        // The sole slide is its own neighbor on both sides; active wins
        let c = carousel(1);
        assert_eq!(c.role_of(0), SlideRole::Active);
    }

    #[test]
    fn test_role_priority_two_slides() {
        // The other slide is both previous and next; previous wins
        let c = carousel(2);
        assert_eq!(c.role_of(1), SlideRole::Previous);
    }

    #[test]
    fn test_roles_total_and_exclusive() {
        for n in 1..=6 {
            for active in 0..n {
                let c = carousel(n).with_active(active);
                let active_count = (0..n)
                    .filter(|&i| c.role_of(i) == SlideRole::Active)
                    .count();
                assert_eq!(active_count, 1, "deck of {} active {}", n, active);
            }
        }
    }

    #[test]
    fn test_swipe_left_advances() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));

        c.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 40, 10)));
        c.handle_event(&Event::Mouse(MouseEvent::Drag(20, 10)));
        c.handle_event(&Event::Mouse(MouseEvent::Release(20, 10)));

        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));

        c.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 20, 10)));
        c.handle_event(&Event::Mouse(MouseEvent::Drag(40, 10)));
        c.handle_event(&Event::Mouse(MouseEvent::Release(40, 10)));

        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_short_drag_does_not_navigate() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));

        // Three cells is 30 units, below the 50-unit threshold
        c.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 40, 10)));
        c.handle_event(&Event::Mouse(MouseEvent::Drag(37, 10)));
        c.handle_event(&Event::Mouse(MouseEvent::Release(37, 10)));

        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_press_release_without_drag() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));

        c.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 40, 10)));
        c.handle_event(&Event::Mouse(MouseEvent::Release(40, 10)));

        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));

        assert!(!c.handle_event(&Event::Mouse(MouseEvent::Release(40, 10))));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_chevron_clicks() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));

        c.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 1, 10)));
        assert_eq!(c.active_index(), 2);

        c.handle_event(&Event::Mouse(MouseEvent::Press(MouseButton::Left, 78, 10)));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_dot_click_jumps() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));

        let zone = {
            let zones = c.zones.as_ref().unwrap();
            zones.dots[2]
        };
        c.handle_event(&Event::Mouse(MouseEvent::Press(
            MouseButton::Left,
            zone.x,
            zone.y,
        )));

        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_scroll_wheel_navigates() {
        let mut c = carousel(3);
        c.handle_event(&Event::Mouse(MouseEvent::ScrollDown(10, 10)));
        assert_eq!(c.active_index(), 1);

        c.handle_event(&Event::Mouse(MouseEvent::ScrollUp(10, 10)));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_keys_require_focus() {
        let mut c = carousel(3);
        assert!(!c.handle_event(&Event::Key(Key::Right)));
        assert_eq!(c.active_index(), 0);

        c.set_focused(true);
        assert!(c.handle_event(&Event::Key(Key::Right)));
        assert_eq!(c.active_index(), 1);

        assert!(c.handle_event(&Event::Key(Key::Char('h'))));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_digit_keys_jump() {
        let mut c = carousel(3);
        c.set_focused(true);

        assert!(c.handle_event(&Event::Key(Key::Char('3'))));
        assert_eq!(c.active_index(), 2);

        // Out of range digits are ignored
        assert!(!c.handle_event(&Event::Key(Key::Char('9'))));
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_resize_invalidates_zones() {
        let mut c = carousel(3);
        c.arrange(Rect::new(0, 0, 80, 24));
        assert!(c.zones.is_some());

        c.handle_event(&Event::Resize(100, 30));
        assert!(c.zones.is_none());
    }

    #[test]
    fn test_render_headless() {
        let mut c = carousel(3);
        let mut renderer = Renderer::headless();
        let theme = Theme::new(TerminalCapabilities::detect());
        let ctx = RenderContext::new(&theme);

        c.render(&mut renderer, Rect::new(0, 0, 80, 24), &ctx)
            .unwrap();
        assert!(!c.is_dirty());
    }

    #[test]
    fn test_render_tiny_bounds() {
        // Degenerate bounds must not panic or error
        let mut c = carousel(2);
        let mut renderer = Renderer::headless();
        let theme = Theme::new(TerminalCapabilities::detect());
        let ctx = RenderContext::new(&theme);

        c.render(&mut renderer, Rect::new(0, 0, 4, 2), &ctx).unwrap();
    }
}

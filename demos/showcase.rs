//! Showcase demo - a three-slide image carousel
//!
//! Controls:
//! - Left/Right or h/l: previous/next slide
//! - 1-3: jump to a slide
//! - Mouse: click the chevrons or dots, or drag horizontally to swipe
//! - Scroll wheel: navigate
//! - q/Esc: quit

use anyhow::Result;
use swivel::{
    Carousel, Component, Event, EventHandler, EventPoller, Key, Rect, RenderContext, Renderer,
    Slide, SlideImage, Theme,
};

/// Pixel size of the generated slide images
const SLIDE_WIDTH: u32 = 320;
const SLIDE_HEIGHT: u32 = 200;

/// Generate a vertical gradient as raw RGB pixels
fn gradient(top: (u8, u8, u8), bottom: (u8, u8, u8)) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((SLIDE_WIDTH * SLIDE_HEIGHT * 3) as usize);

    for y in 0..SLIDE_HEIGHT {
        let t = y as f32 / (SLIDE_HEIGHT - 1) as f32;
        let r = top.0 as f32 + (bottom.0 as f32 - top.0 as f32) * t;
        let g = top.1 as f32 + (bottom.1 as f32 - top.1 as f32) * t;
        let b = top.2 as f32 + (bottom.2 as f32 - top.2 as f32) * t;

        for _ in 0..SLIDE_WIDTH {
            pixels.push(r as u8);
            pixels.push(g as u8);
            pixels.push(b as u8);
        }
    }

    pixels
}

fn demo_slides() -> Vec<Slide> {
    let mountain = gradient((120, 160, 220), (40, 60, 90));
    let beach = gradient((250, 210, 140), (30, 120, 160));
    let forest = gradient((180, 220, 170), (20, 70, 40));

    vec![
        Slide::new(
            1,
            SlideImage::from_rgb(mountain, SLIDE_WIDTH, SLIDE_HEIGHT),
            "Explore Now",
            "#",
        ),
        Slide::new(
            2,
            SlideImage::from_rgb(beach, SLIDE_WIDTH, SLIDE_HEIGHT),
            "Explore Now",
            "#",
        ),
        Slide::new(
            3,
            SlideImage::from_rgb(forest, SLIDE_WIDTH, SLIDE_HEIGHT),
            "Explore Now",
            "#",
        ),
    ]
}

fn main() -> Result<()> {
    let mut renderer = Renderer::new()?;
    let backend = renderer.graphics_backend();

    renderer.enter_alt_screen()?;
    renderer.hide_cursor()?;

    let events = EventPoller::new()?;

    let theme = Theme::new(renderer.context().capabilities);
    let mut carousel = Carousel::new(demo_slides())?;
    carousel.set_focused(true);

    loop {
        let (cols, rows) = renderer.context().char_dimensions();

        renderer.begin_frame()?;
        renderer.clear()?;

        // Carousel fills the screen above the status line
        let bounds = Rect::new(0, 0, cols, rows.saturating_sub(1));
        let ctx = RenderContext::new(&theme);
        carousel.render(&mut renderer, bounds, &ctx)?;

        // Status line
        renderer.move_cursor(0, rows.saturating_sub(1))?;
        let status_left = format!(" {} ", backend.name());
        let status_right = format!(
            " Slide {}/{} | [h/l] Navigate  [drag] Swipe  [q] Quit ",
            carousel.active_index() + 1,
            carousel.len()
        );
        let gap = (cols as usize).saturating_sub(status_left.len() + status_right.len());
        renderer.write_styled(
            &format!("{}{}{}", status_left, " ".repeat(gap), status_right),
            &theme.status_style(),
        )?;

        renderer.end_frame()?;

        // Block until the next input event
        match events.read()? {
            Event::Key(Key::Char('q')) | Event::Key(Key::Esc) | Event::Key(Key::Ctrl('c')) => {
                break;
            }
            Event::Resize(new_cols, new_rows) => {
                renderer.refresh_geometry()?;
                carousel.handle_event(&Event::Resize(new_cols, new_rows));
            }
            event => {
                carousel.handle_event(&event);
            }
        }
    }

    renderer.clear_images()?;
    renderer.exit_alt_screen()?;
    renderer.show_cursor()?;

    println!("Showcase closed.");
    Ok(())
}

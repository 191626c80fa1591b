//! # swcomp: the software compositor
//!
//! This subsystem owns the output window and its backing surface.
//! Each frame it reads the desktop back out and composites it in
//! software: the gray fill, the background image centered (scaled
//! down if the window is smaller than it), and then every view from
//! the bottom of the stack to the top.

// Austin Shafer - 2024
extern crate image;
extern crate sdl2;

use crate::squall::desktop::view::{Role, View, TITLEBAR_HEIGHT};
use crate::squall::desktop::Desktop;
use utils::{anyhow, log, partial_max, partial_min, Context, Result};

use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect as SdlRect;
use sdl2::surface::{Surface, SurfaceRef};
use sdl2::video::Window;

/// Desktop gray, the fill behind everything else
const BACKGROUND_GRAY: sdl2::pixels::Color = sdl2::pixels::Color::RGB(0xde, 0xde, 0xde);
const BORDER_COLOR: sdl2::pixels::Color = sdl2::pixels::Color::RGB(0x20, 0x20, 0x20);

const OUTPUT_WIDTH: u32 = 1280;
const OUTPUT_HEIGHT: u32 = 720;

pub struct Output {
    o_window: Window,
    /// decoded background image, blitted centered each frame
    o_background: Option<Surface<'static>>,
}

impl Output {
    pub fn new(video: &sdl2::VideoSubsystem, background: Option<&str>) -> Result<Output> {
        let window = video
            .window("squall", OUTPUT_WIDTH, OUTPUT_HEIGHT)
            .resizable()
            .position_centered()
            .build()
            .context("Could not create the output window")?;

        let background = match background {
            Some(path) => Some(Self::load_background(path)?),
            None => None,
        };

        log::debug!("created output window {:?}", window.size());
        Ok(Output {
            o_window: window,
            o_background: background,
        })
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.o_window.size()
    }

    /// Decode an image file into a surface we can blit from
    fn load_background(path: &str) -> Result<Surface<'static>> {
        let img = image::open(path)
            .with_context(|| format!("Could not open background image {}", path))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();

        let mut surf = Surface::new(width, height, PixelFormatEnum::ABGR8888)
            .map_err(|e| anyhow!("Could not create background surface: {}", e))?;
        // The surface's rows may be padded, so copy row by row
        let pitch = surf.pitch() as usize;
        let row_len = width as usize * 4;
        surf.with_lock_mut(|buf: &mut [u8]| {
            for row in 0..height as usize {
                buf[row * pitch..row * pitch + row_len]
                    .copy_from_slice(&pixels[row * row_len..(row + 1) * row_len]);
            }
        });

        return Ok(surf);
    }

    /// Composite the desktop onto the window's backing surface
    ///
    /// The surface is fetched at the window's current size, so resizes
    /// are picked up by simply rendering again.
    pub fn render(&self, pump: &sdl2::EventPump, desktop: &Desktop) -> Result<()> {
        let mut screen = self
            .o_window
            .surface(pump)
            .map_err(|e| anyhow!("Could not get the window surface: {}", e))?;

        self.draw_background(&mut screen)?;
        for view in desktop.views() {
            Self::draw_view(&mut screen, view)?;
        }

        screen
            .update_window()
            .map_err(|e| anyhow!("Could not present the window surface: {}", e))?;
        return Ok(());
    }

    fn draw_background(&self, screen: &mut SurfaceRef) -> Result<()> {
        let (sw, sh) = screen.size();
        screen
            .fill_rect(None, BACKGROUND_GRAY)
            .map_err(|e| anyhow!("Could not fill the background: {}", e))?;

        let bg = match self.o_background.as_ref() {
            Some(bg) => bg,
            None => return Ok(()),
        };

        // center the image, scaling it down if the window is smaller
        // than it in either dimension
        let (bw, bh) = bg.size();
        let scale = partial_min(
            partial_min(sw as f32 / bw as f32, sh as f32 / bh as f32),
            1.0,
        );
        let dw = partial_max((bw as f32 * scale) as u32, 1);
        let dh = partial_max((bh as f32 * scale) as u32, 1);
        let dst = SdlRect::new(
            (sw as i32 - dw as i32) / 2,
            (sh as i32 - dh as i32) / 2,
            dw,
            dh,
        );

        let res = if scale < 1.0 {
            bg.blit_scaled(None, screen, dst)
        } else {
            bg.blit(None, screen, dst)
        };
        res.map_err(|e| anyhow!("Could not blit the background: {}", e))?;
        return Ok(());
    }

    fn draw_view(screen: &mut SurfaceRef, view: &View) -> Result<()> {
        let (x, y) = (view.v_pos.0 as i32, view.v_pos.1 as i32);
        let w = partial_max(view.v_size.0, 1.0) as u32;
        let h = partial_max(view.v_size.1, 1.0) as u32;
        let (r, g, b) = view.v_color.as_rgb8();

        let border = SdlRect::new(x - 1, y - 1, w + 2, h + 2);
        screen
            .fill_rect(border, BORDER_COLOR)
            .map_err(|e| anyhow!("Could not draw view {}: {}", view.v_id, e))?;

        let body = SdlRect::new(x, y, w, h);
        screen
            .fill_rect(body, sdl2::pixels::Color::RGB(r, g, b))
            .map_err(|e| anyhow!("Could not draw view {}: {}", view.v_id, e))?;

        // server side decorations, just a darker strip
        if view.v_role == Role::toplevel && h > TITLEBAR_HEIGHT as u32 {
            let bar = SdlRect::new(x, y, w, TITLEBAR_HEIGHT as u32);
            let dim = |c: u8| (c as f32 * 0.6) as u8;
            screen
                .fill_rect(bar, sdl2::pixels::Color::RGB(dim(r), dim(g), dim(b)))
                .map_err(|e| anyhow!("Could not draw view {}: {}", view.v_id, e))?;
        }

        return Ok(());
    }
}

//! Canvas 2D renderer (web)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{BACKGROUND_COLOR, frame_tiles};
use super::{Frame, Renderer};
use crate::platform::ViewportSizeProvider;

/// Glow radius of tiles (px)
const GLOW_BLUR: f64 = 15.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap a canvas; None if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the grid so tiles land on whole pixels
    fn fit_to(&self, frame: &Frame<'_>) {
        let (w, h) = frame.grid.pixel_size(frame.tile_size);
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
    }
}

impl ViewportSizeProvider for CanvasRenderer {
    /// The canvas container's box, or the canvas itself when detached
    fn viewport_size(&self) -> (u32, u32) {
        match self.canvas.parent_element() {
            Some(parent) => (
                parent.client_width().max(0) as u32,
                parent.client_height().max(0) as u32,
            ),
            None => (self.canvas.width(), self.canvas.height()),
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.fit_to(frame);
        let ctx = &self.ctx;
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);

        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style_str(BACKGROUND_COLOR);
        ctx.fill_rect(0.0, 0.0, w, h);

        for tile in frame_tiles(frame) {
            ctx.set_fill_style_str(tile.color);
            ctx.set_shadow_blur(GLOW_BLUR);
            ctx.set_shadow_color(tile.glow);
            ctx.fill_rect(tile.x, tile.y, tile.size, tile.size);
        }
        ctx.set_shadow_blur(0.0);
    }
}

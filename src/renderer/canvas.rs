//! Canvas 2D backend for the `Renderer` capability

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::Renderer;
use crate::consts::SCORE_FONT;

pub struct Canvas2dRenderer {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_font(SCORE_FONT);
        Self { ctx }
    }
}

impl Renderer for Canvas2dRenderer {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, fill: &str) {
        self.ctx.begin_path();
        // Only fails for a negative radius
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("Canvas arc failed: {:?}", e);
        }
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn draw_rect(&mut self, top_left: Vec2, width: f32, height: f32, fill: &str, stroke: &str) {
        self.ctx.begin_path();
        self.ctx
            .rect(top_left.x as f64, top_left.y as f64, width as f64, height as f64);
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.stroke();
        self.ctx.close_path();
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, fill: &str) {
        self.ctx.set_fill_style_str(fill);
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("Canvas fill_text failed: {:?}", e);
        }
    }
}

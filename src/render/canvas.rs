use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::math::Vec2;
use super::palette::Rgb;
use super::surface::{StrokeStyle, Surface};

/// CSS class the page styles to hide the hero canvas
const HIDDEN_CLASS: &str = "tree-hidden";

/// Drawing surface backed by a 2D canvas context.
///
/// The backing store is sized in device pixels while the element's layout
/// size stays in CSS pixels; all draw coordinates are CSS pixels.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "failed to get 2d context".to_string())?
            .ok_or_else(|| "canvas does not support 2d rendering".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "2d context has an unexpected type".to_string())?;

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        Ok(Self {
            canvas,
            ctx,
            width,
            height,
        })
    }

    /// Match the backing store to the layout size and device pixel ratio
    pub fn fit(&mut self, width: f32, height: f32, dpr: f32) -> Result<(), String> {
        let dpr = dpr.max(1.0);
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", width))
            .map_err(|_| "failed to set canvas width style".to_string())?;
        style
            .set_property("height", &format!("{}px", height))
            .map_err(|_| "failed to set canvas height style".to_string())?;

        self.canvas.set_width((width * dpr) as u32);
        self.canvas.set_height((height * dpr) as u32);
        self.ctx
            .set_transform(dpr as f64, 0.0, 0.0, dpr as f64, 0.0, 0.0)
            .map_err(|_| "failed to apply pixel-ratio transform".to_string())?;

        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Toggle the CSS class that hides the canvas while suspended
    pub fn set_hidden(&self, hidden: bool) {
        let _ = self.canvas.class_list().toggle_with_force(HIDDEN_CLASS, hidden);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, style: StrokeStyle) {
        let ctx = &self.ctx;
        let css = style.color.to_css();

        ctx.save();
        ctx.set_line_cap("round");
        ctx.set_line_width(style.width as f64);
        ctx.set_stroke_style_str(&css);
        ctx.set_shadow_color(&css);
        ctx.set_shadow_blur(style.glow as f64);
        ctx.set_global_alpha(style.alpha as f64);

        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
        ctx.restore();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, alpha: f32) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_fill_style_str(&color.to_css_with_alpha(alpha));
        ctx.fill_rect(x as f64, y as f64, width as f64, height as f64);
        ctx.restore();
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}

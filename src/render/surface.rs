use serde::Serialize;
use crate::math::Vec2;
use super::palette::Rgb;

/// Stroke appearance for a single segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub width: f32,
    pub alpha: f32,
    /// Shadow blur radius; 0 disables the glow
    pub glow: f32,
}

/// Immediate-mode contract the renderer draws against.
///
/// Implementations: [`super::CanvasSurface`] over a 2D canvas context and
/// [`RecordingSurface`] for tests and replay.
pub trait Surface {
    /// Logical size in CSS pixels
    fn size(&self) -> (f32, f32);

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, style: StrokeStyle);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, alpha: f32);

    /// Hard clear of the whole surface
    fn clear(&mut self);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Segment {
        from: Vec2,
        to: Vec2,
        style: StrokeStyle,
    },
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        alpha: f32,
    },
    Clear,
}

/// Surface that records draw calls instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = (&Vec2, &Vec2, &StrokeStyle)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Segment { from, to, style } => Some((from, to, style)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, style: StrokeStyle) {
        self.ops.push(DrawOp::Segment { from, to, style });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, alpha: f32) {
        self.ops.push(DrawOp::Fill {
            x,
            y,
            width,
            height,
            color,
            alpha,
        });
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_preserves_order() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        surface.fill_rect(0.0, 0.0, 800.0, 600.0, Rgb::new(6, 9, 15), 0.08);
        surface.stroke_segment(
            Vec2::ZERO,
            Vec2::new(1.0, 1.0),
            StrokeStyle {
                color: Rgb::new(255, 0, 0),
                width: 2.0,
                alpha: 0.9,
                glow: 12.0,
            },
        );
        surface.clear();

        assert_eq!(surface.ops.len(), 3);
        assert!(matches!(surface.ops[0], DrawOp::Fill { .. }));
        assert!(matches!(surface.ops[1], DrawOp::Segment { .. }));
        assert!(matches!(surface.ops[2], DrawOp::Clear));
        assert_eq!(surface.segments().count(), 1);
    }

    #[test]
    fn test_ops_serialize_for_replay() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.stroke_segment(
            Vec2::ZERO,
            Vec2::new(0.0, -10.0),
            StrokeStyle {
                color: Rgb::new(94, 160, 255),
                width: 1.0,
                alpha: 1.0,
                glow: 0.0,
            },
        );
        let yaml = serde_yaml::to_string(&surface.ops).unwrap();
        assert!(yaml.contains("Segment"));
        assert!(yaml.contains("#5ea0ff"));
    }
}

use crate::config::TreeConfig;
use crate::growth::{sway, GrowthArena, NodeId};
use crate::math::Vec2;
use super::palette::{color_by_depth, Rgb};
use super::surface::{StrokeStyle, Surface};

const BRANCH_ALPHA: f32 = 0.9;
/// Fraction of the trunk stroke width lost by the deepest branches
const TIP_WIDTH_FALLOFF: f32 = 0.5;
const TRAIL_COLOR: Rgb = Rgb::new(6, 9, 15);
const GROUND_COLOR: Rgb = Rgb::new(94, 160, 255);
const GROUND_ALPHA: f32 = 0.15;
const GROUND_OFFSET: f32 = 2.0;

/// Partial-alpha background refill that leaves a motion trail
pub fn clear_with_trail<S: Surface>(surface: &mut S, cfg: &TreeConfig) {
    let (width, height) = surface.size();
    surface.fill_rect(0.0, 0.0, width, height, TRAIL_COLOR, cfg.background_fade);
}

/// Static reference line the trunk grows from
pub fn draw_ground_line<S: Surface>(surface: &mut S, ground_y: f32) {
    let (width, _) = surface.size();
    let y = ground_y + GROUND_OFFSET;
    surface.stroke_segment(
        Vec2::new(0.0, y),
        Vec2::new(width, y),
        StrokeStyle {
            color: GROUND_COLOR,
            width: 1.0,
            alpha: GROUND_ALPHA,
            glow: 0.0,
        },
    );
}

/// Draw a node and then its children; parents sit visually beneath their
/// children purely through draw order.
pub fn render_tree<S: Surface>(
    arena: &GrowthArena,
    id: NodeId,
    surface: &mut S,
    now_secs: f64,
    cfg: &TreeConfig,
) {
    let node = arena.node(id);
    let angle = node.base_angle + sway(node.seed, node.depth, cfg.max_depth, now_secs, cfg);
    let end = node.origin + Vec2::from_bearing(angle).scale(node.length * node.progress);

    let depth_t = node.depth as f32 / cfg.max_depth.max(1) as f32;
    surface.stroke_segment(
        node.origin,
        end,
        StrokeStyle {
            color: color_by_depth(&cfg.palette, node.depth, cfg.max_depth),
            width: cfg.line_width * (1.0 - TIP_WIDTH_FALLOFF * depth_t),
            alpha: BRANCH_ALPHA,
            glow: cfg.glow,
        },
    );

    if let Some([left, right]) = node.children {
        render_tree(arena, left, surface, now_secs, cfg);
        render_tree(arena, right, surface, now_secs, cfg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::{advance, Lcg};
    use crate::render::{DrawOp, RecordingSurface};
    use std::f32::consts::FRAC_PI_2;

    fn grown_tree(cfg: &TreeConfig) -> (GrowthArena, NodeId) {
        let mut arena = GrowthArena::new();
        let root = arena.add_root(Vec2::new(400.0, 500.0), FRAC_PI_2, 100.0, 2.0);
        let mut rng = Lcg::new(9);
        while advance(&mut arena, root, cfg, &mut rng) {}
        (arena, root)
    }

    #[test]
    fn test_partial_progress_scales_endpoint() {
        let cfg = TreeConfig::default();
        let mut arena = GrowthArena::new();
        let root = arena.add_root(Vec2::new(0.0, 0.0), FRAC_PI_2, 100.0, 0.0);
        arena.node_mut(root).progress = 0.25;

        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_tree(&arena, root, &mut surface, 0.0, &cfg);

        let (from, to, _) = surface.segments().next().unwrap();
        assert_eq!(*from, Vec2::new(0.0, 0.0));
        assert!(to.x.abs() < 1e-3);
        assert!((to.y + 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_parent_drawn_before_children() {
        let cfg = TreeConfig {
            max_depth: 2,
            growth_increment: 1.0,
            ..TreeConfig::default()
        };
        let (arena, root) = grown_tree(&cfg);

        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_tree(&arena, root, &mut surface, 0.0, &cfg);

        let widths: Vec<f32> = surface.segments().map(|(_, _, s)| s.width).collect();
        assert_eq!(widths.len(), 7);
        assert_eq!(widths[0], cfg.line_width);
        assert!(widths.iter().skip(1).all(|w| *w < widths[0]));
    }

    #[test]
    fn test_stroke_width_tapers_with_depth() {
        let cfg = TreeConfig {
            max_depth: 4,
            growth_increment: 1.0,
            ..TreeConfig::default()
        };
        let (arena, root) = grown_tree(&cfg);

        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_tree(&arena, root, &mut surface, 0.0, &cfg);

        let widths: Vec<f32> = surface.segments().map(|(_, _, s)| s.width).collect();
        let min = widths.iter().cloned().fold(f32::MAX, f32::min);
        assert_eq!(widths[0], cfg.line_width);
        assert!((min - cfg.line_width * (1.0 - TIP_WIDTH_FALLOFF)).abs() < 1e-4);
    }

    #[test]
    fn test_depth_colors_span_palette() {
        let cfg = TreeConfig {
            max_depth: 2,
            growth_increment: 1.0,
            ..TreeConfig::default()
        };
        let (arena, root) = grown_tree(&cfg);

        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_tree(&arena, root, &mut surface, 0.0, &cfg);

        let colors: Vec<Rgb> = surface.segments().map(|(_, _, s)| s.color).collect();
        assert_eq!(colors[0], cfg.palette[0]);
        assert_eq!(*colors.last().unwrap(), *cfg.palette.last().unwrap());
    }

    #[test]
    fn test_sway_deflects_rendered_endpoint_only() {
        let cfg = TreeConfig {
            sway_amplitude: 0.1,
            sway_frequency: 2.0,
            ..TreeConfig::default()
        };
        let mut arena = GrowthArena::new();
        let root = arena.add_root(Vec2::new(0.0, 0.0), FRAC_PI_2, 100.0, 1.0);
        arena.node_mut(root).progress = 1.0;

        let render_at = |now: f64| {
            let mut surface = RecordingSurface::new(800.0, 600.0);
            render_tree(&arena, root, &mut surface, now, &cfg);
            let (_, to, _) = surface.segments().next().unwrap();
            *to
        };

        let a = render_at(0.1);
        let b = render_at(0.9);
        assert!(a.distance(&b) > 1e-3);
        assert!(arena.node(root).anchor().distance(&Vec2::new(0.0, -100.0)) < 1e-3);
    }

    #[test]
    fn test_trail_and_ground_use_expected_styles() {
        let cfg = TreeConfig::default();
        let mut surface = RecordingSurface::new(800.0, 600.0);

        clear_with_trail(&mut surface, &cfg);
        draw_ground_line(&mut surface, 510.0);

        match &surface.ops[0] {
            DrawOp::Fill {
                width,
                height,
                color,
                alpha,
                ..
            } => {
                assert_eq!(*width, 800.0);
                assert_eq!(*height, 600.0);
                assert_eq!(*color, TRAIL_COLOR);
                assert!((alpha - cfg.background_fade).abs() < 1e-6);
            }
            op => panic!("expected trail fill, got {:?}", op),
        }

        match &surface.ops[1] {
            DrawOp::Segment { from, to, style } => {
                assert_eq!(from.y, 512.0);
                assert_eq!(to.y, 512.0);
                assert_eq!(to.x, 800.0);
                assert_eq!(style.glow, 0.0);
                assert!((style.alpha - GROUND_ALPHA).abs() < 1e-6);
            }
            op => panic!("expected ground segment, got {:?}", op),
        }
    }
}

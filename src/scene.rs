use std::f32::consts::FRAC_PI_2;

use crate::config::TreeConfig;
use crate::growth::{advance, GrowthArena, Lcg, NodeId};
use crate::math::Vec2;
use crate::render::{clear_with_trail, draw_ground_line, render_tree, Surface};

/// Last known layout rectangle of the drawing surface, CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Distance between the trunk baseline and the bottom edge
const FOOTER_MARGIN: f32 = 90.0;
const SCALE_REFERENCE: f32 = 900.0;
const SCALE_GAIN: f32 = 1.18;
const SCALE_MIN: f32 = 0.9;
const SCALE_MAX: f32 = 1.3;
const NARROW_BREAKPOINT: f32 = 768.0;
const NARROW_FACTOR: f32 = 0.9;
/// Root seeds are drawn from [0, ROOT_SEED_SPAN)
const ROOT_SEED_SPAN: f64 = 10.0;

/// The growing tree plus everything needed to rebuild it: viewport, root
/// seed, jitter RNG, and the too-small-to-animate flag.
pub struct Scene {
    cfg: TreeConfig,
    arena: GrowthArena,
    viewport: Viewport,
    root_seed: Option<f64>,
    rng: Lcg,
    suspended: bool,
}

impl Scene {
    pub fn new(cfg: TreeConfig) -> Self {
        Self {
            cfg,
            arena: GrowthArena::new(),
            viewport: Viewport::default(),
            root_seed: None,
            rng: Lcg::new(0),
            suspended: false,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: TreeConfig) {
        self.cfg = cfg;
    }

    pub fn arena(&self) -> &GrowthArena {
        &self.arena
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn suspended(&self) -> bool {
        self.suspended
    }

    pub fn root_seed(&self) -> Option<f64> {
        self.root_seed
    }

    /// Forget the stored seed so the next rebuild draws a fresh one
    pub fn clear_seed(&mut self) {
        self.root_seed = None;
    }

    /// Root origin and trunk length for a viewport. The responsive scale is
    /// clamped to a fixed band and damped further on narrow viewports.
    pub fn layout(cfg: &TreeConfig, viewport: Viewport) -> (Vec2, f32) {
        let center_x = viewport.width * 0.5;
        let ground_y = viewport.height - FOOTER_MARGIN;

        let base = viewport.width.min(viewport.height);
        let mut scale = (base / SCALE_REFERENCE * SCALE_GAIN).clamp(SCALE_MIN, SCALE_MAX);
        if viewport.width < NARROW_BREAKPOINT {
            scale *= NARROW_FACTOR;
        }

        (Vec2::new(center_x, ground_y), cfg.initial_length * scale)
    }

    pub fn ground_y(&self) -> f32 {
        self.viewport.height - FOOTER_MARGIN
    }

    /// Discard the tree and regrow it for the given viewport.
    ///
    /// `seed_entropy` is consumed only when no root seed is stored, so
    /// resizes continue the current tree shape while an explicit regrowth
    /// (after [`Scene::clear_seed`]) draws a fresh one. `jitter_entropy`
    /// reseeds branch jitter on every rebuild. A too-small viewport leaves
    /// the scene suspended with no tree at all.
    pub fn rebuild(&mut self, viewport: Viewport, seed_entropy: f64, jitter_entropy: f64) {
        self.viewport = viewport;
        self.arena = GrowthArena::new();
        self.suspended = self.cfg.viewport_too_small(viewport.width, viewport.height);
        if self.suspended {
            return;
        }

        let seed = *self
            .root_seed
            .get_or_insert(seed_entropy.clamp(0.0, 1.0) * ROOT_SEED_SPAN);
        self.rng = Lcg::from_unit(jitter_entropy);

        let (origin, length) = Self::layout(&self.cfg, viewport);
        self.arena.add_root(origin, FRAC_PI_2, length, seed);
    }

    /// One animation tick: trail fade, ground line, then advance and render
    /// every root. Returns true while another frame should be scheduled.
    pub fn tick<S: Surface>(&mut self, surface: &mut S, now_secs: f64) -> bool {
        if self.suspended {
            return false;
        }

        clear_with_trail(surface, &self.cfg);
        draw_ground_line(surface, self.ground_y());

        let roots: Vec<NodeId> = self.arena.roots().to_vec();
        let mut any = false;
        for id in roots {
            any |= advance(&mut self.arena, id, &self.cfg, &mut self.rng);
            render_tree(&self.arena, id, surface, now_secs, &self.cfg);
        }
        any
    }
}

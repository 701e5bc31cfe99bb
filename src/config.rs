use std::f32::consts::PI;
use serde::Deserialize;
use crate::render::palette::Rgb;

/// Viewport extents at or below which the animation suspends
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct MinViewport {
    pub width: f32,
    pub height: f32,
}

impl Default for MinViewport {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 360.0,
        }
    }
}

/// Tuning constants for the growth animation.
///
/// Every field has a default, so a YAML tuning file only needs to name the
/// keys it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Recursion depth of the tree; nodes at this depth are terminal
    pub max_depth: u32,
    /// Trunk length in CSS pixels before responsive scaling
    pub initial_length: f32,
    /// Angular spread between a parent and each child (radians)
    pub branch_angle: f32,
    /// Length multiplier per generation, in (0, 1)
    pub length_decay: f32,
    /// Span of the random angle offset applied per child at spawn
    pub angle_jitter: f32,
    /// Fractional span of the random length variation at spawn
    pub length_jitter: f32,
    /// Shadow blur radius for the glow effect
    pub glow: f32,
    /// Stroke width at the trunk
    pub line_width: f32,
    /// Opacity of the per-frame background refill, in [0, 1]
    pub background_fade: f32,
    /// Depth-keyed stroke colors, at least 2 entries
    pub palette: Vec<Rgb>,
    /// Sway deflection amplitude in radians; 0 disables sway
    pub sway_amplitude: f32,
    /// Sway oscillation frequency in radians per second; 0 disables sway
    pub sway_frequency: f32,
    /// Progress added per tick, in (0, 1]
    pub growth_increment: f32,
    pub min_viewport: MinViewport,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            initial_length: 150.0,
            branch_angle: PI / 4.8,
            length_decay: 0.72,
            angle_jitter: 0.03,
            length_jitter: 0.02,
            glow: 12.0,
            line_width: 2.4,
            background_fade: 0.08,
            palette: vec![
                Rgb::new(0x5e, 0xa0, 0xff),
                Rgb::new(0x7d, 0xb9, 0xff),
                Rgb::new(0xb4, 0xd8, 0xff),
            ],
            sway_amplitude: 0.0,
            sway_frequency: 0.0,
            growth_increment: 0.06,
            min_viewport: MinViewport::default(),
        }
    }
}

impl TreeConfig {
    /// Parse tuning overrides from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let cfg: TreeConfig =
            serde_yaml::from_str(yaml).map_err(|e| format!("tuning parse error: {}", e))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.palette.len() < 2 {
            return Err(format!(
                "palette needs at least 2 colors, got {}",
                self.palette.len()
            ));
        }
        if !(self.growth_increment > 0.0 && self.growth_increment <= 1.0) {
            return Err(format!(
                "growth_increment must be in (0, 1], got {}",
                self.growth_increment
            ));
        }
        if !(self.length_decay > 0.0 && self.length_decay < 1.0) {
            return Err(format!(
                "length_decay must be in (0, 1), got {}",
                self.length_decay
            ));
        }
        if !(0.0..=1.0).contains(&self.background_fade) {
            return Err(format!(
                "background_fade must be in [0, 1], got {}",
                self.background_fade
            ));
        }
        Ok(())
    }

    /// True when either viewport extent is at or below the suspension threshold
    pub fn viewport_too_small(&self, width: f32, height: f32) -> bool {
        width <= self.min_viewport.width || height <= self.min_viewport.height
    }
}

use serde::{Deserialize, Serialize};

/// 8-bit RGB color, parsed from `#rrggbb` hex strings in tuning files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or bare `rrggbb`) hex string
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let v = hex.strip_prefix('#').unwrap_or(hex);
        if v.len() != 6 || !v.is_ascii() {
            return Err(format!("invalid hex color '{}'", hex));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| format!("invalid hex color '{}'", hex))
        };
        Ok(Self {
            r: channel(&v[0..2])?,
            g: channel(&v[2..4])?,
            b: channel(&v[4..6])?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string, e.g. `rgb(94,160,255)`
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// CSS color string with an alpha channel, e.g. `rgba(6,9,15,0.08)`
    pub fn to_css_with_alpha(self, alpha: f32) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }

    /// Per-channel linear interpolation toward `other`
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_hex()
    }
}

/// Color for a node at `depth` of `max_depth`, linearly interpolated across
/// the palette. Depth 0 maps exactly to the first entry and `max_depth`
/// exactly to the last; the segment index is clamped at the boundary.
pub fn color_by_depth(palette: &[Rgb], depth: u32, max_depth: u32) -> Rgb {
    match palette {
        [] => Rgb::new(255, 255, 255),
        [only] => *only,
        _ => {
            let t = depth as f32 / max_depth.max(1) as f32;
            let segments = palette.len() - 1;
            let idx = ((t * segments as f32).floor() as usize).min(segments - 1);
            let local_t = t * segments as f32 - idx as f32;
            palette[idx].lerp(palette[idx + 1], local_t)
        }
    }
}

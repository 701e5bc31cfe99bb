pub mod canvas;
pub mod draw;
pub mod palette;
pub mod surface;

pub use canvas::CanvasSurface;
pub use draw::{clear_with_trail, draw_ground_line, render_tree};
pub use palette::{color_by_depth, Rgb};
pub use surface::{DrawOp, RecordingSurface, StrokeStyle, Surface};

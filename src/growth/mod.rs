pub mod algorithm;
pub mod arena;
pub mod rng;
pub mod sway;

pub use algorithm::advance;
pub use arena::{GrowthArena, GrowthNode, NodeId};
pub use rng::Lcg;
pub use sway::sway;

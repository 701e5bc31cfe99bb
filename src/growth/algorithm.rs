use crate::config::TreeConfig;
use super::arena::{GrowthArena, GrowthNode, NodeId};
use super::rng::Lcg;

/// Advance one node, and recursively its subtree, by a single tick.
///
/// Growing a segment, branching, and growing the children are separate
/// ticks. Returns true when any growth state changed, so the caller can
/// stop scheduling frames once the whole tree reports false.
pub fn advance(arena: &mut GrowthArena, id: NodeId, cfg: &TreeConfig, rng: &mut Lcg) -> bool {
    let (progress, children, depth) = {
        let node = arena.node(id);
        (node.progress, node.children, node.depth)
    };

    if progress < 1.0 {
        let node = arena.node_mut(id);
        node.progress = (node.progress + cfg.growth_increment).min(1.0);
        true
    } else if children.is_none() && depth < cfg.max_depth {
        spawn_pair(arena, id, cfg, rng);
        true
    } else if let Some([left, right]) = children {
        let grew_left = advance(arena, left, cfg, rng);
        let grew_right = advance(arena, right, cfg, rng);
        grew_left || grew_right
    } else {
        false
    }
}

/// Synthesize the two children of a fully grown node.
///
/// Angle jitter is drawn fresh per side; the child length is computed once
/// and shared by the pair. The origin is the parent's un-swayed anchor, so
/// spawn geometry never depends on the clock. Sway seeds are deterministic
/// transforms of the parent seed, distinct per side.
fn spawn_pair(arena: &mut GrowthArena, parent: NodeId, cfg: &TreeConfig, rng: &mut Lcg) {
    let (origin, base_angle, length, depth, seed) = {
        let p = arena.node(parent);
        (p.anchor(), p.base_angle, p.length, p.depth, p.seed)
    };

    let jitter_left = rng.jitter(cfg.angle_jitter);
    let jitter_right = rng.jitter(cfg.angle_jitter);
    let child_length = length * cfg.length_decay * (1.0 + rng.jitter(cfg.length_jitter * 2.0));

    let child = |angle: f32, seed: f64| GrowthNode {
        origin,
        base_angle: angle,
        length: child_length,
        depth: depth + 1,
        seed,
        progress: 0.0,
        parent: Some(parent),
        children: None,
    };

    arena.attach_pair(
        parent,
        child(base_angle - cfg.branch_angle + jitter_left, seed * 1.3 + 1.1),
        child(base_angle + cfg.branch_angle + jitter_right, seed * 1.7 + 2.2),
    );
}

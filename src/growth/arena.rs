use serde::Serialize;
use crate::math::Vec2;

pub type NodeId = usize;

/// One segment of the fractal tree
#[derive(Debug, Clone, Serialize)]
pub struct GrowthNode {
    /// Point the segment starts from
    pub origin: Vec2,
    /// Un-swayed direction in radians, fixed at spawn
    pub base_angle: f32,
    /// Target full length of the segment
    pub length: f32,
    /// Recursion depth, 0 at the trunk
    pub depth: u32,
    /// Per-node seed driving time-based sway
    pub seed: f64,
    /// Fraction of `length` currently drawn, in [0, 1]
    pub progress: f32,
    pub parent: Option<NodeId>,
    /// Absent until the node branches, then exactly a pair
    pub children: Option<[NodeId; 2]>,
}

impl GrowthNode {
    /// Endpoint of the fully grown segment along the un-swayed direction.
    /// Recomputed on demand, never stored.
    pub fn anchor(&self) -> Vec2 {
        self.origin + Vec2::from_bearing(self.base_angle).scale(self.length)
    }

    pub fn fully_grown(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Index-addressed store for the whole tree.
///
/// Nodes are appended and never removed; `children` is set once and never
/// replaced. The arena serializes for test and replay snapshots.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GrowthArena {
    nodes: Vec<GrowthNode>,
    roots: Vec<NodeId>,
}

impl GrowthArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, origin: Vec2, angle: f32, length: f32, seed: f64) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(GrowthNode {
            origin,
            base_angle: angle,
            length,
            depth: 0,
            seed,
            progress: 0.0,
            parent: None,
            children: None,
        });
        self.roots.push(id);
        id
    }

    /// Attach the lazily created child pair to a node that has none yet
    pub fn attach_pair(&mut self, parent: NodeId, left: GrowthNode, right: GrowthNode) -> [NodeId; 2] {
        debug_assert!(self.nodes[parent].children.is_none());
        let left_id = self.nodes.len();
        self.nodes.push(left);
        let right_id = self.nodes.len();
        self.nodes.push(right);
        self.nodes[parent].children = Some([left_id, right_id]);
        [left_id, right_id]
    }

    pub fn node(&self, id: NodeId) -> &GrowthNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut GrowthNode {
        &mut self.nodes[id]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GrowthNode)> {
        self.nodes.iter().enumerate()
    }

    /// Greatest depth present in the arena
    pub fn max_depth_reached(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// True once no node can grow or branch any further
    pub fn settled(&self, max_depth: u32) -> bool {
        self.nodes
            .iter()
            .all(|n| n.fully_grown() && (n.children.is_some() || n.depth >= max_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(origin: Vec2, depth: u32, parent: NodeId) -> GrowthNode {
        GrowthNode {
            origin,
            base_angle: 1.0,
            length: 10.0,
            depth,
            seed: 0.5,
            progress: 0.0,
            parent: Some(parent),
            children: None,
        }
    }

    #[test]
    fn test_root_bookkeeping() {
        let mut arena = GrowthArena::new();
        let root = arena.add_root(Vec2::new(400.0, 500.0), 1.5, 150.0, 3.3);
        assert_eq!(arena.roots(), &[root]);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.node(root).depth, 0);
        assert!(arena.node(root).parent.is_none());
        assert!(arena.node(root).children.is_none());
    }

    #[test]
    fn test_attach_pair_links_both_ways() {
        let mut arena = GrowthArena::new();
        let root = arena.add_root(Vec2::ZERO, 1.5, 100.0, 0.0);
        let tip = arena.node(root).anchor();
        let [l, r] = arena.attach_pair(root, leaf(tip, 1, root), leaf(tip, 1, root));

        assert_eq!(arena.node(root).children, Some([l, r]));
        assert_eq!(arena.node(l).parent, Some(root));
        assert_eq!(arena.node(r).parent, Some(root));
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.max_depth_reached(), 1);
    }

    #[test]
    fn test_anchor_is_recomputed_from_base_angle() {
        let mut arena = GrowthArena::new();
        let root = arena.add_root(Vec2::new(100.0, 100.0), std::f32::consts::FRAC_PI_2, 50.0, 0.0);
        let anchor = arena.node(root).anchor();
        assert!((anchor.x - 100.0).abs() < 1e-3);
        assert!((anchor.y - 50.0).abs() < 1e-3);

        arena.node_mut(root).length = 80.0;
        let moved = arena.node(root).anchor();
        assert!((moved.y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_settled() {
        let mut arena = GrowthArena::new();
        let root = arena.add_root(Vec2::ZERO, 1.5, 100.0, 0.0);
        assert!(!arena.settled(0));

        arena.node_mut(root).progress = 1.0;
        assert!(arena.settled(0));
        assert!(!arena.settled(1));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut arena = GrowthArena::new();
        arena.add_root(Vec2::new(1.0, 2.0), 1.5, 100.0, 4.2);
        let yaml = serde_yaml::to_string(&arena).unwrap();
        assert!(yaml.contains("base_angle"));
        assert!(yaml.contains("progress"));
    }
}

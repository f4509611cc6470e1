//! The region quadtree.
//!
//! [`QuadTree`] is a thin handle owning the root [`node::Node`]; every
//! operation is a plain recursive call tree gated by boundary predicates.
//! The structure is single-writer and does no internal synchronization;
//! embed it behind a lock if it ever needs to be shared.

mod node;

use serde::Serialize;

use crate::error::{QuadmapError, Result};
use crate::geom::{Boundary, Point};
use node::Node;

/// Result of a nearest-neighbor lookup: the stored point and its Euclidean
/// distance to the target.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'tree, P> {
    pub point: &'tree Point<P>,
    pub distance: f64,
}

/// One exported point record: coordinates plus a borrowed payload, in the
/// shape an external serializer (GeoJSON or otherwise) consumes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureRecord<'tree, P> {
    pub x: f64,
    pub y: f64,
    pub payload: &'tree P,
}

/// A point quadtree over a fixed boundary.
///
/// Each node stores up to `capacity` points directly and splits into four
/// quadrant children the first time that bag overflows. Range queries and
/// nearest-neighbor lookups prune whole subtrees through the boundary
/// predicates.
#[derive(Debug)]
pub struct QuadTree<P> {
    root: Node<P>,
}

impl<P> QuadTree<P> {
    /// Create an empty tree covering `boundary`, with the given per-node
    /// point capacity.
    pub fn new(boundary: Boundary, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QuadmapError::InvalidCapacity { capacity });
        }
        Ok(Self { root: Node::new(boundary, capacity) })
    }

    /// The region this tree covers
    pub fn boundary(&self) -> Boundary {
        self.root.boundary()
    }

    /// Per-node point capacity
    pub fn capacity(&self) -> usize {
        self.root.capacity()
    }

    /// Insert a point. Returns `false` when the point lies outside the
    /// tree's boundary — that is a soft outcome, not an error.
    pub fn insert(&mut self, point: Point<P>) -> bool {
        self.root.insert(point).is_none()
    }

    /// Remove the first stored point exactly equal to `point` (coordinates
    /// and payload). Returns `false` when no such point exists.
    pub fn remove(&mut self, point: &Point<P>) -> bool
    where
        P: PartialEq,
    {
        self.root.remove(point)
    }

    /// All stored points within `range`, in deterministic traversal order:
    /// a node's own points first, then its NW, NE, SW, SE subtrees.
    pub fn query(&self, range: &Boundary) -> Vec<&Point<P>> {
        let mut found = Vec::new();
        self.root.query(range, &mut found);
        found
    }

    /// The stored point nearest to `(x, y)`, or `None` when the tree is
    /// empty. Ties keep the point found earliest in traversal order.
    pub fn nearest_neighbor(&self, x: f64, y: f64) -> Option<Neighbor<'_, P>> {
        let mut best = None;
        self.root.nearest(x, y, &mut best);
        best
    }

    /// Collapse the root's children if all four are empty leaves. This is a
    /// single-level pass; deeper empty structure is left in place.
    pub fn rebalance(&mut self) {
        self.root.merge();
    }

    /// Total number of stored points
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// Whether the tree holds no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes, the root included
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Height of the tree in levels
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Drop every point and all subdivision structure, keeping the boundary
    /// and capacity.
    pub fn clear(&mut self) {
        self.root = Node::new(self.root.boundary(), self.root.capacity());
    }

    /// Lazily walk every stored point as a [`FeatureRecord`], in the same
    /// own-points-then-children order as [`QuadTree::query`]. The iterator
    /// borrows the tree; call again to restart.
    pub fn features(&self) -> Features<'_, P> {
        Features { stack: vec![NodeCursor { node: &self.root, next_point: 0 }] }
    }
}

/// Depth-first iterator over all stored points. See [`QuadTree::features`].
#[derive(Debug)]
pub struct Features<'tree, P> {
    stack: Vec<NodeCursor<'tree, P>>,
}

#[derive(Debug)]
struct NodeCursor<'tree, P> {
    node: &'tree Node<P>,
    next_point: usize,
}

impl<'tree, P> Iterator for Features<'tree, P> {
    type Item = FeatureRecord<'tree, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cursor = self.stack.last_mut()?;
            if let Some(point) = cursor.node.points().get(cursor.next_point) {
                cursor.next_point += 1;
                return Some(FeatureRecord { x: point.x, y: point.y, payload: &point.payload });
            }
            let finished = self.stack.pop()?;
            if let Some(children) = finished.node.children() {
                // Push in reverse so NW pops first.
                for child in children.iter().rev() {
                    self.stack.push(NodeCursor { node: child, next_point: 0 });
                }
            }
        }
    }
}

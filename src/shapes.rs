//! Enumeration of all distinct tree shapes with a given number of leaves.

use std::collections::HashMap;

use fasthash::xx::Hash64;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::render::diagram;
use crate::tree::{NodeId, Tree};
use crate::MAX_NUMBERS;

/// A single step in the postfix program of a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step
{
    /// Push the next input number.
    Operand,
    /// Pop two values, apply the next operator, and push the result.
    Apply
}

/// An immutable, fully built tree with a fixed number of leaves.
///
/// Next to the tree itself, a shape stores its fingerprint and its postfix
/// program: the post-order sequence of operand and operator positions that
/// both evaluation and explanation walk through.
#[derive(Clone, Debug)]
pub struct Shape
{
    tree: Tree,
    fingerprint: u64,
    program: Vec<Step>
}

impl Shape
{
    /// Freeze `tree` into a shape.
    pub fn new(tree: Tree) -> Self
    {
        let program = tree.post_order().into_iter()
            .map(|id| if tree.node(id).is_leaf() { Step::Operand } else { Step::Apply })
            .collect();
        let fingerprint = tree.fingerprint();
        Shape { tree, fingerprint, program }
    }

    pub fn tree(&self) -> &Tree
    {
        &self.tree
    }

    pub fn fingerprint(&self) -> u64
    {
        self.fingerprint
    }

    /// The shape in reverse polish form.
    pub fn program(&self) -> &[Step]
    {
        &self.program
    }

    /// Number of operands in the shape.
    pub fn leaves(&self) -> usize
    {
        self.program.len() - self.op_count()
    }

    /// Number of operators in the shape.
    pub fn op_count(&self) -> usize
    {
        self.program.iter().filter(|&&step| step == Step::Apply).count()
    }
}

type ShapeMap = HashMap<u64, Shape, Hash64>;

/// Find every full binary tree shape with exactly `leaf_count` leaves.
///
/// The trees are grown one slot at a time from a single root, trying every
/// empty slot in every order, so the same shape is generated many times over;
/// the fingerprint map keeps one copy of each. The result is sorted by
/// fingerprint.
pub fn enumerate_shapes(leaf_count: usize) -> Result<Vec<Shape>>
{
    if leaf_count < 2
    {
        return Err(Error::TooFewNumbers { count: leaf_count });
    }
    if leaf_count > MAX_NUMBERS
    {
        return Err(Error::TooManyNumbers { count: leaf_count, max: MAX_NUMBERS });
    }

    let mut found = ShapeMap::with_hasher(Hash64);
    let tree = Tree::new();
    let root = tree.root();
    build(tree, root, leaf_count, &mut found);

    let mut shapes: Vec<Shape> = found.into_iter().map(|(_, shape)| shape).collect();
    shapes.sort_by_key(Shape::fingerprint);
    debug!(leaf_count, shapes = shapes.len(), "enumerated tree shapes");
    Ok(shapes)
}

/// Continue growing `tree`, whose last expanded slot is `grown`.
fn build(tree: Tree, grown: NodeId, leaf_count: usize, found: &mut ShapeMap)
{
    let root = tree.root_of(grown);
    let leaves = tree.leaves();
    if leaves < leaf_count
    {
        expand_slots(&tree, root, leaf_count, found);
    }
    else if leaves == leaf_count
    {
        let fingerprint = tree.fingerprint();
        trace!(fingerprint, depth = tree.depth(), "full tree\n{}", diagram(&tree));
        if !found.contains_key(&fingerprint)
        {
            found.insert(fingerprint, Shape::new(tree));
        }
    }
}

/// Walk `tree` below `id`, right before left, and grow a copy of the tree at
/// every empty slot met on the way.
fn expand_slots(tree: &Tree, id: NodeId, leaf_count: usize, found: &mut ShapeMap)
{
    let node = tree.node(id);
    match (node.left, node.right)
    {
        (Some(left), Some(right)) => {
            expand_slots(tree, right, leaf_count, found);
            expand_slots(tree, left, leaf_count, found);
        },
        _ => {
            let mut grown = tree.clone();
            let slot = grown.navigate(node.path, node.level);
            grown.expand(slot);
            build(grown, slot, leaf_count, found);
        }
    }
}

/// The `n`th Catalan number: the number of full binary trees with `n + 1`
/// leaves.
pub fn catalan(n: usize) -> u64
{
    let mut c = 1u64;
    for k in 0..n as u64
    {
        c = c * 2 * (2 * k + 1) / (k + 2);
    }
    c
}

#[cfg(test)]
mod tests
{
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[test]
    fn catalan_numbers()
    {
        let expected = [1, 1, 2, 5, 14, 42, 132, 429];
        for (n, &c) in expected.iter().enumerate()
        {
            assert_eq!(catalan(n), c, "catalan({})", n);
        }
    }

    #[test]
    fn two_leaves_give_one_shape()
    {
        let shapes = enumerate_shapes(2).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].program(), &[Step::Operand, Step::Operand, Step::Apply]);
    }

    #[test]
    fn shape_counts_follow_catalan()
    {
        for leaf_count in 2..=7
        {
            let shapes = enumerate_shapes(leaf_count).unwrap();
            assert_eq!(shapes.len() as u64, catalan(leaf_count - 1), "{} leaves", leaf_count);
        }
    }

    #[test]
    fn six_numbers_give_42_shapes()
    {
        assert_eq!(enumerate_shapes(6).unwrap().len(), 42);
    }

    #[test]
    fn shapes_are_distinct_trees()
    {
        let shapes = enumerate_shapes(5).unwrap();
        let programs: HashSet<Vec<Step>> = shapes.iter()
            .map(|shape| shape.program().to_vec())
            .collect();
        assert_eq!(programs.len(), shapes.len());
    }

    #[test]
    fn shapes_are_full_with_requested_leaves()
    {
        for shape in enumerate_shapes(6).unwrap()
        {
            let tree = shape.tree();
            assert_eq!(tree.leaves(), 6);
            assert_eq!(tree.leaves(), tree.internal_nodes() + 1);
            assert_eq!(shape.leaves(), 6);
            assert_eq!(shape.op_count(), 5);
            for id in 0..tree.len()
            {
                let node = tree.node(id);
                assert_eq!(node.left.is_some(), node.right.is_some());
                if let Some(parent) = node.parent
                {
                    assert_eq!(node.level, tree.node(parent).level + 1);
                }
            }
        }
    }

    #[test]
    fn shapes_sorted_by_fingerprint()
    {
        let shapes = enumerate_shapes(5).unwrap();
        assert!(shapes.windows(2).all(|w| w[0].fingerprint() < w[1].fingerprint()));
    }

    struct CountTraces(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for CountTraces
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>)
        {
            if *event.metadata().level() == tracing::Level::TRACE
            {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn every_full_tree_is_traced()
    {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountTraces(Arc::clone(&count)));
        let shapes = tracing::subscriber::with_default(subscriber, || enumerate_shapes(4).unwrap());

        // 1 * 2 * 3 expansion orders reach four leaves, folding into 5 shapes.
        assert_eq!(shapes.len(), 5);
        assert_eq!(count.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn too_few_leaves_rejected()
    {
        assert!(matches!(enumerate_shapes(1), Err(Error::TooFewNumbers { count: 1 })));
        assert!(matches!(enumerate_shapes(0), Err(Error::TooFewNumbers { count: 0 })));
    }

    #[test]
    fn too_many_leaves_rejected()
    {
        assert!(matches!(enumerate_shapes(MAX_NUMBERS + 1), Err(Error::TooManyNumbers { .. })));
    }
}

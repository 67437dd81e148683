//! Slow reference implementations shared across integration tests.

#![allow(dead_code)]

use countdown::{Operator, Tree};

/// Every value of every expression that uses all of `nrs` in this order.
fn ordered_values(nrs: &[i64]) -> Vec<f64>
{
    if nrs.len() == 1
    {
        return vec![nrs[0] as f64];
    }

    let mut res = vec![];
    for split in 1..nrs.len()
    {
        let lefts = ordered_values(&nrs[..split]);
        let rights = ordered_values(&nrs[split..]);
        for &left in &lefts
        {
            for &right in &rights
            {
                for op in Operator::ALL.iter()
                {
                    res.push(op.apply(left, right));
                }
            }
        }
    }
    res
}

fn permutations(nrs: &[i64]) -> Vec<Vec<i64>>
{
    if nrs.len() <= 1
    {
        return vec![nrs.to_vec()];
    }

    let mut res = vec![];
    for idx in 0..nrs.len()
    {
        let mut rest = nrs.to_vec();
        let first = rest.remove(idx);
        for mut perm in permutations(&rest)
        {
            perm.insert(0, first);
            res.push(perm);
        }
    }
    res
}

/// The smallest distance to `target` of any finite expression over all of
/// `nrs`, found without tree shapes or shared state.
pub fn brute_force_diff(nrs: &[i64], target: i64) -> Option<f64>
{
    let target = target as f64;
    permutations(nrs).iter()
        .flat_map(|perm| ordered_values(perm))
        .filter(|value| value.is_finite())
        .map(|value| (value - target).abs())
        .fold(None, |best: Option<f64>, diff| match best
        {
            Some(best) if best <= diff => Some(best),
            _ => Some(diff)
        })
}

/// Evaluate `tree` by walking it recursively, binding operators in
/// post-order and numbers from left to right.
pub fn walk_evaluate(tree: &Tree, ops: &[Operator], nrs: &[i64]) -> f64
{
    fn walk(tree: &Tree, id: usize, ops: &[Operator], nrs: &[i64],
        op_idx: &mut usize, nr_idx: &mut usize) -> f64
    {
        let node = tree.node(id);
        match (node.left, node.right)
        {
            (Some(left), Some(right)) => {
                let left = walk(tree, left, ops, nrs, op_idx, nr_idx);
                let right = walk(tree, right, ops, nrs, op_idx, nr_idx);
                let op = ops[*op_idx];
                *op_idx += 1;
                op.apply(left, right)
            },
            _ => {
                let nr = nrs[*nr_idx];
                *nr_idx += 1;
                nr as f64
            }
        }
    }

    let (mut op_idx, mut nr_idx) = (0, 0);
    let value = walk(tree, tree.root(), ops, nrs, &mut op_idx, &mut nr_idx);
    assert_eq!(op_idx, ops.len());
    assert_eq!(nr_idx, nrs.len());
    value
}

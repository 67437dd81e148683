//! Exhaustive, parallel search for the expression closest to a target.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::expr::{evaluate, explain, Operator};
use crate::shapes::Shape;

/// Difference stored while no candidate has been recorded yet.
const UNSET: f64 = -1.0;

/// The best expression found.
#[derive(Clone, Debug)]
pub struct Solution<'a>
{
    pub shape: &'a Shape,
    /// The operands, in leaf order.
    pub numbers: Vec<i64>,
    /// The operators, in post-order.
    pub ops: Vec<Operator>,
    pub value: f64,
    /// Absolute difference between `value` and the target.
    pub diff: f64
}

impl<'a> Solution<'a>
{
    pub fn is_exact(&self) -> bool
    {
        self.diff == 0.0
    }

    /// The expression as a fully parenthesized string.
    pub fn explain(&self) -> String
    {
        explain(self.shape, &self.ops, &self.numbers)
    }
}

/// The best solution so far, shared between all search tasks.
///
/// The record itself is only touched while holding the lock. Its difference
/// is mirrored in an atomic, written under the lock as well, so that tasks
/// can cheaply check whether they might improve on it before locking.
pub struct BestSolution<'a>
{
    diff: AtomicU64,
    record: Mutex<Option<Solution<'a>>>
}

impl<'a> Default for BestSolution<'a>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<'a> BestSolution<'a>
{
    pub fn new() -> Self
    {
        BestSolution {
            diff: AtomicU64::new(UNSET.to_bits()),
            record: Mutex::new(None)
        }
    }

    /// The difference of the current best, without locking. The value may be
    /// stale by the time it is used.
    fn current_diff(&self) -> f64
    {
        f64::from_bits(self.diff.load(Ordering::Relaxed))
    }

    /// The difference of the current best, if anything was recorded.
    pub fn diff(&self) -> Option<f64>
    {
        let diff = self.current_diff();
        if diff < 0.0 { None } else { Some(diff) }
    }

    /// Whether some task has found an exact match. Racy; only use this to
    /// stop early.
    pub fn is_exact(&self) -> bool
    {
        self.current_diff() == 0.0
    }

    /// Record the candidate if it is strictly closer to the target than the
    /// current best. Returns whether it was recorded.
    pub fn offer(&self, shape: &'a Shape, numbers: &[i64], ops: &[Operator],
        value: f64, diff: f64) -> bool
    {
        if !improves(diff, self.current_diff())
        {
            return false;
        }

        let mut record = self.record.lock();
        // Only written under the lock, so this load is exact.
        if !improves(diff, self.current_diff())
        {
            return false;
        }

        *record = Some(Solution {
            shape,
            numbers: numbers.to_vec(),
            ops: ops.to_vec(),
            value,
            diff
        });
        self.diff.store(diff.to_bits(), Ordering::Relaxed);
        true
    }

    /// Take the recorded solution out.
    pub fn into_inner(self) -> Option<Solution<'a>>
    {
        self.record.into_inner()
    }
}

fn improves(diff: f64, current: f64) -> bool
{
    current < 0.0 || diff < current
}

/// Counter over all operator assignments of a shape.
///
/// The assignment is read as a number in base `Operator::COUNT`, with the
/// first operator as least significant digit.
#[derive(Clone, Debug)]
pub struct OperatorCounter
{
    ops: Vec<Operator>
}

impl OperatorCounter
{
    /// Start a counter for `len` operators, all set to `Operator::Add`.
    pub fn new(len: usize) -> Self
    {
        OperatorCounter { ops: vec![Operator::Add; len] }
    }

    pub fn ops(&self) -> &[Operator]
    {
        &self.ops
    }

    /// Step to the next assignment. Returns `false`, leaving every operator at
    /// `Operator::Add`, when the counter wraps around.
    pub fn advance(&mut self) -> bool
    {
        for op in self.ops.iter_mut()
        {
            let digit = op.digit() + 1;
            if digit < Operator::COUNT
            {
                *op = Operator::from_digit(digit);
                return true;
            }
            *op = Operator::Add;
        }
        false
    }
}

/// Rearrange `nrs` into the next lexicographically greater permutation.
///
/// Returns `false` when `nrs` was the last permutation, in which case it is
/// reset to the first one (sorted ascending). Equal elements are never
/// swapped with each other, so repeated numbers do not repeat permutations.
pub fn next_permutation<T: Ord>(nrs: &mut [T]) -> bool
{
    let pivot = match nrs.windows(2).rposition(|w| w[0] < w[1])
    {
        Some(idx) => idx,
        None      => {
            nrs.reverse();
            return false;
        }
    };

    let successor = nrs.iter().rposition(|nr| *nr > nrs[pivot])
        .expect("pivot has a larger element after it");
    nrs.swap(pivot, successor);
    nrs[pivot+1..].reverse();
    true
}

/// Try every operator assignment and every permutation of `numbers` on a
/// single shape, offering each finite result to `best`.
///
/// Returns the number of expressions evaluated. Stops early once any task has
/// recorded an exact match.
pub fn search_shape<'a>(shape: &'a Shape, numbers: &[i64], target: i64,
    best: &BestSolution<'a>) -> u64
{
    let mut nrs = numbers.to_vec();
    nrs.sort_unstable();
    let target = target as f64;

    let mut counter = OperatorCounter::new(shape.op_count());
    let mut evaluated = 0u64;
    loop
    {
        loop
        {
            let value = evaluate(shape, counter.ops(), &nrs);
            evaluated += 1;
            if value.is_finite()
            {
                if best.is_exact()
                {
                    debug!(fingerprint = shape.fingerprint(), evaluated, "stopping, exact match found");
                    return evaluated;
                }
                best.offer(shape, &nrs, counter.ops(), value, (value - target).abs());
            }

            if !next_permutation(&mut nrs)
            {
                break;
            }
        }

        if !counter.advance()
        {
            break;
        }
    }

    debug!(fingerprint = shape.fingerprint(), evaluated, "shape exhausted");
    evaluated
}

/// Configuration of a search run.
#[derive(Clone, Debug, Default)]
pub struct Search
{
    threads: Option<usize>
}

impl Search
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Run on a dedicated pool of `threads` workers instead of the global
    /// pool.
    pub fn threads(mut self, threads: usize) -> Self
    {
        self.threads = Some(threads);
        self
    }

    /// Search all `shapes` for the expression over `numbers` closest to
    /// `target`, one task per shape.
    pub fn run<'a>(&self, shapes: &'a [Shape], numbers: &[i64], target: i64)
        -> Result<Solution<'a>>
    {
        if shapes.is_empty()
        {
            return Err(Error::NoShapes);
        }

        let best = BestSolution::new();
        let evaluated = AtomicU64::new(0);
        let work = || {
            rayon::scope(|scope| {
                for shape in shapes
                {
                    let best = &best;
                    let evaluated = &evaluated;
                    scope.spawn(move |_| {
                        let count = search_shape(shape, numbers, target, best);
                        evaluated.fetch_add(count, Ordering::Relaxed);
                    });
                }
            })
        };

        match self.threads
        {
            Some(threads) => ThreadPoolBuilder::new().num_threads(threads).build()?.install(work),
            None          => work()
        }

        let solution = best.into_inner().ok_or(Error::NoFiniteCandidate)?;
        info!(
            shapes = shapes.len(),
            evaluated = evaluated.into_inner(),
            value = solution.value,
            diff = solution.diff,
            "search finished"
        );
        Ok(solution)
    }
}

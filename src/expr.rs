//! Evaluation and explanation of a shape under an operator assignment.

use std::fmt;

use arrayvec::ArrayVec;
use num_traits::Float;

use crate::shapes::{Shape, Step};
use crate::MAX_NUMBERS;

/// A binary operation on two values.
///
/// The discriminants are the digits used by the operator counter in the
/// search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator
{
    Add = 0,
    Sub = 1,
    Mul = 2,
    Div = 3,
    /// Drops both operands and yields zero.
    Ignore = 4,
    Pow = 5
}

impl Operator
{
    /// Number of distinct operators, the radix of the operator counter.
    pub const COUNT: usize = 6;

    /// All operators, ordered by digit.
    pub const ALL: [Operator; Operator::COUNT] = [
        Operator::Add, Operator::Sub, Operator::Mul,
        Operator::Div, Operator::Ignore, Operator::Pow
    ];

    /// The operator for counter digit `digit`.
    pub fn from_digit(digit: usize) -> Self
    {
        Self::ALL[digit]
    }

    pub fn digit(self) -> usize
    {
        self as usize
    }

    /// The upper case name of the operator.
    pub fn mnemonic(self) -> &'static str
    {
        match self
        {
            Operator::Add    => "ADD",
            Operator::Sub    => "SUB",
            Operator::Mul    => "MUL",
            Operator::Div    => "DIV",
            Operator::Ignore => "IGNORE",
            Operator::Pow    => "POW"
        }
    }

    /// Apply the operator to `left` and `right`.
    ///
    /// Division by zero and invalid powers are not checked, they result in
    /// infinite or NaN values that the caller has to filter out.
    pub fn apply<T: Float>(self, left: T, right: T) -> T
    {
        match self
        {
            Operator::Add    => left + right,
            Operator::Sub    => left - right,
            Operator::Mul    => left * right,
            Operator::Div    => left / right,
            Operator::Ignore => T::zero(),
            Operator::Pow    => left.powf(right)
        }
    }

    /// Format the application of this operator to two rendered operands.
    fn explain(self, left: &str, right: &str) -> String
    {
        let symbol = match self
        {
            Operator::Add    => '+',
            Operator::Sub    => '-',
            Operator::Mul    => '*',
            Operator::Div    => '/',
            Operator::Pow    => '^',
            Operator::Ignore => return String::from("0")
        };
        format!("( {} {} {} )", left, symbol, right)
    }
}

impl fmt::Display for Operator
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.mnemonic())
    }
}

fn check_binding(shape: &Shape, ops: &[Operator], numbers: &[i64])
{
    assert_eq!(ops.len(), shape.op_count(), "operator count does not match shape");
    assert_eq!(numbers.len(), shape.leaves(), "number count does not match shape");
    assert!(numbers.len() <= MAX_NUMBERS, "more than {} numbers", MAX_NUMBERS);
}

/// Compute the value of `shape` with operators `ops` and operands `numbers`.
///
/// Operator `i` belongs to the `i`th operator node in post-order, number `j`
/// to the `j`th leaf from the left.
pub fn evaluate(shape: &Shape, ops: &[Operator], numbers: &[i64]) -> f64
{
    check_binding(shape, ops, numbers);

    let mut stack = ArrayVec::<f64, MAX_NUMBERS>::new();
    let mut nrs = numbers.iter();
    let mut ops = ops.iter();
    for step in shape.program()
    {
        match step
        {
            Step::Operand => {
                let nr = *nrs.next().expect("operand count checked");
                stack.push(nr as f64);
            },
            Step::Apply => {
                let right = stack.pop().expect("malformed program");
                let left = stack.pop().expect("malformed program");
                let op = *ops.next().expect("operator count checked");
                stack.push(op.apply(left, right));
            }
        }
    }

    stack.pop().expect("empty program")
}

/// Render `shape` with operators `ops` and operands `numbers` as a fully
/// parenthesized expression.
///
/// The binding of operators and operands is the same as in `evaluate()`.
pub fn explain(shape: &Shape, ops: &[Operator], numbers: &[i64]) -> String
{
    check_binding(shape, ops, numbers);

    let mut stack = ArrayVec::<String, MAX_NUMBERS>::new();
    let mut nrs = numbers.iter();
    let mut ops = ops.iter();
    for step in shape.program()
    {
        match step
        {
            Step::Operand => {
                let nr = nrs.next().expect("operand count checked");
                stack.push(nr.to_string());
            },
            Step::Apply => {
                let right = stack.pop().expect("malformed program");
                let left = stack.pop().expect("malformed program");
                let op = ops.next().expect("operator count checked");
                stack.push(op.explain(&left, &right));
            }
        }
    }

    stack.pop().expect("empty program")
}

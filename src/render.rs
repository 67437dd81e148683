//! Console output: tree diagrams and the final report.

use std::fmt;

use crate::search::Solution;
use crate::tree::{NodeId, Tree};

/// Draw `tree` as an ASCII block diagram.
///
/// Every node is drawn as an `o`, edges to left and right children as `/`
/// and `\`. Each level takes one row for its nodes and, when it has
/// children, one row for the edges below; the deepest level holds only
/// leaves, so the diagram has `2 * depth - 1` rows and no trailing blank
/// edge row. Horizontal distances halve with every level, so subtrees never
/// overlap.
pub fn diagram(tree: &Tree) -> String
{
    let depth = tree.depth() as usize;
    if depth == 0
    {
        return String::new();
    }

    let width = (1usize << depth) - 1;
    let mut rows = vec![vec![b' '; width]; 2 * depth - 1];
    draw(tree, tree.root(), width / 2, depth, &mut rows);

    let mut res = String::new();
    for row in rows
    {
        let line = String::from_utf8_lossy(&row);
        res.push_str(line.trim_end());
        res.push('\n');
    }
    res
}

fn draw(tree: &Tree, id: NodeId, column: usize, depth: usize, rows: &mut [Vec<u8>])
{
    let node = tree.node(id);
    let lv = node.level as usize - 1;
    rows[2*lv][column] = b'o';

    if let (Some(left), Some(right)) = (node.left, node.right)
    {
        // Children of a node on 0-based level lv sit 2^(depth-lv-2) columns away.
        let offset = 1usize << (depth - lv - 2);
        let edge = (offset + 1) / 2;
        rows[2*lv + 1][column - edge] = b'/';
        rows[2*lv + 1][column + edge] = b'\\';
        draw(tree, left, column - offset, depth, rows);
        draw(tree, right, column + offset, depth, rows);
    }
}

/// The final report of a search run.
pub struct Report<'a>
{
    /// Number of distinct tree shapes searched.
    pub shapes: usize,
    pub target: i64,
    pub solution: &'a Solution<'a>
}

impl<'a> fmt::Display for Report<'a>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let solution = self.solution;
        writeln!(f, "Tree permutations: {}", self.shapes)?;
        writeln!(f, "Target number: {}", self.target)?;
        writeln!(f, "Best solution: {}", solution.value)?;
        writeln!(f, "Tree:")?;
        write!(f, "{}", diagram(solution.shape.tree()))?;

        writeln!(f, "Operations:")?;
        let ops: Vec<&str> = solution.ops.iter().map(|op| op.mnemonic()).collect();
        writeln!(f, "{}", ops.join("\t"))?;

        writeln!(f, "Numbers:")?;
        let nrs: Vec<String> = solution.numbers.iter().map(|nr| nr.to_string()).collect();
        writeln!(f, "{}", nrs.join("\t"))?;

        writeln!(f, "Explanation:")?;
        writeln!(f, "{} = {}", solution.explain(), solution.value)
    }
}

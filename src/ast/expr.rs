use std::fmt;

use crate::parse::operator::Operator;
use crate::source::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    operator: Operator,
    arity: usize,
    span: Span,
}

impl Node {
    pub fn new(operator: Operator, arity: usize, span: Span) -> Self {
        Node { operator, arity, span }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    // count of operand subtrees immediately preceding the node
    pub fn arity(&self) -> usize {
        self.arity
    }

    // covers the node's whole subtree
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A tree stored in post-order: every node follows the subtrees of its
/// operands, so the last node is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expression {
    nodes: Vec<Node>,
}

impl Expression {
    pub fn new() -> Self {
        Expression { nodes: Vec::new() }
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Expression { nodes }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn root(&self) -> usize {
        assert!(!self.nodes.is_empty(), "empty expression has no root");
        self.nodes.len() - 1
    }

    pub fn span(&self) -> Span {
        self.nodes.last().map_or_else(Span::default, |n| n.span)
    }

    pub fn checked_subtree_start(&self, index: usize) -> Option<usize> {
        let mut pending = 1usize;
        let mut at = index + 1;

        while pending > 0 {
            at = at.checked_sub(1)?;
            pending = pending - 1 + self.nodes.get(at)?.arity;
        }

        Some(at)
    }

    // index of the first node of the subtree rooted at `index`
    pub fn subtree_start(&self, index: usize) -> usize {
        match self.checked_subtree_start(index) {
            Some(start) => start,
            None => panic!("node {} claims operands before the start of the expression", index),
        }
    }

    // root indices of the operand subtrees of `index`, first operand first
    pub fn operands(&self, index: usize) -> Vec<usize> {
        let mut operands = Vec::with_capacity(self.nodes[index].arity);
        let mut end = index;

        for _ in 0..self.nodes[index].arity {
            let operand = end - 1;
            operands.push(operand);
            end = self.subtree_start(operand);
        }

        operands.reverse();
        operands
    }

    pub fn operand(&self, index: usize, n: usize) -> usize {
        self.operands(index)[n]
    }

    // the root's subtree spans the whole array
    pub fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty() && self.checked_subtree_start(self.root()) == Some(0)
    }

    pub fn display<'e>(&'e self, input: &'e str) -> ExpressionDisplay<'e> {
        ExpressionDisplay { expr: self, input }
    }
}

pub struct ExpressionDisplay<'e> {
    expr: &'e Expression,
    input: &'e str,
}

impl ExpressionDisplay<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, index: usize) -> fmt::Result {
        let node = self.expr.node(index);

        if node.arity == 0 && matches!(node.operator, Operator::Literal | Operator::Name) {
            return f.write_str(&self.input[node.span.range()]);
        }

        write!(f, "({}", node.operator.symbol())?;
        for operand in self.expr.operands(index) {
            f.write_str(" ")?;
            self.write_node(f, operand)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ExpressionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expr.is_empty() {
            return f.write_str("()");
        }

        self.write_node(f, self.expr.root())
    }
}

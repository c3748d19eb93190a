use std::slice;

use crate::ast::Node;

/// One `ORDERBY` term: an expression and its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SortTermNode {
    expr: Box<Node>,
    pub ascending: bool,
}

impl SortTermNode {
    pub fn new(expr: Node, ascending: bool) -> Self {
        SortTermNode {
            expr: Box::new(expr),
            ascending,
        }
    }

    pub fn expr(&self) -> &Node {
        &self.expr
    }

    /// The sorted expression as the node's single child.
    pub fn children(&self) -> &[Node] {
        slice::from_ref(self.expr.as_ref())
    }
}

/// `ORDERBY` clause; children are the sort terms in priority order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortNode {
    children: Vec<Node>,
}

impl SortNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, term: Node) {
        self.children.push(term);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// `GROUPBY` clause; children are the grouping expressions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupNode {
    children: Vec<Node>,
}

impl GroupNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, term: Node) {
        self.children.push(term);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

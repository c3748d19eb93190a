use crate::ast::Node;

/// Conjunction of two restrictions.
#[derive(Debug, Clone, PartialEq)]
pub struct AndNode {
    pub negated: bool,
    children: Vec<Node>,
}

impl AndNode {
    pub fn new(lhs: Node, rhs: Node) -> Self {
        AndNode {
            negated: false,
            children: vec![lhs, rhs],
        }
    }

    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Disjunction of two restrictions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrNode {
    pub negated: bool,
    children: Vec<Node>,
}

impl OrNode {
    pub fn new(lhs: Node, rhs: Node) -> Self {
        OrNode {
            negated: false,
            children: vec![lhs, rhs],
        }
    }

    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A relation of type `rtype`; children are its role arguments in order.
///
/// # Examples
/// ```text
/// X works_for Y
/// NOT X in_state S
/// X name "foo"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RelationNode {
    rtype: String,
    pub negated: bool,
    children: Vec<Node>,
}

impl RelationNode {
    pub fn new(rtype: impl Into<String>) -> Self {
        RelationNode {
            rtype: rtype.into(),
            negated: false,
            children: Vec::new(),
        }
    }

    pub fn rtype(&self) -> &str {
        &self.rtype
    }

    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

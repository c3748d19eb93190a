use std::fmt;

use crate::ast::{
    AndNode, ComparisonNode, Constant, DeleteStmt, FuncNode, GroupNode, InsertStmt,
    MathExpression, OrNode, RelationNode, SelectStmt, SortNode, SortTermNode, UpdateStmt, VarNode,
};

/// Any node of the tree.
///
/// The set of kinds is closed: traversals match on it exhaustively, so a new
/// kind cannot be added without every traversal handling it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Expressions
    Constant(Constant),
    Var(VarNode),
    Func(FuncNode),
    Math(MathExpression),
    Comparison(ComparisonNode),

    // Restrictions
    And(AndNode),
    Or(OrNode),
    Relation(RelationNode),

    // Ordering and grouping
    SortTerm(SortTermNode),
    Sort(SortNode),
    Group(GroupNode),

    // Statements
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Constant(_) => NodeKind::Constant,
            Node::Var(_) => NodeKind::Var,
            Node::Func(_) => NodeKind::Func,
            Node::Math(_) => NodeKind::Math,
            Node::Comparison(_) => NodeKind::Comparison,
            Node::And(_) => NodeKind::And,
            Node::Or(_) => NodeKind::Or,
            Node::Relation(_) => NodeKind::Relation,
            Node::SortTerm(_) => NodeKind::SortTerm,
            Node::Sort(_) => NodeKind::Sort,
            Node::Group(_) => NodeKind::Group,
            Node::Select(_) => NodeKind::Select,
            Node::Insert(_) => NodeKind::Insert,
            Node::Update(_) => NodeKind::Update,
            Node::Delete(_) => NodeKind::Delete,
        }
    }

    /// Owned children in insertion order. Empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Constant(_) | Node::Var(_) => &[],
            Node::Func(n) => n.children(),
            Node::Math(n) => n.children(),
            Node::Comparison(n) => n.children(),
            Node::And(n) => n.children(),
            Node::Or(n) => n.children(),
            Node::Relation(n) => n.children(),
            Node::SortTerm(n) => n.children(),
            Node::Sort(n) => n.children(),
            Node::Group(n) => n.children(),
            Node::Select(n) => n.children(),
            Node::Insert(n) => n.children(),
            Node::Update(n) => n.children(),
            Node::Delete(n) => n.children(),
        }
    }

    pub fn is_statement(&self) -> bool {
        self.kind().is_statement()
    }
}

/// Discriminant of [`Node`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Constant,
    Var,
    Func,
    Math,
    Comparison,
    And,
    Or,
    Relation,
    SortTerm,
    Sort,
    Group,
    Select,
    Insert,
    Update,
    Delete,
}

impl NodeKind {
    /// Display name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Constant => "Constant",
            NodeKind::Var => "VarNode",
            NodeKind::Func => "FuncNode",
            NodeKind::Math => "MathExpression",
            NodeKind::Comparison => "ComparisonNode",
            NodeKind::And => "AndNode",
            NodeKind::Or => "OrNode",
            NodeKind::Relation => "RelationNode",
            NodeKind::SortTerm => "SortTermNode",
            NodeKind::Sort => "SortNode",
            NodeKind::Group => "GroupNode",
            NodeKind::Select => "SelectStmt",
            NodeKind::Insert => "InsertStmt",
            NodeKind::Update => "UpdateStmt",
            NodeKind::Delete => "DeleteStmt",
        }
    }

    /// Number of children the kind must carry, for fixed-arity kinds.
    pub fn arity(&self) -> Option<usize> {
        match self {
            NodeKind::Comparison => Some(1),
            NodeKind::Math | NodeKind::And | NodeKind::Or => Some(2),
            _ => None,
        }
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::Select | NodeKind::Insert | NodeKind::Update | NodeKind::Delete
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! impl_from_node {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(
    Constant(Constant),
    Var(VarNode),
    Func(FuncNode),
    Math(MathExpression),
    Comparison(ComparisonNode),
    And(AndNode),
    Or(OrNode),
    Relation(RelationNode),
    SortTerm(SortTermNode),
    Sort(SortNode),
    Group(GroupNode),
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
);

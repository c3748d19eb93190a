//! Canonical text rendering of a syntax tree, for debugging and diagnostics.
//!
//! Every node renders as `Kind(field=value, ..., child, ...)`: fields specific
//! to the kind come first, then the children in order, comma separated.
//! Constants render their tag and value directly.
//!
//! # Examples
//!
//! ```
//! use rql_ast::ast::{ComparisonNode, Constant, Node};
//! use rql_ast::output::to_text;
//!
//! let node = Node::Comparison(ComparisonNode::new(">", Node::Constant(Constant::int(18))));
//! assert_eq!(to_text(&node), "ComparisonNode(op=>, Constant(Int, 18))");
//! ```
//!
//! The rendering is stable across runs but is not meant to be parsed back.

use std::fmt::{self, Write};

use crate::ast::{
    AndNode, ComparisonNode, Constant, DeleteStmt, FuncNode, GroupNode, InsertStmt,
    MathExpression, Node, NodeKind, OrNode, RelationNode, SelectStmt, SortNode, SortTermNode,
    StmtNode, UpdateStmt, VarNode,
};
use crate::visitor::Visitor;

/// Tracks whether a separator is due inside one pair of parentheses.
#[derive(Default)]
struct Separator {
    started: bool,
}

impl Separator {
    fn next<W: Write>(&mut self, out: &mut W) -> fmt::Result {
        if self.started {
            out.write_str(", ")?;
        }
        self.started = true;
        Ok(())
    }
}

pub struct DisplayVisitor<W> {
    out: W,
}

impl<W: Write> DisplayVisitor<W> {
    pub fn new(out: W) -> Self {
        DisplayVisitor { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn node(
        &mut self,
        kind: NodeKind,
        fields: &[(&str, &dyn fmt::Display)],
        children: &[Node],
    ) -> fmt::Result {
        write!(self.out, "{}(", kind)?;
        let mut sep = Separator::default();
        for (key, value) in fields {
            sep.next(&mut self.out)?;
            write!(self.out, "{}={}", key, value)?;
        }
        for child in children {
            sep.next(&mut self.out)?;
            self.visit(child)?;
        }
        self.out.write_char(')')
    }

    fn statement(
        &mut self,
        kind: NodeKind,
        stmt: &StmtNode,
        fields: &[(&str, &dyn fmt::Display)],
        selected: Option<&[Node]>,
    ) -> fmt::Result {
        write!(self.out, "{}(", kind)?;
        let mut sep = Separator::default();
        for (key, value) in fields {
            sep.next(&mut self.out)?;
            write!(self.out, "{}={}", key, value)?;
        }
        if let Some(selected) = selected {
            sep.next(&mut self.out)?;
            self.out.write_str("selected=[")?;
            let mut inner = Separator::default();
            for expr in selected {
                inner.next(&mut self.out)?;
                self.visit(expr)?;
            }
            self.out.write_char(']')?;
        }

        sep.next(&mut self.out)?;
        self.out.write_str("variables=[")?;
        let mut inner = Separator::default();
        for (etype, var) in stmt.main_variables() {
            inner.next(&mut self.out)?;
            write!(self.out, "{} ", etype)?;
            self.visit_var(var)?;
        }
        self.out.write_char(']')?;

        sep.next(&mut self.out)?;
        self.out.write_str("relations=[")?;
        let mut inner = Separator::default();
        for relation in stmt.main_relations() {
            inner.next(&mut self.out)?;
            self.visit_relation(relation)?;
        }
        self.out.write_char(']')?;

        for child in stmt.children() {
            sep.next(&mut self.out)?;
            self.visit(child)?;
        }
        self.out.write_char(')')
    }
}

impl<W: Write> Visitor for DisplayVisitor<W> {
    type Error = fmt::Error;

    fn visit_constant(&mut self, node: &Constant) -> fmt::Result {
        write!(self.out, "Constant({}, {})", node.tag(), node.value())
    }

    fn visit_var(&mut self, node: &VarNode) -> fmt::Result {
        write!(self.out, "VarNode({})", node.name())
    }

    fn visit_func(&mut self, node: &FuncNode) -> fmt::Result {
        self.node(NodeKind::Func, &[("name", &node.name())], node.children())
    }

    fn visit_math(&mut self, node: &MathExpression) -> fmt::Result {
        self.node(NodeKind::Math, &[("op", &node.op())], node.children())
    }

    fn visit_comparison(&mut self, node: &ComparisonNode) -> fmt::Result {
        self.node(NodeKind::Comparison, &[("op", &node.op())], node.children())
    }

    fn visit_and(&mut self, node: &AndNode) -> fmt::Result {
        self.node(NodeKind::And, &[("negated", &node.negated)], node.children())
    }

    fn visit_or(&mut self, node: &OrNode) -> fmt::Result {
        self.node(NodeKind::Or, &[("negated", &node.negated)], node.children())
    }

    fn visit_relation(&mut self, node: &RelationNode) -> fmt::Result {
        self.node(
            NodeKind::Relation,
            &[("negated", &node.negated), ("type", &node.rtype())],
            node.children(),
        )
    }

    fn visit_sort_term(&mut self, node: &SortTermNode) -> fmt::Result {
        self.node(
            NodeKind::SortTerm,
            &[("ascending", &node.ascending)],
            node.children(),
        )
    }

    fn visit_sort(&mut self, node: &SortNode) -> fmt::Result {
        self.node(NodeKind::Sort, &[], node.children())
    }

    fn visit_group(&mut self, node: &GroupNode) -> fmt::Result {
        self.node(NodeKind::Group, &[], node.children())
    }

    fn visit_select(&mut self, node: &SelectStmt) -> fmt::Result {
        let limit = OptionalCount(node.limit());
        let offset = OptionalCount(node.offset());
        self.statement(
            NodeKind::Select,
            node,
            &[
                ("distinct", &node.distinct),
                ("limit", &limit),
                ("offset", &offset),
                ("type", &node.statement_type()),
            ],
            Some(node.selected()),
        )
    }

    fn visit_insert(&mut self, node: &InsertStmt) -> fmt::Result {
        self.statement(NodeKind::Insert, node, &[], None)
    }

    fn visit_update(&mut self, node: &UpdateStmt) -> fmt::Result {
        self.statement(NodeKind::Update, node, &[], None)
    }

    fn visit_delete(&mut self, node: &DeleteStmt) -> fmt::Result {
        self.statement(NodeKind::Delete, node, &[], None)
    }
}

struct OptionalCount(Option<u64>);

impl fmt::Display for OptionalCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{}", n),
            None => f.write_str("unset"),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DisplayVisitor::new(f).visit(self)
    }
}

/// Renders a tree to its canonical text.
pub fn to_text(node: &Node) -> String {
    node.to_string()
}

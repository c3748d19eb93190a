//! Traversal protocol over the syntax tree.
//!
//! [`Visitor::visit`] dispatches on the node kind with an exhaustive match to
//! one `visit_*` method per kind. Every method defaults to visiting the
//! node's children left to right, so a traversal only overrides the kinds it
//! cares about. Traversals borrow the tree immutably; any state lives in the
//! visitor itself.

use crate::ast::{
    AndNode, ComparisonNode, Constant, DeleteStmt, FuncNode, GroupNode, InsertStmt,
    MathExpression, Node, OrNode, RelationNode, SelectStmt, SortNode, SortTermNode, UpdateStmt,
    VarNode,
};

pub trait Visitor {
    type Error;

    /// Main entry point.
    fn visit(&mut self, node: &Node) -> Result<(), Self::Error> {
        dispatch(self, node)
    }

    fn visit_constant(&mut self, _node: &Constant) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_var(&mut self, _node: &VarNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_func(&mut self, node: &FuncNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_math(&mut self, node: &MathExpression) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_comparison(&mut self, node: &ComparisonNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_and(&mut self, node: &AndNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_or(&mut self, node: &OrNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_relation(&mut self, node: &RelationNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_sort_term(&mut self, node: &SortTermNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_sort(&mut self, node: &SortNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_group(&mut self, node: &GroupNode) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_select(&mut self, node: &SelectStmt) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_insert(&mut self, node: &InsertStmt) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_update(&mut self, node: &UpdateStmt) -> Result<(), Self::Error> {
        walk(self, node.children())
    }

    fn visit_delete(&mut self, node: &DeleteStmt) -> Result<(), Self::Error> {
        walk(self, node.children())
    }
}

/// Routes `node` to the `visit_*` method of its kind.
///
/// Traversals overriding [`Visitor::visit`] call this to continue the
/// normal dispatch.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) -> Result<(), V::Error> {
    match node {
        Node::Constant(n) => visitor.visit_constant(n),
        Node::Var(n) => visitor.visit_var(n),
        Node::Func(n) => visitor.visit_func(n),
        Node::Math(n) => visitor.visit_math(n),
        Node::Comparison(n) => visitor.visit_comparison(n),
        Node::And(n) => visitor.visit_and(n),
        Node::Or(n) => visitor.visit_or(n),
        Node::Relation(n) => visitor.visit_relation(n),
        Node::SortTerm(n) => visitor.visit_sort_term(n),
        Node::Sort(n) => visitor.visit_sort(n),
        Node::Group(n) => visitor.visit_group(n),
        Node::Select(n) => visitor.visit_select(n),
        Node::Insert(n) => visitor.visit_insert(n),
        Node::Update(n) => visitor.visit_update(n),
        Node::Delete(n) => visitor.visit_delete(n),
    }
}

/// Visits each node in order, stopping at the first error.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, nodes: &[Node]) -> Result<(), V::Error> {
    for node in nodes {
        visitor.visit(node)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the kind of every node reached through the default walk.
    #[derive(Default)]
    struct KindCollector {
        seen: Vec<&'static str>,
    }

    impl Visitor for KindCollector {
        type Error = ();

        fn visit(&mut self, node: &Node) -> Result<(), ()> {
            self.seen.push(node.kind().name());
            dispatch(self, node)
        }
    }

    #[test]
    fn default_walk_is_preorder_left_to_right() {
        let mut relation = RelationNode::new("age");
        relation.append(Node::Var(VarNode::new("X")));
        relation.append(Node::Comparison(ComparisonNode::new(
            ">",
            Node::Math(MathExpression::new(
                "+",
                Node::Constant(Constant::int(1)),
                Node::Var(VarNode::new("Y")),
            )),
        )));
        let mut select = SelectStmt::new(None);
        select.append(Node::Relation(relation));
        let mut sort = SortNode::new();
        sort.append(Node::SortTerm(SortTermNode::new(Node::Var(VarNode::new("X")), true)));
        select.append(Node::Sort(sort));

        let mut collector = KindCollector::default();
        collector.visit(&Node::Select(select)).unwrap();

        assert_eq!(
            collector.seen,
            vec![
                "SelectStmt",
                "RelationNode",
                "VarNode",
                "ComparisonNode",
                "MathExpression",
                "Constant",
                "VarNode",
                "SortNode",
                "SortTermNode",
                "VarNode",
            ]
        );
    }

    #[test]
    fn walk_stops_at_first_error() {
        struct FailOnVar(usize);

        impl Visitor for FailOnVar {
            type Error = String;

            fn visit_constant(&mut self, _node: &Constant) -> Result<(), String> {
                self.0 += 1;
                Ok(())
            }

            fn visit_var(&mut self, node: &VarNode) -> Result<(), String> {
                Err(node.name().to_string())
            }
        }

        let mut func = FuncNode::new("F");
        func.append(Node::Constant(Constant::int(1)));
        func.append(Node::Var(VarNode::new("X")));
        func.append(Node::Constant(Constant::int(2)));

        let mut visitor = FailOnVar(0);
        let err = visitor.visit(&Node::Func(func)).unwrap_err();
        assert_eq!(err, "X");
        assert_eq!(visitor.0, 1);
    }
}

// tests/ast_tests.rs

use std::sync::Arc;

use rql_ast::ast::*;
use rql_ast::{TypeRegistry, UnknownTypeError, Visitor};

fn registry(names: &[&str]) -> Option<Arc<TypeRegistry>> {
    Some(Arc::new(names.iter().copied().collect()))
}

// ============================================================================
// Type registry
// ============================================================================

#[test]
fn test_registry_accepts_registered_types() {
    let mut types = TypeRegistry::new();
    types.add_type("Person");
    types.add_type("Company");

    assert!(types.has_type("Person"));
    assert!(!types.has_type("person"));
    assert_eq!(types.len(), 2);

    let constant = types.get_type("Company").unwrap();
    assert_eq!(constant.tag(), "etype");
    assert_eq!(constant.value(), &Literal::EntityType("Company".to_string()));
}

#[test]
fn test_registry_rejects_unknown_type() {
    let types: TypeRegistry = ["Person"].into_iter().collect();

    let err = types.get_type("Planet").unwrap_err();
    assert_eq!(err.name, "Planet");
    assert_eq!(err.to_string(), "Unknown type: Planet");
}

#[test]
fn test_registry_lists_types_sorted() {
    let mut types = TypeRegistry::new();
    types.extend(["Tag", "Person", "Company", "Person"]);

    let names: Vec<_> = types.types().collect();
    assert_eq!(names, vec!["Company", "Person", "Tag"]);
}

#[test]
fn test_statement_without_registry_accepts_any_type() {
    let stmt = SelectStmt::new(None);
    let constant = stmt.get_type("Anything").unwrap();
    assert_eq!(constant.value(), &Literal::EntityType("Anything".to_string()));
}

#[test]
fn test_statement_with_registry_validates_types() {
    let stmt = UpdateStmt::new(registry(&["Person"]));
    assert!(stmt.get_type("Person").is_ok());
    assert_eq!(
        stmt.get_type("Company").unwrap_err(),
        UnknownTypeError::new("Company")
    );
}

#[test]
fn test_statements_share_one_registry() {
    let shared = registry(&["Person"]);
    let select = SelectStmt::new(shared.clone());
    let delete = DeleteStmt::new(shared.clone());

    assert_eq!(select.registry(), delete.registry());
    assert_eq!(Arc::strong_count(shared.as_ref().unwrap()), 3);
}

// ============================================================================
// Node graph
// ============================================================================

#[test]
fn test_constants_carry_tags() {
    let cases = [
        (Constant::int(1), "Int"),
        (Constant::float(0.5), "Float"),
        (Constant::string("x"), "String"),
        (Constant::null(), "NULL"),
        (Constant::new(Literal::Boolean(true)), "Boolean"),
        (Constant::new(Literal::Date("TODAY".into())), "Date"),
        (Constant::new(Literal::Datetime("NOW".into())), "Datetime"),
        (Constant::new(Literal::Substitute("eid".into())), "Substitute"),
    ];
    for (constant, tag) in cases {
        assert_eq!(constant.tag(), tag);
    }
}

#[test]
fn test_children_keep_insertion_order() {
    let mut func = FuncNode::new("CONCAT");
    for name in ["A", "B", "C"] {
        func.append(Node::Var(VarNode::new(name)));
    }

    let names: Vec<_> = func
        .children()
        .iter()
        .map(|child| match child {
            Node::Var(var) => var.name(),
            other => panic!("Expected variable, got {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_binary_constructors_append_both_sides() {
    let math = MathExpression::new("+", Constant::int(1).into(), Constant::int(2).into());
    assert_eq!(math.op(), "+");
    assert_eq!(math.children().len(), 2);
    assert_eq!(math.children()[0], Node::Constant(Constant::int(1)));

    let and = AndNode::new(RelationNode::new("a").into(), RelationNode::new("b").into());
    assert!(!and.negated);
    assert_eq!(and.children().len(), 2);

    let comparison = ComparisonNode::new("<=", Constant::int(3).into());
    assert_eq!(comparison.children().len(), 1);
}

#[test]
fn test_node_kind_names_and_arity() {
    let node: Node = ComparisonNode::new("=", Constant::int(1).into()).into();
    assert_eq!(node.kind(), NodeKind::Comparison);
    assert_eq!(node.kind().name(), "ComparisonNode");
    assert_eq!(node.kind().arity(), Some(1));

    assert_eq!(NodeKind::Math.arity(), Some(2));
    assert_eq!(NodeKind::And.arity(), Some(2));
    assert_eq!(NodeKind::Or.arity(), Some(2));
    assert_eq!(NodeKind::Func.arity(), None);
    assert_eq!(NodeKind::Relation.arity(), None);
}

#[test]
fn test_statement_roots() {
    let roots: Vec<Node> = vec![
        SelectStmt::new(None).into(),
        InsertStmt::new(None).into(),
        UpdateStmt::new(None).into(),
        DeleteStmt::new(None).into(),
    ];
    assert!(roots.iter().all(Node::is_statement));
    assert!(!Node::from(VarNode::new("X")).is_statement());
}

#[test]
fn test_sort_term_exposes_its_expression() {
    let term = SortTermNode::new(VarNode::new("X").into(), true);
    assert!(term.ascending);
    assert_eq!(term.expr(), &Node::Var(VarNode::new("X")));
    assert_eq!(term.children().len(), 1);
}

#[test]
fn test_statement_node_children_are_generic_children() {
    let mut select = SelectStmt::new(None);
    select.append(RelationNode::new("age").into());
    select.append_selected(VarNode::new("X").into());

    let root = Node::Select(select);
    // selected expressions are not generic children
    assert_eq!(root.children().len(), 1);
}

// ============================================================================
// Visitor
// ============================================================================

#[derive(Default)]
struct RelationCounter {
    relations: Vec<String>,
}

impl Visitor for RelationCounter {
    type Error = std::convert::Infallible;

    fn visit_relation(&mut self, node: &RelationNode) -> Result<(), Self::Error> {
        self.relations.push(node.rtype().to_string());
        rql_ast::visitor::walk(self, node.children())
    }
}

#[test]
fn test_default_visitor_reaches_nested_relations() {
    let mut select = SelectStmt::new(None);
    let or = OrNode::new(
        RelationNode::new("works_for").into(),
        AndNode::new(RelationNode::new("name").into(), RelationNode::new("age").into()).into(),
    );
    select.append(or.into());

    let mut counter = RelationCounter::default();
    counter.visit(&Node::Select(select)).unwrap();

    assert_eq!(counter.relations, vec!["works_for", "name", "age"]);
}

#[test]
fn test_dropping_root_releases_registry_handle() {
    let shared = registry(&["Person"]);
    let root = Node::Select(SelectStmt::new(shared.clone()));
    assert_eq!(Arc::strong_count(shared.as_ref().unwrap()), 2);

    drop(root);
    assert_eq!(Arc::strong_count(shared.as_ref().unwrap()), 1);
}

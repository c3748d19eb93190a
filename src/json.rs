//! A ready-made backend building `serde_json::Value` trees.
//!
//! Every object is a JSON object whose `"type"` field names its factory
//! category. Binary operands are stored under `"operands"` in the order the
//! factory received them, which is stack-pop order (second child first).
//!
//! # Examples
//!
//! ```
//! use rql_ast::ast::{ComparisonNode, Constant, Node, RelationNode, SelectStmt};
//! use rql_ast::json::to_json;
//!
//! let mut select = SelectStmt::new(None);
//! let mut age = RelationNode::new("age");
//! age.append(Node::Var(select.get_variable("X")));
//! age.append(Node::Comparison(ComparisonNode::new(">", Node::Constant(Constant::int(18)))));
//! select.append(Node::Relation(age));
//! select.set_limit(10);
//!
//! let value = to_json(&Node::Select(select)).unwrap();
//! assert_eq!(value["type"], "Select");
//! assert_eq!(value["limit"], 10);
//! assert_eq!(value["children"][0]["rtype"], "age");
//! ```

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::ast::{Literal, Node};
use crate::builder::{Backend, ExternalNode, build};
use crate::error::BuildError;
use crate::types::TypeRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {hook} on a non-object JSON value")]
pub struct JsonShapeError {
    pub hook: &'static str,
}

/// Builds plain JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend;

/// Builds the JSON representation of `root`.
pub fn to_json(root: &Node) -> Result<Value, BuildError> {
    build(&mut JsonBackend, root)
}

fn literal_value(value: &Literal) -> Value {
    match value {
        Literal::Int(n) => json!(n),
        Literal::Float(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Literal::Null => Value::Null,
        Literal::Boolean(b) => json!(b),
        Literal::String(s)
        | Literal::EntityType(s)
        | Literal::Date(s)
        | Literal::Datetime(s)
        | Literal::Substitute(s) => json!(s),
    }
}

fn statement(kind: &str, registry: Option<&TypeRegistry>) -> Value {
    let etypes = registry.map(|registry| registry.types().collect::<Vec<_>>());
    json!({
        "type": kind,
        "etypes": etypes,
        "children": [],
        "main_variables": [],
        "main_relations": [],
    })
}

impl Backend for JsonBackend {
    type Object = Value;

    fn constant(&mut self, value: &Literal, tag: &str) -> Option<Value> {
        Some(json!({ "type": "Constant", "tag": tag, "value": literal_value(value) }))
    }

    fn function(&mut self, name: &str) -> Option<Value> {
        Some(json!({ "type": "Function", "name": name, "children": [] }))
    }

    fn relation(&mut self, rtype: &str, negated: bool) -> Option<Value> {
        Some(json!({ "type": "Relation", "rtype": rtype, "negated": negated, "children": [] }))
    }

    fn comparison(&mut self, op: &str, operand: Value) -> Option<Value> {
        Some(json!({ "type": "Comparison", "op": op, "operand": operand }))
    }

    fn and(&mut self, first: Value, second: Value) -> Option<Value> {
        Some(json!({ "type": "AND", "operands": [first, second] }))
    }

    fn or(&mut self, first: Value, second: Value) -> Option<Value> {
        Some(json!({ "type": "OR", "operands": [first, second] }))
    }

    fn variable_ref(&mut self, variable: Value) -> Option<Value> {
        Some(json!({ "type": "VariableRef", "variable": variable }))
    }

    fn select(&mut self, registry: Option<&TypeRegistry>) -> Option<Value> {
        let mut object = statement("Select", registry);
        object["selected"] = json!([]);
        Some(object)
    }

    fn insert(&mut self, registry: Option<&TypeRegistry>) -> Option<Value> {
        Some(statement("Insert", registry))
    }

    fn update(&mut self, registry: Option<&TypeRegistry>) -> Option<Value> {
        Some(statement("Update", registry))
    }

    fn delete(&mut self, registry: Option<&TypeRegistry>) -> Option<Value> {
        Some(statement("Delete", registry))
    }

    fn math_expression(&mut self, op: &str, first: Value, second: Value) -> Option<Value> {
        Some(json!({ "type": "MathExpression", "op": op, "operands": [first, second] }))
    }

    fn sort(&mut self) -> Option<Value> {
        Some(json!({ "type": "Sort", "children": [] }))
    }

    fn sort_term(&mut self, expr: Value, ascending: bool) -> Option<Value> {
        Some(json!({ "type": "SortTerm", "expr": expr, "ascending": ascending }))
    }

    fn group(&mut self) -> Option<Value> {
        Some(json!({ "type": "Group", "children": [] }))
    }
}

fn fields<'a>(
    value: &'a mut Value,
    hook: &'static str,
) -> Result<&'a mut Map<String, Value>, JsonShapeError> {
    value.as_object_mut().ok_or(JsonShapeError { hook })
}

fn push_to(value: &mut Value, key: &str, item: Value, hook: &'static str) -> Result<(), JsonShapeError> {
    let entry = fields(value, hook)?
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()));
    match entry.as_array_mut() {
        Some(items) => {
            items.push(item);
            Ok(())
        }
        None => Err(JsonShapeError { hook }),
    }
}

impl ExternalNode for Value {
    type Error = JsonShapeError;

    fn append(&mut self, child: Value) -> Result<(), JsonShapeError> {
        push_to(self, "children", child, "append")
    }

    fn append_selected(&mut self, expr: Value) -> Result<(), JsonShapeError> {
        push_to(self, "selected", expr, "append_selected")
    }

    fn add_main_variable(&mut self, etype: &str, variable: Value) -> Result<(), JsonShapeError> {
        let entry = json!({ "etype": etype, "variable": variable });
        push_to(self, "main_variables", entry, "add_main_variable")
    }

    fn add_main_relation(&mut self, relation: Value) -> Result<(), JsonShapeError> {
        push_to(self, "main_relations", relation, "add_main_relation")
    }

    fn set_distinct(&mut self, distinct: bool) -> Result<(), JsonShapeError> {
        fields(self, "set_distinct")?.insert("distinct".into(), json!(distinct));
        Ok(())
    }

    fn set_limit(&mut self, limit: u64) -> Result<(), JsonShapeError> {
        fields(self, "set_limit")?.insert("limit".into(), json!(limit));
        Ok(())
    }

    fn set_offset(&mut self, offset: u64) -> Result<(), JsonShapeError> {
        fields(self, "set_offset")?.insert("offset".into(), json!(offset));
        Ok(())
    }

    fn set_statement_type(&mut self, kind: &str) -> Result<(), JsonShapeError> {
        fields(self, "set_statement_type")?.insert("statement_type".into(), json!(kind));
        Ok(())
    }

    fn get_variable(&mut self, name: &str) -> Option<Value> {
        self.is_object()
            .then(|| json!({ "type": "Variable", "name": name }))
    }
}

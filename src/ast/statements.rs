use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::ast::{Constant, Node, RelationNode, VarNode};
use crate::error::UnknownTypeError;
use crate::types::{TypeRegistry, resolve_type};

/// Source offsets of a statement, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The spanned text, or `None` when the span does not fall on character
    /// boundaries of `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

/// Bookkeeping shared by every statement kind.
///
/// Main variables and main relations are filled in by the parser while the
/// statement is built and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StmtNode {
    children: Vec<Node>,
    main_variables: Vec<(String, VarNode)>,
    main_relations: Vec<RelationNode>,
    // Name -> variable cache. Never populated: get_variable allocates fresh.
    variables: HashMap<String, VarNode>,
    registry: Option<Arc<TypeRegistry>>,
    pub span: Span,
}

impl StmtNode {
    pub fn new(registry: Option<Arc<TypeRegistry>>) -> Self {
        StmtNode {
            registry,
            ..Self::default()
        }
    }

    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Declares `var` as a main variable of entity type `etype`.
    pub fn add_main_variable(&mut self, etype: impl Into<String>, var: VarNode) {
        self.main_variables.push((etype.into(), var));
    }

    pub fn add_main_relation(&mut self, relation: RelationNode) {
        self.main_relations.push(relation);
    }

    pub fn main_variables(&self) -> &[(String, VarNode)] {
        &self.main_variables
    }

    pub fn main_relations(&self) -> &[RelationNode] {
        &self.main_relations
    }

    /// A new reference to `name`. Each call allocates a fresh node; nothing
    /// is interned.
    pub fn get_variable(&self, name: &str) -> VarNode {
        VarNode::new(name)
    }

    /// Materializes a type reference, validated against the bound registry
    /// when there is one.
    pub fn get_type(&self, name: &str) -> Result<Constant, UnknownTypeError> {
        resolve_type(self.registry.as_deref(), name)
    }

    pub fn registry(&self) -> Option<&TypeRegistry> {
        self.registry.as_deref()
    }

    /// The name -> variable cache. Always empty, see [`StmtNode::get_variable`].
    pub fn variable_cache(&self) -> &HashMap<String, VarNode> {
        &self.variables
    }
}

/// `Any X WHERE ...`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStmt {
    base: StmtNode,
    pub distinct: bool,
    limit: Option<u64>,
    offset: Option<u64>,
    selected: Vec<Node>,
    statement_type: String,
}

impl SelectStmt {
    pub fn new(registry: Option<Arc<TypeRegistry>>) -> Self {
        SelectStmt {
            base: StmtNode::new(registry),
            ..Self::default()
        }
    }

    /// Free-form tag the parser attaches, e.g. `Any`.
    pub fn set_statement_type(&mut self, kind: impl Into<String>) {
        self.statement_type = kind.into();
    }

    pub fn statement_type(&self) -> &str {
        &self.statement_type
    }

    pub fn append_selected(&mut self, expr: Node) {
        self.selected.push(expr);
    }

    pub fn selected(&self) -> &[Node] {
        &self.selected
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }
}

impl Deref for SelectStmt {
    type Target = StmtNode;

    fn deref(&self) -> &StmtNode {
        &self.base
    }
}

impl DerefMut for SelectStmt {
    fn deref_mut(&mut self) -> &mut StmtNode {
        &mut self.base
    }
}

macro_rules! plain_statement {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            base: StmtNode,
        }

        impl $name {
            pub fn new(registry: Option<Arc<TypeRegistry>>) -> Self {
                $name {
                    base: StmtNode::new(registry),
                }
            }
        }

        impl Deref for $name {
            type Target = StmtNode;

            fn deref(&self) -> &StmtNode {
                &self.base
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut StmtNode {
                &mut self.base
            }
        }
    };
}

plain_statement!(
    /// `INSERT Person X: X name "foo"`
    InsertStmt
);

plain_statement!(
    /// `SET X name "bar" WHERE ...`
    UpdateStmt
);

plain_statement!(
    /// `DELETE Person X WHERE ...`
    DeleteStmt
);

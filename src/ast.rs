//! # RQL Abstract Syntax Tree
//!
//! This module defines the tree a parsed RQL statement is turned into.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[literals]** - Literal values carried by constants
//! - **[expressions]** - Expression nodes (constants, variables, functions, arithmetic, comparisons)
//! - **[relations]** - Relation nodes and their boolean combinators
//! - **[ordering]** - Sort and group clauses
//! - **[statements]** - Statement roots and their per-statement bookkeeping
//! - **[node]** - The closed [`Node`] sum type tying every kind together
//!
//! ## Ownership
//!
//! The tree is strictly tree-shaped: every node exclusively owns its children,
//! children keep their insertion order, and there are no parent links.
//! Dropping a root releases the whole tree.
//!
//! ## Example
//!
//! ```text
//! Any X WHERE X is Person, X age > 18
//! ```
//!
//! is built by the parser roughly as
//!
//! ```
//! use rql_ast::ast::*;
//!
//! let mut select = SelectStmt::new(None);
//! let x = select.get_variable("X");
//! select.append_selected(Node::Var(x));
//!
//! let mut age = RelationNode::new("age");
//! age.append(Node::Var(select.get_variable("X")));
//! age.append(Node::Comparison(ComparisonNode::new(">", Node::Constant(Constant::int(18)))));
//! select.append(Node::Relation(age));
//!
//! assert_eq!(select.children().len(), 1);
//! ```
pub mod expressions;
pub mod literals;
pub mod node;
pub mod ordering;
pub mod relations;
pub mod statements;

pub use expressions::{ComparisonNode, Constant, FuncNode, MathExpression, VarNode};
pub use literals::Literal;
pub use node::{Node, NodeKind};
pub use ordering::{GroupNode, SortNode, SortTermNode};
pub use relations::{AndNode, OrNode, RelationNode};
pub use statements::{DeleteStmt, InsertStmt, SelectStmt, Span, StmtNode, UpdateStmt};

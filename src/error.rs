//! Error types shared by tree construction and the builder traversal.

use thiserror::Error;

use crate::ast::NodeKind;
use crate::factory::FactoryKey;

/// A type reference named an entity type the registry does not know.
///
/// Raised while the tree is being constructed, before any node for the
/// reference exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown type: {name}")]
pub struct UnknownTypeError {
    pub name: String,
}

impl UnknownTypeError {
    pub fn new(name: impl Into<String>) -> Self {
        UnknownTypeError { name: name.into() }
    }
}

/// Internal defects of the builder's value stack.
///
/// These are unreachable while arity checks hold; seeing one means a bug in
/// the traversal rather than a bad query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("Empty stack")]
    StackUnderflow,

    #[error("variable {name} referenced outside of any statement")]
    UnboundVariable { name: String },

    #[error("no statement object under assembly")]
    NoStatement,
}

/// Errors aborting a builder traversal.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A fixed-arity node does not carry its declared number of children.
    #[error("{kind}: expected {expected} children, found {found}")]
    Arity {
        kind: NodeKind,
        expected: usize,
        found: usize,
    },

    /// A backend factory produced no object.
    #[error("factory {factory} produced no object")]
    Construction { factory: FactoryKey },

    /// The external object graph rejected an assembly hook.
    #[error("external object rejected {hook}: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Errors raised while setting up a factory table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Need a factory for {key}")]
    MissingFactory { key: FactoryKey },
}

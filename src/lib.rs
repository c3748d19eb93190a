pub mod ast;
pub mod builder;
pub mod error;
pub mod factory;
#[cfg(feature = "json")]
pub mod json;
pub mod lexeme;
pub mod output;
pub mod types;
pub mod visitor;

pub use ast::{Literal, Node, NodeKind};
pub use builder::{Backend, Builder, ExternalNode, build};
pub use error::{BuildError, SetupError, TransformError, UnknownTypeError};
pub use factory::{Arg, Factory, FactoryKey, FactoryTable};
pub use lexeme::{is_e_type, is_funcname, is_r_type, is_var, unquote};
pub use output::{DisplayVisitor, to_text};
pub use types::TypeRegistry;
pub use visitor::Visitor;

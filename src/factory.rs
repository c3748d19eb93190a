//! Name-keyed factory tables.
//!
//! [`FactoryTable`] adapts a map of named constructor closures into a
//! [`Backend`]. The map is validated once, when the table is set up: every
//! key of [`FactoryKey::ALL`] must be present, and building never looks a
//! name up again afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::ast::Literal;
use crate::builder::{Backend, ExternalNode};
use crate::error::SetupError;
use crate::types::TypeRegistry;

/// Node categories a backend provides a factory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKey {
    Constant,
    Function,
    Relation,
    Comparison,
    And,
    Or,
    VariableRef,
    Insert,
    Select,
    Delete,
    Update,
    MathExpression,
    Sort,
    SortTerm,
    Group,
}

impl FactoryKey {
    /// Every required key, in setup order.
    pub const ALL: [FactoryKey; 15] = [
        FactoryKey::Constant,
        FactoryKey::Function,
        FactoryKey::Relation,
        FactoryKey::Comparison,
        FactoryKey::And,
        FactoryKey::Or,
        FactoryKey::VariableRef,
        FactoryKey::Insert,
        FactoryKey::Select,
        FactoryKey::Delete,
        FactoryKey::Update,
        FactoryKey::MathExpression,
        FactoryKey::Sort,
        FactoryKey::SortTerm,
        FactoryKey::Group,
    ];

    /// The name the key is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            FactoryKey::Constant => "Constant",
            FactoryKey::Function => "Function",
            FactoryKey::Relation => "Relation",
            FactoryKey::Comparison => "Comparison",
            FactoryKey::And => "AND",
            FactoryKey::Or => "OR",
            FactoryKey::VariableRef => "VariableRef",
            FactoryKey::Insert => "Insert",
            FactoryKey::Select => "Select",
            FactoryKey::Delete => "Delete",
            FactoryKey::Update => "Update",
            FactoryKey::MathExpression => "MathExpression",
            FactoryKey::Sort => "Sort",
            FactoryKey::SortTerm => "SortTerm",
            FactoryKey::Group => "Group",
        }
    }
}

impl fmt::Display for FactoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FactoryKey {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FactoryKey::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or(())
    }
}

/// Positional argument handed to a factory closure.
///
/// | Key | Arguments |
/// |---|---|
/// | Constant | `Value`, `Str(tag)` |
/// | Function | `Str(name)` |
/// | Relation | `Str(rtype)`, `Bool(negated)` |
/// | Comparison | `Str(op)`, `Object(operand)` |
/// | AND / OR | `Object`, `Object` in pop order |
/// | VariableRef | `Object(variable)` |
/// | Select / Insert / Update / Delete | `Registry` |
/// | MathExpression | `Str(op)`, `Object`, `Object` in pop order |
/// | Sort / Group | nothing |
/// | SortTerm | `Object(expr)`, `Bool(ascending)` |
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<O> {
    Str(String),
    Bool(bool),
    Value(Literal),
    Object(O),
    Registry(Option<TypeRegistry>),
}

impl<O> Arg<O> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Arg::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<O> {
        match self {
            Arg::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// A constructor closure. Returning `None` aborts the build.
pub type Factory<O> = Box<dyn FnMut(Vec<Arg<O>>) -> Option<O>>;

/// A [`Backend`] assembled from named factory closures.
pub struct FactoryTable<O> {
    factories: HashMap<FactoryKey, Factory<O>>,
}

impl<O> FactoryTable<O> {
    /// Sets up a table from a name-keyed map.
    ///
    /// Fails on the first required key missing from `map`; names that are not
    /// factory keys are ignored.
    pub fn from_map(mut map: HashMap<String, Factory<O>>) -> Result<Self, SetupError> {
        let mut factories = HashMap::with_capacity(FactoryKey::ALL.len());
        for key in FactoryKey::ALL {
            let factory = map
                .remove(key.name())
                .ok_or(SetupError::MissingFactory { key })?;
            factories.insert(key, factory);
        }
        if !map.is_empty() {
            debug!("ignoring {} unrecognised factory entries", map.len());
        }
        debug!("factory table ready with {} factories", factories.len());
        Ok(FactoryTable { factories })
    }

    fn call(&mut self, key: FactoryKey, args: Vec<Arg<O>>) -> Option<O> {
        let factory = self.factories.get_mut(&key)?;
        factory(args)
    }
}

impl<O> fmt::Debug for FactoryTable<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.factories.keys().map(FactoryKey::name).collect();
        keys.sort_unstable();
        f.debug_struct("FactoryTable").field("keys", &keys).finish()
    }
}

impl<O: ExternalNode> Backend for FactoryTable<O> {
    type Object = O;

    fn constant(&mut self, value: &Literal, tag: &str) -> Option<O> {
        self.call(
            FactoryKey::Constant,
            vec![Arg::Value(value.clone()), Arg::Str(tag.to_string())],
        )
    }

    fn function(&mut self, name: &str) -> Option<O> {
        self.call(FactoryKey::Function, vec![Arg::Str(name.to_string())])
    }

    fn relation(&mut self, rtype: &str, negated: bool) -> Option<O> {
        self.call(
            FactoryKey::Relation,
            vec![Arg::Str(rtype.to_string()), Arg::Bool(negated)],
        )
    }

    fn comparison(&mut self, op: &str, operand: O) -> Option<O> {
        self.call(
            FactoryKey::Comparison,
            vec![Arg::Str(op.to_string()), Arg::Object(operand)],
        )
    }

    fn and(&mut self, first: O, second: O) -> Option<O> {
        self.call(FactoryKey::And, vec![Arg::Object(first), Arg::Object(second)])
    }

    fn or(&mut self, first: O, second: O) -> Option<O> {
        self.call(FactoryKey::Or, vec![Arg::Object(first), Arg::Object(second)])
    }

    fn variable_ref(&mut self, variable: O) -> Option<O> {
        self.call(FactoryKey::VariableRef, vec![Arg::Object(variable)])
    }

    fn select(&mut self, registry: Option<&TypeRegistry>) -> Option<O> {
        self.call(FactoryKey::Select, vec![Arg::Registry(registry.cloned())])
    }

    fn insert(&mut self, registry: Option<&TypeRegistry>) -> Option<O> {
        self.call(FactoryKey::Insert, vec![Arg::Registry(registry.cloned())])
    }

    fn update(&mut self, registry: Option<&TypeRegistry>) -> Option<O> {
        self.call(FactoryKey::Update, vec![Arg::Registry(registry.cloned())])
    }

    fn delete(&mut self, registry: Option<&TypeRegistry>) -> Option<O> {
        self.call(FactoryKey::Delete, vec![Arg::Registry(registry.cloned())])
    }

    fn math_expression(&mut self, op: &str, first: O, second: O) -> Option<O> {
        self.call(
            FactoryKey::MathExpression,
            vec![
                Arg::Str(op.to_string()),
                Arg::Object(first),
                Arg::Object(second),
            ],
        )
    }

    fn sort(&mut self) -> Option<O> {
        self.call(FactoryKey::Sort, Vec::new())
    }

    fn sort_term(&mut self, expr: O, ascending: bool) -> Option<O> {
        self.call(
            FactoryKey::SortTerm,
            vec![Arg::Object(expr), Arg::Bool(ascending)],
        )
    }

    fn group(&mut self) -> Option<O> {
        self.call(FactoryKey::Group, Vec::new())
    }
}

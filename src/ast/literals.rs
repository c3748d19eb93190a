use std::fmt;

/// Literal value held by a [`Constant`](crate::ast::Constant).
///
/// Every literal carries a tag naming its kind; backends receive the tag
/// alongside the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Int(i64),

    /// Floating point literal
    ///
    /// # Example
    /// ```text
    /// 4.2
    /// ```
    Float(f64),

    /// String literal, already unquoted
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// ```
    String(String),

    /// `NULL`
    Null,

    /// Reference to a registered entity type
    ///
    /// # Example
    /// ```text
    /// Person
    /// ```
    EntityType(String),

    /// `TRUE` / `FALSE`
    Boolean(bool),

    /// Date keyword such as `TODAY`
    Date(String),

    /// Datetime keyword such as `NOW`
    Datetime(String),

    /// Named placeholder substituted by the caller
    ///
    /// # Example
    /// ```text
    /// %(name)s
    /// ```
    Substitute(String),
}

impl Literal {
    /// The kind tag handed to backends next to the value.
    pub fn tag(&self) -> &'static str {
        match self {
            Literal::Int(_) => "Int",
            Literal::Float(_) => "Float",
            Literal::String(_) => "String",
            Literal::Null => "NULL",
            Literal::EntityType(_) => "etype",
            Literal::Boolean(_) => "Boolean",
            Literal::Date(_) => "Date",
            Literal::Datetime(_) => "Datetime",
            Literal::Substitute(_) => "Substitute",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", n),
            Literal::Null => write!(f, "NULL"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::String(s)
            | Literal::EntityType(s)
            | Literal::Date(s)
            | Literal::Datetime(s)
            | Literal::Substitute(s) => write!(f, "{}", s),
        }
    }
}

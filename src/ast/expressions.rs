use crate::ast::{Literal, Node};

/// Literal constant. Always a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: Literal,
}

impl Constant {
    pub fn new(value: Literal) -> Self {
        Constant { value }
    }

    pub fn int(value: i64) -> Self {
        Constant::new(Literal::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Constant::new(Literal::Float(value))
    }

    /// String constant from an already-decoded value.
    pub fn string(value: impl Into<String>) -> Self {
        Constant::new(Literal::String(value.into()))
    }

    pub fn null() -> Self {
        Constant::new(Literal::Null)
    }

    pub fn value(&self) -> &Literal {
        &self.value
    }

    pub fn tag(&self) -> &'static str {
        self.value.tag()
    }
}

/// Reference to a query variable by name. Always a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct VarNode {
    name: String,
}

impl VarNode {
    pub fn new(name: impl Into<String>) -> Self {
        VarNode { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Function call; children are the arguments in call order.
///
/// # Example
/// ```text
/// COUNT(X)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FuncNode {
    name: String,
    children: Vec<Node>,
}

impl FuncNode {
    pub fn new(name: impl Into<String>) -> Self {
        FuncNode {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn append(&mut self, arg: Node) {
        self.children.push(arg);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Binary arithmetic: `lhs op rhs`. Carries exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub struct MathExpression {
    op: String,
    children: Vec<Node>,
}

impl MathExpression {
    pub fn new(op: impl Into<String>, lhs: Node, rhs: Node) -> Self {
        MathExpression {
            op: op.into(),
            children: vec![lhs, rhs],
        }
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Comparison against the right-hand operand. The left-hand side is the
/// enclosing relation's subject, so the node carries exactly one child.
///
/// # Example
/// ```text
/// X age > 18      // ComparisonNode(">", Constant(18))
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonNode {
    op: String,
    children: Vec<Node>,
}

impl ComparisonNode {
    pub fn new(op: impl Into<String>, rhs: Node) -> Self {
        ComparisonNode {
            op: op.into(),
            children: vec![rhs],
        }
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

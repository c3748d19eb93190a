//! Conversion of a syntax tree into a caller-supplied object graph.
//!
//! The [`Builder`] walks the tree post-order and keeps intermediate results
//! on an explicit value stack: every node pushes exactly one external
//! object, and a parent pops its operands off the stack before calling the
//! backend factory for itself.
//!
//! Binary kinds (`AND`, `OR`, arithmetic) visit child 0 then child 1, so the
//! first pop yields the operand appended *second*. Factories receive the
//! operands in pop order: `factory(first_pop, second_pop)` is
//! `factory(child1, child0)`. Backends depend on that ordering.

use std::mem;

use log::{debug, trace};

use crate::ast::{
    AndNode, ComparisonNode, Constant, DeleteStmt, FuncNode, GroupNode, InsertStmt, Literal,
    MathExpression, Node, NodeKind, OrNode, RelationNode, SelectStmt, SortNode, SortTermNode,
    StmtNode, UpdateStmt, VarNode,
};
use crate::error::{BuildError, TransformError};
use crate::factory::FactoryKey;
use crate::types::TypeRegistry;
use crate::visitor::{Visitor, dispatch};

/// An object of the external representation.
///
/// These hooks attach children and statement data to an object after its
/// factory created it.
pub trait ExternalNode: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Attaches a generic child.
    fn append(&mut self, child: Self) -> Result<(), Self::Error>;

    /// Adds an expression to a select's selection list.
    fn append_selected(&mut self, expr: Self) -> Result<(), Self::Error>;

    fn add_main_variable(&mut self, etype: &str, variable: Self) -> Result<(), Self::Error>;

    fn add_main_relation(&mut self, relation: Self) -> Result<(), Self::Error>;

    fn set_distinct(&mut self, distinct: bool) -> Result<(), Self::Error>;

    fn set_limit(&mut self, limit: u64) -> Result<(), Self::Error>;

    fn set_offset(&mut self, offset: u64) -> Result<(), Self::Error>;

    fn set_statement_type(&mut self, kind: &str) -> Result<(), Self::Error>;

    /// Resolves a variable name within this statement object.
    ///
    /// Called once per variable reference; `None` aborts the build.
    fn get_variable(&mut self, name: &str) -> Option<Self>;
}

/// Factories for every node category of the external representation.
///
/// A factory returning `None` aborts the build with
/// [`BuildError::Construction`].
pub trait Backend {
    type Object: ExternalNode;

    fn constant(&mut self, value: &Literal, tag: &str) -> Option<Self::Object>;

    fn function(&mut self, name: &str) -> Option<Self::Object>;

    fn relation(&mut self, rtype: &str, negated: bool) -> Option<Self::Object>;

    fn comparison(&mut self, op: &str, operand: Self::Object) -> Option<Self::Object>;

    /// Operands arrive in pop order, see the module docs.
    fn and(&mut self, first: Self::Object, second: Self::Object) -> Option<Self::Object>;

    /// Operands arrive in pop order, see the module docs.
    fn or(&mut self, first: Self::Object, second: Self::Object) -> Option<Self::Object>;

    fn variable_ref(&mut self, variable: Self::Object) -> Option<Self::Object>;

    fn select(&mut self, registry: Option<&TypeRegistry>) -> Option<Self::Object>;

    fn insert(&mut self, registry: Option<&TypeRegistry>) -> Option<Self::Object>;

    fn update(&mut self, registry: Option<&TypeRegistry>) -> Option<Self::Object>;

    fn delete(&mut self, registry: Option<&TypeRegistry>) -> Option<Self::Object>;

    /// Operands arrive in pop order, see the module docs.
    fn math_expression(
        &mut self,
        op: &str,
        first: Self::Object,
        second: Self::Object,
    ) -> Option<Self::Object>;

    fn sort(&mut self) -> Option<Self::Object>;

    fn sort_term(&mut self, expr: Self::Object, ascending: bool) -> Option<Self::Object>;

    fn group(&mut self) -> Option<Self::Object>;
}

/// Builds the external representation of `root`.
pub fn build<B: Backend>(backend: &mut B, root: &Node) -> Result<B::Object, BuildError> {
    Builder::new(backend).build(root)
}

pub struct Builder<'b, B: Backend> {
    backend: &'b mut B,
    stack: Vec<B::Object>,
    // Object of the statement being assembled; variable references resolve
    // against it.
    statement: Option<B::Object>,
}

impl<'b, B: Backend> Builder<'b, B> {
    pub fn new(backend: &'b mut B) -> Self {
        Builder {
            backend,
            stack: Vec::new(),
            statement: None,
        }
    }

    /// Runs the traversal and returns the object built for `root`.
    ///
    /// On error the partially built objects are dropped with the builder.
    pub fn build(mut self, root: &Node) -> Result<B::Object, BuildError> {
        self.visit(root)?;
        let result = self.pop()?;
        debug_assert!(self.stack.is_empty(), "values left on the builder stack");
        debug!("built external tree for {}", root.kind());
        Ok(result)
    }

    fn push(&mut self, object: Option<B::Object>, factory: FactoryKey) -> Result<(), BuildError> {
        let object = object.ok_or(BuildError::Construction { factory })?;
        self.stack.push(object);
        Ok(())
    }

    fn pop(&mut self) -> Result<B::Object, BuildError> {
        let Some(top) = self.stack.pop() else {
            debug_assert!(false, "builder value stack underflow");
            return Err(TransformError::StackUnderflow.into());
        };
        Ok(top)
    }

    /// Visits `node` and takes its result off the stack.
    fn build_child(&mut self, node: &Node) -> Result<B::Object, BuildError> {
        self.visit(node)?;
        self.pop()
    }

    fn expect_children(kind: NodeKind, children: &[Node]) -> Result<(), BuildError> {
        match kind.arity() {
            Some(expected) if children.len() != expected => Err(BuildError::Arity {
                kind,
                expected,
                found: children.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Visits both operands of a binary kind and pops them back in stack
    /// order: the result of the second child comes first.
    fn binary_operands(
        &mut self,
        kind: NodeKind,
        children: &[Node],
    ) -> Result<(B::Object, B::Object), BuildError> {
        Self::expect_children(kind, children)?;
        for child in children {
            self.visit(child)?;
        }
        let first = self.pop()?;
        let second = self.pop()?;
        Ok((first, second))
    }

    fn append_children(
        &mut self,
        object: &mut B::Object,
        children: &[Node],
    ) -> Result<(), BuildError> {
        for child in children {
            let built = self.build_child(child)?;
            hook("append", object.append(built))?;
        }
        Ok(())
    }

    fn current_statement(&mut self) -> Result<&mut B::Object, TransformError> {
        self.statement.as_mut().ok_or(TransformError::NoStatement)
    }

    fn statement(
        &mut self,
        factory: FactoryKey,
        object: Option<B::Object>,
        stmt: &StmtNode,
        select: Option<&SelectStmt>,
    ) -> Result<(), BuildError> {
        let mut object = object.ok_or(BuildError::Construction { factory })?;

        if let Some(select) = select {
            if select.distinct {
                hook("distinct", object.set_distinct(true))?;
            }
            if let Some(limit) = select.limit() {
                hook("limit", object.set_limit(limit))?;
            }
            if let Some(offset) = select.offset() {
                hook("offset", object.set_offset(offset))?;
            }
        }

        let outer = self.statement.replace(object);
        let assembled = self.assemble(stmt, select);
        let object = mem::replace(&mut self.statement, outer);
        assembled?;

        debug!(
            "assembled {} with {} children, {} main variables, {} main relations",
            factory,
            stmt.children().len(),
            stmt.main_variables().len(),
            stmt.main_relations().len()
        );
        self.push(object, factory)
    }

    /// Fills the statement object currently held in `self.statement`.
    fn assemble(&mut self, stmt: &StmtNode, select: Option<&SelectStmt>) -> Result<(), BuildError> {
        if let Some(select) = select {
            for expr in select.selected() {
                let built = self.build_child(expr)?;
                hook("append_selected", self.current_statement()?.append_selected(built))?;
            }
        }

        for child in stmt.children() {
            let built = self.build_child(child)?;
            hook("append", self.current_statement()?.append(built))?;
        }

        for (etype, var) in stmt.main_variables() {
            self.visit_var(var)?;
            let built = self.pop()?;
            hook(
                "add_main_variable",
                self.current_statement()?.add_main_variable(etype, built),
            )?;
        }

        for relation in stmt.main_relations() {
            self.visit_relation(relation)?;
            let built = self.pop()?;
            hook(
                "add_main_relation",
                self.current_statement()?.add_main_relation(built),
            )?;
        }

        if let Some(select) = select {
            hook(
                "set_statement_type",
                self.current_statement()?
                    .set_statement_type(select.statement_type()),
            )?;
        }
        Ok(())
    }
}

fn hook<E>(name: &'static str, result: Result<(), E>) -> Result<(), BuildError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.map_err(|source| BuildError::Hook {
        hook: name,
        source: Box::new(source),
    })
}

impl<B: Backend> Visitor for Builder<'_, B> {
    type Error = BuildError;

    fn visit(&mut self, node: &Node) -> Result<(), BuildError> {
        trace!("build {}", node.kind());
        dispatch(self, node)
    }

    fn visit_constant(&mut self, node: &Constant) -> Result<(), BuildError> {
        let object = self.backend.constant(node.value(), node.tag());
        self.push(object, FactoryKey::Constant)
    }

    fn visit_var(&mut self, node: &VarNode) -> Result<(), BuildError> {
        let statement = self
            .statement
            .as_mut()
            .ok_or_else(|| TransformError::UnboundVariable {
                name: node.name().to_string(),
            })?;
        let variable = statement
            .get_variable(node.name())
            .ok_or(BuildError::Construction {
                factory: FactoryKey::VariableRef,
            })?;
        let object = self.backend.variable_ref(variable);
        self.push(object, FactoryKey::VariableRef)
    }

    fn visit_func(&mut self, node: &FuncNode) -> Result<(), BuildError> {
        let mut object = self
            .backend
            .function(node.name())
            .ok_or(BuildError::Construction {
                factory: FactoryKey::Function,
            })?;
        self.append_children(&mut object, node.children())?;
        self.push(Some(object), FactoryKey::Function)
    }

    fn visit_math(&mut self, node: &MathExpression) -> Result<(), BuildError> {
        let (first, second) = self.binary_operands(NodeKind::Math, node.children())?;
        let object = self.backend.math_expression(node.op(), first, second);
        self.push(object, FactoryKey::MathExpression)
    }

    fn visit_comparison(&mut self, node: &ComparisonNode) -> Result<(), BuildError> {
        Self::expect_children(NodeKind::Comparison, node.children())?;
        for child in node.children() {
            self.visit(child)?;
        }
        let operand = self.pop()?;
        let object = self.backend.comparison(node.op(), operand);
        self.push(object, FactoryKey::Comparison)
    }

    fn visit_and(&mut self, node: &AndNode) -> Result<(), BuildError> {
        let (first, second) = self.binary_operands(NodeKind::And, node.children())?;
        let object = self.backend.and(first, second);
        self.push(object, FactoryKey::And)
    }

    fn visit_or(&mut self, node: &OrNode) -> Result<(), BuildError> {
        let (first, second) = self.binary_operands(NodeKind::Or, node.children())?;
        let object = self.backend.or(first, second);
        self.push(object, FactoryKey::Or)
    }

    fn visit_relation(&mut self, node: &RelationNode) -> Result<(), BuildError> {
        let mut object = self
            .backend
            .relation(node.rtype(), node.negated)
            .ok_or(BuildError::Construction {
                factory: FactoryKey::Relation,
            })?;
        self.append_children(&mut object, node.children())?;
        self.push(Some(object), FactoryKey::Relation)
    }

    fn visit_sort_term(&mut self, node: &SortTermNode) -> Result<(), BuildError> {
        let expr = self.build_child(node.expr())?;
        let object = self.backend.sort_term(expr, node.ascending);
        self.push(object, FactoryKey::SortTerm)
    }

    fn visit_sort(&mut self, node: &SortNode) -> Result<(), BuildError> {
        let mut object = self.backend.sort().ok_or(BuildError::Construction {
            factory: FactoryKey::Sort,
        })?;
        self.append_children(&mut object, node.children())?;
        self.push(Some(object), FactoryKey::Sort)
    }

    fn visit_group(&mut self, node: &GroupNode) -> Result<(), BuildError> {
        let mut object = self.backend.group().ok_or(BuildError::Construction {
            factory: FactoryKey::Group,
        })?;
        self.append_children(&mut object, node.children())?;
        self.push(Some(object), FactoryKey::Group)
    }

    fn visit_select(&mut self, node: &SelectStmt) -> Result<(), BuildError> {
        let object = self.backend.select(node.registry());
        self.statement(FactoryKey::Select, object, node, Some(node))
    }

    fn visit_insert(&mut self, node: &InsertStmt) -> Result<(), BuildError> {
        let object = self.backend.insert(node.registry());
        self.statement(FactoryKey::Insert, object, node, None)
    }

    fn visit_update(&mut self, node: &UpdateStmt) -> Result<(), BuildError> {
        let object = self.backend.update(node.registry());
        self.statement(FactoryKey::Update, object, node, None)
    }

    fn visit_delete(&mut self, node: &DeleteStmt) -> Result<(), BuildError> {
        let object = self.backend.delete(node.registry());
        self.statement(FactoryKey::Delete, object, node, None)
    }
}

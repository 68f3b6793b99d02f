use std::fmt;

use crate::ast::expr::Expression;
use crate::source::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Binding(BindingDefinition),
    InferredBinding(InferredBindingDefinition),
    Variable(VariableDefinition),
    Discarded(Expression),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Binding(binding) => binding.span,
            Statement::InferredBinding(binding) => binding.span,
            Statement::Variable(variable) => variable.span,
            Statement::Discarded(expr) => expr.span(),
        }
    }

    pub fn display<'s>(&'s self, input: &'s str) -> StatementDisplay<'s> {
        StatementDisplay { stmt: self, input }
    }
}

pub struct StatementDisplay<'s> {
    stmt: &'s Statement,
    input: &'s str,
}

impl fmt::Display for StatementDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input;

        match self.stmt {
            Statement::Binding(binding) => write!(
                f,
                "let {}: {} = {};",
                &input[binding.name.range()],
                binding.ty.display(input),
                binding.value.display(input)
            ),

            Statement::InferredBinding(binding) => write!(
                f,
                "let {} = {};",
                &input[binding.name.range()],
                binding.value.display(input)
            ),

            Statement::Variable(variable) => {
                write!(f, "var {}", &input[variable.name.range()])?;
                if let Some(ty) = &variable.ty {
                    write!(f, ": {}", ty.display(input))?;
                }
                if let Some(initial) = &variable.initial {
                    write!(f, " = {}", initial.display(input))?;
                }
                f.write_str(";")
            }

            Statement::Discarded(expr) => write!(f, "{};", expr.display(input)),
        }
    }
}

// let name: type = value;
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingDefinition {
    name: Span,
    ty: Expression,
    value: Expression,
    span: Span,
}

impl BindingDefinition {
    pub fn new(name: Span, ty: Expression, value: Expression, span: Span) -> Self {
        BindingDefinition { name, ty, value, span }
    }

    pub fn name(&self) -> Span {
        self.name
    }

    pub fn ty(&self) -> &Expression {
        &self.ty
    }

    pub fn value(&self) -> &Expression {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

// let name = value;
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferredBindingDefinition {
    name: Span,
    value: Expression,
    span: Span,
}

impl InferredBindingDefinition {
    pub fn new(name: Span, value: Expression, span: Span) -> Self {
        InferredBindingDefinition { name, value, span }
    }

    pub fn name(&self) -> Span {
        self.name
    }

    pub fn value(&self) -> &Expression {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDefinition {
    name: Span,
    ty: Option<Expression>,
    initial: Option<Expression>,
    span: Span,
}

impl VariableDefinition {
    pub fn new(name: Span, ty: Option<Expression>, initial: Option<Expression>, span: Span) -> Self {
        assert!(
            ty.is_some() || initial.is_some(),
            "variable definition needs a type or an initial value"
        );
        VariableDefinition { name, ty, initial, span }
    }

    pub fn name(&self) -> Span {
        self.name
    }

    pub fn ty(&self) -> Option<&Expression> {
        self.ty.as_ref()
    }

    pub fn initial(&self) -> Option<&Expression> {
        self.initial.as_ref()
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parse {
    statements: Vec<Statement>,
}

impl Parse {
    pub fn new() -> Self {
        Parse { statements: Vec::new() }
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }
}

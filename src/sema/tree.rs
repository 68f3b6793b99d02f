use std::fmt;

use crate::ast::expr_type::Type;
use crate::number::convert::Value;
use crate::parse::operator::Operator;
use crate::source::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

impl SymbolId {
    pub fn new(index: usize) -> Self {
        SymbolId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    span: Span,
    ty: Type,
    mutable: bool,
}

impl Symbol {
    pub fn new(name: String, span: Span, ty: Type, mutable: bool) -> Self {
        Symbol { name, span, ty, mutable }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    // the name in its definition
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn ty(&self) -> Type {
        self.ty
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EvalKind {
    Constant(Value),
    Symbol(SymbolId),
    Unary(Operator, Box<Eval>),
    Binary(Operator, Box<Eval>, Box<Eval>),
}

/// A typed expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Eval {
    kind: EvalKind,
    ty: Type,
    span: Span,
}

impl Eval {
    pub fn new(kind: EvalKind, ty: Type, span: Span) -> Self {
        Eval { kind, ty, span }
    }

    pub fn kind(&self) -> &EvalKind {
        &self.kind
    }

    pub fn ty(&self) -> Type {
        self.ty
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn with_span(self, span: Span) -> Self {
        Eval { span, ..self }
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self.kind {
            EvalKind::Symbol(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Definition(SymbolId, Option<Eval>),
    Expression(Eval),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    symbols: Vec<Symbol>,
    items: Vec<Item>,
}

impl Program {
    pub fn new(symbols: Vec<Symbol>, items: Vec<Item>) -> Self {
        Program { symbols, items }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn write_eval(&self, f: &mut fmt::Formatter<'_>, eval: &Eval) -> fmt::Result {
        match &eval.kind {
            EvalKind::Constant(Value::Signed(v)) => write!(f, "{}", v),
            EvalKind::Constant(Value::Unsigned(v)) => write!(f, "{}", v),
            EvalKind::Constant(Value::F32(v)) => write!(f, "{:?}", v),
            EvalKind::Constant(Value::F64(v)) => write!(f, "{:?}", v),
            EvalKind::Symbol(id) => f.write_str(self.symbol(*id).name()),

            EvalKind::Unary(op, operand) => {
                write!(f, "({} ", op.symbol())?;
                self.write_eval(f, operand)?;
                f.write_str(")")
            }

            EvalKind::Binary(op, left, right) => {
                write!(f, "({} ", op.symbol())?;
                self.write_eval(f, left)?;
                f.write_str(" ")?;
                self.write_eval(f, right)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match item {
                Item::Definition(id, value) => {
                    let symbol = self.symbol(*id);
                    let keyword = if symbol.mutable { "var" } else { "let" };
                    write!(f, "{} {}: {}", keyword, symbol.name, symbol.ty)?;

                    if let Some(value) = value {
                        f.write_str(" = ")?;
                        self.write_eval(f, value)?;
                    }
                }

                Item::Expression(eval) => {
                    self.write_eval(f, eval)?;
                    write!(f, ": {}", eval.ty)?;
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

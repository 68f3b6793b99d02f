use crate::ast::expr::Expression;
use crate::ast::expr_type::{ ArithmeticType, Type };
use crate::ast::stmt::{ Parse, Statement };
use crate::number::parse_decimal;
use crate::parse::operator::{ Operator, Shape };
use crate::sema::scope::Scope;
use crate::sema::tree::{ Eval, EvalKind, Item, Program, Symbol, SymbolId };
use crate::source::Span;
use crate::source::diagnostic::Diagnostics;

pub struct Analyzer<'a> {
    input: &'a str,
    diagnostics: &'a mut Diagnostics,
    scope: Scope,
    symbols: Vec<Symbol>,
}

// what both operands of an operator must be
#[derive(Clone, Copy, PartialEq, Eq)]
enum Operands {
    Any,
    Arithmetic,
    Integer,
    Bool,
}

impl Operands {
    fn accepts(self, ty: Type) -> bool {
        match self {
            Operands::Any => true,
            Operands::Arithmetic => ty.is_arithmetic(),
            Operands::Integer => ty.is_integer(),
            Operands::Bool => ty == Type::Bool,
        }
    }
}

impl<'a> Analyzer<'a> {
    pub fn new(input: &'a str, diagnostics: &'a mut Diagnostics) -> Self {
        Analyzer {
            input,
            diagnostics,
            scope: Scope::empty(),
            symbols: Vec::new(),
        }
    }

    pub fn analyze_all(mut self, parse: &Parse) -> Program {
        let mut items = Vec::new();

        for stmt in parse.iter() {
            if let Some(item) = self.analyze_stmt(stmt) {
                items.push(item);
            }
        }

        log::debug!("analyzed {} items defining {} symbols", items.len(), self.scope.len());
        Program::new(self.symbols, items)
    }

    pub fn analyze_stmt(&mut self, stmt: &Statement) -> Option<Item> {
        match stmt {
            Statement::Binding(binding) => {
                let ty = self.resolve_type(binding.ty());
                let value = match ty {
                    Some(ty) => self.check(binding.value(), ty),
                    None => self.eval_root(binding.value(), None),
                };

                let id = self.define(binding.name(), ty?, false)?;
                Some(Item::Definition(id, Some(value?)))
            }

            Statement::InferredBinding(binding) => {
                let value = self.eval_root(binding.value(), None)?;
                let id = self.define(binding.name(), value.ty(), false)?;
                Some(Item::Definition(id, Some(value)))
            }

            Statement::Variable(variable) => {
                let ty = match variable.ty() {
                    Some(ty) => Some(self.resolve_type(ty)?),
                    None => None,
                };

                let initial = match (variable.initial(), ty) {
                    (Some(initial), Some(ty)) => Some(self.check(initial, ty)),
                    (Some(initial), None) => Some(self.eval_root(initial, None)),
                    (None, _) => None,
                };

                let ty = match (ty, &initial) {
                    (Some(ty), _) => ty,
                    (None, Some(Some(initial))) => initial.ty(),
                    (None, _) => return None,
                };

                let id = self.define(variable.name(), ty, true)?;
                match initial {
                    Some(initial) => Some(Item::Definition(id, Some(initial?))),
                    None => Some(Item::Definition(id, None)),
                }
            }

            Statement::Discarded(expr) => {
                let eval = self.eval_root(expr, None)?;
                if !has_effect(expr) {
                    self.diagnostics.warning(expr.span(), "the value of this expression is unused");
                }

                Some(Item::Expression(eval))
            }
        }
    }

    fn text(&self, span: Span) -> &'a str {
        &self.input[span.range()]
    }

    fn define(&mut self, name_span: Span, ty: Type, mutable: bool) -> Option<SymbolId> {
        let name = self.text(name_span);
        let id = SymbolId::new(self.symbols.len());

        if !self.scope.add(name, id) {
            self.diagnostics.error(name_span, format!("`{}` is already defined", name));
            if let Some(previous) = self.scope.find(name) {
                let span = self.symbols[previous.index()].span();
                self.diagnostics.info(span, format!("`{}` is first defined here", name));
            }

            return None;
        }

        log::trace!("defined `{}` as {}", name, ty);
        self.symbols.push(Symbol::new(name.to_string(), name_span, ty, mutable));
        Some(id)
    }

    // type expressions are a single name
    fn resolve_type(&mut self, expr: &Expression) -> Option<Type> {
        let root = *expr.node(expr.root());
        if root.operator() != Operator::Name {
            self.diagnostics.error(expr.span(), "expected the name of a type");
            return None;
        }

        let name = self.text(root.span());
        let ty = Type::from_name(name);
        if ty.is_none() {
            self.diagnostics.error(root.span(), format!("`{}` is not a type", name));
        }

        ty
    }

    fn check(&mut self, expr: &Expression, ty: Type) -> Option<Eval> {
        let eval = self.eval_root(expr, Some(ty))?;
        if eval.ty() != ty {
            let message = format!("expected a value of type `{}`, found `{}`", ty, eval.ty());
            self.diagnostics.error(eval.span(), message);
            return None;
        }

        Some(eval)
    }

    fn eval_root(&mut self, expr: &Expression, expected: Option<Type>) -> Option<Eval> {
        self.eval(expr, expr.root(), expected)
    }

    /// Types the subtree rooted at `index`. `expected` only steers the type
    /// of literals, it is not enforced.
    fn eval(&mut self, expr: &Expression, index: usize, expected: Option<Type>) -> Option<Eval> {
        let node = *expr.node(index);
        let span = node.span();

        match node.operator() {
            Operator::Literal => self.literal(span, false, span, expected),

            Operator::Name => {
                let name = self.text(span);
                match self.scope.find(name) {
                    Some(id) => {
                        let ty = self.symbols[id.index()].ty();
                        Some(Eval::new(EvalKind::Symbol(id), ty, span))
                    }
                    None => {
                        self.diagnostics.error(span, format!("`{}` is not defined", name));
                        None
                    }
                }
            }

            Operator::Group => {
                let inner = self.eval(expr, expr.operand(index, 0), expected)?;
                Some(inner.with_span(span))
            }

            Operator::Call => {
                let callee = expr.node(expr.operand(index, 0)).span();
                let message = format!("`{}` is not a function", self.text(callee));
                self.diagnostics.error(callee, message);
                None
            }

            Operator::List => {
                self.diagnostics.error(span, "lists have no value type yet");
                None
            }

            // `-128` has to fit `i8` as a whole
            Operator::Negate if expr.node(expr.operand(index, 0)).operator() == Operator::Literal => {
                let literal = expr.node(expr.operand(index, 0)).span();
                self.literal(literal, true, span, expected)
            }

            op => match op.shape() {
                Shape::Prenary(_) | Shape::Postary(_) => self.unary(expr, index, op, expected),
                Shape::Binary(_) => self.binary(expr, index, op, expected),
                shape => unreachable!("operator {:?} of shape {:?} is handled above", op, shape),
            },
        }
    }

    fn literal(&mut self, literal: Span, negative: bool, span: Span, expected: Option<Type>) -> Option<Eval> {
        let text = self.text(literal);
        let mut number = parse_decimal(text);
        if negative {
            number.negate();
        }

        let target = match expected.and_then(|ty| ArithmeticType::try_from(ty).ok()) {
            Some(target) => target,
            None if text.contains(['.', 'e', 'E']) => ArithmeticType::F64,
            None => ArithmeticType::I64,
        };

        match number.convert_to_arithmetic(target) {
            Ok(value) => Some(Eval::new(EvalKind::Constant(value), target.into(), span)),
            Err(e) => {
                self.diagnostics.error(span, e.to_string());
                None
            }
        }
    }

    fn unary(&mut self, expr: &Expression, index: usize, op: Operator, expected: Option<Type>) -> Option<Eval> {
        let span = expr.node(index).span();
        let operand_expected = match op {
            Operator::Not => Some(Type::Bool),
            _ => expected,
        };

        let operand = self.eval(expr, expr.operand(index, 0), operand_expected)?;
        let ty = operand.ty();

        let valid = match op {
            Operator::Negate => ty.is_arithmetic() && !ty.is_unsigned(),
            Operator::Not => ty == Type::Bool,
            Operator::Complement => ty.is_integer(),
            _ => ty.is_arithmetic(),
        };

        if !valid {
            let message = format!("`{}` cannot be applied to `{}`", spelling(op), ty);
            self.diagnostics.error(span, message);
            return None;
        }

        if is_step(op) {
            self.require_assignable(&operand, op)?;
        }

        Some(Eval::new(EvalKind::Unary(op, Box::new(operand)), ty, span))
    }

    fn binary(&mut self, expr: &Expression, index: usize, op: Operator, expected: Option<Type>) -> Option<Eval> {
        let span = expr.node(index).span();
        let operands = expr.operands(index);
        let (l, r) = (operands[0], operands[1]);
        let shift = is_shift(op);

        if op.is_assignment() {
            let left = self.eval(expr, l, None)?;
            let right = self.eval(expr, r, if shift { None } else { Some(left.ty()) })?;
            self.check_operands(op, &left, &right, span)?;
            self.require_assignable(&left, op)?;

            let ty = left.ty();
            return Some(Eval::new(EvalKind::Binary(op, Box::new(left), Box::new(right)), ty, span));
        }

        let operand_expected = match operand_class(op) {
            Operands::Bool => Some(Type::Bool),
            _ if yields_bool(op) => None,
            _ => expected,
        };

        // a literal takes its type from the other operand
        let (left, right) = if !shift && is_literal(expr, l) && !is_literal(expr, r) {
            let right = self.eval(expr, r, operand_expected)?;
            let left = self.eval(expr, l, Some(right.ty()))?;
            (left, right)
        }
        else {
            let left = self.eval(expr, l, operand_expected)?;
            let right = self.eval(expr, r, if shift { None } else { Some(left.ty()) })?;
            (left, right)
        };

        self.check_operands(op, &left, &right, span)?;

        let ty = if yields_bool(op) { Type::Bool } else { left.ty() };
        Some(Eval::new(EvalKind::Binary(op, Box::new(left), Box::new(right)), ty, span))
    }

    fn check_operands(&mut self, op: Operator, left: &Eval, right: &Eval, span: Span) -> Option<()> {
        let class = operand_class(op);

        for operand in [left, right] {
            if !class.accepts(operand.ty()) {
                let message = format!("`{}` cannot be applied to `{}`", spelling(op), operand.ty());
                self.diagnostics.error(operand.span(), message);
                return None;
            }
        }

        if !is_shift(op) && left.ty() != right.ty() {
            let message = format!(
                "mismatched types for `{}`: `{}` and `{}`",
                spelling(op),
                left.ty(),
                right.ty()
            );
            self.diagnostics.error(span, message);
            return None;
        }

        Some(())
    }

    fn require_assignable(&mut self, target: &Eval, op: Operator) -> Option<()> {
        let Some(id) = target.symbol() else {
            let message = format!("the target of `{}` must be a variable", spelling(op));
            self.diagnostics.error(target.span(), message);
            return None;
        };

        let symbol = &self.symbols[id.index()];
        if symbol.is_mutable() {
            return Some(());
        }

        let name = symbol.name().to_string();
        let defined = symbol.span();
        self.diagnostics.error(target.span(), format!("`{}` is immutable and cannot be modified", name));
        self.diagnostics.info(defined, format!("`{}` is defined with `let` here", name));
        None
    }
}

fn spelling(op: Operator) -> &'static str {
    match op.shape() {
        Shape::Prenary(mark) | Shape::Postary(mark) | Shape::Binary(mark) => mark.spelling(),
        _ => op.symbol(),
    }
}

fn operand_class(op: Operator) -> Operands {
    use Operator as O;

    match op {
        O::Assign | O::Equal | O::NotEqual => Operands::Any,
        O::LogicalOr | O::LogicalAnd => Operands::Bool,

        O::Less | O::LessEqual | O::Greater | O::GreaterEqual
        | O::Add | O::Subtract | O::Multiply | O::Divide
        | O::AddAssign | O::SubtractAssign | O::MultiplyAssign | O::DivideAssign => Operands::Arithmetic,

        O::Remainder | O::BitOr | O::BitXor | O::BitAnd | O::ShiftLeft | O::ShiftRight
        | O::RemainderAssign | O::ShiftLeftAssign | O::ShiftRightAssign
        | O::AndAssign | O::XorAssign | O::OrAssign => Operands::Integer,

        _ => unreachable!("{:?} is not a binary operator", op),
    }
}

fn yields_bool(op: Operator) -> bool {
    use Operator as O;

    matches!(
        op,
        O::Equal | O::NotEqual | O::Less | O::LessEqual | O::Greater | O::GreaterEqual
            | O::LogicalOr | O::LogicalAnd
    )
}

fn is_shift(op: Operator) -> bool {
    use Operator as O;

    matches!(op, O::ShiftLeft | O::ShiftRight | O::ShiftLeftAssign | O::ShiftRightAssign)
}

fn is_step(op: Operator) -> bool {
    use Operator as O;

    matches!(op, O::PreIncrement | O::PreDecrement | O::PostIncrement | O::PostDecrement)
}

fn is_literal(expr: &Expression, index: usize) -> bool {
    let node = expr.node(index);
    match node.operator() {
        Operator::Literal => true,
        Operator::Negate => expr.node(expr.operand(index, 0)).operator() == Operator::Literal,
        _ => false,
    }
}

fn has_effect(expr: &Expression) -> bool {
    let op = expr.node(expr.root()).operator();
    op.is_assignment() || is_step(op)
}

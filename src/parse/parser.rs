use std::mem;

use crate::ast::expr::{ Expression, Node };
use crate::ast::stmt::{
    BindingDefinition, InferredBindingDefinition, Parse, Statement, VariableDefinition
};
use crate::lex::Lex;
use crate::lex::cursor::LexCursor;
use crate::lex::token::{ Lexeme, LexemeTag, Mark };
use crate::parse::operator::{ Level, Operator, OperatorDescriptor, Shape };
use crate::source::Span;
use crate::source::diagnostic::Diagnostics;

// deepest expression tree, and deepest operand recursion, the parser builds
pub const MAX_DEPTH: usize = 256;

/*
 * *** Statement Rules ***
 *
 * stmt: LET ID (COLON expr)? EQ expr SEMI
 *     | VAR ID (COLON expr)? (EQ expr)? SEMI
 *     | expr SEMI
 *     ;
 *
 * Expressions are not described by rules: they are built by scanning the
 * operator table, see `parse_expression`.
 */
pub struct Parser<'a> {
    input: &'a str,
    cursor: LexCursor<'a>,
    diagnostics: &'a mut Diagnostics,
    // the expression under construction
    nodes: Expression,
    // depth of each finished subtree not yet taken as an operand
    depths: Vec<usize>,
    // operands being parsed inside one another
    nesting: usize,
    // lexemes that could not start a statement, not reported yet
    unexpected: Option<Span>,
}

// what a missing operand is reported against
#[derive(Clone, Copy)]
enum Context {
    Start,
    Operator(Lexeme),
    Opener(Lexeme),
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, lex: &'a Lex, diagnostics: &'a mut Diagnostics) -> Self {
        Parser {
            input,
            cursor: LexCursor::new(lex),
            diagnostics,
            nodes: Expression::new(),
            depths: Vec::new(),
            nesting: 0,
            unexpected: None,
        }
    }

    pub fn parse_all(mut self) -> Parse {
        let mut parse = Parse::new();

        loop {
            let tok = self.cursor.peek();
            match tok.tag() {
                LexemeTag::EOF => {
                    self.flush_unexpected();
                    break;
                }

                // the lexer has reported it already
                LexemeTag::ERROR => {
                    self.cursor.lex();
                    continue;
                }

                tag if !starts_statement(tag) => {
                    self.unexpected = Some(match self.unexpected {
                        Some(run) => run.join(tok.span()),
                        None => tok.span(),
                    });
                    self.cursor.lex();
                    continue;
                }

                _ => {}
            }

            self.flush_unexpected();
            match self.parse_stmt() {
                Some(stmt) => parse.push(stmt),
                None => self.synchronize(),
            }
        }

        log::debug!("parsed {} statements", parse.len());
        parse
    }

    pub fn parse_stmt(&mut self) -> Option<Statement> {
        match self.cursor.peek().tag() {
            LexemeTag::LET => self.parse_binding(),
            LexemeTag::VAR => self.parse_variable(),
            _ => self.parse_discarded(),
        }
    }

    fn parse_binding(&mut self) -> Option<Statement> {
        let keyword = self.cursor.lex();
        let name = self.expect(LexemeTag::ID, "a name for the binding")?;

        let ty = match self.cursor.eat(LexemeTag::COLON) {
            Some(_) => Some(self.parse_expr(Level::NESTED)?),
            None => None,
        };

        self.expect(LexemeTag::EQ, "`=` and a value for the binding")?;
        let value = self.parse_expr(Level::NESTED)?;
        let span = self.expect_terminator(keyword.span().join(value.span()));

        Some(match ty {
            Some(ty) => Statement::Binding(BindingDefinition::new(name.span(), ty, value, span)),
            None => Statement::InferredBinding(InferredBindingDefinition::new(name.span(), value, span)),
        })
    }

    fn parse_variable(&mut self) -> Option<Statement> {
        let keyword = self.cursor.lex();
        let name = self.expect(LexemeTag::ID, "a name for the variable")?;

        let ty = match self.cursor.eat(LexemeTag::COLON) {
            Some(_) => Some(self.parse_expr(Level::NESTED)?),
            None => None,
        };

        let initial = match self.cursor.eat(LexemeTag::EQ) {
            Some(_) => Some(self.parse_expr(Level::NESTED)?),
            None => None,
        };

        let end = match (&ty, &initial) {
            (_, Some(initial)) => initial.span(),
            (Some(ty), None) => ty.span(),
            (None, None) => {
                let tok = self.cursor.peek();
                self.diagnostics.error(
                    tok.span(),
                    format!("expected a type or an initial value instead of {}", self.describe(tok)),
                );
                return None;
            }
        };

        let span = self.expect_terminator(keyword.span().join(end));
        Some(Statement::Variable(VariableDefinition::new(name.span(), ty, initial, span)))
    }

    fn parse_discarded(&mut self) -> Option<Statement> {
        let expr = self.parse_expr(Level::Assignment)?;
        self.expect_terminator(expr.span());
        Some(Statement::Discarded(expr))
    }

    /// Parses one expression whose operators are all at `level` or tighter.
    pub fn parse_expr(&mut self, level: Level) -> Option<Expression> {
        let outer = mem::take(&mut self.nodes);
        let outer_depths = mem::take(&mut self.depths);
        let result = self.parse_expression(level, Context::Start);
        let expr = mem::replace(&mut self.nodes, outer);
        self.depths = outer_depths;

        result?;
        debug_assert!(expr.is_well_formed());
        Some(expr)
    }

    fn parse_expression(&mut self, min: Level, context: Context) -> Option<()> {
        if self.nesting == MAX_DEPTH {
            self.report_too_deep();
            return None;
        }

        self.nesting += 1;
        let result = self.scan_expression(min, context);
        self.nesting -= 1;
        result
    }

    // Appends the subtree of one expression to `nodes`. After each operator
    // the scan restarts at `min`: a clean scan finds the leftmost operand,
    // the following scans extend what was built so far.
    fn scan_expression(&mut self, min: Level, context: Context) -> Option<()> {
        let mut clean = true;

        'scan: loop {
            for level in min.and_tighter() {
                for descriptor in level.operators() {
                    if descriptor.shape.is_clean() != clean
                        || !self.cursor.at(descriptor.shape.leading()) {
                        continue;
                    }

                    self.build(descriptor)?;
                    clean = false;
                    continue 'scan;
                }
            }

            break;
        }

        if clean {
            self.report_missing_operand(context);
            return None;
        }

        Some(())
    }

    fn build(&mut self, descriptor: &OperatorDescriptor) -> Option<()> {
        let op = descriptor.operator;

        match descriptor.shape {
            Shape::Nullary(_) => {
                let tok = self.cursor.lex();
                self.push(op, 0, tok.span())?;
            }

            Shape::Prenary(_) => {
                let tok = self.cursor.lex();
                // same level again, so `- -x` chains to the right
                self.parse_expression(descriptor.level, Context::Operator(tok))?;
                let span = tok.span().join(self.last_span());
                self.push(op, 1, span)?;
            }

            Shape::Postary(_) => {
                let tok = self.cursor.lex();
                let span = self.last_span().join(tok.span());
                self.push(op, 1, span)?;
            }

            Shape::Cirnary(_, close) => {
                let open = self.cursor.lex();
                self.parse_expression(Level::NESTED, Context::Opener(open))?;
                let close = self.expect_closer(close, open)?;
                self.push(op, 1, open.span().join(close.span()))?;
            }

            Shape::Binary(_) => {
                let left = self.last_span();
                let tok = self.cursor.lex();
                // one level tighter keeps chains left-associative
                let Some(next) = descriptor.level.tighter() else {
                    unreachable!("binary operator {:?} at the tightest level", op);
                };
                self.parse_expression(next, Context::Operator(tok))?;
                let span = left.join(self.last_span());
                self.push(op, 2, span)?;
            }

            Shape::Variary(_, close) => {
                let open = self.cursor.lex();
                let count = if self.cursor.at(close.into()) {
                    0
                }
                else {
                    self.parse_operands(open)?
                };
                let close = self.expect_closer(close, open)?;
                self.push(op, count, open.span().join(close.span()))?;
            }

            Shape::Multary(_, close) => {
                let left = self.last_span();
                let open = self.cursor.lex();
                let count = self.parse_operands(open)?;
                let close = self.expect_closer(close, open)?;
                self.push(op, 1 + count, left.join(close.span()))?;
            }
        }

        Some(())
    }

    // one or more comma separated operands
    fn parse_operands(&mut self, open: Lexeme) -> Option<usize> {
        let mut count = 0;
        loop {
            self.parse_expression(Level::NESTED, Context::Opener(open))?;
            count += 1;

            if self.cursor.eat(LexemeTag::COMMA).is_none() {
                break;
            }
        }

        Some(count)
    }

    fn push(&mut self, operator: Operator, arity: usize, span: Span) -> Option<()> {
        let first = self.depths.len() - arity;
        let depth = 1 + self.depths.drain(first..).max().unwrap_or(0);
        if depth > MAX_DEPTH {
            self.report_too_deep();
            return None;
        }

        self.depths.push(depth);
        self.nodes.push(Node::new(operator, arity, span));
        Some(())
    }

    fn last_span(&self) -> Span {
        match self.nodes.last() {
            Some(node) => node.span(),
            None => unreachable!("no operand has been built"),
        }
    }

    fn describe(&self, tok: Lexeme) -> String {
        match tok.tag() {
            LexemeTag::EOF => tok.tag().describe(),
            _ => format!("`{}`", tok.text(self.input)),
        }
    }

    fn expect(&mut self, tag: LexemeTag, what: &str) -> Option<Lexeme> {
        if let Some(tok) = self.cursor.eat(tag) {
            return Some(tok);
        }

        let tok = self.cursor.peek();
        if tok.tag() != LexemeTag::ERROR {
            let message = format!("expected {} instead of {}", what, self.describe(tok));
            self.diagnostics.error(tok.span(), message);
        }

        None
    }

    fn expect_closer(&mut self, close: Mark, open: Lexeme) -> Option<Lexeme> {
        if let Some(tok) = self.cursor.eat(close.into()) {
            return Some(tok);
        }

        let tok = self.cursor.peek();
        let message = format!("expected `{}` instead of {}", close.spelling(), self.describe(tok));
        self.diagnostics.error(tok.span(), message);
        self.diagnostics.info(open.span(), format!("to match this `{}`", open.text(self.input)));
        None
    }

    // a missing `;` is reported, the statement is kept
    fn expect_terminator(&mut self, span: Span) -> Span {
        // the lexer has reported these already
        let reported = self.cursor.at(LexemeTag::ERROR);
        while self.cursor.at(LexemeTag::ERROR) {
            self.cursor.lex();
        }

        if let Some(semi) = self.cursor.eat(LexemeTag::SEMI) {
            return span.join(semi.span());
        }

        let tok = self.cursor.peek();
        if !reported {
            let message = format!("expected `;` after the statement instead of {}", self.describe(tok));
            self.diagnostics.error(tok.span(), message);
        }

        span
    }

    fn report_missing_operand(&mut self, context: Context) {
        let tok = self.cursor.peek();
        if tok.tag() == LexemeTag::ERROR {
            return;
        }

        let found = self.describe(tok);
        match context {
            Context::Start => {
                self.diagnostics.error(tok.span(), format!("expected an expression instead of {}", found));
            }

            Context::Operator(op) => {
                let message = format!(
                    "expected an operand after `{}` instead of {}",
                    op.text(self.input),
                    found
                );
                self.diagnostics.error(tok.span(), message);
            }

            Context::Opener(open) => {
                self.diagnostics.error(tok.span(), format!("expected an expression instead of {}", found));
                self.diagnostics.info(open.span(), format!("inside this `{}`", open.text(self.input)));
            }
        }
    }

    fn report_too_deep(&mut self) {
        let tok = self.cursor.peek();
        log::debug!("expression deeper than {} at {}..{}", MAX_DEPTH, tok.span().start(), tok.span().end());
        self.diagnostics.error(tok.span(), "the expression nests too deeply");
    }

    fn flush_unexpected(&mut self) {
        if let Some(run) = self.unexpected.take() {
            let message = format!("expected a statement instead of `{}`", &self.input[run.range()]);
            self.diagnostics.error(run, message);
        }
    }

    // skips past the next `;`
    fn synchronize(&mut self) {
        let start = self.cursor.peek().span();
        let mut skipped = None;

        loop {
            let tok = self.cursor.peek();
            if tok.tag() == LexemeTag::EOF {
                break;
            }

            self.cursor.lex();
            skipped = Some(tok.span());
            if tok.tag() == LexemeTag::SEMI {
                break;
            }
        }

        if let Some(end) = skipped {
            self.diagnostics.info(start.join(end), "skipped to the end of the statement");
        }
    }
}

fn starts_statement(tag: LexemeTag) -> bool {
    matches!(tag, LexemeTag::LET | LexemeTag::VAR) || Operator::starts_expression(tag)
}

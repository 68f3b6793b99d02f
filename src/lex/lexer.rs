use crate::lex::Lex;
use crate::lex::keyword::KeywordMatcher;
use crate::lex::mark::match_mark;
use crate::lex::token::{ Lexeme, LexemeTag };
use crate::source::Span;
use crate::source::diagnostic::Diagnostics;

pub struct Lexer<'s> {
    pos: LexState<'s>,
    keyword_matcher: KeywordMatcher,
    lex: Lex,
    diagnostics: &'s mut Diagnostics,
}

impl<'s> Lexer<'s> {
    pub fn new(input: &'s str, diagnostics: &'s mut Diagnostics) -> Self {
        Lexer {
            pos: LexState::new(input, 0),
            keyword_matcher: KeywordMatcher::new(),
            lex: Lex::new(),
            diagnostics,
        }
    }

    pub fn lex_all(mut self) -> Lex {
        loop {
            if self.skip_whitespace() || self.skip_comment() {
                continue;
            }

            if self.lex_mark() {
                continue;
            }

            if self.lex_eof() {
                break;
            }

            if self.lex_word() || self.lex_decimal() {
                if self.pos.at_separator() {
                    continue;
                }

                // `1abc` is neither a number nor a name
                let rejected = self.lex.pop().expect("a lexeme was just pushed");
                self.pos.current = rejected.span().start();
            }

            self.lex_unrecognized();
        }

        log::debug!("lexed {} lexemes", self.lex.len());
        self.lex
    }

    fn push(&mut self, tag: LexemeTag, start: usize) {
        let lexeme = Lexeme::new(tag, Span::new(start, self.pos.current));
        log::trace!("{:?} {:?}", tag, lexeme.text(self.pos.input));
        self.lex.push(lexeme);
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos.current;
        while self.pos.get().is_some_and(is_whitespace) {
            self.pos.inc();
        }

        self.pos.current != start
    }

    fn skip_comment(&mut self) -> bool {
        if !self.pos.rest().starts_with("//") {
            return false;
        }

        while self.pos.get().is_some_and(|c| c != '\n') {
            self.pos.inc();
        }

        true
    }

    fn lex_mark(&mut self) -> bool {
        let Some(mark) = match_mark(self.pos.rest()) else {
            return false;
        };

        let start = self.pos.current;
        self.pos.current += mark.spelling().len();
        self.push(LexemeTag::from(mark), start);
        true
    }

    fn lex_eof(&mut self) -> bool {
        if self.pos.valid() {
            return false;
        }

        // the synthetic final newline stands in for the end of the file
        let at = self.pos.input.len().saturating_sub(1);
        self.lex.push(Lexeme::new(LexemeTag::EOF, Span::empty(at)));
        true
    }

    fn lex_word(&mut self) -> bool {
        if !self.pos.get().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
            return false;
        }

        let start = self.pos.current;
        while self.pos.get().is_some_and(is_word_char) {
            self.pos.inc();
        }

        let tag = self.keyword_matcher
            .search_str(self.pos.form_str(start))
            .unwrap_or(LexemeTag::ID);

        self.push(tag, start);
        true
    }

    fn lex_decimal(&mut self) -> bool {
        let start = self.pos.current;

        if matches!(self.pos.get(), Some('+' | '-')) {
            self.pos.inc();
        }

        if !self.eat_digits() {
            self.pos.current = start;
            return false;
        }

        // each optional piece keeps the valid prefix when it is incomplete
        let before_fraction = self.pos.current;
        if self.pos.get() == Some('.') {
            self.pos.inc();
            if !self.eat_digits() {
                self.pos.current = before_fraction;
            }
        }

        let before_exponent = self.pos.current;
        if matches!(self.pos.get(), Some('e' | 'E')) {
            self.pos.inc();
            if matches!(self.pos.get(), Some('+' | '-')) {
                self.pos.inc();
            }

            if !self.eat_digits() {
                self.pos.current = before_exponent;
            }
        }

        self.push(LexemeTag::DECIMAL, start);
        true
    }

    // a digit followed by any digits or `_` separators
    fn eat_digits(&mut self) -> bool {
        if !self.pos.get().is_some_and(|c| c.is_ascii_digit()) {
            return false;
        }

        while self.pos.get().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.pos.inc();
        }

        true
    }

    fn lex_unrecognized(&mut self) {
        let start = self.pos.current;

        loop {
            self.pos.inc();
            if self.pos.at_separator() {
                break;
            }
        }

        let text = self.pos.form_str(start);
        let message = if text.chars().count() == 1 {
            format!("this character is not recognized: `{}`", text)
        }
        else {
            format!("these characters are not recognized: `{}`", text)
        };

        self.push(LexemeTag::ERROR, start);
        self.diagnostics.error(Span::new(start, self.pos.current), message);
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Copy, Clone)]
struct LexState<'s> {
    input: &'s str,
    current: usize,
}

impl<'s> LexState<'s> {
    fn new(input: &'s str, pos: usize) -> Self {
        LexState { input, current: pos }
    }

    fn valid(&self) -> bool {
        self.current < self.input.len()
    }

    fn rest(&self) -> &'s str {
        &self.input[self.current..]
    }

    fn get(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn inc(&mut self) -> &mut Self {
        if let Some(c) = self.get() {
            self.current += c.len_utf8();
        }

        self
    }

    fn form_str(&self, start: usize) -> &'s str {
        &self.input[start..self.current]
    }

    // whitespace, a comment, a mark or the end of the input
    fn at_separator(&self) -> bool {
        match self.get() {
            None => true,
            Some(c) if is_whitespace(c) => true,
            Some(_) => self.rest().starts_with("//") || match_mark(self.rest()).is_some(),
        }
    }
}

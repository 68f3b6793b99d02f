use crate::lex::Lex;
use crate::lex::token::{ Lexeme, LexemeTag };

/// Read position over a finished [`Lex`]. Reading past the end keeps
/// yielding the EOF lexeme.
#[derive(Clone)]
pub struct LexCursor<'l> {
    lex: &'l Lex,
    position: usize,
}

impl<'l> LexCursor<'l> {
    pub fn new(lex: &'l Lex) -> Self {
        if !lex.ends_with_eof() {
            panic!("Lex does not end with an EOF");
        }

        LexCursor { lex, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn rewind(&mut self, position: usize) {
        assert!(position < self.lex.len(), "rewind past the end of the lex");
        self.position = position;
    }

    pub fn peek(&self) -> Lexeme {
        self.peekn(0)
    }

    pub fn peekn(&self, n: usize) -> Lexeme {
        let last = self.lex.len() - 1;
        self.lex.lexemes()[(self.position + n).min(last)]
    }

    pub fn at(&self, tag: LexemeTag) -> bool {
        self.peek().tag() == tag
    }

    pub fn at_eof(&self) -> bool {
        self.at(LexemeTag::EOF)
    }

    pub fn lex(&mut self) -> Lexeme {
        let lexeme = self.peek();
        if lexeme.tag() != LexemeTag::EOF {
            self.position += 1;
        }

        lexeme
    }

    pub fn eat(&mut self, tag: LexemeTag) -> Option<Lexeme> {
        if self.at(tag) {
            Some(self.lex())
        }
        else {
            None
        }
    }

    // consumes n lexemes and returns the last one
    pub fn eatn(&mut self, n: usize) -> Option<Lexeme> {
        let mut ret = None;
        for _ in 0..n {
            ret = Some(self.lex());
        }

        ret
    }
}

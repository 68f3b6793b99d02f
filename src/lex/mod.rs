pub mod token;
pub mod lexer;
pub mod cursor;
mod keyword;
mod mark;

use crate::lex::lexer::Lexer;
use crate::lex::token::{ Lexeme, LexemeTag };
use crate::source::Source;

/// Lexemes of one source in source order, always closed by an EOF lexeme.
#[derive(Clone, Debug, Default)]
pub struct Lex {
    lexemes: Vec<Lexeme>,
}

impl Lex {
    pub fn new() -> Self {
        Lex { lexemes: Vec::new() }
    }

    pub fn push(&mut self, lexeme: Lexeme) {
        self.lexemes.push(lexeme);
    }

    // rollback of a speculative lexeme
    pub fn pop(&mut self) -> Option<Lexeme> {
        self.lexemes.pop()
    }

    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Lexeme> {
        self.lexemes.get(index)
    }

    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lexeme> {
        self.lexemes.iter()
    }

    pub fn ends_with_eof(&self) -> bool {
        self.lexemes.last().is_some_and(|l| l.tag() == LexemeTag::EOF)
    }
}

pub fn lex(source: &mut Source) -> Lex {
    let (input, diagnostics) = source.split_mut();
    Lexer::new(input, diagnostics).lex_all()
}

// tags and texts, diagnostics dropped
pub fn lex_all(src: &str) -> Vec<(LexemeTag, String)> {
    let mut source = Source::new("<input>", src);
    let lex = lex(&mut source);

    lex.iter()
        .map(|l| (l.tag(), l.text(source.text()).to_string()))
        .collect()
}

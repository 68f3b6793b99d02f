#![allow(non_camel_case_types)]

use subenum::subenum;

use crate::source::Span;

#[subenum(Keyword, Mark)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexemeTag {
    #[subenum(Keyword)]
    LET,

    #[subenum(Keyword)]
    VAR,

    #[subenum(Mark)]
    SHL_EQ,
    #[subenum(Mark)]
    SHR_EQ,
    #[subenum(Mark)]
    SHL,
    #[subenum(Mark)]
    SHR,
    #[subenum(Mark)]
    LE,
    #[subenum(Mark)]
    GE,
    #[subenum(Mark)]
    EQ_EQ,
    #[subenum(Mark)]
    BANG_EQ,
    #[subenum(Mark)]
    AMP_AMP,
    #[subenum(Mark)]
    PIPE_PIPE,
    #[subenum(Mark)]
    PLUS_PLUS,
    #[subenum(Mark)]
    MINUS_MINUS,
    #[subenum(Mark)]
    PLUS_EQ,
    #[subenum(Mark)]
    MINUS_EQ,
    #[subenum(Mark)]
    STAR_EQ,
    #[subenum(Mark)]
    SLASH_EQ,
    #[subenum(Mark)]
    PERCENT_EQ,
    #[subenum(Mark)]
    AMP_EQ,
    #[subenum(Mark)]
    CARET_EQ,
    #[subenum(Mark)]
    PIPE_EQ,
    #[subenum(Mark)]
    LT,
    #[subenum(Mark)]
    GT,
    #[subenum(Mark)]
    EQ,
    #[subenum(Mark)]
    BANG,
    #[subenum(Mark)]
    TILDE,
    #[subenum(Mark)]
    PLUS,
    #[subenum(Mark)]
    MINUS,
    #[subenum(Mark)]
    STAR,
    #[subenum(Mark)]
    SLASH,
    #[subenum(Mark)]
    PERCENT,
    #[subenum(Mark)]
    AMP,
    #[subenum(Mark)]
    CARET,
    #[subenum(Mark)]
    PIPE,
    #[subenum(Mark)]
    LPAREN,
    #[subenum(Mark)]
    RPAREN,
    #[subenum(Mark)]
    LBRACKET,
    #[subenum(Mark)]
    RBRACKET,
    #[subenum(Mark)]
    COMMA,
    #[subenum(Mark)]
    SEMI,
    #[subenum(Mark)]
    COLON,

    ID,
    DECIMAL,
    EOF,
    ERROR,
}

impl Keyword {
    pub fn spelling(&self) -> &'static str {
        match self {
            Keyword::LET => "let",
            Keyword::VAR => "var",
        }
    }
}

impl Mark {
    pub fn spelling(&self) -> &'static str {
        match self {
            Mark::SHL_EQ => "<<=",
            Mark::SHR_EQ => ">>=",
            Mark::SHL => "<<",
            Mark::SHR => ">>",
            Mark::LE => "<=",
            Mark::GE => ">=",
            Mark::EQ_EQ => "==",
            Mark::BANG_EQ => "!=",
            Mark::AMP_AMP => "&&",
            Mark::PIPE_PIPE => "||",
            Mark::PLUS_PLUS => "++",
            Mark::MINUS_MINUS => "--",
            Mark::PLUS_EQ => "+=",
            Mark::MINUS_EQ => "-=",
            Mark::STAR_EQ => "*=",
            Mark::SLASH_EQ => "/=",
            Mark::PERCENT_EQ => "%=",
            Mark::AMP_EQ => "&=",
            Mark::CARET_EQ => "^=",
            Mark::PIPE_EQ => "|=",
            Mark::LT => "<",
            Mark::GT => ">",
            Mark::EQ => "=",
            Mark::BANG => "!",
            Mark::TILDE => "~",
            Mark::PLUS => "+",
            Mark::MINUS => "-",
            Mark::STAR => "*",
            Mark::SLASH => "/",
            Mark::PERCENT => "%",
            Mark::AMP => "&",
            Mark::CARET => "^",
            Mark::PIPE => "|",
            Mark::LPAREN => "(",
            Mark::RPAREN => ")",
            Mark::LBRACKET => "[",
            Mark::RBRACKET => "]",
            Mark::COMMA => ",",
            Mark::SEMI => ";",
            Mark::COLON => ":",
        }
    }
}

impl LexemeTag {
    // how the tag reads in diagnostics
    pub fn describe(&self) -> String {
        if let Ok(mark) = Mark::try_from(*self) {
            return format!("`{}`", mark.spelling());
        }

        if let Ok(keyword) = Keyword::try_from(*self) {
            return format!("`{}`", keyword.spelling());
        }

        match self {
            LexemeTag::ID => "a name".to_string(),
            LexemeTag::DECIMAL => "a number".to_string(),
            LexemeTag::EOF => "the end of the file".to_string(),
            _ => "an unrecognized character".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme {
    tag: LexemeTag,
    span: Span,
}

impl Lexeme {
    pub fn new(tag: LexemeTag, span: Span) -> Self {
        Lexeme { tag, span }
    }

    pub fn tag(&self) -> LexemeTag {
        self.tag
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn text<'s>(&self, input: &'s str) -> &'s str {
        &input[self.span.range()]
    }
}

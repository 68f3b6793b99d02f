use crate::lex::token::Mark;

// longer spellings come before their prefixes, the first hit is the longest match
pub const MARK_LIST: &[Mark] = &[
    Mark::SHL_EQ,
    Mark::SHR_EQ,
    Mark::SHL,
    Mark::SHR,
    Mark::LE,
    Mark::GE,
    Mark::EQ_EQ,
    Mark::BANG_EQ,
    Mark::AMP_AMP,
    Mark::PIPE_PIPE,
    Mark::PLUS_PLUS,
    Mark::MINUS_MINUS,
    Mark::PLUS_EQ,
    Mark::MINUS_EQ,
    Mark::STAR_EQ,
    Mark::SLASH_EQ,
    Mark::PERCENT_EQ,
    Mark::AMP_EQ,
    Mark::CARET_EQ,
    Mark::PIPE_EQ,
    Mark::LT,
    Mark::GT,
    Mark::EQ,
    Mark::BANG,
    Mark::TILDE,
    Mark::PLUS,
    Mark::MINUS,
    Mark::STAR,
    Mark::SLASH,
    Mark::PERCENT,
    Mark::AMP,
    Mark::CARET,
    Mark::PIPE,
    Mark::LPAREN,
    Mark::RPAREN,
    Mark::LBRACKET,
    Mark::RBRACKET,
    Mark::COMMA,
    Mark::SEMI,
    Mark::COLON,
];

pub fn match_mark(rest: &str) -> Option<Mark> {
    MARK_LIST
        .iter()
        .find(|mark| rest.starts_with(mark.spelling()))
        .copied()
}

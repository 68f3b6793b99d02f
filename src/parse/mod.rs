pub mod operator;
pub mod parser;

use crate::ast::stmt::Parse;
use crate::lex::Lex;
use crate::parse::parser::Parser;
use crate::source::Source;

/// Parses a whole lexed source. Problems are reported to the source's
/// diagnostics; the returned `Parse` holds every statement that could be
/// recovered.
pub fn parse(source: &mut Source, lex: &Lex) -> Parse {
    let (input, diagnostics) = source.split_mut();
    Parser::new(input, lex, diagnostics).parse_all()
}

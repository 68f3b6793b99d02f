pub mod analyzer;
pub mod scope;
pub mod tree;

use crate::ast::stmt::Parse;
use crate::sema::analyzer::Analyzer;
use crate::sema::tree::Program;
use crate::source::Source;

/// Resolves names and types of a parsed source, reporting to its
/// diagnostics. Statements that fail to analyze are left out of the
/// returned program.
pub fn analyze(source: &mut Source, parse: &Parse) -> Program {
    let (input, diagnostics) = source.split_mut();
    Analyzer::new(input, diagnostics).analyze_all(parse)
}

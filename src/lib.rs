pub mod ast;
pub mod compiler;
pub mod lex;
pub mod number;
pub mod parse;
pub mod sema;
pub mod source;

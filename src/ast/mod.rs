pub mod expr;
pub mod expr_type;
pub mod stmt;

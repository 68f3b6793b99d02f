use std::path::PathBuf;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct CLOpt {
    #[arg(value_name = "FILE", num_args = 1.., required = true)]
    files: Vec<PathBuf>,

    /// Print every lexeme with its tag.
    #[arg(long)]
    dump_lex: bool,

    /// Print each statement with its expressions as S-expressions.
    #[arg(long)]
    dump_parse: bool,

    /// Print the typed program.
    #[arg(long)]
    dump_eval: bool,

    /// Leave out informational notes.
    #[arg(long)]
    no_notes: bool,
}

impl CLOpt {
    pub fn files(&self) -> &Vec<PathBuf> {
        &self.files
    }

    pub fn dump_lex(&self) -> bool {
        self.dump_lex
    }

    pub fn dump_parse(&self) -> bool {
        self.dump_parse
    }

    pub fn dump_eval(&self) -> bool {
        self.dump_eval
    }

    pub fn no_notes(&self) -> bool {
        self.no_notes
    }
}

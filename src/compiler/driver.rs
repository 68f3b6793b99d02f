use clap::Parser as _;

use crate::compiler::cl::CLOpt;
use crate::lex::lex;
use crate::parse::parse;
use crate::sema::analyze;
use crate::source::Source;
use crate::source::diagnostic::Severity;

pub fn compile(args: Vec<String>) -> i32 {
    // parse args
    let args = match CLOpt::try_parse_from(args) {
        Ok(parsed_args) => parsed_args,
        Err(e) => {
            // --help and --version end up here as well
            let _ = e.print();
            return if e.use_stderr() { 2 } else { 0 };
        }
    };

    let mut unreadable = false;
    let mut failed = false;

    for path in args.files() {
        let mut source = match Source::load(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("error: {}", e);
                unreadable = true;
                continue;
            }
        };

        failed |= check_source(&mut source, &args);
    }

    if unreadable {
        3
    }
    else if failed {
        1
    }
    else {
        0
    }
}

// runs the front end over one source, true when it has errors
fn check_source(source: &mut Source, args: &CLOpt) -> bool {
    let lex = lex(source);
    if args.dump_lex() {
        for lexeme in lex.iter() {
            println!("{:?} {:?}", lexeme.tag(), lexeme.text(source.text()));
        }
    }

    let parse = parse(source, &lex);
    if args.dump_parse() {
        for stmt in parse.iter() {
            println!("{}", stmt.display(source.text()));
        }
    }

    let program = analyze(source, &parse);
    if args.dump_eval() {
        print!("{}", program);
    }

    for diagnostic in source.diagnostics().iter() {
        if args.no_notes() && diagnostic.severity() == Severity::Info {
            continue;
        }

        eprint!("{}", source.render(diagnostic));
    }

    let diagnostics = source.diagnostics();
    if diagnostics.error_count() + diagnostics.warning_count() > 0 {
        eprintln!(
            "{}: {} error(s), {} warning(s)",
            source.name(),
            diagnostics.error_count(),
            diagnostics.warning_count()
        );
    }

    diagnostics.has_errors()
}

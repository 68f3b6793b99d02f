use arityc::ast::expr_type::Type;
use arityc::lex::lex;
use arityc::number::convert::Value;
use arityc::parse::parse;
use arityc::sema::analyze;
use arityc::sema::scope::Scope;
use arityc::sema::tree::{ EvalKind, Item, Program, SymbolId };
use arityc::source::Source;
use arityc::source::diagnostic::Severity;

fn analyzed(text: &str) -> (Source, Program) {
    let mut source = Source::new("test", text);
    let lex = lex(&mut source);
    let parse = parse(&mut source, &lex);
    let program = analyze(&mut source, &parse);
    (source, program)
}

fn messages(source: &Source) -> Vec<(Severity, String)> {
    source.diagnostics()
        .iter()
        .map(|d| (d.severity(), d.message().to_string()))
        .collect()
}

fn error_messages(text: &str) -> Vec<String> {
    let (source, _) = analyzed(text);
    source.diagnostics()
        .errors()
        .map(|d| d.message().to_string())
        .collect()
}

fn type_of(program: &Program, name: &str) -> Type {
    program.find(name).unwrap_or_else(|| panic!("`{}` is not defined", name)).ty()
}

/* --- scope --- */

#[test]
fn scope_keeps_the_first_definition() {
    let mut scope = Scope::empty();
    assert!(scope.add("x", SymbolId::new(0)));
    assert!(!scope.add("x", SymbolId::new(1)));

    assert_eq!(scope.find("x"), Some(SymbolId::new(0)));
    assert_eq!(scope.find("y"), None);
    assert_eq!(scope.len(), 1);
}

/* --- definitions and types --- */

#[test]
fn literal_types_follow_the_annotation() {
    let (source, program) = analyzed("let a: u8 = 200;\nlet b: f32 = 1.5;\nlet c = 7;\nlet d = 7.0;");
    assert!(source.diagnostics().is_empty());

    assert_eq!(type_of(&program, "a"), Type::U8);
    assert_eq!(type_of(&program, "b"), Type::F32);
    assert_eq!(type_of(&program, "c"), Type::I64);
    assert_eq!(type_of(&program, "d"), Type::F64);

    let Item::Definition(_, Some(value)) = &program.items()[0] else {
        panic!("expected a definition with a value");
    };
    assert_eq!(value.kind(), &EvalKind::Constant(Value::Unsigned(200)));
}

#[test]
fn negative_literals_use_the_full_range() {
    let (source, program) = analyzed("let lo: i8 = -128;");
    assert!(source.diagnostics().is_empty());

    let Item::Definition(_, Some(value)) = &program.items()[0] else {
        panic!("expected a definition with a value");
    };
    assert_eq!(value.kind(), &EvalKind::Constant(Value::Signed(-128)));
    assert_eq!(source.slice(value.span()), "-128");
}

#[test]
fn conversion_errors_are_reported() {
    assert_eq!(error_messages("let x: i8 = 128;"), vec!["the literal is out of bounds for `i8`"]);
    assert_eq!(error_messages("let x: u32 = -1;"), vec!["the literal is negative, but `u32` is unsigned"]);
    assert_eq!(error_messages("let x: i32 = 0.5;"), vec!["the literal is not an integer, as `i32` requires"]);
    assert_eq!(error_messages("let x = 1e400;"), vec!["the literal is too large for `f64`"]);
}

#[test]
fn literals_take_the_type_of_the_other_operand() {
    let (source, program) = analyzed("var x: u16 = 1;\nlet y = 2 * x;\nlet z = x + 3;");
    assert!(source.diagnostics().is_empty());
    assert_eq!(type_of(&program, "y"), Type::U16);
    assert_eq!(type_of(&program, "z"), Type::U16);
}

#[test]
fn unknown_types_and_names() {
    assert_eq!(error_messages("let x: int = 1;"), vec!["`int` is not a type"]);
    assert_eq!(error_messages("let x: i32 + 1 = 1;"), vec!["expected the name of a type"]);
    assert_eq!(error_messages("let x = y;"), vec!["`y` is not defined"]);
}

#[test]
fn definition_type_must_match() {
    assert_eq!(
        error_messages("let a: i32 = 1;\nlet b: i64 = a;"),
        vec!["expected a value of type `i64`, found `i32`"]
    );
    assert_eq!(
        error_messages("let flag: bool = 1;"),
        vec!["expected a value of type `bool`, found `i64`"]
    );
}

#[test]
fn redefinition_points_at_the_first() {
    let (source, program) = analyzed("let x = 1;\nvar x = 2;");
    assert_eq!(program.symbols().len(), 1);

    let diagnostics = messages(&source);
    assert_eq!(diagnostics[0], (Severity::Error, "`x` is already defined".to_string()));
    assert_eq!(diagnostics[1], (Severity::Info, "`x` is first defined here".to_string()));

    let note = source.diagnostics().iter().nth(1).expect("a note");
    assert_eq!(source.location(note.span().start()).to_string(), "1:5");
}

#[test]
fn variables_without_a_value() {
    let (source, program) = analyzed("var counter: u32;\ncounter = 5;");
    assert!(source.diagnostics().is_empty());
    assert!(matches!(program.items()[0], Item::Definition(_, None)));
    assert!(program.find("counter").expect("defined").is_mutable());
}

/* --- operators --- */

#[test]
fn comparisons_and_logic_yield_bool() {
    let (source, program) = analyzed("let a = 1;\nlet b = a < 2 && !(a == 3);");
    assert!(source.diagnostics().is_empty());
    assert_eq!(type_of(&program, "b"), Type::Bool);
}

#[test]
fn operand_classes() {
    assert_eq!(
        error_messages("let a = 1.5 % 2.0;"),
        vec!["`%` cannot be applied to `f64`"]
    );
    assert_eq!(
        error_messages("let a = 1 < 2;\nlet b = a + 1;"),
        vec!["`+` cannot be applied to `bool`"]
    );
    assert_eq!(
        error_messages("let a = 1;\nlet b = a && a;"),
        vec!["`&&` cannot be applied to `i64`"]
    );
    assert_eq!(
        error_messages("let a: u8 = 1;\nlet b = -a;"),
        vec!["`-` cannot be applied to `u8`"]
    );
}

#[test]
fn mismatched_operands() {
    assert_eq!(
        error_messages("let a: i32 = 1;\nlet b: i64 = 2;\nlet c = a + b;"),
        vec!["mismatched types for `+`: `i32` and `i64`"]
    );
}

#[test]
fn shifts_keep_the_left_type() {
    let (source, program) = analyzed("let a: u8 = 1;\nlet b: i32 = 3;\nlet c = a << b;");
    assert!(source.diagnostics().is_empty());
    assert_eq!(type_of(&program, "c"), Type::U8);
}

#[test]
fn assignment_needs_a_mutable_variable() {
    let (source, _) = analyzed("let x = 1;\nx = 2;");
    let diagnostics = messages(&source);

    assert_eq!(diagnostics[0], (Severity::Error, "`x` is immutable and cannot be modified".to_string()));
    assert_eq!(diagnostics[1], (Severity::Info, "`x` is defined with `let` here".to_string()));

    assert_eq!(error_messages("1++;"), vec!["the target of `++` must be a variable"]);
}

#[test]
fn compound_assignment_and_steps() {
    let (source, program) = analyzed("var x: i32 = 1;\nx += 2;\nx++;\n--x;\nx <<= 1;");
    assert!(source.diagnostics().is_empty(), "{:?}", messages(&source));
    assert_eq!(program.items().len(), 5);

    let Item::Expression(eval) = &program.items()[1] else {
        panic!("expected an expression");
    };
    assert_eq!(eval.ty(), Type::I32);
}

#[test]
fn calls_and_lists_have_no_value() {
    assert_eq!(error_messages("let f = 1;\nf(2);"), vec!["`f` is not a function"]);
    assert_eq!(error_messages("let l = [1, 2];"), vec!["lists have no value type yet"]);
}

/* --- warnings and output --- */

#[test]
fn discarded_values_are_flagged() {
    let (source, _) = analyzed("var x = 1;\nx + 1;\nx = 2;");
    assert_eq!(
        messages(&source),
        vec![(Severity::Warning, "the value of this expression is unused".to_string())]
    );
    assert_eq!(source.diagnostics().warning_count(), 1);
    assert!(!source.diagnostics().has_errors());
}

#[test]
fn program_prints_typed_items() {
    let (_, program) = analyzed("let a: i8 = -3;\nvar b = a * 2;\nvar c: f64;\nb = 4;");
    let exp = "let a: i8 = -3\nvar b: i8 = (* a 2)\nvar c: f64\n(= b 4): i8\n";
    assert_eq!(program.to_string(), exp);
}

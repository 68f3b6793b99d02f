use arityc::lex::{ lex, lex_all };
use arityc::lex::token::LexemeTag::{ self, * };
use arityc::source::Source;
use arityc::source::diagnostic::Severity;

fn t(tag: LexemeTag, text: &str) -> (LexemeTag, String) {
    (tag, text.to_string())
}

/* --- basic lexical categories --- */

#[test]
fn keywords_and_identifiers() {
    let got = lex_all("let var foo _bar let1 Var");
    let exp = vec![
        t(LET, "let"),
        t(VAR, "var"),
        t(ID,  "foo"),
        t(ID,  "_bar"),
        t(ID,  "let1"),
        t(ID,  "Var"),
        t(EOF, ""),
    ];
    assert_eq!(got, exp);
}

#[test]
fn decimal_literals() {
    let got = lex_all("1 1_000 3.14 1e10 2.5E-3 6e+2");
    let exp = vec![
        t(DECIMAL, "1"),
        t(DECIMAL, "1_000"),
        t(DECIMAL, "3.14"),
        t(DECIMAL, "1e10"),
        t(DECIMAL, "2.5E-3"),
        t(DECIMAL, "6e+2"),
        t(EOF,     ""),
    ];
    assert_eq!(got, exp);
}

#[test]
fn sign_is_a_separate_mark() {
    let got = lex_all("-1 +2");
    let exp = vec![
        t(MINUS,   "-"),
        t(DECIMAL, "1"),
        t(PLUS,    "+"),
        t(DECIMAL, "2"),
        t(EOF,     ""),
    ];
    assert_eq!(got, exp);
}

#[test]
fn punctuation() {
    let got = lex_all("()[],;:");
    let exp = vec![
        t(LPAREN,   "("),
        t(RPAREN,   ")"),
        t(LBRACKET, "["),
        t(RBRACKET, "]"),
        t(COMMA,    ","),
        t(SEMI,     ";"),
        t(COLON,    ":"),
        t(EOF,      ""),
    ];
    assert_eq!(got, exp);
}

/* --- maximal munch --- */

#[test]
fn longest_mark_wins() {
    for (text, tag) in [("<<=", SHL_EQ), ("<<", SHL), ("<=", LE), ("<", LT)] {
        let got = lex_all(&format!("{} ", text));
        assert_eq!(got, vec![t(tag, text), t(EOF, "")], "lexing {:?}", text);
    }
}

#[test]
fn marks_need_no_separator() {
    let got = lex_all("a<<=b>>c==d");
    let exp = vec![
        t(ID,     "a"),
        t(SHL_EQ, "<<="),
        t(ID,     "b"),
        t(SHR,    ">>"),
        t(ID,     "c"),
        t(EQ_EQ,  "=="),
        t(ID,     "d"),
        t(EOF,    ""),
    ];
    assert_eq!(got, exp);
}

#[test]
fn doubled_marks() {
    let got = lex_all("x++ --y a&&b||c !=");
    let exp = vec![
        t(ID,          "x"),
        t(PLUS_PLUS,   "++"),
        t(MINUS_MINUS, "--"),
        t(ID,          "y"),
        t(ID,          "a"),
        t(AMP_AMP,     "&&"),
        t(ID,          "b"),
        t(PIPE_PIPE,   "||"),
        t(ID,          "c"),
        t(BANG_EQ,     "!="),
        t(EOF,         ""),
    ];
    assert_eq!(got, exp);
}

/* --- separators --- */

#[test]
fn comments_run_to_end_of_line() {
    let got = lex_all("x // ignored ; @@@\ny");
    assert_eq!(got, vec![t(ID, "x"), t(ID, "y"), t(EOF, "")]);
}

#[test]
fn all_whitespace_kinds() {
    let got = lex_all("a\tb\r\nc \n");
    assert_eq!(got, vec![t(ID, "a"), t(ID, "b"), t(ID, "c"), t(EOF, "")]);
}

#[test]
fn empty_input_is_only_eof() {
    let mut source = Source::new("empty", "");
    let lex = lex(&mut source);

    assert_eq!(lex.len(), 1);
    assert!(lex.ends_with_eof());
    assert!(source.diagnostics().is_empty());
}

/* --- EOF / error behaviour --- */

#[test]
fn word_glued_to_number_is_one_error() {
    let mut source = Source::new("glued", "1abc;");
    let lex = lex(&mut source);

    let tags: Vec<_> = lex.iter().map(|l| l.tag()).collect();
    assert_eq!(tags, vec![ERROR, SEMI, EOF]);
    assert_eq!(lex.lexemes()[0].text(source.text()), "1abc");

    let diagnostics: Vec<_> = source.diagnostics().iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity(), Severity::Error);
    assert_eq!(diagnostics[0].message(), "these characters are not recognized: `1abc`");
}

#[test]
fn single_unrecognized_character() {
    let mut source = Source::new("at", "x @ y");
    let lex = lex(&mut source);

    let tags: Vec<_> = lex.iter().map(|l| l.tag()).collect();
    assert_eq!(tags, vec![ID, ERROR, ID, EOF]);

    let diagnostic = source.diagnostics().iter().next().expect("one diagnostic");
    assert_eq!(diagnostic.message(), "this character is not recognized: `@`");
}

#[test]
fn every_unrecognized_run_is_reported_once() {
    let mut source = Source::new("runs", "@@ x $ é");
    let lex = lex(&mut source);

    let errors: Vec<_> = lex.iter()
        .filter(|l| l.tag() == ERROR)
        .map(|l| l.text(source.text()).to_string())
        .collect();

    assert_eq!(errors, vec!["@@", "$", "é"]);
    assert_eq!(source.diagnostics().error_count(), 3);
}

#[test]
fn incomplete_fraction_is_rejected() {
    let got = lex_all("7. 1e");
    assert_eq!(got, vec![t(ERROR, "7."), t(ERROR, "1e"), t(EOF, "")]);
}

#[test]
fn lex_always_ends_with_eof() {
    for text in ["", "let", "@", "1abc", "(((", "// only a comment"] {
        let mut source = Source::new("eof", text);
        let lex = lex(&mut source);

        assert!(lex.ends_with_eof(), "lexing {:?}", text);
        assert_eq!(lex.iter().filter(|l| l.tag() == EOF).count(), 1);
    }
}

use calcbox::{
    i18n::Language,
    session::{Reply, Session},
};
use pretty_assertions::assert_eq;

fn output(text: &str) -> Reply {
    Reply::Output(text.to_string())
}

#[test]
fn assignments_and_expressions() {
    let mut session = Session::new(Language::En);
    assert_eq!(session.handle("x = 2.5"), output("x = 2.5"));
    assert_eq!(session.handle("y = x ** 2 + 3"), output("y = 9.25"));
    assert_eq!(session.handle("  x * 4  "), output("10"));
    assert_eq!(session.handle("0.1 + 0.2"), output("0.30000000000000004"));
    assert_eq!(session.handle("10 ** 20"), output("1e20"));
}

#[test]
fn blank_lines_are_ignored() {
    let mut session = Session::new(Language::En);
    assert_eq!(session.handle(""), Reply::Silent);
    assert_eq!(session.handle("   "), Reply::Silent);
    assert_eq!(session.history().count(), 0);
}

#[test]
fn errors_do_not_end_the_session() {
    let mut session = Session::new(Language::En);
    assert_eq!(session.handle("1/0"), output("Error: Division by zero."));
    assert_eq!(session.handle("foo(2)"), output("Error: Invalid function: foo"));
    assert_eq!(session.handle("2 + 2"), output("4"));

    let nested = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(session.handle(&nested),
               output("Error: Syntax error: too many nested parentheses (column 65)"));
    assert_eq!(session.handle("3 * 3"), output("9"));
}

#[test]
fn spanish_errors_and_commands() {
    let mut session = Session::new(Language::Es);
    assert_eq!(session.handle("1/0"), output("Error: División entre cero."));
    assert_eq!(session.handle("x, y = 1, 2"),
               output("Error: Solo se permiten asignaciones simples (ej. x = 2)."));
    assert_eq!(session.handle("hist"), output("(historial vacío)"));
    assert_eq!(session.handle("AYUDA"),
               output(Language::Es.messages().help));
    assert_eq!(session.handle("Salir"), Reply::Exit("¡Hasta luego!".to_string()));
}

#[test]
fn english_commands() {
    let mut session = Session::new(Language::En);
    assert_eq!(session.handle("?"), output(Language::En.messages().help));
    assert_eq!(session.handle("HELP"), output(Language::En.messages().help));
    assert_eq!(session.handle("history"), output("(empty history)"));
    assert_eq!(session.handle("quit"), Reply::Exit("Goodbye!".to_string()));
    // `salir` is only a command in Spanish.
    assert_eq!(session.handle("salir"), output("Error: Unknown name: salir"));
}

#[test]
fn history_keeps_successful_lines() {
    let mut session = Session::new(Language::En);
    session.handle("x = 5");
    session.handle("x / 0");
    session.handle("x * 2");

    assert_eq!(session.history().collect::<Vec<_>>(), vec![("x = 5", 5.0), ("x * 2", 10.0)]);
    assert_eq!(session.handle("hist"), output("01. x = 5 = 5\n02. x * 2 = 10"));
}

#[test]
fn history_is_bounded() {
    let mut session = Session::with_capacity(Language::En, 2);
    for line in ["1", "2", "3"] {
        session.handle(line);
    }
    assert_eq!(session.history().collect::<Vec<_>>(), vec![("2", 2.0), ("3", 3.0)]);

    let mut session = Session::with_capacity(Language::En, 0);
    session.handle("1");
    assert_eq!(session.handle("hist"), output("(empty history)"));
}

#[test]
fn welcome_and_goodbye_follow_the_language() {
    let session = Session::new(Language::Es);
    assert!(session.welcome().contains("ayuda"));
    assert_eq!(session.goodbye(), "¡Hasta luego!");
    assert_eq!(Session::new(Language::En).goodbye(), "Goodbye!");
}

#[test]
fn assignments_persist_across_lines() {
    let mut session = Session::new(Language::En);
    session.handle("pi = 3");
    assert_eq!(session.handle("pi * 2"), output("6"));
    assert_eq!(session.evaluator().environment().get("pi"), Some(3.0));
}

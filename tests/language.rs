use calcbox::{
    Evaluator,
    error::ErrorKind,
    evaluate_expression,
    evaluate_line,
    interpreter::evaluator::function::core::BUILTIN_FUNCTIONS,
};
use pretty_assertions::assert_eq;

fn assert_value(src: &str, expected: f64) {
    match evaluate_expression(src) {
        Ok(value) => assert_eq!(value, expected, "{src}"),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

fn assert_close(src: &str, expected: f64) {
    let value = evaluate_expression(src).unwrap_or_else(|e| panic!("Expression {src:?} failed: {e}"));
    assert!((value - expected).abs() < 1e-10, "{src}: {value} != {expected}");
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match evaluate_line(src, &mut Evaluator::new()) {
        Ok(value) => panic!("Line {src:?} succeeded with {value:?} but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "{src}: {e}"),
    }
}

fn assert_message(src: &str, message: &str) {
    match evaluate_line(src, &mut Evaluator::new()) {
        Ok(value) => panic!("Line {src:?} succeeded with {value:?} but was expected to fail"),
        Err(e) => assert_eq!(e.to_string(), message, "{src}"),
    }
}

#[test]
fn basic_arithmetic() {
    assert_value("2 + 2", 4.0);
    assert_value("3 - 1", 2.0);
    assert_value("2 * 3", 6.0);
    assert_value("8 / 4", 2.0);
    assert_value("7 // 2", 3.0);
    assert_value("7 % 3", 1.0);
    assert_value("2 ** 3", 8.0);
    assert_value("-5", -5.0);
    assert_value("+5", 5.0);
}

#[test]
fn precedence_and_grouping() {
    assert_value("2 + 3 * 4", 14.0);
    assert_value("(2 + 3) * 4", 20.0);
    assert_value("2 ** 3 + 1", 9.0);
    assert_value("8 / (2 * 2)", 2.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("2 ** 3 ** 2", 512.0);
}

#[test]
fn unary_and_power() {
    assert_value("-2 ** 2", -4.0);
    assert_value("(-2) ** 2", 4.0);
    assert_value("2 ** -1", 0.5);
    assert_value("--3", 3.0);
    assert_value("2 * -3", -6.0);
}

#[test]
fn floor_division_and_modulo_follow_the_divisor() {
    assert_value("-7 // 2", -4.0);
    assert_value("-7 % 3", 2.0);
    assert_value("7 % -3", -2.0);
    assert_value("7.5 // 2", 3.0);
}

#[test]
fn numeric_literals() {
    assert_value("3.", 3.0);
    assert_value(".5", 0.5);
    assert_value("2.5e-3", 0.0025);
    assert_value("1E5", 100_000.0);
    assert_value("00", 0.0);
    assert_value("007.5", 7.5);
    assert_message("010",
                   "Syntax error: leading zeros in decimal integer literals are not permitted (column 1)");
}

#[test]
fn constants() {
    assert_value("pi", std::f64::consts::PI);
    assert_value("e", std::f64::consts::E);
    assert_value("tau", std::f64::consts::TAU);
    assert_failure("PI", ErrorKind::UnknownName);
}

#[test]
fn mathematical_functions() {
    assert_value("abs(-5)", 5.0);
    assert_value("round(3.7)", 4.0);
    assert_value("floor(3.7)", 3.0);
    assert_value("ceil(3.2)", 4.0);
    assert_value("fact(5)", 120.0);
    assert_value("factorial(5)", 120.0);
    assert_value("sqrt(16)", 4.0);
    assert_value("sin(0)", 0.0);
    assert_value("cos(0)", 1.0);
    assert_value("tan(0)", 0.0);
    assert_value("ln(1)", 0.0);
    assert_close("log(100, 10)", 2.0);
    assert_close("log(1000)", 3.0);
    assert_close("deg(pi)", 180.0);
    assert_close("rad(90)", std::f64::consts::FRAC_PI_2);
    assert_close("exp(1)", std::f64::consts::E);
    assert_close("sqrt(16) + sin(pi / 2)", 5.0);
}

#[test]
fn every_allowed_function_is_callable() {
    for name in BUILTIN_FUNCTIONS {
        assert!(evaluate_expression(&format!("{name}(1)")).is_ok(), "{name}(1) failed");
    }
}

#[test]
fn round_keeps_ties_to_even() {
    assert_value("round(2.5)", 2.0);
    assert_value("round(3.5)", 4.0);
    assert_value("round(2.675, 2)", 2.67);
    assert_value("round(1234, -2)", 1200.0);
    assert_value("round(1.5e300, -300)", 2e300);
}

#[test]
fn keyword_arguments() {
    assert_value("log(8, base=2)", 3.0);
    assert_value("log(x=100)", 2.0);
    assert_value("round(2.4, ndigits=0)", 2.0);
    assert_value("round(number=1.26, ndigits=1)", 1.3);
}

#[test]
fn ieee_results_are_returned() {
    assert_value("1e308 * 10", f64::INFINITY);
    assert_value("-1e308 - 1e308", f64::NEG_INFINITY);
}

#[test]
fn division_by_zero() {
    assert_failure("1/0", ErrorKind::DivisionByZero);
    assert_failure("1 // 0", ErrorKind::DivisionByZero);
    assert_failure("5 % 0", ErrorKind::DivisionByZero);
    assert_failure("0 ** -1", ErrorKind::DivisionByZero);
    assert_failure("1 / (2 - 2)", ErrorKind::DivisionByZero);
    assert_message("1/0", "Division by zero.");
}

#[test]
fn arithmetic_errors() {
    assert_failure("10 ** 400", ErrorKind::ArithmeticError);
    assert_failure("(-8) ** (1 / 3)", ErrorKind::ArithmeticError);
    assert_message("10.0 ** 400", "Arithmetic error in Pow: numerical result out of range");
}

#[test]
fn unknown_names_and_functions() {
    assert_failure("z + 1", ErrorKind::UnknownName);
    assert_message("z + 1", "Unknown name: z");
    assert_failure("foo(2)", ErrorKind::InvalidFunction);
    assert_message("foo(2)", "Invalid function: foo");
    assert_failure("print(1)", ErrorKind::InvalidFunction);
}

#[test]
fn function_failures() {
    assert_failure("sqrt(-1)", ErrorKind::FunctionCallError);
    assert_failure("fact(-1)", ErrorKind::FunctionCallError);
    assert_failure("fact(2.5)", ErrorKind::FunctionCallError);
    assert_failure("ln(0)", ErrorKind::FunctionCallError);
    assert_failure("exp(1000)", ErrorKind::FunctionCallError);
    assert_failure("fact(171)", ErrorKind::FunctionCallError);
    assert_message("sqrt(-1)", "Error calling sqrt: math domain error");
    assert_message("fact(-1)", "Error calling fact: factorial() not defined for negative values");
    assert_message("log(8, 1)", "Error calling log: float division by zero");
    assert_message("floor(1e308 * 10)",
                   "Error calling floor: cannot convert float infinity to integer");
}

#[test]
fn argument_binding_errors() {
    assert_message("sin()", "Error calling sin: sin() takes exactly one argument (0 given)");
    assert_message("abs(1, 2)", "Error calling abs: abs() takes exactly one argument (2 given)");
    assert_message("sin(x=1)", "Error calling sin: sin() takes no keyword arguments");
    assert_message("log(8, bas=2)",
                   "Error calling log: log() got an unexpected keyword argument 'bas'");
    assert_message("log(8, x=2)",
                   "Error calling log: log() got multiple values for argument 'x'");
    assert_message("round()", "Error calling round: round() missing required argument: 'number'");
    assert_message("round(1, 2, 3)",
                   "Error calling round: round() takes at most 2 arguments (3 given)");
}

#[test]
fn non_numeric_literals() {
    assert_failure("True", ErrorKind::InvalidConstant);
    assert_failure("None + 1", ErrorKind::InvalidConstant);
    assert_message("'abc'", "Invalid constant: 'abc'");
}

#[test]
fn disallowed_operators() {
    assert_message("1 | 2", "Invalid operator: BitOr");
    assert_message("6 & 3", "Invalid operator: BitAnd");
    assert_message("1 << 2", "Invalid operator: LShift");
    assert_message("2 @ 3", "Invalid operator: MatMult");
    assert_message("~1", "Invalid unary operator: Invert");
    assert_message("not 1", "Invalid unary operator: Not");
    assert_failure("2 ^ 3", ErrorKind::InvalidOperator);
}

#[test]
fn unsupported_constructs() {
    let cases = [("1 < 2", "Compare"),
                 ("1 == 1", "Compare"),
                 ("1 and 2", "BoolOp"),
                 ("1 or 2", "BoolOp"),
                 ("1 if 2 else 3", "IfExp"),
                 ("lambda: 1", "Lambda"),
                 ("[1, 2]", "List"),
                 ("{1: 2}", "Dict"),
                 ("{}", "Dict"),
                 ("{1, 2}", "Set"),
                 ("pi.real", "Attribute"),
                 ("pi[0]", "Subscript"),
                 ("(1, 2)", "Tuple"),
                 ("1, 2", "Tuple"),
                 ("()", "Tuple"),
                 ("x for x in y", "GeneratorExp"),
                 ("sqrt(*x)", "Starred")];
    for (src, kind) in cases {
        assert_failure(src, ErrorKind::InvalidStructure);
        assert_message(src, &format!("Invalid structure: {kind}"));
    }
}

#[test]
fn calls_only_by_name() {
    assert_value("(sqrt)(4)", 2.0);
    assert_failure("(1 + 2)(3)", ErrorKind::FunctionOnly);
    assert_failure("2(3)", ErrorKind::FunctionOnly);
    assert_failure("sqrt(4)(2)", ErrorKind::FunctionOnly);
    assert_message("2(3)", "Only function calls by name are allowed.");
}

#[test]
fn syntax_errors() {
    for src in ["2 +* 3", "1 +", "(1 + 2", "1 + 2)", "$", "sqrt(1,,)", "2 3", "1; 2", "log(x=1, 2)"]
    {
        assert_failure(src, ErrorKind::SyntaxError);
    }
    assert_message("2 +* 3", "Syntax error: unexpected token '*' (column 4)");
}

#[test]
fn deep_nesting_is_refused() {
    let parens = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
    assert_message(&parens, "Syntax error: too many nested parentheses (column 65)");
    assert_message(&format!("{}1", "-".repeat(100_000)),
                   "Syntax error: expression is nested too deeply (column 65)");

    for src in [format!("{}1{}", "sqrt(".repeat(1000), ")".repeat(1000)),
                format!("2{}", " ** 2".repeat(1000)),
                format!("{}1", "not ".repeat(1000)),
                format!("1{}", " + 1".repeat(100_000)),
                format!("1{}", " * 1".repeat(100_000))]
    {
        assert_failure(&src, ErrorKind::SyntaxError);
    }
}

#[test]
fn moderate_nesting_is_accepted() {
    assert_value(&format!("{}1{}", "(".repeat(60), ")".repeat(60)), 1.0);
    assert_value(&format!("{}1", "-".repeat(60)), 1.0);
    assert_value(&format!("{}16{}", "sqrt(".repeat(2), ")".repeat(2)), 2.0);
    assert_value(&format!("1{}", " + 1".repeat(900)), 901.0);
}

#[test]
fn only_simple_assignments() {
    for src in ["x, y = 1, 2", "x = y = 1", "x += 1", "pi.real = 1", "x = 1; y = 2"] {
        assert_failure(src, ErrorKind::SimpleAssignmentOnly);
    }
    assert_message("x, y = 1, 2", "Only simple assignments allowed (e.g., x = 2).");
    for src in ["2 = 3", "sqrt(4) = 2", "a + b = 1", "x =", "= 5"] {
        assert_failure(src, ErrorKind::SyntaxError);
    }
}

#[test]
fn variables() {
    let mut evaluator = Evaluator::new();

    let result = evaluate_line("x = 5", &mut evaluator).unwrap();
    assert_eq!((result.value, result.name.as_deref()), (5.0, Some("x")));

    let result = evaluate_line("x * 2", &mut evaluator).unwrap();
    assert_eq!((result.value, result.name), (10.0, None));

    let result = evaluate_line("y = x + 3", &mut evaluator).unwrap();
    assert_eq!((result.value, result.name.as_deref()), (8.0, Some("y")));

    let result = evaluate_line("x = x + 1;", &mut evaluator).unwrap();
    assert_eq!(result.value, 6.0);
    assert_eq!(evaluator.environment().get("x"), Some(6.0));
}

#[test]
fn failed_assignment_leaves_environment_untouched() {
    let mut evaluator = Evaluator::new();
    evaluate_line("x = 1", &mut evaluator).unwrap();
    let before = evaluator.environment().clone();

    assert!(evaluate_line("x = z", &mut evaluator).is_err());
    assert!(evaluate_line("w = 1 / 0", &mut evaluator).is_err());
    assert!(evaluate_line("x += 1", &mut evaluator).is_err());

    assert_eq!(evaluator.environment(), &before);
    assert!(!evaluator.environment().contains("w"));
}

#[test]
fn constants_can_be_shadowed() {
    let mut evaluator = Evaluator::new();
    evaluate_line("pi = 3", &mut evaluator).unwrap();
    assert_eq!(evaluate_line("pi * 2", &mut evaluator).unwrap().value, 6.0);

    let evaluator = Evaluator::with_variables([("e", 2.0), ("r", 0.5)]);
    assert_eq!(evaluator.eval_expr("e + r").unwrap(), 2.5);
    assert_eq!(evaluator.eval_expr("tau").unwrap(), std::f64::consts::TAU);
}

#[test]
fn expressions_never_assign() {
    let evaluator = Evaluator::new();
    assert_eq!(evaluator.eval_expr("x = 1").unwrap_err().kind(), ErrorKind::SyntaxError);
    assert_eq!(evaluator.eval_expr("x += 1").unwrap_err().kind(), ErrorKind::SyntaxError);
    assert!(!evaluator.environment().contains("x"));
}

#[test]
fn evaluation_is_deterministic() {
    let evaluator = Evaluator::with_variables([("x", 0.1)]);
    let first = evaluator.eval_expr("x * 3 + sin(x) / 7").unwrap();
    for _ in 0..10 {
        assert_eq!(evaluator.eval_expr("x * 3 + sin(x) / 7").unwrap(), first);
    }
}

#[test]
fn errors_are_reported_in_evaluation_order() {
    assert_failure("foo(1 / 0)", ErrorKind::InvalidFunction);
    assert_failure("z + 1 / 0", ErrorKind::UnknownName);
    assert_failure("(1 / 0) | 2", ErrorKind::DivisionByZero);
    assert_failure("~(1 / 0)", ErrorKind::DivisionByZero);
    assert_failure("sqrt(z, x=1)", ErrorKind::UnknownName);
}

#[test]
fn comments_are_ignored() {
    assert_value("2 + 2  # four", 4.0);
}

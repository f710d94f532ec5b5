use mica::syntax::ast::{print_expr, BinOp, Expr, UnOp};
use mica::syntax::intern::Interner;
use mica::syntax::parse::parse_expression_str;

/// Constant-folds an arithmetic expression, as a cross-check on the parse
/// tree shape independent of the printer.
fn eval(expr: &Expr) -> i64 {
    match expr {
        Expr::Int(value) => *value as i64,
        Expr::Unary { op, operand } => {
            let v = eval(operand);
            match op {
                UnOp::Neg => -v,
                UnOp::Plus => v,
                other => panic!("unexpected unary operator {:?}", other),
            }
        }
        Expr::Binary { op, left, right } => {
            let l = eval(left);
            let r = eval(right);
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                other => panic!("unexpected binary operator {:?}", other),
            }
        }
        other => panic!("unexpected expression {:?}", other),
    }
}

fn eval_str(source: &str) -> i64 {
    let mut interner = Interner::new();
    let expr = parse_expression_str(source, &mut interner)
        .unwrap_or_else(|e| panic!("parse failed for {:?}: {}", source, e));
    eval(&expr)
}

fn printed(source: &str) -> String {
    let mut interner = Interner::new();
    let expr = parse_expression_str(source, &mut interner)
        .unwrap_or_else(|e| panic!("parse failed for {:?}: {}", source, e));
    print_expr(&expr, &interner)
}

#[test]
fn test_evaluation() {
    assert_eq!(eval_str("1"), 1);
    assert_eq!(eval_str("(1)"), 1);
    assert_eq!(eval_str("1-2-3"), -4);
    assert_eq!(eval_str("10/5/2"), 1);
    assert_eq!(eval_str("2*3+4*5"), 26);
    assert_eq!(eval_str("2*(3+4)*5"), 70);
    assert_eq!(eval_str("2+-3"), -1);
    assert_eq!(eval_str("-+1"), -1);
    assert_eq!(eval_str("--1"), 1);
    assert_eq!(eval_str("'a' - 'A'"), 32);
}

#[test]
fn test_printed_form() {
    assert_eq!(printed("1-2-3"), "(- (- 1 2) 3)");
    assert_eq!(printed("2*3+4*5"), "(+ (* 2 3) (* 4 5))");
    assert_eq!(printed("2*(3+4)*5"), "(* (* 2 (+ 3 4)) 5)");
    assert_eq!(printed("-+1"), "(- (+ 1))");
    assert_eq!(printed("(((7)))"), "7");
}

#[test]
fn test_literals_survive_parsing() {
    assert_eq!(printed("0x10 + 0b101 + 010"), "(+ (+ 16 5) 8)");
    assert_eq!(printed("3.14"), "3.14");
    // The printer emits string payloads raw; the lexer has already decoded
    // the \n escape into an actual newline byte.
    assert_eq!(printed("\"hi\\n\""), "\"hi\n\"");
}

#[test]
fn test_names_are_interned() {
    let mut interner = Interner::new();
    let expr = parse_expression_str("foo + foo", &mut interner).unwrap();
    match &expr {
        Expr::Binary { left, right, .. } => match (left.as_ref(), right.as_ref()) {
            (Expr::Name(a), Expr::Name(b)) => assert_eq!(a, b),
            other => panic!("expected two names, got {:?}", other),
        },
        other => panic!("expected a binary expression, got {:?}", other),
    }
    assert_eq!(print_expr(&expr, &interner), "(+ foo foo)");
}

#[test]
fn test_malformed_input_is_rejected() {
    let inputs = ["", "(1", "1+", "1+*2", "1 2", "0b12", "'ab'", "\"oops"];
    for source in inputs {
        let mut interner = Interner::new();
        let result = parse_expression_str(source, &mut interner);
        assert!(result.is_err(), "expected an error for {:?}", source);
    }
}

#[test]
fn test_error_locations_point_at_offending_token() {
    let mut interner = Interner::new();
    let err = parse_expression_str("1 +\n  * 2", &mut interner).unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains("line 2, column 3"),
        "unexpected message: {}",
        message
    );
}

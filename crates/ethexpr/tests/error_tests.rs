use ethexpr::*;

fn eval(src: &str) -> std::result::Result<Value, EvalError> {
    evaluate(src, &Context::new())
}

fn strict_eval(src: &str, ctx: &Context) -> std::result::Result<Value, EvalError> {
    Engine::with_config(EvalConfig::strict()).evaluate(src, ctx)
}

// ═══════════════════════════════════════════════════════════════════════
// Parse Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_unclosed_paren_is_parse_error() {
    let err = parse("(").unwrap_err();
    let EvalError::Parse(parse_err) = err else {
        panic!("Expected parse error, got {:?}", err);
    };
    let loc = parse_err.location.unwrap();
    assert_eq!(loc.offset, 1);
    assert_eq!(loc.line, 1);
    assert_eq!(loc.column, 2);
}

#[test]
fn test_parse_errors() {
    for src in ["", "1 +", "a..b", "f(1,", "1 2", "'open", "a[1", "#", "== 1"] {
        assert!(
            matches!(parse(src), Err(EvalError::Parse(_))),
            "expected parse error for {:?}",
            src
        );
    }
}

#[test]
fn test_parse_error_message_has_position() {
    let err = parse("1 +\n  * 2").unwrap_err();
    assert_eq!(err.to_string(), "Parse error: unexpected `*` at 2:3");
}

// ═══════════════════════════════════════════════════════════════════════
// Literal Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_exponent_overflow() {
    assert_eq!(
        parse("1e10001").unwrap_err(),
        EvalError::ExponentOverflow {
            exponent: "10001".to_string(),
            max: 10_000
        }
    );
    assert!(parse("1e10000").is_ok());
}

#[test]
fn test_exponent_limit_is_configurable() {
    let engine = Engine::with_config(EvalConfig::default().with_max_exponent(18));
    assert!(engine.parse("1e18").is_ok());
    assert!(matches!(
        engine.parse("1e19"),
        Err(EvalError::ExponentOverflow { max: 18, .. })
    ));
}

#[test]
fn test_huge_exponent_text() {
    assert!(matches!(
        parse("1e99999999999999999999"),
        Err(EvalError::ExponentOverflow { .. })
    ));
}

#[test]
fn test_invalid_numeric_string() {
    let ctx = Context::new().with("s", "12abc");
    assert_eq!(
        evaluate("s * 2", &ctx),
        Err(EvalError::InvalidNumericLiteral {
            literal: "12abc".to_string()
        })
    );
}

#[test]
fn test_numeric_strings_coerce() {
    let ctx = Context::new().with("s", "0x10").with("t", "7");
    assert_eq!(evaluate("s * 1", &ctx).unwrap(), Value::bigint(16));
    assert_eq!(evaluate("t + 1", &ctx).unwrap(), Value::bigint(8));
}

// ═══════════════════════════════════════════════════════════════════════
// Runtime Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_division_by_zero() {
    assert_eq!(eval("1 / 0"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("1 ether / (2 - 2)"), Err(EvalError::DivisionByZero));
}

#[test]
fn test_not_indexable() {
    assert_eq!(
        eval("5[0]"),
        Err(EvalError::NotIndexable {
            type_name: "bigint".to_string()
        })
    );
}

#[test]
fn test_index_out_of_range() {
    let ctx = Context::new().with("xs", Value::array(vec![Value::Int(1)]));
    assert_eq!(
        evaluate("xs[1]", &ctx),
        Err(EvalError::IndexOutOfRange {
            index: "1".to_string(),
            len: Some(1)
        })
    );
    assert!(matches!(
        evaluate("xs[-1]", &ctx),
        Err(EvalError::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_property_on_scalar() {
    assert_eq!(
        eval("1.x"),
        Err(EvalError::PropertyNotFound {
            property: "x".to_string(),
            type_name: "bigint".to_string()
        })
    );
}

#[test]
fn test_not_callable() {
    let ctx = Context::new().with("n", Value::bigint(3));
    assert_eq!(
        evaluate("n()", &ctx),
        Err(EvalError::NotCallable {
            type_name: "bigint".to_string()
        })
    );
    assert!(matches!(eval("missing()"), Err(EvalError::NotCallable { .. })));
}

#[test]
fn test_type_errors() {
    let ctx = Context::new().with("flag", true).with("name", "x");
    assert!(matches!(
        evaluate("flag - name", &ctx),
        Err(EvalError::TypeError { .. })
    ));
    assert!(matches!(
        evaluate("flag < flag", &ctx),
        Err(EvalError::TypeError { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Strict Mode
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_strict_unbound_variable() {
    assert_eq!(
        strict_eval("missing + 1", &Context::new()),
        Err(EvalError::UnboundVariable {
            name: "missing".to_string()
        })
    );
}

#[test]
fn test_strict_missing_property() {
    let ctx = Context::new().with("o", ObjectValue::new("Thing"));
    assert_eq!(
        strict_eval("o.nope", &ctx),
        Err(EvalError::PropertyNotFound {
            property: "nope".to_string(),
            type_name: "Thing".to_string()
        })
    );
}

#[test]
fn test_strict_allows_bound_names() {
    let ctx = Context::new().with("x", Value::bigint(1));
    assert_eq!(strict_eval("x + 1", &ctx).unwrap(), Value::bigint(2));
    assert_eq!(strict_eval("true", &ctx).unwrap(), Value::Bool(true));
}

// ═══════════════════════════════════════════════════════════════════════
// Error Display
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_error_display() {
    assert_eq!(EvalError::DivisionByZero.to_string(), "Division by zero");
    assert_eq!(
        EvalError::AmbiguousGrammar { count: 2 }.to_string(),
        "Ambiguous grammar: expected exactly one parse, found 2"
    );
    assert_eq!(
        EvalError::UnboundVariable {
            name: "x".to_string()
        }
        .to_string(),
        "Unbound variable `x`"
    );
}

//! Property tests: operators on big integers agree with `num_bigint`.
//!
//! Operands are bound into the context and also written out as literals,
//! with magnitudes well past 2^128 and both signs.

use ethexpr::*;
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

/// Integers from a handful of 32-bit digits (up to 192 bits), either sign,
/// mixed with ordinary machine-sized values.
fn bigint_strategy() -> impl Strategy<Value = BigInt> {
    let wide = (any::<bool>(), prop::collection::vec(any::<u32>(), 0..6)).prop_map(
        |(negative, digits)| {
            let magnitude = BigInt::from(BigUint::new(digits));
            if negative {
                -magnitude
            } else {
                magnitude
            }
        },
    );
    prop_oneof![any::<i64>().prop_map(BigInt::from), wide]
}

fn eval_pair(src: &str, a: &BigInt, b: &BigInt) -> std::result::Result<Value, EvalError> {
    let ctx = Context::new()
        .with("a", Value::BigInt(a.clone()))
        .with("b", Value::BigInt(b.clone()));
    evaluate(src, &ctx)
}

/// What `a <op> b` should produce.
fn expected(op: &str, a: &BigInt, b: &BigInt) -> std::result::Result<Value, EvalError> {
    let value = match op {
        "+" => Value::BigInt(a + b),
        "-" => Value::BigInt(a - b),
        "*" => Value::BigInt(a * b),
        "/" if *b == BigInt::from(0) => return Err(EvalError::DivisionByZero),
        "/" => Value::BigInt(a / b),
        "<" => Value::Bool(a < b),
        "<=" => Value::Bool(a <= b),
        ">" => Value::Bool(a > b),
        ">=" => Value::Bool(a >= b),
        "==" => Value::Bool(a == b),
        "!=" => Value::Bool(a != b),
        other => panic!("unexpected operator {}", other),
    };
    Ok(value)
}

const OPERATORS: [&str; 10] = ["+", "-", "*", "/", "<", "<=", ">", ">=", "==", "!="];

proptest! {
    #[test]
    fn context_operands_match_bigint(a in bigint_strategy(), b in bigint_strategy()) {
        for op in OPERATORS {
            let src = format!("a {} b", op);
            prop_assert_eq!(eval_pair(&src, &a, &b), expected(op, &a, &b), "{}", src);
        }
    }

    #[test]
    fn literal_operands_match_bigint(a in bigint_strategy(), b in bigint_strategy()) {
        for op in OPERATORS {
            let src = format!("({}) {} ({})", a, op, b);
            prop_assert_eq!(evaluate(&src, &Context::new()), expected(op, &a, &b), "{}", src);
        }
    }

    #[test]
    fn division_truncates_toward_zero(a in bigint_strategy(), b in bigint_strategy()) {
        prop_assume!(b != BigInt::from(0));
        let Ok(Value::BigInt(q)) = eval_pair("a / b", &a, &b) else {
            return Err(TestCaseError::fail("division did not produce a big integer"));
        };
        let r = &a - &q * &b;
        prop_assert!(r.magnitude() < b.magnitude());
        prop_assert!(r == BigInt::from(0) || (r < BigInt::from(0)) == (a < BigInt::from(0)));
    }

    #[test]
    fn native_operand_coerces(a in any::<i64>(), b in bigint_strategy()) {
        let ctx = Context::new().with("a", Value::Int(a)).with("b", Value::BigInt(b.clone()));
        let a = BigInt::from(a);
        for op in ["+", "-", "*", "<", "==", ">="] {
            let src = format!("a {} b", op);
            prop_assert_eq!(evaluate(&src, &ctx), expected(op, &a, &b), "{}", src);
        }
    }
}

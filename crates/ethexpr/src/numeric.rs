//! Numeric core: big-integer coercion, unification and arithmetic
//!
//! Numeric literals always evaluate to [`Value::BigInt`]. Host data may
//! carry native [`Value::Int`]s; whenever an operator sees a big integer on
//! either side, both operands are coerced through [`to_numeric`] so mixing
//! the two never loses precision.

use std::cmp::Ordering;
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::{type_name, EvalError, Result};
use crate::value::Value;

/// Ethereum denomination suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// 10^18 wei
    Ether,
    /// 10^9 wei
    Gwei,
    /// 1 wei
    Wei,
}

impl Unit {
    /// Recognize a unit keyword.
    pub fn from_keyword(word: &str) -> Option<Unit> {
        match word {
            "ether" => Some(Unit::Ether),
            "gwei" => Some(Unit::Gwei),
            "wei" => Some(Unit::Wei),
            _ => None,
        }
    }

    /// Power of ten this unit scales by.
    pub fn decimals(self) -> u32 {
        match self {
            Unit::Ether => 18,
            Unit::Gwei => 9,
            Unit::Wei => 0,
        }
    }

    /// Multiplier in wei.
    pub fn scale(self) -> BigInt {
        BigInt::from(10u32).pow(self.decimals())
    }

    /// The keyword as written in source.
    pub fn keyword(self) -> &'static str {
        match self {
            Unit::Ether => "ether",
            Unit::Gwei => "gwei",
            Unit::Wei => "wei",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Coercion
// ═══════════════════════════════════════════════════════════════════════

/// Whether the value already carries the big-integer representation.
pub fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::BigInt(_))
}

/// Coerce a value to a big integer.
///
/// Integers convert directly; strings must hold a decimal or `0x`-prefixed
/// hex integer, optionally negative.
///
/// # Errors
///
/// Returns `InvalidNumericLiteral` for strings that are not integers and
/// `TypeError` for every other kind of value.
pub fn to_numeric(value: &Value) -> Result<BigInt> {
    match value {
        Value::BigInt(n) => Ok(n.clone()),
        Value::Int(n) => Ok(BigInt::from(*n)),
        Value::String(s) => parse_integer(s),
        other => Err(EvalError::TypeError {
            message: format!("cannot convert {} to an integer", type_name(other)),
        }),
    }
}

/// Parse integer text: decimal or `0x` hex, with an optional leading `-`.
///
/// # Errors
///
/// Returns `InvalidNumericLiteral` if the text is not a valid integer.
pub fn parse_integer(text: &str) -> Result<BigInt> {
    let invalid = || EvalError::InvalidNumericLiteral {
        literal: text.to_string(),
    };

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (digits, radix) = match body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (body, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix).ok_or_else(invalid)?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Evaluate `mantissa e exponent` as `mantissa * 10^exponent`.
///
/// # Errors
///
/// Returns `InvalidNumericLiteral` if either part is not an integer and
/// `ExponentOverflow` if the exponent is negative or above `max_exponent`.
pub fn scientific(mantissa: &str, exponent: &str, max_exponent: u32) -> Result<BigInt> {
    let mantissa = parse_integer(mantissa)?;
    let exponent_value = parse_integer(exponent)?;

    let overflow = || EvalError::ExponentOverflow {
        exponent: exponent_value.to_string(),
        max: max_exponent,
    };

    let exp = exponent_value.to_u32().ok_or_else(overflow)?;
    if exp > max_exponent {
        return Err(overflow());
    }

    Ok(mantissa * BigInt::from(10u32).pow(exp))
}

/// Scale a numeric value by a unit, always producing a big integer.
pub fn apply_unit(value: &Value, unit: Unit) -> Result<Value> {
    Ok(Value::BigInt(to_numeric(value)? * unit.scale()))
}

/// Negate a numeric value by multiplying with -1.
pub fn negate(value: &Value) -> Result<Value> {
    Ok(Value::BigInt(to_numeric(value)? * BigInt::from(-1)))
}

/// Truthiness used by `!`, `&&` and `||`.
///
/// Numbers are falsy only at zero, strings only when empty, `undefined`
/// is falsy, and every host value is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Undefined => false,
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::BigInt(n) => !n.is_zero(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_)
        | Value::Object(_)
        | Value::Host(_)
        | Value::Function(_)
        | Value::Method(_) => true,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Unification
// ═══════════════════════════════════════════════════════════════════════

/// Operand pair after numeric unification.
#[derive(Debug)]
pub enum Operands {
    /// At least one side was a big integer; both are now big integers.
    Numeric(BigInt, BigInt),

    /// Neither side was a big integer; values are untouched.
    Native(Value, Value),
}

/// Coerce both operands to big integers if either already is one.
///
/// Every binary operator goes through this single function.
pub fn unify(left: Value, right: Value) -> Result<Operands> {
    if is_numeric(&left) || is_numeric(&right) {
        Ok(Operands::Numeric(to_numeric(&left)?, to_numeric(&right)?))
    } else {
        Ok(Operands::Native(left, right))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

/// `left + right`
pub fn add(left: Value, right: Value) -> Result<Value> {
    match unify(left, right)? {
        Operands::Numeric(a, b) => Ok(Value::BigInt(a + b)),
        Operands::Native(Value::Int(a), Value::Int(b)) => Ok(a
            .checked_add(b)
            .map(Value::Int)
            .unwrap_or_else(|| Value::BigInt(BigInt::from(a) + BigInt::from(b)))),
        Operands::Native(Value::String(a), Value::String(b)) => {
            let mut s = String::with_capacity(a.len() + b.len());
            s.push_str(&a);
            s.push_str(&b);
            Ok(Value::string(s))
        }
        Operands::Native(l, r) => Err(EvalError::invalid_operands("+", &l, &r)),
    }
}

/// `left - right`
pub fn sub(left: Value, right: Value) -> Result<Value> {
    match unify(left, right)? {
        Operands::Numeric(a, b) => Ok(Value::BigInt(a - b)),
        Operands::Native(Value::Int(a), Value::Int(b)) => Ok(a
            .checked_sub(b)
            .map(Value::Int)
            .unwrap_or_else(|| Value::BigInt(BigInt::from(a) - BigInt::from(b)))),
        Operands::Native(l, r) => Err(EvalError::invalid_operands("-", &l, &r)),
    }
}

/// `left * right`, always in big-integer arithmetic.
pub fn mul(left: &Value, right: &Value) -> Result<Value> {
    Ok(Value::BigInt(to_numeric(left)? * to_numeric(right)?))
}

/// `left / right`, always in big-integer arithmetic, truncating toward zero.
///
/// # Errors
///
/// Returns `DivisionByZero` if `right` is zero.
pub fn div(left: &Value, right: &Value) -> Result<Value> {
    let a = to_numeric(left)?;
    let b = to_numeric(right)?;
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Value::BigInt(a / b))
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════

/// Order two values for `<`, `<=`, `>`, `>=`.
///
/// # Errors
///
/// Returns `TypeError` for operand kinds without an ordering.
pub fn compare(op: &str, left: Value, right: Value) -> Result<Ordering> {
    match unify(left, right)? {
        Operands::Numeric(a, b) => Ok(a.cmp(&b)),
        Operands::Native(Value::Int(a), Value::Int(b)) => Ok(a.cmp(&b)),
        Operands::Native(Value::String(a), Value::String(b)) => Ok(a.cmp(&b)),
        Operands::Native(l, r) => Err(EvalError::invalid_operands(op, &l, &r)),
    }
}

/// Equality for `==` / `!=`.
///
/// Numeric equality when either side is a big integer, strict native
/// equality otherwise: same kind and same payload, host values by identity.
pub fn equals(left: Value, right: Value) -> Result<bool> {
    match unify(left, right)? {
        Operands::Numeric(a, b) => Ok(a == b),
        Operands::Native(l, r) => Ok(strict_equals(&l, &r)),
    }
}

fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
        (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
        (Value::Host(a), Value::Host(b)) => Arc::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        (Value::Method(a), Value::Method(b)) => {
            a.func.ptr_eq(&b.func) && Arc::ptr_eq(&a.receiver, &b.receiver)
        }
        _ => false,
    }
}

//! Literal attributes: numbers, units, strings and booleans

use crate::numeric::{self, Unit};
use crate::{Context, Result, Value};

use super::{Evaluate, Node};

/// A constant, independent of the context.
#[derive(Debug)]
pub struct Literal(pub Value);

impl Evaluate for Literal {
    fn eval(&self, _ctx: &Context) -> Result<Value> {
        Ok(self.0.clone())
    }
}

/// Decimal or hex integer literal.
///
/// # Errors
///
/// Returns `InvalidNumericLiteral` if `text` is not an integer.
pub fn num(text: &str) -> Result<Node> {
    Ok(Box::new(Literal(Value::BigInt(numeric::parse_integer(text)?))))
}

/// Scientific literal, `mantissa * 10^exponent`.
///
/// # Errors
///
/// Returns `ExponentOverflow` if the exponent is above `max_exponent`.
pub fn scientific(mantissa: &str, exponent: &str, max_exponent: u32) -> Result<Node> {
    let value = numeric::scientific(mantissa, exponent, max_exponent)?;
    Ok(Box::new(Literal(Value::BigInt(value))))
}

/// String literal; drops the surrounding quote characters.
pub fn str(raw: &str) -> Node {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    Box::new(Literal(Value::string(chars.as_str())))
}

/// `true` / `false`.
pub fn boolean(value: bool) -> Node {
    Box::new(Literal(Value::Bool(value)))
}

/// A numeric value scaled by a unit suffix.
#[derive(Debug)]
pub struct UnitNode {
    value: Node,
    unit: Unit,
}

impl Evaluate for UnitNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        numeric::apply_unit(&self.value.eval(ctx)?, self.unit)
    }
}

/// `value ether`, `value gwei`, `value wei`.
pub fn unit(value: Node, unit: Unit) -> Node {
    Box::new(UnitNode { value, unit })
}

/// A negated numeric value.
#[derive(Debug)]
pub struct NegateNode {
    operand: Node,
}

impl Evaluate for NegateNode {
    fn eval(&self, ctx: &Context) -> Result<Value> {
        numeric::negate(&self.operand.eval(ctx)?)
    }
}

/// `-operand`.
pub fn negnum(operand: Node) -> Node {
    Box::new(NegateNode { operand })
}

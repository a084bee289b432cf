//! Value representation for runtime values

mod callable;
mod compound;
mod display;
mod impls;
mod json;

pub use callable::{BoundMethod, NativeFn, NativeFnPtr};
pub use compound::{HostObject, ObjectValue};

use std::sync::Arc;

use num_bigint::BigInt;

/// Runtime value produced by evaluating an expression.
///
/// Values are organized into three tiers:
/// - Tier 1: Scalars (numbers, booleans, strings)
/// - Tier 2: Host data (arrays, objects, custom host objects)
/// - Tier 3: Host callables (plain and receiver-bound)
///
/// Values are immutable; every operator produces a new value.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Scalars
    // ═══════════════════════════════════════════════════════════════════
    /// Result of looking up something that does not exist (lenient mode)
    Undefined,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Native-width integer supplied by the host
    Int(i64),

    /// Arbitrary-precision integer; every numeric literal produces one
    BigInt(BigInt),

    /// Heap-allocated string
    String(Arc<String>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Host Data
    // ═══════════════════════════════════════════════════════════════════
    /// Ordered sequence of values
    Array(Arc<Vec<Value>>),

    /// Object with named properties
    Object(Arc<ObjectValue>),

    /// Opaque host object accessed through the [`HostObject`] trait
    Host(Arc<dyn HostObject>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Callables
    // ═══════════════════════════════════════════════════════════════════
    /// Host function
    Function(NativeFn),

    /// Host function bound to the receiver it was read from
    Method(BoundMethod),
}

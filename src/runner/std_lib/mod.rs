//! Built-in prototypes.
//!
//! Members installed on the well-known prototypes by
//! [`PrototypeRegistry::with_core`](crate::runner::plugin::registry::PrototypeRegistry::with_core).

pub mod core;
pub mod object;
pub mod array;
pub mod string;
pub mod number;
pub mod boolean;
pub mod class;
pub mod host_object;

pub use self::core::register_core_prototypes;

use crate::runner::ds::value::JsValue;

/// Argument `index`, or `undefined` when the caller passed fewer.
pub(crate) fn arg(args: &[JsValue], index: usize) -> JsValue {
    args.get(index).cloned().unwrap_or(JsValue::Undefined)
}

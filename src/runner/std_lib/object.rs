//! Object prototype, the root of every chain.
//!
//! Serves keyed access on maps through [`MapMembers`] and provides the
//! enumeration methods every value inherits.
//!
//! [`MapMembers`]: crate::runner::ds::map_members::MapMembers

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::map_members::MAP_MEMBERS;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::registry::PrototypeRegistry;
use crate::runner::plugin::types::EvalContext;

use super::arg;

pub fn register(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    let id = registry.well_known().object;
    registry
        .get_mut(id)
        .with_capability(MAP_MEMBERS.clone())?
        .function("toString", Accessor::method(object_to_string))
        .function("hasOwnProperty", Accessor::method(object_has_own_property))
        .function("keys", Accessor::method(object_keys))
        .function("values", Accessor::method(object_values))
        .function("entries", Accessor::method(object_entries));
    Ok(())
}

/// Object.prototype.toString
fn object_to_string(
    ctx: &EvalContext,
    this: &JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(ctx.to_display_string(this)))
}

/// Object.prototype.hasOwnProperty
///
/// True for present map keys and in-range sequence indices.
fn object_has_own_property(
    _ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let key = arg(&args, 0);
    let has = match this {
        JsValue::Map(m) => match key.as_member_name() {
            Some(name) => m.read().contains_key(&name),
            None => false,
        },
        JsValue::List(l) => key.as_index().map_or(false, |i| i < l.len()),
        JsValue::Pair(_) => key.as_index().map_or(false, |i| i < 2),
        _ => false,
    };
    Ok(JsValue::Boolean(has))
}

/// Object.prototype.keys
fn object_keys(
    ctx: &EvalContext,
    this: &JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::List(ctx.keys(this)))
}

/// Object.prototype.values
fn object_values(
    ctx: &EvalContext,
    this: &JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::List(ctx.values(this)))
}

/// Object.prototype.entries
fn object_entries(
    ctx: &EvalContext,
    this: &JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::List(ctx.entries(this)))
}

//! Array prototype.
//!
//! Index access on lists is served by [`ArrayMembers`]; the members below
//! work on any sequence-shaped receiver, read-only ones also on pairs and
//! iterables.
//!
//! [`ArrayMembers`]: crate::runner::ds::array_members::ArrayMembers

use crate::runner::ds::array_members::ARRAY_MEMBERS;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::get_type;
use crate::runner::ds::value::{JsList, JsValue};
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::registry::PrototypeRegistry;
use crate::runner::plugin::types::EvalContext;

use super::arg;

pub fn register(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    let id = registry.well_known().array;
    registry
        .get_mut(id)
        .with_capability(ARRAY_MEMBERS.clone())?
        .with_constructor(Accessor::static_method(array_constructor))?
        .property("length", Accessor::property(array_length))
        .function("push", Accessor::method(array_push))
        .function("pop", Accessor::method(array_pop))
        .function("indexOf", Accessor::method(array_index_of))
        .function("includes", Accessor::method(array_includes))
        .function("join", Accessor::method(array_join));
    Ok(())
}

fn as_list<'a>(this: &'a JsValue, method: &str) -> Result<&'a JsList, JErrorType> {
    match this {
        JsValue::List(l) => Ok(l),
        _ => Err(JErrorType::TypeError(format!(
            "Array.prototype.{} called on a non-list {}",
            method,
            get_type(this)
        ))),
    }
}

/// Array constructor: a new list holding the arguments.
fn array_constructor(_ctx: &EvalContext, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    Ok(JsValue::list(args))
}

/// Array.prototype.length
fn array_length(ctx: &EvalContext, this: &JsValue) -> Result<JsValue, JErrorType> {
    let len = match this {
        JsValue::List(l) => l.len(),
        _ => ctx.values(this).len(),
    };
    Ok(JsValue::int(len as i64))
}

/// Array.prototype.push
fn array_push(
    _ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let list = as_list(this, "push")?;
    let mut items = list.write();
    items.extend(args);
    Ok(JsValue::int(items.len() as i64))
}

/// Array.prototype.pop
fn array_pop(
    _ctx: &EvalContext,
    this: &JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let list = as_list(this, "pop")?;
    let last = list.write().pop();
    Ok(last.unwrap_or(JsValue::Undefined))
}

/// Array.prototype.indexOf
fn array_index_of(
    ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let needle = arg(&args, 0);
    let position = ctx
        .values(this)
        .read()
        .iter()
        .position(|v| *v == needle)
        .map_or(-1, |i| i as i64);
    Ok(JsValue::int(position))
}

/// Array.prototype.includes
fn array_includes(
    ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let needle = arg(&args, 0);
    let found = ctx.values(this).read().iter().any(|v| *v == needle);
    Ok(JsValue::Boolean(found))
}

/// Array.prototype.join
///
/// Elements are stringified through their own prototypes; `null`,
/// `undefined` and the receiver itself become empty strings.
fn array_join(
    ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let separator = match arg(&args, 0) {
        JsValue::Undefined => ",".to_string(),
        sep => ctx.to_display_string(&sep),
    };
    let items = ctx.values(this).snapshot();
    let parts: Vec<String> = items
        .iter()
        .map(|v| {
            if v.is_nullish() || v == this {
                String::new()
            } else {
                ctx.to_display_string(v)
            }
        })
        .collect();
    Ok(JsValue::String(parts.join(&separator)))
}

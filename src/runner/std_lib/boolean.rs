//! Boolean prototype.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::registry::PrototypeRegistry;
use crate::runner::plugin::types::EvalContext;

pub fn register(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    let id = registry.well_known().boolean;
    registry
        .get_mut(id)
        .with_constructor(Accessor::static_method(boolean_constructor))?;
    Ok(())
}

/// Truthiness of the first argument, as judged by that argument's prototype.
fn boolean_constructor(ctx: &EvalContext, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    Ok(JsValue::Boolean(
        args.first().map_or(false, |v| ctx.to_boolean(v)),
    ))
}

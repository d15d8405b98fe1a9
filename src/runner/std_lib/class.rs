//! Class prototype: host type descriptors.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::registry::PrototypeRegistry;
use crate::runner::plugin::types::EvalContext;

pub fn register(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    let id = registry.well_known().class;
    registry
        .get_mut(id)
        .property("name", Accessor::property(class_name));
    Ok(())
}

fn class_name(_ctx: &EvalContext, this: &JsValue) -> Result<JsValue, JErrorType> {
    match this {
        JsValue::Class(c) => Ok(JsValue::str(c.name())),
        _ => Ok(JsValue::Undefined),
    }
}

//! Generic prototype for host objects, and for null and undefined.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::registry::PrototypeRegistry;
use crate::runner::plugin::types::EvalContext;

pub fn register(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    let id = registry.well_known().host_object;
    registry
        .get_mut(id)
        .property("class", Accessor::property(host_object_class));
    Ok(())
}

/// Host type name of the receiver; `undefined` for null and undefined.
fn host_object_class(_ctx: &EvalContext, this: &JsValue) -> Result<JsValue, JErrorType> {
    match this {
        JsValue::Object(o) => Ok(JsValue::str(o.type_name())),
        _ => Ok(JsValue::Undefined),
    }
}

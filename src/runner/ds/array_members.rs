use std::sync::Arc;

use crate::runner::ds::cast::Cast;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lookup::Lookup;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::member_functions::MemberFunctions;
use crate::runner::plugin::types::EvalContext;

lazy_static! {
    pub static ref ARRAY_MEMBERS: Arc<ArrayMembers> = Arc::new(ArrayMembers);
}

/// Index semantics for list receivers: `list[i]`, `list[i] = v` and
/// `delete list[i]`. A receiver that is not a list behaves as an empty one.
pub struct ArrayMembers;

impl MemberFunctions for ArrayMembers {
    fn read(
        &self,
        ctx: &EvalContext,
        this: &JsValue,
        key: &JsValue,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        let list = match this {
            JsValue::List(l) => l,
            _ => return Ok(Lookup::NotFound),
        };
        let element = match key.as_index() {
            Some(idx) => list.read().get(idx).cloned(),
            None => None,
        };
        match element {
            Some(v) => Ok(Lookup::Found(cast.apply(ctx, v)?)),
            None => Ok(Lookup::NotFound),
        }
    }

    fn write(
        &self,
        ctx: &EvalContext,
        this: &JsValue,
        key: &JsValue,
        value: JsValue,
        cast: Cast,
    ) -> Result<bool, JErrorType> {
        let list = match this {
            JsValue::List(l) => l,
            _ => return Ok(false),
        };
        let idx = match key.as_index() {
            Some(idx) if idx < list.len() => idx,
            _ => return Ok(false),
        };
        let value = cast.apply(ctx, value)?;
        let mut items = list.write();
        // the list may have shrunk while the value was being converted
        match items.get_mut(idx) {
            Some(slot) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, ctx: &EvalContext, this: &JsValue, key: &JsValue) -> Result<Lookup, JErrorType> {
        let list = match this {
            JsValue::List(l) => l,
            _ => return Ok(Lookup::NotFound),
        };
        let removed = match key.as_index() {
            Some(idx) => {
                let mut items = list.write();
                if idx < items.len() {
                    Some(items.remove(idx))
                } else {
                    None
                }
            }
            None => None,
        };
        match removed {
            Some(v) => Ok(Lookup::Found(Cast::ToScript.apply(ctx, v)?)),
            None => Ok(Lookup::NotFound),
        }
    }
}

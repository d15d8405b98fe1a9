use std::sync::Arc;

use crate::runner::ds::cast::Cast;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lookup::Lookup;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::member_functions::MemberFunctions;
use crate::runner::plugin::types::EvalContext;

lazy_static! {
    pub static ref MAP_MEMBERS: Arc<MapMembers> = Arc::new(MapMembers);
}

/// Key semantics for map receivers. Only string keys address entries; any
/// other key, like any non-map receiver, sees an empty store.
pub struct MapMembers;

impl MemberFunctions for MapMembers {
    fn read(
        &self,
        ctx: &EvalContext,
        this: &JsValue,
        key: &JsValue,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        let (map, key) = match (this, key.as_member_name()) {
            (JsValue::Map(m), Some(k)) => (m, k),
            _ => return Ok(Lookup::NotFound),
        };
        let stored = map.read().get(&key).cloned();
        match stored {
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
        let (map, key) = match (this, key.as_member_name()) {
            (JsValue::Map(m), Some(k)) => (m, k),
            _ => return Ok(false),
        };
        let value = cast.apply(ctx, value)?;
        map.write().insert(key, value);
        Ok(true)
    }

    fn delete(&self, ctx: &EvalContext, this: &JsValue, key: &JsValue) -> Result<Lookup, JErrorType> {
        let (map, key) = match (this, key.as_member_name()) {
            (JsValue::Map(m), Some(k)) => (m, k),
            _ => return Ok(Lookup::NotFound),
        };
        let removed = map.write().shift_remove(&key);
        match removed {
            Some(v) => Ok(Lookup::Found(Cast::ToScript.apply(ctx, v)?)),
            None => Ok(Lookup::NotFound),
        }
    }
}

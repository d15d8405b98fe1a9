//! The four-operation capability contract.
//!
//! Prototypes, accessors, the built-in sequence and mapping adapters and
//! individual host values all implement [`MemberFunctions`]. Every
//! operation has a default: reads, invocations and deletions miss, and
//! writes are refused, so an implementation only overrides what it supports.

use crate::runner::ds::cast::Cast;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lookup::Lookup;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

pub trait MemberFunctions: Send + Sync {
    /// Read member `key` of `this`. Static access passes `Undefined`.
    fn read(
        &self,
        _ctx: &EvalContext,
        _this: &JsValue,
        _key: &JsValue,
        _cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        Ok(Lookup::NotFound)
    }

    /// Store `value` under `key`. Returns whether the write was accepted.
    fn write(
        &self,
        _ctx: &EvalContext,
        _this: &JsValue,
        _key: &JsValue,
        _value: JsValue,
        _cast: Cast,
    ) -> Result<bool, JErrorType> {
        Ok(false)
    }

    /// Call member `key` of `this` with `args`.
    fn invoke(
        &self,
        _ctx: &EvalContext,
        _this: &JsValue,
        _key: &JsValue,
        _args: Vec<JsValue>,
        _cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        Ok(Lookup::NotFound)
    }

    /// Remove member `key`, yielding the removed value.
    fn delete(
        &self,
        _ctx: &EvalContext,
        _this: &JsValue,
        _key: &JsValue,
    ) -> Result<Lookup, JErrorType> {
        Ok(Lookup::NotFound)
    }
}

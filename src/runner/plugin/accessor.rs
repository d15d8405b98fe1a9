//! Accessor adapters: single-member implementations of [`MemberFunctions`].

use std::sync::Arc;

use crate::runner::ds::cast::Cast;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lookup::Lookup;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::member_functions::MemberFunctions;
use crate::runner::plugin::types::{EvalContext, MethodFn, PropertyFn, StaticMethodFn, StaticPropertyFn};

/// A member registered in one of a prototype's name tables.
///
/// Each variant serves only the operation it stands for; the rest fall
/// back to the trait defaults.
#[derive(Clone)]
pub enum Accessor {
    /// Computed from the receiver.
    Property(PropertyFn),
    /// Called with the receiver and arguments.
    Method(MethodFn),
    /// Computed without a receiver.
    StaticProperty(StaticPropertyFn),
    /// Always the same constant.
    StaticValue(JsValue),
    /// Called with arguments only.
    StaticMethod(StaticMethodFn),
}

impl Accessor {
    pub fn property<F>(f: F) -> Self
    where
        F: Fn(&EvalContext, &JsValue) -> Result<JsValue, JErrorType> + Send + Sync + 'static,
    {
        Accessor::Property(Arc::new(f))
    }

    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&EvalContext, &JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>
            + Send
            + Sync
            + 'static,
    {
        Accessor::Method(Arc::new(f))
    }

    pub fn static_property<F>(f: F) -> Self
    where
        F: Fn(&EvalContext) -> Result<JsValue, JErrorType> + Send + Sync + 'static,
    {
        Accessor::StaticProperty(Arc::new(f))
    }

    pub fn static_value(value: JsValue) -> Self {
        Accessor::StaticValue(value)
    }

    pub fn static_method<F>(f: F) -> Self
    where
        F: Fn(&EvalContext, Vec<JsValue>) -> Result<JsValue, JErrorType> + Send + Sync + 'static,
    {
        Accessor::StaticMethod(Arc::new(f))
    }

    pub fn is_static(&self) -> bool {
        !matches!(self, Accessor::Property(_) | Accessor::Method(_))
    }

    /// Whether `invoke` runs a callback. Non-callable accessors always miss
    /// on invocation.
    pub fn is_callable(&self) -> bool {
        matches!(self, Accessor::Method(_) | Accessor::StaticMethod(_))
    }
}

impl MemberFunctions for Accessor {
    fn read(
        &self,
        ctx: &EvalContext,
        this: &JsValue,
        _key: &JsValue,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        let value = match self {
            Accessor::Property(f) => f(ctx, this)?,
            Accessor::StaticProperty(f) => f(ctx)?,
            Accessor::StaticValue(v) => v.clone(),
            Accessor::Method(_) | Accessor::StaticMethod(_) => return Ok(Lookup::NotFound),
        };
        Ok(Lookup::Found(cast.apply(ctx, value)?))
    }

    fn invoke(
        &self,
        ctx: &EvalContext,
        this: &JsValue,
        _key: &JsValue,
        args: Vec<JsValue>,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        let value = match self {
            Accessor::Method(f) => f(ctx, this, args)?,
            Accessor::StaticMethod(f) => f(ctx, args)?,
            Accessor::Property(_) | Accessor::StaticProperty(_) | Accessor::StaticValue(_) => {
                return Ok(Lookup::NotFound)
            }
        };
        Ok(Lookup::Found(cast.apply(ctx, value)?))
    }
}

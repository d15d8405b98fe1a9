//! Number prototype.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::registry::PrototypeRegistry;
use crate::runner::plugin::types::EvalContext;

use super::arg;

const MAX_SAFE_INTEGER: i64 = 9007199254740991;

pub fn register(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    let id = registry.well_known().number;
    registry
        .get_mut(id)
        .with_constructor(Accessor::static_method(number_constructor))?
        .static_value("MAX_SAFE_INTEGER", JsValue::int(MAX_SAFE_INTEGER))
        .static_value("MIN_SAFE_INTEGER", JsValue::int(-MAX_SAFE_INTEGER))
        .static_function("isInteger", Accessor::static_method(number_is_integer))
        .function("toFixed", Accessor::method(number_to_fixed));
    Ok(())
}

fn number_constructor(ctx: &EvalContext, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    Ok(match args.first() {
        Some(v) => JsValue::Number(ctx.to_number(v)),
        None => JsValue::int(0),
    })
}

/// Number.isInteger
fn number_is_integer(_ctx: &EvalContext, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    let is_integer = match arg(&args, 0) {
        JsValue::Number(JsNumberType::Integer(_)) => true,
        JsValue::Number(JsNumberType::Float(f)) => f.is_finite() && f.fract() == 0.0,
        _ => false,
    };
    Ok(JsValue::Boolean(is_integer))
}

/// Number.prototype.toFixed
fn number_to_fixed(
    ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let digits = match arg(&args, 0) {
        JsValue::Undefined => 0,
        d => match ctx.to_number(&d) {
            JsNumberType::Integer(i) if (0..=100).contains(&i) => i as usize,
            other => {
                return Err(JErrorType::RangeError(format!(
                    "toFixed() digits argument must be between 0 and 100, got {}",
                    other
                )))
            }
        },
    };
    let n = ctx.to_number(this);
    let formatted = match n {
        JsNumberType::NaN | JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => {
            n.to_string()
        }
        _ => format!("{:.*}", digits, n.as_f64()),
    };
    Ok(JsValue::String(formatted))
}

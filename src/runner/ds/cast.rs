//! Boundary conversion between script-visible and host values.
//!
//! Every accessor and built-in adapter runs the value it produces (or, for
//! writes, the value it receives) through the [`Cast`] chosen by the call
//! site. The conversion itself lives behind [`BoundaryConverter`], which an
//! embedder can replace on the [`EvalContext`].

use crate::runner::ds::error::{ConversionError, JErrorType};
use crate::runner::ds::operations::type_conversion::{string_to_number, to_boolean, to_string};
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::types::EvalContext;

/// Host-side shapes a `ToHost` conversion can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostType {
    Boolean,
    Integer,
    Float,
    Text,
    Char,
    List,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    /// Pass the value through unchanged.
    Identity,
    /// Host value to its script-visible form.
    ToScript,
    /// Script value to a host value, optionally guided by a target type.
    ToHost(Option<HostType>),
}

impl Default for Cast {
    fn default() -> Self {
        Cast::Identity
    }
}

impl Cast {
    pub fn apply(&self, ctx: &EvalContext, value: JsValue) -> Result<JsValue, JErrorType> {
        let converted = match self {
            Cast::Identity => Ok(value),
            Cast::ToScript => ctx.converter().to_script(ctx, value),
            Cast::ToHost(hint) => ctx.converter().to_host(ctx, value, *hint),
        };
        converted.map_err(JErrorType::from)
    }
}

/// Marshals values across the script/host boundary.
pub trait BoundaryConverter: Send + Sync {
    fn to_script(&self, ctx: &EvalContext, value: JsValue) -> Result<JsValue, ConversionError>;

    fn to_host(
        &self,
        ctx: &EvalContext,
        value: JsValue,
        hint: Option<HostType>,
    ) -> Result<JsValue, ConversionError>;
}

/// Converter installed when the embedder does not supply one.
pub struct DefaultConverter;

impl BoundaryConverter for DefaultConverter {
    fn to_script(&self, _ctx: &EvalContext, value: JsValue) -> Result<JsValue, ConversionError> {
        match value {
            JsValue::Char(c) => Ok(JsValue::String(c.to_string())),
            other => Ok(other),
        }
    }

    fn to_host(
        &self,
        _ctx: &EvalContext,
        value: JsValue,
        hint: Option<HostType>,
    ) -> Result<JsValue, ConversionError> {
        let target = match hint {
            None => return Ok(value),
            Some(t) => t,
        };
        let fail = |v: &JsValue| ConversionError::NoHostRepresentation {
            value: format!("{:?}", v),
            target,
        };
        match target {
            HostType::Boolean => Ok(JsValue::Boolean(to_boolean(&value))),
            HostType::Text => Ok(JsValue::String(to_string(&value))),
            HostType::Integer => match numeric(&value) {
                Some(JsNumberType::Integer(i)) => Ok(JsValue::int(i)),
                _ => Err(fail(&value)),
            },
            HostType::Float => match numeric(&value) {
                Some(n) => Ok(JsValue::Number(n)),
                None => Err(fail(&value)),
            },
            HostType::Char => match &value {
                JsValue::Char(_) => Ok(value),
                JsValue::String(s) => {
                    let mut chars = s.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Ok(JsValue::Char(c)),
                        _ => Err(fail(&value)),
                    }
                }
                _ => Err(fail(&value)),
            },
            HostType::List => match &value {
                JsValue::List(_) => Ok(value),
                JsValue::Pair(p) => Ok(JsValue::list(vec![p.0.clone(), p.1.clone()])),
                JsValue::Iterable(it) => Ok(JsValue::list(it.iter_values().collect())),
                _ => Err(fail(&value)),
            },
            HostType::Map => match &value {
                JsValue::Map(_) => Ok(value),
                _ => Err(fail(&value)),
            },
        }
    }
}

fn numeric(v: &JsValue) -> Option<JsNumberType> {
    let n = match v {
        JsValue::Number(n) => n.clone(),
        JsValue::String(s) => string_to_number(s),
        JsValue::Char(c) => string_to_number(&c.to_string()),
        _ => return None,
    };
    match n {
        JsNumberType::NaN => None,
        n => Some(n),
    }
}

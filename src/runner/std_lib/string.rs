//! String prototype, shared by string and character values.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::registry::PrototypeRegistry;
use crate::runner::plugin::types::EvalContext;

use super::arg;

pub fn register(registry: &mut PrototypeRegistry) -> Result<(), JErrorType> {
    let id = registry.well_known().string;
    registry
        .get_mut(id)
        .with_constructor(Accessor::static_method(string_constructor))?
        .property("length", Accessor::property(string_length))
        .function("charAt", Accessor::method(string_char_at))
        .function("toUpperCase", Accessor::method(string_to_upper_case))
        .function("toLowerCase", Accessor::method(string_to_lower_case))
        .function("indexOf", Accessor::method(string_index_of))
        .function("split", Accessor::method(string_split));
    Ok(())
}

fn text(ctx: &EvalContext, this: &JsValue) -> String {
    match this {
        JsValue::String(s) => s.clone(),
        JsValue::Char(c) => c.to_string(),
        other => ctx.to_display_string(other),
    }
}

fn string_constructor(ctx: &EvalContext, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    Ok(match args.first() {
        Some(v) => JsValue::String(ctx.to_display_string(v)),
        None => JsValue::str(""),
    })
}

/// Length in characters.
fn string_length(ctx: &EvalContext, this: &JsValue) -> Result<JsValue, JErrorType> {
    Ok(JsValue::int(text(ctx, this).chars().count() as i64))
}

fn string_char_at(
    ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let index = match arg(&args, 0) {
        JsValue::Undefined => Some(0),
        i => i.as_index(),
    };
    let c = index.and_then(|i| text(ctx, this).chars().nth(i));
    Ok(JsValue::String(c.map(String::from).unwrap_or_default()))
}

fn string_to_upper_case(
    ctx: &EvalContext,
    this: &JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(text(ctx, this).to_uppercase()))
}

fn string_to_lower_case(
    ctx: &EvalContext,
    this: &JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::String(text(ctx, this).to_lowercase()))
}

/// Character position of the first occurrence, or -1.
fn string_index_of(
    ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let haystack = text(ctx, this);
    let needle = text(ctx, &arg(&args, 0));
    let position = haystack
        .find(&needle)
        .map_or(-1, |byte| haystack[..byte].chars().count() as i64);
    Ok(JsValue::int(position))
}

/// Split on a separator. Without one the whole string is the only part;
/// an empty separator splits into characters.
fn string_split(
    ctx: &EvalContext,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let s = text(ctx, this);
    let parts = match arg(&args, 0) {
        JsValue::Undefined => vec![JsValue::String(s)],
        sep => {
            let sep = text(ctx, &sep);
            if sep.is_empty() {
                s.chars().map(|c| JsValue::String(c.to_string())).collect()
            } else {
                s.split(sep.as_str()).map(JsValue::str).collect()
            }
        }
    };
    Ok(JsValue::list(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::runner::ds::cast::Cast;
    use crate::runner::ds::lookup::Lookup;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PrototypeRegistry::with_core().unwrap().freeze()))
    }

    fn call(ctx: &EvalContext, this: &JsValue, name: &str, args: Vec<JsValue>) -> JsValue {
        ctx.invoke(this, &JsValue::str(name), args, Cast::Identity)
            .unwrap()
            .unwrap_or_undefined()
    }

    #[test]
    fn test_length_counts_characters() {
        let ctx = ctx();
        assert_eq!(
            ctx.read(&JsValue::str("héllo"), &JsValue::str("length"), Cast::Identity).unwrap(),
            Lookup::Found(JsValue::int(5))
        );
        assert_eq!(
            ctx.read(&JsValue::Char('x'), &JsValue::str("length"), Cast::Identity).unwrap(),
            Lookup::Found(JsValue::int(1))
        );
    }

    #[test]
    fn test_char_at_and_case() {
        let ctx = ctx();
        let s = JsValue::str("Rust");
        assert_eq!(call(&ctx, &s, "charAt", vec![JsValue::int(1)]), JsValue::str("u"));
        assert_eq!(call(&ctx, &s, "charAt", vec![JsValue::int(9)]), JsValue::str(""));
        assert_eq!(call(&ctx, &s, "toUpperCase", vec![]), JsValue::str("RUST"));
        assert_eq!(call(&ctx, &s, "toLowerCase", vec![]), JsValue::str("rust"));
    }

    #[test]
    fn test_index_of_and_split() {
        let ctx = ctx();
        let s = JsValue::str("a,b,c");
        assert_eq!(call(&ctx, &s, "indexOf", vec![JsValue::str("b")]), JsValue::int(2));
        assert_eq!(call(&ctx, &s, "indexOf", vec![JsValue::str("z")]), JsValue::int(-1));
        match call(&ctx, &s, "split", vec![JsValue::str(",")]) {
            JsValue::List(l) => assert_eq!(
                l.snapshot(),
                vec![JsValue::str("a"), JsValue::str("b"), JsValue::str("c")]
            ),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_constructor() {
        let ctx = ctx();
        let string = ctx.realm().well_known().string;
        assert_eq!(
            ctx.construct(string, vec![JsValue::int(5)], Cast::Identity).unwrap(),
            Lookup::Found(JsValue::str("5"))
        );
        assert_eq!(
            ctx.construct(string, vec![], Cast::Identity).unwrap(),
            Lookup::Found(JsValue::str(""))
        );
    }

    #[test]
    fn test_strings_are_not_indexable() {
        let ctx = ctx();
        assert_eq!(
            ctx.read(&JsValue::str("abc"), &JsValue::int(0), Cast::Identity).unwrap(),
            Lookup::NotFound
        );
    }
}

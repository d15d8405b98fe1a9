//! Key, value and entry views of a receiver.
//!
//! Each prototype carries three [`ViewSupplier`]s. They start out as the
//! shape-sensing defaults below regardless of what the parent uses.

use std::sync::Arc;

use crate::runner::ds::prototype::Prototype;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::{JsList, JsValue};

/// Produces one ordered view of `this`. The owning prototype is passed so
/// a supplier can reach its sibling suppliers.
pub type ViewSupplier = Arc<dyn Fn(&Realm, &Prototype, &JsValue) -> JsList + Send + Sync>;

/// Map keys (copied), or synthesized indices for anything sequence-shaped.
///
/// An unsized iterable is drained once just to count it, so it must be
/// drainable again by whoever consumes the values afterwards.
pub fn default_key_list(_realm: &Realm, _proto: &Prototype, this: &JsValue) -> JsList {
    let count = match this {
        JsValue::Map(m) => {
            let keys = m.read().keys().map(|k| JsValue::String(k.clone())).collect();
            return JsList::from_vec(keys);
        }
        JsValue::List(l) => l.len(),
        JsValue::Pair(_) => 2,
        JsValue::Iterable(it) => it.iter_values().count(),
        _ => 0,
    };
    JsList::from_vec((0..count).map(|i| JsValue::int(i as i64)).collect())
}

/// A list is returned as-is, aliasing the live sequence; every other shape
/// is copied.
pub fn default_value_list(_realm: &Realm, _proto: &Prototype, this: &JsValue) -> JsList {
    match this {
        JsValue::List(l) => l.clone(),
        JsValue::Map(m) => JsList::from_vec(m.read().values().cloned().collect()),
        JsValue::Pair(p) => JsList::from_vec(vec![p.0.clone(), p.1.clone()]),
        JsValue::Iterable(it) => JsList::from_vec(it.iter_values().collect()),
        _ => JsList::new(),
    }
}

/// Zips the prototype's own key and value views into pairs. Mismatched
/// lengths give an empty view rather than a partial one.
pub fn default_entry_list(realm: &Realm, proto: &Prototype, this: &JsValue) -> JsList {
    let keys = (proto.key_list())(realm, proto, this);
    let values = (proto.value_list())(realm, proto, this);
    // snapshot both before zipping; `values` may alias `this`
    let keys = keys.snapshot();
    let values = values.snapshot();
    if keys.len() != values.len() {
        return JsList::new();
    }
    JsList::from_vec(
        keys.into_iter()
            .zip(values)
            .map(|(k, v)| JsValue::pair(k, v))
            .collect(),
    )
}

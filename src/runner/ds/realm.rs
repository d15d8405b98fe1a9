//! The frozen prototype set: classification and chain-walking dispatch.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::runner::ds::cast::Cast;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lookup::Lookup;
use crate::runner::ds::prototype::{ProtoId, Prototype};
use crate::runner::ds::value::{JsList, JsValue};
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::config::TableKey;
use crate::runner::plugin::member_functions::MemberFunctions;
use crate::runner::plugin::types::EvalContext;

/// Handles of the prototypes every realm has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownPrototypes {
    pub object: ProtoId,
    pub array: ProtoId,
    pub string: ProtoId,
    pub number: ProtoId,
    pub boolean: ProtoId,
    pub class: ProtoId,
    pub host_object: ProtoId,
}

/// Which name tables a chain walk consults.
#[derive(Clone, Copy)]
enum Tables {
    Read,
    Invoke,
}

/// Read-only prototype arena produced by
/// [`PrototypeRegistry::freeze`](crate::runner::plugin::registry::PrototypeRegistry::freeze).
///
/// A realm is `Send + Sync`; share it behind an `Arc` between the contexts
/// of concurrently running scripts.
pub struct Realm {
    id: Uuid,
    prototypes: Vec<Prototype>,
    well_known: WellKnownPrototypes,
}

impl Realm {
    pub(crate) fn new(prototypes: Vec<Prototype>, well_known: WellKnownPrototypes) -> Self {
        Realm {
            id: Uuid::new_v4(),
            prototypes,
            well_known,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn well_known(&self) -> &WellKnownPrototypes {
        &self.well_known
    }

    /// # Panics
    ///
    /// If `id` was not issued by the registry this realm was frozen from.
    /// Use [`Realm::try_get`] for handles of unknown origin.
    pub fn get(&self, id: ProtoId) -> &Prototype {
        &self.prototypes[id.index()]
    }

    pub fn try_get(&self, id: ProtoId) -> Option<&Prototype> {
        self.prototypes.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<ProtoId> {
        self.prototypes.iter().find(|p| p.name() == name).map(|p| p.id())
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Iterates `id` and its ancestors, child first. Empty for a handle
    /// this realm does not know.
    pub fn chain(&self, id: ProtoId) -> impl Iterator<Item = &Prototype> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let current = self.try_get(next?)?;
            next = current.parent();
            Some(current)
        })
    }

    /// Picks the prototype that serves `value`.
    ///
    /// A host object's own declaration wins; otherwise the runtime shape
    /// decides. Maps are checked before iterables, so anything that is
    /// both classifies as Object. A declared handle this realm does not
    /// know falls back to the host-object prototype.
    pub fn classify(&self, ctx: &EvalContext, value: &JsValue) -> ProtoId {
        let wk = &self.well_known;
        match value {
            JsValue::Object(o) => match o.prototype(ctx) {
                Some(id) if self.try_get(id).is_some() => id,
                Some(id) => {
                    debug!(
                        "{} declared unknown prototype {:?}, using {}",
                        o.type_name(),
                        id,
                        self.get(wk.host_object).name()
                    );
                    wk.host_object
                }
                None => wk.host_object,
            },
            JsValue::Char(_) | JsValue::String(_) => wk.string,
            JsValue::Number(_) => wk.number,
            JsValue::Boolean(_) => wk.boolean,
            JsValue::Class(_) => wk.class,
            JsValue::Map(_) => wk.object,
            JsValue::List(_) | JsValue::Iterable(_) | JsValue::Pair(_) => wk.array,
            JsValue::Undefined | JsValue::Null => wk.host_object,
        }
    }

    pub fn read(
        &self,
        ctx: &EvalContext,
        proto: ProtoId,
        this: &JsValue,
        key: &JsValue,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        if let Some(own) = own_members(this) {
            let found = own.read(ctx, this, key, cast)?;
            if found.is_found() {
                return Ok(found);
            }
        }
        for level in self.chain(proto) {
            if let Some(capability) = level.capability() {
                let found = capability.read(ctx, this, key, cast)?;
                if found.is_found() {
                    return Ok(found);
                }
            }
            for accessor in self.table_entries(ctx, level, key, Tables::Read) {
                let found = accessor.read(ctx, this, key, cast)?;
                if found.is_found() {
                    return Ok(found);
                }
            }
        }
        self.trace_miss(ctx, "read", proto, key);
        Ok(Lookup::NotFound)
    }

    pub fn invoke(
        &self,
        ctx: &EvalContext,
        proto: ProtoId,
        this: &JsValue,
        key: &JsValue,
        args: Vec<JsValue>,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        if let Some(own) = own_members(this) {
            let found = own.invoke(ctx, this, key, args.clone(), cast)?;
            if found.is_found() {
                return Ok(found);
            }
        }
        for level in self.chain(proto) {
            if let Some(capability) = level.capability() {
                let found = capability.invoke(ctx, this, key, args.clone(), cast)?;
                if found.is_found() {
                    return Ok(found);
                }
            }
            // a callable table entry always answers, so it takes the
            // arguments by value
            let callable = self
                .table_entries(ctx, level, key, Tables::Invoke)
                .into_iter()
                .find(|accessor| accessor.is_callable());
            if let Some(accessor) = callable {
                return accessor.invoke(ctx, this, key, args, cast);
            }
        }
        self.trace_miss(ctx, "invoke", proto, key);
        Ok(Lookup::NotFound)
    }

    /// Writes never touch the name tables: only the receiver's own members
    /// and capability overrides along the chain can accept them.
    pub fn write(
        &self,
        ctx: &EvalContext,
        proto: ProtoId,
        this: &JsValue,
        key: &JsValue,
        value: JsValue,
        cast: Cast,
    ) -> Result<bool, JErrorType> {
        if let Some(own) = own_members(this) {
            if own.write(ctx, this, key, value.clone(), cast)? {
                return Ok(true);
            }
        }
        for level in self.chain(proto) {
            if let Some(capability) = level.capability() {
                if capability.write(ctx, this, key, value.clone(), cast)? {
                    return Ok(true);
                }
            }
        }
        self.trace_miss(ctx, "write", proto, key);
        Ok(false)
    }

    /// Same reduced walk as [`Realm::write`].
    pub fn delete(
        &self,
        ctx: &EvalContext,
        proto: ProtoId,
        this: &JsValue,
        key: &JsValue,
    ) -> Result<Lookup, JErrorType> {
        if let Some(own) = own_members(this) {
            let found = own.delete(ctx, this, key)?;
            if found.is_found() {
                return Ok(found);
            }
        }
        for level in self.chain(proto) {
            if let Some(capability) = level.capability() {
                let found = capability.delete(ctx, this, key)?;
                if found.is_found() {
                    return Ok(found);
                }
            }
        }
        self.trace_miss(ctx, "delete", proto, key);
        Ok(Lookup::NotFound)
    }

    /// Calls `proto` as a constructor. Constructors are not inherited.
    pub fn construct(
        &self,
        ctx: &EvalContext,
        proto: ProtoId,
        args: Vec<JsValue>,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        let level = match self.try_get(proto) {
            Some(level) => level,
            None => return Ok(Lookup::NotFound),
        };
        match level.constructor() {
            Some(ctor) => ctor.invoke(
                ctx,
                &JsValue::Undefined,
                &JsValue::str(level.name()),
                args,
                cast,
            ),
            None => Ok(Lookup::NotFound),
        }
    }

    pub fn own_keys(&self, proto: ProtoId) -> BTreeSet<String> {
        self.try_get(proto)
            .map(|p| p.own_keys().as_ref().clone())
            .unwrap_or_default()
    }

    /// Union of `own_keys` over the whole chain.
    pub fn all_keys(&self, proto: ProtoId) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for level in self.chain(proto) {
            keys.extend(level.own_keys().iter().cloned());
        }
        keys
    }

    pub fn key_list(&self, proto: ProtoId, this: &JsValue) -> JsList {
        match self.try_get(proto) {
            Some(p) => (p.key_list())(self, p, this),
            None => JsList::new(),
        }
    }

    pub fn value_list(&self, proto: ProtoId, this: &JsValue) -> JsList {
        match self.try_get(proto) {
            Some(p) => (p.value_list())(self, p, this),
            None => JsList::new(),
        }
    }

    pub fn entry_list(&self, proto: ProtoId, this: &JsValue) -> JsList {
        match self.try_get(proto) {
            Some(p) => (p.entry_list())(self, p, this),
            None => JsList::new(),
        }
    }

    /// Accessors for `key` at one level: the instance entry, then the
    /// static one.
    fn table_entries<'a>(
        &self,
        ctx: &EvalContext,
        level: &'a Prototype,
        key: &JsValue,
        tables: Tables,
    ) -> Vec<&'a Accessor> {
        let name = match ctx.config().dispatch.table_key {
            TableKey::Member => match key.as_member_name() {
                Some(name) => name,
                None => return Vec::new(),
            },
            TableKey::PrototypeName => level.name().to_string(),
        };
        let (instance, statics) = match tables {
            Tables::Read => (level.get_property(&name), level.get_static_property(&name)),
            Tables::Invoke => (level.get_function(&name), level.get_static_function(&name)),
        };
        instance.into_iter().chain(statics).collect()
    }

    fn trace_miss(&self, ctx: &EvalContext, op: &str, proto: ProtoId, key: &JsValue) {
        if ctx.config().dispatch.trace_misses {
            let name = self.try_get(proto).map_or("<unknown>", |p| p.name());
            trace!("{} of {:?} missed on {}", op, key, name);
        }
    }
}

fn own_members(this: &JsValue) -> Option<&dyn MemberFunctions> {
    match this {
        JsValue::Object(o) => o.member_functions(),
        _ => None,
    }
}

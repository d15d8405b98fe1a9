//! Prototype registry: the mutable setup-time side of a realm.

use std::collections::HashMap;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::prototype::{ProtoId, ProtoKind, Prototype};
use crate::runner::ds::realm::{Realm, WellKnownPrototypes};
use crate::runner::plugin::config::RuntimeConfig;
use crate::runner::std_lib::register_core_prototypes;

/// Arena of prototypes under construction.
///
/// Every registry starts with the well-known chain (Object at the root,
/// Array, String, Number, Boolean, Class and the generic host-object
/// prototype beneath it). Configure prototypes through [`define`] and
/// [`get_mut`], then [`freeze`] the registry to publish it for lookup.
///
/// [`define`]: PrototypeRegistry::define
/// [`get_mut`]: PrototypeRegistry::get_mut
/// [`freeze`]: PrototypeRegistry::freeze
pub struct PrototypeRegistry {
    prototypes: Vec<Prototype>,
    names: HashMap<String, ProtoId>,
    well_known: WellKnownPrototypes,
}

impl PrototypeRegistry {
    /// A registry holding only the bare well-known prototypes.
    pub fn new() -> Self {
        Self::with_config(&RuntimeConfig::default())
    }

    pub fn with_config(config: &RuntimeConfig) -> Self {
        let mut registry = PrototypeRegistry {
            prototypes: Vec::new(),
            names: HashMap::new(),
            well_known: WellKnownPrototypes {
                object: ProtoId(0),
                array: ProtoId(0),
                string: ProtoId(0),
                number: ProtoId(0),
                boolean: ProtoId(0),
                class: ProtoId(0),
                host_object: ProtoId(0),
            },
        };
        let object = registry.push("Object", ProtoKind::Object, None);
        let parent = Some(object);
        let well_known = WellKnownPrototypes {
            object,
            array: registry.push("Array", ProtoKind::Array, parent),
            string: registry.push("String", ProtoKind::String, parent),
            number: registry.push("Number", ProtoKind::Number, parent),
            boolean: registry.push("Boolean", ProtoKind::Boolean, parent),
            class: registry.push("Class", ProtoKind::Class, parent),
            host_object: registry.push(
                &config.prototypes.host_object_name,
                ProtoKind::HostObject,
                parent,
            ),
        };
        registry.well_known = well_known;
        registry
    }

    /// A registry with the core built-in members installed.
    pub fn with_core() -> Result<Self, JErrorType> {
        Self::with_core_config(&RuntimeConfig::default())
    }

    pub fn with_core_config(config: &RuntimeConfig) -> Result<Self, JErrorType> {
        let mut registry = Self::with_config(config);
        register_core_prototypes(&mut registry)?;
        Ok(registry)
    }

    /// Create a prototype named `name` under `parent`.
    ///
    /// The new prototype copies the parent's scalar coercions as they are
    /// now. Fails if the name is taken or the parent does not exist.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        kind: ProtoKind,
        parent: Option<ProtoId>,
    ) -> Result<&mut Prototype, JErrorType> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(JErrorType::MisuseError(format!(
                "prototype {} is already defined",
                name
            )));
        }
        if let Some(p) = parent {
            if p.index() >= self.prototypes.len() {
                return Err(JErrorType::MisuseError(format!(
                    "parent {:?} of prototype {} does not exist",
                    p, name
                )));
            }
        }
        let id = self.push(&name, kind, parent);
        Ok(&mut self.prototypes[id.index()])
    }

    fn push(&mut self, name: &str, kind: ProtoKind, parent: Option<ProtoId>) -> ProtoId {
        let id = ProtoId(self.prototypes.len() as u32);
        let parent_proto = parent.map(|p| &self.prototypes[p.index()]);
        let proto = Prototype::new(id, name.to_string(), kind, parent_proto);
        debug!("defined prototype {} ({:?}) under {:?}", name, id, parent);
        self.prototypes.push(proto);
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, id: ProtoId) -> &Prototype {
        &self.prototypes[id.index()]
    }

    pub fn get_mut(&mut self, id: ProtoId) -> &mut Prototype {
        &mut self.prototypes[id.index()]
    }

    pub fn find(&self, name: &str) -> Option<ProtoId> {
        self.names.get(name).copied()
    }

    pub fn has_prototype(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn well_known(&self) -> &WellKnownPrototypes {
        &self.well_known
    }

    /// Names of every registered prototype, in definition order.
    pub fn prototype_names(&self) -> Vec<&str> {
        self.prototypes.iter().map(|p| p.name()).collect()
    }

    /// Publish the registry. No further registration is possible.
    pub fn freeze(self) -> Realm {
        let realm = Realm::new(self.prototypes, self.well_known);
        debug!("froze realm {} with {} prototypes", realm.id(), realm.len());
        realm
    }
}

impl Default for PrototypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::plugin::accessor::Accessor;
    use crate::runner::ds::value::JsValue;

    #[test]
    fn test_new_registry_has_well_known_chain() {
        let registry = PrototypeRegistry::new();
        let wk = *registry.well_known();
        assert_eq!(registry.get(wk.object).parent(), None);
        for id in vec![wk.array, wk.string, wk.number, wk.boolean, wk.class, wk.host_object] {
            assert_eq!(registry.get(id).parent(), Some(wk.object));
        }
        assert_eq!(registry.get(wk.host_object).name(), "HostObject");
    }

    #[test]
    fn test_host_object_name_from_config() {
        let config = RuntimeConfig::parse("[prototypes]\nhost_object_name = \"JavaObject\"\n").unwrap();
        let registry = PrototypeRegistry::with_config(&config);
        assert_eq!(registry.find("JavaObject"), Some(registry.well_known().host_object));
    }

    #[test]
    fn test_define_rejects_duplicate_name() {
        let mut registry = PrototypeRegistry::new();
        assert!(matches!(
            registry.define("Array", ProtoKind::Array, None),
            Err(JErrorType::MisuseError(_))
        ));
    }

    #[test]
    fn test_define_rejects_unknown_parent() {
        let mut registry = PrototypeRegistry::new();
        assert!(matches!(
            registry.define("Orphan", ProtoKind::Object, Some(ProtoId(999))),
            Err(JErrorType::MisuseError(_))
        ));
    }

    #[test]
    fn test_builder_calls_return_same_node() {
        let mut registry = PrototypeRegistry::new();
        let id = registry
            .define("Point", ProtoKind::Custom("Point".to_string()), None)
            .unwrap()
            .property("x", Accessor::static_value(JsValue::int(1)))
            .function("len", Accessor::method(|_, _, _| Ok(JsValue::int(0))))
            .id();
        let p = registry.get(id);
        assert!(p.get_property("x").is_some());
        assert!(p.get_function("len").is_some());
        assert_eq!(p.kind(), &ProtoKind::Custom("Point".to_string()));
    }

    #[test]
    fn test_core_registration() {
        let registry = PrototypeRegistry::with_core().unwrap();
        let wk = *registry.well_known();
        assert!(registry.get(wk.array).get_function("push").is_some());
        assert!(registry.get(wk.string).get_property("length").is_some());
        assert!(registry.get(wk.array).capability().is_some());
        assert_eq!(
            registry.prototype_names(),
            vec!["Object", "Array", "String", "Number", "Boolean", "Class", "HostObject"]
        );
    }
}

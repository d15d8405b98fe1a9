//! Core types shared by the object model: callback signatures and the
//! evaluation context handed to every accessor.

use std::sync::Arc;

use crate::runner::ds::cast::{BoundaryConverter, Cast, DefaultConverter};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lookup::Lookup;
use crate::runner::ds::prototype::ProtoId;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::{JsList, JsNumberType, JsValue};
use crate::runner::plugin::config::RuntimeConfig;
use crate::runner::plugin::registry::PrototypeRegistry;

/// Computed property: receiver to value.
pub type PropertyFn =
    Arc<dyn Fn(&EvalContext, &JsValue) -> Result<JsValue, JErrorType> + Send + Sync>;

/// Instance method: receiver and arguments to value.
pub type MethodFn =
    Arc<dyn Fn(&EvalContext, &JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + Send + Sync>;

/// Static property: no receiver.
pub type StaticPropertyFn = Arc<dyn Fn(&EvalContext) -> Result<JsValue, JErrorType> + Send + Sync>;

/// Static method: arguments only.
pub type StaticMethodFn =
    Arc<dyn Fn(&EvalContext, Vec<JsValue>) -> Result<JsValue, JErrorType> + Send + Sync>;

/// Execution context passed to every accessor and adapter.
///
/// One context per running script; the realm behind it is shared and
/// read-only.
pub struct EvalContext {
    realm: Arc<Realm>,
    converter: Arc<dyn BoundaryConverter>,
    /// Only the `dispatch` section is read here. The `prototypes` section
    /// shapes a realm while it is built, see `PrototypeRegistry::with_config`.
    config: RuntimeConfig,
}

impl EvalContext {
    pub fn new(realm: Arc<Realm>) -> Self {
        EvalContext {
            realm,
            converter: Arc::new(DefaultConverter),
            config: RuntimeConfig::default(),
        }
    }

    /// Replace the boundary converter used by every `Cast`.
    pub fn with_converter(mut self, converter: Arc<dyn BoundaryConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Dispatch settings for this context. Prototype naming in `config` has
    /// no effect on an already frozen realm.
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    pub fn converter(&self) -> &dyn BoundaryConverter {
        self.converter.as_ref()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Read `key` on `this`, classifying it first.
    pub fn read(&self, this: &JsValue, key: &JsValue, cast: Cast) -> Result<Lookup, JErrorType> {
        let proto = self.realm.classify(self, this);
        self.realm.read(self, proto, this, key, cast)
    }

    pub fn write(
        &self,
        this: &JsValue,
        key: &JsValue,
        value: JsValue,
        cast: Cast,
    ) -> Result<bool, JErrorType> {
        let proto = self.realm.classify(self, this);
        self.realm.write(self, proto, this, key, value, cast)
    }

    pub fn invoke(
        &self,
        this: &JsValue,
        key: &JsValue,
        args: Vec<JsValue>,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        let proto = self.realm.classify(self, this);
        self.realm.invoke(self, proto, this, key, args, cast)
    }

    pub fn delete(&self, this: &JsValue, key: &JsValue) -> Result<Lookup, JErrorType> {
        let proto = self.realm.classify(self, this);
        self.realm.delete(self, proto, this, key)
    }

    /// Call the constructor of prototype `proto`.
    pub fn construct(
        &self,
        proto: ProtoId,
        args: Vec<JsValue>,
        cast: Cast,
    ) -> Result<Lookup, JErrorType> {
        self.realm.construct(self, proto, args, cast)
    }

    pub fn keys(&self, this: &JsValue) -> JsList {
        let proto = self.realm.classify(self, this);
        self.realm.key_list(proto, this)
    }

    pub fn values(&self, this: &JsValue) -> JsList {
        let proto = self.realm.classify(self, this);
        self.realm.value_list(proto, this)
    }

    pub fn entries(&self, this: &JsValue) -> JsList {
        let proto = self.realm.classify(self, this);
        self.realm.entry_list(proto, this)
    }

    /// String form of `this` per its prototype's `as_string` strategy.
    pub fn to_display_string(&self, this: &JsValue) -> String {
        let proto = self.realm.classify(self, this);
        (self.realm.get(proto).as_string())(this)
    }

    pub fn to_number(&self, this: &JsValue) -> JsNumberType {
        let proto = self.realm.classify(self, this);
        (self.realm.get(proto).as_number())(this)
    }

    pub fn to_boolean(&self, this: &JsValue) -> bool {
        let proto = self.realm.classify(self, this);
        (self.realm.get(proto).as_boolean())(this)
    }
}

impl Default for EvalContext {
    /// A context over the bare well-known prototypes, without built-in members.
    fn default() -> Self {
        EvalContext::new(Arc::new(PrototypeRegistry::new().freeze()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::plugin::config::TableKey;

    #[test]
    fn test_context_config_leaves_realm_names_alone() {
        let mut config = RuntimeConfig::new();
        config.prototypes.host_object_name = "Foreign".to_string();
        config.dispatch.table_key = TableKey::PrototypeName;
        let ctx = EvalContext::default().with_config(config);

        let realm = ctx.realm();
        let host_object = realm.well_known().host_object;
        assert_eq!(realm.get(host_object).name(), "HostObject");
        assert_eq!(realm.find("Foreign"), None);
        assert_eq!(ctx.config().dispatch.table_key, TableKey::PrototypeName);
    }

    #[test]
    fn test_registry_config_names_host_object() {
        let mut config = RuntimeConfig::new();
        config.prototypes.host_object_name = "Foreign".to_string();
        let realm = PrototypeRegistry::with_config(&config).freeze();
        assert_eq!(realm.find("Foreign"), Some(realm.well_known().host_object));
    }
}

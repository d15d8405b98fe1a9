//! Prototype nodes.
//!
//! A [`Prototype`] is created through [`PrototypeRegistry::define`], which
//! assigns its handle and parent, and configured with chained builder calls
//! while the registry is still mutable. Once frozen into a [`Realm`] it is
//! read-only.
//!
//! [`PrototypeRegistry::define`]: crate::runner::plugin::registry::PrototypeRegistry::define
//! [`Realm`]: crate::runner::ds::realm::Realm

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::{to_boolean, to_number, to_string};
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::ds::views::{
    default_entry_list, default_key_list, default_value_list, ViewSupplier,
};
use crate::runner::plugin::accessor::Accessor;
use crate::runner::plugin::member_functions::MemberFunctions;

/// Stable handle of a prototype inside its registry/realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtoId(pub(crate) u32);

impl ProtoId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The script-level type a prototype stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProtoKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Class,
    HostObject,
    /// Any embedder-defined type.
    Custom(String),
}

pub type ScalarFn<T> = Arc<dyn Fn(&JsValue) -> T + Send + Sync>;

pub struct Prototype {
    id: ProtoId,
    kind: ProtoKind,
    name: String,
    parent: Option<ProtoId>,
    properties: HashMap<String, Accessor>,
    functions: HashMap<String, Accessor>,
    static_properties: HashMap<String, Accessor>,
    static_functions: HashMap<String, Accessor>,
    constructor: Option<Accessor>,
    capability: Option<Arc<dyn MemberFunctions>>,
    as_string: ScalarFn<String>,
    as_number: ScalarFn<JsNumberType>,
    as_boolean: ScalarFn<bool>,
    key_list: ViewSupplier,
    value_list: ViewSupplier,
    entry_list: ViewSupplier,
    own_keys: OnceCell<Arc<BTreeSet<String>>>,
}

impl Prototype {
    /// Root prototypes start from the generic coercions; children copy
    /// their parent's current strategies. View suppliers always start from
    /// the shape-sensing defaults.
    pub(crate) fn new(
        id: ProtoId,
        name: String,
        kind: ProtoKind,
        parent: Option<&Prototype>,
    ) -> Self {
        let as_string: ScalarFn<String> = match parent {
            Some(p) => p.as_string.clone(),
            None => Arc::new(to_string),
        };
        let as_number: ScalarFn<JsNumberType> = match parent {
            Some(p) => p.as_number.clone(),
            None => Arc::new(to_number),
        };
        let as_boolean: ScalarFn<bool> = match parent {
            Some(p) => p.as_boolean.clone(),
            None => Arc::new(to_boolean),
        };
        Prototype {
            id,
            kind,
            name,
            parent: parent.map(|p| p.id),
            properties: HashMap::new(),
            functions: HashMap::new(),
            static_properties: HashMap::new(),
            static_functions: HashMap::new(),
            constructor: None,
            capability: None,
            as_string,
            as_number,
            as_boolean,
            key_list: Arc::new(default_key_list),
            value_list: Arc::new(default_value_list),
            entry_list: Arc::new(default_entry_list),
            own_keys: OnceCell::new(),
        }
    }

    pub fn id(&self) -> ProtoId {
        self.id
    }

    pub fn kind(&self) -> &ProtoKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ProtoId> {
        self.parent
    }

    // ---- builder ------------------------------------------------------

    pub fn property(&mut self, name: impl Into<String>, accessor: Accessor) -> &mut Self {
        self.properties.insert(name.into(), accessor);
        self.own_keys.take();
        self
    }

    pub fn function(&mut self, name: impl Into<String>, accessor: Accessor) -> &mut Self {
        self.functions.insert(name.into(), accessor);
        self.own_keys.take();
        self
    }

    pub fn static_property(&mut self, name: impl Into<String>, accessor: Accessor) -> &mut Self {
        self.static_properties.insert(name.into(), accessor);
        self
    }

    /// Shorthand for a static property fixed to `value`.
    pub fn static_value(&mut self, name: impl Into<String>, value: JsValue) -> &mut Self {
        self.static_property(name, Accessor::static_value(value))
    }

    pub fn static_function(&mut self, name: impl Into<String>, accessor: Accessor) -> &mut Self {
        self.static_functions.insert(name.into(), accessor);
        self
    }

    /// Sets the constructor. It can be set once.
    pub fn with_constructor(&mut self, accessor: Accessor) -> Result<&mut Self, JErrorType> {
        if self.constructor.is_some() {
            debug!("constructor of prototype {} set twice", self.name);
            return Err(JErrorType::MisuseError(format!(
                "prototype {} already has a constructor",
                self.name
            )));
        }
        self.constructor = Some(accessor);
        Ok(self)
    }

    /// Sets the capability override consulted before the name tables. It
    /// can be set once.
    pub fn with_capability(
        &mut self,
        capability: Arc<dyn MemberFunctions>,
    ) -> Result<&mut Self, JErrorType> {
        if self.capability.is_some() {
            debug!("capability of prototype {} set twice", self.name);
            return Err(JErrorType::MisuseError(format!(
                "prototype {} already has a capability override",
                self.name
            )));
        }
        self.capability = Some(capability);
        Ok(self)
    }

    pub fn with_as_string<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&JsValue) -> String + Send + Sync + 'static,
    {
        self.as_string = Arc::new(f);
        self
    }

    pub fn with_as_number<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&JsValue) -> JsNumberType + Send + Sync + 'static,
    {
        self.as_number = Arc::new(f);
        self
    }

    pub fn with_as_boolean<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&JsValue) -> bool + Send + Sync + 'static,
    {
        self.as_boolean = Arc::new(f);
        self
    }

    pub fn with_key_list(&mut self, supplier: ViewSupplier) -> &mut Self {
        self.key_list = supplier;
        self
    }

    pub fn with_value_list(&mut self, supplier: ViewSupplier) -> &mut Self {
        self.value_list = supplier;
        self
    }

    pub fn with_entry_list(&mut self, supplier: ViewSupplier) -> &mut Self {
        self.entry_list = supplier;
        self
    }

    // ---- accessors ----------------------------------------------------

    pub fn get_property(&self, name: &str) -> Option<&Accessor> {
        self.properties.get(name)
    }

    pub fn get_function(&self, name: &str) -> Option<&Accessor> {
        self.functions.get(name)
    }

    pub fn get_static_property(&self, name: &str) -> Option<&Accessor> {
        self.static_properties.get(name)
    }

    pub fn get_static_function(&self, name: &str) -> Option<&Accessor> {
        self.static_functions.get(name)
    }

    pub fn constructor(&self) -> Option<&Accessor> {
        self.constructor.as_ref()
    }

    pub fn capability(&self) -> Option<&dyn MemberFunctions> {
        self.capability.as_deref()
    }

    pub fn as_string(&self) -> &ScalarFn<String> {
        &self.as_string
    }

    pub fn as_number(&self) -> &ScalarFn<JsNumberType> {
        &self.as_number
    }

    pub fn as_boolean(&self) -> &ScalarFn<bool> {
        &self.as_boolean
    }

    pub fn key_list(&self) -> &ViewSupplier {
        &self.key_list
    }

    pub fn value_list(&self) -> &ViewSupplier {
        &self.value_list
    }

    pub fn entry_list(&self) -> &ViewSupplier {
        &self.entry_list
    }

    /// Property and function names registered at this level only.
    ///
    /// Computed on first use after the last registration; concurrent first
    /// calls may both compute it, with identical results.
    pub fn own_keys(&self) -> Arc<BTreeSet<String>> {
        self.own_keys
            .get_or_init(|| {
                Arc::new(
                    self.properties
                        .keys()
                        .chain(self.functions.keys())
                        .cloned()
                        .collect(),
                )
            })
            .clone()
    }
}

impl fmt::Debug for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("properties", &self.properties.len())
            .field("functions", &self.functions.len())
            .finish()
    }
}

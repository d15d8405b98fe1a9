//! Member dispatch surface: the capability contract, accessor adapters and
//! the registry used to configure prototypes.
//!
//! ## Capability contract
//!
//! Everything that can answer member access implements
//! [`MemberFunctions`]. Its four operations (`read`, `write`, `invoke` and
//! `delete`) report a miss as [`Lookup::NotFound`] rather than an error, so
//! a caller can keep searching. A stored `null` or `undefined` is a hit.
//!
//! Three kinds of implementers exist:
//!
//! - **Accessors** ([`Accessor`]) serve one named member of a prototype
//! - **Collection adapters** serve index access on lists and keyed access
//!   on maps
//! - **Host objects** may serve their own members, ahead of any prototype
//!
//! ## Dispatch order
//!
//! ```text
//! read / invoke on `this`:
//! 1. this value's own members, if it is a host object offering them
//! 2. for each prototype from the classified one up to Object:
//!    a. the prototype's capability
//!    b. its instance table, then its static table
//! ```
//!
//! `write` and `delete` only consult steps 1 and 2a.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use just_objects::runner::ds::cast::Cast;
//! use just_objects::runner::ds::lookup::Lookup;
//! use just_objects::runner::ds::prototype::ProtoKind;
//! use just_objects::runner::ds::value::JsValue;
//! use just_objects::runner::plugin::accessor::Accessor;
//! use just_objects::runner::plugin::registry::PrototypeRegistry;
//! use just_objects::runner::plugin::types::EvalContext;
//!
//! let mut registry = PrototypeRegistry::with_core().unwrap();
//! let object = registry.well_known().object;
//! registry
//!     .define("Greeter", ProtoKind::Custom("Greeter".to_string()), Some(object))
//!     .unwrap()
//!     .function("greet", Accessor::method(|_, _, args| {
//!         Ok(JsValue::String(format!("hello {}", args.len())))
//!     }));
//! let greeter = registry.find("Greeter").unwrap();
//!
//! let ctx = EvalContext::new(Arc::new(registry.freeze()));
//! let result = ctx
//!     .realm()
//!     .invoke(&ctx, greeter, &JsValue::Null, &JsValue::str("greet"), vec![], Cast::Identity)
//!     .unwrap();
//! assert_eq!(result, Lookup::Found(JsValue::str("hello 0")));
//! ```
//!
//! [`Lookup::NotFound`]: crate::runner::ds::lookup::Lookup::NotFound

pub mod accessor;
pub mod config;
pub mod member_functions;
pub mod registry;
pub mod types;

pub use accessor::Accessor;
pub use config::{RuntimeConfig, TableKey};
pub use member_functions::MemberFunctions;
pub use registry::PrototypeRegistry;
pub use types::EvalContext;

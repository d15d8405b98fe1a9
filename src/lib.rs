//! # just-objects - runtime object model for an embedded script engine
//!
//! The layer between a script interpreter and host data. It answers one
//! question for the interpreter: what does `value.member` mean, for any
//! value, script or host.
//!
//! - Uniform member access (read, write, invoke, delete) over script
//!   scalars, host lists, maps, iterables, pairs, classes and objects
//! - A prototype chain per value, with typed name tables and an optional
//!   capability per level
//! - Conversion of values crossing the script/host boundary ([`Cast`])
//! - Enumeration views (keys, values, entries) for `for..in`/`for..of`
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use just_objects::runner::ds::cast::Cast;
//! use just_objects::runner::ds::lookup::Lookup;
//! use just_objects::runner::ds::value::JsValue;
//! use just_objects::runner::plugin::registry::PrototypeRegistry;
//! use just_objects::runner::plugin::types::EvalContext;
//!
//! let realm = PrototypeRegistry::with_core().unwrap().freeze();
//! let ctx = EvalContext::new(Arc::new(realm));
//!
//! let list = JsValue::list(vec![JsValue::int(10), JsValue::int(20)]);
//! assert_eq!(
//!     ctx.read(&list, &JsValue::int(1), Cast::Identity).unwrap(),
//!     Lookup::Found(JsValue::int(20))
//! );
//! assert_eq!(
//!     ctx.read(&list, &JsValue::int(5), Cast::Identity).unwrap(),
//!     Lookup::NotFound
//! );
//! ```
//!
//! ## Realms
//!
//! Prototypes are set up on a [`PrototypeRegistry`] and then frozen into a
//! [`Realm`]. A realm is immutable and may be shared across threads behind
//! an `Arc`; each thread evaluates through its own [`EvalContext`]. Host
//! lists and maps carry their own locks, so concurrent scripts touching the
//! same collection see whole element reads and writes.
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - Values, prototypes, the realm and collection adapters
//! - **[`runner::plugin`]** - Capability contract, accessors, registry and config
//! - **[`runner::std_lib`]** - Members of the built-in prototypes
//!
//! [`Cast`]: runner::ds::cast::Cast
//! [`PrototypeRegistry`]: runner::plugin::registry::PrototypeRegistry
//! [`Realm`]: runner::ds::realm::Realm
//! [`EvalContext`]: runner::plugin::types::EvalContext

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod runner;

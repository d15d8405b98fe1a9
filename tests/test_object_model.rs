//! End-to-end tests for member dispatch over script and host values.
//!
//! These drive the object model the way an interpreter would: build a
//! realm, classify values and walk prototype chains.

extern crate just_objects;

use std::any::Any;
use std::sync::Arc;
use std::thread;

use just_objects::runner::ds::cast::{Cast, HostType};
use just_objects::runner::ds::error::JErrorType;
use just_objects::runner::ds::lookup::Lookup;
use just_objects::runner::ds::prototype::{ProtoId, ProtoKind, Prototype};
use just_objects::runner::ds::realm::Realm;
use just_objects::runner::ds::value::{HostIterable, HostObject, JsList, JsMap, JsValue};
use just_objects::runner::plugin::accessor::Accessor;
use just_objects::runner::plugin::config::{RuntimeConfig, TableKey};
use just_objects::runner::plugin::member_functions::MemberFunctions;
use just_objects::runner::plugin::registry::PrototypeRegistry;
use just_objects::runner::plugin::types::EvalContext;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn core_ctx() -> EvalContext {
    init_logging();
    EvalContext::new(Arc::new(PrototypeRegistry::with_core().unwrap().freeze()))
}

fn key(name: &str) -> JsValue {
    JsValue::str(name)
}

// ============================================================================
// Sequences and maps
// ============================================================================

mod collection_tests {
    use super::*;

    #[test]
    fn test_sequence_scenario() {
        let ctx = core_ctx();
        let list = JsList::from_vec(vec![JsValue::int(10), JsValue::int(20), JsValue::int(30)]);
        let seq = JsValue::List(list.clone());

        assert_eq!(ctx.read(&seq, &JsValue::int(1), Cast::Identity).unwrap(), Lookup::Found(JsValue::int(20)));
        assert!(ctx.write(&seq, &JsValue::int(1), JsValue::int(99), Cast::Identity).unwrap());
        assert_eq!(ctx.read(&seq, &JsValue::int(1), Cast::Identity).unwrap(), Lookup::Found(JsValue::int(99)));
        assert_eq!(ctx.delete(&seq, &JsValue::int(0)).unwrap(), Lookup::Found(JsValue::int(10)));
        assert_eq!(list.snapshot(), vec![JsValue::int(99), JsValue::int(30)]);
        assert_eq!(ctx.read(&seq, &JsValue::int(5), Cast::Identity).unwrap(), Lookup::NotFound);
        assert!(!ctx.write(&seq, &JsValue::int(5), JsValue::int(1), Cast::Identity).unwrap());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_map_scenario() {
        let ctx = core_ctx();
        let map = JsMap::new();
        let store = JsValue::Map(map.clone());

        assert_eq!(ctx.read(&store, &key("a"), Cast::Identity).unwrap(), Lookup::NotFound);
        assert!(ctx.write(&store, &key("a"), JsValue::int(5), Cast::Identity).unwrap());
        assert_eq!(ctx.read(&store, &key("a"), Cast::Identity).unwrap(), Lookup::Found(JsValue::int(5)));
        assert_eq!(ctx.delete(&store, &key("a")).unwrap(), Lookup::Found(JsValue::int(5)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_absent_members_are_not_found() {
        let ctx = core_ctx();
        let values = vec![
            JsValue::int(1),
            JsValue::str("s"),
            JsValue::Boolean(true),
            JsValue::Null,
            JsValue::Undefined,
            JsValue::list(vec![]),
            JsValue::Map(JsMap::new()),
        ];
        for v in values {
            assert_eq!(ctx.read(&v, &key("noSuchMember"), Cast::Identity).unwrap(), Lookup::NotFound);
            assert_eq!(
                ctx.invoke(&v, &key("noSuchMember"), vec![], Cast::Identity).unwrap(),
                Lookup::NotFound
            );
            assert_eq!(ctx.delete(&v, &key("noSuchMember")).unwrap(), Lookup::NotFound);
        }
    }

    #[test]
    fn test_conversion_error_escapes_dispatch() {
        let ctx = core_ctx();
        let seq = JsValue::list(vec![JsValue::str("abc")]);
        let err = ctx
            .read(&seq, &JsValue::int(0), Cast::ToHost(Some(HostType::Integer)))
            .unwrap_err();
        assert!(matches!(err, JErrorType::ConversionError(_)));
    }

    #[test]
    fn test_prototype_members_reach_maps_through_the_root() {
        let ctx = core_ctx();
        let store = JsValue::Map(JsMap::from_entries(vec![("x", JsValue::int(1))]));
        assert_eq!(
            ctx.invoke(&store, &key("hasOwnProperty"), vec![key("x")], Cast::Identity).unwrap(),
            Lookup::Found(JsValue::Boolean(true))
        );
    }
}

// ============================================================================
// Prototype chains
// ============================================================================

mod chain_tests {
    use super::*;

    struct Shadow;

    impl MemberFunctions for Shadow {
        fn invoke(
            &self,
            _ctx: &EvalContext,
            _this: &JsValue,
            key: &JsValue,
            _args: Vec<JsValue>,
            _cast: Cast,
        ) -> Result<Lookup, JErrorType> {
            if key.as_member_name().as_deref() == Some("g") {
                Ok(Lookup::Found(JsValue::str("capability")))
            } else {
                Ok(Lookup::NotFound)
            }
        }
    }

    fn answer(text: &'static str) -> Accessor {
        Accessor::method(move |_, _, _| Ok(JsValue::str(text)))
    }

    fn root_mid_leaf() -> (PrototypeRegistry, ProtoId, ProtoId) {
        let mut registry = PrototypeRegistry::new();
        let object = registry.well_known().object;
        let root = registry
            .define("Root", ProtoKind::Custom("Root".to_string()), Some(object))
            .unwrap()
            .function("f", answer("root"))
            .function("only_root", answer("root"))
            .property("x", Accessor::static_value(JsValue::str("root")))
            .id();
        let mid = registry
            .define("Mid", ProtoKind::Custom("Mid".to_string()), Some(root))
            .unwrap()
            .function("f", answer("mid"))
            .function("g", answer("table"))
            .with_capability(Arc::new(Shadow))
            .unwrap()
            .id();
        let leaf = registry
            .define("Leaf", ProtoKind::Custom("Leaf".to_string()), Some(mid))
            .unwrap()
            .function("f", answer("leaf"))
            .property("x", Accessor::static_value(JsValue::str("leaf")))
            .id();
        (registry, mid, leaf)
    }

    /// Declares the `Leaf` prototype, so dispatch starts at the bottom level.
    struct Node;

    impl HostObject for Node {
        fn type_name(&self) -> &str {
            "Node"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn prototype(&self, ctx: &EvalContext) -> Option<ProtoId> {
            ctx.realm().find("Leaf")
        }
    }

    #[test]
    fn test_nearest_level_wins() {
        init_logging();
        let (registry, mid, leaf) = root_mid_leaf();
        let ctx = EvalContext::new(Arc::new(registry.freeze()));
        let node = JsValue::object(Node);
        assert_eq!(ctx.realm().classify(&ctx, &node), leaf);

        let call = |name: &str| ctx.invoke(&node, &key(name), vec![], Cast::Identity).unwrap();
        assert_eq!(call("f"), Lookup::Found(JsValue::str("leaf")));
        assert_eq!(call("only_root"), Lookup::Found(JsValue::str("root")));
        assert_eq!(call("missing"), Lookup::NotFound);

        // one level up, Mid still shadows Root
        assert_eq!(
            ctx.realm()
                .invoke(&ctx, mid, &JsValue::Null, &key("f"), vec![], Cast::Identity)
                .unwrap(),
            Lookup::Found(JsValue::str("mid"))
        );
    }

    #[test]
    fn test_nearest_property_wins() {
        init_logging();
        let (registry, mid, _) = root_mid_leaf();
        let ctx = EvalContext::new(Arc::new(registry.freeze()));
        let node = JsValue::object(Node);
        assert_eq!(
            ctx.read(&node, &key("x"), Cast::Identity).unwrap(),
            Lookup::Found(JsValue::str("leaf"))
        );
        assert_eq!(
            ctx.realm()
                .read(&ctx, mid, &JsValue::Null, &key("x"), Cast::Identity)
                .unwrap(),
            Lookup::Found(JsValue::str("root"))
        );
    }

    #[test]
    fn test_capability_precedes_tables_on_same_level() {
        init_logging();
        let (registry, mid, _) = root_mid_leaf();
        let ctx = EvalContext::new(Arc::new(registry.freeze()));
        assert_eq!(
            ctx.realm()
                .invoke(&ctx, mid, &JsValue::Null, &key("g"), vec![], Cast::Identity)
                .unwrap(),
            Lookup::Found(JsValue::str("capability"))
        );
    }

    #[test]
    fn test_all_keys_spans_chain() {
        let (registry, _, leaf) = root_mid_leaf();
        let realm = registry.freeze();
        let own: Vec<String> = realm.own_keys(leaf).into_iter().collect();
        assert_eq!(own, vec!["f".to_string(), "x".to_string()]);
        let all = realm.all_keys(leaf);
        assert!(all.contains("only_root"));
        assert!(all.contains("g"));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_second_capability_is_misuse() {
        let mut registry = PrototypeRegistry::with_core().unwrap();
        let array = registry.well_known().array;
        let err = registry
            .get_mut(array)
            .with_capability(Arc::new(Shadow))
            .err();
        assert!(matches!(err, Some(JErrorType::MisuseError(_))));

        let err = registry
            .get_mut(array)
            .with_constructor(Accessor::static_method(|_, _| Ok(JsValue::Null)))
            .err();
        assert!(matches!(err, Some(JErrorType::MisuseError(_))));
    }

    #[test]
    fn test_prototype_name_table_key() {
        init_logging();
        let mut registry = PrototypeRegistry::new();
        let object = registry.well_known().object;
        let widget = registry
            .define("Widget", ProtoKind::Custom("Widget".to_string()), Some(object))
            .unwrap()
            .property("Widget", Accessor::static_value(JsValue::int(1)))
            .id();
        let realm = Arc::new(registry.freeze());

        let by_member = EvalContext::new(realm.clone());
        assert_eq!(
            realm.read(&by_member, widget, &JsValue::Null, &key("anything"), Cast::Identity).unwrap(),
            Lookup::NotFound
        );

        let mut config = RuntimeConfig::default();
        config.dispatch.table_key = TableKey::PrototypeName;
        let by_name = EvalContext::new(realm.clone()).with_config(config);
        assert_eq!(
            realm.read(&by_name, widget, &JsValue::Null, &key("anything"), Cast::Identity).unwrap(),
            Lookup::Found(JsValue::int(1))
        );
    }
}

// ============================================================================
// Host objects
// ============================================================================

mod host_object_tests {
    use super::*;

    /// Serves `count` itself; everything else falls through to the chain.
    struct Counter {
        count: i64,
    }

    impl MemberFunctions for Counter {
        fn read(
            &self,
            ctx: &EvalContext,
            _this: &JsValue,
            key: &JsValue,
            cast: Cast,
        ) -> Result<Lookup, JErrorType> {
            match key.as_member_name().as_deref() {
                Some("count") => Ok(Lookup::Found(cast.apply(ctx, JsValue::int(self.count))?)),
                _ => Ok(Lookup::NotFound),
            }
        }
    }

    impl HostObject for Counter {
        fn type_name(&self) -> &str {
            "Counter"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn member_functions(&self) -> Option<&dyn MemberFunctions> {
            Some(self)
        }
    }

    struct Point;

    impl HostObject for Point {
        fn type_name(&self) -> &str {
            "Point"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn prototype(&self, ctx: &EvalContext) -> Option<ProtoId> {
            ctx.realm().find("Point")
        }
    }

    #[test]
    fn test_own_members_precede_chain() {
        init_logging();
        let mut registry = PrototypeRegistry::with_core().unwrap();
        let host_object = registry.well_known().host_object;
        registry
            .get_mut(host_object)
            .property("count", Accessor::static_value(JsValue::int(99)));
        let ctx = EvalContext::new(Arc::new(registry.freeze()));

        let counter = JsValue::object(Counter { count: 3 });
        assert_eq!(ctx.realm().classify(&ctx, &counter), host_object);
        assert_eq!(
            ctx.read(&counter, &key("count"), Cast::Identity).unwrap(),
            Lookup::Found(JsValue::int(3))
        );
        // without own members the same key resolves on the prototype
        let point = JsValue::object(Point);
        assert_eq!(
            ctx.read(&point, &key("count"), Cast::Identity).unwrap(),
            Lookup::Found(JsValue::int(99))
        );
        assert_eq!(
            ctx.read(&counter, &key("class"), Cast::Identity).unwrap(),
            Lookup::Found(JsValue::str("Counter"))
        );
        assert!(!ctx.write(&counter, &key("count"), JsValue::int(4), Cast::Identity).unwrap());
    }

    #[test]
    fn test_declared_prototype_overrides_shape() {
        init_logging();
        let mut registry = PrototypeRegistry::with_core().unwrap();
        let object = registry.well_known().object;
        registry
            .define("Point", ProtoKind::Custom("Point".to_string()), Some(object))
            .unwrap()
            .property("x", Accessor::static_value(JsValue::int(7)));
        let ctx = EvalContext::new(Arc::new(registry.freeze()));
        let point = JsValue::object(Point);

        assert_eq!(ctx.realm().classify(&ctx, &point), ctx.realm().find("Point").unwrap());
        assert_eq!(ctx.read(&point, &key("x"), Cast::Identity).unwrap(), Lookup::Found(JsValue::int(7)));
        // the generic host-object members are not on this chain
        assert_eq!(ctx.read(&point, &key("class"), Cast::Identity).unwrap(), Lookup::NotFound);
    }
}

// ============================================================================
// Views
// ============================================================================

mod view_tests {
    use super::*;

    struct Countdown(i64);

    impl HostIterable for Countdown {
        fn iter_values(&self) -> Box<dyn Iterator<Item = JsValue> + '_> {
            Box::new((1..=self.0).rev().map(JsValue::int))
        }
    }

    #[test]
    fn test_sequence_views() {
        let ctx = core_ctx();
        let list = JsList::from_vec(vec![key("a"), key("b"), key("c")]);
        let seq = JsValue::List(list.clone());

        assert_eq!(ctx.keys(&seq).snapshot(), vec![JsValue::int(0), JsValue::int(1), JsValue::int(2)]);

        let values = ctx.values(&seq);
        assert!(values.ptr_eq(&list));
        values.write()[0] = key("z");
        assert_eq!(list.snapshot()[0], key("z"));

        assert_eq!(ctx.entries(&seq).snapshot()[2], JsValue::pair(JsValue::int(2), key("c")));
    }

    #[test]
    fn test_iterable_views() {
        let ctx = core_ctx();
        let it = JsValue::Iterable(Arc::new(Countdown(3)));
        assert_eq!(ctx.keys(&it).len(), 3);
        assert_eq!(ctx.values(&it).snapshot(), vec![JsValue::int(3), JsValue::int(2), JsValue::int(1)]);
        assert_eq!(ctx.entries(&it).snapshot()[0], JsValue::pair(JsValue::int(0), JsValue::int(3)));
    }

    #[test]
    fn test_entry_list_is_empty_on_length_mismatch() {
        init_logging();
        let mut registry = PrototypeRegistry::new();
        let object = registry.well_known().object;
        let odd = registry
            .define("Odd", ProtoKind::Custom("Odd".to_string()), Some(object))
            .unwrap()
            .with_key_list(Arc::new(|_: &Realm, _: &Prototype, _: &JsValue| {
                JsList::from_vec(vec![JsValue::int(0)])
            }))
            .id();
        let realm = registry.freeze();
        let seq = JsValue::list(vec![JsValue::int(1), JsValue::int(2), JsValue::int(3)]);

        assert_eq!(realm.key_list(odd, &seq).len(), 1);
        assert_eq!(realm.value_list(odd, &seq).len(), 3);
        assert!(realm.entry_list(odd, &seq).is_empty());
    }

    #[test]
    fn test_scalars_have_empty_views() {
        let ctx = core_ctx();
        for v in vec![JsValue::str("abc"), JsValue::int(1), JsValue::Null] {
            assert!(ctx.keys(&v).is_empty());
            assert!(ctx.values(&v).is_empty());
            assert!(ctx.entries(&v).is_empty());
        }
    }
}

// ============================================================================
// Sharing
// ============================================================================

mod concurrency_tests {
    use super::*;

    #[test]
    fn test_realm_shared_across_threads() {
        init_logging();
        let realm = Arc::new(PrototypeRegistry::with_core().unwrap().freeze());
        let list = JsList::new();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let realm = realm.clone();
                let target = JsValue::List(list.clone());
                thread::spawn(move || {
                    let ctx = EvalContext::new(realm);
                    for i in 0..100 {
                        let pushed = ctx
                            .invoke(&target, &key("push"), vec![JsValue::int(t * 100 + i)], Cast::Identity)
                            .unwrap();
                        assert!(pushed.is_found());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(list.len(), 400);
    }
}

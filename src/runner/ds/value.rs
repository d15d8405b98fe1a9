use std::any::Any;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::runner::ds::operations::type_conversion::{TYPE_STR_NULL, TYPE_STR_UNDEFINED};
use crate::runner::ds::prototype::ProtoId;
use crate::runner::plugin::member_functions::MemberFunctions;
use crate::runner::plugin::types::EvalContext;

/// A value as seen by the object model: script scalars plus every host shape
/// the dispatcher knows how to classify.
pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    Char(char),
    String(String),
    Number(JsNumberType),
    List(JsList),
    Map(JsMap),
    Iterable(Arc<dyn HostIterable>),
    Class(HostClass),
    Pair(Arc<(JsValue, JsValue)>),
    Object(Arc<dyn HostObject>),
}

impl JsValue {
    pub fn int(i: i64) -> Self {
        JsValue::Number(JsNumberType::Integer(i))
    }

    pub fn float(f: f64) -> Self {
        JsValue::Number(JsNumberType::from_f64(f))
    }

    pub fn str(s: impl Into<String>) -> Self {
        JsValue::String(s.into())
    }

    pub fn list(values: Vec<JsValue>) -> Self {
        JsValue::List(JsList::from_vec(values))
    }

    pub fn pair(first: JsValue, second: JsValue) -> Self {
        JsValue::Pair(Arc::new((first, second)))
    }

    pub fn object<O: HostObject + 'static>(o: O) -> Self {
        JsValue::Object(Arc::new(o))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, JsValue::Undefined | JsValue::Null)
    }

    /// The key as a member name, if it can address a name table.
    pub fn as_member_name(&self) -> Option<String> {
        match self {
            JsValue::String(s) => Some(s.clone()),
            JsValue::Char(c) => Some(c.to_string()),
            _ => None,
        }
    }

    /// The key as a sequence index: numbers are floored, anything negative,
    /// non-finite or non-numeric has no index.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            JsValue::Number(JsNumberType::Integer(i)) if *i >= 0 => Some(*i as usize),
            JsValue::Number(JsNumberType::Float(f)) => {
                let f = f.floor();
                if f >= 0.0 && f <= usize::MAX as f64 {
                    Some(f as usize)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Clone for JsValue {
    fn clone(&self) -> Self {
        match self {
            JsValue::Undefined => JsValue::Undefined,
            JsValue::Null => JsValue::Null,
            JsValue::Boolean(d) => JsValue::Boolean(*d),
            JsValue::Char(c) => JsValue::Char(*c),
            JsValue::String(d) => JsValue::String(d.to_string()),
            JsValue::Number(d) => JsValue::Number(d.clone()),
            JsValue::List(l) => JsValue::List(l.clone()),
            JsValue::Map(m) => JsValue::Map(m.clone()),
            JsValue::Iterable(i) => JsValue::Iterable(i.clone()),
            JsValue::Class(c) => JsValue::Class(c.clone()),
            JsValue::Pair(p) => JsValue::Pair(p.clone()),
            JsValue::Object(o) => JsValue::Object(o.clone()),
        }
    }
}

impl Display for JsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_display(f, &mut Vec::new())
    }
}

impl fmt::Debug for JsValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_debug(f, &mut Vec::new())
    }
}

impl JsValue {
    /// `seen` holds the collections currently being rendered; a collection
    /// met again inside itself renders as nothing.
    fn fmt_display(&self, f: &mut Formatter<'_>, seen: &mut Vec<usize>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "{}", TYPE_STR_UNDEFINED),
            JsValue::Null => write!(f, "{}", TYPE_STR_NULL),
            JsValue::Boolean(b) => write!(f, "{}", b),
            JsValue::Char(c) => write!(f, "{}", c),
            JsValue::String(s) => write!(f, "{}", s),
            JsValue::Number(n) => write!(f, "{}", n),
            JsValue::List(l) => {
                if seen.contains(&l.addr()) {
                    return Ok(());
                }
                seen.push(l.addr());
                for (i, item) in l.snapshot().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    item.fmt_display(f, seen)?;
                }
                seen.pop();
                Ok(())
            }
            JsValue::Map(_) => write!(f, "[object Object]"),
            JsValue::Iterable(_) => write!(f, "[object Iterable]"),
            JsValue::Class(c) => write!(f, "[class {}]", c.name()),
            JsValue::Pair(p) => {
                p.0.fmt_display(f, seen)?;
                write!(f, ",")?;
                p.1.fmt_display(f, seen)
            }
            JsValue::Object(o) => write!(f, "[object {}]", o.type_name()),
        }
    }

    fn fmt_debug(&self, f: &mut Formatter<'_>, seen: &mut Vec<usize>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "JsValue::Undefined"),
            JsValue::Null => write!(f, "JsValue::Null"),
            JsValue::Boolean(b) => write!(f, "JsValue::Boolean({})", b),
            JsValue::Char(c) => write!(f, "JsValue::Char({:?})", c),
            JsValue::String(s) => write!(f, "JsValue::String({:?})", s),
            JsValue::Number(n) => write!(f, "JsValue::Number({:?})", n),
            JsValue::List(l) => {
                if seen.contains(&l.addr()) {
                    return write!(f, "JsValue::List([...])");
                }
                seen.push(l.addr());
                write!(f, "JsValue::List([")?;
                for (i, item) in l.snapshot().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.fmt_debug(f, seen)?;
                }
                seen.pop();
                write!(f, "])")
            }
            JsValue::Map(m) => {
                if seen.contains(&m.addr()) {
                    return write!(f, "JsValue::Map({{...}})");
                }
                seen.push(m.addr());
                write!(f, "JsValue::Map({{")?;
                let entries: Vec<(String, JsValue)> =
                    m.read().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: ", k)?;
                    v.fmt_debug(f, seen)?;
                }
                seen.pop();
                write!(f, "}})")
            }
            JsValue::Iterable(_) => write!(f, "JsValue::Iterable(...)"),
            JsValue::Class(c) => write!(f, "JsValue::Class({})", c.name()),
            JsValue::Pair(p) => {
                write!(f, "JsValue::Pair(")?;
                p.0.fmt_debug(f, seen)?;
                write!(f, ", ")?;
                p.1.fmt_debug(f, seen)?;
                write!(f, ")")
            }
            JsValue::Object(o) => write!(f, "JsValue::Object({})", o.type_name()),
        }
    }
}

impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::Char(a), JsValue::Char(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            (JsValue::List(a), JsValue::List(b)) => a.ptr_eq(b),
            (JsValue::Map(a), JsValue::Map(b)) => a.ptr_eq(b),
            (JsValue::Iterable(a), JsValue::Iterable(b)) => Arc::ptr_eq(a, b),
            (JsValue::Class(a), JsValue::Class(b)) => a == b,
            (JsValue::Pair(a), JsValue::Pair(b)) => a.0 == b.0 && a.1 == b.1,
            (JsValue::Object(a), JsValue::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub enum JsNumberType {
    Integer(i64),
    Float(f64),
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}
impl JsNumberType {
    /// Normalizes an `f64`: integral values become `Integer`, the IEEE
    /// specials get their own variants.
    pub fn from_f64(f: f64) -> Self {
        if f.is_nan() {
            JsNumberType::NaN
        } else if f == f64::INFINITY {
            JsNumberType::PositiveInfinity
        } else if f == f64::NEG_INFINITY {
            JsNumberType::NegativeInfinity
        } else if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            JsNumberType::Integer(f as i64)
        } else {
            JsNumberType::Float(f)
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            JsNumberType::Integer(i) => *i as f64,
            JsNumberType::Float(f) => *f,
            JsNumberType::NaN => f64::NAN,
            JsNumberType::PositiveInfinity => f64::INFINITY,
            JsNumberType::NegativeInfinity => f64::NEG_INFINITY,
        }
    }
}
impl PartialEq for JsNumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsNumberType::Integer(a), JsNumberType::Integer(b)) => a == b,
            (JsNumberType::NaN, _) | (_, JsNumberType::NaN) => false,
            (JsNumberType::PositiveInfinity, JsNumberType::PositiveInfinity) => true,
            (JsNumberType::NegativeInfinity, JsNumberType::NegativeInfinity) => true,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}
impl Display for JsNumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JsNumberType::Integer(i) => write!(f, "{}", i),
            JsNumberType::Float(nf) => write!(f, "{}", nf),
            JsNumberType::NaN => write!(f, "NaN"),
            JsNumberType::PositiveInfinity => write!(f, "Infinity"),
            JsNumberType::NegativeInfinity => write!(f, "-Infinity"),
        }
    }
}
impl Clone for JsNumberType {
    fn clone(&self) -> Self {
        match self {
            JsNumberType::Integer(i) => JsNumberType::Integer(*i),
            JsNumberType::Float(nf) => JsNumberType::Float(*nf),
            JsNumberType::NaN => JsNumberType::NaN,
            JsNumberType::PositiveInfinity => JsNumberType::PositiveInfinity,
            JsNumberType::NegativeInfinity => JsNumberType::NegativeInfinity,
        }
    }
}

/// A live host sequence. Clones share the same storage.
#[derive(Clone, Default)]
pub struct JsList(Arc<RwLock<Vec<JsValue>>>);

impl JsList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(values: Vec<JsValue>) -> Self {
        JsList(Arc::new(RwLock::new(values)))
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, Vec<JsValue>> {
        self.0.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, Vec<JsValue>> {
        self.0.write()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<JsValue> {
        self.0.read().clone()
    }

    pub fn push(&self, value: JsValue) {
        self.0.write().push(value);
    }

    pub fn ptr_eq(&self, other: &JsList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Storage address, identifying the list across clones.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

/// A live host key/value store, iterated in insertion order.
#[derive(Clone, Default)]
pub struct JsMap(Arc<RwLock<IndexMap<String, JsValue>>>);

impl JsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K: Into<String>>(entries: Vec<(K, JsValue)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        JsMap(Arc::new(RwLock::new(map)))
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, IndexMap<String, JsValue>> {
        self.0.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, IndexMap<String, JsValue>> {
        self.0.write()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn ptr_eq(&self, other: &JsMap) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

/// A host type used as a value, e.g. the target of a static member access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostClass {
    name: Arc<str>,
}

impl HostClass {
    pub fn new(name: impl AsRef<str>) -> Self {
        HostClass {
            name: Arc::from(name.as_ref()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An iterable host value of unknown size.
///
/// The default key and entry views drain it more than once, so an
/// implementation must restart from the beginning on every call to
/// `iter_values`. Single-use sources need custom view suppliers.
pub trait HostIterable: Send + Sync {
    fn iter_values(&self) -> Box<dyn Iterator<Item = JsValue> + '_>;
}

/// Any other host value handed to the object model.
pub trait HostObject: Send + Sync {
    /// Host type name, used for display and the `class` property.
    fn type_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    /// Members served by the value itself, ahead of its prototype chain.
    fn member_functions(&self) -> Option<&dyn MemberFunctions> {
        None
    }

    /// The prototype this value declares for itself, overriding shape-based
    /// classification.
    fn prototype(&self, _ctx: &EvalContext) -> Option<ProtoId> {
        None
    }
}

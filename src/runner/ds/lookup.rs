use crate::runner::ds::value::JsValue;

/// Outcome of a read, invoke or delete.
///
/// `NotFound` means "no such member" and is distinct from every value a
/// member can legitimately produce, `Undefined` and `Null` included.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(JsValue),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn into_option(self) -> Option<JsValue> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    /// The script-visible result: a miss reads as `undefined`.
    pub fn unwrap_or_undefined(self) -> JsValue {
        self.into_option().unwrap_or(JsValue::Undefined)
    }
}

impl From<Option<JsValue>> for Lookup {
    fn from(v: Option<JsValue>) -> Self {
        match v {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

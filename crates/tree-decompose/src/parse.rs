//! Depth-limited JSON parsing.
//!
//! serde_json's built-in recursion limit is fixed at 128 and reports as a
//! syntax error. Instead the limit is disabled and [`LimitedValue`] enforces
//! the caller's `max_depth` while the tree is built, so a deep document never
//! grows the stack past the limit and fails with
//! [`DecomposeError::DepthExceeded`] rather than [`DecomposeError::Parse`].
//!
//! With no limit, parsing is bounded only by the call stack.

use crate::error::{DecomposeError, Result};
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::fmt;

/// Parse `raw` into a [`Value`], rejecting nodes nested deeper than `limit`.
pub(crate) fn parse_limited(raw: &[u8], limit: Option<usize>) -> Result<Value> {
    let trap = DepthTrap {
        limit,
        tripped: RefCell::new(None),
    };
    let mut de = serde_json::Deserializer::from_slice(raw);
    de.disable_recursion_limit();

    let parsed = LimitedValue {
        depth: 0,
        trap: &trap,
    }
    .deserialize(&mut de)
    .and_then(|value| de.end().map(|()| value));

    match (parsed, trap.tripped.into_inner()) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(mut segments)) => {
            segments.reverse();
            Err(DecomposeError::DepthExceeded {
                limit: limit.unwrap_or_default(),
                path: segments.concat(),
            })
        }
        (Err(err), None) => Err(err.into()),
    }
}

/// Shared by every seed of one parse. Once tripped, it collects path
/// segments innermost-first as the error unwinds.
struct DepthTrap {
    limit: Option<usize>,
    tripped: RefCell<Option<Vec<String>>>,
}

impl DepthTrap {
    fn record(&self, segment: impl FnOnce() -> String) {
        if let Some(segments) = self.tripped.borrow_mut().as_mut() {
            segments.push(segment());
        }
    }
}

/// Seed for one node at `depth` (number of enclosing containers).
#[derive(Clone, Copy)]
struct LimitedValue<'a> {
    depth: usize,
    trap: &'a DepthTrap,
}

impl LimitedValue<'_> {
    fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }
}

impl<'de> DeserializeSeed<'de> for LimitedValue<'_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        if let Some(limit) = self.trap.limit {
            if self.depth > limit {
                *self.trap.tripped.borrow_mut() = Some(Vec::new());
                return Err(de::Error::custom(format_args!(
                    "maximum nesting depth of {limit} exceeded"
                )));
            }
        }
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for LimitedValue<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, b: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(n.into()))
    }

    fn visit_u64<E>(self, n: u64) -> std::result::Result<Value, E> {
        Ok(Value::Number(n.into()))
    }

    fn visit_f64<E>(self, f: f64) -> std::result::Result<Value, E> {
        Ok(Number::from_f64(f).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, s: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E>(self, s: String) -> std::result::Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        loop {
            let idx = items.len();
            match seq.next_element_seed(self.child()) {
                Ok(Some(item)) => items.push(item),
                Ok(None) => break,
                Err(err) => {
                    self.trap.record(|| format!("[{idx}]"));
                    return Err(err);
                }
            }
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            match map.next_value_seed(self.child()) {
                Ok(value) => {
                    members.insert(key, value);
                }
                Err(err) => {
                    self.trap.record(|| format!("/{key}"));
                    return Err(err);
                }
            }
        }
        Ok(Value::Object(members))
    }
}

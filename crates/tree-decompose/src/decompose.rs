//! JSON tree → flat list of [`PathValue`]s.
//!
//! Decomposition runs without any schema: list keys, leaf-lists and
//! positional arrays all come out as `[i]` segments in source order. Aligning
//! these paths with a device model's read-only paths is left to the caller.
//!
//! # Example
//! ```
//! use tree_decompose::{decompose_tree, PathValue};
//!
//! let values = decompose_tree(br#"{"system":{"clock":{"timezone-name":"Europe/Rome"}}}"#).unwrap();
//! assert_eq!(values, [PathValue::new("/system/clock/timezone-name", "Europe/Rome")]);
//! ```

use crate::diagnostics::{DiagnosticSink, NodeKind, TracingSink};
use crate::error::{DecomposeError, Result};
use crate::options::DecomposeOptions;
use crate::parse::parse_limited;
use crate::types::{PathValue, TypedValue};
use serde_json::{Map, Value};

/// Parse `raw` as JSON and flatten it with default options.
///
/// Skipped nodes (JSON `null`) are reported as `tracing` warnings.
pub fn decompose_tree(raw: &[u8]) -> Result<Vec<PathValue>> {
    decompose_tree_with(raw, &DecomposeOptions::default(), &mut TracingSink)
}

/// Parse a JSON string and flatten it with default options.
pub fn decompose_str(json: &str) -> Result<Vec<PathValue>> {
    decompose_tree(json.as_bytes())
}

/// Parse `raw` as JSON and flatten it, reporting skipped nodes to `sink`.
///
/// # Errors
///
/// [`DecomposeError::Parse`] if `raw` is not valid JSON, and
/// [`DecomposeError::DepthExceeded`] if the tree is nested deeper than
/// `options` allow. Neither returns a partial result.
pub fn decompose_tree_with(
    raw: &[u8],
    options: &DecomposeOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<PathValue>> {
    let value = parse_limited(raw, options.limit())?;
    decompose_value(&value, options, sink)
}

/// Flatten an already-parsed JSON tree.
pub fn decompose_value(
    value: &Value,
    options: &DecomposeOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<PathValue>> {
    let mut walker = Walker {
        limit: options.limit(),
        sink,
        out: Vec::new(),
    };
    walker.flatten(value, String::new(), 0)?;
    Ok(walker.out)
}

struct Walker<'a> {
    limit: Option<usize>,
    sink: &'a mut dyn DiagnosticSink,
    out: Vec<PathValue>,
}

impl Walker<'_> {
    /// Depth-first walk. `depth` counts the containers enclosing `value`.
    fn flatten(&mut self, value: &Value, path: String, depth: usize) -> Result<()> {
        if let Some(limit) = self.limit {
            if depth > limit {
                return Err(DecomposeError::DepthExceeded { limit, path });
            }
        }

        match value {
            Value::Object(map) => self.flatten_object(map, &path, depth),
            Value::Array(arr) => self.flatten_array(arr, &path, depth),
            Value::String(s) => {
                self.emit(path, TypedValue::String(s.clone()));
                Ok(())
            }
            Value::Bool(b) => {
                self.emit(path, TypedValue::Bool(*b));
                Ok(())
            }
            Value::Number(n) => {
                match n.as_f64() {
                    Some(f) => self.emit(path, TypedValue::Float(f as f32)),
                    None => self.sink.unexpected_node(&path, NodeKind::Number),
                }
                Ok(())
            }
            Value::Null => {
                self.sink.unexpected_node(&path, NodeKind::Null);
                Ok(())
            }
        }
    }

    /// Empty maps emit nothing; the container itself never appears in the output.
    fn flatten_object(&mut self, map: &Map<String, Value>, path: &str, depth: usize) -> Result<()> {
        for (key, child) in map {
            self.flatten(child, format!("{path}/{key}"), depth + 1)?;
        }
        Ok(())
    }

    fn flatten_array(&mut self, arr: &[Value], path: &str, depth: usize) -> Result<()> {
        for (idx, child) in arr.iter().enumerate() {
            self.flatten(child, format!("{path}[{idx}]"), depth + 1)?;
        }
        Ok(())
    }

    fn emit(&mut self, path: String, value: TypedValue) {
        self.out.push(PathValue { path, value });
    }
}

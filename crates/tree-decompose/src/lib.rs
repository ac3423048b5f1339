//! # tree-decompose
//!
//! Breaks a JSON configuration document down into a flat list of paths and
//! typed values, without any schema context.
//!
//! Paths use `/key` for object members and `[i]` for array elements. Strings
//! and booleans keep their type; every number is narrowed to `f32`. Nulls are
//! skipped and reported through a [`DiagnosticSink`]. A second, schema-aware
//! stage is expected to turn positional `[i]` segments into real list keys and
//! tell leaf-lists apart from keyed lists.
//!
//! ## Quick start
//!
//! ```rust
//! use tree_decompose::{decompose_tree, PathValue, TypedValue};
//!
//! let values = decompose_tree(br#"{"list":[1,2,3]}"#).unwrap();
//! assert_eq!(values.len(), 3);
//! assert_eq!(values[2], PathValue::new("/list[2]", TypedValue::Float(3.0)));
//! ```
//!
//! ## Modules
//!
//! - [`decompose`] — JSON bytes → `Vec<PathValue>`
//! - [`diagnostics`] — non-fatal reports for skipped nodes
//! - [`options`] — depth limit, enforced during parsing and flattening
//! - [`error`] — parse and depth errors
//! - [`types`] — `PathValue` and `TypedValue`

pub mod decompose;
pub mod diagnostics;
pub mod error;
pub mod options;
mod parse;
pub mod types;

pub use decompose::{decompose_str, decompose_tree, decompose_tree_with, decompose_value};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, NodeKind, TracingSink};
pub use error::{DecomposeError, Result};
pub use options::{DecomposeOptions, DEFAULT_MAX_DEPTH};
pub use types::{PathValue, TypedValue};

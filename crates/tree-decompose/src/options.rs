//! Tunables for a decomposition call.

/// Default nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling the flatten step.
///
/// # Examples
///
/// ```
/// use tree_decompose::DecomposeOptions;
///
/// let opts = DecomposeOptions::new().max_depth(Some(8));
/// assert_eq!(opts.limit(), Some(8));
/// assert_eq!(DecomposeOptions::unbounded().limit(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecomposeOptions {
    max_depth: Option<usize>,
}

impl DecomposeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// No depth limit. Parsing and flattening are then bounded only by the
    /// call stack.
    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }

    /// Maximum number of containers that may enclose a node.
    /// The root is at depth 0; `None` disables the check. The limit is
    /// enforced while parsing, so it also bounds parser recursion.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.max_depth
    }
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

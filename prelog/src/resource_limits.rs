/// Resource limits that keep a session responsive on hostile input
///
/// These limits bound the work a single line can trigger while staying far
/// above what legitimate programs need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum source size accepted by the parser, in bytes
    pub max_input_bytes: usize,

    /// Maximum nesting of translations (groups, deferred bodies)
    /// Real usage: < 10 levels, Limit: 128
    pub max_depth: usize,

    /// Maximum application steps while one term reaches its fixed point
    pub max_apply_steps: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024, // 1 MiB
            max_depth: 128,
            max_apply_steps: 10_000,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}

//! The wrapper fragment appended to the transformed file.

/// Package whose source is replaced.
pub const TARGET_PACKAGE: &str = "context";

/// Function renamed in the original source and re-declared by the wrapper.
pub const TARGET_FUNCTION: &str = "WithDeadlineCause";

/// Name the original function is given.
pub const RENAMED_FUNCTION: &str = "_WithDeadlineCause";

/// Go expression added to every deadline.
pub const DEADLINE_OFFSET: &str = "24 * time.Hour";

/// The wrapper declaration, without a package clause.
pub const WRAPPER: &str = include_str!("../partials/nodeadline.go");

/// Appends the wrapper to a transformed file.
pub fn compose(transformed: &str) -> String {
    let mut out = String::with_capacity(transformed.len() + WRAPPER.len() + 1);
    out.push_str(transformed);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(WRAPPER);
    out
}

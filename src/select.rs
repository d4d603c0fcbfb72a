//! Task selection by pattern

use crate::config::TaskSet;
use crate::error::Result;
use crate::pattern::Pattern;

/// Names of all tasks matching `pattern`, in declaration order.
///
/// An empty result is not an error here; the caller decides.
pub fn select<'a>(pattern: &str, tasks: &'a TaskSet) -> Result<Vec<&'a str>> {
    let pattern = Pattern::new(pattern)?;
    Ok(select_compiled(&pattern, tasks))
}

/// Like [`select`] with an already compiled pattern
pub fn select_compiled<'a>(pattern: &Pattern, tasks: &'a TaskSet) -> Vec<&'a str> {
    tasks.names().filter(|name| pattern.matches(name)).collect()
}

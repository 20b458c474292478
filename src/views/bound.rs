/// Most executions a single view will surface.
pub const MAX_DISPLAYED_EXECUTIONS: usize = 100;

/// Keep only the trailing `limit` items, preserving their order.
pub fn keep_last<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if items.len() > limit {
        items.drain(..items.len() - limit);
    }
    items
}

/// Bound a flat execution list to the display window.
pub fn bound_executions<T>(items: Vec<T>) -> Vec<T> {
    keep_last(items, MAX_DISPLAYED_EXECUTIONS)
}

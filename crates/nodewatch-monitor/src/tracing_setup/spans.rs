//! Span definitions for the poll loop.

/// Create the span wrapping one poll cycle.
#[macro_export]
macro_rules! tick_span {
    ($tick:expr) => {
        tracing::info_span!("nodewatch.tick", tick = $tick)
    };
}

/// Create the span wrapping one notification delivery.
#[macro_export]
macro_rules! dispatch_span {
    ($kind:expr, $node:expr) => {
        tracing::debug_span!("nodewatch.dispatch", kind = %$kind, node = %$node)
    };
}

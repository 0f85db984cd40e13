//! Declaration shorthands for frames that manage several resources.

/// Declare a mutable [`CleanupStack`](crate::CleanupStack) with the given capacity.
///
/// ```
/// use scopestack::{cleanup_stack, push_cleanup};
///
/// let released = std::cell::Cell::new(0);
/// {
///     cleanup_stack!(stack, 2);
///     push_cleanup!(stack, { released.set(released.get() + 1) });
///     push_cleanup!(stack, "second", { released.set(released.get() + 1) });
///     assert_eq!(stack.len(), 2);
/// }
/// assert_eq!(released.get(), 2);
/// ```
#[macro_export]
macro_rules! cleanup_stack {
    ($name:ident, $capacity:expr) => {
        let mut $name = $crate::CleanupStack::<{ $capacity }>::new();
    };
    ($name:ident, $capacity:expr, $config:expr) => {
        let mut $name = $crate::CleanupStack::<{ $capacity }>::with_config($config);
    };
}

/// Register a block as the cleanup of the most recently acquired resource.
///
/// Works on a [`CleanupStack`](crate::CleanupStack) or a [`Scope`](crate::Scope).
/// An optional string literal before the block becomes the action's
/// description.
#[macro_export]
macro_rules! push_cleanup {
    ($stack:expr, $description:literal, $body:block) => {
        $stack.push_named($description, || $body)
    };
    ($stack:expr, $body:block) => {
        $stack.push(|| $body)
    };
}

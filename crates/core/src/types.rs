//! The unit of work a cleanup stack stores.

use std::fmt;

/// Teardown logic for one acquired resource.
///
/// Wraps a zero-argument closure together with an optional static description
/// that shows up in trace output. The closure may borrow from the frame that
/// registers it, hence the lifetime. Running consumes the action, so it can
/// run at most once.
pub struct CleanupAction<'a> {
    description: Option<&'static str>,
    run: Box<dyn FnOnce() + 'a>,
}

impl<'a> CleanupAction<'a> {
    /// Wrap an unnamed closure
    pub fn new<F>(run: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        Self {
            description: None,
            run: Box::new(run),
        }
    }

    /// Wrap a closure with a description of the resource it releases
    pub fn named<F>(description: &'static str, run: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        Self {
            description: Some(description),
            run: Box::new(run),
        }
    }

    /// Description given at registration, if any
    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    /// Release the resource
    pub fn run(self) {
        (self.run)();
    }
}

impl fmt::Debug for CleanupAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupAction")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

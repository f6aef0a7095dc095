//! Menu command handlers.

use std::fmt;
use std::sync::Arc;

/// A command attached to a leaf, run when the user activates it.
///
/// Handlers always run on the thread that calls the render entry point,
/// whichever thread registered them.
pub type Handler = Arc<dyn Fn() + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Debug helper so node and queue types can derive-print without the closure.
pub(crate) struct HandlerDebug<'a>(pub(crate) &'a Option<Handler>);

impl fmt::Debug for HandlerDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Some(<handler>)"),
            None => f.write_str("None"),
        }
    }
}

//! Per-call bundle of the host collaborators.

use quarry_core::{Clock, Host, PreResetSignal};

/// Borrowed host collaborators for one engine call.
///
/// Built by the host on its tick thread and handed to
/// [`crate::SyncResetRunner::run`] or [`crate::PagedResetScheduler::resume`].
pub struct ResetContext<'a, H, S: ?Sized, C: ?Sized> {
    /// World, roster and messaging.
    pub host: &'a mut H,
    /// Pre-reset veto.
    pub signal: &'a mut S,
    /// Monotonic time source.
    pub clock: &'a C,
}

impl<'a, H, S, C> ResetContext<'a, H, S, C>
where
    H: Host,
    S: PreResetSignal + ?Sized,
    C: Clock + ?Sized,
{
    /// Bundles the collaborators.
    pub fn new(host: &'a mut H, signal: &'a mut S, clock: &'a C) -> Self {
        Self {
            host,
            signal,
            clock,
        }
    }
}

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use types::{errors::ConsoleError, participant::ParticipantId};

/// In-flight lifecycle operations, one slot per participant. The console
/// rejects overlapping start/stop/refresh calls for the same id instead of
/// trusting the caller to serialize them. Operations on different
/// participants never contend.
#[derive(Default)]
pub(crate) struct OpGuard {
    in_flight: Mutex<HashSet<ParticipantId>>,
}

impl OpGuard {
    pub fn begin(&self, id: ParticipantId) -> Result<OpToken<'_>, ConsoleError> {
        let mut set = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !set.insert(id) {
            return Err(ConsoleError::OperationInFlight(id));
        }
        Ok(OpToken { guard: self, id })
    }
}

/// Released on drop, so every exit path of an operation frees its slot.
pub(crate) struct OpToken<'a> {
    guard: &'a OpGuard,
    id: ParticipantId,
}

impl Drop for OpToken<'_> {
    fn drop(&mut self) {
        self.guard
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

use carbonledger_core::SessionId;

/// Session context for a request.
///
/// This is immutable and must be present for all ledger routes; the
/// session owns its ledger exclusively.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
}

impl SessionContext {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}

use driver_port::SessionError;

/// Tri-state result of one poll attempt.
///
/// `NotReady` is a condition that evaluated cleanly to false; `Faulted` is a
/// driver fault raised mid-evaluation. The engine swallows and retries both,
/// but tests and trace lines can tell them apart.
#[derive(Debug)]
pub enum ProbeOutcome {
    Ready,
    NotReady,
    Faulted(SessionError),
}

impl ProbeOutcome {
    /// Collapse a fallible boolean check into a probe outcome.
    pub fn from_check(result: Result<bool, SessionError>) -> Self {
        match result {
            Ok(true) => ProbeOutcome::Ready,
            Ok(false) => ProbeOutcome::NotReady,
            Err(err) => ProbeOutcome::Faulted(err),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready)
    }
}

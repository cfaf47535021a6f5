//! Session state machine.
//!
//! The transition function is pure so it can be tested without a real
//! engine; side effects live in the session's event handlers.

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Connecting,
    Open,
    Paused,
}

/// Inputs that can move the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    StartRequested,
    EngineStarted,
    EngineError,
    EngineEnded,
    StopRequested,
}

/// Computes the next state. `pause_requested` is the session's `paused`
/// control flag: engine error/ended events while a pause was requested are
/// the expected consequence of pausing and land in `Paused`; without a
/// pause request they close the session.
pub fn next_state(current: SessionState, input: SessionInput, pause_requested: bool) -> SessionState {
    match input {
        SessionInput::StartRequested => SessionState::Connecting,
        SessionInput::EngineStarted => {
            if current == SessionState::Connecting {
                SessionState::Open
            } else {
                current
            }
        }
        SessionInput::EngineError | SessionInput::EngineEnded => {
            if pause_requested {
                SessionState::Paused
            } else {
                SessionState::Closed
            }
        }
        SessionInput::StopRequested => SessionState::Paused,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_moves_to_connecting_from_anywhere() {
        for from in [
            SessionState::Closed,
            SessionState::Paused,
            SessionState::Open,
        ] {
            assert_eq!(
                next_state(from, SessionInput::StartRequested, false),
                SessionState::Connecting
            );
        }
    }

    #[test]
    fn engine_started_only_opens_from_connecting() {
        assert_eq!(
            next_state(SessionState::Connecting, SessionInput::EngineStarted, false),
            SessionState::Open
        );
        // A stale started event after close does not reopen the session.
        assert_eq!(
            next_state(SessionState::Closed, SessionInput::EngineStarted, false),
            SessionState::Closed
        );
    }

    #[test]
    fn error_without_pause_request_closes() {
        assert_eq!(
            next_state(SessionState::Open, SessionInput::EngineError, false),
            SessionState::Closed
        );
        assert_eq!(
            next_state(SessionState::Open, SessionInput::EngineEnded, false),
            SessionState::Closed
        );
    }

    #[test]
    fn error_during_requested_pause_is_paused() {
        assert_eq!(
            next_state(SessionState::Open, SessionInput::EngineError, true),
            SessionState::Paused
        );
        assert_eq!(
            next_state(SessionState::Open, SessionInput::EngineEnded, true),
            SessionState::Paused
        );
    }

    #[test]
    fn stop_is_immediately_paused() {
        assert_eq!(
            next_state(SessionState::Open, SessionInput::StopRequested, true),
            SessionState::Paused
        );
    }
}

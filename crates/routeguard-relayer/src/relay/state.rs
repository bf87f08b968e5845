use routeguard_types::{RouteGuardError, RouteGuardResult};
use std::fmt;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayState {
    Idle,
    Validating,
    DemoRespond,
    ProductionDispatch,
    Completed,
    Failed,
}

impl RelayState {
    pub fn can_transition_to(&self, next: RelayState) -> bool {
        use RelayState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, DemoRespond)
                | (Validating, ProductionDispatch)
                | (Validating, Failed)
                | (DemoRespond, Completed)
                | (DemoRespond, Failed)
                | (ProductionDispatch, Completed)
                | (ProductionDispatch, Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RelayState::Completed | RelayState::Failed)
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelayState::Idle => "idle",
            RelayState::Validating => "validating",
            RelayState::DemoRespond => "demo-respond",
            RelayState::ProductionDispatch => "production-dispatch",
            RelayState::Completed => "completed",
            RelayState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Per-request walk through [`RelayState`].
#[derive(Debug)]
pub struct RelayLifecycle {
    operation: &'static str,
    state: RelayState,
}

impl RelayLifecycle {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            state: RelayState::Idle,
        }
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn advance(&mut self, next: RelayState) -> RouteGuardResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(RouteGuardError::Internal(format!(
                "illegal relay transition {} -> {} during {}",
                self.state, next, self.operation
            )));
        }
        debug!("{}: {} -> {}", self.operation, self.state, next);
        self.state = next;
        Ok(())
    }

    /// Moves to `Failed` and hands the error back for propagation.
    pub fn fail(&mut self, err: RouteGuardError) -> RouteGuardError {
        if self.state.can_transition_to(RelayState::Failed) {
            debug!("{}: {} -> failed ({})", self.operation, self.state, err);
            self.state = RelayState::Failed;
        }
        err
    }
}

//! Anonymous relay of report submissions and reward claims.

mod dispatcher;
mod request;
mod response;
mod state;
mod strategy;

pub use dispatcher::RelayDispatcher;
pub use request::{RawClaimRequest, RawSubmitRequest, ValidatedClaim, ValidatedSubmit};
pub use response::{Location, RelayResponse, RelayStatusResponse};
pub use state::{RelayLifecycle, RelayState};
pub use strategy::{LiveRelay, MockRelay, RelayStrategy, DEMO_RELAYER_ADDRESS};

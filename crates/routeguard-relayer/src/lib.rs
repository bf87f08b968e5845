#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod ledger;
pub mod relay;

pub use api::{build_router, ApiServer, AppState};
pub use config::{ApiConfig, LedgerConfig, LoggingConfig, RelayMode, RelayerConfig};
pub use ledger::{ClaimSubmission, LedgerGateway, ReportSubmission, StarknetGateway};
pub use relay::{
    LiveRelay, MockRelay, RawClaimRequest, RawSubmitRequest, RelayDispatcher, RelayResponse,
    RelayStatusResponse, RelayStrategy,
};

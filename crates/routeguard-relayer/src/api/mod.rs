mod handlers;
mod middleware;
mod responses;
mod server;

pub use handlers::AppState;
pub use middleware::{rate_limit, ApiRateLimiter, RateLimitResult, RateLimiterStats};
pub use responses::*;
pub use server::{build_router, ApiServer};

pub const DEFAULT_API_PORT: u16 = 8787;

pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;

pub const DEFAULT_RATE_LIMIT_BURST: u32 = 20;

pub const DEFAULT_RPC_URL: &str = "https://starknet-sepolia.public.blastapi.io";

pub const DEFAULT_NETWORK: &str = "starknet-sepolia";

pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 180;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

pub const MIN_BODY_SIZE: usize = 1024;

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod report;

pub mod constants {
    pub const FIELD_ELEMENT_SIZE: usize = 32;

    pub const COORDINATE_SCALE: f64 = 1e8;

    /// Keeps `degrees * COORDINATE_SCALE` well inside `i64`.
    pub const MAX_ABS_COORDINATE: f64 = 1e10;

    pub const DEFAULT_PASSPHRASE_WORDS: usize = 4;

    pub const PASSPHRASE_SEPARATOR: char = '-';

    pub const SALT_SUFFIX: &str = "_salt";

    /// Configuration value treated the same as an absent one.
    pub const NULL_SENTINEL: &str = "0x0";

    pub const EVENT_TYPE_COUNT: usize = 6;

    pub const REGARDS_DECIMALS: u8 = 18;
}

pub use constants::*;
pub use error::{RouteGuardError, RouteGuardResult};
pub use field::FieldElement;
pub use report::{scale_coordinate, unscale_coordinate, EventType, ReportRecord, ReportStatus};

/// True when a configured value is missing, blank, or the null sentinel.
pub fn is_null_sentinel(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => true,
        Some(v) if v == NULL_SENTINEL => true,
        Some(v) => FieldElement::parse(v).map(|f| f.is_zero()).unwrap_or(false),
    }
}

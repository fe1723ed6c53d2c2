/// Fractional digits kept for every persisted monetary amount.
pub const DECIMAL_PRECISION: u32 = 5;

/// Fractional digits kept for allocation percentages.
pub const PERCENTAGE_PRECISION: u32 = 10;

/// Sequence number of the funding transaction in a product schedule.
pub const FUNDING_SEQUENCE: i32 = 0;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Money value - uses Decimal so pennies never drift
pub type Money = Decimal;

/// Distance in metres as reported by the odometer
pub type Metres = Decimal;

/// Elapsed time in seconds (millisecond precision)
pub type Seconds = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Seconds elapsed between two instants, at millisecond precision.
///
/// Negative when `to` is earlier than `from` (a clock that stepped backwards);
/// callers decide whether that is acceptable.
pub fn elapsed_seconds(from: Timestamp, to: Timestamp) -> Seconds {
    Decimal::new((to - from).num_milliseconds(), 3)
}

//! Taximeter Tariffs
//!
//! Pricing schedules and the rules that decide which one applies:
//!
//! - **Tariff**: flag-fall plus a low and a high increment tier
//! - **TariffTimeFilter**: day/hour windows and public holiday handling
//! - **TariffLookup**: the deployment's tariff set; exactly one applies at any instant
//! - **Calendars**: public holiday sources consulted by the filters
//! - **Rate cards**: JSON tariff tables, two of which are embedded
//!
//! ## Resolution
//!
//! ```text
//!   instant (UTC)
//!        │  + rate card zone (named, or a fixed offset)
//!        ▼
//!   local date/time ──► HolidayCalendar ──► is_holiday
//!        │                                      │
//!        └──────────────┬───────────────────────┘
//!                       ▼
//!        TariffTimeFilter::applies (per tariff)
//!                       │
//!                       ▼
//!            exactly one Tariff, or ConfigurationError
//! ```

pub mod calendar;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod rate_card;
pub mod tariff;

pub use calendar::{EnglandBankHolidays, HolidaySet, NoHolidays};
pub use error::{ConfigurationError, Result};
pub use filter::{DaySet, DayWindow, HolidayRule, TariffTimeFilter};
pub use lookup::{LocalZone, TariffLookup};
pub use rate_card::RateCard;
pub use tariff::{FlagFall, Tariff, Tier, TierKind};

mod fare;
mod journey;
mod meter_state;

pub use fare::Fare;
pub use journey::Journey;
pub use meter_state::MeterState;

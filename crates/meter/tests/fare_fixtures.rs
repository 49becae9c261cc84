//! London 2017 fares observed through a running meter
//!
//! The clock and odometer are driven by the test; the meter's own poller
//! picks up the readings.

use std::sync::Arc;
use std::thread;
use std::time::{Duration as StdDuration, Instant};

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Europe::London;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taximeter_clock::ManualClock;
use taximeter_core::{Money, Timestamp};
use taximeter_meter::{Meter, MeterConfig, SimulatedOdometer};

struct Rig {
    meter: Meter,
    clock: Arc<ManualClock>,
    odometer: Arc<SimulatedOdometer>,
}

fn rig(start: Timestamp) -> Rig {
    let clock = Arc::new(ManualClock::new(start));
    let odometer = Arc::new(SimulatedOdometer::new());
    let meter = Meter::tfl_2017(
        odometer.clone(),
        clock.clone(),
        MeterConfig { tick_interval_ms: 10 },
    )
    .unwrap();
    meter.start_journey().unwrap();
    Rig {
        meter,
        clock,
        odometer,
    }
}

/// Friday 29 September 2017, London wall-clock time (summer time)
fn friday(h: u32, m: u32) -> Timestamp {
    London
        .with_ymd_and_hms(2017, 9, 29, h, m, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Wait for a few completed ticks so the meter has seen the latest readings
fn settle(meter: &Meter) {
    let target = meter.poller_stats().ticks + 3;
    let deadline = Instant::now() + StdDuration::from_secs(5);
    while meter.poller_stats().ticks < target {
        assert!(Instant::now() < deadline, "poller stalled");
        thread::sleep(StdDuration::from_millis(5));
    }
}

fn amount(meter: &Meter) -> Money {
    meter.current_amount().unwrap_or(Decimal::ZERO)
}

#[test]
fn day_tariff_distance() {
    let rig = rig(friday(9, 0));
    assert_eq!(amount(&rig.meter), dec!(2.60));

    rig.odometer.set(dec!(234.0));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.60));

    rig.odometer.set(dec!(235.1));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.80));

    rig.meter.end_journey().unwrap();
}

#[test]
fn day_tariff_waiting_time() {
    let rig = rig(friday(9, 0));

    rig.clock.advance(Duration::seconds(30));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.60));

    rig.clock.advance(Duration::seconds(30));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.80));

    rig.meter.end_journey().unwrap();
}

#[test]
fn evening_tariff_distance() {
    let rig = rig(friday(20, 1));
    assert_eq!(rig.meter.current_fare().unwrap().tariff, "tariff-2");

    rig.odometer.set(dec!(190.5));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.60));

    rig.odometer.set(dec!(191.1));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.80));

    rig.meter.end_journey().unwrap();
}

#[test]
fn night_tariff_distance() {
    let rig = rig(friday(22, 1));
    assert_eq!(rig.meter.current_fare().unwrap().tariff, "tariff-3");

    rig.odometer.set(dec!(162.3));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.60));

    rig.odometer.set(dec!(162.5));
    settle(&rig.meter);
    assert_eq!(amount(&rig.meter), dec!(2.80));

    rig.meter.end_journey().unwrap();
}

#[test]
fn evening_tariff_follows_london_summer_time() {
    // 19:30 UTC is 20:30 in London
    let rig = rig(Utc.with_ymd_and_hms(2017, 9, 29, 19, 30, 0).unwrap());
    assert_eq!(rig.meter.current_fare().unwrap().tariff, "tariff-2");
    rig.meter.end_journey().unwrap();
}

#[test]
fn bank_holiday_uses_night_tariff() {
    // Christmas Day 2017, mid-morning
    let start = Utc.with_ymd_and_hms(2017, 12, 25, 10, 0, 0).unwrap();
    let rig = rig(start);

    assert_eq!(rig.meter.current_fare().unwrap().tariff, "tariff-3");
    rig.meter.end_journey().unwrap();
}

#[test]
fn fare_never_decreases_across_tariff_change() {
    // Start just before 20:00 on the day tariff, cross into the evening tariff
    let rig = rig(friday(19, 55));

    rig.odometer.set(dec!(1000));
    settle(&rig.meter);
    let before = amount(&rig.meter);
    assert!(before > dec!(2.60));

    rig.clock.set(friday(20, 0));
    settle(&rig.meter);
    let after = amount(&rig.meter);
    assert!(after >= before);

    rig.meter.end_journey().unwrap();
}

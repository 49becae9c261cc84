//! Partition properties of the embedded rate cards
//!
//! For any instant, holiday or not, exactly one tariff of each card applies.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::London;
use proptest::prelude::*;
use taximeter_ports::HolidayCalendar;
use taximeter_tariff::{EnglandBankHolidays, HolidaySet, RateCard, TariffLookup};

fn lookup(card: &str, calendar: Arc<dyn HolidayCalendar>) -> TariffLookup {
    RateCard::embedded(card)
        .unwrap()
        .into_lookup(calendar)
        .unwrap()
}

/// Week of Monday 25 December 2017, with Christmas and Boxing Day as holidays
fn christmas_week() -> Arc<HolidaySet> {
    Arc::new(HolidaySet::new([
        NaiveDate::from_ymd_opt(2017, 12, 25).unwrap(),
        NaiveDate::from_ymd_opt(2017, 12, 26).unwrap(),
    ]))
}

#[test]
fn every_minute_of_a_holiday_week_resolves_exactly_once() {
    let start = Utc.with_ymd_and_hms(2017, 12, 25, 0, 0, 0).unwrap();

    for card in RateCard::embedded_names() {
        let lookup = lookup(card, christmas_week());
        for minute in 0..(7 * 24 * 60) {
            let at = start + Duration::minutes(minute);
            let local = lookup.local_time(at);
            let is_holiday = minute < 2 * 24 * 60;

            let matching = lookup
                .tariffs()
                .iter()
                .filter(|t| t.applies(local, is_holiday))
                .count();
            assert_eq!(matching, 1, "{} at {}", card, at);
            assert!(lookup.resolve(at).is_ok(), "{} at {}", card, at);
        }
    }
}

#[test]
fn holidays_are_priced_on_the_night_tariff() {
    let lookup = lookup("tfl-2017", christmas_week());
    let christmas_noon = Utc.with_ymd_and_hms(2017, 12, 25, 12, 0, 0).unwrap();
    let ordinary_noon = Utc.with_ymd_and_hms(2017, 12, 27, 12, 0, 0).unwrap();

    assert_eq!(lookup.resolve(christmas_noon).unwrap().name, "tariff-3");
    assert_eq!(lookup.resolve(ordinary_noon).unwrap().name, "tariff-1");
}

#[test]
fn schedule_boundaries_on_a_friday() {
    let lookup = lookup("tfl-2017", Arc::new(EnglandBankHolidays));
    // London summer time: the windows follow the clock on the wall
    let at = |h, m| {
        London
            .with_ymd_and_hms(2017, 9, 29, h, m, 0)
            .unwrap()
            .with_timezone(&Utc)
    };

    assert_eq!(lookup.resolve(at(4, 59)).unwrap().name, "tariff-3");
    assert_eq!(lookup.resolve(at(5, 0)).unwrap().name, "tariff-1");
    assert_eq!(lookup.resolve(at(19, 59)).unwrap().name, "tariff-1");
    assert_eq!(lookup.resolve(at(20, 0)).unwrap().name, "tariff-2");
    assert_eq!(lookup.resolve(at(21, 59)).unwrap().name, "tariff-2");
    assert_eq!(lookup.resolve(at(22, 0)).unwrap().name, "tariff-3");
}

#[test]
fn every_minute_across_the_clock_changes_resolves_exactly_once() {
    // Sundays 26 March and 29 October 2017
    let days = [
        Utc.with_ymd_and_hms(2017, 3, 25, 12, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2017, 10, 28, 12, 0, 0).unwrap(),
    ];

    for card in RateCard::embedded_names() {
        let lookup = lookup(card, Arc::new(EnglandBankHolidays));
        for start in days {
            for minute in 0..(2 * 24 * 60) {
                let at = start + Duration::minutes(minute);
                assert!(lookup.resolve(at).is_ok(), "{} at {}", card, at);
            }
        }
    }
}

proptest! {
    #[test]
    fn any_instant_resolves_in_london_time(
        seconds in 0i64..(4 * 365 * 24 * 3600),
        card_index in 0usize..2,
    ) {
        let card = RateCard::embedded_names()[card_index];
        let lookup = lookup(card, Arc::new(EnglandBankHolidays));
        let at = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds);

        prop_assert_eq!(lookup.local_time(at), at.with_timezone(&London).naive_local());
        prop_assert!(lookup.resolve(at).is_ok());
    }

    #[test]
    fn any_instant_resolves_to_exactly_one_tariff(
        seconds in 0i64..(4 * 365 * 24 * 3600),
        offset_hours in -12i32..=12,
        card_index in 0usize..2,
    ) {
        let card = RateCard::embedded_names()[card_index];
        let lookup = RateCard::embedded(card)
            .unwrap()
            .with_utc_offset_minutes(offset_hours * 60)
            .into_lookup(Arc::new(EnglandBankHolidays))
            .unwrap();
        let at = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds);

        let local = lookup.local_time(at);
        let is_holiday = EnglandBankHolidays.is_public_holiday(local.date());
        let matching = lookup
            .tariffs()
            .iter()
            .filter(|t| t.applies(local, is_holiday))
            .count();

        prop_assert_eq!(matching, 1);
        prop_assert!(lookup.resolve(at).is_ok());
    }
}

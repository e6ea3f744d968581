//! Resampling across calendar boundaries

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::*;
use sim::resample::{resample, resample_ladder};
use sim::{Candle, Series, Timeframe};

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Daily candles labeled at each midnight, price rising by one per day
fn daily_series(origin: DateTime<Utc>, days: i64) -> Series {
    let candles = (0..days)
        .map(|k| {
            let open = 100.0 + k as f64;
            Candle::new(origin + Duration::days(k + 1), open, open + 2.0, open - 1.0, open + 1.0)
        })
        .collect();
    Series::new(Timeframe::D1, candles)
}

#[fixture]
fn origin() -> DateTime<Utc> {
    // Saturday
    at(2000, 1, 1, 0)
}

#[rstest]
fn test_weeks_close_on_monday(origin: DateTime<Utc>) {
    let weekly = resample(&daily_series(origin, 10), Timeframe::W1, origin).unwrap();

    let labels: Vec<DateTime<Utc>> = weekly.iter().map(|c| c.timestamp).collect();
    assert_eq!(labels, vec![at(2000, 1, 3, 0), at(2000, 1, 10, 0), at(2000, 1, 17, 0)]);

    // Jan 2 and Jan 3 labels fall in the first (partial) week
    let first = weekly.candles()[0];
    assert_eq!((first.open, first.close), (100.0, 102.0));
    // Jan 4 through Jan 10 make a full week
    let second = weekly.candles()[1];
    assert_eq!((second.open, second.high, second.low, second.close), (102.0, 110.0, 101.0, 109.0));
}

#[rstest]
fn test_months_close_on_the_first(origin: DateTime<Utc>) {
    // 2000 is a leap year: Jan 31 + Feb 29 + Mar 31 = 91 days
    let monthly = resample(&daily_series(origin, 91), Timeframe::MN1, origin).unwrap();

    let labels: Vec<DateTime<Utc>> = monthly.iter().map(|c| c.timestamp).collect();
    assert_eq!(labels, vec![at(2000, 2, 1, 0), at(2000, 3, 1, 0), at(2000, 4, 1, 0)]);

    let february = monthly.candles()[1];
    assert_eq!(february.open, 100.0 + 31.0);
    assert_eq!(february.close, 100.0 + 60.0);
}

#[rstest]
fn test_three_day_bins_anchor_at_origin() {
    // Wednesday origin, not a multiple of three days from the epoch
    let origin = at(2020, 1, 1, 0);
    let three_day = resample(&daily_series(origin, 7), Timeframe::D3, origin).unwrap();

    let labels: Vec<DateTime<Utc>> = three_day.iter().map(|c| c.timestamp).collect();
    assert_eq!(labels, vec![at(2020, 1, 4, 0), at(2020, 1, 7, 0), at(2020, 1, 10, 0)]);
    assert_eq!(three_day.candles()[2].open, 106.0);
}

#[rstest]
#[case(Timeframe::M5, 288)]
#[case(Timeframe::H1, 24)]
#[case(Timeframe::H4, 6)]
#[case(Timeframe::D1, 1)]
fn test_fixed_bins_from_minutes(origin: DateTime<Utc>, #[case] target: Timeframe, #[case] expected: usize) {
    let minutes = (0..1440)
        .map(|k| Candle::flat(origin + Duration::minutes(k + 1), 50.0))
        .collect();
    let series = Series::new(Timeframe::M1, minutes);

    let resampled = resample(&series, target, origin).unwrap();
    assert_eq!(resampled.len(), expected);
    assert_eq!(resampled.last().map(|c| c.timestamp), Some(origin + Duration::days(1)));
}

#[rstest]
fn test_ladder_levels_are_strictly_increasing(origin: DateTime<Utc>) {
    let minutes = (0..40 * 1440)
        .map(|k| {
            let price = 10.0 + (k % 97) as f64;
            Candle::new(origin + Duration::minutes(k + 1), price, price + 1.0, price - 1.0, price + 0.5)
        })
        .collect();

    let family = resample_ladder(Series::new(Timeframe::M1, minutes), origin, 10).unwrap();

    for (timeframe, series) in family.iter() {
        assert!(
            series.candles().windows(2).all(|pair| pair[0].timestamp < pair[1].timestamp),
            "{timeframe} labels are not strictly increasing"
        );
    }
    assert_eq!(family.get(Timeframe::D1).map(Series::len), Some(40));
    assert_eq!(family.get(Timeframe::D3).map(Series::len), Some(14));
    // weeks are built from 3D labels, the first of which is Jan 4
    assert_eq!(family.get(Timeframe::W1).and_then(|s| s.first()).map(|c| c.timestamp), Some(at(2000, 1, 10, 0)));
    assert_eq!(family.get(Timeframe::MN1).map(Series::len), Some(2));
}

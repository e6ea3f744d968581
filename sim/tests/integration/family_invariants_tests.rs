//! Invariants of a full 120 day family

use rstest::*;
use sim::{Candle, GenerationParameters, LADDER, SeriesFamily, Timeframe, generate};
use std::sync::OnceLock;

/// One 120 day family shared by every test in this file
fn family() -> &'static SeriesFamily {
    static FAMILY: OnceLock<SeriesFamily> = OnceLock::new();
    FAMILY.get_or_init(|| {
        let params = GenerationParameters {
            ticks_per_candle: 1,
            ..Default::default()
        };
        generate(&params).expect("default parameters generate")
    })
}

fn origin() -> chrono::DateTime<chrono::Utc> {
    GenerationParameters::default().origin().unwrap()
}

#[rstest]
#[case(Timeframe::M1, 172_800)]
#[case(Timeframe::M5, 34_560)]
#[case(Timeframe::M15, 11_520)]
#[case(Timeframe::M30, 5_760)]
#[case(Timeframe::H1, 2_880)]
#[case(Timeframe::H2, 1_440)]
#[case(Timeframe::H4, 720)]
#[case(Timeframe::D1, 120)]
#[case(Timeframe::D3, 40)]
#[case(Timeframe::W1, 17)]
#[case(Timeframe::MN1, 4)]
fn test_series_lengths(#[case] timeframe: Timeframe, #[case] expected: usize) {
    let series = family().get(timeframe).unwrap();
    assert_eq!(series.len(), expected, "{timeframe}");
    assert_eq!(series.timeframe, timeframe);
}

#[test]
fn test_every_candle_is_consistent() {
    assert_eq!(family().len(), LADDER.len());
    for (timeframe, series) in family().iter() {
        assert_eq!(series.find_inconsistent(), None, "{timeframe} has an inconsistent candle");
    }
}

#[test]
fn test_base_series_is_continuous() {
    let base = family().base().unwrap();
    assert_eq!(base.find_discontinuity(1e-9), None);
}

#[test]
fn test_prices_lie_in_scale_band() {
    let family = family();
    let scale = f64::from(family.price_scale);
    assert!((9..999).contains(&family.price_scale));

    let (low, high) = family.base().unwrap().price_range().unwrap();
    assert_eq!(low, 0.0);
    assert_eq!(high, scale);

    for (_, series) in family.iter() {
        let (low, high) = series.price_range().unwrap();
        assert!(low >= 0.0 && high <= scale);
    }
}

#[test]
fn test_prices_have_four_decimals() {
    let base = family().base().unwrap();
    for candle in base.iter().take(5_000) {
        for value in [candle.open, candle.high, candle.low, candle.close] {
            assert_eq!((value * 10_000.0).round() / 10_000.0, value);
        }
    }
}

#[test]
fn test_labels_follow_the_time_model() {
    let family = family();
    let base = family.base().unwrap();
    let origin = origin();

    assert_eq!(base.first().map(|c| c.timestamp), Some(origin + chrono::Duration::minutes(1)));
    assert_eq!(base.last().map(|c| c.timestamp), Some(origin + chrono::Duration::days(120)));

    let weekly = family.get(Timeframe::W1).unwrap();
    assert!(weekly.iter().all(|c| c.timestamp.format("%a %H:%M").to_string() == "Mon 00:00"));
    let monthly = family.get(Timeframe::MN1).unwrap();
    assert!(monthly.iter().all(|c| c.timestamp.format("%d %H:%M").to_string() == "01 00:00"));
}

#[test]
fn test_levels_aggregate_their_predecessor() {
    let family = family();
    let origin = origin();

    for (timeframe, coarse) in family.iter().skip(1) {
        let finer = timeframe.finer().unwrap();
        let fine = family.get(finer).unwrap();

        let mut offset = 0;
        for candle in coarse {
            let run_len = fine.candles()[offset..]
                .iter()
                .take_while(|c| timeframe.bin_end(c.timestamp, origin) == Some(candle.timestamp))
                .count();
            let run = &fine.candles()[offset..offset + run_len];

            assert_eq!(Candle::aggregate(run, candle.timestamp).as_ref(), Some(candle), "{timeframe} from {finer}");
            offset += run_len;
        }
        assert_eq!(offset, fine.len());

        // first open and last close carry through every level
        assert_eq!(coarse.first().map(|c| c.open), fine.first().map(|c| c.open));
        assert_eq!(coarse.last().map(|c| c.close), fine.last().map(|c| c.close));
    }
}

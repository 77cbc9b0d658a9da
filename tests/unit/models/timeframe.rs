//! Unit tests for timeframe parsing

use chrono::Duration;
use confluence::models::Timeframe;

#[test]
fn test_parse_all_timeframes() {
    for raw in ["1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w"] {
        let tf: Timeframe = raw.parse().unwrap();
        assert_eq!(tf.to_string(), raw);
    }
}

#[test]
fn test_unknown_timeframe_rejected() {
    assert!("2d".parse::<Timeframe>().is_err());
    assert!("".parse::<Timeframe>().is_err());
}

#[test]
fn test_durations() {
    assert_eq!(Timeframe::M15.duration(), Duration::minutes(15));
    assert_eq!(Timeframe::H4.duration(), Duration::hours(4));
    assert_eq!(Timeframe::W1.duration(), Duration::days(7));
}

#[test]
fn test_serde_as_string() {
    assert_eq!(serde_json::to_string(&Timeframe::H1).unwrap(), "\"1h\"");
    let tf: Timeframe = serde_json::from_str("\"1d\"").unwrap();
    assert_eq!(tf, Timeframe::D1);
    assert!(serde_json::from_str::<Timeframe>("\"7m\"").is_err());
}

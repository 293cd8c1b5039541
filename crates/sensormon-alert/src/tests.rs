use crate::{evaluate, Thresholds};
use sensormon_common::types::{Reading, SensorSnapshot};

fn make_snapshot(temperature: f64, humidity: f64) -> SensorSnapshot {
    let reading = Reading {
        sensor_id: "sensor-1".to_string(),
        location: "warehouse-a".to_string(),
        temperature,
        humidity,
        timestamp: "2024-06-01T12:00:00Z".to_string(),
    };
    SensorSnapshot {
        sensor_id: reading.sensor_id.clone(),
        location: reading.location.clone(),
        avg_temperature: temperature,
        avg_humidity: humidity,
        last_update: reading.timestamp.clone(),
        reading_count: 1,
        latest: reading,
    }
}

#[test]
fn temperature_breach_fires_alone() {
    let alert = evaluate(&make_snapshot(36.0, 50.0), &Thresholds::default());
    let alert = alert.expect("36.0°C should breach the 35.0 default");
    assert_eq!(alert.reasons, vec!["High temperature: 36.0°C".to_string()]);
    assert_eq!(alert.sensor_id, "sensor-1");
    assert_eq!(alert.timestamp, "2024-06-01T12:00:00Z");
}

#[test]
fn humidity_breach_fires_alone() {
    let alert = evaluate(&make_snapshot(20.0, 95.0), &Thresholds::default());
    let alert = alert.expect("95.0% should breach the 90.0 default");
    assert_eq!(alert.reasons, vec!["High humidity: 95.0%".to_string()]);
}

#[test]
fn both_breaches_fire_in_one_alert_temperature_first() {
    let alert = evaluate(&make_snapshot(40.0, 95.0), &Thresholds::default());
    let alert = alert.expect("both checks should fire");
    assert_eq!(
        alert.reasons,
        vec![
            "High temperature: 40.0°C".to_string(),
            "High humidity: 95.0%".to_string()
        ]
    );
    assert_eq!(alert.reason(), "High temperature: 40.0°C, High humidity: 95.0%");
}

#[test]
fn no_breach_returns_none() {
    assert!(evaluate(&make_snapshot(30.0, 50.0), &Thresholds::default()).is_none());
}

#[test]
fn thresholds_are_exclusive_bounds() {
    // Exactly at the threshold is not a breach.
    assert!(evaluate(&make_snapshot(35.0, 90.0), &Thresholds::default()).is_none());
}

#[test]
fn evaluation_is_pure() {
    let snapshot = make_snapshot(36.0, 50.0);
    let thresholds = Thresholds::default();
    let first = evaluate(&snapshot, &thresholds).expect("breach");
    // Unrelated evaluations in between must not change the decision.
    for _ in 0..5 {
        evaluate(&make_snapshot(10.0, 10.0), &thresholds);
    }
    let second = evaluate(&snapshot, &thresholds).expect("breach");
    assert_eq!(first.reasons, second.reasons);
    assert_eq!(first.temperature, second.temperature);
}

#[test]
fn custom_thresholds_are_honored() {
    let thresholds = Thresholds {
        temp_threshold: 20.0,
        humidity_threshold: 40.0,
    };
    let alert = evaluate(&make_snapshot(25.0, 30.0), &thresholds).expect("breach at 20.0");
    assert_eq!(alert.reasons, vec!["High temperature: 25.0°C".to_string()]);
}

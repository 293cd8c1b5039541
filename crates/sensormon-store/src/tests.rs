use crate::alert_log::AlertLog;
use crate::WindowStore;
use sensormon_common::types::{Alert, Reading};
use std::sync::{Arc, Mutex};

fn make_reading(sensor_id: &str, temperature: f64, humidity: f64, seq: u32) -> Reading {
    Reading {
        sensor_id: sensor_id.to_string(),
        location: "warehouse-a".to_string(),
        temperature,
        humidity,
        timestamp: format!("2024-06-01T12:00:{seq:02}Z"),
    }
}

fn make_alert(sensor_id: &str, seq: u32) -> Alert {
    Alert {
        sensor_id: sensor_id.to_string(),
        location: "warehouse-a".to_string(),
        temperature: 40.0,
        humidity: 50.0,
        timestamp: format!("2024-06-01T12:00:{seq:02}Z"),
        reasons: vec![format!("High temperature: 40.0°C #{seq}")],
    }
}

#[test]
fn window_len_is_min_of_total_and_capacity() {
    let mut store = WindowStore::new(5);
    for i in 0..12 {
        let snapshot = store.update(make_reading("s1", 20.0, 50.0, i));
        assert_eq!(snapshot.reading_count, ((i + 1) as usize).min(5));
    }
}

#[test]
fn averages_reflect_only_retained_readings_after_eviction() {
    // Capacity 3, feed 5 readings: averages must cover only the last 3.
    let mut store = WindowStore::new(3);
    let temps = [10.0, 20.0, 30.0, 40.0, 50.0];
    let hums = [80.0, 70.0, 60.0, 50.0, 40.0];
    let mut last = None;
    for (i, (&t, &h)) in temps.iter().zip(hums.iter()).enumerate() {
        last = Some(store.update(make_reading("s1", t, h, i as u32)));
    }
    let snapshot = last.unwrap();
    assert_eq!(snapshot.reading_count, 3);
    assert!((snapshot.avg_temperature - 40.0).abs() < 1e-9);
    assert!((snapshot.avg_humidity - 50.0).abs() < 1e-9);
}

#[test]
fn update_overwrites_location_and_last_update() {
    let mut store = WindowStore::new(10);
    store.update(make_reading("s1", 20.0, 50.0, 0));
    let mut moved = make_reading("s1", 21.0, 51.0, 1);
    moved.location = "warehouse-b".to_string();
    let snapshot = store.update(moved);
    assert_eq!(snapshot.location, "warehouse-b");
    assert_eq!(snapshot.last_update, "2024-06-01T12:00:01Z");
}

#[test]
fn windows_are_created_lazily_and_kept_per_sensor() {
    let mut store = WindowStore::new(10);
    assert_eq!(store.sensor_count(), 0);
    store.update(make_reading("s1", 20.0, 50.0, 0));
    store.update(make_reading("s2", 30.0, 60.0, 0));
    store.update(make_reading("s1", 22.0, 52.0, 1));
    assert_eq!(store.sensor_count(), 2);

    let all = store.snapshot_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all["s1"].reading_count, 2);
    assert_eq!(all["s2"].reading_count, 1);
    assert!(store.snapshot("s3").is_none());
}

#[test]
fn snapshot_all_is_a_copy_not_a_live_view() {
    let mut store = WindowStore::new(10);
    store.update(make_reading("s1", 20.0, 50.0, 0));
    let before = store.snapshot_all();
    store.update(make_reading("s1", 100.0, 100.0, 1));
    assert_eq!(before["s1"].reading_count, 1);
    assert!((before["s1"].avg_temperature - 20.0).abs() < 1e-9);
}

#[test]
fn alert_log_never_exceeds_capacity_and_keeps_newest() {
    let mut log = AlertLog::new(100);
    for i in 0..110 {
        log.record(make_alert("s1", i));
    }
    assert_eq!(log.len(), 100);

    let recent = log.recent();
    assert_eq!(recent.len(), 100);
    // Oldest 10 evicted, insertion order preserved, newest last.
    assert!(recent[0].reasons[0].ends_with("#10"));
    assert!(recent[99].reasons[0].ends_with("#109"));
}

#[test]
fn alert_log_recent_is_a_snapshot() {
    let mut log = AlertLog::new(10);
    log.record(make_alert("s1", 0));
    let recent = log.recent();
    log.record(make_alert("s1", 1));
    assert_eq!(recent.len(), 1);
    assert_eq!(log.len(), 2);
}

#[test]
fn concurrent_readers_never_observe_torn_updates() {
    // Every reading carries temperature 20.0, so any snapshot whose count and
    // running sum were updated atomically has an average of exactly 20.0. A
    // torn read (count advanced, sum not) would show up as a different value.
    let store = Arc::new(Mutex::new(WindowStore::new(50)));

    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            for i in 0..2000u32 {
                let sensor = format!("s{}", i % 4);
                store
                    .lock()
                    .unwrap()
                    .update(make_reading(&sensor, 20.0, 60.0, i % 60));
            }
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    let all = store.lock().unwrap().snapshot_all();
                    for snapshot in all.values() {
                        assert!(snapshot.reading_count >= 1);
                        assert!(snapshot.reading_count <= 50);
                        assert!(
                            (snapshot.avg_temperature - 20.0).abs() < 1e-9,
                            "torn read: count={} avg={}",
                            snapshot.reading_count,
                            snapshot.avg_temperature
                        );
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

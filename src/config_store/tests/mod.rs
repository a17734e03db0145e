//! Unit tests for config_store module
//! No filesystem, timing, or external dependencies.

#![allow(clippy::panic, clippy::unwrap_used)]


use std::{sync::Arc, thread};

use crate::config_store::{ConfigPatch, ConfigRecord, ConfigStore, PowerTransition};

fn record(turned_on: bool, collect_freq: i64, send_freq: i64) -> ConfigRecord {
    ConfigRecord {
        turned_on,
        collect_freq,
        send_freq,
    }
}

#[test]
fn new_store_starts_empty() {
    let store = ConfigStore::new();

    assert!(!store.turned_on());
    assert_eq!(store.collect_freq(), 0);
    assert_eq!(store.send_freq(), 0);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn accessors_touch_only_their_field() {
    let store = ConfigStore::with_record(record(false, 7, 9));

    store.set_turned_on(true);
    assert_eq!(store.snapshot(), record(true, 7, 9));

    store.set_collect_freq(11);
    assert_eq!(store.snapshot(), record(true, 11, 9));

    store.set_send_freq(13);
    assert_eq!(store.snapshot(), record(true, 11, 13));
}

#[test]
fn clones_share_the_same_record() {
    let store = ConfigStore::new();
    let other = store.clone();

    other.set_collect_freq(42);

    assert_eq!(store.collect_freq(), 42);
}

#[test]
fn concurrent_accessors_never_tear() {
    const WRITERS: i64 = 8;
    const ROUNDS: i64 = 2_000;

    let store = Arc::new(ConfigStore::new());
    let mut handles = Vec::new();

    for writer in 1..=WRITERS {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for round in 0..ROUNDS {
                let value = writer * 1_000_000 + round;
                store.set_collect_freq(value);
                store.set_send_freq(value);
                store.set_turned_on(round % 2 == 0);
            }
        }));
    }

    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..ROUNDS {
                for value in [store.collect_freq(), store.send_freq()] {
                    let writer = value / 1_000_000;
                    let round = value % 1_000_000;
                    assert!(value == 0 || ((1..=WRITERS).contains(&writer) && round < ROUNDS));
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn commit_snapshots_are_never_mixed() {
    let store = Arc::new(ConfigStore::new());
    let mut handles = Vec::new();

    for writer in 1..=4_i64 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..1_000 {
                store.commit(|_| record(writer % 2 == 0, writer, writer * 10));
            }
        }));
    }

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..4_000 {
                let snapshot = store.snapshot();
                if snapshot != ConfigRecord::default() {
                    assert_eq!(snapshot.send_freq, snapshot.collect_freq * 10);
                    assert_eq!(snapshot.turned_on, snapshot.collect_freq % 2 == 0);
                }
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    reader.join().unwrap();
}

#[test]
fn commit_reports_previous_and_current() {
    let store = ConfigStore::with_record(record(true, 1, 2));
    let mut sub = store.subscribe_key("sensor-loop");

    let transition = store.commit(|_| record(false, 30, 5));

    assert_eq!(transition.previous, record(true, 1, 2));
    assert_eq!(transition.current, record(false, 30, 5));
    assert_eq!(transition.report.delivered, 1);
    assert!(sub.try_changed());
    assert_eq!(store.snapshot(), record(false, 30, 5));
}

#[test]
fn fan_out_reaches_every_unique_key_once() {
    let store = ConfigStore::new();
    let mut subs: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|key| store.subscribe_key(key))
        .collect();

    let report = store.publish_change();

    assert_eq!(report.delivered, 3);
    for sub in &mut subs {
        assert!(sub.try_changed(), "{} missed the change", sub.key());
        assert!(!sub.try_changed(), "{} was notified twice", sub.key());
    }
}

#[test]
fn overwritten_key_is_not_notified_on_stale_channel() {
    let store = ConfigStore::new();
    let mut stale = store.subscribe_key("net-loop");
    let mut fresh = store.subscribe_key("net-loop");

    store.publish_change();

    assert_eq!(store.subscriber_count(), 1);
    assert!(fresh.try_changed());
    assert!(!stale.try_changed());
}

#[test]
fn resubscribing_same_channel_keeps_one_registration() {
    let store = ConfigStore::new();
    let (channel, mut sub) = crate::config_store::Subscription::channel("sensor-loop");

    store.subscribe("sensor-loop", channel.clone());
    store.subscribe("sensor-loop", channel);

    let report = store.publish_change();

    assert_eq!(store.subscriber_count(), 1);
    assert_eq!(report.delivered, 1);
    assert!(sub.try_changed());
    assert!(!sub.try_changed());
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = ConfigStore::new();
    let mut sub = store.subscribe_key("sensor-loop");

    assert!(store.unsubscribe("sensor-loop"));
    assert!(!store.unsubscribe("sensor-loop"));

    store.publish_change();
    assert!(!sub.try_changed());
}

#[test]
fn patch_merge_keeps_absent_fields() {
    let current = record(true, 10, 2);
    let patch = ConfigPatch {
        collect_freq: Some(30),
        ..ConfigPatch::default()
    };

    assert_eq!(patch.merge_onto(&current), record(true, 30, 2));
    assert!(ConfigPatch::default().is_empty());
    assert_eq!(ConfigPatch::default().merge_onto(&current), current);
}

#[test]
fn power_transition_between_records() {
    let on = record(true, 0, 0);
    let off = record(false, 0, 0);

    assert_eq!(PowerTransition::between(&off, &on), PowerTransition::TurnedOn);
    assert_eq!(PowerTransition::between(&on, &off), PowerTransition::TurnedOff);
    assert_eq!(PowerTransition::between(&on, &on), PowerTransition::Unchanged);
    assert_eq!(PowerTransition::between(&off, &off), PowerTransition::Unchanged);
}

#[test]
fn record_uses_camel_case_wire_names() {
    let decoded: ConfigRecord =
        serde_json::from_str(r#"{"turnedOn":true,"collectFreq":10,"sendFreq":2}"#).unwrap();

    assert_eq!(decoded, record(true, 10, 2));
}

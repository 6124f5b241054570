//! Stress tests: long mixed workloads checked against a model map.

use bytes::Bytes;
use rangedb::{open, Bound, Engine, EngineKind, IteratorDirection, OptionsBuilder, SharedEngine};
use std::collections::BTreeMap;
use std::ops::{self, RangeBounds};
use std::thread;

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn key(&mut self) -> String {
        // short keys over a small alphabet, so prefixes collide often
        let len = self.below(4) as usize + 1;
        (0..len)
            .map(|_| (b'a' + self.below(3) as u8) as char)
            .collect()
    }

    fn bound(&mut self) -> Bound {
        match self.below(3) {
            0 => Bound::NoBound,
            1 => Bound::include(self.key()),
            _ => Bound::exclude(self.key()),
        }
    }
}

// Written out rather than via `Bound::to_std_owned`, so the model does not
// share a conversion bug with the engines.
fn to_std(bound: &Bound) -> ops::Bound<String> {
    match bound {
        Bound::NoBound => ops::Bound::Unbounded,
        Bound::Include(k) => ops::Bound::Included(k.clone()),
        Bound::Exclude(k) => ops::Bound::Excluded(k.clone()),
    }
}

fn model_range(model: &BTreeMap<String, Bytes>, start: &Bound, end: &Bound) -> Vec<(String, Bytes)> {
    let range = (to_std(start), to_std(end));
    model
        .iter()
        .filter(|(k, _)| RangeBounds::<String>::contains(&range, *k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn engine_range(engine: &dyn Engine, start: &Bound, end: &Bound, reverse: bool) -> Vec<(String, Bytes)> {
    let mut iter = if reverse {
        engine.reverse_iter(start, end)
    } else {
        engine.iter(start, end)
    };
    let mut out = Vec::new();
    while iter.is_valid() {
        out.push((iter.key().to_string(), Bytes::copy_from_slice(iter.value())));
        iter.next();
    }
    out
}

/// The model filter itself, on absent, exclusive and inverted bounds.
#[test]
fn stress_model_range_filter() {
    let model: BTreeMap<String, Bytes> = ["a", "aa", "b", "ba", "c"]
        .iter()
        .map(|k| (k.to_string(), Bytes::from(k.to_string())))
        .collect();
    let keys = |start: Bound, end: Bound| -> Vec<String> {
        model_range(&model, &start, &end)
            .into_iter()
            .map(|(k, _)| k)
            .collect()
    };

    assert_eq!(keys(Bound::exclude("a"), Bound::include("bb")), ["aa", "b", "ba"]);
    assert_eq!(keys(Bound::include("ab"), Bound::NoBound), ["b", "ba", "c"]);
    assert_eq!(keys(Bound::NoBound, Bound::exclude("b")), ["a", "aa"]);
    assert!(keys(Bound::include("c"), Bound::include("a")).is_empty());
}

/// Random sets, deletes and range queries against a `BTreeMap` model.
#[test]
fn stress_model_workload() {
    for kind in EngineKind::ALL {
        let mut engine = open(&OptionsBuilder::new().engine(kind).build().unwrap()).unwrap();
        let mut model = BTreeMap::new();
        let mut rng = Lcg(0x5eed ^ kind as u64);

        for step in 0..5000 {
            match rng.below(10) {
                0..=4 => {
                    let key = rng.key();
                    let value = format!("v{}", step);
                    engine.set(&key, value.as_bytes());
                    model.insert(key, Bytes::from(value));
                }
                5..=6 => {
                    let key = rng.key();
                    engine.delete(&key);
                    model.remove(&key);
                }
                7 => {
                    let key = rng.key();
                    assert_eq!(engine.get(&key), model.get(&key).cloned(), "{} get {:?}", kind, key);
                }
                _ => {
                    let (start, end) = (rng.bound(), rng.bound());
                    let expected = model_range(&model, &start, &end);
                    let reverse = rng.below(2) == 1;
                    let mut got = engine_range(&*engine, &start, &end, reverse);
                    if reverse {
                        got.reverse();
                    }
                    assert_eq!(got, expected, "{} step {} ({}, {})", kind, step, start, end);
                }
            }
        }

        assert_eq!(engine.len(), model.len());
    }
}

/// Test overwrites of the same keys.
#[test]
fn stress_overwrites() {
    for kind in EngineKind::ALL {
        let mut engine = open(&OptionsBuilder::new().engine(kind).build().unwrap()).unwrap();

        for round in 0..50 {
            for i in 0..100 {
                let key = format!("key{:03}", i);
                engine.set(&key, format!("round{}", round).as_bytes());
            }
        }

        assert_eq!(engine.len(), 100);
        let mut count = 0;
        engine.scan(&Bound::NoBound, &Bound::NoBound, &mut |_, v| {
            assert_eq!(v, b"round49");
            count += 1;
            true
        });
        assert_eq!(count, 100);
    }
}

/// Test concurrent readers and writers through a shared engine.
#[test]
fn stress_concurrent_read_write() {
    for kind in EngineKind::ALL {
        let shared =
            SharedEngine::open(&OptionsBuilder::new().engine(kind).build().unwrap()).unwrap();

        // Pre-populate some data
        for i in 0..1000 {
            shared.set(&format!("key{:05}", i), format!("value_{}", i).as_bytes());
        }

        let num_readers = 4;
        let num_writers = 4;
        let ops_per_thread = 200;

        let mut handles = vec![];

        // Spawn readers
        for _ in 0..num_readers {
            let shared = shared.clone();
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("key{:05}", i % 1000);
                    assert!(shared.get(&key).is_some());

                    let window = shared.collect_range(
                        &Bound::include("key00100"),
                        &Bound::exclude("key00200"),
                        IteratorDirection::Reverse,
                    );
                    assert_eq!(window.len(), 100);
                    assert_eq!(window[0].0, "key00199");
                }
            }));
        }

        // Spawn writers, outside the key range the readers scan
        for t in 0..num_writers {
            let shared = shared.clone();
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("new_key_t{}_i{}", t, i);
                    shared.set(&key, b"new");
                    if i % 2 == 0 {
                        shared.delete(&key);
                    }
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(shared.len(), 1000 + num_writers * ops_per_thread / 2);
    }
}

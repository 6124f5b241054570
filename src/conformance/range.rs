//! Range checks: bound resolution, reverse traversal, scans, exhaustion.

use std::ops::Range;

use super::fixture::{
    collect_visits, describe, drain, ensure, expect_eq, fixture_window, keys, load_fixture,
    probe_bounds, reference_entries, FIXTURE,
};
use crate::engine::Engine;
use crate::iterator::IteratorDirection;
use crate::types::Bound;
use crate::Result;

/// Upper limit on entries any fixture scan may yield.
const LIMIT: usize = FIXTURE.len();

fn nb() -> Bound {
    Bound::NoBound
}

fn inc(key: &str) -> Bound {
    Bound::include(key)
}

fn exc(key: &str) -> Bound {
    Bound::exclude(key)
}

/// Hand-checked intervals over `FIXTURE`, with the index window each
/// must select. Several boundary keys (`bd`, `aab`, `baa`, `0`, `d`, `A`,
/// `B`) are not in the store.
fn table() -> Vec<(Bound, Bound, Range<usize>)> {
    vec![
        (nb(), nb(), 0..9),
        (nb(), inc("bc"), 0..8),
        (nb(), inc("bd"), 0..8),
        (nb(), exc("bc"), 0..7),
        (nb(), exc("bd"), 0..8),
        (inc("a"), nb(), 0..9),
        (inc("aab"), nb(), 4..9),
        (inc("a"), inc("ba"), 0..6),
        (inc("a"), inc("baa"), 0..6),
        (inc("a"), exc("ba"), 0..5),
        (inc("a"), exc("baa"), 0..6),
        (exc("a"), nb(), 1..9),
        (exc("aab"), exc("c"), 4..8),
        (exc("0"), inc("a"), 0..1),
        (inc("c"), nb(), 8..9),
        (exc("c"), nb(), 9..9),
        (inc("d"), nb(), 9..9),
        (nb(), exc("a"), 0..0),
        (nb(), inc("A"), 0..0),
        (inc("B"), exc("b"), 0..4),
        (exc("aa"), inc("aaaa"), 2..4),
        (inc("aaa"), exc("aaaa"), 2..3),
        (exc("b"), exc("bc"), 5..7),
    ]
}

/// Every bound combination over an empty store yields nothing.
pub fn empty_store_scans(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "empty_store_scans";

    let bounds = [nb(), inc("a"), exc("a"), inc(""), exc("~")];
    for start in &bounds {
        for end in &bounds {
            let interval = describe(start, end);

            ensure(CHECK, !engine.iter(start, end).is_valid(), || {
                format!("iter{} on empty store is valid", interval)
            })?;
            ensure(CHECK, !engine.reverse_iter(start, end).is_valid(), || {
                format!("reverse_iter{} on empty store is valid", interval)
            })?;

            let mut visits = 0;
            engine.scan(start, end, &mut |_, _| {
                visits += 1;
                true
            });
            engine.reverse(start, end, &mut |_, _| {
                visits += 1;
                true
            });
            expect_eq(CHECK, format!("visits for {} on empty store", interval), visits, 0)?;
        }
    }
    Ok(())
}

/// The hand-checked table, key by key and value by value.
pub fn forward_ranges(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "forward_ranges";

    load_fixture(engine);
    for (start, end, window) in table() {
        let got = drain(CHECK, engine.iter(&start, &end), LIMIT)?;
        expect_eq(
            CHECK,
            format!("iter{}", describe(&start, &end)),
            got,
            fixture_window(window),
        )?;
    }
    Ok(())
}

/// `{NoBound, Include, Exclude}²` over every probe key, against an
/// independent filter of the fixture.
pub fn bound_cross_product(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "bound_cross_product";

    load_fixture(engine);
    let bounds = probe_bounds();
    for start in &bounds {
        for end in &bounds {
            let expected = reference_entries(start, end);
            let got = drain(CHECK, engine.iter(start, end), LIMIT)?;
            if got != expected {
                return Err(crate::Error::conformance(
                    CHECK,
                    format!(
                        "iter{}: expected keys {:?}, got {:?}",
                        describe(start, end),
                        keys(&expected),
                        keys(&got)
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Reverse traversal is the exact reverse of forward traversal, for
/// every interval.
pub fn reverse_ranges(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "reverse_ranges";

    load_fixture(engine);

    let full = drain(CHECK, engine.reverse_iter(&nb(), &nb()), LIMIT)?;
    let mut expected_full = fixture_window(0..9);
    expected_full.reverse();
    expect_eq(CHECK, "reverse_iter(*, *)", full, expected_full)?;

    let bounds = probe_bounds();
    for start in &bounds {
        for end in &bounds {
            let forward = engine.iter(start, end);
            let reverse = engine.reverse_iter(start, end);
            expect_eq(
                CHECK,
                format!("iter{}.direction()", describe(start, end)),
                forward.direction(),
                IteratorDirection::Forward,
            )?;
            expect_eq(
                CHECK,
                format!("reverse_iter{}.direction()", describe(start, end)),
                reverse.direction(),
                IteratorDirection::Reverse,
            )?;

            let mut forward = drain(CHECK, forward, LIMIT)?;
            let reverse = drain(CHECK, reverse, LIMIT)?;
            forward.reverse();
            if forward != reverse {
                return Err(crate::Error::conformance(
                    CHECK,
                    format!(
                        "reverse_iter{}: expected keys {:?}, got {:?}",
                        describe(start, end),
                        keys(&forward),
                        keys(&reverse)
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// `scan` / `reverse` visit exactly what `iter` / `reverse_iter` yield.
pub fn scan_matches_iter(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "scan_matches_iter";

    load_fixture(engine);
    for (start, end, _) in table() {
        let interval = describe(&start, &end);

        let iterated = drain(CHECK, engine.iter(&start, &end), LIMIT)?;
        let scanned = collect_visits(|visit| engine.scan(&start, &end, visit));
        expect_eq(CHECK, format!("scan{}", interval), scanned, iterated)?;

        let iterated = drain(CHECK, engine.reverse_iter(&start, &end), LIMIT)?;
        let scanned = collect_visits(|visit| engine.reverse(&start, &end, visit));
        expect_eq(CHECK, format!("reverse{}", interval), scanned, iterated)?;
    }
    Ok(())
}

/// Returning `false` from the visitor stops the scan right there.
pub fn scan_early_stop(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "scan_early_stop";

    load_fixture(engine);
    for stop_after in 1..=FIXTURE.len() {
        let mut seen = Vec::new();
        engine.scan(&nb(), &nb(), &mut |k, _| {
            seen.push(k.to_owned());
            seen.len() < stop_after
        });
        let expected: Vec<_> = FIXTURE[..stop_after]
            .iter()
            .map(|(k, _)| k.to_string())
            .collect();
        expect_eq(CHECK, format!("scan stopping after {}", stop_after), seen, expected)?;

        let mut seen = Vec::new();
        engine.reverse(&nb(), &nb(), &mut |k, _| {
            seen.push(k.to_owned());
            seen.len() < stop_after
        });
        let expected: Vec<_> = FIXTURE
            .iter()
            .rev()
            .take(stop_after)
            .map(|(k, _)| k.to_string())
            .collect();
        expect_eq(CHECK, format!("reverse stopping after {}", stop_after), seen, expected)?;
    }

    // stop in the middle of a bounded reverse scan
    let mut seen = Vec::new();
    engine.reverse(&inc("b"), &exc("c"), &mut |k, _| {
        seen.push(k.to_owned());
        k != "bb"
    });
    let seen: Vec<&str> = seen.iter().map(String::as_str).collect();
    expect_eq(CHECK, "reverse[b, c) stopping at bb", seen, vec!["bc", "bb"])
}

/// Inverted and degenerate intervals are empty, not errors.
pub fn inverted_intervals(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "inverted_intervals";

    load_fixture(engine);
    let cases = [
        (inc("c"), inc("a")),
        (inc("bd"), inc("bb")),
        (exc("b"), inc("b")),
        (inc("b"), exc("b")),
        (exc("b"), exc("b")),
        (inc("bc"), exc("ba")),
        (exc("aab"), exc("aaaa")),
        (inc("~"), inc("")),
    ];
    for (start, end) in &cases {
        let interval = describe(start, end);

        let forward = drain(CHECK, engine.iter(start, end), LIMIT)?;
        expect_eq(CHECK, format!("iter{}", interval), keys(&forward), vec![])?;

        let reverse = drain(CHECK, engine.reverse_iter(start, end), LIMIT)?;
        expect_eq(CHECK, format!("reverse_iter{}", interval), keys(&reverse), vec![])?;

        let scanned = collect_visits(|visit| engine.scan(start, end, visit));
        expect_eq(CHECK, format!("scan{}", interval), keys(&scanned), vec![])?;
    }

    // [k, k] is not inverted: exactly the key
    let single = drain(CHECK, engine.iter(&inc("bb"), &inc("bb")), LIMIT)?;
    expect_eq(CHECK, "iter[bb, bb]", keys(&single), vec!["bb"])
}

/// Once exhausted, a cursor stays exhausted.
pub fn exhaustion_is_idempotent(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "exhaustion_is_idempotent";

    let intervals = [
        (nb(), nb()),
        (inc("aab"), exc("bb")),
        (exc("c"), nb()),
        (inc("c"), inc("a")),
    ];

    for loaded in [false, true] {
        if loaded {
            load_fixture(engine);
        }
        for (start, end) in &intervals {
            for direction in [IteratorDirection::Forward, IteratorDirection::Reverse] {
                let mut iter = match direction {
                    IteratorDirection::Forward => engine.iter(start, end),
                    IteratorDirection::Reverse => engine.reverse_iter(start, end),
                };

                let mut steps = 0;
                while iter.is_valid() {
                    ensure(CHECK, steps < LIMIT, || {
                        format!("{:?} cursor over {} never exhausts", direction, describe(start, end))
                    })?;
                    iter.next();
                    steps += 1;
                }
                for extra in 1..=3 {
                    iter.next();
                    ensure(CHECK, !iter.is_valid(), || {
                        format!(
                            "{:?} cursor over {} valid again after {} extra next()",
                            direction,
                            describe(start, end),
                            extra
                        )
                    })?;
                }
            }
        }
    }
    Ok(())
}

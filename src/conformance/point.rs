//! Point-operation checks: get, set, delete.

use bytes::Bytes;

use super::fixture::{drain, ensure, expect_eq, keys};
use crate::engine::Engine;
use crate::types::Bound;
use crate::Result;

fn some(value: &'static str) -> Option<Bytes> {
    Some(Bytes::from_static(value.as_bytes()))
}

/// Keys never set report `None`.
pub fn absent_key(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "absent_key";

    for key in ["a", "missing", "A", "\u{7f}"] {
        expect_eq(CHECK, format!("get({:?}) on empty store", key), engine.get(key), None)?;
    }

    engine.set("present", b"v");
    expect_eq(CHECK, "get(\"presen\")", engine.get("presen"), None)?;
    expect_eq(CHECK, "get(\"present!\")", engine.get("present!"), None)
}

/// Round trips, independent keys, case, delete and the empty value.
pub fn get_set(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "get_set";

    expect_eq(CHECK, "get(\"a\") before set", engine.get("a"), None)?;

    engine.set("a", b"aaa");
    expect_eq(CHECK, "get(\"a\")", engine.get("a"), some("aaa"))?;

    engine.set("b", b"bbb");
    expect_eq(CHECK, "get(\"a\") after set(\"b\")", engine.get("a"), some("aaa"))?;
    expect_eq(CHECK, "get(\"b\")", engine.get("b"), some("bbb"))?;

    expect_eq(CHECK, "get(\"A\")", engine.get("A"), None)?;
    expect_eq(CHECK, "get(\"B\")", engine.get("B"), None)?;

    engine.delete("a");
    expect_eq(CHECK, "get(\"a\") after delete", engine.get("a"), None)?;
    expect_eq(CHECK, "get(\"b\") after delete(\"a\")", engine.get("b"), some("bbb"))?;

    engine.set("b", b"");
    expect_eq(CHECK, "get(\"b\") after set to empty", engine.get("b"), Some(Bytes::new()))?;

    let all = drain(CHECK, engine.iter(&Bound::NoBound, &Bound::NoBound), 2)?;
    expect_eq(CHECK, "keys after delete(\"a\")", keys(&all), vec!["b"])
}

/// A second set replaces the value instead of accumulating.
pub fn overwrite(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "overwrite";

    engine.set("k", b"v1");
    engine.set("k", b"v2");
    expect_eq(CHECK, "get(\"k\")", engine.get("k"), some("v2"))?;

    // shorter value must not keep a tail of the longer one
    engine.set("k", b"a much longer value");
    engine.set("k", b"x");
    expect_eq(CHECK, "get(\"k\") after shrink", engine.get("k"), some("x"))?;

    let seen = drain(CHECK, engine.iter(&Bound::NoBound, &Bound::NoBound), 2)?;
    expect_eq(CHECK, "keys after overwrites", keys(&seen), vec!["k"])
}

/// Deleting works whether or not the key existed.
pub fn delete_absent(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "delete_absent";

    engine.delete("never");
    expect_eq(CHECK, "get(\"never\") on empty store", engine.get("never"), None)?;
    let all = drain(CHECK, engine.iter(&Bound::NoBound, &Bound::NoBound), 1)?;
    expect_eq(CHECK, "keys after delete on empty store", keys(&all), vec![])?;

    engine.set("keep", b"1");
    engine.delete("never");
    engine.delete("kee");
    expect_eq(CHECK, "get(\"keep\")", engine.get("keep"), some("1"))?;

    engine.delete("keep");
    engine.delete("keep");
    expect_eq(CHECK, "get(\"keep\") after double delete", engine.get("keep"), None)?;
    let all = drain(CHECK, engine.iter(&Bound::NoBound, &Bound::NoBound), 1)?;
    ensure(CHECK, all.is_empty(), || {
        format!("store should be empty, found keys {:?}", keys(&all))
    })?;

    engine.set("keep", b"2");
    expect_eq(CHECK, "get(\"keep\") after re-set", engine.get("keep"), some("2"))
}

/// Keys are compared byte for byte: no case folding.
pub fn case_sensitivity(engine: &mut dyn Engine) -> Result<()> {
    const CHECK: &str = "case_sensitivity";

    engine.set("a", b"lower");
    expect_eq(CHECK, "get(\"A\") with only \"a\" set", engine.get("A"), None)?;

    engine.set("A", b"upper");
    engine.set("b", b"lower");
    engine.set("B", b"upper");
    expect_eq(CHECK, "get(\"a\")", engine.get("a"), some("lower"))?;
    expect_eq(CHECK, "get(\"A\")", engine.get("A"), some("upper"))?;

    // upper case sorts before all lower case, so "A" and "a" are not adjacent
    let all = drain(CHECK, engine.iter(&Bound::NoBound, &Bound::NoBound), 4)?;
    expect_eq(CHECK, "iteration order", keys(&all), vec!["A", "B", "a", "b"])?;

    let lower = drain(CHECK, engine.iter(&Bound::include("a"), &Bound::exclude("b")), 4)?;
    expect_eq(CHECK, "keys in [\"a\", \"b\")", keys(&lower), vec!["a"])
}

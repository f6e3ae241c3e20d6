#![no_main]

use libfuzzer_sys::fuzz_target;
use log::debug;
use std::fmt::Debug;

// Arbitrary bytes: anything that decodes must canonicalize to a fixed point
// without gaining or losing bytes.
fuzz_target!(|input: &[u8]| {
    let _ = env_logger::try_init();

    let Ok(response) = schema_sort::decode(input) else {
        return;
    };
    debug!("=> decoded:\n{response:#?}");

    let once = schema_sort::canonicalize(response);
    let twice = schema_sort::canonicalize(once.clone());
    if once != twice {
        diff(&once, "canonicalized", &twice, "canonicalized twice");
        panic!(
            "Canonicalizing twice changed the response \
             (run with RUST_LOG=debug for details)"
        )
    }

    let encoded = schema_sort::encode(&once).unwrap();
    let reencoded = schema_sort::encode(&schema_sort::decode(&encoded).unwrap()).unwrap();
    assert_eq!(encoded.len(), reencoded.len());
});

fn diff(left: impl Debug, left_label: &'static str, right: impl Debug, right_label: &'static str) {
    println!(
        "{}",
        similar_asserts::SimpleDiff::from_str(
            &format!("{left:#?}"),
            &format!("{right:#?}"),
            left_label,
            right_label
        )
    );
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use log::debug;
use schema_sort_fuzz::generate_introspection;
use schema_sort_fuzz::log_payload;

// Structured payloads: sorting keeps the encoded size and is idempotent.
fuzz_target!(|data: &[u8]| {
    let payload = match generate_introspection(data) {
        Ok(payload) => payload,
        Err(_) => return,
    };
    debug!("{}", String::from_utf8_lossy(&payload));

    let sorted = match schema_sort::sort_payload(&payload) {
        Ok(sorted) => sorted,
        Err(error) => {
            log_payload(&payload, &error.to_string());
            panic!("generated payload does not decode: {error}");
        }
    };
    let resorted = schema_sort::sort_payload(&sorted).unwrap();

    if sorted != resorted || sorted.len() != payload.len() {
        log_payload(&payload, "sorting is not a stable permutation");
        similar_asserts::assert_eq!(
            String::from_utf8_lossy(&sorted),
            String::from_utf8_lossy(&resorted)
        );
        assert_eq!(sorted.len(), payload.len());
    }
});

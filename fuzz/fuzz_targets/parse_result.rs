#![no_main]

use libfuzzer_sys::fuzz_target;
use linegrid::format::{parse_result, write_result};

fuzz_target!(|data: &[u8]| {
    // Malformed input must be an error, never a panic.
    let Ok(result) = parse_result(data) else {
        return;
    };

    let mut buf = Vec::new();
    write_result(&mut buf, &result).unwrap();
    assert_eq!(parse_result(buf.as_slice()).unwrap(), result);
});

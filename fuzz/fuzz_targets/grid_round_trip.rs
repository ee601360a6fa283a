#![no_main]

use arbitrary::Unstructured;

use libfuzzer_sys::fuzz_target;
use linegrid::arbitrary::arbtests;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let _ = arbtests::grid_round_trip(&mut u);
});

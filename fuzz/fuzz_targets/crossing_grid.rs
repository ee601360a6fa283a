#![no_main]

use arbitrary::Unstructured;

use libfuzzer_sys::fuzz_target;
use linegrid::arbitrary::arbtests;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let _ = arbtests::crossing_grid_is_valid(&mut u);
});

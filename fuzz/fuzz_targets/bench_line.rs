#![no_main]

use libfuzzer_sys::fuzz_target;
use linegrid::bench_log::parse_line;

fuzz_target!(|line: &str| {
    if let Ok(rec) = parse_line(line) {
        assert_eq!(rec.num_segments, rec.m + rec.n);
        assert_eq!(rec.num_intersections, rec.m * rec.n);
        assert!(line.split_whitespace().next() == Some(rec.bm_name.as_str()));
    }
});

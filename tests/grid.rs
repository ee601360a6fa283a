use std::fs::File;
use std::io::BufReader;

use assert_matches::assert_matches;
use linegrid::format::{parse_result, read_segments, GridReader};
use linegrid::{bench_log, generate_grid, generators, plot, verify, Error, Grid};

fn read_back(path: &std::path::Path) -> Vec<linegrid::Segment> {
    read_segments(BufReader::new(File::open(path).unwrap())).unwrap()
}

#[test]
fn generated_grids_have_m_times_n_crossings() {
    let dir = tempfile::tempdir().unwrap();
    for (m, n) in [(7, 5), (1, 1), (0, 4), (3, 0), (20, 1), (1, 20)] {
        let path = dir.path().join(generators::default_file_name(m, n));
        generate_grid(&path, &Grid::new(m, n)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some((m + n).to_string().as_str()));
        assert_eq!(text.lines().count(), m + n + 1);

        let segs = read_back(&path);
        let lines: Vec<_> = segs.iter().map(|s| s.to_kurbo()).collect();
        let pairs = linegrid_util::crossing_pairs(&lines);
        assert_eq!(pairs.len(), m * n, "{m}x{n}");
        // Every crossing is between the two families.
        assert!(pairs.iter().all(|&(i, j)| i < m && j >= m));
    }
}

#[test]
fn overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.txt");
    generate_grid(&path, &Grid::new(10, 10)).unwrap();
    generate_grid(&path, &Grid::new(1, 2)).unwrap();
    assert_eq!(read_back(&path).len(), 3);
}

#[test]
fn unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/grid.txt");
    assert_matches!(generate_grid(&path, &Grid::new(2, 2)), Err(Error::Io(_)));
}

#[test]
fn reads_historical_output() {
    let path = linegrid_util::fixture_path("data/grid_m_1-n_1.txt");
    assert_eq!(read_back(&path), Grid::new(1, 1).segments().collect::<Vec<_>>());
}

#[test]
fn streaming_reader() {
    let grid = Grid::new(50, 40);
    let mut buf = Vec::new();
    grid.write(&mut buf).unwrap();

    let reader = GridReader::new(buf.as_slice()).unwrap();
    assert_eq!(reader.len(), 90);
    let mut max_x = f64::NEG_INFINITY;
    for (seg, expected) in reader.zip(grid.segments()) {
        let seg = seg.unwrap();
        assert_eq!(seg, expected);
        max_x = max_x.max(seg.p0.x).max(seg.p1.x);
    }
    assert_eq!(max_x, grid.family_b.segment(39).p0.x);
}

#[test]
fn expected_result_verifies_and_plots() {
    let dir = tempfile::tempdir().unwrap();
    let result_path = dir.path().join("expected.txt");
    let grid = Grid::new(6, 4);
    generators::generate_expected_result(&result_path, &grid).unwrap();

    let result = parse_result(BufReader::new(File::open(&result_path).unwrap())).unwrap();
    let report = verify::verify(&grid, &result);
    assert!(report.is_ok(), "{report}");
    assert!(!verify::verify(&Grid::new(6, 5), &result).is_ok());

    let svg_path = dir.path().join("expected.svg");
    let style = plot::PlotStyle {
        family_split: Some(grid.m),
        ..plot::PlotStyle::default()
    };
    plot::plot_file(&result_path, &svg_path, &style).unwrap();
    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert_eq!(svg.matches("<line").count(), 10);
    assert_eq!(svg.matches("<circle").count(), 24);
}

#[test]
fn bench_log_to_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("bm_linear.txt");
    let csv_path = dir.path().join("bm_linear.csv");
    std::fs::write(
        &log_path,
        "BM_SweepLineGrid/10000/100 5000 ns 4990 ns 140\nseg/3/4 120 foo 95 bar 10\n",
    )
    .unwrap();

    assert_eq!(bench_log::convert(&log_path, &csv_path).unwrap(), 2);
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "seg/3/4,120,95,10,3,4,7,12");
    assert_eq!(lines[2], "BM_SweepLineGrid/10000/100,5000,4990,140,10000,100,10100,1000000");
}

#[test]
fn malformed_bench_log_fails() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("bad.txt");
    let csv_path = dir.path().join("bad.csv");
    std::fs::write(&log_path, "seg/3/4 120 foo 95 bar 10\nseg/x/4 1 a 1 b 1\n").unwrap();
    assert_matches!(
        bench_log::convert(&log_path, &csv_path),
        Err(Error::Parse(e)) if e.line == 2
    );
    assert!(!csv_path.exists());
}

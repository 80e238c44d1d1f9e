// tests/unit_ranges.rs
//! Unit tests for changed-line range normalization and lookups.

use diffgate_core::diff::{ChangedLineRanges, LineRange};

fn ranges_of(path: &str, spans: &[(u32, u32)]) -> ChangedLineRanges {
    let mut ranges = ChangedLineRanges::default();
    for &(start, end) in spans {
        ranges.add(path, LineRange::new(start, end));
    }
    ranges.normalize();
    ranges
}

#[test]
fn test_adjacent_ranges_merge() {
    let ranges = ranges_of("A.java", &[(10, 12), (13, 15)]);

    assert_eq!(ranges.ranges("A.java"), Some(&[LineRange::new(10, 15)][..]));
}

#[test]
fn test_gap_of_one_line_stays_separate() {
    let ranges = ranges_of("A.java", &[(10, 12), (14, 15)]);

    assert_eq!(
        ranges.ranges("A.java"),
        Some(&[LineRange::new(10, 12), LineRange::new(14, 15)][..])
    );
}

#[test]
fn test_overlapping_ranges_merge() {
    let ranges = ranges_of("A.java", &[(10, 12), (11, 14)]);

    assert_eq!(ranges.ranges("A.java"), Some(&[LineRange::new(10, 14)][..]));
}

#[test]
fn test_contained_range_is_absorbed() {
    let ranges = ranges_of("A.java", &[(10, 20), (12, 14)]);

    assert_eq!(ranges.ranges("A.java"), Some(&[LineRange::new(10, 20)][..]));
}

#[test]
fn test_unsorted_input_is_sorted() {
    let ranges = ranges_of("A.java", &[(30, 31), (5, 6), (14, 15)]);

    assert_eq!(
        ranges.ranges("A.java"),
        Some(
            &[
                LineRange::new(5, 6),
                LineRange::new(14, 15),
                LineRange::new(30, 31)
            ][..]
        )
    );
}

#[test]
fn test_normalize_is_idempotent() {
    let mut ranges = ranges_of("A.java", &[(10, 12), (13, 15), (20, 22)]);
    let before = ranges.clone();
    ranges.normalize();

    assert_eq!(ranges, before);
}

#[test]
fn test_covers_inclusive_bounds() {
    let ranges = ranges_of("A.java", &[(10, 12)]);

    assert!(!ranges.covers("A.java", 9));
    assert!(ranges.covers("A.java", 10));
    assert!(ranges.covers("A.java", 11));
    assert!(ranges.covers("A.java", 12));
    assert!(!ranges.covers("A.java", 13));
}

#[test]
fn test_unknown_file_has_no_changed_lines() {
    let ranges = ranges_of("A.java", &[(10, 12)]);

    assert!(!ranges.covers("B.java", 11));
}

#[test]
fn test_empty_ranges() {
    let ranges = ChangedLineRanges::default();

    assert!(ranges.is_empty());
    assert_eq!(ranges.file_count(), 0);
    assert!(!ranges.covers("A.java", 1));
}

use std::path::Path;

use super::*;

fn cats(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn matches_single_extension() {
    let filter = SuffixFilter::new(&cats(&["pdf"]), &[]).unwrap();
    assert_eq!(filter.category_for(Path::new("/a/report.pdf")), Some("pdf"));
    assert_eq!(filter.category_for(Path::new("/a/report.txt")), None);
}

#[test]
fn leading_dot_is_normalized() {
    let filter = SuffixFilter::new(&cats(&[".pdf"]), &[]).unwrap();
    assert_eq!(filter.categories(), &["pdf".to_string()]);
    assert_eq!(filter.category_for(Path::new("/a/report.pdf")), Some("pdf"));
}

#[test]
fn first_matching_category_wins() {
    // "archive.tar.gz" matches both; caller order decides.
    let filter = SuffixFilter::new(&cats(&["tar.gz", "gz"]), &[]).unwrap();
    assert_eq!(
        filter.category_for(Path::new("/a/archive.tar.gz")),
        Some("tar.gz")
    );

    let reversed = SuffixFilter::new(&cats(&["gz", "tar.gz"]), &[]).unwrap();
    assert_eq!(
        reversed.category_for(Path::new("/a/archive.tar.gz")),
        Some("gz")
    );
}

#[test]
fn suffix_requires_dot_separator() {
    let filter = SuffixFilter::new(&cats(&["pdf"]), &[]).unwrap();
    // No separator: the name merely ends with the letters.
    assert_eq!(filter.category_for(Path::new("/a/mypdf")), None);
    // The whole name is the suffix (hidden file).
    assert_eq!(filter.category_for(Path::new("/a/.pdf")), None);
}

#[test]
fn exclude_patterns_apply() {
    let filter =
        SuffixFilter::new(&cats(&["pdf"]), &["**/cache/**".to_string()]).unwrap();
    assert_eq!(filter.category_for(Path::new("/a/report.pdf")), Some("pdf"));
    assert_eq!(filter.category_for(Path::new("/a/cache/report.pdf")), None);
}

#[test]
fn empty_category_list_is_config_error() {
    let err = SuffixFilter::new(&[], &[]).unwrap_err();
    assert!(matches!(err, crate::SweepError::Config(_)));
}

#[test]
fn blank_category_is_config_error() {
    let err = SuffixFilter::new(&cats(&["."]), &[]).unwrap_err();
    assert!(matches!(err, crate::SweepError::Config(_)));
}

#[test]
fn invalid_exclude_pattern_is_rejected() {
    let err = SuffixFilter::new(&cats(&["pdf"]), &["[".to_string()]).unwrap_err();
    assert!(matches!(err, crate::SweepError::InvalidPattern { .. }));
}

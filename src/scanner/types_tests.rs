use std::path::PathBuf;

use super::*;

#[test]
fn candidate_carries_path_and_category() {
    let candidate = CandidatePath::new(PathBuf::from("/tree/doc.pdf"), "pdf".to_string());
    assert_eq!(candidate.path, PathBuf::from("/tree/doc.pdf"));
    assert_eq!(candidate.category, "pdf");
}

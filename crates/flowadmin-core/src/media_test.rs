use super::*;

fn file(name: &str, mime: &str, size: u64) -> UploadFile {
    UploadFile {
        path: PathBuf::from(name),
        name: name.to_string(),
        mime: mime.to_string(),
        size,
    }
}

fn keys(raw: &[&str]) -> Vec<String> {
    raw.iter().map(ToString::to_string).collect()
}

#[test]
fn batch_is_truncated_to_free_slots() {
    let files = vec![
        file("a.png", "image/png", 10),
        file("b.png", "image/png", 10),
        file("c.png", "image/png", 10),
        file("d.png", "image/png", 10),
    ];
    let plan = plan_upload(1, files);
    assert_eq!(plan.truncated_to, Some(2));
    assert_eq!(plan.accepted.len(), 2);
    assert_eq!(plan.accepted[0].name, "a.png");
    assert_eq!(plan.accepted[1].name, "b.png");
    assert!(plan.rejected.is_empty());
}

#[test]
fn batch_within_limit_is_not_truncated() {
    let plan = plan_upload(0, vec![file("a.mp4", "video/mp4", 1024)]);
    assert_eq!(plan.truncated_to, None);
    assert_eq!(plan.accepted.len(), 1);
    assert_eq!(plan.total_bytes(), 1024);
}

#[test]
fn full_product_accepts_nothing() {
    let plan = plan_upload(3, vec![file("a.png", "image/png", 10)]);
    assert_eq!(plan.truncated_to, Some(0));
    assert!(plan.accepted.is_empty());
}

#[test]
fn invalid_type_and_oversized_files_are_dropped_individually() {
    let plan = plan_upload(
        0,
        vec![
            file("notes.pdf", "application/pdf", 10),
            file("huge.mp4", "video/mp4", MAX_UPLOAD_BYTES + 1),
            file("ok.webp", "image/webp", MAX_UPLOAD_BYTES),
        ],
    );
    assert_eq!(plan.accepted.len(), 1);
    assert_eq!(plan.accepted[0].name, "ok.webp");
    assert_eq!(
        plan.rejected
            .iter()
            .map(Rejection::message)
            .collect::<Vec<_>>(),
        vec![
            "Invalid file type: notes.pdf".to_string(),
            "File too large: huge.mp4 (max 50MB)".to_string(),
        ]
    );
}

#[test]
fn mime_guess_covers_allow_list_extensions() {
    assert_eq!(mime_for_path(Path::new("a.JPG")), "image/jpeg");
    assert_eq!(mime_for_path(Path::new("clip.mov")), "video/quicktime");
    assert_eq!(mime_for_path(Path::new("clip.avi")), "video/x-msvideo");
    assert_eq!(mime_for_path(Path::new("README")), "application/octet-stream");
    assert!(!is_allowed_mime(mime_for_path(Path::new("doc.txt"))));
}

#[test]
fn dragging_last_onto_second_moves_it_forward() {
    let order = reorder_keys(&keys(&["a", "b", "c", "d"]), "d", "b");
    assert_eq!(order, Some(keys(&["a", "d", "b", "c"])));
}

#[test]
fn dragging_first_onto_third_moves_it_back() {
    let order = reorder_keys(&keys(&["a", "b", "c"]), "a", "c");
    assert_eq!(order, Some(keys(&["b", "c", "a"])));
}

#[test]
fn reorder_with_unknown_or_same_key_is_noop() {
    let current = keys(&["a", "b"]);
    assert_eq!(reorder_keys(&current, "a", "a"), None);
    assert_eq!(reorder_keys(&current, "z", "a"), None);
    assert_eq!(reorder_keys(&current, "a", "z"), None);
}

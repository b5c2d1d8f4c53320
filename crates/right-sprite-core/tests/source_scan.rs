use right_sprite_core::scan::{is_image, scan_images};
use std::fs;
use std::path::Path;

#[test]
fn extensions_are_case_insensitive() {
    assert!(is_image(Path::new("a.JPG")));
    assert!(is_image(Path::new("a.jpeg")));
    assert!(is_image(Path::new("dir/a.Gif")));
    assert!(!is_image(Path::new("a.bmp")));
    assert!(!is_image(Path::new("png")));
}

#[test]
fn scan_is_recursive_and_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    fs::create_dir_all(root.join("z/deeper")).expect("mkdir");
    for p in ["m.png", "z/deeper/b.gif", "a.jpg", "readme.md", "z/c.JPEG"] {
        fs::write(root.join(p), b"").expect("write");
    }

    let found = scan_images(root, &[], &[]).expect("scan");
    let rel: Vec<String> = found
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(rel, vec!["a.jpg", "m.png", "z/c.JPEG", "z/deeper/b.gif"]);
}

#[test]
fn include_patterns_restrict_results() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("icon-a.png"), b"").expect("write");
    fs::write(dir.path().join("photo.png"), b"").expect("write");

    let found = scan_images(dir.path(), &["**/icon-*".to_string()], &[]).expect("scan");
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("icon-a.png"));
}

#[test]
fn bad_pattern_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(scan_images(dir.path(), &["[".to_string()], &[]).is_err());
}

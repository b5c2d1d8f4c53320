use image::{Rgb, RgbImage, Rgba, RgbaImage};
use right_sprite_core::compositing::encode_jpeg;
use right_sprite_core::error::SpriteError;
use right_sprite_core::prelude::*;
use std::path::Path;

fn write_png(path: &Path, w: u32, h: u32, px: [u8; 4]) {
    RgbaImage::from_pixel(w, h, Rgba(px))
        .save(path)
        .expect("write fixture");
}

#[test]
fn artifact_name_includes_cell_size() {
    let key = CacheKey::for_source(Path::new("/x/y/photo.png"), 200, 150);
    assert_eq!(key.file_name, "photo.png");
    assert_eq!(key.artifact_name(), "photo.png-200x150.jpg");
}

#[test]
fn miss_resizes_and_stores_then_hits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("wide.png");
    write_png(&src, 64, 16, [200, 10, 10, 255]);

    let mut cache = MemoryCache::new();
    {
        let mut n = CellNormalizer::new(&mut cache, 20, 20);
        let (cell, origin) = n.normalize(&src).expect("normalize");
        assert_eq!(origin, CellSource::Resized);
        assert_eq!(cell.dimensions(), (20, 20));
    }
    assert!(cache.contains(&CacheKey::new("wide.png", 20, 20)));

    // The source is gone; the cached cell must still be served.
    std::fs::remove_file(&src).expect("remove");
    let mut n = CellNormalizer::new(&mut cache, 20, 20);
    let (cell, origin) = n.normalize(&src).expect("normalize from cache");
    assert_eq!(origin, CellSource::Cache);
    assert_eq!(cell.dimensions(), (20, 20));
}

#[test]
fn cache_key_depends_on_cell_size() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("a.png");
    write_png(&src, 8, 8, [0, 0, 255, 255]);

    let mut cache = MemoryCache::new();
    CellNormalizer::new(&mut cache, 4, 4)
        .normalize(&src)
        .expect("4x4");
    CellNormalizer::new(&mut cache, 6, 3)
        .normalize(&src)
        .expect("6x3");
    assert_eq!(cache.len(), 2);
}

#[test]
fn cached_entries_are_trusted_without_size_check() {
    let mut cache = MemoryCache::new();
    let stale = encode_jpeg(&RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])), 90).expect("encode");
    cache
        .put(&CacheKey::new("ghost.png", 16, 16), &stale)
        .expect("put");

    let mut n = CellNormalizer::new(&mut cache, 16, 16);
    let (cell, origin) = n.normalize(Path::new("nowhere/ghost.png")).expect("hit");
    assert_eq!(origin, CellSource::Cache);
    assert_eq!(cell.dimensions(), (8, 8));
}

#[test]
fn undecodable_source_is_a_decode_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("broken.png");
    std::fs::write(&src, b"definitely not a png").expect("write");

    let mut cache = MemoryCache::new();
    let res = CellNormalizer::new(&mut cache, 10, 10).normalize(&src);
    assert!(matches!(res, Err(SpriteError::Decode { .. })));
    assert!(cache.is_empty());
}

#[test]
fn transparent_pixels_flatten_onto_background() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("clear.png");
    write_png(&src, 4, 4, [0, 0, 0, 0]);

    let mut cache = MemoryCache::new();
    let (cell, _) = CellNormalizer::new(&mut cache, 4, 4)
        .with_background([0, 255, 0])
        .normalize(&src)
        .expect("normalize");
    assert_eq!(*cell.get_pixel(2, 2), Rgb([0, 255, 0]));
}

#[test]
fn dir_cache_writes_jpeg_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("pic.png");
    write_png(&src, 10, 10, [9, 9, 9, 255]);
    let cache_dir = dir.path().join("cropped");

    let mut cache = DirCache::new(&cache_dir);
    assert!(cache.get(&CacheKey::new("pic.png", 5, 5)).expect("get").is_none());
    CellNormalizer::new(&mut cache, 5, 5)
        .normalize(&src)
        .expect("normalize");

    let artifact = cache_dir.join("pic.png-5x5.jpg");
    assert!(artifact.is_file());
    let img = image::open(&artifact).expect("decode artifact");
    assert_eq!((img.width(), img.height()), (5, 5));
}

#[test]
fn dir_cache_files_live_under_its_dir() {
    let root = tempfile::tempdir().expect("tempdir");
    let dir = root.path().join("cropped");
    let mut cache = DirCache::new(&dir);
    assert_eq!(cache.dir(), dir.as_path());

    let key = CacheKey::new("x.png", 3, 2);
    cache.put(&key, b"bytes").expect("put");
    assert_eq!(cache.path_for(&key), dir.join("x.png-3x2.jpg"));
    assert_eq!(cache.get(&key).expect("get").as_deref(), Some(&b"bytes"[..]));
}

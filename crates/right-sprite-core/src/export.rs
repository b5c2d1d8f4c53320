use crate::model::PlacementRecord;
use crate::packer::SpriteSheet;
use serde_json::{Value, json};
use std::path::Path;

/// File name of the sprite sheet for `css_class`.
pub fn image_file_name(css_class: &str) -> String {
    format!("{css_class}.jpg")
}

/// File name of the stylesheet for `css_class`.
pub fn stylesheet_file_name(css_class: &str) -> String {
    format!("{css_class}.css")
}

/// Rule binding the sprite sheet as background for `.{css_class}`.
pub fn base_rule(css_class: &str) -> String {
    format!(
        ".{css_class} {{ \n\tbackground: url(\"{}\");\n}}",
        image_file_name(css_class)
    )
}

/// Rule positioning one packed image.
pub fn placement_rule(rec: &PlacementRecord) -> String {
    format!(
        ".{} {{ \n\tbackground-position: -{}px -{}px; \n}}",
        rec.css_identifier, rec.offset_left, rec.offset_top
    )
}

/// Full stylesheet text: the base rule followed by one rule per placement.
pub fn to_stylesheet(sheet: &SpriteSheet) -> String {
    let mut css = sheet.base_rule.clone();
    for rec in &sheet.placements {
        css.push('\n');
        css.push_str(&placement_rule(rec));
    }
    css
}

/// Machine-readable description of a sheet.
/// Shape: `{ image, stylesheet, canvas: {w,h}, cell: {w,h}, sprites: [{file, class, x, y}], stats }`.
pub fn to_json_manifest(sheet: &SpriteSheet, css_class: &str) -> Value {
    let sprites: Vec<Value> = sheet
        .placements
        .iter()
        .map(|p| {
            json!({
                "file": p.file_name,
                "class": p.css_identifier,
                "x": p.offset_left,
                "y": p.offset_top,
            })
        })
        .collect();
    json!({
        "image": image_file_name(css_class),
        "stylesheet": stylesheet_file_name(css_class),
        "canvas": {"w": sheet.plan.canvas_width, "h": sheet.plan.canvas_height},
        "cell": {"w": sheet.plan.cell_width, "h": sheet.plan.cell_height},
        "shape": sheet.plan.shape,
        "sprites": sprites,
        "stats": &sheet.stats,
    })
}

/// Public URL of a written file: the part of its path starting at `url_prefix`.
///
/// Backslashes are treated as `/`, and both sides are trimmed of `/` before matching.
/// Returns `None` when the prefix does not occur in the path.
pub fn public_url(path: &Path, url_prefix: &str) -> Option<String> {
    let path = path.to_string_lossy().replace('\\', "/");
    let path = path.trim_matches('/');
    let prefix = url_prefix.trim_matches('/');
    if prefix.is_empty() {
        return None;
    }
    path.find(prefix).map(|i| path[i..].to_string())
}

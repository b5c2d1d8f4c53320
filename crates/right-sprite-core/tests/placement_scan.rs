use right_sprite_core::packer::{RasterCursor, css_identifier, slugify};
use right_sprite_core::prelude::*;

#[test]
fn slug_matches_stylesheet_convention() {
    assert_eq!(
        css_identifier("right-sprite", "My Photo (1).PNG"),
        "right-sprite spr-my-photo-1-png"
    );
    assert_eq!(slugify("plain.jpg"), "plain-jpg");
    assert_eq!(slugify("--x--"), "-x-");
}

#[test]
fn three_images_follow_raster_order() {
    let plan = compute_layout(3, 100, 100).expect("layout");
    let recs = plan_placements(&plan, &["a.png", "b.png", "c.png"], "right-sprite");
    let offsets: Vec<(u32, u32)> = recs.iter().map(|r| (r.offset_left, r.offset_top)).collect();
    assert_eq!(offsets, vec![(0, 0), (100, 0), (0, 100)]);
    assert_eq!(recs[1].css_identifier, "right-sprite spr-b-png");
}

#[test]
fn offsets_partition_the_canvas() {
    for k in [0usize, 1, 2, 7, 15, 16, 99] {
        let plan = compute_layout(k, 30, 20).expect("layout");
        let names: Vec<String> = (0..k).map(|i| format!("img{i}.png")).collect();
        let recs = plan_placements(&plan, &names, "s");
        assert_eq!(recs.len(), k);

        let per_row = plan.canvas_width / plan.cell_width;
        for (i, r) in recs.iter().enumerate() {
            let i = i as u32;
            assert_eq!(r.offset_left, (i % per_row) * 30, "k={k} i={i}");
            assert_eq!(r.offset_top, (i / per_row) * 20, "k={k} i={i}");
            assert!(r.offset_left <= plan.canvas_width - plan.cell_width);
            assert!(r.offset_top <= plan.canvas_height - plan.cell_height);
        }
    }
}

#[test]
fn cursor_starts_at_origin() {
    let plan = compute_layout(0, 10, 10).expect("layout");
    let mut c = RasterCursor::new(&plan);
    assert_eq!(c.position(), (0, 0));
    c.advance();
    assert_eq!(c.position(), (0, 10));
}

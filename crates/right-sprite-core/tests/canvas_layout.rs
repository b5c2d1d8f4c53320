use rand::{Rng, SeedableRng};
use right_sprite_core::error::SpriteError;
use right_sprite_core::prelude::*;

#[test]
fn three_images_fit_a_two_by_two_square() {
    let plan = compute_layout(3, 100, 100).expect("layout");
    assert_eq!((plan.canvas_width, plan.canvas_height), (200, 200));
    assert_eq!(plan.shape, LayoutShape::Square);
    assert_eq!(plan.columns(), 2);
}

#[test]
fn zero_images_still_reserve_one_cell() {
    let plan = compute_layout(0, 50, 50).expect("layout");
    assert_eq!((plan.canvas_width, plan.canvas_height), (50, 50));
    assert_eq!(plan.capacity(), 1);
}

#[test]
fn non_square_cells_scale_each_axis() {
    // n = 5, s = 3, rows = 2
    let plan = compute_layout(4, 40, 10).expect("layout");
    assert_eq!((plan.canvas_width, plan.canvas_height), (120, 20));
}

#[test]
fn zero_cell_side_is_rejected() {
    match compute_layout(3, 0, 10) {
        Err(SpriteError::InvalidDimensions { width, height }) => {
            assert_eq!(width, 0);
            assert_eq!(height, 10);
        }
        other => panic!("Expected InvalidDimensions, got {:?}", other.map(|p| p.shape)),
    }
}

#[test]
fn oversized_canvas_is_rejected() {
    let res = compute_layout(1_000_000, u32::MAX, u32::MAX);
    assert!(matches!(res, Err(SpriteError::CanvasTooLarge { .. })));
}

#[test]
fn area_and_multiples_hold_for_random_inputs() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let n: usize = rng.gen_range(0..5000);
        let w: u32 = rng.gen_range(1..300);
        let h: u32 = rng.gen_range(1..300);
        let plan = compute_layout(n, w, h).expect("layout");

        assert!(plan.area() >= (n as u64 + 1) * w as u64 * h as u64, "n={n} w={w} h={h}");
        assert_eq!(plan.canvas_width % w, 0);
        assert_eq!(plan.canvas_height % h, 0);
        assert!(plan.canvas_width >= w && plan.canvas_height >= h);
        assert!(plan.capacity() > n as u64);

        // deterministic
        assert_eq!(compute_layout(n, w, h).expect("layout"), plan);
    }
}

#[test]
fn perfect_squares_waste_nothing() {
    for side in 1u32..20 {
        let n = (side * side - 1) as usize;
        let plan = compute_layout(n, 8, 8).expect("layout");
        assert_eq!(plan.columns(), side);
        assert_eq!(plan.rows(), side);
    }
}

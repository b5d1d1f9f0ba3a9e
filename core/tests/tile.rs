use eawase_core::{images_equal, Rotation, Tile};
use image::{Rgba, RgbaImage};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, (x + y) as u8, 255])
    })
}

#[test]
fn rotate_left_then_right_restores() {
    let mut tile = Tile::new(0, 0, gradient(4, 4));
    tile.rotate_left();
    assert_eq!(tile.rotation(), Rotation::R270);
    tile.rotate_right();
    assert_eq!(tile.rotation(), Rotation::R0);

    tile.rotate_right();
    tile.rotate_left();
    assert_eq!(tile.rotation(), Rotation::R0);
}

#[test]
fn four_left_turns_restore() {
    let mut tile = Tile::new(0, 0, gradient(4, 4));
    for _ in 0..4 {
        tile.rotate_left();
    }
    assert_eq!(tile.rotation(), Rotation::R0);
}

#[test]
fn double_flip_restores() {
    let mut tile = Tile::new(0, 0, gradient(4, 4));
    tile.flip();
    assert!(tile.flipped());
    tile.flip();
    assert!(!tile.flipped());
}

#[test]
fn rotation_steps_through_all_quadrants() {
    let mut tile = Tile::new(0, 0, gradient(4, 4));
    let mut seen = vec![tile.rotation().degrees()];
    for _ in 0..3 {
        tile.rotate_right();
        seen.push(tile.rotation().degrees());
    }
    assert_eq!(seen, vec![0, 90, 180, 270]);
}

#[test]
fn untransformed_render_matches_reference() {
    let tile = Tile::new(1, 2, gradient(5, 3));
    assert!(images_equal(&tile.rendered_image(), tile.reference_image()));
    assert_eq!(tile.reference_image().dimensions(), (5, 3));
}

#[test]
fn rotated_render_differs_from_reference() {
    let mut tile = Tile::new(0, 0, gradient(4, 4));
    tile.rotate_right();
    assert!(!images_equal(&tile.rendered_image(), tile.reference_image()));
}

#[test]
fn render_is_pure() {
    let mut tile = Tile::new(0, 0, gradient(4, 4));
    tile.rotate_right();
    tile.flip();
    let first = tile.rendered_image();
    let second = tile.rendered_image();
    assert!(images_equal(&first, &second));
    assert!(images_equal(tile.reference_image(), &gradient(4, 4)));
}

#[test]
fn flip_applies_before_rotation() {
    // Two-pixel strip [A, B]. Mirror first gives [B, A]; a clockwise
    // quarter turn then stacks them into a column [B, A]. If the rotation
    // came first the column would read [A, B].
    let a = Rgba([10, 0, 0, 255]);
    let b = Rgba([0, 20, 0, 255]);
    let mut strip = RgbaImage::new(2, 1);
    strip.put_pixel(0, 0, a);
    strip.put_pixel(1, 0, b);

    let mut tile = Tile::new(0, 0, strip);
    tile.flip();
    tile.rotate_right();
    let rendered = tile.rendered_image();
    assert_eq!(rendered.dimensions(), (1, 2));
    assert_eq!(*rendered.get_pixel(0, 0), b);
    assert_eq!(*rendered.get_pixel(0, 1), a);
}

#[test]
fn rotated_render_of_non_square_tile_swaps_dimensions() {
    let mut tile = Tile::new(0, 0, gradient(6, 2));
    tile.rotate_right();
    assert_eq!(tile.rendered_image().dimensions(), (2, 6));
    // Differing dimensions never compare equal.
    assert!(!images_equal(&tile.rendered_image(), tile.reference_image()));
}

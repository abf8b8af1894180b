use super::*;
use crate::source::video::FacingMode;

/// Landscape test card: left half red, right half blue, one green column at x = 0.
fn landscape_card(width: u32, height: u32) -> PremulImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _y in 0..height {
        for x in 0..width {
            let px = if x == 0 {
                [0, 255, 0, 255]
            } else if x < width / 2 {
                [255, 0, 0, 255]
            } else {
                [0, 0, 255, 255]
            };
            data.extend_from_slice(&px);
        }
    }
    PremulImage::new(width, height, data).unwrap()
}

fn frame(image: PremulImage, facing: FacingMode) -> VideoFrame {
    VideoFrame { image, facing }
}

#[test]
fn capture_has_target_resolution_for_any_source() {
    let target = Canvas::new(90, 160).unwrap();
    for (w, h) in [(160, 90), (40, 30), (50, 50), (9, 16), (300, 400), (1, 1)] {
        let src = PremulImage::filled(Canvas::new(w, h).unwrap(), [10, 20, 30, 255]);
        let cap = capture_frame(&frame(src, FacingMode::Environment), target).unwrap();
        assert_eq!(cap.canvas(), target);
        assert!(cap.image().data().chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
    }
}

#[test]
fn landscape_capture_keeps_center_and_crops_edges() {
    let target = Canvas::new(90, 160).unwrap();
    let cap = capture_frame(
        &frame(landscape_card(320, 180), FacingMode::Environment),
        target,
    )
    .unwrap();

    // The green edge column is cropped away; red on the left, blue on the right.
    assert_eq!(cap.image().pixel(0, 80), [255, 0, 0, 255]);
    assert_eq!(cap.image().pixel(89, 80), [0, 0, 255, 255]);
    assert!(!cap.is_mirrored());
}

#[test]
fn large_striped_frame_is_area_averaged() {
    // A camera frame much larger than the target with one-pixel black/white columns.
    let (w, h) = (600u32, 800u32);
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _y in 0..h {
        for x in 0..w {
            let v = if x % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let src = PremulImage::new(w, h, data).unwrap();

    let target = Canvas::new(90, 160).unwrap();
    let cap = capture_frame(&frame(src, FacingMode::Environment), target).unwrap();
    for y in [0, 80, 159] {
        for x in 0..target.width {
            let [r, _, _, a] = cap.image().pixel(x, y);
            assert!((100..=155).contains(&r), "({x},{y}) = {r}");
            assert_eq!(a, 255);
        }
    }
}

#[test]
fn user_facing_capture_is_mirror_of_environment_capture() {
    let target = Canvas::new(36, 64).unwrap();
    let card = landscape_card(123, 77);

    let plain = capture_frame(&frame(card.clone(), FacingMode::Environment), target).unwrap();
    let mirrored = capture_frame(&frame(card, FacingMode::User), target).unwrap();
    assert!(mirrored.is_mirrored());

    for y in 0..target.height {
        for x in 0..target.width {
            assert_eq!(
                plain.image().pixel(x, y),
                mirrored.image().pixel(target.width - 1 - x, y)
            );
        }
    }
    assert_eq!(mirrored.image().pixel(0, 32), [0, 0, 255, 255]);
}

#[test]
fn from_image_at_target_size_is_taken_verbatim() {
    let target = Canvas::new(4, 4).unwrap();
    let img = landscape_card(4, 4);
    let cap = CapturedImage::from_image(img.clone(), target).unwrap();
    assert_eq!(cap.image(), &img);

    let scaled = CapturedImage::from_image(landscape_card(8, 4), target).unwrap();
    assert_eq!(scaled.canvas(), target);
}

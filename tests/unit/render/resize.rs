use super::*;

fn gradient(width: u32, height: u32) -> PremulImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 17 % 256) as u8, (y * 29 % 256) as u8, 7, 255]);
        }
    }
    PremulImage::new(width, height, data).unwrap()
}

#[test]
fn same_size_resize_is_identity() {
    let src = gradient(5, 4);
    assert_eq!(resize_to(&src, src.canvas()).unwrap(), src);
}

#[test]
fn upscale_of_constant_image_stays_constant() {
    let src = PremulImage::filled(Canvas::new(2, 2).unwrap(), [40, 50, 60, 200]);
    let out = resize_to(&src, Canvas::new(9, 16).unwrap()).unwrap();
    assert_eq!(out.canvas(), Canvas::new(9, 16).unwrap());
    assert!(out.data().chunks_exact(4).all(|px| px == [40, 50, 60, 200]));
}

#[test]
fn downscale_averages_fine_stripes() {
    // One-pixel black/white columns must blur to mid grey, not alias into bands.
    let (w, h) = (450, 800);
    let mut data = Vec::with_capacity(w * h * 4);
    for _y in 0..h {
        for x in 0..w {
            let v = if x % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let src = PremulImage::new(w as u32, h as u32, data).unwrap();

    let out = resize_to(&src, Canvas::new(90, 160).unwrap()).unwrap();
    for x in 0..90 {
        let [r, g, b, a] = out.pixel(x, 80);
        assert!((100..=155).contains(&r), "column {x} = {r}");
        assert_eq!((g, b, a), (r, r, 255));
    }
}

#[test]
fn crop_copies_the_requested_window() {
    let src = gradient(6, 5);
    let out = crop(&src, 2, 1, Canvas::new(3, 2).unwrap()).unwrap();
    assert_eq!(out.canvas(), Canvas::new(3, 2).unwrap());
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(out.pixel(x, y), src.pixel(x + 2, y + 1));
        }
    }
    assert!(crop(&src, 4, 0, Canvas::new(3, 2).unwrap()).is_err());
}

#[test]
fn flip_reflects_columns_exactly() {
    let src = gradient(7, 3);
    let out = flip_horizontal(&src).unwrap();
    for y in 0..3 {
        for x in 0..7 {
            assert_eq!(out.pixel(x, y), src.pixel(6 - x, y));
        }
    }
}

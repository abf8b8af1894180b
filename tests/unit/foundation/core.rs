use super::*;

#[test]
fn default_canvas_is_portrait_hd() {
    let c = Canvas::default();
    assert_eq!(c, Canvas::PORTRAIT_HD);
    assert_eq!((c.width, c.height), (1080, 1920));
    assert!((c.aspect_ratio() - 9.0 / 16.0).abs() < 1e-12);
    assert_eq!(c.rgba_len(), 1080 * 1920 * 4);
}

#[test]
fn canvas_new_rejects_empty_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(Canvas::MAX_DIM + 1, 10).is_err());
    assert!(Canvas::new(Canvas::MAX_DIM, 1).is_ok());
}

#[test]
fn canvas_parses_from_str() {
    let c: Canvas = "720x1280".parse().unwrap();
    assert_eq!(c, Canvas::new(720, 1280).unwrap());
    assert_eq!(c.to_string(), "720x1280");

    assert!("720".parse::<Canvas>().is_err());
    assert!("0x10".parse::<Canvas>().is_err());
    assert!("ax10".parse::<Canvas>().is_err());
}

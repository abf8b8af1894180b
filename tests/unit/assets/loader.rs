use std::io::Cursor;

use super::*;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn loads_base64_data_uri() {
    let uri = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png_bytes())
    );
    let loader = DefaultAssetLoader::new(".");
    let loaded = loader
        .load_raster(RasterRequest {
            uri: &uri,
            cross_origin: CrossOrigin::Unset,
        })
        .await
        .unwrap();
    assert_eq!(loaded.image.canvas().to_string(), "2x1");
    assert_eq!(loaded.image.pixel(1, 0), [0, 255, 0, 255]);
    assert!(loaded.readable);
}

#[tokio::test]
async fn loads_relative_path_against_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("frame.png"), png_bytes()).unwrap();

    let loader = DefaultAssetLoader::new(dir.path());
    let loaded = loader
        .load_raster(RasterRequest {
            uri: "frame.png",
            cross_origin: CrossOrigin::Anonymous,
        })
        .await
        .unwrap();
    assert_eq!(loaded.image.pixel(0, 0), [255, 0, 0, 255]);

    let file_uri = format!("file://{}", dir.path().join("frame.png").display());
    assert!(
        loader
            .load_raster(RasterRequest {
                uri: &file_uri,
                cross_origin: CrossOrigin::Anonymous,
            })
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn missing_file_is_asset_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let loader = DefaultAssetLoader::new(dir.path());
    let err = loader
        .load_raster(RasterRequest {
            uri: "nope.png",
            cross_origin: CrossOrigin::Anonymous,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LuminaError::AssetLoad(_)));
}

#[test]
fn data_uri_without_comma_is_rejected() {
    assert!(decode_data_uri("image/png;base64").is_err());
    assert_eq!(decode_data_uri("text/plain,abc").unwrap(), b"abc");
}

#[test]
fn plain_data_uri_payload_is_percent_decoded() {
    assert_eq!(
        decode_data_uri("image/svg+xml,%3Csvg%20width%3D%221%22%2F%3E").unwrap(),
        b"<svg width=\"1\"/>"
    );
}

#[tokio::test]
async fn loads_percent_encoded_data_uri() {
    let escaped =
        percent_encoding::percent_encode(&png_bytes(), percent_encoding::NON_ALPHANUMERIC)
            .to_string();
    let uri = format!("data:image/png,{escaped}");
    let loaded = DefaultAssetLoader::new(".")
        .load_raster(RasterRequest {
            uri: &uri,
            cross_origin: CrossOrigin::Anonymous,
        })
        .await
        .unwrap();
    assert_eq!(loaded.image.pixel(0, 0), [255, 0, 0, 255]);
}

#[cfg(not(feature = "http"))]
#[tokio::test]
async fn remote_without_http_feature_fails_cleanly() {
    let loader = DefaultAssetLoader::new(".");
    let err = loader
        .load_raster(RasterRequest {
            uri: "https://example.com/frame.png",
            cross_origin: CrossOrigin::Anonymous,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("'http' feature"));
}

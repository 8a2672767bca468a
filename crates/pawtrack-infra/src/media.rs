//! Client-side image handling: raster images are downscaled to a fixed
//! maximum width and re-encoded as JPEG before being embedded in the
//! document as base64 data URIs.

use std::io::Cursor;

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use pawtrack_types::assistant::TaggedImage;
use pawtrack_types::config::MAX_IMAGE_WIDTH;
use pawtrack_types::error::MediaError;

/// JPEG quality for embedded images. Embedded payloads ride inside every
/// PUT of the document, so they are kept small.
const JPEG_QUALITY: u8 = 60;

/// Decode raw image bytes, downscale to at most [`MAX_IMAGE_WIDTH`]
/// pixels wide (aspect ratio preserved), and return a JPEG data URI.
pub fn downscale_to_data_uri(bytes: &[u8]) -> Result<String, MediaError> {
    let img = image::load_from_memory(bytes)
        .map_err(|err| MediaError::Decode(err.to_string()))?;

    let img = if img.width() > MAX_IMAGE_WIDTH {
        img.resize(MAX_IMAGE_WIDTH, u32::MAX, FilterType::Triangle)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let img = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut encoded = Vec::new();
    let mut cursor = Cursor::new(&mut encoded);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(|err| MediaError::Encode(err.to_string()))?;

    Ok(encode_data_uri(&TaggedImage {
        mime_type: "image/jpeg".to_string(),
        data: encoded,
    }))
}

/// Render a tagged image as a base64 data URI.
pub fn encode_data_uri(image: &TaggedImage) -> String {
    format!(
        "data:{};base64,{}",
        image.mime_type,
        base64::engine::general_purpose::STANDARD.encode(&image.data)
    )
}

/// Parse a `data:<mime>;base64,<payload>` URI back into tagged bytes.
pub fn decode_data_uri(uri: &str) -> Result<TaggedImage, MediaError> {
    let rest = uri.strip_prefix("data:").ok_or(MediaError::NotADataUri)?;
    let (mime_type, payload) = rest.split_once(";base64,").ok_or(MediaError::NotADataUri)?;
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| MediaError::Decode(err.to_string()))?;
    Ok(TaggedImage {
        mime_type: mime_type.to_string(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 120, 40]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn wide_images_are_downscaled_to_the_max_width() {
        let uri = downscale_to_data_uri(&png_bytes(1600, 400)).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let decoded = decode_data_uri(&uri).unwrap();
        let img = image::load_from_memory(&decoded.data).unwrap();
        assert_eq!(img.width(), MAX_IMAGE_WIDTH);
        assert_eq!(img.height(), 200);
    }

    #[test]
    fn small_images_keep_their_size() {
        let uri = downscale_to_data_uri(&png_bytes(100, 80)).unwrap();
        let decoded = decode_data_uri(&uri).unwrap();
        let img = image::load_from_memory(&decoded.data).unwrap();
        assert_eq!((img.width(), img.height()), (100, 80));
    }

    #[test]
    fn data_uri_round_trips() {
        let original = TaggedImage {
            mime_type: "image/png".into(),
            data: vec![1, 2, 3, 4],
        };
        let uri = encode_data_uri(&original);
        assert_eq!(decode_data_uri(&uri).unwrap(), original);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        assert!(matches!(
            downscale_to_data_uri(b"not an image"),
            Err(MediaError::Decode(_))
        ));
        assert!(matches!(
            decode_data_uri("http://not-a-data-uri"),
            Err(MediaError::NotADataUri)
        ));
    }
}

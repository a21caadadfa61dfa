/// Photo payload helpers: data-URL normalisation and base64 decoding
use base64::{Engine as _, engine::general_purpose::STANDARD};

const DATA_IMAGE_PREFIX: &str = "data:image";
const JPEG_DATA_PREFIX: &str = "data:image/jpeg;base64,";

/// Turn a stored photo into something an `<img src>` or download link accepts.
/// Full data URLs are kept; bare base64 is assumed to be JPEG.
pub fn photo_data_url(photo: &str) -> String {
    let photo = photo.trim();
    if photo.starts_with(DATA_IMAGE_PREFIX) {
        photo.to_string()
    } else {
        format!("{}{}", JPEG_DATA_PREFIX, photo)
    }
}

/// Decode the bytes carried by a base64 data URL
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = data_url
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .unwrap_or(data_url);

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact)
}

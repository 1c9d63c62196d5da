use base64::Engine as _;

pub const ITINERARY_FILENAME: &str = "itinerary.md";

pub const DATA_URL_PREFIX: &str = "data:text/markdown;charset=utf-8;base64,";

/// Self-contained download link target. The bytes are base64-encoded, so the
/// file the browser saves is exactly the generated text.
pub fn download_href(itinerary: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(itinerary.as_bytes());
    format!("{}{}", DATA_URL_PREFIX, encoded)
}

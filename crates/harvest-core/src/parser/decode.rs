use crate::error::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Decode a base64 result payload into UTF-8 text.
///
/// Whitespace anywhere in the payload is ignored, so trailing newlines and
/// line-wrapped (MIME style) encodings both decode.
pub fn decode_result(result: &str) -> Result<String> {
    let compact: String = result.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode raw output the way agents report it.
pub fn encode_result(output: &str) -> String {
    BASE64.encode(output.as_bytes())
}

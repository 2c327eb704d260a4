use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode raw bytes as UTF-8, ignoring whatever charset the server declared.
///
/// A byte order mark still wins, so a UTF-16 page with a BOM decodes correctly.
pub fn decode_html(bytes: &[u8]) -> DecodedHtml {
    let encoding = Encoding::for_bom(bytes).map_or(UTF_8, |(enc, _)| enc);
    let (text, used, had_errors) = encoding.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}

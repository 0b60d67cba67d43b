use bytes::{BufMut, Bytes, BytesMut};

/// UTF-8 byte-order mark that precedes the message body.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

// Host color codes look like "\x1b[0;32m" (7 bytes) before the message and
// "\x1b[0m" (4 bytes) after it.
const COLOR_PREFIX_LEN: usize = 7;
const COLOR_SUFFIX_LEN: usize = 4;
const MIN_STRIPPABLE_LEN: usize = COLOR_PREFIX_LEN + COLOR_SUFFIX_LEN;

/// Removes the leading color escape and trailing reset sequence.
///
/// Payloads of 11 bytes or fewer, and payloads where the cut would split a
/// UTF-8 character, are returned unchanged.
pub fn strip_color_codes(payload: &str) -> &str {
    if payload.len() <= MIN_STRIPPABLE_LEN {
        return payload;
    }
    payload
        .get(COLOR_PREFIX_LEN..payload.len() - COLOR_SUFFIX_LEN)
        .unwrap_or(payload)
}

/// Encodes a complete syslog record.
///
/// Client id and tag are written verbatim, so empty values leave empty fields.
pub fn encode(priority: u8, client_id: &str, tag: &str, payload: &str) -> Bytes {
    let header = format!("<{priority}>1 - {client_id} {tag} - - - ");

    let mut record = BytesMut::with_capacity(header.len() + BOM.len() + payload.len());
    record.put_slice(header.as_bytes());
    record.put_slice(BOM);
    record.put_slice(payload.as_bytes());
    record.freeze()
}

/// Builds wire records, optionally sanitizing payloads first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormatter {
    strip_colors: bool,
}

impl Default for RecordFormatter {
    fn default() -> Self {
        Self { strip_colors: true }
    }
}

impl RecordFormatter {
    pub fn new(strip_colors: bool) -> Self {
        Self { strip_colors }
    }

    pub fn strip_colors(&self) -> bool {
        self.strip_colors
    }

    pub fn set_strip_colors(&mut self, strip_colors: bool) {
        self.strip_colors = strip_colors;
    }

    pub fn sanitize<'a>(&self, payload: &'a str) -> &'a str {
        if self.strip_colors {
            strip_color_codes(payload)
        } else {
            payload
        }
    }

    pub fn format(&self, priority: u8, client_id: &str, tag: &str, payload: &str) -> Bytes {
        encode(priority, client_id, tag, self.sanitize(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORED_HELLO: &str = "\x1b[0;32mHello\x1b[0m";

    #[test]
    fn test_encode_layout() {
        let record = encode(6, "node", "wifi", "connected");
        assert_eq!(
            record.as_ref(),
            b"<6>1 - node wifi - - - \xEF\xBB\xBFconnected".as_slice()
        );
    }

    #[test]
    fn test_encode_empty_fields_verbatim() {
        let record = encode(0, "", "", "");
        assert_eq!(record.as_ref(), b"<0>1 -   - - - \xEF\xBB\xBF".as_slice());
    }

    #[test]
    fn test_strip_color_codes() {
        assert_eq!(strip_color_codes(COLORED_HELLO), "Hello");
    }

    #[test]
    fn test_strip_short_payload_passes_through() {
        assert_eq!(strip_color_codes("short"), "short");
        assert_eq!(strip_color_codes("exactly 11b"), "exactly 11b");
        assert_eq!(strip_color_codes("twelve bytes"), "b");
    }

    #[test]
    fn test_strip_never_splits_characters() {
        // The 7-byte cut would land inside the euro sign.
        let payload = "aaaaaa€bbbbbbbb";
        assert_eq!(strip_color_codes(payload), payload);
    }

    #[test]
    fn test_formatter_respects_flag() {
        let stripping = RecordFormatter::new(true);
        let verbatim = RecordFormatter::new(false);

        let stripped = stripping.format(7, "node", "app", COLORED_HELLO);
        assert!(stripped.ends_with(b"\xEF\xBB\xBFHello"));

        let untouched = verbatim.format(7, "node", "app", COLORED_HELLO);
        assert!(untouched.ends_with(COLORED_HELLO.as_bytes()));
    }
}

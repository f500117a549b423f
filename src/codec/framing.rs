//! # Message Framing
//!
//! The embedded text has the shape
//!
//! ```text
//! COPYRIGHT:<hash>[<USER_MESSAGE><ciphertext>]
//! ```
//!
//! where `hash` identifies the artwork and `ciphertext` is the optional creator
//! message, XOR-obfuscated with the buyer key.

pub const COPYRIGHT_PREFIX: &str = "COPYRIGHT:";
pub const USER_MESSAGE_DELIMITER: &str = "<USER_MESSAGE>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedMessage {
    pub copyright_hash: String,
    pub creator_ciphertext: Option<String>,
}

impl FramedMessage {
    pub fn new(copyright_hash: impl Into<String>, creator_ciphertext: Option<String>) -> Self {
        Self {
            copyright_hash: copyright_hash.into(),
            creator_ciphertext,
        }
    }

    pub fn compose(&self) -> String {
        compose(&self.copyright_hash, self.creator_ciphertext.as_deref())
    }

    pub fn split(message: &str) -> Self {
        let (copyright_hash, creator_ciphertext) = split(message);
        Self {
            copyright_hash,
            creator_ciphertext,
        }
    }
}

pub fn compose(copyright_hash: &str, creator_ciphertext: Option<&str>) -> String {
    match creator_ciphertext {
        Some(ciphertext) => format!(
            "{}{}{}{}",
            COPYRIGHT_PREFIX, copyright_hash, USER_MESSAGE_DELIMITER, ciphertext
        ),
        None => format!("{}{}", COPYRIGHT_PREFIX, copyright_hash),
    }
}

/// Split at the first delimiter. The hash side loses its `COPYRIGHT:` prefix
/// when it has one; use [`is_framed`] first to reject foreign text.
pub fn split(message: &str) -> (String, Option<String>) {
    let (head, tail) = match message.split_once(USER_MESSAGE_DELIMITER) {
        Some((head, tail)) => (head, Some(tail.to_string())),
        None => (message, None),
    };
    let hash = head.strip_prefix(COPYRIGHT_PREFIX).unwrap_or(head);
    (hash.to_string(), tail)
}

pub fn is_framed(message: &str) -> bool {
    message.starts_with(COPYRIGHT_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_without_creator_message() {
        assert_eq!(compose("abc123", None), "COPYRIGHT:abc123");
    }

    #[test]
    fn test_compose_with_creator_message() {
        assert_eq!(
            compose("abc123", Some("xyz")),
            "COPYRIGHT:abc123<USER_MESSAGE>xyz"
        );
    }

    #[test]
    fn test_split_round_trip() {
        let cases = [
            ("deadbeef", None),
            ("deadbeef", Some("cipher")),
            ("", Some("")),
            ("h", Some("contains <END> and COPYRIGHT: text")),
        ];
        for (hash, ciphertext) in cases {
            let framed = FramedMessage::new(hash, ciphertext.map(str::to_string));
            assert_eq!(FramedMessage::split(&framed.compose()), framed);
        }
    }

    #[test]
    fn test_split_uses_first_delimiter() {
        let (hash, rest) = split("COPYRIGHT:h<USER_MESSAGE>a<USER_MESSAGE>b");
        assert_eq!(hash, "h");
        assert_eq!(rest.as_deref(), Some("a<USER_MESSAGE>b"));
    }

    #[test]
    fn test_is_framed() {
        assert!(is_framed("COPYRIGHT:"));
        assert!(!is_framed("copyright:abc"));
        assert!(!is_framed("\u{ff}\u{ff}"));
    }
}

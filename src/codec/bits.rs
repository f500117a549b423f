//! # Bit Codec
//!
//! Converts bytes to an MSB-first bitstream and back. Bits are carried as `u8`
//! values that are always `0` or `1`, which is what gets written into a channel
//! LSB.

use super::error::StegoError;
use super::Result;

/// Expand `data` into 8 bits per byte, most significant bit first.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for byte in data {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Pack bits back into bytes. A trailing group shorter than 8 bits is dropped.
pub fn decode(bits: &[u8]) -> Vec<u8> {
    let mut assembler = ByteAssembler::new();
    let bytes: Vec<u8> = bits.iter().filter_map(|&bit| assembler.push(bit)).collect();

    if assembler.pending() > 0 {
        log::debug!("Discarding {} trailing bits", assembler.pending());
    }
    bytes
}

/// Like [`decode`], but the result must be valid UTF-8.
pub fn decode_text(bits: &[u8]) -> Result<String> {
    String::from_utf8(decode(bits)).map_err(|e| StegoError::DecodeFailure(e.to_string()))
}

/// Render bits as a `'0'`/`'1'` string.
pub fn to_bit_string(bits: &[u8]) -> String {
    bits.iter()
        .map(|&bit| if bit & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Parse a `'0'`/`'1'` string into bits.
pub fn from_bit_string(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(StegoError::DecodeFailure(format!(
                "unexpected character {:?} at bit {}",
                other, i
            ))),
        })
        .collect()
}

/// Streaming bit-to-byte decoder.
///
/// Feed one bit at a time; every eighth bit completes a byte.
#[derive(Debug, Default, Clone)]
pub struct ByteAssembler {
    current: u8,
    filled: u8,
}

impl ByteAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the low bit of `bit`. Returns the byte once 8 bits are collected.
    pub fn push(&mut self, bit: u8) -> Option<u8> {
        self.current = (self.current << 1) | (bit & 1);
        self.filled += 1;

        if self.filled == 8 {
            let byte = self.current;
            self.current = 0;
            self.filled = 0;
            Some(byte)
        } else {
            None
        }
    }

    /// Bits collected towards the next byte.
    pub fn pending(&self) -> u8 {
        self.filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_msb_first() {
        assert_eq!(encode(b"A"), vec![0, 1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(to_bit_string(&encode(b"Hi")), "0100100001101001");
    }

    #[test]
    fn test_decode_drops_partial_group() {
        let mut bits = encode(b"ok");
        bits.extend_from_slice(&[1, 0, 1]);
        assert_eq!(decode(&bits), b"ok".to_vec());
    }

    #[test]
    fn test_utf8_text_round_trip() {
        let text = "café ☕ naïve";
        assert_eq!(decode_text(&encode(text.as_bytes())).unwrap(), text);
    }

    #[test]
    fn test_decode_text_rejects_invalid_utf8() {
        let bits = encode(&[0xC3, 0x28]);
        assert!(matches!(decode_text(&bits), Err(StegoError::DecodeFailure(_))));
    }

    #[test]
    fn test_bit_string_parsing() {
        assert_eq!(from_bit_string("0110").unwrap(), vec![0, 1, 1, 0]);
        assert!(matches!(
            from_bit_string("01x0"),
            Err(StegoError::DecodeFailure(_))
        ));
    }

    #[test]
    fn test_assembler_emits_every_eighth_bit() {
        let mut assembler = ByteAssembler::new();
        let out: Vec<Option<u8>> = encode(&[0xA5]).into_iter().map(|b| assembler.push(b)).collect();

        assert!(out[..7].iter().all(Option::is_none));
        assert_eq!(out[7], Some(0xA5));
        assert_eq!(assembler.pending(), 0);
    }
}

// Mon Jan 19 2026 - Alex

use crate::pattern::parser;
use crate::pattern::PatternSettings;
use std::fmt;

/// A compiled byte signature: per-position `(value, mask)` pairs.
///
/// A candidate byte `c` matches position `i` iff `c & masks[i] == bytes[i]`.
/// Values are canonicalised at construction (`bytes[i] & masks[i] == bytes[i]`)
/// so the masked comparison is valid for literal and wildcarded positions
/// alike. Trailing full wildcards never constrain a match; only the first
/// `trimmed_size` positions are ever compared, while `size` keeps the
/// original length for region-end bounds arithmetic.
///
/// Any parse failure yields the empty pattern, which matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<u8>,
    masks: Vec<u8>,
    trimmed_size: usize,
    needs_masks: bool,
}

impl Pattern {
    /// Parses an IDA-style text signature, e.g. `"48 8B ?? ?? 89 ?4"`.
    pub fn from_ida(signature: &str) -> Self {
        Self::from_ida_with(signature, &PatternSettings::default())
    }

    pub fn from_ida_with(signature: &str, settings: &PatternSettings) -> Self {
        match parser::parse_ida(signature, settings.wildcard) {
            Some(pairs) => Self::from_pairs(pairs),
            None => Self::empty(),
        }
    }

    /// Builds a pattern from a byte string plus a per-byte mask string in
    /// which `wildcard` marks a position as unknown. Without a mask the
    /// signature is fully literal.
    pub fn from_code(code: &[u8], mask: Option<&[u8]>, wildcard: u8) -> Self {
        match mask {
            Some(mask) => {
                if mask.len() != code.len() {
                    return Self::empty();
                }

                let pairs = code
                    .iter()
                    .zip(mask.iter())
                    .map(|(&b, &m)| if m == wildcard { (0, 0x00) } else { (b, 0xFF) })
                    .collect();

                Self::from_pairs(pairs)
            }
            None => Self::from_pairs(code.iter().map(|&b| (b, 0xFF)).collect()),
        }
    }

    /// Builds a pattern from raw value and mask buffers of equal length.
    /// Without masks every byte is literal.
    pub fn from_raw(bytes: &[u8], masks: Option<&[u8]>) -> Self {
        match masks {
            Some(masks) => {
                if masks.len() != bytes.len() {
                    return Self::empty();
                }

                Self::from_pairs(
                    bytes
                        .iter()
                        .zip(masks.iter())
                        .map(|(&b, &m)| (b, m))
                        .collect(),
                )
            }
            None => Self::from_pairs(bytes.iter().map(|&b| (b, 0xFF)).collect()),
        }
    }

    pub fn empty() -> Self {
        Self {
            bytes: Vec::new(),
            masks: Vec::new(),
            trimmed_size: 0,
            needs_masks: false,
        }
    }

    fn from_pairs(pairs: Vec<(u8, u8)>) -> Self {
        let mut bytes = Vec::with_capacity(pairs.len());
        let mut masks = Vec::with_capacity(pairs.len());

        for (value, mask) in pairs {
            bytes.push(value & mask);
            masks.push(mask);
        }

        let mut trimmed_size = masks.len();
        while trimmed_size > 0 && masks[trimmed_size - 1] == 0x00 {
            trimmed_size -= 1;
        }

        let needs_masks = masks[..trimmed_size].iter().any(|&m| m != 0xFF);

        Self {
            bytes,
            masks,
            trimmed_size,
            needs_masks,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn masks(&self) -> &[u8] {
        &self.masks
    }

    /// Original length in bytes, trailing wildcards included.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Length after trailing-wildcard removal; the number of positions a
    /// scan actually verifies.
    pub fn trimmed_size(&self) -> usize {
        self.trimmed_size
    }

    /// False iff every verified position is a full literal byte.
    pub fn needs_masks(&self) -> bool {
        self.needs_masks
    }

    /// True for patterns that can never match (parse failure or all-wildcard).
    pub fn is_empty(&self) -> bool {
        self.trimmed_size == 0
    }

    /// Tests the pattern directly against `data` at `offset`, without a scan.
    pub fn match_at(&self, data: &[u8], offset: usize) -> bool {
        if self.trimmed_size == 0 {
            return false;
        }
        if offset + self.trimmed_size > data.len() {
            return false;
        }

        let window = &data[offset..];
        (0..self.trimmed_size)
            .rev()
            .all(|i| window[i] & self.masks[i] == self.bytes[i])
    }

    /// Stable 64-bit FNV-1a over the value/mask pairs. Cache key material.
    pub fn fingerprint(&self) -> u64 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;

        for (&b, &m) in self.bytes.iter().zip(self.masks.iter()) {
            hash = (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3);
            hash = (hash ^ m as u64).wrapping_mul(0x0000_0100_0000_01b3);
        }

        hash
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (&b, &m)) in self.bytes.iter().zip(self.masks.iter()).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match m {
                0xFF => write!(f, "{:02X}", b)?,
                0x00 => write!(f, "??")?,
                0xF0 => write!(f, "{:X}?", b >> 4)?,
                0x0F => write!(f, "?{:X}", b & 0xF)?,
                _ => write!(f, "{:02X}&{:02X}", b, m)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(
        pattern: &Pattern,
        size: usize,
        trimmed_size: usize,
        needs_masks: bool,
        bytes: &[u8],
        masks: &[u8],
    ) {
        assert_eq!(pattern.size(), size);
        assert_eq!(pattern.trimmed_size(), trimmed_size);
        assert_eq!(pattern.needs_masks(), needs_masks);
        assert_eq!(pattern.bytes(), bytes);
        assert_eq!(pattern.masks(), masks);
    }

    #[test]
    fn test_ida_literal() {
        check(
            &Pattern::from_ida("01 02 03 04 05"),
            5,
            5,
            false,
            b"\x01\x02\x03\x04\x05",
            b"\xFF\xFF\xFF\xFF\xFF",
        );
    }

    #[test]
    fn test_ida_trailing_wildcard() {
        check(
            &Pattern::from_ida("01 02 03 04 ?"),
            5,
            4,
            false,
            b"\x01\x02\x03\x04\x00",
            b"\xFF\xFF\xFF\xFF\x00",
        );
    }

    #[test]
    fn test_ida_nibble_masks() {
        check(
            &Pattern::from_ida("1 ?2 3 4? 5"),
            5,
            5,
            true,
            b"\x01\x02\x03\x40\x05",
            b"\xFF\x0F\xFF\xF0\xFF",
        );
        check(
            &Pattern::from_ida("01?12???34"),
            5,
            5,
            true,
            b"\x01\x01\x20\x00\x34",
            b"\xFF\x0F\xF0\x00\xFF",
        );
        check(
            &Pattern::from_ida("?1 ? 3 ?? ?5"),
            5,
            5,
            true,
            b"\x01\x00\x03\x00\x05",
            b"\x0F\x00\xFF\x00\x0F",
        );
    }

    #[test]
    fn test_ida_leading_and_trailing_wildcards() {
        check(
            &Pattern::from_ida("? 01 02 03 04 ? ? ?"),
            8,
            5,
            true,
            b"\x00\x01\x02\x03\x04\x00\x00\x00",
            b"\x00\xFF\xFF\xFF\xFF\x00\x00\x00",
        );
    }

    #[test]
    fn test_ida_mask_and_repeat() {
        check(
            &Pattern::from_ida("01 02 03#3 04 05"),
            7,
            7,
            false,
            b"\x01\x02\x03\x03\x03\x04\x05",
            b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF",
        );
        check(
            &Pattern::from_ida("01 02 03&F#3 04 05"),
            7,
            7,
            true,
            b"\x01\x02\x03\x03\x03\x04\x05",
            b"\xFF\xFF\x0F\x0F\x0F\xFF\xFF",
        );
        // canonicalisation clears value bits outside the AND-mask
        check(
            &Pattern::from_ida("01 02 33&F0#3 04 05"),
            7,
            7,
            true,
            b"\x01\x02\x30\x30\x30\x04\x05",
            b"\xFF\xFF\xF0\xF0\xF0\xFF\xFF",
        );
    }

    #[test]
    fn test_ida_parse_failure_is_empty() {
        assert!(Pattern::from_ida("01 0z 03").is_empty());
        assert!(Pattern::from_ida("01 02#").is_empty());
        assert!(Pattern::from_ida("").is_empty());
        assert!(Pattern::from_ida("? ?? ?").is_empty());
    }

    #[test]
    fn test_code_with_mask() {
        check(
            &Pattern::from_code(b"\x12\x34\x56\x78\xAB", Some(b"x?xx?"), b'?'),
            5,
            4,
            true,
            b"\x12\x00\x56\x78\x00",
            b"\xFF\x00\xFF\xFF\x00",
        );
    }

    #[test]
    fn test_code_without_mask() {
        check(
            &Pattern::from_code(b"Hello", None, b'?'),
            5,
            5,
            false,
            b"\x48\x65\x6C\x6C\x6F",
            b"\xFF\xFF\xFF\xFF\xFF",
        );
    }

    #[test]
    fn test_code_length_mismatch_is_empty() {
        assert!(Pattern::from_code(b"\x01\x02\x03", Some(b"x?"), b'?').is_empty());
    }

    #[test]
    fn test_raw() {
        check(
            &Pattern::from_raw(b"\x12\x34\x56\x78\xAB", Some(b"\xFF\x00\xFF\xFF\x00")),
            5,
            4,
            true,
            b"\x12\x00\x56\x78\x00",
            b"\xFF\x00\xFF\xFF\x00",
        );
        check(
            &Pattern::from_raw(b"\x12\x34", None),
            2,
            2,
            false,
            b"\x12\x34",
            b"\xFF\xFF",
        );
        assert!(Pattern::from_raw(b"\x01", Some(b"\xFF\xFF")).is_empty());
    }

    #[test]
    fn test_raw_canonicalises() {
        let pattern = Pattern::from_raw(b"\xAB\xCD", Some(b"\x0F\xFF"));
        assert_eq!(pattern.bytes(), b"\x0B\xCD");
        for (&b, &m) in pattern.bytes().iter().zip(pattern.masks().iter()) {
            assert_eq!(b & m, b);
        }
    }

    #[test]
    fn test_trim_invariant() {
        let pattern = Pattern::from_ida("01 ?? 02 ?? ??");
        assert_eq!(pattern.trimmed_size(), 3);
        assert_ne!(pattern.masks()[pattern.trimmed_size() - 1], 0);
    }

    #[test]
    fn test_match_at() {
        let pattern = Pattern::from_ida("01 ?2 3? 45");
        let data = b"\x00\x01\x52\x34\x45\x00";

        assert!(pattern.match_at(data, 1));
        assert!(!pattern.match_at(data, 0));
        assert!(!pattern.match_at(data, 3));
        // window shorter than the trimmed pattern
        assert!(!pattern.match_at(data, 5));
        assert!(!Pattern::empty().match_at(data, 0));
    }

    #[test]
    fn test_fingerprint_distinguishes_masks() {
        let a = Pattern::from_ida("01 02 03");
        let b = Pattern::from_ida("01 ?2 03");
        let c = Pattern::from_ida("01 02 03");

        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_display_round_trip() {
        let text = "48 8B ?? ?4 05&7F C3";
        let pattern = Pattern::from_ida(text);
        assert_eq!(pattern.to_string(), "48 8B ?? ?4 05&7F C3");
        assert_eq!(Pattern::from_ida(&pattern.to_string()), pattern);
    }
}

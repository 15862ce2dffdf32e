//! Growable text buffer with firmware string semantics.
//!
//! [`Text`] owns its bytes exclusively; cloning copies them. Offsets and lengths
//! are byte counts, comparison is byte-wise, and case conversion and trimming
//! follow the C locale (ASCII only), matching what firmware code expects from
//! its string type.
//!
//! Searches never fail: absence is `None`. Out-of-range offsets degrade to an
//! empty result or a no-op rather than panicking.

use crate::TextError;
use std::borrow::Cow;
use std::ffi::CString;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Default number of digits after the decimal point for float conversion.
pub const DEFAULT_DECIMALS: u8 = 2;

/// Numeric base for integer-to-text conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    /// Base 2.
    Bin,
    /// Base 8.
    Oct,
    /// Base 10.
    Dec,
    /// Base 16, lowercase digits.
    Hex,
}

impl Base {
    /// The radix as an integer.
    pub const fn radix(self) -> u32 {
        match self {
            Base::Bin => 2,
            Base::Oct => 8,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }
}

impl TryFrom<u32> for Base {
    type Error = TextError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            2 => Ok(Base::Bin),
            8 => Ok(Base::Oct),
            10 => Ok(Base::Dec),
            16 => Ok(Base::Hex),
            other => Err(TextError::InvalidBase(other)),
        }
    }
}

/// An owned, mutable, growable byte string.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    bytes: Vec<u8>,
}

// ============================================================================
// Construction
// ============================================================================

impl Text {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Text { bytes: Vec::new() }
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Text {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Format a signed integer in the given base.
    ///
    /// No padding and no base prefix. A negative value keeps its sign only in
    /// decimal; other bases render the 32-bit two's-complement pattern, as a
    /// 32-bit microcontroller would.
    pub fn from_int(value: i32, base: Base) -> Self {
        let s = match base {
            Base::Dec => value.to_string(),
            Base::Hex => format!("{:x}", value),
            Base::Oct => format!("{:o}", value),
            Base::Bin => format!("{:b}", value),
        };
        Text::from(s)
    }

    /// Format an unsigned integer in the given base.
    pub fn from_uint(value: u32, base: Base) -> Self {
        let s = match base {
            Base::Dec => value.to_string(),
            Base::Hex => format!("{:x}", value),
            Base::Oct => format!("{:o}", value),
            Base::Bin => format!("{:b}", value),
        };
        Text::from(s)
    }

    /// Format a float with exactly `decimals` digits after the point.
    ///
    /// Precision is a byte, as on the firmware API, so every value formats.
    pub fn from_float(value: f64, decimals: u8) -> Self {
        let s = if value.is_nan() {
            "nan".to_string()
        } else if value.is_infinite() {
            if value > 0.0 { "inf" } else { "-inf" }.to_string()
        } else {
            format!("{:.*}", usize::from(decimals), value)
        };
        Text::from(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text {
            bytes: s.into_bytes(),
        }
    }
}

impl From<&String> for Text {
    fn from(s: &String) -> Self {
        Text::from(s.as_str())
    }
}

impl From<&Text> for Text {
    fn from(t: &Text) -> Self {
        t.clone()
    }
}

impl From<&[u8]> for Text {
    fn from(bytes: &[u8]) -> Self {
        Text {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<Vec<u8>> for Text {
    fn from(bytes: Vec<u8>) -> Self {
        Text { bytes }
    }
}

impl From<char> for Text {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Text::from(&*c.encode_utf8(&mut buf))
    }
}

impl From<i32> for Text {
    fn from(value: i32) -> Self {
        Text::from_int(value, Base::Dec)
    }
}

impl From<u32> for Text {
    fn from(value: u32) -> Self {
        Text::from_uint(value, Base::Dec)
    }
}

impl From<i64> for Text {
    fn from(value: i64) -> Self {
        Text::from(value.to_string())
    }
}

impl From<u64> for Text {
    fn from(value: u64) -> Self {
        Text::from(value.to_string())
    }
}

impl From<f32> for Text {
    fn from(value: f32) -> Self {
        Text::from_float(value as f64, DEFAULT_DECIMALS)
    }
}

impl From<f64> for Text {
    fn from(value: f64) -> Self {
        Text::from_float(value, DEFAULT_DECIMALS)
    }
}

// ============================================================================
// Views
// ============================================================================

impl Text {
    /// Number of bytes, excluding any terminator.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The contents as `&str` if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// The contents as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// A NUL-terminated copy. Content after an embedded NUL is not visible
    /// through this view, exactly as with a C string.
    pub fn to_c_string(&self) -> CString {
        let end = self
            .bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.bytes.len());
        CString::new(&self.bytes[..end]).unwrap_or_default()
    }

    /// Copy bytes starting at `index` into `buf`, always NUL-terminating.
    ///
    /// Copies at most `buf.len() - 1` bytes and returns how many were copied.
    /// An empty `buf` is left untouched.
    pub fn copy_to(&self, buf: &mut [u8], index: usize) -> usize {
        if buf.is_empty() {
            return 0;
        }
        if index >= self.bytes.len() {
            buf[0] = 0;
            return 0;
        }
        let n = (buf.len() - 1).min(self.bytes.len() - index);
        buf[..n].copy_from_slice(&self.bytes[index..index + n]);
        buf[n] = 0;
        n
    }

    /// Reserve room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.bytes.reserve(additional);
    }

    /// The byte at `index`.
    pub fn char_at(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Overwrite the byte at `index`. Out of range is a no-op.
    pub fn set_char_at(&mut self, index: usize, byte: u8) {
        if let Some(slot) = self.bytes.get_mut(index) {
            *slot = byte;
        }
    }
}

// ============================================================================
// Concatenation
// ============================================================================

impl Text {
    /// Append anything convertible to text, including numbers.
    pub fn concat(&mut self, value: impl Into<Text>) -> &mut Self {
        let other = value.into();
        self.bytes.extend_from_slice(&other.bytes);
        self
    }

    /// Append a string slice.
    pub fn push_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    /// Append a single character, UTF-8 encoded.
    pub fn push(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push_str(c.encode_utf8(&mut buf));
    }

    /// Append a single raw byte.
    pub fn push_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

impl AddAssign<&str> for Text {
    fn add_assign(&mut self, rhs: &str) {
        self.push_str(rhs);
    }
}

impl AddAssign<&Text> for Text {
    fn add_assign(&mut self, rhs: &Text) {
        self.bytes.extend_from_slice(&rhs.bytes);
    }
}

impl AddAssign<Text> for Text {
    fn add_assign(&mut self, rhs: Text) {
        self.bytes.extend_from_slice(&rhs.bytes);
    }
}

impl AddAssign<char> for Text {
    fn add_assign(&mut self, rhs: char) {
        self.push(rhs);
    }
}

impl Add<&str> for Text {
    type Output = Text;

    fn add(mut self, rhs: &str) -> Text {
        self += rhs;
        self
    }
}

impl Add<&Text> for Text {
    type Output = Text;

    fn add(mut self, rhs: &Text) -> Text {
        self += rhs;
        self
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl Text {
    /// Byte-wise equality with anything byte-like.
    pub fn equals(&self, other: impl AsRef<[u8]>) -> bool {
        self.bytes == other.as_ref()
    }

    /// ASCII case-insensitive equality.
    pub fn equals_ignore_case(&self, other: impl AsRef<[u8]>) -> bool {
        self.bytes.eq_ignore_ascii_case(other.as_ref())
    }

    /// Whether the buffer begins with `prefix`.
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.bytes.starts_with(prefix.as_ref())
    }

    /// Whether `prefix` occurs at byte `offset`. False when `offset` is past the end.
    pub fn starts_with_at(&self, prefix: impl AsRef<[u8]>, offset: usize) -> bool {
        if offset >= self.bytes.len() {
            return false;
        }
        self.bytes[offset..].starts_with(prefix.as_ref())
    }

    /// Whether the buffer ends with `suffix`.
    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        self.bytes.ends_with(suffix.as_ref())
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<Text> for &str {
    fn eq(&self, other: &Text) -> bool {
        self.as_bytes() == other.bytes
    }
}

impl AsRef<[u8]> for Text {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

// ============================================================================
// Search
// ============================================================================

impl Text {
    /// Offset of the first occurrence of `needle`.
    pub fn index_of(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        self.index_of_from(needle, 0)
    }

    /// Offset of the first occurrence of `needle` at or after `from`.
    pub fn index_of_from(&self, needle: impl AsRef<[u8]>, from: usize) -> Option<usize> {
        find_bytes(&self.bytes, needle.as_ref(), from)
    }

    /// Offset of the last occurrence of `needle`.
    pub fn last_index_of(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        self.last_index_of_from(needle, usize::MAX)
    }

    /// Offset of the last occurrence of `needle` starting at or before `from`.
    pub fn last_index_of_from(&self, needle: impl AsRef<[u8]>, from: usize) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.len() > self.bytes.len() {
            return None;
        }
        let last_start = (self.bytes.len() - needle.len()).min(from);
        (0..=last_start)
            .rev()
            .find(|&i| &self.bytes[i..i + needle.len()] == needle)
    }

    /// Bytes from `begin` to the end. Empty when `begin` is past the end.
    pub fn substring(&self, begin: usize) -> Text {
        match self.bytes.get(begin..) {
            Some(slice) => Text::from(slice),
            None => Text::new(),
        }
    }

    /// Bytes in `begin..end`, with `end` clamped to the length.
    /// Empty when `begin` is past the end or `end <= begin`.
    pub fn substring_range(&self, begin: usize, end: usize) -> Text {
        let end = end.min(self.bytes.len());
        if begin >= self.bytes.len() || end <= begin {
            return Text::new();
        }
        Text::from(&self.bytes[begin..end])
    }
}

/// First occurrence of `needle` in `haystack` at or after `from`.
pub(crate) fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

// ============================================================================
// In-place mutation
// ============================================================================

impl Text {
    /// Replace every non-overlapping occurrence of `find` with `with`.
    /// An empty `find` leaves the buffer unchanged.
    pub fn replace(&mut self, find: impl AsRef<[u8]>, with: impl AsRef<[u8]>) {
        let find = find.as_ref();
        let with = with.as_ref();
        if find.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.bytes.len());
        let mut pos = 0;
        while let Some(hit) = find_bytes(&self.bytes, find, pos) {
            out.extend_from_slice(&self.bytes[pos..hit]);
            out.extend_from_slice(with);
            pos = hit + find.len();
        }
        out.extend_from_slice(&self.bytes[pos..]);
        self.bytes = out;
    }

    /// Truncate at `index`. No-op when `index` is past the end.
    pub fn remove(&mut self, index: usize) {
        if index < self.bytes.len() {
            self.bytes.truncate(index);
        }
    }

    /// Remove up to `count` bytes starting at `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) {
        if index < self.bytes.len() {
            let end = index.saturating_add(count).min(self.bytes.len());
            self.bytes.drain(index..end);
        }
    }

    /// ASCII lowercase in place.
    pub fn to_lower_case(&mut self) {
        self.bytes.make_ascii_lowercase();
    }

    /// ASCII uppercase in place.
    pub fn to_upper_case(&mut self) {
        self.bytes.make_ascii_uppercase();
    }

    /// Strip leading and trailing C whitespace (space, \t, \n, \v, \f, \r).
    pub fn trim(&mut self) {
        let Some(start) = self.bytes.iter().position(|&b| !is_c_space(b)) else {
            self.bytes.clear();
            return;
        };
        let end = self
            .bytes
            .iter()
            .rposition(|&b| !is_c_space(b))
            .map_or(self.bytes.len(), |i| i + 1);
        self.bytes.truncate(end);
        self.bytes.drain(..start);
    }
}

fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

// ============================================================================
// Text to number
// ============================================================================

impl Text {
    /// Parse a leading decimal integer, C `atoi` style.
    ///
    /// Leading whitespace and one sign are accepted; parsing stops at the first
    /// non-digit. Returns 0 when there are no digits, and saturates on overflow.
    pub fn to_int(&self) -> i32 {
        let mut iter = self.bytes.iter().copied().skip_while(|&b| is_c_space(b)).peekable();
        let negative = match iter.peek() {
            Some(b'-') => {
                iter.next();
                true
            }
            Some(b'+') => {
                iter.next();
                false
            }
            _ => false,
        };
        let mut value: i64 = 0;
        for b in iter {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .saturating_mul(10)
                .saturating_add((b - b'0') as i64)
                .min(i64::from(i32::MAX) + 1);
        }
        let value = if negative { -value } else { value };
        value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Parse a leading decimal float, C `atof` style. Returns 0.0 when no number is present.
    pub fn to_double(&self) -> f64 {
        let start = self
            .bytes
            .iter()
            .position(|&b| !is_c_space(b))
            .unwrap_or(self.bytes.len());
        let rest = &self.bytes[start..];
        let end = float_prefix_len(rest);
        std::str::from_utf8(&rest[..end])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// [`Text::to_double`] narrowed to `f32`.
    pub fn to_float(&self) -> f32 {
        self.to_double() as f32
    }
}

/// Length of the longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn float_prefix_len(s: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if i < s.len() && (s[i] == b'+' || s[i] == b'-') {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;
    if i < s.len() && s[i] == b'.' {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }
    if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
        let mut j = i + 1;
        if j < s.len() && (s[j] == b'+' || s[j] == b'-') {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

// ============================================================================
// Formatting
// ============================================================================

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({:?})", self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_int_bases() {
        assert_eq!(Text::from_int(10, Base::Bin), "1010");
        assert_eq!(Text::from_int(8, Base::Oct), "10");
        assert_eq!(Text::from_int(-42, Base::Dec), "-42");
        assert_eq!(Text::from_int(255, Base::Hex), "ff");
        assert_eq!(Text::from_int(0, Base::Bin), "0");
        assert_eq!(Text::from_int(-1, Base::Hex), "ffffffff");
        assert_eq!(Text::from_uint(u32::MAX, Base::Dec), "4294967295");
    }

    #[test]
    fn test_base_try_from() {
        assert_eq!(Base::try_from(16), Ok(Base::Hex));
        assert_eq!(Base::try_from(3), Err(TextError::InvalidBase(3)));
        assert_eq!(Base::Oct.radix(), 8);
    }

    #[test]
    fn test_from_float_precision() {
        assert_eq!(Text::from(3.14159f64), "3.14");
        assert_eq!(Text::from_float(2.4, 0), "2");
        assert_eq!(Text::from_float(-0.125, 3), "-0.125");
        assert_eq!(Text::from_float(1.0, 4), "1.0000");
        assert_eq!(Text::from_float(f64::NAN, 2), "nan");
    }

    #[test]
    fn test_from_float_max_precision() {
        let t = Text::from_float(1.5, u8::MAX);
        assert_eq!(t.len(), 2 + usize::from(u8::MAX));
        assert!(t.starts_with("1.5000"));
        assert!(t.ends_with("0"));
    }

    #[test]
    fn test_integer_round_trip() {
        for x in [0, 1, -1, 42, -42, 123_456, i32::MAX, i32::MIN] {
            let text = Text::from_int(x, Base::Dec);
            assert_eq!(Text::from_int(text.to_int(), Base::Dec), text, "round trip of {}", x);
            assert_eq!(text.to_int(), x);
        }
    }

    #[test]
    fn test_to_int_prefix_parsing() {
        assert_eq!(Text::from("  -123abc").to_int(), -123);
        assert_eq!(Text::from("+7").to_int(), 7);
        assert_eq!(Text::from("abc").to_int(), 0);
        assert_eq!(Text::from("").to_int(), 0);
        assert_eq!(Text::from("99999999999").to_int(), i32::MAX);
        assert_eq!(Text::from("-99999999999").to_int(), i32::MIN);
    }

    #[test]
    fn test_to_double_prefix_parsing() {
        assert_eq!(Text::from("21.5C").to_double(), 21.5);
        assert_eq!(Text::from(" -1e3x").to_double(), -1000.0);
        assert_eq!(Text::from("4e").to_double(), 4.0);
        assert_eq!(Text::from(".5").to_float(), 0.5);
        assert_eq!(Text::from("-").to_double(), 0.0);
        assert_eq!(Text::from("n/a").to_double(), 0.0);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Text::from("abc");
        let mut copy = original.clone();
        copy.to_upper_case();
        copy += "d";
        assert_eq!(original, "abc");
        assert_eq!(copy, "ABCd");
    }

    #[test]
    fn test_empty_is_valid() {
        let empty = Text::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.to_c_string().as_bytes_with_nul(), b"\0");
        assert_eq!(empty.index_of("x"), None);
    }

    #[test]
    fn test_search() {
        let t = Text::from("temp=21;temp=22");
        assert_eq!(t.index_of("temp"), Some(0));
        assert_eq!(t.index_of_from("temp", 1), Some(8));
        assert_eq!(t.last_index_of("temp"), Some(8));
        assert_eq!(t.last_index_of_from("temp", 7), Some(0));
        assert_eq!(t.index_of(";"), Some(7));
        assert_eq!(t.index_of("humidity"), None);
        assert_eq!(t.index_of_from("temp", 100), None);
        assert_eq!(t.last_index_of("a very long needle that cannot fit"), None);
    }

    #[test]
    fn test_substring() {
        let t = Text::from("hello world");
        assert_eq!(t.substring(6), "world");
        assert_eq!(t.substring_range(0, 5), "hello");
        assert_eq!(t.substring_range(6, 100), "world");
        assert_eq!(t.substring_range(5, 2), "");
        assert_eq!(t.substring(50), "");
    }

    #[test]
    fn test_replace_and_remove() {
        let mut t = Text::from("a-b-c");
        t.replace("-", "--");
        assert_eq!(t, "a--b--c");
        t.replace("", "x");
        assert_eq!(t, "a--b--c");
        t.remove_range(1, 2);
        assert_eq!(t, "ab--c");
        t.remove(2);
        assert_eq!(t, "ab");
        t.remove(10);
        assert_eq!(t, "ab");
        t.remove_range(1, usize::MAX);
        assert_eq!(t, "a");
    }

    #[test]
    fn test_case_and_trim() {
        let mut t = Text::from(" \t Mixed Case\r\n");
        t.trim();
        assert_eq!(t, "Mixed Case");
        t.to_lower_case();
        assert_eq!(t, "mixed case");
        t.to_upper_case();
        assert_eq!(t, "MIXED CASE");

        let mut blank = Text::from(" \r\n ");
        blank.trim();
        assert!(blank.is_empty());
    }

    #[test]
    fn test_comparisons_are_bytewise() {
        assert!(Text::from("abc") < Text::from("abd"));
        assert!(Text::from("B") < Text::from("a"));
        assert!(Text::from("Hello").equals_ignore_case("hELLO"));
        assert!(!Text::from("Hello").equals("hello"));
        assert!(Text::from("http://x").starts_with("http"));
        assert!(Text::from("data.json").ends_with(".json"));
        assert!(Text::from("key=value").starts_with_at("value", 4));
        assert!(!Text::from("key").starts_with_at("", 3));
    }

    #[test]
    fn test_concat_numbers_and_chars() {
        let mut t = Text::from("v");
        t.concat(1).concat('.').concat(2.5f64).concat(" ok");
        assert_eq!(t, "v1.2.50 ok");
        let joined = Text::from("a") + "b" + &Text::from('c');
        assert_eq!(joined, "abc");
    }

    #[test]
    fn test_char_access() {
        let mut t = Text::from("cat");
        assert_eq!(t.char_at(0), Some(b'c'));
        assert_eq!(t.char_at(3), None);
        t.set_char_at(0, b'b');
        t.set_char_at(10, b'x');
        assert_eq!(t, "bat");
    }

    #[test]
    fn test_copy_to_terminates() {
        let t = Text::from("abcdef");
        let mut buf = [0xffu8; 4];
        assert_eq!(t.copy_to(&mut buf, 1), 3);
        assert_eq!(&buf, b"bcd\0");
        assert_eq!(t.copy_to(&mut buf, 10), 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn test_c_string_stops_at_embedded_nul() {
        let t = Text::from(&b"ab\0cd"[..]);
        assert_eq!(t.len(), 5);
        assert_eq!(t.to_c_string().as_bytes(), b"ab");
    }
}

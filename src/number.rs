//! Numeric literals: decimal, hexadecimal (`0x1F`, `1Fh`) and binary
//! (`0b101`, `101b`), each bounded by a target width.

use num_traits::Num;

use crate::error::NumberError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte = 1,
    Word = 2,
}

impl Width {
    pub fn bytes(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Width {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bits", self.bytes() * 8)
    }
}

/// Splits a literal into its digit run and radix. Prefix forms are
/// checked before suffix forms so `0x1B` stays hexadecimal.
fn split_radix(text: &str) -> (&str, u32) {
    let prefixed = |lower: &str, upper: &str| {
        text.strip_prefix(lower).or_else(|| text.strip_prefix(upper))
    };
    if let Some(digits) = prefixed("0b", "0B") {
        return (digits, 2);
    }
    if let Some(digits) = prefixed("0x", "0X") {
        return (digits, 16);
    }
    if let Some(digits) = text.strip_suffix(['b', 'B']) {
        return (digits, 2);
    }
    if let Some(digits) = text.strip_suffix(['h', 'H']) {
        return (digits, 16);
    }
    (text, 10)
}

fn digits_as<T>(digits: &str, radix: u32) -> Option<u16>
where
    T: Num + Into<u16>,
{
    T::from_str_radix(digits, radix).ok().map(Into::into)
}

/// Parses `text` as an unsigned value no wider than `width`.
pub fn parse(text: &str, width: Width) -> Result<u16, NumberError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(NumberError::Empty);
    }
    let (digits, radix) = split_radix(text);
    // from_str_radix tolerates a leading sign; literals never carry one
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(NumberError::InvalidDigit {
            text: text.to_string(),
            radix,
        });
    }
    let value = match width {
        Width::Byte => digits_as::<u8>(digits, radix),
        Width::Word => digits_as::<u16>(digits, radix),
    };
    value.ok_or_else(|| NumberError::OutOfRange {
        text: text.to_string(),
        width,
    })
}

/// Same grammar as [`parse`], reporting only whether it succeeds.
pub fn validate(text: &str, width: Width) -> bool {
    parse(text, width).is_ok()
}

//! Pure forward/inverse functions backing the catalog entries.
//!
//! Every inverse is strict: input that its forward half could not have
//! produced is refused with a [`TransformError`] instead of being decoded
//! leniently.

use std::fmt::Write as _;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::TransformError;

/// Bytes left untouched by [`url_encode`]; everything else is escaped.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

const HEX_PREFIX: &str = "0x";

const DUMP_WIDTH: usize = 16;
const DUMP_HEX_COLUMN: usize = 10;
const DUMP_ASCII_COLUMN: usize = 60;

/// Standard padded Base64 of the UTF-8 bytes.
pub fn base64_encode(input: &str) -> Result<String, TransformError> {
    Ok(STANDARD.encode(input.as_bytes()))
}

/// Strict standard Base64 decode; the result must be UTF-8.
pub fn base64_decode(input: &str) -> Result<String, TransformError> {
    let bytes = STANDARD.decode(input)?;
    Ok(String::from_utf8(bytes)?)
}

/// `0x` followed by lowercase hex of the UTF-8 bytes.
pub fn hex_encode(input: &str) -> Result<String, TransformError> {
    Ok(format!("{HEX_PREFIX}{}", hex::encode(input)))
}

/// Hex decode, with or without the `0x` prefix.
pub fn hex_decode(input: &str) -> Result<String, TransformError> {
    let digits = input.strip_prefix(HEX_PREFIX).unwrap_or(input);
    Ok(String::from_utf8(hex::decode(digits)?)?)
}

/// Renders `XXXXXXXX: hh hh hh hh hh hh hh hh  hh .. hh  ascii` lines,
/// sixteen bytes each, with the ascii column always at the same offset.
pub fn hexdump_dump(input: &str) -> Result<String, TransformError> {
    let mut out = String::new();
    for (n, chunk) in input.as_bytes().chunks(DUMP_WIDTH).enumerate() {
        if n > 0 {
            out.push('\n');
        }
        let line_start = out.len();
        let _ = write!(out, "{:08X}: ", n * DUMP_WIDTH);
        for (i, byte) in chunk.iter().enumerate() {
            if i == DUMP_WIDTH / 2 {
                out.push(' ');
            }
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{byte:02X}");
        }
        let used = out.len() - line_start;
        out.extend(std::iter::repeat_n(' ', DUMP_ASCII_COLUMN - used));
        out.extend(chunk.iter().map(|b| dump_char(*b)));
    }
    Ok(out)
}

/// Parses the output of [`hexdump_dump`] back into text.
pub fn hexdump_restore(input: &str) -> Result<String, TransformError> {
    if input.is_empty() {
        return Ok(String::new());
    }

    let lines: Vec<&str> = input.split('\n').collect();
    let mut bytes = Vec::with_capacity(lines.len() * DUMP_WIDTH);
    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let bad = |reason| TransformError::DumpLine {
            line: line_no,
            reason,
        };

        let offset_field = line.get(..8).ok_or_else(|| bad("truncated offset"))?;
        if !offset_field.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad("offset is not hex"));
        }
        let offset =
            usize::from_str_radix(offset_field, 16).map_err(|_| bad("offset is not hex"))?;
        if offset != idx * DUMP_WIDTH {
            return Err(bad("offset out of sequence"));
        }
        if line.get(8..DUMP_HEX_COLUMN) != Some(": ") {
            return Err(bad("missing offset separator"));
        }

        let region = line
            .get(DUMP_HEX_COLUMN..DUMP_ASCII_COLUMN)
            .ok_or_else(|| bad("truncated byte column"))?;
        let before = bytes.len();
        for token in region.split_ascii_whitespace() {
            if token.len() != 2 {
                return Err(bad("byte is not two hex digits"));
            }
            bytes.extend(hex::decode(token)?);
        }

        let count = bytes.len() - before;
        if count == 0 || count > DUMP_WIDTH {
            return Err(bad("wrong number of bytes"));
        }
        if count < DUMP_WIDTH && line_no != lines.len() {
            return Err(bad("short line before the end of the dump"));
        }
        let ascii = &line[DUMP_ASCII_COLUMN..];
        if ascii.chars().count() != count {
            return Err(bad("ascii column does not match byte count"));
        }
        if !ascii.chars().eq(bytes[before..].iter().map(|b| dump_char(*b))) {
            return Err(bad("ascii column does not match bytes"));
        }
    }

    Ok(String::from_utf8(bytes)?)
}

// Printable ASCII as itself, everything else as '.'.
fn dump_char(byte: u8) -> char {
    if (0x20..0x7f).contains(&byte) {
        char::from(byte)
    } else {
        '.'
    }
}

/// Form encoding: unreserved bytes kept, space as `+`, the rest `%XX`.
pub fn url_encode(input: &str) -> Result<String, TransformError> {
    // '%' is always escaped, so every "%20" in the output is a space.
    Ok(utf8_percent_encode(input, FORM_ENCODE_SET)
        .to_string()
        .replace("%20", "+"))
}

/// Undoes [`url_encode`]. A `%` without two hex digits is an error.
pub fn url_decode(input: &str) -> Result<String, TransformError> {
    let raw = input.as_bytes();
    for (offset, _) in input.match_indices('%') {
        let well_formed = raw
            .get(offset + 1..offset + 3)
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(TransformError::PercentEscape { offset });
        }
    }
    let spaced = input.replace('+', " ");
    let bytes: Vec<u8> = percent_decode_str(&spaced).collect();
    Ok(String::from_utf8(bytes)?)
}

/// Every UTF-8 byte as a literal `\xhh` group.
pub fn unicode_encode(input: &str) -> Result<String, TransformError> {
    let mut out = String::with_capacity(input.len() * 4);
    for byte in input.as_bytes() {
        let _ = write!(out, "\\x{byte:02x}");
    }
    Ok(out)
}

/// Parses a run of `\xhh` groups and nothing else.
pub fn unicode_decode(input: &str) -> Result<String, TransformError> {
    let mut digits = Vec::with_capacity(input.len() / 2);
    for (n, group) in input.as_bytes().chunks(4).enumerate() {
        match group {
            [b'\\', b'x', hi, lo] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                digits.push(*hi);
                digits.push(*lo);
            }
            _ => return Err(TransformError::ByteEscape { offset: n * 4 }),
        }
    }
    Ok(String::from_utf8(hex::decode(digits)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_is_standard_padded() {
        assert_eq!(base64_encode("flag{x}").unwrap(), "ZmxhZ3t4fQ==");
        assert_eq!(base64_decode("ZmxhZ3t4fQ==").unwrap(), "flag{x}");
        assert!(matches!(
            base64_decode("ZmxhZ3t4fQ"),
            Err(TransformError::Base64(_))
        ));
    }

    #[test]
    fn base64_decode_refuses_non_utf8() {
        // 0xff 0xfe
        assert!(matches!(base64_decode("//4="), Err(TransformError::Utf8(_))));
    }

    #[test]
    fn hex_prefix_is_optional_on_decode() {
        assert_eq!(hex_encode("AB").unwrap(), "0x4142");
        assert_eq!(hex_decode("0x4142").unwrap(), "AB");
        assert_eq!(hex_decode("4142").unwrap(), "AB");
        assert!(matches!(hex_decode("not-hex!"), Err(TransformError::Hex(_))));
        assert!(matches!(hex_decode("0x414"), Err(TransformError::Hex(_))));
    }

    #[test]
    fn url_encoding_matches_form_rules() {
        assert_eq!(url_encode("a b&c=d/é~").unwrap(), "a+b%26c%3Dd%2F%C3%A9~");
        assert_eq!(url_decode("a+b%26c%3Dd%2F%C3%A9~").unwrap(), "a b&c=d/é~");
        assert_eq!(url_encode("1+1").unwrap(), "1%2B1");
        assert_eq!(url_decode("1%2B1").unwrap(), "1+1");
    }

    #[test]
    fn url_decode_refuses_stray_percent() {
        assert_eq!(
            url_decode("100%"),
            Err(TransformError::PercentEscape { offset: 3 })
        );
        assert_eq!(
            url_decode("%zz"),
            Err(TransformError::PercentEscape { offset: 0 })
        );
    }

    #[test]
    fn unicode_escapes_every_byte() {
        assert_eq!(unicode_encode("Hi").unwrap(), "\\x48\\x69");
        assert_eq!(unicode_decode("\\x48\\x69").unwrap(), "Hi");
        assert_eq!(unicode_encode("").unwrap(), "");
        assert_eq!(unicode_decode("").unwrap(), "");
        assert_eq!(
            unicode_decode("\\x48x69"),
            Err(TransformError::ByteEscape { offset: 4 })
        );
    }

    #[test]
    fn hexdump_layout() {
        let dump = hexdump_dump("flag{x}").unwrap();
        assert_eq!(
            dump,
            format!("00000000: 66 6C 61 67 7B 78 7D{}flag{{x}}", " ".repeat(30))
        );
        assert_eq!(dump.find("flag").unwrap(), DUMP_ASCII_COLUMN);

        let two_lines = hexdump_dump("0123456789abcdef\n").unwrap();
        let lines: Vec<&str> = two_lines.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "00000000: 30 31 32 33 34 35 36 37  38 39 61 62 63 64 65 66  0123456789abcdef"
        );
        assert!(lines[1].starts_with("00000010: 0A "));
        assert!(lines[1].ends_with("."));
    }

    #[test]
    fn hexdump_restore_checks_structure() {
        let dump = hexdump_dump("0123456789abcdefXYZ").unwrap();
        assert_eq!(hexdump_restore(&dump).unwrap(), "0123456789abcdefXYZ");

        let swapped: Vec<&str> = dump.split('\n').rev().collect();
        assert!(matches!(
            hexdump_restore(&swapped.join("\n")),
            Err(TransformError::DumpLine { line: 1, .. })
        ));
        assert!(matches!(
            hexdump_restore("hello"),
            Err(TransformError::DumpLine { line: 1, .. })
        ));
    }

    #[test]
    fn hexdump_restore_checks_ascii_column() {
        let dump = hexdump_dump("A").unwrap();
        assert_eq!(hexdump_restore(&dump).unwrap(), "A");

        let forged = format!("{}B", &dump[..DUMP_ASCII_COLUMN]);
        assert_eq!(
            hexdump_restore(&forged),
            Err(TransformError::DumpLine {
                line: 1,
                reason: "ascii column does not match bytes",
            })
        );

        let newline = hexdump_dump("\n").unwrap();
        assert!(newline.ends_with('.'));
        let forged = format!("{}x", &newline[..DUMP_ASCII_COLUMN]);
        assert!(hexdump_restore(&forged).is_err());
    }
}

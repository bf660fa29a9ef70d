//! Character-classification predicates over UTF-16 code units.
//!
//! Surrogate code units are never identifier or whitespace characters: the
//! scanner works one code unit at a time and all ECMAScript *WhiteSpace* and
//! *LineTerminator* code points live in the Basic Multilingual Plane.

/// `U+000A LINE FEED`.
pub const LF: u16 = 0x000A;
/// `U+000D CARRIAGE RETURN`.
pub const CR: u16 = 0x000D;
/// `U+2028 LINE SEPARATOR`.
pub const LS: u16 = 0x2028;
/// `U+2029 PARAGRAPH SEPARATOR`.
pub const PS: u16 = 0x2029;

/// Returns `true` for a UTF-16 high (leading) surrogate.
pub fn is_high_surrogate(cu: u16) -> bool {
    (0xD800..=0xDBFF).contains(&cu)
}

/// Returns `true` for a UTF-16 low (trailing) surrogate.
pub fn is_low_surrogate(cu: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&cu)
}

/// Returns `true` for ES2025 *LineTerminator* code points.
pub fn is_line_terminator(cu: u16) -> bool {
    matches!(cu, LF | CR | LS | PS)
}

/// Returns `true` for ES2025 *WhiteSpace* (line terminators excluded).
pub fn is_white_space(cu: u16) -> bool {
    match cu {
        0x0009 | 0x000B | 0x000C | 0x0020 | 0x00A0 | 0xFEFF => true,
        _ if cu < 0x80 => false,
        _ => match char::from_u32(u32::from(cu)) {
            // Remaining members of the Unicode `Space_Separator` category.
            Some(c) => c.is_whitespace() && !is_line_terminator(cu) && cu != 0x0085,
            None => false,
        },
    }
}

/// Returns `true` for code units that may *start* an identifier.
pub fn is_id_start(cu: u16) -> bool {
    match char::from_u32(u32::from(cu)) {
        Some(c) if c.is_ascii() => c == '$' || c == '_' || c.is_ascii_alphabetic(),
        Some(c) => unicode_ident::is_xid_start(c),
        None => false,
    }
}

/// Returns `true` for code units that may *continue* an identifier.
pub fn is_id_continue(cu: u16) -> bool {
    match char::from_u32(u32::from(cu)) {
        Some(c) if c.is_ascii() => c == '$' || c == '_' || c.is_ascii_alphanumeric(),
        // ZWNJ and ZWJ.
        Some('\u{200C}' | '\u{200D}') => true,
        Some(c) => unicode_ident::is_xid_continue(c),
        None => false,
    }
}

/// Returns `true` for ASCII decimal digits.
pub fn is_decimal_digit(cu: u16) -> bool {
    (u16::from(b'0')..=u16::from(b'9')).contains(&cu)
}

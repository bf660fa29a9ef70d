#![no_main]

use esgrove_core::error::ParseError;
use esgrove_core::parser::Scanner;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Pair bytes into code units so lone surrogates reach the scanner too.
    let units: Vec<u16> = data
        .chunks(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]))
        .collect();
    let len = units.len();

    let mut scanner = Scanner::new(units);
    let mut end = 0;
    loop {
        match scanner.next_token() {
            Ok(token) => {
                assert!(token.location.offset >= end, "tokens overlap");
                end = token.location.offset + token.raw_length;
                assert!(end <= len, "token runs past the source");
            }
            Err(ParseError::EndOfInput) => break,
            Err(ParseError::InvalidToken { location }) => {
                assert!(location.offset <= len, "error past the source");
                break;
            }
            Err(ParseError::OutOfMemory) => break,
            Err(other) => panic!("scanner produced {other:?}"),
        }
    }
});

#![no_main]

use esgrove_core::error::ParseError;
use esgrove_core::parser::{ParseOptions, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Keep recursion within the fuzzer's default stack.
    let options = ParseOptions {
        max_depth: 128,
        ..ParseOptions::default()
    };

    let mut memoized = Parser::from_text(text).with_options(options);
    let first = memoized.parse_script().cloned();
    assert_eq!(first.is_ok(), memoized.root().is_some());

    // Memo hits skip recursion, so only depth-independent outcomes compare.
    let mut plain = Parser::from_text(text).with_options(ParseOptions {
        memoize: false,
        ..options
    });
    let second = plain.parse_script().cloned();
    let too_deep = |r: &Result<_, ParseError>| matches!(r, Err(ParseError::NestingTooDeep { .. }));
    if !too_deep(&first) && !too_deep(&second) {
        assert_eq!(first, second, "memo table changed the outcome");
    }
});

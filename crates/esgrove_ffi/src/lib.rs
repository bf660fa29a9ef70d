//! `esgrove_ffi` — C-ABI surface for the esgrove parser.
//!
//! Embedders hand over a UTF-16 buffer, get back an opaque parser handle and
//! drive it with integer status codes, without depending on Rust tooling.
//!
//! # Design
//! All opaque handle types are prefixed `Esgrove` and passed as raw pointers.
//! The source is copied into the parser, so the caller's buffer may be freed
//! as soon as [`esgrove_parser_new`] returns.  Memory is always owned by the
//! esgrove side: every handle obtained from `_new` must be released with
//! [`esgrove_parser_delete`].

use std::ffi::{CString, c_char};

use esgrove_core::error::ParseError;
use esgrove_core::parser::{Location, ParseOptions, Parser};

// ── Status codes ─────────────────────────────────────────────────────────────

/// Result of every fallible entry point.
///
/// The non-zero values mirror the variants of [`ParseError`] one to one,
/// plus [`EsgroveStatus::InvalidArgument`] for null handles or buffers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EsgroveStatus {
    Ok = 0,
    NoMatch = 1,
    EndOfInput = 2,
    InvalidToken = 3,
    SyntaxError = 4,
    OutOfMemory = 5,
    Unsupported = 6,
    NestingTooDeep = 7,
    InvalidArgument = 8,
}

impl From<&ParseError> for EsgroveStatus {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::NoMatch => EsgroveStatus::NoMatch,
            ParseError::EndOfInput => EsgroveStatus::EndOfInput,
            ParseError::InvalidToken { .. } => EsgroveStatus::InvalidToken,
            ParseError::SyntaxError { .. } => EsgroveStatus::SyntaxError,
            ParseError::OutOfMemory => EsgroveStatus::OutOfMemory,
            ParseError::Unsupported { .. } => EsgroveStatus::Unsupported,
            ParseError::NestingTooDeep { .. } => EsgroveStatus::NestingTooDeep,
        }
    }
}

// ── Options ──────────────────────────────────────────────────────────────────

/// C mirror of [`ParseOptions`].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EsgroveOptions {
    /// Maximum grammar nesting before `NestingTooDeep`.
    pub max_depth: u32,
    /// Non-zero enables the packrat memo table.
    pub memoize: bool,
}

impl From<EsgroveOptions> for ParseOptions {
    fn from(options: EsgroveOptions) -> Self {
        ParseOptions {
            max_depth: options.max_depth,
            memoize: options.memoize,
        }
    }
}

/// Fill `out` with the default options.
///
/// # Safety
/// `out` must be null or valid for a write of one [`EsgroveOptions`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_options_default(out: *mut EsgroveOptions) {
    if out.is_null() {
        return;
    }
    let defaults = ParseOptions::default();
    // SAFETY: caller guarantees `out` is valid for writes.
    unsafe {
        out.write(EsgroveOptions {
            max_depth: defaults.max_depth,
            memoize: defaults.memoize,
        })
    };
}

// ── Parser ───────────────────────────────────────────────────────────────────

/// An opaque parser handle.
///
/// Owns a copy of the source, the buffered tokens, the tree of the last
/// successful parse and the message of the last failure.  Not thread-safe.
pub struct EsgroveParser {
    parser: Parser,
    error: Option<CString>,
    error_location: Option<Location>,
}

impl EsgroveParser {
    fn record(&mut self, result: Result<(), ParseError>) -> EsgroveStatus {
        match result {
            Ok(()) => {
                self.error = None;
                self.error_location = None;
                EsgroveStatus::Ok
            }
            Err(err) => {
                // Messages never contain interior nulls; fall back to none.
                self.error = CString::new(err.to_string()).ok();
                self.error_location = err.location();
                EsgroveStatus::from(&err)
            }
        }
    }
}

/// Copy `len` UTF-16 code units from `src` into a fresh parser.
///
/// On success `*out` receives a handle that must eventually be passed to
/// [`esgrove_parser_delete`].  `src` may be null only when `len` is zero.
///
/// # Safety
/// - `src` must be valid for reads of `len` code units.
/// - `out` must be a non-null pointer valid for a write of one pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_new(
    src: *const u16,
    len: usize,
    out: *mut *mut EsgroveParser,
) -> EsgroveStatus {
    let defaults = ParseOptions::default();
    let options = EsgroveOptions {
        max_depth: defaults.max_depth,
        memoize: defaults.memoize,
    };
    // SAFETY: forwarded caller guarantees.
    unsafe { esgrove_parser_new_with_options(src, len, &options, out) }
}

/// Like [`esgrove_parser_new`], with explicit options.
///
/// A null `options` selects the defaults.
///
/// # Safety
/// - `src` must be valid for reads of `len` code units.
/// - `options` must be null or point to a valid [`EsgroveOptions`].
/// - `out` must be a non-null pointer valid for a write of one pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_new_with_options(
    src: *const u16,
    len: usize,
    options: *const EsgroveOptions,
    out: *mut *mut EsgroveParser,
) -> EsgroveStatus {
    if out.is_null() || (src.is_null() && len != 0) {
        return EsgroveStatus::InvalidArgument;
    }
    let units: &[u16] = if len == 0 {
        &[]
    } else {
        // SAFETY: caller guarantees `src` is valid for `len` code units.
        unsafe { std::slice::from_raw_parts(src, len) }
    };
    let mut source = Vec::new();
    if source.try_reserve_exact(len).is_err() {
        return EsgroveStatus::OutOfMemory;
    }
    source.extend_from_slice(units);

    let options = if options.is_null() {
        ParseOptions::default()
    } else {
        // SAFETY: caller guarantees a non-null `options` is valid.
        ParseOptions::from(unsafe { *options })
    };
    let handle = Box::new(EsgroveParser {
        parser: Parser::new(source).with_options(options),
        error: None,
        error_location: None,
    });
    // SAFETY: `out` was checked for null; caller guarantees it is writable.
    unsafe { out.write(Box::into_raw(handle)) };
    EsgroveStatus::Ok
}

/// Destroy a parser, its source copy, its tokens and its tree.
///
/// # Safety
/// `parser` must be null or a pointer returned through `esgrove_parser_new`
/// that has not been deleted yet.  It must not be used after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_delete(parser: *mut EsgroveParser) {
    if !parser.is_null() {
        // SAFETY: pointer was created by `Box::into_raw` in `esgrove_parser_new_with_options`.
        drop(unsafe { Box::from_raw(parser) });
    }
}

/// Parse the whole source as a *Script*.
///
/// # Safety
/// `parser` must be null or a valid pointer to a live [`EsgroveParser`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_parse_script(parser: *mut EsgroveParser) -> EsgroveStatus {
    if parser.is_null() {
        return EsgroveStatus::InvalidArgument;
    }
    // SAFETY: caller guarantees `parser` is valid and not aliased.
    let handle = unsafe { &mut *parser };
    let result = handle.parser.parse_script().map(|_| ());
    handle.record(result)
}

/// Parse the whole source as a *Module*.
///
/// Module code is not implemented yet; this always reports
/// [`EsgroveStatus::Unsupported`] for a valid handle.
///
/// # Safety
/// `parser` must be null or a valid pointer to a live [`EsgroveParser`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_parse_module(parser: *mut EsgroveParser) -> EsgroveStatus {
    if parser.is_null() {
        return EsgroveStatus::InvalidArgument;
    }
    // SAFETY: caller guarantees `parser` is valid and not aliased.
    let handle = unsafe { &mut *parser };
    let result = handle.parser.parse_module().map(|_| ());
    handle.record(result)
}

/// Null-terminated message of the last failed parse, or null.
///
/// The string is owned by the parser and stays valid until the next parse
/// call or [`esgrove_parser_delete`].
///
/// # Safety
/// `parser` must be null or a valid pointer to a live [`EsgroveParser`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_error_message(
    parser: *const EsgroveParser,
) -> *const c_char {
    if parser.is_null() {
        return std::ptr::null();
    }
    // SAFETY: caller guarantees `parser` is valid.
    match unsafe { &(*parser).error } {
        Some(message) => message.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Write the 0-based row and column of the last failure.
///
/// Returns `false`, leaving the outputs untouched, when there is no failure
/// or it carries no position.
///
/// # Safety
/// - `parser` must be null or a valid pointer to a live [`EsgroveParser`].
/// - `row` and `column` must each be null or valid for a write of a `u32`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_error_location(
    parser: *const EsgroveParser,
    row: *mut u32,
    column: *mut u32,
) -> bool {
    if parser.is_null() {
        return false;
    }
    // SAFETY: caller guarantees `parser` is valid.
    let Some(location) = (unsafe { (*parser).error_location }) else {
        return false;
    };
    if !row.is_null() {
        // SAFETY: caller guarantees a non-null `row` is writable.
        unsafe { row.write(location.row) };
    }
    if !column.is_null() {
        // SAFETY: caller guarantees a non-null `column` is writable.
        unsafe { column.write(location.column) };
    }
    true
}

/// Number of nodes in the tree of the last successful parse; 0 if none.
///
/// # Safety
/// `parser` must be null or a valid pointer to a live [`EsgroveParser`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn esgrove_parser_node_count(parser: *const EsgroveParser) -> usize {
    if parser.is_null() {
        return 0;
    }
    // SAFETY: caller guarantees `parser` is valid.
    unsafe { (*parser).parser.root() }.map_or(0, |root| root.len_subtree())
}

//! Scanner and parser stability fuzzer
//!
//! Stability contract:
//! - Scanning never panics and always ends with exactly one Eof token
//! - Parsing never panics; malformed input becomes errors
//! - Parsing is deterministic

#![no_main]

use libfuzzer_sys::fuzz_target;
use lox_runtime::{parse_source, scan, AstPrinter, TokenKind};

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 is meaningful source text
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let (tokens, _) = scan(input);
    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
    assert_eq!(eofs, 1, "exactly one Eof token");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

    let (first, first_errors) = parse_source(input);
    let (second, second_errors) = parse_source(input);
    assert_eq!(first, second, "parser is non-deterministic");
    assert_eq!(first_errors.len(), second_errors.len());

    // Rendering any parsed tree must not panic either
    let _ = AstPrinter::new().program(&first);

    // Truncated programs exercise recovery at every depth
    if input.len() > 4 {
        for split in [input.len() / 4, input.len() / 2, 3 * input.len() / 4] {
            if let Some(prefix) = input.get(..split) {
                let _ = parse_source(prefix);
            }
        }
    }
});

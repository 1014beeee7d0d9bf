use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

/// Bytes that separate tokens on an input line.
pub const DELIMITERS: &[u8] = b" \t\n\r";

/// Splits a line on the default delimiter set.
pub fn tokenize (line: &[u8]) -> Vec<OsString> {
    tokenize_with(line, DELIMITERS)
}

/// Splits `line` into its maximal runs of non-delimiter bytes, in order.
///
/// Tokens keep their bytes as-is, so file names need not be UTF-8.
/// An empty result means no command was entered.
pub fn tokenize_with (line: &[u8], delimiters: &[u8]) -> Vec<OsString> {
    let mut tokens = Vec::new();
    let mut token = Vec::new();

    for &byte in line {
        if delimiters.contains(&byte) {
            if token.is_empty() { continue; }
            tokens.push(OsString::from_vec(std::mem::take(&mut token)));
        } else {
            token.push(byte);
        }
    }

    if !token.is_empty() { tokens.push(OsString::from_vec(token)); }

    tokens
}

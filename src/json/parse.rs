//! Purpose: Provide the runtime JSON decode entrypoint and failure categorization.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `category_label`,
//! `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Decoding keeps object key order (serde_json `preserve_order`).
//! Notes: Error mapping into `core::error::Error` is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn category_label(category: ParseFailureCategory) -> &'static str {
    match category {
        ParseFailureCategory::Syntax => "syntax",
        ParseFailureCategory::Eof => "eof",
        ParseFailureCategory::Data => "data",
        ParseFailureCategory::Io => "io",
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let label = category_label(categorize_error(err));
    format!(
        "parse category: {label}; line {}, column {}; context: {context}",
        err.line(),
        err.column()
    )
}

//! Purpose: Render replies as indented debug text with optional ANSI colorization.
//! Exports: `render`, `render_reply`.
//! Role: Small, pure formatter behind `Reply::to_text` and the CLI `show` command.
//! Invariants: Two spaces per nesting level; empty containers render as `{\n}` and `[\n]`.
//! Invariants: ANSI escapes appear only when explicitly enabled; stripping them yields plain text.
//! Notes: Output is for humans and logs, not guaranteed to re-parse as JSON.
use crate::core::reply::Reply;
use crate::core::value::{Primitive, Value};

const INDENT: &str = "  ";

// Conservative 8/16-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

pub fn render(value: &Value, use_color: bool) -> String {
    let mut out = String::new();
    write_value(value, 0, use_color, &mut out);
    out
}

pub fn render_reply(reply: &Reply, use_color: bool) -> String {
    let mut out = String::new();
    write_reply(reply, 0, use_color, &mut out);
    out
}

fn write_value(value: &Value, indent: usize, use_color: bool, out: &mut String) {
    match value {
        Value::Primitive(primitive) => write_primitive(primitive, use_color, out),
        Value::Array(items) => write_array(items, indent, use_color, out),
        Value::Reply(reply) => write_reply(reply, indent, use_color, out),
    }
}

fn write_primitive(primitive: &Primitive, use_color: bool, out: &mut String) {
    match primitive {
        Primitive::Null => push_colored("null", COLOR_NULL, use_color, out),
        Primitive::Bool(val) => {
            let text = if *val { "true" } else { "false" };
            push_colored(text, COLOR_BOOL, use_color, out);
        }
        Primitive::Int(val) => push_colored(&val.to_string(), COLOR_NUMBER, use_color, out),
        Primitive::UInt(val) => push_colored(&val.to_string(), COLOR_NUMBER, use_color, out),
        Primitive::BigInt(digits) => push_colored(digits, COLOR_NUMBER, use_color, out),
        Primitive::Float(val) => {
            // serde_json keeps the fractional part (`1.0`, not `1`).
            let text = serde_json::Number::from_f64(*val)
                .map(|num| num.to_string())
                .unwrap_or_else(|| val.to_string());
            push_colored(&text, COLOR_NUMBER, use_color, out);
        }
        Primitive::String(text) => {
            push_colored(&quote(text), COLOR_STRING, use_color, out);
        }
    }
}

fn write_array(items: &[Value], indent: usize, use_color: bool, out: &mut String) {
    push_colored("[", COLOR_PUNCT, use_color, out);
    out.push('\n');
    for (idx, item) in items.iter().enumerate() {
        push_indent(indent + 1, out);
        write_value(item, indent + 1, use_color, out);
        if idx + 1 < items.len() {
            push_colored(",", COLOR_PUNCT, use_color, out);
        }
        out.push('\n');
    }
    push_indent(indent, out);
    push_colored("]", COLOR_PUNCT, use_color, out);
}

fn write_reply(reply: &Reply, indent: usize, use_color: bool, out: &mut String) {
    push_colored("{", COLOR_PUNCT, use_color, out);
    out.push('\n');
    let len = reply.len();
    for (idx, (key, value)) in reply.attributes().enumerate() {
        push_indent(indent + 1, out);
        push_colored(&quote(key), COLOR_KEY, use_color, out);
        push_colored(":", COLOR_PUNCT, use_color, out);
        out.push(' ');
        write_value(value, indent + 1, use_color, out);
        if idx + 1 < len {
            push_colored(",", COLOR_PUNCT, use_color, out);
        }
        out.push('\n');
    }
    push_indent(indent, out);
    push_colored("}", COLOR_PUNCT, use_color, out);
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

fn push_indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if !use_color {
        out.push_str(text);
        return;
    }
    out.push_str("\u{1b}[");
    out.push_str(color);
    out.push('m');
    out.push_str(text);
    out.push_str("\u{1b}[0m");
}

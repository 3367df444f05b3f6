//! Byte-exact emission of implementors artifacts.

use crate::types::{Implementor, ImplementorTable};

const PRELUDE: &str = "(function() {var implementors = {};\n";
const STUB: &str = "\n            if (window.register_implementors) {\n                window.register_implementors(implementors);\n            } else {\n                window.pending_implementors = implementors;\n            }\n        \n})()\n";

/// Render a table in the exact layout the documentation generator emits,
/// crate sections in sorted order. [`render`] and [`super::parse`] are
/// inverses over well-formed tables.
pub fn render(table: &ImplementorTable) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(PRELUDE);
    for (name, records) in table.iter() {
        out.push_str("implementors[");
        push_json_string(&mut out, name.as_str());
        out.push_str("] = [");
        for record in records {
            push_record(&mut out, record);
            out.push(',');
        }
        out.push_str("];\n");
    }
    out.push_str(STUB);
    out
}

fn push_record(out: &mut String, record: &Implementor) {
    out.push_str("{text:");
    push_json_string(out, &record.text);
    out.push_str(",synthetic:");
    out.push_str(if record.synthetic { "true" } else { "false" });
    out.push_str(",types:[");
    for (index, ty) in record.types.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_json_string(out, ty);
    }
    out.push_str("]}");
}

/// JSON string escaping: quote, backslash, and control characters only.
fn push_json_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

//! Shared formatting helpers for the concrete generators.
//!
//! Free functions only — generators share path and literal conventions,
//! not state.

use wdl_core::{Color, Vector3};

/// Format an `f64` as a source literal with a decimal point (`1.0`, not
/// `1`), valid in C#, Python, and TypeScript alike.
pub fn float(value: f64) -> String {
    format!("{value:?}")
}

/// Format an `f32` as a source literal with a decimal point.
pub fn float32(value: f32) -> String {
    format!("{value:?}")
}

/// Format a vector as a `(x, y, z)` tuple literal.
pub fn vec3_tuple(v: Vector3) -> String {
    format!("({}, {}, {})", float(v.x), float(v.y), float(v.z))
}

/// Format a color as an `(r, g, b)` tuple literal, dropping alpha.
pub fn color_tuple(c: Color) -> String {
    format!(
        "({}, {}, {})",
        float32(c.r),
        float32(c.g),
        float32(c.b)
    )
}

/// Double-quote a string, escaping backslashes, quotes, and newlines.
/// The result is a valid string literal in all three target languages.
pub fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quote a list of strings as a `["a", "b"]` literal.
pub fn quoted_list(items: &[String]) -> String {
    let parts: Vec<String> = items.iter().map(|s| quoted(s)).collect();
    format!("[{}]", parts.join(", "))
}

/// Sanitize a display name into an identifier: alphanumerics pass
/// through, everything else becomes `_`, and a leading digit is
/// prefixed.
pub fn ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// Convert a snake_case tag to PascalCase (`static_mesh` →
/// `StaticMesh`), for enum members in C# and TypeScript.
pub fn pascal_case(tag: &str) -> String {
    tag.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_keep_decimal_point() {
        assert_eq!(float(1.0), "1.0");
        assert_eq!(float(-2.5), "-2.5");
        assert_eq!(float32(0.05), "0.05");
    }

    #[test]
    fn tuples() {
        assert_eq!(vec3_tuple(Vector3::new(1.0, 0.0, -3.5)), "(1.0, 0.0, -3.5)");
        assert_eq!(color_tuple(Color::WHITE), "(1.0, 1.0, 1.0)");
    }

    #[test]
    fn quoting_escapes() {
        assert_eq!(quoted("plain"), "\"plain\"");
        assert_eq!(quoted("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quoted("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn identifiers() {
        assert_eq!(ident("Ancient Tree #2"), "Ancient_Tree__2");
        assert_eq!(ident("3rdPillar"), "_3rdPillar");
        assert_eq!(ident(""), "_");
    }

    #[test]
    fn pascal() {
        assert_eq!(pascal_case("static_mesh"), "StaticMesh");
        assert_eq!(pascal_case("terrain"), "Terrain");
        assert_eq!(pascal_case("play_sound"), "PlaySound");
    }
}

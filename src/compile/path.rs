//! Path resolution and interpolation helpers.
//!
//! Expressions are dot-separated property descents only - no operators,
//! literals, or calls. `get_path` reads through every reactive slot it
//! traverses (so a tracking watcher subscribes to each segment); `set_path`
//! descends identically but assigns only the final segment, failing if any
//! parent segment is absent rather than creating intermediate objects.
//!
//! Interpolation (`{{ expr }}`) is scanned with a small tokenizer shared by
//! span extraction and full-content substitution, so both agree on what
//! counts as a span. Literal text around and between spans is preserved
//! verbatim; unterminated or empty braces are literal text.

use crate::error::BindError;
use crate::reactive::ReactiveMap;
use crate::value::Value;

// =============================================================================
// Dot-path resolution
// =============================================================================

/// Read the value at a dot-path, descending from the data root.
///
/// Every traversed segment that is a reactive slot registers the currently
/// evaluating watcher (if any) into that slot's dep.
pub fn get_path(expr: &str, data: &ReactiveMap) -> Result<Value, BindError> {
    let mut current = Value::Map(data.clone());
    for segment in expr.split('.') {
        let map = current.as_map().ok_or_else(|| BindError::NotAnObject {
            path: expr.to_string(),
            segment: segment.to_string(),
        })?;
        current = map.get(segment).ok_or_else(|| BindError::PathSegment {
            path: expr.to_string(),
            segment: segment.to_string(),
        })?;
    }
    Ok(current)
}

/// Write a value at a dot-path, assigning only the final segment.
///
/// Fails without touching the data graph when a parent segment is missing
/// or a scalar sits in the way; no intermediate objects are created.
pub fn set_path(expr: &str, data: &ReactiveMap, value: Value) -> Result<(), BindError> {
    let (parents, last) = match expr.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, expr),
    };

    let mut current = data.clone();
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            let next = current.get(segment).ok_or_else(|| BindError::PathSegment {
                path: expr.to_string(),
                segment: segment.to_string(),
            })?;
            current = next
                .as_map()
                .ok_or_else(|| BindError::NotAnObject {
                    path: expr.to_string(),
                    segment: segment.to_string(),
                })?
                .clone();
        }
    }
    current.set(last, value)
}

// =============================================================================
// Interpolation scanning
// =============================================================================

/// One piece of a text node's content.
#[derive(Debug, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a str),
    /// A `{{ expr }}` span, expression trimmed.
    Span(&'a str),
}

/// Split content into literal text and interpolation spans.
fn tokenize(content: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // Unterminated braces stay literal.
            break;
        };
        let expr = after[..end].trim();
        let consumed = start + 2 + end + 2;
        if expr.is_empty() {
            // `{{ }}` is not a span.
            pieces.push(Piece::Literal(&rest[..consumed]));
        } else {
            if start > 0 {
                pieces.push(Piece::Literal(&rest[..start]));
            }
            pieces.push(Piece::Span(expr));
        }
        rest = &rest[consumed..];
    }
    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest));
    }
    pieces
}

/// Whether content contains at least one interpolation span.
pub fn has_interpolation(content: &str) -> bool {
    tokenize(content)
        .iter()
        .any(|piece| matches!(piece, Piece::Span(_)))
}

/// The trimmed expressions of every span, in document order.
pub fn interpolation_exprs(content: &str) -> Vec<&str> {
    tokenize(content)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Span(expr) => Some(expr),
            Piece::Literal(_) => None,
        })
        .collect()
}

/// Substitute every span with its current value, preserving literal text
/// verbatim. Always recomputes the whole content string.
pub fn render_interpolation(content: &str, data: &ReactiveMap) -> Result<String, BindError> {
    let mut out = String::with_capacity(content.len());
    for piece in tokenize(content) {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Span(expr) => out.push_str(&get_path(expr, data)?.to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReactiveMap {
        ReactiveMap::observe([
            ("a", Value::from(1)),
            ("b", Value::from(2)),
            ("user", Value::map([("name", Value::from("ada"))])),
        ])
    }

    #[test]
    fn test_get_path() {
        let data = sample();
        assert_eq!(get_path("a", &data).unwrap(), Value::from(1));
        assert_eq!(get_path("user.name", &data).unwrap(), Value::from("ada"));

        assert!(matches!(
            get_path("user.age", &data),
            Err(BindError::PathSegment { .. })
        ));
        assert!(matches!(
            get_path("a.b", &data),
            Err(BindError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_set_path() {
        let data = sample();
        set_path("user.name", &data, Value::from("lin")).unwrap();
        assert_eq!(get_path("user.name", &data).unwrap(), Value::from("lin"));

        // Missing parent: write rejected, graph untouched.
        assert!(matches!(
            set_path("ghost.name", &data, Value::from("x")),
            Err(BindError::PathSegment { .. })
        ));
        // Missing final key: outside the snapshot.
        assert!(matches!(
            set_path("user.age", &data, Value::from(9)),
            Err(BindError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_interpolation_scanning() {
        assert!(has_interpolation("{{a}}"));
        assert!(has_interpolation("x {{ a.b }} y"));
        assert!(!has_interpolation("plain text"));
        assert!(!has_interpolation("{{ }}"));
        assert!(!has_interpolation("{{ unterminated"));

        assert_eq!(interpolation_exprs("{{a}} and {{ b }}"), vec!["a", "b"]);
    }

    #[test]
    fn test_render_interpolation() {
        let data = sample();
        assert_eq!(
            render_interpolation("{{a}} and {{b}}", &data).unwrap(),
            "1 and 2"
        );
        assert_eq!(
            render_interpolation("hi {{ user.name }}!", &data).unwrap(),
            "hi ada!"
        );
        // Literal text and non-spans pass through verbatim.
        assert_eq!(
            render_interpolation("{{ }} {{a}} {{x", &data).unwrap(),
            "{{ }} 1 {{x"
        );
    }
}

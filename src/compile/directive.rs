//! Directive recognition - attribute names to directive kinds.
//!
//! The recognized directive set is closed and small, so dispatch is a match
//! over a tagged enum rather than any dynamic lookup. A directive attribute
//! is `v-<name>` or compound `v-<name>:<arg>`; the part after the colon is
//! the *secondary argument*, whose meaning is directive-specific: the event
//! name for `on`, the target attribute name for `bind`.

/// Prefix of directive attributes (`v-text`, `v-on:click`, ...). Stripped
/// from the rendered output.
pub const DIRECTIVE_PREFIX: &str = "v-";

/// Prefix of the event shorthand (`@click`). Unlike `v-` attributes, the
/// shorthand is left in place in the rendered output.
pub const EVENT_SHORTHAND_PREFIX: &str = "@";

/// The closed set of recognized directives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `v-text` / interpolation spans: data → text content.
    Text,
    /// `v-html`: data → raw markup content.
    Html,
    /// `v-model`: two-way control binding.
    Model,
    /// `v-on:<event>` / `@<event>`: event → method.
    On,
    /// `v-bind:<attr>`: one-shot data → attribute snapshot.
    Bind,
}

impl DirectiveKind {
    /// Look up a directive name. Unknown names yield `None` and are
    /// silently skipped by the compiler.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "html" => Some(Self::Html),
            "model" => Some(Self::Model),
            "on" => Some(Self::On),
            "bind" => Some(Self::Bind),
            _ => None,
        }
    }
}

/// A parsed directive attribute, consumed immediately by its handler.
#[derive(Debug)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    /// The attribute's value: a dot-path expression (or method name for `on`).
    pub expr: &'a str,
    /// The part after `:` in a compound attribute name, if any.
    pub secondary: Option<&'a str>,
}

/// Parse a `v-` attribute name plus its value into a directive.
///
/// Returns `None` for unrecognized directive names; the attribute is still
/// stripped by the compiler in that case.
pub fn parse_directive<'a>(attr_name: &'a str, attr_value: &'a str) -> Option<Directive<'a>> {
    let rest = attr_name.strip_prefix(DIRECTIVE_PREFIX)?;
    let (name, secondary) = match rest.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (rest, None),
    };
    Some(Directive {
        kind: DirectiveKind::from_name(name)?,
        expr: attr_value,
        secondary,
    })
}

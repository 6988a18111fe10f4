//! Binding errors.
//!
//! Everything that can go wrong while compiling a template or propagating a
//! change surfaces as a [`BindError`]. Failures are not recovered from: a
//! failed update is simply abandoned and the document keeps its prior state.

use thiserror::Error;

/// Error raised during compilation, path resolution, or change propagation.
#[derive(Debug, Error)]
pub enum BindError {
    /// A dot-path read or write hit a segment that does not exist.
    #[error("missing segment `{segment}` while resolving path `{path}`")]
    PathSegment { path: String, segment: String },

    /// A dot-path tried to descend through a scalar value.
    #[error("cannot descend into non-object value at segment `{segment}` of path `{path}`")]
    NotAnObject { path: String, segment: String },

    /// A write targeted a key outside the map's reactive snapshot.
    #[error("key `{key}` is not part of the observed snapshot")]
    UnknownKey { key: String },

    /// An event directive referenced a method absent from the methods table.
    /// A template naming a non-existent handler is a programmer error, so
    /// this fails compilation instead of silently skipping the listener.
    #[error("unknown method `{name}` referenced by event directive")]
    UnknownMethod { name: String },

    /// `v-on` was written without its `:<event>` argument.
    #[error("event directive requires an event argument (`v-on:<event>`)")]
    MissingEventArgument,

    /// `v-bind` was written without its `:<attribute>` argument.
    #[error("attribute directive requires an attribute argument (`v-bind:<attr>`)")]
    MissingAttributeArgument,
}

/// Alias for `Result<T, WdlError>`.
pub type WdlResult<T> = Result<T, WdlError>;

/// Errors that can occur when constructing or (de)serializing WDL values.
///
/// Referential problems (duplicate ids, dangling references, out-of-bounds
/// placement) are *not* errors — they are reported as validation issues by
/// the validator crate, which always completes and returns a report.
#[derive(Debug, thiserror::Error)]
pub enum WdlError {
    /// A world document could not be parsed: malformed JSON, an
    /// unrecognized enum tag, a missing required field, or a field value
    /// outside its documented range.
    #[error("malformed world document: {0}")]
    Parse(String),

    /// A world could not be serialized to its canonical form.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// A numeric field was given a value outside its documented range.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// The field that was out of range.
        field: &'static str,
        /// The offending value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Loosely-typed external data could not be coerced into any usable
    /// world at all. Per-field problems fall back to defaults instead.
    #[error("unusable world data: {0}")]
    Unusable(String),
}

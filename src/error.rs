use thiserror::Error;

/// Why an ordinal could not be resolved against a sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum OrdinalError {
    /// The ordinal is not below the number of alternatives.
    #[error("ordinal {ordinal} is out of range for a sum of {count} alternatives")]
    OutOfRange { ordinal: usize, count: usize },

    /// The type is not an alternative at or after the starting ordinal.
    #[error("type `{type_name}` is not an alternative at or after ordinal {start}")]
    NotFound {
        type_name: &'static str,
        start: usize,
    },

    /// The ordinal is in range but another alternative is active.
    #[error("ordinal {ordinal} was requested but alternative {active} is active")]
    Inactive { ordinal: usize, active: usize },
}

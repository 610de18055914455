use colorbar_common::error::ColorbarCommonError;

#[derive(Debug, thiserror::Error)]
pub enum ColorbarScaleError {
    #[error("Domain length ({domain_len}) does not match range length ({range_len})")]
    DomainRangeMismatch { domain_len: usize, range_len: usize },

    #[error("Empty domain")]
    EmptyDomain,

    #[error("Empty range")]
    EmptyRange,

    #[error("Continuous color scale requires at least two stops, got {0}")]
    TooFewStops(usize),

    #[error("Domain stops must be monotonic: {0:?}")]
    DomainNotMonotonic(Vec<f32>),

    #[error("Expected a {expected} domain value, got {actual}")]
    UnexpectedValueKind {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Unknown color scheme: {0}")]
    UnknownScheme(String),

    #[error(transparent)]
    Common(#[from] ColorbarCommonError),
}

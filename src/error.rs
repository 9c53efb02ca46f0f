use thiserror::Error;

use crate::catalog::InterventionKind;

/// A name or value did not match the intervention catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown intervention '{0}' (expected street, publicSpace or campus)")]
    UnknownIntervention(String),

    #[error("{intervention}: unknown metric '{metric}'")]
    UnknownMetric {
        intervention: InterventionKind,
        metric: String,
    },

    #[error("{intervention}: unknown parameter '{parameter}'")]
    UnknownParameter {
        intervention: InterventionKind,
        parameter: String,
    },

    #[error("{intervention}: no scoring formula for metric '{metric}'")]
    MissingFormula {
        intervention: InterventionKind,
        metric: String,
    },

    #[error("{intervention}: no value supplied for parameter '{parameter}'")]
    MissingParameterValue {
        intervention: InterventionKind,
        parameter: String,
    },
}

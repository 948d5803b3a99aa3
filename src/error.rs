use thiserror::Error;

use crate::Num;

/// A catalog that cannot drive a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidCatalogError {
    #[error("duplicate body id `{0}`")]
    DuplicateId(String),

    #[error("body `{id}` references unknown parent `{parent}`")]
    DanglingParent { id: String, parent: String },

    #[error("body `{0}` is its own ancestor")]
    ParentCycle(String),

    #[error("body `{id}` has an invalid {field}: {value}")]
    InvalidDimension {
        id: String,
        field: &'static str,
        value: Num,
    },

    #[error("malformed catalog: {0}")]
    Parse(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown body `{0}`")]
pub struct UnknownBodyError(pub String);

/// A non-central body whose orbit period cannot move it.
///
/// Recorded rather than raised: the body is kept at a fixed angle.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("body `{id}` has a degenerate orbit period ({orbit_period:?}), holding it stationary")]
pub struct DegenerateOrbitWarning {
    pub id: String,
    pub orbit_period: Option<Num>,
}

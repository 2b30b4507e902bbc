use sea_orm::DbErr;
use std::borrow::Cow;
use thiserror::Error;

/// Failure taxonomy shared by all core operations. The HTTP layer maps
/// each variant onto a status family; the reasons are already phrased for
/// the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Database error.")]
    Db(#[from] DbErr),

    #[error("{0}")]
    NotFound(Cow<'static, str>),

    /// PIN missing, PIN incorrect or profile absent. Callers must not be
    /// able to tell these apart.
    #[error("{0}")]
    Forbidden(Cow<'static, str>),

    #[error("{0}")]
    Validation(Cow<'static, str>),

    #[error("{0}")]
    Conflict(Cow<'static, str>),

    #[error(transparent)]
    Hash(#[from] crate::secret::HashError),
}

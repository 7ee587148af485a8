use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::domain::wizard::WizardError;
use crate::export::ExportError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    /// The backend rejected the caller's bearer token.
    #[error("session expired")]
    SessionExpired,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Unauthorized => ServiceError::SessionExpired,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<WizardError> for ServiceError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::NotAtTerminalStep => {
                ServiceError::Form("Complétez toutes les étapes avant de commander".to_string())
            }
            WizardError::StepMismatch { .. } => {
                ServiceError::Form("Cette étape n'est plus active".to_string())
            }
        }
    }
}

impl From<ExportError> for ServiceError {
    fn from(err: ExportError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

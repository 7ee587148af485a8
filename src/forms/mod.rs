//! Form definitions backing the Cosmetia routes.

use actix_multipart::form::tempfile::TempFile;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::product::Attachment;
use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod documents;
pub mod products;
pub mod wizard;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data. Messages are shown to
/// the user as-is.
pub enum FormError {
    #[error("Formulaire invalide : {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Adresse e-mail invalide")]
    InvalidEmail,

    #[error("Le nom est obligatoire")]
    InvalidName,

    #[error("Montant invalide")]
    InvalidPrice,

    #[error("Quantité invalide")]
    InvalidQuantity,

    #[error("Type de packaging inconnu")]
    InvalidPackaging,

    #[error("Étape inconnue")]
    InvalidStep,

    #[error("Le champ « {field} » ne doit pas dépasser {max} caractères")]
    TooLong { field: &'static str, max: usize },

    #[error("Une commande ne peut pas contenir plus de {0} matières premières")]
    TooManyItems(usize),

    #[error("Un fichier est obligatoire")]
    MissingFile,

    #[error("Lecture du fichier impossible : {0}")]
    Upload(String),

    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

/// Trims an optional text value, `None` when blank.
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Reads an uploaded temp file into memory. Empty file inputs yield `None`.
pub(crate) fn read_upload(file: Option<TempFile>) -> Result<Option<Attachment>, FormError> {
    let Some(file) = file.filter(|file| file.size > 0) else {
        return Ok(None);
    };

    let bytes = std::fs::read(file.file.path()).map_err(|e| FormError::Upload(e.to_string()))?;
    let content_type = file
        .content_type
        .as_ref()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = file
        .file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "upload".to_string());

    Ok(Some(Attachment {
        file_name,
        content_type,
        bytes,
    }))
}

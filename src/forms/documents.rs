use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::domain::document::{DocumentKind, NewDocument};
use crate::domain::product::Attachment;
use crate::domain::types::{DocumentTitle, ProductId};
use crate::forms::{FormError, read_upload, trimmed};

#[derive(MultipartForm)]
/// Document upload posted by a supplier.
pub struct UploadDocumentForm {
    pub title: Text<String>,
    pub kind: Option<Text<String>>,
    pub product_id: Option<Text<String>>,
    #[multipart(limit = "20MB")]
    pub file: Option<TempFile>,
}

impl UploadDocumentForm {
    pub fn into_new_document(self) -> Result<NewDocument, FormError> {
        let file = read_upload(self.file)?;
        new_document(
            self.title.into_inner(),
            self.kind.map(Text::into_inner),
            self.product_id.map(Text::into_inner),
            file,
        )
    }
}

fn new_document(
    title: String,
    kind: Option<String>,
    product_id: Option<String>,
    file: Option<Attachment>,
) -> Result<NewDocument, FormError> {
    let title = DocumentTitle::new(title).map_err(|_| FormError::InvalidName)?;
    let file = file.ok_or(FormError::MissingFile)?;
    let product_id = trimmed(product_id).map(ProductId::new).transpose()?;

    Ok(NewDocument {
        title,
        kind: kind
            .as_deref()
            .and_then(DocumentKind::parse)
            .unwrap_or(DocumentKind::Other),
        product_id,
        file,
    })
}

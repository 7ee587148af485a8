//! Technical and regulatory documents.

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::domain::document::DocumentKind;
use crate::domain::types::{DocumentId, ProductId};
use crate::dto::documents::{DocumentPageData, DocumentsPageData, DocumentsQuery};
use crate::forms::documents::UploadDocumentForm;
use crate::pagination::Paginated;
use crate::repository::{DocumentListQuery, DocumentReader, DocumentWriter, ProductReader};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult, ensure_role, filled};

pub async fn load_documents_page<R>(
    repo: &R,
    query: DocumentsQuery,
) -> ServiceResult<DocumentsPageData>
where
    R: DocumentReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let kind = query.kind.as_deref().and_then(DocumentKind::parse);
    let product_id = filled(query.product_id).and_then(|id| ProductId::new(id).ok());
    let filters = DocumentsQuery {
        search: filled(query.search),
        kind: kind.map(|kind| kind.id().to_string()),
        product_id: product_id.as_ref().map(ToString::to_string),
        page: None,
    };

    let mut list_query = DocumentListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &filters.search {
        list_query = list_query.search(term.clone());
    }
    if let Some(kind) = kind {
        list_query = list_query.kind(kind);
    }
    if let Some(product_id) = product_id {
        list_query = list_query.product(product_id);
    }

    let (total, documents) = repo.list_documents(list_query).await.map_err(|err| {
        log::error!("Failed to list documents: {err}");
        err
    })?;

    Ok(DocumentsPageData {
        documents: Paginated::new(documents, page, total, DEFAULT_ITEMS_PER_PAGE),
        filters,
    })
}

/// Loads a document with the product it describes. A product that no longer
/// exists is simply omitted.
pub async fn load_document_page<R>(repo: &R, document_id: &str) -> ServiceResult<DocumentPageData>
where
    R: DocumentReader + ProductReader + ?Sized,
{
    let document_id = DocumentId::new(document_id).map_err(|_| ServiceError::NotFound)?;

    let document = repo
        .get_document(&document_id)
        .await
        .map_err(|err| {
            log::error!("Failed to get document {document_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let product = match document
        .product_id
        .as_deref()
        .and_then(|id| ProductId::new(id).ok())
    {
        Some(product_id) => repo.get_product(&product_id).await.map_err(|err| {
            log::error!("Failed to get product {product_id}: {err}");
            err
        })?,
        None => None,
    };

    Ok(DocumentPageData { document, product })
}

pub async fn upload_document<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UploadDocumentForm,
) -> ServiceResult<()>
where
    R: DocumentWriter + ?Sized,
{
    ensure_role(user, &[Role::Supplier])?;

    let document = form.into_new_document().map_err(|err| {
        log::warn!("Rejected document upload: {err}");
        ServiceError::from(err)
    })?;

    let uploaded = repo.upload_document(document).await.map_err(|err| {
        log::error!("Failed to upload document: {err}");
        err
    })?;
    log::info!("Supplier {} uploaded document {}", user.id, uploaded.id);

    Ok(())
}

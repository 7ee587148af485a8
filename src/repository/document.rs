use async_trait::async_trait;
use reqwest::multipart::Form;

use crate::domain::document::{Document, NewDocument};
use crate::domain::types::DocumentId;
use crate::repository::api::{ListResponse, attachment_part, optional_text};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DocumentListQuery, DocumentReader, DocumentWriter, UserApi};

#[async_trait]
impl<'a> DocumentReader for UserApi<'a> {
    async fn list_documents(
        &self,
        query: DocumentListQuery,
    ) -> RepositoryResult<(usize, Vec<Document>)> {
        let list: ListResponse<Document> = self.get_json("documents", &query.to_params()).await?;
        Ok(list.into_parts())
    }

    async fn get_document(&self, id: &DocumentId) -> RepositoryResult<Option<Document>> {
        self.get_optional(&format!("documents/{id}")).await
    }
}

#[async_trait]
impl<'a> DocumentWriter for UserApi<'a> {
    async fn upload_document(&self, document: NewDocument) -> RepositoryResult<Document> {
        let mut form = Form::new()
            .text("title", document.title.into_inner())
            .text("kind", document.kind.id());
        form = optional_text(
            form,
            "productId",
            document.product_id.map(|id| id.into_inner()),
        );
        form = form.part("file", attachment_part(document.file)?);

        self.post_multipart("documents", form).await
    }
}

use async_trait::async_trait;
use reqwest::multipart::Form;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::repository::api::{ListResponse, attachment_part, optional_text};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter, UserApi};

#[async_trait]
impl<'a> ProductReader for UserApi<'a> {
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<Product>)> {
        let list: ListResponse<Product> = self.get_json("products", &query.to_params()).await?;
        Ok(list.into_parts())
    }

    async fn get_product(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        self.get_optional(&format!("products/{id}")).await
    }
}

/// Converts a product listing into the multipart body expected by the backend.
fn product_form(product: NewProduct) -> RepositoryResult<Form> {
    let mut form = Form::new()
        .text("name", product.name.into_inner())
        .text("description", product.description.into_inner());
    form = optional_text(form, "category", product.category);
    form = optional_text(form, "function", product.function);
    form = optional_text(form, "country", product.country);
    form = optional_text(form, "price", product.price.map(|p| p.get().to_string()));
    form = optional_text(form, "unit", product.unit);
    form = optional_text(
        form,
        "minimumOrderQuantity",
        product.minimum_order_quantity.map(|q| q.to_string()),
    );
    if let Some(image) = product.image {
        form = form.part("image", attachment_part(image)?);
    }
    Ok(form)
}

#[async_trait]
impl<'a> ProductWriter for UserApi<'a> {
    async fn create_product(&self, product: NewProduct) -> RepositoryResult<Product> {
        let form = product_form(product)?;
        self.post_multipart("products", form).await
    }

    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        self.delete(&format!("products/{id}")).await
    }
}

//! Product catalog: browsing for everyone, listing management for suppliers.

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::domain::types::ProductId;
use crate::dto::products::{ProductPageData, ProductsPageData, ProductsQuery};
use crate::forms::products::AddProductForm;
use crate::pagination::Paginated;
use crate::repository::{
    DocumentListQuery, DocumentReader, LookupReader, ProductListQuery, ProductReader,
    ProductWriter,
};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult, ensure_role, filled};

/// Loads one catalog page with the filter select options.
pub async fn load_products_page<R>(
    repo: &R,
    query: ProductsQuery,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + LookupReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let filters = ProductsQuery {
        search: filled(query.search),
        category: filled(query.category),
        function: filled(query.function),
        country: filled(query.country),
        page: None,
    };

    let mut list_query = ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &filters.search {
        list_query = list_query.search(term.clone());
    }
    if let Some(category) = &filters.category {
        list_query = list_query.category(category.clone());
    }
    if let Some(function) = &filters.function {
        list_query = list_query.function(function.clone());
    }
    if let Some(country) = &filters.country {
        list_query = list_query.country(country.clone());
    }

    let (total, products) = repo.list_products(list_query).await.map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;

    let categories = repo.list_categories().await.map_err(|err| {
        log::error!("Failed to list categories: {err}");
        err
    })?;
    let functions = repo.list_functions().await.map_err(|err| {
        log::error!("Failed to list functions: {err}");
        err
    })?;
    let countries = repo.list_countries().await.map_err(|err| {
        log::error!("Failed to list countries: {err}");
        err
    })?;

    Ok(ProductsPageData {
        products: Paginated::new(products, page, total, DEFAULT_ITEMS_PER_PAGE),
        filters,
        categories,
        functions,
        countries,
    })
}

/// Loads a product and the documents attached to it.
pub async fn load_product_page<R>(repo: &R, product_id: &str) -> ServiceResult<ProductPageData>
where
    R: ProductReader + DocumentReader + ?Sized,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    let product = repo
        .get_product(&product_id)
        .await
        .map_err(|err| {
            log::error!("Failed to get product {product_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let (_, documents) = repo
        .list_documents(DocumentListQuery::new().product(product_id))
        .await
        .map_err(|err| {
            log::error!("Failed to list product documents: {err}");
            err
        })?;

    Ok(ProductPageData { product, documents })
}

/// Validates the product form and forwards it to the backend.
pub async fn add_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, &[Role::Supplier])?;

    let product = form.into_new_product().map_err(|err| {
        log::warn!("Rejected product form: {err}");
        ServiceError::from(err)
    })?;

    let created = repo.create_product(product).await.map_err(|err| {
        log::error!("Failed to create product: {err}");
        err
    })?;
    log::info!("Supplier {} listed product {}", user.id, created.id);

    Ok(())
}

pub async fn delete_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: &str,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, &[Role::Supplier])?;

    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_product(&product_id).await.map_err(|err| {
        log::error!("Failed to delete product {product_id}: {err}");
        ServiceError::from(err)
    })
}

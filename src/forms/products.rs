use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::domain::product::{Attachment, NewProduct};
use crate::domain::types::{Amount, ProductName, SanitizedText};
use crate::forms::{FormError, read_upload, trimmed};

#[derive(MultipartForm)]
/// Product listing posted by a supplier.
pub struct AddProductForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub category: Option<Text<String>>,
    pub function: Option<Text<String>>,
    pub country: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub unit: Option<Text<String>>,
    pub minimum_order_quantity: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
}

/// Text fields of [`AddProductForm`] detached from the multipart stream.
#[derive(Debug, Default)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub function: Option<String>,
    pub country: Option<String>,
    pub price: Option<String>,
    pub unit: Option<String>,
    pub minimum_order_quantity: Option<String>,
}

impl ProductFields {
    pub fn into_new_product(self, image: Option<Attachment>) -> Result<NewProduct, FormError> {
        let name = ProductName::new(self.name).map_err(|_| FormError::InvalidName)?;

        let price = trimmed(self.price)
            .map(|raw| {
                raw.replace(',', ".")
                    .parse::<f64>()
                    .map_err(|_| FormError::InvalidPrice)
                    .and_then(|value| Amount::new(value).map_err(|_| FormError::InvalidPrice))
            })
            .transpose()?;

        let minimum_order_quantity = trimmed(self.minimum_order_quantity)
            .map(|raw| raw.parse::<u32>().map_err(|_| FormError::InvalidQuantity))
            .transpose()?;

        Ok(NewProduct {
            name,
            description: SanitizedText::new(self.description.unwrap_or_default()),
            category: trimmed(self.category),
            function: trimmed(self.function),
            country: trimmed(self.country),
            price,
            unit: trimmed(self.unit),
            minimum_order_quantity,
            image,
        })
    }
}

impl AddProductForm {
    pub fn into_new_product(self) -> Result<NewProduct, FormError> {
        let image = read_upload(self.image)?;
        let fields = ProductFields {
            name: self.name.into_inner(),
            description: self.description.map(Text::into_inner),
            category: self.category.map(Text::into_inner),
            function: self.function.map(Text::into_inner),
            country: self.country.map(Text::into_inner),
            price: self.price.map(Text::into_inner),
            unit: self.unit.map(Text::into_inner),
            minimum_order_quantity: self.minimum_order_quantity.map(Text::into_inner),
        };
        fields.into_new_product(image)
    }
}

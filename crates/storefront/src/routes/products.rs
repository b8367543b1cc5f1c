//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use moodshop_core::filter::ALL_CATEGORIES;
use moodshop_core::{CatalogStatus, FilterSelection, Product};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::LayoutView;
use crate::state::AppState;

/// Path of a product's detail page.
#[must_use]
pub fn product_path(id: &str) -> String {
    format!("/products/{}", urlencoding::encode(id))
}

/// Product card display data for the listing grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub href: String,
    pub name: String,
    pub category: String,
    pub featured: bool,
    pub price: String,
    pub stock_label: &'static str,
    pub stock_class: &'static str,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let status = product.stock_status();
        Self {
            id: product.id.to_string(),
            href: product_path(product.id.as_str()),
            name: product.name.clone(),
            category: product.category.clone(),
            featured: product.featured,
            price: product.price.display(),
            stock_label: status.label(),
            stock_class: status.css_class(),
            image: product.image.clone(),
        }
    }
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub stock: u32,
    pub image: String,
    pub can_add: bool,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            stock: product.stock,
            image: product.image.clone(),
            can_add: product.stock > 0,
        }
    }
}

/// One entry of the category selector.
#[derive(Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: LayoutView,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    /// A category or search term is narrowing the listing.
    pub filtered: bool,
    pub loading: bool,
    pub load_failed: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: LayoutView,
    pub product: ProductDetailView,
}

/// Display the filtered product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(selection): Query<FilterSelection>,
) -> Result<ProductsIndexTemplate> {
    let shop = state.shop()?;

    let products = shop
        .listing(&selection)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    let selected = selection.category().unwrap_or(ALL_CATEGORIES);
    let categories = std::iter::once(ALL_CATEGORIES)
        .chain(shop.categories())
        .map(|name| CategoryOption {
            name: name.to_string(),
            selected: name == selected,
        })
        .collect();

    Ok(ProductsIndexTemplate {
        layout: LayoutView::from(&*shop),
        products,
        categories,
        search: selection.search.trim().to_string(),
        filtered: !selection.is_unfiltered(),
        loading: *shop.status() == CatalogStatus::Loading,
        load_failed: matches!(shop.status(), CatalogStatus::Failed(_)),
    })
}

/// Display a product's detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let shop = state.shop()?;
    let product = shop
        .product(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        layout: LayoutView::from(&*shop),
        product: ProductDetailView::from(product),
    })
}

//! Product catalog parsing.
//!
//! The catalog is a small comma-separated file whose first line names the
//! columns. Quoting is deliberately naive: double quotes are stripped from
//! every value and delimiters inside quotes are not supported.
//!
//! ```text
//! id,name,category,description,price,stock
//! p1,Lavender Candle,Calm,Soy wax with lavender oil,14.50,12
//! p2,"Citrus Mist",Energized,Room spray,9.00,0
//! ```
//!
//! Parsing never fails on individual rows. Rows that cannot become a
//! [`Product`] are skipped and reported in [`ParsedCatalog::skipped`]; only a
//! missing or unusable header fails the whole load.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::types::{Price, PriceError, ProductId, StockStatus};

/// Columns every catalog header must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["id", "name", "category", "description", "price", "stock"];

/// Spreadsheet "CSV UTF-8" exports start with this.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Number of leading catalog products flagged as featured.
pub const FEATURED_COUNT: usize = 3;

const DELIMITER: char = ',';

/// Errors that make a catalog resource unusable as a whole.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The resource contains no header line.
    #[error("catalog is empty (no header row)")]
    MissingHeader,
    /// The header does not name a required column.
    #[error("catalog header is missing the {0:?} column")]
    MissingColumn(&'static str),
}

/// A product parsed from one catalog row.
///
/// Products are immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Price,
    /// Units available, as recorded at load time.
    pub stock: u32,
    /// Set for the first [`FEATURED_COUNT`] products of the catalog.
    pub featured: bool,
    /// Placeholder SVG as a `data:` URI.
    pub image: String,
}

impl Product {
    /// Whether the product can be added to the cart at all.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

/// An ordered, loaded product catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from already-built products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Why a catalog row was left out.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("expected {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
    #[error("invalid price: {0}")]
    InvalidPrice(PriceError),
    #[error("stock {0:?} is not a non-negative whole number")]
    InvalidStock(String),
    #[error("row has no id")]
    MissingId,
    #[error("duplicate id {0}")]
    DuplicateId(ProductId),
}

/// A row that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source text.
    pub line: usize,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Result of parsing catalog text.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRow>,
}

/// Positions of the required columns within a header row.
struct Columns {
    id: usize,
    name: usize,
    category: usize,
    description: usize,
    price: usize,
    stock: usize,
    width: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, CatalogError> {
        let names: Vec<&str> = header.split(DELIMITER).map(str::trim).collect();
        // A repeated column name resolves to its last occurrence.
        let find = |column: &'static str| {
            names
                .iter()
                .rposition(|name| *name == column)
                .ok_or(CatalogError::MissingColumn(column))
        };
        let [id, name, category, description, price, stock] = REQUIRED_COLUMNS.map(find);

        Ok(Self {
            id: id?,
            name: name?,
            category: category?,
            description: description?,
            price: price?,
            stock: stock?,
            width: names.len(),
        })
    }
}

/// Parse catalog text into products.
///
/// A leading byte-order mark is dropped. Lines are trimmed and blank lines
/// ignored, so `\r\n` line endings and trailing newlines are harmless. The first [`FEATURED_COUNT`] products that
/// survive parsing are featured.
///
/// # Errors
///
/// Returns [`CatalogError::MissingHeader`] when the text has no non-blank
/// line, and [`CatalogError::MissingColumn`] when the header lacks one of
/// [`REQUIRED_COLUMNS`]. A header with no data rows is an empty catalog.
pub fn parse(text: &str) -> Result<ParsedCatalog, CatalogError> {
    let mut lines = text
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(text)
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(CatalogError::MissingHeader)?;
    let columns = Columns::from_header(header)?;

    let mut products: Vec<Product> = Vec::new();
    let mut skipped = Vec::new();

    for (line, row) in lines {
        match parse_row(row, &columns) {
            Ok(mut product) => {
                if products.iter().any(|p| p.id == product.id) {
                    skipped.push(SkippedRow {
                        line,
                        reason: SkipReason::DuplicateId(product.id),
                    });
                    continue;
                }
                product.featured = products.len() < FEATURED_COUNT;
                products.push(product);
            }
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok(ParsedCatalog {
        catalog: Catalog::new(products),
        skipped,
    })
}

fn parse_row(row: &str, columns: &Columns) -> Result<Product, SkipReason> {
    let values: Vec<&str> = row.split(DELIMITER).collect();
    if values.len() < columns.width {
        return Err(SkipReason::TooFewFields {
            expected: columns.width,
            found: values.len(),
        });
    }

    let field = |idx: usize| clean(values.get(idx).copied().unwrap_or_default());

    let id = field(columns.id);
    if id.is_empty() {
        return Err(SkipReason::MissingId);
    }
    let name = field(columns.name);
    let price = Price::parse(&field(columns.price)).map_err(SkipReason::InvalidPrice)?;
    let stock = parse_stock(&field(columns.stock))?;
    let image = placeholder_image(&name);

    Ok(Product {
        id: ProductId::new(id),
        name,
        category: field(columns.category),
        description: field(columns.description),
        price,
        stock,
        featured: false,
        image,
    })
}

/// Strip every double quote and surrounding whitespace from a raw value.
fn clean(raw: &str) -> String {
    raw.replace('"', "").trim().to_owned()
}

/// Accepts whole numbers, including `"4.0"`.
fn parse_stock(raw: &str) -> Result<u32, SkipReason> {
    raw.parse::<Decimal>()
        .ok()
        .filter(|n| n.fract().is_zero())
        .and_then(|n| n.to_u32())
        .ok_or_else(|| SkipReason::InvalidStock(raw.to_owned()))
}

/// Generate the placeholder product image for `name`.
///
/// Deterministic: the same name always yields the same URI, and nothing is
/// fetched from the network.
#[must_use]
pub fn placeholder_image(name: &str) -> String {
    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="400">"#,
            r##"<rect width="100%" height="100%" fill="#e9eefc"/>"##,
            r##"<rect x="30" y="30" width="540" height="340" rx="24" fill="#ffffff" stroke="#cfd6f6"/>"##,
            r##"<text x="300" y="210" font-family="Arial" font-size="34" text-anchor="middle" fill="#111">{}</text>"##,
            r##"<text x="300" y="260" font-family="Arial" font-size="18" text-anchor="middle" fill="#555">Product Image (MVP)</text>"##,
            "</svg>"
        ),
        escape_xml(name)
    );
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        urlencoding::encode(&svg)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

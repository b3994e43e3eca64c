//! Seed the product catalog from a YAML file.
//!
//! The file is a list of product form entries, checked with the same rules
//! as the admin form before anything touches the database:
//!
//! ```yaml
//! - name: Vanilla Bean
//!   price: "3.50"
//!   imageUrl: https://cdn.frostbites.co/vanilla.jpg
//! - name: Mint Chip
//!   price: 4.25
//!   imageUrl: https://cdn.frostbites.co/mint-chip.jpg
//! ```
//!
//! Products whose name already exists are skipped, so the command can be
//! re-run against a populated catalog.

use std::path::Path;

use tracing::{error, info, warn};

use frostbites_core::{NewProduct, ProductDraft};
use frostbites_storefront::db::{self, ProductRepository, RepositoryError};

use super::{DATABASE_URL_VAR, database_url};

/// Outcome of a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse and validate the YAML catalog, collecting every invalid entry.
///
/// # Errors
///
/// Returns the parse error, or one message per invalid entry.
fn parse_catalog(content: &str) -> Result<Vec<NewProduct>, Vec<String>> {
    let drafts: Vec<ProductDraft> =
        serde_yaml::from_str(content).map_err(|e| vec![format!("Invalid YAML: {e}")])?;

    let mut products = Vec::with_capacity(drafts.len());
    let mut errors = Vec::new();

    for (index, draft) in drafts.iter().enumerate() {
        match draft.validate() {
            Ok(product) => products.push(product),
            Err(e) => errors.push(format!(
                "entry {} ({}): {}: {e}",
                index + 1,
                draft.name.trim(),
                e.field()
            )),
        }
    }

    if errors.is_empty() {
        Ok(products)
    } else {
        Err(errors)
    }
}

/// Insert catalog products from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, any entry fails validation,
/// or database operations fail.
pub async fn products(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url().ok_or(format!("{DATABASE_URL_VAR} not set"))?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading products from file");

    // Validate the whole file before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let products = match parse_catalog(&content) {
        Ok(products) => products,
        Err(errors) => {
            error!("Catalog validation failed:");
            for err in &errors {
                error!("  - {err}");
            }
            return Err(format!("{} validation errors found", errors.len()).into());
        }
    };

    info!(products = products.len(), "Catalog validated successfully");

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = ProductRepository::new(&pool);
    let mut summary = SeedSummary::default();

    for product in &products {
        match repo.create(product).await {
            Ok(created) => {
                info!(product_id = %created.product_id, name = %created.product_name, "Inserted");
                summary.inserted += 1;
            }
            Err(RepositoryError::Conflict(_)) => {
                warn!(name = %product.name, "Already in catalog, skipping");
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!("Seeding complete!");
    info!("  Products inserted: {}", summary.inserted);
    info!("  Products skipped (already exist): {}", summary.skipped);

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use frostbites_core::Price;

    #[test]
    fn test_parse_catalog_accepts_string_and_number_prices() {
        let yaml = r"
- name: Vanilla Bean
  price: '3.50'
  imageUrl: https://cdn.frostbites.co/vanilla.jpg
- name: Mint Chip
  price: 4.25
  imageUrl: https://cdn.frostbites.co/mint-chip.jpg
";
        let products = parse_catalog(yaml).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Vanilla Bean");
        assert_eq!(products[0].price, Price::from_cents(350));
        assert_eq!(products[1].price, Price::from_cents(425));
    }

    #[test]
    fn test_parse_catalog_reports_every_invalid_entry() {
        let yaml = r"
- name: Ok Flavor
  price: '2.00'
  imageUrl: https://cdn.frostbites.co/ok.jpg
- name: Gold Leaf
  price: '950'
  imageUrl: https://cdn.frostbites.co/gold.jpg
- name: Abc
  price: '1'
  imageUrl: https://cdn.frostbites.co/abc.jpg
";
        let errors = parse_catalog(yaml).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("entry 2 (Gold Leaf): price"));
        assert!(errors[1].starts_with("entry 3 (Abc): name"));
    }

    #[test]
    fn test_parse_catalog_rejects_bad_yaml() {
        let errors = parse_catalog("- name: [unterminated").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Invalid YAML"));
    }
}

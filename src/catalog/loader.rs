use super::Catalog;
use crate::error::CatalogError;
use crate::types::ItemTable;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Loads the item table from disk and builds a [`Catalog`].
///
/// The table is a TOML file of `[[items]]` rows:
///
/// ```toml
/// [[items]]
/// id = 100
/// name = "Sword"
/// icon = "icons/sword.png"
/// ```
///
/// Load failure is fatal to initialization; a missing or malformed table is
/// never skipped over.
pub struct CatalogLoader {
    table_path: PathBuf,
}

impl CatalogLoader {
    pub fn new(table_path: impl Into<PathBuf>) -> Self {
        Self {
            table_path: table_path.into(),
        }
    }

    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let contents =
            fs::read_to_string(&self.table_path).map_err(|source| CatalogError::SourceUnavailable {
                path: self.table_path.clone(),
                source,
            })?;

        let table: ItemTable =
            toml::from_str(&contents).map_err(|source| CatalogError::Malformed {
                path: self.table_path.clone(),
                source,
            })?;

        let catalog = Catalog::from_rows(table.items)?;
        info!(
            "Loaded {} item definitions from {:?}",
            catalog.len(),
            self.table_path
        );
        Ok(catalog)
    }
}

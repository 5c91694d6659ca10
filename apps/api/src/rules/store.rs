//! Holds the active catalogue and swaps it atomically on reload.
//!
//! Readers clone the `Arc` snapshot and classify against it without holding
//! the lock, so an in-flight request always sees one consistent catalogue.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::rules::{CatalogueError, RuleCatalogue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    Embedded,
    File(PathBuf),
}

impl RuleSource {
    pub async fn load(&self) -> Result<RuleCatalogue, CatalogueError> {
        match self {
            RuleSource::Embedded => RuleCatalogue::embedded(),
            RuleSource::File(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogueError::Io {
                        path: path.clone(),
                        source,
                    })?;
                RuleCatalogue::from_json(&json)
            }
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Embedded => f.write_str("embedded"),
            RuleSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct RuleStore {
    source: RuleSource,
    current: RwLock<Arc<RuleCatalogue>>,
}

impl RuleStore {
    /// Loads the catalogue from `source`. Fails if it does not validate.
    pub async fn open(source: RuleSource) -> Result<Self, CatalogueError> {
        let catalogue = source.load().await?;
        info!(
            "Rule catalogue {} loaded from {source} ({} departments)",
            catalogue.version(),
            catalogue.departments().len()
        );
        Ok(Self::with_catalogue(source, catalogue))
    }

    pub fn with_catalogue(source: RuleSource, catalogue: RuleCatalogue) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(catalogue)),
        }
    }

    pub fn source(&self) -> &RuleSource {
        &self.source
    }

    /// The catalogue to classify against for the duration of one request.
    pub fn snapshot(&self) -> Arc<RuleCatalogue> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-reads the source and swaps the new catalogue in. On error the
    /// current catalogue stays active.
    pub async fn reload(&self) -> Result<Arc<RuleCatalogue>, CatalogueError> {
        let fresh = Arc::new(self.source.load().await?);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&fresh);
        info!(
            "Rule catalogue {} reloaded from {}",
            fresh.version(),
            self.source
        );
        Ok(fresh)
    }
}

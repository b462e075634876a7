//! Surah catalog: display names and Makkiyah/Madaniyah classification.
//!
//! The catalog is static lookup data. The built-in table is embedded from
//! `config/surahs.yaml`; a custom YAML file with the same shape can replace it.
//! Aggregation only sees it through the [`GroupClassifier`] trait.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::errors::AnalysisError;

/// Number of surahs in the canonical ordering.
pub const SURAH_COUNT: usize = 114;

static DEFAULT_CATALOG: Lazy<SurahCatalog> = Lazy::new(|| {
    SurahCatalog::from_yaml_str(include_str!("../config/surahs.yaml"))
        .expect("embedded surah catalog must be valid")
});

/// Revelation-period category of a surah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Makkiyah,
    Madaniyah,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Makkiyah, Category::Madaniyah];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Makkiyah => "Makkiyah",
            Category::Madaniyah => "Madaniyah",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lookup injected into the aggregator to label groups.
pub trait GroupClassifier {
    /// Category of `group_id`, or `None` if the group is unknown.
    fn category(&self, group_id: u32) -> Option<Category>;

    /// Display name of `group_id`, if the classifier has one.
    fn name(&self, _group_id: u32) -> Option<&str> {
        None
    }
}

impl<F> GroupClassifier for F
where
    F: Fn(u32) -> Option<Category>,
{
    fn category(&self, group_id: u32) -> Option<Category> {
        self(group_id)
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    surahs: Vec<String>,
    #[serde(default)]
    madaniyah: Vec<String>,
}

/// Surah names in canonical order (index 0 is surah 1) plus the Madaniyah name set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurahCatalog {
    names: Vec<String>,
    ids_by_name: HashMap<String, u32>,
    madaniyah: HashSet<String>,
}

impl SurahCatalog {
    /// The built-in catalog of all 114 surahs.
    pub fn default_catalog() -> &'static SurahCatalog {
        &DEFAULT_CATALOG
    }

    /// Loads a catalog from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading surah catalog from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AnalysisError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        Self::new(file.surahs, file.madaniyah)
    }

    /// Builds a catalog from ordered names and the Madaniyah subset.
    ///
    /// Names must be non-empty and unique, and every Madaniyah name must
    /// appear in `names`.
    pub fn new(names: Vec<String>, madaniyah: Vec<String>) -> Result<Self, AnalysisError> {
        if names.is_empty() {
            return Err(AnalysisError::InvalidCatalog("catalog lists no surahs".into()));
        }

        let mut ids_by_name = HashMap::with_capacity(names.len());
        let mut errors = Vec::new();
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(format!("surah {} has an empty name", idx + 1));
            } else if ids_by_name.insert(name.clone(), idx as u32 + 1).is_some() {
                errors.push(format!("duplicate surah name '{}'", name));
            }
        }

        let madaniyah: HashSet<String> = madaniyah.into_iter().collect();
        for name in &madaniyah {
            if !ids_by_name.contains_key(name) {
                errors.push(format!("madaniyah entry '{}' is not a listed surah", name));
            }
        }

        if !errors.is_empty() {
            return Err(AnalysisError::InvalidCatalog(errors.join("; ")));
        }

        if names.len() != SURAH_COUNT {
            warn!("Surah catalog lists {} names, expected {}.", names.len(), SURAH_COUNT);
        }
        debug!(
            "Surah catalog ready: {} surahs, {} madaniyah.",
            names.len(),
            madaniyah.len()
        );

        Ok(Self {
            names,
            ids_by_name,
            madaniyah,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Surah number for a display name.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.ids_by_name.get(name).copied()
    }

    /// Set-membership test on display names.
    pub fn is_madaniyah_name(&self, name: &str) -> bool {
        self.madaniyah.contains(name)
    }

    /// Surah numbers belonging to `category`, ascending.
    pub fn groups_in(&self, category: Category) -> Vec<u32> {
        (1..=self.names.len() as u32)
            .filter(|&id| self.category(id) == Some(category))
            .collect()
    }
}

impl GroupClassifier for SurahCatalog {
    fn category(&self, group_id: u32) -> Option<Category> {
        let name = self.name(group_id)?;
        if self.is_madaniyah_name(name) {
            Some(Category::Madaniyah)
        } else {
            Some(Category::Makkiyah)
        }
    }

    fn name(&self, group_id: u32) -> Option<&str> {
        let idx = (group_id as usize).checked_sub(1)?;
        self.names.get(idx).map(String::as_str)
    }
}

use super::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN: &str = include_str!("catalog.json");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub title: String,
    pub items: Vec<ContentItem>,
}

/// Read-only feed: one featured title plus ordered rows of items.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Catalog {
    pub featured: ContentId,
    pub rows: Vec<RowGroup>,
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog {
            featured: ContentId(0),
            rows: vec![],
        }
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Ok(serde_json::from_str(BUILTIN)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Loads `path` if given, the embedded catalog otherwise. Never fails.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        path.and_then(|path| {
            Self::load(path)
                .inspect_err(|err| {
                    log::error!("failed to load catalog {}: {:#}", path.display(), err)
                })
                .ok()
        })
        .or_else(|| {
            Self::builtin()
                .inspect_err(|err| log::error!("embedded catalog is invalid: {:#}", err))
                .ok()
        })
        .unwrap_or_else(Self::empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.rows.iter().flat_map(|row| row.items.iter())
    }

    /// First item with `id`, searching rows in order.
    pub fn get(&self, id: ContentId) -> Option<&ContentItem> {
        self.iter().find(|item| item.id == id)
    }

    pub fn featured(&self) -> Option<&ContentItem> {
        self.get(self.featured)
    }
}

//! In-memory project registry.
//!
//! Projects are read-mostly: every request consults the current set, while a
//! reload only happens at startup (or after a CSV import). The registry
//! therefore keeps one immutable [`ProjectSnapshot`] behind a `RwLock` and a
//! reload builds the complete replacement off to the side before swapping it
//! in, so readers never observe a partially loaded set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::{self, DbConnection};

/// One showcased Discord-bot project. `code` is the subdomain label the
/// project lives under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectItem {
    pub code: String,
    pub name: String,
    pub sub_text: String,
    pub description: String,
    pub invite: String,
    pub image_alt: String,
    pub notion: String,
    pub github: String,
}

impl ProjectItem {
    fn trimmed(mut self) -> Self {
        self.code = self.code.trim().to_string();
        self.name = self.name.trim().to_string();
        self.sub_text = self.sub_text.trim().to_string();
        self.description = self.description.trim().to_string();
        self.invite = self.invite.trim().to_string();
        self.image_alt = self.image_alt.trim().to_string();
        self.notion = self.notion.trim().to_string();
        self.github = self.github.trim().to_string();
        self
    }
}

/// Immutable view of the project set at one point in time
pub struct ProjectSnapshot {
    ordered: Vec<Arc<ProjectItem>>,
    by_code: HashMap<String, Arc<ProjectItem>>,
}

impl ProjectSnapshot {
    pub fn build(items: Vec<ProjectItem>) -> Self {
        let ordered: Vec<Arc<ProjectItem>> = items.into_iter().map(Arc::new).collect();
        let by_code = ordered
            .iter()
            .map(|item| (item.code.clone(), item.clone()))
            .collect();
        Self { ordered, by_code }
    }

    pub fn empty() -> Self {
        Self::build(Vec::new())
    }

    pub fn all(&self) -> &[Arc<ProjectItem>] {
        &self.ordered
    }

    pub fn get(&self, code: &str) -> Option<Arc<ProjectItem>> {
        self.by_code.get(code).cloned()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }
}

pub struct ProjectRegistry {
    snapshot: RwLock<Arc<ProjectSnapshot>>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(ProjectSnapshot::empty())),
        }
    }

    /// Current snapshot; cheap to clone, safe to hold across awaits
    pub async fn snapshot(&self) -> Arc<ProjectSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Reload the registry from the database, swapping the whole snapshot
    pub async fn reload(&self, db: &DbConnection) -> rusqlite::Result<usize> {
        let items = {
            let conn = db.lock().await;
            database::load_projects(&conn)?
        };
        let next = Arc::new(ProjectSnapshot::build(
            items.into_iter().map(ProjectItem::trimmed).collect(),
        ));
        let count = next.len();
        *self.snapshot.write().await = next;
        Ok(count)
    }
}

/// Parse a project CSV (headers: Code,Name,SubText,Description,Invite,
/// ImageAlt,Notion,Github), trimming whitespace on every field. Rows that
/// fail to decode are logged and skipped.
pub fn read_csv(path: &Path) -> Result<Vec<ProjectItem>, Box<dyn std::error::Error + Send + Sync>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut items = Vec::new();
    for row in reader.deserialize::<ProjectItem>() {
        match row {
            Ok(item) => items.push(item.trimmed()),
            Err(e) => {
                tracing::warn!("Failed to decode csv row: {}", e);
            }
        }
    }
    Ok(items)
}

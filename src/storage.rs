use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::models::{EntryId, JournalEntry};

/// On-disk shape of one entry. `imgUrl` is accepted for files exported from
/// the web version of the journal.
#[derive(Debug, Deserialize)]
struct EntryRecord {
    date: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default, alias = "imgUrl", alias = "image_ref")]
    image: String,
}

/// Reads the entry collection. A missing file is an empty journal.
pub fn load_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(?path, "no entries file, starting with an empty journal");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let entries = parse_entries(&content)?;
    tracing::info!(?path, count = entries.len(), "loaded entries");
    Ok(entries)
}

pub fn parse_entries(content: &str) -> Result<Vec<JournalEntry>> {
    let records: Vec<EntryRecord> = serde_json::from_str(content)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(i, record)| JournalEntry {
            id: EntryId(i),
            date: record.date,
            description: record.description,
            rating: record.rating,
            categories: record.categories,
            image_ref: record.image,
        })
        .collect())
}

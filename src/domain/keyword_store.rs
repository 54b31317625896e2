use std::collections::HashMap;

use super::error::{AppError, Result};
use super::keyword::KeywordRecord;

/// Insertion-ordered arena of keyword records with an id index.
///
/// Mutations go through the store so that `updated_at` is refreshed and ids
/// stay immutable; readers get snapshots, never references into the arena.
#[derive(Debug, Default, Clone)]
pub struct KeywordStore {
    records: Vec<KeywordRecord>,
    index: HashMap<String, usize>,
}

impl KeywordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn insert(&mut self, record: KeywordRecord) -> Result<()> {
        if self.index.contains_key(&record.id) {
            return Err(AppError::Internal(format!(
                "Duplicate keyword id: {}",
                record.id
            )));
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn insert_batch(&mut self, records: Vec<KeywordRecord>) -> Result<()> {
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&KeywordRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Replace a record in place, keeping its slot and id. The incoming
    /// record must carry the id of an existing record.
    pub fn replace(&mut self, mut record: KeywordRecord) -> Result<()> {
        let slot = *self
            .index
            .get(&record.id)
            .ok_or_else(|| AppError::NotFound(format!("keyword {}", record.id)))?;
        record.created_at = self.records[slot].created_at;
        record.touch();
        self.records[slot] = record;
        Ok(())
    }

    /// Flip the article-created flag once a draft referencing this keyword
    /// exists.
    pub fn mark_article_created(&mut self, id: &str) -> Result<()> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("keyword {}", id)))?;
        let record = &mut self.records[slot];
        record.is_article_created = true;
        record.touch();
        Ok(())
    }

    /// Snapshot of all records in insertion order.
    pub fn records(&self) -> Vec<KeywordRecord> {
        self.records.clone()
    }
}

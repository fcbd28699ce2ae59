//! `minijinja` renderer over host-supplied field maps.

use async_trait::async_trait;
use minijinja::Environment;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::RecordId,
    ports::{CardRenderer, RenderError, RenderResult},
};

/// Renders templates against field maps registered per record.
///
/// Placeholders use `minijinja` syntax, for example `{{ title }}`.
/// Unknown placeholders render as empty strings.
#[derive(Debug, Clone, Default)]
pub struct FieldMapRenderer {
    fields: Arc<RwLock<HashMap<RecordId, Map<String, Value>>>>,
}

impl FieldMapRenderer {
    /// Creates a renderer with no records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the field values for a record.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Source`] when the lock is poisoned.
    pub fn set_fields(&self, record_id: RecordId, fields: Map<String, Value>) -> RenderResult<()> {
        let mut state = self.fields.write().map_err(poisoned)?;
        state.insert(record_id, fields);
        Ok(())
    }

    /// Forgets a record's field values.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Source`] when the lock is poisoned.
    pub fn remove_fields(&self, record_id: &RecordId) -> RenderResult<()> {
        let mut state = self.fields.write().map_err(poisoned)?;
        state.remove(record_id);
        Ok(())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> RenderError {
    RenderError::field_source(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CardRenderer for FieldMapRenderer {
    async fn render(&self, record_id: &RecordId, template: &str) -> RenderResult<String> {
        let context = {
            let state = self.fields.read().map_err(poisoned)?;
            state
                .get(record_id)
                .cloned()
                .ok_or_else(|| RenderError::UnknownRecord(record_id.clone()))?
        };
        let environment = Environment::new();
        environment
            .render_str(template, context)
            .map_err(|error| RenderError::Template {
                record_id: record_id.clone(),
                reason: error.to_string(),
            })
    }
}

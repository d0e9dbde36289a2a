use std::collections::BTreeMap;

/// A single recipient record: column/field name to string value.
pub type Row = BTreeMap<String, String>;

/// Manual-mode field that must be filled before resolution makes sense.
pub const PRIMARY_FIELD: &str = "name";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Active recipient-data mode. Exactly one is active at a time.
pub enum InputMode {
    /// A single hand-entered record.
    #[default]
    Manual,
    /// A parsed CSV batch, one card per row.
    Batch,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Parsed CSV batch as delivered by the upload service.
pub struct BatchData {
    /// Total number of data rows.
    pub row_count: usize,
    /// Ordered column names.
    pub headers: Vec<String>,
    /// First rows, used for editor preview.
    pub preview: Vec<Row>,
    /// Full row set, used by the export pass.
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Recipient data for one editing session.
///
/// Holds both data modes simultaneously so the user can flip between them
/// without losing input; only [`InputContext::mode`] decides which one the
/// resolver reads. Created once per workflow session, written by form
/// collaborators, read-only from the layout core's perspective.
pub struct InputContext {
    /// Currently active mode.
    pub mode: InputMode,
    /// Hand-entered record (name, position, occasion, ...).
    pub manual: Row,
    /// Uploaded batch, if any.
    pub batch: Option<BatchData>,
}

impl InputContext {
    /// Context starting in manual mode with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the active mode. The other mode's data is retained.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Merge one field into the manual record.
    pub fn set_manual_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.manual.insert(key.into(), value.into());
    }

    /// Replace the batch wholesale (after a CSV upload completes).
    pub fn set_batch_data(&mut self, batch: BatchData) {
        self.batch = Some(batch);
    }

    /// The row the editor preview resolves against: the manual record, or
    /// row 0 of the batch preview.
    pub fn preview_row(&self) -> Option<&Row> {
        match self.mode {
            InputMode::Manual => Some(&self.manual),
            InputMode::Batch => self.batch.as_ref().and_then(|b| b.preview.first()),
        }
    }

    /// Whether the active mode has enough data to drive resolution:
    /// a non-empty primary field in manual mode, at least one row in batch
    /// mode.
    pub fn is_ready_for_resolution(&self) -> bool {
        match self.mode {
            InputMode::Manual => self
                .manual
                .get(PRIMARY_FIELD)
                .is_some_and(|v| !v.trim().is_empty()),
            InputMode::Batch => self.batch.as_ref().is_some_and(|b| b.row_count > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_of(rows: Vec<Row>) -> BatchData {
        BatchData {
            row_count: rows.len(),
            headers: rows
                .first()
                .map(|r| r.keys().cloned().collect())
                .unwrap_or_default(),
            preview: rows.clone(),
            rows,
        }
    }

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn mode_switch_retains_other_modes_data() {
        let mut ctx = InputContext::new();
        ctx.set_manual_field("name", "Alice");
        ctx.set_batch_data(batch_of(vec![row(&[("Name", "Bob")])]));

        ctx.set_mode(InputMode::Batch);
        assert_eq!(ctx.manual.get("name").map(String::as_str), Some("Alice"));

        ctx.set_mode(InputMode::Manual);
        assert!(ctx.batch.is_some());
    }

    #[test]
    fn readiness_requires_primary_field_or_rows() {
        let mut ctx = InputContext::new();
        assert!(!ctx.is_ready_for_resolution());
        ctx.set_manual_field("name", "  ");
        assert!(!ctx.is_ready_for_resolution());
        ctx.set_manual_field("name", "Alice");
        assert!(ctx.is_ready_for_resolution());

        ctx.set_mode(InputMode::Batch);
        assert!(!ctx.is_ready_for_resolution());
        ctx.set_batch_data(batch_of(vec![row(&[("Name", "Bob")])]));
        assert!(ctx.is_ready_for_resolution());
    }

    #[test]
    fn preview_row_tracks_active_mode() {
        let mut ctx = InputContext::new();
        ctx.set_manual_field("name", "Alice");
        ctx.set_batch_data(batch_of(vec![
            row(&[("Name", "Bob")]),
            row(&[("Name", "Carol")]),
        ]));

        assert_eq!(
            ctx.preview_row().unwrap().get("name").map(String::as_str),
            Some("Alice")
        );
        ctx.set_mode(InputMode::Batch);
        assert_eq!(
            ctx.preview_row().unwrap().get("Name").map(String::as_str),
            Some("Bob")
        );
    }
}

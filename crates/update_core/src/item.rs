//! User-facing projection of one search hit.

use crate::domain::{UpdateId, UpdateRecord};

/// One selectable row of the update list. The description text is
/// composed once at construction and never changes; the whole list is
/// rebuilt on every search.
pub struct UpdateItem {
    pub id: UpdateId,
    pub checked: bool,
    pub record: UpdateRecord,
    description: String,
}

impl UpdateItem {
    pub fn new(id: UpdateId, record: UpdateRecord) -> Self {
        let description = compose_description(&record);
        Self {
            id,
            checked: record.is_mandatory,
            record,
            description,
        }
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Flattens one record, and recursively any bundled children, into the
/// multi-line text shown in the description pane. Missing optional fields
/// simply omit their section.
pub fn compose_description(record: &UpdateRecord) -> String {
    let mut out = String::new();
    if record.requires_user_input {
        out.push_str("[REQUIRE USER INPUT] ");
    }
    if !record.eula_accepted {
        out.push_str("[EULA NOT ACCEPTED] ");
    }
    out.push_str(&record.title);
    out.push('\n');
    if let Some(description) = &record.description {
        out.push_str(description);
        out.push('\n');
    }
    if !record.more_info_urls.is_empty() {
        out.push_str("More info:\n");
        for url in &record.more_info_urls {
            out.push_str(url);
            out.push('\n');
        }
    }
    if let Some(eula) = &record.eula_text {
        out.push_str("EULA TEXT:\n");
        out.push_str(eula);
        out.push('\n');
    }
    if !record.bundled.is_empty() {
        out.push_str(&format!(
            "This update contains {} packages:\n",
            record.bundled.len()
        ));
        for (index, child) in record.bundled.iter().enumerate() {
            let mut child_text = compose_description(child);
            if child_text.ends_with('\n') {
                child_text.pop();
            }
            // Continuation marker keeps multi-line children readable as
            // one numbered sub-entry.
            out.push_str(&format!(
                "#{}: {}\n",
                index + 1,
                child_text.replace('\n', "\n * ")
            ));
        }
    }
    out
}

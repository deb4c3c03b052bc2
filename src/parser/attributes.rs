use tracing::trace;

use super::record::EntityRecord;
use super::vocab::{is_attribute_label, split_label};

/// Move `Label-value` lines with a known single-value label into
/// `attributes`; every other line goes to the residual. A repeated label
/// overwrites the earlier value.
pub fn classify(record: &mut EntityRecord) {
    for (pos, line) in record.clean_text.iter().enumerate() {
        match split_label(line) {
            Some((label, value)) if is_attribute_label(label) => {
                if let Some(prev) = record.attributes.insert(label.to_string(), value.to_string()) {
                    trace!(college = %record.name, label, prev = %prev, "attribute overwritten");
                }
            }
            _ => record.residual.push(pos, line),
        }
    }
}

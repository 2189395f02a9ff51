use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BlogError, Result};
use crate::model::ScalarField;
use crate::store::RecordStore;

pub fn tombstone(user_name: &str) -> String {
    format!("deleted by {}", user_name)
}

/// Replaces the body with a tombstone. The record, its metadata and its
/// comment links all stay.
pub fn run<S: RecordStore>(store: &mut S, permalink: &str, user_name: &str) -> Result<CmdResult> {
    let body = tombstone(user_name);
    if !store.update_field(permalink, ScalarField::PostBody, &body)? {
        return Err(BlogError::NotFound(permalink.to_string()));
    }

    let mut result = CmdResult::default();
    if let Some(record) = store.find_one_by_permalink(permalink)? {
        result.affected_records.push(record);
    }
    result.add_message(CmdMessage::success(format!(
        "Deleted {} ({})",
        permalink, body
    )));
    Ok(result)
}

use crate::commands::{CmdMessage, CmdResult, NewComment};
use crate::error::{BlogError, Result};
use crate::model::{Comment, Record, SequenceField};
use crate::permalink::comment_permalink;
use crate::store::RecordStore;

/// Stores the comment, then links it under its parent.
///
/// The two writes are independent. If the parent is gone by the second one
/// the comment stays stored but unreachable; that is reported in
/// `CmdResult::orphaned` and logged, not rolled back.
///
/// A comment may not reply to its own permalink: it would be linked into its
/// own reply list.
pub fn run<S: RecordStore>(store: &mut S, new: NewComment) -> Result<CmdResult> {
    let permalink = comment_permalink(new.timestamp);
    if permalink == new.parent {
        return Err(BlogError::Invalid(format!(
            "comment {} cannot reply to itself",
            permalink
        )));
    }
    let comment = Comment {
        user_name: new.user_name,
        permalink: permalink.clone(),
        post_body: new.body,
        comments: Vec::new(),
    };

    store.insert(Record::Comment(comment.clone()))?;
    let linked = store.append_to_sequence(&new.parent, SequenceField::Comments, &permalink)?;

    let mut result = CmdResult::default().with_affected_records(vec![Record::Comment(comment)]);
    if linked {
        tracing::debug!(permalink = %permalink, parent = %new.parent, "comment added");
        result.add_message(CmdMessage::success(format!(
            "Comment added: {} (reply to {})",
            permalink, new.parent
        )));
    } else {
        tracing::warn!(
            permalink = %permalink,
            parent = %new.parent,
            "parent not found, comment stored but orphaned"
        );
        result.add_message(CmdMessage::warning(format!(
            "No post or comment at {}; comment {} was stored but is not linked",
            new.parent, permalink
        )));
        result.orphaned.push(permalink);
    }
    Ok(result)
}

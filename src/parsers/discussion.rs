use crate::error::ScrapeError;
use crate::records::Comment;

/// How many comments survive ranking
pub const MAX_DISCUSSIONS: usize = 5;

/// Parses an upvote label ("Upvoted 12 times") into its count
///
/// The first purely-numeric token wins. A label with no numeric token is a
/// markup regression, not a zero.
pub fn parse_upvotes(label: &str) -> Result<u32, ScrapeError> {
    label
        .split_whitespace()
        .find(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| ScrapeError::MalformedUpvoteCount(label.to_string()))
}

/// Collapses newlines and trims a raw comment body
pub fn normalize_comment(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}

/// Ranks one question's comments by popularity
///
/// `bodies` is the number of comment containers the selector matched;
/// `contents` and `upvote_labels` are the texts read out of each container.
/// The three must agree in length, otherwise the DOM was read mid-mutation
/// or the selectors matched unexpected elements.
///
/// The result is sorted by upvotes descending (stable, so equal scores keep
/// their encounter order) and truncated to the top [`MAX_DISCUSSIONS`].
pub fn rank(
    bodies: usize,
    contents: &[String],
    upvote_labels: &[String],
) -> Result<Vec<Comment>, ScrapeError> {
    if bodies != contents.len() || contents.len() != upvote_labels.len() {
        return Err(ScrapeError::InconsistentDiscussionData {
            bodies,
            contents: contents.len(),
            upvotes: upvote_labels.len(),
        });
    }

    let mut comments = Vec::with_capacity(contents.len());
    for (content, label) in contents.iter().zip(upvote_labels) {
        comments.push(Comment {
            text: normalize_comment(content),
            upvotes: parse_upvotes(label)?,
        });
    }

    // sort_by is stable, ties keep encounter order
    comments.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
    comments.truncate(MAX_DISCUSSIONS);

    Ok(comments)
}

use thiserror::Error;

/// Errors raised while scraping an exam or assembling its deck
///
/// The first four variants signal that the page markup no longer matches the
/// selectors this crate was written against. They are fatal and never
/// retried: a run either extracts the full page set or aborts with one of
/// these diagnostics.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The pagination label yielded too few numeric tokens, or counters
    /// that contradict each other
    #[error("malformed page info label: {reason}")]
    MalformedPageInfo { reason: String },

    /// An upvote label contained no numeric token at all
    #[error("malformed upvote count in label {0:?}")]
    MalformedUpvoteCount(String),

    /// The comment bodies, contents and upvote labels went out of sync
    #[error(
        "inconsistent discussion data: {bodies} bodies, {contents} contents, {upvotes} upvote labels"
    )]
    InconsistentDiscussionData {
        bodies: usize,
        contents: usize,
        upvotes: usize,
    },

    /// The parallel per-page arrays went out of sync
    #[error(
        "card count mismatch: {questions} questions, {options} option sets, {answers} answers, {discussions} discussion sets"
    )]
    CardCountMismatch {
        questions: usize,
        options: usize,
        answers: usize,
        discussions: usize,
    },

    /// A WebDriver command failed (navigation, lookup, screenshot, ...)
    #[error("webdriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    /// The WebDriver session could not be established
    #[error("webdriver session could not be established: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// Filesystem failure while materializing images or reading templates
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Note-field serialization failure
    #[error("failed to serialize note field: {0}")]
    FieldSerialization(#[from] serde_json::Error),

    /// The deck packager rejected the deck or failed to write the archive
    #[error("deck packaging failed: {0}")]
    Packaging(String),
}

use serde::{Deserialize, Serialize};

/// Pagination counters parsed from the page-position label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page currently displayed (1-based)
    pub current_page: u32,

    /// Total number of pages in the exam
    pub total_pages: u32,

    /// First question number visible on this page (1-based)
    pub range_start: u32,

    /// Last question number visible on this page
    pub range_end: u32,

    /// Total number of questions in the exam
    pub total_items: u32,
}

impl PageInfo {
    /// Number of questions shown on the current page
    pub fn items_in_page(&self) -> u32 {
        self.range_end - self.range_start + 1
    }

    /// Whether there are more pages left to visit
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One discussion comment with its popularity score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text, trimmed and with newlines collapsed to spaces
    #[serde(rename = "comment")]
    pub text: String,

    /// Parsed upvote count
    pub upvotes: u32,
}

/// Region of a question card an image was captured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    Question,
    Answer,
}

impl ImageRole {
    /// Name prefix used when deriving image file names
    pub fn prefix(&self) -> &'static str {
        match self {
            ImageRole::Question => "question",
            ImageRole::Answer => "answer",
        }
    }
}

/// A materialized inline image referenced by a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Deterministic file name under the images directory (no path)
    pub file_name: String,

    /// Whether the image belongs to the question or the answer region
    pub role: ImageRole,

    /// Index of the img element within its region, in DOM order
    pub source_index: usize,
}

/// One extracted question with everything needed to build its note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Question text as rendered on the page
    pub question: String,

    /// Suggested answer text, including the community vote summary
    pub answer: String,

    /// Multiple-choice options in display order
    pub options: Vec<String>,

    /// Top discussion comments, ranked by upvotes
    pub discussions: Vec<Comment>,

    /// Images captured from the question region
    pub question_images: Vec<ImageRef>,

    /// Images captured from the answer region
    pub answer_images: Vec<ImageRef>,
}

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use genanki_rs::{Deck, Field, Model, Note, Package, Template};

use crate::error::ScrapeError;
use crate::records::{Card, ImageRef};
use crate::utils;

const MODEL_NAME: &str = "ExamTopics";

/// Front/back markup and stylesheet for the flashcard layout
#[derive(Debug, Clone)]
pub struct DeckTemplate {
    pub front: String,
    pub back: String,
    pub style: String,
}

impl DeckTemplate {
    /// The template shipped with the binary
    pub fn bundled() -> Self {
        Self {
            front: include_str!("assets/frontside.html").to_string(),
            back: include_str!("assets/backside.html").to_string(),
            style: include_str!("assets/style.css").to_string(),
        }
    }

    /// Loads a custom template directory
    ///
    /// The directory must contain `frontside.html`, `backside.html` and
    /// `style.css`.
    pub fn from_dir(dir: &Path) -> Result<Self, ScrapeError> {
        Ok(Self {
            front: fs::read_to_string(dir.join("frontside.html"))?,
            back: fs::read_to_string(dir.join("backside.html"))?,
            style: fs::read_to_string(dir.join("style.css"))?,
        })
    }
}

/// Builds the four note fields for one card
///
/// Question and Answer carry the page text with an img tag appended per
/// captured image; Options and Comments are embedded as JSON so the card
/// templates can render them structurally.
pub fn note_fields(card: &Card) -> Result<[String; 4], ScrapeError> {
    let mut question = card.question.clone();
    question.push_str(&image_tags(&card.question_images));

    let mut answer = card.answer.clone();
    answer.push_str(&image_tags(&card.answer_images));

    Ok([
        question,
        serde_json::to_string(&card.options)?,
        answer,
        serde_json::to_string(&card.discussions)?,
    ])
}

fn image_tags(refs: &[ImageRef]) -> String {
    refs.iter()
        .map(|r| format!(r#"<br><img src="{}">"#, r.file_name))
        .collect()
}

/// Every distinct media file referenced by any card, in first-reference order
pub fn media_files(cards: &[Card], images_dir: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for card in cards {
        for image in card.question_images.iter().chain(&card.answer_images) {
            if seen.insert(image.file_name.clone()) {
                files.push(images_dir.join(&image.file_name));
            }
        }
    }

    files
}

/// Converts the accumulated cards into one Anki package on disk
///
/// Deterministic for identical input: deck and model ids are derived from
/// the title, notes are added in card order and media in first-reference
/// order. Returns the path of the written archive, named after the
/// sanitized title in the current working directory.
pub fn assemble(
    title: &str,
    description: &str,
    cards: &[Card],
    images_dir: &Path,
    template: &DeckTemplate,
) -> Result<PathBuf, ScrapeError> {
    let model = Model::new(
        utils::stable_id(&format!("{}::model", title)),
        MODEL_NAME,
        vec![
            Field::new("Question"),
            Field::new("Options"),
            Field::new("Answer"),
            Field::new("Comments"),
        ],
        vec![
            Template::new(MODEL_NAME)
                .qfmt(&template.front)
                .afmt(&template.back),
        ],
    )
    .css(&template.style);

    let mut deck = Deck::new(utils::stable_id(title), title, description);
    for card in cards {
        let fields = note_fields(card)?;
        let note = Note::new(model.clone(), fields.iter().map(String::as_str).collect())
            .map_err(|e| ScrapeError::Packaging(e.to_string()))?;
        deck.add_note(note);
    }

    let media: Vec<String> = media_files(cards, images_dir)
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    ::log::info!("Bundling {} media files", media.len());

    let mut package = Package::new(vec![deck], media.iter().map(String::as_str).collect())
        .map_err(|e| ScrapeError::Packaging(e.to_string()))?;

    let out_path = PathBuf::from(format!("{}.apkg", utils::sanitize_title(title)));
    package
        .write_to_file(&out_path.to_string_lossy())
        .map_err(|e| ScrapeError::Packaging(e.to_string()))?;
    ::log::info!("Wrote deck to {}", out_path.display());

    Ok(out_path)
}

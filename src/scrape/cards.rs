use crate::error::ScrapeError;
use crate::records::{Card, Comment, ImageRef};

/// Raw per-page extraction output, one entry per question container
///
/// Kept as parallel arrays until [`assemble`] so the same-snapshot invariant
/// can be checked before any Card is built.
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub options: Vec<Vec<String>>,
    pub discussions: Vec<Vec<Comment>>,
    pub question_images: Vec<Vec<ImageRef>>,
    pub answer_images: Vec<Vec<ImageRef>>,
}

/// Zips one page's parallel arrays into Cards, preserving container order
///
/// The four text-bearing arrays must agree in length; a mismatch means the
/// selectors matched different element sets and the whole run is unusable.
pub fn assemble(extraction: PageExtraction) -> Result<Vec<Card>, ScrapeError> {
    let PageExtraction {
        questions,
        answers,
        options,
        discussions,
        question_images,
        answer_images,
    } = extraction;

    if questions.len() != options.len()
        || options.len() != answers.len()
        || answers.len() != discussions.len()
    {
        return Err(ScrapeError::CardCountMismatch {
            questions: questions.len(),
            options: options.len(),
            answers: answers.len(),
            discussions: discussions.len(),
        });
    }

    let mut question_images = question_images.into_iter();
    let mut answer_images = answer_images.into_iter();

    let cards = questions
        .into_iter()
        .zip(answers)
        .zip(options)
        .zip(discussions)
        .map(|(((question, answer), options), discussions)| Card {
            question,
            answer,
            options,
            discussions,
            question_images: question_images.next().unwrap_or_default(),
            answer_images: answer_images.next().unwrap_or_default(),
        })
        .collect();

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction(n: usize) -> PageExtraction {
        PageExtraction {
            questions: (0..n).map(|i| format!("question {}", i)).collect(),
            answers: (0..n).map(|i| format!("answer {}", i)).collect(),
            options: (0..n).map(|_| vec!["A.".to_string(), "B.".to_string()]).collect(),
            discussions: (0..n).map(|_| Vec::new()).collect(),
            question_images: (0..n).map(|_| Vec::new()).collect(),
            answer_images: (0..n).map(|_| Vec::new()).collect(),
        }
    }

    #[test]
    fn test_assemble_preserves_order() {
        let cards = assemble(extraction(3)).unwrap();

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].question, "question 0");
        assert_eq!(cards[2].answer, "answer 2");
        assert_eq!(cards[1].options, vec!["A.", "B."]);
    }

    #[test]
    fn test_assemble_rejects_mismatched_arrays() {
        let mut bad = extraction(3);
        bad.answers.pop();

        match assemble(bad) {
            Err(ScrapeError::CardCountMismatch {
                questions, answers, ..
            }) => {
                assert_eq!(questions, 3);
                assert_eq!(answers, 2);
            }
            other => panic!("expected CardCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_assemble_empty_page() {
        let cards = assemble(PageExtraction::default()).unwrap();
        assert!(cards.is_empty());
    }
}

use std::time::Duration;

use indicatif::ProgressBar;
use tokio::time::sleep;

use crate::error::ScrapeError;
use crate::records::{Card, PageInfo};

/// What the pagination driver needs from a page provider
///
/// The live implementation wraps the WebDriver session; tests drive the
/// state machine with an in-memory fake.
pub trait PageSource {
    /// Reads and parses the pagination counters of the current page
    async fn fetch_info(&mut self) -> Result<PageInfo, ScrapeError>;

    /// Extracts all cards on the current page, in display order
    ///
    /// `card_offset` is the number of cards accumulated so far, used to keep
    /// image file names unique across pages.
    async fn extract(&mut self, card_offset: usize) -> Result<Vec<Card>, ScrapeError>;

    /// Navigates to the given page of the exam (1-based)
    async fn advance(&mut self, next_page: u32) -> Result<(), ScrapeError>;
}

/// Pagination state machine states
#[derive(Debug)]
enum PagerState {
    Start,
    FetchingInfo,
    Extracting(PageInfo),
    Advancing(PageInfo),
    Done,
}

/// Walks an exam's pages in order and accumulates their cards
///
/// Strictly sequential: one page at a time, each visited exactly once. The
/// settling delay is awaited before every info fetch so asynchronously
/// rendered question lists are complete when read.
pub struct Pager {
    delay: Duration,
}

impl Pager {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Runs the page walk to completion and returns all cards in page order
    ///
    /// Progress is reported to `progress` after every extracted page; its
    /// length is set from the exam's total question count on the first
    /// fetch. Pass `ProgressBar::hidden()` to opt out.
    pub async fn collect<S: PageSource>(
        &self,
        source: &mut S,
        progress: &ProgressBar,
    ) -> Result<Vec<Card>, ScrapeError> {
        let mut cards: Vec<Card> = Vec::new();
        let mut state = PagerState::Start;

        loop {
            state = match state {
                PagerState::Start => PagerState::FetchingInfo,

                PagerState::FetchingInfo => {
                    sleep(self.delay).await;
                    let info = source.fetch_info().await?;
                    ::log::info!(
                        "Page {} of {} ({} questions total)",
                        info.current_page,
                        info.total_pages,
                        info.total_items
                    );
                    // The total is constant across pages, so this is a
                    // no-op after the first fetch regardless of how the
                    // bar was constructed
                    progress.set_length(info.total_items as u64);
                    PagerState::Extracting(info)
                }

                PagerState::Extracting(info) => {
                    let batch = source.extract(cards.len()).await?;
                    ::log::debug!(
                        "Extracted {} cards from page {}",
                        batch.len(),
                        info.current_page
                    );
                    progress.inc(batch.len() as u64);
                    cards.extend(batch);
                    PagerState::Advancing(info)
                }

                PagerState::Advancing(info) => {
                    if info.has_next() {
                        source.advance(info.current_page + 1).await?;
                        PagerState::FetchingInfo
                    } else {
                        PagerState::Done
                    }
                }

                PagerState::Done => break,
            };
        }

        ::log::info!("Pagination complete, {} cards accumulated", cards.len());
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory source serving a fixed number of five-question pages
    struct FakeSource {
        total_pages: u32,
        per_page: u32,
        current_page: u32,
        info_fetches: usize,
        extractions: usize,
        offsets_seen: Vec<usize>,
    }

    impl FakeSource {
        fn new(total_pages: u32, per_page: u32) -> Self {
            Self {
                total_pages,
                per_page,
                current_page: 1,
                info_fetches: 0,
                extractions: 0,
                offsets_seen: Vec::new(),
            }
        }

        fn card(&self, index: u32) -> Card {
            Card {
                question: format!("question {}", index),
                answer: "answer".to_string(),
                options: Vec::new(),
                discussions: Vec::new(),
                question_images: Vec::new(),
                answer_images: Vec::new(),
            }
        }
    }

    impl PageSource for FakeSource {
        async fn fetch_info(&mut self) -> Result<PageInfo, ScrapeError> {
            self.info_fetches += 1;
            let start = (self.current_page - 1) * self.per_page + 1;
            Ok(PageInfo {
                current_page: self.current_page,
                total_pages: self.total_pages,
                range_start: start,
                range_end: start + self.per_page - 1,
                total_items: self.total_pages * self.per_page,
            })
        }

        async fn extract(&mut self, card_offset: usize) -> Result<Vec<Card>, ScrapeError> {
            self.extractions += 1;
            self.offsets_seen.push(card_offset);
            let start = (self.current_page - 1) * self.per_page;
            Ok((start..start + self.per_page).map(|i| self.card(i)).collect())
        }

        async fn advance(&mut self, next_page: u32) -> Result<(), ScrapeError> {
            assert_eq!(next_page, self.current_page + 1, "pages must advance by one");
            self.current_page = next_page;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_walks_every_page_exactly_once() {
        let mut source = FakeSource::new(10, 5);
        let pager = Pager::new(Duration::ZERO);
        let progress = ProgressBar::hidden();

        let cards = pager.collect(&mut source, &progress).await.unwrap();

        assert_eq!(source.info_fetches, 10);
        assert_eq!(source.extractions, 10);
        assert_eq!(cards.len(), 50);

        // Accumulator holds pages in order, in-page order preserved
        assert_eq!(cards[0].question, "question 0");
        assert_eq!(cards[49].question, "question 49");

        // Card offsets grow with the accumulator
        assert_eq!(source.offsets_seen, vec![0, 5, 10, 15, 20, 25, 30, 35, 40, 45]);
    }

    #[tokio::test]
    async fn test_single_page_exam_terminates_immediately() {
        let mut source = FakeSource::new(1, 5);
        let pager = Pager::new(Duration::ZERO);

        let cards = pager
            .collect(&mut source, &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(source.info_fetches, 1);
        assert_eq!(cards.len(), 5);
    }

    #[tokio::test]
    async fn test_progress_length_set_from_total_items() {
        let mut source = FakeSource::new(2, 5);
        let pager = Pager::new(Duration::ZERO);
        let progress = ProgressBar::hidden();

        pager.collect(&mut source, &progress).await.unwrap();

        assert_eq!(progress.length(), Some(10));
        assert_eq!(progress.position(), 10);
    }

    #[tokio::test]
    async fn test_progress_total_overrides_preexisting_length() {
        let mut source = FakeSource::new(2, 5);
        let pager = Pager::new(Duration::ZERO);
        // A bar constructed with a length still ends up with the exam total
        let progress = ProgressBar::new(0);

        pager.collect(&mut source, &progress).await.unwrap();

        assert_eq!(progress.length(), Some(10));
        assert_eq!(progress.position(), 10);
        progress.finish_and_clear();
    }
}

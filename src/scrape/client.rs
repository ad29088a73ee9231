use std::path::PathBuf;

use fantoccini::key::Key;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::parsers::{digits, discussion};
use crate::records::{Card, ImageRole, PageInfo};
use crate::scrape::cards::{self, PageExtraction};
use crate::scrape::images;
use crate::scrape::pager::PageSource;

// Site selectors. A change to any of these surfaces as one of the fatal
// extraction errors rather than silently wrong data.
const PAGE_INFO_SELECTOR: &str = ".card-text";
const CARD_SELECTOR: &str = ".exam-question-card";
const QUESTION_SELECTOR: &str = ".card-text";
const ANSWER_SELECTOR: &str = ".question-answer";
const OPTION_SELECTOR: &str = ".multi-choice-item";
const COMMENT_SELECTOR: &str = ".comment-body";
const COMMENT_CONTENT_SELECTOR: &str = ".comment-content";
const UPVOTE_SELECTOR: &str = ".upvote-text";

const USERNAME_INPUT_ID: &str = "etemail";
const PASSWORD_INPUT_ID: &str = "etpass";
const LOGIN_BUTTON_SELECTOR: &str = ".login-button";
const INLINE_DISCUSSIONS_ID: &str = "inline-discussions-checkbox";
const ANSWER_EXPOSE_ID: &str = "answer-expose-checkbox";
const QUESTION_COUNT_ID: &str = "QuestionCount";
const SESSION_SUBMIT_SELECTOR: &str = ".btn-primary";
const EXAM_INTRO_SELECTOR: &str = ".exam-intro-box";

/// Keystrokes sent to push the question-count slider to its maximum
const QUESTION_COUNT_STEPS: usize = 100;

/// Login credentials for the exam site
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One authenticated WebDriver session against the exam site
///
/// Owns the browser session and the images directory for the whole run;
/// nothing else touches either while a scrape is in flight.
pub struct ExamClient {
    client: Client,
    config: ScrapeConfig,
    images_dir: PathBuf,
}

impl ExamClient {
    /// Connects to the WebDriver instance and opens the exam's custom view
    pub async fn connect(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut caps = serde_json::map::Map::new();
        if config.headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless=new", "--disable-gpu"] }),
            );
        }

        ::log::info!("Connecting to WebDriver at {}", config.webdriver_url);
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await?;

        client.goto(&config.custom_view_url()).await?;

        Ok(Self {
            client,
            images_dir: config.images_dir(),
            config: config.clone(),
        })
    }

    /// Fills and submits the login form on the custom-view page
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ScrapeError> {
        ::log::info!("Logging in as {}", credentials.username);

        let username = self.client.find(Locator::Id(USERNAME_INPUT_ID)).await?;
        username.clear().await?;
        username.send_keys(&credentials.username).await?;

        let password = self.client.find(Locator::Id(PASSWORD_INPUT_ID)).await?;
        password.clear().await?;
        password.send_keys(&credentials.password).await?;

        self.client
            .find(Locator::Css(LOGIN_BUTTON_SELECTOR))
            .await?
            .click()
            .await?;

        Ok(())
    }

    /// Configures the session for inline discussions, exposed answers and
    /// the maximum number of questions per page, then submits
    pub async fn configure_session(&self) -> Result<(), ScrapeError> {
        ::log::info!("Preparing session settings");

        self.client
            .find(Locator::Id(INLINE_DISCUSSIONS_ID))
            .await?
            .click()
            .await?;
        self.client
            .find(Locator::Id(ANSWER_EXPOSE_ID))
            .await?
            .click()
            .await?;

        let slider = self.client.find(Locator::Id(QUESTION_COUNT_ID)).await?;
        let right = String::from(char::from(Key::Right));
        for _ in 0..QUESTION_COUNT_STEPS {
            slider.send_keys(&right).await?;
        }

        self.client
            .find(Locator::Css(SESSION_SUBMIT_SELECTOR))
            .await?
            .click()
            .await?;

        Ok(())
    }

    /// Reads the exam's introduction text from its landing page
    ///
    /// Navigates away from the question view, so only call this after the
    /// page walk has finished.
    pub async fn exam_description(&self) -> Result<String, ScrapeError> {
        self.client.goto(&self.config.exam_url()).await?;
        let intro = self.client.find(Locator::Css(EXAM_INTRO_SELECTOR)).await?;
        Ok(intro.text().await?)
    }

    /// Ends the WebDriver session
    pub async fn close(self) -> Result<(), ScrapeError> {
        self.client.close().await?;
        Ok(())
    }
}

impl PageSource for ExamClient {
    async fn fetch_info(&mut self) -> Result<PageInfo, ScrapeError> {
        let label = self
            .client
            .find(Locator::Css(PAGE_INFO_SELECTOR))
            .await?
            .text()
            .await?;
        digits::parse_page_info(&label)
    }

    async fn extract(&mut self, card_offset: usize) -> Result<Vec<Card>, ScrapeError> {
        let containers = self.client.find_all(Locator::Css(CARD_SELECTOR)).await?;
        let mut extraction = PageExtraction::default();

        for (index, container) in containers.iter().enumerate() {
            let question_element = container.find(Locator::Css(QUESTION_SELECTOR)).await?;
            let answer_element = container.find(Locator::Css(ANSWER_SELECTOR)).await?;

            extraction.questions.push(question_element.text().await?);
            extraction.answers.push(answer_element.text().await?);

            // An empty match set here is valid data (a question can have no
            // options or comments); a missing child of a matched comment is
            // a markup regression and propagates as a WebDriver error.
            let mut options = Vec::new();
            for option in container.find_all(Locator::Css(OPTION_SELECTOR)).await? {
                options.push(option.text().await?);
            }
            extraction.options.push(options);

            let bodies = container.find_all(Locator::Css(COMMENT_SELECTOR)).await?;
            let mut contents = Vec::with_capacity(bodies.len());
            let mut upvote_labels = Vec::with_capacity(bodies.len());
            for body in &bodies {
                contents.push(
                    body.find(Locator::Css(COMMENT_CONTENT_SELECTOR))
                        .await?
                        .text()
                        .await?,
                );
                upvote_labels.push(
                    body.find(Locator::Css(UPVOTE_SELECTOR))
                        .await?
                        .text()
                        .await?,
                );
            }
            extraction
                .discussions
                .push(discussion::rank(bodies.len(), &contents, &upvote_labels)?);

            let question_index = card_offset + index;
            extraction.question_images.push(
                images::materialize(
                    &question_element,
                    &self.images_dir,
                    question_index,
                    ImageRole::Question,
                )
                .await?,
            );
            extraction.answer_images.push(
                images::materialize(
                    &answer_element,
                    &self.images_dir,
                    question_index,
                    ImageRole::Answer,
                )
                .await?,
            );
        }

        cards::assemble(extraction)
    }

    async fn advance(&mut self, next_page: u32) -> Result<(), ScrapeError> {
        let url = self.config.page_url(next_page);
        ::log::debug!("Navigating to {}", url);
        self.client.goto(&url).await?;
        Ok(())
    }
}

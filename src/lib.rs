#![allow(async_fn_in_trait)]

// Re-export modules
pub mod config;
pub mod deck;
pub mod error;
pub mod parsers;
pub mod records;
pub mod scrape;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use records::{Card, Comment, PageInfo};
pub use scrape::client::Credentials;

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use deck::DeckTemplate;
use scrape::client::ExamClient;
use scrape::pager::Pager;

/// Builder for one complete scrape-and-export run
///
/// Logs into the exam site, walks every question page, materializes inline
/// images and writes one Anki package into the current working directory.
pub struct ExamRun {
    config: ScrapeConfig,
    credentials: Credentials,
    template_dir: Option<PathBuf>,
    show_progress: bool,
}

impl ExamRun {
    /// Create a run for the given exam and credentials
    pub fn new(config: ScrapeConfig, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
            template_dir: None,
            show_progress: true,
        }
    }

    /// Use a custom template directory instead of the bundled layout
    pub fn with_template_dir(mut self, dir: PathBuf) -> Self {
        self.template_dir = Some(dir);
        self
    }

    /// Suppress the terminal progress bar
    pub fn with_quiet_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Executes the run and returns the path of the written archive
    pub async fn execute(self) -> Result<PathBuf, ScrapeError> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        // Resolve the template before opening a browser session so a bad
        // path fails fast
        let template = match &self.template_dir {
            Some(dir) => DeckTemplate::from_dir(dir)?,
            None => DeckTemplate::bundled(),
        };

        let title = config.deck_title();
        ::log::info!("Starting scrape for {}", title);

        let mut client = ExamClient::connect(&config).await?;
        client.login(&self.credentials).await?;
        client.configure_session().await?;

        let progress = if self.show_progress {
            // No length yet; the pager fills it in from the exam's total
            // question count on the first page fetch
            let bar = ProgressBar::no_length();
            if let Ok(style) =
                ProgressStyle::with_template("{wide_bar} {pos}/{len} questions ({eta})")
            {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        let pager = Pager::new(Duration::from_secs(config.page_delay_secs));
        let cards = pager.collect(&mut client, &progress).await?;
        progress.finish();

        let description = client.exam_description().await?;
        client.close().await?;

        deck::assemble(&title, &description, &cards, &config.images_dir(), &template)
    }
}

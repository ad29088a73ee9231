use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::utils;

const SITE_ROOT: &str = "https://www.examtopics.com/exams";

/// Configuration for one exam scrape
///
/// Everything the pagination driver and deck assembler need is carried here
/// explicitly instead of being read from process globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Exam provider slug as it appears in the site URL (e.g. "amazon")
    pub provider: String,

    /// Exam slug as it appears in the site URL
    /// (e.g. "aws-certified-cloud-practitioner")
    pub exam: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Whether to hide the automated browser window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Settling pause before reading each page, in seconds
    ///
    /// The question list renders asynchronously after navigation; reading it
    /// too early yields a partial DOM. This is a blocking pause, traded for
    /// reliability over throughput.
    #[serde(default = "default_page_delay")]
    pub page_delay_secs: u64,
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for headless
fn default_headless() -> bool {
    true
}

/// Default settling pause in seconds
fn default_page_delay() -> u64 {
    10
}

impl ScrapeConfig {
    /// Create a new configuration with default values
    pub fn new(provider: &str, exam: &str) -> Self {
        Self {
            provider: provider.to_string(),
            exam: exam.to_string(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            page_delay_secs: default_page_delay(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Landing page for the exam
    pub fn exam_url(&self) -> String {
        format!("{}/{}/{}", SITE_ROOT, self.provider, self.exam)
    }

    /// Entry point of the paginated custom view
    pub fn custom_view_url(&self) -> String {
        format!("{}/custom-view/", self.exam_url())
    }

    /// Direct URL of one page of the custom view (1-based)
    pub fn page_url(&self, page: u32) -> String {
        format!("{}/view/{}", self.exam_url(), page)
    }

    /// Directory the materialized images land in
    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from("images").join(&self.provider).join(&self.exam)
    }

    /// Human-readable deck title derived from the slugs
    pub fn deck_title(&self) -> String {
        format!(
            "ExamTopics::{}::{}",
            utils::capitalize(&self.provider),
            utils::title_case(&self.exam.replace('-', " "))
        )
    }
}

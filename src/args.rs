use std::path::PathBuf;

use clap::Parser;
use examdeck::Credentials;

#[derive(Parser, Debug)]
#[command(name = "examdeck")]
#[command(about = "Convert ExamTopics exam pages into an Anki deck")]
#[command(
    after_help = "To find the provider and exam slugs, look at the exam URL:\n  \
                  examtopics.com/exams/<provider>/<exam>\n\
                  Contributor Access to the exam is required."
)]
#[command(version)]
pub struct Args {
    /// ExamTopics username or email (env: EXAMTOPICS_USER)
    #[arg(short, long)]
    pub user: Option<String>,

    /// ExamTopics password (env: EXAMTOPICS_PASS)
    #[arg(short, long)]
    pub pass: Option<String>,

    /// Exam provider slug from the URL (Ex: amazon)
    #[arg(short = 'r', long)]
    pub provider: String,

    /// Exam slug from the URL (Ex: aws-certified-cloud-practitioner)
    #[arg(short, long)]
    pub exam: String,

    /// Custom template directory with frontside.html, backside.html, style.css
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Seconds to wait for each page to settle before reading it
    #[arg(long, default_value_t = 10)]
    pub page_delay: u64,

    /// Show the automated browser window
    #[arg(long)]
    pub debug: bool,
}

/// Resolves credentials from flags, falling back to the environment
///
/// Returns None when either half is missing, which the caller treats as a
/// usage error.
pub fn resolve_credentials(args: &Args) -> Option<Credentials> {
    let username = args
        .user
        .clone()
        .or_else(|| std::env::var("EXAMTOPICS_USER").ok())?;
    let password = args
        .pass
        .clone()
        .or_else(|| std::env::var("EXAMTOPICS_PASS").ok())?;

    Some(Credentials { username, password })
}

use clap::{CommandFactory, Parser};
use examdeck::{ExamRun, ScrapeConfig};

mod args;
use args::{Args, resolve_credentials};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let Some(credentials) = resolve_credentials(&args) else {
        let _ = Args::command().print_help();
        eprintln!("\nerror: credentials are required (--user/--pass or EXAMTOPICS_USER/EXAMTOPICS_PASS)");
        std::process::exit(2);
    };

    let mut config = ScrapeConfig::new(&args.provider, &args.exam);
    config.headless = !args.debug;
    config.page_delay_secs = args.page_delay;

    ::log::info!("Starting examdeck for {}/{}", args.provider, args.exam);
    println!("Note: scraping requires a WebDriver server (e.g. ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let mut run = ExamRun::new(config, credentials);
    if let Some(template) = args.template {
        run = run.with_template_dir(template);
    }

    let start_time = std::time::Instant::now();
    match run.execute().await {
        Ok(path) => {
            let duration = start_time.elapsed();
            ::log::info!(
                "Export complete in {:.2} seconds",
                duration.as_secs_f64()
            );
            println!("Wrote {}", path.display());
        }
        Err(e) => {
            ::log::error!("Run failed: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

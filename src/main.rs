//! EduPulse - safety-training survey collection and analysis
//!
//! A CLI tool that collects Likert-scale and free-text feedback after
//! safety-education sessions, stores it in a local JSON file, and gives
//! an administrator aggregated statistics plus an AI-generated summary
//! of the comments.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (storage write failure, bad arguments, wrong password)

mod admin;
mod analysis;
mod catalog;
mod cli;
mod config;
mod models;
mod report;
mod store;
mod summarizer;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{parse_rating_arg, Args, Command, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{
    AnalysisResult, Answer, DashboardReport, QuestionKind, ReportMetadata, SurveyResponse,
};
use std::collections::BTreeMap;
use std::time::Duration;
use store::ResponseStore;
use summarizer::gemini::GeminiConfig;
use summarizer::{FeedbackSummarizer, GeminiClient};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("EduPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .edupulse.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".edupulse.toml");

    if path.exists() {
        eprintln!("⚠️  .edupulse.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .edupulse.toml")?;

    println!("✅ Created .edupulse.toml with default settings.");
    println!("   Edit it to customize the data file, model, and admin password.");
    println!("   Set GEMINI_API_KEY in the environment to enable AI analysis.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the selected subcommand. Returns the process exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let store = ResponseStore::new(&config.storage.data_file);
    let questions = catalog::survey_questions();

    match args.command {
        Command::Submit {
            ref ratings,
            ref comment,
        } => handle_submit(&store, &questions, ratings, comment.as_deref()),
        Command::Stats {
            ref password,
            format,
            ref output,
        } => handle_stats(&config, &store, &questions, password, format, output.as_deref()),
        Command::Comments { ref password } => {
            handle_comments(&config, &store, &questions, password)
        }
        Command::Analyze { ref password } => {
            handle_analyze(&config, &store, &questions, password).await
        }
        Command::Clear { ref password, yes } => handle_clear(&config, &store, password, yes),
        Command::InitConfig => unreachable!("handled before logging init"),
    }
}

/// Handle `submit`: validate the answers and append one response.
fn handle_submit(
    store: &ResponseStore,
    questions: &[models::Question],
    ratings: &[String],
    comment: Option<&str>,
) -> Result<i32> {
    let mut answers: BTreeMap<u32, Answer> = BTreeMap::new();

    for rating in ratings {
        let (id, value) = parse_rating_arg(rating).map_err(anyhow::Error::msg)?;
        if !questions
            .iter()
            .any(|q| q.id == id && q.kind == QuestionKind::Rating)
        {
            anyhow::bail!("Question {} is not a rating question in the catalog", id);
        }
        answers.insert(id, Answer::Number(value));
    }

    // The survey form requires an answer for every rating question.
    let missing: Vec<u32> = questions
        .iter()
        .filter(|q| q.kind == QuestionKind::Rating && !answers.contains_key(&q.id))
        .map(|q| q.id)
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "Please answer all rating questions (missing: {})",
            missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if let Some(comment) = comment {
        if let Some(question) = questions.iter().find(|q| q.kind == QuestionKind::FreeText) {
            if !comment.trim().is_empty() {
                answers.insert(question.id, Answer::Text(comment.trim().to_string()));
            }
        }
    }

    let response = SurveyResponse::new(answers);

    // A failed write must be surfaced: the submission is not recorded
    // and the user should retry.
    store
        .append(&response)
        .context("Failed to save your submission. Please check the data file and try again")?;

    println!("✅ Thank you! Your response has been recorded.");
    println!("   Response id: {}", response.id);
    Ok(0)
}

/// Handle `stats`: the admin dashboard.
fn handle_stats(
    config: &Config,
    store: &ResponseStore,
    questions: &[models::Question],
    password: &str,
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> Result<i32> {
    let _session = login(config, password)?;

    let responses = store.load();
    let Some(statistics) = analysis::compute_statistics(&responses, questions) else {
        println!("📭 No survey data yet. Statistics will appear after the first submission.");
        return Ok(0);
    };

    let dashboard = DashboardReport {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            data_file: config.storage.data_file.clone(),
            total_responses: statistics.total_responses,
        },
        statistics: statistics.per_question,
        comments: analysis::collect_comment_entries(&responses, questions),
        analysis: None,
    };

    let rendered = match format {
        OutputFormat::Markdown => report::generate_markdown_report(&dashboard),
        OutputFormat::Json => report::generate_json_report(&dashboard)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📊 Report for {} responses saved to: {}", dashboard.metadata.total_responses, path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(0)
}

/// Handle `comments`: list all free-text responses.
fn handle_comments(
    config: &Config,
    store: &ResponseStore,
    questions: &[models::Question],
    password: &str,
) -> Result<i32> {
    let _session = login(config, password)?;

    let responses = store.load();
    let comments = analysis::collect_comment_entries(&responses, questions);

    if comments.is_empty() {
        println!("📭 No free-text responses have been submitted.");
        return Ok(0);
    }

    println!("💬 {} free-text responses:\n", comments.len());
    for entry in &comments {
        let submitted = chrono::DateTime::from_timestamp_millis(entry.timestamp)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        println!("  \"{}\"", entry.text);
        println!("      — {}\n", submitted);
    }

    Ok(0)
}

/// Handle `analyze`: run the AI analysis over all comments.
async fn handle_analyze(
    config: &Config,
    store: &ResponseStore,
    questions: &[models::Question],
    password: &str,
) -> Result<i32> {
    let _session = login(config, password)?;

    let responses = store.load();
    let comments = analysis::collect_comments(&responses, questions);
    info!("Collected {} comments for analysis", comments.len());

    let client = GeminiClient::new(GeminiConfig {
        api_url: config.model.api_url.clone(),
        api_key: config.model.api_key.clone(),
        model: config.model.name.clone(),
        temperature: config.model.temperature,
        timeout_seconds: config.model.timeout_seconds,
    })?;
    let summarizer = FeedbackSummarizer::new(Box::new(client));

    // One request at a time; the spinner stands in for the disabled
    // trigger while the request is outstanding.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message(format!(
        "Analyzing {} comments with {}...",
        comments.len(),
        config.model.name
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = summarizer.summarize(&comments).await;

    spinner.finish_and_clear();
    print_analysis(&result);

    Ok(0)
}

/// Print an analysis result to the terminal.
fn print_analysis(result: &AnalysisResult) {
    println!("🤖 AI Feedback Analysis\n");
    println!(
        "   Overall sentiment: {} {}",
        result.sentiment.emoji(),
        result.sentiment
    );
    println!("   Summary: {}", result.summary);

    if !result.key_points.is_empty() {
        println!("\n   Key points:");
        for point in &result.key_points {
            println!("   • {}", point);
        }
    }
}

/// Handle `clear`: bulk-delete all survey data.
fn handle_clear(
    config: &Config,
    store: &ResponseStore,
    password: &str,
    yes: bool,
) -> Result<i32> {
    let _session = login(config, password)?;

    if !yes {
        eprintln!("⚠️  This deletes ALL survey responses and cannot be undone.");
        eprintln!("   Re-run with --yes to confirm.");
        return Ok(1);
    }

    let count = store.load().len();
    store.clear();
    println!("🗑️  Cleared {} survey responses.", count);
    Ok(0)
}

/// Check the admin passphrase, producing an explicit session value.
fn login(config: &Config, password: &str) -> Result<admin::AdminSession> {
    admin::login(password, &config.admin.password)
        .ok_or_else(|| anyhow::anyhow!("Incorrect admin password"))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .edupulse.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

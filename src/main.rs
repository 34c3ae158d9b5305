mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use contentflow::trends::{TrendPost, TrendReport};
use contentflow::{
    format_float, format_percent, AnalysisRequest, AnalyzerConfig, ContentAnalysis,
    ContentAnalyzer, ContentType,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contentflow", about = "Content engagement scoring")]
struct Cli {
    /// Analyzer config (TOML); defaults to config/analysis.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Trends(TrendsArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Files analyzed in order against one shared corpus.
    files: Vec<PathBuf>,
    #[arg(long)]
    text: Option<String>,
    #[arg(long, default_value = "post")]
    content_type: String,
    #[arg(long = "platform", default_values = ["twitter", "linkedin", "instagram"])]
    platforms: Vec<String>,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct TrendsArgs {
    /// JSON array of scraped posts.
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value_t = 10)]
    top: usize,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long, default_value = "data/records.json")]
    records: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/analysis.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .try_init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    if let Command::InitConfig(args) = &cli.command {
        return init_config(&args.path);
    }

    let (config, config_path) = AnalyzerConfig::load(cli.config).map_err(|err| err.to_string())?;
    if let Some(path) = config_path.filter(|path| path.exists()) {
        tracing::info!(path = %path.display(), "loaded analyzer config");
    }

    match cli.command {
        Command::Analyze(args) => run_analyze(args, config),
        Command::Trends(args) => run_trends(args, config),
        Command::Serve(args) => server::serve(args, config).await,
        Command::InitConfig(_) => Ok(()),
    }
}

fn run_analyze(args: AnalyzeArgs, config: AnalyzerConfig) -> Result<(), String> {
    let content_type = ContentType::from_str(&args.content_type)
        .ok_or_else(|| format!("invalid content type: {}", args.content_type))?;

    let documents = read_documents(&args)?;
    let analyzer = ContentAnalyzer::new(config);

    let mut results = Vec::with_capacity(documents.len());
    for (label, text) in documents {
        let request = AnalysisRequest::new(text, content_type, args.platforms.clone());
        let analysis = analyzer.analyze(&request).map_err(|err| format!("{}: {}", label, err))?;
        results.push((label, analysis));
    }

    if args.json {
        let payload: Vec<&ContentAnalysis> = results.iter().map(|(_, analysis)| analysis).collect();
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|err| format!("failed to serialize analysis: {}", err))?;
        println!("{}", json);
        return Ok(());
    }

    for (position, (label, analysis)) in results.iter().enumerate() {
        if position > 0 {
            println!();
        }
        print_analysis(label, analysis, args.details);
    }
    Ok(())
}

fn print_analysis(label: &str, analysis: &ContentAnalysis, details: bool) {
    let metrics = &analysis.metrics;
    println!("== {} ({})", label, analysis.category);
    println!("Engagement score: {}", format_float(metrics.engagement_score, 2));
    println!("Virality potential: {}", format_float(metrics.virality_potential, 2));
    println!("Audience fit: {}", format_float(metrics.audience_fit, 2));
    println!("Content quality: {}", format_float(metrics.content_quality_score, 2));

    let scores: Vec<String> = analysis
        .platform_scores
        .iter()
        .map(|(platform, score)| format!("{} {}", platform.as_str(), format_float(*score, 2)))
        .collect();
    if !scores.is_empty() {
        println!("Platforms: {}", scores.join(" | "));
    }

    let times: Vec<String> = metrics
        .optimal_posting_times
        .iter()
        .map(|(platform, window)| format!("{} {}", platform.as_str(), window))
        .collect();
    if !times.is_empty() {
        println!("Post at: {}", times.join(" | "));
    }
    if !metrics.hashtag_recommendations.is_empty() {
        println!("Hashtags: {}", metrics.hashtag_recommendations.join(" "));
    }
    if !analysis.ignored_platforms.is_empty() {
        println!("Ignored platforms: {}", analysis.ignored_platforms.join(", "));
    }

    if details {
        let signals = &analysis.signals;
        let stats = &analysis.statistics;
        println!("\nSignals:");
        println!("  emotion: {}", format_percent(signals.emotion));
        println!("  shareability: {}", format_percent(signals.shareability));
        println!("  uniqueness: {}", format_percent(signals.uniqueness));
        println!("  timeliness: {}", format_percent(signals.timeliness));
        println!("  readability: {}", format_percent(signals.readability));
        println!("  structure: {}", format_percent(signals.structure));
        println!("  predicted_engagement: {}", format_percent(signals.predicted_engagement));
        println!("  originality: {}", format_percent(signals.originality));
        println!(
            "Text: {} words | {} sentences | {} paragraphs | {} words/sentence | {} chars/word",
            stats.word_count,
            stats.sentence_count,
            stats.paragraph_count,
            format_float(stats.avg_words_per_sentence, 1),
            format_float(stats.avg_word_length, 1)
        );
    }
}

fn run_trends(args: TrendsArgs, config: AnalyzerConfig) -> Result<(), String> {
    let data = std::fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read {}: {}", args.input.display(), err))?;
    let posts: Vec<TrendPost> = serde_json::from_str(&data)
        .map_err(|err| format!("failed to parse {}: {}", args.input.display(), err))?;

    let analyzer = ContentAnalyzer::new(config);
    let report = TrendReport::build(&posts, analyzer.classifier(), args.top);

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize report: {}", err))?;
        println!("{}", json);
        return Ok(());
    }

    println!("Posts analyzed: {}", report.total_projects_analyzed);
    println!("Top trending projects:");
    for ranked in &report.top_trending_projects {
        let platform = ranked.post.platform.map(|p| p.as_str()).unwrap_or("unknown");
        println!(
            "- {} (platform: {}, engagement: {})",
            ranked.post.label(),
            platform,
            format_float(ranked.engagement_score, 2)
        );
    }
    println!("\nAverage engagement:");
    for (platform, average) in &report.average_engagement {
        let count = report.platform_distribution.get(platform).copied().unwrap_or(0);
        println!("  {}: {} over {} posts", platform, format_float(*average, 1), count);
    }
    println!("\nCategories:");
    for (category, count) in &report.category_distribution {
        println!("  {}: {}", category, count);
    }
    Ok(())
}

fn init_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("config already exists: {}", path.display()));
    }
    AnalyzerConfig::default()
        .write(path)
        .map_err(|err| err.to_string())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn read_documents(args: &AnalyzeArgs) -> Result<Vec<(String, String)>, String> {
    if !args.files.is_empty() {
        return args
            .files
            .iter()
            .map(|path| {
                std::fs::read_to_string(path)
                    .map(|text| (path.display().to_string(), text))
                    .map_err(|err| format!("failed to read {}: {}", path.display(), err))
            })
            .collect();
    }

    if let Some(text) = args.text.as_ref() {
        if !text.trim().is_empty() {
            return Ok(vec![("text".to_string(), text.clone())]);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing content: pass --text, files, or pipe stdin".to_string());
    }
    Ok(vec![("stdin".to_string(), trimmed.to_string())])
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}

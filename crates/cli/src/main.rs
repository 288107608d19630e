mod echo;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use siteconf_core::siteconfig::loader::DEFAULT_CONCURRENCY;
use siteconf_core::{ConfigLoader, ConfigParser, LoadReport, LoaderConfig, SiteConfig, TextReplacer};
use tracing_subscriber::EnvFilter;

use crate::echo::{format_size, print_banner, print_info, print_step, print_success, print_timing, print_warning};
use crate::summary::format_summary;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for parsed configs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Summary,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "summary" | "text" => Ok(Self::Summary),
            _ => Err(format!("Invalid format: {}. Valid options: json, summary", s)),
        }
    }
}

/// Parse and inspect FTR site extraction configs
#[derive(Parser, Debug)]
#[command(name = "siteconf")]
#[command(author = "Siteconf Contributors")]
#[command(version = VERSION)]
#[command(about = "Parse and inspect FTR site extraction configs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a single config file
    Parse {
        /// Config file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (json, summary)
        #[arg(short, long, default_value = "json", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Load every config in a directory
    Load {
        /// Config directory (default: ~/.config/siteconf/sites)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Maximum number of files read at once
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY, value_name = "NUM")]
        concurrency: usize,

        /// Only load files with this extension
        #[arg(long, value_name = "EXT")]
        extension: Option<String>,

        /// Replace invalid UTF-8 instead of skipping the file
        #[arg(long)]
        lossy: bool,

        /// Output format (json, summary)
        #[arg(short, long, default_value = "summary", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Find the config that applies to a URL
    Lookup {
        /// Page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Config directory (default: ~/.config/siteconf/sites)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Output format (json, summary)
        #[arg(short, long, default_value = "summary", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Apply a config's string replacements to an HTML file
    Replace {
        /// HTML file to rewrite
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Config file providing the replacements
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "siteconf_core=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_dir(dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    dir.or_else(ConfigLoader::default_dir)
        .ok_or_else(|| anyhow!("No config directory given and no home directory found"))
}

fn render(name: &str, config: &SiteConfig, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Summary => Ok(format_summary(name, config)),
    }
}

fn render_report(report: &LoadReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for name in report.configs.names() {
                if let Some(config) = report.configs.get(name) {
                    map.insert(name.to_string(), config.to_json());
                }
            }
            let json = serde_json::to_string_pretty(&map).context("Failed to serialize configs")?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Summary => {
            let mut out = String::new();
            for name in report.configs.names() {
                if let Some(config) = report.configs.get(name) {
                    out.push_str(&format_summary(name, config));
                }
            }
            Ok(out)
        }
    }
}

async fn load_report(dir: &Path, config: LoaderConfig, verbose: bool) -> anyhow::Result<LoadReport> {
    if verbose {
        print_step(1, 2, &format!("Loading configs from {}", dir.display().bright_white()));
    }

    let started = Instant::now();
    let report = ConfigLoader::with_config(config)
        .load_dir(dir)
        .await
        .with_context(|| format!("Failed to load config directory: {}", dir.display()))?;

    for failure in &report.failures {
        print_warning(&format!("Skipped {}: {}", failure.path.display(), failure.error));
    }

    if verbose {
        print_timing("Load", started.elapsed());
        eprintln!(
            "  {} {}\n",
            "Configs:".dimmed(),
            report.configs.len().to_string().bright_white()
        );
    }

    Ok(report)
}

fn parse_command(file: &Path, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        print_step(1, 2, &format!("Parsing {}", file.display().bright_white()));
        if let Ok(meta) = fs::metadata(file) {
            eprintln!("  {} {}\n", "Size:".dimmed(), format_size(meta.len() as usize).bright_white());
        }
    }

    let config =
        ConfigParser::parse_file(file).with_context(|| format!("Failed to parse config: {}", file.display()))?;

    let name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    if verbose {
        print_step(2, 2, "Writing output");
    }
    print!("{}", render(&name, &config, format)?);
    Ok(())
}

fn replace_command(input: &Path, config: &Path, output: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let site_config =
        ConfigParser::parse_file(config).with_context(|| format!("Failed to parse config: {}", config.display()))?;
    let replacer = TextReplacer::from_config(&site_config);

    if replacer.is_empty() {
        print_warning(&format!("{} declares no string replacements", config.display()));
    }

    let html = fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input.display()))?;
    if verbose {
        print_info(&format!("Applying {} replacements", site_config.string_replacer.len()));
        eprintln!("  {} {}\n", "Size:".dimmed(), format_size(html.len()).bright_white());
    }

    let rewritten = replacer.apply(&html);

    match output {
        Some(path) => {
            fs::write(path, rewritten).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", rewritten),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    match cli.command {
        Command::Parse { file, format } => parse_command(&file, format, cli.verbose)?,
        Command::Load { dir, concurrency, extension, lossy, format } => {
            let dir = resolve_dir(dir)?;
            let mut builder = LoaderConfig::builder().concurrency(concurrency).lossy(lossy);
            if let Some(ext) = extension {
                builder = builder.extension(ext);
            }

            let report = load_report(&dir, builder.build(), cli.verbose).await?;
            if cli.verbose {
                print_step(2, 2, "Writing output");
            }
            print!("{}", render_report(&report, format)?);
        }
        Command::Lookup { url, dir, format } => {
            let dir = resolve_dir(dir)?;
            let report = load_report(&dir, LoaderConfig::default(), cli.verbose).await?;

            let (name, config) = report
                .configs
                .for_url(&url)
                .context("Failed to look up URL")?
                .ok_or_else(|| anyhow!("No site config matches {}", url))?;

            if cli.verbose {
                print_step(2, 2, &format!("Matched {}", name.bright_white()));
            }
            print!("{}", render(name, config, format)?);
        }
        Command::Replace { input, config, output } => replace_command(&input, &config, output.as_deref(), cli.verbose)?,
    }

    Ok(())
}

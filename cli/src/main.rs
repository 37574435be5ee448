//! bionify CLI - bionic reading document transformer

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use bionify::{
    detect_format_from_bytes, Bionify, DocumentFormat, OutputFormat, ReadingProfile, Segmenter,
    Strategy,
};

#[derive(Parser)]
#[command(name = "bionify")]
#[command(version)]
#[command(about = "Apply bionic reading emphasis to text, PDF, and DOCX files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a document
    Process {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (derived from the input name if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Input format (sniffed from extension and bytes if not specified)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Emphasis intensity percentage (20-80)
        #[arg(short, long, default_value = "40")]
        intensity: u8,

        /// Reading profile
        #[arg(long, value_enum, default_value = "standard")]
        profile: ProfileArg,

        /// Processing strategy
        #[arg(long, value_enum, default_value = "balanced")]
        strategy: StrategyArg,

        /// Output format for text input
        #[arg(long, value_enum, default_value = "html")]
        to: OutputArg,

        /// Marker character for plain-text output
        #[arg(long, value_name = "CHAR")]
        marker: Option<char>,

        /// Leave acronyms and identifiers unemphasized
        #[arg(long)]
        skip_technical: bool,

        /// Touch body text only; never synthesize styling
        #[arg(long)]
        preserve_formatting: bool,

        /// Print the processing report as JSON
        #[arg(long)]
        report: bool,
    },

    /// Show what the engine sees in a file
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Txt,
    Pdf,
    Docx,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => DocumentFormat::Text,
            FormatArg::Pdf => DocumentFormat::Pdf,
            FormatArg::Docx => DocumentFormat::Docx,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    Standard,
    SpeedReading,
    Accessibility,
    Technical,
    Preservation,
}

impl From<ProfileArg> for ReadingProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Standard => ReadingProfile::Standard,
            ProfileArg::SpeedReading => ReadingProfile::SpeedReading,
            ProfileArg::Accessibility => ReadingProfile::Accessibility,
            ProfileArg::Technical => ReadingProfile::Technical,
            ProfileArg::Preservation => ReadingProfile::Preservation,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Balanced,
    Conservative,
    Aggressive,
    Adaptive,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Balanced => Strategy::Balanced,
            StrategyArg::Conservative => Strategy::Conservative,
            StrategyArg::Aggressive => Strategy::Aggressive,
            StrategyArg::Adaptive => Strategy::Adaptive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Html,
    Markdown,
    PlainText,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Html => OutputFormat::Html,
            OutputArg::Markdown => OutputFormat::Markdown,
            OutputArg::PlainText => OutputFormat::PlainText,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input,
            output,
            format,
            intensity,
            profile,
            strategy,
            to,
            marker,
            skip_technical,
            preserve_formatting,
            report,
        } => cmd_process(
            &input,
            output.as_deref(),
            format,
            intensity,
            profile,
            strategy,
            to,
            marker,
            skip_technical,
            preserve_formatting,
            report,
        ),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_process(
    input: &Path,
    output: Option<&Path>,
    format: Option<FormatArg>,
    intensity: u8,
    profile: ProfileArg,
    strategy: StrategyArg,
    to: OutputArg,
    marker: Option<char>,
    skip_technical: bool,
    preserve_formatting: bool,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let doc_format = resolve_format(input, &data, format)?;

    let mut engine = Bionify::new()
        .with_intensity(intensity)
        .with_profile(profile.into())
        .with_strategy(strategy.into())
        .with_output_format(to.into())
        .with_skip_technical(skip_technical)
        .with_preserve_formatting(preserve_formatting);
    if let Some(marker) = marker {
        engine = engine.with_plain_marker(marker);
    }

    let result = engine.process_bytes(&data, doc_format);

    let output_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_path(input, doc_format, to));
    fs::write(&output_path, &result.output)?;

    println!(
        "{} {} ({})",
        "Saved to".green(),
        output_path.display(),
        result.mime_type
    );
    println!(
        "  {} emphasized, {} skipped",
        result.report.words_emphasized.to_string().bold(),
        result.report.words_skipped
    );
    if result.report.fallback_used {
        println!("  {}", "Some content was passed through unmodified".yellow());
    }

    if report {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Size".bold(), data.len());

    match detect_format_from_bytes(&data) {
        Ok(format) => {
            println!("{}: {}", "Format".bold(), format);
            if format == DocumentFormat::Text {
                let text = String::from_utf8_lossy(&data);
                let words = Segmenter::new(&text).filter(|t| t.is_word()).count();
                println!("{}: {}", "Words".bold(), words);
                println!("{}: {}", "Characters".bold(), text.chars().count());
            }
        }
        Err(e) => println!("{}: {}", "Format".bold(), e.to_string().yellow()),
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "bionify".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Bionic reading document transformer");
    println!();
    println!("License: MIT");
}

/// CLI-declared format wins; otherwise the extension, then the bytes.
fn resolve_format(
    input: &Path,
    data: &[u8],
    cli_format: Option<FormatArg>,
) -> Result<DocumentFormat, Box<dyn std::error::Error>> {
    if let Some(format) = cli_format {
        return Ok(format.into());
    }
    if let Some(ext) = input.extension().and_then(|e| e.to_str()) {
        if let Ok(format) = DocumentFormat::from_tag(ext) {
            return Ok(format);
        }
    }
    Ok(detect_format_from_bytes(data)?)
}

fn default_output_path(input: &Path, format: DocumentFormat, to: OutputArg) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = match format {
        DocumentFormat::Pdf => "pdf",
        DocumentFormat::Docx => "docx",
        DocumentFormat::Text => match to {
            OutputArg::Html => "html",
            OutputArg::Markdown => "md",
            OutputArg::PlainText => "txt",
        },
    };
    input.with_file_name(format!("{stem}_bionic.{ext}"))
}

//! pdfimg CLI - PDF image extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_imgext::render::{self, JsonFormat};
use pdf_imgext::{DecodePolicy, ExtractOptions, Extractor, LopdfBackend, PageSelection};

#[derive(Parser)]
#[command(name = "pdfimg")]
#[command(version)]
#[command(about = "Extract embedded images from PDF files in paint order", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write each unique image to a file
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (defaults to <FILE stem>_images)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Print the records as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Include walk statistics next to the records
        #[arg(long)]
        stats: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show document and image statistics
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ExtractArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Which image bytes to emit
    #[arg(long, value_enum, env = "PDFIMG_DECODE", default_value = "raw")]
    decode: DecodeMode,

    /// Format label for images whose filters imply none
    #[arg(long, env = "PDFIMG_DEFAULT_FORMAT", default_value = "jpg")]
    default_format: String,
}

impl ExtractArgs {
    fn extractor(&self) -> Result<Extractor, Box<dyn std::error::Error>> {
        let pages = match self.pages.as_deref() {
            Some(p) => PageSelection::parse(p)?,
            None => PageSelection::All,
        };

        Ok(Extractor::new()
            .with_decode_policy(self.decode.into())
            .with_default_format(self.default_format.clone())
            .with_pages(pages))
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DecodeMode {
    /// Stream bytes as stored in the file
    Raw,
    /// Container filters removed (Flate, LZW, ...), image codecs kept
    Unfiltered,
}

impl From<DecodeMode> for DecodePolicy {
    fn from(mode: DecodeMode) -> Self {
        match mode {
            DecodeMode::Raw => DecodePolicy::Raw,
            DecodeMode::Unfiltered => DecodePolicy::Unfiltered,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            extract,
        } => cmd_extract(&input, output.as_deref(), &extract),
        Commands::Json {
            input,
            output,
            compact,
            stats,
            extract,
        } => cmd_json(&input, output.as_deref(), compact, stats, &extract),
        Commands::Info { input, extract } => cmd_info(&input, &extract),
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

fn spinner(message: &'static str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(Path::to_path_buf).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_images", stem))
    });

    let pb = spinner("Extracting images...")?;
    let report = args.extractor()?.extract_report(input)?;
    pb.finish_and_clear();

    log::debug!(
        "writing {} images to {}",
        report.records.len(),
        output_dir.display()
    );
    let written = render::write_images(&report.records, &output_dir)?;
    for (path, record) in written.iter().zip(&report.records) {
        println!(
            "{} {} ({}, {} bytes)",
            "Extracted".green(),
            path.display(),
            record.mime_type(),
            record.payload_len()
        );
    }

    println!(
        "\n{} {} images extracted to {}",
        "Done!".green().bold(),
        written.len(),
        output_dir.display()
    );
    if report.stats.duplicates_skipped > 0 {
        println!(
            "{} {} duplicate images skipped",
            "Note:".yellow(),
            report.stats.duplicates_skipped
        );
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    stats: bool,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let report = args.extractor()?.extract_report(input)?;
    let json = if stats {
        render::report_to_json(&report, format)?
    } else {
        render::to_json(&report.records, format)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, args: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let backend = LopdfBackend::load_file(input)?;
    let options: ExtractOptions = args.extractor()?.options().clone();
    let report = pdf_imgext::extract::extract_from_backend(&backend, &options);
    let stats = &report.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), backend.version());
    println!("{}: {}", "Pages".bold(), backend.page_count());

    println!();
    println!("{}", "Image Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Decode policy".bold(), options.decode_policy);
    println!("{}: {}", "Pages walked".bold(), stats.pages_walked);
    println!("{}: {}", "Images painted".bold(), stats.images_seen);
    println!("{}: {}", "Unique images".bold(), stats.images_collected);
    println!("{}: {}", "Duplicates".bold(), stats.duplicates_skipped);
    println!("{}: {}", "Forms/other XObjects".bold(), stats.non_image_xobjects);

    if stats.failure_count() > 0 {
        println!();
        println!("{}", "Skipped".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Unreadable pages".bold(), stats.pages_skipped);
        println!("{}: {}", "Unresolved names".bold(), stats.unresolved_references);
        println!("{}: {}", "Malformed operators".bold(), stats.malformed_operators);
        println!("{}: {}", "Undecodable images".bold(), stats.decode_failures);
    }

    let mut formats: Vec<(&str, usize)> = Vec::new();
    for record in &report.records {
        match formats.iter_mut().find(|(f, _)| *f == record.format) {
            Some((_, count)) => *count += 1,
            None => formats.push((record.format.as_str(), 1)),
        }
    }
    if !formats.is_empty() {
        println!();
        println!("{}", "Formats".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (format, count) in formats {
            println!("{}: {}", format.bold(), count);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfimg".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF image extraction tool");
    println!();
    println!("License: MIT");
}

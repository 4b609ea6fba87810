//! pdfchapters CLI - convert a PDF into chapter-structured JSON

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfchapters::render::write_json;
use pdfchapters::{
    CleanupOptions, CleanupPreset, ConvertOptions, Conversion, JsonFormat, LopdfSource,
    PdfConverter,
};

#[derive(Parser)]
#[command(name = "pdfchapters")]
#[command(version)]
#[command(about = "Convert a PDF into JSON metadata and chapters", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Text cleanup preset
    #[arg(long, value_enum, default_value = "standard")]
    preset: CleanupLevel,

    /// Fraction of pages a line must recur on to count as a header/footer
    #[arg(long, value_name = "F")]
    header_threshold: Option<f64>,

    /// Allowed distance between a printed page number and the page position
    #[arg(long, value_name = "N")]
    page_tolerance: Option<u32>,

    /// Placeholder emitted for each detected image
    #[arg(long, value_name = "S", default_value = "[Image]")]
    image_marker: String,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Fail when a page's text cannot be extracted
    #[arg(long)]
    strict: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Page numbers only
    Minimal,
    /// Headers, footers and page numbers (default)
    Standard,
    /// Standard plus date-only and very short lines
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        let mut cleanup = CleanupOptions::from_preset(self.preset.into());
        if let Some(threshold) = self.header_threshold {
            cleanup = cleanup.with_header_footer_threshold(threshold);
        }
        if let Some(tolerance) = self.page_tolerance {
            cleanup = cleanup.with_page_number_tolerance(tolerance);
        }

        let mut options = ConvertOptions::new()
            .with_cleanup(cleanup)
            .with_image_marker(self.image_marker.clone())
            .with_json_format(if self.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            });
        if self.strict {
            options = options.strict();
        }
        options
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cmd_convert(&cli) {
        Ok(conversion) => {
            if !cli.quiet {
                print_summary(&conversion, &cli.output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Conversion of {} failed: {}", cli.input.display(), e);
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_convert(cli: &Cli) -> pdfchapters::Result<Conversion> {
    let options = cli.convert_options();
    let converter = PdfConverter::new(options)?;
    let pb = progress_bar(cli.quiet);

    pb.set_message("Opening PDF...");
    let source = LopdfSource::open(&cli.input)?;
    pb.inc(1);

    pb.set_message("Extracting pages...");
    let document = converter.build_document(&source)?;
    drop(source);
    pb.inc(1);

    pb.set_message("Assembling chapters...");
    let conversion = converter.assemble(&document);
    pb.inc(1);

    pb.set_message("Writing JSON...");
    write_json(&conversion, &cli.output, converter.options().json_format)?;
    pb.inc(1);

    pb.finish_and_clear();
    Ok(conversion)
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(4);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

fn print_summary(conversion: &Conversion, output: &Path) {
    let chapters = conversion.chapters();
    let pages: usize = chapters.iter().map(|c| c.page_count()).sum();

    println!("{} {}", "Saved to".green(), output.display());
    println!(
        "  {} {} entries, {} pages, {} metadata fields",
        conversion.body.key().cyan(),
        chapters.len(),
        pages,
        conversion.metadata.len()
    );
}

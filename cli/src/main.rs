//! typotag CLI - tag headings, paragraphs and notes in PDF span dumps

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use typotag::render::{self, image_file_name};
use typotag::{
    Analysis, CleanupPreset, Document, FontHistogram, JsonFormat, RenderOptions, SpanFlags,
    StructuralTag, TaggingOptions, Typotag,
};

#[derive(Parser)]
#[command(name = "typotag")]
#[command(version)]
#[command(
    about = "Infer headings, paragraphs and notes from font sizes in PDF span dumps",
    long_about = None
)]
struct Cli {
    /// Input span dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    tagging: TaggingArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct TaggingArgs {
    /// Distinguish styles by size, flags, font and color
    #[arg(long, global = true, env = "TYPOTAG_GRANULAR")]
    granular: bool,

    /// Disable parallel histogram computation
    #[arg(long, global = true)]
    sequential: bool,

    /// Heading level whose blocks gate image collection
    #[arg(long, global = true, env = "TYPOTAG_ANCHOR_LEVEL", default_value = "4")]
    anchor_level: u32,
}

impl TaggingArgs {
    fn options(&self) -> TaggingOptions {
        let mut options = TaggingOptions::new().with_anchor_level(self.anchor_level);
        if self.granular {
            options = options.granular();
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print tagged blocks, one per line
    Tag {
        /// Input span dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Include empty and untagged blocks
        #[arg(long)]
        all: bool,
    },

    /// Show the style histogram and size-to-tag table
    Fonts {
        /// Input span dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Convert tagged blocks to JSON
    Json {
        /// Input span dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Emit only the tagged block strings
        #[arg(long)]
        strings: bool,
    },

    /// Convert tagged blocks to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input span dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Keep source line breaks inside paragraphs
        #[arg(long)]
        line_breaks: bool,
    },

    /// Convert tagged blocks to plain text
    Text {
        /// Input span dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Keep structural tag prefixes
        #[arg(long)]
        tags: bool,

        /// Keep source line breaks inside paragraphs
        #[arg(long)]
        line_breaks: bool,
    },

    /// Write collected images named after their anchor headings
    Images {
        /// Input span dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (ligatures, control characters, whitespace)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.tagging.options();

    let result = match cli.command {
        Some(Commands::Tag { input, all }) => cmd_tag(&input, &options, all),
        Some(Commands::Fonts { input }) => cmd_fonts(&input, &options),
        Some(Commands::Json {
            input,
            output,
            compact,
            strings,
        }) => cmd_json(&input, output.as_deref(), &options, compact, strings),
        Some(Commands::Markdown {
            input,
            output,
            cleanup,
            max_heading,
            line_breaks,
        }) => {
            let mut render_options = RenderOptions::new()
                .with_line_marker(options.line_marker)
                .with_max_heading(max_heading)
                .with_line_breaks(line_breaks);
            if let Some(level) = cleanup {
                render_options = render_options.with_cleanup_preset(level.into());
            }
            cmd_markdown(&input, output.as_deref(), &options, &render_options)
        }
        Some(Commands::Text {
            input,
            output,
            cleanup,
            tags,
            line_breaks,
        }) => {
            let mut render_options = RenderOptions::new()
                .with_line_marker(options.line_marker)
                .with_tags(tags)
                .with_line_breaks(line_breaks);
            if let Some(level) = cleanup {
                render_options = render_options.with_cleanup_preset(level.into());
            }
            cmd_text(&input, output.as_deref(), &options, &render_options)
        }
        Some(Commands::Images { input, output }) => {
            cmd_images(&input, output.as_deref(), &options)
        }
        None => {
            // Default behavior: tag if input is provided
            if let Some(input) = cli.input {
                cmd_tag(&input, &options, false)
            } else {
                println!("{}", "Usage: typotag <FILE>".yellow());
                println!("       typotag --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load and analyze with a three-step progress bar on stderr.
fn analyze_with_progress(input: &Path, options: &TaggingOptions) -> typotag::Result<Analysis> {
    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    pb.set_message("Loading spans...");
    let doc = Document::open(input)?;
    pb.inc(1);

    pb.set_message("Counting font sizes...");
    let histogram = FontHistogram::with_options(&doc, options)?;
    pb.inc(1);

    pb.set_message("Tagging blocks...");
    let table = typotag::SizeTagTable::build(&histogram);
    let result = typotag::tag_blocks(&doc, &table, options)?;
    pb.inc(1);

    pb.finish_and_clear();
    log::info!(
        "{}: {} pages, {} blocks, {} images",
        input.display(),
        doc.page_count(),
        result.blocks.len(),
        result.images.len()
    );

    Ok(Analysis {
        histogram,
        table,
        result,
    })
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn colored_tag(tag: StructuralTag) -> colored::ColoredString {
    let label = tag.to_string();
    match tag {
        StructuralTag::Heading(_) => label.cyan().bold(),
        StructuralTag::Paragraph => label.dimmed(),
        StructuralTag::Subnote(_) => label.yellow(),
    }
}

fn cmd_tag(input: &Path, options: &TaggingOptions, all: bool) -> CliResult {
    let analysis = Typotag::new()
        .with_options(options.clone())
        .analyze_file(input)?;

    for block in &analysis.result.blocks {
        match block.tag {
            Some(tag) => println!("{}{}", colored_tag(tag), block.text),
            None if all => println!("{}", block.text.dimmed()),
            None => {}
        }
    }

    let result = &analysis.result;
    if !result.images.is_empty() {
        println!();
        println!("{}", "Images".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (index, image) in result.images.iter().enumerate() {
            let anchor = result
                .anchor_of(image)
                .map(|block| block.rendered())
                .unwrap_or_default();
            println!("{:>4}  {:>8} bytes  {}", index + 1, image.size(), anchor);
        }
    }

    Ok(())
}

fn cmd_fonts(input: &Path, options: &TaggingOptions) -> CliResult {
    let analysis = analyze_with_progress(input, options)?;
    let histogram = &analysis.histogram;

    println!("{}", "Style Histogram".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for entry in histogram.counts() {
        let Some(style) = histogram.style(&entry.key) else {
            continue;
        };
        let flags = style
            .flags
            .map(|f| format!(" ({})", SpanFlags(f).describe()))
            .unwrap_or_default();
        println!(
            "{:>8}  {:<24} {}{}",
            entry.count,
            entry.key.to_string().bold(),
            style.font.dimmed(),
            flags
        );
    }

    println!();
    println!("{}", "Size Tags".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Body size".bold(), analysis.table.baseline());
    for (size, tag) in analysis.table.iter() {
        println!("{:>8}  {}", size, colored_tag(tag));
    }

    println!();
    println!("{}: {}", "Spans".bold(), histogram.total_spans());
    println!("{}: {}", "Blocks".bold(), analysis.result.blocks.len());
    println!("{}: {}", "Images".bold(), analysis.result.images.len());

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    options: &TaggingOptions,
    compact: bool,
    strings: bool,
) -> CliResult {
    let analysis = analyze_with_progress(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if strings {
        render::to_json_strings(&analysis.result, format)?
    } else {
        render::to_json(&analysis.result, format)?
    };

    write_or_print(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    options: &TaggingOptions,
    render_options: &RenderOptions,
) -> CliResult {
    let analysis = analyze_with_progress(input, options)?;
    let markdown = render::to_markdown(&analysis.result, render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    options: &TaggingOptions,
    render_options: &RenderOptions,
) -> CliResult {
    let analysis = analyze_with_progress(input, options)?;
    let text = render::to_text(&analysis.result, render_options)?;
    write_or_print(output, &text)
}

fn cmd_images(input: &Path, output: Option<&Path>, options: &TaggingOptions) -> CliResult {
    let analysis = analyze_with_progress(input, options)?;
    let result = &analysis.result;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let mut count = 0;
    for (index, image) in result.images.iter().enumerate() {
        let Some(filename) = image_file_name(result, index, options.line_marker) else {
            continue;
        };
        fs::write(output_dir.join(&filename), &image.data)?;

        let anchor = result
            .anchor_of(image)
            .map(|block| block.plain_text(options.line_marker))
            .unwrap_or_default();
        println!("{} {} {}", "Extracted".green(), filename, anchor.dimmed());
        count += 1;
    }

    println!("\n{} {} images extracted", "Done!".green().bold(), count);

    Ok(())
}

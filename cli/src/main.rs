//! unhtml CLI - HTML email body to terminal text

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unhtml::detect::detect_content_from_path;
use unhtml::render::{DEFAULT_PREVIEW_LENGTH, DEFAULT_TRUNCATE_LENGTH};
use unhtml::{
    convert_batch, convert_for_preview, convert_with_stats, detect_content, render_body,
    to_json, truncate, ConversionOptions, EntityPolicy, JsonFormat, OutputStyle,
};

#[derive(Parser)]
#[command(name = "unhtml")]
#[command(version)]
#[command(about = "Render HTML email bodies as terminal plain text", long_about = None)]
struct Cli {
    /// Input HTML file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML body to plain text
    Text {
        /// Input HTML file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Treat plain-text bodies as text instead of HTML
        #[arg(long)]
        detect: bool,

        /// Print the result with statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print a single-line preview
    Preview {
        /// Input HTML file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum preview length in characters
        #[arg(short, long, default_value_t = DEFAULT_PREVIEW_LENGTH)]
        length: usize,
    },

    /// Truncate plain text at a word boundary
    Truncate {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum length in characters, before the ellipsis
        #[arg(short, long, default_value_t = DEFAULT_TRUNCATE_LENGTH)]
        length: usize,
    },

    /// Show body information and conversion statistics
    Info {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert many HTML files in parallel
    Batch {
        /// Input HTML files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by every rendering command.
#[derive(Args, Default)]
struct RenderArgs {
    /// Wrap width in columns (0 disables wrapping)
    #[arg(short, long, env = "UNHTML_WIDTH")]
    width: Option<usize>,

    /// Drop link targets, keeping only the link text
    #[arg(long)]
    no_links: bool,

    /// Separate paragraphs with a single line break
    #[arg(long)]
    no_spacing: bool,

    /// Output style
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// How &nbsp; is rendered
    #[arg(long, value_enum)]
    nbsp: Option<NbspArg>,

    /// JSON options file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// "# " headings, "text [url]" links (default)
    Terminal,
    /// Underlined headings, "text (url)" links
    Legacy,
    /// Markdown with fenced code blocks
    Markdown,
}

impl From<StyleArg> for OutputStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Terminal => OutputStyle::terminal(),
            StyleArg::Legacy => OutputStyle::legacy(),
            StyleArg::Markdown => OutputStyle::markdown(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum NbspArg {
    /// Render as an ordinary space
    Plain,
    /// Keep as U+00A0
    Preserve,
}

impl From<NbspArg> for EntityPolicy {
    fn from(arg: NbspArg) -> Self {
        match arg {
            NbspArg::Plain => EntityPolicy::PlainText,
            NbspArg::Preserve => EntityPolicy::Preserve,
        }
    }
}

impl RenderArgs {
    fn to_options(&self) -> Result<ConversionOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => {
                log::debug!("Loading options from {}", path.display());
                ConversionOptions::from_json_file(path)?
            }
            None => ConversionOptions::default(),
        };

        if let Some(width) = self.width {
            options = options.with_line_width(width);
        }
        if self.no_links {
            options = options.with_links(false);
        }
        if self.no_spacing {
            options = options.with_spacing(false);
        }
        if let Some(style) = self.style {
            options = options.with_style(style.into());
        }
        if let Some(nbsp) = self.nbsp {
            options = options.with_entity_policy(nbsp.into());
        }

        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text {
            input,
            output,
            detect,
            json,
            render,
        }) => cmd_text(&input, output.as_deref(), detect, json, &render),
        Some(Commands::Preview { input, length }) => cmd_preview(&input, length),
        Some(Commands::Truncate { input, length }) => cmd_truncate(&input, length),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Batch {
            inputs,
            output,
            render,
        }) => cmd_batch(&inputs, output.as_deref(), &render),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_text(
                    &input,
                    cli.output.as_deref(),
                    false,
                    false,
                    &RenderArgs::default(),
                )
            } else {
                println!("{}", "Usage: unhtml <FILE> [OUTPUT]".yellow());
                println!("       unhtml --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read a body from a file, or from stdin for "-".
fn read_input(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if input.as_os_str() == "-" {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    detect: bool,
    json: bool,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = read_input(input)?;
    let options = render.to_options()?;

    let result = if detect {
        render_body(&body, &options)
    } else {
        convert_with_stats(&body, &options)
    };

    if json {
        write_output(output, &to_json(&result, JsonFormat::Pretty)?)
    } else {
        write_output(output, &result.text)
    }
}

fn cmd_preview(input: &Path, length: usize) -> Result<(), Box<dyn std::error::Error>> {
    let body = read_input(input)?;
    println!("{}", convert_for_preview(&body, length));
    Ok(())
}

fn cmd_truncate(input: &Path, length: usize) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    println!("{}", truncate(text.trim_end(), length));
    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (body, kind) = if input.as_os_str() == "-" {
        let body = read_input(input)?;
        let kind = detect_content(&body);
        (body, kind)
    } else {
        detect_content_from_path(input)?
    };
    let result = render_body(&body, &ConversionOptions::default());
    let stats = &result.stats;

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "kind": kind.as_str(),
            "bytes": body.len(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Body Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Kind".bold(), kind);
    println!("{}: {}", "Size".bold(), body.len());

    println!();
    println!("{}", "Conversion Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Quotes".bold(), stats.blockquote_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Removed blocks".bold(), stats.removed_block_count);

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = render.to_options()?;
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reading bodies...");
    let mut bodies = Vec::with_capacity(inputs.len());
    for input in inputs {
        bodies.push(fs::read_to_string(input)?);
        pb.inc(1);
    }

    pb.set_message("Converting...");
    let texts = convert_batch(&bodies, &options);

    pb.set_message("Writing text...");
    let mut written = Vec::with_capacity(inputs.len());
    for (input, text) in inputs.iter().zip(&texts) {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let filename = format!("{}.txt", stem);
        fs::write(output_dir.join(&filename), text)?;
        written.push(filename);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, filename) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unhtml".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML email body to terminal text converter");
    println!();
    println!("License: MIT");
}

//! paperseg CLI - academic paper segmentation for reading experiments

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use paperseg::{
    BoundaryCalculator, BoundaryStrategy, Catalog, ConvertOptions, ConverterRegistry,
    OutputLayout, ParseOptions, RenderOptions, SectionKeywords,
};

#[derive(Parser)]
#[command(name = "paperseg")]
#[command(version)]
#[command(
    about = "Segment academic papers into sections and render reading-experiment pages",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that segment a paper.
#[derive(clap::Args)]
struct SegmentArgs {
    /// Section keyword file (one keyword per line, `#` comments)
    #[arg(long, value_name = "FILE", env = "PAPERSEG_KEYWORDS")]
    keywords: Option<PathBuf>,

    /// Skip unreadable PDF pages instead of failing
    #[arg(long)]
    lenient: bool,
}

impl SegmentArgs {
    fn parse_options(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let mut options = ParseOptions::new();
        if self.lenient {
            options = options.lenient();
        }
        if let Some(path) = &self.keywords {
            options = options.with_keywords(SectionKeywords::from_file(path)?);
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a paper (.pdf, .txt, .html, .xhtml) into the experiment layout
    Convert {
        /// Input paper
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Paper id (derived from the file name if not given)
        #[arg(long)]
        id: Option<String>,

        /// Experiment root directory
        #[arg(short, long, value_name = "DIR", env = "PAPERSEG_OUTPUT", default_value = ".")]
        output: PathBuf,

        /// Boundary strategy (chosen from the source kind if not given)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Append a review panel to the page
        #[arg(long)]
        review: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Convert several papers; failures are reported and skipped
    Batch {
        /// Input papers
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Experiment root directory
        #[arg(short, long, value_name = "DIR", env = "PAPERSEG_OUTPUT", default_value = ".")]
        output: PathBuf,

        /// Boundary strategy (chosen from the source kind if not given)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Print the segmented content as JSON
    Segment {
        /// Input paper
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Print the estimated section boundaries
    Boundaries {
        /// Input paper
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Boundary strategy (chosen from the source kind if not given)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// List converted papers or write papers-data.js
    Catalog {
        /// Experiment root directory
        #[arg(short, long, value_name = "DIR", env = "PAPERSEG_OUTPUT", default_value = ".")]
        output: PathBuf,

        /// Write papers-data.js instead of listing
        #[arg(long)]
        write: bool,
    },

    /// Fetch a paper from the ACM Digital Library by DOI or URL
    #[cfg(feature = "fetch")]
    Fetch {
        /// DOI (10.1145/...) or landing page URL
        #[arg(value_name = "DOI_OR_URL")]
        input: String,

        /// Paper id (derived from the DOI if not given)
        #[arg(long)]
        id: Option<String>,

        /// Experiment root directory
        #[arg(short, long, value_name = "DIR", env = "PAPERSEG_OUTPUT", default_value = ".")]
        output: PathBuf,

        /// Append a review panel to the page
        #[arg(long)]
        review: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Weighted by text length and figures
    Length,
    /// Fixed 600-unit step per section
    Fixed,
}

impl From<StrategyArg> for BoundaryStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Length => BoundaryStrategy::length_weighted(),
            StrategyArg::Fixed => BoundaryStrategy::fixed(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            id,
            output,
            strategy,
            review,
            segment,
        } => cmd_convert(&input, id, &output, strategy, review, &segment),
        Commands::Batch {
            inputs,
            output,
            strategy,
            segment,
        } => cmd_batch(&inputs, &output, strategy, &segment),
        Commands::Segment {
            input,
            compact,
            segment,
        } => cmd_segment(&input, compact, &segment),
        Commands::Boundaries {
            input,
            strategy,
            segment,
        } => cmd_boundaries(&input, strategy, &segment),
        Commands::Catalog { output, write } => cmd_catalog(&output, write),
        #[cfg(feature = "fetch")]
        Commands::Fetch {
            input,
            id,
            output,
            review,
            segment,
        } => cmd_fetch(&input, id, &output, review, &segment),
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

fn convert_options(
    id: Option<String>,
    strategy: Option<StrategyArg>,
    review: bool,
    segment: &SegmentArgs,
) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::new()
        .with_parse_options(segment.parse_options()?)
        .with_render_options(RenderOptions::new().with_review_panel(review));
    if let Some(id) = id {
        options = options.with_paper_id(id);
    }
    if let Some(strategy) = strategy {
        options = options.with_strategy(strategy.into());
    }
    Ok(options)
}

fn print_diagnostics(diagnostics: &[String]) {
    for message in diagnostics {
        println!("  {} {}", "warning:".yellow(), message);
    }
}

fn cmd_convert(
    input: &Path,
    id: Option<String>,
    output: &Path,
    strategy: Option<StrategyArg>,
    review: bool,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = convert_options(id, strategy, review, segment)?;
    let layout = OutputLayout::new(output);

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Segmenting...");
    let registry = ConverterRegistry::with_defaults();
    let converter = registry.for_path(input)?;
    pb.inc(1);

    pb.set_message("Rendering...");
    let result = converter.convert(input, &options)?;
    pb.inc(1);

    pb.set_message("Writing...");
    let written = layout.write(&result, &options.render)?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    print_diagnostics(result.diagnostics());

    println!("\n{} {}", "Paper:".green().bold(), result.paper_id);
    println!(
        "  {} {} sections, {} boundary",
        "├─".dimmed(),
        result.metadata.sections.len(),
        result.strategy
    );
    println!("  {} {}", "├─".dimmed(), written.html.display());
    println!("  {} {}", "├─".dimmed(), written.json.display());
    println!("  {} {}", "└─".dimmed(), written.images.display());

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: &Path,
    strategy: Option<StrategyArg>,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = convert_options(None, strategy, false, segment)?;
    let layout = OutputLayout::new(output);
    let registry = ConverterRegistry::with_defaults();

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failures = Vec::new();
    for input in inputs {
        pb.set_message(input.display().to_string());
        log::debug!("Batch item: {}", input.display());
        let outcome = registry
            .convert(input, &options)
            .and_then(|result| layout.write(&result, &options.render).map(|_| result));
        match outcome {
            Ok(result) => {
                for message in result.diagnostics() {
                    pb.println(format!(
                        "  {} {}: {}",
                        "warning:".yellow(),
                        result.paper_id,
                        message
                    ));
                }
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
                failures.push(input.clone());
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    let converted = inputs.len() - failures.len();
    println!(
        "\n{} {} converted, {} failed",
        "Batch:".green().bold(),
        converted,
        failures.len()
    );

    if converted == 0 {
        return Err("no paper could be converted".into());
    }
    Ok(())
}

fn cmd_segment(
    input: &Path,
    compact: bool,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let paper = ConverterRegistry::with_defaults().segment(input, &segment.parse_options()?)?;

    let json = if compact {
        serde_json::to_string(&paper)?
    } else {
        serde_json::to_string_pretty(&paper)?
    };
    println!("{}", json);

    Ok(())
}

fn cmd_boundaries(
    input: &Path,
    strategy: Option<StrategyArg>,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let paper = ConverterRegistry::with_defaults().segment(input, &segment.parse_options()?)?;
    let calculator = match strategy {
        Some(strategy) => BoundaryCalculator::new(strategy.into()),
        None => BoundaryCalculator::for_source(paper.source),
    };
    let boundaries = calculator.compute(&paper);

    println!(
        "{} ({} boundary)",
        "Section Boundaries".cyan().bold(),
        calculator.strategy()
    );
    println!("{}", "─".repeat(40).dimmed());
    for entry in boundaries.iter() {
        println!(
            "{:>8} {:>8}  {}",
            entry.boundary.start,
            entry.boundary.end,
            entry.title.bold()
        );
    }
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Total".bold(), boundaries.total_extent());

    print_diagnostics(&paper.diagnostics);
    Ok(())
}

fn cmd_catalog(output: &Path, write: bool) -> Result<(), Box<dyn std::error::Error>> {
    let layout = OutputLayout::new(output);
    let catalog = Catalog::scan(&layout)?;

    for warning in &catalog.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }

    if write {
        if catalog.is_empty() {
            return Err("no valid papers found".into());
        }
        let path = catalog.write_papers_data(&layout)?;
        println!(
            "{} {} ({} papers)",
            "Saved to".green(),
            path.display(),
            catalog.len()
        );
        return Ok(());
    }

    println!("{}", "Available Papers".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for entry in &catalog.entries {
        println!(
            "{}  {} {}",
            entry.id.bold(),
            entry.name,
            format!("({} sections)", entry.section_count).dimmed()
        );
    }
    println!("\n{}: {}", "Total".bold(), catalog.len());

    Ok(())
}

#[cfg(feature = "fetch")]
fn cmd_fetch(
    input: &str,
    id: Option<String>,
    output: &Path,
    review: bool,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = convert_options(id, None, review, segment)?;
    let layout = OutputLayout::new(output);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Fetching {}...", input));
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let result = paperseg::AcmFetcher::new()?.fetch(input, &layout, &options)?;
    spinner.finish_with_message("Done!");

    print_diagnostics(result.diagnostics());

    println!("\n{} {}", "Paper:".green().bold(), result.paper_id);
    if let Some(title) = &result.metadata.title {
        println!("  {} {}", "├─".dimmed(), title);
    }
    println!(
        "  {} {} authors, {} sections, {} images",
        "├─".dimmed(),
        result.metadata.authors.len(),
        result.metadata.sections.len(),
        result.stats.image_count
    );
    println!("  {} {}", "└─".dimmed(), layout.html_path(&result.paper_id).display());
    println!("\n{} open the page in a browser to review", "Next:".cyan());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "paperseg".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Academic paper segmentation for reading experiments");
    println!();
    println!("License: MIT");
}

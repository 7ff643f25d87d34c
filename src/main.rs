use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use ocrfix::cli::output::{self, OutputFormat};
use ocrfix::config::Engine;
use ocrfix::corrector::symdel::DeleteIndex;
use ocrfix::corrector::tokenizer::{Alphabet, Tokenizer};
use ocrfix::corrector::Correct;
use ocrfix::pipeline::BatchPipeline;
use ocrfix::{Config, Correction, Corrector, DictionaryIndex};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "ocrfix")]
#[command(version, about = "Edit-distance word correction for noisy OCR text", long_about = None)]
struct Cli {
    /// Files to correct (plain UTF-8 text or OCR webRes JSON)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Dictionary word list, one word per line
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Write the corrected sequence here (single input only; default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for per-file outputs when correcting several files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Candidate length-window radius in characters
    #[arg(short, long)]
    radius: Option<usize>,

    /// Scan the entire dictionary instead of a length window
    #[arg(long, conflicts_with = "radius")]
    exhaustive: bool,

    /// Correction backend
    #[arg(long, value_enum)]
    engine: Option<Engine>,

    /// Distance cap for the delete engine
    #[arg(long)]
    max_edit_distance: Option<usize>,

    /// Letter class for tokenization: cyrillic, cyrillic-latin, or a regex pattern
    #[arg(short, long)]
    alphabet: Option<String>,

    /// Worker threads (0 = one per logical CPU)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Suppress the progress bar and summary
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Find the closest dictionary word for a single input (full scan)
    Lookup {
        /// Word to look up
        word: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "ocrfix", &mut io::stdout());
        return Ok(());
    }

    // Load configuration and apply CLI overrides
    let mut config = Config::load()?;
    if let Some(dictionary) = cli.dictionary.clone() {
        config.dictionary = Some(dictionary);
    }
    if let Some(radius) = cli.radius {
        config.window_radius = radius;
    }
    if cli.exhaustive {
        config.exhaustive = true;
    }
    if let Some(engine) = cli.engine {
        config.engine = engine;
    }
    if let Some(max) = cli.max_edit_distance {
        config.max_edit_distance = max;
    }
    if let Some(alphabet) = cli.alphabet.clone() {
        config.alphabet = alphabet;
    }
    if let Some(jobs) = cli.jobs {
        config.jobs = jobs;
    }

    // The dictionary is a precondition for any correction at all
    let dict_path = config
        .dictionary
        .clone()
        .context("No dictionary specified. Pass --dictionary or set it in .ocrfix.toml.")?;
    let index = DictionaryIndex::load(&dict_path)?;

    if let Some(Commands::Lookup { word }) = cli.command {
        return lookup(&word, index, !cli.no_color);
    }

    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }
    if cli.files.len() > 1 && cli.output_dir.is_none() {
        anyhow::bail!("Multiple input files require --output-dir.");
    }

    let alphabet: Alphabet = config.alphabet.parse().unwrap_or_default();
    let tokenizer = Tokenizer::new(&alphabet)?;

    let corrector: Box<dyn Correct> = match config.engine {
        Engine::Window => {
            Box::new(Corrector::new(index).with_window(config.effective_window()))
        }
        Engine::Delete => Box::new(DeleteIndex::from_index(&index, config.max_edit_distance)),
    };

    let pipeline = BatchPipeline::new()
        .threads(config.jobs)
        .show_progress(!cli.quiet);

    let started = Instant::now();
    let mut total_words = 0;
    let mut changed_words = 0;
    let mut failures = 0;

    for file_path in &cli.files {
        // One bad file must not abort the whole batch
        match process_file(file_path, &tokenizer, corrector.as_ref(), &pipeline, &cli) {
            Ok(results) => {
                total_words += results.len();
                changed_words += results.iter().filter(|r| r.changed()).count();
            }
            Err(e) => {
                eprintln!("Error: {}: {:#}", file_path.display(), e);
                failures += 1;
            }
        }
    }

    if !cli.quiet {
        output::print_summary(total_words, changed_words, started.elapsed(), !cli.no_color);
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn lookup(word: &str, index: DictionaryIndex, colored: bool) -> Result<()> {
    if index.is_empty() {
        eprintln!("Dictionary is empty; word returned unchanged");
    }

    // Single-word lookup trades speed for exhaustiveness: no length pruning
    let corrector = Corrector::new(index).with_window(None);
    let result = corrector.correct(word);
    output::print_lookup(&result, colored);
    Ok(())
}

fn process_file(
    path: &Path,
    tokenizer: &Tokenizer,
    corrector: &dyn Correct,
    pipeline: &BatchPipeline,
    cli: &Cli,
) -> Result<Vec<Correction>> {
    let text = read_input_text(path)?;
    let tokens = tokenizer.tokenize(&text);
    let results = pipeline.run(corrector, &tokens)?;

    let rendered = output::render(&results, &cli.format)
        .context("Failed to serialize correction results")?;

    if let Some(dir) = &cli.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        let out_path = dir.join(output_name(path));
        fs::write(&out_path, rendered)
            .with_context(|| format!("Failed to write: {}", out_path.display()))?;
    } else if let Some(out_path) = &cli.output {
        fs::write(out_path, rendered)
            .with_context(|| format!("Failed to write: {}", out_path.display()))?;
    } else {
        println!("{}", rendered);
    }

    Ok(results)
}

/// Pull the recognized text out of an input file. OCR webRes payloads are
/// JSON with the text at `data.text`; anything else is treated as raw text.
fn read_input_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&content) {
        if let Some(text) = value.pointer("/data/text").and_then(|t| t.as_str()) {
            return Ok(text.to_string());
        }
    }

    Ok(content)
}

/// `school/work_17.txt.webRes` writes to `work_17_corrected.txt`.
fn output_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let stem = stem.strip_suffix(".txt").unwrap_or(stem);
    format!("{}_corrected.txt", stem)
}

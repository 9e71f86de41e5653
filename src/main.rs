use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xlsxqa::{ExtractorBuilder, FaqDocument, OutputFormat, QaPair};

#[derive(Parser)]
#[command(author, version, about = "Extract Q&A fine-tuning pairs from an Excel knowledge base", long_about = None)]
struct Cli {
    /// Excel workbook path
    #[arg(required = true)]
    input: PathBuf,

    /// Directory for the generated files
    #[arg(long, short = 'o', default_value = "data")]
    out_dir: PathBuf,

    /// External FAQ JSON to merge (skipped if the file does not exist)
    #[arg(long, short = 'f')]
    faq: Option<PathBuf>,

    /// Sheet label recorded on merged FAQ pairs
    #[arg(long, value_name = "LABEL")]
    faq_source: Option<String>,

    /// Sheet to exclude (repeatable, replaces the default skip list)
    #[arg(long = "skip-sheet", value_name = "NAME")]
    skip_sheets: Vec<String>,

    /// System prompt for the chat-format output
    #[arg(long)]
    system_prompt: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut builder = ExtractorBuilder::new();
    if !cli.skip_sheets.is_empty() {
        builder = builder.with_skip_sheets(cli.skip_sheets.iter().cloned());
    }
    if let Some(prompt) = &cli.system_prompt {
        builder = builder.with_system_prompt(prompt.clone());
    }
    if let Some(source) = &cli.faq_source {
        builder = builder.with_faq_source(source.clone());
    }
    let extractor = builder.build()?;

    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open workbook {}", cli.input.display()))?;
    let mut report = extractor
        .extract(input)
        .with_context(|| format!("failed to extract Q&A pairs from {}", cli.input.display()))?;

    for sheet in &report.sheets {
        if !sheet.skipped {
            println!("  ✓ {:25} → {:3} Q&A pairs", sheet.sheet, sheet.pairs);
        }
    }
    println!("\nSkipped sheets: {:?}", report.skipped_sheets());
    println!("Total Q&A pairs extracted: {}", report.pairs.len());

    if let Some(faq_path) = &cli.faq {
        if faq_path.exists() {
            let file = File::open(faq_path)
                .with_context(|| format!("failed to open FAQ {}", faq_path.display()))?;
            let faq = FaqDocument::from_reader(file)
                .with_context(|| format!("failed to read FAQ {}", faq_path.display()))?;
            let added = extractor.merge_faq(&mut report.pairs, &faq);
            println!("  ✓ {:25} → {:3} Q&A pairs", "JSON FAQ", added);
            println!("Total Q&A pairs (with JSON): {}", report.pairs.len());
        } else {
            info!(path = %faq_path.display(), "FAQ document not found, skipping merge");
        }
    }

    // すべて描画し終えてから書き出す
    let mut rendered = Vec::new();
    for format in OutputFormat::all() {
        let content = extractor.render_to_string(format, &report.pairs)?;
        rendered.push((cli.out_dir.join(format.default_file_name()), content));
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    for (path, content) in &rendered {
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved → {}", path.display());
    }

    print_summary(&report.pairs);
    print_samples(&report.pairs);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(pairs: &[QaPair]) {
    let rule = "─".repeat(60);
    println!("\n{}", rule);
    println!("{:<45} {:>10}", "PRODUCT", "Q&A COUNT");
    println!("{}", rule);
    for (product, count) in xlsxqa::product_counts(pairs) {
        println!("  {:<43} {:>10}", product, count);
    }
    println!("{}", rule);
    println!("  {:<43} {:>10}", "TOTAL", pairs.len());
}

fn print_samples(pairs: &[QaPair]) {
    let rule = "═".repeat(60);
    println!("\n{}", rule);
    println!("SAMPLE Q&A PAIRS (first 3):");
    println!("{}", rule);
    for (i, pair) in pairs.iter().take(3).enumerate() {
        println!("\n  [{}] Product: {}", i + 1, pair.product);
        println!("      Q: {}", truncate_chars(&pair.question, 120));
        println!("      A: {}", truncate_chars(&pair.answer, 200));
    }
}

/// 先頭`max`文字までを返す（バイト境界ではなく文字単位）
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

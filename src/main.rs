//! # chatpulse CLI
//!
//! Command-line interface for the chatpulse library. Status lines and logs go
//! to stderr; the report (or the composed prompt) goes to stdout unless
//! `--output` names a file.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatpulse::ChatpulseError;
use chatpulse::analyzer::{Analysis, ChatAnalyzer};
use chatpulse::cli::Args;
use chatpulse::config::{AnalyzerConfig, AppSettings, DEFAULT_SETTINGS_FILE};
use chatpulse::core::DateRange;
use chatpulse::format::{ReportFormat, render_report, write_report};
use chatpulse::prompt::PromptTemplate;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => {}
        Err(e) if e.is_warning() => {
            eprintln!("⚠️  {}", e);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "chatpulse=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatpulseError> {
    let total_start = Instant::now();
    let range = DateRange::parse(&args.start, &args.end)?;
    let format: ReportFormat = args.format.into();

    // Fail on settings before doing any work
    let prompt = if args.prompt {
        Some(load_prompt(args)?)
    } else {
        None
    };

    eprintln!("📦 chatpulse v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("📂 Input:   {}", args.input.display());
    eprintln!("📅 Range:   {}", range);
    eprintln!("📄 Format:  {}", format);
    if let Some(ref output) = args.output {
        eprintln!("💾 Output:  {}", output);
    }
    eprintln!();

    let analyzer =
        ChatAnalyzer::with_config(AnalyzerConfig::new().with_transcript_extension(&args.extension));

    eprintln!("⏳ Reading transcript...");
    let transcript = analyzer.load_path(&args.input)?;
    eprintln!(
        "   {} lines ({})",
        transcript.line_count(),
        transcript.encoding()
    );

    eprintln!("🔍 Filtering {}...", range);
    let analysis = analyzer.analyze_transcript(&transcript, &range)?;
    eprintln!(
        "   {} lines kept, {} messages",
        analysis.transcript.line_count(),
        analysis.stats.message_count
    );

    if let Some(ref path) = args.transcript {
        std::fs::write(path, analysis.transcript.as_str())?;
        eprintln!("📝 Transcript saved to {}", path.display());
    }

    emit_report(args, &analysis, format, prompt.is_some())?;

    if let Some((template, model)) = prompt {
        eprintln!("🤖 Prompt for {}:", model);
        println!("{}", template.compose(&range, &analysis.transcript));
    }

    print_summary(&analysis);
    eprintln!();
    eprintln!("✅ Done in {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Writes the report to `--output`, or to stdout unless stdout carries the prompt.
fn emit_report(
    args: &Args,
    analysis: &Analysis,
    format: ReportFormat,
    prompt_requested: bool,
) -> Result<(), ChatpulseError> {
    if let Some(ref output) = args.output {
        write_report(analysis, output, format)?;
        eprintln!("💾 Report saved to {}", output);
    } else if !prompt_requested {
        print!("{}", render_report(analysis, format)?);
    }
    Ok(())
}

/// Resolves the prompt template and model from settings and flags.
fn load_prompt(args: &Args) -> Result<(PromptTemplate, String), ChatpulseError> {
    let mut settings = match settings_path(args.config.as_deref()) {
        Some(path) => AppSettings::load(&path)?,
        None => AppSettings::default(),
    };
    if let Some(ref model) = args.model {
        settings = settings.with_model_version(model.clone());
    }
    if let Some(ref text) = args.prompt_text {
        settings = settings.with_default_prompt(text.clone());
    }

    settings.api_key()?;
    let template = settings.prompt_template();
    if template.is_empty() {
        return Err(ChatpulseError::missing_credential(
            "DEFAULT_PROMPT",
            settings.source().map(Path::to_path_buf),
        ));
    }

    Ok((template, settings.model_version().to_string()))
}

fn settings_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
            default.is_file().then_some(default)
        }
    }
}

fn print_summary(analysis: &Analysis) {
    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   Messages:  {}", analysis.stats.message_count);
    if let Some((hour, count)) = analysis.stats.hourly.peak() {
        eprintln!("   Busiest hour:  {:02}h ({} messages)", hour, count);
    }
    if let Some((day, count)) = analysis.stats.weekday.peak() {
        eprintln!(
            "   Busiest day:   {} ({} messages)",
            chatpulse::core::WeekdayHistogram::label(day),
            count
        );
    }
}

use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use openwith_sweep::attr::AttrAccessor;
use openwith_sweep::cli::{Cli, ColorChoice, Commands, InitArgs, RunArgs, SampleArgs};
use openwith_sweep::config::{Config, ConfigLoader, FileConfigLoader};
use openwith_sweep::gate;
use openwith_sweep::metrics::MetricsAggregator;
use openwith_sweep::output::{
    ColorMode, JsonFormatter, OutputFormat, ReportFormatter, SweepProgress, TextFormatter,
};
use openwith_sweep::pool::{self, CancelToken, PoolOptions};
use openwith_sweep::sampler::Sampler;
use openwith_sweep::scanner::{SuffixFilter, TreeScanner};
use openwith_sweep::{EXIT_CONFIG_ERROR, EXIT_INCOMPLETE, EXIT_SUCCESS};

/// Environment override for the worker count; takes precedence over both
/// the config file and `--concurrency`.
const JOBS_ENV: &str = "OPENWITH_SWEEP_JOBS";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Run(args) => run_sweep(args, &cli),
        Commands::Sample(args) => run_sample(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("openwith_sweep={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn formatter_for(format: OutputFormat, mode: ColorMode) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(mode)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> openwith_sweep::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> openwith_sweep::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

/// Resolve the final worker count the pool will be handed.
///
/// Precedence: `OPENWITH_SWEEP_JOBS` env var, then the configured value,
/// then ~75% of available hardware parallelism.
fn resolve_concurrency(configured: usize) -> usize {
    if let Ok(value) = std::env::var(JOBS_ENV) {
        match value.parse::<usize>() {
            Ok(jobs) if jobs > 0 => return jobs,
            _ => warn!(value = %value, "ignoring invalid {JOBS_ENV}"),
        }
    }
    if configured > 0 {
        return configured;
    }
    (num_cpus::get() * 3 / 4).max(1)
}

// =============================================================================
// run
// =============================================================================

fn run_sweep(args: &RunArgs, cli: &Cli) -> i32 {
    match run_sweep_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_sweep_impl(args: &RunArgs, cli: &Cli) -> openwith_sweep::Result<i32> {
    // 1. Load configuration and apply CLI overrides
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_run_overrides(&mut config, args);
    config.validate()?;

    // 2. Build the scan pipeline
    let filter = SuffixFilter::new(&config.scan.categories, &config.scan.exclude)?;
    let scanner = TreeScanner::new(filter);
    let accessor = Arc::new(AttrAccessor::new(config.scan.attribute.as_str()));
    let formatter = formatter_for(args.format, color_choice_to_mode(cli.color));

    // 3. Population counts drive the progress bar and category accounting
    let populations = scanner.populations(&args.path)?;
    let population: u64 = populations.values().sum();
    if population == 0 {
        if !cli.quiet {
            println!("No matching files under {}", args.path.display());
        }
        return Ok(EXIT_SUCCESS);
    }

    // 4. Sampling estimate, unless disabled
    if !args.no_sample {
        let sampler = Sampler::new(&scanner, &accessor);
        let run = sampler.sample(&args.path, config.sampling.sample_size)?;

        if !cli.quiet && args.format == OutputFormat::Text {
            eprint!("{}", formatter.format_sample(&run.result)?);
        }

        if gate::should_skip_full_pass(&run.result, config.sampling.min_sample) {
            if !cli.quiet {
                println!(
                    "Sample of {} file(s) found no overrides; skipping the full pass.",
                    run.result.sampled_count
                );
            }
            return Ok(EXIT_SUCCESS);
        }

        if gate::requires_confirmation(&run.result, config.limits.max_files)
            && !confirm_full_pass(run.result.estimated_population_hits, args.yes)
        {
            eprintln!("Aborted: confirmation declined.");
            return Ok(EXIT_INCOMPLETE);
        }
    }

    // 5. Full pass through the worker pool
    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel);

    let options = PoolOptions::new(resolve_concurrency(config.limits.concurrency))
        .dry_run(args.dry_run)
        .halt_on_error(config.limits.halt_on_error)
        .queue_capacity(config.limits.queue_capacity);

    let aggregator = MetricsAggregator::new();
    for category in scanner.categories() {
        aggregator.start(category);
    }

    let stream = pool::process(
        scanner.enumerate(&args.path),
        Arc::clone(&accessor),
        &options,
        cancel.clone(),
    )?;

    let progress = SweepProgress::new(population, cli.quiet);
    for record in stream {
        aggregator.accumulate(&record);
        progress.inc();
    }
    progress.finish();

    for category in scanner.categories() {
        aggregator.finish(category);
    }

    // 6. Report
    let report = aggregator.report();
    let cancelled = cancel.is_cancelled();
    if cancelled {
        eprintln!("Cancelled; partial results follow.");
    }

    let output = formatter.format_report(&report)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if cancelled || report.has_errors() {
        Ok(EXIT_INCOMPLETE)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn apply_run_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(ref ext) = args.ext {
        config.scan.categories.clone_from(ext);
    }
    config.scan.exclude.extend(args.exclude.iter().cloned());
    if let Some(ref attr) = args.attr {
        config.scan.attribute.clone_from(attr);
    }
    if let Some(concurrency) = args.concurrency {
        config.limits.concurrency = concurrency;
    }
    if let Some(max_files) = args.max_files {
        config.limits.max_files = max_files;
    }
    if let Some(sample_size) = args.sample_size {
        config.sampling.sample_size = sample_size;
    }
    if let Some(min_sample) = args.min_sample {
        config.sampling.min_sample = min_sample;
    }
    if args.halt_on_error {
        config.limits.halt_on_error = true;
    }
}

fn install_interrupt_handler(cancel: &CancelToken) {
    let cancel = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!(error = %e, "could not install interrupt handler");
    }
}

fn confirm_full_pass(estimated: u64, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    if !std::io::stdin().is_terminal() {
        eprintln!(
            "Estimated {estimated} file(s) carry the override; pass --yes to proceed non-interactively."
        );
        return false;
    }

    eprint!("Estimated {estimated} file(s) carry the override. Proceed? [y/N] ");
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

// =============================================================================
// sample
// =============================================================================

fn run_sample(args: &SampleArgs, cli: &Cli) -> i32 {
    match run_sample_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_sample_impl(args: &SampleArgs, cli: &Cli) -> openwith_sweep::Result<i32> {
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_sample_overrides(&mut config, args);
    config.validate()?;

    let filter = SuffixFilter::new(&config.scan.categories, &config.scan.exclude)?;
    let scanner = TreeScanner::new(filter);
    let accessor = Arc::new(AttrAccessor::new(config.scan.attribute.as_str()));

    let sampler = Sampler::new(&scanner, &accessor);
    let run = sampler.sample(&args.path, config.sampling.sample_size)?;

    let formatter = formatter_for(args.format, color_choice_to_mode(cli.color));
    let output = formatter.format_sample(&run.result)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(EXIT_SUCCESS)
}

fn apply_sample_overrides(config: &mut Config, args: &SampleArgs) {
    if let Some(ref ext) = args.ext {
        config.scan.categories.clone_from(ext);
    }
    config.scan.exclude.extend(args.exclude.iter().cloned());
    if let Some(ref attr) = args.attr {
        config.scan.attribute.clone_from(attr);
    }
    if let Some(sample_size) = args.sample_size {
        config.sampling.sample_size = sample_size;
    }
}

// =============================================================================
// init
// =============================================================================

fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> openwith_sweep::Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(openwith_sweep::SweepError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

fn config_template() -> &'static str {
    r#"# openwith-sweep configuration file

[scan]
# Suffix categories to sweep, in priority order (first match wins)
categories = ["pdf", "html", "txt"]

# Glob patterns to exclude from the walk
exclude = ["**/.git/**", "**/node_modules/**"]

# Extended attribute carrying the per-file handler override
# attribute = "com.apple.LaunchServices.OpenWith"

[sampling]
# Files to probe before deciding whether a full pass is worthwhile
sample_size = 400

# Smallest sample allowed to skip the full pass on zero hits
min_sample = 50

[limits]
# Estimated-hit ceiling above which the run asks for confirmation
max_files = 100000

# Worker count (0 = auto-detect, ~75% of available cores)
concurrency = 0

# Capacity of the bounded queues between producer, workers, and reporter
queue_capacity = 1024

# Stop dispatching new files after the first per-file failure
# halt_on_error = true
"#
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

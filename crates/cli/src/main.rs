mod logging;

use std::io::{self, IsTerminal, Read, Write};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use glue_engine::{glue_codes, parse_order, split_codes, SearchConfig};
use log::{info, LevelFilter};

#[derive(Debug, Parser)]
#[command(name = "glue-fumen")]
#[command(
    about = "Turns single page fumens with color coded pieces into multipage fumens with a piece on each page."
)]
struct Cli {
    /// Fumen codes; piped stdin is read as well
    codes: Vec<String>,
    /// Faster search that may miss solutions
    #[arg(short, long, default_value_t = false)]
    fast: bool,
    /// Stop each page after this many solutions (negative = unlimited)
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    expected_solutions: i64,
    /// Known piece order, e.g. TILJ
    #[arg(short, long)]
    order: Option<String>,
    /// Print one fumen tracing every attempted placement instead
    #[arg(short, long, default_value_t = false)]
    visualize: bool,
    /// Print the full report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
    /// Disable logging
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = SearchConfig::exhaustive()
            .with_fast(self.fast)
            .with_visualize(self.visualize);
        if let Ok(limit) = usize::try_from(self.expected_solutions) {
            config = config.with_expected_solutions(limit);
        }
        if let Some(order) = &self.order {
            config = config.with_order(parse_order(order).context("invalid --order")?);
        }
        Ok(config)
    }
}

fn read_inputs(cli: &Cli) -> Result<Vec<String>> {
    let mut inputs = cli.codes.clone();
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut piped = String::new();
        stdin
            .lock()
            .read_to_string(&mut piped)
            .context("failed to read codes from stdin")?;
        inputs.push(piped);
    }
    Ok(split_codes(&inputs))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.quiet { LevelFilter::Off } else { cli.log_level })?;

    let codes = read_inputs(&cli)?;
    if codes.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = cli.search_config()?;
    info!("gluing {} codes with {:?}", codes.len(), config);
    let report = glue_codes(&codes, &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report).context("failed to write report")?;
        writeln!(out)?;
        return Ok(());
    }

    for (_, error) in report.errors() {
        eprintln!("Error: {error}");
    }
    if cli.visualize {
        if let Some(trace) = &report.trace {
            writeln!(out, "{trace}")?;
        }
        return Ok(());
    }
    for line in report.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

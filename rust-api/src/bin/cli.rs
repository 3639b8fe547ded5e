//! Surebet CLI - Command-line interface for surebet calculations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use surebet::analysis::{analyze_by_market, analyze_by_yield_range, BatchAnalyzer, BatchReport};
use surebet::core::{
    bookmaker_margin, implied_probability, ArbitrageResult, BetType, SurebetCalculator,
    DEFAULT_TOTAL_STAKE,
};
use surebet::data::{write_hits_csv, write_report_json, OddsTable};
use surebet::models::SurebetResponse;

/// Lowest odds accepted at the prompt
const MIN_ODDS_INPUT: f64 = 1.01;
/// Lowest total stake accepted at the prompt
const MIN_STAKE_INPUT: f64 = 1.0;
const BAR_WIDTH: usize = 40;
const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "surebet")]
#[command(author, version, about = "Surebet (arbitrage) calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate stakes for one set of odds
    Calc {
        /// Decimal odds, one per outcome (2 or 3 values)
        #[arg(short, long, num_args = 1.., required = true)]
        odds: Vec<f64>,

        /// Total stake to distribute
        #[arg(short, long, default_value_t = DEFAULT_TOTAL_STAKE)]
        stake: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find surebets in a CSV of historical odds
    Batch {
        /// CSV file, one event per row
        #[arg(short, long)]
        file: PathBuf,

        /// Total stake applied to every row
        #[arg(short, long, default_value_t = DEFAULT_TOTAL_STAKE)]
        stake: f64,

        /// Odds columns (comma separated). Defaults to all numeric columns.
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Write results to a file (.json for the full report, CSV otherwise)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.interactive {
        println!("{}", "Surebet CLI v0.2.0".cyan().bold());
        println!();
        run_interactive()?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Calc { odds, stake, json } => {
                run_calc(&odds, stake, json)?;
            }
            Commands::Batch {
                file,
                stake,
                columns,
                output,
                json,
            } => {
                run_batch(&file, stake, &columns, output.as_deref(), json)?;
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

/// Logs go to stderr so JSON output stays clean
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn validate_stake_arg(stake: f64) -> Result<()> {
    if !stake.is_finite() || stake <= 0.0 {
        anyhow::bail!("Total stake must be positive, got {}", stake);
    }
    Ok(())
}

fn run_calc(odds: &[f64], stake: f64, json: bool) -> Result<()> {
    validate_stake_arg(stake)?;

    let calculator = SurebetCalculator::new(stake);
    let result = calculator
        .evaluate(odds)
        .with_context(|| format!("Cannot evaluate odds {:?}", odds))?;

    if json {
        let response = SurebetResponse::new(odds, stake, result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print_result(odds, stake, result.as_ref());
    Ok(())
}

fn print_result(odds: &[f64], stake: f64, result: Option<&ArbitrageResult>) {
    let bet_type = BetType::from_outcome_count(odds.len());
    let labels = bet_type.map(|b| b.labels()).unwrap_or_default();

    let odds_str: Vec<String> = odds.iter().map(|o| format!("{:.2}", o)).collect();
    println!(
        "{}: {} ({})",
        "Odds".green(),
        odds_str.join(" / "),
        bet_type.map(|b| b.name()).unwrap_or("-")
    );
    println!(
        "Implied probability: {:.4} (margin {:+.2}%)",
        implied_probability(odds),
        bookmaker_margin(odds) * 100.0
    );
    println!("Total stake: {:.2}", stake);
    println!();

    let Some(result) = result else {
        println!(
            "{}",
            "❌ No surebet - these odds offer no arbitrage opportunity.".red()
        );
        return;
    };

    println!("{}", "✅ Surebet found!".green().bold());
    println!();
    println!(
        "{:>8} {:>8} {:>10} {:>10}",
        "Outcome", "Odds", "Stake", "Payout"
    );
    println!("{}", "-".repeat(40));
    for (i, label) in labels.iter().enumerate() {
        println!(
            "{:>8} {:>8.2} {:>10.2} {:>10.2}",
            label, odds[i], result.stakes[i], result.payouts[i]
        );
    }
    println!();

    println!(
        "{} {:.2}",
        "Guaranteed profit:".yellow().bold(),
        result.profit
    );
    println!("{} {:.2} %", "Yield:".yellow().bold(), result.yield_percent);
    println!();

    println!("{}", "Stake distribution:".yellow().bold());
    let max_stake = result.stakes.iter().copied().fold(0.0, f64::max);
    for (label, s) in labels.iter().zip(&result.stakes) {
        println!(
            "{:>4} {} {:.2}",
            label,
            render_bar(*s, max_stake).cyan(),
            s
        );
    }
}

/// Horizontal bar scaled against `max`
fn render_bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

fn run_batch(
    file: &Path,
    stake: f64,
    columns: &[String],
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    validate_stake_arg(stake)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading odds table...");

    let loaded = if columns.is_empty() {
        OddsTable::load(file)
    } else {
        OddsTable::load_with_columns(file, columns)
    };
    let table = loaded.with_context(|| format!("Failed to load CSV from {:?}", file))?;

    pb.set_message("Analyzing rows...");

    let analyzer = BatchAnalyzer::new(SurebetCalculator::new(stake));
    let report = analyzer
        .analyze_table(&table)
        .with_context(|| "Batch analysis failed")?;

    pb.finish_and_clear();

    if let Some(path) = output {
        let written = if path.extension().is_some_and(|ext| ext == "json") {
            write_report_json(&report, path)
        } else {
            write_hits_csv(&report.hits, path)
        };
        written.with_context(|| format!("Failed to write results to {:?}", path))?;

        if !json {
            println!("{}: {:?}", "Saved".green(), path);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {} ({} rows)",
        "Historical odds".green(),
        file.display(),
        table.len()
    );
    println!("Odds columns: {}", table.odds_columns().join(", "));
    if table.coerced_cells() > 0 {
        println!(
            "{} {} non-numeric cells treated as missing",
            "Warning:".yellow(),
            table.coerced_cells()
        );
    }
    println!("{}", table.preview(PREVIEW_ROWS));
    println!();

    print_report(&report);
    Ok(())
}

fn print_report(report: &BatchReport) {
    println!("{}", "Surebets found:".yellow().bold());

    if report.hits.is_empty() {
        println!("{}", "No surebets found in this table.".yellow());
    } else {
        println!(
            "{:>6} {:>9} {:>12} {:>10}",
            "Row", "Outcomes", "Profit", "Yield"
        );
        println!("{}", "-".repeat(40));
        for hit in &report.hits {
            println!(
                "{:>6} {:>9} {:>12.2} {:>9.2}%",
                hit.row_index, hit.outcomes, hit.profit, hit.yield_percent
            );
        }
    }
    println!();

    if let Some(metrics) = &report.metrics {
        println!("{}", "Summary:".yellow().bold());
        println!("Stake per row:   {:.2}", report.total_stake);
        println!("Rows analyzed:   {}", metrics.total_rows);
        println!(
            "Surebets:        {} ({:.1}%)",
            metrics.surebet_rows,
            metrics.hit_rate * 100.0
        );
        println!("No arbitrage:    {}", report.no_arbitrage_rows);
        println!("Skipped:         {}", report.skipped.len());
        if metrics.surebet_rows > 0 {
            println!("Total profit:    {:.2}", metrics.total_profit);
            println!(
                "Yield avg/min/max: {:.2}% / {:.2}% / {:.2}%",
                metrics.avg_yield, metrics.min_yield, metrics.max_yield
            );
            if let Some(best) = metrics.best_row {
                println!("Best row:        {}", best);
            }
        }
        println!();
    }

    if !report.hits.is_empty() {
        println!("{}", "Analysis by Market:".yellow().bold());
        println!(
            "{:>12} {:>8} {:>12} {:>10} {:>10}",
            "Market", "Rows", "Profit", "Avg Yield", "Max Yield"
        );
        println!("{}", "-".repeat(56));
        for a in analyze_by_market(&report.hits) {
            println!(
                "{:>12} {:>8} {:>12.2} {:>9.2}% {:>9.2}%",
                a.key, a.rows, a.total_profit, a.avg_yield, a.max_yield
            );
        }

        println!("\n{}", "Analysis by Yield Range:".yellow().bold());
        println!(
            "{:>12} {:>8} {:>12} {:>10} {:>10}",
            "Range", "Rows", "Profit", "Avg Yield", "Max Yield"
        );
        println!("{}", "-".repeat(56));
        for a in analyze_by_yield_range(&report.hits) {
            println!(
                "{:>12} {:>8} {:>12.2} {:>9.2}% {:>9.2}%",
                a.key, a.rows, a.total_profit, a.avg_yield, a.max_yield
            );
        }

        println!("\n{}", "Yield by Row:".yellow().bold());
        let max_yield = report
            .hits
            .iter()
            .map(|h| h.yield_percent)
            .fold(0.0, f64::max);
        for hit in &report.hits {
            println!(
                "{:>6} {} {:.2}%",
                hit.row_index,
                render_bar(hit.yield_percent, max_yield).green(),
                hit.yield_percent
            );
        }
        println!();
    }

    if !report.skipped.is_empty() {
        println!("{}", "Skipped rows:".yellow().bold());
        for s in &report.skipped {
            println!("{:>6} {}", s.row_index, s.reason.dimmed());
        }
    }
}

fn prompt_stake(theme: &ColorfulTheme) -> Result<f64> {
    let stake: f64 = Input::with_theme(theme)
        .with_prompt("Total stake")
        .default(DEFAULT_TOTAL_STAKE)
        .validate_with(|v: &f64| -> Result<(), String> {
            if v.is_finite() && *v >= MIN_STAKE_INPUT {
                Ok(())
            } else {
                Err(format!("Stake must be at least {:.2}", MIN_STAKE_INPUT))
            }
        })
        .interact_text()?;
    Ok(stake)
}

fn run_interactive() -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!("Select 'Quit' to exit.\n");

    let theme = ColorfulTheme::default();

    loop {
        let options = vec!["Calculate a surebet", "Analyze historical odds (CSV)", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let bet_types = ["2-way (e.g. tennis)", "3-way (1X2, e.g. football)"];
                let bet_type = match Select::with_theme(&theme)
                    .with_prompt("Bet type")
                    .items(&bet_types)
                    .default(0)
                    .interact()?
                {
                    0 => BetType::TwoWay,
                    _ => BetType::ThreeWay,
                };

                let mut odds = Vec::with_capacity(bet_type.outcome_count());
                for label in bet_type.labels() {
                    let value: f64 = Input::with_theme(&theme)
                        .with_prompt(format!("Odds for {}", label))
                        .validate_with(|v: &f64| -> Result<(), String> {
                            if v.is_finite() && *v >= MIN_ODDS_INPUT {
                                Ok(())
                            } else {
                                Err(format!("Odds must be at least {:.2}", MIN_ODDS_INPUT))
                            }
                        })
                        .interact_text()?;
                    odds.push(value);
                }

                let stake = prompt_stake(&theme)?;

                println!();
                run_calc(&odds, stake, false)?;
                println!();
            }
            1 => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("CSV file")
                    .interact_text()?;
                let stake = prompt_stake(&theme)?;

                println!();
                // Keep the session alive on a bad file
                if let Err(e) = run_batch(Path::new(path.trim()), stake, &[], None, false) {
                    println!("{}: {:#}", "Error".red(), e);
                }
                println!();
            }
            2 => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(50.0, 50.0).chars().count(), BAR_WIDTH);
        assert_eq!(render_bar(25.0, 50.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(render_bar(0.01, 50.0).chars().count(), 1);
        assert!(render_bar(0.0, 50.0).is_empty());
        assert!(render_bar(5.0, 0.0).is_empty());
    }

    #[test]
    fn test_validate_stake_arg() {
        assert!(validate_stake_arg(100.0).is_ok());
        assert!(validate_stake_arg(0.0).is_err());
        assert!(validate_stake_arg(f64::INFINITY).is_err());
    }

    #[test]
    fn test_cli_parses_calc() {
        let cli = Cli::parse_from(["surebet", "calc", "--odds", "2.5", "3.2", "3.5", "-s", "50"]);
        match cli.command {
            Some(Commands::Calc { odds, stake, json }) => {
                assert_eq!(odds, vec![2.5, 3.2, 3.5]);
                assert_eq!(stake, 50.0);
                assert!(!json);
            }
            _ => panic!("expected calc command"),
        }
    }

    #[test]
    fn test_cli_parses_batch_columns() {
        let cli = Cli::parse_from([
            "surebet",
            "batch",
            "--file",
            "odds.csv",
            "--columns",
            "Quote1,Quote2,Quote3",
        ]);
        match cli.command {
            Some(Commands::Batch {
                file,
                stake,
                columns,
                output,
                ..
            }) => {
                assert_eq!(file, PathBuf::from("odds.csv"));
                assert_eq!(stake, DEFAULT_TOTAL_STAKE);
                assert_eq!(columns, vec!["Quote1", "Quote2", "Quote3"]);
                assert!(output.is_none());
            }
            _ => panic!("expected batch command"),
        }
    }
}

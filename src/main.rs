//! Policy Returns CLI
//!
//! Command-line interface for comparing illustration tables and computing returns

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use policy_returns::comparison::ComparisonTable;
use policy_returns::policy::{load_company_tables, load_year_records, MAX_POLICY_YEAR};
use policy_returns::returns::{solve_irr_detailed, IrrFailure, PlanAnalysis, PlanTerms};
use policy_returns::{ComparisonConfig, ComparisonEngine};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "policy_returns", version, about = "Returns on insurance illustration tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare companies from a standard-comparison JSON payload
    Compare {
        /// JSON file with the companies and their standard tables
        companies: PathBuf,

        /// JSON config file (annual_premium, custom_years, customer_age, ...)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Customer's annual premium
        #[arg(long)]
        premium: Option<f64>,

        /// Policy years to show, e.g. "1,5,10,20"
        #[arg(long)]
        years: Option<String>,

        /// Customer's current age
        #[arg(long)]
        age: Option<u32>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a single plan's surrender value table (CSV)
    Analyze {
        table: PathBuf,

        #[arg(long)]
        annual_premium: f64,

        #[arg(long)]
        payment_years: u32,

        #[arg(long)]
        json: bool,
    },

    /// IRR of an explicit cumulative premium schedule
    Irr {
        /// Cumulative premiums paid through each year, comma separated
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        premiums: Vec<f64>,

        /// Value received at the end of the holding period
        #[arg(long)]
        terminal_value: f64,

        /// Holding period in years (defaults to the schedule length)
        #[arg(long)]
        holding_years: Option<u32>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Compare { companies, config, premium, years, age, json } => {
            let mut config = match config {
                Some(path) => ComparisonConfig::from_json_file(&path)
                    .with_context(|| format!("reading config {}", path.display()))?,
                None => ComparisonConfig::default(),
            }
            .with_env_overrides();

            if let Some(premium) = premium {
                config.annual_premium = premium;
            }
            if years.is_some() {
                config.custom_years = years;
            }
            if age.is_some() {
                config.customer_age = age;
            }

            let products = load_company_tables(&companies)
                .with_context(|| format!("loading companies from {}", companies.display()))?;
            let table = ComparisonEngine::new(config).compare(&products)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print_comparison(&table);
            }
        }

        Command::Analyze { table, annual_premium, payment_years, json } => {
            let mut records = load_year_records(&table)
                .with_context(|| format!("loading table {}", table.display()))?;
            records.sort_by_key(|r| r.policy_year);
            let analysis = PlanAnalysis::analyze(&records, PlanTerms { annual_premium, payment_years });

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }

        Command::Irr { premiums, terminal_value, holding_years } => {
            let holding_years = holding_years.unwrap_or(premiums.len() as u32);
            ensure!(
                (1..=MAX_POLICY_YEAR).contains(&holding_years),
                "holding years must be between 1 and {}, got {}",
                MAX_POLICY_YEAR,
                holding_years
            );
            match solve_irr_detailed(&premiums, terminal_value, holding_years) {
                Ok(solution) => println!(
                    "IRR: {:.2}% ({} iterations, seed {}, tolerance {})",
                    solution.percent(),
                    solution.iterations,
                    solution.params.initial_rate,
                    solution.params.tolerance
                ),
                Err(IrrFailure::NotComputable) => println!("IRR: - (not computable)"),
                Err(failure) => println!("IRR: - ({:?})", failure),
            }
        }
    }

    Ok(())
}

fn pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}%", v)).unwrap_or_else(|| "-".to_string())
}

fn amount(value: Option<f64>) -> String {
    value.map(|v| format!("{:.0}", v)).unwrap_or_else(|| "-".to_string())
}

fn print_comparison(table: &ComparisonTable) {
    println!("Company Comparison");
    println!("==================\n");
    println!("  Annual premium:   {:.0}", table.annual_premium);
    println!("  Standard premium: {:.0}", table.standard_annual_premium);
    println!("  Premium ratio:    {:.4}", table.premium_ratio);
    println!();

    for (index, product) in table.products.iter().enumerate() {
        println!("  #{} [{}] {}", index + 1, product.id, product.name);
    }
    println!();

    print!("{:>5} {:>5} {:>12}", "Year", "Age", "Paid");
    for index in 0..table.products.len() {
        let label = format!("#{} Guar", index + 1);
        print!(" | {:>12} {:>12} {:>12} {:>8} {:>8}", label, "Non-guar", "Total", "Simple", "IRR");
    }
    println!();
    println!("{}", "-".repeat(24 + table.products.len() * 60));

    for row in &table.rows {
        let age = row.attained_age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
        print!("{:>5} {:>5} {:>12.0}", row.policy_year, age, row.premiums_paid);
        for cell in &row.cells {
            let marker = if cell.is_best_total { "*" } else { " " };
            print!(
                " | {:>12} {:>12} {:>11}{} {:>8} {:>8}",
                amount(cell.record.map(|r| r.guaranteed)),
                amount(cell.record.map(|r| r.non_guaranteed)),
                amount(cell.total()),
                marker,
                pct(cell.metrics.simple_annualized_return),
                pct(cell.metrics.irr),
            );
        }
        println!();
    }

    println!("\n* highest total value at that year");
}

fn print_analysis(analysis: &PlanAnalysis) {
    println!("Plan Analysis");
    println!("=============\n");
    println!("  Total investment: {:.0}", analysis.total_investment);
    println!("  Final value:      {}", amount(analysis.final_value));
    println!(
        "  Return multiple:  {}",
        analysis.return_multiple.map(|m| format!("{:.2}x", m)).unwrap_or_else(|| "-".to_string())
    );
    println!("  Total gain:       {}", amount(analysis.total_gain));
    println!(
        "  Break-even year:  {}",
        analysis.break_even_year.map(|y| y.to_string()).unwrap_or_else(|| "not reached".to_string())
    );

    println!("\nStage returns:");
    println!("{:>5} {:>12} {:>12} {:>8} {:>8}", "Year", "Invested", "Value", "Simple", "CAGR");
    for stage in &analysis.stages {
        println!(
            "{:>5} {:>12.0} {:>12.0} {:>8} {:>8}",
            stage.policy_year,
            stage.actual_investment,
            stage.value,
            pct(stage.simple_annualized_return),
            pct(stage.compound_annual_growth_rate),
        );
    }

    println!("\nMilestones:");
    for milestone in &analysis.milestones {
        match milestone.reached_year {
            Some(year) => println!(
                "  {:>4.1}x ({:>12.0}): year {} (value {})",
                milestone.multiplier,
                milestone.target_amount,
                year,
                amount(milestone.value_at_reached)
            ),
            None => println!(
                "  {:>4.1}x ({:>12.0}): not reached",
                milestone.multiplier, milestone.target_amount
            ),
        }
    }
}

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use common::money::format_amount;
use compute::{DebtStrategy, SimulationPlan, compare_strategies};
use model::entities::debt::DebtSnapshot;
use rust_decimal::Decimal;
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    Snowball,
    Avalanche,
    Both,
}

fn render_plan(out: &mut String, plan: &SimulationPlan, currency: &str) -> Result<()> {
    writeln!(out, "{}: {}", plan.strategy, plan.summary())?;
    for entry in &plan.entries {
        writeln!(
            out,
            "  month {:>4} ({})  paid off: {}  remaining: {}",
            entry.month,
            entry.date.format("%Y-%m"),
            entry.paid_off.join(", "),
            format_amount(entry.remaining_balance, currency)
        )?;
    }
    if plan.months().is_some() {
        writeln!(
            out,
            "  total interest: {}  total paid: {}",
            format_amount(plan.total_interest, currency),
            format_amount(plan.total_paid, currency)
        )?;
    }
    Ok(())
}

/// Simulates the debts listed in `debts_file` and renders the plans.
pub fn simulate(
    debts_file: &Path,
    extra_payment: Decimal,
    choice: StrategyChoice,
    start_date: NaiveDate,
    currency: &str,
) -> Result<String> {
    debug!("Reading debts from {}", debts_file.display());
    let content = std::fs::read_to_string(debts_file)
        .with_context(|| format!("Failed to read {}", debts_file.display()))?;
    let debts: Vec<DebtSnapshot> = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid debt list in {}", debts_file.display()))?;
    info!("Simulating {} debts with extra payment {}", debts.len(), extra_payment);

    let mut out = String::new();
    match choice {
        StrategyChoice::Snowball | StrategyChoice::Avalanche => {
            let strategy = if choice == StrategyChoice::Snowball {
                DebtStrategy::Snowball
            } else {
                DebtStrategy::Avalanche
            };
            let plan = compute::simulate(&debts, extra_payment, strategy, start_date)?;
            render_plan(&mut out, &plan, currency)?;
        }
        StrategyChoice::Both => {
            let comparison = compare_strategies(&debts, extra_payment, start_date)?;
            render_plan(&mut out, &comparison.snowball, currency)?;
            render_plan(&mut out, &comparison.avalanche, currency)?;
            if let Some(saved) = comparison.interest_saved_by_avalanche() {
                writeln!(out, "interest saved by avalanche: {}", format_amount(saved, currency))?;
            }
            if let Some(recommended) = comparison.recommended() {
                writeln!(out, "recommended: {}", recommended)?;
            }
        }
    }
    Ok(out)
}

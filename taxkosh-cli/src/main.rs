mod format;
mod logging;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use taxkosh_core::calculations::{
    AdvanceTaxWorksheet, BusinessWorksheet, BusinessWorksheetInput, IndividualWorksheet,
    IndividualWorksheetInput,
};
use taxkosh_core::{AgeCategory, BusinessType, TaxRegime, TaxpayerRegistry};
use taxkosh_data::SlabScheduleLoader;
use tracing::info;

use crate::format::{format_inr, parse_amount};

/// Income-tax calculators for the tax collection portal.
#[derive(Parser, Debug)]
#[command(name = "taxkosh")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Slab schedule CSV overriding the built-in FY 2024-25 tables
    #[arg(long, global = true)]
    regime: Option<PathBuf>,

    /// Append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate income tax for an individual taxpayer
    Individual {
        /// Annual income
        #[arg(long)]
        income: String,

        /// Age category: below_60, senior or super_senior
        #[arg(long, default_value = "below_60")]
        age: String,

        /// Section 80C investments (PPF, ELSS, life insurance, ...)
        #[arg(long, default_value = "")]
        section_80c: String,

        /// Section 80D health insurance premium
        #[arg(long, default_value = "")]
        section_80d: String,

        /// HRA exemption
        #[arg(long, default_value = "")]
        hra: String,

        /// Other deductions (Section 80G, 80E, ...)
        #[arg(long, default_value = "")]
        other: String,
    },

    /// Estimate income tax for a business
    Business {
        /// Annual business income
        #[arg(long)]
        income: String,

        /// Business type: company_domestic, company_foreign, partnership,
        /// llp or sole_proprietorship
        #[arg(long, default_value = "company_domestic")]
        kind: String,

        /// Total deductions (expenses, depreciation, ...)
        #[arg(long, default_value = "")]
        deductions: String,
    },

    /// Print the advance-tax installment schedule for an estimated liability
    AdvanceTax {
        /// Estimated annual tax liability
        #[arg(long, conflicts_with = "income")]
        estimated_tax: Option<String>,

        /// Estimated annual income; the liability is roughly estimated at
        /// the sole-proprietorship flat rate
        #[arg(long)]
        income: Option<String>,
    },

    /// Check whether an income level requires filing a return
    Eligibility {
        /// Annual income
        #[arg(long)]
        income: String,

        /// Age category: below_60, senior or super_senior
        #[arg(long, default_value = "below_60")]
        age: String,
    },

    /// List the demo taxpayer registry
    Taxpayers {
        /// Filter records by name, email or phone
        #[arg(long)]
        search: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let regime = load_regime(cli.regime.as_deref())?;

    match cli.command {
        Command::Individual {
            income,
            age,
            section_80c,
            section_80d,
            hra,
            other,
        } => run_individual(&regime, &income, &age, &section_80c, &section_80d, &hra, &other),
        Command::Business {
            income,
            kind,
            deductions,
        } => run_business(&regime, &income, &kind, &deductions),
        Command::AdvanceTax {
            estimated_tax,
            income,
        } => run_advance_tax(&regime, estimated_tax.as_deref(), income.as_deref()),
        Command::Eligibility { income, age } => run_eligibility(&regime, &income, &age),
        Command::Taxpayers { search } => run_taxpayers(search.as_deref()),
    }
}

fn load_regime(path: Option<&Path>) -> Result<TaxRegime> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            let regime = SlabScheduleLoader::load(file)
                .with_context(|| format!("Failed to load slab schedules from: {}", path.display()))?;
            info!(fiscal_year = %regime.fiscal_year, "loaded slab schedules");
            Ok(regime)
        }
        None => Ok(TaxRegime::fy_2024_25()),
    }
}

fn parse_age(age: &str) -> Result<AgeCategory> {
    match AgeCategory::parse(age) {
        Some(category) => Ok(category),
        None => {
            let codes: Vec<&str> = AgeCategory::ALL.iter().map(|c| c.as_str()).collect();
            bail!("unknown age category '{age}' (expected one of: {})", codes.join(", "));
        }
    }
}

fn parse_kind(kind: &str) -> Result<BusinessType> {
    match BusinessType::parse(kind) {
        Some(kind) => Ok(kind),
        None => {
            let codes: Vec<&str> = BusinessType::ALL.iter().map(|k| k.as_str()).collect();
            bail!("unknown business type '{kind}' (expected one of: {})", codes.join(", "));
        }
    }
}

fn print_line(
    label: &str,
    amount: Decimal,
) {
    println!("  {label:<18} {:>18}", format_inr(amount));
}

fn run_individual(
    regime: &TaxRegime,
    income: &str,
    age: &str,
    section_80c: &str,
    section_80d: &str,
    hra: &str,
    other: &str,
) -> Result<()> {
    let category = parse_age(age)?;
    let input = IndividualWorksheetInput {
        gross_income: parse_amount(income)?,
        section_80c: parse_amount(section_80c)?,
        section_80d: parse_amount(section_80d)?,
        hra_exemption: parse_amount(hra)?,
        other_deductions: parse_amount(other)?,
    };

    let worksheet = IndividualWorksheet::for_regime(regime, category);
    let assessment = worksheet.calculate(&input)?;

    println!("Income Tax Calculation (FY {})", regime.fiscal_year);
    println!("Category: {}", category.label());
    println!();
    print_line("Gross Income", assessment.gross_income);
    print_line("Total Deductions", assessment.total_deductions);
    print_line("Taxable Income", assessment.taxable_income);
    print_line("Income Tax", assessment.base_tax);
    print_line(
        &format!("Cess ({}%)", regime.cess_rate_percent),
        assessment.cess,
    );
    print_line("Total Tax", assessment.total_tax);
    print_line("Net Income", assessment.net_income);
    Ok(())
}

fn run_business(
    regime: &TaxRegime,
    income: &str,
    kind: &str,
    deductions: &str,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let input = BusinessWorksheetInput {
        gross_income: parse_amount(income)?,
        deductions: parse_amount(deductions)?,
    };

    let worksheet = BusinessWorksheet::for_regime(regime, kind);
    let assessment = worksheet.calculate(&input)?;

    println!("Business Tax Calculation (FY {})", regime.fiscal_year);
    println!("Business Type: {}", kind.label());
    println!();
    print_line("Gross Income", assessment.gross_income);
    print_line("Deductions", assessment.deductions);
    print_line("Taxable Income", assessment.taxable_income);
    println!("  {:<18} {:>18}", "Tax Rate", format!("{}%", assessment.rate_percent));
    print_line("Income Tax", assessment.base_tax);
    print_line(
        &format!("Cess ({}%)", regime.cess_rate_percent),
        assessment.cess,
    );
    print_line("Total Tax", assessment.total_tax);
    print_line("Net Income", assessment.net_income);
    Ok(())
}

fn run_advance_tax(
    regime: &TaxRegime,
    estimated_tax: Option<&str>,
    income: Option<&str>,
) -> Result<()> {
    let liability = match (estimated_tax, income) {
        (Some(tax), _) => parse_amount(tax)?,
        (None, Some(income)) => {
            // Rough estimate at the sole-proprietorship flat rate; a real
            // liability figure should come from the individual worksheet.
            let income = parse_amount(income)?;
            let rate = regime.business_rates.sole_proprietorship;
            income * rate / Decimal::ONE_HUNDRED
        }
        (None, None) => bail!("pass --estimated-tax or --income"),
    };

    let worksheet = AdvanceTaxWorksheet::for_regime(regime)?;
    let schedule = worksheet.schedule(liability)?;

    println!("Advance Tax Schedule (FY {})", regime.fiscal_year);
    print_line("Estimated Tax", liability);
    println!();
    println!("  {:<16} {:<12} {:>18}", "Installment", "Due Date", "Amount");
    for installment in &schedule {
        println!(
            "  {:<16} {:<12} {:>18}",
            installment.label,
            installment.due_date.format("%Y-%m-%d"),
            format_inr(installment.amount),
        );
    }
    Ok(())
}

fn run_eligibility(
    regime: &TaxRegime,
    income: &str,
    age: &str,
) -> Result<()> {
    let category = parse_age(age)?;
    let income = parse_amount(income)?;
    let limit = regime.schedule_for(category).basic_exemption_limit();

    println!("Filing Eligibility (FY {})", regime.fiscal_year);
    println!("Category: {}", category.label());
    println!();
    print_line("Annual Income", income);
    print_line("Exemption Limit", limit);
    println!();
    if income > limit {
        println!("Filing a return is required: income exceeds the basic exemption limit.");
    } else {
        println!("Filing a return is not required at this income level.");
    }
    Ok(())
}

fn run_taxpayers(search: Option<&str>) -> Result<()> {
    let registry = TaxpayerRegistry::with_sample_data();
    let records = match search {
        Some(query) => registry.search(query),
        None => registry.list(),
    };

    println!(
        "{:<4} {:<15} {:<22} {:<16} {:<13} {:>14}  {:<12} {:<8}",
        "ID", "Name", "Email", "GSTIN", "Tax Type", "Total Due", "Last Payment", "Status"
    );
    for taxpayer in records {
        let last_payment = taxpayer
            .last_payment
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:<4} {:<15} {:<22} {:<16} {:<13} {:>14}  {:<12} {:<8}",
            taxpayer.id,
            taxpayer.name,
            taxpayer.email,
            taxpayer.gstin,
            taxpayer.tax_type.as_str(),
            format_inr(taxpayer.total_due),
            last_payment,
            taxpayer.status.as_str(),
        );
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, warn};
use vergi_core::TaxParameters;
use vergi_core::calculations::common::round_half_up;
use vergi_core::calculations::{
    CorporateTaxExemption, InvoiceCalculator, PayrollCalculator, validate_support_personnel_ratio,
};
use vergi_data::{BracketLoader, ParameterLoader, csv_loader, logging};

/// Compute invoice totals, payroll incentives and corporate tax exemptions.
///
/// Amounts are printed rounded half-up to two decimals.
#[derive(Parser, Debug)]
#[command(name = "vergi-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file overriding the shipped tax parameters
    #[arg(short, long, global = true)]
    params: Option<PathBuf>,

    /// CSV file replacing the income tax bracket table (upper_limit,rate)
    #[arg(short, long, global = true)]
    brackets: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "info,vergi_core=debug" (default: RUST_LOG, else info)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Totals for the invoice lines in a CSV file
    Invoice { file: PathBuf },

    /// Payroll entries and period summary for the employees in a CSV file
    Payroll { file: PathBuf },

    /// Corporate tax exemption for technology zone income
    Exemption {
        #[arg(long)]
        income: Decimal,

        #[arg(long, default_value = "0")]
        rd_expense: Decimal,
    },
}

fn load_parameters(args: &Args) -> Result<TaxParameters> {
    let mut params = match &args.params {
        Some(path) => ParameterLoader::from_file(path)
            .with_context(|| format!("Failed to load parameters: {}", path.display()))?,
        None => TaxParameters::default(),
    };

    if let Some(path) = &args.brackets {
        params.income_tax_brackets = BracketLoader::from_file(path)
            .with_context(|| format!("Failed to load brackets: {}", path.display()))?;
        params
            .validate()
            .context("Bracket table does not fit the tax parameters")?;
    }

    info!(year = params.year, "using tax parameters");
    Ok(params)
}

fn money(value: Decimal) -> Decimal {
    round_half_up(value)
}

fn run_invoice(
    params: &TaxParameters,
    file: &Path,
) -> Result<()> {
    let lines = csv_loader::load_invoice_lines_from_file(file)
        .with_context(|| format!("Failed to read invoice lines: {}", file.display()))?;

    let calculator = InvoiceCalculator::new(params);
    println!(
        "{:>4} {:>14} {:>14} {:>12} {:>12} {:>14}",
        "line", "line total", "discounted", "vat", "withholding", "total"
    );
    for (index, line) in lines.iter().enumerate() {
        let result = calculator
            .calculate_line(line)
            .with_context(|| format!("Invalid invoice line {}", index + 1))?;
        println!(
            "{:>4} {:>14} {:>14} {:>12} {:>12} {:>14}",
            index + 1,
            money(result.line_total),
            money(result.discounted_total),
            money(result.vat_amount),
            money(result.withholding_amount),
            money(result.total_with_vat),
        );
    }

    let document = calculator.calculate_document(&lines)?;
    println!();
    println!("subtotal:     {}", money(document.subtotal));
    println!("discount:     {}", money(document.discount_amount));
    println!("taxable:      {}", money(document.taxable_amount));
    println!("exempt:       {}", money(document.exempt_amount));
    println!("vat:          {}", money(document.vat_amount));
    println!("withholding:  {}", money(document.withholding_amount));
    println!("grand total:  {}", money(document.grand_total));
    Ok(())
}

fn run_payroll(
    params: &TaxParameters,
    file: &Path,
) -> Result<()> {
    let employees = csv_loader::load_employees_from_file(file)
        .with_context(|| format!("Failed to read employees: {}", file.display()))?;

    if let Err(error) = validate_support_personnel_ratio(&employees, params) {
        warn!(%error, "support personnel exceed the incentive cap");
    }

    let calculator = PayrollCalculator::new(params).context("Invalid tax parameters")?;
    let (entries, summary) = calculator
        .calculate_period(&employees)
        .context("Failed to calculate payroll")?;

    println!(
        "{:>4} {:>14} {:>12} {:>12} {:>8} {:>12} {:>14} {:>12}",
        "#", "gross", "income tax", "exemption", "rate", "stamp", "net", "incentive"
    );
    for (index, entry) in entries.iter().enumerate() {
        println!(
            "{:>4} {:>14} {:>12} {:>12} {:>8} {:>12} {:>14} {:>12}",
            index + 1,
            money(entry.gross_salary),
            money(entry.income_tax_gross),
            money(entry.income_tax_incentive_amount),
            entry.income_tax_exemption_rate,
            money(entry.stamp_tax_amount),
            money(entry.net_salary),
            money(entry.estimated_total_incentive),
        );
    }

    println!();
    println!("employees:                {}", summary.employee_count);
    println!("total personnel cost:     {}", money(summary.total_personnel_cost));
    println!("income tax exemption:     {}", money(summary.total_income_tax_exemption));
    println!("stamp tax exemption:      {}", money(summary.total_stamp_tax_exemption));
    println!("sgk employer incentive:   {}", money(summary.total_sgk_employer_incentive));
    println!("total incentive:          {}", money(summary.total_incentive));
    println!("payable sgk:              {}", money(summary.payable_sgk));
    Ok(())
}

fn run_exemption(
    params: &TaxParameters,
    income: Decimal,
    rd_expense: Decimal,
) -> Result<()> {
    let exemption = CorporateTaxExemption::calculate(income, rd_expense, params)?;

    println!("exemption base:           {}", money(exemption.exemption_base));
    println!("corporate tax exemption:  {}", money(exemption.corporate_tax_exemption));
    println!("vat exemption:            {}", money(exemption.vat_exemption));
    println!(
        "venture capital:          {}{}",
        money(exemption.venture_capital_obligation),
        if exemption.venture_capital_required { " (required)" } else { "" }
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_default_logging();
    if let Some(level) = &args.log_level {
        logging::set_log_level(level).with_context(|| format!("Invalid log level: {level}"))?;
    }

    let params = load_parameters(&args)?;

    match &args.command {
        Command::Invoice { file } => run_invoice(&params, file),
        Command::Payroll { file } => run_payroll(&params, file),
        Command::Exemption { income, rd_expense } => run_exemption(&params, *income, *rd_expense),
    }
}

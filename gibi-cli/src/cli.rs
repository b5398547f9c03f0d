use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gibi_core::{
    CalculationInput, EmploymentInput, PlcInput, SmallBusinessInput, SoleProprietorInput,
};

use crate::output::OutputFormat;
use crate::utils::coerce_amount;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Ethiopian tax estimator.
///
/// Amounts are read as typed: thousands separators are accepted, and blank,
/// malformed or negative amounts count as zero.
#[derive(Debug, Parser)]
#[command(name = "gibi", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file. Defaults to `gibi.toml` in the working directory
    /// when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `gibi_core=trace`). Overrides `RUST_LOG` and
    /// the configuration file.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format. Overrides the configuration file.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Calculate(CalculationCommand),

    /// Calculate every row of a CSV file.
    Batch {
        /// Path to the CSV file.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Calculate and write a tax report file.
    Report(ReportArgs),

    /// Print the active rate schedule.
    Schedule,
}

#[derive(Debug, Subcommand)]
pub enum CalculationCommand {
    /// Monthly employment income tax.
    Employment {
        /// Monthly gross salary (ETB).
        #[arg(long)]
        salary: Option<String>,
    },

    /// Annual sole proprietor tax.
    SoleProprietor(SoleProprietorArgs),

    /// Annual Category B small business tax on gross sales.
    SmallBusiness {
        /// Annual gross sales (ETB).
        #[arg(long)]
        sales: Option<String>,
    },

    /// Annual PLC / share company tax.
    Plc(PlcArgs),
}

#[derive(Debug, Args)]
pub struct SoleProprietorArgs {
    /// Annual revenue (ETB).
    #[arg(long)]
    pub revenue: Option<String>,
    /// Employee salaries (ETB).
    #[arg(long)]
    pub salaries: Option<String>,
    /// Rent and utilities (ETB).
    #[arg(long)]
    pub rent: Option<String>,
    /// Raw materials (ETB).
    #[arg(long)]
    pub materials: Option<String>,
    /// Depreciation (ETB).
    #[arg(long)]
    pub depreciation: Option<String>,
    /// Interest (ETB).
    #[arg(long)]
    pub interest: Option<String>,
    /// Charitable giving (ETB), capped at 10% of profit.
    #[arg(long)]
    pub charity: Option<String>,
}

#[derive(Debug, Args)]
pub struct PlcArgs {
    /// Annual gross sales (ETB).
    #[arg(long)]
    pub sales: Option<String>,
    /// Employee salaries (ETB).
    #[arg(long)]
    pub salaries: Option<String>,
    /// Rent and utilities (ETB).
    #[arg(long)]
    pub rent: Option<String>,
    /// Raw materials (ETB).
    #[arg(long)]
    pub materials: Option<String>,
    /// Depreciation (ETB).
    #[arg(long)]
    pub depreciation: Option<String>,
    /// Interest (ETB).
    #[arg(long)]
    pub interest: Option<String>,
    /// Other deductions (ETB).
    #[arg(long)]
    pub other: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Name printed as the taxpayer.
    #[arg(long)]
    pub taxpayer: String,

    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Directory the report file is written to.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    #[command(subcommand)]
    pub calculation: CalculationCommand,
}

impl CalculationCommand {
    /// Coerces the typed amounts into a calculator input.
    pub fn to_input(&self) -> CalculationInput {
        match self {
            Self::Employment { salary } => EmploymentInput {
                salary: coerce_amount("salary", salary.as_deref()),
            }
            .into(),
            Self::SoleProprietor(args) => SoleProprietorInput {
                revenue: coerce_amount("revenue", args.revenue.as_deref()),
                salaries: coerce_amount("salaries", args.salaries.as_deref()),
                rent: coerce_amount("rent", args.rent.as_deref()),
                materials: coerce_amount("materials", args.materials.as_deref()),
                depreciation: coerce_amount("depreciation", args.depreciation.as_deref()),
                interest: coerce_amount("interest", args.interest.as_deref()),
                charity: coerce_amount("charity", args.charity.as_deref()),
            }
            .into(),
            Self::SmallBusiness { sales } => SmallBusinessInput {
                sales: coerce_amount("sales", sales.as_deref()),
            }
            .into(),
            Self::Plc(args) => PlcInput {
                sales: coerce_amount("sales", args.sales.as_deref()),
                salaries: coerce_amount("salaries", args.salaries.as_deref()),
                rent: coerce_amount("rent", args.rent.as_deref()),
                materials: coerce_amount("materials", args.materials.as_deref()),
                depreciation: coerce_amount("depreciation", args.depreciation.as_deref()),
                interest: coerce_amount("interest", args.interest.as_deref()),
                other: coerce_amount("other", args.other.as_deref()),
            }
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn employment_subcommand_coerces_salary() {
        let cli = Cli::try_parse_from(["gibi", "employment", "--salary", "5,000"]).unwrap();

        let Command::Calculate(calculation) = cli.command else {
            panic!("expected a calculation command");
        };

        assert_eq!(
            calculation.to_input(),
            CalculationInput::Employment(EmploymentInput { salary: dec!(5000) })
        );
    }

    #[test]
    fn missing_and_bad_amounts_become_zero() {
        let cli = Cli::try_parse_from([
            "gibi",
            "plc",
            "--sales",
            "1000000",
            "--rent",
            "n/a",
            "--other=-10",
        ])
        .unwrap();

        let Command::Calculate(calculation) = cli.command else {
            panic!("expected a calculation command");
        };

        assert_eq!(
            calculation.to_input(),
            CalculationInput::Plc(PlcInput {
                sales: dec!(1000000),
                ..Default::default()
            })
        );
    }

    #[test]
    fn report_takes_nested_calculation() {
        let cli = Cli::try_parse_from([
            "gibi",
            "report",
            "--taxpayer",
            "Abebe",
            "--date",
            "2026-03-14",
            "small-business",
            "--sales",
            "400000",
        ])
        .unwrap();

        let Command::Report(args) = cli.command else {
            panic!("expected the report command");
        };

        assert_eq!(args.taxpayer, "Abebe");
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 3, 14));
        assert_eq!(
            args.calculation.to_input(),
            CalculationInput::SmallBusiness(SmallBusinessInput { sales: dec!(400000) })
        );
    }

    #[test]
    fn global_format_flag_parses_after_subcommand() {
        let cli = Cli::try_parse_from(["gibi", "small-business", "--sales", "1", "--format", "json"])
            .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}

//! Command execution, kept separate from `main` so it can be driven from
//! tests with an in-memory writer.

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use gibi_core::{
    CalculationResult, DELIVERY_CAPTION, Payment, PaymentStatus, RateSchedule, TaxCalculator,
    TaxData,
};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    cli::{CalculationCommand, Command, ReportArgs},
    config::AppConfig,
    csv_loader::{self, BatchEntry},
    output::{OutputFormat, ResultRecord, batch_heading, write_result},
};

/// Payment id used for reports filed from the command line.
const LOCAL_PAYMENT_ID: &str = "local";

pub struct App {
    calculator: TaxCalculator<'static>,
    format: OutputFormat,
}

impl App {
    /// Builds the app from loaded configuration. `format` overrides the
    /// configured output format.
    pub fn new(
        config: &AppConfig,
        format: Option<OutputFormat>,
    ) -> Result<Self> {
        let schedule = config.schedule();
        schedule
            .validate()
            .context("configured rate schedule is invalid")?;

        Ok(Self {
            calculator: TaxCalculator::new(schedule),
            format: format.unwrap_or(config.output.format),
        })
    }

    pub fn schedule(&self) -> &RateSchedule {
        self.calculator.schedule()
    }

    pub fn run(
        &self,
        command: &Command,
        out: &mut impl Write,
    ) -> Result<()> {
        match command {
            Command::Calculate(calculation) => self.calculate(calculation, out),
            Command::Batch { file } => self.batch(file, out),
            Command::Report(args) => {
                let date = args.date.unwrap_or_else(|| Local::now().date_naive());
                self.report(args, date, out)
            }
            Command::Schedule => self.print_schedule(out),
        }
    }

    fn calculate(
        &self,
        calculation: &CalculationCommand,
        out: &mut impl Write,
    ) -> Result<()> {
        let result = self.calculator.calculate(&calculation.to_input());
        write_result(out, self.format, &result)
    }

    fn batch(
        &self,
        file: &Path,
        out: &mut impl Write,
    ) -> Result<()> {
        let entries = csv_loader::load_from_file(file)
            .with_context(|| format!("failed to load batch file '{}'", file.display()))?;
        info!(file = %file.display(), rows = entries.len(), "batch loaded");

        let results: Vec<(BatchEntry, CalculationResult)> = entries
            .into_iter()
            .map(|entry| {
                let result = self.calculator.calculate(&entry.input);
                (entry, result)
            })
            .collect();

        match self.format {
            OutputFormat::Text => {
                for (entry, result) in &results {
                    writeln!(
                        out,
                        "{}",
                        batch_heading(&entry.display_label(), result.category)
                    )?;
                    writeln!(out, "{}", result.explanation)?;
                }
                writeln!(out, "{} calculation(s)", results.len())?;
            }
            OutputFormat::Json => {
                let records: Vec<ResultRecord<'_>> = results
                    .iter()
                    .map(|(entry, result)| ResultRecord::new(entry.label.as_deref(), result))
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &records)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Runs the calculation, approves a local payment carrying it, and
    /// writes the resulting report into `args.out`.
    fn report(
        &self,
        args: &ReportArgs,
        date: NaiveDate,
        out: &mut impl Write,
    ) -> Result<()> {
        let result = self.calculator.calculate(&args.calculation.to_input());
        let mut payment = Payment::pending(
            LOCAL_PAYMENT_ID,
            args.taxpayer.as_str(),
            Some(TaxData::from_result(&result)),
        );

        let report = payment
            .review(PaymentStatus::Approved, date)?
            .context("approved payment produced no report")?;
        debug!(reference = ?payment.report_file, "report filed");

        let path = args.out.join(report.file_name());
        fs::write(&path, report.to_string())
            .with_context(|| format!("failed to write report '{}'", path.display()))?;
        info!(path = %path.display(), taxpayer = %report.taxpayer, "report written");

        match self.format {
            OutputFormat::Text => {
                writeln!(out, "{DELIVERY_CAPTION}")?;
                writeln!(out, "{}", path.display())?;
            }
            OutputFormat::Json => {
                let value = json!({
                    "caption": DELIVERY_CAPTION,
                    "path": path.display().to_string(),
                    "report": report,
                });
                serde_json::to_writer_pretty(&mut *out, &value)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn print_schedule(
        &self,
        out: &mut impl Write,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                let text = toml::to_string_pretty(self.schedule())
                    .context("failed to render rate schedule")?;
                write!(out, "{text}")?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self.schedule())?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use gibi_core::calculate_employment;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::cli::Cli;

    fn run(
        args: &[&str],
        format: OutputFormat,
    ) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let app = App::new(&AppConfig::default(), Some(format)).unwrap();
        let mut out = Vec::new();

        app.run(&cli.command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn calculation_prints_the_breakdown() {
        let text = run(&["gibi", "employment", "--salary", "5000"], OutputFormat::Text);

        assert_eq!(text, calculate_employment(dec!(5000)).explanation_text());
    }

    #[test]
    fn format_override_beats_config() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormat::Json;

        let app = App::new(&config, Some(OutputFormat::Text)).unwrap();

        assert_eq!(app.format, OutputFormat::Text);
        assert_eq!(App::new(&config, None).unwrap().format, OutputFormat::Json);
    }

    #[test]
    fn configured_schedule_drives_calculations() {
        let mut schedule = RateSchedule::ethiopia_2026();
        schedule.plc_rate = dec!(0.25);
        let config = AppConfig {
            schedule: Some(schedule),
            ..AppConfig::default()
        };
        let app = App::new(&config, Some(OutputFormat::Json)).unwrap();
        let cli = Cli::try_parse_from(["gibi", "plc", "--sales", "100000"]).unwrap();
        let mut out = Vec::new();

        app.run(&cli.command, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        // 100000 - 15% VAT = 85000, at 25%.
        assert_eq!(value["estimated_tax"], "21250.00");
    }

    #[test]
    fn invalid_configured_schedule_is_rejected() {
        let mut schedule = RateSchedule::ethiopia_2026();
        schedule.vat_rate = dec!(15);
        let config = AppConfig {
            schedule: Some(schedule),
            ..AppConfig::default()
        };

        assert!(App::new(&config, None).is_err());
    }

    #[test]
    fn batch_json_carries_labels() {
        let dir = scratch_dir("gibi-app-batch");
        let file = dir.join("batch.csv");
        fs::write(&file, "category,label,sales\nsmall_business,Shop,100000\nplc,,\n").unwrap();

        let text = run(
            &["gibi", "batch", "--file", file.to_str().unwrap()],
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["label"], "Shop");
        assert_eq!(value[0]["period"], "annual");
        assert_eq!(value[0]["estimated_tax"], "2000.00");
        assert!(value[1].get("label").is_none());
        assert_eq!(value[1]["estimated_tax"], "0.00");
    }

    #[test]
    fn batch_text_lists_every_row() {
        let dir = scratch_dir("gibi-app-batch-text");
        let file = dir.join("batch.csv");
        fs::write(&file, "category,salary\nemployment,5000\nemployment,1500\n").unwrap();

        let text = run(
            &["gibi", "batch", "--file", file.to_str().unwrap()],
            OutputFormat::Text,
        );

        assert!(text.contains("## row 1 [Employment, monthly]"));
        assert!(text.contains("## row 2 [Employment, monthly]"));
        assert!(text.ends_with("2 calculation(s)\n"));
    }

    #[test]
    fn report_writes_dated_file_and_caption() {
        let dir = scratch_dir("gibi-app-report");
        let cli = Cli::try_parse_from([
            "gibi",
            "report",
            "--taxpayer",
            "Abebe",
            "--out",
            dir.to_str().unwrap(),
            "employment",
            "--salary",
            "5000",
        ])
        .unwrap();
        let Command::Report(args) = &cli.command else {
            panic!("expected the report command");
        };
        let app = App::new(&AppConfig::default(), Some(OutputFormat::Text)).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let mut out = Vec::new();

        app.report(args, date, &mut out).unwrap();

        let path = dir.join("Tax_Report_2026-03-14.txt");
        let report = fs::read_to_string(&path).unwrap();
        assert!(report.contains("Taxpayer: Abebe"));
        assert!(report.contains("Estimated Tax: 930.00 ETB"));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with(DELIVERY_CAPTION));
        assert!(printed.contains("Tax_Report_2026-03-14.txt"));
    }

    #[test]
    fn schedule_text_parses_back_to_the_schedule() {
        let text = run(&["gibi", "schedule"], OutputFormat::Text);

        let parsed: RateSchedule = toml::from_str(&text).unwrap();

        assert_eq!(&parsed, RateSchedule::standard());
    }

    #[test]
    fn schedule_json_lists_tables() {
        let text = run(&["gibi", "schedule"], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["pension_rate"], "0.07");
        assert_eq!(value["employment_brackets"].as_array().map(Vec::len), Some(6));
    }
}

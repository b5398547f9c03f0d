//! Drives parsed command lines through `App` with an in-memory writer.

use std::path::PathBuf;

use clap::Parser;
use gibi_cli::{app::App, cli::Cli, config::AppConfig};
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_batch.csv")
}

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).expect("arguments should parse");
    let app = App::new(&AppConfig::default(), cli.format).expect("default config is valid");
    let mut out = Vec::new();

    app.run(&cli.command, &mut out).expect("command should succeed");
    String::from_utf8(out).expect("output is UTF-8")
}

#[test]
fn employment_text_matches_reference_breakdown() {
    let text = run(&["gibi", "employment", "--salary", "5,000"]);

    let expected = "\
Monthly Employment Tax:
| Item | Amount |
|---|---|
| Gross Salary | 5000.00 ETB |
| Pension (7%) | 350.00 ETB |
| Taxable Income | 4650.00 ETB |
| Bracket | up to 7000 ETB |
| Rate | 20% |
| Estimated Tax | 930.00 ETB |
";
    assert_eq!(text, expected);
}

#[test]
fn sole_proprietor_json_applies_minimum_alternative_tax() {
    let text = run(&[
        "gibi",
        "sole-proprietor",
        "--revenue",
        "1000000",
        "--materials",
        "990000",
        "--format",
        "json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    // Profit 10000 falls in the 0% bracket; MAT is 2.5% of 1000000.
    assert_eq!(value["category"], "sole_proprietor");
    assert_eq!(value["period"], "annual");
    assert_eq!(value["estimated_tax"], "25000.00");
}

#[test]
fn blank_amounts_produce_zero_tax() {
    let text = run(&["gibi", "small-business", "--sales", "", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["estimated_tax"], "0.00");
}

#[test]
fn oversized_amounts_are_ignored_not_fatal() {
    let text = run(&[
        "gibi",
        "plc",
        "--sales",
        "1000000",
        "--salaries",
        "79228162514264337593543950335",
        "--other",
        "79228162514264337593543950335",
        "--format",
        "json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    // Both deductions are above the ceiling and count as 0.
    assert_eq!(value["estimated_tax"], "255000.00");
}

#[test]
fn batch_fixture_renders_every_row() {
    let path = fixture_path();
    let text = run(&["gibi", "batch", "--file", path.to_str().unwrap()]);

    for heading in [
        "## Abebe Kebede [Employment, monthly]",
        "## Almaz Tailoring [Sole Proprietor, annual]",
        "## Merkato Kiosk [Small Business (Category B), annual]",
        "## Blue Nile Share Co [PLC / Share Company, annual]",
        "## row 5 [Employment, monthly]",
    ] {
        assert!(text.contains(heading), "missing {heading:?} in:\n{text}");
    }
    assert!(text.ends_with("5 calculation(s)\n"));
}

#[test]
fn batch_with_missing_file_fails() {
    let cli = Cli::try_parse_from(["gibi", "batch", "--file", "/definitely/not/here.csv"]).unwrap();
    let app = App::new(&AppConfig::default(), None).unwrap();

    let err = app.run(&cli.command, &mut Vec::new()).unwrap_err();

    assert!(err.to_string().contains("failed to load batch file"));
}

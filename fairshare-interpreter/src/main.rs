mod bootstrap;
mod cli;

use std::{borrow::Cow, env, fs, io, path::Path, process};

use bootstrap::{AppConfig, init_logging};
use cli::{Command, OutputFormat, parse_args};
use fairshare_application::{SplitOutcome, SplitProcessor};
use fairshare_i18n as i18n;
use fairshare_infrastructure::{
    SplitRequestDto, TagRuleInference, TracingAuditSink, run_eval_suite,
};
use fairshare_presentation::{
    AllocationPresenter, CsvReport, EvalPresenter, SettlementPresenter, format_decode_error,
    format_split_error, summary_line,
};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let command = parse_args(env::args().skip(1)).map_err(|err| err.to_string())?;
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    tracing::debug!(
        payer_policy = ?config.payer_policy,
        tolerance = %config.tolerance,
        "Configuration loaded"
    );

    let audit = TracingAuditSink;
    let tag_rules = TagRuleInference::default();
    let processor = SplitProcessor::new(&audit)
        .with_payer_policy(config.payer_policy)
        .with_tolerance(config.tolerance);

    match command {
        Command::Eval => run_eval(&processor),
        Command::Split {
            path,
            format,
            infer_tags,
        } => {
            let processor = if infer_tags {
                processor.with_inference(&tag_rules)
            } else {
                processor
            };
            run_split(&processor, &path, format)
        }
    }
}

fn run_eval(processor: &SplitProcessor<'_>) -> CliResult<()> {
    let outcomes = run_eval_suite(processor).map_err(|err| err.to_string())?;
    println!("{}", EvalPresenter::render(&outcomes));

    let failed = outcomes.iter().filter(|outcome| !outcome.passed).count();
    if failed > 0 {
        return Err(format!("{failed} evaluation case(s) failed").into());
    }
    Ok(())
}

fn run_split(processor: &SplitProcessor<'_>, path: &Path, format: OutputFormat) -> CliResult<()> {
    let source = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;

    let dto = SplitRequestDto::from_json(&source).map_err(|err| format_decode_error(&err))?;
    let request = dto.to_request().map_err(|err| format_decode_error(&err))?;
    let outcome = processor
        .process(&request)
        .map_err(|err| format_split_error(&err))?;

    match format {
        OutputFormat::Table => {
            print_tables(&outcome);
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .map_err(|err| format!("Failed to serialize result: {err}"))?;
            println!("{json}");
            Ok(())
        }
        OutputFormat::Csv => {
            let summary = summary_line(&outcome);
            CsvReport::write(&outcome, Some(summary.as_str()), io::stdout().lock())
                .map_err(|err| format!("Failed to write CSV report: {err}").into())
        }
    }
}

fn print_tables(outcome: &SplitOutcome<'_>) {
    let allocation = AllocationPresenter::render(outcome);
    let settlement = SettlementPresenter::render(outcome);

    println!("## {}", i18n::ALLOCATION_HEADING);
    println!("{}", allocation.allocation_table);
    if !outcome.breakdowns.is_empty() {
        println!();
        println!("## {}", i18n::BREAKDOWN_HEADING);
        println!("{}", allocation.breakdown_table);
    }

    println!();
    println!("## {}", i18n::SETTLEMENT_HEADING);
    println!("{}", settlement.balance_table);
    match settlement.transfer_table {
        Some(table) => {
            println!();
            println!("{table}");
        }
        None => println!("{}", i18n::ALL_SETTLED),
    }

    println!();
    println!("{}", allocation.summary);
}

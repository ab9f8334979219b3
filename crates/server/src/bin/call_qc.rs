//! Command-line evaluation of transcript files
//!
//! The input holds one call document, one dataset item, or a list of either.
//! Output is pretty JSON on stdout or in `--output`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use call_qc_config::load_settings;
use call_qc_core::ScoringMode;
use call_qc_pipeline::CallEvaluator;
use call_qc_server::{init_tracing, unwrap_dataset_item, wrap_output, ServerError};

#[derive(Parser)]
#[command(name = "call-qc", author, version, about = "Score call transcripts against KR2.1-KR2.5", long_about = None)]
struct Cli {
    /// Transcript JSON file
    #[arg(long, short)]
    input: PathBuf,
    /// Write the result here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Scoring mode (rule, hybrid, llm); defaults to the configured mode
    #[arg(long, short)]
    mode: Option<ScoringMode>,
    /// Extra TOML settings file
    #[arg(long, short)]
    config: Option<String>,
    /// Log level for this run
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("call-qc: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let settings = load_settings(cli.config.as_deref())?;
    init_tracing(&settings.observability, cli.log_level.as_deref());

    let mode = cli.mode.unwrap_or(settings.scoring.mode);
    let evaluator = CallEvaluator::from_settings(&settings);

    let text = std::fs::read_to_string(&cli.input)?;
    let payload: Value = serde_json::from_str(&text)?;

    let result = match &payload {
        Value::Array(items) => {
            let mut documents = Vec::with_capacity(items.len());
            for item in items {
                documents.push(evaluate_item(&evaluator, item, mode).await);
            }
            Value::Array(documents)
        }
        single => evaluate_item(&evaluator, single, mode).await,
    };

    let rendered = serde_json::to_string_pretty(&result)?;
    match cli.output {
        Some(path) => std::fs::write(path, rendered + "\n")?,
        None => println!("{}", rendered),
    }
    Ok(())
}

async fn evaluate_item(evaluator: &CallEvaluator, item: &Value, mode: ScoringMode) -> Value {
    let (call, dataset_id) = unwrap_dataset_item(item);
    let evaluation = evaluator.evaluate_value(call, mode).await;
    wrap_output(evaluation.to_document(), dataset_id)
}

use crate::cli::{self, RunArgs};
use crate::exit_codes;
use crate::output;
use sonarflow::{run_pipeline, PipelineKind, SourceParams};

/// Source parameters from `--params` JSON or synthesized from `--file`.
pub fn resolve_params(kind: PipelineKind, args: &RunArgs) -> Result<serde_json::Value, String> {
    match (&args.params, &args.file) {
        (Some(raw), _) => serde_json::from_str(raw)
            .map_err(|e| format!("Invalid --params JSON: {}", e)),
        (None, Some(file)) => Ok(SourceParams::to_value(kind.schema(), file)),
        (None, None) => Err("Either --file or --params is required".to_string()),
    }
}

pub fn execute(args: RunArgs) -> i32 {
    let kind = match cli::parse_pipeline(&args.pipeline) {
        Ok(kind) => kind,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let params = match resolve_params(kind, &args) {
        Ok(params) => params,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };
    log::debug!("Pipeline {} params: {}", kind.name(), params);

    let report = match run_pipeline(kind, &params) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let text = if args.json {
        match output::to_json(&report, false) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                return exit_codes::OUTPUT_ERROR;
            }
        }
    } else {
        report.value.to_string()
    };

    if let Err(e) = output::write_output(&text, args.output.as_deref()) {
        eprintln!("Error: {}", e);
        return exit_codes::OUTPUT_ERROR;
    }
    if let Some(ref path) = args.output {
        log::info!("Result written to {}", path);
    }

    exit_codes::SUCCESS
}

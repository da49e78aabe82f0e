use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;
use serde::Serialize;
use sonarflow::{FlowError, Message, MessageIterator, Schema, SourceIterator};

#[derive(Serialize)]
struct ValidateOutput {
    file: String,
    schema: Schema,
    valid: bool,
    records: u64,
    error_line: Option<usize>,
    error: Option<String>,
}

/// Pull the whole source; stop at the first error.
fn scan(args: &ValidateArgs) -> (u64, Option<FlowError>) {
    let source = match SourceIterator::open(&args.file, args.schema.into()) {
        Ok(source) => source,
        Err(e) => return (0, Some(e)),
    };

    let mut records = 0;
    for msg in source.messages() {
        match msg {
            Ok(Message::Event { .. }) => records += 1,
            Ok(Message::StreamBeginning { .. } | Message::StreamEnd { .. }) => {}
            Err(e) => return (records, Some(e)),
        }
    }
    (records, None)
}

pub fn execute(args: ValidateArgs) -> i32 {
    let schema = Schema::from(args.schema);
    let (records, error) = scan(&args);

    let result = ValidateOutput {
        file: args.file.clone(),
        schema,
        valid: error.is_none(),
        records,
        error_line: match &error {
            Some(FlowError::Parse { line, .. }) => Some(*line),
            _ => None,
        },
        error: error.as_ref().map(|e| e.to_string()),
    };

    if args.json {
        match output::to_json(&result, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::OUTPUT_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::OUTPUT_ERROR;
            }
        }
    } else if let Some(ref err) = error {
        eprintln!("Error: {}", err);
    } else {
        println!(
            "File '{}' is valid ({} schema, {} records)",
            args.file,
            schema.name(),
            records
        );
    }

    match error {
        Some(ref e) => exit_codes::for_error(e),
        None => exit_codes::SUCCESS,
    }
}

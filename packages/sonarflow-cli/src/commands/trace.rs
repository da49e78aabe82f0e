use crate::cli::TraceArgs;
use crate::exit_codes;
use crate::output;
use sonarflow::{MessageIterator, PositionFilter, Schema, SourceIterator};

/// Source alone, or commands routed through the position filter.
fn open_stream(args: &TraceArgs) -> sonarflow::Result<Box<dyn MessageIterator>> {
    let schema = Schema::from(args.schema);
    let source = SourceIterator::open(&args.file, schema)?;
    if args.positions {
        if schema != Schema::Command {
            return Err(sonarflow::FlowError::Configuration(
                "--positions requires --schema command".to_string(),
            ));
        }
        Ok(Box::new(PositionFilter::new(source)))
    } else {
        Ok(Box::new(source))
    }
}

/// Render the whole stream. The trace is only printed once the stream has
/// reached its end, so a failing input leaves stdout empty.
pub fn execute(args: TraceArgs) -> i32 {
    let stream = match open_stream(&args) {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    let mut lines = Vec::new();
    for msg in stream.messages() {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::for_error(&e);
            }
        };

        if args.json {
            match output::to_json(&msg, true) {
                Ok(json) => lines.push(json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return exit_codes::OUTPUT_ERROR;
                }
            }
        } else {
            lines.push(msg.to_string());
        }
    }

    if let Err(e) = output::write_output(&lines.join("\n"), None) {
        eprintln!("Error: {}", e);
        return exit_codes::OUTPUT_ERROR;
    }
    exit_codes::SUCCESS
}

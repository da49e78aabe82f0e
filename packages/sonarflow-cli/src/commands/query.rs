use crate::cli::QueryArgs;
use crate::exit_codes;
use crate::output;

pub fn execute(args: QueryArgs) -> i32 {
    let params = serde_json::json!({
        "type": args.input_type,
        "input": args.input,
    });

    let info = match sonarflow::query(&args.object, &params) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::for_error(&e);
        }
    };

    match output::to_json(&info, true) {
        Ok(json) => {
            if let Err(e) = output::write_output(&json, None) {
                eprintln!("Error: {}", e);
                return exit_codes::OUTPUT_ERROR;
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::OUTPUT_ERROR
        }
    }
}

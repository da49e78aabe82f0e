use crate::cli::PipelinesArgs;
use crate::exit_codes;
use crate::output;
use serde::Serialize;
use sonarflow::PipelineKind;

#[derive(Serialize)]
struct PipelineInfo {
    name: &'static str,
    schema: &'static str,
    topology: String,
    documentation: &'static str,
}

pub fn execute(args: PipelinesArgs) -> i32 {
    let pipelines: Vec<PipelineInfo> = PipelineKind::all()
        .map(|p| PipelineInfo {
            name: p.name,
            schema: p.schema.name(),
            topology: p.topology.join(" -> "),
            documentation: p.documentation,
        })
        .collect();

    if args.json {
        match output::to_json(&pipelines, false) {
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
    } else {
        println!("Available pipelines:\n");
        println!("  {:<18} {:<8} {:<44}", "Name", "Schema", "Topology");
        println!("  {}", "-".repeat(70));
        for p in &pipelines {
            println!("  {:<18} {:<8} {:<44}", p.name, p.schema, p.topology);
        }
    }

    exit_codes::SUCCESS
}

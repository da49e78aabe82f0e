//! Pipeline definitions and wiring.

use crate::counter::RunningComparisonCounter;
use crate::error::{FlowError, Result};
use crate::filter::PositionFilter;
use crate::sink::{drive, IncreaseSink, PositionSink, Report};
use crate::source::{from_lines, Schema, SourceIterator};
use crate::window::WindowAggregator;
use serde::Serialize;

/// The linear pipelines this crate knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineKind {
    DepthIncreases,
    WindowIncreases,
    Positions,
}

/// Complete pipeline metadata
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetadata {
    pub kind: PipelineKind,
    pub name: &'static str,
    pub schema: Schema,
    pub topology: &'static [&'static str],
    pub documentation: &'static str,
}

// =============================================================================
// PIPELINE DEFINITIONS
// =============================================================================

/// Depth readings compared one by one
pub const DEPTH_INCREASES: PipelineMetadata = PipelineMetadata {
    kind: PipelineKind::DepthIncreases,
    name: "depth-increases",
    schema: Schema::Depth,
    topology: &["source", "running-comparison sink"],
    documentation: "Counts depth readings strictly greater than the previous reading.",
};

/// Depth readings compared as overlapping sums of three
pub const WINDOW_INCREASES: PipelineMetadata = PipelineMetadata {
    kind: PipelineKind::WindowIncreases,
    name: "window-increases",
    schema: Schema::Depth,
    topology: &["source", "window sink"],
    documentation: "Counts three-reading window sums strictly greater than the previous window sum.",
};

/// Commands steered into a final position
pub const POSITIONS: PipelineMetadata = PipelineMetadata {
    kind: PipelineKind::Positions,
    name: "positions",
    schema: Schema::Command,
    topology: &["source", "position filter", "position sink"],
    documentation: "Applies forward/up/down commands with aim and reports horizontal * depth.",
};

/// Registry of all pipelines
pub const PIPELINE_REGISTRY: &[PipelineMetadata] = &[DEPTH_INCREASES, WINDOW_INCREASES, POSITIONS];

impl PipelineKind {
    pub fn from_name(name: &str) -> Option<Self> {
        PIPELINE_REGISTRY
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.kind)
    }

    pub fn all() -> impl Iterator<Item = &'static PipelineMetadata> {
        PIPELINE_REGISTRY.iter()
    }

    pub fn metadata(&self) -> &'static PipelineMetadata {
        match self {
            Self::DepthIncreases => &DEPTH_INCREASES,
            Self::WindowIncreases => &WINDOW_INCREASES,
            Self::Positions => &POSITIONS,
        }
    }

    pub fn name(&self) -> &'static str {
        self.metadata().name
    }

    pub fn schema(&self) -> Schema {
        self.metadata().schema
    }
}

/// Validate `params`, open the input they name and run `kind` to completion.
pub fn run_pipeline(kind: PipelineKind, params: &serde_json::Value) -> Result<Report> {
    let source = SourceIterator::from_params(kind.schema(), params)?;
    run_source(kind, source)
}

/// Run `kind` over in-memory lines.
pub fn run_lines<I, S>(kind: PipelineKind, lines: I) -> Result<Report>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    run_source(kind, from_lines(lines, kind.schema()))
}

/// Wire `source` into the topology of `kind` and drive it.
pub fn run_source<L>(kind: PipelineKind, source: SourceIterator<L>) -> Result<Report>
where
    L: Iterator<Item = std::io::Result<String>>,
{
    if source.schema() != kind.schema() {
        return Err(FlowError::Configuration(format!(
            "pipeline {} expects a {} source, got {}",
            kind.name(),
            kind.schema().name(),
            source.schema().name()
        )));
    }

    log::info!("Running pipeline {}", kind.name());
    let name = kind.name();
    match kind {
        PipelineKind::DepthIncreases => drive(&mut IncreaseSink::new(
            name,
            source,
            RunningComparisonCounter::new(),
        )),
        PipelineKind::WindowIncreases => {
            drive(&mut IncreaseSink::new(name, source, WindowAggregator::new()))
        }
        PipelineKind::Positions => drive(&mut PositionSink::new(name, PositionFilter::new(source))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(
            PipelineKind::from_name("window-increases"),
            Some(PipelineKind::WindowIncreases)
        );
        assert_eq!(PipelineKind::from_name("WINDOW"), None);
        assert_eq!(PipelineKind::all().count(), 3);
        for meta in PipelineKind::all() {
            assert_eq!(meta.kind.metadata().name, meta.name);
        }
    }

    #[test]
    fn test_pipeline_schemas() {
        assert_eq!(PipelineKind::DepthIncreases.schema(), Schema::Depth);
        assert_eq!(PipelineKind::WindowIncreases.schema(), Schema::Depth);
        assert_eq!(PipelineKind::Positions.schema(), Schema::Command);
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let source = from_lines(["forward 1"], Schema::Command);
        assert!(matches!(
            run_source(PipelineKind::DepthIncreases, source),
            Err(FlowError::Configuration(_))
        ));
    }

    #[test]
    fn test_run_lines() {
        let report = run_lines(PipelineKind::DepthIncreases, ["1", "3", "2", "4"]).unwrap();
        assert_eq!(report.pipeline, "depth-increases");
        assert_eq!(report.value, 2);
    }

    #[test]
    fn test_run_pipeline_missing_file() {
        let params = serde_json::json!({ "inputs": ["/nonexistent/input.aoc21"] });
        assert!(matches!(
            run_pipeline(PipelineKind::Positions, &params),
            Err(FlowError::FileNotFound(_))
        ));
    }
}

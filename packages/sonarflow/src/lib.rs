pub mod counter;
pub mod error;
pub mod filter;
pub mod iterator;
pub mod message;
pub mod params;
pub mod pipeline;
pub mod query;
pub mod sink;
pub mod source;
pub mod window;

pub use counter::{IncreaseCounter, RunningComparisonCounter};
pub use error::{FlowError, Result};
pub use filter::{PositionFilter, PositionState};
pub use iterator::{MessageIterator, Messages, StreamCursor};
pub use message::{Command, Direction, Message, Payload, Position, StreamId};
pub use params::SourceParams;
pub use pipeline::{run_lines, run_pipeline, run_source, PipelineKind, PipelineMetadata};
pub use query::{query, SupportInfo};
pub use sink::{drive, Consumed, IncreaseSink, PositionSink, Report, Sink};
pub use source::{from_lines, Schema, SourceIterator};
pub use window::WindowAggregator;

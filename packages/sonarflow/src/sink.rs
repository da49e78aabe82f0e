use crate::counter::IncreaseCounter;
use crate::error::Result;
use crate::iterator::MessageIterator;
use crate::message::{Message, Payload, Position};
use serde::Serialize;

/// Final result of a drained pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub pipeline: &'static str,
    pub value: i128,
    pub events: u64,
}

/// Outcome of one consume step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consumed {
    Continue,
    Stop(Report),
}

/// Terminal component: pulls one message per [`Sink::consume`] call.
pub trait Sink {
    fn consume(&mut self) -> Result<Consumed>;
}

/// Run a sink until it reports it is done.
///
/// This loop is the only thing that pulls; nothing upstream runs unless it is
/// called. Errors from any stage abort the loop and are returned as is.
pub fn drive<S: Sink + ?Sized>(sink: &mut S) -> Result<Report> {
    loop {
        match sink.consume()? {
            Consumed::Continue => {}
            Consumed::Stop(report) => {
                log::info!(
                    "Pipeline {} finished after {} events: {}",
                    report.pipeline,
                    report.events,
                    report.value
                );
                return Ok(report);
            }
        }
    }
}

/// Feeds depth readings into an [`IncreaseCounter`].
pub struct IncreaseSink<I, C> {
    name: &'static str,
    upstream: I,
    counter: C,
    events: u64,
}

impl<I: MessageIterator, C: IncreaseCounter> IncreaseSink<I, C> {
    pub fn new(name: &'static str, upstream: I, counter: C) -> Self {
        Self {
            name,
            upstream,
            counter,
            events: 0,
        }
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }
}

impl<I: MessageIterator, C: IncreaseCounter> Sink for IncreaseSink<I, C> {
    fn consume(&mut self) -> Result<Consumed> {
        match self.upstream.next_message()? {
            Message::StreamBeginning { .. } => Ok(Consumed::Continue),
            Message::Event { payload, .. } => {
                match payload {
                    Payload::Depth { value } => {
                        self.events += 1;
                        self.counter.observe(value)?;
                    }
                    Payload::Command(_) | Payload::Position(_) => {
                        log::trace!("{} ignoring payload: {}", self.name, payload);
                    }
                }
                Ok(Consumed::Continue)
            }
            Message::StreamEnd { .. } => Ok(Consumed::Stop(Report {
                pipeline: self.name,
                value: i128::from(self.counter.count()),
                events: self.events,
            })),
        }
    }
}

/// Tracks the latest position and reports `horizontal * depth` at the end.
pub struct PositionSink<I> {
    name: &'static str,
    upstream: I,
    position: Position,
    events: u64,
}

impl<I: MessageIterator> PositionSink<I> {
    pub fn new(name: &'static str, upstream: I) -> Self {
        Self {
            name,
            upstream,
            position: Position::default(),
            events: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

impl<I: MessageIterator> Sink for PositionSink<I> {
    fn consume(&mut self) -> Result<Consumed> {
        match self.upstream.next_message()? {
            Message::StreamBeginning { .. } => Ok(Consumed::Continue),
            Message::Event {
                payload: Payload::Position(position),
                ..
            } => {
                self.events += 1;
                self.position = position;
                Ok(Consumed::Continue)
            }
            Message::Event { payload, .. } => {
                log::trace!("{} ignoring payload: {}", self.name, payload);
                Ok(Consumed::Continue)
            }
            Message::StreamEnd { .. } => Ok(Consumed::Stop(Report {
                pipeline: self.name,
                value: self.position.product()?,
                events: self.events,
            })),
        }
    }
}

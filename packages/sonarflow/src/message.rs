use crate::error::{FlowError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one stream. Every iterator mints its own and never shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(Uuid);

impl StreamId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StreamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heading of a submarine command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Up,
    Down,
}

impl Direction {
    /// Exact, lowercase token match.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "forward" => Some(Self::Forward),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// A single `<direction> <distance>` record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub direction: Direction,
    pub distance: u32,
}

/// Externally visible position. Aim is tracked by the filter and never emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub horizontal: i128,
    pub depth: i128,
}

impl Position {
    pub fn product(&self) -> Result<i128> {
        self.horizontal.checked_mul(self.depth).ok_or_else(|| {
            FlowError::Overflow(format!(
                "horizontal {} * depth {} does not fit in 128 bits",
                self.horizontal, self.depth
            ))
        })
    }
}

/// Payload of an event message. The shape is fixed per pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Depth { value: u64 },
    Command(Command),
    Position(Position),
}

/// One unit of a pulled stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    StreamBeginning { stream: StreamId },
    Event { stream: StreamId, payload: Payload },
    StreamEnd { stream: StreamId },
}

impl Message {
    pub fn stream(&self) -> StreamId {
        match self {
            Message::StreamBeginning { stream }
            | Message::Event { stream, .. }
            | Message::StreamEnd { stream } => *stream,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Message::Event { payload, .. } => Some(payload),
            Message::StreamBeginning { .. } | Message::StreamEnd { .. } => None,
        }
    }

    pub fn is_stream_end(&self) -> bool {
        matches!(self, Message::StreamEnd { .. })
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Depth { value } => write!(f, "depth = {}", value),
            Payload::Command(cmd) => write!(
                f,
                "command = {{ direction = {}, distance = {} }}",
                cmd.direction.as_str(),
                cmd.distance
            ),
            Payload::Position(pos) => write!(
                f,
                "new_position = {{ horizontal = {}, depth = {} }}",
                pos.horizontal, pos.depth
            ),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::StreamBeginning { stream } => write!(f, "[{}] stream beginning", stream),
            Message::Event { stream, payload } => write!(f, "[{}] {}", stream, payload),
            Message::StreamEnd { stream } => write!(f, "[{}] stream end", stream),
        }
    }
}

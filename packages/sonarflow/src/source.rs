use crate::error::{FlowError, Result};
use crate::iterator::{MessageIterator, StreamCursor};
use crate::message::{Command, Direction, Message, Payload, StreamId};
use crate::params::SourceParams;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Record layout of a line-oriented input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// One unsigned integer per line, e.g. `199`
    Depth,
    /// `<forward|up|down> <distance>` per line, e.g. `forward 5`
    Command,
}

impl Schema {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "depth" => Some(Self::Depth),
            "command" => Some(Self::Command),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Depth => "depth",
            Self::Command => "command",
        }
    }

    /// Parse one line into the payload this schema declares.
    pub fn parse_line(&self, line: &str) -> std::result::Result<Payload, String> {
        match self {
            Self::Depth => parse_depth(line),
            Self::Command => parse_command(line),
        }
    }
}

fn parse_depth(line: &str) -> std::result::Result<Payload, String> {
    let trimmed = line.trim();
    trimmed
        .parse::<u64>()
        .map(|value| Payload::Depth { value })
        .map_err(|_| format!("'{}' is not a valid unsigned integer", trimmed))
}

fn parse_command(line: &str) -> std::result::Result<Payload, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [direction, distance] = tokens.as_slice() else {
        return Err(format!(
            "expected '<direction> <distance>', got {} token(s) in '{}'",
            tokens.len(),
            line.trim()
        ));
    };

    let direction = Direction::from_token(direction).ok_or_else(|| {
        format!(
            "unknown direction '{}' (expected forward, up or down)",
            direction
        )
    })?;
    let distance = distance
        .parse::<u32>()
        .map_err(|_| format!("'{}' is not a valid distance", distance))?;

    Ok(Payload::Command(Command {
        direction,
        distance,
    }))
}

/// Lines of an opened input file
pub type FileLines = Lines<BufReader<File>>;

/// Turns a lazy sequence of text lines into a typed event stream.
///
/// One line is read per pull; a malformed line aborts the stream with
/// [`FlowError::Parse`] and no recovery is attempted.
pub struct SourceIterator<L> {
    lines: L,
    schema: Schema,
    cursor: StreamCursor,
    line_number: usize,
}

impl<L> SourceIterator<L>
where
    L: Iterator<Item = std::io::Result<String>>,
{
    pub fn new(lines: L, schema: Schema) -> Self {
        Self {
            lines,
            schema,
            cursor: StreamCursor::new(),
            line_number: 0,
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn stream(&self) -> StreamId {
        self.cursor.stream()
    }
}

impl SourceIterator<FileLines> {
    /// Open a file-backed source.
    pub fn open<P: AsRef<Path>>(path: P, schema: Schema) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FlowError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        log::info!("Opened {} source on {}", schema.name(), path.display());
        Ok(Self::new(BufReader::new(file).lines(), schema))
    }

    /// Validate construction parameters, then open the file they name.
    pub fn from_params(schema: Schema, params: &serde_json::Value) -> Result<Self> {
        let params = SourceParams::from_value(schema, params)?;
        Self::open(&params.path, schema)
    }
}

impl<L> MessageIterator for SourceIterator<L>
where
    L: Iterator<Item = std::io::Result<String>>,
{
    fn next_message(&mut self) -> Result<Message> {
        let lines = &mut self.lines;
        let line_number = &mut self.line_number;
        let schema = self.schema;

        self.cursor.advance(|| {
            let Some(line) = lines.next().transpose()? else {
                return Ok(None);
            };
            *line_number += 1;
            schema
                .parse_line(&line)
                .map(Some)
                .map_err(|message| FlowError::Parse {
                    line: *line_number,
                    message,
                })
        })
    }
}

/// Build a source over in-memory lines.
pub fn from_lines<I, S>(
    lines: I,
    schema: Schema,
) -> SourceIterator<impl Iterator<Item = std::io::Result<String>>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SourceIterator::new(
        lines.into_iter().map(|l| Ok::<String, std::io::Error>(l.into())),
        schema,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn collect<L>(source: SourceIterator<L>) -> Result<Vec<Message>>
    where
        L: Iterator<Item = std::io::Result<String>>,
    {
        source.messages().collect()
    }

    #[test]
    fn test_parse_depth() {
        assert_eq!(
            Schema::Depth.parse_line(" 199 \n"),
            Ok(Payload::Depth { value: 199 })
        );
        assert!(Schema::Depth.parse_line("-3").is_err());
        assert!(Schema::Depth.parse_line("abc").is_err());
        assert!(Schema::Depth.parse_line("").is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            Schema::Command.parse_line("forward 5"),
            Ok(Payload::Command(Command {
                direction: Direction::Forward,
                distance: 5
            }))
        );
        assert_eq!(
            Schema::Command.parse_line("up 3\r"),
            Ok(Payload::Command(Command {
                direction: Direction::Up,
                distance: 3
            }))
        );
    }

    #[test]
    fn test_parse_command_invalid() {
        let err = Schema::Command.parse_line("sideways 4").unwrap_err();
        assert!(err.contains("unknown direction"));
        assert!(Schema::Command.parse_line("Forward 4").is_err());
        assert!(Schema::Command.parse_line("forward").is_err());
        assert!(Schema::Command.parse_line("forward 4 2").is_err());
        assert!(Schema::Command.parse_line("down -1").is_err());
        assert!(Schema::Command.parse_line("").is_err());
    }

    #[test]
    fn test_source_emits_lifecycle_around_events() {
        let source = from_lines(["199", "200"], Schema::Depth);
        let stream = source.stream();
        let msgs = collect(source).unwrap();
        assert_eq!(
            msgs,
            vec![
                Message::StreamBeginning { stream },
                Message::Event {
                    stream,
                    payload: Payload::Depth { value: 199 }
                },
                Message::Event {
                    stream,
                    payload: Payload::Depth { value: 200 }
                },
                Message::StreamEnd { stream },
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        let msgs = collect(from_lines(Vec::<String>::new(), Schema::Command)).unwrap();
        assert_eq!(msgs.len(), 2);
        assert!(matches!(msgs[0], Message::StreamBeginning { .. }));
        assert!(msgs[1].is_stream_end());
    }

    #[test]
    fn test_exhausted_after_end() {
        let mut source = from_lines(Vec::<String>::new(), Schema::Depth);
        source.next_message().unwrap();
        source.next_message().unwrap();
        assert!(matches!(
            source.next_message(),
            Err(FlowError::IteratorExhausted)
        ));
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let mut source = from_lines(["forward 5", "sideways 4"], Schema::Command);
        source.next_message().unwrap();
        source.next_message().unwrap();
        match source.next_message() {
            Err(FlowError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("sideways"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_lines_are_pulled_lazily() {
        let mut pulled = 0;
        {
            let lines = std::iter::repeat_with(|| {
                pulled += 1;
                Ok("1".to_string())
            });
            let mut source = SourceIterator::new(lines, Schema::Depth);
            source.next_message().unwrap();
            source.next_message().unwrap();
            source.next_message().unwrap();
        }
        assert_eq!(pulled, 2);
    }

    #[test]
    fn test_open_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "forward 5").unwrap();
        writeln!(tmp, "down 5").unwrap();

        let source = SourceIterator::open(tmp.path(), Schema::Command).unwrap();
        assert_eq!(source.schema(), Schema::Command);
        assert_eq!(collect(source).unwrap().len(), 4);
    }

    #[test]
    fn test_open_missing_file() {
        let result = SourceIterator::open("/nonexistent/input.aoc21", Schema::Depth);
        assert!(matches!(result, Err(FlowError::FileNotFound(_))));
    }

    #[test]
    fn test_from_params() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "7").unwrap();
        let params = serde_json::json!({ "path": tmp.path().to_str().unwrap() });
        let source = SourceIterator::from_params(Schema::Depth, &params).unwrap();
        assert_eq!(collect(source).unwrap().len(), 3);

        let bad = serde_json::json!({ "inputs": [tmp.path().to_str().unwrap()] });
        assert!(matches!(
            SourceIterator::from_params(Schema::Depth, &bad),
            Err(FlowError::Configuration(_))
        ));
    }
}

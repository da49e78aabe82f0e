use crate::error::{FlowError, Result};
use crate::iterator::{MessageIterator, StreamCursor};
use crate::message::{Command, Direction, Message, Payload, Position, StreamId};

/// Running position plus the aim that steers depth changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionState {
    pub horizontal: i128,
    pub depth: i128,
    pub aim: i128,
}

impl PositionState {
    /// Fold one command in. The state is left untouched when a step would
    /// not fit in 128 bits.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        let distance = i128::from(command.distance);
        let overflow = || {
            FlowError::Overflow(format!(
                "applying {} {} to {:?}",
                command.direction.as_str(),
                command.distance,
                self
            ))
        };

        match command.direction {
            Direction::Forward => {
                let horizontal = self.horizontal.checked_add(distance).ok_or_else(overflow)?;
                let depth = self
                    .aim
                    .checked_mul(distance)
                    .and_then(|delta| self.depth.checked_add(delta))
                    .ok_or_else(overflow)?;
                self.horizontal = horizontal;
                self.depth = depth;
            }
            Direction::Up => self.aim = self.aim.checked_sub(distance).ok_or_else(overflow)?,
            Direction::Down => self.aim = self.aim.checked_add(distance).ok_or_else(overflow)?,
        }
        Ok(())
    }

    pub fn position(&self) -> Position {
        Position {
            horizontal: self.horizontal,
            depth: self.depth,
        }
    }
}

/// Derives a position event from every upstream command event.
///
/// The filter owns its upstream exclusively and opens its own stream; upstream
/// lifecycle messages and non-command events are consumed and dropped.
pub struct PositionFilter<U> {
    upstream: U,
    state: PositionState,
    cursor: StreamCursor,
}

impl<U: MessageIterator> PositionFilter<U> {
    pub fn new(upstream: U) -> Self {
        Self {
            upstream,
            state: PositionState::default(),
            cursor: StreamCursor::new(),
        }
    }

    pub fn state(&self) -> PositionState {
        self.state
    }

    pub fn stream(&self) -> StreamId {
        self.cursor.stream()
    }
}

impl<U: MessageIterator> MessageIterator for PositionFilter<U> {
    fn next_message(&mut self) -> Result<Message> {
        let upstream = &mut self.upstream;
        let state = &mut self.state;

        self.cursor.advance(|| loop {
            match upstream.next_message()? {
                Message::Event {
                    payload: Payload::Command(command),
                    ..
                } => {
                    state.apply(command)?;
                    return Ok(Some(Payload::Position(state.position())));
                }
                Message::StreamEnd { .. } => return Ok(None),
                skipped @ (Message::StreamBeginning { .. } | Message::Event { .. }) => {
                    log::trace!("Position filter skipping upstream message: {}", skipped);
                }
            }
        })
    }
}

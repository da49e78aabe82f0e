//! The pull protocol every component speaks.
//!
//! A [`MessageIterator`] yields exactly one `StreamBeginning`, then zero or
//! more `Event`s, then exactly one `StreamEnd`. Pulling again after the end is
//! a contract violation reported as [`FlowError::IteratorExhausted`]. Nothing is
//! computed ahead of demand: message N+1 is only built on the (N+1)-th pull.

use crate::error::{FlowError, Result};
use crate::message::{Message, Payload, StreamId};

pub trait MessageIterator {
    /// Produce the next message of the stream.
    fn next_message(&mut self) -> Result<Message>;

    /// Adapt into a std iterator that stops after `StreamEnd` or after the
    /// first error.
    fn messages(self) -> Messages<Self>
    where
        Self: Sized,
    {
        Messages {
            inner: self,
            done: false,
        }
    }
}

impl<I: MessageIterator + ?Sized> MessageIterator for Box<I> {
    fn next_message(&mut self) -> Result<Message> {
        (**self).next_message()
    }
}

pub struct Messages<I> {
    inner: I,
    done: bool,
}

impl<I: MessageIterator> Iterator for Messages<I> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.inner.next_message();
        match &item {
            Ok(msg) if msg.is_stream_end() => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(item)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Open,
    Closed,
}

/// Lifecycle bookkeeping for a single stream.
///
/// Owners hand [`StreamCursor::advance`] a closure that produces the next
/// payload, or `None` once their input is drained; the cursor wraps it in the
/// right message and refuses to go past the end.
#[derive(Debug)]
pub struct StreamCursor {
    stream: StreamId,
    phase: Phase,
}

impl StreamCursor {
    pub fn new() -> Self {
        Self {
            stream: StreamId::new(),
            phase: Phase::Pending,
        }
    }

    pub fn stream(&self) -> StreamId {
        self.stream
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    pub fn advance<F>(&mut self, produce: F) -> Result<Message>
    where
        F: FnOnce() -> Result<Option<Payload>>,
    {
        let stream = self.stream;
        match self.phase {
            Phase::Pending => {
                self.phase = Phase::Open;
                log::debug!("Stream {} beginning", stream);
                Ok(Message::StreamBeginning { stream })
            }
            Phase::Open => match produce()? {
                Some(payload) => Ok(Message::Event { stream, payload }),
                None => {
                    self.phase = Phase::Closed;
                    log::debug!("Stream {} end", stream);
                    Ok(Message::StreamEnd { stream })
                }
            },
            Phase::Closed => Err(FlowError::IteratorExhausted),
        }
    }
}

impl Default for StreamCursor {
    fn default() -> Self {
        Self::new()
    }
}

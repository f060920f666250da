use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one outstanding explanation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExplanationTicket(u64);

impl ExplanationTicket {
    fn next() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationRequest {
    pub ticket: ExplanationTicket,
    pub prompt: String,
}

/// Cached explanation for one scenario view. At most one request is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExplanationSlot {
    #[default]
    Empty,
    Pending(ExplanationTicket),
    Ready(String),
}

impl ExplanationSlot {
    /// Starts a request unless one is pending or an answer is cached.
    pub fn begin(&mut self, prompt: &str) -> Option<ExplanationRequest> {
        if !matches!(self, Self::Empty) {
            return None;
        }
        let ticket = ExplanationTicket::next();
        *self = Self::Pending(ticket);
        Some(ExplanationRequest {
            ticket,
            prompt: prompt.to_string(),
        })
    }

    /// Stores `text` if `ticket` is the pending one. Stale tickets are dropped.
    pub fn fulfil(&mut self, ticket: ExplanationTicket, text: String) -> bool {
        match self {
            Self::Pending(pending) if *pending == ticket => {
                *self = if text.trim().is_empty() {
                    Self::Empty
                } else {
                    Self::Ready(text)
                };
                matches!(self, Self::Ready(_))
            }
            _ => false,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

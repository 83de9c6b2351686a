//! Search session state machine.
//!
//! `Idle → Searching → Success | Failed`, driven only by [`SearchSession::begin`]
//! and [`SearchSession::complete`]. Each accepted search gets a new generation;
//! an outcome that arrives for an older generation is discarded so a slow
//! search can never overwrite a newer one.

use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::search::validate_term;
use crate::types::ResolvedResult;

pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching {
        generation: Generation,
        term: String,
    },
    Success {
        generation: Generation,
        term: String,
        results: Vec<ResolvedResult>,
    },
    /// `term` is kept so the search box still shows it; blank for a blank submit.
    Failed {
        generation: Generation,
        term: String,
        message: String,
    },
}

/// Whether [`SearchSession::complete`] applied or dropped an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    state: SessionState,
    latest: Generation,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            latest: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// Resubmission is disabled while a search is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Searching { .. })
    }

    pub fn results(&self) -> &[ResolvedResult] {
        match &self.state {
            SessionState::Success { results, .. } => results.as_slice(),
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// The term of the search in flight or last completed, including failed ones.
    pub fn term(&self) -> Option<&str> {
        match &self.state {
            SessionState::Searching { term, .. }
            | SessionState::Success { term, .. }
            | SessionState::Failed { term, .. } => Some(term.as_str()),
            SessionState::Idle => None,
        }
    }

    /// Start a search. Returns the generation to tag the outcome with, or
    /// `None` if the term is blank, in which case no request should be made.
    /// Either way any search still in flight is superseded.
    pub fn begin(&mut self, term: &str) -> Option<Generation> {
        self.latest += 1;
        let generation = self.latest;

        match validate_term(term) {
            Ok(term) => {
                debug!(generation, term, "Search started");
                self.state = SessionState::Searching {
                    generation,
                    term: term.to_string(),
                };
                Some(generation)
            }
            Err(e) => {
                self.state = SessionState::Failed {
                    generation,
                    term: String::new(),
                    message: e.user_message(),
                };
                None
            }
        }
    }

    /// Apply the outcome of search `generation`. Empty results are a success.
    pub fn complete(
        &mut self,
        generation: Generation,
        outcome: Result<Vec<ResolvedResult>, SearchError>,
    ) -> Applied {
        let term = match &self.state {
            SessionState::Searching {
                generation: current,
                term,
            } if *current == generation => term.clone(),
            _ => {
                info!(generation, latest = self.latest, "Discarding stale search outcome");
                return Applied::Stale;
            }
        };

        self.state = match outcome {
            Ok(results) => SessionState::Success {
                generation,
                term,
                results,
            },
            Err(e) => {
                warn!(generation, error = %e, "Search failed");
                SessionState::Failed {
                    generation,
                    term,
                    message: e.user_message(),
                }
            }
        };
        Applied::Current
    }
}

//! Transition-end bookkeeping
//!
//! Every transition registers a one-shot continuation that runs when the
//! browser reports `transitionend` on the target. Several can be in flight at
//! once (a grab that has not finished when the release starts), and a single
//! signal completes all of them in registration order. Continuations queued
//! while a batch runs wait for the next signal, as listeners added during DOM
//! dispatch do.
//!
//! Locking transitions additionally arm a fallback timer so a missing signal
//! cannot leave the widget locked forever.

use crate::options::Callback;
use crate::types::TimerId;

/// What to do once a release has settled
pub enum AfterRelease<E> {
    /// Run the callback, or the `onRelease` hook
    Notify(Option<Callback<E>>),
    /// Close immediately (Escape while grabbed)
    Close,
}

/// Work deferred until the end of a transition
pub enum Completion<E> {
    Open(Option<Callback<E>>),
    Close(Option<Callback<E>>),
    Grab(Option<Callback<E>>),
    Move(Option<Callback<E>>),
    Release(AfterRelease<E>),
}

impl<E> Completion<E> {
    pub fn name(&self) -> &'static str {
        match self {
            Completion::Open(_) => "open",
            Completion::Close(_) => "close",
            Completion::Grab(_) => "grab",
            Completion::Move(_) => "move",
            Completion::Release(_) => "release",
        }
    }

    /// Whether this completion unlocks the state machine
    pub fn is_locking(&self) -> bool {
        matches!(
            self,
            Completion::Open(_) | Completion::Close(_) | Completion::Release(_)
        )
    }
}

/// Continuations waiting for the next transition-end
pub struct PendingTransitions<E> {
    items: Vec<Completion<E>>,
    fallback: Option<TimerId>,
}

impl<E> Default for PendingTransitions<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            fallback: None,
        }
    }
}

impl<E> PendingTransitions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Names of the queued completions, oldest first
    pub fn names(&self) -> Vec<&'static str> {
        self.items.iter().map(Completion::name).collect()
    }

    /// Queue a completion. Moves fire continuously, so only the latest move
    /// completion is kept.
    pub fn push(&mut self, completion: Completion<E>) {
        if matches!(completion, Completion::Move(_)) {
            self.items.retain(|c| !matches!(c, Completion::Move(_)));
        }
        self.items.push(completion);
    }

    pub fn fallback(&self) -> Option<TimerId> {
        self.fallback
    }

    /// Replace the fallback timer, returning the previous one
    pub fn replace_fallback(&mut self, timer: TimerId) -> Option<TimerId> {
        self.fallback.replace(timer)
    }

    /// Take everything queued so far, leaving the list empty
    pub fn take(&mut self) -> (Vec<Completion<E>>, Option<TimerId>) {
        (std::mem::take(&mut self.items), self.fallback.take())
    }
}

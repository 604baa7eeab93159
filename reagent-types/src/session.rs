//! The running state of one reason-act-observe session.

use crate::message::Message;
use crate::model::ModelProfile;
use crate::tool::ToolCatalogue;

/// Why a session stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The model produced a final answer.
    FinalAnswer,
    /// `iteration` reached the profile-derived maximum.
    IterationLimit,
    /// The token estimate would exceed budget even after compression.
    ContextExhausted,
}

/// A running reason-act-observe session.
///
/// `SessionState` exclusively owns its message buffer and context estimate;
/// `profile` and `tools` are shared, read-only references into data the
/// driver borrows for the session's lifetime. Mutation only ever happens
/// through the methods below — there is no public field a caller could
/// use to violate `iteration`'s monotonicity or append out of turn order.
#[derive(Debug, Clone)]
pub struct SessionState {
    messages: Vec<Message>,
    tools: ToolCatalogue,
    profile: ModelProfile,
    iteration: u32,
    max_iterations: u32,
    token_estimate: usize,
    terminated: Option<TerminationReason>,
}

impl SessionState {
    /// Start a new session for `profile` and `tools`, bounded to
    /// `max_iterations` reason-act-observe turns.
    pub fn new(profile: ModelProfile, tools: ToolCatalogue, max_iterations: u32) -> Self {
        Self {
            messages: Vec::new(),
            tools,
            profile,
            iteration: 0,
            max_iterations,
            token_estimate: 0,
            terminated: None,
        }
    }

    /// The model profile this session was created with.
    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    /// The tool catalogue this session was created with.
    pub fn tools(&self) -> &ToolCatalogue {
        &self.tools
    }

    /// The running message buffer, in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// How many reason-act-observe turns have elapsed.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// The current estimated token footprint of `messages`.
    pub fn token_estimate(&self) -> usize {
        self.token_estimate
    }

    /// Why the session stopped, or `None` if it is still running.
    pub fn termination(&self) -> Option<TerminationReason> {
        self.terminated
    }

    /// Whether the session has terminated.
    pub fn is_terminated(&self) -> bool {
        self.terminated.is_some()
    }

    /// Append a message and update the token estimate.
    ///
    /// No-op once terminated — the buffer is append-only up to the point a
    /// session ends, never after.
    pub fn push_message(&mut self, message: Message, estimated_tokens: usize) {
        if self.is_terminated() {
            return;
        }
        self.messages.push(message);
        self.token_estimate += estimated_tokens;
    }

    /// Replace the message buffer wholesale (used by context compression)
    /// and recompute the token estimate from `new_estimate`.
    pub fn replace_messages(&mut self, messages: Vec<Message>, new_estimate: usize) {
        self.messages = messages;
        self.token_estimate = new_estimate;
    }

    /// Advance to the next iteration, terminating on the iteration limit if
    /// reached.
    pub fn advance_iteration(&mut self) {
        if self.is_terminated() {
            return;
        }
        self.iteration += 1;
        if self.iteration >= self.max_iterations {
            self.terminated = Some(TerminationReason::IterationLimit);
        }
    }

    /// Mark the session terminated for `reason`. Idempotent: the first
    /// termination reason recorded sticks.
    pub fn terminate(&mut self, reason: TerminationReason) {
        if self.terminated.is_none() {
            self.terminated = Some(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    fn session(max_iterations: u32) -> SessionState {
        SessionState::new(ModelProfile::new("default-model"), ToolCatalogue::empty(), max_iterations)
    }

    #[test]
    fn iteration_strictly_increases_and_terminates_at_limit() {
        let mut s = session(2);
        assert_eq!(s.iteration(), 0);
        s.advance_iteration();
        assert_eq!(s.iteration(), 1);
        assert!(!s.is_terminated());
        s.advance_iteration();
        assert_eq!(s.iteration(), 2);
        assert_eq!(s.termination(), Some(TerminationReason::IterationLimit));
    }

    #[test]
    fn push_after_termination_is_a_no_op() {
        let mut s = session(10);
        s.terminate(TerminationReason::FinalAnswer);
        s.push_message(Message::new(Role::User, "late"), 5);
        assert!(s.messages().is_empty());
        assert_eq!(s.token_estimate(), 0);
    }

    #[test]
    fn first_termination_reason_sticks() {
        let mut s = session(10);
        s.terminate(TerminationReason::FinalAnswer);
        s.terminate(TerminationReason::ContextExhausted);
        assert_eq!(s.termination(), Some(TerminationReason::FinalAnswer));
    }
}

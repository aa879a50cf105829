//! Interactive shell state machine
//!
//! One request in flight per session: Idle → Submitted → Waiting →
//! Rendered, and back to Idle on the next user action. Empty queries are
//! rejected locally without touching any delegate. No cancellation: a
//! submitted request runs to completion or failure.

use finagent_core::{Agent, Context};
use std::sync::Arc;

/// Fixed validation message for empty queries
pub const VALIDATION_MESSAGE: &str = "Please enter a query before submitting.";

/// Busy indicator shown while the team is working
pub const BUSY_MESSAGE: &str = "Please wait, the research team is thinking...";

/// Shell lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// Waiting for user input
    Idle,
    /// A non-empty query was accepted
    Submitted,
    /// The coordinating agent is running
    Waiting,
    /// Output is on screen; the next user action returns to Idle
    Rendered,
}

/// What one interaction produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutput {
    /// The query was rejected before any delegate was invoked
    Validation(&'static str),
    /// The team's Markdown answer
    Markdown(String),
    /// A failure message; the shell stays usable
    Error(String),
}

/// Interactive shell driving the coordinating agent
pub struct Shell {
    team: Arc<dyn Agent>,
    state: ShellState,
}

impl Shell {
    /// Create a shell over a coordinating agent
    pub fn new(team: Arc<dyn Agent>) -> Self {
        Self {
            team,
            state: ShellState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Submit one query and drive it to Rendered
    ///
    /// Empty or whitespace-only input is rejected with the fixed validation
    /// message and the state stays Idle; nothing downstream is invoked.
    /// Every failure resolves back to a rendered message, never a crash.
    pub async fn submit(&mut self, query: &str) -> ShellOutput {
        // The next user action leaves the Rendered state
        self.state = ShellState::Idle;

        if query.trim().is_empty() {
            return ShellOutput::Validation(VALIDATION_MESSAGE);
        }

        self.state = ShellState::Submitted;
        self.state = ShellState::Waiting;

        let mut context = Context::new();
        let result = self.team.process(query.to_string(), &mut context).await;

        self.state = ShellState::Rendered;

        match result {
            Ok(reply) => ShellOutput::Markdown(reply.content),
            Err(e) => ShellOutput::Error(format!("Error: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finagent_core::{AgentReply, Result as CoreResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTeam {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingTeam {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl Agent for CountingTeam {
        async fn process(&self, input: String, _ctx: &mut Context) -> CoreResult<AgentReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(finagent_core::Error::ProcessingFailed(
                    "model provider error".to_string(),
                ))
            } else {
                Ok(AgentReply::new(format!("## Answer\n\n{input}")))
            }
        }

        fn name(&self) -> &str {
            "counting-team"
        }
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_invocation() {
        let team = CountingTeam::new(false);
        let mut shell = Shell::new(team.clone());

        for query in ["", "   ", "\t\n"] {
            let output = shell.submit(query).await;
            assert_eq!(output, ShellOutput::Validation(VALIDATION_MESSAGE));
            assert_eq!(shell.state(), ShellState::Idle);
        }

        assert_eq!(team.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_query_renders_markdown() {
        let team = CountingTeam::new(false);
        let mut shell = Shell::new(team.clone());

        let output = shell.submit("AAPL price today").await;
        match output {
            ShellOutput::Markdown(md) => assert!(md.contains("AAPL price today")),
            other => panic!("expected markdown, got {other:?}"),
        }
        assert_eq!(shell.state(), ShellState::Rendered);
        assert_eq!(team.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_renders_error_and_shell_stays_usable() {
        let failing = CountingTeam::new(true);
        let mut shell = Shell::new(failing);

        let output = shell.submit("AAPL price").await;
        match output {
            ShellOutput::Error(msg) => assert!(msg.contains("model provider error")),
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(shell.state(), ShellState::Rendered);

        // The next action returns to Idle first, then runs normally
        let output = shell.submit("").await;
        assert_eq!(output, ShellOutput::Validation(VALIDATION_MESSAGE));
        assert_eq!(shell.state(), ShellState::Idle);
    }
}

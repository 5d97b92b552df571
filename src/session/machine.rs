//! Timed answer-validation state machine.

use super::feedback::Feedback;
use super::outcome::{Outcome, OutcomeKind};
use super::snapshot::SessionSnapshot;
use crate::builder::SessionBuilder;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::core::{GameStatus, StatusHistory, StatusTransition};
use crate::generator::{self, Operation};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::Uuid;

/// One player's game, owned by the UI layer.
///
/// All methods run synchronously and never block. The UI calls
/// [`submit_answer`](Self::submit_answer) on player input and
/// [`check_timeout`](Self::check_timeout) from its tick timer, then reads
/// a [`snapshot`](Self::snapshot) to render.
///
/// # Example
///
/// ```rust
/// use mindspark::{Feedback, GameSession, GameStatus};
///
/// let mut session = GameSession::builder().seed(3).build().unwrap();
/// session.start();
/// assert_eq!(session.status(), GameStatus::InProgress);
///
/// let answer = session.current_operation().unwrap().result();
/// assert_eq!(session.submit_answer(&answer.to_string()), Feedback::Correct);
/// assert_eq!(session.score(), 1);
/// assert_eq!(session.operation_index(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    id: Uuid,
    config: GameConfig,
    clock: Clock,
    rng: StdRng,
    status: GameStatus,
    operation_index: u32,
    score: u32,
    high_score: u32,
    start_time: Option<DateTime<Utc>>,
    chain_value: u64,
    current_operation: Option<Operation>,
    feedback: Option<Feedback>,
    outcome: Option<Outcome>,
    history: StatusHistory,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Session with the standard rules, wall-clock time and OS-seeded
    /// randomness.
    pub fn new() -> Self {
        Self::from_parts(
            GameConfig::default(),
            Clock::System,
            StdRng::from_os_rng(),
            0,
        )
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Assemble a session from already validated parts.
    pub(crate) fn from_parts(
        config: GameConfig,
        clock: Clock,
        rng: StdRng,
        high_score: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            clock,
            rng,
            status: GameStatus::NotStarted,
            operation_index: 0,
            score: 0,
            high_score,
            start_time: None,
            chain_value: 0,
            current_operation: None,
            feedback: None,
            outcome: None,
            history: StatusHistory::new(),
        }
    }

    /// Begin a new play-through.
    ///
    /// Resets everything except the high score and loads the first
    /// question. Calling this on an ended session is a replay; the status
    /// history restarts with it, so it only ever covers one play-through.
    pub fn start(&mut self) {
        let now = self.clock.now();

        self.id = Uuid::new_v4();
        self.operation_index = 0;
        self.score = 0;
        self.start_time = Some(now);
        self.chain_value = self.rng.random_range(self.config.seed_range());
        self.current_operation = None;
        self.feedback = None;
        self.outcome = None;
        self.history = StatusHistory::new();
        self.transition_to(GameStatus::InProgress, now);

        info!(
            session = %self.id,
            seed = self.chain_value,
            time_limit = self.config.time_limit_seconds,
            "session started"
        );

        self.advance();
    }

    /// Move to the next question, or end the session once every
    /// operation has been served.
    ///
    /// No-op unless the session is in progress.
    pub fn advance(&mut self) {
        if !self.status.accepts_input() {
            debug!(session = %self.id, status = %self.status, "advance ignored");
            return;
        }

        if self.operation_index >= self.config.total_operations {
            let now = self.clock.now();
            self.end(true, now);
            return;
        }

        self.operation_index += 1;
        let operation =
            generator::generate(self.chain_value, self.operation_index, &mut self.rng);
        debug!(
            session = %self.id,
            index = self.operation_index,
            expression = operation.expression_text(),
            "question served"
        );
        self.current_operation = Some(operation);
    }

    /// Validate a raw answer from the player.
    ///
    /// Checks run in order: session open, input present, deadline not
    /// passed, input an integer, input equal to the expected result. Only
    /// a correct answer changes score, chain value and question. Empty
    /// input leaves the session completely untouched, even past the
    /// deadline; the timer tick is what ends the game then.
    pub fn submit_answer(&mut self, raw: &str) -> Feedback {
        if !self.status.accepts_input() {
            return Feedback::SessionOver;
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Feedback::MissingInput;
        }

        if self.check_timeout(self.clock.now()) {
            return Feedback::SessionOver;
        }

        let Some(expected) = self.current_operation.as_ref().map(Operation::result) else {
            return Feedback::SessionOver;
        };

        let feedback = match trimmed.parse::<i128>() {
            Err(_) => Feedback::InvalidInput,
            Ok(answer) if answer == i128::from(expected) => Feedback::Correct,
            Ok(_) => Feedback::Incorrect {
                correct_answer: expected,
            },
        };

        debug!(
            session = %self.id,
            index = self.operation_index,
            input = trimmed,
            verdict = ?feedback,
            "answer checked"
        );
        self.feedback = Some(feedback.clone());

        if feedback.is_correct() {
            self.score += 1;
            self.chain_value = expected;
            self.advance();
        }

        feedback
    }

    /// End the session if its time budget is spent at `now`.
    ///
    /// Returns `true` when the session has timed out, either by this call
    /// or an earlier one. Before the deadline this is a pure read.
    pub fn check_timeout(&mut self, now: DateTime<Utc>) -> bool {
        match self.status {
            GameStatus::NotStarted => false,
            GameStatus::Ended => self
                .outcome
                .as_ref()
                .is_some_and(|outcome| outcome.kind == OutcomeKind::Timeout),
            GameStatus::InProgress => {
                if self.remaining(now) > Duration::zero() {
                    return false;
                }
                self.end(false, now);
                true
            }
        }
    }

    /// Close the session and record its outcome.
    ///
    /// Only acts on an in-progress session.
    fn end(&mut self, completed: bool, now: DateTime<Utc>) {
        if !self.status.accepts_input() {
            return;
        }

        let elapsed = self
            .start_time
            .map_or_else(Duration::zero, |start| now.signed_duration_since(start))
            .max(Duration::zero());

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }

        let outcome = Outcome {
            kind: if completed {
                OutcomeKind::Success
            } else {
                OutcomeKind::Timeout
            },
            completed,
            final_score: self.score,
            total_operations: self.config.total_operations,
            elapsed_seconds: elapsed.num_milliseconds() as f64 / 1000.0,
            new_high_score,
        };

        info!(
            session = %self.id,
            completed,
            score = self.score,
            high_score = self.high_score,
            elapsed = outcome.elapsed_seconds,
            "session ended"
        );

        self.outcome = Some(outcome);
        self.transition_to(GameStatus::Ended, now);
    }

    fn transition_to(&mut self, to: GameStatus, now: DateTime<Utc>) {
        let transition = StatusTransition {
            from: self.status,
            to,
            timestamp: now,
            operation_index: self.operation_index,
        };
        self.history = self.history.record(transition);
        self.status = to;
    }

    fn time_limit(&self) -> Duration {
        Duration::seconds(i64::from(self.config.time_limit_seconds))
    }

    /// Time left at `now`; negative once the deadline has passed.
    fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.start_time {
            Some(start) => self.time_limit() - now.signed_duration_since(start),
            None => self.time_limit(),
        }
    }

    /// Whole seconds left on the timer, never below zero.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u32 {
        let limit = i64::from(self.config.time_limit_seconds);
        let elapsed = match self.status {
            GameStatus::NotStarted => 0,
            GameStatus::InProgress => self
                .start_time
                .map_or(0, |start| now.signed_duration_since(start).num_seconds()),
            GameStatus::Ended => self
                .outcome
                .as_ref()
                .map_or(limit, |outcome| outcome.elapsed_seconds as i64),
        };
        u32::try_from((limit - elapsed).clamp(0, limit)).unwrap_or(0)
    }

    /// Read-only view for rendering at `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            status: self.status,
            operation_index: self.operation_index,
            total_operations: self.config.total_operations,
            score: self.score,
            high_score: self.high_score,
            expression: self
                .current_operation
                .as_ref()
                .filter(|_| self.status.accepts_input())
                .map(|operation| operation.expression_text().to_string()),
            remaining_seconds: self.remaining_seconds(now),
            time_limit_seconds: self.config.time_limit_seconds,
            feedback: self.feedback.clone(),
            outcome: self.outcome.clone(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn operation_index(&self) -> u32 {
        self.operation_index
    }

    pub fn total_operations(&self) -> u32 {
        self.config.total_operations
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Result of the last correctly answered operation, or the seed.
    pub fn chain_value(&self) -> u64 {
        self.chain_value
    }

    pub fn current_operation(&self) -> Option<&Operation> {
        self.current_operation.as_ref()
    }

    /// Most recent recorded verdict; cleared by `start`.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Status changes of the current play-through.
    pub fn history(&self) -> &StatusHistory {
        &self.history
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable access for hosts and tests driving a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn session() -> GameSession {
        GameSession::builder()
            .clock(Clock::fixed(t0()))
            .seed(42)
            .build()
            .unwrap()
    }

    fn answer(session: &GameSession) -> String {
        session.current_operation().unwrap().result().to_string()
    }

    #[test]
    fn new_session_is_not_started() {
        let session = session();
        assert_eq!(session.status(), GameStatus::NotStarted);
        assert!(session.current_operation().is_none());
        assert!(session.history().transitions().is_empty());
    }

    #[test]
    fn start_seeds_chain_and_serves_first_question() {
        let mut session = session();
        session.start();

        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.operation_index(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.start_time(), Some(t0()));
        assert!((5..=20).contains(&session.chain_value()));

        let op = session.current_operation().unwrap();
        assert_eq!(op.first_operand(), session.chain_value());
    }

    #[test]
    fn correct_answer_advances_chain() {
        let mut session = session();
        session.start();
        let expected = session.current_operation().unwrap().result();

        assert_eq!(session.submit_answer(&expected.to_string()), Feedback::Correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.chain_value(), expected);
        assert_eq!(session.operation_index(), 2);
        assert_eq!(session.feedback(), Some(&Feedback::Correct));
    }

    #[test]
    fn next_question_uses_previous_answer() {
        let mut session = session();
        session.start();
        let expected = session.current_operation().unwrap().result();
        session.submit_answer(&expected.to_string());

        let next = session.current_operation().unwrap();
        if expected > 0 {
            assert_eq!(next.first_operand(), expected);
        } else {
            assert!((1..=10).contains(&next.first_operand()));
        }
    }

    #[test]
    fn answer_tolerates_surrounding_whitespace() {
        let mut session = session();
        session.start();
        let padded = format!("  {}\n", answer(&session));
        assert_eq!(session.submit_answer(&padded), Feedback::Correct);
    }

    #[test]
    fn incorrect_answer_keeps_question() {
        let mut session = session();
        session.start();
        let expected = session.current_operation().unwrap().result();
        let before = session.current_operation().cloned();

        let feedback = session.submit_answer(&(expected + 1).to_string());
        assert_eq!(
            feedback,
            Feedback::Incorrect {
                correct_answer: expected
            }
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.operation_index(), 1);
        assert_eq!(session.current_operation().cloned(), before);

        // unlimited retries on the same question
        assert_eq!(session.submit_answer("-1"), feedback);
        assert_eq!(session.submit_answer(&expected.to_string()), Feedback::Correct);
    }

    #[test]
    fn invalid_input_is_reported() {
        let mut session = session();
        session.start();

        assert_eq!(session.submit_answer("abc"), Feedback::InvalidInput);
        assert_eq!(session.submit_answer("3.5"), Feedback::InvalidInput);
        assert_eq!(session.score(), 0);
        assert_eq!(session.operation_index(), 1);
        assert_eq!(session.feedback(), Some(&Feedback::InvalidInput));
    }

    #[test]
    fn missing_input_changes_nothing() {
        let mut session = session();
        session.start();
        session.submit_answer("abc");
        let chain = session.chain_value();

        assert_eq!(session.submit_answer(""), Feedback::MissingInput);
        assert_eq!(session.submit_answer("   "), Feedback::MissingInput);
        assert_eq!(session.feedback(), Some(&Feedback::InvalidInput));
        assert_eq!(session.chain_value(), chain);
        assert_eq!(session.operation_index(), 1);
    }

    #[test]
    fn advancing_past_last_operation_completes() {
        let mut session = session();
        session.start();
        for _ in 1..session.total_operations() {
            session.advance();
        }
        assert_eq!(session.operation_index(), 7);
        assert_eq!(session.status(), GameStatus::InProgress);

        session.advance();
        assert_eq!(session.status(), GameStatus::Ended);
        assert_eq!(session.operation_index(), 7);
        let outcome = session.outcome().unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.kind, OutcomeKind::Success);
    }

    #[test]
    fn solving_every_question_wins() {
        let mut session = session();
        session.start();
        session.clock_mut().advance(Duration::seconds(5));

        while session.status() == GameStatus::InProgress {
            let reply = answer(&session);
            assert_eq!(session.submit_answer(&reply), Feedback::Correct);
        }

        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.final_score, 7);
        assert!(outcome.new_high_score);
        assert!((outcome.elapsed_seconds - 5.0).abs() < f64::EPSILON);
        assert_eq!(session.high_score(), 7);
        assert_eq!(session.snapshot(session.clock().now()).expression, None);
    }

    #[test]
    fn timeout_ends_session() {
        let mut session = session();
        session.start();

        assert!(!session.check_timeout(t0() + Duration::seconds(29)));
        assert_eq!(session.status(), GameStatus::InProgress);

        assert!(session.check_timeout(t0() + Duration::seconds(31)));
        assert_eq!(session.status(), GameStatus::Ended);
        let outcome = session.outcome().unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.kind, OutcomeKind::Timeout);
        assert!((outcome.elapsed_seconds - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deadline_is_inclusive() {
        let mut session = session();
        session.start();
        assert!(session.check_timeout(t0() + Duration::seconds(30)));
    }

    #[test]
    fn repeated_timeout_checks_are_idempotent() {
        let mut session = session();
        session.start();
        assert!(session.check_timeout(t0() + Duration::seconds(31)));
        let outcome = session.outcome().cloned();

        assert!(session.check_timeout(t0() + Duration::seconds(40)));
        assert!(session.check_timeout(t0() + Duration::seconds(90)));
        assert_eq!(session.outcome().cloned(), outcome);
        assert_eq!(session.history().transitions().len(), 2);
    }

    #[test]
    fn ended_session_ignores_advance_and_answers() {
        let mut session = session();
        session.start();
        session.check_timeout(t0() + Duration::seconds(31));
        let index = session.operation_index();

        session.advance();
        assert_eq!(session.operation_index(), index);
        assert_eq!(session.submit_answer("12"), Feedback::SessionOver);
    }

    #[test]
    fn answer_after_deadline_times_out() {
        let mut session = session();
        session.start();
        session.clock_mut().advance(Duration::seconds(45));

        let reply = answer(&session);
        assert_eq!(session.submit_answer(&reply), Feedback::SessionOver);
        assert_eq!(session.score(), 0);
        assert_eq!(session.outcome().unwrap().kind, OutcomeKind::Timeout);
    }

    #[test]
    fn empty_input_after_deadline_leaves_session_running() {
        let mut session = session();
        session.start();
        session.clock_mut().advance(Duration::seconds(31));

        assert_eq!(session.submit_answer(""), Feedback::MissingInput);
        assert_eq!(session.submit_answer("  "), Feedback::MissingInput);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.outcome().is_none());

        // the next timer tick still ends it
        let now = session.clock().now();
        assert!(session.check_timeout(now));
        assert_eq!(session.status(), GameStatus::Ended);
    }

    #[test]
    fn not_started_session_rejects_everything() {
        let mut session = session();
        assert_eq!(session.submit_answer("5"), Feedback::SessionOver);
        assert!(!session.check_timeout(t0() + Duration::seconds(100)));
        session.advance();
        assert_eq!(session.operation_index(), 0);
        assert_eq!(session.status(), GameStatus::NotStarted);
    }

    #[test]
    fn completed_session_is_not_a_timeout() {
        let mut session = session();
        session.start();
        for _ in 0..session.total_operations() {
            session.advance();
        }
        assert_eq!(session.status(), GameStatus::Ended);
        assert!(!session.check_timeout(t0() + Duration::seconds(100)));
    }

    #[test]
    fn replay_resets_progress_but_keeps_high_score() {
        let mut session = session();
        session.start();
        let first_id = session.id();
        for _ in 0..2 {
            let reply = answer(&session);
            session.submit_answer(&reply);
        }
        session.check_timeout(t0() + Duration::seconds(31));
        assert_eq!(session.high_score(), 2);
        assert!(session.outcome().unwrap().new_high_score);

        session.start();
        assert_ne!(session.id(), first_id);
        assert_eq!(session.score(), 0);
        assert_eq!(session.operation_index(), 1);
        assert!(session.outcome().is_none());
        assert!(session.feedback().is_none());
        assert_eq!(session.high_score(), 2);

        // a worse round does not lower the high score
        session.check_timeout(t0() + Duration::seconds(31));
        assert_eq!(session.high_score(), 2);
        assert!(!session.outcome().unwrap().new_high_score);
    }

    #[test]
    fn history_tracks_lifecycle() {
        let mut session = session();
        session.start();
        session.check_timeout(t0() + Duration::seconds(31));

        assert_eq!(
            session.history().path(),
            vec![GameStatus::NotStarted, GameStatus::InProgress, GameStatus::Ended]
        );
        assert_eq!(session.history().duration(), Some(std::time::Duration::from_secs(31)));
    }

    #[test]
    fn replay_starts_a_fresh_history() {
        let mut session = session();
        for _ in 0..1000 {
            session.start();
            let now = session.clock().now();
            session.check_timeout(now + Duration::seconds(30));
        }

        assert_eq!(session.history().transitions().len(), 2);
        assert_eq!(
            session.history().path(),
            vec![GameStatus::Ended, GameStatus::InProgress, GameStatus::Ended]
        );
    }

    #[test]
    fn remaining_seconds_counts_down_whole_seconds() {
        let mut session = session();
        assert_eq!(session.remaining_seconds(t0()), 30);

        session.start();
        assert_eq!(session.remaining_seconds(t0()), 30);
        assert_eq!(session.remaining_seconds(t0() + Duration::milliseconds(1_500)), 29);
        assert_eq!(session.remaining_seconds(t0() + Duration::seconds(45)), 0);

        session.check_timeout(t0() + Duration::seconds(31));
        assert_eq!(session.remaining_seconds(t0() + Duration::seconds(60)), 0);
    }

    #[test]
    fn snapshot_reflects_progress() {
        let mut session = session();
        session.start();
        let snapshot = session.snapshot(t0() + Duration::seconds(10));

        assert_eq!(snapshot.status, GameStatus::InProgress);
        assert_eq!(snapshot.operation_index, 1);
        assert_eq!(snapshot.total_operations, 7);
        assert_eq!(snapshot.remaining_seconds, 20);
        assert_eq!(
            snapshot.expression.as_deref(),
            Some(session.current_operation().unwrap().expression_text())
        );
        assert_eq!(snapshot.session_id, session.id());
    }
}

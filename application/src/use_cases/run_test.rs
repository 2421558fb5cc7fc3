//! Run Test use case — the execution engine.
//!
//! Drives one complete test pass over a [`TestPlan`]: acquires a usable
//! session, opens the selected channel, then for each topic and question
//! performs one exchange (send, await, score, record) and keeps the report
//! document continuously up to date.
//!
//! Per-exchange failures (send errors, reply timeouts, scoring outages) are
//! absorbed into recorded results and the run continues; only session and
//! configuration failures make the run fail as a whole.

use crate::ports::channel::{AdapterError, ChannelAdapter, ChannelGateway};
use crate::ports::progress::{NoProgress, RunProgress};
use crate::ports::report_renderer::{NoRenderer, ReportRenderer};
use crate::ports::report_store::ReportStore;
use crate::ports::scoring_gateway::ScoringGateway;
use crate::use_cases::session_manager::{SessionError, SessionManager};
use chatcheck_domain::{
    normalize_whitespace, slugify, truncate_str, Channel, ChartEntry, DomainError, ExchangePhase,
    ExchangeResult, Judgment, Pacing, Question, RunOutcome, RunState, RunSummary, Session,
    TestPlan, Topic, Verdict, VerdictPolicy, WaitPolicy, NO_REPLY_SENTINEL,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Settle delay after the initial greeting, before the first topic.
const GREETING_SETTLE: Duration = Duration::from_secs(5);

/// Errors that end the whole run (`RunFailed`).
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Could not open channel: {0}")]
    ChannelOpen(AdapterError),

    #[error("Run state error: {0}")]
    State(#[from] DomainError),
}

/// Input for the [`RunTestUseCase`].
#[derive(Clone)]
pub struct RunTestInput {
    /// The loaded, immutable test plan.
    pub plan: TestPlan,
    /// Channel under test, fixed for the run.
    pub channel: Channel,
    /// Endpoint/identity on that channel (URL, bot username, handle, page id).
    pub target: String,
    /// Tester identity recorded into the summary.
    pub tester: String,
    /// Optional greeting sent once before the first topic.
    pub greeting: Option<String>,
    /// Run identity; also names the report document.
    pub run_id: String,
    /// Reply wait budget handed to the adapter per exchange.
    pub wait_policy: WaitPolicy,
    /// Inter-message pacing.
    pub pacing: Pacing,
    /// Pass/fail classification.
    pub verdict_policy: VerdictPolicy,
}

impl RunTestInput {
    /// Build an input with the channel's default policies.
    pub fn new(
        plan: TestPlan,
        channel: Channel,
        target: impl Into<String>,
        tester: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            plan,
            channel,
            target: target.into(),
            tester: tester.into(),
            greeting: None,
            run_id: run_id.into(),
            wait_policy: channel.wait_policy(),
            pacing: if channel == Channel::Webchat {
                Pacing::webchat()
            } else {
                Pacing::none()
            },
            verdict_policy: channel.verdict_policy(),
        }
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    pub fn with_wait_policy(mut self, policy: WaitPolicy) -> Self {
        self.wait_policy = policy;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_verdict_policy(mut self, policy: VerdictPolicy) -> Self {
        self.verdict_policy = policy;
        self
    }
}

/// Use case for running one complete test pass.
pub struct RunTestUseCase {
    gateway: Arc<dyn ChannelGateway>,
    scoring: Arc<dyn ScoringGateway>,
    store: Arc<dyn ReportStore>,
    renderer: Arc<dyn ReportRenderer>,
    progress: Arc<dyn RunProgress>,
    session_manager: Option<Arc<SessionManager>>,
}

impl RunTestUseCase {
    pub fn new(
        gateway: Arc<dyn ChannelGateway>,
        scoring: Arc<dyn ScoringGateway>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            gateway,
            scoring,
            store,
            renderer: Arc::new(NoRenderer),
            progress: Arc::new(NoProgress),
            session_manager: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn RunProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Attach a session manager for channels that reuse stored sessions.
    pub fn with_session_manager(mut self, manager: Arc<SessionManager>) -> Self {
        self.session_manager = Some(manager);
        self
    }

    /// Execute the full run.
    ///
    /// Returns the final counters; the report document on disk reflects
    /// every exchange completed so far at any point during execution.
    pub async fn execute(&self, input: RunTestInput) -> Result<RunOutcome, RunError> {
        let mut state = RunState::Idle;

        // Idle -> SessionReady requires a usable session and an open channel;
        // failure here is terminal for the run.
        let session = match self.establish_session(&input).await {
            Ok(session) => session,
            Err(e) => {
                self.advance_unchecked(&mut state, RunState::RunFailed);
                return Err(e);
            }
        };
        let mut adapter = match self.gateway.open(session.as_ref()).await {
            Ok(adapter) => adapter,
            Err(e) => {
                self.advance_unchecked(&mut state, RunState::RunFailed);
                return Err(RunError::ChannelOpen(e));
            }
        };
        self.advance(&mut state, RunState::SessionReady)?;

        // Start from the empty skeleton: a stale document for the same run
        // name would corrupt the counters.
        if let Err(e) = self.store.reset() {
            warn!(error = %e, "could not reset previous report document");
        }

        if let Some(greeting) = &input.greeting {
            debug!(greeting = %greeting, "sending initial greeting");
            if let Err(e) = adapter.send(greeting).await {
                warn!(error = %e, "greeting was not delivered");
            } else {
                tokio::time::sleep(GREETING_SETTLE).await;
            }
        }

        let started_at = Utc::now();
        let run_timer = Instant::now();
        let mut outcome = RunOutcome::default();

        for topic in input.plan.topics() {
            self.advance(&mut state, RunState::TopicActive)?;
            self.progress
                .on_topic_started(topic.title(), topic.ordinal(), input.plan.topic_count());

            if input.channel.resets_context_per_topic() {
                if let Err(e) = adapter.reset_context().await {
                    warn!(topic = topic.title(), error = %e, "context reset failed");
                }
            }

            let topic_timer = Instant::now();
            let mut asked_in_topic = 0usize;

            for question in topic.questions() {
                let result = self
                    .run_exchange(adapter.as_mut(), &input, topic, question, &mut state)
                    .await?;
                outcome.record(result.status.is_pass());
                self.record(&input, started_at, &outcome, result);
                self.advance(&mut state, RunState::QuestionActive(ExchangePhase::Recorded))?;

                asked_in_topic += 1;
                if input.pacing.refresh_every > 0
                    && asked_in_topic % input.pacing.refresh_every == 0
                {
                    tokio::time::sleep(input.pacing.cool_down).await;
                    if let Err(e) = adapter.reset_context().await {
                        warn!(error = %e, "periodic context reset failed");
                    }
                }
            }

            let topic_duration = topic_timer.elapsed();
            self.advance(&mut state, RunState::TopicComplete)?;
            if let Err(e) = self.store.append_chart_entry(&ChartEntry {
                title: topic.title().to_string(),
                duration_ms: topic_duration.as_millis() as u64,
            }) {
                warn!(topic = topic.title(), error = %e, "chart entry not persisted");
            }
            self.progress.on_topic_completed(topic.title(), topic_duration);
            info!(
                topic = topic.title(),
                duration_ms = topic_duration.as_millis() as u64,
                "topic complete"
            );
        }

        self.advance(&mut state, RunState::RunComplete)?;
        let ended_at = Utc::now();
        if let Err(e) = self.store.finalize(ended_at, run_timer.elapsed()) {
            warn!(error = %e, "run summary not finalized");
        }
        self.render();
        self.progress.on_run_completed(&outcome);
        info!(
            attempted = outcome.attempted,
            passed = outcome.passed,
            failed = outcome.failed,
            "run complete"
        );
        Ok(outcome)
    }

    /// Acquire a session for channels that need one.
    async fn establish_session(&self, input: &RunTestInput) -> Result<Option<Session>, RunError> {
        if !input.channel.needs_session() {
            return Ok(None);
        }
        let manager = self.session_manager.as_ref().ok_or_else(|| {
            RunError::Session(SessionError::Login(
                crate::ports::login_flow::LoginError::MissingCredentials(format!(
                    "channel {} requires a session manager",
                    input.channel
                )),
            ))
        })?;
        Ok(Some(manager.acquire().await?))
    }

    /// One send/await/score cycle. Send failures skip the Awaiting/Scored
    /// phases and yield a terminal-failure result directly.
    async fn run_exchange(
        &self,
        adapter: &mut dyn ChannelAdapter,
        input: &RunTestInput,
        topic: &Topic,
        question: &Question,
        state: &mut RunState,
    ) -> Result<ExchangeResult, RunError> {
        let timer = Instant::now();
        self.advance(state, RunState::QuestionActive(ExchangePhase::Sent))?;
        debug!(
            question = question.key(),
            text = truncate_str(question.text(), 80).as_str(),
            "sending question"
        );

        if let Err(e) = adapter.send(question.text()).await {
            warn!(question = question.key(), error = %e, "send failed, recording and continuing");
            let result = self.build_result(
                topic,
                question,
                String::new(),
                Verdict::Error,
                Judgment::degraded(format!("send failed: {}", e)),
                timer.elapsed(),
                None,
            );
            return Ok(result);
        }

        self.advance(state, RunState::QuestionActive(ExchangePhase::Awaiting))?;
        let actual = match adapter.await_reply(input.wait_policy).await {
            Ok(Some(reply)) => normalize_whitespace(&reply),
            Ok(None) => {
                debug!(question = question.key(), "no reply within budget");
                NO_REPLY_SENTINEL.to_string()
            }
            Err(e) => {
                warn!(question = question.key(), error = %e, "await failed, substituting sentinel");
                NO_REPLY_SENTINEL.to_string()
            }
        };

        let artifact = if input.channel.supports_artifacts() {
            adapter.capture_artifact(&slugify(question.text())).await
        } else {
            None
        };

        let judgment = match self.scoring.score(&actual, question.expected()).await {
            Ok(judgment) => judgment,
            Err(e) => {
                warn!(question = question.key(), error = %e, "scoring degraded");
                Judgment::degraded(e)
            }
        };
        self.advance(state, RunState::QuestionActive(ExchangePhase::Scored))?;

        let verdict = input
            .verdict_policy
            .classify(judgment.score, &actual, question.expected());
        let result = self.build_result(
            topic,
            question,
            actual,
            verdict,
            judgment,
            timer.elapsed(),
            artifact,
        );
        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_result(
        &self,
        topic: &Topic,
        question: &Question,
        actual: String,
        status: Verdict,
        judgment: Judgment,
        duration: Duration,
        artifact: Option<String>,
    ) -> ExchangeResult {
        ExchangeResult {
            no: topic.ordinal(),
            title: topic.title().to_string(),
            question_key: question.key().to_string(),
            question: question.text().to_string(),
            expected: question.expected().to_string(),
            actual,
            status,
            score: judgment.score,
            explanation: judgment.explanation,
            duration_ms: duration.as_millis() as u64,
            artifact,
        }
    }

    /// Persist one exchange, recompute the summary wholesale, and trigger a
    /// re-render. Store failures are absorbed: the durable report may lag
    /// behind execution but the run never aborts over them.
    fn record(
        &self,
        input: &RunTestInput,
        started_at: DateTime<Utc>,
        outcome: &RunOutcome,
        result: ExchangeResult,
    ) {
        if let Err(e) = self.store.append_exchange(&result) {
            warn!(question = result.question_key.as_str(), error = %e, "exchange not persisted");
        }
        let summary = RunSummary::new(
            &input.run_id,
            &input.tester,
            self.scoring.provenance(),
            &input.channel.metadata(&input.target),
            started_at,
            input.plan.topic_count(),
            input.plan.question_count(),
            outcome.passed,
            outcome.failed,
        );
        if let Err(e) = self.store.replace_summary(&summary) {
            warn!(error = %e, "summary not persisted");
        }
        self.render();
        self.progress.on_exchange_recorded(&result);
    }

    fn render(&self) {
        if let Err(e) = self.renderer.render(self.store.document_path()) {
            warn!(error = %e, "report render failed");
        }
    }

    fn advance(&self, state: &mut RunState, next: RunState) -> Result<(), RunError> {
        *state = state.transition(next)?;
        self.progress.on_state(*state);
        Ok(())
    }

    fn advance_unchecked(&self, state: &mut RunState, next: RunState) {
        *state = next;
        self.progress.on_state(*state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::report_store::ReportStoreError;
    use crate::ports::scoring_gateway::ScoringError;
    use async_trait::async_trait;
    use chatcheck_domain::Report;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Adapter double whose behavior is scripted per question text.
    struct ScriptedAdapter {
        /// Reply returned for the last sent question, or `None` to time out.
        reply_for: fn(&str) -> Option<String>,
        /// Artifact reference returned for a capture slug.
        artifact_for: fn(&str) -> Option<String>,
        fail_sends: bool,
        sent: Arc<Mutex<Vec<String>>>,
        resets: Arc<AtomicUsize>,
    }

    impl Default for ScriptedAdapter {
        fn default() -> Self {
            Self {
                reply_for: |_| None,
                artifact_for: |_| None,
                fail_sends: false,
                sent: Arc::default(),
                resets: Arc::default(),
            }
        }
    }

    #[async_trait]
    impl ChannelAdapter for ScriptedAdapter {
        async fn send(&mut self, text: &str) -> Result<(), AdapterError> {
            if self.fail_sends {
                return Err(AdapterError::Send("boom".to_string()));
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn await_reply(
            &mut self,
            _policy: WaitPolicy,
        ) -> Result<Option<String>, AdapterError> {
            let last = self.sent.lock().unwrap().last().cloned().unwrap_or_default();
            Ok((self.reply_for)(&last))
        }

        async fn capture_artifact(&mut self, slug: &str) -> Option<String> {
            (self.artifact_for)(slug)
        }

        async fn reset_context(&mut self) -> Result<(), AdapterError> {
            self.resets.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct ScriptedGateway {
        adapter: Mutex<Option<ScriptedAdapter>>,
    }

    impl ScriptedGateway {
        fn new(adapter: ScriptedAdapter) -> Arc<Self> {
            Arc::new(Self {
                adapter: Mutex::new(Some(adapter)),
            })
        }
    }

    #[async_trait]
    impl ChannelGateway for ScriptedGateway {
        fn channel(&self) -> Channel {
            Channel::Webchat
        }

        async fn open(
            &self,
            _session: Option<&Session>,
        ) -> Result<Box<dyn ChannelAdapter>, AdapterError> {
            let adapter = self
                .adapter
                .lock()
                .unwrap()
                .take()
                .ok_or(AdapterError::TransportClosed)?;
            Ok(Box::new(adapter))
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl ChannelGateway for FailingGateway {
        fn channel(&self) -> Channel {
            Channel::Webchat
        }

        async fn open(
            &self,
            _session: Option<&Session>,
        ) -> Result<Box<dyn ChannelAdapter>, AdapterError> {
            Err(AdapterError::Connection("offline".to_string()))
        }
    }

    /// Scorer that gives 100 to exact matches, 10 otherwise, and can be
    /// scripted to fail on the nth call.
    struct MatchScorer {
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    impl MatchScorer {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_on_call: None,
            })
        }

        fn failing_on(call: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_on_call: Some(call),
            })
        }
    }

    #[async_trait]
    impl ScoringGateway for MatchScorer {
        async fn score(&self, actual: &str, expected: &str) -> Result<Judgment, ScoringError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on_call == Some(call) {
                return Err(ScoringError::Unreachable("gateway down".to_string()));
            }
            let score = if actual == expected { 100.0 } else { 10.0 };
            Ok(Judgment {
                score,
                label: if score >= 70.0 { "Pass" } else { "Fail" }.to_string(),
                explanation: "scripted".to_string(),
                provenance: "test-judge".to_string(),
            })
        }

        fn provenance(&self) -> &str {
            "test-judge"
        }
    }

    /// In-memory store implementing the same read-modify-write discipline.
    struct MemoryStore {
        report: Mutex<Report>,
        path: PathBuf,
    }

    impl MemoryStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                report: Mutex::new(Report::skeleton()),
                path: PathBuf::from("memory.json"),
            })
        }

        fn snapshot(&self) -> Report {
            self.report.lock().unwrap().clone()
        }
    }

    impl ReportStore for MemoryStore {
        fn reset(&self) -> Result<(), ReportStoreError> {
            *self.report.lock().unwrap() = Report::skeleton();
            Ok(())
        }

        fn append_exchange(&self, result: &ExchangeResult) -> Result<(), ReportStoreError> {
            self.report.lock().unwrap().data.push(result.clone());
            Ok(())
        }

        fn replace_summary(&self, summary: &RunSummary) -> Result<(), ReportStoreError> {
            self.report.lock().unwrap().replace_summary(summary.clone());
            Ok(())
        }

        fn append_chart_entry(&self, entry: &ChartEntry) -> Result<(), ReportStoreError> {
            self.report.lock().unwrap().chart.push(entry.clone());
            Ok(())
        }

        fn finalize(
            &self,
            ended_at: DateTime<Utc>,
            duration: Duration,
        ) -> Result<(), ReportStoreError> {
            if let Some(summary) = self.report.lock().unwrap().summary.first_mut() {
                summary.finalize(ended_at, duration);
            }
            Ok(())
        }

        fn document_path(&self) -> &Path {
            &self.path
        }
    }

    struct CountingRenderer {
        renders: AtomicUsize,
    }

    impl ReportRenderer for CountingRenderer {
        fn render(
            &self,
            json_path: &Path,
        ) -> Result<PathBuf, crate::ports::report_renderer::RenderError> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            Ok(json_path.to_path_buf())
        }
    }

    fn plan(questions_per_topic: &[&[(&str, &str)]]) -> TestPlan {
        let topics = questions_per_topic
            .iter()
            .enumerate()
            .map(|(i, qs)| {
                Topic::new(
                    i + 1,
                    format!("Topic {}", i + 1),
                    qs.iter()
                        .enumerate()
                        .filter_map(|(j, (q, e))| {
                            Question::try_new(format!("question{}", j + 1), *q, *e, "")
                        })
                        .collect(),
                )
            })
            .collect();
        TestPlan::new(topics).unwrap()
    }

    fn input(plan: TestPlan) -> RunTestInput {
        RunTestInput::new(plan, Channel::Webchat, "https://example.test", "tester", "run-1")
            .with_pacing(Pacing::none())
    }

    fn echo_adapter() -> ScriptedAdapter {
        ScriptedAdapter {
            reply_for: |_| Some("echo".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_all_matching_replies_pass() {
        // Adapter echoes the expected answer for all three questions
        let adapter = ScriptedAdapter {
            reply_for: |_| Some("the answer".to_string()),
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::new(),
            store.clone(),
        );

        let outcome = use_case
            .execute(input(plan(&[&[
                ("q one", "the answer"),
                ("q two", "the answer"),
                ("q three", "the answer"),
            ]])))
            .await
            .unwrap();

        assert_eq!(outcome.passed, 3);
        assert_eq!(outcome.failed, 0);
        let report = store.snapshot();
        assert_eq!(report.data.len(), 3);
        assert!(report.data.iter().all(|r| r.status == Verdict::Pass));
        assert_eq!(report.chart.len(), 1);
        assert_eq!(report.summary[0].passed, 3);
        assert!(report.is_consistent());
    }

    #[tokio::test]
    async fn test_results_recorded_in_execution_order() {
        let adapter = echo_adapter();
        let store = MemoryStore::new();
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::new(),
            store.clone(),
        );

        use_case
            .execute(input(plan(&[
                &[("a1", "x"), ("a2", "x")],
                &[("b1", "x")],
            ])))
            .await
            .unwrap();

        let report = store.snapshot();
        let questions: Vec<_> = report.data.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["a1", "a2", "b1"]);
        assert_eq!(report.chart.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_questions_never_count() {
        let adapter = echo_adapter();
        let store = MemoryStore::new();
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::new(),
            store.clone(),
        );

        let outcome = use_case
            .execute(input(plan(&[&[("real", "x"), ("", "x"), ("  ", "x")]])))
            .await
            .unwrap();

        assert_eq!(outcome.attempted, 1);
        assert_eq!(store.snapshot().data.len(), 1);
    }

    #[tokio::test]
    async fn test_timeouts_produce_sentinel_not_abort() {
        // Adapter never replies
        let adapter = ScriptedAdapter {
            reply_for: |_| None,
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::new(),
            store.clone(),
        );

        let outcome = use_case
            .execute(input(plan(&[&[("q1", "a"), ("q2", "b"), ("q3", "c")]])))
            .await
            .unwrap();

        assert_eq!(outcome.attempted, 3);
        let report = store.snapshot();
        assert_eq!(report.data.len(), 3);
        assert!(report
            .data
            .iter()
            .all(|r| r.actual == NO_REPLY_SENTINEL && r.status == Verdict::Fail));
    }

    #[tokio::test]
    async fn test_send_failure_records_error_and_continues() {
        let adapter = ScriptedAdapter {
            fail_sends: true,
            reply_for: |_| None,
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::new(),
            store.clone(),
        );

        let outcome = use_case
            .execute(input(plan(&[&[("q1", "a"), ("q2", "b")]])))
            .await
            .unwrap();

        assert_eq!(outcome.attempted, 2);
        let report = store.snapshot();
        assert!(report
            .data
            .iter()
            .all(|r| r.status == Verdict::Error && r.actual.is_empty()));
        assert!(report.is_consistent());
    }

    #[tokio::test]
    async fn test_scoring_outage_degrades_single_exchange() {
        let adapter = ScriptedAdapter {
            reply_for: |_| Some("matching answer".to_string()),
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::failing_on(2),
            store.clone(),
        );

        let outcome = use_case
            .execute(input(plan(&[&[
                ("q1", "matching answer"),
                ("q2", "matching answer"),
            ]])))
            .await
            .unwrap();

        assert_eq!(outcome.attempted, 2);
        let report = store.snapshot();
        assert_eq!(report.data.len(), 2);
        assert_eq!(report.data[0].status, Verdict::Pass);
        // Degraded zero score classifies as Fail, never crashes the run
        assert_eq!(report.data[1].status, Verdict::Fail);
        assert_eq!(report.data[1].score, 0.0);
        assert!(report.data[1].explanation.contains("Scoring unavailable"));
    }

    #[tokio::test]
    async fn test_summary_counters_match_data_after_every_exchange() {
        let adapter = ScriptedAdapter {
            reply_for: |q| {
                if q.contains("pass") {
                    Some("yes".to_string())
                } else {
                    Some("nope".to_string())
                }
            },
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::new(),
            store.clone(),
        );

        use_case
            .execute(input(plan(&[&[("pass one", "yes"), ("fail one", "yes")]])))
            .await
            .unwrap();

        let report = store.snapshot();
        assert!(report.is_consistent());
        assert_eq!(report.summary[0].passed, 1);
        assert_eq!(report.summary[0].failed, 1);
        assert!(report.summary[0].end_time.is_some());
    }

    #[tokio::test]
    async fn test_renderer_invoked_per_exchange_and_finalize() {
        let adapter = echo_adapter();
        let store = MemoryStore::new();
        let renderer = Arc::new(CountingRenderer {
            renders: AtomicUsize::new(0),
        });
        let use_case = RunTestUseCase::new(
            ScriptedGateway::new(adapter),
            MatchScorer::new(),
            store,
        )
        .with_renderer(renderer.clone());

        use_case
            .execute(input(plan(&[&[("q1", "a"), ("q2", "b")]])))
            .await
            .unwrap();

        // One render per exchange plus the finalize render
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_channel_open_failure_fails_run() {
        let store = MemoryStore::new();
        let use_case =
            RunTestUseCase::new(Arc::new(FailingGateway), MatchScorer::new(), store.clone());

        let result = use_case.execute(input(plan(&[&[("q1", "a")]]))).await;
        assert!(matches!(result, Err(RunError::ChannelOpen(_))));
        assert!(store.snapshot().data.is_empty());
    }

    #[tokio::test]
    async fn test_webchat_resets_context_per_topic() {
        let resets = Arc::new(AtomicUsize::new(0));
        let adapter = ScriptedAdapter {
            reply_for: |_| Some("r".to_string()),
            resets: resets.clone(),
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case =
            RunTestUseCase::new(ScriptedGateway::new(adapter), MatchScorer::new(), store);

        use_case
            .execute(input(plan(&[&[("a", "x")], &[("b", "x")]])))
            .await
            .unwrap();

        assert_eq!(resets.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_periodic_refresh_within_topic() {
        let resets = Arc::new(AtomicUsize::new(0));
        let adapter = ScriptedAdapter {
            reply_for: |_| Some("r".to_string()),
            resets: resets.clone(),
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case =
            RunTestUseCase::new(ScriptedGateway::new(adapter), MatchScorer::new(), store.clone());

        let pacing = Pacing {
            cool_down: Duration::ZERO,
            refresh_every: 2,
        };
        let outcome = use_case
            .execute(
                input(plan(&[&[("q1", "x"), ("q2", "x"), ("q3", "x"), ("q4", "x")]]))
                    .with_pacing(pacing),
            )
            .await
            .unwrap();

        assert_eq!(outcome.attempted, 4);
        // One reset on topic entry plus one after every second question
        assert_eq!(resets.load(Ordering::SeqCst), 3);
        assert_eq!(store.snapshot().data.len(), 4);
    }

    #[tokio::test]
    async fn test_artifact_reference_recorded() {
        let adapter = ScriptedAdapter {
            reply_for: |_| Some("r".to_string()),
            artifact_for: |slug| Some(format!("shots/{}.png", slug)),
            ..Default::default()
        };
        let store = MemoryStore::new();
        let use_case =
            RunTestUseCase::new(ScriptedGateway::new(adapter), MatchScorer::new(), store.clone());

        use_case
            .execute(input(plan(&[&[("What is up", "x")]])))
            .await
            .unwrap();

        let report = store.snapshot();
        assert_eq!(
            report.data[0].artifact.as_deref(),
            Some("shots/what-is-up.png")
        );
    }
}

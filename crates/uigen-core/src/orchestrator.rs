//! Pipeline orchestrator
//!
//! Sequences generation, critique, validation and export for one
//! conversation. Each run walks the [`PipelineState`] table; every stage
//! entry appends one message to the conversation history before the stage
//! is invoked.
//!
//! Only two outcomes halt a run early: a generation failure and a critical
//! accessibility violation. Critique findings, critique panics and export
//! failures are recorded and the run continues.

use crate::config::{PipelineConfig, StylePreferences};
use crate::context::{ConversationContext, ConversationId};
use crate::critique::{self, Critic, CritiqueResult};
use crate::error::{ErrorCode, PipelineError, Stage, StageError};
use crate::generation::{GenerationRequest, Generator, RequestKind};
use crate::state::{validate_transition, PipelineState};
use crate::validation::{self, ValidationResult, Validator};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uigen_registry::{ComponentRegistry, ProviderSet};
use uigen_spec::{
    AccessibilityReport, DesignFeedback, ExportPackage, MessageLog, PipelineMessage, Role,
    Severity, Specification,
};

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// A specification exists and no fatal error was recorded
    pub success: bool,
    /// Final state (`Done` or `Errored`)
    pub state: PipelineState,
    /// Current specification at the end of the run
    pub specification: Option<Specification>,
    /// Critique output, if critique ran
    pub feedback: Option<DesignFeedback>,
    /// Validation output, if validation ran
    pub report: Option<AccessibilityReport>,
    /// Export output, if export ran and succeeded
    pub export: Option<ExportPackage>,
    /// Every error recorded during the run
    pub errors: Vec<StageError>,
    /// Messages appended during this run
    pub messages: Vec<PipelineMessage>,
    /// Wall-clock duration
    pub duration_ms: u64,
}

impl PipelineResult {
    /// First recorded error with a code
    #[must_use]
    pub fn error(&self, code: ErrorCode) -> Option<&StageError> {
        self.errors.iter().find(|e| e.code == code)
    }

    /// True if a critical accessibility violation halted the run
    #[inline]
    #[must_use]
    pub fn blocked_by_accessibility(&self) -> bool {
        self.error(ErrorCode::AccessibilityBlocking).is_some()
    }
}

/// Mutable bookkeeping for a single run
struct Run {
    state: PipelineState,
    started: Instant,
    history_mark: usize,
    specification: Option<Specification>,
    feedback: Option<DesignFeedback>,
    report: Option<AccessibilityReport>,
    export: Option<ExportPackage>,
    errors: Vec<StageError>,
}

impl Run {
    fn new(history_mark: usize) -> Self {
        Self {
            state: PipelineState::Idle,
            started: Instant::now(),
            history_mark,
            specification: None,
            feedback: None,
            report: None,
            export: None,
            errors: Vec::new(),
        }
    }

    fn transition(&mut self, to: PipelineState) {
        match validate_transition(self.state, to) {
            Ok(()) => {
                debug!(from = ?self.state, to = ?to, "pipeline transition");
                self.state = to;
            }
            Err(e) => {
                // Off-table transition halts the run
                error!("{}", e);
                self.errors.push(StageError::internal(Stage::Orchestrator, e));
                self.state = PipelineState::Errored;
            }
        }
    }

    fn fail(&mut self, err: StageError) {
        warn!(%err, "pipeline halted");
        self.errors.push(err);
        self.transition(PipelineState::Errored);
    }

    fn finish(self, history: &MessageLog) -> PipelineResult {
        let fatal = self.errors.iter().any(StageError::is_fatal);
        let success = self.specification.is_some() && !fatal;
        let duration_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(success, state = ?self.state, errors = self.errors.len(), duration_ms, "pipeline finished");

        PipelineResult {
            success,
            state: self.state,
            specification: self.specification,
            feedback: self.feedback,
            report: self.report,
            export: self.export,
            errors: self.errors,
            messages: history.since(self.history_mark).to_vec(),
            duration_ms,
        }
    }
}

/// Sequences the pipeline stages for one conversation
#[derive(Debug)]
pub struct Orchestrator {
    config: PipelineConfig,
    providers: ProviderSet,
    generator: Generator,
    critic: Critic,
    validator: Validator,
    context: ConversationContext,
    cancel: Arc<AtomicBool>,
}

impl Orchestrator {
    /// Orchestrator with the built-in registry, rules and providers
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let registry = Arc::new(ComponentRegistry::builtin());
        let context = ConversationContext::with_preferences(config.preferences.clone());
        Self {
            generator: Generator::new(Arc::clone(&registry)),
            validator: Validator::new(registry),
            critic: Critic::new(),
            providers: ProviderSet::builtin(),
            context,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use a different component registry for generation and validation
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ComponentRegistry>) -> Self {
        self.generator = Generator::new(Arc::clone(&registry));
        self.validator = Validator::new(registry);
        self
    }

    /// Use a different set of capability providers
    #[inline]
    #[must_use]
    pub fn with_providers(mut self, providers: ProviderSet) -> Self {
        self.providers = providers;
        self
    }

    /// Use a critic with custom rules
    #[inline]
    #[must_use]
    pub fn with_critic(mut self, critic: Critic) -> Self {
        self.critic = critic;
        self
    }

    /// Pipeline configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current conversation id
    #[inline]
    #[must_use]
    pub fn conversation_id(&self) -> ConversationId {
        self.context.id()
    }

    /// Current specification, if any run produced one
    #[inline]
    #[must_use]
    pub fn get_current_specification(&self) -> Option<&Specification> {
        self.context.current()
    }

    /// Full message history of the conversation
    #[inline]
    #[must_use]
    pub fn history(&self) -> &MessageLog {
        self.context.history()
    }

    /// Replace the conversation's style preferences
    pub fn set_preferences(&mut self, preferences: Option<StylePreferences>) {
        self.context.set_preferences(preferences);
    }

    /// Flag that cancels the next stage of a run
    ///
    /// Setting it stops the pipeline before the next stage starts; the flag
    /// is cleared when a run observes it.
    #[must_use]
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Start a new conversation
    ///
    /// Drops the current specification and history. Preferences revert to
    /// the configured ones.
    #[instrument(skip(self), fields(conversation = %self.context.id()))]
    pub fn reset(&mut self) {
        self.context = ConversationContext::with_preferences(self.config.preferences.clone());
        info!(new_conversation = %self.context.id(), "conversation reset");
    }

    /// Run a request through the pipeline
    ///
    /// The request is classified as create or modify.
    #[instrument(skip(self, text), fields(conversation = %self.context.id()))]
    pub async fn process_request(&mut self, text: &str) -> PipelineResult {
        self.run(GenerationRequest::new(text)).await
    }

    /// Run a modification of the current specification
    ///
    /// # Errors
    /// Returns [`PipelineError::NoCurrentSpecification`] if no run has
    /// produced a specification yet
    #[instrument(skip(self, text), fields(conversation = %self.context.id()))]
    pub async fn modify_ui(&mut self, text: &str) -> Result<PipelineResult, PipelineError> {
        if self.context.current().is_none() {
            return Err(PipelineError::NoCurrentSpecification);
        }
        Ok(self
            .run(GenerationRequest::new(text).with_intent(RequestKind::Modify))
            .await)
    }

    async fn run(&mut self, request: GenerationRequest) -> PipelineResult {
        let mut run = Run::new(self.context.history().len());
        info!(request = %request.text, "pipeline started");

        // Generation
        run.transition(PipelineState::Generating);
        if self.cancelled(&mut run, Stage::Generation) {
            return run.finish(self.context.history());
        }
        self.send(
            Role::Generator,
            "generate",
            json!({
                "request": request.text,
                "intent": request.intent,
                "prior_version": self.context.current().map(Specification::version),
            }),
        );
        let generated = guarded(Stage::Generation, || {
            self.generator.generate(
                &request,
                self.context.current(),
                self.context.preferences(),
            )
        });
        let mut spec = match generated {
            Ok(Ok(spec)) => spec,
            Ok(Err(e)) => {
                run.fail(StageError::generation(&e));
                return run.finish(self.context.history());
            }
            Err(e) => {
                run.fail(e);
                return run.finish(self.context.history());
            }
        };
        self.context.set_current(spec.clone());
        run.specification = Some(spec.clone());

        // Critique
        if self.config.critique_enabled {
            run.transition(PipelineState::Critiquing);
            if self.cancelled(&mut run, Stage::Critique) {
                return run.finish(self.context.history());
            }
            self.send(Role::Critic, "critique", payload(&spec));
            match guarded(Stage::Critique, || self.critic.critique(&spec)) {
                Ok(result) => {
                    let CritiqueResult {
                        mut feedback,
                        improved_spec,
                        blocking,
                    } = result;
                    self.bounded(Stage::Critique, critique::annotate(&mut feedback, &self.providers))
                        .await;
                    if blocking {
                        let issues: Vec<_> = feedback
                            .issues
                            .iter()
                            .filter(|i| i.severity == Severity::Error)
                            .cloned()
                            .collect();
                        let err = StageError::critique_blocking(&issues);
                        warn!(%err, "critique blocking, continuing");
                        run.errors.push(err);
                    }
                    if self.config.auto_apply_improvements && !feedback.improvements.is_empty() {
                        debug!(improvements = feedback.improvements.len(), "applying improvements");
                        spec = improved_spec;
                        self.context.set_current(spec.clone());
                        run.specification = Some(spec.clone());
                    }
                    run.feedback = Some(feedback);
                }
                Err(e) => {
                    warn!(%e, "critique panicked, continuing to validation");
                    run.errors.push(e);
                }
            }
        }

        // Validation
        run.transition(PipelineState::Validating);
        if self.cancelled(&mut run, Stage::Validation) {
            return run.finish(self.context.history());
        }
        self.send(Role::Validator, "validate", payload(&spec));
        let ValidationResult {
            mut report,
            fixed_spec,
            blocking,
        } = match guarded(Stage::Validation, || self.validator.validate(&spec)) {
            Ok(result) => result,
            Err(e) => {
                run.fail(e);
                return run.finish(self.context.history());
            }
        };
        self.bounded(Stage::Validation, validation::annotate(&mut report, &self.providers))
            .await;
        if self.config.auto_apply_fixes && fixed_spec.version() != spec.version() {
            debug!(version = fixed_spec.version(), "applying accessibility fixes");
            spec = fixed_spec;
            self.context.set_current(spec.clone());
            run.specification = Some(spec.clone());
        }
        let critical = StageError::accessibility_blocking(report.critical());
        run.report = Some(report);
        if blocking {
            run.fail(critical);
            return run.finish(self.context.history());
        }

        // Export
        if self.config.export_enabled {
            run.transition(PipelineState::Exporting);
            if self.cancelled(&mut run, Stage::Export) {
                return run.finish(self.context.history());
            }
            self.send(Role::Exporter, "export", payload(&spec));
            let options = &self.config.export;
            match guarded(Stage::Export, || uigen_export::export(&spec, options)) {
                Ok(Ok(package)) => {
                    info!(files = package.files.len(), fingerprint = %package.fingerprint.short(), "export complete");
                    run.export = Some(package);
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "export failed, specification kept");
                    run.errors
                        .push(StageError::new(Stage::Export, ErrorCode::ExportFailure, e.to_string()));
                }
                Err(e) => {
                    warn!(%e, "export panicked, specification kept");
                    run.errors.push(e);
                }
            }
        }

        run.transition(PipelineState::Done);
        run.finish(self.context.history())
    }

    fn send(&mut self, to: Role, action: &str, payload: serde_json::Value) {
        self.context
            .record(PipelineMessage::new(Role::Orchestrator, to, action, payload));
    }

    fn cancelled(&self, run: &mut Run, stage: Stage) -> bool {
        if !self.cancel.swap(false, Ordering::SeqCst) {
            return false;
        }
        run.fail(StageError::new(
            stage,
            ErrorCode::Cancelled,
            format!("run cancelled before {stage} stage"),
        ));
        true
    }

    /// Await provider enrichment within the configured bound
    async fn bounded<F>(&self, stage: Stage, enrich: F)
    where
        F: std::future::Future<Output = ()>,
    {
        let limit = self.config.provider_timeout();
        if tokio::time::timeout(limit, enrich).await.is_err() {
            warn!(%stage, timeout_ms = self.config.provider_timeout_ms, "provider lookup timed out, guidance skipped");
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

fn payload(spec: &Specification) -> serde_json::Value {
    json!({
        "spec_id": spec.id.to_string(),
        "version": spec.version(),
        "components": spec.components.len(),
        "fingerprint": spec.fingerprint().to_string(),
    })
}

/// Run a stage body, turning a panic into an internal failure for that stage
fn guarded<T>(stage: Stage, body: impl FnOnce() -> T) -> Result<T, StageError> {
    panic::catch_unwind(AssertUnwindSafe(body)).map_err(|cause| {
        let detail = cause
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| cause.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        error!(%stage, %detail, "stage panicked");
        StageError::internal(stage, detail)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulebook::FnRule;
    use uigen_spec::ComponentNode;

    fn actions(result: &PipelineResult) -> Vec<&str> {
        result.messages.iter().map(|m| m.action.as_str()).collect()
    }

    #[tokio::test]
    async fn full_run_visits_every_stage() {
        let mut orch = Orchestrator::default();
        let result = orch.process_request("Create a pricing page").await;

        assert!(result.success);
        assert_eq!(result.state, PipelineState::Done);
        assert_eq!(actions(&result), vec!["generate", "critique", "validate", "export"]);
        assert!(result.feedback.is_some());
        assert!(result.report.is_some());
        assert!(result.export.is_some());
        assert_eq!(orch.history().len(), 4);
    }

    #[tokio::test]
    async fn disabled_stages_are_skipped() {
        let config = PipelineConfig::new().with_critique(false).with_export(false);
        let mut orch = Orchestrator::new(config);
        let result = orch.process_request("Create a pricing page").await;

        assert!(result.success);
        assert_eq!(actions(&result), vec!["generate", "validate"]);
        assert!(result.feedback.is_none());
        assert!(result.export.is_none());
    }

    #[tokio::test]
    async fn generation_failure_carries_no_specification() {
        let mut orch = Orchestrator::default();
        let result = orch.process_request("   ").await;

        assert!(!result.success);
        assert_eq!(result.state, PipelineState::Errored);
        assert!(result.specification.is_none());
        assert_eq!(result.errors[0].code, ErrorCode::UnclassifiedRequest);
        assert_eq!(actions(&result), vec!["generate"]);
    }

    #[tokio::test]
    async fn panicking_rule_becomes_internal_failure() {
        let critic = Critic::new().with_rule(
            "PricingTable",
            FnRule::boxed("explodes", |_: usize, _: &ComponentNode, _: &mut critique::DesignFindings| {
                panic!("rule exploded")
            }),
        );
        let mut orch = Orchestrator::default().with_critic(critic);
        let result = orch.process_request("Create a pricing page").await;

        assert!(result.success);
        assert_eq!(result.state, PipelineState::Done);
        let err = result.error(ErrorCode::InternalFailure).unwrap();
        assert_eq!(err.stage, Stage::Critique);
        assert!(err.message.contains("rule exploded"));
        assert!(!err.is_fatal());

        assert!(result.feedback.is_none());
        assert!(result.report.as_ref().unwrap().passed);
        assert!(result.export.is_some());
        assert_eq!(actions(&result), vec!["generate", "critique", "validate", "export"]);
    }

    #[tokio::test]
    async fn cancellation_stops_before_next_stage() {
        let mut orch = Orchestrator::default();
        orch.cancel_handle().store(true, Ordering::SeqCst);
        let result = orch.process_request("Create a pricing page").await;

        assert_eq!(result.state, PipelineState::Errored);
        assert_eq!(result.errors[0].code, ErrorCode::Cancelled);
        assert!(result.messages.is_empty());

        // Flag is consumed; the next run is unaffected
        let again = orch.process_request("Create a pricing page").await;
        assert!(again.success);
    }

    #[tokio::test]
    async fn modify_requires_current_specification() {
        let mut orch = Orchestrator::default();
        let err = orch.modify_ui("make it bigger").await.unwrap_err();
        assert!(matches!(err, PipelineError::NoCurrentSpecification));
    }

    #[tokio::test]
    async fn reset_starts_new_conversation() {
        let mut orch = Orchestrator::default();
        let before = orch.conversation_id();
        orch.process_request("Create a pricing page").await;
        assert!(orch.get_current_specification().is_some());

        orch.reset();
        assert_ne!(orch.conversation_id(), before);
        assert!(orch.get_current_specification().is_none());
        assert!(orch.history().is_empty());
    }
}

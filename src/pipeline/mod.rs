//! Debounced, cancellable validation of an email input that keeps changing.
//!
//! A [`ValidationPipeline`] turns edit events into a sequence of
//! [`ValidationStatus`] values. Well-known domains are accepted on the spot;
//! anything else is checked after a short quiet period with an MX lookup.
//! Every edit invalidates work scheduled for earlier input, so only the most
//! recent lookup and the most recent display update can reach the sink.

/// Rewriting the input when a suggested domain is accepted.
pub mod correction;

/// Lifetime the pipeline's timers and lookups are bound to.
pub mod scope;

/// The display contract and its English message catalogue.
pub mod sink;

pub use correction::{Correction, Selection, SuggestionAction, apply_suggestion};
pub use scope::{CancellationScope, ScopeGuard};
pub use sink::{ResultSink, status_message};

use crate::dns::mx::MxLookup;
use crate::validation::registry::DomainRegistry;
use crate::validation::status::ValidationStatus;
use crate::validation::validator::{DomainValidator, Precheck};
use parking_lot::{Mutex, ReentrantMutex};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);
pub const DEFAULT_DISPLAY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_INCOMPLETE_DELAY: Duration = Duration::from_millis(3000);

/// Delays applied by a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTimings {
    /// Quiet period after an edit before the input is checked.
    pub debounce: Duration,
    /// Delay between computing a status and showing its message.
    pub display_delay: Duration,
    /// Delay before a malformed address is reported as incomplete.
    pub incomplete_delay: Duration,
}

impl Default for PipelineTimings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            display_delay: DEFAULT_DISPLAY_DELAY,
            incomplete_delay: DEFAULT_INCOMPLETE_DELAY,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation pipeline must be built inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("validation pipeline is missing its {0}")]
    Missing(&'static str),
}

#[derive(Default)]
struct State {
    input: String,
    generation: u64,
    debounce: Option<JoinHandle<()>>,
    display: Vec<JoinHandle<()>>,
}

impl State {
    /// Drops all scheduled work and starts a new generation.
    fn restart(&mut self) -> u64 {
        self.abort_scheduled();
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    fn abort_scheduled(&mut self) {
        if let Some(debounce) = self.debounce.take() {
            debounce.abort();
        }
        for display in self.display.drain(..) {
            display.abort();
        }
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.abort_scheduled();
    }
}

enum DisplayUpdate {
    Status(ValidationStatus),
    Incomplete,
}

pub(crate) struct Inner {
    validator: DomainValidator,
    sink: Arc<dyn ResultSink>,
    scope: CancellationScope,
    timings: PipelineTimings,
    runtime: Handle,
    status: watch::Sender<ValidationStatus>,
    state: Mutex<State>,
    /// Held across a generation check and the sink calls that depend on it.
    /// Always taken before `state`.
    delivery: ReentrantMutex<()>,
}

impl Inner {
    fn edit(self: &Arc<Self>, text: String) {
        if self.scope.is_cancelled() {
            debug!("ignoring edit on a cancelled pipeline");
            return;
        }

        let well_known = self.validator.has_well_known_domain(&text);
        let _delivery = self.delivery.lock();
        let generation = {
            let mut state = self.state.lock();
            state.input = text;
            let generation = state.restart();
            self.status.send_replace(ValidationStatus::Pending);
            generation
        };
        self.sink.clear_decoration();
        self.sink.display_error(None);

        if well_known {
            self.complete(generation, ValidationStatus::Valid);
        } else {
            self.schedule_check(generation);
        }
    }

    fn validate_now(self: &Arc<Self>, text: String) {
        if self.scope.is_cancelled() {
            debug!("ignoring validation request on a cancelled pipeline");
            return;
        }

        let _delivery = self.delivery.lock();
        let generation = {
            let mut state = self.state.lock();
            state.input = text;
            state.restart()
        };
        self.run_check(generation);
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.scope.is_cancelled() && self.state.lock().generation == generation
    }

    fn current_input(&self, generation: u64) -> Option<String> {
        let state = self.state.lock();
        (state.generation == generation && !self.scope.is_cancelled()).then(|| state.input.clone())
    }

    fn schedule_check(self: &Arc<Self>, generation: u64) {
        let pipeline = Arc::downgrade(self);
        let scope = self.scope.clone();
        let delay = self.timings.debounce;
        let handle = self.runtime.spawn(async move {
            if !sleep_unless_cancelled(&scope, delay).await {
                return;
            }
            if let Some(pipeline) = pipeline.upgrade() {
                pipeline.run_check(generation);
            }
        });

        let mut state = self.state.lock();
        if state.generation == generation {
            state.debounce = Some(handle);
        } else {
            handle.abort();
        }
    }

    fn run_check(self: &Arc<Self>, generation: u64) {
        let Some(input) = self.current_input(generation) else {
            return;
        };

        match self.validator.precheck(&input) {
            Precheck::NeedsLookup(domain) => self.dispatch_lookup(generation, domain),
            Precheck::WellKnown => self.complete(generation, ValidationStatus::Valid),
            Precheck::Malformed => self.complete(generation, ValidationStatus::WrongSchema),
            Precheck::Empty => self.complete(generation, ValidationStatus::Unknown),
        }
    }

    fn dispatch_lookup(self: &Arc<Self>, generation: u64, domain: String) {
        debug!(%domain, generation, "dispatching MX lookup");
        let lookup = self.validator.lookup();
        let pipeline = Arc::downgrade(self);
        // in-flight lookups are never aborted; a stale answer is dropped in `complete`
        self.runtime.spawn(async move {
            let result = lookup.lookup_mx(&domain).await;
            if let Some(pipeline) = pipeline.upgrade() {
                let status = pipeline.validator.classify(&domain, result);
                pipeline.complete(generation, status);
            }
        });
    }

    fn complete(self: &Arc<Self>, generation: u64, status: ValidationStatus) {
        let _delivery = self.delivery.lock();
        {
            let mut state = self.state.lock();
            if state.generation != generation || self.scope.is_cancelled() {
                debug!(generation, current = state.generation, %status, "discarding stale validation result");
                return;
            }

            self.status.send_replace(status.clone());
            let display = self.spawn_display(
                generation,
                self.timings.display_delay,
                DisplayUpdate::Status(status.clone()),
            );
            state.display.push(display);

            if status == ValidationStatus::WrongSchema {
                let incomplete = self.spawn_display(
                    generation,
                    self.timings.incomplete_delay,
                    DisplayUpdate::Incomplete,
                );
                state.display.push(incomplete);
            }
        }

        debug!(generation, %status, "validation finished");
        if status.is_valid() {
            self.sink.mark_valid();
        }
    }

    fn spawn_display(
        self: &Arc<Self>,
        generation: u64,
        delay: Duration,
        update: DisplayUpdate,
    ) -> JoinHandle<()> {
        let pipeline = Arc::downgrade(self);
        let scope = self.scope.clone();
        self.runtime.spawn(async move {
            if !sleep_unless_cancelled(&scope, delay).await {
                return;
            }
            if let Some(pipeline) = pipeline.upgrade() {
                let _delivery = pipeline.delivery.lock();
                if pipeline.is_current(generation) {
                    pipeline.render(update);
                }
            }
        })
    }

    fn render(self: &Arc<Self>, update: DisplayUpdate) {
        match update {
            DisplayUpdate::Status(ValidationStatus::TypoDetected(domain)) => {
                let action = SuggestionAction::new(Arc::downgrade(self), domain.clone());
                self.sink.display_suggestion(&domain, action);
            }
            DisplayUpdate::Status(status) => {
                self.sink.display_error(status_message(&status).as_deref());
            }
            DisplayUpdate::Incomplete => self.sink.display_error(Some(sink::INCOMPLETE_MESSAGE)),
        }
    }
}

/// Returns `false` if the scope was cancelled before `delay` elapsed.
async fn sleep_unless_cancelled(scope: &CancellationScope, delay: Duration) -> bool {
    tokio::select! {
        _ = scope.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

/// Validates the domain of an email input as it is being typed.
///
/// Cloning yields another handle to the same pipeline. Scheduled work holds
/// only weak references, so dropping the last handle stops everything.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use email_doh_validator::dns::{DohResolver, MxResolver};
/// # use email_doh_validator::pipeline::{ResultSink, ValidationPipeline};
/// # async fn run(sink: Arc<dyn ResultSink>) -> Result<(), Box<dyn std::error::Error>> {
/// let lookup = Arc::new(MxResolver::new(DohResolver::with_defaults(None)?));
/// let pipeline = ValidationPipeline::builder().lookup(lookup).sink(sink).build()?;
///
/// pipeline.edit("jane@example.org");
/// let mut statuses = pipeline.subscribe();
/// statuses.changed().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ValidationPipeline {
    inner: Arc<Inner>,
}

impl fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("status", &*self.inner.status.borrow())
            .field("timings", &self.inner.timings)
            .finish_non_exhaustive()
    }
}

impl ValidationPipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Handles a change of the input text.
    ///
    /// The status becomes `Pending` and the sink is cleared right away. A
    /// well-known domain is `Valid` immediately; anything else is checked
    /// once no further edit arrives within the debounce delay.
    pub fn edit(&self, text: impl Into<String>) {
        self.inner.edit(text.into());
    }

    /// Checks `text` without waiting for the debounce delay.
    ///
    /// Earlier scheduled work is invalidated, but the status is not reset to
    /// `Pending` and the sink is not cleared. Messages are still staged.
    pub fn validate_now(&self, text: impl Into<String>) {
        self.inner.validate_now(text.into());
    }

    pub fn status(&self) -> ValidationStatus {
        self.inner.status.borrow().clone()
    }

    /// True iff the current status is [`ValidationStatus::Valid`].
    pub fn is_valid(&self) -> bool {
        self.inner.status.borrow().is_valid()
    }

    /// Observes every status change.
    pub fn subscribe(&self) -> watch::Receiver<ValidationStatus> {
        self.inner.status.subscribe()
    }

    /// The most recent input text.
    pub fn input(&self) -> String {
        self.inner.state.lock().input.clone()
    }

    pub fn registry(&self) -> &DomainRegistry {
        self.inner.validator.registry()
    }

    pub fn scope(&self) -> &CancellationScope {
        &self.inner.scope
    }
}

/// Assembles a [`ValidationPipeline`].
///
/// A lookup and a sink are required. The registry defaults to
/// [`DomainRegistry::shared`], the scope to a fresh one.
#[derive(Default)]
pub struct PipelineBuilder {
    lookup: Option<Arc<dyn MxLookup>>,
    sink: Option<Arc<dyn ResultSink>>,
    registry: Option<DomainRegistry>,
    scope: Option<CancellationScope>,
    timings: PipelineTimings,
}

impl PipelineBuilder {
    pub fn lookup(mut self, lookup: Arc<dyn MxLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn registry(mut self, registry: DomainRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn scope(mut self, scope: CancellationScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn timings(mut self, timings: PipelineTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Builds the pipeline on the current tokio runtime.
    pub fn build(self) -> Result<ValidationPipeline, PipelineError> {
        let lookup = self.lookup.ok_or(PipelineError::Missing("MX lookup"))?;
        let sink = self.sink.ok_or(PipelineError::Missing("result sink"))?;
        let runtime = Handle::try_current()?;
        let registry = self.registry.unwrap_or_else(DomainRegistry::shared);
        let (status, _) = watch::channel(ValidationStatus::Unknown);

        Ok(ValidationPipeline {
            inner: Arc::new(Inner {
                validator: DomainValidator::new(lookup, registry),
                sink,
                scope: self.scope.unwrap_or_default(),
                timings: self.timings,
                runtime,
                status,
                state: Mutex::new(State::default()),
                delivery: ReentrantMutex::new(()),
            }),
        })
    }
}

#[cfg(test)]
mod pipeline_test;

#[cfg(test)]
mod pipeline_tests {
    use crate::dns::mx::{MockMxLookup, MxLookup, ResolverResult};
    use crate::pipeline::sink::{INCOMPLETE_MESSAGE, NO_MX_RECORD_MESSAGE, NOT_REGISTERED_MESSAGE};
    use crate::pipeline::{
        CancellationScope, PipelineError, PipelineTimings, ResultSink, Selection, SuggestionAction,
        ValidationPipeline,
    };
    use crate::validation::{DomainRegistry, ValidationStatus};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{Instant, sleep};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Error(Option<String>),
        Suggestion(String),
        Valid,
        Cleared,
        Replaced(String, Selection),
    }

    struct RecordingSink {
        started: Instant,
        events: Mutex<Vec<(Duration, Event)>>,
        suggestions: Mutex<Vec<SuggestionAction>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                started: Instant::now(),
                events: Mutex::new(Vec::new()),
                suggestions: Mutex::new(Vec::new()),
            })
        }

        fn record(&self, event: Event) {
            self.events.lock().push((self.started.elapsed(), event));
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().iter().map(|(_, e)| e.clone()).collect()
        }

        /// Messages and suggestions actually shown, with their time.
        fn shown(&self) -> Vec<(Duration, Event)> {
            self.events
                .lock()
                .iter()
                .filter(|(_, e)| matches!(e, Event::Error(Some(_)) | Event::Suggestion(_)))
                .cloned()
                .collect()
        }

        fn last_suggestion(&self) -> Option<SuggestionAction> {
            self.suggestions.lock().last().cloned()
        }
    }

    impl ResultSink for RecordingSink {
        fn display_error(&self, message: Option<&str>) {
            self.record(Event::Error(message.map(str::to_string)));
        }

        fn display_suggestion(&self, domain: &str, action: SuggestionAction) {
            self.record(Event::Suggestion(domain.to_string()));
            self.suggestions.lock().push(action);
        }

        fn mark_valid(&self) {
            self.record(Event::Valid);
        }

        fn clear_decoration(&self) {
            self.record(Event::Cleared);
        }

        fn replace_input(&self, text: &str, selection: Selection) {
            self.record(Event::Replaced(text.to_string(), selection));
        }
    }

    /// Answers from a fixed table after `latency`; unknown domains are indeterminate.
    struct ScriptedLookup {
        answers: HashMap<String, ResolverResult>,
        latency: Duration,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedLookup {
        fn new(answers: &[(&str, ResolverResult)]) -> Arc<Self> {
            Self::with_latency(answers, Duration::ZERO)
        }

        fn with_latency(answers: &[(&str, ResolverResult)], latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                answers: answers
                    .iter()
                    .map(|(domain, result)| (domain.to_string(), *result))
                    .collect(),
                latency,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl MxLookup for ScriptedLookup {
        async fn lookup_mx(&self, domain: &str) -> ResolverResult {
            self.calls.lock().push(domain.to_string());
            if !self.latency.is_zero() {
                sleep(self.latency).await;
            }
            self.answers
                .get(domain)
                .copied()
                .unwrap_or_else(ResolverResult::indeterminate)
        }
    }

    fn pipeline_with(lookup: Arc<dyn MxLookup>, sink: Arc<RecordingSink>) -> ValidationPipeline {
        ValidationPipeline::builder()
            .lookup(lookup)
            .sink(sink)
            .registry(DomainRegistry::new())
            .build()
            .unwrap()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    async fn advance(millis: u64) {
        sleep(ms(millis)).await;
    }

    fn assert_near(actual: Duration, expected_ms: u64) {
        assert!(
            actual >= ms(expected_ms) && actual < ms(expected_ms + 5),
            "expected ~{expected_ms}ms, got {actual:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_status_is_unknown() {
        let pipeline = pipeline_with(ScriptedLookup::new(&[]), RecordingSink::new());
        assert_eq!(pipeline.status(), ValidationStatus::Unknown);
        assert!(!pipeline.is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_well_known_domain_is_valid_immediately() {
        let lookup = ScriptedLookup::new(&[]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup.clone(), sink.clone());

        pipeline.edit("jane@gmail.com");
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        assert!(pipeline.is_valid());
        assert_eq!(sink.events(), vec![Event::Cleared, Event::Error(None), Event::Valid]);

        advance(2000).await;
        assert!(lookup.calls().is_empty());
        assert!(sink.shown().is_empty());
        // the staged update for Valid clears the message after the display delay
        let timeline = sink.events.lock().clone();
        let (at, last) = timeline.last().unwrap();
        assert_eq!(last, &Event::Error(None));
        assert_near(*at, 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_domain_is_valid_without_lookup() {
        let lookup = ScriptedLookup::new(&[]);
        let registry = DomainRegistry::new();
        registry.add_custom_domain("evil.corp.internal");
        let pipeline = ValidationPipeline::builder()
            .lookup(lookup.clone())
            .sink(RecordingSink::new())
            .registry(registry)
            .build()
            .unwrap();

        pipeline.edit("example@evil.corp.internal");
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        advance(500).await;
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_domain_added_later_is_visible() {
        let lookup = ScriptedLookup::new(&[]);
        let pipeline = pipeline_with(lookup.clone(), RecordingSink::new());

        pipeline.registry().add_custom_domain("Evil.Corp.Internal");
        pipeline.edit("example@evil.corp.internal");
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_existing_domain_after_debounce() {
        let lookup = ScriptedLookup::new(&[("existing.com", ResolverResult::found(5))]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup.clone(), sink.clone());

        pipeline.edit("example@existing.com");
        assert_eq!(pipeline.status(), ValidationStatus::Pending);

        advance(149).await;
        assert_eq!(pipeline.status(), ValidationStatus::Pending);
        assert!(lookup.calls().is_empty());

        advance(10).await;
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        assert_eq!(lookup.calls(), vec!["existing.com"]);
        assert_eq!(sink.events().last(), Some(&Event::Valid));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unregistered_typo_shows_suggestion() {
        let lookup = ScriptedLookup::new(&[("gnail.com", ResolverResult::not_found())]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup, sink.clone());

        pipeline.edit("example@gnail.com");
        advance(200).await;
        assert_eq!(
            pipeline.status(),
            ValidationStatus::TypoDetected("gmail.com".to_string())
        );
        assert!(sink.shown().is_empty());

        advance(1000).await;
        let shown = sink.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, Event::Suggestion("gmail.com".to_string()));
        assert_near(shown[0].0, 1150);
        assert_eq!(sink.last_suggestion().unwrap().domain(), "gmail.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_typo_without_mx_shows_suggestion() {
        let lookup = ScriptedLookup::new(&[("gnail.com", ResolverResult::found(0))]);
        let pipeline = pipeline_with(lookup, RecordingSink::new());

        pipeline.edit("example@gnail.com");
        advance(200).await;
        assert_eq!(
            pipeline.status(),
            ValidationStatus::TypoDetected("gmail.com".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_existing_domain() {
        let lookup = ScriptedLookup::new(&[("non-existend.com", ResolverResult::not_found())]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup, sink.clone());

        pipeline.edit("example@non-existend.com");
        advance(1200).await;
        assert_eq!(pipeline.status(), ValidationStatus::NotRegistered);

        let shown = sink.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, Event::Error(Some(NOT_REGISTERED_MESSAGE.to_string())));
        assert_near(shown[0].0, 1150);
    }

    #[tokio::test(start_paused = true)]
    async fn test_domain_without_mx() {
        let lookup = ScriptedLookup::new(&[("github.io", ResolverResult::found(0))]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup, sink.clone());

        pipeline.edit("example@github.io");
        advance(1200).await;
        assert_eq!(pipeline.status(), ValidationStatus::NoMxRecord);
        assert_eq!(
            sink.shown().last().map(|(_, e)| e.clone()),
            Some(Event::Error(Some(NO_MX_RECORD_MESSAGE.to_string())))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_lookup_is_unknown_and_silent() {
        let lookup = ScriptedLookup::new(&[("flaky.example", ResolverResult::indeterminate())]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup.clone(), sink.clone());

        pipeline.edit("example@flaky.example");
        advance(2000).await;
        assert_eq!(pipeline.status(), ValidationStatus::Unknown);
        assert!(sink.shown().is_empty());
        // no automatic retry
        assert_eq!(lookup.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_looks_up_latest_domain_only() {
        let mut lookup = MockMxLookup::new();
        lookup
            .expect_lookup_mx()
            .withf(|domain| domain == "example.org")
            .times(1)
            .returning(|_| ResolverResult::found(1));
        let pipeline = pipeline_with(Arc::new(lookup), RecordingSink::new());

        pipeline.edit("jane@e");
        advance(50).await;
        pipeline.edit("jane@ex");
        advance(50).await;
        pipeline.edit("jane@example.org");
        advance(300).await;

        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        // verifies the mock expectations
        drop(pipeline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_lookup_result_is_discarded() {
        let lookup = ScriptedLookup::with_latency(
            &[
                ("slow.example", ResolverResult::found(1)),
                ("other.example", ResolverResult::not_found()),
            ],
            ms(500),
        );
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup.clone(), sink.clone());

        pipeline.edit("jane@slow.example");
        advance(200).await;
        assert_eq!(lookup.calls(), vec!["slow.example"]);

        pipeline.edit("jane@other.example");
        // the first answer arrives at 650ms, while the second edit is pending
        advance(500).await;
        assert_eq!(pipeline.status(), ValidationStatus::Pending);
        assert!(!sink.events().contains(&Event::Valid));

        advance(200).await;
        assert_eq!(pipeline.status(), ValidationStatus::NotRegistered);
        assert_eq!(lookup.calls(), vec!["slow.example", "other.example"]);
        assert!(!sink.events().contains(&Event::Valid));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_edit_cancels_pending_display() {
        let lookup = ScriptedLookup::new(&[("non-existend.com", ResolverResult::not_found())]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup, sink.clone());

        pipeline.edit("jane@non-existend.com");
        advance(1000).await;
        assert_eq!(pipeline.status(), ValidationStatus::NotRegistered);

        pipeline.edit("jane@gmail.com");
        advance(2000).await;
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        assert!(sink.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_address_reported_as_incomplete_later() {
        let lookup = ScriptedLookup::new(&[]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup.clone(), sink.clone());

        pipeline.edit("jane");
        advance(200).await;
        assert_eq!(pipeline.status(), ValidationStatus::WrongSchema);

        advance(1000).await;
        assert!(sink.shown().is_empty());

        advance(2000).await;
        let shown = sink.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, Event::Error(Some(INCOMPLETE_MESSAGE.to_string())));
        assert_near(shown[0].0, 3150);
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_label_is_wrong_schema_without_lookup() {
        let lookup = ScriptedLookup::new(&[]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup.clone(), sink.clone());

        pipeline.edit("jane@exa mple.com");
        advance(200).await;
        assert_eq!(pipeline.status(), ValidationStatus::WrongSchema);

        pipeline.edit("jane@<gmail.com>");
        advance(3200).await;
        assert_eq!(pipeline.status(), ValidationStatus::WrongSchema);
        let shown = sink.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, Event::Error(Some(INCOMPLETE_MESSAGE.to_string())));
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trailing_space_keeps_fast_path() {
        let lookup = ScriptedLookup::new(&[]);
        let pipeline = pipeline_with(lookup.clone(), RecordingSink::new());

        pipeline.edit("jane@gmail.com ");
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        advance(200).await;
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_cancels_incomplete_message() {
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(ScriptedLookup::new(&[]), sink.clone());

        pipeline.edit("jane@");
        advance(2000).await;
        assert_eq!(pipeline.status(), ValidationStatus::WrongSchema);

        pipeline.edit("jane@gmail.com");
        advance(3000).await;
        assert!(sink.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_is_unknown() {
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(ScriptedLookup::new(&[]), sink.clone());

        pipeline.edit("jane@gmail.com");
        pipeline.edit("  ");
        assert_eq!(pipeline.status(), ValidationStatus::Pending);

        advance(4000).await;
        assert_eq!(pipeline.status(), ValidationStatus::Unknown);
        assert!(sink.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_validate_now_skips_debounce() {
        let lookup = ScriptedLookup::new(&[("existing.com", ResolverResult::found(2))]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup.clone(), sink.clone());

        pipeline.validate_now("example@existing.com");
        advance(1).await;
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        assert_eq!(lookup.calls(), vec!["existing.com"]);
        // no Pending reset and no clearing for validate-now
        assert_eq!(sink.events(), vec![Event::Valid]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_validate_now_keeps_display_staging() {
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(ScriptedLookup::new(&[]), sink.clone());

        pipeline.validate_now("jane");
        assert_eq!(pipeline.status(), ValidationStatus::WrongSchema);

        advance(3100).await;
        let shown = sink.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, Event::Error(Some(INCOMPLETE_MESSAGE.to_string())));
        assert_near(shown[0].0, 3000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_validate_now_supersedes_pending_edit() {
        let lookup = ScriptedLookup::new(&[("slow.example", ResolverResult::found(1))]);
        let pipeline = pipeline_with(lookup.clone(), RecordingSink::new());

        pipeline.edit("jane@slow.example");
        advance(50).await;
        pipeline.validate_now("jane@gmail.com");
        assert_eq!(pipeline.status(), ValidationStatus::Valid);

        advance(500).await;
        assert!(lookup.calls().is_empty());
        assert_eq!(pipeline.input(), "jane@gmail.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_scope_stops_scheduled_work() {
        let lookup = ScriptedLookup::new(&[("existing.com", ResolverResult::found(1))]);
        let scope = CancellationScope::new();
        let sink = RecordingSink::new();
        let pipeline = ValidationPipeline::builder()
            .lookup(lookup.clone())
            .sink(sink.clone())
            .registry(DomainRegistry::new())
            .scope(scope.clone())
            .build()
            .unwrap();

        pipeline.edit("example@existing.com");
        advance(50).await;
        scope.cancel();
        advance(2000).await;

        assert!(lookup.calls().is_empty());
        assert_eq!(pipeline.status(), ValidationStatus::Pending);

        // edits after cancellation are ignored
        pipeline.edit("example@gmail.com");
        assert_eq!(pipeline.status(), ValidationStatus::Pending);
        assert_eq!(pipeline.input(), "example@existing.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_in_flight_when_scope_ends_is_discarded() {
        let lookup = ScriptedLookup::with_latency(&[("existing.com", ResolverResult::found(1))], ms(300));
        let scope = CancellationScope::new();
        let guard = scope.drop_guard();
        let sink = RecordingSink::new();
        let pipeline = ValidationPipeline::builder()
            .lookup(lookup.clone())
            .sink(sink.clone())
            .registry(DomainRegistry::new())
            .scope(scope)
            .build()
            .unwrap();

        pipeline.edit("example@existing.com");
        advance(200).await;
        assert_eq!(lookup.calls(), vec!["existing.com"]);

        drop(guard);
        advance(1000).await;
        assert_eq!(pipeline.status(), ValidationStatus::Pending);
        assert!(!sink.events().contains(&Event::Valid));
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepting_suggestion_rewrites_input() {
        let lookup = ScriptedLookup::new(&[("gnail.com", ResolverResult::not_found())]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup, sink.clone());

        pipeline.edit("jane@gnail.com");
        advance(1200).await;
        assert_eq!(
            pipeline.status(),
            ValidationStatus::TypoDetected("gmail.com".to_string())
        );
        let action = sink.last_suggestion().unwrap();

        let correction = action.accept(Selection::caret(14)).unwrap();
        assert_eq!(correction.text, "jane@gmail.com");
        assert_eq!(correction.selection, Selection::caret(14));

        assert_eq!(pipeline.input(), "jane@gmail.com");
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        let events = sink.events();
        let replaced = events
            .iter()
            .position(|e| *e == Event::Replaced("jane@gmail.com".to_string(), Selection::caret(14)))
            .unwrap();
        assert_eq!(
            &events[replaced + 1..],
            &[Event::Cleared, Event::Error(None), Event::Valid]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_accept_after_cancel_does_nothing() {
        let lookup = ScriptedLookup::new(&[("gnail.com", ResolverResult::not_found())]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup, sink.clone());

        pipeline.edit("jane@gnail.com");
        advance(1200).await;
        let action = sink.last_suggestion().unwrap();

        pipeline.scope().cancel();
        assert!(action.accept(Selection::caret(14)).is_none());
        assert_eq!(pipeline.input(), "jane@gnail.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_accept_after_pipeline_dropped() {
        let lookup = ScriptedLookup::new(&[("gnail.com", ResolverResult::not_found())]);
        let sink = RecordingSink::new();
        let pipeline = pipeline_with(lookup, sink.clone());

        pipeline.edit("jane@gnail.com");
        advance(1200).await;
        let action = sink.last_suggestion().unwrap();

        drop(pipeline);
        assert!(action.accept(Selection::caret(14)).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_status_changes() {
        let lookup = ScriptedLookup::new(&[("existing.com", ResolverResult::found(1))]);
        let pipeline = pipeline_with(lookup, RecordingSink::new());
        let mut statuses = pipeline.subscribe();
        assert_eq!(*statuses.borrow_and_update(), ValidationStatus::Unknown);

        pipeline.edit("example@existing.com");
        statuses.changed().await.unwrap();
        assert_eq!(*statuses.borrow_and_update(), ValidationStatus::Pending);

        statuses.changed().await.unwrap();
        assert_eq!(*statuses.borrow_and_update(), ValidationStatus::Valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timings() {
        let lookup = ScriptedLookup::new(&[("non-existend.com", ResolverResult::not_found())]);
        let sink = RecordingSink::new();
        let pipeline = ValidationPipeline::builder()
            .lookup(lookup)
            .sink(sink.clone())
            .registry(DomainRegistry::new())
            .timings(PipelineTimings {
                debounce: ms(10),
                display_delay: ms(20),
                incomplete_delay: ms(30),
            })
            .build()
            .unwrap();

        pipeline.edit("jane@non-existend.com");
        advance(50).await;
        let shown = sink.shown();
        assert_eq!(shown.len(), 1);
        assert_near(shown[0].0, 30);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_superseded_result_never_reaches_sink_after_edit() {
        let timings = PipelineTimings {
            debounce: ms(1),
            display_delay: ms(1),
            incomplete_delay: ms(1),
        };

        for round in 0..50u64 {
            let lookup = ScriptedLookup::new(&[("existing.com", ResolverResult::found(1))]);
            let sink = RecordingSink::new();
            let pipeline = ValidationPipeline::builder()
                .lookup(lookup)
                .sink(sink.clone())
                .registry(DomainRegistry::new())
                .timings(timings)
                .build()
                .unwrap();

            pipeline.edit("jane@existing.com");
            sleep(Duration::from_micros(800 + round * 30)).await;
            pipeline.edit("jane@unknown.example");
            sleep(ms(50)).await;

            let events = sink.events();
            let last_clear = events.iter().rposition(|e| *e == Event::Cleared).unwrap();
            assert!(
                !events[last_clear..].contains(&Event::Valid),
                "round {round}: valid mark after the last edit: {events:?}"
            );
            assert_eq!(pipeline.status(), ValidationStatus::Unknown);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_can_accept_suggestion_from_callback() {
        struct AcceptingSink {
            inner: Arc<RecordingSink>,
        }

        impl ResultSink for AcceptingSink {
            fn display_error(&self, message: Option<&str>) {
                self.inner.display_error(message);
            }

            fn display_suggestion(&self, domain: &str, action: SuggestionAction) {
                self.inner.display_suggestion(domain, action.clone());
                action.accept(Selection::caret(0));
            }

            fn mark_valid(&self) {
                self.inner.mark_valid();
            }

            fn clear_decoration(&self) {
                self.inner.clear_decoration();
            }
        }

        let lookup = ScriptedLookup::new(&[("gnail.com", ResolverResult::not_found())]);
        let recording = RecordingSink::new();
        let pipeline = ValidationPipeline::builder()
            .lookup(lookup)
            .sink(Arc::new(AcceptingSink {
                inner: recording.clone(),
            }))
            .registry(DomainRegistry::new())
            .build()
            .unwrap();

        pipeline.edit("jane@gnail.com");
        advance(1200).await;
        assert_eq!(pipeline.input(), "jane@gmail.com");
        assert_eq!(pipeline.status(), ValidationStatus::Valid);
        assert_eq!(recording.events().last(), Some(&Event::Valid));
    }

    #[tokio::test]
    async fn test_builder_requires_lookup_and_sink() {
        let missing_lookup = ValidationPipeline::builder()
            .sink(RecordingSink::new())
            .build();
        assert!(matches!(missing_lookup, Err(PipelineError::Missing(_))));

        let missing_sink = ValidationPipeline::builder()
            .lookup(ScriptedLookup::new(&[]))
            .build();
        assert!(matches!(missing_sink, Err(PipelineError::Missing(_))));
    }

    #[test]
    fn test_builder_outside_runtime_fails() {
        let result = ValidationPipeline::builder()
            .lookup(ScriptedLookup::new(&[]))
            .sink(RecordingSink::new())
            .build();
        assert!(matches!(result, Err(PipelineError::NoRuntime(_))));
    }
}

use crate::pipeline::Inner;
use crate::validation::domain::replace_domain;
use std::fmt;
use std::sync::Weak;

/// Cursor or selection in an input, in characters.
///
/// `start == end` is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn caret(position: usize) -> Self {
        Self::new(position, position)
    }

    /// Carries the selection over to a text whose length changed.
    ///
    /// An endpoint at the old end of the text moves to the new end; any other
    /// endpoint keeps its position, clamped to the new length.
    pub fn remap(self, old_len: usize, new_len: usize) -> Self {
        let follow = |position: usize| {
            if position == old_len {
                new_len
            } else {
                position.min(new_len)
            }
        };
        Self::new(follow(self.start), follow(self.end))
    }
}

/// New input text and selection after applying a suggested domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub text: String,
    pub selection: Selection,
}

/// Rewrites `input` to `local@domain` and remaps `selection` onto the result.
pub fn apply_suggestion(input: &str, domain: &str, selection: Selection) -> Correction {
    let text = replace_domain(input, domain);
    let selection = selection.remap(input.chars().count(), text.chars().count());
    Correction { text, selection }
}

/// Handed to [`ResultSink::display_suggestion`](crate::pipeline::ResultSink::display_suggestion);
/// accepting it applies the suggested domain to the pipeline's input.
#[derive(Clone)]
pub struct SuggestionAction {
    pipeline: Weak<Inner>,
    domain: String,
}

impl fmt::Debug for SuggestionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionAction")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

impl SuggestionAction {
    pub(super) fn new(pipeline: Weak<Inner>, domain: String) -> Self {
        Self { pipeline, domain }
    }

    /// The suggested domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Replaces the domain of the current input with the suggestion.
    ///
    /// `selection` is the caller's selection in the current input. The new
    /// text and remapped selection go to
    /// [`ResultSink::replace_input`](crate::pipeline::ResultSink::replace_input),
    /// then the new text is validated like any other edit. Returns `None` if
    /// the pipeline is gone or its scope was cancelled.
    pub fn accept(&self, selection: Selection) -> Option<Correction> {
        let pipeline = self.pipeline.upgrade()?;
        if pipeline.scope.is_cancelled() {
            return None;
        }

        let _delivery = pipeline.delivery.lock();
        let input = pipeline.state.lock().input.clone();
        let correction = apply_suggestion(&input, &self.domain, selection);
        tracing::debug!(domain = %self.domain, "applying suggested domain");

        pipeline.sink.replace_input(&correction.text, correction.selection);
        pipeline.edit(correction.text.clone());
        Some(correction)
    }
}

use crate::pipeline::correction::{Selection, SuggestionAction};
use crate::validation::status::ValidationStatus;

pub const NOT_REGISTERED_MESSAGE: &str = "This domain is not registered.";
pub const NO_MX_RECORD_MESSAGE: &str = "This domain has no mail server.";
pub const INCOMPLETE_MESSAGE: &str = "This email address looks incomplete.";

/// "Did you mean …?" hint for a suggested domain.
pub fn suggestion_message(domain: &str) -> String {
    format!("Did you mean {domain}?")
}

/// Message shown for a terminal status, if any.
///
/// `WrongSchema` has none: the incomplete hint is staged separately.
pub fn status_message(status: &ValidationStatus) -> Option<String> {
    match status {
        ValidationStatus::NotRegistered => Some(NOT_REGISTERED_MESSAGE.to_string()),
        ValidationStatus::NoMxRecord => Some(NO_MX_RECORD_MESSAGE.to_string()),
        ValidationStatus::TypoDetected(domain) => Some(suggestion_message(domain)),
        ValidationStatus::Pending
        | ValidationStatus::Valid
        | ValidationStatus::WrongSchema
        | ValidationStatus::Unknown => None,
    }
}

/// Receives what a pipeline wants shown next to the input.
///
/// Calls may come from any runtime worker thread but never overlap for
/// one pipeline, and a call is only made while its result is still current.
/// A callback may call back into the pipeline on the same thread, e.g. to
/// accept a suggestion. Implementations marshal to their rendering thread
/// themselves.
pub trait ResultSink: Send + Sync {
    /// Shows `message` as the input's error, or clears it on `None`.
    fn display_error(&self, message: Option<&str>);

    /// Shows a clickable correction for `domain`.
    fn display_suggestion(&self, domain: &str, action: SuggestionAction);

    /// Decorates the input as valid.
    fn mark_valid(&self);

    /// Removes the valid decoration and any error.
    fn clear_decoration(&self);

    /// Replaces the input after a suggestion was accepted.
    fn replace_input(&self, _text: &str, _selection: Selection) {}
}

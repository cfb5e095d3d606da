// Event types for async communication

/// Lifecycle events for a single prompt/response session. The spawned
/// request task produces at most one `ContentReady` or `Failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEvent {
    /// The API returned a response
    ContentReady(String),
    /// The request failed
    Failure(String),
    /// The user asked to quit
    UserCancel,
}

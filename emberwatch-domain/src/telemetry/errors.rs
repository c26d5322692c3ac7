use thiserror::Error;

/// Errors raised while decoding or dispatching updates.
///
/// None of these abort the dispatch loop: the dispatcher logs the failure
/// and discards the offending event, so one bad update never interrupts
/// processing of subsequent updates.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The envelope carried a discriminator the core does not recognize.
    #[error("Unknown update type '{0}'; discarding event")]
    UnknownUpdateType(String),

    /// The envelope's payload did not decode as the declared update type.
    #[error("Malformed '{kind}' payload: {source}")]
    MalformedPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    /// The raw message was not a valid update envelope at all.
    #[error("Failed to parse update envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),
}

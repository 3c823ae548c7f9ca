//! Resolution of the compressor's client slot.

use super::traits::Ranker;
use crate::errors::CompressorResult;
use std::sync::Arc;

#[cfg(not(feature = "local"))]
use crate::errors::CompressorError;

/// Where the compressor gets its ranker client from.
///
/// Either the caller supplies a pre-built instance, or one is built lazily
/// from a model identifier on first use. Lazy construction is a pure function
/// of the model name; callers should treat it as potentially expensive and
/// prefer supplying a client for repeated use.
#[derive(Clone)]
pub enum ClientSource {
    /// Caller-supplied, pre-initialized ranker
    Provided(Arc<dyn Ranker>),
    /// Build a local ranker from this model identifier on first use
    Lazy {
        /// Model identifier the local engine loads
        model: String,
    },
}

impl ClientSource {
    /// Check at construction time that this source can ever produce a client.
    ///
    /// For `Lazy`, this verifies the local inference capability is compiled in
    /// and the model name is known to the engine. The model itself is not
    /// loaded here; a load failure on first use surfaces from `resolve`.
    pub fn validate(&self) -> CompressorResult<()> {
        match self {
            Self::Provided(_) => Ok(()),
            #[cfg(feature = "local")]
            Self::Lazy { model } => super::local::parse_model_name(model).map(|_| ()),
            #[cfg(not(feature = "local"))]
            Self::Lazy { model } => Err(missing_capability(model)),
        }
    }

    /// Produce a concrete client reference.
    ///
    /// `Provided` hands back the caller's instance; `Lazy` loads the model.
    pub fn resolve(&self) -> CompressorResult<Arc<dyn Ranker>> {
        match self {
            Self::Provided(client) => Ok(client.clone()),
            #[cfg(feature = "local")]
            Self::Lazy { model } => {
                Ok(Arc::new(super::local::LocalRanker::try_new(model)?))
            }
            #[cfg(not(feature = "local"))]
            Self::Lazy { model } => Err(missing_capability(model)),
        }
    }
}

impl std::fmt::Debug for ClientSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provided(client) => f
                .debug_tuple("Provided")
                .field(&client.model().to_string())
                .finish(),
            Self::Lazy { model } => f.debug_struct("Lazy").field("model", model).finish(),
        }
    }
}

#[cfg(not(feature = "local"))]
fn missing_capability(model: &str) -> CompressorError {
    CompressorError::Configuration {
        message: format!(
            "Cannot build a local ranker for model `{}`: this build has no local \
             inference support. Enable the `local` feature or supply a client.",
            model
        ),
    }
}

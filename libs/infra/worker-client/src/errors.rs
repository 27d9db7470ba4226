// [libs/infra/worker-client/src/errors.rs]
//! =================================================================
//! APARATO: ORCHESTRATOR CLIENT ERRORS
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE COMUNICACIÓN
//! =================================================================

use thiserror::Error;

/// Transient errors are retried by `OrchestratorClient`; permanent ones are
/// surfaced to the caller immediately (`spec.md` §7's `ORCHESTRATOR_TRANSIENT`
/// / `ORCHESTRATOR_PERMANENT` pair).
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("NETWORK_UNREACHABLE: {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("ENVELOPE_CORRUPTION: {0}")]
    DecodingFault(#[from] serde_json::Error),

    #[error("ORCHESTRATOR_TRANSIENT: server returned status {0}")]
    Transient(u16),

    #[error("ORCHESTRATOR_PERMANENT: server returned status {0}")]
    Permanent(u16),

    #[error("TIMEOUT_READY: resource did not reach ready state within the deadline")]
    TimeoutReady,
}

impl ClientError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::NetworkFault(_) | ClientError::Transient(_))
    }
}

use axum::http::HeaderMap;
use tracing::warn;

use crate::ledger::errors::LedgerError;

/// Header carrying the admin shared secret
pub(crate) const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Capability check gating privileged request transitions
/// (approve, mark-sent, complete). The ledger trusts the verdict only;
/// how the secret is stored or rotated is not its concern.
pub(crate) trait AdminGate: Send + Sync {
    fn authorize(&self, token: Option<&str>) -> bool;
}

/// Shared-secret implementation of [`AdminGate`]
#[derive(Debug)]
pub(crate) struct SharedSecretGate {
    secret: String,
}

impl SharedSecretGate {
    pub(crate) fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl AdminGate for SharedSecretGate {
    fn authorize(&self, token: Option<&str>) -> bool {
        token.is_some_and(|token| token == self.secret)
    }
}

/// Extract the admin token header and consult the gate
pub(crate) fn require_admin(gate: &dyn AdminGate, headers: &HeaderMap) -> Result<(), LedgerError> {
    let token = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if gate.authorize(token) {
        Ok(())
    } else {
        warn!("Rejected privileged transition: bad or missing admin token");
        Err(LedgerError::Unauthorized)
    }
}

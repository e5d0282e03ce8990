use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::require_admin;
use crate::ledger::errors::LedgerError;
use crate::ledger::store::Ledger;
use crate::requests::types::{WithdrawRequest, WithdrawStatus};
use crate::AppState;

impl Ledger {
    /// Queue the wallet's entire current balance for an on-chain payout.
    ///
    /// The balance is zeroed in the same critical section that observes it,
    /// so a concurrent second create sees zero and fails with `NoBalance`
    /// instead of queuing the same funds twice.
    pub(crate) async fn create_withdraw(
        &self,
        wallet: &str,
    ) -> Result<WithdrawRequest, LedgerError> {
        if wallet.is_empty() {
            return Err(LedgerError::MissingFields("wallet"));
        }

        let mut state = self.state.write().await;
        let amount = state.drain_balance(wallet);
        if amount == 0 {
            return Err(LedgerError::NoBalance);
        }

        let request = WithdrawRequest::new(wallet, amount);
        state.withdrawals.push(request.clone());
        Ok(request)
    }

    pub(crate) async fn approve_withdraw(&self, id: &str) -> Result<WithdrawRequest, LedgerError> {
        let mut state = self.state.write().await;
        let request = state
            .withdrawals
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        request.approve()?;
        Ok(request.clone())
    }

    /// Mark an approved withdraw as dispatched. No balance mutation: the
    /// credit was already removed at creation and the payout itself is
    /// performed out-of-band by the settlement agent.
    pub(crate) async fn mark_withdraw_sent(
        &self,
        id: &str,
    ) -> Result<WithdrawRequest, LedgerError> {
        let mut state = self.state.write().await;
        let request = state
            .withdrawals
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        request.mark_sent()?;
        Ok(request.clone())
    }

    pub(crate) async fn list_withdrawals(
        &self,
        status: Option<WithdrawStatus>,
        wallet: Option<&str>,
    ) -> Vec<WithdrawRequest> {
        let state = self.state.read().await;
        state
            .withdrawals
            .iter()
            .filter(|request| status.map_or(true, |s| request.status == s))
            .filter(|request| wallet.map_or(true, |w| request.wallet == w))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateWithdrawBody {
    pub wallet: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WithdrawFilter {
    pub status: Option<WithdrawStatus>,
    pub wallet: Option<String>,
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateWithdrawBody>,
) -> Result<Json<WithdrawRequest>, LedgerError> {
    let request = state.ledger.create_withdraw(&body.wallet).await?;
    info!(id = %request.id, wallet = %request.wallet, amount = request.amount, "Created withdraw request");
    Ok(Json(request))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(filter): Query<WithdrawFilter>,
) -> Json<Vec<WithdrawRequest>> {
    let requests = state
        .ledger
        .list_withdrawals(filter.status, filter.wallet.as_deref())
        .await;
    Json(requests)
}

pub(crate) async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<WithdrawRequest>, LedgerError> {
    require_admin(state.admin_gate.as_ref(), &headers)?;
    let request = state.ledger.approve_withdraw(&id).await?;
    info!(id = %request.id, "Approved withdraw request");
    Ok(Json(request))
}

pub(crate) async fn mark_sent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<WithdrawRequest>, LedgerError> {
    require_admin(state.admin_gate.as_ref(), &headers)?;
    let request = state.ledger.mark_withdraw_sent(&id).await?;
    info!(id = %request.id, "Marked withdraw request sent");
    Ok(Json(request))
}

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
use crate::requests::types::{BridgeDirection, BridgeRequest, BridgeStatus};
use crate::AppState;

/// Validated input for creating a bridge request
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateBridgeBody {
    pub wallet: String,
    pub amount: u64,
    pub thr_address: String,
    pub direction: BridgeDirection,
}

impl Ledger {
    /// Create a bridge request.
    ///
    /// The two directions represent opposite custody events, so the ledger
    /// is touched at different points of the lifecycle:
    /// - `drx-to-thr` (lock leg) debits the wallet here, atomically with
    ///   record creation;
    /// - `thr-to-drx` (unlock leg) leaves the balance alone until the
    ///   request completes, since the counter-chain burn already happened
    ///   externally.
    pub(crate) async fn create_bridge(
        &self,
        body: &CreateBridgeBody,
    ) -> Result<BridgeRequest, LedgerError> {
        if body.wallet.is_empty() {
            return Err(LedgerError::MissingFields("wallet"));
        }
        if body.thr_address.is_empty() {
            return Err(LedgerError::MissingFields("thr_address"));
        }
        if body.amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let mut state = self.state.write().await;
        if body.direction == BridgeDirection::DrxToThr {
            state.debit(&body.wallet, body.amount)?;
        }

        let request =
            BridgeRequest::new(&body.wallet, body.amount, &body.thr_address, body.direction);
        state.bridges.push(request.clone());
        Ok(request)
    }

    pub(crate) async fn approve_bridge(&self, id: &str) -> Result<BridgeRequest, LedgerError> {
        let mut state = self.state.write().await;
        let request = state
            .bridges
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        request.approve()?;
        Ok(request.clone())
    }

    /// Complete an approved bridge request. The unlock leg credits the
    /// wallet here, the only point at which that leg touches the ledger;
    /// the lock leg was already debited at creation.
    pub(crate) async fn complete_bridge(&self, id: &str) -> Result<BridgeRequest, LedgerError> {
        let mut state = self.state.write().await;
        let index = state
            .bridges
            .iter()
            .position(|request| request.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        state.bridges[index].complete()?;

        if state.bridges[index].direction == BridgeDirection::ThrToDrx {
            let wallet = state.bridges[index].wallet.clone();
            let amount = state.bridges[index].amount;
            // amount > 0 is enforced at creation, so this cannot fail
            state.credit(&wallet, amount)?;
        }

        Ok(state.bridges[index].clone())
    }

    pub(crate) async fn list_bridges(
        &self,
        status: Option<BridgeStatus>,
        wallet: Option<&str>,
    ) -> Vec<BridgeRequest> {
        let state = self.state.read().await;
        state
            .bridges
            .iter()
            .filter(|request| status.map_or(true, |s| request.status == s))
            .filter(|request| wallet.map_or(true, |w| request.wallet == w))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BridgeFilter {
    pub status: Option<BridgeStatus>,
    pub wallet: Option<String>,
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBridgeBody>,
) -> Result<Json<BridgeRequest>, LedgerError> {
    let request = state.ledger.create_bridge(&body).await?;
    info!(
        id = %request.id,
        wallet = %request.wallet,
        amount = request.amount,
        direction = ?request.direction,
        "Created bridge request"
    );
    Ok(Json(request))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(filter): Query<BridgeFilter>,
) -> Json<Vec<BridgeRequest>> {
    let requests = state
        .ledger
        .list_bridges(filter.status, filter.wallet.as_deref())
        .await;
    Json(requests)
}

pub(crate) async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BridgeRequest>, LedgerError> {
    require_admin(state.admin_gate.as_ref(), &headers)?;
    let request = state.ledger.approve_bridge(&id).await?;
    info!(id = %request.id, "Approved bridge request");
    Ok(Json(request))
}

pub(crate) async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BridgeRequest>, LedgerError> {
    require_admin(state.admin_gate.as_ref(), &headers)?;
    let request = state.ledger.complete_bridge(&id).await?;
    info!(id = %request.id, direction = ?request.direction, "Completed bridge request");
    Ok(Json(request))
}

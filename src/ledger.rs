pub(crate) mod errors;
pub(crate) mod store;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Item;
use crate::ledger::errors::LedgerError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct BalanceResponse {
    pub wallet: String,
    pub balance: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct InventoryResponse {
    pub wallet: String,
    pub inventory: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PurchaseResponse {
    pub wallet: String,
    pub item: Item,
    pub balance: u64,
    pub inventory: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AmountBody {
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PurchaseBody {
    pub item_id: String,
}

pub(crate) async fn get_balance(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Json<BalanceResponse> {
    let balance = state.ledger.balance(&wallet).await;
    Json(BalanceResponse { wallet, balance })
}

pub(crate) async fn get_inventory(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Json<InventoryResponse> {
    let inventory = state.ledger.inventory(&wallet).await;
    Json(InventoryResponse { wallet, inventory })
}

pub(crate) async fn credit(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
    Json(body): Json<AmountBody>,
) -> Result<Json<BalanceResponse>, LedgerError> {
    let balance = state.ledger.credit(&wallet, body.amount).await?;
    info!(%wallet, amount = body.amount, balance, "Credited wallet");
    Ok(Json(BalanceResponse { wallet, balance }))
}

pub(crate) async fn debit(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
    Json(body): Json<AmountBody>,
) -> Result<Json<BalanceResponse>, LedgerError> {
    let balance = state.ledger.debit(&wallet, body.amount).await?;
    info!(%wallet, amount = body.amount, balance, "Debited wallet");
    Ok(Json(BalanceResponse { wallet, balance }))
}

pub(crate) async fn purchase(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
    Json(body): Json<PurchaseBody>,
) -> Result<Json<PurchaseResponse>, LedgerError> {
    let item = state
        .catalog
        .get(&body.item_id)
        .ok_or_else(|| LedgerError::ItemNotFound(body.item_id.clone()))?
        .clone();

    let outcome = state.ledger.purchase(&wallet, &item).await?;
    info!(%wallet, item = %item.id, price = item.price, balance = outcome.balance, "Purchased item");
    Ok(Json(PurchaseResponse {
        wallet,
        item,
        balance: outcome.balance,
        inventory: outcome.inventory,
    }))
}

pub(crate) async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.catalog.items().to_vec())
}

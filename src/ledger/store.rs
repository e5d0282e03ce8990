use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Item;
use crate::ledger::errors::LedgerError;
use crate::requests::types::{BridgeRequest, WithdrawRequest};

/// Mutable off-chain state: balances, inventories and the request audit trail.
/// Only reachable through [`Ledger`]'s lock, so every check-then-mutate
/// sequence runs as one critical section.
#[derive(Debug, Default)]
pub(crate) struct LedgerState {
    balances: HashMap<String, u64>,
    inventories: HashMap<String, Vec<String>>,
    pub(crate) withdrawals: Vec<WithdrawRequest>,
    pub(crate) bridges: Vec<BridgeRequest>,
}

impl LedgerState {
    /// Unknown wallets read as zero; wallets are never explicitly created
    pub(crate) fn balance(&self, wallet: &str) -> u64 {
        self.balances.get(wallet).copied().unwrap_or(0)
    }

    pub(crate) fn inventory(&self, wallet: &str) -> Vec<String> {
        self.inventories.get(wallet).cloned().unwrap_or_default()
    }

    pub(crate) fn credit(&mut self, wallet: &str, amount: u64) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self.balances.entry(wallet.to_string()).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(*balance)
    }

    pub(crate) fn debit(&mut self, wallet: &str, amount: u64) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let available = self.balance(wallet);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                required: amount,
            });
        }
        let balance = self.balances.entry(wallet.to_string()).or_insert(0);
        *balance -= amount;
        Ok(*balance)
    }

    /// Zero the wallet's balance and return the amount that was held
    pub(crate) fn drain_balance(&mut self, wallet: &str) -> u64 {
        self.balances.remove(wallet).unwrap_or(0)
    }

    fn add_item(&mut self, wallet: &str, item_id: &str) {
        self.inventories
            .entry(wallet.to_string())
            .or_default()
            .push(item_id.to_string());
    }
}

/// Outcome of a successful purchase
#[derive(Debug, Clone)]
pub(crate) struct PurchaseOutcome {
    pub balance: u64,
    pub inventory: Vec<String>,
}

/// Off-chain credit ledger owning its own synchronization.
///
/// Handlers share it as [`SharedLedger`]; all mutations take the write lock
/// for the full operation, which serializes concurrent check-then-mutate
/// sequences on the same wallet.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    pub(crate) state: RwLock<LedgerState>,
}

/// Shared ledger handle
pub(crate) type SharedLedger = Arc<Ledger>;

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn balance(&self, wallet: &str) -> u64 {
        self.state.read().await.balance(wallet)
    }

    pub(crate) async fn inventory(&self, wallet: &str) -> Vec<String> {
        self.state.read().await.inventory(wallet)
    }

    pub(crate) async fn credit(&self, wallet: &str, amount: u64) -> Result<u64, LedgerError> {
        self.state.write().await.credit(wallet, amount)
    }

    pub(crate) async fn debit(&self, wallet: &str, amount: u64) -> Result<u64, LedgerError> {
        self.state.write().await.debit(wallet, amount)
    }

    /// Debit the item price and append the item to the wallet's inventory.
    /// One logical transaction: a failed debit leaves the inventory untouched.
    pub(crate) async fn purchase(
        &self,
        wallet: &str,
        item: &Item,
    ) -> Result<PurchaseOutcome, LedgerError> {
        let mut state = self.state.write().await;
        let balance = state.debit(wallet, item.price)?;
        state.add_item(wallet, &item.id);
        Ok(PurchaseOutcome {
            balance,
            inventory: state.inventory(wallet),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: u64) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_missing_wallet_reads_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance("nobody").await, 0);
        assert!(ledger.inventory("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn test_credit_accumulates() {
        let ledger = Ledger::new();
        assert_eq!(ledger.credit("w1", 100).await.unwrap(), 100);
        assert_eq!(ledger.credit("w1", 50).await.unwrap(), 150);
        assert_eq!(ledger.balance("w1").await, 150);
    }

    #[tokio::test]
    async fn test_zero_amounts_are_rejected() {
        let ledger = Ledger::new();
        assert_eq!(
            ledger.credit("w1", 0).await.unwrap_err(),
            LedgerError::InvalidAmount
        );
        assert_eq!(
            ledger.debit("w1", 0).await.unwrap_err(),
            LedgerError::InvalidAmount
        );
    }

    #[tokio::test]
    async fn test_debit_insufficient_leaves_balance() {
        let ledger = Ledger::new();
        ledger.credit("w1", 100).await.unwrap();

        let err = ledger.debit("w1", 150).await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                available: 100,
                required: 150,
            }
        );
        assert_eq!(ledger.balance("w1").await, 100);

        assert_eq!(ledger.debit("w1", 100).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purchase_debits_and_appends() {
        let ledger = Ledger::new();
        ledger.credit("w1", 500).await.unwrap();

        let outcome = ledger.purchase("w1", &item("sword", 200)).await.unwrap();
        assert_eq!(outcome.balance, 300);
        assert_eq!(outcome.inventory, vec!["sword".to_string()]);

        // Repeated purchases append again
        let outcome = ledger.purchase("w1", &item("sword", 200)).await.unwrap();
        assert_eq!(outcome.balance, 100);
        assert_eq!(outcome.inventory.len(), 2);
    }

    #[tokio::test]
    async fn test_purchase_is_atomic_on_insufficient_balance() {
        let ledger = Ledger::new();
        ledger.credit("w1", 100).await.unwrap();

        let err = ledger.purchase("w1", &item("shield", 250)).await.unwrap_err();
        assert_eq!(err.kind(), "InsufficientBalance");
        assert_eq!(ledger.balance("w1").await, 100);
        assert!(ledger.inventory("w1").await.is_empty());
    }
}

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ledger::errors::LedgerError;

/// Generate an opaque request id: millisecond timestamp plus random hex suffix
pub(crate) fn new_request_id(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..0x0100_0000);
    format!("{}-{}-{:06x}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// Withdraw request status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum WithdrawStatus {
    Pending,
    Approved,
    Sent,
}

impl WithdrawStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            WithdrawStatus::Pending => "pending",
            WithdrawStatus::Approved => "approved",
            WithdrawStatus::Sent => "sent",
        }
    }
}

/// Request to pay out a wallet's entire off-chain balance on chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WithdrawRequest {
    pub id: String,
    pub wallet: String,
    /// Balance captured at creation time; never mutated afterward
    pub amount: u64,
    pub status: WithdrawStatus,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl WithdrawRequest {
    pub(crate) fn new(wallet: &str, amount: u64) -> Self {
        Self {
            id: new_request_id("wd"),
            wallet: wallet.to_string(),
            amount,
            status: WithdrawStatus::Pending,
            created_at: Utc::now(),
            approved_at: None,
            sent_at: None,
        }
    }

    /// `pending → approved`
    pub(crate) fn approve(&mut self) -> Result<(), LedgerError> {
        match self.status {
            WithdrawStatus::Pending => {
                self.status = WithdrawStatus::Approved;
                self.approved_at = Some(Utc::now());
                Ok(())
            }
            other => Err(LedgerError::InvalidTransition {
                current: other.as_str(),
                expected: "pending",
            }),
        }
    }

    /// `approved → sent`; the on-chain payout itself happens out-of-band
    pub(crate) fn mark_sent(&mut self) -> Result<(), LedgerError> {
        match self.status {
            WithdrawStatus::Approved => {
                self.status = WithdrawStatus::Sent;
                self.sent_at = Some(Utc::now());
                Ok(())
            }
            other => Err(LedgerError::InvalidTransition {
                current: other.as_str(),
                expected: "approved",
            }),
        }
    }
}

/// Bridge transfer direction; determines when the ledger is touched
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BridgeDirection {
    /// Lock leg: off-chain credit is debited at creation
    #[serde(rename = "drx-to-thr")]
    DrxToThr,
    /// Unlock leg: off-chain credit is credited at completion
    #[serde(rename = "thr-to-drx")]
    ThrToDrx,
}

/// Bridge request status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BridgeStatus {
    Pending,
    Approved,
    Completed,
}

impl BridgeStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            BridgeStatus::Pending => "pending",
            BridgeStatus::Approved => "approved",
            BridgeStatus::Completed => "completed",
        }
    }
}

/// Request to move value between the off-chain ledger and the counter-chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct BridgeRequest {
    pub id: String,
    pub wallet: String,
    pub amount: u64,
    /// Destination/source address on the counter-chain
    pub thr_address: String,
    pub direction: BridgeDirection,
    pub status: BridgeStatus,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BridgeRequest {
    pub(crate) fn new(
        wallet: &str,
        amount: u64,
        thr_address: &str,
        direction: BridgeDirection,
    ) -> Self {
        Self {
            id: new_request_id("br"),
            wallet: wallet.to_string(),
            amount,
            thr_address: thr_address.to_string(),
            direction,
            status: BridgeStatus::Pending,
            created_at: Utc::now(),
            approved_at: None,
            completed_at: None,
        }
    }

    /// `pending → approved`; no balance effect in either direction
    pub(crate) fn approve(&mut self) -> Result<(), LedgerError> {
        match self.status {
            BridgeStatus::Pending => {
                self.status = BridgeStatus::Approved;
                self.approved_at = Some(Utc::now());
                Ok(())
            }
            other => Err(LedgerError::InvalidTransition {
                current: other.as_str(),
                expected: "pending",
            }),
        }
    }

    /// `approved → completed`; the caller applies the unlock-leg credit
    pub(crate) fn complete(&mut self) -> Result<(), LedgerError> {
        match self.status {
            BridgeStatus::Approved => {
                self.status = BridgeStatus::Completed;
                self.completed_at = Some(Utc::now());
                Ok(())
            }
            other => Err(LedgerError::InvalidTransition {
                current: other.as_str(),
                expected: "approved",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_request_ids_are_unique() {
        let ids: HashSet<String> = (0..200).map(|_| new_request_id("wd")).collect();
        assert_eq!(ids.len(), 200);
        assert!(ids.iter().all(|id| id.starts_with("wd-")));
    }

    #[test]
    fn test_withdraw_transitions_set_timestamps_once() {
        let mut request = WithdrawRequest::new("w1", 300);
        assert_eq!(request.status, WithdrawStatus::Pending);
        assert!(request.approved_at.is_none());

        request.approve().unwrap();
        let approved_at = request.approved_at.expect("approved_at set");

        request.mark_sent().unwrap();
        assert_eq!(request.status, WithdrawStatus::Sent);
        assert_eq!(request.approved_at, Some(approved_at));
        assert!(request.sent_at.is_some());
    }

    #[test]
    fn test_withdraw_approve_only_from_pending() {
        let mut request = WithdrawRequest::new("w1", 300);
        request.approve().unwrap();

        let err = request.approve().unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidTransition {
                current: "approved",
                expected: "pending",
            }
        );
        assert_eq!(request.status, WithdrawStatus::Approved);
    }

    #[test]
    fn test_withdraw_mark_sent_requires_approval() {
        let mut request = WithdrawRequest::new("w1", 300);
        let err = request.mark_sent().unwrap_err();
        assert_eq!(err.kind(), "InvalidTransition");
        assert_eq!(request.status, WithdrawStatus::Pending);
        assert!(request.sent_at.is_none());
    }

    #[test]
    fn test_bridge_complete_requires_approval() {
        let mut request = BridgeRequest::new("w2", 100, "thr1abc", BridgeDirection::ThrToDrx);
        let err = request.complete().unwrap_err();
        assert_eq!(err.kind(), "InvalidTransition");
        assert_eq!(request.status, BridgeStatus::Pending);

        request.approve().unwrap();
        request.complete().unwrap();
        assert_eq!(request.status, BridgeStatus::Completed);
        assert!(request.completed_at.is_some());
    }

    #[test]
    fn test_direction_serialization() {
        let json = serde_json::to_string(&BridgeDirection::DrxToThr).unwrap();
        assert_eq!(json, "\"drx-to-thr\"");
        let direction: BridgeDirection = serde_json::from_str("\"thr-to-drx\"").unwrap();
        assert_eq!(direction, BridgeDirection::ThrToDrx);
    }
}

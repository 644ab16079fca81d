//! Gateway transaction status.

use serde::{Deserialize, Serialize};

/// Status reported by the gateway for a sale transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Authorized,
    Authorizing,
    AuthorizationExpired,
    SubmittedForSettlement,
    Settling,
    SettlementPending,
    Settled,
    SettlementConfirmed,
    SettlementDeclined,
    ProcessorDeclined,
    GatewayRejected,
    Failed,
    Voided,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    /// The sale was accepted and is on its way to (or has reached) settlement.
    pub fn is_settling_or_settled(&self) -> bool {
        matches!(
            self,
            TransactionStatus::SubmittedForSettlement
                | TransactionStatus::Settling
                | TransactionStatus::SettlementPending
                | TransactionStatus::Settled
                | TransactionStatus::SettlementConfirmed
        )
    }

    /// The sale was refused by the processor or the gateway.
    pub fn is_declined(&self) -> bool {
        matches!(
            self,
            TransactionStatus::ProcessorDeclined
                | TransactionStatus::GatewayRejected
                | TransactionStatus::Failed
                | TransactionStatus::SettlementDeclined
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Authorized => "AUTHORIZED",
            TransactionStatus::Authorizing => "AUTHORIZING",
            TransactionStatus::AuthorizationExpired => "AUTHORIZATION_EXPIRED",
            TransactionStatus::SubmittedForSettlement => "SUBMITTED_FOR_SETTLEMENT",
            TransactionStatus::Settling => "SETTLING",
            TransactionStatus::SettlementPending => "SETTLEMENT_PENDING",
            TransactionStatus::Settled => "SETTLED",
            TransactionStatus::SettlementConfirmed => "SETTLEMENT_CONFIRMED",
            TransactionStatus::SettlementDeclined => "SETTLEMENT_DECLINED",
            TransactionStatus::ProcessorDeclined => "PROCESSOR_DECLINED",
            TransactionStatus::GatewayRejected => "GATEWAY_REJECTED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Voided => "VOIDED",
            TransactionStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_states() {
        assert!(TransactionStatus::SubmittedForSettlement.is_settling_or_settled());
        assert!(TransactionStatus::Settled.is_settling_or_settled());
        assert!(!TransactionStatus::Authorized.is_settling_or_settled());
        assert!(!TransactionStatus::ProcessorDeclined.is_settling_or_settled());
    }

    #[test]
    fn declined_states() {
        assert!(TransactionStatus::ProcessorDeclined.is_declined());
        assert!(TransactionStatus::GatewayRejected.is_declined());
        assert!(!TransactionStatus::Settling.is_declined());
        assert!(!TransactionStatus::Unknown.is_declined());
    }

    #[test]
    fn deserializes_gateway_names_and_unknowns() {
        let status: TransactionStatus = serde_json::from_str("\"SUBMITTED_FOR_SETTLEMENT\"").unwrap();
        assert_eq!(status, TransactionStatus::SubmittedForSettlement);

        let status: TransactionStatus = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(status, TransactionStatus::Unknown);
    }
}

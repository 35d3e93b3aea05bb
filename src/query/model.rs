use crate::bidding::model::CreditedTo;
use crate::error::UnknownVariant;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// 거래 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl TryFrom<String> for TransactionStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            _ => Err(UnknownVariant {
                kind: "transaction status",
                value,
            }),
        }
    }
}

// 거래 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub invoice_id: i64,
    pub bid_amount: Decimal,
    pub discount_rate: Decimal,
    #[sqlx(try_from = "String")]
    pub credited_to: CreditedTo,
    pub transaction_time: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,
}

/// 상태별 거래 목록 (대시보드용)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupedTransactions {
    pub pending: Vec<Transaction>,
    pub success: Vec<Transaction>,
}

use crate::error::UnknownVariant;
use crate::invoice::model::Invoice;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// 입찰 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl TryFrom<String> for BidStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownVariant {
                kind: "bid status",
                value,
            }),
        }
    }
}

/// 정산 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditedTo {
    Supplier,
    Buyer,
}

impl CreditedTo {
    /// 팩토링 인보이스는 공급자, 그 외는 구매자에게 정산
    pub fn for_invoice(invoice: &Invoice) -> Self {
        if invoice.is_factoring {
            Self::Supplier
        } else {
            Self::Buyer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supplier => "Supplier",
            Self::Buyer => "Buyer",
        }
    }
}

impl TryFrom<String> for CreditedTo {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Supplier" => Ok(Self::Supplier),
            "Buyer" => Ok(Self::Buyer),
            _ => Err(UnknownVariant {
                kind: "credited to",
                value,
            }),
        }
    }
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: i64,
    pub invoice_id: i64,
    /// 입찰 시점의 금융사 username 스냅샷
    #[sqlx(rename = "fusername")]
    pub financier_username: String,
    pub bid_amount: Decimal,
    pub discount_rate: Decimal,
    #[sqlx(try_from = "String")]
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub credited_to: CreditedTo,
    pub validity_period: Option<String>,
    pub terms: Option<String>,
}

/// 저장 전 입찰 (id 미할당)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBid {
    pub invoice_id: i64,
    pub financier_username: String,
    pub bid_amount: Decimal,
    pub discount_rate: Decimal,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub credited_to: CreditedTo,
    pub validity_period: Option<String>,
    pub terms: Option<String>,
}

impl NewBid {
    /// 저장소가 할당한 id로 입찰 생성
    pub fn into_bid(self, id: i64) -> Bid {
        Bid {
            id,
            invoice_id: self.invoice_id,
            financier_username: self.financier_username,
            bid_amount: self.bid_amount,
            discount_rate: self.discount_rate,
            status: self.status,
            created_at: self.created_at,
            credited_to: self.credited_to,
            validity_period: self.validity_period,
            terms: self.terms,
        }
    }
}

/// 입찰 요청 본문
///
/// `financier_id`는 받기만 하고 검증하지 않는다. 경로의 username이 기준이다.
/// 금액과 할인율 누락은 인보이스/금융사 확인 이후에 검증한다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    #[serde(default)]
    pub financier_id: Option<i64>,
    #[serde(default)]
    pub bid_amount: Option<Decimal>,
    #[serde(default)]
    pub discount_rate: Option<Decimal>,
    #[serde(default)]
    pub validity_period: Option<String>,
    #[serde(default)]
    pub terms: Option<String>,
}

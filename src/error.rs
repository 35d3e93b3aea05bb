// region:    --- Imports
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Market Error
/// 입찰 및 조회 서비스 오류
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Invoice not found")]
    InvoiceNotFound,

    #[error("Cannot bid on unapproved invoices")]
    InvoiceNotBiddable,

    #[error("A bid already exists for this invoice")]
    BidAlreadyExists,

    #[error("Financier not found")]
    FinancierNotFound,

    #[error("Invalid bid request: {0}")]
    InvalidBidRequest(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl MarketError {
    /// 클라이언트용 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvoiceNotFound => "INVOICE_NOT_FOUND",
            Self::InvoiceNotBiddable => "INVOICE_NOT_BIDDABLE",
            Self::BidAlreadyExists => "BID_ALREADY_EXISTS",
            Self::FinancierNotFound => "FINANCIER_NOT_FOUND",
            Self::InvalidBidRequest(_) => "INVALID_BID_REQUEST",
            Self::Unavailable(_) => "UNAVAILABLE",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<StoreError> for MarketError {
    fn from(e: StoreError) -> Self {
        Self::Unavailable(e.to_string())
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{:<12} --> 저장소 오류: {}", "Error", self);
        } else {
            info!("{:<12} --> 요청 거절: {}", "Error", self);
        }
        (
            status,
            Json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
// endregion: --- Market Error

// region:    --- Decode Error
/// 알 수 없는 상태 값 (DB 컬럼 디코딩 실패)
#[derive(Debug, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
// endregion: --- Decode Error

/// 입찰 관련 커맨드 처리
/// 인보이스당 입찰은 하나만 허용된다 (선착순, 교체 불가).
// region:    --- Imports
use crate::bidding::model::{Bid, BidRequest, BidStatus, CreditedTo, NewBid};
use crate::error::MarketError;
use crate::invoice::model::InvoiceStatus;
use crate::store::MarketplaceStore;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 입찰
pub async fn handle_place_bid(
    store: &dyn MarketplaceStore,
    invoice_id: i64,
    username: &str,
    request: BidRequest,
) -> Result<Bid, MarketError> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: invoice_id={}, username={}",
        "Command", invoice_id, username
    );

    let invoice = store
        .find_invoice_by_id(invoice_id)
        .await?
        .ok_or(MarketError::InvoiceNotFound)?;

    if invoice.status != InvoiceStatus::Approved {
        return Err(MarketError::InvoiceNotBiddable);
    }

    if !store.find_bids_by_invoice(invoice_id).await?.is_empty() {
        return Err(MarketError::BidAlreadyExists);
    }

    let financier = store
        .find_financier_by_username(username)
        .await?
        .ok_or(MarketError::FinancierNotFound)?;

    if let Some(financier_id) = request.financier_id {
        if financier_id != financier.id {
            warn!(
                "{:<12} --> 요청 financierId({})와 경로 username({}, id={}) 불일치: username 기준으로 처리",
                "Command", financier_id, username, financier.id
            );
        }
    }

    let (bid_amount, discount_rate) = validate_request(&request)?;

    let new_bid = NewBid {
        invoice_id,
        financier_username: username.to_string(),
        bid_amount,
        discount_rate,
        status: BidStatus::Pending,
        created_at: Utc::now(),
        credited_to: CreditedTo::for_invoice(&invoice),
        validity_period: request.validity_period,
        terms: request.terms,
    };

    // 중복 확인 이후 다른 요청이 먼저 저장한 경우 저장소가 None을 반환한다
    let bid = store
        .save_bid(new_bid)
        .await?
        .ok_or(MarketError::BidAlreadyExists)?;

    info!(
        "{:<12} --> 입찰 성공: bid_id={}, invoice_id={}, credited_to={}",
        "Command",
        bid.id,
        bid.invoice_id,
        bid.credited_to.as_str()
    );
    Ok(bid)
}

/// 입찰 금액은 0보다 크고 할인율은 [0, 1) 범위
fn validate_request(request: &BidRequest) -> Result<(Decimal, Decimal), MarketError> {
    let bid_amount = request
        .bid_amount
        .ok_or_else(|| MarketError::InvalidBidRequest("bidAmount is required".to_string()))?;
    let discount_rate = request
        .discount_rate
        .ok_or_else(|| MarketError::InvalidBidRequest("discountRate is required".to_string()))?;

    if bid_amount <= Decimal::ZERO {
        return Err(MarketError::InvalidBidRequest(
            "bidAmount must be greater than zero".to_string(),
        ));
    }
    if discount_rate < Decimal::ZERO || discount_rate >= Decimal::ONE {
        return Err(MarketError::InvalidBidRequest(
            "discountRate must be between 0 (inclusive) and 1 (exclusive)".to_string(),
        ));
    }
    Ok((bid_amount, discount_rate))
}
// endregion: --- Commands

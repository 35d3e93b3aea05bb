// region:    --- Imports
use crate::bidding::commands::handle_place_bid;
use crate::bidding::model::BidRequest;
use crate::error::MarketError;
use crate::query;
use crate::store::SharedStore;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Router
/// 라우터 설정
pub fn routes(store: SharedStore) -> Router {
    // 대시보드 클라이언트를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let financier_routes = Router::new()
        .route("/invoices", get(handle_get_approved_invoices))
        .route("/invoices/available", get(handle_get_available_invoices))
        .route(
            "/invoices/:invoice_id/:username/bid",
            post(handle_place_bid_request),
        )
        .route("/grouped", get(handle_get_grouped_transactions))
        .route("/bids/:username", get(handle_get_financier_bids));

    Router::new()
        .nest("/api/financier", financier_routes)
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 64))
        .with_state(store)
}
// endregion: --- Router

// region:    --- Command Handlers

/// 입찰 요청 처리
pub async fn handle_place_bid_request(
    State(store): State<SharedStore>,
    Path((invoice_id, username)): Path<(i64, String)>,
    body: Result<Json<BidRequest>, JsonRejection>,
) -> Result<impl IntoResponse, MarketError> {
    // 본문 디코딩 실패도 {error, code} 형식의 400으로 응답
    let Json(request) = body.map_err(|e| MarketError::InvalidBidRequest(e.body_text()))?;
    info!(
        "{:<12} --> 입찰 요청: invoice_id={}, username={}, {:?}",
        "Handler", invoice_id, username, request
    );
    let bid = handle_place_bid(store.as_ref(), invoice_id, &username, request).await?;
    Ok(Json(serde_json::json!({
        "message": "Bid placed successfully",
        "bidId": bid.id,
    })))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 승인 인보이스 조회
pub async fn handle_get_approved_invoices(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, MarketError> {
    info!("{:<12} --> 승인 인보이스 조회", "HandlerQuery");
    let invoices = query::handlers::list_approved_invoices(store.as_ref()).await?;
    Ok(Json(invoices))
}

/// 입찰 가능 인보이스 조회
pub async fn handle_get_available_invoices(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, MarketError> {
    info!("{:<12} --> 입찰 가능 인보이스 조회", "HandlerQuery");
    let invoices = query::handlers::list_available_invoices_for_bidding(store.as_ref()).await?;
    Ok(Json(invoices))
}

/// 상태별 거래 조회
pub async fn handle_get_grouped_transactions(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, MarketError> {
    info!("{:<12} --> 상태별 거래 조회", "HandlerQuery");
    let grouped = query::handlers::get_grouped_transactions(store.as_ref()).await?;
    Ok(Json(grouped))
}

/// 금융사 입찰 이력 조회
pub async fn handle_get_financier_bids(
    State(store): State<SharedStore>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, MarketError> {
    info!("{:<12} --> 금융사 입찰 이력 조회: {}", "HandlerQuery", username);
    let bids = query::handlers::list_financier_bids(store.as_ref(), &username).await?;
    Ok(Json(bids))
}

/// 상태 확인
pub async fn handle_health(State(store): State<SharedStore>) -> impl IntoResponse {
    match store.ping().await {
        Ok(_) => (StatusCode::OK, "OK").into_response(),
        Err(e) => {
            error!("{:<12} --> 저장소 연결 실패: {}", "Health", e);
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE").into_response()
        }
    }
}

// endregion: --- Query Handlers

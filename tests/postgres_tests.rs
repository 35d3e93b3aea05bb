//! PostgreSQL 저장소 테스트
//! `DATABASE_URL`이 가리키는 데이터베이스가 필요하다: `cargo test -- --ignored`
use chrono::{Duration, Utc};
use ledger_bridge::bidding::commands::handle_place_bid;
use ledger_bridge::bidding::model::{BidRequest, CreditedTo};
use ledger_bridge::config::Config;
use ledger_bridge::database::DatabaseManager;
use ledger_bridge::error::MarketError;
use ledger_bridge::invoice::model::Invoice;
use ledger_bridge::query;
use ledger_bridge::store::{MarketplaceStore, PostgresStore};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// 트레이싱 초기화
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// 데이터베이스 매니저 및 저장소 설정
async fn setup() -> (Arc<DatabaseManager>, Arc<PostgresStore>) {
    let config = Config::from_env().expect("DATABASE_URL must be set");
    let db_manager = Arc::new(DatabaseManager::new(&config).await.unwrap());
    db_manager.initialize_database(false, false).await.unwrap();
    let store = Arc::new(PostgresStore::new(Arc::clone(&db_manager)));
    (db_manager, store)
}

/// 테스트용 인보이스 생성
async fn create_test_invoice(db_manager: &DatabaseManager, status: &str, is_factoring: bool) -> Invoice {
    let invoice_number = format!("TEST-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let status = status.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Invoice>(
                    "INSERT INTO invoices (invoice_number, amount, due_date, status, is_factoring)
                     VALUES ($1, $2, CURRENT_DATE + 30, $3, $4)
                     RETURNING id, invoice_number, amount, due_date, status, is_factoring, created_at",
                )
                .bind(&invoice_number)
                .bind(Decimal::new(250_000, 0))
                .bind(&status)
                .bind(is_factoring)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .unwrap()
}

/// 테스트용 금융사 생성
async fn create_test_financier(db_manager: &DatabaseManager, username: &str) {
    sqlx::query("INSERT INTO financiers (username) VALUES ($1) ON CONFLICT (username) DO NOTHING")
        .bind(username)
        .execute(db_manager.pool())
        .await
        .unwrap();
}

/// 테스트용 거래 생성
async fn create_test_transaction(db_manager: &DatabaseManager, invoice_id: i64, status: &str, minutes_ago: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO transactions (invoice_id, bid_amount, discount_rate, credited_to, transaction_time, status)
         VALUES ($1, $2, $3, 'Buyer', $4, $5)
         RETURNING id",
    )
    .bind(invoice_id)
    .bind(Decimal::new(240_000, 0))
    .bind(Decimal::new(5, 2))
    .bind(Utc::now() - Duration::minutes(minutes_ago))
    .bind(status)
    .fetch_one(db_manager.pool())
    .await
    .unwrap()
}

fn bid_request(amount: i64) -> BidRequest {
    BidRequest {
        financier_id: None,
        bid_amount: Some(Decimal::new(amount, 0)),
        discount_rate: Some(Decimal::new(5, 2)),
        validity_period: Some("30 days".to_string()),
        terms: None,
    }
}

/// 입찰 및 조회 테스트
#[tokio::test]
#[ignore]
async fn test_place_bid_roundtrip() {
    let (db_manager, store) = setup().await;
    create_test_financier(&db_manager, "pg-test-financier").await;
    let invoice = create_test_invoice(&db_manager, "APPROVED", false).await;

    let available = query::handlers::list_available_invoices_for_bidding(store.as_ref())
        .await
        .unwrap();
    assert!(available.iter().any(|i| i.id == invoice.id));

    let bid = handle_place_bid(store.as_ref(), invoice.id, "pg-test-financier", bid_request(1000))
        .await
        .unwrap();
    assert_eq!(bid.credited_to, CreditedTo::Buyer);

    let stored = store.find_bids_by_invoice(invoice.id).await.unwrap();
    assert_eq!(stored, vec![bid]);

    let available = query::handlers::list_available_invoices_for_bidding(store.as_ref())
        .await
        .unwrap();
    assert!(!available.iter().any(|i| i.id == invoice.id));
}

/// 초안 인보이스 입찰 테스트
#[tokio::test]
#[ignore]
async fn test_draft_invoice_not_biddable() {
    let (db_manager, store) = setup().await;
    create_test_financier(&db_manager, "pg-test-financier").await;
    let invoice = create_test_invoice(&db_manager, "DRAFT", true).await;

    let err = handle_place_bid(store.as_ref(), invoice.id, "pg-test-financier", bid_request(1000))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::InvoiceNotBiddable));
}

/// 동시성 입찰 테스트
#[tokio::test]
#[ignore]
async fn test_concurrent_bidding() {
    init_tracing();

    let (db_manager, store) = setup().await;
    create_test_financier(&db_manager, "pg-test-financier").await;
    let invoice = create_test_invoice(&db_manager, "APPROVED", true).await;

    // 50개의 동시 입찰 생성
    let mut handles = vec![];
    for i in 1..=50 {
        let store = Arc::clone(&store);
        let invoice_id = invoice.id;
        handles.push(tokio::spawn(async move {
            handle_place_bid(store.as_ref(), invoice_id, "pg-test-financier", bid_request(1000 * i)).await
        }));
    }

    let mut successful_bids = 0;
    let mut rejected_bids = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successful_bids += 1,
            Err(MarketError::BidAlreadyExists) => rejected_bids += 1,
            Err(e) => panic!("예상하지 못한 오류: {:?}", e),
        }
    }
    info!("성공한 입찰 수: {}, 거절된 입찰 수: {}", successful_bids, rejected_bids);

    assert_eq!(successful_bids, 1);
    assert_eq!(rejected_bids, 49);
    assert_eq!(store.find_bids_by_invoice(invoice.id).await.unwrap().len(), 1);
}

/// 상태별 거래 정렬 테스트
#[tokio::test]
#[ignore]
async fn test_grouped_transactions_order() {
    let (db_manager, store) = setup().await;
    let invoice = create_test_invoice(&db_manager, "APPROVED", false).await;
    let older = create_test_transaction(&db_manager, invoice.id, "PENDING", 30).await;
    let newer = create_test_transaction(&db_manager, invoice.id, "PENDING", 1).await;
    let failed = create_test_transaction(&db_manager, invoice.id, "FAILED", 1).await;

    let grouped = query::handlers::get_grouped_transactions(store.as_ref())
        .await
        .unwrap();
    let pending: Vec<i64> = grouped.pending.iter().map(|t| t.id).collect();
    let newer_pos = pending.iter().position(|id| *id == newer).unwrap();
    let older_pos = pending.iter().position(|id| *id == older).unwrap();
    assert!(newer_pos < older_pos);
    assert!(!pending.contains(&failed));
    assert!(!grouped.success.iter().any(|t| t.id == failed));
}

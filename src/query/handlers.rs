// region:    --- Imports
use super::model::{GroupedTransactions, TransactionStatus};
use crate::bidding::model::Bid;
use crate::error::MarketError;
use crate::invoice::model::{Invoice, InvoiceStatus};
use crate::store::MarketplaceStore;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 승인된 인보이스 조회
pub async fn list_approved_invoices(
    store: &dyn MarketplaceStore,
) -> Result<Vec<Invoice>, MarketError> {
    info!("{:<12} --> 승인 인보이스 조회", "Query");
    Ok(store.find_invoices_by_status(InvoiceStatus::Approved).await?)
}

/// 입찰 가능한 인보이스 조회 (승인 + 입찰 없음)
pub async fn list_available_invoices_for_bidding(
    store: &dyn MarketplaceStore,
) -> Result<Vec<Invoice>, MarketError> {
    info!("{:<12} --> 입찰 가능 인보이스 조회", "Query");
    Ok(store.find_approved_invoices_without_any_bid().await?)
}

/// 상태별 거래 조회
pub async fn get_grouped_transactions(
    store: &dyn MarketplaceStore,
) -> Result<GroupedTransactions, MarketError> {
    info!("{:<12} --> 상태별 거래 조회", "Query");
    let pending = store
        .find_transactions_by_status_ordered_by_time_desc(TransactionStatus::Pending)
        .await?;
    let success = store
        .find_transactions_by_status_ordered_by_time_desc(TransactionStatus::Success)
        .await?;
    Ok(GroupedTransactions { pending, success })
}

/// 금융사 입찰 이력 조회
pub async fn list_financier_bids(
    store: &dyn MarketplaceStore,
    username: &str,
) -> Result<Vec<Bid>, MarketError> {
    info!("{:<12} --> 금융사 입찰 이력 조회: {}", "Query", username);
    if store.find_financier_by_username(username).await?.is_none() {
        return Err(MarketError::FinancierNotFound);
    }
    Ok(store.find_bids_by_financier(username).await?)
}

// endregion: --- Query Handlers

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::commands::handle_place_bid;
    use crate::bidding::model::{BidRequest, CreditedTo};
    use crate::invoice::model::Financier;
    use crate::query::model::Transaction;
    use crate::store::InMemoryStore;
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn invoice(id: i64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id,
            invoice_number: format!("INV-{}", id),
            amount: Decimal::new(150_000, 0),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            status,
            is_factoring: id % 2 == 0,
            created_at: Utc::now(),
        }
    }

    fn transaction(id: i64, status: TransactionStatus, minutes_ago: i64) -> Transaction {
        Transaction {
            id,
            invoice_id: 1,
            bid_amount: Decimal::new(140_000, 0),
            discount_rate: Decimal::new(5, 2),
            credited_to: CreditedTo::Buyer,
            transaction_time: Utc::now() - Duration::minutes(minutes_ago),
            status,
        }
    }

    async fn setup() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.add_invoice(invoice(1, InvoiceStatus::Approved)).await;
        store.add_invoice(invoice(2, InvoiceStatus::Approved)).await;
        store.add_invoice(invoice(3, InvoiceStatus::Draft)).await;
        store.add_invoice(invoice(4, InvoiceStatus::Rejected)).await;
        store.add_invoice(invoice(5, InvoiceStatus::Approved)).await;
        store
            .add_financier(Financier {
                id: 1,
                username: "acme".to_string(),
                created_at: Utc::now(),
            })
            .await;
        store
    }

    fn bid_request() -> BidRequest {
        BidRequest {
            financier_id: None,
            bid_amount: Some(Decimal::new(1000, 0)),
            discount_rate: Some(Decimal::new(5, 2)),
            validity_period: None,
            terms: None,
        }
    }

    #[tokio::test]
    async fn test_list_approved_invoices() {
        let store = setup().await;
        let ids: Vec<i64> = list_approved_invoices(&store)
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 5]);
    }

    #[tokio::test]
    async fn test_available_is_approved_minus_bid() {
        let store = setup().await;
        handle_place_bid(&store, 2, "acme", bid_request()).await.unwrap();

        let approved: HashSet<i64> = list_approved_invoices(&store)
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        let available: HashSet<i64> = list_available_invoices_for_bidding(&store)
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();

        let bid: HashSet<i64> = [2].into_iter().collect();
        let expected: HashSet<i64> = approved.difference(&bid).copied().collect();
        assert_eq!(available, expected);
    }

    #[tokio::test]
    async fn test_grouped_transactions_partitioned_and_ordered() {
        let store = setup().await;
        store.add_transaction(transaction(1, TransactionStatus::Pending, 30)).await;
        store.add_transaction(transaction(2, TransactionStatus::Success, 10)).await;
        store.add_transaction(transaction(3, TransactionStatus::Pending, 5)).await;
        store.add_transaction(transaction(4, TransactionStatus::Failed, 1)).await;
        store.add_transaction(transaction(5, TransactionStatus::Success, 60)).await;
        store.add_transaction(transaction(6, TransactionStatus::Pending, 90)).await;

        let grouped = get_grouped_transactions(&store).await.unwrap();

        let pending: Vec<i64> = grouped.pending.iter().map(|t| t.id).collect();
        let success: Vec<i64> = grouped.success.iter().map(|t| t.id).collect();
        assert_eq!(pending, vec![3, 1, 6]);
        assert_eq!(success, vec![2, 5]);
        assert!(grouped
            .pending
            .windows(2)
            .all(|w| w[0].transaction_time >= w[1].transaction_time));
    }

    #[tokio::test]
    async fn test_grouped_transactions_same_time_ordered_by_id_desc() {
        let store = setup().await;
        let at = Utc::now() - Duration::minutes(15);
        for id in [4, 9, 7] {
            let mut t = transaction(id, TransactionStatus::Pending, 0);
            t.transaction_time = at;
            store.add_transaction(t).await;
        }
        store.add_transaction(transaction(2, TransactionStatus::Pending, 1)).await;

        let grouped = get_grouped_transactions(&store).await.unwrap();
        let pending: Vec<i64> = grouped.pending.iter().map(|t| t.id).collect();
        assert_eq!(pending, vec![2, 9, 7, 4]);
    }

    #[tokio::test]
    async fn test_grouped_transactions_empty() {
        let store = setup().await;
        let grouped = get_grouped_transactions(&store).await.unwrap();
        assert!(grouped.pending.is_empty());
        assert!(grouped.success.is_empty());
    }

    #[tokio::test]
    async fn test_list_financier_bids() {
        let store = setup().await;
        handle_place_bid(&store, 1, "acme", bid_request()).await.unwrap();
        handle_place_bid(&store, 5, "acme", bid_request()).await.unwrap();

        let bids = list_financier_bids(&store, "acme").await.unwrap();
        assert_eq!(bids.len(), 2);
        assert!(bids.iter().all(|b| b.financier_username == "acme"));

        let err = list_financier_bids(&store, "ghost").await.unwrap_err();
        assert!(matches!(err, MarketError::FinancierNotFound));
    }
}

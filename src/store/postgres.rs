// region:    --- Imports
use super::{MarketplaceStore, StoreResult};
use crate::bidding::model::{Bid, NewBid};
use crate::database::DatabaseManager;
use crate::invoice::model::{Financier, Invoice, InvoiceStatus};
use crate::query::model::{Transaction, TransactionStatus};
use crate::query::queries;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Postgres Store
/// PostgreSQL 저장소 구현체
pub struct PostgresStore {
    db_manager: Arc<DatabaseManager>,
}

impl PostgresStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl MarketplaceStore for PostgresStore {
    async fn find_invoices_by_status(&self, status: InvoiceStatus) -> StoreResult<Vec<Invoice>> {
        debug!("{:<12} --> 상태별 인보이스 조회: {}", "Store", status.as_str());
        let invoices = sqlx::query_as::<_, Invoice>(queries::GET_INVOICES_BY_STATUS)
            .bind(status.as_str())
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(invoices)
    }

    async fn find_invoice_by_id(&self, id: i64) -> StoreResult<Option<Invoice>> {
        debug!("{:<12} --> 인보이스 조회 id: {}", "Store", id);
        let invoice = sqlx::query_as::<_, Invoice>(queries::GET_INVOICE)
            .bind(id)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(invoice)
    }

    async fn find_bids_by_invoice(&self, invoice_id: i64) -> StoreResult<Vec<Bid>> {
        debug!("{:<12} --> 인보이스 입찰 조회 id: {}", "Store", invoice_id);
        let bids = sqlx::query_as::<_, Bid>(queries::GET_INVOICE_BIDS)
            .bind(invoice_id)
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(bids)
    }

    async fn find_financier_by_username(&self, username: &str) -> StoreResult<Option<Financier>> {
        debug!("{:<12} --> 금융사 조회: {}", "Store", username);
        let financier = sqlx::query_as::<_, Financier>(queries::GET_FINANCIER_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(financier)
    }

    async fn find_approved_invoices_without_any_bid(&self) -> StoreResult<Vec<Invoice>> {
        debug!("{:<12} --> 입찰 가능 인보이스 조회", "Store");
        let invoices = sqlx::query_as::<_, Invoice>(queries::GET_APPROVED_INVOICES_WITHOUT_BIDS)
            .bind(InvoiceStatus::Approved.as_str())
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(invoices)
    }

    async fn find_transactions_by_status_ordered_by_time_desc(
        &self,
        status: TransactionStatus,
    ) -> StoreResult<Vec<Transaction>> {
        debug!("{:<12} --> 상태별 거래 조회: {}", "Store", status.as_str());
        let transactions = sqlx::query_as::<_, Transaction>(queries::GET_TRANSACTIONS_BY_STATUS)
            .bind(status.as_str())
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(transactions)
    }

    async fn save_bid(&self, bid: NewBid) -> StoreResult<Option<Bid>> {
        let invoice_id = bid.invoice_id;
        let saved = self
            .db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, Bid>(queries::INSERT_BID)
                        .bind(bid.invoice_id)
                        .bind(&bid.financier_username)
                        .bind(bid.bid_amount)
                        .bind(bid.discount_rate)
                        .bind(bid.status.as_str())
                        .bind(bid.created_at)
                        .bind(bid.credited_to.as_str())
                        .bind(&bid.validity_period)
                        .bind(&bid.terms)
                        .fetch_optional(&mut **tx)
                        .await
                })
            })
            .await?;

        if saved.is_none() {
            // uq_bids_invoice 충돌
            warn!(
                "{:<12} --> 동시 입찰 충돌: invoice_id={}",
                "Store", invoice_id
            );
        }
        Ok(saved)
    }

    async fn find_bids_by_financier(&self, username: &str) -> StoreResult<Vec<Bid>> {
        debug!("{:<12} --> 금융사 입찰 조회: {}", "Store", username);
        let bids = sqlx::query_as::<_, Bid>(queries::GET_FINANCIER_BIDS)
            .bind(username)
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(bids)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query(queries::PING)
            .execute(self.db_manager.pool())
            .await?;
        Ok(())
    }
}
// endregion: --- Postgres Store

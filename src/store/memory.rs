// region:    --- Imports
use super::{MarketplaceStore, StoreResult};
use crate::bidding::model::{Bid, NewBid};
use crate::invoice::model::{Financier, Invoice, InvoiceStatus};
use crate::query::model::{Transaction, TransactionStatus};
use async_trait::async_trait;
use std::cmp::Reverse;
use tokio::sync::RwLock;

// endregion: --- Imports

// region:    --- In-Memory Store
#[derive(Default)]
struct Tables {
    invoices: Vec<Invoice>,
    financiers: Vec<Financier>,
    bids: Vec<Bid>,
    transactions: Vec<Transaction>,
    next_bid_id: i64,
}

/// 메모리 저장소 구현체
///
/// 입찰 중복 확인과 저장을 하나의 쓰기 잠금 안에서 처리한다.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_invoice(&self, invoice: Invoice) {
        self.tables.write().await.invoices.push(invoice);
    }

    pub async fn add_financier(&self, financier: Financier) {
        self.tables.write().await.financiers.push(financier);
    }

    pub async fn add_transaction(&self, transaction: Transaction) {
        self.tables.write().await.transactions.push(transaction);
    }

    /// 저장된 전체 입찰 수
    pub async fn bid_count(&self) -> usize {
        self.tables.read().await.bids.len()
    }
}

#[async_trait]
impl MarketplaceStore for InMemoryStore {
    async fn find_invoices_by_status(&self, status: InvoiceStatus) -> StoreResult<Vec<Invoice>> {
        let tables = self.tables.read().await;
        let mut invoices: Vec<Invoice> = tables
            .invoices
            .iter()
            .filter(|i| i.status == status)
            .cloned()
            .collect();
        invoices.sort_by_key(|i| i.id);
        Ok(invoices)
    }

    async fn find_invoice_by_id(&self, id: i64) -> StoreResult<Option<Invoice>> {
        let tables = self.tables.read().await;
        Ok(tables.invoices.iter().find(|i| i.id == id).cloned())
    }

    async fn find_bids_by_invoice(&self, invoice_id: i64) -> StoreResult<Vec<Bid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bids
            .iter()
            .filter(|b| b.invoice_id == invoice_id)
            .cloned()
            .collect())
    }

    async fn find_financier_by_username(&self, username: &str) -> StoreResult<Option<Financier>> {
        let tables = self.tables.read().await;
        Ok(tables
            .financiers
            .iter()
            .find(|f| f.username == username)
            .cloned())
    }

    async fn find_approved_invoices_without_any_bid(&self) -> StoreResult<Vec<Invoice>> {
        let tables = self.tables.read().await;
        let mut invoices: Vec<Invoice> = tables
            .invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Approved)
            .filter(|i| !tables.bids.iter().any(|b| b.invoice_id == i.id))
            .cloned()
            .collect();
        invoices.sort_by_key(|i| i.id);
        Ok(invoices)
    }

    async fn find_transactions_by_status_ordered_by_time_desc(
        &self,
        status: TransactionStatus,
    ) -> StoreResult<Vec<Transaction>> {
        let tables = self.tables.read().await;
        let mut transactions: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect();
        transactions.sort_by_key(|t| Reverse((t.transaction_time, t.id)));
        Ok(transactions)
    }

    async fn save_bid(&self, bid: NewBid) -> StoreResult<Option<Bid>> {
        let mut tables = self.tables.write().await;
        if tables.bids.iter().any(|b| b.invoice_id == bid.invoice_id) {
            return Ok(None);
        }
        tables.next_bid_id += 1;
        let saved = bid.into_bid(tables.next_bid_id);
        tables.bids.push(saved.clone());
        Ok(Some(saved))
    }

    async fn find_bids_by_financier(&self, username: &str) -> StoreResult<Vec<Bid>> {
        let tables = self.tables.read().await;
        let mut bids: Vec<Bid> = tables
            .bids
            .iter()
            .filter(|b| b.financier_username == username)
            .cloned()
            .collect();
        bids.sort_by_key(|b| Reverse((b.created_at, b.id)));
        Ok(bids)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
// endregion: --- In-Memory Store

/// 마켓플레이스 저장소
/// 인보이스, 금융사, 입찰, 거래 데이터 접근을 추상화한다.
// region:    --- Imports
use crate::bidding::model::{Bid, NewBid};
use crate::invoice::model::{Financier, Invoice, InvoiceStatus};
use crate::query::model::{Transaction, TransactionStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Modules
mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
// endregion: --- Modules

// region:    --- Store Error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
// endregion: --- Store Error

// region:    --- Marketplace Store Trait
/// 저장소 트레이트
#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    async fn find_invoices_by_status(&self, status: InvoiceStatus) -> StoreResult<Vec<Invoice>>;

    async fn find_invoice_by_id(&self, id: i64) -> StoreResult<Option<Invoice>>;

    async fn find_bids_by_invoice(&self, invoice_id: i64) -> StoreResult<Vec<Bid>>;

    async fn find_financier_by_username(&self, username: &str) -> StoreResult<Option<Financier>>;

    /// 승인 상태이면서 입찰이 하나도 없는 인보이스
    async fn find_approved_invoices_without_any_bid(&self) -> StoreResult<Vec<Invoice>>;

    /// 거래 시각 내림차순. 동일 시각은 id 내림차순.
    async fn find_transactions_by_status_ordered_by_time_desc(
        &self,
        status: TransactionStatus,
    ) -> StoreResult<Vec<Transaction>>;

    /// 입찰 저장. 해당 인보이스에 이미 입찰이 있으면 `None`.
    async fn save_bid(&self, bid: NewBid) -> StoreResult<Option<Bid>>;

    async fn find_bids_by_financier(&self, username: &str) -> StoreResult<Vec<Bid>>;

    async fn ping(&self) -> StoreResult<()>;
}

pub type SharedStore = Arc<dyn MarketplaceStore>;
// endregion: --- Marketplace Store Trait

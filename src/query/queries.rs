/// 상태별 인보이스 조회
pub const GET_INVOICES_BY_STATUS: &str = r#"
    SELECT id, invoice_number, amount, due_date, status, is_factoring, created_at
    FROM invoices
    WHERE status = $1
    ORDER BY id
"#;

/// 인보이스 조회
pub const GET_INVOICE: &str =
    "SELECT id, invoice_number, amount, due_date, status, is_factoring, created_at FROM invoices WHERE id = $1";

/// 입찰이 없는 승인 인보이스 조회
pub const GET_APPROVED_INVOICES_WITHOUT_BIDS: &str = r#"
    SELECT i.id, i.invoice_number, i.amount, i.due_date, i.status, i.is_factoring, i.created_at
    FROM invoices i
    WHERE i.status = $1
      AND NOT EXISTS (SELECT 1 FROM bids b WHERE b.invoice_id = i.id)
    ORDER BY i.id
"#;

/// 인보이스 입찰 조회
pub const GET_INVOICE_BIDS: &str = r#"
    SELECT id, invoice_id, fusername, bid_amount, discount_rate, status, created_at, credited_to, validity_period, terms
    FROM bids
    WHERE invoice_id = $1
    ORDER BY created_at DESC
"#;

/// 금융사 입찰 조회
pub const GET_FINANCIER_BIDS: &str = r#"
    SELECT id, invoice_id, fusername, bid_amount, discount_rate, status, created_at, credited_to, validity_period, terms
    FROM bids
    WHERE fusername = $1
    ORDER BY created_at DESC, id DESC
"#;

/// 금융사 조회
pub const GET_FINANCIER_BY_USERNAME: &str =
    "SELECT id, username, created_at FROM financiers WHERE username = $1";

/// 상태별 거래 조회 (최신순, 동일 시각은 id 역순)
pub const GET_TRANSACTIONS_BY_STATUS: &str = r#"
    SELECT id, invoice_id, bid_amount, discount_rate, credited_to, transaction_time, status
    FROM transactions
    WHERE status = $1
    ORDER BY transaction_time DESC, id DESC
"#;

/// 입찰 저장. 인보이스당 하나만 허용되며 충돌 시 행을 반환하지 않는다.
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (invoice_id, fusername, bid_amount, discount_rate, status, created_at, credited_to, validity_period, terms)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    ON CONFLICT (invoice_id) DO NOTHING
    RETURNING id, invoice_id, fusername, bid_amount, discount_rate, status, created_at, credited_to, validity_period, terms
"#;

/// 연결 확인
pub const PING: &str = "SELECT 1";

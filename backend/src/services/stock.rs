//! Stock transaction service: bulk buy/sell execution and history
//!
//! The executor half of the transaction engine. Each bulk operation runs
//! inside one Postgres transaction: the caller's item rows are locked,
//! the batch is planned against that snapshot by the pure planner in
//! `shared::ledger`, every line delta plus the aggregate delta is
//! applied, and the immutable transaction record is inserted. Either all
//! of it commits or none of it does; readers never observe a half-applied
//! batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ItemRow, TransactionRow};
use shared::ledger::{plan_bulk, LineRequest};
use shared::models::{CounterpartyInfo, Item, LineOutcome, Transaction, TransactionType};
use shared::types::{Direction, AGGREGATE_PROFILE};

const ITEM_COLUMNS: &str = "id, user_id, profile, s_no, hsn_code, code, description, \
     weight_per_meter, profile_length, length_per_pack, packs, lengths, qty, rate, amount, \
     created_at, updated_at";

/// Stock service executing bulk transactions against the ledger
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Body of a bulk buy or sell request
#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub items: Vec<LineRequest>,
    #[serde(rename = "buyerInfo", default)]
    pub counterparty: CounterpartyInfo,
}

/// Result of a committed bulk operation
#[derive(Debug, Serialize)]
pub struct BulkOutcome {
    pub message: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
    #[serde(rename = "updatedItems")]
    pub updated_items: Vec<Item>,
    #[serde(rename = "soldItems")]
    pub lines: Vec<LineOutcome>,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Execute one bulk buy or sell as a single atomic operation.
    pub async fn execute_bulk(
        &self,
        user_id: Uuid,
        direction: Direction,
        request: BulkRequest,
    ) -> AppResult<BulkOutcome> {
        if request.items.is_empty() {
            return Err(AppError::InvalidRequest(
                "Invalid request format. Expected { items: [...] }".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // Lock the caller's items for the duration of the batch so
        // overlapping batches from the same user serialize.
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE user_id = $1 FOR UPDATE"
        ))
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let snapshot: Vec<Item> = rows.into_iter().map(Item::from).collect();

        let plan = plan_bulk(&snapshot, &request.items, direction)?;

        let mut updated_items = Vec::with_capacity(plan.deltas.len());
        for delta in &plan.deltas {
            let row = sqlx::query_as::<_, ItemRow>(&format!(
                r#"
                UPDATE items
                SET packs = packs + $2,
                    lengths = lengths + $3,
                    qty = qty + $4,
                    amount = amount + $5,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING {ITEM_COLUMNS}
                "#
            ))
            .bind(delta.item_id)
            .bind(delta.packs)
            .bind(delta.lengths)
            .bind(delta.qty)
            .bind(delta.amount)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::OperationFailed {
                direction,
                source: e,
            })?;
            updated_items.push(Item::from(row));
        }

        // The aggregate row mirrors the whole batch; its absence is
        // tolerated (the update then affects no rows).
        sqlx::query(
            r#"
            UPDATE items
            SET packs = packs + $2,
                lengths = lengths + $3,
                qty = qty + $4,
                amount = amount + $5,
                updated_at = NOW()
            WHERE user_id = $1 AND profile = $6
            "#,
        )
        .bind(user_id)
        .bind(plan.aggregate.packs)
        .bind(plan.aggregate.lengths)
        .bind(plan.aggregate.qty)
        .bind(plan.aggregate.amount)
        .bind(AGGREGATE_PROFILE)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::OperationFailed {
            direction,
            source: e,
        })?;

        let tx_type = match direction {
            Direction::Sell => TransactionType::Sold,
            Direction::Buy => TransactionType::Bought,
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (user_id, tx_type, items, total_amount, counterparty)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(tx_type.as_str())
        .bind(Json(&plan.lines))
        .bind(plan.total_amount)
        .bind(Json(&request.counterparty))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::OperationFailed {
            direction,
            source: e,
        })?;

        tx.commit().await.map_err(|e| AppError::OperationFailed {
            direction,
            source: e,
        })?;

        Ok(BulkOutcome {
            message: match direction {
                Direction::Sell => "Sell successful".to_string(),
                Direction::Buy => "Buy successful".to_string(),
            },
            total_amount: plan.total_amount,
            updated_items,
            lines: plan.lines,
        })
    }

    /// List all of a user's transactions, newest first
    pub async fn list_transactions(&self, user_id: Uuid) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, user_id, tx_type, items, total_amount, counterparty, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    /// Fetch one owned transaction
    pub async fn get_transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> AppResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, user_id, tx_type, items, total_amount, counterparty, created_at
            FROM transactions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(transaction_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;

        Ok(Transaction::from(row))
    }
}

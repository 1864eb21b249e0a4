//! Item management service: CRUD, bulk upload and repricing
//!
//! Every mutation that changes stock quantities also folds the same
//! delta into the user's aggregate ("TOTAL") row, inside the same
//! database transaction, so the aggregate never drifts from the sum of
//! the real items.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction as DbTransaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::ItemRow;
use shared::convert::round_money;
use shared::models::{Item, NewItem};
use shared::types::AGGREGATE_PROFILE;
use shared::validation::validate_rate;

const ITEM_COLUMNS: &str = "id, user_id, profile, s_no, hsn_code, code, description, \
     weight_per_meter, profile_length, length_per_pack, packs, lengths, qty, rate, amount, \
     created_at, updated_at";

/// Item service for managing a user's stock rows
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all of a user's items
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE user_id = $1 \
             ORDER BY s_no NULLS LAST, created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Create one item and fold its quantities into the aggregate row.
    /// Fails with Conflict when the user already has an item with the
    /// same code or profile.
    pub async fn create(&self, user_id: Uuid, input: NewItem) -> AppResult<Item> {
        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM items
            WHERE user_id = $1
              AND ((code IS NOT NULL AND code = $2)
                OR (profile IS NOT NULL AND profile = $3))
            "#,
        )
        .bind(user_id)
        .bind(&input.code)
        .bind(&input.profile)
        .fetch_one(&mut *tx)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "item".to_string(),
                message: "Item with same CODE or PROFILE already exists".to_string(),
            });
        }

        let qty = input.qty.unwrap_or(Decimal::ZERO);
        let rate = input.rate.unwrap_or(Decimal::ZERO);
        let packs = input.packs.unwrap_or(Decimal::ZERO);
        let lengths = input.lengths.unwrap_or(Decimal::ZERO);
        let amount = input.amount.unwrap_or_else(|| round_money(qty * rate));

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO items (
                user_id, profile, s_no, hsn_code, code, description,
                weight_per_meter, profile_length, length_per_pack,
                packs, lengths, qty, rate, amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.profile)
        .bind(input.s_no)
        .bind(&input.hsn_code)
        .bind(&input.code)
        .bind(&input.description)
        .bind(input.weight_per_meter.unwrap_or(Decimal::ONE))
        .bind(input.profile_length.unwrap_or(Decimal::ONE))
        .bind(input.length_per_pack.unwrap_or(Decimal::ONE))
        .bind(packs)
        .bind(lengths)
        .bind(qty)
        .bind(rate)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        if input.profile.as_deref() != Some(AGGREGATE_PROFILE) {
            apply_aggregate_delta(&mut tx, user_id, packs, lengths, qty, amount).await?;
        }

        tx.commit().await?;

        Ok(Item::from(row))
    }

    /// Delete one owned item, subtracting its quantities from the
    /// aggregate row first.
    pub async fn delete(&self, user_id: Uuid, item_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1 AND user_id = $2"
        ))
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        if row.profile.as_deref() != Some(AGGREGATE_PROFILE) {
            apply_aggregate_delta(
                &mut tx,
                user_id,
                -row.packs,
                -row.lengths,
                -row.qty,
                -row.amount,
            )
            .await?;
        }

        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Bulk-insert uploaded stock rows for a user. Uploaded sheets carry
    /// their own TOTAL row, so no aggregate fold happens here.
    pub async fn upload(&self, user_id: Uuid, items: Vec<NewItem>) -> AppResult<u64> {
        if items.is_empty() {
            return Err(AppError::InvalidRequest(
                "Expected a non-empty array of items".to_string(),
            ));
        }

        let mut tx = self.db.begin().await?;
        let count = items.len() as u64;

        for input in items {
            let qty = input.qty.unwrap_or(Decimal::ZERO);
            let rate = input.rate.unwrap_or(Decimal::ZERO);
            let amount = input.amount.unwrap_or_else(|| round_money(qty * rate));

            sqlx::query(
                r#"
                INSERT INTO items (
                    user_id, profile, s_no, hsn_code, code, description,
                    weight_per_meter, profile_length, length_per_pack,
                    packs, lengths, qty, rate, amount
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(user_id)
            .bind(&input.profile)
            .bind(input.s_no)
            .bind(&input.hsn_code)
            .bind(&input.code)
            .bind(&input.description)
            .bind(input.weight_per_meter.unwrap_or(Decimal::ONE))
            .bind(input.profile_length.unwrap_or(Decimal::ONE))
            .bind(input.length_per_pack.unwrap_or(Decimal::ONE))
            .bind(input.packs.unwrap_or(Decimal::ZERO))
            .bind(input.lengths.unwrap_or(Decimal::ZERO))
            .bind(qty)
            .bind(rate)
            .bind(amount)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(count)
    }

    /// Delete all of a user's items
    pub async fn delete_all(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reprice every non-aggregate item to a single new rate, recomputing
    /// amount = qty * rate per item. The aggregate row receives the new
    /// rate and the sum of the recomputed amounts.
    pub async fn update_rates(&self, user_id: Uuid, new_rate: Decimal) -> AppResult<Decimal> {
        if let Err(msg) = validate_rate(new_rate) {
            return Err(AppError::InvalidRequest(msg.to_string()));
        }

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE items
            SET rate = $2, amount = ROUND(qty * $2, 2), updated_at = NOW()
            WHERE user_id = $1 AND (profile IS NULL OR profile <> $3)
            "#,
        )
        .bind(user_id)
        .bind(new_rate)
        .bind(AGGREGATE_PROFILE)
        .execute(&mut *tx)
        .await?;

        let total_amount = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM items
            WHERE user_id = $1 AND (profile IS NULL OR profile <> $2)
            "#,
        )
        .bind(user_id)
        .bind(AGGREGATE_PROFILE)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE items
            SET rate = $2, amount = $3, updated_at = NOW()
            WHERE user_id = $1 AND profile = $4
            "#,
        )
        .bind(user_id)
        .bind(new_rate)
        .bind(total_amount)
        .bind(AGGREGATE_PROFILE)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(total_amount)
    }
}

/// Add a signed delta to the user's aggregate row. A user without an
/// aggregate row is tolerated; the update simply affects no rows.
pub(crate) async fn apply_aggregate_delta(
    tx: &mut DbTransaction<'_, Postgres>,
    user_id: Uuid,
    packs: Decimal,
    lengths: Decimal,
    qty: Decimal,
    amount: Decimal,
) -> AppResult<()> {
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
    .bind(packs)
    .bind(lengths)
    .bind(qty)
    .bind(amount)
    .bind(AGGREGATE_PROFILE)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

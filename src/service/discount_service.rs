//! The four discount operations: list, create, update, delete.
//!
//! Writes go through validation, normalization, a uniqueness pre-check,
//! then the actual statement. The pre-check exists for a clean error
//! message; the table's UNIQUE constraint remains the authoritative guard,
//! so a unique-violation error from the store is translated back into the
//! same duplicate error a pre-check hit would have produced.

use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::discount::{Discount, DiscountPayload};
use crate::validation;

#[derive(Clone)]
pub struct DiscountService {
    db: SqlitePool,
}

impl DiscountService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// All discounts, in store order.
    pub async fn list(&self) -> Result<Vec<Discount>, AppError> {
        let discounts = sqlx::query_as::<_, Discount>("SELECT * FROM discounts")
            .fetch_all(&self.db)
            .await?;

        Ok(discounts)
    }

    /// Insert a new discount; the store assigns the id.
    pub async fn create(&self, payload: DiscountPayload) -> Result<Discount, AppError> {
        let (title, pct) = validate_payload(&payload)?;

        self.ensure_title_available(&title, None).await?;

        let result =
            sqlx::query("INSERT INTO discounts (product_title, discount_percentage) VALUES (?, ?)")
                .bind(&title)
                .bind(pct)
                .execute(&self.db)
                .await;

        let id = match result {
            Ok(res) => res.last_insert_rowid(),
            // A second writer won between the pre-check and the insert.
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                return Err(AppError::Duplicate(title));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(id, title = %title, pct, "discount created");

        let created = sqlx::query_as::<_, Discount>("SELECT * FROM discounts WHERE id = ?")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(created)
    }

    /// Update title and percentage in place; the id never changes.
    pub async fn update(&self, id: i64, payload: DiscountPayload) -> Result<Discount, AppError> {
        let (title, pct) = validate_payload(&payload)?;

        // A row may keep its own title, so exclude it from the check.
        self.ensure_title_available(&title, Some(id)).await?;

        let result =
            sqlx::query("UPDATE discounts SET product_title = ?, discount_percentage = ? WHERE id = ?")
                .bind(&title)
                .bind(pct)
                .bind(id)
                .execute(&self.db)
                .await;

        match result {
            Ok(res) if res.rows_affected() == 0 => {
                return Err(AppError::NotFound(format!("Discount with id {} not found", id)));
            }
            Ok(_) => {}
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                return Err(AppError::Duplicate(title));
            }
            Err(e) => return Err(e.into()),
        }

        let updated = sqlx::query_as::<_, Discount>("SELECT * FROM discounts WHERE id = ?")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(updated)
    }

    /// Permanently remove a discount.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM discounts WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Discount with id {} not found", id)));
        }

        tracing::debug!(id, "discount deleted");

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    /// Fail with a duplicate error if another row already holds `title`.
    /// Comparison is exact-match on the trimmed title, case-sensitive.
    async fn ensure_title_available(
        &self,
        title: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), AppError> {
        let existing: Option<i64> = match exclude_id {
            Some(id) => {
                sqlx::query_scalar("SELECT id FROM discounts WHERE product_title = ? AND id != ?")
                    .bind(title)
                    .bind(id)
                    .fetch_optional(&self.db)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT id FROM discounts WHERE product_title = ?")
                    .bind(title)
                    .fetch_optional(&self.db)
                    .await?
            }
        };

        if existing.is_some() {
            return Err(AppError::Duplicate(title.to_string()));
        }

        Ok(())
    }
}

/// Validate and normalize a payload. Title precedes percentage so error
/// precedence stays stable.
fn validate_payload(payload: &DiscountPayload) -> Result<(String, f64), AppError> {
    let title = validation::validate_product_title(payload.product_title.as_deref())
        .map_err(AppError::Validation)?;

    let pct = validation::validate_discount_percentage(payload.discount_percentage.as_ref())
        .map_err(AppError::Validation)?;

    Ok((title, pct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::migrations::run_migrations;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn service() -> DiscountService {
        // A single connection keeps the in-memory database alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        DiscountService::new(pool)
    }

    fn payload(title: &str, pct: f64) -> DiscountPayload {
        DiscountPayload {
            product_title: Some(title.to_string()),
            discount_percentage: Some(json!(pct)),
        }
    }

    #[tokio::test]
    async fn create_then_list_contains_the_record() {
        let svc = service().await;

        let created = svc.create(payload("Latte", 10.0)).await.unwrap();
        assert_eq!(created.product_title, "Latte");
        assert_eq!(created.discount_percentage, 10.0);

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].product_title, "Latte");
    }

    #[tokio::test]
    async fn percentage_boundaries_are_inclusive() {
        let svc = service().await;

        assert!(svc.create(payload("Zero", 0.0)).await.is_ok());
        assert!(svc.create(payload("Full", 100.0)).await.is_ok());

        let low = svc.create(payload("Low", -1.0)).await.unwrap_err();
        assert!(matches!(low, AppError::Validation(_)));

        let high = svc.create(payload("High", 101.0)).await.unwrap_err();
        assert!(matches!(high, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_or_missing_fields_fail_validation() {
        let svc = service().await;

        let blank = svc.create(payload("   ", 10.0)).await.unwrap_err();
        assert!(matches!(blank, AppError::Validation(_)));

        let no_title = svc
            .create(DiscountPayload {
                product_title: None,
                discount_percentage: Some(json!(10)),
            })
            .await
            .unwrap_err();
        assert!(matches!(no_title, AppError::Validation(_)));

        let no_pct = svc
            .create(DiscountPayload {
                product_title: Some("Latte".to_string()),
                discount_percentage: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(no_pct, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_title_is_rejected_after_trim() {
        let svc = service().await;

        svc.create(payload("Latte", 10.0)).await.unwrap();

        // Same title with surrounding whitespace normalizes to a duplicate.
        let dup = svc.create(payload("  Latte ", 20.0)).await.unwrap_err();
        assert!(matches!(dup, AppError::Duplicate(ref t) if t == "Latte"));

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].discount_percentage, 10.0);
    }

    #[tokio::test]
    async fn titles_are_stored_trimmed() {
        let svc = service().await;

        let created = svc.create(payload("  Flat White  ", 15.0)).await.unwrap();
        assert_eq!(created.product_title, "Flat White");
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_id_fail_not_found() {
        let svc = service().await;

        let upd = svc.update(42, payload("Latte", 10.0)).await.unwrap_err();
        assert!(matches!(upd, AppError::NotFound(_)));

        let del = svc.delete(42).await.unwrap_err();
        assert!(matches!(del, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_onto_another_title_is_a_duplicate() {
        let svc = service().await;

        let latte = svc.create(payload("Latte", 10.0)).await.unwrap();
        svc.create(payload("Mocha", 20.0)).await.unwrap();

        let dup = svc.update(latte.id, payload("Mocha", 10.0)).await.unwrap_err();
        assert!(matches!(dup, AppError::Duplicate(ref t) if t == "Mocha"));
    }

    #[tokio::test]
    async fn update_keeping_own_title_succeeds() {
        let svc = service().await;

        let latte = svc.create(payload("Latte", 10.0)).await.unwrap();

        let updated = svc.update(latte.id, payload("Latte", 25.0)).await.unwrap();
        assert_eq!(updated.id, latte.id);
        assert_eq!(updated.product_title, "Latte");
        assert_eq!(updated.discount_percentage, 25.0);
    }

    #[tokio::test]
    async fn update_with_invalid_percentage_fails_validation() {
        let svc = service().await;

        let latte = svc.create(payload("Latte", 10.0)).await.unwrap();

        let err = svc.update(latte.id, payload("Latte", 150.0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // The stored row is untouched.
        let all = svc.list().await.unwrap();
        assert_eq!(all[0].discount_percentage, 10.0);
    }

    #[tokio::test]
    async fn delete_removes_the_row_and_repeat_is_not_found() {
        let svc = service().await;

        let latte = svc.create(payload("Latte", 10.0)).await.unwrap();

        svc.delete(latte.id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());

        let again = svc.delete(latte.id).await.unwrap_err();
        assert!(matches!(again, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn store_constraint_backstops_the_pre_check() {
        let svc = service().await;

        svc.create(payload("Latte", 10.0)).await.unwrap();

        // Bypass the pre-check and insert directly, as a racing writer would.
        let result =
            sqlx::query("INSERT INTO discounts (product_title, discount_percentage) VALUES (?, ?)")
                .bind("Latte")
                .bind(20.0)
                .execute(svc.pool())
                .await;

        match result {
            Err(sqlx::Error::Database(err)) => assert!(err.is_unique_violation()),
            other => panic!("expected unique violation, got {:?}", other),
        }
    }
}

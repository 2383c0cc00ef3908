use sqlx::Error;

use crate::model::{SO_Order, Table};

use super::QueryResult;

impl Table<SO_Order> {
    pub async fn insert(
        &self,
        data: SO_Order,
    ) -> Result<QueryResult, Error> {
        sqlx::query(
            r#"
            INSERT INTO "SO_Order" (
                "SO_id",
                "SO_merchant",
                "SO_customer",
                "SO_amount",
                "SO_description",
                "SO_status",
                "SO_created_at",
                "SO_due_date"
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
        )
        .bind(&data.SO_id)
        .bind(&data.SO_merchant)
        .bind(&data.SO_customer)
        .bind(&data.SO_amount)
        .bind(&data.SO_description)
        .bind(&data.SO_status)
        .bind(data.SO_created_at)
        .bind(data.SO_due_date)
        .persistent(false)
        .execute(&self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let value: (i64,) =
            sqlx::query_as(r#"SELECT COUNT(*) FROM "SO_Order""#)
                .persistent(false)
                .fetch_one(&self.pool)
                .await?;
        Ok(value.0)
    }

    pub async fn get_one(
        &self,
        id: String,
    ) -> Result<Option<SO_Order>, Error> {
        sqlx::query_as(
            r#"
            SELECT * FROM "SO_Order" WHERE "SO_id" = $1
            "#,
        )
        .bind(id)
        .persistent(false)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_all(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<SO_Order>, Error> {
        sqlx::query_as(
            r#"
            SELECT * FROM "SO_Order"
            ORDER BY "SO_created_at" DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .persistent(false)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_by_merchant(
        &self,
        merchant: String,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<SO_Order>, Error> {
        sqlx::query_as(
            r#"
            SELECT * FROM "SO_Order"
            WHERE "SO_merchant" = $1
            ORDER BY "SO_created_at" DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(merchant)
        .bind(skip)
        .bind(limit)
        .persistent(false)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update_status(
        &self,
        id: String,
        status: String,
    ) -> Result<QueryResult, Error> {
        sqlx::query(
            r#"
            UPDATE "SO_Order" SET "SO_status" = $1 WHERE "SO_id" = $2
            "#,
        )
        .bind(status)
        .bind(id)
        .persistent(false)
        .execute(&self.pool)
        .await
    }
}

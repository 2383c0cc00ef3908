use sqlx::{Error, QueryBuilder};

use crate::model::{RP_Pool_State, Table};

use super::DataBase;

impl Table<RP_Pool_State> {
    pub async fn insert_many(
        &self,
        data: &Vec<RP_Pool_State>,
    ) -> Result<(), Error> {
        if data.is_empty() {
            return Ok(());
        }

        let mut query_builder: QueryBuilder<DataBase> = QueryBuilder::new(
            r#"
            INSERT INTO "RP_Pool_State" (
                "RP_Pool_id",
                "RP_Pool_timestamp",
                "RP_merchant",
                "RP_receivable_value",
                "RP_advance_amount",
                "RP_senior_token",
                "RP_junior_token",
                "RP_senior_face_value",
                "RP_senior_target_raise",
                "RP_junior_face_value",
                "RP_junior_target_raise",
                "RP_senior_raised",
                "RP_junior_raised",
                "RP_total_repaid",
                "RP_is_funded"
            )"#,
        );

        query_builder.push_values(data, |mut b, data| {
            b.push_bind(data.RP_Pool_id)
                .push_bind(data.RP_Pool_timestamp)
                .push_bind(&data.RP_merchant)
                .push_bind(&data.RP_receivable_value)
                .push_bind(&data.RP_advance_amount)
                .push_bind(&data.RP_senior_token)
                .push_bind(&data.RP_junior_token)
                .push_bind(&data.RP_senior_face_value)
                .push_bind(&data.RP_senior_target_raise)
                .push_bind(&data.RP_junior_face_value)
                .push_bind(&data.RP_junior_target_raise)
                .push_bind(&data.RP_senior_raised)
                .push_bind(&data.RP_junior_raised)
                .push_bind(&data.RP_total_repaid)
                .push_bind(data.RP_is_funded);
        });

        let query = query_builder.build().persistent(false);
        query.execute(&self.pool).await?;
        Ok(())
    }

    pub async fn get_latest(
        &self,
        pool_id: i64,
    ) -> Result<Option<RP_Pool_State>, Error> {
        sqlx::query_as(
            r#"
            SELECT * FROM "RP_Pool_State"
            WHERE "RP_Pool_id" = $1
            ORDER BY "RP_Pool_timestamp" DESC
            LIMIT 1
            "#,
        )
        .bind(pool_id)
        .persistent(false)
        .fetch_optional(&self.pool)
        .await
    }

    /// Latest snapshot per pool, ascending by pool id.
    pub async fn get_latest_all(
        &self,
    ) -> Result<Vec<RP_Pool_State>, Error> {
        sqlx::query_as(
            r#"
            SELECT DISTINCT ON ("RP_Pool_id") *
            FROM "RP_Pool_State"
            ORDER BY "RP_Pool_id", "RP_Pool_timestamp" DESC
            "#,
        )
        .persistent(false)
        .fetch_all(&self.pool)
        .await
    }
}

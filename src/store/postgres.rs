use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::{LocationStore, MovementStore};
use crate::db::DbPool;
use crate::error::StoreError;
use crate::models::{
    location::Location,
    movement::{FieldUpdate, Movement},
};

const MOVEMENT_COLUMNS: &str =
    r#"id, "data", categoria, nome, moeda, valor, observacao, lembrar_proxima_compra"#;

/// Movements in the `movements` table.
#[derive(Debug, Clone)]
pub struct PgMovementStore {
    pool: DbPool,
}

impl PgMovementStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovementStore for PgMovementStore {
    async fn scan(&self) -> Result<Vec<Movement>, StoreError> {
        let movements =
            sqlx::query_as::<_, Movement>(&format!("SELECT {MOVEMENT_COLUMNS} FROM movements"))
                .fetch_all(&self.pool)
                .await?;

        Ok(movements)
    }

    async fn get(&self, id: &str) -> Result<Option<Movement>, StoreError> {
        let movement = sqlx::query_as::<_, Movement>(&format!(
            "SELECT {MOVEMENT_COLUMNS} FROM movements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movement)
    }

    async fn put(&self, movement: &Movement) -> Result<(), StoreError> {
        // Overwrite semantics: a second put with the same id replaces every column
        sqlx::query(
            r#"
            INSERT INTO movements (id, "data", categoria, nome, moeda, valor, observacao, lembrar_proxima_compra)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                "data" = EXCLUDED."data",
                categoria = EXCLUDED.categoria,
                nome = EXCLUDED.nome,
                moeda = EXCLUDED.moeda,
                valor = EXCLUDED.valor,
                observacao = EXCLUDED.observacao,
                lembrar_proxima_compra = EXCLUDED.lembrar_proxima_compra
            "#,
        )
        .bind(&movement.id)
        .bind(&movement.data)
        .bind(&movement.categoria)
        .bind(&movement.nome)
        .bind(&movement.moeda)
        .bind(movement.valor)
        .bind(&movement.observacao)
        .bind(movement.lembrar_proxima_compra)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, id: &str, updates: &[FieldUpdate]) -> Result<Movement, StoreError> {
        let mut builder = build_update(id, updates);

        let movement = builder
            .build_query_as::<Movement>()
            .fetch_one(&self.pool)
            .await?;

        Ok(movement)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM movements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Upsert of the listed columns only, returning the full row.
///
/// Column identifiers come from the closed `FieldUpdate` set and are quoted;
/// values are always bound parameters.
fn build_update(id: &str, updates: &[FieldUpdate]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO movements (id");
    for update in updates {
        builder.push(format!(r#", "{}""#, update.column()));
    }

    builder.push(") VALUES (");
    builder.push_bind(id.to_string());
    for update in updates {
        builder.push(", ");
        push_value(&mut builder, update);
    }

    builder.push(") ON CONFLICT (id) DO UPDATE SET ");
    if updates.is_empty() {
        builder.push("id = EXCLUDED.id");
    } else {
        let mut assignments = builder.separated(", ");
        for update in updates {
            assignments.push(format!(r#""{0}" = EXCLUDED."{0}""#, update.column()));
        }
    }

    builder.push(format!(" RETURNING {MOVEMENT_COLUMNS}"));
    builder
}

fn push_value(builder: &mut QueryBuilder<'static, Postgres>, update: &FieldUpdate) {
    match update {
        FieldUpdate::Data(value)
        | FieldUpdate::Categoria(value)
        | FieldUpdate::Nome(value)
        | FieldUpdate::Moeda(value)
        | FieldUpdate::Observacao(value) => builder.push_bind(value.clone()),
        FieldUpdate::Valor(value) => builder.push_bind(*value),
        FieldUpdate::LembrarProximaCompra(value) => builder.push_bind(*value),
    };
}

/// Location pings in the `locations` table.
#[derive(Debug, Clone)]
pub struct PgLocationStore {
    pool: DbPool,
}

impl PgLocationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for PgLocationStore {
    async fn scan(&self) -> Result<Vec<Location>, StoreError> {
        let locations = sqlx::query_as::<_, Location>(
            r#"SELECT id, "timestamp", latitude, longitude, info FROM locations"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn put(&self, location: &Location) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO locations (id, "timestamp", latitude, longitude, info)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                "timestamp" = EXCLUDED."timestamp",
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                info = EXCLUDED.info
            "#,
        )
        .bind(&location.id)
        .bind(&location.timestamp)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(&location.info)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

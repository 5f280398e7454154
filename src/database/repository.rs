use sqlx::{self, sqlite::SqliteRow, FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::{Pizza, Restaurant, RestaurantPizza};

/// Maps a row type onto the table it is read from.
pub trait Table {
    const TABLE: &'static str;
    const COLUMNS: &'static str;
}

impl Table for Restaurant {
    const TABLE: &'static str = "restaurants";
    const COLUMNS: &'static str = "id, name, address";
}

impl Table for Pizza {
    const TABLE: &'static str = "pizzas";
    const COLUMNS: &'static str = "id, name, ingredients";
}

impl Table for RestaurantPizza {
    const TABLE: &'static str = "restaurant_pizzas";
    const COLUMNS: &'static str = "id, price, pizza_id, restaurant_id";
}

/// Read access to one table, keyed by integer id.
pub struct Repository<T> {
    pool: SqlitePool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Table + Send + Unpin,
{
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Every row, oldest id first
    pub async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", T::COLUMNS, T::TABLE);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", T::COLUMNS, T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::Store;

    async fn store() -> Store {
        let store = Store::connect(&DatabaseConfig::in_memory()).await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn select_all_orders_by_id() {
        let store = store().await;
        for name in ["Zeta", "Alpha"] {
            sqlx::query("INSERT INTO pizzas (name, ingredients) VALUES (?, 'Dough')")
                .bind(name)
                .execute(store.pool())
                .await
                .unwrap();
        }

        let pizzas = Repository::<Pizza>::new(store.pool().clone()).select_all().await.unwrap();
        let names: Vec<_> = pizzas.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn select_one_reports_missing_rows() {
        let store = store().await;
        let repo = Repository::<Restaurant>::new(store.pool().clone());

        assert!(repo.select_one(42).await.unwrap().is_none());
        assert!(repo.select_all().await.unwrap().is_empty());
    }
}

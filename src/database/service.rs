use serde_json::Value;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use thiserror::Error;
use tracing::{info, instrument};

use crate::database::manager::{DatabaseError, Store};
use crate::database::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
    RestaurantPizzaWithPizza, ValidationError,
};
use crate::database::repository::{Repository, Table};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Restaurant {0} not found")]
    RestaurantNotFound(i64),

    #[error("Pizza {0} not found")]
    PizzaNotFound(i64),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}

/// A restaurant together with every join row pointing at it
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantMenu {
    pub restaurant: Restaurant,
    pub restaurant_pizzas: Vec<RestaurantPizzaWithPizza>,
}

/// A freshly inserted join row and the two rows it links
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRestaurantPizza {
    pub restaurant_pizza: RestaurantPizza,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

/// Join request whose keys are known to be present. The price is still raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantPizzaRequest {
    pub price: Value,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}

/// All reads and writes the API and admin CLI perform against the store.
#[derive(Debug, Clone)]
pub struct PizzeriaService {
    store: Store,
}

impl PizzeriaService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn repository<T>(&self) -> Repository<T>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Table + Send + Unpin,
    {
        Repository::new(self.store.pool().clone())
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        Ok(self.repository::<Restaurant>().select_all().await?)
    }

    pub async fn list_pizzas(&self) -> Result<Vec<Pizza>, ServiceError> {
        Ok(self.repository::<Pizza>().select_all().await?)
    }

    pub async fn list_restaurant_pizzas(&self) -> Result<Vec<RestaurantPizza>, ServiceError> {
        Ok(self.repository::<RestaurantPizza>().select_all().await?)
    }

    #[instrument(skip(self))]
    pub async fn restaurant_menu(&self, id: i64) -> Result<RestaurantMenu, ServiceError> {
        let restaurant = self
            .repository::<Restaurant>()
            .select_one(id)
            .await?
            .ok_or(ServiceError::RestaurantNotFound(id))?;

        let restaurant_pizzas = sqlx::query_as::<_, RestaurantPizzaWithPizza>(
            "SELECT rp.id, rp.price, rp.pizza_id, rp.restaurant_id,
                    p.name AS pizza_name, p.ingredients AS pizza_ingredients
             FROM restaurant_pizzas rp
             JOIN pizzas p ON p.id = rp.pizza_id
             WHERE rp.restaurant_id = ?
             ORDER BY rp.id",
        )
        .bind(id)
        .fetch_all(self.store.pool())
        .await?;

        Ok(RestaurantMenu {
            restaurant,
            restaurant_pizzas,
        })
    }

    /// Delete a restaurant; the store removes its join rows in the same transaction.
    #[instrument(skip(self))]
    pub async fn delete_restaurant(&self, id: i64) -> Result<(), ServiceError> {
        let mut tx = self.store.pool().begin().await?;

        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::RestaurantNotFound(id));
        }

        tx.commit().await?;
        info!("Deleted restaurant {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_pizza(&self, id: i64) -> Result<(), ServiceError> {
        let mut tx = self.store.pool().begin().await?;

        let result = sqlx::query("DELETE FROM pizzas WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::PizzaNotFound(id));
        }

        tx.commit().await?;
        info!("Deleted pizza {}", id);
        Ok(())
    }

    /// Validate and insert a join row.
    ///
    /// Unknown references are reported before a bad price. Nothing is written
    /// unless all checks pass.
    #[instrument(skip(self))]
    pub async fn create_restaurant_pizza(
        &self,
        request: RestaurantPizzaRequest,
    ) -> Result<CreatedRestaurantPizza, ServiceError> {
        let new_record =
            NewRestaurantPizza::new(&request.price, request.pizza_id, request.restaurant_id);

        let mut tx = self.store.pool().begin().await?;

        // The insert is the first statement so the transaction holds the write
        // lock before it reads anything.
        let inserted = match &new_record {
            Ok(record) => insert_restaurant_pizza(&mut tx, record).await?,
            Err(_) => None,
        };

        let pizza = find_pizza(&mut tx, request.pizza_id)
            .await?
            .ok_or(ValidationError::UnknownPizza(request.pizza_id))?;
        let restaurant = find_restaurant(&mut tx, request.restaurant_id)
            .await?
            .ok_or(ValidationError::UnknownRestaurant(request.restaurant_id))?;

        new_record?;
        let restaurant_pizza = inserted.ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        info!(
            "Created restaurant_pizza {} (pizza {}, restaurant {})",
            restaurant_pizza.id, pizza.id, restaurant.id
        );

        Ok(CreatedRestaurantPizza {
            restaurant_pizza,
            pizza,
            restaurant,
        })
    }

    pub async fn create_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, ServiceError> {
        let result = sqlx::query("INSERT INTO restaurants (name, address) VALUES (?, ?)")
            .bind(&new.name)
            .bind(&new.address)
            .execute(self.store.pool())
            .await?;

        Ok(Restaurant {
            id: result.last_insert_rowid(),
            name: new.name,
            address: new.address,
        })
    }

    pub async fn create_pizza(&self, new: NewPizza) -> Result<Pizza, ServiceError> {
        let result = sqlx::query("INSERT INTO pizzas (name, ingredients) VALUES (?, ?)")
            .bind(&new.name)
            .bind(&new.ingredients)
            .execute(self.store.pool())
            .await?;

        Ok(Pizza {
            id: result.last_insert_rowid(),
            name: new.name,
            ingredients: new.ingredients,
        })
    }

    /// Replace all data with the sample data set. Ids restart at 1.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<SeedSummary, ServiceError> {
        let mut tx = self.store.pool().begin().await?;

        for table in [RestaurantPizza::TABLE, Pizza::TABLE, Restaurant::TABLE] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        // AUTOINCREMENT counters
        sqlx::query(
            "DELETE FROM sqlite_sequence \
             WHERE name IN ('restaurants', 'pizzas', 'restaurant_pizzas')",
        )
        .execute(&mut *tx)
        .await?;

        let mut restaurant_ids = Vec::new();
        for (name, address) in SEED_RESTAURANTS {
            let result = sqlx::query("INSERT INTO restaurants (name, address) VALUES (?, ?)")
                .bind(name)
                .bind(address)
                .execute(&mut *tx)
                .await?;
            restaurant_ids.push(result.last_insert_rowid());
        }

        let mut pizza_ids = Vec::new();
        for (name, ingredients) in SEED_PIZZAS {
            let result = sqlx::query("INSERT INTO pizzas (name, ingredients) VALUES (?, ?)")
                .bind(name)
                .bind(ingredients)
                .execute(&mut *tx)
                .await?;
            pizza_ids.push(result.last_insert_rowid());
        }

        let mut restaurant_pizzas = 0;
        for (restaurant_idx, pizza_idx, price) in SEED_PRICES {
            let record = NewRestaurantPizza::new(
                price,
                pizza_ids[pizza_idx],
                restaurant_ids[restaurant_idx],
            )?;
            insert_restaurant_pizza(&mut tx, &record)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
            restaurant_pizzas += 1;
        }

        tx.commit().await?;

        let summary = SeedSummary {
            restaurants: restaurant_ids.len(),
            pizzas: pizza_ids.len(),
            restaurant_pizzas,
        };
        info!("Seeded database: {:?}", summary);
        Ok(summary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

const SEED_RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const SEED_PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const SEED_PRICES: [(usize, usize, i64); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

async fn find_pizza(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> Result<Option<Pizza>, sqlx::Error> {
    sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
}

async fn find_restaurant(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as::<_, Restaurant>("SELECT id, name, address FROM restaurants WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
}

/// Insert a join row only if both referenced rows exist. `None` when either is missing.
async fn insert_restaurant_pizza(
    conn: &mut SqliteConnection,
    record: &NewRestaurantPizza,
) -> Result<Option<RestaurantPizza>, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO restaurant_pizzas (price, pizza_id, restaurant_id)
         SELECT ?, p.id, r.id FROM pizzas p, restaurants r
         WHERE p.id = ? AND r.id = ?",
    )
    .bind(record.price.get())
    .bind(record.pizza_id)
    .bind(record.restaurant_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(RestaurantPizza {
        id: result.last_insert_rowid(),
        price: record.price.get(),
        pizza_id: record.pizza_id,
        restaurant_id: record.restaurant_id,
    }))
}

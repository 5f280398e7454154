// Table definitions for the store.
//
// Join rows cascade away with either parent; the price bound is repeated here
// so that rows written outside the API still obey it.

pub const MIGRATION: &str = "
CREATE TABLE IF NOT EXISTS restaurants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pizzas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    ingredients TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS restaurant_pizzas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    price INTEGER NOT NULL CHECK (price BETWEEN 1 AND 30),
    pizza_id INTEGER NOT NULL,
    restaurant_id INTEGER NOT NULL,
    CONSTRAINT fk_restaurant_pizzas_pizza_id_pizzas
        FOREIGN KEY (pizza_id) REFERENCES pizzas (id) ON DELETE CASCADE,
    CONSTRAINT fk_restaurant_pizzas_restaurant_id_restaurants
        FOREIGN KEY (restaurant_id) REFERENCES restaurants (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_restaurant_pizzas_pizza_id ON restaurant_pizzas (pizza_id);
CREATE INDEX IF NOT EXISTS idx_restaurant_pizzas_restaurant_id ON restaurant_pizzas (restaurant_id);
";

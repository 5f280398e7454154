//! Response shapes.
//!
//! Each endpoint gets a fixed, depth-limited projection. Restaurants and pizzas
//! only ever appear nested one level deep and never carry their own
//! `restaurant_pizzas`, so no response can recurse.

use serde::Serialize;

use crate::database::models::{Pizza, Restaurant, RestaurantPizzaWithPizza};
use crate::database::service::{CreatedRestaurantPizza, RestaurantMenu};

/// Restaurant with its own columns only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// Pizza with its own columns only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PizzaSummary {
    pub id: i64,
    pub name: String,
    pub ingredients: String,
}

/// Join row as listed under its restaurant: the pizza is embedded, the restaurant is not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantPizzaView {
    pub id: i64,
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza: PizzaSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantDetail {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaView>,
}

/// Body of a 201 from `POST /restaurant_pizzas`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantPizzaCreated {
    pub id: i64,
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

impl From<Restaurant> for RestaurantSummary {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

impl From<Pizza> for PizzaSummary {
    fn from(p: Pizza) -> Self {
        Self {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

impl From<RestaurantPizzaWithPizza> for RestaurantPizzaView {
    fn from(row: RestaurantPizzaWithPizza) -> Self {
        Self {
            id: row.id,
            price: row.price,
            pizza_id: row.pizza_id,
            restaurant_id: row.restaurant_id,
            pizza: PizzaSummary {
                id: row.pizza_id,
                name: row.pizza_name,
                ingredients: row.pizza_ingredients,
            },
        }
    }
}

impl From<RestaurantMenu> for RestaurantDetail {
    fn from(menu: RestaurantMenu) -> Self {
        Self {
            id: menu.restaurant.id,
            name: menu.restaurant.name,
            address: menu.restaurant.address,
            restaurant_pizzas: menu.restaurant_pizzas.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreatedRestaurantPizza> for RestaurantPizzaCreated {
    fn from(created: CreatedRestaurantPizza) -> Self {
        let record = created.restaurant_pizza;
        Self {
            id: record.id,
            price: record.price,
            pizza_id: record.pizza_id,
            restaurant_id: record.restaurant_id,
            pizza: created.pizza.into(),
            restaurant: created.restaurant.into(),
        }
    }
}

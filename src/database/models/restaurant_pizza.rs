use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;

/// Reasons a join record cannot be created.
///
/// Clients only ever see the generic validation body; the variant is for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    InvalidBody,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' must be an integer")]
    NotAnInteger(&'static str),

    #[error("price {0} is outside {min}..={max}", min = Price::MIN, max = Price::MAX)]
    PriceOutOfRange(i64),

    #[error("pizza {0} does not exist")]
    UnknownPizza(i64),

    #[error("restaurant {0} does not exist")]
    UnknownRestaurant(i64),
}

/// A menu price in whole currency units, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 30;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::PriceOutOfRange(value))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

/// Prices arrive as raw JSON; only integral numbers are accepted (`15.5` and `"15"` are not).
impl TryFrom<&Value> for Price {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let raw = value.as_i64().ok_or(ValidationError::NotAnInteger("price"))?;
        Price::new(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RestaurantPizza {
    pub id: i64,
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}

/// Join row joined with the pizza it points at, as read for restaurant detail
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RestaurantPizzaWithPizza {
    pub id: i64,
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza_name: String,
    pub pizza_ingredients: String,
}

/// A validated join record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRestaurantPizza {
    pub price: Price,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}

impl NewRestaurantPizza {
    pub fn new<P>(price: P, pizza_id: i64, restaurant_id: i64) -> Result<Self, ValidationError>
    where
        P: TryInto<Price, Error = ValidationError>,
    {
        Ok(Self {
            price: price.try_into()?,
            pizza_id,
            restaurant_id,
        })
    }
}

pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::{NewPizza, Pizza};
pub use restaurant::{NewRestaurant, Restaurant};
pub use restaurant_pizza::{
    NewRestaurantPizza, Price, RestaurantPizza, RestaurantPizzaWithPizza, ValidationError,
};

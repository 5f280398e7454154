pub mod manager;
pub mod models;
pub mod repository;
pub mod schema;
pub mod service;

pub use manager::{DatabaseError, Store};
pub use repository::{Repository, Table};
pub use service::{
    CreatedRestaurantPizza, PizzeriaService, RestaurantMenu, RestaurantPizzaRequest, SeedSummary,
    ServiceError,
};

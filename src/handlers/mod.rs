// handlers/mod.rs - HTTP resource handlers
//
// Handlers own request parsing and response status codes. Store access goes
// through `PizzeriaService`, shaping through `api::format`.

use crate::database::PizzeriaService;

pub mod home;              // GET /, GET /health
pub mod pizzas;            // GET /pizzas
pub mod restaurant_pizzas; // POST /restaurant_pizzas
pub mod restaurants;       // GET /restaurants, GET|DELETE /restaurants/:id

/// Shared state injected into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: PizzeriaService,
}

impl AppState {
    pub fn new(service: PizzeriaService) -> Self {
        Self { service }
    }
}

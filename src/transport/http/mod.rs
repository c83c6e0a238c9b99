pub mod middleware;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod recipes;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;

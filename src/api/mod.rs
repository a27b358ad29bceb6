pub mod services;

pub use services::public_routes;

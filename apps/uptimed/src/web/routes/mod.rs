pub mod formatter_routes;
pub mod info_routes;
pub mod integration_routes;
pub mod number_routes;
pub mod tick_routes;

pub mod app;
mod deserializers;
pub mod error;
mod extract;
pub mod pagination;
mod routes;

pub mod controller;
pub mod pipeline;
pub mod policy;
pub mod routes;
pub mod schema;

//! HTTP surface for the news site: public listing, admin forms and the JSON/XML
//! representations.

pub mod errors;
pub mod flash;
pub mod negotiation;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod views;
pub mod xml;

pub use startup::{build_app, run};

pub mod cart;
pub mod catalog;
pub mod errors;
pub mod order;
pub mod ports;
pub mod shipping;
pub mod user;
pub mod validation;
pub mod weight;

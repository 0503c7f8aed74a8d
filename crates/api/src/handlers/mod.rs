pub mod clients;
pub mod dashboard;
pub mod transfer;

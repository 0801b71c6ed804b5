//! Backend client and local side stores.

pub mod api;
pub mod offline;

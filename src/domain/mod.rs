// Domain types shared by the WASM client and the server
// Pure Rust, no framework dependencies

pub mod models;
pub mod route_table;

pub use route_table::{Page, RouteEntry, RouteTable, RouteTableError, ROUTE_TABLE};

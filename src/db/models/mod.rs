//! Database Models
//!
//! Typed records for the SurrealDB tables plus their create/update
//! payloads.

pub mod employee;
pub mod serde_helpers;
pub mod user;

pub use employee::{Employee, EmployeeCreate, EmployeeId, EmployeePage, EmployeeUpdate};
pub use user::{User, UserCreate, UserId};

//! Deterministic example user records for the directory admin screen.
//!
//! This crate produces believable, reproducible user records used to
//! populate the directory before any real data source exists. It is
//! independent of backend domain types to avoid circular dependencies; the
//! backend maps [`ExampleUserSeed`] values into its own model at the point of
//! use.
//!
//! # Overview
//!
//! - Sequential identifiers starting at 1
//! - Names built from `fake` first and last names plus the record index
//! - Unique `user<index>@example.com` addresses
//! - Random role, status, registration date, last activity and counters
//! - Name and email validation matching backend constraints
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use example_data::{ExampleUserRequest, generate_example_users};
//!
//! let reference = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid instant");
//! let request = ExampleUserRequest::new(42, 3, reference);
//! let users = generate_example_users(&request).expect("generation succeeds");
//!
//! assert_eq!(users.len(), 3);
//! assert_eq!(users.first().map(|user| user.email.as_str()), Some("user1@example.com"));
//! ```

mod error;
mod generator;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::{ExampleUserRequest, generate_example_users};
pub use seed::{ExampleUserSeed, RoleSeed, StatusSeed};
pub use validation::{NAME_MIN, is_valid_email, is_valid_name};

//! # Rollcall CLI
//!
//! Database seeding utilities for Rollcall testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use rollcall_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(3).with_days(20); // 3 schools, 20 marked days
//! seed_all(&pool, config, today).await?;
//! ```

pub mod seeder;

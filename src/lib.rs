//! # Krater - Data Grid Console
//!
//! Krater is a management console for clustered data-grid services. It
//! inspects a cluster's cache managers and provisions named caches from
//! server-stored configuration templates or operator-authored JSON/XML
//! documents, validating everything locally before anything hits the wire.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use krater::adapters::container_client::ContainerClient;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ContainerClient::new(
//!     "http://localhost:11222/rest/v2",
//!     Duration::from_secs(30),
//! )?;
//! for manager in client.list_cache_managers().await? {
//!     println!("{} ({})", manager.name, manager.cache_manager_status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Krater follows Hexagonal Architecture:
//! - **Domain**: core types, input validation, and the collaborator ports
//! - **Application**: the cache-creation workflow
//! - **Adapters**: REST clients and terminal presentation
//! - **Config**: configuration management

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;

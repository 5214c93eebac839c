#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Console
//!
//! The data layer of a DynamoDB table browser: a tagged field model that
//! travels as JSON, a lossless codec between that model and the SDK's native
//! attribute values, and a scan paginator that serves fixed-size pages resumable
//! through an opaque cursor.
//!
//! ## Overview
//!
//! - Fields carry an explicit type tag, so sets, binary and nested values
//!   survive a JSON round trip unchanged
//! - Every codec error names the offending field path, e.g. `items[2][tags][0]`
//! - Errors are classified as client-caused (400), not found (404) or
//!   server-caused (500)
//! - Every provider call goes through the [`client::TableAccess`] trait, which is
//!   implemented for [`aws_sdk_dynamodb::Client`]
//!
//! ## Quick Example
//!
//! ```no_run
//! use dynamodb_console::{config, repository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = config::ClientConfig::from_env().connect().await;
//! let repository = repository::TableRepository::new(client);
//!
//! // First page of 50 rows, key columns first
//! let page = repository.table_contents("users", 50, None).await?;
//! println!("{}", page.attribute_names.join(", "));
//!
//! // Next page, resumed from the opaque cursor
//! if let Some(cursor) = &page.last_evaluated_key {
//!     let next = repository.table_contents("users", 50, Some(cursor)).await?;
//!     println!("{} more rows", next.items.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Field model, codec, keys, cursors and errors
//! - [`mod@read`] - Read operations (GetItem, Scan)
//! - [`mod@write`] - Write operations (PutItem, DeleteItem)
//! - [`mod@table`] - Table administration
//! - [`mod@repository`] - Table-level façade
//! - [`mod@config`] - Client configuration

pub mod client;

/// Field model, codec, keys, cursors and errors.
pub mod common;

pub mod config;

/// Read operations for retrieving data from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Scanning tables page by page
pub mod read;

pub mod repository;

pub mod table;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Deleting items by key
pub mod write;

#[cfg(test)]
mod testing;

//! Read operations for retrieving data from DynamoDB tables.
//!
//! This module provides operations for reading data from DynamoDB:
//! - Getting individual items by primary key
//! - Scanning tables page by page

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Scan operation for reading a table one page at a time.
pub mod scan;

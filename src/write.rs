//! Write operations for modifying data in DynamoDB tables.
//!
//! Items are encoded before any call is made, so a field that fails validation
//! never results in a partial write.

/// Delete item operation for removing items by primary key.
pub mod delete_item;

/// Put item operation for creating or replacing items.
pub mod put_item;

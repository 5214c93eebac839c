//! The table-access primitive.
//!
//! [`TableAccess`] is the seam between this crate and the network: every
//! operation the crate performs goes through it. It is implemented for the AWS
//! SDK [`Client`]; tests and embedders can supply their own implementation.

use crate::common::{error, field};
use crate::{read, table, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types};

/// Provider calls used by the codec-level operations.
///
/// Implementations perform exactly one round trip per call (except
/// [`TableAccess::list_table_names`], which drains the listing) and report
/// resource-not-found as [`error::Error::NotFound`].
#[async_trait]
pub trait TableAccess: Send + Sync {
    /// One bounded scan call.
    async fn scan(&self, input: read::scan::ScanInput) -> error::Result<read::scan::ScanOutput>;

    /// Point lookup by primary key.
    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> error::Result<Option<field::NativeItem>>;

    /// Create or replace an item.
    async fn put_item(&self, input: write::put_item::PutItemInput) -> error::Result<()>;

    /// Delete an item by primary key.
    async fn delete_item(&self, input: write::delete_item::DeleteItemInput) -> error::Result<()>;

    /// Create a table.
    async fn create_table(&self, input: table::CreateTableInput) -> error::Result<()>;

    /// Delete a table.
    async fn delete_table(&self, table_name: &str) -> error::Result<()>;

    /// Names of all tables.
    async fn list_table_names(&self) -> error::Result<Vec<String>>;

    /// Schema and status of a table.
    async fn describe_table(&self, table_name: &str) -> error::Result<types::TableDescription>;
}

#[async_trait]
impl TableAccess for Client {
    async fn scan(&self, input: read::scan::ScanInput) -> error::Result<read::scan::ScanOutput> {
        let output = self
            .scan()
            .table_name(input.table_name)
            .limit(input.limit)
            .consistent_read(input.consistent_read)
            .set_exclusive_start_key(input.exclusive_start_key)
            .send()
            .await
            .map_err(|err| error::Error::from_sdk("Scan", err))?;
        Ok(read::scan::ScanOutput {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> error::Result<Option<field::NativeItem>> {
        let output = self
            .get_item()
            .table_name(input.table_name)
            .set_key(Some(input.keys))
            .consistent_read(input.consistent_read)
            .send()
            .await
            .map_err(|err| error::Error::from_sdk("GetItem", err))?;
        Ok(output.item)
    }

    async fn put_item(&self, input: write::put_item::PutItemInput) -> error::Result<()> {
        self.put_item()
            .table_name(input.table_name)
            .set_item(Some(input.item))
            .send()
            .await
            .map_err(|err| error::Error::from_sdk("PutItem", err))?;
        Ok(())
    }

    async fn delete_item(&self, input: write::delete_item::DeleteItemInput) -> error::Result<()> {
        self.delete_item()
            .table_name(input.table_name)
            .set_key(Some(input.keys))
            .send()
            .await
            .map_err(|err| error::Error::from_sdk("DeleteItem", err))?;
        Ok(())
    }

    async fn create_table(&self, input: table::CreateTableInput) -> error::Result<()> {
        self.create_table()
            .table_name(input.table_name)
            .set_key_schema(Some(input.key_schema))
            .set_attribute_definitions(Some(input.attribute_definitions))
            .table_class(input.table_class)
            .billing_mode(input.billing_mode)
            .provisioned_throughput(input.provisioned_throughput)
            .stream_specification(input.stream_specification)
            .deletion_protection_enabled(input.deletion_protection_enabled)
            .send()
            .await
            .map_err(|err| error::Error::from_sdk("CreateTable", err))?;
        Ok(())
    }

    async fn delete_table(&self, table_name: &str) -> error::Result<()> {
        self.delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|err| error::Error::from_sdk("DeleteTable", err))?;
        Ok(())
    }

    async fn list_table_names(&self) -> error::Result<Vec<String>> {
        let mut paginator = self.list_tables().into_paginator().send();
        let mut table_names = Vec::new();
        while let Some(page) = paginator.next().await {
            let page = page.map_err(|err| error::Error::from_sdk("ListTables", err))?;
            table_names.extend(page.table_names.unwrap_or_default());
        }
        Ok(table_names)
    }

    async fn describe_table(&self, table_name: &str) -> error::Result<types::TableDescription> {
        let output = self
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|err| error::Error::from_sdk("DescribeTable", err))?;
        output.table.ok_or_else(|| error::Error::NotFound {
            message: format!("Table '{table_name}' was not found"),
        })
    }
}

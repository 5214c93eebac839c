//! Table-level façade over [`TableAccess`].
//!
//! [`TableRepository`] wraps a client and exposes every operation of the crate
//! by table name, plus [`TableRepository::table_contents`], which combines a
//! table description with a page of rows the way a table browser needs it.

use crate::client::TableAccess;
use crate::common::{cursor, error, field, key};
use crate::{read, table, write};

use serde::Serialize;

/// A page of rows with the metadata needed to render them as a grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContents {
    /// Partition key of the table.
    pub partition_key: key::KeyAttribute,
    /// Sort key of the table, if any.
    pub sort_key: Option<key::KeyAttribute>,
    /// Column names: partition key, sort key, then every other attribute in
    /// the order it first appears in `items`.
    pub attribute_names: Vec<String>,
    /// Cursor token for the next page, `None` once the table is exhausted.
    pub last_evaluated_key: Option<String>,
    /// The rows.
    pub items: Vec<field::Item>,
}

/// Repository of DynamoDB tables.
///
/// ```rust,no_run
/// use dynamodb_console::{config, repository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = config::ClientConfig::from_env().connect().await;
/// let repository = repository::TableRepository::new(client);
/// let contents = repository.table_contents("users", 50, None).await?;
/// for name in &contents.attribute_names {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TableRepository<C> {
    client: C,
}

fn ensure_table_name(table_name: &str) -> error::Result<()> {
    if table_name.trim().is_empty() {
        return Err(error::Error::invalid_argument("Table name cannot be empty"));
    }
    Ok(())
}

fn attribute_names(table: &table::TableDescriptor, items: &[field::Item]) -> Vec<String> {
    let mut names = vec![table.partition_key.name.clone()];
    if let Some(sort_key) = &table.sort_key {
        names.push(sort_key.name.clone());
    }
    for name in items.iter().flat_map(|item| item.keys()) {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

impl<C: TableAccess> TableRepository<C> {
    /// Wrap a client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create a table with the default settings.
    pub async fn create_table(&self, create_table: table::CreateTable) -> error::Result<()> {
        create_table.send(&self.client).await
    }

    /// Delete a table.
    pub async fn delete_table(&self, table_name: &str) -> error::Result<()> {
        table::delete_table(&self.client, table_name).await
    }

    /// Names of all tables.
    pub async fn list_tables(&self) -> error::Result<Vec<String>> {
        table::list_tables(&self.client).await
    }

    /// Describe a table.
    pub async fn describe_table(&self, table_name: &str) -> error::Result<table::TableInfo> {
        table::describe_table(&self.client, table_name).await
    }

    /// Read one item with strong consistency.
    pub async fn get_item(&self, table_name: &str, keys: key::Keys) -> error::Result<field::Item> {
        read::get_item::GetItem {
            consistent_read: true,
            keys,
            table_name: table_name.to_string(),
        }
        .send(&self.client)
        .await
    }

    /// Create or replace an item.
    pub async fn put_item(&self, table_name: &str, item: field::Item) -> error::Result<()> {
        write::put_item::PutItem {
            item,
            table_name: table_name.to_string(),
        }
        .send(&self.client)
        .await
    }

    /// Delete an item.
    pub async fn delete_item(&self, table_name: &str, keys: key::Keys) -> error::Result<()> {
        write::delete_item::DeleteItem {
            keys,
            table_name: table_name.to_string(),
        }
        .send(&self.client)
        .await
    }

    /// Read one page of rows, resuming after `exclusive_start_key`.
    pub async fn scan(
        &self,
        table_name: &str,
        limit: i32,
        exclusive_start_key: Option<field::Item>,
    ) -> error::Result<read::scan::ScanPage> {
        read::scan::Scan {
            exclusive_start_key,
            limit,
            table_name: table_name.to_string(),
        }
        .send(&self.client)
        .await
    }

    /// Read one page of rows together with the table's key schema.
    ///
    /// `cursor_token` is a token from a previous call; a blank token starts
    /// from the beginning of the table. Arguments are validated before the
    /// table is described.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_console.table_contents", skip(self), err)
    )]
    pub async fn table_contents(
        &self,
        table_name: &str,
        limit: i32,
        cursor_token: Option<&str>,
    ) -> error::Result<TableContents> {
        ensure_table_name(table_name)?;
        if !(read::scan::MIN_LIMIT..=read::scan::MAX_LIMIT).contains(&limit) {
            return Err(error::Error::invalid_argument(format!(
                "Limit must be between {} and {}, got {limit}",
                read::scan::MIN_LIMIT,
                read::scan::MAX_LIMIT
            )));
        }
        let exclusive_start_key = cursor_token
            .filter(|token| !token.trim().is_empty())
            .map(cursor::decode_cursor)
            .transpose()?;
        let table = self.describe_table(table_name).await?.descriptor();
        let page = self.scan(table_name, limit, exclusive_start_key).await?;
        let last_evaluated_key = page
            .last_evaluated_key
            .as_ref()
            .map(cursor::encode_cursor)
            .transpose()?;
        Ok(TableContents {
            attribute_names: attribute_names(&table, &page.items),
            partition_key: table.partition_key,
            sort_key: table.sort_key,
            last_evaluated_key,
            items: page.items,
        })
    }
}

use crate::client::TableAccess;
use crate::common::{error, field, key};

/// delete item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItemInput {
    /// Native primary key.
    pub keys: field::NativeItem,
    /// The table to delete from.
    pub table_name: String,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_console::common::{field::Field, key};
/// use dynamodb_console::write;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     keys: key::Keys {
///         partition_key: key::Key {
///             name: "id".to_string(),
///             value: Field::string("1"),
///         },
///         ..Default::default()
///     },
///     table_name: "users".to_string(),
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItem {
    /// The primary key of the item to delete.
    pub keys: key::Keys,
    /// The table to delete from.
    pub table_name: String,
}

impl TryFrom<DeleteItem> for DeleteItemInput {
    type Error = error::Error;

    fn try_from(delete_item: DeleteItem) -> error::Result<Self> {
        if delete_item.table_name.trim().is_empty() {
            return Err(error::Error::invalid_argument("Table name cannot be empty"));
        }
        let keys = delete_item.keys.try_into()?;
        let operation = Self {
            keys,
            table_name: delete_item.table_name,
        };
        Ok(operation)
    }
}

impl DeleteItem {
    /// Execute the delete item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_console.delete_item", skip(client), err)
    )]
    pub async fn send<C: TableAccess + ?Sized>(self, client: &C) -> error::Result<()> {
        let delete_item: DeleteItemInput = self.try_into()?;
        client.delete_item(delete_item).await
    }
}

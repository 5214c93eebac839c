use crate::client::TableAccess;
use crate::common::{codec, error, field};

/// put item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItemInput {
    /// Native item to write.
    pub item: field::NativeItem,
    /// The table to write to.
    pub table_name: String,
}

/// Put item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_console::common::field::{Field, Item};
/// use dynamodb_console::write;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: Item::from([
///         ("id".to_string(), Field::string("1")),
///         ("name".to_string(), Field::string("John")),
///     ]),
///     table_name: "users".to_string(),
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItem {
    /// The item to put into the table.
    pub item: field::Item,
    /// The table to write to.
    pub table_name: String,
}

impl TryFrom<PutItem> for PutItemInput {
    type Error = error::Error;

    fn try_from(put_item: PutItem) -> error::Result<Self> {
        if put_item.table_name.trim().is_empty() {
            return Err(error::Error::invalid_argument("Table name cannot be empty"));
        }
        let item = codec::encode_item(&put_item.item)?;
        let operation = Self {
            item,
            table_name: put_item.table_name,
        };
        Ok(operation)
    }
}

impl PutItem {
    /// Execute the put item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_console.put_item", skip(client), err)
    )]
    pub async fn send<C: TableAccess + ?Sized>(self, client: &C) -> error::Result<()> {
        let put_item: PutItemInput = self.try_into()?;
        client.put_item(put_item).await
    }
}

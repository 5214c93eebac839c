use crate::client::TableAccess;
use crate::common::{codec, error, field, key};

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItemInput {
    /// Whether to use a strongly consistent read.
    pub consistent_read: bool,
    /// Native primary key.
    pub keys: field::NativeItem,
    /// The table to read from.
    pub table_name: String,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_console::common::{field::Field, key};
/// use dynamodb_console::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     keys: key::Keys {
///         partition_key: key::Key {
///             name: "id".to_string(),
///             value: Field::string("1"),
///         },
///         ..Default::default()
///     },
///     table_name: "users".to_string(),
///     ..Default::default()
/// };
/// let item = get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem {
    /// Whether to use a strongly consistent read.
    pub consistent_read: bool,
    /// The primary key of the item to retrieve.
    pub keys: key::Keys,
    /// The table to read from.
    pub table_name: String,
}

impl TryFrom<GetItem> for GetItemInput {
    type Error = error::Error;

    fn try_from(get_item: GetItem) -> error::Result<Self> {
        if get_item.table_name.trim().is_empty() {
            return Err(error::Error::invalid_argument("Table name cannot be empty"));
        }
        let keys = get_item.keys.try_into()?;
        let operation = Self {
            consistent_read: get_item.consistent_read,
            keys,
            table_name: get_item.table_name,
        };
        Ok(operation)
    }
}

impl GetItem {
    /// Execute the get item operation. A missing item is [`error::Error::NotFound`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_console.get_item", skip(client), err)
    )]
    pub async fn send<C: TableAccess + ?Sized>(self, client: &C) -> error::Result<field::Item> {
        let get_item: GetItemInput = self.try_into()?;
        let table_name = get_item.table_name.clone();
        match client.get_item(get_item).await? {
            Some(native_item) => codec::decode_item(native_item),
            None => Err(error::Error::NotFound {
                message: format!("Item was not found in table '{table_name}'"),
            }),
        }
    }
}

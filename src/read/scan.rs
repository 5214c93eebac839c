use crate::client::TableAccess;
use crate::common::{codec, error, field};

/// Smallest page size a caller may request.
pub const MIN_LIMIT: i32 = 1;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i32 = 500;

/// One bounded scan call, as handed to [`TableAccess::scan`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanInput {
    /// Always `true`: pages are read with strong consistency.
    pub consistent_read: bool,
    /// Native key to resume after, `None` for the first call.
    pub exclusive_start_key: Option<field::NativeItem>,
    /// Maximum number of rows the store may evaluate in this call.
    pub limit: i32,
    /// The table to scan.
    pub table_name: String,
}

/// Result of one bounded scan call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanOutput {
    /// Rows returned by the call.
    pub items: Vec<field::NativeItem>,
    /// Resume key; `None` or empty once the table is exhausted.
    pub last_evaluated_key: Option<field::NativeItem>,
}

/// One page of decoded rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanPage {
    /// The rows, in the order the store returned them.
    pub items: Vec<field::Item>,
    /// Cursor for the next page, `None` once the table is exhausted.
    pub last_evaluated_key: Option<field::Item>,
}

/// Scan operation.
///
/// Issues strongly consistent scan calls, each bounded by `limit`, until at
/// least `limit` rows were collected or the store reports no further rows.
/// A single call may return up to `limit` rows on its own, so a page can hold
/// more than `limit` rows when an earlier call came back short.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_console::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     table_name: "users".to_string(),
///     limit: 50,
///     ..Default::default()
/// };
/// let page = scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Cursor returned with a previous page. An empty item counts as no cursor.
    pub exclusive_start_key: Option<field::Item>,
    /// Requested page size, between [`MIN_LIMIT`] and [`MAX_LIMIT`].
    pub limit: i32,
    /// The table to scan.
    pub table_name: String,
}

impl TryFrom<Scan> for ScanInput {
    type Error = error::Error;

    fn try_from(scan: Scan) -> error::Result<Self> {
        if scan.table_name.trim().is_empty() {
            return Err(error::Error::invalid_argument("Table name cannot be empty"));
        }
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&scan.limit) {
            return Err(error::Error::invalid_argument(format!(
                "Limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {}",
                scan.limit
            )));
        }
        let exclusive_start_key = scan
            .exclusive_start_key
            .filter(|key| !key.is_empty())
            .map(|key| codec::encode_item(&key))
            .transpose()?;
        let operation = Self {
            consistent_read: true,
            exclusive_start_key,
            limit: scan.limit,
            table_name: scan.table_name,
        };
        Ok(operation)
    }
}

impl Scan {
    /// Execute the scan.
    ///
    /// Any failed call fails the whole page; rows collected before it are dropped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_console.scan", skip(client), err)
    )]
    pub async fn send<C: TableAccess + ?Sized>(self, client: &C) -> error::Result<ScanPage> {
        let scan: ScanInput = self.try_into()?;
        let limit = usize::try_from(scan.limit).unwrap_or_default();
        let mut native_items = Vec::new();
        let mut last_evaluated_key = scan.exclusive_start_key;
        loop {
            let output = client
                .scan(ScanInput {
                    consistent_read: scan.consistent_read,
                    exclusive_start_key: last_evaluated_key.take(),
                    limit: scan.limit,
                    table_name: scan.table_name.clone(),
                })
                .await?;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                rows = output.items.len(),
                more = output.last_evaluated_key.is_some(),
                "scan call returned"
            );
            native_items.extend(output.items);
            last_evaluated_key = output.last_evaluated_key.filter(|key| !key.is_empty());
            if native_items.len() >= limit || last_evaluated_key.is_none() {
                break;
            }
        }
        let items = native_items
            .into_iter()
            .map(codec::decode_item)
            .collect::<error::Result<Vec<_>>>()?;
        let last_evaluated_key = last_evaluated_key.map(codec::decode_item).transpose()?;
        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}

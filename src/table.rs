//! Table administration: creation with fixed defaults, deletion, listing and
//! a readable summary of a table's schema and status.

use crate::client::TableAccess;
use crate::common::{error, key};

use aws_sdk_dynamodb::types;
use serde::{Deserialize, Serialize};

/// Read and write capacity units new tables are provisioned with.
pub const DEFAULT_CAPACITY_UNITS: i64 = 5;

const UNKNOWN: &str = "(Unknown)";

/// create table operation
#[derive(Clone, Debug, PartialEq)]
pub struct CreateTableInput {
    /// Key attribute declarations.
    pub attribute_definitions: Vec<types::AttributeDefinition>,
    /// Billing mode.
    pub billing_mode: types::BillingMode,
    /// Whether deletion protection is on.
    pub deletion_protection_enabled: bool,
    /// Partition key and optional sort key.
    pub key_schema: Vec<types::KeySchemaElement>,
    /// Provisioned read and write capacity.
    pub provisioned_throughput: types::ProvisionedThroughput,
    /// Stream settings.
    pub stream_specification: types::StreamSpecification,
    /// Table class.
    pub table_class: types::TableClass,
    /// The table to create.
    pub table_name: String,
}

/// Create table operation.
///
/// Tables are created with the AWS defaults: standard class, provisioned billing
/// with 5 read and 5 write capacity units, streams off, deletion protection off.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_console::{common::key, table};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let create_table = table::CreateTable {
///     table_name: "users".to_string(),
///     partition_key: key::KeyAttribute {
///         name: "id".to_string(),
///         attribute_type: key::KeyAttributeType::String,
///     },
///     sort_key: None,
/// };
/// create_table.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTable {
    /// The table to create.
    pub table_name: String,
    /// Partition key declaration.
    pub partition_key: key::KeyAttribute,
    /// Sort key declaration. Ignored when its name is empty.
    pub sort_key: Option<key::KeyAttribute>,
}

fn key_schema_element(
    attribute: &key::KeyAttribute,
    key_type: types::KeyType,
) -> error::Result<(types::KeySchemaElement, types::AttributeDefinition)> {
    let element = types::KeySchemaElement::builder()
        .attribute_name(&attribute.name)
        .key_type(key_type)
        .build()?;
    let definition = types::AttributeDefinition::builder()
        .attribute_name(&attribute.name)
        .attribute_type(attribute.attribute_type.into())
        .build()?;
    Ok((element, definition))
}

impl TryFrom<CreateTable> for CreateTableInput {
    type Error = error::Error;

    fn try_from(create_table: CreateTable) -> error::Result<Self> {
        if create_table.table_name.trim().is_empty() {
            return Err(error::Error::invalid_argument("Table name cannot be empty"));
        }
        if create_table.partition_key.name.is_empty() {
            return Err(error::Error::invalid_argument(
                "Partition key name cannot be empty",
            ));
        }
        let (partition_element, partition_definition) =
            key_schema_element(&create_table.partition_key, types::KeyType::Hash)?;
        let mut key_schema = vec![partition_element];
        let mut attribute_definitions = vec![partition_definition];
        if let Some(sort_key) = create_table
            .sort_key
            .filter(|sort_key| !sort_key.name.is_empty())
        {
            let (sort_element, sort_definition) =
                key_schema_element(&sort_key, types::KeyType::Range)?;
            key_schema.push(sort_element);
            attribute_definitions.push(sort_definition);
        }
        let operation = Self {
            attribute_definitions,
            billing_mode: types::BillingMode::Provisioned,
            deletion_protection_enabled: false,
            key_schema,
            provisioned_throughput: types::ProvisionedThroughput::builder()
                .read_capacity_units(DEFAULT_CAPACITY_UNITS)
                .write_capacity_units(DEFAULT_CAPACITY_UNITS)
                .build()?,
            stream_specification: types::StreamSpecification::builder()
                .stream_enabled(false)
                .build()?,
            table_class: types::TableClass::Standard,
            table_name: create_table.table_name,
        };
        Ok(operation)
    }
}

impl CreateTable {
    /// Execute the create table operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_console.create_table", skip(client), err)
    )]
    pub async fn send<C: TableAccess + ?Sized>(self, client: &C) -> error::Result<()> {
        let create_table: CreateTableInput = self.try_into()?;
        client.create_table(create_table).await
    }
}

/// Name and key attributes of a table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    /// Table name.
    pub name: String,
    /// Partition key.
    pub partition_key: key::KeyAttribute,
    /// Sort key, for composite primary keys.
    pub sort_key: Option<key::KeyAttribute>,
}

/// Readable summary of a described table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    /// Table name.
    pub name: String,
    /// Table ARN.
    pub arn: Option<String>,
    /// Approximate number of items.
    pub item_count: i64,
    /// Approximate size in bytes.
    pub table_size_bytes: i64,
    /// `Standard`, `Standard-IA` or `(Unknown)`.
    pub table_class: String,
    /// `On-demand`, `Provisioned` or `(Unknown)`.
    pub billing_mode: String,
    /// Provisioned read capacity units.
    pub read_capacity_units: i64,
    /// Provisioned write capacity units.
    pub write_capacity_units: i64,
    /// Whether deletion protection is on.
    pub deletion_protection_enabled: bool,
    /// Status with only its first letter capitalized, e.g. `Active`.
    pub status: String,
    /// Partition key.
    pub partition_key: key::KeyAttribute,
    /// Sort key, for composite primary keys.
    pub sort_key: Option<key::KeyAttribute>,
    /// Every declared attribute.
    pub attributes: Vec<key::KeyAttribute>,
}

impl TableInfo {
    /// Name and key attributes only.
    pub fn descriptor(&self) -> TableDescriptor {
        TableDescriptor {
            name: self.name.clone(),
            partition_key: self.partition_key.clone(),
            sort_key: self.sort_key.clone(),
        }
    }
}

/// Readable billing mode.
pub fn billing_mode_name(billing_mode: Option<&types::BillingMode>) -> &'static str {
    match billing_mode {
        Some(types::BillingMode::PayPerRequest) => "On-demand",
        Some(types::BillingMode::Provisioned) => "Provisioned",
        _ => UNKNOWN,
    }
}

/// Readable table class.
pub fn table_class_name(table_class: Option<&types::TableClass>) -> &'static str {
    match table_class {
        Some(types::TableClass::Standard) => "Standard",
        Some(types::TableClass::StandardInfrequentAccess) => "Standard-IA",
        _ => UNKNOWN,
    }
}

/// Status with only its first letter capitalized.
pub fn status_name(status: Option<&types::TableStatus>) -> String {
    let status = status.map(types::TableStatus::as_str).unwrap_or_default();
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => UNKNOWN.to_string(),
    }
}

fn key_attribute(
    table: &types::TableDescription,
    key_type: types::KeyType,
) -> error::Result<Option<key::KeyAttribute>> {
    let Some(element) = table
        .key_schema()
        .iter()
        .find(|element| *element.key_type() == key_type)
    else {
        return Ok(None);
    };
    let definition = table
        .attribute_definitions()
        .iter()
        .find(|definition| definition.attribute_name() == element.attribute_name())
        .ok_or_else(|| error::Error::InvalidResponse {
            message: format!(
                "Key attribute '{}' has no attribute definition",
                element.attribute_name()
            ),
        })?;
    let key_attribute = key::KeyAttribute {
        name: definition.attribute_name().to_string(),
        attribute_type: definition.attribute_type().try_into()?,
    };
    Ok(Some(key_attribute))
}

impl TryFrom<types::TableDescription> for TableInfo {
    type Error = error::Error;

    fn try_from(table: types::TableDescription) -> error::Result<Self> {
        let partition_key = key_attribute(&table, types::KeyType::Hash)?.ok_or_else(|| {
            error::Error::InvalidResponse {
                message: "Table has no partition key".to_string(),
            }
        })?;
        let sort_key = key_attribute(&table, types::KeyType::Range)?;
        let attributes = table
            .attribute_definitions()
            .iter()
            .map(|definition| {
                Ok(key::KeyAttribute {
                    name: definition.attribute_name().to_string(),
                    attribute_type: definition.attribute_type().try_into()?,
                })
            })
            .collect::<error::Result<Vec<_>>>()?;
        let throughput = table.provisioned_throughput();
        let info = Self {
            name: table.table_name().unwrap_or_default().to_string(),
            arn: table.table_arn().map(str::to_string),
            item_count: table.item_count().unwrap_or_default(),
            table_size_bytes: table.table_size_bytes().unwrap_or_default(),
            table_class: table_class_name(
                table
                    .table_class_summary()
                    .and_then(|summary| summary.table_class()),
            )
            .to_string(),
            billing_mode: billing_mode_name(
                table
                    .billing_mode_summary()
                    .and_then(|summary| summary.billing_mode()),
            )
            .to_string(),
            read_capacity_units: throughput
                .and_then(|throughput| throughput.read_capacity_units())
                .unwrap_or_default(),
            write_capacity_units: throughput
                .and_then(|throughput| throughput.write_capacity_units())
                .unwrap_or_default(),
            deletion_protection_enabled: table.deletion_protection_enabled().unwrap_or_default(),
            status: status_name(table.table_status()),
            partition_key,
            sort_key,
            attributes,
        };
        Ok(info)
    }
}

/// Describe a table.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "dynamodb_console.describe_table", skip(client), err)
)]
pub async fn describe_table<C: TableAccess + ?Sized>(
    client: &C,
    table_name: &str,
) -> error::Result<TableInfo> {
    if table_name.trim().is_empty() {
        return Err(error::Error::invalid_argument("Table name cannot be empty"));
    }
    client.describe_table(table_name).await?.try_into()
}

/// Delete a table.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "dynamodb_console.delete_table", skip(client), err)
)]
pub async fn delete_table<C: TableAccess + ?Sized>(
    client: &C,
    table_name: &str,
) -> error::Result<()> {
    if table_name.trim().is_empty() {
        return Err(error::Error::invalid_argument("Table name cannot be empty"));
    }
    client.delete_table(table_name).await
}

/// Names of all tables.
pub async fn list_tables<C: TableAccess + ?Sized>(client: &C) -> error::Result<Vec<String>> {
    client.list_table_names().await
}

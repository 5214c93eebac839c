//! In-memory [`TableAccess`] for tests.
//!
//! Rows are kept in insertion order. Each scan call returns at most
//! `min(limit, page_size)` rows and a resume key only while rows remain.

use crate::client::TableAccess;
use crate::common::{error, field};
use crate::{read, table, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::types;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

struct MemoryTable {
    key_schema: Vec<types::KeySchemaElement>,
    attribute_definitions: Vec<types::AttributeDefinition>,
    rows: Vec<field::NativeItem>,
}

impl MemoryTable {
    fn key_of(&self, row: &field::NativeItem) -> field::NativeItem {
        self.key_schema
            .iter()
            .filter_map(|element| {
                row.get(element.attribute_name())
                    .map(|value| (element.attribute_name().to_string(), value.clone()))
            })
            .collect()
    }

    fn position(&self, keys: &field::NativeItem) -> Option<usize> {
        self.rows.iter().position(|row| self.key_of(row) == *keys)
    }
}

#[derive(Default)]
struct State {
    tables: Vec<(String, MemoryTable)>,
    scan_inputs: Vec<read::scan::ScanInput>,
    fail_scan_on_call: Option<usize>,
}

impl State {
    fn table(&mut self, table_name: &str) -> error::Result<&mut MemoryTable> {
        self.tables
            .iter_mut()
            .find(|(name, _)| name == table_name)
            .map(|(_, table)| table)
            .ok_or_else(|| error::Error::NotFound {
                message: format!("Table '{table_name}' was not found"),
            })
    }
}

/// Tables held in memory, keyed by name.
pub(crate) struct MemoryTables {
    page_size: usize,
    state: Mutex<State>,
}

impl Default for MemoryTables {
    fn default() -> Self {
        Self {
            page_size: usize::MAX,
            state: Mutex::default(),
        }
    }
}

#[derive(Serialize)]
struct Row {
    id: String,
    position: usize,
    tags: Vec<&'static str>,
}

/// Partition key value of the `index`-th generated row.
pub(crate) fn row_id(index: usize) -> String {
    format!("row#{index:03}")
}

impl MemoryTables {
    /// A table keyed by `id` holding `rows` generated rows, scanned `page_size` rows at a time.
    pub(crate) fn with_rows(table_name: &str, rows: usize, page_size: usize) -> Self {
        let rows = (0..rows)
            .map(|index| {
                serde_dynamo::to_item(Row {
                    id: row_id(index),
                    position: index,
                    tags: vec!["generated"],
                })
                .unwrap()
            })
            .collect();
        let table = MemoryTable {
            key_schema: vec![
                types::KeySchemaElement::builder()
                    .attribute_name("id")
                    .key_type(types::KeyType::Hash)
                    .build()
                    .unwrap(),
            ],
            attribute_definitions: vec![
                types::AttributeDefinition::builder()
                    .attribute_name("id")
                    .attribute_type(types::ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            ],
            rows,
        };
        Self {
            page_size,
            state: Mutex::new(State {
                tables: vec![(table_name.to_string(), table)],
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Make the `call`-th scan call (1-based) fail.
    pub(crate) fn fail_scan_on_call(&self, call: usize) {
        self.state().fail_scan_on_call = Some(call);
    }

    /// Number of scan calls issued so far, failed ones included.
    pub(crate) fn scan_calls(&self) -> usize {
        self.state().scan_inputs.len()
    }

    /// Every scan call issued so far.
    pub(crate) fn scan_inputs(&self) -> Vec<read::scan::ScanInput> {
        self.state().scan_inputs.clone()
    }

    /// Number of rows in a table.
    pub(crate) fn row_count(&self, table_name: &str) -> usize {
        self.state()
            .table(table_name)
            .map(|table| table.rows.len())
            .unwrap_or_default()
    }

    /// Insert a row without going through the codec.
    pub(crate) fn insert_row(&self, table_name: &str, row: field::NativeItem) {
        if let Ok(table) = self.state().table(table_name) {
            table.rows.push(row);
        }
    }
}

#[async_trait]
impl TableAccess for MemoryTables {
    async fn scan(&self, input: read::scan::ScanInput) -> error::Result<read::scan::ScanOutput> {
        let page_size = self.page_size;
        let mut state = self.state();
        state.scan_inputs.push(input.clone());
        if state.fail_scan_on_call == Some(state.scan_inputs.len()) {
            return Err(error::Error::Provider {
                operation: "Scan",
                code: Some("InternalServerError".to_string()),
                source: "injected failure".into(),
            });
        }
        let table = state.table(&input.table_name)?;
        let start = match &input.exclusive_start_key {
            Some(keys) => table.position(keys).map_or(table.rows.len(), |index| index + 1),
            None => 0,
        };
        let count = usize::try_from(input.limit)
            .unwrap_or_default()
            .min(page_size);
        let end = (start + count).min(table.rows.len());
        let items = table.rows[start..end].to_vec();
        let last_evaluated_key = match items.last() {
            Some(last) if end < table.rows.len() => Some(table.key_of(last)),
            _ => None,
        };
        Ok(read::scan::ScanOutput {
            items,
            last_evaluated_key,
        })
    }

    async fn get_item(
        &self,
        input: read::get_item::GetItemInput,
    ) -> error::Result<Option<field::NativeItem>> {
        let mut state = self.state();
        let table = state.table(&input.table_name)?;
        Ok(table
            .position(&input.keys)
            .map(|index| table.rows[index].clone()))
    }

    async fn put_item(&self, input: write::put_item::PutItemInput) -> error::Result<()> {
        let mut state = self.state();
        let table = state.table(&input.table_name)?;
        let keys = table.key_of(&input.item);
        match table.position(&keys) {
            Some(index) => table.rows[index] = input.item,
            None => table.rows.push(input.item),
        }
        Ok(())
    }

    async fn delete_item(&self, input: write::delete_item::DeleteItemInput) -> error::Result<()> {
        let mut state = self.state();
        let table = state.table(&input.table_name)?;
        if let Some(index) = table.position(&input.keys) {
            table.rows.remove(index);
        }
        Ok(())
    }

    async fn create_table(&self, input: table::CreateTableInput) -> error::Result<()> {
        let mut state = self.state();
        if state.table(&input.table_name).is_ok() {
            return Err(error::Error::Provider {
                operation: "CreateTable",
                code: Some("ResourceInUseException".to_string()),
                source: "table already exists".into(),
            });
        }
        state.tables.push((
            input.table_name,
            MemoryTable {
                key_schema: input.key_schema,
                attribute_definitions: input.attribute_definitions,
                rows: Vec::new(),
            },
        ));
        Ok(())
    }

    async fn delete_table(&self, table_name: &str) -> error::Result<()> {
        let mut state = self.state();
        state.table(table_name)?;
        state.tables.retain(|(name, _)| name != table_name);
        Ok(())
    }

    async fn list_table_names(&self) -> error::Result<Vec<String>> {
        Ok(self
            .state()
            .tables
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn describe_table(&self, table_name: &str) -> error::Result<types::TableDescription> {
        let mut state = self.state();
        let table = state.table(table_name)?;
        let item_count = i64::try_from(table.rows.len()).unwrap_or_default();
        Ok(types::TableDescription::builder()
            .table_name(table_name)
            .item_count(item_count)
            .table_status(types::TableStatus::Active)
            .set_key_schema(Some(table.key_schema.clone()))
            .set_attribute_definitions(Some(table.attribute_definitions.clone()))
            .build())
    }
}

//! End-to-end tests for dsql.
//!
//! Statements run through a real [`Connection`] against [`MemoryStore`], an
//! in-memory [`Transport`] that understands the six supported operations well
//! enough to exercise the full parse, send, decode and project path. No
//! network or async runtime is involved.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Once};

use bytes::Bytes;
use dsql_core::{
    Advance, Connection, DsqlConfig, Rows, Transport, TransportError, TransportRegistry, Value,
};
use dsql_model::input::{
    CreateTableInput, DeleteItemInput, DeleteTableInput, PutItemInput, QueryInput,
    UpdateItemInput,
};
use dsql_model::output::QueryOutput;
use dsql_model::types::{
    AttributeAction, ComparisonOperator, Condition, KeySchemaElement, KeyType,
};
use dsql_model::{AttributeValue, DsqlOperation, Item, ServiceError, ServiceErrorCode};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tracing::debug;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

#[derive(Debug, Default)]
struct Table {
    key_schema: Vec<KeySchemaElement>,
    items: Vec<Item>,
}

impl Table {
    fn key_of(&self, item: &Item) -> Vec<Option<AttributeValue>> {
        self.key_schema
            .iter()
            .map(|k| item.get(&k.attribute_name).cloned())
            .collect()
    }

    fn position(&self, key: &Item) -> Option<usize> {
        let wanted = self.key_of(key);
        self.items.iter().position(|item| self.key_of(item) == wanted)
    }

    fn range_key(&self) -> Option<&str> {
        self.key_schema
            .iter()
            .find(|k| k.key_type == KeyType::Range)
            .map(|k| k.attribute_name.as_str())
    }
}

/// An in-memory store speaking the JSON protocol.
///
/// Every request is recorded as `(target, body)` so tests can assert the
/// exact wire shape a statement produced.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Table>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().clone()
    }

    /// Number of items stored in `table`.
    #[must_use]
    pub fn item_count(&self, table: &str) -> usize {
        self.tables.lock().get(table).map_or(0, |t| t.items.len())
    }

    fn dispatch(&self, operation: DsqlOperation, body: &[u8]) -> Result<Bytes, TransportError> {
        let mut tables = self.tables.lock();
        match operation {
            DsqlOperation::CreateTable => {
                let input: CreateTableInput = decode(body)?;
                if tables.contains_key(&input.table_name) {
                    return Err(service(
                        ServiceErrorCode::ResourceInUseException,
                        &input.table_name,
                    ));
                }
                tables.insert(
                    input.table_name,
                    Table {
                        key_schema: input.key_schema,
                        items: Vec::new(),
                    },
                );
                Ok(empty())
            }
            DsqlOperation::DeleteTable => {
                let input: DeleteTableInput = decode(body)?;
                tables
                    .remove(&input.table_name)
                    .ok_or_else(|| not_found(&input.table_name))?;
                Ok(empty())
            }
            DsqlOperation::PutItem => {
                let input: PutItemInput = decode(body)?;
                let table = table_mut(&mut tables, &input.table_name)?;
                match table.position(&input.item) {
                    Some(i) => table.items[i] = input.item,
                    None => table.items.push(input.item),
                }
                Ok(empty())
            }
            DsqlOperation::UpdateItem => {
                let input: UpdateItemInput = decode(body)?;
                let table = table_mut(&mut tables, &input.table_name)?;
                let index = if let Some(i) = table.position(&input.key) {
                    i
                } else {
                    table.items.push(input.key.clone());
                    table.items.len() - 1
                };
                let item = &mut table.items[index];
                for (name, update) in &input.attribute_updates {
                    match (update.action.unwrap_or_default(), &update.value) {
                        (AttributeAction::Put, Some(value)) => {
                            item.insert(name, value.clone());
                        }
                        (action, None) => {
                            return Err(service(
                                ServiceErrorCode::ValidationException,
                                &format!("{action} of {name} carries no value"),
                            ));
                        }
                    }
                }
                Ok(empty())
            }
            DsqlOperation::DeleteItem => {
                let input: DeleteItemInput = decode(body)?;
                let table = table_mut(&mut tables, &input.table_name)?;
                if let Some(i) = table.position(&input.key) {
                    table.items.remove(i);
                }
                Ok(empty())
            }
            DsqlOperation::Query => {
                let input: QueryInput = decode(body)?;
                let table = table_mut(&mut tables, &input.table_name)?;
                let output = query(table, &input);
                serde_json::to_vec(&output)
                    .map(Bytes::from)
                    .map_err(|e| TransportError::Other(e.into()))
            }
        }
    }
}

impl Transport for MemoryStore {
    fn send(&self, target: &str, body: Bytes) -> Result<Bytes, TransportError> {
        let json = serde_json::from_slice(&body).map_err(|e| TransportError::Other(e.into()))?;
        self.requests.lock().push((target.to_owned(), json));

        let operation = target
            .rsplit_once('.')
            .and_then(|(_, op)| DsqlOperation::from_name(op))
            .ok_or_else(|| service(ServiceErrorCode::UnrecognizedClientException, target))?;
        debug!(%operation, "memory store request");
        self.dispatch(operation, &body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, TransportError> {
    serde_json::from_slice(body)
        .map_err(|e| service(ServiceErrorCode::SerializationException, &e.to_string()))
}

fn empty() -> Bytes {
    Bytes::from_static(b"{}")
}

fn service(code: ServiceErrorCode, message: &str) -> TransportError {
    ServiceError::with_message(code, message).into()
}

fn not_found(table: &str) -> TransportError {
    service(
        ServiceErrorCode::ResourceNotFoundException,
        &format!("table not found: {table}"),
    )
}

fn table_mut<'a>(
    tables: &'a mut HashMap<String, Table>,
    name: &str,
) -> Result<&'a mut Table, TransportError> {
    tables.get_mut(name).ok_or_else(|| not_found(name))
}

fn compare(a: &AttributeValue, b: &AttributeValue) -> Option<Ordering> {
    match (a, b) {
        (AttributeValue::S(x), AttributeValue::S(y)) => Some(x.cmp(y)),
        (AttributeValue::N(x), AttributeValue::N(y)) => {
            let x: f64 = x.parse().ok()?;
            let y: f64 = y.parse().ok()?;
            x.partial_cmp(&y)
        }
        _ => None,
    }
}

fn satisfies(attr: Option<&AttributeValue>, cond: &Condition) -> bool {
    let Some(attr) = attr else {
        return false;
    };
    let values = &cond.attribute_value_list;
    let last = values.last().and_then(|v| compare(attr, v));
    match cond.comparison_operator {
        ComparisonOperator::Eq => values
            .iter()
            .any(|v| compare(attr, v) == Some(Ordering::Equal)),
        ComparisonOperator::Lt => last == Some(Ordering::Less),
        ComparisonOperator::Le => matches!(last, Some(Ordering::Less | Ordering::Equal)),
        ComparisonOperator::Gt => last == Some(Ordering::Greater),
        ComparisonOperator::Ge => matches!(last, Some(Ordering::Greater | Ordering::Equal)),
        ComparisonOperator::BeginsWith => {
            let prefix = values.last().and_then(AttributeValue::as_s);
            match (attr.as_s(), prefix) {
                (Some(s), Some(prefix)) => s.starts_with(prefix),
                _ => false,
            }
        }
        ComparisonOperator::Between => match values.as_slice() {
            [low, high, ..] => {
                matches!(compare(attr, low), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(compare(attr, high), Some(Ordering::Less | Ordering::Equal))
            }
            _ => false,
        },
    }
}

fn query(table: &Table, input: &QueryInput) -> QueryOutput {
    let mut matched: Vec<&Item> = table
        .items
        .iter()
        .filter(|item| {
            input
                .key_conditions
                .iter()
                .all(|(name, cond)| satisfies(item.get(name), cond))
        })
        .collect();
    let scanned = matched.len();

    if let Some(range) = table.range_key() {
        matched.sort_by(|a, b| match (a.get(range), b.get(range)) {
            (Some(x), Some(y)) => compare(x, y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        });
    }
    if input.scan_index_forward == Some(false) {
        matched.reverse();
    }
    if let Some(limit) = input.limit {
        matched.truncate(usize::try_from(limit).unwrap_or(0));
    }

    let items: Vec<Item> = matched
        .into_iter()
        .map(|item| {
            if input.attributes_to_get.is_empty() {
                item.clone()
            } else {
                item.iter()
                    .filter(|(name, _)| input.attributes_to_get.iter().any(|a| a == *name))
                    .map(|(name, value)| (name, value.clone()))
                    .collect()
            }
        })
        .collect();

    QueryOutput {
        count: i64::try_from(items.len()).unwrap_or(i64::MAX),
        scanned_count: i64::try_from(scanned).ok(),
        items,
        ..QueryOutput::default()
    }
}

/// A connection to a fresh [`MemoryStore`], opened through a registry.
#[must_use]
pub fn connect(config: DsqlConfig) -> (Connection, Arc<MemoryStore>) {
    init_tracing();

    let store = Arc::new(MemoryStore::new());
    let registry = TransportRegistry::new();
    let name = format!("memory-{}", uuid::Uuid::new_v4());
    registry.register(name.clone(), store.clone());
    let conn = registry
        .connect(&name, config)
        .unwrap_or_else(|e| panic!("failed to connect to {name}: {e}"));
    (conn, store)
}

/// Generate a unique table name for a test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_owned();
    format!("{prefix}_{id}")
}

/// Drain a cursor through [`Rows::advance`].
pub fn drain(rows: &mut Rows) -> Vec<Vec<Value>> {
    let mut out = Vec::new();
    let mut buf = vec![Value::Null; rows.columns().len()];
    while rows
        .advance(&mut buf)
        .unwrap_or_else(|e| panic!("advance failed: {e}"))
        == Advance::Row
    {
        out.push(buf.clone());
    }
    out
}

/// A string cell.
#[must_use]
pub fn text(s: &str) -> Value {
    Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
}

mod test_error;
mod test_query;
mod test_write;

//! Parsed requests and the clause accumulators that build them.
//!
//! A statement parses into exactly one [`Request`] variant. WHERE, SET and
//! key clauses are first read as [`Expression`]s and then folded into the
//! owning request; the expression itself is not kept.

use bytes::Bytes;
use dsql_model::input::{
    CreateTableInput, DeleteItemInput, DeleteTableInput, PutItemInput, QueryInput,
    UpdateItemInput,
};
use dsql_model::types::{AttributeValueUpdate, ComparisonOperator, Condition};
use dsql_model::{AttributeMap, AttributeValue, DsqlOperation, Item};

/// A typed request ready for wire serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `select ...`
    Query(QueryInput),
    /// `insert into ...`
    PutItem(PutItemInput),
    /// `update ... set ... where ...`
    UpdateItem(UpdateItemInput),
    /// `delete from ... where ...`
    DeleteItem(DeleteItemInput),
    /// `create table ...`
    CreateTable(CreateTableInput),
    /// `drop table ...`
    DeleteTable(DeleteTableInput),
}

impl Request {
    /// The store operation this request targets.
    #[must_use]
    pub fn operation(&self) -> DsqlOperation {
        match self {
            Self::Query(_) => DsqlOperation::Query,
            Self::PutItem(_) => DsqlOperation::PutItem,
            Self::UpdateItem(_) => DsqlOperation::UpdateItem,
            Self::DeleteItem(_) => DsqlOperation::DeleteItem,
            Self::CreateTable(_) => DsqlOperation::CreateTable,
            Self::DeleteTable(_) => DsqlOperation::DeleteTable,
        }
    }

    /// The table the request addresses.
    #[must_use]
    pub fn table_name(&self) -> &str {
        match self {
            Self::Query(q) => &q.table_name,
            Self::PutItem(p) => &p.table_name,
            Self::UpdateItem(u) => &u.table_name,
            Self::DeleteItem(d) => &d.table_name,
            Self::CreateTable(c) => &c.table_name,
            Self::DeleteTable(d) => &d.table_name,
        }
    }

    /// Columns the caller asked for explicitly, if any.
    ///
    /// `select *` and non-query requests have none.
    #[must_use]
    pub fn projected_columns(&self) -> Option<&[String]> {
        match self {
            Self::Query(q) if !q.attributes_to_get.is_empty() => Some(&q.attributes_to_get),
            Self::Query(_)
            | Self::PutItem(_)
            | Self::UpdateItem(_)
            | Self::DeleteItem(_)
            | Self::CreateTable(_)
            | Self::DeleteTable(_) => None,
        }
    }

    /// Serialize the payload as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; in practice the payload types always
    /// serialize.
    pub fn to_body(&self) -> Result<Bytes, serde_json::Error> {
        let body = match self {
            Self::Query(q) => serde_json::to_vec(q)?,
            Self::PutItem(p) => serde_json::to_vec(p)?,
            Self::UpdateItem(u) => serde_json::to_vec(u)?,
            Self::DeleteItem(d) => serde_json::to_vec(d)?,
            Self::CreateTable(c) => serde_json::to_vec(c)?,
            Self::DeleteTable(d) => serde_json::to_vec(d)?,
        };
        Ok(Bytes::from(body))
    }
}

/// `identifier operator literal`, or `identifier BETWEEN (low, high)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Attribute name as written.
    pub identifier: String,
    /// Comparison operator.
    pub operator: ComparisonOperator,
    /// One value, or two for `BETWEEN`.
    pub values: Vec<AttributeValue>,
}

impl Expression {
    /// Fold into a query's key conditions.
    ///
    /// A repeated attribute appends its values to the existing list and the
    /// latest operator wins.
    pub fn fold_into_conditions(self, conditions: &mut AttributeMap<Condition>) {
        match conditions.get_mut(&self.identifier) {
            Some(existing) => {
                existing.comparison_operator = self.operator;
                existing.attribute_value_list.extend(self.values);
            }
            None => {
                conditions.insert(
                    self.identifier,
                    Condition {
                        comparison_operator: self.operator,
                        attribute_value_list: self.values,
                    },
                );
            }
        }
    }

    /// Fold into a primary key map. A repeated attribute keeps the last value.
    pub fn fold_into_key(self, key: &mut Item) {
        if let Some(value) = self.values.into_iter().next() {
            key.insert(self.identifier, value);
        }
    }

    /// Fold into an update's attribute updates as a `PUT`.
    pub fn fold_into_updates(self, updates: &mut AttributeMap<AttributeValueUpdate>) {
        if let Some(value) = self.values.into_iter().next() {
            updates.insert(self.identifier, AttributeValueUpdate::put(value));
        }
    }
}

//! Transport seam and named connections.
//!
//! A [`Transport`] moves a serialized request to the store and hands back
//! the raw response body. Signing, HTTP and retries live behind it. A
//! [`Connection`] runs a statement end to end over one transport, and a
//! [`TransportRegistry`] maps connection names to transports.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use dsql_model::output::QueryOutput;
use tracing::debug;

use crate::config::DsqlConfig;
use crate::error::{DsqlError, DsqlResult, TransportError};
use crate::parser::parse;
use crate::projection::Projection;
use crate::request::Request;
use crate::rows::Rows;
use crate::statement::{Param, bind};

/// Sends one request body to the store.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send `body` for the operation named by `target`
    /// (e.g. `DynamoDB_20120810.Query`) and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Service`] when the store answers with an
    /// error envelope and [`TransportError::Other`] when the call fails.
    fn send(&self, target: &str, body: Bytes) -> Result<Bytes, TransportError>;
}

/// A statement runner bound to one transport.
#[derive(Debug, Clone)]
pub struct Connection {
    transport: Arc<dyn Transport>,
    config: DsqlConfig,
}

impl Connection {
    /// Create a connection over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: DsqlConfig) -> Self {
        Self { transport, config }
    }

    /// The connection's configuration.
    #[must_use]
    pub fn config(&self) -> &DsqlConfig {
        &self.config
    }

    /// Bind `params`, parse the statement and execute it.
    ///
    /// # Errors
    ///
    /// Returns binding, syntax, transport and codec failures.
    pub fn query(&self, statement: &str, params: &[Param]) -> DsqlResult<Rows> {
        let statement = bind(statement, params)?;
        let request = parse(&statement)?;
        self.execute(&request)
    }

    /// Send a parsed request and wrap the response in a cursor.
    ///
    /// Only a query yields rows; every other request returns an empty cursor
    /// once the store acknowledges it.
    ///
    /// # Errors
    ///
    /// Returns transport failures and response bodies that do not decode.
    pub fn execute(&self, request: &Request) -> DsqlResult<Rows> {
        let operation = request.operation();
        let target = operation.target(&self.config.target_prefix);
        let body = request.to_body()?;
        debug!(
            target = %target,
            table = request.table_name(),
            bytes = body.len(),
            "dispatching request"
        );

        let response = self.transport.send(&target, body)?;
        if !operation.returns_rows() {
            return Ok(Rows::empty());
        }

        let output: QueryOutput = serde_json::from_slice(&response)?;
        debug!(count = output.count, items = output.items.len(), "query returned");
        let projection = Projection::new(output.items, request.projected_columns());
        Ok(Rows::new(projection, self.config.number_policy()))
    }
}

/// Named transports, shared by handle.
///
/// Uses `DashMap` for lock-free concurrent access.
#[derive(Debug, Default)]
pub struct TransportRegistry {
    inner: DashMap<String, Arc<dyn Transport>>,
}

impl TransportRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transport` as `name`, returning the one it replaced.
    pub fn register(
        &self,
        name: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Option<Arc<dyn Transport>> {
        self.inner.insert(name.into(), transport)
    }

    /// Get the transport registered as `name`, creating it atomically if absent.
    pub fn get_or_insert_with(
        &self,
        name: &str,
        create: impl FnOnce() -> Arc<dyn Transport>,
    ) -> Arc<dyn Transport> {
        self.inner
            .entry(name.to_owned())
            .or_insert_with(create)
            .clone()
    }

    /// Get the transport registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Transport>> {
        self.inner.get(name).map(|v| Arc::clone(v.value()))
    }

    /// Open a connection over the transport registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DsqlError::UnknownConnection`] if nothing is registered.
    pub fn connect(&self, name: &str, config: DsqlConfig) -> DsqlResult<Connection> {
        self.get(name)
            .map(|transport| Connection::new(transport, config))
            .ok_or_else(|| DsqlError::UnknownConnection(name.to_owned()))
    }

    /// Remove the transport registered as `name`.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn Transport>> {
        self.inner.remove(name).map(|(_, v)| v)
    }

    /// Number of registered transports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

//! The execution facade: verbs bound to pooled connections.

use crate::condition::Where;
use crate::config::{ClientConfig, PoolConfig};
use crate::error::DbResult;
use crate::monitor::{NoopMonitor, PoolMonitor, SqlLogger, TracingLogger};
use crate::order::OrderBy;
use crate::params::{self, BindArgs};
use crate::pool::PoolSet;
use crate::record::{Assignments, Record};
use crate::row::{QueryOutput, Row};
use crate::stmt;
use mysql_async::Value;
use std::future::Future;
use std::sync::Arc;

/// A source of pooled connections, optionally addressed by pool name.
///
/// This is the narrow seam to the external database client: production code
/// uses [`PoolSet`]; tests substitute a fake that counts acquires and
/// releases.
pub trait ConnectionSource: Send + Sync {
    type Conn: Connection;

    /// Acquire a connection, from the named pool if `pool` is given, else
    /// from the default pool.
    fn acquire(&self, pool: Option<&str>) -> impl Future<Output = DbResult<Self::Conn>> + Send;
}

/// One acquired connection. Dropping it returns it to its pool.
pub trait Connection: Send {
    /// Run a parameterized statement and return the normalized result.
    fn query(
        &mut self,
        sql: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = DbResult<QueryOutput>> + Send;
}

/// The facade: statement builders wired to a [`ConnectionSource`].
///
/// Each verb builds its statement through [`crate::stmt`], then performs
/// exactly one acquire/query/release round trip. The connection is returned
/// to its pool before the caller observes success or failure, so no verb can
/// leak a connection.
///
/// Construct explicitly via [`Client::connect`] / [`Client::single`]; there
/// is deliberately no global instance.
///
/// # Example
/// ```ignore
/// use myorm::{Client, PoolConfig, Record, Where};
///
/// let client = Client::single(PoolConfig::from_url("main", "mysql://app@localhost/prod"))?;
/// let id = client.insert("users", Record::new().set("name", "bruce")).await?;
/// let rows = client.select("users", &["id", "name"], &Where::new().eq("id", id), None, &Default::default()).await?;
/// ```
pub struct Client<S = PoolSet> {
    source: S,
    logging: bool,
    logger: Arc<dyn SqlLogger>,
    monitor: Arc<dyn PoolMonitor>,
}

impl Client<PoolSet> {
    /// Build a client from a full configuration.
    pub fn connect(config: ClientConfig) -> DbResult<Self> {
        let source = PoolSet::from_configs(&config.pools)?;
        Ok(Self {
            source,
            logging: config.logging,
            logger: Arc::new(TracingLogger),
            monitor: Arc::new(NoopMonitor),
        })
    }

    /// Build a client with a single (default) pool.
    pub fn single(pool: PoolConfig) -> DbResult<Self> {
        Self::connect(ClientConfig::single(pool))
    }

    /// Tear down every pool, closing idle connections.
    pub async fn disconnect(self) -> DbResult<()> {
        self.source.disconnect().await
    }
}

impl<S: ConnectionSource> Client<S> {
    /// Build a client over a custom connection source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            logging: false,
            logger: Arc::new(TracingLogger),
            monitor: Arc::new(NoopMonitor),
        }
    }

    /// Enable or disable statement logging.
    pub fn log_sql(mut self, on: bool) -> Self {
        self.logging = on;
        self
    }

    /// Replace the statement logger.
    pub fn with_logger(mut self, logger: Arc<dyn SqlLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the pool monitor.
    pub fn with_monitor(mut self, monitor: Arc<dyn PoolMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// A handle running every verb against the named pool.
    pub fn using<'a>(&'a self, pool: &'a str) -> PoolScope<'a, S> {
        PoolScope { client: self, pool }
    }

    /// Run a raw parameterized statement on the default pool.
    ///
    /// Prefer the typed verbs; this is the escape hatch for statements the
    /// builders do not cover.
    pub async fn execute(&self, sql: &str, args: impl Into<BindArgs>) -> DbResult<QueryOutput> {
        self.execute_on(None, sql, args.into()).await
    }

    pub(crate) async fn execute_on(
        &self,
        pool: Option<&str>,
        sql: &str,
        args: BindArgs,
    ) -> DbResult<QueryOutput> {
        if self.logging {
            self.logger.log(sql, &args);
        }
        let (sql, positional) = params::expand(sql, args);
        let mut conn = self.source.acquire(pool).await?;
        self.monitor.on_acquire(pool);
        let outcome = conn.query(&sql, positional).await;
        // Return the connection to the pool before the caller sees the
        // outcome, on both paths.
        drop(conn);
        self.monitor.on_release(pool);
        outcome
    }

    /// Insert one row, returning the server-assigned id (0 when the server
    /// reports none).
    pub async fn insert(&self, table: &str, values: Record) -> DbResult<u64> {
        self.insert_on(None, table, values).await
    }

    /// Insert many rows in one statement, returning the raw result.
    pub async fn batch_insert(
        &self,
        table: &str,
        fields: &[&str],
        rows: Vec<Vec<Value>>,
    ) -> DbResult<QueryOutput> {
        self.batch_insert_on(None, table, fields, rows).await
    }

    /// Replace one row, returning the server-assigned id.
    pub async fn replace_into(&self, table: &str, values: Record) -> DbResult<u64> {
        self.replace_into_on(None, table, values).await
    }

    /// Select rows.
    pub async fn select(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Where,
        limit: Option<u64>,
        order: &OrderBy,
    ) -> DbResult<Vec<Row>> {
        self.select_on(None, table, fields, filter, limit, order).await
    }

    /// Select the first matching row, if any.
    pub async fn select_one(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Where,
        order: &OrderBy,
    ) -> DbResult<Option<Row>> {
        self.select_one_on(None, table, fields, filter, order).await
    }

    /// Update rows, returning the raw result.
    pub async fn update(
        &self,
        table: &str,
        values: &Assignments,
        filter: &Where,
    ) -> DbResult<QueryOutput> {
        self.update_on(None, table, values, filter).await
    }

    /// Delete rows, returning the affected-row count.
    pub async fn delete(&self, table: &str, filter: &Where, limit: Option<u64>) -> DbResult<u64> {
        self.delete_on(None, table, filter, limit).await
    }

    /// Increment a numeric field, returning the raw result.
    pub async fn increment(
        &self,
        table: &str,
        field: &str,
        amount: impl Into<Value>,
        filter: &Where,
    ) -> DbResult<QueryOutput> {
        self.increment_on(None, table, field, amount.into(), filter).await
    }

    async fn insert_on(&self, pool: Option<&str>, table: &str, values: Record) -> DbResult<u64> {
        let sql = stmt::insert(table);
        let out = self.execute_on(pool, &sql, BindArgs::Record(values)).await?;
        Ok(out.last_insert_id.unwrap_or(0))
    }

    async fn batch_insert_on(
        &self,
        pool: Option<&str>,
        table: &str,
        fields: &[&str],
        rows: Vec<Vec<Value>>,
    ) -> DbResult<QueryOutput> {
        let sql = stmt::batch_insert(table, fields);
        self.execute_on(pool, &sql, BindArgs::Rows(rows)).await
    }

    async fn replace_into_on(
        &self,
        pool: Option<&str>,
        table: &str,
        values: Record,
    ) -> DbResult<u64> {
        let sql = stmt::replace(table);
        let out = self.execute_on(pool, &sql, BindArgs::Record(values)).await?;
        Ok(out.last_insert_id.unwrap_or(0))
    }

    async fn select_on(
        &self,
        pool: Option<&str>,
        table: &str,
        fields: &[&str],
        filter: &Where,
        limit: Option<u64>,
        order: &OrderBy,
    ) -> DbResult<Vec<Row>> {
        let frag = stmt::select(table, fields, filter, limit, order);
        let out = self
            .execute_on(pool, &frag.sql, BindArgs::Positional(frag.args))
            .await?;
        Ok(out.rows)
    }

    async fn select_one_on(
        &self,
        pool: Option<&str>,
        table: &str,
        fields: &[&str],
        filter: &Where,
        order: &OrderBy,
    ) -> DbResult<Option<Row>> {
        let rows = self
            .select_on(pool, table, fields, filter, Some(1), order)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn update_on(
        &self,
        pool: Option<&str>,
        table: &str,
        values: &Assignments,
        filter: &Where,
    ) -> DbResult<QueryOutput> {
        let frag = stmt::update(table, values, filter);
        self.execute_on(pool, &frag.sql, BindArgs::Positional(frag.args))
            .await
    }

    async fn delete_on(
        &self,
        pool: Option<&str>,
        table: &str,
        filter: &Where,
        limit: Option<u64>,
    ) -> DbResult<u64> {
        let frag = stmt::delete(table, filter, limit);
        let out = self
            .execute_on(pool, &frag.sql, BindArgs::Positional(frag.args))
            .await?;
        Ok(out.affected_rows)
    }

    async fn increment_on(
        &self,
        pool: Option<&str>,
        table: &str,
        field: &str,
        amount: Value,
        filter: &Where,
    ) -> DbResult<QueryOutput> {
        let frag = stmt::increment(table, field, amount, filter);
        self.execute_on(pool, &frag.sql, BindArgs::Positional(frag.args))
            .await
    }
}

/// A borrowed handle binding every verb to one named pool.
///
/// Created by [`Client::using`]; verbs mirror the client's and route their
/// single round trip to the named pool.
pub struct PoolScope<'a, S: ConnectionSource> {
    client: &'a Client<S>,
    pool: &'a str,
}

impl<S: ConnectionSource> PoolScope<'_, S> {
    /// Run a raw parameterized statement on this pool.
    pub async fn execute(&self, sql: &str, args: impl Into<BindArgs>) -> DbResult<QueryOutput> {
        self.client.execute_on(Some(self.pool), sql, args.into()).await
    }

    /// Insert one row, returning the server-assigned id.
    pub async fn insert(&self, table: &str, values: Record) -> DbResult<u64> {
        self.client.insert_on(Some(self.pool), table, values).await
    }

    /// Insert many rows in one statement, returning the raw result.
    pub async fn batch_insert(
        &self,
        table: &str,
        fields: &[&str],
        rows: Vec<Vec<Value>>,
    ) -> DbResult<QueryOutput> {
        self.client
            .batch_insert_on(Some(self.pool), table, fields, rows)
            .await
    }

    /// Replace one row, returning the server-assigned id.
    pub async fn replace_into(&self, table: &str, values: Record) -> DbResult<u64> {
        self.client.replace_into_on(Some(self.pool), table, values).await
    }

    /// Select rows.
    pub async fn select(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Where,
        limit: Option<u64>,
        order: &OrderBy,
    ) -> DbResult<Vec<Row>> {
        self.client
            .select_on(Some(self.pool), table, fields, filter, limit, order)
            .await
    }

    /// Select the first matching row, if any.
    pub async fn select_one(
        &self,
        table: &str,
        fields: &[&str],
        filter: &Where,
        order: &OrderBy,
    ) -> DbResult<Option<Row>> {
        self.client
            .select_one_on(Some(self.pool), table, fields, filter, order)
            .await
    }

    /// Update rows, returning the raw result.
    pub async fn update(
        &self,
        table: &str,
        values: &Assignments,
        filter: &Where,
    ) -> DbResult<QueryOutput> {
        self.client.update_on(Some(self.pool), table, values, filter).await
    }

    /// Delete rows, returning the affected-row count.
    pub async fn delete(&self, table: &str, filter: &Where, limit: Option<u64>) -> DbResult<u64> {
        self.client.delete_on(Some(self.pool), table, filter, limit).await
    }

    /// Increment a numeric field, returning the raw result.
    pub async fn increment(
        &self,
        table: &str,
        field: &str,
        amount: impl Into<Value>,
        filter: &Where,
    ) -> DbResult<QueryOutput> {
        self.client
            .increment_on(Some(self.pool), table, field, amount.into(), filter)
            .await
    }
}

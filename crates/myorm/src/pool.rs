//! Named connection pools over `mysql_async`.

use crate::client::{Connection, ConnectionSource};
use crate::config::PoolConfig;
use crate::error::{DbError, DbResult};
use crate::row::{QueryOutput, Row};
use mysql_async::prelude::Queryable;
use mysql_async::{Params, Pool, Value};
use std::sync::Arc;

/// An ordered set of named pools; the first configured pool is the default.
///
/// Pool construction is lazy: no connection is opened until a statement
/// executes, so building a `PoolSet` never touches the network.
pub struct PoolSet {
    pools: Vec<(String, Pool)>,
}

impl PoolSet {
    /// Build pools from their configurations.
    pub fn from_configs(configs: &[PoolConfig]) -> DbResult<Self> {
        if configs.is_empty() {
            return Err(DbError::config("at least one pool must be configured"));
        }
        let mut pools = Vec::with_capacity(configs.len());
        for cfg in configs {
            let opts = cfg.to_opts()?;
            pools.push((cfg.name.clone(), Pool::new(opts)));
        }
        Ok(Self { pools })
    }

    /// Name of the default pool.
    pub fn default_name(&self) -> DbResult<&str> {
        match self.pools.first() {
            Some((name, _)) => Ok(name),
            None => Err(DbError::config("no pools configured")),
        }
    }

    fn pool(&self, name: Option<&str>) -> DbResult<&Pool> {
        match name {
            None => match self.pools.first() {
                Some((_, pool)) => Ok(pool),
                None => Err(DbError::config("no pools configured")),
            },
            Some(n) => self
                .pools
                .iter()
                .find(|(pool_name, _)| pool_name == n)
                .map(|(_, pool)| pool)
                .ok_or_else(|| DbError::UnknownPool(n.to_string())),
        }
    }

    /// Tear down every pool, closing idle connections.
    pub async fn disconnect(self) -> DbResult<()> {
        for (_, pool) in self.pools {
            pool.disconnect()
                .await
                .map_err(|e| DbError::Connection(e.to_string()))?;
        }
        Ok(())
    }
}

impl ConnectionSource for PoolSet {
    type Conn = mysql_async::Conn;

    async fn acquire(&self, pool: Option<&str>) -> DbResult<Self::Conn> {
        let pool = self.pool(pool)?;
        pool.get_conn()
            .await
            .map_err(|e| DbError::Connection(e.to_string()))
    }
}

impl Connection for mysql_async::Conn {
    async fn query(&mut self, sql: &str, args: Vec<Value>) -> DbResult<QueryOutput> {
        let params = if args.is_empty() {
            Params::Empty
        } else {
            Params::Positional(args)
        };
        let mut result = self.exec_iter(sql, params).await?;
        let raw: Vec<mysql_async::Row> = result.collect().await?;
        let affected_rows = result.affected_rows();
        let last_insert_id = result.last_insert_id();
        drop(result);

        let fields: Vec<String> = raw
            .first()
            .map(|row| {
                row.columns_ref()
                    .iter()
                    .map(|col| col.name_str().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        let columns = Arc::new(fields.clone());
        let rows = raw
            .into_iter()
            .map(|row| Row::new(Arc::clone(&columns), row.unwrap()))
            .collect();
        Ok(QueryOutput {
            rows,
            fields,
            affected_rows,
            last_insert_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> PoolSet {
        PoolSet::from_configs(&[PoolConfig::new("main"), PoolConfig::new("stats")]).unwrap()
    }

    #[test]
    fn first_pool_is_default() {
        let set = sample_set();
        assert_eq!(set.default_name().unwrap(), "main");
        assert!(set.pool(None).is_ok());
    }

    #[test]
    fn named_lookup() {
        let set = sample_set();
        assert!(set.pool(Some("stats")).is_ok());
        assert!(matches!(
            set.pool(Some("nope")),
            Err(DbError::UnknownPool(name)) if name == "nope"
        ));
    }

    #[test]
    fn rejects_empty_config() {
        assert!(PoolSet::from_configs(&[]).is_err());
    }
}

use std::time::Duration;

use ::redis::aio::MultiplexedConnection;
use ::redis::{AsyncCommands, RedisError};
use async_trait::async_trait;

use hgncdb_core::traits::KvBackend;
use hgncdb_core::types::Namespace;
use hgncdb_core::{Error, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Keys per MGET round trip.
const MGET_BATCH: usize = 1000;

/// One redis database, selected by the namespace index.
///
/// The multiplexed connection is cheap to clone; each call clones it so the
/// backend can be shared behind `&self`.
pub struct RedisBackend {
    conn: MultiplexedConnection,
}

impl RedisBackend {
    pub async fn connect(host: &str, port: u16, namespace: Namespace) -> Result<Self> {
        let url = format!("redis://{}:{}/{}", host, port, namespace.db_index());
        let client = ::redis::Client::open(url.as_str())
            .map_err(|e| Error::Connection(format!("invalid store location {}: {}", url, e)))?;
        let conn = tokio::time::timeout(CONNECT_TIMEOUT, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| Error::Connection(format!("timed out connecting to {}", url)))?
            .map_err(|e| Error::Connection(format!("{}: {}", url, e)))?;
        tracing::debug!(?namespace, "redis namespace connected");
        Ok(Self { conn })
    }
}

fn store_err(e: RedisError) -> Error {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
        Error::Connection(e.to_string())
    } else {
        Error::Backend(e.to_string())
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(store_err)?;
        Ok(value)
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        let mut conn = self.conn.clone();
        let mut values = Vec::with_capacity(keys.len());
        for batch in keys.chunks(MGET_BATCH) {
            let chunk: Vec<Option<Vec<u8>>> =
                ::redis::cmd("MGET").arg(batch).query_async(&mut conn).await.map_err(store_err)?;
            values.extend(chunk);
        }
        Ok(values)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await.map_err(store_err)?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys("*").await.map_err(store_err)?;
        Ok(keys)
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = ::redis::cmd("FLUSHDB").query_async(&mut conn).await.map_err(store_err)?;
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let mut conn = self.conn.clone();
        let n: usize = ::redis::cmd("DBSIZE").query_async(&mut conn).await.map_err(store_err)?;
        Ok(n)
    }
}

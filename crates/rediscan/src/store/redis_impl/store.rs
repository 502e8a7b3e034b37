//! Redis implementation of `ListStore`.

use async_trait::async_trait;
use redis::{
    aio::{ConnectionLike, ConnectionManager},
    AsyncCommands, FromRedisValue, Value,
};
use tokio::sync::OnceCell;

use rediscan_core::store::{KeyType, ListStore, Result, ScanPage};

use super::error::map_redis_error;

/// Redis backend using a shared connection manager.
///
/// The connection is opened on first use so the server can start, and serve
/// its error pages, while Redis is still unreachable. The manager reconnects
/// on its own after a dropped connection.
pub struct RedisListStore {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisListStore {
    /// Creates a store for the given Redis URL without connecting.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the URL cannot be parsed.
    pub fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                tracing::debug!("Opening Redis connection");
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(map_redis_error)
            })
            .await?;
        Ok(conn.clone())
    }

    /// Runs `command key` for every key in one pipeline.
    ///
    /// The packed request keeps each server error in its own slot, so one
    /// failing key (e.g. `WRONGTYPE`) leaves the other replies intact.
    async fn pipeline_per_key<T: FromRedisValue>(
        &self,
        command: &str,
        keys: &[String],
    ) -> Result<Vec<Result<T>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.connection().await?;
        let mut pipe = redis::pipe();
        for key in keys {
            pipe.cmd(command).arg(key);
        }

        let replies = conn
            .req_packed_commands(&pipe, 0, keys.len())
            .await
            .map_err(map_redis_error)?;

        Ok(replies.into_iter().map(decode_reply).collect())
    }
}

fn decode_reply<T: FromRedisValue>(reply: Value) -> Result<T> {
    match reply {
        Value::ServerError(err) => Err(map_redis_error(err.into())),
        reply => redis::from_owned_redis_value(reply).map_err(map_redis_error),
    }
}

#[async_trait]
impl ListStore for RedisListStore {
    async fn key_type(&self, key: &str) -> Result<KeyType> {
        let mut conn = self.connection().await?;
        let name: String = conn.key_type(key).await.map_err(map_redis_error)?;
        Ok(KeyType::from_type_name(&name))
    }

    async fn list_len(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        conn.llen(key).await.map_err(map_redis_error)
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        conn.lrange(key, start as isize, stop as isize)
            .await
            .map_err(map_redis_error)
    }

    async fn list_index(&self, key: &str, index: i64) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        conn.lindex(key, index as isize)
            .await
            .map_err(map_redis_error)
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        let mut conn = self.connection().await?;
        let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(ScanPage { keys, next_cursor })
    }

    async fn key_types(&self, keys: &[String]) -> Result<Vec<Result<KeyType>>> {
        let replies = self.pipeline_per_key::<String>("TYPE", keys).await?;
        Ok(replies
            .into_iter()
            .map(|reply| reply.map(|name| KeyType::from_type_name(&name)))
            .collect())
    }

    async fn list_lens(&self, keys: &[String]) -> Result<Vec<Result<i64>>> {
        self.pipeline_per_key("LLEN", keys).await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use rediscan_core::discovery::ListScanner;
    use rediscan_core::navigator::{ListNavigator, NavigationError, NavigationResult};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::{tcp::OwnedReadHalf, TcpListener, TcpStream};
    use uuid::Uuid;

    use super::*;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Returns a connected store, or `None` when Redis is not reachable.
    async fn get_test_store() -> Option<RedisListStore> {
        let store = RedisListStore::new(&redis_url()).ok()?;
        tokio::time::timeout(Duration::from_secs(2), store.ping())
            .await
            .ok()?
            .ok()?;
        Some(store)
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        format!("rediscan:test:{}:{}", Uuid::new_v4(), suffix)
    }

    async fn rpush(store: &RedisListStore, key: &str, values: &[&str]) {
        let mut conn = store.connection().await.unwrap();
        conn.rpush::<_, _, ()>(key, values).await.unwrap();
    }

    async fn del(store: &RedisListStore, keys: &[&str]) {
        let mut conn = store.connection().await.unwrap();
        conn.del::<_, ()>(keys).await.unwrap();
    }

    /// Starts a minimal RESP server in which the keys `a`, `b` and `c` all
    /// look like lists, but `LLEN b` fails with `WRONGTYPE`.
    async fn spawn_retyping_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(serve_connection(socket));
            }
        });
        format!("redis://{addr}/0")
    }

    async fn serve_connection(socket: TcpStream) {
        let (read, mut write) = socket.into_split();
        let mut reader = BufReader::new(read);
        while let Some(args) = read_command(&mut reader).await {
            if write.write_all(reply_to(&args).as_bytes()).await.is_err() {
                return;
            }
        }
    }

    async fn read_command(reader: &mut BufReader<OwnedReadHalf>) -> Option<Vec<String>> {
        let mut line = String::new();
        reader.read_line(&mut line).await.ok()?;
        let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            // Bulk length header, then the argument itself.
            line.clear();
            reader.read_line(&mut line).await.ok()?;
            line.clear();
            reader.read_line(&mut line).await.ok()?;
            args.push(line.trim_end_matches("\r\n").to_string());
        }
        Some(args)
    }

    fn reply_to(args: &[String]) -> String {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["TYPE", _] => "+list\r\n".to_string(),
            ["LLEN", "b"] => {
                "-WRONGTYPE Operation against a key holding the wrong kind of value\r\n"
                    .to_string()
            }
            ["LLEN", _] => ":2\r\n".to_string(),
            ["SCAN", ..] => "*2\r\n$1\r\n0\r\n*3\r\n$1\r\na\r\n$1\r\nb\r\n$1\r\nc\r\n".to_string(),
            _ => "+OK\r\n".to_string(),
        }
    }

    #[tokio::test]
    async fn test_pipelined_lookups_report_errors_per_key() {
        let store = RedisListStore::new(&spawn_retyping_server().await).unwrap();
        let keys = ["a", "b", "c"].map(String::from);

        let types = store.key_types(&keys).await.unwrap();
        assert_eq!(types, vec![Ok(KeyType::List), Ok(KeyType::List), Ok(KeyType::List)]);

        let lens = store.list_lens(&keys).await.unwrap();
        assert_eq!(lens.len(), 3);
        assert_eq!(lens[0], Ok(2));
        assert!(lens[1].as_ref().unwrap_err().to_string().contains("WRONGTYPE"));
        assert_eq!(lens[2], Ok(2));

        let lists = ListScanner::new(Arc::new(store)).discover(10).await;
        let names: Vec<&str> = lists.iter().map(|list| list.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert!(lists.iter().all(|list| list.size == 2));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_round_trip() {
        let store = RedisListStore::new("redis://127.0.0.1:1/0").unwrap();
        assert!(store.key_types(&[]).await.unwrap().is_empty());
        assert!(store.list_lens(&[]).await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(RedisListStore::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_redis_list_commands() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("list");
        rpush(&store, &key, &["c", "b", "a"]).await;

        assert_eq!(store.key_type(&key).await.unwrap(), KeyType::List);
        assert_eq!(store.list_len(&key).await.unwrap(), 3);
        assert_eq!(store.list_range(&key, 0, -1).await.unwrap(), ["c", "b", "a"]);
        assert_eq!(store.list_index(&key, 1).await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.list_index(&key, 7).await.unwrap(), None);

        del(&store, &[key.as_str()]).await;
    }

    #[tokio::test]
    async fn test_redis_key_types_batch() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let list_key = test_key("list");
        let string_key = test_key("string");
        let missing_key = test_key("missing");
        rpush(&store, &list_key, &["x"]).await;
        {
            let mut conn = store.connection().await.unwrap();
            conn.set::<_, _, ()>(&string_key, "v").await.unwrap();
        }

        let types = store
            .key_types(&[list_key.clone(), string_key.clone(), missing_key])
            .await
            .unwrap();
        assert_eq!(types[0], Ok(KeyType::List));
        assert_eq!(types[1], Ok(KeyType::Other("string".to_string())));
        assert_eq!(types[2], Ok(KeyType::Absent));

        let lens = store
            .list_lens(&[list_key.clone(), string_key.clone()])
            .await
            .unwrap();
        assert_eq!(lens[0], Ok(1));
        assert!(lens[1].is_err());

        del(&store, &[list_key.as_str(), string_key.as_str()]).await;
    }

    #[tokio::test]
    async fn test_redis_navigate_and_discover() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let prefix = format!("rediscan:test:{}", Uuid::new_v4());
        let first = format!("{prefix}:a");
        let second = format!("{prefix}:b");
        rpush(&store, &first, &[r#"{"n":1}"#, "plain"]).await;
        rpush(&store, &second, &["x", "y", "z"]).await;

        let store = Arc::new(store);

        let navigator = ListNavigator::new(store.clone(), 1000);
        let result = navigator.navigate(Some(first.as_str()), Some("0")).await.unwrap();
        assert!(matches!(result, NavigationResult::Preloaded { llen: 2, .. }));
        assert_eq!(result.current_value(), "{\n  \"n\": 1\n}");

        let err = navigator.navigate(Some(first.as_str()), Some("2")).await.unwrap_err();
        assert_eq!(err, NavigationError::OutOfBounds { index: 2, llen: 2 });

        let single = ListNavigator::new(store.clone(), 1)
            .navigate(Some(second.as_str()), None)
            .await
            .unwrap();
        assert_eq!(single.current_value(), "z");

        let lists = ListScanner::new(store.clone())
            .with_pattern(format!("{prefix}:*"))
            .discover(10)
            .await;
        assert_eq!(lists.len(), 2);

        del(&store, &[first.as_str(), second.as_str()]).await;
    }
}

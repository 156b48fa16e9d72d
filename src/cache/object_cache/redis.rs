use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

const SCAN_BATCH: usize = 200;

pub struct RedisObjectCache {
    conn: MultiplexedConnection,
    key_prefix: String,
    ttl: u64,
}

impl RedisObjectCache {
    /// 建立连接并 PING 一次，失败时交由启动流程回退
    pub async fn connect() -> Result<Self, String> {
        let config = &AppConfig::get().cache;

        let client = redis::Client::open(config.redis.url.clone())
            .map_err(|e| format!("Invalid Redis URL: {e}"))?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("Redis connection failed: {e}"))?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| format!("Redis ping failed: {e}"))?;
        debug!(
            "Redis connected ({}), prefix: '{}', TTL: {}s",
            pong, config.redis.key_prefix, config.default_ttl
        );

        Ok(Self {
            conn,
            key_prefix: config.redis.key_prefix.clone(),
            ttl: config.default_ttl,
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    async fn delete_matching(&self, pattern: String) {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        loop {
            let scanned: redis::RedisResult<(u64, Vec<String>)> = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await;
            let (next, keys) = match scanned {
                Ok(page) => page,
                Err(e) => {
                    error!("Failed to scan '{}': {}", pattern, e);
                    return;
                }
            };
            if !keys.is_empty()
                && let Err(e) = conn.del::<_, i64>(keys).await
            {
                error!("Failed to delete keys matching '{}': {}", pattern, e);
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }
    }
}

// 通配符字符需转义后再拼进 MATCH 模式
fn escape_glob(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(self.make_key(key)).await {
            Ok(Some(data)) => CacheResult::Found(data),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Failed to get key '{}': {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let mut conn = self.conn.clone();
        let effective_ttl = if ttl == 0 { self.ttl } else { ttl };

        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.make_key(&key), value, effective_ttl)
            .await
        {
            error!("Failed to insert key '{}' into cache: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, i64>(self.make_key(key)).await {
            error!("Failed to remove key '{}': {}", key, e);
        }
    }

    async fn remove_prefix(&self, prefix: &str) {
        let pattern = format!("{}*", escape_glob(&self.make_key(prefix)));
        self.delete_matching(pattern).await;
    }

    async fn invalidate_all(&self) {
        warn!("Invalidating every key under prefix '{}'", self.key_prefix);
        let pattern = format!("{}*", escape_glob(&self.key_prefix));
        self.delete_matching(pattern).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_glob() {
        assert_eq!(escape_glob("school:session:1:"), "school:session:1:");
        assert_eq!(escape_glob("a*b?[c]"), "a\\*b\\?\\[c\\]");
    }
}

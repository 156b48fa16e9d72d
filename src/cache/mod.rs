//! 对象缓存
//!
//! 后端以插件形式注册（见 [`register`]），启动时按 `cache.type` 选择。
//! 目前只缓存会话对应的调用者身份，键形如 `session:{user_id}:{token}`。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，调用方应当回源
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// `ttl` 为 0 时使用 `cache.default_ttl`
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    /// 删除所有以 `prefix` 开头的键
    async fn remove_prefix(&self, prefix: &str);

    async fn invalidate_all(&self);
}

/// 带类型的读写，值以 JSON 存放
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> CacheResult<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(raw) => match serde_json::from_str(&raw) {
            Ok(value) => CacheResult::Found(value),
            Err(e) => {
                tracing::warn!("缓存值反序列化失败 {}: {}", key, e);
                cache.remove(key).await;
                CacheResult::NotFound
            }
        },
        CacheResult::NotFound => CacheResult::NotFound,
        CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
    }
}

pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T, ttl: u64) {
    match serde_json::to_string(value) {
        Ok(raw) => cache.insert_raw(key, raw, ttl).await,
        Err(e) => tracing::warn!("缓存值序列化失败 {}: {}", key, e),
    }
}

/// 会话缓存键
pub fn session_key(user_id: i64, token: &str) -> String {
    format!("{}{}", session_prefix(user_id), token)
}

/// 某个用户全部会话的键前缀
pub fn session_prefix(user_id: i64) -> String {
    format!("session:{user_id}:")
}

/// 声明缓存插件，进程启动时自动注册
///
/// 插件类型需提供 `async fn connect() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[::ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::connect()
                            .await
                            .map_err($crate::errors::SchoolError::cache_connection)?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::SchoolError>(
                            Box::new(cache),
                        )
                    })
                }),
            );
        }
    };
}

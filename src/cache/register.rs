use crate::cache::ObjectCache;
use crate::errors::{Result, SchoolError};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

const FALLBACK_PLUGIN: &str = "moka";

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let name = name.into();
    let mut registry = OBJECT_CACHE_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name, constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

/// 已注册的插件名，按字母排序
pub fn registered_object_cache_plugins() -> Vec<String> {
    let mut names: Vec<String> = OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

/// 按名称构造缓存，失败或未注册时回退到内存缓存
pub async fn create_object_cache(name: &str) -> Result<Box<dyn ObjectCache>> {
    tracing::debug!(
        "Registered object cache plugins: {:?}",
        registered_object_cache_plugins()
    );

    match get_object_cache_plugin(name) {
        Some(constructor) => match constructor().await {
            Ok(cache) => return Ok(cache),
            Err(e) if name != FALLBACK_PLUGIN => {
                tracing::warn!("Failed to create {} cache: {}", name, e);
            }
            Err(e) => return Err(e),
        },
        None => tracing::warn!("Cache backend '{}' not found in registry", name),
    }

    tracing::warn!("Falling back to {} (in-memory) cache", FALLBACK_PLUGIN);
    let constructor = get_object_cache_plugin(FALLBACK_PLUGIN).ok_or_else(|| {
        SchoolError::cache_plugin_not_found(format!("No cache backend available (tried: {name})"))
    })?;
    constructor().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins_registered() {
        let names = registered_object_cache_plugins();
        assert!(names.contains(&"moka".to_string()));
        assert!(names.contains(&"redis".to_string()));
    }

    #[actix_web::test]
    async fn test_unknown_backend_falls_back_to_memory() {
        let cache = create_object_cache("memcached").await.unwrap();
        cache.insert_raw("k".to_string(), "v".to_string(), 0).await;
        assert_eq!(cache.get_raw("k").await, crate::cache::CacheResult::Found("v".to_string()));
    }
}

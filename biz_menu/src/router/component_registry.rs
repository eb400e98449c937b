use crate::entitys::menu_node::ComponentRef;
use crate::entitys::route_entity::{ComponentLoader, LoadFuture, RouteComponent, ViewComponent};
use log::warn;
use moka::sync::Cache;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

const LOOKUP_CACHE_CAPACITY: u64 = 512;

/// 视图模块注册表：视图路径 -> 懒加载函数
///
/// 在启动时显式构建，查询时依次尝试 `<path>` 与 `<path>/index`。
/// 查询结果（包括未命中）缓存在 moka 中，注册新模块时整体失效。
#[derive(Clone)]
pub struct ComponentRegistry {
    modules: HashMap<String, ComponentLoader>,
    lookup_cache: Cache<String, Option<ComponentLoader>>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self { modules: HashMap::new(), lookup_cache: Cache::new(LOOKUP_CACHE_CAPACITY) }
    }

    /// 注册一个视图模块
    pub fn register<F, Fut>(&mut self, key: &str, loader: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<ViewComponent>> + Send + 'static,
    {
        let loader: ComponentLoader = Arc::new(move || -> LoadFuture { Box::pin(loader()) });
        self.modules.insert(normalize_key(key), loader);
        self.lookup_cache.invalidate_all();
        self
    }

    /// 注册一个直接返回同名页面的视图模块
    pub fn register_page(&mut self, key: &str) -> &mut Self {
        let name = normalize_key(key);
        self.register(key, move || {
            let name = name.clone();
            async move { Ok(ViewComponent::page(name)) }
        })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// 查找视图路径对应的加载函数
    pub fn lookup(&self, path: &str) -> Option<ComponentLoader> {
        let key = normalize_key(path);
        if key == "/" {
            return None;
        }
        if let Some(cached) = self.lookup_cache.get(&key) {
            return cached;
        }
        let found = self
            .modules
            .get(&key)
            .or_else(|| self.modules.get(&format!("{}/index", key)))
            .cloned();
        self.lookup_cache.insert(key, found.clone());
        found
    }

    /// 把菜单的组件引用解析成路由组件，找不到时返回占位页
    pub fn resolve(&self, component: &ComponentRef, route_name: &str) -> RouteComponent {
        match component {
            ComponentRef::Alias(alias) => RouteComponent::Static(alias.component()),
            ComponentRef::View(path) => match self.lookup(path) {
                Some(loader) => RouteComponent::Lazy { key: normalize_key(path), loader },
                None => {
                    warn!("路由 [{}] 的组件 {} 不存在，使用占位页", route_name, path);
                    RouteComponent::Static(ViewComponent::placeholder(route_name))
                }
            },
        }
    }
}

/// 统一成 `/a/b` 形式，去掉 `.vue` 后缀与末尾斜杠
fn normalize_key(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches(".vue").trim_matches('/');
    format!("/{}", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::routes_alias::RoutesAlias;

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register_page("/system/menu").register_page("/order/internal/list/index");
        registry
    }

    #[test]
    fn exact_and_index_lookup() {
        let registry = registry();
        assert!(registry.lookup("/system/menu").is_some());
        assert!(registry.lookup("system/menu").is_some());
        assert!(registry.lookup("/order/internal/list").is_some());
        assert!(registry.lookup("/system/role").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn registering_after_a_miss_invalidates_cache() {
        let mut registry = registry();
        assert!(registry.lookup("/system/role").is_none());
        registry.register_page("/system/role");
        assert!(registry.lookup("/system/role").is_some());
    }

    #[test]
    fn alias_never_hits_registry() {
        let registry = ComponentRegistry::new();
        let component = registry.resolve(&ComponentRef::Alias(RoutesAlias::Exception404), "404");
        assert!(matches!(component, RouteComponent::Static(ref v) if v.name == "/exception/404"));
    }

    #[tokio::test]
    async fn missing_view_becomes_placeholder() {
        let registry = registry();
        let component = registry.resolve(&ComponentRef::View("/nope".into()), "nope-page");
        assert!(component.is_placeholder());
        let view = component.load().await.unwrap().unwrap();
        assert_eq!(view.render(), "component not found: nope-page");
    }

    #[tokio::test]
    async fn index_module_loads_its_page() {
        let registry = registry();
        let component = registry.resolve(&ComponentRef::View("/order/internal/list".into()), "orders-list");
        let view = component.load().await.unwrap().unwrap();
        assert_eq!(view, ViewComponent::page("/order/internal/list/index"));
    }
}

use crate::convert::menu_normalizer::normalize_menu_list_with_issues;
use crate::convert::path_resolver::resolve_menu_paths;
use crate::entitys::menu_node::MenuNode;
use crate::manager::menu_manager::{first_menu_path, normalize_home_path, MenuManager, MenuManagerOpt, MenuState};
use crate::router::register_routes::{register_dynamic_routes, RegisterOutcome};
use crate::router::route_table::{RemoveRouteFn, RouterOpt};
use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::atomic::Ordering;
use std::sync::{MutexGuard, RwLockReadGuard, RwLockWriteGuard};

impl MenuManager {
    fn read_state(&self) -> RwLockReadGuard<'_, MenuState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, MenuState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_remove_fns(&self) -> MutexGuard<'_, Vec<RemoveRouteFn>> {
        self.remove_route_fns.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn apply_menu_list(state: &mut MenuState, menu_list: Vec<MenuNode>) {
        if state.home_path.is_none() {
            state.home_path = first_menu_path(&menu_list);
        }
        state.menu_list = menu_list;
    }
}

#[async_trait]
impl MenuManagerOpt for MenuManager {
    fn set_menu_list(&self, menu_list: Vec<MenuNode>) {
        let mut state = self.write_state();
        Self::apply_menu_list(&mut state, menu_list);
    }

    fn menu_list(&self) -> Vec<MenuNode> {
        self.read_state().menu_list.clone()
    }

    fn get_home_path(&self) -> Option<String> {
        self.read_state().home_path.clone()
    }

    fn set_home_path(&self, path: &str) {
        self.write_state().home_path = normalize_home_path(path);
    }

    async fn fetch_and_apply(&self) -> Vec<MenuNode> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let records = match self.fetcher.fetch_navigation_menus().await {
            Ok(records) => records,
            Err(e) => {
                error!("获取导航菜单失败: {}", e);
                return Vec::new();
            }
        };

        let (menu_list, issues) = normalize_menu_list_with_issues(&records);
        if !issues.is_empty() {
            warn!("导航菜单中有 {} 条记录无法解析", issues.len());
        }
        let menu_list = resolve_menu_paths(&menu_list, "");

        let mut state = self.write_state();
        if state.applied_seq > seq {
            warn!("菜单拉取结果已过期，丢弃: seq={} applied={}", seq, state.applied_seq);
            return state.menu_list.clone();
        }
        state.applied_seq = seq;
        Self::apply_menu_list(&mut state, menu_list.clone());
        menu_list
    }

    fn add_remove_route_fns(&self, remove_fns: Vec<RemoveRouteFn>) {
        self.lock_remove_fns().extend(remove_fns);
    }

    fn remove_all_dynamic_routes(&self) -> usize {
        let remove_fns: Vec<RemoveRouteFn> = self.lock_remove_fns().drain(..).collect();
        let count = remove_fns.len();
        for remove in remove_fns {
            remove.call();
        }
        count
    }

    fn clear_remove_route_fns(&self) {
        self.lock_remove_fns().clear();
    }

    async fn refresh_routes(&self, router: &dyn RouterOpt) -> RegisterOutcome {
        let removed = self.remove_all_dynamic_routes();
        if removed > 0 {
            info!("已撤销 {} 个动态路由", removed);
        }
        let menu_list = self.fetch_and_apply().await;
        let mut outcome = register_dynamic_routes(router, &self.registry, &menu_list);
        // 撤销函数交给 manager 保管
        self.add_remove_route_fns(std::mem::take(&mut outcome.remove_fns));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use crate::entitys::menu_node::MenuNode;
    use crate::manager::menu_manager::{first_menu_path, MenuFetcher, MenuManager, MenuManagerOpt};
    use crate::router::component_registry::ComponentRegistry;
    use crate::router::route_table::{RouteTable, RouterOpt};
    use async_trait::async_trait;
    use common::errors::{AppError, AppResult};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// 按调用顺序返回预设结果，非数组视为接口错误
    struct FakeFetcher {
        calls: AtomicUsize,
        responses: Vec<(u64, Value)>,
    }

    impl FakeFetcher {
        fn new(responses: Vec<(u64, Value)>) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), responses })
        }
    }

    #[async_trait]
    impl MenuFetcher for FakeFetcher {
        async fn fetch_navigation_menus(&self) -> AppResult<Vec<Value>> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, data) = self.responses.get(index).cloned().unwrap_or((0, Value::Null));
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            match data {
                Value::Array(records) => Ok(records),
                _ => Err(AppError::ExternalApi("menu endpoint down".into())),
            }
        }
    }

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register_page("/dashboard/console").register_page("/system/menu");
        registry
    }

    fn dashboard_menus() -> Value {
        json!([{
            "id": 1, "name": "dashboard", "path": "/dashboard", "component": "Layout",
            "children": [{"id": 11, "name": "console", "path": "console", "component": "/dashboard/console"}]
        }])
    }

    fn system_menus() -> Value {
        json!([{
            "id": 2, "name": "system", "path": "/system", "component": "Layout",
            "children": [{"id": 21, "name": "menus", "path": "menu", "component": "/system/menu"}]
        }])
    }

    fn names(menu_list: &[MenuNode]) -> Vec<String> {
        menu_list.iter().map(|m| m.name.clone()).collect()
    }

    #[tokio::test]
    async fn fetch_resolves_tree_and_derives_home_path() {
        let manager = MenuManager::new(FakeFetcher::new(vec![(0, dashboard_menus())]), registry(), None);
        let menu_list = manager.fetch_and_apply().await;
        assert_eq!(menu_list[0].children[0].full_path(), "/dashboard/console");
        assert_eq!(manager.menu_list(), menu_list);
        assert_eq!(manager.get_home_path().as_deref(), Some("/dashboard/console"));
    }

    #[tokio::test]
    async fn fetch_failure_returns_empty_and_keeps_state() {
        let manager = MenuManager::new(
            FakeFetcher::new(vec![(0, dashboard_menus()), (0, Value::Null)]),
            registry(),
            None,
        );
        manager.fetch_and_apply().await;
        assert!(manager.fetch_and_apply().await.is_empty());
        assert_eq!(names(&manager.menu_list()), vec!["dashboard"]);
    }

    #[tokio::test]
    async fn stale_fetch_result_is_discarded() {
        let manager = MenuManager::new(
            FakeFetcher::new(vec![(50, dashboard_menus()), (0, system_menus())]),
            registry(),
            None,
        );
        let (slow, fast) = tokio::join!(manager.fetch_and_apply(), manager.fetch_and_apply());
        assert_eq!(names(&fast), vec!["system"]);
        assert_eq!(names(&slow), vec!["system"]);
        assert_eq!(names(&manager.menu_list()), vec!["system"]);
    }

    #[tokio::test]
    async fn refresh_tears_down_before_registering() {
        let table = RouteTable::with_static_routes();
        let manager = MenuManager::new(
            FakeFetcher::new(vec![(0, dashboard_menus()), (0, system_menus())]),
            registry(),
            None,
        );

        let first = manager.refresh_routes(&table).await;
        assert_eq!(first.registered, vec!["dashboard"]);
        assert!(table.has_route("console"));

        let second = manager.refresh_routes(&table).await;
        assert_eq!(second.registered, vec!["system"]);
        assert!(!table.has_route("dashboard"));
        assert!(!table.has_route("console"));
        assert!(table.has_route("menus"));
        assert!(table.has_route("Login"));

        assert_eq!(manager.remove_all_dynamic_routes(), 1);
        assert!(!table.has_route("system"));
        assert_eq!(manager.remove_all_dynamic_routes(), 0);
    }

    #[tokio::test]
    async fn cleared_handles_leave_routes_in_place() {
        let table = RouteTable::new();
        let manager = MenuManager::new(FakeFetcher::new(vec![(0, system_menus())]), registry(), None);
        manager.refresh_routes(&table).await;
        manager.clear_remove_route_fns();
        assert_eq!(manager.remove_all_dynamic_routes(), 0);
        assert!(table.has_route("system"));
    }

    #[tokio::test]
    async fn configured_home_path_is_kept() {
        let manager = MenuManager::new(FakeFetcher::new(vec![(0, dashboard_menus())]), registry(), Some("welcome".into()));
        manager.fetch_and_apply().await;
        assert_eq!(manager.get_home_path().as_deref(), Some("/welcome"));
        manager.set_home_path("");
        assert_eq!(manager.get_home_path(), None);
        manager.set_menu_list(manager.menu_list());
        assert_eq!(manager.get_home_path().as_deref(), Some("/dashboard/console"));
    }

    #[test]
    fn first_menu_path_skips_links_and_adds_slash() {
        let records = json!([
            {"id": 1, "name": "docs", "path": "docs", "meta": {"link": "https://docs.example.com"}},
            {"id": 2, "name": "orders", "path": "orders", "children": [
                {"id": 3, "name": "blank", "path": ""},
                {"id": 4, "name": "orders-list", "path": "list"}
            ]}
        ]);
        let nodes = crate::convert::menu_normalizer::normalize_menu_list(records.as_array().unwrap());
        let nodes = crate::convert::path_resolver::resolve_menu_paths(&nodes, "");
        assert_eq!(first_menu_path(&nodes).as_deref(), Some("/orders/list"));
    }
}

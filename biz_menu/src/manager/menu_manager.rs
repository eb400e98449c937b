use crate::entitys::menu_node::MenuNode;
use crate::router::component_registry::ComponentRegistry;
use crate::router::register_routes::RegisterOutcome;
use crate::router::route_table::{RemoveRouteFn, RouterOpt};
use async_trait::async_trait;
use common::errors::AppResult;
use serde_json::Value;
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex, RwLock};

/// 导航菜单数据来源
#[async_trait]
pub trait MenuFetcher: Send + Sync {
    /// 当前用户可见的导航菜单（原始记录）
    async fn fetch_navigation_menus(&self) -> AppResult<Vec<Value>>;
}

#[derive(Debug, Default)]
pub(crate) struct MenuState {
    pub(crate) menu_list: Vec<MenuNode>,
    pub(crate) home_path: Option<String>,
    /// 已生效的最新一次拉取序号
    pub(crate) applied_seq: u64,
}

/// 菜单状态：菜单树、首页路径、动态路由的撤销函数
pub struct MenuManager {
    pub(crate) fetcher: Arc<dyn MenuFetcher>,
    pub(crate) registry: ComponentRegistry,
    pub(crate) state: RwLock<MenuState>,
    pub(crate) remove_route_fns: Mutex<Vec<RemoveRouteFn>>,
    pub(crate) fetch_seq: AtomicU64,
}

impl MenuManager {
    pub fn new(fetcher: Arc<dyn MenuFetcher>, registry: ComponentRegistry, home_path: Option<String>) -> Self {
        let state = MenuState { home_path: home_path.and_then(|p| normalize_home_path(&p)), ..Default::default() };
        Self {
            fetcher,
            registry,
            state: RwLock::new(state),
            remove_route_fns: Mutex::new(Vec::new()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }
}

#[async_trait]
pub trait MenuManagerOpt: Send + Sync {
    /// 替换菜单树，首页路径未设置时取第一个可访问的叶子菜单
    /// # menu_list: 已解析路径的菜单树
    fn set_menu_list(&self, menu_list: Vec<MenuNode>);
    /// 当前菜单树
    fn menu_list(&self) -> Vec<MenuNode>;
    /// 首页路径，总是以 `/` 开头
    fn get_home_path(&self) -> Option<String>;
    /// 设置首页路径，空串表示清除
    fn set_home_path(&self, path: &str);
    /// 拉取导航菜单并应用，失败时返回空列表
    async fn fetch_and_apply(&self) -> Vec<MenuNode>;
    /// 保存动态路由的撤销函数
    /// # remove_fns: 注册路由时返回的撤销函数
    fn add_remove_route_fns(&self, remove_fns: Vec<RemoveRouteFn>);
    /// 撤销全部动态路由，返回撤销的数量
    fn remove_all_dynamic_routes(&self) -> usize;
    /// 只清空撤销函数，不动路由表
    fn clear_remove_route_fns(&self);
    /// 撤销旧路由 -> 拉取菜单 -> 注册新路由 -> 保存撤销函数
    /// # router: 当前路由表
    async fn refresh_routes(&self, router: &dyn RouterOpt) -> RegisterOutcome;
}

/// 首页路径统一加上前导 `/`
pub fn normalize_home_path(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{}", path))
    }
}

/// 深度优先查找第一个可访问的叶子菜单路径
pub fn first_menu_path(menu_list: &[MenuNode]) -> Option<String> {
    for node in menu_list {
        if node.meta.is_external_link() {
            continue;
        }
        if node.has_children() {
            if let Some(path) = first_menu_path(&node.children) {
                return Some(path);
            }
            continue;
        }
        if let Some(path) = normalize_home_path(node.full_path()) {
            return Some(path);
        }
    }
    None
}

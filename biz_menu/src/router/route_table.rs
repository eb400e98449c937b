use crate::convert::path_resolver::{join_path, path_segments};
use crate::entitys::route_entity::{RouteComponent, RouteRecord};
use crate::router::routes_alias::RoutesAlias;
use common::errors::{AppError, AppResult};
use log::{debug, warn};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// 撤销一次路由注册（连同其子路由）
pub struct RemoveRouteFn(Box<dyn FnOnce() + Send + Sync>);

impl RemoveRouteFn {
    pub fn new(f: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn call(self) {
        (self.0)()
    }
}

impl fmt::Debug for RemoveRouteFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RemoveRouteFn")
    }
}

/// 路由表行为抽象
pub trait RouterOpt: Send + Sync {
    /// 路由名是否已存在（含子路由）
    fn has_route(&self, name: &str) -> bool;
    /// 添加路由；`parent_name` 为空时添加到顶层。返回撤销函数
    fn add_route(&self, parent_name: Option<&str>, record: RouteRecord) -> AppResult<RemoveRouteFn>;
    /// 当前全部顶层路由
    fn get_routes(&self) -> Vec<RouteRecord>;
}

/// 路径匹配结果：从顶层到命中记录的链路
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub path: String,
    pub matched: Vec<RouteRecord>,
}

impl RouteMatch {
    pub fn leaf(&self) -> Option<&RouteRecord> {
        self.matched.last()
    }
}

struct RouteNode {
    id: u64,
    record: RouteRecord,
    children: Vec<RouteNode>,
}

impl RouteNode {
    fn to_record(&self) -> RouteRecord {
        RouteRecord { children: self.children.iter().map(RouteNode::to_record).collect(), ..self.record.clone() }
    }

    fn has_name(&self, name: &str) -> bool {
        self.record.name.as_deref() == Some(name) || self.children.iter().any(|c| c.has_name(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut RouteNode> {
        if self.record.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }
}

#[derive(Default)]
struct TableInner {
    next_id: u64,
    routes: Vec<RouteNode>,
}

impl TableInner {
    fn build_node(&mut self, mut record: RouteRecord) -> RouteNode {
        self.next_id += 1;
        let id = self.next_id;
        let children = std::mem::take(&mut record.children);
        let children = children.into_iter().map(|c| self.build_node(c)).collect();
        RouteNode { id, record, children }
    }

    fn contains(&self, name: &str) -> bool {
        self.routes.iter().any(|r| r.has_name(name))
    }

    fn remove_by_id(&mut self, id: u64) -> bool {
        remove_from(&mut self.routes, &|node: &RouteNode| node.id == id)
    }
}

fn remove_from(nodes: &mut Vec<RouteNode>, hit: &dyn Fn(&RouteNode) -> bool) -> bool {
    if let Some(pos) = nodes.iter().position(|n| hit(n)) {
        nodes.remove(pos);
        return true;
    }
    nodes.iter_mut().any(|n| remove_from(&mut n.children, hit))
}

/// 内存路由表，克隆后共享同一份数据
#[derive(Clone, Default)]
pub struct RouteTable {
    inner: Arc<RwLock<TableInner>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置登录页与 404 页的静态路由
    pub fn with_static_routes() -> Self {
        let table = Self::new();
        {
            let mut inner = table.write();
            for (name, path, alias) in [
                ("Login", "/auth/login", RoutesAlias::Login),
                ("Register", "/auth/register", RoutesAlias::Register),
                ("ForgetPassword", "/auth/forget-password", RoutesAlias::ForgetPassword),
                ("Exception404", "/exception/404", RoutesAlias::Exception404),
            ] {
                let record = RouteRecord::new(Some(name.to_string()), path, RouteComponent::Static(alias.component()));
                let node = inner.build_node(record);
                inner.routes.push(node);
            }
        }
        table
    }

    fn read(&self) -> RwLockReadGuard<'_, TableInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// 所有路由名称（前序）
    pub fn route_names(&self) -> Vec<String> {
        self.get_routes().iter().flat_map(RouteRecord::names).collect()
    }

    /// 把完整路径匹配到路由链路，优先返回先注册的记录
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let target = path_segments(path);
        let inner = self.read();
        let mut chain = Vec::new();
        if match_nodes(&inner.routes, "", &target, &mut chain) {
            Some(RouteMatch { path: format!("/{}", target.join("/")), matched: chain })
        } else {
            None
        }
    }
}

fn match_nodes(nodes: &[RouteNode], parent_path: &str, target: &[&str], chain: &mut Vec<RouteRecord>) -> bool {
    for node in nodes {
        // 空路径为默认子路由，与父路由同路径
        let full_path = if node.record.path.is_empty() {
            parent_path.to_string()
        } else if node.record.path.starts_with('/') {
            node.record.path.clone()
        } else {
            join_path(parent_path, &node.record.path)
        };
        let segments = path_segments(&full_path);
        if !target.starts_with(&segments) {
            continue;
        }
        chain.push(node.record.without_children());
        if match_nodes(&node.children, &full_path, target, chain) {
            return true;
        }
        if segments.as_slice() == target && !matches!(node.record.component, RouteComponent::Passthrough) {
            return true;
        }
        chain.pop();
    }
    false
}

impl RouterOpt for RouteTable {
    fn has_route(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    fn add_route(&self, parent_name: Option<&str>, record: RouteRecord) -> AppResult<RemoveRouteFn> {
        let mut inner = self.write();
        if let Some(parent) = parent_name {
            if !inner.contains(parent) {
                return Err(AppError::Validation(format!("父路由 [{}] 不存在", parent)));
            }
        }
        // 已注册的路由不会被覆盖
        if let Some(name) = record.names().into_iter().find(|name| inner.contains(name)) {
            warn!("路由名称 [{}] 已存在，拒绝注册", name);
            return Err(AppError::Validation(format!("路由名称 [{}] 已存在", name)));
        }
        let node = inner.build_node(record);
        let id = node.id;
        match parent_name {
            Some(parent) => match inner.routes.iter_mut().find_map(|r| r.find_mut(parent)) {
                Some(parent_node) => parent_node.children.push(node),
                None => return Err(AppError::Validation(format!("父路由 [{}] 不存在", parent))),
            },
            None => inner.routes.push(node),
        }
        debug!("路由已注册 id={}", id);

        let table: Weak<RwLock<TableInner>> = Arc::downgrade(&self.inner);
        Ok(RemoveRouteFn::new(move || {
            if let Some(table) = table.upgrade() {
                let mut inner = table.write().unwrap_or_else(|e| e.into_inner());
                if !inner.remove_by_id(id) {
                    debug!("路由 id={} 已被移除", id);
                }
            }
        }))
    }

    fn get_routes(&self) -> Vec<RouteRecord> {
        self.read().routes.iter().map(RouteNode::to_record).collect()
    }
}

use crate::convert::duplicate_checker::{check_duplicate_routes, CollisionKind, DuplicateReport, RouteCollision};
use crate::convert::path_resolver::path_segments;
use crate::entitys::menu_node::MenuNode;
use crate::entitys::route_entity::{RouteComponent, RouteRecord, ViewComponent};
use crate::router::component_registry::ComponentRegistry;
use crate::router::route_table::{RemoveRouteFn, RouterOpt};
use crate::router::routes_alias::RoutesAlias;
use log::{debug, info, warn};
use std::collections::HashSet;

/// 一次动态路由注册的结果
#[derive(Debug, Default)]
pub struct RegisterOutcome {
    /// 每个顶层路由一个撤销函数
    pub remove_fns: Vec<RemoveRouteFn>,
    pub registered: Vec<String>,
    pub skipped: Vec<String>,
    pub report: DuplicateReport,
}

/// 把已解析的菜单树注册到路由表
///
/// 已存在同名路由的顶层菜单会被跳过，重复调用不会重复注册。
/// 子菜单与已注册路由重名时只记录冲突，不覆盖先注册的路由。
/// 外部链接菜单不生成路由。
pub fn register_dynamic_routes(
    router: &dyn RouterOpt,
    registry: &ComponentRegistry,
    menu_list: &[MenuNode],
) -> RegisterOutcome {
    let mut outcome = RegisterOutcome { report: check_duplicate_routes(menu_list), ..Default::default() };

    for node in menu_list {
        if node.meta.is_external_link() {
            debug!("外链菜单 [{}] 不注册路由", node.name);
            outcome.skipped.push(skip_label(node));
            continue;
        }
        if node.name.is_empty() {
            warn!("顶层菜单缺少名称，已跳过: id={} path={}", node.id, node.full_path());
            outcome.skipped.push(skip_label(node));
            continue;
        }
        if router.has_route(&node.name) {
            debug!("路由 [{}] 已存在，跳过", node.name);
            outcome.skipped.push(node.name.clone());
            continue;
        }

        let mut ctx = ConvertContext::new(router, registry);
        ctx.names.insert(node.name.clone());
        let record = convert_route_component(node, &mut ctx, 0);
        outcome.skipped.append(&mut ctx.skipped);
        outcome.report.collisions.append(&mut ctx.collisions);

        let Some(record) = record else {
            outcome.skipped.push(node.name.clone());
            continue;
        };
        match router.add_route(None, record) {
            Ok(remove) => {
                outcome.remove_fns.push(remove);
                outcome.registered.push(node.name.clone());
            }
            Err(e) => {
                warn!("路由 [{}] 注册失败: {}", node.name, e);
                outcome.skipped.push(node.name.clone());
            }
        }
    }

    info!(
        "动态路由注册完成: 新增 {} 个, 跳过 {} 个, 重复 {} 处",
        outcome.registered.len(),
        outcome.skipped.len(),
        outcome.report.collisions.len()
    );
    outcome
}

fn skip_label(node: &MenuNode) -> String {
    if node.name.is_empty() {
        format!("#{}", node.id)
    } else {
        node.name.clone()
    }
}

/// 单个顶层菜单的转换上下文
struct ConvertContext<'a> {
    router: &'a dyn RouterOpt,
    registry: &'a ComponentRegistry,
    /// 当前子树已占用的路由名称
    names: HashSet<String>,
    skipped: Vec<String>,
    collisions: Vec<RouteCollision>,
}

impl<'a> ConvertContext<'a> {
    fn new(router: &'a dyn RouterOpt, registry: &'a ComponentRegistry) -> Self {
        Self { router, registry, names: HashSet::new(), skipped: Vec::new(), collisions: Vec::new() }
    }

    /// 子菜单名称是否可用；已被占用时记录并返回 false
    fn claim_name(&mut self, node: &MenuNode) -> bool {
        if self.router.has_route(&node.name) {
            let first_path = registered_path(&self.router.get_routes(), &node.name).unwrap_or_default();
            warn!("子路由 [{}] 与已注册路由 {} 重名，已跳过: {}", node.name, first_path, node.full_path());
            self.collisions.push(RouteCollision {
                kind: CollisionKind::Name,
                key: node.name.clone(),
                first_path,
                duplicate_path: node.full_path().to_string(),
            });
            self.skipped.push(node.name.clone());
            return false;
        }
        if !self.names.insert(node.name.clone()) {
            // 树内重名已由重复检测记录
            warn!("子路由 [{}] 在同一菜单下重名，已跳过: {}", node.name, node.full_path());
            self.skipped.push(node.name.clone());
            return false;
        }
        true
    }
}

fn registered_path(routes: &[RouteRecord], name: &str) -> Option<String> {
    routes.iter().find_map(|route| {
        if route.name.as_deref() == Some(name) {
            Some(route.path.clone())
        } else {
            registered_path(&route.children, name)
        }
    })
}

/// 菜单节点 -> 路由记录，外链节点与重名子节点返回 None
fn convert_route_component(node: &MenuNode, ctx: &mut ConvertContext<'_>, depth: usize) -> Option<RouteRecord> {
    if node.meta.is_external_link() {
        return None;
    }
    if depth > 0 && !node.name.is_empty() && !ctx.claim_name(node) {
        return None;
    }
    let mut record = if depth == 0 && node.has_children() {
        layout_route(node, ctx.registry)
    } else {
        normal_route(node, ctx.registry)
    };

    for child in &node.children {
        if let Some(child_record) = convert_route_component(child, ctx, depth + 1) {
            record.children.push(child_record);
        }
    }
    Some(record)
}

/// 一级容器：挂在布局外壳下，自身组件作为默认子路由
fn layout_route(node: &MenuNode, registry: &ComponentRegistry) -> RouteRecord {
    let first_segment = path_segments(node.full_path()).first().copied().unwrap_or_default();
    let mut meta = node.meta.clone();
    meta.is_first_level = true;

    let mut record = RouteRecord {
        id: Some(node.id),
        name: Some(node.name.clone()),
        path: format!("/{}", first_segment),
        redirect: node.redirect.clone(),
        component: RouteComponent::Static(RoutesAlias::Layout.component()),
        meta: meta.clone(),
        children: Vec::new(),
    };

    if let Some(component) = node.component.as_ref().filter(|c| !c.is_layout()) {
        record.children.push(RouteRecord {
            id: Some(node.id),
            name: None,
            path: String::new(),
            redirect: None,
            component: registry.resolve(component, &node.name),
            meta,
            children: Vec::new(),
        });
    }
    record
}

fn normal_route(node: &MenuNode, registry: &ComponentRegistry) -> RouteRecord {
    let component = match &node.component {
        Some(component) => registry.resolve(component, &node.name),
        None if node.has_children() => RouteComponent::Passthrough,
        None => {
            warn!("菜单 [{}] 没有配置组件，使用占位页", node.name);
            RouteComponent::Static(ViewComponent::placeholder(&node.name))
        }
    };
    RouteRecord {
        id: Some(node.id),
        name: Some(node.name.clone()).filter(|n| !n.is_empty()),
        path: node.full_path().to_string(),
        redirect: node.redirect.clone(),
        component,
        meta: node.meta.clone(),
        children: Vec::new(),
    }
}

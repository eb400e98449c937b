use crate::entitys::menu_node::MenuMeta;
use common::errors::AppResult;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// 布局外壳，内部再渲染子页面
    Layout,
    Page,
    /// 找不到组件时的占位页
    Placeholder { message: String },
}

/// 已加载的视图组件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewComponent {
    pub name: String,
    pub kind: ViewKind,
}

impl ViewComponent {
    pub fn page(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ViewKind::Page }
    }

    pub fn layout(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ViewKind::Layout }
    }

    pub fn placeholder(route_name: &str) -> Self {
        Self {
            name: format!("missing:{}", route_name),
            kind: ViewKind::Placeholder { message: format!("component not found: {}", route_name) },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, ViewKind::Placeholder { .. })
    }

    pub fn render(&self) -> String {
        match &self.kind {
            ViewKind::Layout => format!("[layout {}]", self.name),
            ViewKind::Page => format!("[page {}]", self.name),
            ViewKind::Placeholder { message } => message.clone(),
        }
    }
}

pub type LoadFuture = BoxFuture<'static, anyhow::Result<ViewComponent>>;

/// 懒加载组件的加载函数
pub type ComponentLoader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// 路由记录上挂载的组件
#[derive(Clone)]
pub enum RouteComponent {
    /// 静态绑定：别名页面、布局外壳、占位页
    Static(ViewComponent),
    /// 按视图路径懒加载
    Lazy { key: String, loader: ComponentLoader },
    /// 仅承载子路由，没有自己的组件
    Passthrough,
}

impl RouteComponent {
    /// 加载组件，静态组件直接返回
    pub async fn load(&self) -> AppResult<Option<ViewComponent>> {
        match self {
            RouteComponent::Static(view) => Ok(Some(view.clone())),
            RouteComponent::Lazy { loader, .. } => Ok(Some(loader().await?)),
            RouteComponent::Passthrough => Ok(None),
        }
    }

    pub fn is_layout(&self) -> bool {
        matches!(self, RouteComponent::Static(ViewComponent { kind: ViewKind::Layout, .. }))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RouteComponent::Static(view) if view.is_placeholder())
    }

    /// 日志与调试输出用的简短描述
    pub fn describe(&self) -> String {
        match self {
            RouteComponent::Static(view) => view.render(),
            RouteComponent::Lazy { key, .. } => format!("lazy({})", key),
            RouteComponent::Passthrough => "-".to_string(),
        }
    }
}

impl fmt::Debug for RouteComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteComponent::Static(view) => f.debug_tuple("Static").field(view).finish(),
            RouteComponent::Lazy { key, .. } => f.debug_struct("Lazy").field("key", key).finish(),
            RouteComponent::Passthrough => f.write_str("Passthrough"),
        }
    }
}

/// 路由表中的一条记录
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub path: String,
    pub redirect: Option<String>,
    pub component: RouteComponent,
    pub meta: MenuMeta,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(name: Option<String>, path: impl Into<String>, component: RouteComponent) -> Self {
        Self {
            id: None,
            name,
            path: path.into(),
            redirect: None,
            component,
            meta: MenuMeta::default(),
            children: Vec::new(),
        }
    }

    /// 子树内全部路由名称（前序）
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<String>) {
        if let Some(name) = &self.name {
            names.push(name.clone());
        }
        for child in &self.children {
            child.collect_names(names);
        }
    }

    /// 去掉子路由的浅拷贝
    pub fn without_children(&self) -> RouteRecord {
        RouteRecord { children: Vec::new(), ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lazy_component_loads_through_loader() {
        let loader: ComponentLoader = Arc::new(|| -> LoadFuture { Box::pin(async { Ok(ViewComponent::page("/system/role")) }) });
        let component = RouteComponent::Lazy { key: "/system/role".into(), loader };
        let view = component.load().await.unwrap().unwrap();
        assert_eq!(view, ViewComponent::page("/system/role"));
        assert_eq!(component.describe(), "lazy(/system/role)");
    }

    #[tokio::test]
    async fn failing_loader_surfaces_internal_error() {
        let loader: ComponentLoader = Arc::new(|| -> LoadFuture { Box::pin(async { Err(anyhow::anyhow!("chunk load failed")) }) });
        let component = RouteComponent::Lazy { key: "/broken".into(), loader };
        assert!(component.load().await.is_err());
    }

    #[test]
    fn placeholder_renders_visible_message() {
        let view = ViewComponent::placeholder("order-list");
        assert_eq!(view.render(), "component not found: order-list");
        assert!(RouteComponent::Static(view).is_placeholder());
    }

    #[test]
    fn names_cover_whole_subtree() {
        let mut root = RouteRecord::new(Some("orders".into()), "/orders", RouteComponent::Passthrough);
        root.children.push(RouteRecord::new(None, "orders", RouteComponent::Passthrough));
        root.children.push(RouteRecord::new(Some("orders-list".into()), "orders/list", RouteComponent::Passthrough));
        assert_eq!(root.names(), vec!["orders".to_string(), "orders-list".to_string()]);
        assert!(root.without_children().children.is_empty());
    }
}

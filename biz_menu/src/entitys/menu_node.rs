use crate::router::routes_alias::RoutesAlias;
use serde::{Deserialize, Serialize};

/// 按钮级权限标识
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthItem {
    #[serde(default)]
    pub title: String,
    pub auth_mark: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
}

/// 菜单组件引用：保留别名或视图路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRef {
    Alias(RoutesAlias),
    View(String),
}

impl ComponentRef {
    /// 后端给出的组件字符串，空串视为没有组件
    pub fn parse(component: &str) -> Option<Self> {
        let component = component.trim();
        if component.is_empty() {
            return None;
        }
        Some(match RoutesAlias::parse(component) {
            Some(alias) => ComponentRef::Alias(alias),
            None => ComponentRef::View(component.to_string()),
        })
    }

    /// 重复检测使用的组件标识
    pub fn component_key(&self) -> String {
        match self {
            ComponentRef::Alias(alias) => alias.component_key(),
            ComponentRef::View(path) => path.clone(),
        }
    }

    pub fn is_layout(&self) -> bool {
        matches!(self, ComponentRef::Alias(RoutesAlias::Layout))
    }

    /// 还原成后端的字符串写法
    pub fn as_raw(&self) -> String {
        match self {
            ComponentRef::Alias(alias) => alias.path().to_string(),
            ComponentRef::View(path) => path.clone(),
        }
    }
}

/// 归一化后的菜单元信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuMeta {
    pub title: String,
    pub icon: Option<String>,
    pub sort: i64,
    pub is_hide: bool,
    pub keep_alive: bool,
    pub is_iframe: bool,
    pub link: Option<String>,
    pub is_enable: bool,
    pub roles: Vec<String>,
    pub auth_list: Vec<AuthItem>,
    /// 一级容器菜单，由路由注册时标记
    pub is_first_level: bool,
}

impl Default for MenuMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            icon: None,
            sort: 1,
            is_hide: false,
            keep_alive: false,
            is_iframe: false,
            link: None,
            is_enable: true,
            roles: Vec::new(),
            auth_list: Vec::new(),
            is_first_level: false,
        }
    }
}

impl MenuMeta {
    /// 外部链接（非内嵌 iframe）不生成路由
    pub fn is_external_link(&self) -> bool {
        !self.is_iframe && self.link.as_deref().is_some_and(|l| !l.trim().is_empty())
    }

    pub fn has_auth(&self, auth_mark: &str) -> bool {
        self.auth_list.iter().any(|a| a.auth_mark == auth_mark)
    }
}

/// 归一化后的菜单节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: i64,
    pub name: String,
    pub raw_path: String,
    /// 路径解析之后才有值
    pub resolved_path: Option<String>,
    pub component: Option<ComponentRef>,
    pub redirect: Option<String>,
    pub meta: MenuMeta,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// 已解析则返回完整路径，否则返回原始路径
    pub fn full_path(&self) -> &str {
        self.resolved_path.as_deref().unwrap_or(&self.raw_path)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// 以解析结果作为新的原始路径，得到一棵待重新解析的树
    pub fn reresolved(&self) -> MenuNode {
        MenuNode {
            raw_path: self.full_path().to_string(),
            resolved_path: None,
            children: self.children.iter().map(MenuNode::reresolved).collect(),
            ..self.clone()
        }
    }

    /// 前序遍历全部节点
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a MenuNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// 输出旧版扁平字段，供仍按旧字段名取值的调用方使用
    pub fn to_legacy(&self) -> LegacyMenuView {
        let first_auth = self.meta.auth_list.first();
        LegacyMenuView {
            id: self.id,
            name: self.name.clone(),
            path: self.full_path().to_string(),
            component: self.component.as_ref().map(ComponentRef::as_raw).unwrap_or_default(),
            redirect: self.redirect.clone().unwrap_or_default(),
            title: self.meta.title.clone(),
            icon: self.meta.icon.clone().unwrap_or_default(),
            sort: self.meta.sort,
            is_hide: self.meta.is_hide,
            is_keep_alive: self.meta.keep_alive,
            is_iframe: self.meta.is_iframe,
            link: self.meta.link.clone().unwrap_or_default(),
            is_enable: self.meta.is_enable,
            roles: self.meta.roles.join(","),
            auth_name: first_auth.map(|a| a.title.clone()).unwrap_or_default(),
            auth_mark: first_auth.map(|a| a.auth_mark.clone()).unwrap_or_default(),
            auth_sort: first_auth.and_then(|a| a.sort).unwrap_or_default(),
            children: self.children.iter().map(MenuNode::to_legacy).collect(),
        }
    }
}

/// 旧版扁平字段视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMenuView {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub component: String,
    pub redirect: String,
    pub title: String,
    pub icon: String,
    pub sort: i64,
    pub is_hide: bool,
    pub is_keep_alive: bool,
    pub is_iframe: bool,
    pub link: String,
    pub is_enable: bool,
    pub roles: String,
    pub auth_name: String,
    pub auth_mark: String,
    pub auth_sort: i64,
    pub children: Vec<LegacyMenuView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, path: &str) -> MenuNode {
        MenuNode {
            id: 1,
            name: name.to_string(),
            raw_path: path.to_string(),
            resolved_path: None,
            component: ComponentRef::parse("/system/menu"),
            redirect: None,
            meta: MenuMeta::default(),
            children: vec![],
        }
    }

    #[test]
    fn component_ref_recognises_aliases() {
        assert_eq!(ComponentRef::parse("Layout"), Some(ComponentRef::Alias(RoutesAlias::Layout)));
        assert_eq!(ComponentRef::parse("/exception/404"), Some(ComponentRef::Alias(RoutesAlias::Exception404)));
        assert_eq!(ComponentRef::parse("/system/user"), Some(ComponentRef::View("/system/user".into())));
        assert_eq!(ComponentRef::parse("  "), None);
        assert_eq!(ComponentRef::Alias(RoutesAlias::Login).component_key(), "Alias.Login");
    }

    #[test]
    fn external_link_excludes_iframe() {
        let mut meta = MenuMeta { link: Some("https://example.com".into()), ..MenuMeta::default() };
        assert!(meta.is_external_link());
        meta.is_iframe = true;
        assert!(!meta.is_external_link());
        meta.link = Some(" ".into());
        meta.is_iframe = false;
        assert!(!meta.is_external_link());
    }

    #[test]
    fn legacy_view_uses_snake_case_names() {
        let mut node = leaf("menus", "/system/menu");
        node.meta.roles = vec!["R_SUPER".into(), "R_ADMIN".into()];
        node.meta.is_hide = true;
        let value = serde_json::to_value(node.to_legacy()).unwrap();
        assert_eq!(value["roles"], "R_SUPER,R_ADMIN");
        assert_eq!(value["is_hide"], true);
        assert_eq!(value["component"], "/system/menu");
    }
}

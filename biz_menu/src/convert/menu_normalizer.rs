use crate::entitys::menu_node::{AuthItem, ComponentRef, MenuMeta, MenuNode};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

/// 被跳过的菜单记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeIssue {
    /// 形如 `[1].children[0]`
    pub location: String,
    pub reason: String,
}

/// 角色列表：逗号拼接字符串或数组
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleList {
    Joined(String),
    Split(Vec<String>),
}

impl RoleList {
    fn into_roles(self) -> Vec<String> {
        let parts: Vec<String> = match self {
            RoleList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            RoleList::Split(list) => list.into_iter().flat_map(|r| r.split(',').map(str::to_string).collect::<Vec<_>>()).collect(),
        };
        parts.into_iter().map(|r| r.trim().to_string()).filter(|r| !r.is_empty()).collect()
    }
}

/// 新版嵌套 meta
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawMeta {
    title: Option<String>,
    icon: Option<String>,
    sort: Option<i64>,
    is_hide: Option<bool>,
    keep_alive: Option<bool>,
    is_iframe: Option<bool>,
    link: Option<String>,
    is_enable: Option<bool>,
    roles: Option<RoleList>,
    auth_list: Option<Vec<AuthItem>>,
}

/// 旧版平铺字段
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyFields {
    title: Option<String>,
    icon: Option<String>,
    sort: Option<i64>,
    is_hide: Option<bool>,
    is_keep_alive: Option<bool>,
    is_iframe: Option<bool>,
    link: Option<String>,
    is_enable: Option<bool>,
    roles: Option<RoleList>,
    auth_name: Option<String>,
    auth_mark: Option<String>,
    auth_sort: Option<i64>,
}

/// 接入层的后端菜单记录，兼容两种字段形态
#[derive(Debug, Deserialize)]
struct RawMenuRecord {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    component: Option<String>,
    #[serde(default)]
    redirect: Option<String>,
    #[serde(default)]
    meta: Option<RawMeta>,
    #[serde(default)]
    children: Option<Vec<Value>>,
    #[serde(flatten)]
    legacy: LegacyFields,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl RawMenuRecord {
    fn resolve_meta(&mut self) -> MenuMeta {
        let meta = self.meta.take().unwrap_or_default();
        let legacy = std::mem::take(&mut self.legacy);
        let defaults = MenuMeta::default();

        let legacy_auth = non_empty(legacy.auth_mark).map(|auth_mark| {
            vec![AuthItem { title: legacy.auth_name.unwrap_or_default(), auth_mark, sort: legacy.auth_sort }]
        });

        MenuMeta {
            title: meta.title.or(legacy.title).unwrap_or(defaults.title),
            icon: non_empty(meta.icon.or(legacy.icon)),
            sort: meta.sort.or(legacy.sort).unwrap_or(defaults.sort),
            is_hide: meta.is_hide.or(legacy.is_hide).unwrap_or(defaults.is_hide),
            keep_alive: meta.keep_alive.or(legacy.is_keep_alive).unwrap_or(defaults.keep_alive),
            is_iframe: meta.is_iframe.or(legacy.is_iframe).unwrap_or(defaults.is_iframe),
            link: non_empty(meta.link.or(legacy.link)),
            is_enable: meta.is_enable.or(legacy.is_enable).unwrap_or(defaults.is_enable),
            roles: meta.roles.or(legacy.roles).map(RoleList::into_roles).unwrap_or_default(),
            auth_list: meta.auth_list.or(legacy_auth).unwrap_or_default(),
            is_first_level: false,
        }
    }
}

/// 把后端菜单列表归一化为菜单树，跳过无法解析的记录
pub fn normalize_menu_list(records: &[Value]) -> Vec<MenuNode> {
    normalize_menu_list_with_issues(records).0
}

/// 同 [`normalize_menu_list`]，并返回被跳过记录的说明
pub fn normalize_menu_list_with_issues(records: &[Value]) -> (Vec<MenuNode>, Vec<NormalizeIssue>) {
    let mut issues = Vec::new();
    let mut nodes = normalize_level(records, "", &mut issues);
    // 带子菜单的顶层节点是一级容器
    for node in nodes.iter_mut().filter(|n| n.has_children()) {
        node.meta.is_first_level = true;
    }
    (nodes, issues)
}

fn normalize_level(records: &[Value], location: &str, issues: &mut Vec<NormalizeIssue>) -> Vec<MenuNode> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let here = format!("{}[{}]", location, index);
            match normalize_record(record, &here, issues) {
                Ok(node) => Some(node),
                Err(reason) => {
                    warn!("菜单记录 {} 无法解析，已跳过: {}", here, reason);
                    issues.push(NormalizeIssue { location: here, reason });
                    None
                }
            }
        })
        .collect()
}

fn normalize_record(record: &Value, location: &str, issues: &mut Vec<NormalizeIssue>) -> Result<MenuNode, String> {
    if !record.is_object() {
        return Err(format!("不是对象: {}", record));
    }
    let mut raw = RawMenuRecord::deserialize(record).map_err(|e| e.to_string())?;
    let meta = raw.resolve_meta();
    let children = raw
        .children
        .as_deref()
        .map(|children| normalize_level(children, &format!("{}.children", location), issues))
        .unwrap_or_default();

    Ok(MenuNode {
        id: raw.id,
        name: raw.name.map(|n| n.trim().to_string()).unwrap_or_default(),
        raw_path: raw.path.map(|p| p.trim().to_string()).unwrap_or_default(),
        resolved_path: None,
        component: raw.component.as_deref().and_then(ComponentRef::parse),
        redirect: non_empty(raw.redirect),
        meta,
        children,
    })
}

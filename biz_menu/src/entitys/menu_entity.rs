use serde::{Deserialize, Serialize};
use validator::Validate;

/// 后端菜单记录（管理端接口返回的扁平结构）
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Menu {
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
    pub menu_type: String,
    pub parent_id: Option<i64>,
    /// 逗号分隔的角色编码
    pub roles: String,
    pub auth_name: String,
    pub auth_mark: String,
    pub auth_sort: i64,
    pub children: Option<Vec<Menu>>,
}

/// 新建菜单参数
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuCreate {
    #[validate(length(min = 1, max = 64, message = "菜单名称长度 1-64"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "路由地址不能为空"))]
    pub path: String,
    #[validate(length(min = 1, max = 64, message = "菜单标题长度 1-64"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 9999))]
    pub sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hide: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_iframe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "外链地址格式错误"))]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_sort: Option<i64>,
}

/// 更新菜单参数，全部可选
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "菜单名称长度 1-64"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "路由地址不能为空"))]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "菜单标题长度 1-64"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 9999))]
    pub sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hide: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_iframe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "外链地址格式错误"))]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_by: Option<String>,
}

/// 菜单列表查询条件
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_type: Option<String>,
}

use crate::entitys::route_entity::ViewComponent;
use std::str::FromStr;
use strum::{EnumProperty, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumProperty as DeriveEnumProperty, EnumString, IntoStaticStr};

/// 路由别名：静态绑定的页面，不走懒加载
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr, DeriveEnumProperty)]
pub enum RoutesAlias {
    // 布局容器
    #[strum(props(path = "/index/index"))]
    Layout,
    #[strum(props(path = "/auth/login"))]
    Login,
    #[strum(props(path = "/auth/register"))]
    Register,
    #[strum(props(path = "/auth/forget-password"))]
    ForgetPassword,
    #[strum(props(path = "/exception/404"))]
    Exception404,
}

impl RoutesAlias {
    /// 按别名名称或别名路径解析
    pub fn parse(component: &str) -> Option<Self> {
        RoutesAlias::from_str(component)
            .ok()
            .or_else(|| RoutesAlias::iter().find(|alias| alias.path() == component))
    }

    pub fn path(&self) -> &'static str {
        self.get_str("path").unwrap_or_default()
    }

    pub fn key(&self) -> &'static str {
        self.into()
    }

    /// 形如 `Alias.Layout`
    pub fn component_key(&self) -> String {
        format!("Alias.{}", self.key())
    }

    /// 别名对应的静态组件
    pub fn component(&self) -> ViewComponent {
        match self {
            RoutesAlias::Layout => ViewComponent::layout(self.path()),
            _ => ViewComponent::page(self.path()),
        }
    }
}

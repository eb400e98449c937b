use biz_menu::entitys::route_entity::ViewComponent;
use biz_menu::router::component_registry::ComponentRegistry;

/// 控制台内置的视图页面
pub const CONSOLE_VIEWS: [&str; 12] = [
    "/dashboard/console",
    "/dashboard/analysis",
    "/system/menu",
    "/system/role",
    "/system/user",
    "/system/user-center",
    "/system/department",
    "/system/dictionary",
    "/order/internal/list",
    "/order/external/list",
    "/article/list",
    "/result/success",
];

/// 启动时构建组件注册表
pub fn build_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    for view in CONSOLE_VIEWS {
        registry.register_page(view);
    }
    // 工作台布局带有自己的外壳
    registry.register("/dashboard/workbench/index", || async {
        Ok(ViewComponent::layout("/dashboard/workbench"))
    });
    registry
}

mod views;

use biz_menu::biz_service::menu_service::MenuService;
use biz_menu::entitys::route_entity::RouteRecord;
use biz_menu::manager::menu_manager::{MenuManager, MenuManagerOpt};
use biz_menu::router::route_table::{RouteTable, RouterOpt};
use common::config::AppConfig;
use common::errors::AppResult;
use common::http::HttpClient;
use common::util::log_util::init_log;
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config_file = std::env::args().nth(1).unwrap_or_else(|| "console-config.toml".to_string());
    let app_cfg = AppConfig::load(&config_file)?;
    init_log(&app_cfg.get_sys().log_level)?;

    let api_cfg = app_cfg.get_api();
    info!("console starting, backend {}", api_cfg.base_url);
    let menu_service = MenuService::new(HttpClient::new(&api_cfg)?);

    let router = RouteTable::with_static_routes();
    let manager = MenuManager::new(Arc::new(menu_service), views::build_registry(), app_cfg.get_menu().home_path);

    let outcome = manager.refresh_routes(&router).await;
    for collision in &outcome.report.collisions {
        warn!("{:?} [{}]: {} / {}", collision.kind, collision.key, collision.first_path, collision.duplicate_path);
    }
    if !outcome.skipped.is_empty() {
        info!("未注册的菜单: {}", outcome.skipped.join(", "));
    }

    println!("routes:");
    for route in router.get_routes() {
        print_route(&route, 1);
    }

    // 首页组件，匹配不到时落到 404
    let home_path = manager.get_home_path().unwrap_or_else(|| "/".to_string());
    let target = router.resolve(&home_path).or_else(|| router.resolve("/exception/404"));
    match target.as_ref().and_then(|m| m.leaf()) {
        Some(leaf) => {
            let view = leaf.component.load().await?;
            println!("home: {} -> {}", home_path, view.map(|v| v.render()).unwrap_or_default());
        }
        None => println!("home: {} (no route)", home_path),
    }

    manager.remove_all_dynamic_routes();
    Ok(())
}

fn print_route(route: &RouteRecord, depth: usize) {
    let path = if route.path.is_empty() { "(index)" } else { route.path.as_str() };
    println!(
        "{}{} {} {}",
        "  ".repeat(depth),
        path,
        route.name.as_deref().unwrap_or("-"),
        route.component.describe()
    );
    for child in &route.children {
        print_route(child, depth + 1);
    }
}

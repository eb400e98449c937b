use crate::entitys::menu_entity::{Menu, MenuCreate, MenuQuery, MenuUpdate};
use crate::manager::menu_manager::MenuFetcher;
use async_trait::async_trait;
use common::errors::{AppError, AppResult};
use common::http::HttpClient;
use common::util::page_util::{adapt_page_response, PageResult};
use serde_json::Value;
use validator::Validate;

/// 菜单管理接口
#[derive(Debug, Clone)]
pub struct MenuService {
    http: HttpClient,
}

impl MenuService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// 分页查询菜单
    pub async fn get_menus(&self, query: &MenuQuery) -> AppResult<PageResult<Menu>> {
        let data: Value = self.http.get_with_query("/menus/", query).await?;
        Ok(adapt_page_response(&data))
    }

    /// 完整菜单树
    pub async fn get_menu_tree(&self) -> AppResult<Vec<Menu>> {
        let data: Option<Vec<Menu>> = self.http.get("/menus/tree").await?;
        Ok(data.unwrap_or_default())
    }

    /// 当前用户的导航菜单，保留原始记录交给归一化处理
    pub async fn get_navigation_menus(&self) -> AppResult<Vec<Value>> {
        let data: Value = self.http.get("/menus/navigation").await?;
        Ok(match data {
            Value::Array(records) => records,
            Value::Null => Vec::new(),
            // 部分后端把导航菜单也按分页结构返回
            other => adapt_page_response::<Value>(&other).records,
        })
    }

    pub async fn get_menu(&self, id: i64) -> AppResult<Menu> {
        let data: Option<Menu> = self.http.get(&format!("/menus/{}", id)).await?;
        data.ok_or(AppError::NotFound)
    }

    pub async fn create_menu(&self, menu: &MenuCreate) -> AppResult<Menu> {
        menu.validate()?;
        self.http.post("/menus/", menu).await
    }

    pub async fn update_menu(&self, id: i64, menu: &MenuUpdate) -> AppResult<Menu> {
        menu.validate()?;
        self.http.put(&format!("/menus/{}", id), menu).await
    }

    pub async fn delete_menu(&self, id: i64) -> AppResult<()> {
        let _: Value = self.http.del(&format!("/menus/{}", id)).await?;
        Ok(())
    }
}

#[async_trait]
impl MenuFetcher for MenuService {
    async fn fetch_navigation_menus(&self) -> AppResult<Vec<Value>> {
        self.get_navigation_menus().await
    }
}

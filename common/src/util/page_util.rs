use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const RECORD_FIELDS: [&str; 5] = ["records", "data", "list", "items", "result"];
const NESTED_RECORD_FIELDS: [&str; 3] = ["list", "records", "items"];
const TOTAL_FIELDS: [&str; 2] = ["total", "count"];
const CURRENT_FIELDS: [&str; 3] = ["current", "page", "pageNum"];
const SIZE_FIELDS: [&str; 3] = ["size", "pageSize", "limit"];

/// 分页查询结果（统一形状）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub records: Vec<T>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self { records: Vec::new(), total: 0, current: None, size: None }
    }
}

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub current: u64,
    pub size: u64,
    pub total: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { current: 1, size: 10, total: 0 }
    }
}

impl PageParams {
    /// 用响应结果回写分页信息，并把越界的页码收回到最后一页
    pub fn apply<T>(&mut self, page: &PageResult<T>) {
        self.total = page.total;
        if let Some(current) = page.current {
            self.current = current;
        }
        if let Some(size) = page.size {
            self.size = size;
        }
        let max_page = self.total.div_ceil(self.size.max(1)).max(1);
        if self.current > max_page {
            self.current = max_page;
        }
    }
}

/// 将各种后端分页响应整理成 [`PageResult`]
///
/// 兼容的形状：裸数组、`{records|data|list|items|result, total|count, current|page|pageNum, size|pageSize|limit}`，
/// 以及把列表再包一层 `data` 的写法。无法解析的单条记录会被跳过。
pub fn adapt_page_response<T: DeserializeOwned>(response: &Value) -> PageResult<T> {
    let raw = adapt_raw(response);
    let records = raw
        .records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<T>(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("分页记录解析失败，已跳过: {}", e);
                None
            }
        })
        .collect();
    PageResult { records, total: raw.total, current: raw.current, size: raw.size }
}

fn adapt_raw(response: &Value) -> PageResult<Value> {
    let obj = match response {
        Value::Null => return PageResult::default(),
        Value::Array(list) => {
            return PageResult { records: list.clone(), total: list.len() as u64, current: None, size: None };
        }
        Value::Object(obj) => obj,
        _ => return PageResult::default(),
    };

    let mut records = extract_records(obj, &RECORD_FIELDS);
    let mut total = extract_total(obj, records.len(), &TOTAL_FIELDS);
    let mut pagination = extract_pagination(&[obj]);

    if records.is_empty() {
        match obj.get("data") {
            Some(Value::Object(data)) => {
                records = extract_records(data, &NESTED_RECORD_FIELDS);
                total = extract_total(data, records.len(), &TOTAL_FIELDS);
                pagination = extract_pagination(&[obj, data]);
            }
            Some(Value::Array(data)) => {
                records = data.clone();
                total = records.len() as u64;
            }
            _ => {}
        }
    }

    PageResult { records, total, current: pagination.0, size: pagination.1 }
}

fn extract_records(obj: &Map<String, Value>, fields: &[&str]) -> Vec<Value> {
    fields
        .iter()
        .find_map(|field| obj.get(*field).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

fn extract_total(obj: &Map<String, Value>, fallback: usize, fields: &[&str]) -> u64 {
    fields
        .iter()
        .find_map(|field| obj.get(*field).and_then(Value::as_u64))
        .unwrap_or(fallback as u64)
}

fn extract_pagination(sources: &[&Map<String, Value>]) -> (Option<u64>, Option<u64>) {
    let pick = |fields: &[&str]| {
        sources
            .iter()
            .find_map(|src| fields.iter().find_map(|field| src.get(*field).and_then(Value::as_u64)))
    };
    (pick(&CURRENT_FIELDS), pick(&SIZE_FIELDS))
}

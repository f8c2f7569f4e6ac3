//! History API 封装模块
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 与 window.location 的操作都集中在此模块。

use wasm_bindgen::JsValue;

/// 获取当前浏览器路径（不含查询串）
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前浏览器路径与查询串（用于登录后回跳的完整记录）
pub fn current_path_and_query() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return "/".to_string(),
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let query = location.search().unwrap_or_default();
    format!("{}{}", path, query)
}

/// 推送 History 状态
pub fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向，避免污染历史栈）
pub fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

//! 跨平台日志模块
//!
//! wasm32 目标输出到浏览器控制台，其余目标输出到标准输出/错误，
//! 便于在本地测试中观察守卫与路由的决策日志。

#[cfg(target_arch = "wasm32")]
pub(crate) fn info(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn info(msg: &str) {
    println!("{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn error(msg: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn error(msg: &str) {
    eprintln!("{}", msg);
}

macro_rules! log_info {
    ($($t:tt)*) => ($crate::log::info(&format!($($t)*)))
}

macro_rules! log_error {
    ($($t:tt)*) => ($crate::log::error(&format!($($t)*)))
}

pub(crate) use {log_error, log_info};

//! 浏览器存储封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，提供简洁的存储接口。
//! `LocalStorage` 跨会话持久；`SessionStorage` 以浏览器会话为作用域，
//! 用于登录后回跳路径这类一次性状态。

fn local() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn session() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok()?
}

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        local()?.get_item(key).ok()?
    }

    /// 设置存储值
    ///
    /// # 返回
    /// - `true` 如果操作成功
    pub fn set(key: &str, value: &str) -> bool {
        local().and_then(|s| s.set_item(key, value).ok()).is_some()
    }

    /// 删除存储的键值对
    #[allow(dead_code)]
    pub fn delete(key: &str) -> bool {
        local().and_then(|s| s.remove_item(key).ok()).is_some()
    }
}

/// 会话存储操作封装
///
/// 与 `LocalStorage` 接口一致，但数据随浏览器会话结束而消失。
pub struct SessionStorage;

impl SessionStorage {
    /// 获取存储的字符串值
    pub fn get(key: &str) -> Option<String> {
        session()?.get_item(key).ok()?
    }

    /// 设置存储值
    pub fn set(key: &str, value: &str) -> bool {
        session().and_then(|s| s.set_item(key, value).ok()).is_some()
    }

    /// 删除存储的键值对
    pub fn delete(key: &str) -> bool {
        session().and_then(|s| s.remove_item(key).ok()).is_some()
    }
}

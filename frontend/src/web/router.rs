//! 路由服务模块 - 核心引擎
//!
//! 通过 Signal 驱动界面更新：当前路由与当前路径+查询串
//! 都是只读信号。路由服务只负责"移动"——pushState / replaceState
//! 与 popstate 监听；允不允许到达由守卫评估决定，
//! 本模块不做任何认证检查。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::history;
use super::route::AppRoute;
use crate::log::log_info;

/// 路由器服务
///
/// 封装所有路由操作。重定向一律走 `replace`，
/// 用户发起的导航走 `navigate`。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 当前路径+查询串（只读信号，登录后回跳记录用）
    current_path_query: ReadSignal<String>,
    set_path_query: WriteSignal<String>,
}

impl RouterService {
    /// 创建新的路由服务（从当前 URL 初始化）
    fn new() -> Self {
        let path = history::current_path();
        let (current_route, set_route) = signal(AppRoute::from_path(&path));
        let (current_path_query, set_path_query) = signal(history::current_path_and_query());

        Self {
            current_route,
            set_route,
            current_path_query,
            set_path_query,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 获取当前路径+查询串信号
    pub fn current_path_query(&self) -> ReadSignal<String> {
        self.current_path_query
    }

    /// 用户发起的导航（pushState）
    pub fn navigate(&self, path: &str) {
        log_info!("[Router] navigate {}", path);
        history::push_history_state(path);
        self.sync_to(path);
    }

    /// 重定向（replaceState，不产生新的历史条目）
    ///
    /// 只应由守卫调用。
    pub fn replace(&self, path: &str) {
        history::replace_history_state(path);
        self.sync_to(path);
    }

    /// 将信号同步到给定路径
    fn sync_to(&self, path: &str) {
        let bare = path.split('?').next().unwrap_or(path);
        self.set_route.set(AppRoute::from_path(bare));
        self.set_path_query.set(path.to_string());
    }

    /// 初始化浏览器后退/前进按钮监听
    ///
    /// popstate 只同步信号；守卫随信号变化重新评估。
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let set_path_query = self.set_path_query;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = history::current_path();
            set_route.set(AppRoute::from_path(&path));
            set_path_query.set(history::current_path_and_query());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
#[allow(dead_code)]
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router();
    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

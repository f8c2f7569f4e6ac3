//! 导航守卫模块
//!
//! 包裹每一个路由页面的组件。挂载与每次相关状态变化时：
//! (a) 触发系统属性与群组 URL 校验两项异步加载；
//! (b) 按需挂接认证监听器（进程级单订阅，引用计数）；
//! (c) 以当前路径与会话状态评估守卫规则，得出
//!     加载中 / 重定向 / 渲染页面三者之一。
//!
//! 守卫是唯一允许发起重定向、读写"登录后回跳路径"槽位的组件，
//! 以此避免各页面各自重定向引发的竞态。

pub mod machine;

use leptos::prelude::*;

use crate::api::GroupVestApi;
use crate::auth::{listener, use_auth, AuthPhase};
use crate::components::loading::LoadingIndicator;
use crate::components::header::AppHeader;
use crate::group_url::{self, use_group_url, GroupUrlPhase};
use crate::log::log_info;
use crate::system::{self, use_system};
use crate::web::router::use_router;
use crate::web::SessionStorage;
use machine::{evaluate, GuardInput, NavigationIntent, Rendering, SideEffect};

/// 登录后回跳路径的会话存储键
///
/// 只有守卫可以读写；规则 3 写入，规则 4 消费并清除。
pub const REDIRECT_PATH_KEY: &str = "groupvest_redirect_path";

/// 页面渲染选项
///
/// 由路由表为每个页面声明：是否带应用头部、
/// 是否全幅渲染（不套主题容器）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub header: bool,
    pub full_bleed: bool,
}

impl PageOptions {
    /// 带头部的常规主题页面
    pub fn themed() -> Self {
        Self {
            header: true,
            full_bleed: false,
        }
    }

    /// 无头部的全幅页面（登录/注册/404）
    pub fn bare() -> Self {
        Self {
            header: false,
            full_bleed: true,
        }
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::themed()
    }
}

/// 守卫进程级状态：重定向意向旗标
///
/// 在 App 根部提供一次，页面切换期间跨守卫实例存续。
#[derive(Clone, Copy)]
pub struct GuardContext {
    pub intent: RwSignal<NavigationIntent>,
}

impl GuardContext {
    pub fn new() -> Self {
        Self {
            intent: RwSignal::new(NavigationIntent::default()),
        }
    }
}

impl Default for GuardContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取守卫上下文
pub fn use_guard() -> GuardContext {
    use_context::<GuardContext>().expect("GuardContext should be provided")
}

/// 路由守卫组件
///
/// 包裹被路由的页面；渲染结果由守卫状态机裁决。
#[component]
pub fn RouteGuard(
    /// 页面渲染选项
    #[prop(optional)]
    options: PageOptions,
    /// 被包裹的页面
    children: ChildrenFn,
) -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let system_ctx = use_system();
    let group_ctx = use_group_url();
    let guard = use_guard();
    let api = use_context::<GroupVestApi>().expect("GroupVestApi should be provided");

    let rendering = RwSignal::new(Rendering::Loading);
    let listener_handle: StoredValue<Option<listener::AuthListenerHandle>, LocalStorage> =
        StoredValue::new_local(None);
    let prev_phase = StoredValue::new(AuthPhase::NotInitialized);

    Effect::new(move |_| {
        let route = router.current_route().get();
        let full_path = router.current_path_query().get();
        let session_state = auth.state.get();
        let system_state = system_ctx.state.get();
        let group_state = group_ctx.state.get();

        // 触发异步加载（重复调用为空操作）
        system::ensure_loaded(&system_ctx, &api);
        group_url::ensure_validated(&group_ctx, route.scope(), &api);

        // 登出时重置全部意向旗标
        let phase = session_state.phase;
        if prev_phase.get_value() == AuthPhase::Authenticated
            && phase == AuthPhase::Unauthenticated
        {
            guard.intent.set(NavigationIntent::default());
        }
        prev_phase.set_value(phase);

        // 群组校验出结果、或路由明确豁免认证时，挂接认证监听
        let group_resolved = matches!(
            group_state.phase,
            GroupUrlPhase::Validated | GroupUrlPhase::Failed
        );
        if (group_resolved || route.is_public_offer_view() || route.is_group_admin_route())
            && listener_handle.with_value(Option::is_none)
        {
            let handle = listener::attach_session_listener(auth, api.clone());
            listener_handle.set_value(Some(handle));
        }

        let pending = SessionStorage::get(REDIRECT_PATH_KEY);
        let default_group = system_state
            .attributes
            .as_ref()
            .and_then(|a| a.default_group_user_name.as_deref());
        let input = GuardInput {
            route: &route,
            full_path: &full_path,
            attrs: system_state.phase,
            group_url: &group_state,
            auth: phase,
            session: session_state.view(),
            pending_path: pending.as_deref(),
            default_group,
        };

        let verdict = evaluate(&input, guard.intent.get_untracked());

        if verdict.intent != guard.intent.get_untracked() {
            guard.intent.set(verdict.intent);
        }
        for effect in &verdict.effects {
            match effect {
                SideEffect::StorePendingPath(path) => {
                    SessionStorage::set(REDIRECT_PATH_KEY, path);
                }
                SideEffect::ClearPendingPath => {
                    SessionStorage::delete(REDIRECT_PATH_KEY);
                }
            }
        }
        match verdict.rendering {
            Rendering::Redirect(target) => {
                log_info!("[Guard] {} -> {}", full_path, target);
                // 重定向在途期间维持加载态，等待路由信号更新
                rendering.set(Rendering::Loading);
                router.replace(&target);
            }
            other => rendering.set(other),
        }
    });

    // 卸载时释放监听器句柄（计数归零则解除订阅）
    on_cleanup(move || listener_handle.set_value(None));

    move || match rendering.get() {
        Rendering::Page => {
            let container_class = if options.full_bleed {
                ""
            } else {
                "min-h-screen bg-base-200"
            };
            view! {
                <div class=container_class>
                    <Show when=move || options.header>
                        <AppHeader />
                    </Show>
                    {children()}
                </div>
            }
            .into_any()
        }
        _ => view! { <LoadingIndicator /> }.into_any(),
    }
}

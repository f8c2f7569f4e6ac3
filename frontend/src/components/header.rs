//! 应用头部
//!
//! 守卫在页面选项要求时渲染于页面之前。
//! 头部只通过路由服务导航，自己从不直接操作 History。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::auth::{self, use_auth, AuthPhase};
use crate::components::icons::LogOut;
use crate::system::use_system;
use crate::web::route::{
    construct_dashboard_route, construct_home_route, construct_sign_in_route,
};
use crate::web::router::use_router;

#[component]
pub fn AppHeader() -> impl IntoView {
    let router = use_router();
    let auth_ctx = use_auth();
    let system = use_system();
    let api = use_context::<GroupVestApi>().expect("GroupVestApi should be provided");

    let platform_name = move || {
        system
            .state
            .get()
            .attributes
            .map(|a| a.platform_name)
            .unwrap_or_else(|| "GroupVest".to_string())
    };

    let authenticated = move || auth_ctx.state.get().phase == AuthPhase::Authenticated;

    let on_home = move |_| {
        let state = auth_ctx.state.get_untracked();
        let route = router.current_route().get_untracked();
        router.navigate(&construct_home_route(route.scope(), &state.view()));
    };

    let on_dashboard = move |_| {
        let state = auth_ctx.state.get_untracked();
        let route = router.current_route().get_untracked();
        router.navigate(&construct_dashboard_route(route.scope(), &state.view()));
    };

    let on_sign_in = move |_| {
        let route = router.current_route().get_untracked();
        router.navigate(&construct_sign_in_route(route.scope()));
    };

    let api_stored = StoredValue::new(api);
    let on_sign_out = move |_| {
        let api = api_stored.get_value();
        spawn_local(async move {
            auth::sign_out(&auth_ctx, &api).await;
            // 跳转由守卫随认证状态变化处理
        });
    };

    view! {
        <div class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1 gap-2">
                <a class="btn btn-ghost text-xl" on:click=on_home>
                    {platform_name}
                </a>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=authenticated
                    fallback=move || {
                        view! {
                            <button class="btn btn-primary btn-sm" on:click=on_sign_in>
                                "登录"
                            </button>
                        }
                    }
                >
                    <button class="btn btn-ghost btn-sm" on:click=on_dashboard>
                        "我的面板"
                    </button>
                    <button class="btn btn-outline btn-error btn-sm gap-2" on:click=on_sign_out>
                        <LogOut attr:class="h-4 w-4" /> "退出"
                    </button>
                </Show>
            </div>
        </div>
    }
}

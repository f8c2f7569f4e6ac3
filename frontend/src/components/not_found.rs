use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::route::construct_home_route;
use crate::web::router::use_router;

/// 404 页面
///
/// 群组不存在、角色不符等所有校验/授权失败统一落在这里，
/// 不向终端用户区分"不存在"与"无权限"。
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let router = use_router();
    let auth = use_auth();

    let on_back = move |_| {
        let state = auth.state.get_untracked();
        router.navigate(&construct_home_route(None, &state.view()));
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"页面未找到"</p>
                <button class="btn btn-primary mt-6" on:click=on_back>
                    "返回首页"
                </button>
            </div>
        </div>
    }
}

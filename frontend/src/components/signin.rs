use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::auth::{self, use_auth};
use crate::components::icons::ShieldCheck;
use crate::web::route::construct_sign_up_route;
use crate::web::router::use_router;
use crate::web::LocalStorage;

/// 上次登录邮箱的本地存储键（方便自动填充，不存任何凭据）
const STORAGE_EMAIL_KEY: &str = "groupvest_email";

/// 登录页面
///
/// 成功后不在此跳转：守卫观察到认证状态变化，
/// 按规则消费回跳路径或计算角色对应的仪表盘。
#[component]
pub fn SignInPage() -> impl IntoView {
    let router = use_router();
    let auth_ctx = use_auth();
    let api = use_context::<GroupVestApi>().expect("GroupVestApi should be provided");
    let api_stored = StoredValue::new(api);

    // 加载上次的邮箱方便输入，密码从不落盘
    let (email, set_email) = signal(LocalStorage::get(STORAGE_EMAIL_KEY).unwrap_or_default());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("请填写邮箱与密码".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api_stored.get_value();
        spawn_local(async move {
            let success = auth::sign_in(&auth_ctx, &api, email.get_untracked(), password.get_untracked()).await;
            if success {
                LocalStorage::set(STORAGE_EMAIL_KEY, &email.get_untracked());
            } else {
                set_error_msg.set(Some("登录失败，请检查邮箱和密码".to_string()));
            }
            set_is_submitting.set(false);
        });
    };

    let on_sign_up = move |_| {
        let route = router.current_route().get_untracked();
        router.navigate(&construct_sign_up_route(route.scope(), None));
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"欢迎回来"</h1>
                        <p class="text-base-content/70">
                            "登录以访问你的投资面板"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@university.ac.uk"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                } else {
                                    "登录".into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-center mt-2">
                            <button type="button" class="link link-primary text-sm" on:click=on_sign_up>
                                "还没有账户？注册"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::auth::{self, use_auth};
use crate::system::use_system;
use crate::web::route::construct_sign_in_route;
use crate::web::router::use_router;
use groupvest_shared::protocol::SignUpRequest;
use groupvest_shared::UserRole;

/// 注册表单状态
///
/// 将零散的 signal 整合为结构体，负责数据的持有与
/// 到请求对象的转换。`RwSignal` 实现 `Copy`，适合作为整体传递。
#[derive(Clone, Copy)]
struct FormState {
    display_name: RwSignal<String>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    role: RwSignal<UserRole>,
}

impl FormState {
    fn new() -> Self {
        Self {
            display_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            role: RwSignal::new(UserRole::Investor),
        }
    }

    fn is_complete(&self) -> bool {
        !self.display_name.get().is_empty()
            && !self.email.get().is_empty()
            && !self.password.get().is_empty()
    }

    fn to_request(
        &self,
        group_user_name: Option<String>,
        invited_id: Option<String>,
    ) -> SignUpRequest {
        SignUpRequest {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            display_name: self.display_name.get_untracked(),
            role: self.role.get_untracked(),
            group_user_name,
            invited_id,
        }
    }
}

/// 注册页面
///
/// 受邀链接携带 `invited_id`；URL 的群组作用域随注册请求上送。
/// 平台关闭注册时只展示提示。成功后的跳转交给守卫。
#[component]
pub fn SignUpPage(
    #[prop(optional_no_strip)] invited_id: Option<String>,
) -> impl IntoView {
    let router = use_router();
    let auth_ctx = use_auth();
    let system = use_system();
    let api = use_context::<GroupVestApi>().expect("GroupVestApi should be provided");
    let api_stored = StoredValue::new(api);
    let invited = StoredValue::new(invited_id);

    let form = FormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let registration_open = move || {
        system
            .state
            .get()
            .attributes
            .map(|a| a.registration_open)
            .unwrap_or(true)
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.is_complete() {
            set_error_msg.set(Some("请完整填写所有字段".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let route = router.current_route().get_untracked();
        let group = route.scope().map(|s| s.group_user_name.clone());
        let request = form.to_request(group, invited.get_value());

        let api = api_stored.get_value();
        spawn_local(async move {
            let success = auth::sign_up(&auth_ctx, &api, request).await;
            if !success {
                set_error_msg.set(Some("注册失败，该邮箱可能已被使用".to_string()));
            }
            set_is_submitting.set(false);
        });
    };

    let on_sign_in = move |_| {
        let route = router.current_route().get_untracked();
        router.navigate(&construct_sign_in_route(route.scope()));
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"创建账户"</h1>

                <Show
                    when=registration_open
                    fallback=|| view! {
                        <div class="alert alert-warning">
                            <span>"平台当前未开放注册"</span>
                        </div>
                    }
                >
                    <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                        <form class="card-body" on:submit=on_submit>
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <div class="form-control">
                                <label class="label" for="display-name">
                                    <span class="label-text">"姓名"</span>
                                </label>
                                <input
                                    id="display-name"
                                    type="text"
                                    on:input=move |ev| form.display_name.set(event_target_value(&ev))
                                    prop:value=form.display_name
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="email">
                                    <span class="label-text">"邮箱"</span>
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    on:input=move |ev| form.email.set(event_target_value(&ev))
                                    prop:value=form.email
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
                                    on:input=move |ev| form.password.set(event_target_value(&ev))
                                    prop:value=form.password
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="role">
                                    <span class="label-text">"我是"</span>
                                </label>
                                <select
                                    id="role"
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.role.set(if value == "issuer" {
                                            UserRole::Issuer
                                        } else {
                                            UserRole::Investor
                                        });
                                    }
                                >
                                    <option value="investor" selected=true>"投资人"</option>
                                    <option value="issuer">"发行人（创始人）"</option>
                                </select>
                            </div>
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "注册中..." }.into_any()
                                    } else {
                                        "注册".into_any()
                                    }}
                                </button>
                            </div>
                            <div class="text-center mt-2">
                                <button type="button" class="link link-primary text-sm" on:click=on_sign_in>
                                    "已有账户？登录"
                                </button>
                            </div>
                        </form>
                    </div>
                </Show>
            </div>
        </div>
    }
}

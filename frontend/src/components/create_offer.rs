//! 创建项目页面
//!
//! `?edit=<projectID>` 进入编辑模式；
//! `?admin=<adminID>&issuer=<issuerID>` 供群组管理员代发行人建档。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::auth::use_auth;
use crate::web::route::{construct_project_detail_route, GroupScope, Query};
use crate::web::router::use_router;
use groupvest_shared::protocol::CreateOfferRequest;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在组件间整体传递。
#[derive(Clone, Copy)]
struct FormState {
    project_name: RwSignal<String>,
    description: RwSignal<String>,
    target_pounds: RwSignal<u64>,
}

impl FormState {
    fn new() -> Self {
        Self {
            project_name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            target_pounds: RwSignal::new(10_000),
        }
    }

    fn is_complete(&self) -> bool {
        !self.project_name.get().is_empty() && !self.description.get().is_empty()
    }

    /// 将表单状态转换为 API 请求对象
    fn to_request(&self, group_user_name: String, edit_project_id: Option<String>) -> CreateOfferRequest {
        CreateOfferRequest {
            group_user_name,
            project_name: self.project_name.get_untracked(),
            description: self.description.get_untracked(),
            target_amount_pence: self.target_pounds.get_untracked() * 100,
            edit_project_id,
        }
    }
}

#[component]
pub fn CreateOfferPage(scope: GroupScope) -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let api = use_context::<GroupVestApi>().expect("GroupVestApi should be provided");
    let api_stored = StoredValue::new(api);
    let scope_stored = StoredValue::new(scope.clone());

    let form = FormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 编辑模式：从查询串读取目标项目
    let edit_id = move || {
        let path_query = router.current_path_query().get();
        let query = path_query.split_once('?').map(|(_, q)| q).unwrap_or("");
        Query::parse(query).get("edit").map(str::to_string)
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.is_complete() {
            set_error_msg.set(Some("请填写项目名称与简介".to_string()));
            return;
        }
        let token = match auth.state.get_untracked().token {
            Some(token) => token,
            None => return,
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let scope = scope_stored.get_value();
        let request = form.to_request(scope.group_user_name.clone(), edit_id());
        let api = api_stored.get_value();
        spawn_local(async move {
            match api.create_offer(&token, request).await {
                Ok(summary) => {
                    router.navigate(&construct_project_detail_route(
                        Some(&scope),
                        &summary.project_id,
                    ));
                }
                Err(e) => {
                    set_error_msg.set(Some(format!("保存失败: {}", e)));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    let heading = move || {
        if edit_id().is_some() {
            "编辑项目"
        } else {
            "创建项目"
        }
    };

    view! {
        <div class="max-w-2xl mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h1 class="card-title text-2xl">{heading}</h1>

                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="project-name">
                            <span class="label-text">"项目名称"</span>
                        </label>
                        <input
                            id="project-name"
                            type="text"
                            on:input=move |ev| form.project_name.set(event_target_value(&ev))
                            prop:value=form.project_name
                            class="input input-bordered"
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="description">
                            <span class="label-text">"项目简介"</span>
                        </label>
                        <textarea
                            id="description"
                            rows="5"
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                            prop:value=form.description
                            class="textarea textarea-bordered"
                            required
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label class="label" for="target">
                            <span class="label-text">"目标金额 (£)"</span>
                        </label>
                        <input
                            id="target"
                            type="number"
                            min="1"
                            on:input=move |ev| {
                                if let Ok(v) = event_target_value(&ev).parse::<u64>() {
                                    form.target_pounds.set(v);
                                }
                            }
                            prop:value=move || form.target_pounds.get().to_string()
                            class="input input-bordered"
                            required
                        />
                    </div>
                    <div class="form-control mt-4">
                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "保存中..." }.into_any()
                            } else {
                                "保存".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

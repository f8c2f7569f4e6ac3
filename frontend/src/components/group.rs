use leptos::prelude::*;

use crate::components::offers::OffersList;
use crate::web::route::GroupScope;
use crate::web::router::use_router;

/// 群组详情页
///
/// 展示被查看群组的项目；`viewed_group` 来自路径参数，
/// 与当前作用域（`scope`）相互独立。
#[component]
pub fn GroupDetailPage(
    viewed_group: String,
    #[prop(optional_no_strip)] scope: Option<GroupScope>,
) -> impl IntoView {
    let router = use_router();
    let viewed = StoredValue::new(viewed_group);
    let _ = scope;

    let on_visit = move |_| {
        let slug = viewed.get_value();
        router.navigate(&format!("/groups/{}", slug));
    };

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">{move || viewed.get_value()}</h1>
                <button class="btn btn-outline btn-sm" on:click=on_visit>
                    "访问群组首页"
                </button>
            </div>
            <OffersList group_user_name=viewed.get_value() />
        </div>
    }
}

/// 资源详情页
///
/// 群组内共享的学习/尽调资源。
#[component]
pub fn ResourceDetailPage(
    resource_id: String,
    #[prop(optional_no_strip)] scope: Option<GroupScope>,
) -> impl IntoView {
    let _ = scope;
    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h1 class="card-title text-2xl">"资源"</h1>
                    <p class="text-base-content/70">{format!("资源编号: {}", resource_id)}</p>
                    <p>"该资源的内容由群组管理员维护。"</p>
                </div>
            </div>
        </div>
    }
}

//! 项目列表组件
//!
//! 首页与各仪表盘共用：按作用域加载项目并渲染为卡片列表。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::web::route::construct_project_detail_route;
use crate::web::router::use_router;
use groupvest_shared::{OfferStatus, OfferSummary};

fn status_badge(status: OfferStatus) -> &'static str {
    match status {
        OfferStatus::Live => "badge badge-success",
        OfferStatus::Draft => "badge badge-ghost",
        OfferStatus::Closed => "badge badge-neutral",
    }
}

fn status_label(status: OfferStatus) -> &'static str {
    match status {
        OfferStatus::Live => "募集中",
        OfferStatus::Draft => "草稿",
        OfferStatus::Closed => "已结束",
    }
}

#[component]
pub fn OffersList(
    /// 限定群组（None 为平台全部可见项目）
    #[prop(optional_no_strip, into)]
    group_user_name: Option<String>,
) -> impl IntoView {
    let router = use_router();
    let api = use_context::<GroupVestApi>().expect("GroupVestApi should be provided");

    let (offers, set_offers) = signal(Vec::<OfferSummary>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 挂载后加载一次
    let group = StoredValue::new(group_user_name);
    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            let group = group.get_value();
            set_loading.set(true);
            spawn_local(async move {
                match api.list_offers(group.as_deref()).await {
                    Ok(data) => set_offers.set(data),
                    Err(e) => set_error_msg.set(Some(format!("加载项目失败: {}", e))),
                }
                set_loading.set(false);
            });
        }
    });

    view! {
        <div class="space-y-4">
            <Show when=move || error_msg.get().is_some()>
                <div class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-8">
                        <span class="loading loading-spinner loading-md"></span>
                    </div>
                }
            >
                <Show
                    when=move || !offers.get().is_empty()
                    fallback=|| view! {
                        <p class="text-base-content/60 text-center py-8">"暂无项目"</p>
                    }
                >
                    <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                        <For
                            each=move || offers.get()
                            key=|offer| offer.project_id.clone()
                            children=move |offer: OfferSummary| {
                                let target = construct_project_detail_route(None, &offer.project_id);
                                let on_open = move |_| router.navigate(&target);
                                view! {
                                    <div class="card bg-base-100 shadow hover:shadow-lg transition-shadow cursor-pointer" on:click=on_open>
                                        <div class="card-body">
                                            <h2 class="card-title">{offer.project_name.clone()}</h2>
                                            <p class="text-sm text-base-content/70">
                                                {offer.issuer_display_name.clone()}
                                                " · "
                                                {offer.group_user_name.clone()}
                                            </p>
                                            <div class="card-actions justify-between items-center">
                                                <span class=status_badge(offer.status)>
                                                    {status_label(offer.status)}
                                                </span>
                                                <span class="text-xs text-base-content/50">
                                                    {offer.posted_date.format("%Y-%m-%d").to_string()}
                                                </span>
                                            </div>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

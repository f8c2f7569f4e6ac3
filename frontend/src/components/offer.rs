use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::web::route::{construct_home_route, GroupScope};
use crate::web::router::use_router;
use groupvest_shared::OfferDetails;

/// 公开项目页
///
/// 无需认证即可访问；守卫对该路由豁免认证初始化等待。
#[component]
pub fn OfferDetailPage(
    project_id: String,
    #[prop(optional_no_strip)] scope: Option<GroupScope>,
) -> impl IntoView {
    let router = use_router();
    let api = use_context::<GroupVestApi>().expect("GroupVestApi should be provided");

    let (offer, set_offer) = signal(Option::<OfferDetails>::None);
    let (loading, set_loading) = signal(true);

    let project = StoredValue::new(project_id);
    let scope_stored = StoredValue::new(scope);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            let id = project.get_value();
            spawn_local(async move {
                match api.fetch_offer(&id).await {
                    Ok(details) => set_offer.set(Some(details)),
                    Err(_) => set_offer.set(None),
                }
                set_loading.set(false);
            });
        }
    });

    let on_back = move |_| {
        let scope = scope_stored.get_value();
        router.navigate(&construct_home_route(scope.as_ref(), &Default::default()));
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }
            >
                {move || match offer.get() {
                    Some(details) => {
                        let raised = details.raised_amount_pence;
                        let target = details.target_amount_pence.max(1);
                        let percent = (raised * 100 / target).min(100);
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body space-y-4">
                                    <h1 class="card-title text-3xl">{details.summary.project_name.clone()}</h1>
                                    <p class="text-base-content/70">
                                        {details.summary.issuer_display_name.clone()}
                                        " · "
                                        {details.summary.group_user_name.clone()}
                                    </p>
                                    <p>{details.description.clone()}</p>
                                    <div>
                                        <div class="flex justify-between text-sm mb-1">
                                            <span>{format!("£{:.2}", raised as f64 / 100.0)}</span>
                                            <span class="text-base-content/60">
                                                {format!("目标 £{:.2}", details.target_amount_pence as f64 / 100.0)}
                                            </span>
                                        </div>
                                        <progress class="progress progress-primary w-full" value=percent.to_string() max="100"></progress>
                                    </div>
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                    None => view! {
                        <div class="text-center py-16">
                            <p class="text-xl">"该项目不存在或已下线"</p>
                            <button class="btn btn-primary mt-4" on:click=on_back>
                                "返回首页"
                            </button>
                        </div>
                    }
                    .into_any(),
                }}
            </Show>
        </div>
    }
}

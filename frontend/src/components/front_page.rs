use leptos::prelude::*;

use crate::components::offers::OffersList;
use crate::system::use_system;
use crate::web::route::GroupScope;

/// 首页（全局 / 群组 / 课程）
///
/// 公开页面：展示平台（或群组）名称与可见项目列表。
#[component]
pub fn FrontPage(
    #[prop(optional_no_strip)] scope: Option<GroupScope>,
) -> impl IntoView {
    let system = use_system();
    let scope_stored = StoredValue::new(scope);

    let heading = move || match scope_stored.get_value() {
        Some(s) => match s.course_user_name {
            Some(course) => format!("{} / {}", s.group_user_name, course),
            None => s.group_user_name,
        },
        None => system
            .state
            .get()
            .attributes
            .map(|a| a.platform_name)
            .unwrap_or_else(|| "GroupVest".to_string()),
    };

    let group_filter = move || scope_stored.get_value().map(|s| s.group_user_name);

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-8">
            <div class="hero bg-base-100 rounded-box shadow-xl py-12">
                <div class="hero-content text-center">
                    <div>
                        <h1 class="text-4xl font-bold">{heading}</h1>
                        <p class="py-4 text-base-content/70">
                            "发现并支持来自你的社区的投资机会"
                        </p>
                    </div>
                </div>
            </div>

            <div>
                <h2 class="text-2xl font-semibold mb-4">"最新项目"</h2>
                <OffersList group_user_name=group_filter() />
            </div>
        </div>
    }
}

use leptos::prelude::*;

/// 全屏加载指示器
///
/// 守卫在任一输入状态未就绪、或重定向在途时渲染。
#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

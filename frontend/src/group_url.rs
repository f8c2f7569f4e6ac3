//! 群组 URL 校验模块
//!
//! 每次导航都要回答：URL 中的 `:groupUserName` / `:courseUserName`
//! 是否指向一个真实、可达的群组。结果以导航为粒度缓存；
//! 作用域变化时重新发起校验，过期的响应被丢弃。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::log::log_info;
use crate::web::route::GroupScope;
use groupvest_shared::ValidatedGroupUrl;

/// 校验阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupUrlPhase {
    #[default]
    NotStarted,
    Validating,
    Validated,
    Failed,
}

/// 群组 URL 校验状态
#[derive(Clone, Default, PartialEq)]
pub struct GroupUrlState {
    pub phase: GroupUrlPhase,
    /// 校验成功时解析出的群组链（全局路由时为 None）
    pub resolved: Option<ValidatedGroupUrl>,
    /// 最近一次发起校验的作用域；Some(None) 表示全局路由已"校验"
    requested: Option<Option<GroupScope>>,
}

impl GroupUrlState {
    /// 以给定阶段构造状态（守卫评估的输入快照用）
    #[cfg(test)]
    pub fn with_phase(phase: GroupUrlPhase) -> Self {
        Self {
            phase,
            resolved: None,
            requested: None,
        }
    }
}

/// 群组 URL 校验上下文
#[derive(Clone, Copy)]
pub struct GroupUrlContext {
    pub state: ReadSignal<GroupUrlState>,
    pub set_state: WriteSignal<GroupUrlState>,
}

impl GroupUrlContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(GroupUrlState::default());
        Self { state, set_state }
    }
}

impl Default for GroupUrlContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取群组校验上下文
pub fn use_group_url() -> GroupUrlContext {
    use_context::<GroupUrlContext>().expect("GroupUrlContext should be provided")
}

/// 为当前导航的作用域发起校验（同一作用域重复调用为空操作）
///
/// 无作用域的路由立即视为已校验；带作用域的路由进入 Validating，
/// 响应返回时若作用域已经变化则丢弃结果。
pub fn ensure_validated(ctx: &GroupUrlContext, scope: Option<&GroupScope>, api: &GroupVestApi) {
    let want = scope.cloned();
    if ctx.state.get_untracked().requested.as_ref() == Some(&want) {
        return;
    }

    let set_state = ctx.set_state;
    let scope = match want.clone() {
        None => {
            set_state.set(GroupUrlState {
                phase: GroupUrlPhase::Validated,
                resolved: None,
                requested: Some(None),
            });
            return;
        }
        Some(scope) => scope,
    };

    set_state.set(GroupUrlState {
        phase: GroupUrlPhase::Validating,
        resolved: None,
        requested: Some(want.clone()),
    });

    let api = api.clone();
    spawn_local(async move {
        let result = api
            .validate_group_url(
                &scope.group_user_name,
                scope.course_user_name.as_deref(),
            )
            .await;

        set_state.update(|state| {
            // 校验期间作用域变化，丢弃过期响应
            if state.requested.as_ref() != Some(&want) {
                return;
            }
            match result {
                Ok(resolved) => {
                    state.phase = GroupUrlPhase::Validated;
                    state.resolved = Some(resolved);
                }
                Err(e) => {
                    log_info!("[GroupUrl] 校验失败 {}: {}", scope.prefix(), e);
                    state.phase = GroupUrlPhase::Failed;
                    state.resolved = None;
                }
            }
        });
    });
}

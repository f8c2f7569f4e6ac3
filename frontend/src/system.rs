//! 系统属性模块
//!
//! 平台全局配置的加载状态。整个进程只加载一次；
//! 加载失败不会阻塞守卫（视为已加载、无属性），仅记录日志。

use groupvest_shared::SystemAttributes;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GroupVestApi;
use crate::log::log_error;

/// 系统属性加载阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttrsPhase {
    #[default]
    Loading,
    Loaded,
}

/// 系统属性状态
#[derive(Clone, Default, PartialEq)]
pub struct SystemState {
    pub phase: AttrsPhase,
    pub attributes: Option<SystemAttributes>,
    /// 加载是否已触发（幂等闩，避免重复请求）
    started: bool,
}

/// 系统属性上下文
#[derive(Clone, Copy)]
pub struct SystemContext {
    pub state: ReadSignal<SystemState>,
    pub set_state: WriteSignal<SystemState>,
}

impl SystemContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SystemState::default());
        Self { state, set_state }
    }
}

impl Default for SystemContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取系统属性上下文
pub fn use_system() -> SystemContext {
    use_context::<SystemContext>().expect("SystemContext should be provided")
}

/// 触发一次全局配置加载（重复调用为空操作）
pub fn ensure_loaded(ctx: &SystemContext, api: &GroupVestApi) {
    if ctx.state.get_untracked().started {
        return;
    }
    ctx.set_state.update(|s| s.started = true);

    let api = api.clone();
    let set_state = ctx.set_state;
    spawn_local(async move {
        match api.fetch_system_attributes().await {
            Ok(attrs) => set_state.update(|s| {
                s.phase = AttrsPhase::Loaded;
                s.attributes = Some(attrs);
            }),
            Err(e) => {
                // 配置不可达时守卫按默认配置继续，不能永远停在加载态
                log_error!("[System] 系统属性加载失败: {}", e);
                set_state.update(|s| s.phase = AttrsPhase::Loaded);
            }
        }
    });
}

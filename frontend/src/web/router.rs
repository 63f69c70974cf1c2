//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 守卫判定注入的是会话状态信号（而不是布尔值）：
//! Initializing 阶段暂停导航判定，之后每次状态变化都重新判定。

use leptos::prelude::*;
use sanamente_shared::session::SessionPhase;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardCheck, check};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    phase: Signal<SessionPhase>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `phase` - 会话状态信号，由外部注入实现解耦
    fn new(phase: Signal<SessionPhase>) -> Self {
        // 初始化当前路由（从 URL 解析）
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            phase,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 按路径导航
    pub fn navigate_path(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let resolved = self
            .phase
            .with_untracked(|phase| resolve(target_route, phase));

        if resolved != target_route {
            web_sys::console::log_1(
                &format!("[Router] guard redirect: {} -> {}", target_route, resolved).into(),
            );
        }

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let phase = self.phase;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 时也执行守卫逻辑
            let resolved = phase.with_untracked(|p| resolve(target_route, p));
            if resolved != target_route {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    ///
    /// 登出时如果正停留在受保护页面，必须立即跳转到登录页；
    /// 登录后如果正停留在登录页，跳转到首页。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let phase = self.phase;

        // 使用 Effect 监听会话状态变化
        Effect::new(move |_| {
            let snapshot = phase.get();
            let route = current_route.get_untracked();

            match check(route, &snapshot) {
                GuardCheck::RedirectToLogin => {
                    let redirect = AppRoute::auth_failure_redirect();
                    push_history_state(redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] session ended, redirecting to login.".into(),
                    );
                }
                GuardCheck::RedirectToHome => {
                    let redirect = AppRoute::auth_success_redirect();
                    push_history_state(redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] session established, redirecting home.".into(),
                    );
                }
                GuardCheck::Allow | GuardCheck::Pending => {}
            }
        });
    }
}

/// 守卫解析：目标路由在当前状态下实际应渲染的路由
///
/// Pending（首次检查未完成）时保留目标路由，由布局层显示加载占位。
fn resolve(target: AppRoute, phase: &SessionPhase) -> AppRoute {
    match check(target, phase) {
        GuardCheck::Allow | GuardCheck::Pending => target,
        GuardCheck::RedirectToLogin => AppRoute::auth_failure_redirect(),
        GuardCheck::RedirectToHome => AppRoute::auth_success_redirect(),
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(phase: Signal<SessionPhase>) -> RouterService {
    let router = RouterService::new(phase);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    phase: Signal<SessionPhase>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(phase);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、守卫属性以及守卫判定。

use sanamente_shared::session::SessionPhase;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页（需要认证，默认路由）
    #[default]
    Home,
    /// 登录/注册页（仅匿名可见）
    Login,
    /// 进度图表页（需要认证）
    Progress,
    /// 记录前的呼吸过渡页（需要认证）
    MoodTimer,
    /// 心情记录表单（需要认证）
    MoodRecord,
    /// 自定义参数管理（需要认证）
    Parameters,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/progress" => Self::Progress,
            "/mood/timer" => Self::MoodTimer,
            "/mood/record" => Self::MoodRecord,
            "/parameters" => Self::Parameters,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Progress => "/progress",
            Self::MoodTimer => "/mood/timer",
            Self::MoodRecord => "/mood/record",
            Self::Parameters => "/parameters",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫属性：该路由是否只对已认证会话开放**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::Progress | Self::MoodTimer | Self::MoodRecord | Self::Parameters
        )
    }

    /// 该路由是否只对匿名会话开放（如登录页）
    pub fn guest_only(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已认证用户访问匿名页时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 守卫判定
// =========================================================

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardCheck {
    /// 正常渲染目标路由
    Allow,
    /// 首次认证检查未完成：显示加载占位，暂停一切导航判定
    Pending,
    /// 重定向到登录页
    RedirectToLogin,
    /// 重定向到首页
    RedirectToHome,
}

/// 计算某个路由在当前会话状态下的守卫结果
///
/// Initializing 状态下绝不重定向——此时"没有用户"还不等于"未登录"。
/// 每次会话状态变化都必须重新判定：在受保护页面上登出要立即跳转。
pub fn check(route: AppRoute, phase: &SessionPhase) -> GuardCheck {
    if phase.is_loading() && (route.requires_auth() || route.guest_only()) {
        return GuardCheck::Pending;
    }
    if route.requires_auth() && !phase.is_authenticated() {
        return GuardCheck::RedirectToLogin;
    }
    if route.guest_only() && phase.is_authenticated() {
        return GuardCheck::RedirectToHome;
    }
    GuardCheck::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanamente_shared::User;

    fn authenticated() -> SessionPhase {
        SessionPhase::Authenticated(User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            name: "Ana".to_string(),
        })
    }

    #[test]
    fn test_path_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Progress,
            AppRoute::MoodTimer,
            AppRoute::MoodRecord,
            AppRoute::Parameters,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/no-existe"), AppRoute::NotFound);
    }

    #[test]
    fn test_protected_route_redirects_iff_anonymous() {
        // Anonymous -> 重定向到登录
        assert_eq!(
            check(AppRoute::Progress, &SessionPhase::Anonymous),
            GuardCheck::RedirectToLogin
        );
        // Authenticated -> 放行
        assert_eq!(
            check(AppRoute::Progress, &authenticated()),
            GuardCheck::Allow
        );
    }

    #[test]
    fn test_never_redirects_while_initializing() {
        assert_eq!(
            check(AppRoute::Home, &SessionPhase::Initializing),
            GuardCheck::Pending
        );
        assert_eq!(
            check(AppRoute::Login, &SessionPhase::Initializing),
            GuardCheck::Pending
        );
    }

    #[test]
    fn test_guest_route_redirects_iff_authenticated() {
        assert_eq!(
            check(AppRoute::Login, &authenticated()),
            GuardCheck::RedirectToHome
        );
        assert_eq!(
            check(AppRoute::Login, &SessionPhase::Anonymous),
            GuardCheck::Allow
        );
    }

    #[test]
    fn test_logout_transition_triggers_redirect() {
        // 登出后立即重新判定：不存在中间的已认证渲染
        let route = AppRoute::MoodRecord;
        assert_eq!(check(route, &authenticated()), GuardCheck::Allow);
        assert_eq!(
            check(route, &SessionPhase::Anonymous),
            GuardCheck::RedirectToLogin
        );
    }

    #[test]
    fn test_not_found_is_public() {
        assert_eq!(
            check(AppRoute::NotFound, &SessionPhase::Anonymous),
            GuardCheck::Allow
        );
        assert_eq!(
            check(AppRoute::NotFound, &SessionPhase::Initializing),
            GuardCheck::Allow
        );
    }
}

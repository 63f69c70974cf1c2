//! Sanamente 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫判定（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: 外部记录存储（BaaS）客户端
//! - `components`: UI 组件层

pub mod api;
mod auth;
mod components {
    pub mod chart;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod mood_record;
    pub mod mood_timer;
    pub mod parameters;
    pub mod progress;
}

use crate::api::{BACKEND_URL, RecordApi};
use crate::auth::{AuthContext, init_auth};
use crate::components::home::HomePage;
use crate::components::layout::{AuthLayout, GuestLayout};
use crate::components::login::LoginPage;
use crate::components::mood_record::MoodRecordPage;
use crate::components::mood_timer::MoodTimerPage;
use crate::components::parameters::ParametersPage;
use crate::components::progress::ProgressPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::HttpClient;
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，
/// 受保护页面包在 AuthLayout 里，登录页包在 GuestLayout 里。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! {
            <GuestLayout>
                <LoginPage />
            </GuestLayout>
        }
        .into_any(),
        AppRoute::Home => view! {
            <AuthLayout>
                <HomePage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::Progress => view! {
            <AuthLayout>
                <ProgressPage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::MoodTimer => view! {
            <AuthLayout>
                <MoodTimerPage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::MoodRecord => view! {
            <AuthLayout>
                <MoodRecordPage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::Parameters => view! {
            <AuthLayout>
                <ParametersPage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-background">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-destructive">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new(RecordApi::new(BACKEND_URL));
    provide_context(auth_ctx.clone());

    // 2. 初始化认证状态（订阅存储变更 + 从 LocalStorage 加载缓存会话）
    init_auth(&auth_ctx);

    // 3. 获取会话状态信号，用于注入路由服务（解耦！）
    let phase = auth_ctx.phase_signal();

    view! {
        // 4. 路由器组件：注入会话状态信号实现守卫
        <Router phase=phase>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}

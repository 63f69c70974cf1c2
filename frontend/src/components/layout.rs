//! 布局守卫组件
//!
//! 两个对称的包装组件，围绕会话状态机做渲染决策：
//! - `AuthLayout`: 只放行已认证会话
//! - `GuestLayout`: 只放行匿名会话
//!
//! Initializing 阶段两者都只渲染加载占位。跳转本身由路由服务
//! 监听状态变化统一处理（单一来源，避免重复压入历史记录）；
//! 布局只负责在跳转生效前渲染空视图。

use crate::auth::use_auth;
use crate::components::icons::{BarChart, Brain, House, LogOut, SlidersHorizontal};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use sanamente_shared::session::SessionPhase;

/// 加载占位
#[component]
fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen">
            <p class="text-blue-600 font-bold animate-pulse">"Cargando..."</p>
        </div>
    }
}

/// 受保护区域布局
///
/// 已认证时渲染应用外壳（顶栏 + 底部导航）和嵌套内容。
#[component]
pub fn AuthLayout(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let phase = auth.phase();

    let logout_ctx = auth.clone();
    let on_logout = move |_| {
        logout_ctx.logout();
    };

    move || match phase.get() {
        SessionPhase::Initializing => view! { <LoadingScreen /> }.into_any(),
        SessionPhase::Anonymous => view! { <></> }.into_any(),
        SessionPhase::Authenticated(user) => {
            let display_name = user.display_name().to_string();
            let on_logout = on_logout.clone();
            view! {
                <div class="flex flex-col min-h-screen">
                    <header class="sticky top-0 z-40 w-full border-b bg-background/95 backdrop-blur">
                        <div class="container flex items-center justify-between h-16 max-w-5xl mx-auto px-4">
                            <a
                                class="flex items-center gap-2 text-lg font-bold cursor-pointer"
                                on:click=move |_| router.navigate(AppRoute::Home)
                            >
                                <Brain attr:class="w-6 h-6 text-primary" />
                                <span>"Sanamente"</span>
                            </a>
                            <div class="flex items-center gap-4">
                                <span class="hidden sm:inline text-sm text-muted-foreground">
                                    {display_name}
                                </span>
                                <button
                                    on:click=on_logout
                                    class="flex items-center gap-2 px-3 py-2 text-sm rounded-md hover:bg-accent"
                                >
                                    <LogOut attr:class="w-4 h-4" />
                                    "Cerrar Sesión"
                                </button>
                            </div>
                        </div>
                    </header>

                    <main class="flex-1 w-full max-w-5xl mx-auto px-4 py-8 pb-24">
                        {children()}
                    </main>

                    <nav class="fixed bottom-0 left-0 right-0 md:hidden border-t bg-background/95 backdrop-blur">
                        <div class="grid h-16 grid-cols-3 max-w-full mx-auto">
                            <NavItem route=AppRoute::Home label="Inicio">
                                <House attr:class="w-6 h-6" />
                            </NavItem>
                            <NavItem route=AppRoute::Progress label="Progreso">
                                <BarChart attr:class="w-6 h-6" />
                            </NavItem>
                            <NavItem route=AppRoute::Parameters label="Parámetros">
                                <SlidersHorizontal attr:class="w-6 h-6" />
                            </NavItem>
                        </div>
                    </nav>
                </div>
            }
            .into_any()
        }
    }
}

/// 底部导航项
#[component]
fn NavItem(route: AppRoute, label: &'static str, children: ChildrenFn) -> impl IntoView {
    let router = use_router();
    let class = move || {
        if router.current_route().get() == route {
            "flex flex-col items-center justify-center gap-1 text-xs font-medium text-primary"
        } else {
            "flex flex-col items-center justify-center gap-1 text-xs font-medium text-muted-foreground"
        }
    };
    view! {
        <a class=class on:click=move |_| router.navigate(route)>
            {children()}
            <span>{label}</span>
        </a>
    }
}

/// 匿名区域布局（登录页）
#[component]
pub fn GuestLayout(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let phase = auth.phase();

    move || match phase.get() {
        SessionPhase::Initializing => view! { <LoadingScreen /> }.into_any(),
        SessionPhase::Authenticated(_) => view! { <></> }.into_any(),
        SessionPhase::Anonymous => children().into_any(),
    }
}

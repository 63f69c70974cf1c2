//! 首页：问候语、快速记录入口、进度/日记卡片

use crate::auth::use_auth;
use crate::components::icons::{Calendar, Frown, Meh, PenSquare, Smile};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

/// 按当前时刻返回问候语
fn greeting() -> &'static str {
    let hour = js_sys::Date::new_0().get_hours();
    if hour < 12 {
        "Buenos días"
    } else if hour < 18 {
        "Buenas tardes"
    } else {
        "Buenas noches"
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let name = auth
        .current_user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "Usuario".to_string());

    view! {
        <div class="space-y-8">
            <header>
                <h1 class="text-3xl font-bold">{format!("{}, {}!", greeting(), name)}</h1>
                <p class="text-muted-foreground">"¿Cómo te sientes hoy?"</p>
            </header>

            // 快速记录：任一心情入口都先经过呼吸过渡页
            <div class="bg-card p-6 rounded-lg shadow-sm">
                <div class="flex items-center gap-4 mb-4">
                    <Smile attr:class="w-8 h-8 text-primary" />
                    <h2 class="text-xl font-semibold text-card-foreground">
                        "Registro Rápido de Ánimo"
                    </h2>
                </div>
                <p class="mb-4 text-muted-foreground">
                    "Selecciona cómo te sientes ahora mismo."
                </p>
                <div class="flex justify-around gap-4">
                    <a
                        class="flex flex-col items-center gap-2 p-4 rounded-lg hover:bg-accent cursor-pointer"
                        on:click=move |_| router.navigate(AppRoute::MoodTimer)
                    >
                        <Smile attr:class="w-10 h-10 text-green-500" />
                        <span class="font-medium">"Positivo"</span>
                    </a>
                    <a
                        class="flex flex-col items-center gap-2 p-4 rounded-lg hover:bg-accent cursor-pointer"
                        on:click=move |_| router.navigate(AppRoute::MoodTimer)
                    >
                        <Meh attr:class="w-10 h-10 text-yellow-500" />
                        <span class="font-medium">"Neutral"</span>
                    </a>
                    <a
                        class="flex flex-col items-center gap-2 p-4 rounded-lg hover:bg-accent cursor-pointer"
                        on:click=move |_| router.navigate(AppRoute::MoodTimer)
                    >
                        <Frown attr:class="w-10 h-10 text-red-500" />
                        <span class="font-medium">"Negativo"</span>
                    </a>
                </div>
            </div>

            <div class="grid md:grid-cols-2 gap-8">
                <div class="bg-card p-6 rounded-lg shadow-sm">
                    <div class="flex items-center gap-4 mb-4">
                        <Calendar attr:class="w-8 h-8 text-primary" />
                        <h2 class="text-xl font-semibold text-card-foreground">"Tu Progreso"</h2>
                    </div>
                    <p class="mb-4 text-muted-foreground">
                        "Revisa tus registros de ánimo y observa tu evolución."
                    </p>
                    <button
                        class="inline-flex items-center justify-center w-full px-4 py-2 font-medium text-primary-foreground bg-primary rounded-md shadow-sm hover:bg-primary/90"
                        on:click=move |_| router.navigate(AppRoute::Progress)
                    >
                        "Ver Progreso"
                    </button>
                </div>

                <div class="bg-card p-6 rounded-lg shadow-sm">
                    <div class="flex items-center gap-4 mb-4">
                        <PenSquare attr:class="w-8 h-8 text-primary" />
                        <h2 class="text-xl font-semibold text-card-foreground">
                            "Diario Personal"
                        </h2>
                    </div>
                    <p class="mb-4 text-muted-foreground">
                        "Reflexiona sobre tu día. Escribe tus pensamientos y sentimientos."
                    </p>
                    <button
                        class="inline-flex items-center justify-center w-full px-4 py-2 font-medium text-primary-foreground bg-primary rounded-md shadow-sm hover:bg-primary/90"
                        on:click=move |_| router.navigate(AppRoute::MoodRecord)
                    >
                        "Escribir en el Diario"
                    </button>
                </div>
            </div>
        </div>
    }
}

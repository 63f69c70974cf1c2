//! 记录前的呼吸过渡页：停留 3 秒后进入记录表单
//!
//! 定时器随组件卸载取消；回调触发时还要确认用户仍停留在
//! 本页——提前离开（底部导航、后退键）后不得被拽回记录表单。

use crate::components::icons::Wind;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use std::time::Duration;

const BREATHING_PAUSE: Duration = Duration::from_secs(3);

/// 定时器到点后的导航目标
///
/// 只有仍在过渡页时才导航，其余情况返回 None（什么都不做）。
fn timer_destination(current: AppRoute) -> Option<AppRoute> {
    if current == AppRoute::MoodTimer {
        Some(AppRoute::MoodRecord)
    } else {
        None
    }
}

#[component]
pub fn MoodTimerPage() -> impl IntoView {
    let router = use_router();

    let timer = set_timeout_with_handle(
        move || {
            if let Some(target) = timer_destination(router.current_route().get_untracked()) {
                router.navigate(target);
            }
        },
        BREATHING_PAUSE,
    );
    if let Ok(handle) = timer {
        on_cleanup(move || handle.clear());
    }

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <Wind attr:class="w-12 h-12 mb-6 text-primary animate-pulse" />
            <h1 class="text-2xl font-bold mb-4">"Tómate un momento para respirar"</h1>
            <p class="text-lg text-muted-foreground">
                "Prepárate para registrar tu estado de ánimo."
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_only_on_breathing_page() {
        assert_eq!(
            timer_destination(AppRoute::MoodTimer),
            Some(AppRoute::MoodRecord)
        );
    }

    #[test]
    fn test_timer_is_inert_after_leaving() {
        // 用户提前离开后定时器到点不再导航
        assert_eq!(timer_destination(AppRoute::Home), None);
        assert_eq!(timer_destination(AppRoute::Progress), None);
        assert_eq!(timer_destination(AppRoute::MoodRecord), None);
        assert_eq!(timer_destination(AppRoute::Login), None);
    }
}

//! 内联 SVG 图标组件（lucide 线条风格）
//!
//! 尺寸与颜色由调用方通过 `attr:class` 控制。

use leptos::prelude::*;

macro_rules! icon {
    ($(#[$meta:meta])* $name:ident, $($path:expr),+ $(,)?) => {
        $(#[$meta])*
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    $(<path d=$path />)+
                </svg>
            }
        }
    };
}

icon!(
    /// 应用标志
    Brain,
    "M9.5 2A2.5 2.5 0 0 1 12 4.5v15a2.5 2.5 0 0 1-4.96.44 2.5 2.5 0 0 1-2.96-3.08 3 3 0 0 1-.34-5.58 2.5 2.5 0 0 1 1.32-4.24 2.5 2.5 0 0 1 1.98-3A2.5 2.5 0 0 1 9.5 2Z",
    "M14.5 2A2.5 2.5 0 0 0 12 4.5v15a2.5 2.5 0 0 0 4.96.44 2.5 2.5 0 0 0 2.96-3.08 3 3 0 0 0 .34-5.58 2.5 2.5 0 0 0-1.32-4.24 2.5 2.5 0 0 0-1.98-3A2.5 2.5 0 0 0 14.5 2Z",
);

icon!(
    Smile,
    "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20Z",
    "M8 14s1.5 2 4 2 4-2 4-2",
    "M9 9h.01",
    "M15 9h.01",
);

icon!(
    Meh,
    "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20Z",
    "M8 15h8",
    "M9 9h.01",
    "M15 9h.01",
);

icon!(
    Frown,
    "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20Z",
    "M16 16s-1.5-2-4-2-4 2-4 2",
    "M9 9h.01",
    "M15 9h.01",
);

icon!(
    Moon,
    "M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z",
);

icon!(
    Calendar,
    "M8 2v4",
    "M16 2v4",
    "M5 4h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2Z",
    "M3 10h18",
);

icon!(
    PenSquare,
    "M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7",
    "M18.375 2.625a2.121 2.121 0 1 1 3 3L12 15l-4 1 1-4Z",
);

icon!(
    BarChart,
    "M12 20V10",
    "M18 20V4",
    "M6 20v-4",
);

icon!(
    ListTodo,
    "M3 17l2 2 4-4",
    "M3 7l2 2 4-4",
    "M13 6h8",
    "M13 12h8",
    "M13 18h8",
);

icon!(
    House,
    "M3 10.182V22h18V10.182L12 2Z",
    "M9 22v-8h6v8",
);

icon!(
    LogOut,
    "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4",
    "M16 17l5-5-5-5",
    "M21 12H9",
);

icon!(
    Plus,
    "M5 12h14",
    "M12 5v14",
);

icon!(
    Trash2,
    "M3 6h18",
    "M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6",
    "M8 6V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2",
    "M10 11v6",
    "M14 11v6",
);

icon!(
    Wind,
    "M17.7 7.7a2.5 2.5 0 1 1 1.8 4.3H2",
    "M9.6 4.6A2 2 0 1 1 11 8H2",
    "M12.6 19.4A2 2 0 1 0 14 16H2",
);

icon!(
    SlidersHorizontal,
    "M21 4h-7",
    "M10 4H3",
    "M21 12h-9",
    "M8 12H3",
    "M21 20h-5",
    "M12 20H3",
    "M14 2v4",
    "M8 10v4",
    "M16 18v4",
);

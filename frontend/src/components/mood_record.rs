//! 心情记录表单
//!
//! 记录只有创建和列表两条路径，没有编辑：表单提交成功后
//! 直接跳转进度页。自定义参数是稀疏的——未勾选的参数
//! 不写入 `custom_parameters_data`，聚合时表现为空档。

use crate::api::{ApiError, owner_filter};
use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sanamente_shared::{
    COLLECTION_CUSTOM_PARAMETERS, COLLECTION_MOOD_RECORDS, CustomParameter, MoodRecord,
    NewMoodRecord,
};
use std::collections::BTreeMap;

const POSITIVE_EMOTIONS: [&str; 6] = [
    "Feliz",
    "Agradecido",
    "Contento",
    "Relajado",
    "Inspirado",
    "Optimista",
];
const NEGATIVE_EMOTIONS: [&str; 6] = [
    "Triste",
    "Ansioso",
    "Enojado",
    "Estresado",
    "Cansado",
    "Irritable",
];

/// 新勾选参数的初始值
const DEFAULT_PARAMETER_VALUE: u8 = 5;

// =========================================================
// 表单状态
// =========================================================

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在闭包间传递。
#[derive(Clone, Copy)]
struct FormState {
    mood: RwSignal<u8>,
    sleep: RwSignal<f64>,
    positive: RwSignal<Vec<String>>,
    negative: RwSignal<Vec<String>>,
    thoughts: RwSignal<String>,
    /// 勾选的自定义参数及其值（未勾选 = 不记录 = 空档）
    custom: RwSignal<BTreeMap<String, u8>>,
}

impl FormState {
    fn new() -> Self {
        Self {
            mood: RwSignal::new(5),
            sleep: RwSignal::new(8.0),
            positive: RwSignal::new(Vec::new()),
            negative: RwSignal::new(Vec::new()),
            thoughts: RwSignal::new(String::new()),
            custom: RwSignal::new(BTreeMap::new()),
        }
    }

    /// 在列表中切换一种情绪
    fn toggle_emotion(list: RwSignal<Vec<String>>, emotion: &str) {
        list.update(|values| {
            if let Some(index) = values.iter().position(|e| e == emotion) {
                values.remove(index);
            } else {
                values.push(emotion.to_string());
            }
        });
    }

    /// 切换一个自定义参数是否记录
    fn toggle_parameter(&self, name: &str) {
        self.custom.update(|map| {
            if map.remove(name).is_none() {
                map.insert(name.to_string(), DEFAULT_PARAMETER_VALUE);
            }
        });
    }

    /// 将表单状态转换为创建请求
    fn to_entry(&self, user_id: &str, date: String) -> NewMoodRecord {
        NewMoodRecord {
            user: user_id.to_string(),
            date,
            mood_level: self.mood.get_untracked(),
            positive_emotions: self.positive.get_untracked(),
            negative_emotions: self.negative.get_untracked(),
            sleep_quality: self.sleep.get_untracked(),
            thoughts: self.thoughts.get_untracked(),
            custom_parameters_data: self.custom.get_untracked(),
        }
    }
}

#[component]
pub fn MoodRecordPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let form = FormState::new();

    let (parameters, set_parameters) = signal(Vec::<CustomParameter>::new());
    let (is_saving, set_is_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 加载该用户的自定义参数，勾选框按需出现
    {
        let auth = auth.clone();
        Effect::new(move |_| {
            let Some(user) = auth.current_user() else {
                return;
            };
            let api = auth.authed_api();
            spawn_local(async move {
                let result: Result<Vec<CustomParameter>, ApiError> = api
                    .full_list(COLLECTION_CUSTOM_PARAMETERS, &owner_filter(&user.id), "name")
                    .await;
                match result {
                    Ok(list) => set_parameters.set(list),
                    Err(e) => {
                        web_sys::console::log_1(&format!("[MoodRecord] {}", e).into());
                    }
                }
            });
        });
    }

    let save_auth = auth.clone();
    let on_save = move |_| {
        let Some(user) = save_auth.current_user() else {
            return;
        };
        let api = save_auth.authed_api();
        let date = String::from(js_sys::Date::new_0().to_iso_string());
        let entry = form.to_entry(&user.id, date);

        set_is_saving.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            let result: Result<MoodRecord, ApiError> =
                api.create_record(COLLECTION_MOOD_RECORDS, &entry).await;
            match result {
                Ok(_) => router.navigate(AppRoute::Progress),
                Err(e) => {
                    set_error_msg.set(Some(format!("No se pudo guardar el registro: {}", e)));
                }
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div class="p-4 max-w-md mx-auto pb-32">
            <h1 class="text-2xl font-bold text-center mb-8">"¿Cómo te sientes?"</h1>

            <div class="mb-8">
                <h2 class="text-xl font-bold mb-4">"Nivel de Ánimo"</h2>
                <input
                    type="range"
                    min="1"
                    max="10"
                    prop:value=move || form.mood.get().to_string()
                    on:input=move |ev| {
                        if let Ok(v) = event_target_value(&ev).parse::<u8>() {
                            form.mood.set(v);
                        }
                    }
                    class="w-full h-2 bg-gray-200 rounded-lg appearance-none cursor-pointer"
                />
                <div class="text-center text-lg font-bold mt-2">{move || form.mood.get()}</div>
            </div>

            <div class="mb-8">
                <h2 class="text-xl font-bold mb-4">"Emociones Positivas"</h2>
                <div class="grid grid-cols-3 gap-2">
                    {POSITIVE_EMOTIONS
                        .into_iter()
                        .map(|emotion| {
                            view! {
                                <EmotionButton
                                    emotion=emotion
                                    list=form.positive
                                    active_class="p-2 rounded-md bg-blue-500 text-white"
                                />
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="mb-8">
                <h2 class="text-xl font-bold mb-4">"Emociones Negativas"</h2>
                <div class="grid grid-cols-3 gap-2">
                    {NEGATIVE_EMOTIONS
                        .into_iter()
                        .map(|emotion| {
                            view! {
                                <EmotionButton
                                    emotion=emotion
                                    list=form.negative
                                    active_class="p-2 rounded-md bg-red-500 text-white"
                                />
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="mb-8">
                <h2 class="text-xl font-bold mb-4">"Calidad del Sueño (horas)"</h2>
                <input
                    type="range"
                    min="0"
                    max="12"
                    prop:value=move || form.sleep.get().to_string()
                    on:input=move |ev| {
                        if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                            form.sleep.set(v);
                        }
                    }
                    class="w-full h-2 bg-gray-200 rounded-lg appearance-none cursor-pointer"
                />
                <div class="text-center text-lg font-bold mt-2">{move || form.sleep.get()}</div>
            </div>

            <Show when=move || !parameters.get().is_empty()>
                <div class="mb-8">
                    <h2 class="text-xl font-bold mb-4">"Parámetros Personalizados"</h2>
                    <For
                        each=move || parameters.get()
                        key=|p| p.id.clone()
                        children=move |parameter| {
                            view! { <ParameterSlider name=parameter.base.name form=form /> }
                        }
                    />
                </div>
            </Show>

            <div class="mb-8">
                <h2 class="text-xl font-bold mb-4">"Pensamientos"</h2>
                <textarea
                    prop:value=move || form.thoughts.get()
                    on:input=move |ev| form.thoughts.set(event_target_value(&ev))
                    class="w-full h-32 p-2 border rounded-md"
                ></textarea>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <p class="mb-4 text-sm text-red-500">
                    {move || error_msg.get().unwrap_or_default()}
                </p>
            </Show>

            <button
                on:click=on_save
                disabled=move || is_saving.get()
                class="w-full p-4 bg-blue-500 text-white font-bold rounded-md hover:bg-blue-600"
            >
                {move || if is_saving.get() { "Guardando..." } else { "Guardar Registro" }}
            </button>
        </div>
    }
}

/// 情绪开关按钮
#[component]
fn EmotionButton(
    emotion: &'static str,
    list: RwSignal<Vec<String>>,
    active_class: &'static str,
) -> impl IntoView {
    let class = move || {
        if list.get().iter().any(|e| e == emotion) {
            active_class
        } else {
            "p-2 rounded-md bg-gray-200"
        }
    };
    view! {
        <button class=class on:click=move |_| FormState::toggle_emotion(list, emotion)>
            {emotion}
        </button>
    }
}

/// 单个自定义参数：勾选是否记录 + 1-10 滑块
#[component]
fn ParameterSlider(name: String, form: FormState) -> impl IntoView {
    let toggle_name = name.clone();
    let slider_name = name.clone();
    let value_name = name.clone();
    let included = {
        let name = name.clone();
        move || form.custom.get().contains_key(&name)
    };
    let included_for_show = included.clone();

    view! {
        <div class="mb-4 p-4 bg-card border rounded-md">
            <label class="flex items-center justify-between cursor-pointer">
                <span class="font-medium">{name.clone()}</span>
                <input
                    type="checkbox"
                    prop:checked=included.clone()
                    on:change=move |_| form.toggle_parameter(&toggle_name)
                />
            </label>
            <Show when=move || included_for_show()>
                <input
                    type="range"
                    min="1"
                    max="10"
                    prop:value={
                        let name = value_name.clone();
                        move || {
                            form.custom
                                .get()
                                .get(&name)
                                .copied()
                                .unwrap_or(DEFAULT_PARAMETER_VALUE)
                                .to_string()
                        }
                    }
                    on:input={
                        let name = slider_name.clone();
                        move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<u8>() {
                                form.custom.update(|map| {
                                    map.insert(name.clone(), v);
                                });
                            }
                        }
                    }
                    class="w-full h-2 mt-3 bg-gray-200 rounded-lg appearance-none cursor-pointer"
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_emotion_adds_and_removes() {
        let form = FormState::new();
        FormState::toggle_emotion(form.positive, "Feliz");
        assert_eq!(form.positive.get_untracked(), vec!["Feliz".to_string()]);

        FormState::toggle_emotion(form.positive, "Feliz");
        assert!(form.positive.get_untracked().is_empty());
    }

    #[test]
    fn test_unchecked_parameter_is_absent_from_entry() {
        let form = FormState::new();
        form.toggle_parameter("Ejercicio");
        form.toggle_parameter("Lectura");
        form.toggle_parameter("Lectura"); // 取消勾选

        let entry = form.to_entry("u1", "2025-03-01T00:00:00Z".to_string());
        assert_eq!(
            entry.custom_parameters_data.get("Ejercicio"),
            Some(&DEFAULT_PARAMETER_VALUE)
        );
        // 未勾选的参数完全不出现，而不是写成 0
        assert!(!entry.custom_parameters_data.contains_key("Lectura"));
    }

    #[test]
    fn test_entry_carries_form_values() {
        let form = FormState::new();
        form.mood.set(9);
        form.sleep.set(6.0);
        form.thoughts.set("buen día".to_string());

        let entry = form.to_entry("u1", "2025-03-01T00:00:00Z".to_string());
        assert_eq!(entry.user, "u1");
        assert_eq!(entry.mood_level, 9);
        assert_eq!(entry.sleep_quality, 6.0);
        assert_eq!(entry.thoughts, "buen día");
    }
}

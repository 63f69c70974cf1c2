//! 进度页：汇总卡片、各指标折线图、记录明细列表
//!
//! 数据按 `-date` 降序拉取；图表序列交给共享聚合模块，
//! 它负责把顺序统一成时间升序并为缺失的自定义参数留空档。

use crate::api::{ApiError, owner_filter};
use crate::auth::use_auth;
use crate::components::chart::LineChart;
use crate::components::icons::{ListTodo, Moon, Smile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use sanamente_shared::aggregate::{self, ChartPoint, MoodSummary};
use sanamente_shared::{
    COLLECTION_CUSTOM_PARAMETERS, COLLECTION_MOOD_RECORDS, CustomParameter, MOOD_LEVEL_MAX,
    MOOD_LEVEL_MIN, MoodRecord, SLEEP_HOURS_MAX,
};

/// 从序列中抽出一条指标曲线，None 为空档
fn metric_values(
    series: &[ChartPoint],
    pick: impl Fn(&ChartPoint) -> Option<f64>,
) -> Vec<(String, Option<f64>)> {
    series
        .iter()
        .map(|point| (point.date.clone(), pick(point)))
        .collect()
}

#[component]
pub fn ProgressPage() -> impl IntoView {
    let auth = use_auth();

    let (records, set_records) = signal(Vec::<MoodRecord>::new());
    let (parameters, set_parameters) = signal(Vec::<CustomParameter>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 拉取记录（最新在前）和自定义参数表
    {
        let auth = auth.clone();
        Effect::new(move |_| {
            let Some(user) = auth.current_user() else {
                return;
            };
            let api = auth.authed_api();
            spawn_local(async move {
                let filter = owner_filter(&user.id);
                let records_result: Result<Vec<MoodRecord>, ApiError> =
                    api.full_list(COLLECTION_MOOD_RECORDS, &filter, "-date").await;
                let parameters_result: Result<Vec<CustomParameter>, ApiError> =
                    api.full_list(COLLECTION_CUSTOM_PARAMETERS, &filter, "name").await;

                match (records_result, parameters_result) {
                    (Ok(r), Ok(p)) => {
                        set_records.set(r);
                        set_parameters.set(p);
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        web_sys::console::log_1(&format!("[Progress] {}", e).into());
                        set_error_msg
                            .set(Some("No se pudieron cargar tus registros.".to_string()));
                    }
                }
                set_is_loading.set(false);
            });
        });
    }

    let summary = Memo::new(move |_| aggregate::summarize(&records.get()));
    let series = Memo::new(move |_| {
        let names: Vec<String> = parameters
            .get()
            .into_iter()
            .map(|p| p.base.name)
            .collect();
        aggregate::chart_series(&records.get(), &names)
    });

    view! {
        <div class="space-y-8 pb-24">
            <header>
                <h1 class="text-3xl font-bold">"Tu Progreso"</h1>
                <p class="text-muted-foreground">"Observa la evolución de tu bienestar."</p>
            </header>

            <Show when=move || error_msg.get().is_some()>
                <p class="text-sm text-red-500">{move || error_msg.get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="text-muted-foreground animate-pulse">"Cargando..."</p> }
            >
                <Show
                    when=move || !records.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="bg-card border rounded-lg p-8 text-center text-muted-foreground">
                                "No hay registros de ánimo todavía para mostrar el progreso."
                            </div>
                        }
                    }
                >
                    <SummaryCards summary=summary.get() />
                    <MetricCharts series=series.get() />
                    <RecordList records=records.get() />
                </Show>
            </Show>
        </div>
    }
}

// =========================================================
// 汇总卡片
// =========================================================

#[component]
fn SummaryCards(summary: MoodSummary) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <div class="bg-card border rounded-lg p-6 flex items-center gap-4">
                <Smile attr:class="w-10 h-10 text-green-500" />
                <div>
                    <p class="text-sm text-muted-foreground">"Ánimo Promedio"</p>
                    <p class="text-2xl font-bold">{format!("{:.1}", summary.average_mood)}</p>
                </div>
            </div>
            <div class="bg-card border rounded-lg p-6 flex items-center gap-4">
                <Moon attr:class="w-10 h-10 text-indigo-500" />
                <div>
                    <p class="text-sm text-muted-foreground">"Sueño Promedio"</p>
                    <p class="text-2xl font-bold">
                        {format!("{:.1} h", summary.average_sleep)}
                    </p>
                </div>
            </div>
            <div class="bg-card border rounded-lg p-6 flex items-center gap-4">
                <ListTodo attr:class="w-10 h-10 text-primary" />
                <div>
                    <p class="text-sm text-muted-foreground">"Total de Registros"</p>
                    <p class="text-2xl font-bold">{summary.total_records}</p>
                </div>
            </div>
        </div>
    }
}

// =========================================================
// 折线图
// =========================================================

#[component]
fn MetricCharts(series: Vec<ChartPoint>) -> impl IntoView {
    // 固定指标的曲线总是完整的；空档只出现在自定义参数里
    let mood = metric_values(&series, |p| Some(p.mood_level as f64));
    let sleep = metric_values(&series, |p| Some(p.sleep_quality));

    let parameter_names: Vec<String> = series
        .first()
        .map(|p| p.custom.keys().cloned().collect())
        .unwrap_or_default();
    let custom_charts = parameter_names
        .into_iter()
        .map(|name| {
            let values = metric_values(&series, |p| {
                p.custom.get(&name).copied().flatten().map(f64::from)
            });
            view! {
                <LineChart
                    title=name
                    values=values
                    y_min=f64::from(MOOD_LEVEL_MIN)
                    y_max=f64::from(MOOD_LEVEL_MAX)
                    stroke="#0ea5e9"
                />
            }
        })
        .collect_view();

    view! {
        <div class="space-y-6">
            <LineChart
                title="Nivel de Ánimo"
                values=mood
                y_min=f64::from(MOOD_LEVEL_MIN)
                y_max=f64::from(MOOD_LEVEL_MAX)
            />
            <LineChart
                title="Calidad del Sueño"
                values=sleep
                y_min=0.0
                y_max=SLEEP_HOURS_MAX
                stroke="#6366f1"
            />
            {custom_charts}
        </div>
    }
}

// =========================================================
// 记录明细
// =========================================================

#[component]
fn RecordList(records: Vec<MoodRecord>) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-bold">"Registros Detallados"</h2>
            {records
                .into_iter()
                .map(|record| {
                    let date = match record.timestamp() {
                        Some(ts) => sanamente_shared::date::format_display(ts),
                        None => record.entry.date.clone(),
                    };
                    let emotions: Vec<String> = record
                        .entry
                        .positive_emotions
                        .iter()
                        .chain(record.entry.negative_emotions.iter())
                        .cloned()
                        .collect();
                    view! {
                        <div class="bg-card border rounded-lg p-4">
                            <div class="flex items-center justify-between mb-2">
                                <span class="font-semibold">{date}</span>
                                <span class="text-sm text-muted-foreground">
                                    {format!(
                                        "Ánimo {} · Sueño {} h",
                                        record.entry.mood_level,
                                        record.entry.sleep_quality,
                                    )}
                                </span>
                            </div>
                            <Show when={
                                let has = !emotions.is_empty();
                                move || has
                            }>
                                <div class="flex flex-wrap gap-2 mb-2">
                                    {emotions
                                        .clone()
                                        .into_iter()
                                        .map(|emotion| {
                                            view! {
                                                <span class="px-2 py-0.5 text-xs rounded-full bg-accent">
                                                    {emotion}
                                                </span>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                            <Show when={
                                let has = !record.entry.thoughts.is_empty();
                                move || has
                            }>
                                <p class="text-sm text-muted-foreground whitespace-pre-wrap">
                                    {record.entry.thoughts.clone()}
                                </p>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanamente_shared::NewMoodRecord;
    use std::collections::BTreeMap;

    fn point(date: &str, mood: u8, custom: &[(&str, Option<u8>)]) -> ChartPoint {
        ChartPoint {
            date: date.to_string(),
            mood_level: mood,
            sleep_quality: 7.0,
            custom: custom
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn test_metric_values_preserves_gaps() {
        let series = vec![
            point("01/03/2025", 5, &[("Ejercicio", Some(6))]),
            point("02/03/2025", 7, &[("Ejercicio", None)]),
        ];
        let values = metric_values(&series, |p| {
            p.custom.get("Ejercicio").copied().flatten().map(f64::from)
        });
        assert_eq!(values[0], ("01/03/2025".to_string(), Some(6.0)));
        assert_eq!(values[1], ("02/03/2025".to_string(), None));
    }

    #[test]
    fn test_fixed_metrics_have_no_gaps() {
        let series = vec![point("01/03/2025", 5, &[]), point("02/03/2025", 7, &[])];
        let mood = metric_values(&series, |p| Some(p.mood_level as f64));
        assert!(mood.iter().all(|(_, v)| v.is_some()));
    }

    #[test]
    fn test_summary_feeds_from_fetched_records() {
        let records = vec![MoodRecord {
            id: "a".to_string(),
            entry: NewMoodRecord {
                user: "u1".to_string(),
                date: "2025-03-01T00:00:00Z".to_string(),
                mood_level: 8,
                positive_emotions: vec![],
                negative_emotions: vec![],
                sleep_quality: 6.0,
                thoughts: String::new(),
                custom_parameters_data: BTreeMap::new(),
            },
        }];
        let summary = aggregate::summarize(&records);
        assert_eq!(summary.average_mood, 8.0);
        assert_eq!(summary.total_records, 1);
    }
}

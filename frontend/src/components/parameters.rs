//! 自定义参数管理页：列表、新增、删除
//!
//! 参数名在保存前做客户端校验：去掉首尾空白、不允许为空、
//! 同一用户下不区分大小写地去重。存储端没有唯一约束，
//! 校验在这里完成。

use crate::api::{ApiError, owner_filter};
use crate::auth::use_auth;
use crate::components::icons::{Plus, SlidersHorizontal, Trash2};
use leptos::prelude::*;
use leptos::task::spawn_local;
use sanamente_shared::{COLLECTION_CUSTOM_PARAMETERS, CustomParameter, NewCustomParameter};

/// 参数名校验失败的原因
#[derive(Debug, Clone, PartialEq)]
enum NameError {
    Empty,
    Duplicate,
}

impl NameError {
    fn message(&self) -> &'static str {
        match self {
            NameError::Empty => "El nombre del parámetro no puede estar vacío.",
            NameError::Duplicate => "Ya existe un parámetro con ese nombre.",
        }
    }
}

/// 校验并规范化参数名
fn validate_name(raw: &str, existing: &[CustomParameter]) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    let lowered = name.to_lowercase();
    if existing
        .iter()
        .any(|p| p.base.name.to_lowercase() == lowered)
    {
        return Err(NameError::Duplicate);
    }
    Ok(name.to_string())
}

#[component]
pub fn ParametersPage() -> impl IntoView {
    let auth = use_auth();

    let (parameters, set_parameters) = signal(Vec::<CustomParameter>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (new_name, set_new_name) = signal(String::new());
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let load_parameters = {
        let auth = auth.clone();
        move || {
            let Some(user) = auth.current_user() else {
                return;
            };
            let api = auth.authed_api();
            set_is_loading.set(true);
            spawn_local(async move {
                let result: Result<Vec<CustomParameter>, ApiError> = api
                    .full_list(COLLECTION_CUSTOM_PARAMETERS, &owner_filter(&user.id), "name")
                    .await;
                match result {
                    Ok(list) => set_parameters.set(list),
                    Err(e) => {
                        set_notification
                            .set(Some((format!("No se pudieron cargar los parámetros: {}", e), true)));
                    }
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载
    {
        let load_parameters = load_parameters.clone();
        let auth = auth.clone();
        Effect::new(move |_| {
            if auth.phase().get().is_authenticated() {
                load_parameters();
            }
        });
    }

    let handle_add = {
        let auth = auth.clone();
        let load_parameters = load_parameters.clone();
        move |_| {
            let Some(user) = auth.current_user() else {
                return;
            };
            let name = match validate_name(&new_name.get_untracked(), &parameters.get_untracked()) {
                Ok(name) => name,
                Err(e) => {
                    set_notification.set(Some((e.message().to_string(), true)));
                    return;
                }
            };

            let api = auth.authed_api();
            let load_parameters = load_parameters.clone();
            spawn_local(async move {
                let request = NewCustomParameter {
                    user: user.id.clone(),
                    name,
                };
                let result: Result<CustomParameter, ApiError> = api
                    .create_record(COLLECTION_CUSTOM_PARAMETERS, &request)
                    .await;
                match result {
                    Ok(_) => {
                        set_notification.set(Some(("Parámetro añadido.".to_string(), false)));
                        set_new_name.set(String::new());
                        load_parameters();
                    }
                    Err(e) => {
                        set_notification
                            .set(Some((format!("No se pudo añadir el parámetro: {}", e), true)));
                    }
                }
            });
        }
    };

    let handle_delete = {
        let auth = auth.clone();
        move |id: String| {
            let api = auth.authed_api();
            spawn_local(async move {
                match api.delete_record(COLLECTION_CUSTOM_PARAMETERS, &id).await {
                    Ok(()) => {
                        set_notification.set(Some(("Parámetro eliminado.".to_string(), false)));
                        set_parameters.update(|list| list.retain(|p| p.id != id));
                    }
                    Err(e) => {
                        set_notification
                            .set(Some((format!("No se pudo eliminar el parámetro: {}", e), true)));
                    }
                }
            });
        }
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <div class="max-w-2xl mx-auto space-y-8 pb-24">
            // 通知提示框
            <Show when=move || notification.get().is_some()>
                <div class=move || {
                    let is_err = notification.get().map(|(_, e)| e).unwrap_or(false);
                    if is_err {
                        "p-3 rounded-md bg-red-100 text-red-700 text-sm"
                    } else {
                        "p-3 rounded-md bg-green-100 text-green-700 text-sm"
                    }
                }>
                    {move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}
                </div>
            </Show>

            <header class="flex items-center gap-4">
                <SlidersHorizontal attr:class="w-8 h-8 text-primary" />
                <div>
                    <h1 class="text-3xl font-bold">"Parámetros Personalizados"</h1>
                    <p class="text-muted-foreground">
                        "Define qué más quieres seguir en tus registros diarios."
                    </p>
                </div>
            </header>

            <div class="bg-card border rounded-lg p-6">
                <h2 class="text-xl font-semibold mb-4">"Añadir Parámetro"</h2>
                <div class="flex gap-2">
                    <input
                        type="text"
                        placeholder="p. ej. Ejercicio, Meditación..."
                        prop:value=new_name
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        class="flex-1 px-3 py-2 bg-transparent border rounded-md shadow-sm"
                    />
                    <button
                        on:click=handle_add
                        class="inline-flex items-center gap-2 px-4 py-2 font-medium text-primary-foreground bg-primary rounded-md hover:bg-primary/90"
                    >
                        <Plus attr:class="w-4 h-4" />
                        "Añadir"
                    </button>
                </div>
            </div>

            <div class="bg-card border rounded-lg p-6">
                <h2 class="text-xl font-semibold mb-4">"Tus Parámetros"</h2>

                <Show when=move || is_loading.get()>
                    <p class="text-muted-foreground animate-pulse">"Cargando..."</p>
                </Show>
                <Show when=move || !is_loading.get() && parameters.get().is_empty()>
                    <p class="text-muted-foreground">
                        "Aún no tienes parámetros personalizados."
                    </p>
                </Show>

                <ul class="divide-y">
                    <For
                        each=move || parameters.get()
                        key=|p| p.id.clone()
                        children={
                            let handle_delete = handle_delete.clone();
                            move |parameter| {
                                let id = parameter.id.clone();
                                let handle_delete = handle_delete.clone();
                                view! {
                                    <li class="flex items-center justify-between py-3">
                                        <span class="font-medium">{parameter.base.name}</span>
                                        <button
                                            on:click=move |_| handle_delete(id.clone())
                                            class="p-2 rounded-md text-red-500 hover:bg-red-50"
                                            title="Eliminar"
                                        >
                                            <Trash2 attr:class="w-4 h-4" />
                                        </button>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(id: &str, name: &str) -> CustomParameter {
        CustomParameter {
            id: id.to_string(),
            base: NewCustomParameter {
                user: "u1".to_string(),
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_name_is_trimmed() {
        let name = validate_name("  Ejercicio  ", &[]).unwrap();
        assert_eq!(name, "Ejercicio");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(validate_name("   ", &[]), Err(NameError::Empty));
        assert_eq!(validate_name("", &[]), Err(NameError::Empty));
    }

    #[test]
    fn test_duplicate_name_case_insensitive() {
        let existing = vec![parameter("p1", "Ejercicio")];
        assert_eq!(
            validate_name("ejercicio", &existing),
            Err(NameError::Duplicate)
        );
        assert_eq!(
            validate_name("  EJERCICIO ", &existing),
            Err(NameError::Duplicate)
        );
        assert!(validate_name("Lectura", &existing).is_ok());
    }
}

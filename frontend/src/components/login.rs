//! 登录/注册页

use crate::auth::use_auth;
use crate::components::icons::Brain;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 表单处于哪种模式
#[derive(Clone, Copy, PartialEq)]
enum FormMode {
    Login,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (mode, set_mode) = signal(FormMode::Login);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (password_confirm, set_password_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let submit_auth = auth.clone();
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Por favor completa todos los campos.".to_string()));
            return;
        }
        if mode.get() == FormMode::Register && password.get() != password_confirm.get() {
            set_error_msg.set(Some("Las contraseñas no coinciden.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let auth = submit_auth.clone();
        spawn_local(async move {
            let result = match mode.get_untracked() {
                FormMode::Login => auth.login(&email.get_untracked(), &password.get_untracked()).await,
                FormMode::Register => {
                    auth.register(
                        &email.get_untracked(),
                        &password.get_untracked(),
                        &password_confirm.get_untracked(),
                    )
                    .await
                }
            };
            if let Err(e) = result {
                // 成功时不需要导航：路由服务监听状态变化自动跳转
                web_sys::console::log_1(&format!("[Login] {}", e).into());
                let msg = match mode.get_untracked() {
                    FormMode::Login => {
                        "Error al iniciar sesión. Por favor, verifica tus credenciales."
                    }
                    FormMode::Register => "No se pudo crear la cuenta. Inténtalo de nuevo.",
                };
                set_error_msg.set(Some(msg.to_string()));
            }
            set_is_submitting.set(false);
        });
    };

    let toggle_mode = move |_| {
        set_error_msg.set(None);
        set_mode.update(|m| {
            *m = match m {
                FormMode::Login => FormMode::Register,
                FormMode::Register => FormMode::Login,
            }
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen px-4">
            <div class="w-full max-w-md p-8 space-y-8 bg-card border rounded-lg shadow-lg">
                <div class="text-center">
                    <Brain attr:class="w-12 h-12 mx-auto text-primary" />
                    <h1 class="mt-4 text-3xl font-bold text-foreground">
                        "Bienvenido a Sanamente"
                    </h1>
                    <p class="mt-2 text-muted-foreground">
                        {move || match mode.get() {
                            FormMode::Login => "Inicia sesión para continuar tu viaje",
                            FormMode::Register => "Crea una cuenta para empezar tu viaje",
                        }}
                    </p>
                </div>

                <form on:submit=on_submit class="space-y-6">
                    <div>
                        <label for="email" class="block text-sm font-medium text-foreground">
                            "Correo Electrónico"
                        </label>
                        <input
                            id="email"
                            type="email"
                            autocomplete="email"
                            required
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                            class="block w-full px-3 py-2 mt-1 bg-transparent border rounded-md shadow-sm"
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium text-foreground">
                            "Contraseña"
                        </label>
                        <input
                            id="password"
                            type="password"
                            autocomplete="current-password"
                            required
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="block w-full px-3 py-2 mt-1 bg-transparent border rounded-md shadow-sm"
                        />
                    </div>

                    <Show when=move || mode.get() == FormMode::Register>
                        <div>
                            <label
                                for="password_confirm"
                                class="block text-sm font-medium text-foreground"
                            >
                                "Confirmar Contraseña"
                            </label>
                            <input
                                id="password_confirm"
                                type="password"
                                on:input=move |ev| set_password_confirm.set(event_target_value(&ev))
                                prop:value=password_confirm
                                class="block w-full px-3 py-2 mt-1 bg-transparent border rounded-md shadow-sm"
                            />
                        </div>
                    </Show>

                    <Show when=move || error_msg.get().is_some()>
                        <p class="text-sm text-red-500">
                            {move || error_msg.get().unwrap_or_default()}
                        </p>
                    </Show>

                    <button
                        type="submit"
                        disabled=move || is_submitting.get()
                        class="flex justify-center w-full px-4 py-2 text-sm font-medium text-primary-foreground bg-primary rounded-md shadow-sm hover:bg-primary/90"
                    >
                        {move || match (is_submitting.get(), mode.get()) {
                            (true, _) => "Un momento...",
                            (false, FormMode::Login) => "Iniciar Sesión",
                            (false, FormMode::Register) => "Crear Cuenta",
                        }}
                    </button>
                </form>

                <button
                    on:click=toggle_mode
                    class="w-full text-sm text-muted-foreground hover:text-foreground"
                >
                    {move || match mode.get() {
                        FormMode::Login => "¿No tienes cuenta? Regístrate",
                        FormMode::Register => "¿Ya tienes cuenta? Inicia sesión",
                    }}
                </button>
            </div>
        </div>
    }
}

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::{AppContext, use_current_user};
use crate::routes::Route;
use crate::views::ViewError;

fn failure_class(err: &ViewError) -> &'static str {
    if err.is_offline() {
        "error-panel error-panel--connection"
    } else {
        "error-panel"
    }
}

fn failure_title(err: &ViewError) -> &'static str {
    if err.is_offline() {
        "Connection Error"
    } else {
        "Login Failed"
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let user = use_current_user();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| None::<ViewError>);
    let busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let email = email.read().clone();
        let password = password.read().clone();
        let mut user = user;
        let mut error = error;
        let mut busy = busy;
        busy.set(true);
        spawn(async move {
            match auth.login(&email, &password).await {
                Ok(identity) => {
                    error.set(None);
                    user.set(Some(identity));
                    let _ = navigator.push(Route::Dashboard {});
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    };

    let failure = error.read().clone();

    rsx! {
        div { class: "page auth-page",
            form { class: "auth-card", onsubmit: on_submit,
                h2 { "Login" }
                if let Some(err) = failure {
                    div { class: failure_class(&err),
                        strong { {failure_title(&err)} }
                        p { "{err.message()}" }
                    }
                }
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Login" }
                }
                p { class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let mut username = use_signal(String::new);
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
        let username = username.read().clone();
        let email = email.read().clone();
        let password = password.read().clone();
        let mut error = error;
        let mut busy = busy;
        busy.set(true);
        spawn(async move {
            match auth.register(&username, &email, &password).await {
                Ok(_) => {
                    error.set(None);
                    let _ = navigator.push(Route::Login {});
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
                h2 { "Create Account" }
                if let Some(err) = failure {
                    div { class: "error-panel",
                        strong { "Registration Failed" }
                        p { "{err.message()}" }
                    }
                }
                label { r#for: "register-username", "Username" }
                input {
                    id: "register-username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                label { r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Creating account..." } else { "Register" }
                }
                p { class: "auth-switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Login" }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};
use tracing::warn;

use crate::context::{AppContext, use_current_user};
use crate::views::{
    DashboardView, LeaderboardView, LoginView, ProfileView, QuizRoomView, RegisterView,
    ResultsView,
};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/login", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/quiz/:quiz_id", QuizRoomView)] Quiz { quiz_id: u64 },
        #[route("/results/:score", ResultsView)] Results { score: u32 },
    #[end_layout]
    #[route("/:..segments")] NotFound { segments: Vec<String> },
}

impl Route {
    /// Screens that need a signed-in user.
    #[must_use]
    pub fn requires_identity(&self) -> bool {
        matches!(
            self,
            Route::Dashboard {} | Route::Profile {} | Route::Quiz { .. }
        )
    }
}

#[component]
fn Layout() -> Element {
    let user = use_current_user();
    let route = use_route::<Route>();
    let signed_in = user.get().is_some();

    rsx! {
        div { class: "app",
            Navbar {}
            main { class: "content",
                if route.requires_identity() && !signed_in {
                    RedirectTo { to: Route::Login {} }
                } else {
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let user = use_current_user();
    let identity = user.get();

    let on_logout = use_callback(move |()| {
        let auth = ctx.auth();
        let mut user = user;
        spawn(async move {
            if let Err(err) = auth.logout().await {
                warn!("logout failed: {err}");
            }
            user.set(None);
            let _ = navigator.push(Route::Login {});
        });
    });

    rsx! {
        nav { class: "navbar",
            Link { class: "brand", to: Route::Dashboard {}, "Quiz Platform" }
            ul { class: "nav-links",
                li { Link { to: Route::Dashboard {}, active_class: "active", "Dashboard" } }
                li { Link { to: Route::Leaderboard {}, active_class: "active", "Leaderboard" } }
                if identity.is_some() {
                    li { Link { to: Route::Profile {}, active_class: "active", "Profile" } }
                }
            }
            div { class: "nav-user",
                match identity {
                    Some(identity) => rsx! {
                        span { class: "nav-username", "{identity.user.username}" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| on_logout.call(()),
                            "Logout"
                        }
                    },
                    None => rsx! {
                        Link { to: Route::Login {}, active_class: "active", "Login" }
                        Link { class: "btn btn-primary", to: Route::Register {}, "Register" }
                    },
                }
            }
        }
    }
}

/// Replaces the current entry with `to` as soon as it mounts.
#[component]
fn RedirectTo(to: Route) -> Element {
    let navigator = use_navigator();
    use_hook(move || {
        let _ = navigator.replace(to);
    });
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    warn!("unknown route /{}", segments.join("/"));
    rsx! {
        RedirectTo { to: Route::Dashboard {} }
    }
}

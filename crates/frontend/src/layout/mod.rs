pub mod global_context;

use crate::system::auth::context::{do_logout, use_auth};
use global_context::{AppGlobalContext, AppPage};
use leptos::prelude::*;

/// Application shell: top bar with page navigation and sign-out, content below
#[component]
pub fn Shell<C>(center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = expect_context::<AppGlobalContext>();
    let (_, set_auth_state) = use_auth();

    view! {
        <div class="app-layout">
            <header class="top-header">
                <span class="top-header__title">"Lab Admin"</span>
                <nav class="top-header__nav">
                    {AppPage::ALL
                        .iter()
                        .map(|&page| {
                            view! {
                                <button
                                    class="top-header__tab"
                                    class=("top-header__tab--active", move || ctx.active.get() == page)
                                    on:click=move |_| ctx.open(page)
                                >
                                    {page.title()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <button class="top-header__logout" on:click=move |_| do_logout(set_auth_state)>
                    "Sign out"
                </button>
            </header>
            <div class="app-main">{center()}</div>
        </div>
    }
}

use crate::domain::a001_lab_order::ui::list::LabOrderList;
use crate::domain::a001_lab_order::ui::reports::ReportsPage;
use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <Shell center=move || {
            // Re-render the page body whenever the active page changes
            let page = move || match ctx.active.get() {
                AppPage::Reports => view! { <ReportsPage /> }.into_any(),
                AppPage::Orders => view! { <LabOrderList /> }.into_any(),
            };
            view! { <div class="page-body">{page}</div> }.into_any()
        } />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}

use crate::shared::date_utils::{format_iso_day, parse_date_input};
use chrono::NaiveDate;
use leptos::prelude::*;

/// Native date picker bound to an optional day; clearing the field yields `None`
#[component]
pub fn DateInput(
    #[prop(into)] value: Signal<Option<NaiveDate>>,
    #[prop(into)] on_change: Callback<Option<NaiveDate>>,
    #[prop(optional, into)] label: String,
) -> impl IntoView {
    view! {
        <label class="date-input">
            <span class="date-input__label">{label}</span>
            <input
                type="date"
                prop:value=move || value.get().map(format_iso_day).unwrap_or_default()
                on:input=move |ev| on_change.run(parse_date_input(&event_target_value(&ev)))
            />
        </label>
    }
}

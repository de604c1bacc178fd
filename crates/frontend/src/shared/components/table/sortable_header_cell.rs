//! Sortable table header cell
//!
//! # Example
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Order ID"
//!     sort_field="orderid"
//!     sort=Signal::derive(move || state.with(|s| s.sort.clone()))
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SortState};
use leptos::prelude::*;
use thaw::*;

/// Header cell that shows the sort indicator (▲ ▼ ⇅) and reports clicks.
///
/// Repeated clicks on the same column cycle ascending, descending, unsorted.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,

    /// Field key passed to `on_sort`
    #[prop(into)]
    sort_field: String,

    /// Current sort state
    #[prop(into)]
    sort: Signal<SortState>,

    on_sort: Callback<String>,

    #[prop(optional, default = 100.0)] min_width: f64,
) -> impl IntoView {
    let field_for_click = sort_field.clone();
    let field_for_indicator = sort_field.clone();
    let field_for_class = sort_field;

    view! {
        <TableHeaderCell resizable=true min_width=min_width>
            <div
                class="table__sortable-header"
                style="cursor: pointer; user-select: none;"
                on:click=move |_| on_sort.run(field_for_click.clone())
            >
                {label}
                <span class=move || sort.with(|s| get_sort_class(s, &field_for_class))>
                    {move || sort.with(|s| get_sort_indicator(s, &field_for_indicator))}
                </span>
            </div>
        </TableHeaderCell>
    }
}

//! Row selection checkbox cell
//!
//! ```rust,ignore
//! <TableCellCheckbox
//!     item_id=row.orderid.clone()
//!     selected=selected
//!     disabled=Signal::derive(move || busy.get())
//!     on_change=Callback::new(move |(id, checked)| toggle_select(id, checked))
//! />
//! ```

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

#[component]
pub fn TableCellCheckbox(
    #[prop(into)] item_id: String,

    #[prop(into)] selected: Signal<HashSet<String>>,

    /// Locks the selection while a bulk action runs
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,

    /// Called with (item_id, checked)
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    let label = format!("Select order {}", item_id);
    let is_checked = {
        let id = item_id.clone();
        move || selected.with(|s| s.contains(&id))
    };

    view! {
        // Row clicks must not toggle the selection
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                aria-label=label
                disabled=move || disabled.get().unwrap_or(false)
                prop:checked=is_checked
                on:change=move |ev| on_change.run((item_id.clone(), event_target_checked(&ev)))
            />
        </TableCell>
    }
}

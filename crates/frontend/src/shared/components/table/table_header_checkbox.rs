//! "Select all on this page" checkbox for the table header
//!
//! ```rust,ignore
//! <TableHeaderCheckbox
//!     visible_ids=visible_ids
//!     selected=selected
//!     on_change=Callback::new(move |check_all: bool| select_page(check_all))
//! />
//! ```

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Header checkbox state for the rows currently shown
pub fn checkbox_state(visible_ids: &[String], selected: &HashSet<String>) -> CheckboxState {
    if visible_ids.is_empty() {
        return CheckboxState::Unchecked;
    }
    let selected_count = visible_ids.iter().filter(|id| selected.contains(*id)).count();
    if selected_count == 0 {
        CheckboxState::Unchecked
    } else if selected_count == visible_ids.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

#[component]
pub fn TableHeaderCheckbox(
    /// IDs of the rows on the current page
    #[prop(into)]
    visible_ids: Signal<Vec<String>>,

    #[prop(into)] selected: Signal<HashSet<String>>,

    /// true = select all visible, false = clear them
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || {
        visible_ids.with(|ids| selected.with(|sel| checkbox_state(ids, sel)))
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate is a DOM property only
    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(state.get() == CheckboxState::Indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == CheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_checkbox_state() {
        let visible = ids(&["1", "2"]);
        let none = HashSet::new();
        let some: HashSet<String> = ids(&["2", "9"]).into_iter().collect();
        let all: HashSet<String> = ids(&["1", "2", "3"]).into_iter().collect();

        assert_eq!(checkbox_state(&visible, &none), CheckboxState::Unchecked);
        assert_eq!(checkbox_state(&visible, &some), CheckboxState::Indeterminate);
        assert_eq!(checkbox_state(&visible, &all), CheckboxState::Checked);
        assert_eq!(checkbox_state(&[], &all), CheckboxState::Unchecked);
    }
}

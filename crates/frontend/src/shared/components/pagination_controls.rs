use leptos::prelude::*;

/// 1-based inclusive row range shown on `page`; `(0, 0)` when there are no rows
pub fn visible_range(page: usize, page_size: usize, total_count: usize) -> (usize, usize) {
    if total_count == 0 || page_size == 0 {
        return (0, 0);
    }
    let first = (page.max(1) - 1) * page_size + 1;
    if first > total_count {
        return (0, 0);
    }
    (first, (first + page_size - 1).min(total_count))
}

/// PaginationControls component - first/prev/next/last plus a page size select
///
/// Pages are 1-based. Navigation outside `[1, total_pages]` is never emitted.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Total count of filtered items
    #[prop(into)]
    total_count: Signal<usize>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,

    /// Page size options
    page_size_options: Vec<usize>,
) -> impl IntoView {
    let default_size = page_size_options.first().copied().unwrap_or(10);
    let at_start = move || current_page.get() <= 1;
    let at_end = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_start
                title="First page"
            >
                "«"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=at_start
                title="Previous page"
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || {
                    let (first, last) =
                        visible_range(current_page.get(), page_size.get(), total_count.get());
                    format!(
                        "Page {} of {} ({}-{} of {})",
                        current_page.get(),
                        total_pages.get().max(1),
                        first,
                        last,
                        total_count.get()
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=at_end
                title="Next page"
            >
                "›"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=at_end
                title="Last page"
            >
                "»"
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let val = event_target_value(&ev).parse().unwrap_or(default_size);
                    on_page_size_change.run(val);
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options
                    .iter()
                    .map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

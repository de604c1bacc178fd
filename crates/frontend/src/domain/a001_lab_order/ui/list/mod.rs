pub mod state;

use self::state::create_state;
use crate::domain::a001_lab_order::api::refresh_records;
use crate::domain::a001_lab_order::bulk::{
    download_orders, plan_redesign, submit_redesign, DownloadMode,
};
use crate::domain::a001_lab_order::columns::COLUMNS;
use crate::shared::api_utils::api_base;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{
    SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::config::config;
use crate::shared::downloads::BrowserDownloads;
use crate::shared::list_utils::{SearchInput, Searchable};
use crate::system::gateway::browser::gateway;
use contracts::domain::a001_lab_order::LabOrder;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Orders datatable: search, sort, paging, selection and bulk actions
#[component]
pub fn LabOrderList() -> impl IntoView {
    let state = create_state();
    let cfg = config();

    let load_orders = move || {
        spawn_local(async move {
            match refresh_records(&gateway()).await {
                Some(orders) => state.update(|s| s.set_orders(orders)),
                None => state.update(|s| s.notice = Some("Failed to load orders.".to_string())),
            }
        });
    };

    // Load once when the page opens
    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_orders();
        }
    });

    let page_view = Memo::new(move |_| state.with(|s| s.page_view()));
    let sort = Signal::derive(move || state.with(|s| s.sort.clone()));
    let selected = Signal::derive(move || state.with(|s| s.selected_ids.clone()));
    let visible_ids = Signal::derive(move || {
        page_view.with(|v| v.rows.iter().map(|o| o.orderid.clone()).collect::<Vec<_>>())
    });
    let busy = move || state.with(|s| s.busy);
    let nothing_selected = move || state.with(|s| s.selected_ids.is_empty());

    let on_toggle_row = Callback::new(move |(id, checked): (String, bool)| {
        state.update(|s| s.toggle_selected(id, checked));
    });

    let on_redesign = move |_| {
        let plan = state.with_untracked(|s| plan_redesign(&s.selected_ids, &s.orders));
        state.update(|s| s.busy = true);
        spawn_local(async move {
            let gateway = gateway();
            let outcome = submit_redesign(&gateway, plan, None).await;
            let any_sent = !outcome.succeeded.is_empty();
            state.update(|s| {
                s.busy = false;
                s.notice = Some(outcome.summary());
                s.clear_selection();
            });
            if any_sent {
                if let Some(orders) = refresh_records(&gateway).await {
                    state.update(|s| s.set_orders(orders));
                }
            }
        });
    };

    let on_download = move |_| {
        let (orders, mode) = state.with_untracked(|s| (s.selected_orders(), s.download_mode));
        if orders.is_empty() {
            state.update(|s| s.notice = Some("No orders selected.".to_string()));
            return;
        }
        state.update(|s| s.busy = true);
        spawn_local(async move {
            let report = download_orders(
                &gateway(),
                &BrowserDownloads,
                &orders,
                mode,
                &api_base(),
                cfg.timing.download_delay_ms,
            )
            .await;
            state.update(|s| {
                s.busy = false;
                s.notice = Some(report.summary());
            });
        });
    };

    view! {
        <div class="lab-order-list">
            <div class="page-header">
                <h2>"Orders"</h2>
                <span class="page-header__info">
                    {move || format!(
                        "{} records, {} selected",
                        page_view.with(|v| v.total_count),
                        state.with(|s| s.selected_ids.len())
                    )}
                </span>
                <div class="page-header__actions">
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search.clone()))
                        on_change=Callback::new(move |query: String| state.update(|s| s.set_search(query)))
                        placeholder="Search orders..."
                    />
                    <select
                        class="download-mode-select"
                        prop:value=move || state.with(|s| s.download_mode.key())
                        on:change=move |ev| {
                            let mode = DownloadMode::from_key(&event_target_value(&ev));
                            state.update(|s| s.download_mode = mode);
                        }
                    >
                        <option value="all">"All files"</option>
                        <option value="designated">"Designated file"</option>
                    </select>
                    <button
                        class="btn"
                        on:click=on_download
                        disabled=move || busy() || nothing_selected()
                    >
                        "Download"
                    </button>
                    <button
                        class="btn btn-primary"
                        on:click=on_redesign
                        disabled=move || busy() || nothing_selected()
                    >
                        "Send for redesign"
                    </button>
                </div>
            </div>

            <Show when=move || state.with(|s| s.notice.is_some())>
                <div class="notice">
                    <pre class="notice__text">
                        {move || state.with(|s| s.notice.clone().unwrap_or_default())}
                    </pre>
                    <button class="notice__close" on:click=move |_| state.update(|s| s.notice = None)>
                        "×"
                    </button>
                </div>
            </Show>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCheckbox
                            visible_ids=visible_ids
                            selected=selected
                            on_change=Callback::new(move |checked: bool| state.update(|s| s.select_visible(checked)))
                        />
                        {COLUMNS
                            .iter()
                            .map(|(field, label)| {
                                view! {
                                    <SortableHeaderCell
                                        label=*label
                                        sort_field=*field
                                        sort=sort
                                        on_sort=Callback::new(move |f: String| state.update(|s| s.toggle_sort(&f)))
                                    />
                                }
                            })
                            .collect_view()}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || page_view.get().rows
                        key=|order: &LabOrder| order.orderid.clone()
                        children=move |order: LabOrder| {
                            let cells = COLUMNS
                                .iter()
                                .map(|(field, _)| {
                                    let value = order.get_field_value(field).unwrap_or_default();
                                    view! {
                                        <TableCell>
                                            <TableCellLayout>{value}</TableCellLayout>
                                        </TableCell>
                                    }
                                })
                                .collect_view();
                            view! {
                                <TableRow>
                                    <TableCellCheckbox
                                        item_id=order.orderid.clone()
                                        selected=selected
                                        disabled=Signal::derive(busy)
                                        on_change=on_toggle_row
                                    />
                                    {cells}
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>

            <PaginationControls
                current_page=Signal::derive(move || page_view.with(|v| v.page))
                total_pages=Signal::derive(move || page_view.with(|v| v.total_pages))
                total_count=Signal::derive(move || page_view.with(|v| v.total_count))
                page_size=Signal::derive(move || state.with(|s| s.pagination.page_size))
                on_page_change=Callback::new(move |page: usize| {
                    state.update(|s| {
                        s.go_to_page(page);
                    });
                })
                on_page_size_change=Callback::new(move |size: usize| {
                    state.update(|s| {
                        s.set_page_size(size);
                    });
                })
                page_size_options=cfg.table.page_size_options.clone()
            />
        </div>
    }
}

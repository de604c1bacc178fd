use crate::domain::a001_lab_order::api::refresh_records;
use crate::domain::a001_lab_order::columns::COLUMNS;
use crate::domain::a001_lab_order::report_filter::{
    CustomRange, FilterMode, ReportFilterState, TimeBucket,
};
use crate::shared::components::date_input::DateInput;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::config;
use crate::shared::date_utils::today;
use crate::shared::export::{export_to_csv, report_file_name};
use crate::shared::list_utils::{process_rows, Pagination, Searchable, SortState};
use crate::system::gateway::browser::gateway;
use contracts::domain::a001_lab_order::LabOrder;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Reports: time-bucket or custom range filtering with CSV export
#[component]
pub fn ReportsPage() -> impl IntoView {
    let cfg = config();
    let (orders, set_orders) = signal(Vec::<LabOrder>::new());
    let (loading, set_loading) = signal(false);
    let (message, set_message) = signal(None::<String>);

    // Applied filter vs. what the user is still typing
    let filter = RwSignal::new(ReportFilterState::default());
    let draft = RwSignal::new(CustomRange::default());
    let pagination = RwSignal::new(Pagination::new(cfg.table.default_page_size));
    let pending_apply = StoredValue::new_local(None::<Timeout>);

    let schedule_custom_apply = move || {
        let timeout = Timeout::new(cfg.timing.search_debounce_ms, move || {
            let range = draft.get_untracked();
            filter.update(|f| {
                f.custom = range;
                f.use_custom();
            });
            pagination.update(|p| p.page = 1);
        });
        pending_apply.set_value(Some(timeout));
    };

    let edit_draft = move |edit: Box<dyn FnOnce(&mut CustomRange)>| {
        draft.update(|d| edit(d));
        schedule_custom_apply();
    };

    Effect::new(move |_| {
        set_loading.set(true);
        spawn_local(async move {
            match refresh_records(&gateway()).await {
                Some(data) => {
                    set_orders.set(data);
                    set_message.set(None);
                }
                None => set_message.set(Some("Failed to load orders.".to_string())),
            }
            set_loading.set(false);
        });
    });

    let filtered = Memo::new(move |_| {
        let day = today();
        filter.with(|f| orders.with(|o| f.apply(o, day)))
    });

    // Keep the page in range whenever the filtered set changes
    Effect::new(move |_| {
        let count = filtered.with(|f| f.len());
        pagination.update(|p| p.clamp(count));
    });

    let page_view = Memo::new(move |_| {
        let window = pagination.get();
        filtered.with(|rows| process_rows(rows, |_| true, &SortState::default(), &window))
    });

    let on_export = move |_| {
        let rows = filtered.get_untracked();
        match export_to_csv(&rows, &report_file_name(today())) {
            Ok(()) => set_message.set(None),
            Err(e) => set_message.set(Some(e.to_string())),
        }
    };

    let is_mode = move |mode: FilterMode| filter.with(|f| f.mode == mode);

    view! {
        <div class="reports-page">
            <div class="page-header">
                <h2>"Reports"</h2>
                <span class="page-header__info">
                    {move || if loading.get() {
                        "Loading...".to_string()
                    } else {
                        format!("{} of {} orders", filtered.with(|f| f.len()), orders.with(|o| o.len()))
                    }}
                </span>
                <button class="btn" on:click=on_export disabled=move || loading.get()>
                    "Export CSV"
                </button>
            </div>

            <Show when=move || message.get().is_some()>
                <div class="notice">{move || message.get().unwrap_or_default()}</div>
            </Show>

            <div class="filter-panel">
                <label class="filter-panel__mode">
                    <input
                        type="radio"
                        name="report-filter-mode"
                        prop:checked=move || is_mode(FilterMode::TimeBucket)
                        on:change=move |_| filter.update(|f| {
                            let bucket = f.bucket;
                            f.select_bucket(bucket);
                        })
                    />
                    "Time period"
                </label>
                <select
                    prop:value=move || filter.with(|f| f.bucket.key())
                    on:change=move |ev| {
                        let bucket = TimeBucket::from_key(&event_target_value(&ev));
                        filter.update(|f| f.select_bucket(bucket));
                    }
                >
                    {TimeBucket::ALL
                        .iter()
                        .map(|bucket| view! { <option value=bucket.key()>{bucket.label()}</option> })
                        .collect_view()}
                </select>

                <label class="filter-panel__mode">
                    <input
                        type="radio"
                        name="report-filter-mode"
                        prop:checked=move || is_mode(FilterMode::Custom)
                        on:change=move |_| filter.update(|f| f.use_custom())
                    />
                    "Custom range"
                </label>
                <input
                    type="text"
                    placeholder="Order ID from"
                    prop:value=move || draft.with(|d| d.order_id_from.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        edit_draft(Box::new(move |d| d.order_id_from = value));
                    }
                />
                <input
                    type="text"
                    placeholder="Order ID to"
                    prop:value=move || draft.with(|d| d.order_id_to.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        edit_draft(Box::new(move |d| d.order_id_to = value));
                    }
                />
                <DateInput
                    label="From"
                    value=Signal::derive(move || draft.with(|d| d.date_from))
                    on_change=Callback::new(move |day| edit_draft(Box::new(move |d| d.date_from = day)))
                />
                <DateInput
                    label="To"
                    value=Signal::derive(move || draft.with(|d| d.date_to))
                    on_change=Callback::new(move |day| edit_draft(Box::new(move |d| d.date_to = day)))
                />
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        {COLUMNS
                            .iter()
                            .map(|(_, label)| view! { <TableHeaderCell>{*label}</TableHeaderCell> })
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
                                    view! { <TableCell><TableCellLayout>{value}</TableCellLayout></TableCell> }
                                })
                                .collect_view();
                            view! { <TableRow>{cells}</TableRow> }
                        }
                    />
                </TableBody>
            </Table>

            <PaginationControls
                current_page=Signal::derive(move || page_view.with(|v| v.page))
                total_pages=Signal::derive(move || page_view.with(|v| v.total_pages))
                total_count=Signal::derive(move || page_view.with(|v| v.total_count))
                page_size=Signal::derive(move || pagination.with(|p| p.page_size))
                on_page_change=Callback::new(move |page: usize| {
                    let count = filtered.with_untracked(|f| f.len());
                    pagination.update(|p| {
                        p.go_to(page, count);
                    });
                })
                on_page_size_change=Callback::new(move |size: usize| {
                    let count = filtered.with_untracked(|f| f.len());
                    pagination.update(|p| {
                        p.set_page_size(size, &cfg.table.page_size_options, count);
                    });
                })
                page_size_options=cfg.table.page_size_options.clone()
            />
        </div>
    }
}

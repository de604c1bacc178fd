use crate::domain::a001_lab_order::bulk::DownloadMode;
use crate::domain::a001_lab_order::columns::SEARCH_FIELDS;
use crate::shared::config::config;
use crate::shared::list_utils::{process_rows, PageView, Pagination, Searchable, SortState};
use contracts::domain::a001_lab_order::LabOrder;
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct OrderListState {
    pub orders: Vec<LabOrder>,
    pub search: String,
    pub sort: SortState,
    pub pagination: Pagination,
    pub selected_ids: HashSet<String>,
    pub download_mode: DownloadMode,
    pub is_loaded: bool,
    /// A bulk action is running
    pub busy: bool,
    /// Last bulk action summary
    pub notice: Option<String>,
}

impl Default for OrderListState {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            search: String::new(),
            sort: SortState::default(),
            pagination: Pagination::new(config().table.default_page_size),
            selected_ids: HashSet::new(),
            download_mode: DownloadMode::default(),
            is_loaded: false,
            busy: false,
            notice: None,
        }
    }
}

impl OrderListState {
    fn keep(&self) -> impl Fn(&LabOrder) -> bool + '_ {
        move |order| order.matches_filter(&self.search, &SEARCH_FIELDS)
    }

    /// Rows for the current page
    pub fn page_view(&self) -> PageView<LabOrder> {
        process_rows(&self.orders, self.keep(), &self.sort, &self.pagination)
    }

    pub fn filtered_count(&self) -> usize {
        let keep = self.keep();
        self.orders.iter().filter(|o| keep(o)).count()
    }

    /// Replace the collection after a (re)load; drops selections that vanished
    pub fn set_orders(&mut self, orders: Vec<LabOrder>) {
        let ids: HashSet<&str> = orders.iter().map(|o| o.orderid.as_str()).collect();
        self.selected_ids.retain(|id| ids.contains(id.as_str()));
        self.orders = orders;
        self.is_loaded = true;
        let count = self.filtered_count();
        self.pagination.clamp(count);
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.pagination.page = 1;
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let count = self.filtered_count();
        self.pagination.go_to(page, count)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let count = self.filtered_count();
        self.pagination
            .set_page_size(page_size, &config().table.page_size_options, count)
    }

    pub fn toggle_selected(&mut self, id: String, checked: bool) {
        if checked {
            self.selected_ids.insert(id);
        } else {
            self.selected_ids.remove(&id);
        }
    }

    /// Select or clear every row on the current page
    pub fn select_visible(&mut self, checked: bool) {
        for order in self.page_view().rows {
            self.toggle_selected(order.orderid, checked);
        }
    }

    /// Selected records, in list order
    pub fn selected_orders(&self) -> Vec<LabOrder> {
        self.orders
            .iter()
            .filter(|o| self.selected_ids.contains(&o.orderid))
            .cloned()
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }
}

// State lives in the component scope, so leaving the page drops the selection
pub fn create_state() -> RwSignal<OrderListState> {
    RwSignal::new(OrderListState::default())
}

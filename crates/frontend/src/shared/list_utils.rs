//! Generic list utilities: search, three-state sort, pagination and the search input
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::cmp::Ordering;

/// Row types that expose their cells as text for searching and sorting
pub trait Searchable {
    /// Stringified value of a column; `None` (or empty) means "missing"
    fn get_field_value(&self, field: &str) -> Option<String>;

    /// Case-insensitive substring match against any of the given columns
    fn matches_filter(&self, filter: &str, fields: &[&str]) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        fields.iter().any(|field| {
            self.get_field_value(field)
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Single-column sort that cycles ascending -> descending -> none on repeated clicks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub current: Option<SortSpec>,
}

impl SortState {
    pub fn toggle(&mut self, field: &str) {
        self.current = match self.current.take() {
            Some(spec) if spec.field == field => match spec.direction {
                SortDirection::Ascending => Some(SortSpec {
                    field: spec.field,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec {
                field: field.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
    }

    pub fn direction_for(&self, field: &str) -> Option<SortDirection> {
        self.current
            .as_ref()
            .filter(|spec| spec.field == field)
            .map(|spec| spec.direction)
    }
}

fn as_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compare two cell values. Numbers sort before text; numbers compare
/// numerically, text as case-folded with the raw text as a tiebreak.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Stable sort by the active column. Missing values go last in both directions.
pub fn sort_list<T: Searchable>(items: &mut [T], sort: &SortState) {
    let Some(spec) = sort.current.as_ref() else {
        return;
    };
    items.sort_by(|a, b| {
        let left = present(a.get_field_value(&spec.field));
        let right = present(b.get_field_value(&spec.field));
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(l), Some(r)) => {
                let cmp = compare_values(&l, &r);
                match spec.direction {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            }
        }
    });
}

/// Keep rows matching the search query in any of `fields`
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str, fields: &[&str]) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.matches_filter(filter, fields))
        .cloned()
        .collect()
}

/// Page window over a filtered list. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Move to `page`. Requests outside `[1, total_pages]` are ignored.
    pub fn go_to(&mut self, page: usize, total_count: usize) -> bool {
        if page < 1 || page > self.total_pages(total_count) {
            return false;
        }
        self.page = page;
        true
    }

    /// Change the page size to one of `options`, keeping the page in range
    pub fn set_page_size(&mut self, page_size: usize, options: &[usize], total_count: usize) -> bool {
        if !options.contains(&page_size) {
            return false;
        }
        self.page_size = page_size;
        self.clamp(total_count);
        true
    }

    /// Pull the current page back into `[1, total_pages]`
    pub fn clamp(&mut self, total_count: usize) {
        self.page = self.page.clamp(1, self.total_pages(total_count));
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page.max(1) - 1) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

/// One rendered page of a processed list
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub rows: Vec<T>,
    /// Rows passing the filter, across all pages
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

/// filter -> sort -> paginate, always in that order.
///
/// The returned page is clamped into range; the window passed in is not modified.
pub fn process_rows<T, F>(
    items: &[T],
    keep: F,
    sort: &SortState,
    pagination: &Pagination,
) -> PageView<T>
where
    T: Searchable + Clone,
    F: Fn(&T) -> bool,
{
    let mut filtered: Vec<T> = items.iter().filter(|item| keep(item)).cloned().collect();
    sort_list(&mut filtered, sort);

    let mut window = *pagination;
    window.clamp(filtered.len());

    PageView {
        rows: window.slice(&filtered).to_vec(),
        total_count: filtered.len(),
        total_pages: window.total_pages(filtered.len()),
        page: window.page,
    }
}

/// Sort indicator for a column header
pub fn get_sort_indicator(sort: &SortState, field: &str) -> &'static str {
    match sort.direction_for(field) {
        Some(SortDirection::Ascending) => " ▲",
        Some(SortDirection::Descending) => " ▼",
        None => " ⇅",
    }
}

pub fn get_sort_class(sort: &SortState, field: &str) -> &'static str {
    if sort.direction_for(field).is_some() {
        "sort-icon active"
    } else {
        "sort-icon"
    }
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current applied filter value
    #[prop(into)]
    value: Signal<String>,
    /// Called with the new value once typing pauses
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
    /// Debounce delay in milliseconds
    #[prop(optional)]
    debounce_ms: Option<u32>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };
    let delay = debounce_ms.unwrap_or(crate::shared::config::config().timing.search_debounce_ms);

    let (input_value, set_input_value) = signal(value.get_untracked());

    // Replacing the stored timeout drops (and cancels) the previous one
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timeout = Timeout::new(delay, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=("search-input--active", is_filter_active)
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    "×"
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        name: &'static str,
    }

    impl Searchable for Row {
        fn get_field_value(&self, field: &str) -> Option<String> {
            match field {
                "id" => Some(self.id.to_string()),
                "name" => Some(self.name.to_string()),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "10", name: "crown" },
            Row { id: "9", name: "" },
            Row { id: "100", name: "Bridge" },
            Row { id: "abc", name: "implant" },
        ]
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_search_matches_any_column_case_insensitive() {
        let found = filter_list(&rows(), "BRID", &["id", "name"]);
        assert_eq!(ids(&found), vec!["100"]);
        let found = filter_list(&rows(), "10", &["id", "name"]);
        assert_eq!(ids(&found), vec!["10", "100"]);
        assert_eq!(filter_list(&rows(), "  ", &["id"]).len(), 4);
        assert!(filter_list(&rows(), "crown", &["id"]).is_empty());
    }

    #[test]
    fn test_sort_toggle_cycles_three_states() {
        let mut sort = SortState::default();
        sort.toggle("id");
        assert_eq!(sort.direction_for("id"), Some(SortDirection::Ascending));
        sort.toggle("id");
        assert_eq!(sort.direction_for("id"), Some(SortDirection::Descending));
        sort.toggle("id");
        assert_eq!(sort.current, None);

        sort.toggle("id");
        sort.toggle("name");
        assert_eq!(sort.direction_for("name"), Some(SortDirection::Ascending));
        assert_eq!(sort.direction_for("id"), None);
    }

    #[test]
    fn test_three_clicks_restore_original_order() {
        let original = rows();
        let mut sort = SortState::default();
        for _ in 0..3 {
            sort.toggle("name");
        }
        let mut items = original.clone();
        sort_list(&mut items, &sort);
        assert_eq!(items, original);
    }

    #[test]
    fn test_numeric_and_text_comparison() {
        let mut sort = SortState::default();
        sort.toggle("id");
        let mut items = rows();
        sort_list(&mut items, &sort);
        // "abc" is compared as text against numbers; numbers compare numerically
        assert_eq!(ids(&items[..3]), vec!["9", "10", "100"]);
        assert_eq!(compare_values("Bridge", "crown"), Ordering::Less);
        assert_eq!(compare_values("2", "10"), Ordering::Less);
    }

    #[test]
    fn test_mixed_numbers_and_text_sort_in_both_directions() {
        const CELLS: [&str; 12] = [
            "1", "2", "3", "10", "11", "20", "1-3", "2,3", "11,12", "9a", "100", "30",
        ];
        let data: Vec<Row> = (0..72)
            .map(|i| Row {
                id: CELLS[(i * 7) % CELLS.len()],
                name: "",
            })
            .collect();

        let mut sort = SortState::default();
        sort.toggle("id");
        let mut asc = data.clone();
        sort_list(&mut asc, &sort);
        assert!(asc
            .windows(2)
            .all(|w| compare_values(w[0].id, w[1].id) != Ordering::Greater));
        assert_eq!(asc.first().unwrap().id, "1");
        assert_eq!(asc.last().unwrap().id, "9a");
        let first_text = asc.iter().position(|r| as_number(r.id).is_none()).unwrap();
        assert!(asc[first_text..].iter().all(|r| as_number(r.id).is_none()));

        sort.toggle("id");
        let mut desc = data;
        sort_list(&mut desc, &sort);
        assert!(desc
            .windows(2)
            .all(|w| compare_values(w[0].id, w[1].id) != Ordering::Less));
        assert_eq!(desc.first().unwrap().id, "9a");
        assert_eq!(desc.last().unwrap().id, "1");
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let mut sort = SortState::default();
        sort.toggle("name");
        let mut items = rows();
        sort_list(&mut items, &sort);
        assert_eq!(items.last().unwrap().id, "9");

        sort.toggle("name");
        let mut items = rows();
        sort_list(&mut items, &sort);
        assert_eq!(ids(&items), vec!["abc", "10", "100", "9"]);
    }

    #[test]
    fn test_pagination_bounds() {
        let mut p = Pagination::new(10);
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.total_pages(25), 3);
        assert!(!p.go_to(0, 25));
        assert!(!p.go_to(4, 25));
        assert_eq!(p.page, 1);
        assert!(p.go_to(3, 25));
        assert_eq!(p.page, 3);

        // Shrinking data pulls the page back into range
        p.clamp(11);
        assert_eq!(p.page, 2);

        assert!(!p.set_page_size(7, &[10, 25], 11));
        assert!(p.set_page_size(25, &[10, 25], 11));
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_slice_last_page() {
        let items: Vec<u32> = (1..=23).collect();
        let mut p = Pagination::new(10);
        p.go_to(3, items.len());
        assert_eq!(p.slice(&items), &[21, 22, 23]);
    }

    #[test]
    fn test_process_rows_page_change_keeps_eligible_set() {
        let data: Vec<Row> = (0..30)
            .map(|i| Row {
                id: Box::leak(i.to_string().into_boxed_str()),
                name: if i % 2 == 0 { "even" } else { "odd" },
            })
            .collect();
        let sort = SortState::default();
        let keep = |r: &Row| r.matches_filter("even", &["name"]);

        let mut p = Pagination::new(10);
        let first = process_rows(&data, keep, &sort, &p);
        p.go_to(2, first.total_count);
        let second = process_rows(&data, keep, &sort, &p);

        assert_eq!(first.total_count, 15);
        assert_eq!(second.total_count, 15);
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.rows.len(), 5);
        assert!(second.rows.iter().all(|r| r.name == "even"));
    }

    #[test]
    fn test_process_rows_empty_input() {
        let view = process_rows(&Vec::<Row>::new(), |_| true, &SortState::default(), &Pagination::new(10));
        assert!(view.rows.is_empty());
        assert_eq!(view.total_count, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
    }
}

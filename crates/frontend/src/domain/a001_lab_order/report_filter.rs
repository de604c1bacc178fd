//! Report filters: relative time buckets or a custom order-ID/date range.
//!
//! Only one mode is applied at a time. Switching modes keeps the inputs of the
//! other mode so switching back restores them.

use crate::shared::date_utils::parse_lab_date;
use chrono::{Duration, NaiveDate};
use contracts::domain::a001_lab_order::LabOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBucket {
    Today,
    Last7Days,
    Last30Days,
    #[default]
    AllTime,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Today,
        TimeBucket::Last7Days,
        TimeBucket::Last30Days,
        TimeBucket::AllTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Today => "Today",
            TimeBucket::Last7Days => "Last 7 Days",
            TimeBucket::Last30Days => "Last 30 Days",
            TimeBucket::AllTime => "All Time",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TimeBucket::Today => "today",
            TimeBucket::Last7Days => "weekly",
            TimeBucket::Last30Days => "monthly",
            TimeBucket::AllTime => "all",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.key() == key)
            .unwrap_or_default()
    }

    /// Whether an order stamped `order_date` falls in this bucket relative to `today`
    pub fn contains(&self, order_date: &str, today: NaiveDate) -> bool {
        if *self == TimeBucket::AllTime {
            return true;
        }
        let Some(day) = parse_lab_date(order_date) else {
            return false;
        };
        match self {
            TimeBucket::Today => day == today,
            TimeBucket::Last7Days => day >= today - Duration::days(7),
            TimeBucket::Last30Days => day >= today - Duration::days(30),
            TimeBucket::AllTime => true,
        }
    }
}

/// Raw custom range inputs as typed by the user; blank fields are "no bound"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomRange {
    pub order_id_from: String,
    pub order_id_to: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

fn numeric_bound(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

impl CustomRange {
    pub fn is_empty(&self) -> bool {
        numeric_bound(&self.order_id_from).is_none()
            && numeric_bound(&self.order_id_to).is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// All supplied bounds, inclusive, ANDed together
    pub fn matches(&self, order: &LabOrder) -> bool {
        let id_from = numeric_bound(&self.order_id_from);
        let id_to = numeric_bound(&self.order_id_to);
        if id_from.is_some() || id_to.is_some() {
            let Some(id) = order.numeric_id() else {
                return false;
            };
            if id_from.is_some_and(|from| id < from) || id_to.is_some_and(|to| id > to) {
                return false;
            }
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(day) = parse_lab_date(&order.order_date) else {
                return false;
            };
            if self.date_from.is_some_and(|from| day < from)
                || self.date_to.is_some_and(|to| day > to)
            {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    TimeBucket,
    Custom,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilterState {
    pub mode: FilterMode,
    pub bucket: TimeBucket,
    pub custom: CustomRange,
}

impl ReportFilterState {
    pub fn select_bucket(&mut self, bucket: TimeBucket) {
        self.bucket = bucket;
        self.mode = FilterMode::TimeBucket;
    }

    pub fn use_custom(&mut self) {
        self.mode = FilterMode::Custom;
    }

    pub fn matches(&self, order: &LabOrder, today: NaiveDate) -> bool {
        match self.mode {
            FilterMode::TimeBucket => self.bucket.contains(&order.order_date, today),
            FilterMode::Custom => self.custom.matches(order),
        }
    }

    pub fn apply(&self, orders: &[LabOrder], today: NaiveDate) -> Vec<LabOrder> {
        orders
            .iter()
            .filter(|order| self.matches(order, today))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, date: &str) -> LabOrder {
        LabOrder {
            orderid: id.to_string(),
            order_date: date.to_string(),
            ..Default::default()
        }
    }

    fn ids(orders: &[LabOrder]) -> Vec<String> {
        orders.iter().map(|o| o.orderid.clone()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, 14).unwrap()
    }

    fn sample() -> Vec<LabOrder> {
        vec![
            order("1", "14-Mar-2023 07:32:31am"),
            order("2", "07-Mar-2023 11:00:00pm"),
            order("3", "06-Mar-2023 09:00:00am"),
            order("4", "12-Feb-2023 09:00:00am"),
            order("5", "11-Feb-2023 09:00:00am"),
            order("6", "not a date"),
            order("7", "20-Mar-2023 10:00:00am"),
        ]
    }

    fn bucket(b: TimeBucket) -> Vec<String> {
        let mut state = ReportFilterState::default();
        state.select_bucket(b);
        ids(&state.apply(&sample(), today()))
    }

    #[test]
    fn test_time_buckets() {
        assert_eq!(bucket(TimeBucket::Today), vec!["1"]);
        assert_eq!(bucket(TimeBucket::Last7Days), vec!["1", "2", "7"]);
        assert_eq!(bucket(TimeBucket::Last30Days), vec!["1", "2", "3", "4", "7"]);
        assert_eq!(bucket(TimeBucket::AllTime).len(), 7);
    }

    #[test]
    fn test_time_buckets_are_nested() {
        let chain = [
            TimeBucket::Today,
            TimeBucket::Last7Days,
            TimeBucket::Last30Days,
            TimeBucket::AllTime,
        ];
        for pair in chain.windows(2) {
            let narrow = bucket(pair[0]);
            let wide = bucket(pair[1]);
            assert!(narrow.iter().all(|id| wide.contains(id)), "{:?}", pair);
        }
    }

    #[test]
    fn test_order_id_range_is_inclusive() {
        let orders: Vec<LabOrder> = ["999", "1001", "1500", "2000", "2001"]
            .iter()
            .map(|id| order(id, ""))
            .collect();
        let mut state = ReportFilterState::default();
        state.custom.order_id_from = "1001".into();
        state.custom.order_id_to = "2000".into();
        state.use_custom();
        assert_eq!(ids(&state.apply(&orders, today())), vec!["1001", "1500", "2000"]);
    }

    #[test]
    fn test_non_numeric_ids_excluded_from_id_range() {
        let orders = vec![order("A-12", ""), order("1200", "")];
        let range = CustomRange {
            order_id_from: "1000".into(),
            ..Default::default()
        };
        assert!(!range.matches(&orders[0]));
        assert!(range.matches(&orders[1]));
    }

    #[test]
    fn test_date_range_day_granularity() {
        let range = CustomRange {
            date_from: NaiveDate::from_ymd_opt(2023, 3, 7),
            date_to: NaiveDate::from_ymd_opt(2023, 3, 14),
            ..Default::default()
        };
        let kept: Vec<String> = sample()
            .into_iter()
            .filter(|o| range.matches(o))
            .map(|o| o.orderid)
            .collect();
        assert_eq!(kept, vec!["1", "2"]);
    }

    #[test]
    fn test_blank_custom_range_keeps_everything() {
        let range = CustomRange {
            order_id_from: "  ".into(),
            order_id_to: "abc".into(),
            ..Default::default()
        };
        assert!(range.is_empty());
        assert!(sample().iter().all(|o| range.matches(o)));
    }

    #[test]
    fn test_switching_mode_keeps_other_inputs() {
        let mut state = ReportFilterState::default();
        state.custom.order_id_from = "5".into();
        state.use_custom();
        assert_eq!(ids(&state.apply(&sample(), today())), vec!["5", "6", "7"]);

        state.select_bucket(TimeBucket::Today);
        assert_eq!(ids(&state.apply(&sample(), today())), vec!["1"]);
        assert_eq!(state.custom.order_id_from, "5");
    }
}

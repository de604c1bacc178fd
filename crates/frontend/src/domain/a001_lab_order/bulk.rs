//! Bulk actions over the selected orders: send for redesign, download files.
//!
//! Both walk the selection strictly one order at a time and never stop early;
//! every skip and failure ends up in the summary shown to the user.

use super::api::{order_files_endpoint, REDESIGN_ENDPOINT};
use crate::shared::api_utils::{file_download_url, file_name_from_path};
use crate::shared::downloads::DownloadTarget;
use crate::system::gateway::{Gateway, RequestOptions};
use contracts::domain::a001_lab_order::{
    LabOrder, OrderFilesResponse, OrderStatus, RedesignRequest,
};
use std::collections::HashSet;

/// Selected orders grouped by whether they can be sent for redesign
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedesignPlan {
    /// Status New: not produced yet, nothing to redesign
    pub new_orders: Vec<String>,
    pub already_in_redesign: Vec<String>,
    pub eligible: Vec<String>,
}

impl RedesignPlan {
    pub fn is_empty(&self) -> bool {
        self.new_orders.is_empty() && self.already_in_redesign.is_empty() && self.eligible.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.new_orders.len() + self.already_in_redesign.len()
    }
}

/// Partition the selection, in the order the records are listed
pub fn plan_redesign(selected: &HashSet<String>, orders: &[LabOrder]) -> RedesignPlan {
    let mut plan = RedesignPlan::default();
    for order in orders.iter().filter(|o| selected.contains(&o.orderid)) {
        let id = order.orderid.clone();
        match order.status {
            OrderStatus::New => plan.new_orders.push(id),
            OrderStatus::Redesign => plan.already_in_redesign.push(id),
            _ => plan.eligible.push(id),
        }
    }
    plan
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedesignSummaryKind {
    NothingSelected,
    NothingEligible,
    AllSent,
    PartiallyIneligible,
    PartialFailure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedesignOutcome {
    pub plan: RedesignPlan,
    pub succeeded: Vec<String>,
    /// (order id, reason)
    pub failed: Vec<(String, String)>,
}

impl RedesignOutcome {
    pub fn kind(&self) -> RedesignSummaryKind {
        if self.plan.is_empty() {
            RedesignSummaryKind::NothingSelected
        } else if self.plan.eligible.is_empty() {
            RedesignSummaryKind::NothingEligible
        } else if !self.failed.is_empty() {
            RedesignSummaryKind::PartialFailure
        } else if self.plan.skipped_count() > 0 {
            RedesignSummaryKind::PartiallyIneligible
        } else {
            RedesignSummaryKind::AllSent
        }
    }

    /// One consolidated message for the whole batch
    pub fn summary(&self) -> String {
        let plan = &self.plan;
        let mut lines = Vec::new();
        match self.kind() {
            RedesignSummaryKind::NothingSelected => return "No orders selected.".to_string(),
            RedesignSummaryKind::NothingEligible => {
                lines.push("None of the selected orders can be sent for redesign.".to_string())
            }
            _ => {
                if !self.succeeded.is_empty() {
                    lines.push(format!(
                        "Sent for redesign: {}.",
                        self.succeeded.join(", ")
                    ));
                }
            }
        }
        if !plan.new_orders.is_empty() {
            lines.push(format!(
                "Skipped, status New: {}.",
                plan.new_orders.join(", ")
            ));
        }
        if !plan.already_in_redesign.is_empty() {
            lines.push(format!(
                "Skipped, already in redesign: {}.",
                plan.already_in_redesign.join(", ")
            ));
        }
        if !self.failed.is_empty() {
            let failures: Vec<String> = self
                .failed
                .iter()
                .map(|(id, reason)| format!("{} ({})", id, reason))
                .collect();
            lines.push(format!("Failed: {}.", failures.join(", ")));
        }
        lines.join("\n")
    }
}

/// Submit every eligible order, one request at a time
pub async fn submit_redesign(
    gateway: &Gateway,
    plan: RedesignPlan,
    comment: Option<String>,
) -> RedesignOutcome {
    let mut outcome = RedesignOutcome {
        plan,
        ..Default::default()
    };

    for id in outcome.plan.eligible.clone() {
        let request = RedesignRequest {
            orderid: id.clone(),
            comment: comment.clone(),
        };
        match gateway
            .send(REDESIGN_ENDPOINT, RequestOptions::post_json(&request))
            .await
        {
            Some(payload) if payload.is_success() => {
                log::debug!("Order {} sent for redesign", id);
                outcome.succeeded.push(id);
            }
            Some(payload) => {
                let reason = payload.envelope().message_or("rejected");
                log::warn!("Redesign of order {} rejected: {}", id, reason);
                outcome.failed.push((id, reason));
            }
            None => {
                log::warn!("Redesign of order {} got no response", id);
                outcome.failed.push((id, "no response".to_string()));
            }
        }
    }

    outcome
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadMode {
    /// Look up every file attached to the order
    #[default]
    AllFiles,
    /// Only the order's designated file
    DesignatedFile,
}

impl DownloadMode {
    pub fn key(&self) -> &'static str {
        match self {
            DownloadMode::AllFiles => "all",
            DownloadMode::DesignatedFile => "designated",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "designated" => DownloadMode::DesignatedFile,
            _ => DownloadMode::AllFiles,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: Vec<String>,
    /// Orders with nothing to download
    pub missing: Vec<String>,
    /// (file, reason)
    pub failed: Vec<(String, String)>,
}

impl DownloadReport {
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Downloaded {} file(s).", self.downloaded.len())];
        if !self.missing.is_empty() {
            lines.push(format!(
                "No files found for orders: {}.",
                self.missing.join(", ")
            ));
        }
        if !self.failed.is_empty() {
            let failures: Vec<String> = self
                .failed
                .iter()
                .map(|(file, reason)| format!("{} ({})", file, reason))
                .collect();
            lines.push(format!("Failed: {}.", failures.join(", ")));
        }
        lines.join("\n")
    }
}

async fn lookup_files(gateway: &Gateway, orderid: &str) -> Vec<String> {
    let Some(payload) = gateway.get(&order_files_endpoint(orderid)).await else {
        return Vec::new();
    };
    if !payload.is_success() {
        return Vec::new();
    }
    payload
        .decode::<OrderFilesResponse>()
        .map(|r| r.files)
        .unwrap_or_default()
        .into_iter()
        .filter(|path| !path.trim().is_empty())
        .collect()
}

/// Files already listed on the record, if any
fn attached_files(order: &LabOrder) -> Option<Vec<String>> {
    let files: Vec<String> = order
        .files
        .iter()
        .filter(|path| !path.trim().is_empty())
        .cloned()
        .collect();
    (!files.is_empty()).then_some(files)
}

/// Download files for the selected orders, pausing `delay_ms` between downloads
pub async fn download_orders(
    gateway: &Gateway,
    target: &dyn DownloadTarget,
    orders: &[LabOrder],
    mode: DownloadMode,
    base_url: &str,
    delay_ms: u32,
) -> DownloadReport {
    let mut report = DownloadReport::default();
    let mut first = true;

    for order in orders {
        let paths = match mode {
            DownloadMode::AllFiles => match attached_files(order) {
                Some(files) => files,
                None => lookup_files(gateway, &order.orderid).await,
            },
            DownloadMode::DesignatedFile if order.file_path.trim().is_empty() => Vec::new(),
            DownloadMode::DesignatedFile => vec![order.file_path.clone()],
        };

        if paths.is_empty() {
            log::warn!("No files for order {}", order.orderid);
            report.missing.push(order.orderid.clone());
            continue;
        }

        for path in paths {
            if !first {
                target.pause(delay_ms).await;
            }
            first = false;

            let filename = file_name_from_path(&path);
            match target.trigger_download(&file_download_url(base_url, &path), &filename) {
                Ok(()) => report.downloaded.push(filename),
                Err(e) => {
                    log::error!("Download of {} failed: {}", path, e);
                    report.failed.push((filename, e));
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::gateway::testing::harness;
    use async_trait::async_trait;
    use std::cell::RefCell;

    fn order(id: &str, status: OrderStatus) -> LabOrder {
        LabOrder {
            orderid: id.to_string(),
            status,
            ..Default::default()
        }
    }

    fn selection(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[derive(Default)]
    struct FakeDownloads {
        started: RefCell<Vec<(String, String)>>,
        pauses: RefCell<Vec<u32>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait(?Send)]
    impl DownloadTarget for FakeDownloads {
        fn trigger_download(&self, url: &str, filename: &str) -> Result<(), String> {
            if self.fail_on == Some(filename) {
                return Err("blocked".to_string());
            }
            self.started
                .borrow_mut()
                .push((url.to_string(), filename.to_string()));
            Ok(())
        }

        async fn pause(&self, ms: u32) {
            self.pauses.borrow_mut().push(ms);
        }
    }

    #[test]
    fn test_plan_partitions_by_status() {
        let orders = vec![
            order("1", OrderStatus::New),
            order("2", OrderStatus::Completed),
            order("3", OrderStatus::Redesign),
            order("4", OrderStatus::QC),
            order("5", OrderStatus::Completed),
        ];
        let plan = plan_redesign(&selection(&["1", "2", "3", "4"]), &orders);
        assert_eq!(plan.new_orders, vec!["1"]);
        assert_eq!(plan.already_in_redesign, vec!["3"]);
        assert_eq!(plan.eligible, vec!["2", "4"]);
    }

    #[tokio::test]
    async fn test_all_new_selection_makes_no_calls() {
        let h = harness(Some("abc"));
        let orders = vec![order("1", OrderStatus::New), order("2", OrderStatus::New)];
        let plan = plan_redesign(&selection(&["1", "2"]), &orders);
        let outcome = submit_redesign(&h.gateway, plan, None).await;

        assert_eq!(h.transport.calls(), 0);
        assert_eq!(outcome.kind(), RedesignSummaryKind::NothingEligible);
        assert!(outcome
            .summary()
            .starts_with("None of the selected orders can be sent for redesign."));
        assert!(outcome.summary().contains("Skipped, status New: 1, 2."));
    }

    #[tokio::test]
    async fn test_redesign_is_sequential_and_reports_failures() {
        let h = harness(Some("abc"));
        h.transport.respond(200, r#"{"status":"success"}"#);
        h.transport
            .respond(200, r#"{"status":"error","message":"Order locked"}"#);
        let orders = vec![
            order("10", OrderStatus::Completed),
            order("11", OrderStatus::Pending),
            order("12", OrderStatus::Redesign),
        ];
        let plan = plan_redesign(&selection(&["10", "11", "12"]), &orders);
        let outcome = submit_redesign(&h.gateway, plan, Some("margin".into())).await;

        let requests = h.transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].body.as_deref(),
            Some(r#"{"orderid":"10","comment":"margin"}"#)
        );
        assert_eq!(outcome.succeeded, vec!["10"]);
        assert_eq!(outcome.failed, vec![("11".to_string(), "Order locked".to_string())]);
        assert_eq!(outcome.kind(), RedesignSummaryKind::PartialFailure);
        assert_eq!(
            outcome.summary(),
            "Sent for redesign: 10.\nSkipped, already in redesign: 12.\nFailed: 11 (Order locked)."
        );
    }

    #[tokio::test]
    async fn test_partially_ineligible_summary() {
        let h = harness(Some("abc"));
        h.transport.respond(200, r#"{"status":"success"}"#);
        let orders = vec![order("1", OrderStatus::New), order("2", OrderStatus::QC)];
        let plan = plan_redesign(&selection(&["1", "2"]), &orders);
        let outcome = submit_redesign(&h.gateway, plan, None).await;
        assert_eq!(outcome.kind(), RedesignSummaryKind::PartiallyIneligible);
        assert_eq!(
            outcome.summary(),
            "Sent for redesign: 2.\nSkipped, status New: 1."
        );
    }

    #[test]
    fn test_empty_selection() {
        let outcome = RedesignOutcome::default();
        assert_eq!(outcome.kind(), RedesignSummaryKind::NothingSelected);
        assert_eq!(outcome.summary(), "No orders selected.");
    }

    #[tokio::test]
    async fn test_download_all_files_with_delay_and_missing() {
        let h = harness(Some("abc"));
        h.transport.respond(
            200,
            r#"{"status":"success","files":["cases/1/upper.stl","cases/1/lower.stl"]}"#,
        );
        h.transport.respond(200, r#"{"status":"success","files":[]}"#);
        h.transport.respond(200, r#"{"status":"success","files":["cases/3/crown.stl"]}"#);
        let orders = vec![
            order("1", OrderStatus::Completed),
            order("2", OrderStatus::Completed),
            order("3", OrderStatus::Completed),
        ];
        let target = FakeDownloads::default();
        let report = download_orders(
            &h.gateway,
            &target,
            &orders,
            DownloadMode::AllFiles,
            "https://lab.example/api",
            500,
        ).await;

        assert_eq!(report.downloaded, vec!["upper.stl", "lower.stl", "crown.stl"]);
        assert_eq!(report.missing, vec!["2"]);
        assert_eq!(*target.pauses.borrow(), vec![500, 500]);
        assert_eq!(
            target.started.borrow()[0].0,
            "https://lab.example/api/files/download?path=cases%2F1%2Fupper.stl"
        );
        assert_eq!(
            report.summary(),
            "Downloaded 3 file(s).\nNo files found for orders: 2."
        );
    }

    #[tokio::test]
    async fn test_download_all_files_uses_attached_list_before_lookup() {
        let h = harness(Some("abc"));
        h.transport.respond(200, r#"{"status":"success","files":["cases/6/scan.stl"]}"#);
        let mut listed = order("5", OrderStatus::Completed);
        listed.files = vec!["cases/5/bite.stl".into(), " ".into()];
        let orders = vec![listed, order("6", OrderStatus::Completed)];
        let target = FakeDownloads::default();
        let report = download_orders(
            &h.gateway,
            &target,
            &orders,
            DownloadMode::AllFiles,
            "https://lab.example/api",
            500,
        ).await;

        // Only order 6 needed the lookup call
        assert_eq!(h.transport.calls(), 1);
        assert!(h.transport.requests.borrow()[0].url.ends_with("/admin/orders/6/files"));
        assert_eq!(report.downloaded, vec!["bite.stl", "scan.stl"]);
        assert!(report.missing.is_empty());
    }

    #[tokio::test]
    async fn test_download_designated_file_without_lookup() {
        let h = harness(Some("abc"));
        let mut with_file = order("7", OrderStatus::Completed);
        with_file.file_path = "cases/7/final.zip".into();
        let orders = vec![with_file, order("8", OrderStatus::QC)];
        let target = FakeDownloads {
            fail_on: None,
            ..Default::default()
        };
        let report = download_orders(
            &h.gateway,
            &target,
            &orders,
            DownloadMode::DesignatedFile,
            "https://lab.example/api",
            500,
        ).await;

        assert_eq!(h.transport.calls(), 0);
        assert_eq!(report.downloaded, vec!["final.zip"]);
        assert_eq!(report.missing, vec!["8"]);
        assert!(target.pauses.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_download_failures_do_not_stop_the_batch() {
        let h = harness(Some("abc"));
        let mut a = order("1", OrderStatus::Completed);
        a.file_path = "a/bad.stl".into();
        let mut b = order("2", OrderStatus::Completed);
        b.file_path = "b/good.stl".into();
        let target = FakeDownloads {
            fail_on: Some("bad.stl"),
            ..Default::default()
        };
        let report = download_orders(
            &h.gateway,
            &target,
            &[a, b],
            DownloadMode::DesignatedFile,
            "https://lab.example/api",
            250,
        ).await;
        assert_eq!(report.downloaded, vec!["good.stl"]);
        assert_eq!(report.failed, vec![("bad.stl".to_string(), "blocked".to_string())]);
        assert!(report.summary().ends_with("Failed: bad.stl (blocked)."));
    }
}

use crate::system::gateway::Gateway;
use contracts::domain::a001_lab_order::{LabOrder, OrderListResponse};

pub const ORDER_LIST_ENDPOINT: &str = "/admin/orders";
pub const REDESIGN_ENDPOINT: &str = "/admin/orders/redesign";

pub fn order_files_endpoint(orderid: &str) -> String {
    format!("/admin/orders/{}/files", urlencoding::encode(orderid))
}

/// Fetch the full order collection. `None` when the API gave no usable answer.
pub async fn refresh_records(gateway: &Gateway) -> Option<Vec<LabOrder>> {
    let payload = gateway.get(ORDER_LIST_ENDPOINT).await?;
    if !payload.is_success() {
        log::warn!(
            "Order list request rejected: {}",
            payload.message().unwrap_or_default()
        );
        return None;
    }
    let received = payload
        .0
        .get("orders")
        .and_then(|orders| orders.as_array())
        .map_or(0, |orders| orders.len());
    let response: OrderListResponse = payload.decode()?;

    // Rows are keyed and selected by order ID
    let orders: Vec<LabOrder> = response
        .orders
        .into_iter()
        .filter(|order| !order.orderid.trim().is_empty())
        .collect();
    if orders.len() < received {
        log::warn!(
            "Skipped {} malformed order record(s)",
            received - orders.len()
        );
    }
    log::debug!("Loaded {} orders", orders.len());
    Some(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::gateway::testing::harness;

    #[tokio::test]
    async fn test_refresh_records_decodes_orders() {
        let h = harness(Some("abc"));
        h.transport.respond(
            200,
            r#"{"status":"success","message":"ok","orders":[
                {"orderid": 1001, "status": "New"},
                {"orderid": "1002", "status": "QC"}
            ]}"#,
        );
        let orders = refresh_records(&h.gateway).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].orderid, "1002");
        assert!(h.transport.requests.borrow()[0].url.ends_with("/admin/orders"));
    }

    #[tokio::test]
    async fn test_refresh_records_skips_malformed_records() {
        let h = harness(Some("abc"));
        h.transport.respond(
            200,
            r#"{"status":"success","orders":[
                {"orderid":"1","status":"New"},
                {"status":"QC"},
                {"orderid":"3","status":["bad"]},
                {"orderid":"4","status":"Completed"}
            ]}"#,
        );
        let orders = refresh_records(&h.gateway).await.unwrap();
        let ids: Vec<&str> = orders.iter().map(|o| o.orderid.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[tokio::test]
    async fn test_refresh_records_rejected() {
        let h = harness(Some("abc"));
        h.transport
            .respond(200, r#"{"status":"error","message":"maintenance"}"#);
        assert_eq!(refresh_records(&h.gateway).await, None);
    }

    #[test]
    fn test_files_endpoint_escapes_id() {
        assert_eq!(order_files_endpoint("A 7"), "/admin/orders/A%207/files");
    }
}

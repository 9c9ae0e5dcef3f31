use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::routing::get;
use serde_json::json;

use super::*;
use crate::session::SessionController;
use crate::test_support;

#[test]
fn export_paths() {
    assert_eq!(ExportKind::Inventory.path(), "/reports/inventory-export");
    assert_eq!(ExportKind::Parties.path(), "/reports/parties-export");
    assert_eq!(ExportKind::Invoices.path(), "/reports/invoices-export");
}

#[tokio::test]
async fn export_returns_raw_bytes_and_summary_forwards_query() {
    let backend = test_support::spawn(
        Router::new()
            .route("/api/reports/parties-export", get(|| async { vec![0x50_u8, 0x4b, 0x03, 0x04] }))
            .route(
                "/api/reports/financial-summary",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({"from": q.get("start_date"), "net_profit": 10.0}))
                }),
            ),
    )
    .await;
    let controller = SessionController::new(&backend.config()).unwrap();

    let bytes = export(controller.api(), ExportKind::Parties, &[]).await.unwrap();
    assert_eq!(bytes, vec![0x50, 0x4b, 0x03, 0x04]);

    let summary = financial_summary(controller.api(), &[("start_date", "2024-01-01".to_owned())])
        .await
        .unwrap();
    assert_eq!(summary["from"], "2024-01-01");
}

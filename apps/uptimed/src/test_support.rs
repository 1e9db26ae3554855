use std::{net::SocketAddr, time::Duration};

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use tokio::sync::mpsc;
use uptime_probe::{MonitorRequest, Report, Setting};

pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// targets with fixed behaviour: /good (200), /bad (500), /slow (200 after 2s)
pub async fn spawn_sites() -> SocketAddr {
    let router = Router::new()
        .route("/good", get(|| async { "fine" }))
        .route("/bad", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "eventually"
            }),
        );
    spawn_server(router).await
}

/// stands in for the platform's return url and records every json body posted to it
pub struct CallbackReceiver {
    addr: SocketAddr,
    rx: mpsc::UnboundedReceiver<serde_json::Value>,
}

impl CallbackReceiver {
    pub async fn start() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let router = Router::new()
            .route(
                "/return",
                post(
                    |State(tx): State<mpsc::UnboundedSender<serde_json::Value>>,
                     Json(body): Json<serde_json::Value>| async move {
                        let _ = tx.send(body);
                        StatusCode::ACCEPTED
                    },
                ),
            )
            .with_state(tx);
        let addr = spawn_server(router).await;
        CallbackReceiver { addr, rx }
    }

    pub fn url(&self) -> String {
        format!("http://{}/return", self.addr)
    }

    pub async fn next_json(&mut self) -> serde_json::Value {
        tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("no callback within 5s")
            .expect("receiver closed")
    }

    pub async fn next_report(&mut self) -> Report {
        serde_json::from_value(self.next_json().await).unwrap()
    }

    /// true when nothing else arrives within `wait`
    pub async fn is_quiet_for(&mut self, wait: Duration) -> bool {
        tokio::time::timeout(wait, self.rx.recv()).await.is_err()
    }
}

/// a tick body with one `site-N` setting per url plus the interval setting
pub fn request_for(return_url: &str, sites: &[String]) -> MonitorRequest {
    let mut settings: Vec<Setting> = sites
        .iter()
        .enumerate()
        .map(|(i, site)| Setting {
            label: format!("site-{}", i + 1),
            kind: "text".into(),
            required: true,
            default: site.clone(),
        })
        .collect();
    settings.push(Setting {
        label: "interval".into(),
        kind: "text".into(),
        required: true,
        default: "* * * * *".into(),
    });

    MonitorRequest {
        channel_id: "chan-1".into(),
        return_url: return_url.into(),
        settings,
    }
}

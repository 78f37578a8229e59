use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use shanten_core::{analyze as calc_shanten, AnalyzeRequest, AnalyzeResult, ShantenError};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "shanten_web", about = "Shanten calculator over HTTP")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "SHANTEN_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    tracing::info!("listening on http://{}", args.addr);

    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

async fn analyze(Json(req): Json<AnalyzeRequest>) -> Result<Json<AnalyzeResult>, ApiError> {
    let result = calc_shanten(&req)?;
    tracing::debug!(
        shanten = result.shanten,
        shape = ?result.shape,
        tiles = req.tiles.len(),
        "analyzed"
    );
    Ok(Json(result))
}

#[derive(Debug)]
struct ApiError(String);

impl From<ShantenError> for ApiError {
    fn from(e: ShantenError) -> Self {
        ApiError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("rejected request: {}", self.0);
        (StatusCode::BAD_REQUEST, self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shanten_core::{CalledMeld, MeldType, Shape};

    fn request(tiles: &[&str]) -> AnalyzeRequest {
        AnalyzeRequest {
            tiles: tiles.iter().map(|s| s.to_string()).collect(),
            melds: vec![],
        }
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn analyzes_seven_pairs() {
        let req = request(&[
            "1m", "1m", "3m", "3m", "5p", "5p", "7p", "7p", "9s", "9s", "E", "E", "C",
        ]);
        let Json(res) = analyze(Json(req)).await.unwrap();
        assert_eq!(res.shanten, 0);
        assert_eq!(res.shape, Shape::SevenPairs);
    }

    #[tokio::test]
    async fn open_hand_reports_claims() {
        let mut req = request(&["5m", "5m", "6p", "7p", "8p", "2s", "3s", "4s", "E", "E"]);
        req.melds.push(CalledMeld {
            meld_type: MeldType::PON,
            tiles: vec!["F".into(), "F".into(), "F".into()],
        });
        let Json(res) = analyze(Json(req)).await.unwrap();
        assert!(!res.concealed);
        assert_eq!(res.shanten, 0);

        let body = serde_json::to_value(&res).unwrap();
        assert_eq!(body["shape"], "standard");
        assert_eq!(body["seven_pairs"], serde_json::Value::Null);
        assert_eq!(body["claims"]["kong"], serde_json::json!(["F"]));
    }

    #[tokio::test]
    async fn bad_hand_is_a_400() {
        let err = analyze(Json(request(&["1m", "2m"]))).await.unwrap_err();
        assert!(err.0.contains("Invalid hand size"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn request_json_shape() {
        let req: AnalyzeRequest = serde_json::from_str(
            r#"{"tiles":["1m","2m","3m","E"],"melds":[{"type":"ANKAN","tiles":["C","C","C","C"]}]}"#,
        )
        .unwrap();
        assert_eq!(req.melds[0].meld_type, MeldType::ANKAN);

        let req: AnalyzeRequest = serde_json::from_str(r#"{"tiles":["E"]}"#).unwrap();
        assert!(req.melds.is_empty());
    }
}

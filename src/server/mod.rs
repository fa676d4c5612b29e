//! HTTP 服务器模块
//!
//! 提供最大流计算和示例网络的 REST API

use crate::algorithm::{
    bfs_layers, min_cut, saturated_edges, EdmondsKarp, FlowOptions, FlowResult, MinCut,
};
use crate::error::{Error, Result};
use crate::network::{Preset, RandomNetwork};
use crate::types::{Capacity, CapacityMatrix, Edge, NodeIndex, MAX_NODES};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建路由
pub fn router() -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 示例网络
        .route("/presets", get(list_presets))
        // 图算法
        .route("/max-flow", post(max_flow))
        .route("/random", post(random_network))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// 启动服务器
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::ServerError(format!("绑定地址失败: {}", e)))?;

    tracing::info!("FlowTrace 服务器启动于 http://{}", addr);

    axum::serve(listener, router())
        .await
        .map_err(|e| Error::ServerError(format!("服务器错误: {}", e)))?;

    Ok(())
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 示例网络信息
#[derive(Debug, Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub capacity: CapacityMatrix,
    pub source: NodeIndex,
    pub sink: NodeIndex,
}

/// 列出内置示例
async fn list_presets() -> impl IntoResponse {
    let presets: Vec<PresetInfo> = Preset::all()
        .iter()
        .map(|p| PresetInfo {
            name: p.name(),
            capacity: p.matrix(),
            source: p.default_source(),
            sink: p.default_sink(),
        })
        .collect();
    (StatusCode::OK, Json(ApiResponse::success(presets)))
}

/// 最大流请求
///
/// 容量以原始二维数组接收，校验错误作为 400 返回而不是反序列化失败。
#[derive(Debug, Deserialize)]
pub struct MaxFlowRequest {
    pub capacity: Vec<Vec<Capacity>>,
    pub source: NodeIndex,
    pub sink: NodeIndex,
    #[serde(default)]
    pub options: FlowOptions,
}

/// 最大流响应
#[derive(Debug, Serialize)]
pub struct MaxFlowResponse {
    #[serde(flatten)]
    pub result: FlowResult,
    pub min_cut: Option<MinCut>,
    /// 饱和边及其容量
    pub saturated: Vec<(Edge, Capacity)>,
    /// 按 BFS 深度分层的节点，供前端布局
    pub layers: Vec<Vec<NodeIndex>>,
}

/// 最大流
async fn max_flow(payload: std::result::Result<Json<MaxFlowRequest>, JsonRejection>) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match solve(req) {
        Ok(response) => (StatusCode::OK, Json(ApiResponse::success(response))).into_response(),
        Err(e) => error_response(&e),
    }
}

fn solve(req: MaxFlowRequest) -> Result<MaxFlowResponse> {
    if req.capacity.len() > MAX_NODES {
        return Err(Error::InvalidInput(format!(
            "节点数 {} 超过上限 {}",
            req.capacity.len(),
            MAX_NODES
        )));
    }
    let capacity = CapacityMatrix::new(req.capacity)?;
    let result = EdmondsKarp::new(&capacity)
        .with_options(req.options)
        .max_flow(req.source, req.sink)?;
    let residual = result.final_residual();
    let min_cut = residual
        .as_ref()
        .map(|residual| min_cut(&capacity, residual, req.source));
    let saturated = residual
        .as_ref()
        .map(|residual| saturated_edges(&capacity, residual))
        .unwrap_or_default();
    let layers = bfs_layers(&capacity, req.source);
    Ok(MaxFlowResponse {
        result,
        min_cut,
        saturated,
        layers,
    })
}

/// 随机网络请求
#[derive(Debug, Deserialize)]
pub struct RandomRequest {
    pub nodes: usize,
    pub seed: Option<u64>,
    pub density: Option<f64>,
}

/// 生成随机网络
async fn random_network(payload: std::result::Result<Json<RandomRequest>, JsonRejection>) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut network = RandomNetwork::new(req.nodes);
    if let Some(density) = req.density {
        network = network.with_density(density);
    }

    match network.generate(&mut rng) {
        Ok(matrix) => (StatusCode::OK, Json(ApiResponse::success(matrix))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// 请求体无法解析时同样返回统一的错误结构
fn rejection_response(rejection: JsonRejection) -> Response {
    error_response(&Error::ParseError(rejection.body_text()))
}

fn error_response(e: &Error) -> Response {
    let status = if e.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(error = %e, "请求处理失败");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ApiResponse::<()>::error(&e.to_string()))).into_response()
}

/// API 响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_max_flow_route() {
        let (status, body) = post_json(
            "/max-flow",
            serde_json::json!({
                "capacity": [[0, 10, 8, 0, 0], [0, 0, 5, 15, 0], [0, 0, 0, 0, 10],
                             [0, 0, 6, 0, 12], [0, 0, 0, 0, 0]],
                "source": 0,
                "sink": 4
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["max_flow"], 18);
        assert_eq!(body["data"]["min_cut"]["capacity"], 18);
        assert_eq!(body["data"]["layers"][0], serde_json::json!([0]));
        assert!(!body["data"]["saturated"].as_array().unwrap().is_empty());
        let trace = body["data"]["trace"].as_array().unwrap();
        assert_eq!(trace.last().unwrap()["is_terminal"], true);
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let (status, body) = post_json(
            "/max-flow",
            serde_json::json!({ "capacity": [[0, 1], [0, 0]], "source": 1, "sink": 1 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_shape() {
        let (status, body) = post_json(
            "/max-flow",
            serde_json::json!({ "capacity": [[0, 1.5], [0, 0]], "source": 0, "sink": 1 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());

        let (status, body) =
            post_json("/max-flow", serde_json::json!({ "capacity": [[0, 1], [0, 0]] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = post_json("/random", serde_json::json!({ "seed": 3 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_oversized_networks_rejected() {
        let (status, body) = post_json("/random", serde_json::json!({ "nodes": 1_000_000 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let n = MAX_NODES + 1;
        let (status, body) = post_json(
            "/max-flow",
            serde_json::json!({ "capacity": vec![vec![0; n]; n], "source": 0, "sink": n - 1 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_iteration_limit_is_server_error() {
        let (status, _) = post_json(
            "/max-flow",
            serde_json::json!({
                "capacity": [[0, 3, 3, 0], [0, 0, 0, 3], [0, 0, 0, 3], [0, 0, 0, 0]],
                "source": 0,
                "sink": 3,
                "options": { "max_iterations": 1 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_random_route_is_seeded() {
        let req = serde_json::json!({ "nodes": 5, "seed": 9 });
        let (status, first) = post_json("/random", req.clone()).await;
        let (_, second) = post_json("/random", req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(first["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_presets_route() {
        let request = Request::builder().uri("/presets").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"][0]["name"], "classic");
        assert_eq!(body["data"][1]["sink"], 4);
    }
}

use crate::domain::model::{AuthToken, DescriptionUpdate, Package, Plan, Resource, Service};
use crate::domain::ports::CatalogApi;
use crate::utils::error::{DescriberError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_PAGE_SIZE: usize = 100;
const TOTAL_COUNT_HEADER: &str = "X-Total-Count";
const MAX_PAGES: usize = 10_000;

/// 認證完成後建立一次，之後所有請求共用且不再變動
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: AuthToken,
    pub page_size: usize,
}

impl ClientConfig {
    pub fn new(base_url: Url, token: AuthToken) -> Self {
        Self {
            base_url,
            token,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Named remote operations and the resource path each one targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    FetchAllPackages,
    FetchPackage { id: &'a str },
    UpdatePackage { id: &'a str },
    FetchAllPlans { package_id: &'a str },
    FetchPlan { package_id: &'a str, id: &'a str },
    UpdatePlan { package_id: &'a str, id: &'a str },
    FetchAllPlanServices { package_id: &'a str, id: &'a str },
}

impl<'a> Operation<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchAllPackages => "fetchAllPackages",
            Self::FetchPackage { .. } => "fetchPackage",
            Self::UpdatePackage { .. } => "updatePackage",
            Self::FetchAllPlans { .. } => "fetchAllPlans",
            Self::FetchPlan { .. } => "fetchPlan",
            Self::UpdatePlan { .. } => "updatePlan",
            Self::FetchAllPlanServices { .. } => "fetchAllPlanServices",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::UpdatePackage { .. } | Self::UpdatePlan { .. } => Method::PUT,
            _ => Method::GET,
        }
    }

    fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::FetchAllPackages => vec!["packages"],
            Self::FetchPackage { id } | Self::UpdatePackage { id } => vec!["packages", id],
            Self::FetchAllPlans { package_id } => vec!["packages", package_id, "plans"],
            Self::FetchPlan { package_id, id } | Self::UpdatePlan { package_id, id } => {
                vec!["packages", package_id, "plans", id]
            }
            Self::FetchAllPlanServices { package_id, id } => {
                vec!["packages", package_id, "plans", id, "services"]
            }
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }

    /// 以 base URL 組出完整端點，ID 會經過 percent-encoding
    pub fn url(&self, base_url: &Url) -> Result<Url> {
        let mut url = base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DescriberError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(self.segments());
        Ok(url)
    }
}

pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&config.token.bearer()).map_err(|e| {
            DescriberError::AuthenticationError {
                message: format!("token is not a valid header value: {}", e),
            }
        })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, config })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: Operation<'_>,
        query: &[(&str, String)],
        body: Option<&DescriptionUpdate>,
    ) -> Result<T> {
        let (value, _) = self.send_counted(operation, query, body).await?;
        Ok(value)
    }

    /// 回傳 body 以及 X-Total-Count（若 API 有提供）
    async fn send_counted<T: DeserializeOwned>(
        &self,
        operation: Operation<'_>,
        query: &[(&str, String)],
        body: Option<&DescriptionUpdate>,
    ) -> Result<(T, Option<usize>)> {
        let url = operation.url(&self.config.base_url)?;
        tracing::debug!("📡 {} {} {}", operation.name(), operation.method(), url);

        let mut request = self.client.request(operation.method(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<usize>().ok());
        let text = response.text().await?;
        tracing::debug!("📡 {} -> {} ({} bytes)", operation.name(), status, text.len());

        if !status.is_success() {
            return Err(DescriberError::HttpStatus {
                operation: operation.name().to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        Ok((serde_json::from_str(&text)?, total_count))
    }

    /// 以 limit/offset 分頁取回整個集合。
    ///
    /// With an `X-Total-Count` header the walk stops once that many items are
    /// collected; without it, at the first short page. A page larger than the
    /// requested limit, or one that starts with the same id as the previous
    /// page, means the server ignored the paging parameters and ends the walk.
    async fn fetch_list<T: DeserializeOwned + Resource>(
        &self,
        operation: Operation<'_>,
    ) -> Result<Option<Vec<T>>> {
        let page_size = self.config.page_size;
        let mut items: Option<Vec<T>> = None;
        let mut offset = 0usize;
        let mut previous_first: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let query = [("limit", page_size.to_string()), ("offset", offset.to_string())];
            let (page, total_count): (Option<Vec<T>>, Option<usize>) =
                self.send_counted(operation, &query, None).await?;

            let Some(page) = page else {
                break;
            };
            let collected = items.get_or_insert_with(Vec::new);
            let fetched = page.len();
            if fetched == 0 {
                break;
            }

            let first = page[0].id().to_string();
            if previous_first.as_deref() == Some(first.as_str()) {
                tracing::warn!(
                    "⚠️ {}: page at offset {} repeats the previous page, stopping",
                    operation.name(),
                    offset
                );
                break;
            }
            previous_first = Some(first);
            collected.extend(page);

            let done = match total_count {
                Some(total) => collected.len() >= total,
                None if fetched > page_size => {
                    tracing::warn!(
                        "⚠️ {}: server returned {} items for limit {}, treating as complete",
                        operation.name(),
                        fetched,
                        page_size
                    );
                    true
                }
                None => fetched < page_size,
            };
            if done {
                return Ok(items);
            }

            offset += fetched;
            tracing::debug!("📄 {}: fetching next page at offset {}", operation.name(), offset);
        }

        Ok(items)
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn fetch_all_packages(&self) -> Result<Vec<Package>> {
        let packages = self.fetch_list(Operation::FetchAllPackages).await?;
        Ok(packages.unwrap_or_default())
    }

    async fn fetch_package(&self, id: &str) -> Result<Package> {
        self.send(Operation::FetchPackage { id }, &[], None).await
    }

    async fn update_package(&self, id: &str, update: &DescriptionUpdate) -> Result<Package> {
        self.send(Operation::UpdatePackage { id }, &[], Some(update))
            .await
    }

    async fn fetch_all_plans(&self, package_id: &str) -> Result<Vec<Plan>> {
        let plans = self
            .fetch_list(Operation::FetchAllPlans { package_id })
            .await?;
        Ok(plans.unwrap_or_default())
    }

    async fn fetch_plan(&self, package_id: &str, id: &str) -> Result<Plan> {
        self.send(Operation::FetchPlan { package_id, id }, &[], None)
            .await
    }

    async fn update_plan(
        &self,
        package_id: &str,
        id: &str,
        update: &DescriptionUpdate,
    ) -> Result<Plan> {
        self.send(Operation::UpdatePlan { package_id, id }, &[], Some(update))
            .await
    }

    async fn fetch_all_plan_services(
        &self,
        package_id: &str,
        plan_id: &str,
    ) -> Result<Option<Vec<Service>>> {
        self.fetch_list(Operation::FetchAllPlanServices {
            package_id,
            id: plan_id,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, page_size: usize) -> ApiClient {
        let base_url = Url::parse(&server.url("/v3/rest")).unwrap();
        let config = ClientConfig::new(base_url, AuthToken::new("tok-abc")).with_page_size(page_size);
        ApiClient::new(config).unwrap()
    }

    #[test]
    fn test_operation_paths() {
        let cases = [
            (Operation::FetchAllPackages, "fetchAllPackages", "/packages"),
            (Operation::FetchPackage { id: "p1" }, "fetchPackage", "/packages/p1"),
            (Operation::UpdatePackage { id: "p1" }, "updatePackage", "/packages/p1"),
            (
                Operation::FetchAllPlans { package_id: "p1" },
                "fetchAllPlans",
                "/packages/p1/plans",
            ),
            (
                Operation::FetchPlan { package_id: "p1", id: "n1" },
                "fetchPlan",
                "/packages/p1/plans/n1",
            ),
            (
                Operation::UpdatePlan { package_id: "p1", id: "n1" },
                "updatePlan",
                "/packages/p1/plans/n1",
            ),
            (
                Operation::FetchAllPlanServices { package_id: "p1", id: "n1" },
                "fetchAllPlanServices",
                "/packages/p1/plans/n1/services",
            ),
        ];

        for (operation, name, path) in cases {
            assert_eq!(operation.name(), name);
            assert_eq!(operation.path(), path);
        }
        assert_eq!(Operation::UpdatePlan { package_id: "p", id: "n" }.method(), Method::PUT);
        assert_eq!(Operation::FetchPlan { package_id: "p", id: "n" }.method(), Method::GET);
    }

    #[test]
    fn test_operation_url_joins_base_path() {
        let base = Url::parse("https://api.example.com/v3/rest/").unwrap();
        let url = Operation::FetchAllPlanServices { package_id: "p 1", id: "n1" }
            .url(&base)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3/rest/packages/p%201/plans/n1/services"
        );
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_and_json_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v3/rest/packages/pkg-1")
                .header("Authorization", "Bearer tok-abc")
                .header("Content-Type", "application/json");
            then.status(200)
                .json_body(serde_json::json!({ "id": "pkg-1", "name": "Maps" }));
        });

        let package = client_for(&server, 100).fetch_package("pkg-1").await.unwrap();

        mock.assert();
        assert_eq!(package.name, "Maps");
    }

    #[tokio::test]
    async fn test_list_follows_pages_until_short_page() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET)
                .path("/v3/rest/packages")
                .query_param("limit", "2")
                .query_param("offset", "0");
            then.status(200).json_body(serde_json::json!([
                { "id": "a", "name": "A" },
                { "id": "b", "name": "B" }
            ]));
        });
        let second = server.mock(|when, then| {
            when.method(GET)
                .path("/v3/rest/packages")
                .query_param("limit", "2")
                .query_param("offset", "2");
            then.status(200)
                .json_body(serde_json::json!([{ "id": "c", "name": "C" }]));
        });

        let packages = client_for(&server, 2).fetch_all_packages().await.unwrap();

        first.assert();
        second.assert();
        let ids: Vec<&str> = packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_list_stops_when_offset_is_ignored() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v3/rest/packages");
            then.status(200).json_body(serde_json::json!([
                { "id": "a", "name": "A" },
                { "id": "b", "name": "B" }
            ]));
        });

        let packages = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            client_for(&server, 2).fetch_all_packages(),
        )
        .await
        .expect("listing should terminate")
        .unwrap();

        mock.assert_hits(2);
        let ids: Vec<&str> = packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_list_stops_when_limit_is_ignored() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v3/rest/packages");
            then.status(200).json_body(serde_json::json!([
                { "id": "a", "name": "A" },
                { "id": "b", "name": "B" },
                { "id": "c", "name": "C" }
            ]));
        });

        let packages = client_for(&server, 2).fetch_all_packages().await.unwrap();

        mock.assert_hits(1);
        assert_eq!(packages.len(), 3);
    }

    #[tokio::test]
    async fn test_total_count_header_continues_past_server_page_cap() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET)
                .path("/v3/rest/packages")
                .query_param("offset", "0");
            then.status(200)
                .header("X-Total-Count", "3")
                .json_body(serde_json::json!([
                    { "id": "a", "name": "A" },
                    { "id": "b", "name": "B" }
                ]));
        });
        let second = server.mock(|when, then| {
            when.method(GET)
                .path("/v3/rest/packages")
                .query_param("offset", "2");
            then.status(200)
                .header("X-Total-Count", "3")
                .json_body(serde_json::json!([{ "id": "c", "name": "C" }]));
        });

        // 要求 5 筆但伺服器每頁最多回 2 筆
        let packages = client_for(&server, 5).fetch_all_packages().await.unwrap();

        first.assert();
        second.assert();
        let ids: Vec<&str> = packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_null_service_list_is_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v3/rest/packages/p1/plans/n1/services");
            then.status(200).body("null");
        });

        let services = client_for(&server, 100)
            .fetch_all_plan_services("p1", "n1")
            .await
            .unwrap();

        assert!(services.is_none());
    }

    #[tokio::test]
    async fn test_update_package_sends_partial_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/v3/rest/packages/pkg-1")
                .json_body(serde_json::json!({ "description": "Mapping products" }));
            then.status(200).json_body(serde_json::json!({
                "id": "pkg-1",
                "name": "Maps",
                "description": "Mapping products"
            }));
        });

        let package = client_for(&server, 100)
            .update_package("pkg-1", &DescriptionUpdate::new("Mapping products"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(package.description.as_deref(), Some("Mapping products"));
    }

    #[tokio::test]
    async fn test_error_status_names_operation() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v3/rest/packages/missing/plans/n1");
            then.status(404).body("{\"errorCode\":404}");
        });

        let err = client_for(&server, 100)
            .fetch_plan("missing", "n1")
            .await
            .unwrap_err();

        match err {
            DescriberError::HttpStatus {
                operation, status, ..
            } => {
                assert_eq!(operation, "fetchPlan");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

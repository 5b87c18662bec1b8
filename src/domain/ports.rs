use crate::domain::model::{DescriptionUpdate, Package, Plan, Service};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 遠端 catalog 的具名操作；HTTP 實作在 adapters::http
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_all_packages(&self) -> Result<Vec<Package>>;
    async fn fetch_package(&self, id: &str) -> Result<Package>;
    async fn update_package(&self, id: &str, update: &DescriptionUpdate) -> Result<Package>;
    async fn fetch_all_plans(&self, package_id: &str) -> Result<Vec<Plan>>;
    async fn fetch_plan(&self, package_id: &str, id: &str) -> Result<Plan>;
    async fn update_plan(
        &self,
        package_id: &str,
        id: &str,
        update: &DescriptionUpdate,
    ) -> Result<Plan>;
    /// `None` 表示 API 回傳的清單不存在（例如 `null`）
    async fn fetch_all_plan_services(
        &self,
        package_id: &str,
        plan_id: &str,
    ) -> Result<Option<Vec<Service>>>;
}

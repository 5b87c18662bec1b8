use crate::domain::model::{DescriptionUpdate, Package, Plan, Service};
use crate::domain::ports::CatalogApi;
use crate::utils::error::{DescriberError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

pub(crate) fn package(id: &str, name: &str) -> Package {
    Package {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
    }
}

pub(crate) fn plan(id: &str, name: &str) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        description: Some("original".to_string()),
    }
}

pub(crate) fn service(id: &str, name: &str) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn not_found(operation: &str) -> DescriberError {
    DescriberError::HttpStatus {
        operation: operation.to_string(),
        status: 404,
        body: "not found".to_string(),
    }
}

/// 記錄每次呼叫的 in-memory catalog
#[derive(Default)]
pub(crate) struct InMemoryCatalog {
    packages: Vec<Package>,
    plans: HashMap<String, Vec<Plan>>,
    services: HashMap<(String, String), Option<Vec<Service>>>,
    failing_package_list: bool,
    failing_plan_lists: HashSet<String>,
    failing_updates: HashSet<String>,
    calls: Mutex<Vec<String>>,
    updates: Mutex<Vec<(String, String, String)>>,
}

impl InMemoryCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_package(mut self, package: Package, plans: Vec<Plan>) -> Self {
        self.plans.insert(package.id.clone(), plans);
        self.packages.push(package);
        self
    }

    pub(crate) fn with_services(
        mut self,
        package_id: &str,
        plan_id: &str,
        services: Option<Vec<Service>>,
    ) -> Self {
        self.services
            .insert((package_id.to_string(), plan_id.to_string()), services);
        self
    }

    pub(crate) fn failing_package_list(mut self) -> Self {
        self.failing_package_list = true;
        self
    }

    pub(crate) fn failing_plan_list(mut self, package_id: &str) -> Self {
        self.failing_plan_lists.insert(package_id.to_string());
        self
    }

    pub(crate) fn failing_update(mut self, plan_id: &str) -> Self {
        self.failing_updates.insert(plan_id.to_string());
        self
    }

    pub(crate) async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub(crate) async fn updates(&self) -> Vec<(String, String, String)> {
        self.updates.lock().await.clone()
    }

    async fn log(&self, call: String) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn fetch_all_packages(&self) -> Result<Vec<Package>> {
        self.log("fetchAllPackages".to_string()).await;
        if self.failing_package_list {
            return Err(DescriberError::HttpStatus {
                operation: "fetchAllPackages".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.packages.clone())
    }

    async fn fetch_package(&self, id: &str) -> Result<Package> {
        self.log(format!("fetchPackage {}", id)).await;
        self.packages
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("fetchPackage"))
    }

    async fn update_package(&self, id: &str, update: &DescriptionUpdate) -> Result<Package> {
        self.log(format!("updatePackage {}", id)).await;
        let mut package = self.fetch_package(id).await?;
        package.description = Some(update.description.clone());
        Ok(package)
    }

    async fn fetch_all_plans(&self, package_id: &str) -> Result<Vec<Plan>> {
        self.log(format!("fetchAllPlans {}", package_id)).await;
        if self.failing_plan_lists.contains(package_id) {
            return Err(DescriberError::HttpStatus {
                operation: "fetchAllPlans".to_string(),
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(self.plans.get(package_id).cloned().unwrap_or_default())
    }

    async fn fetch_plan(&self, package_id: &str, id: &str) -> Result<Plan> {
        self.log(format!("fetchPlan {}/{}", package_id, id)).await;
        self.plans
            .get(package_id)
            .and_then(|plans| plans.iter().find(|p| p.id == id))
            .cloned()
            .ok_or_else(|| not_found("fetchPlan"))
    }

    async fn update_plan(
        &self,
        package_id: &str,
        id: &str,
        update: &DescriptionUpdate,
    ) -> Result<Plan> {
        self.log(format!("updatePlan {}/{}", package_id, id)).await;
        if self.failing_updates.contains(id) {
            return Err(DescriberError::HttpStatus {
                operation: "updatePlan".to_string(),
                status: 500,
                body: "internal error".to_string(),
            });
        }
        self.updates.lock().await.push((
            package_id.to_string(),
            id.to_string(),
            update.description.clone(),
        ));
        Ok(Plan {
            id: id.to_string(),
            name: id.to_string(),
            description: Some(update.description.clone()),
        })
    }

    async fn fetch_all_plan_services(
        &self,
        package_id: &str,
        plan_id: &str,
    ) -> Result<Option<Vec<Service>>> {
        self.log(format!("fetchAllPlanServices {}/{}", package_id, plan_id))
            .await;
        Ok(self
            .services
            .get(&(package_id.to_string(), plan_id.to_string()))
            .cloned()
            .unwrap_or_else(|| Some(Vec::new())))
    }
}

use crate::domain::model::{DescriptionUpdate, Plan, Service};
use crate::domain::ports::CatalogApi;
use crate::utils::error::Result;

pub const DESCRIPTION_PREFIX: &str = "APIs includes: ";

/// 依 API 回傳順序串接 service 名稱；沒有 service 時不產生描述
pub fn build_description(services: &[Service]) -> Option<String> {
    if services.is_empty() {
        return None;
    }
    let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    Some(format!("{}{}", DESCRIPTION_PREFIX, names.join(", ")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Updated { description: String },
    WouldUpdate { description: String },
    Unchanged,
}

pub struct DescriptionUpdater<'a, C: CatalogApi> {
    api: &'a C,
    dry_run: bool,
}

impl<'a, C: CatalogApi> DescriptionUpdater<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self {
            api,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn update(&self, package_id: &str, plan: &Plan) -> Result<PlanOutcome> {
        let services = self
            .api
            .fetch_all_plan_services(package_id, &plan.id)
            .await?
            .unwrap_or_default();

        let Some(description) = build_description(&services) else {
            tracing::debug!("  -> No changes made to {}", plan.name);
            return Ok(PlanOutcome::Unchanged);
        };

        if self.dry_run {
            tracing::info!("  -> [dry-run] {} would become: {}", plan.name, description);
            return Ok(PlanOutcome::WouldUpdate { description });
        }

        let updated = self
            .api
            .update_plan(package_id, &plan.id, &DescriptionUpdate::new(description.clone()))
            .await?;
        tracing::debug!(
            "  -> Updated description for {}: {}",
            updated.name,
            updated.description.as_deref().unwrap_or(&description)
        );

        Ok(PlanOutcome::Updated { description })
    }
}

use crate::core::describer::DescriptionUpdater;
use crate::core::report::RunReport;
use crate::domain::model::{Package, Plan};
use crate::domain::ports::CatalogApi;
use crate::utils::error::{DescriberError, Result};
use crate::utils::progress::PackageProgress;

/// 依 CLI 給的 ID 決定要走訪的範圍
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalMode {
    AllPackages,
    Package { package_id: String },
    Plan { package_id: String, plan_id: String },
}

impl TraversalMode {
    /// IDs are trimmed and blank values count as absent. A plan without a
    /// package is a usage error.
    pub fn select(package_id: Option<&str>, plan_id: Option<&str>) -> Result<Self> {
        let package_id = normalize_id(package_id);
        let plan_id = normalize_id(plan_id);

        match (package_id, plan_id) {
            (None, None) => Ok(Self::AllPackages),
            (None, Some(_)) => Err(DescriberError::UsageError {
                message: "--plan requires --package".to_string(),
            }),
            (Some(package_id), None) => Ok(Self::Package { package_id }),
            (Some(package_id), Some(plan_id)) => Ok(Self::Plan {
                package_id,
                plan_id,
            }),
        }
    }
}

fn normalize_id(id: Option<&str>) -> Option<String> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// 依序走訪 package → plan → service；同一時間只有一個請求在進行
pub struct TraversalDriver<'a, C: CatalogApi> {
    api: &'a C,
    updater: DescriptionUpdater<'a, C>,
    progress: PackageProgress,
}

impl<'a, C: CatalogApi> TraversalDriver<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self {
            api,
            updater: DescriptionUpdater::new(api),
            progress: PackageProgress::hidden(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.updater = self.updater.with_dry_run(dry_run);
        self
    }

    pub fn with_progress(mut self, progress: PackageProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Root fetches of the selected mode abort the run; failures below the
    /// root are recorded in the report and traversal moves to the next sibling.
    pub async fn run(&self, mode: &TraversalMode) -> Result<RunReport> {
        let mut report = RunReport::new();

        match mode {
            TraversalMode::AllPackages => {
                let packages = self.api.fetch_all_packages().await?;
                tracing::debug!("📦 Found {} packages", packages.len());

                self.progress.start(packages.len());
                for package in &packages {
                    self.progress.tick(&package.name);
                    self.process_package(package, &mut report).await;
                }
                self.progress.finish();
            }
            TraversalMode::Package { package_id } => {
                let package = self.api.fetch_package(package_id).await?;
                tracing::debug!("📦 {:?}", package);
                self.process_package(&package, &mut report).await;
            }
            TraversalMode::Plan {
                package_id,
                plan_id,
            } => {
                let plan = self.api.fetch_plan(package_id, plan_id).await?;
                self.process_plan(package_id, &plan, &mut report).await;
            }
        }

        Ok(report)
    }

    async fn process_package(&self, package: &Package, report: &mut RunReport) {
        tracing::debug!("Processing {} ({})", package.name, package.id);
        report.packages_visited += 1;

        let plans = match self.api.fetch_all_plans(&package.id).await {
            Ok(plans) => plans,
            Err(e) => {
                report.record_failure(DescriberError::traversal("package", &package.id, e));
                return;
            }
        };

        for plan in &plans {
            self.process_plan(&package.id, plan, report).await;
        }
    }

    async fn process_plan(&self, package_id: &str, plan: &Plan, report: &mut RunReport) {
        tracing::debug!("  Processing {} ({})", plan.name, plan.id);

        match self.updater.update(package_id, plan).await {
            Ok(outcome) => report.record_plan(package_id, &plan.id, &plan.name, outcome),
            Err(e) => report.record_failure(DescriberError::traversal("plan", &plan.id, e)),
        }
    }
}

use crate::core::describer::PlanOutcome;
use crate::utils::error::DescriberError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRecord {
    pub package_id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub outcome: PlanOutcome,
}

/// 單次執行的結果彙總；單筆失敗只記錄、不中斷
#[derive(Debug, Default)]
pub struct RunReport {
    pub packages_visited: usize,
    pub plans: Vec<PlanRecord>,
    pub failures: Vec<DescriberError>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_plan(&mut self, package_id: &str, plan_id: &str, plan_name: &str, outcome: PlanOutcome) {
        self.plans.push(PlanRecord {
            package_id: package_id.to_string(),
            plan_id: plan_id.to_string(),
            plan_name: plan_name.to_string(),
            outcome,
        });
    }

    pub fn record_failure(&mut self, error: DescriberError) {
        tracing::warn!("⚠️ {}", error);
        self.failures.push(error);
    }

    pub fn plans_visited(&self) -> usize {
        self.plans.len()
    }

    pub fn plans_updated(&self) -> usize {
        self.count(|o| matches!(o, PlanOutcome::Updated { .. }))
    }

    pub fn plans_pending(&self) -> usize {
        self.count(|o| matches!(o, PlanOutcome::WouldUpdate { .. }))
    }

    pub fn plans_unchanged(&self) -> usize {
        self.count(|o| matches!(o, PlanOutcome::Unchanged))
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn count(&self, predicate: impl Fn(&PlanOutcome) -> bool) -> usize {
        self.plans.iter().filter(|p| predicate(&p.outcome)).count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Packages visited: ..... {}", self.packages_visited)?;
        writeln!(f, "Plans visited: ........ {}", self.plans_visited())?;
        writeln!(f, "Plans updated: ........ {}", self.plans_updated())?;
        if self.plans_pending() > 0 {
            writeln!(f, "Plans to update: ...... {} (dry run)", self.plans_pending())?;
        }
        writeln!(f, "Plans unchanged: ...... {}", self.plans_unchanged())?;
        write!(f, "Failures: ............. {}", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}

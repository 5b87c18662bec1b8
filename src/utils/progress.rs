use indicatif::{ProgressBar, ProgressStyle};

const PACKAGE_TEMPLATE: &str =
    "  [{bar:50}] {percent}% Processing package {pos}/{len} ({msg})";

/// 逐個 package 前進的進度條；verbose 或 JSON log 模式下隱藏，改由 log 呈現
#[derive(Debug, Clone)]
pub struct PackageProgress {
    bar: ProgressBar,
}

impl PackageProgress {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::with_template(PACKAGE_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("= ");
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    pub fn tick(&self, package_name: &str) {
        self.bar.set_message(package_name.to_string());
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish();
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }
}

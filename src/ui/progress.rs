use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({binary_bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} {bytes} ({binary_bytes_per_sec})";

/// Console indicator for one download. The bar is created on the first
/// update, once it is known whether the server declared a length.
pub struct TransferBar {
    label: String,
    bar: Option<ProgressBar>,
}

impl TransferBar {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            bar: None,
        }
    }

    pub fn update(&mut self, downloaded: u64, total: Option<u64>) {
        let label = &self.label;
        let bar = self.bar.get_or_insert_with(|| {
            let bar = match total {
                Some(len) => ProgressBar::new(len).with_style(bar_style()),
                None => {
                    let bar = ProgressBar::new_spinner().with_style(spinner_style());
                    bar.enable_steady_tick(Duration::from_millis(120));
                    bar
                }
            };
            bar.with_message(label.clone())
        });
        bar.set_position(downloaded);
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish();
        }
    }

    pub fn abandon(self) {
        if let Some(bar) = self.bar {
            bar.abandon();
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

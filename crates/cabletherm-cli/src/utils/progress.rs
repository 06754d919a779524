use cabletherm::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const SPINNER_TEMPLATE: &str = "{spinner:.green} {prefix:.bold} {msg}";
const ITERATION_TEMPLATE: &str =
    "{spinner:.green} {prefix:.bold} iteration {pos}/{len} [{bar:30.cyan/blue}] {msg}";

struct ProgressView {
    bar: ProgressBar,
    phase: Option<&'static str>,
    phase_started: Option<Instant>,
}

impl ProgressView {
    fn begin_phase(&mut self, name: &'static str) {
        self.phase = Some(name);
        self.phase_started = Some(Instant::now());
        self.bar.reset();
        self.bar.set_length(0);
        self.bar.set_style(spinner_style());
        self.bar.set_prefix(name);
        self.bar.set_message("");
        self.bar.enable_steady_tick(TICK_INTERVAL);
    }

    fn end_phase(&mut self) {
        let elapsed = self
            .phase_started
            .take()
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or_default();
        if let Some(name) = self.phase.take() {
            debug!(phase = name, elapsed_s = elapsed, "Phase finished.");
        }
        self.bar.disable_steady_tick();
        self.bar
            .abandon_with_message(format!("✓ Done ({:.2}s)", elapsed));
    }

    fn begin_iterations(&mut self, cap: u64) {
        self.bar.set_style(iteration_style());
        self.bar.set_length(cap);
        self.bar.set_position(0);
    }
}

/// Shows the workflow's phases as a spinner and the field iteration as a bar against the
/// iteration cap, on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<ProgressView>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.finish_and_clear();
        Self {
            display: Arc::new(Mutex::new(ProgressView {
                bar,
                phase: None,
                phase_started: None,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = Arc::clone(&self.display);

        Box::new(move |event: Progress| {
            let Ok(mut display) = display.lock() else {
                warn!("Progress display mutex was poisoned; dropping event.");
                return;
            };

            match event {
                Progress::PhaseStart { name } => display.begin_phase(name),
                Progress::PhaseFinish => display.end_phase(),
                Progress::TaskStart { total_steps } => display.begin_iterations(total_steps),
                Progress::TaskIncrement => display.bar.inc(1),
                // The bar stays where convergence stopped it; the phase end finishes it.
                Progress::TaskFinish => {}
                Progress::StatusUpdate { text } => display.bar.set_message(text),
                Progress::Message(text) => display.bar.println(format!("  {}", text)),
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn iteration_style() -> ProgressStyle {
    ProgressStyle::with_template(ITERATION_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn snapshot(handler: &CliProgressHandler) -> (Option<u64>, u64, String, bool) {
        let display = handler.display.lock().unwrap();
        (
            display.bar.length(),
            display.bar.position(),
            display.bar.message(),
            display.bar.is_finished(),
        )
    }

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = CliProgressHandler::new();
        let (length, position, _, finished) = snapshot(&handler);
        assert_eq!(length, Some(0));
        assert_eq!(position, 0);
        assert!(finished);
    }

    #[test]
    fn field_iteration_events_drive_the_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Field Iteration",
        });
        assert_eq!(
            handler.display.lock().unwrap().bar.prefix(),
            "Field Iteration"
        );

        callback(Progress::TaskStart { total_steps: 200 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        callback(Progress::StatusUpdate {
            text: "max ΔT 0.0800 °C".to_string(),
        });
        callback(Progress::TaskFinish);

        let (length, position, message, finished) = snapshot(&handler);
        assert_eq!(length, Some(200));
        assert_eq!(position, 2);
        assert_eq!(message, "max ΔT 0.0800 °C");
        assert!(!finished);

        callback(Progress::PhaseFinish);
        let (_, _, message, finished) = snapshot(&handler);
        assert!(message.starts_with("✓ Done"));
        assert!(finished);
        assert!(handler.display.lock().unwrap().phase.is_none());
    }

    #[test]
    fn new_phase_resets_the_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Field Iteration",
        });
        callback(Progress::TaskStart { total_steps: 10 });
        callback(Progress::TaskIncrement);
        callback(Progress::PhaseFinish);
        callback(Progress::PhaseStart { name: "Reporting" });

        let (length, position, message, finished) = snapshot(&handler);
        assert_eq!(length, Some(0));
        assert_eq!(position, 0);
        assert_eq!(message, "");
        assert!(!finished);
    }

    #[test]
    fn callback_can_be_used_from_another_thread() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Preparation" });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let (_, _, message, finished) = snapshot(&handler);
        assert!(finished);
        assert!(message.starts_with("✓ Done"));
    }
}

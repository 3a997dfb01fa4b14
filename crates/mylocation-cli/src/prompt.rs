//! Terminal-backed alert presenter for simulated sessions.

use crate::cli::PromptArg;
use console::style;
use dialoguer::Select;
use mylocation_core::models::{ActionRole, Alert, AlertKind};
use mylocation_core::ports::AlertPresenter;
use mylocation_locator::{EventSink, LocatorEvent};
use std::cell::RefCell;

/// Shows alerts on the terminal and answers them per `--prompt`
pub struct ConsolePresenter {
    sink: EventSink,
    mode: PromptArg,
    quiet: bool,
    alerts: RefCell<Vec<Alert>>,
}

impl ConsolePresenter {
    /// `quiet` suppresses printing (JSON mode); alerts are still recorded
    pub fn new(sink: EventSink, mode: PromptArg, quiet: bool) -> Self {
        Self { sink, mode, quiet, alerts: RefCell::new(Vec::new()) }
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }

    fn render(&self, alert: &Alert) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", style(format!("┌ {}", alert.title)).bold());
        println!("│ {}", alert.message);
        let labels: Vec<String> =
            alert.actions.iter().map(|action| format!("[{}]", action.label)).collect();
        println!("└ {}", style(labels.join(" ")).dim());
    }

    /// Pick an action for an alert that offers a real choice
    fn choose(&self, alert: &Alert) -> Option<ActionRole> {
        let choices: Vec<ActionRole> = alert
            .actions
            .iter()
            .map(|action| action.role)
            .filter(|role| *role != ActionRole::Dismiss)
            .collect();
        if choices.is_empty() {
            return None;
        }

        match self.mode {
            PromptArg::Accept => choices
                .iter()
                .copied()
                .find(|role| matches!(role, ActionRole::Confirm | ActionRole::OpenSettings)),
            PromptArg::Cancel => Some(ActionRole::Cancel),
            PromptArg::Ask => {
                let labels: Vec<&str> =
                    alert.actions.iter().map(|action| action.label.as_str()).collect();
                match Select::new().with_prompt(&alert.title).items(&labels).default(0).interact()
                {
                    Ok(index) => alert.actions.get(index).map(|action| action.role),
                    Err(err) => {
                        tracing::warn!("Prompt failed, treating as cancel: {}", err);
                        Some(ActionRole::Cancel)
                    }
                }
            }
        }
    }
}

impl AlertPresenter for ConsolePresenter {
    fn present(&self, alert: &Alert) {
        self.alerts.borrow_mut().push(alert.clone());
        self.render(alert);

        let Some(role) = self.choose(alert) else {
            return;
        };
        match role {
            ActionRole::Confirm | ActionRole::Cancel => {
                if alert.kind == AlertKind::PermissionPrompt {
                    self.sink.post(LocatorEvent::PermissionPromptAnswered {
                        request: alert.request,
                        granted: role == ActionRole::Confirm,
                    });
                }
            }
            ActionRole::OpenSettings => self.open_settings(),
            ActionRole::Dismiss => {}
        }
    }

    fn open_settings(&self) {
        if !self.quiet {
            println!("{} Opening system settings", style("→").cyan());
        }
        tracing::info!("User chose to open system settings");
    }
}

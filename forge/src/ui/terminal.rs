//! Terminal presenter

use colored::Colorize;
use tracing::debug;

use crate::models::deploy::{DeployedSite, Field};
use crate::ui::notify::Notification;
use crate::ui::presenter::{Presenter, StatusKind, UiState};

/// Labels and decorations, so the same controller can be dressed differently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalTheme {
    pub loading_label: String,
    pub emoji: bool,
}

impl TerminalTheme {
    pub fn rich() -> Self {
        Self {
            loading_label: "Deploying...".to_string(),
            emoji: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            loading_label: "Working".to_string(),
            emoji: false,
        }
    }

    fn icon(&self, kind: StatusKind) -> &'static str {
        match (self.emoji, kind) {
            (true, StatusKind::Info) => "🚀 ",
            (true, StatusKind::Success) => "✅ ",
            (true, StatusKind::Error) => "❌ ",
            (false, StatusKind::Info) => "[..] ",
            (false, StatusKind::Success) => "[ok] ",
            (false, StatusKind::Error) => "[!!] ",
        }
    }
}

impl Default for TerminalTheme {
    fn default() -> Self {
        Self::rich()
    }
}

/// Renders the form's state as lines on stdout
#[derive(Debug, Clone, Default)]
pub struct TerminalPresenter {
    theme: TerminalTheme,
}

impl TerminalPresenter {
    pub fn new(theme: TerminalTheme) -> Self {
        Self { theme }
    }
}

impl Presenter for TerminalPresenter {
    fn render_locations(&self, options: &[&str], selected: &str) {
        // The `locations` command lists regions; a deploy only names its choice
        debug!("{} regions available, {} selected", options.len(), selected);
    }

    fn set_ui_state(&self, state: UiState) {
        match state {
            UiState::Submitting => {
                println!("{}", format!("[{}]", self.theme.loading_label).dimmed())
            }
            UiState::Idle | UiState::Success | UiState::Failed => {}
        }
    }

    fn update_status(&self, message: &str, kind: StatusKind) {
        let line = format!("{}{}", self.theme.icon(kind), message);
        match kind {
            StatusKind::Info => println!("{}", line.cyan()),
            StatusKind::Success => println!("{}", line.green()),
            StatusKind::Error => println!("{}", line.red()),
        }
    }

    fn show_site(&self, site: &DeployedSite) {
        let heading = format!("{}Deployment Successful!", self.theme.icon(StatusKind::Success));
        println!("{}", heading.green().bold());
        println!("  {} {}", "Your site is live at:".bold(), site.url.underline());
        println!("  {} {}", "Resource Group:".bold(), site.resource_group_name);
        println!("  {} {}", "Storage Account:".bold(), site.storage_account_name);
    }

    fn show_field_error(&self, field: Field, message: &str) {
        eprintln!("{} {}", format!("{}:", field).red().bold(), message.red());
    }

    fn clear_field_error(&self, _field: Field) {}

    fn update_file_label(&self, label: &str) {
        println!("{} {}", "File:".bold(), label);
    }

    fn set_drop_highlight(&self, _highlighted: bool) {}

    fn show_notification(&self, notification: &Notification) {
        let line = format!("{}{}", self.theme.icon(notification.kind), notification.message);
        match notification.kind {
            StatusKind::Error => eprintln!("{}", line.on_red().white()),
            StatusKind::Success => eprintln!("{}", line.on_green().black()),
            StatusKind::Info => eprintln!("{}", line.on_blue().white()),
        }
    }

    fn dismiss_notification(&self, _notification: &Notification) {}
}

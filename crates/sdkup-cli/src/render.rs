use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use anyhow::Result;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use sdkup_installer::{
    InstallOutput, InstallPlan, ProcessRunner, ReportedVersion, ScriptInvocation, ScriptRunner,
};

use crate::flows::InstallReport;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan.bold} {msg:<18} {elapsed_precise}";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

/// Status lines go to stderr so stdout stays `eval`-able.
#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self { style }
    }

    pub(crate) fn print_status(self, status: &str, message: &str) {
        eprintln!("{}", render_status_line(self.style, status, message));
    }

    pub(crate) fn print_section(self, title: &str) {
        if let Some(line) = render_section_header(self.style, title) {
            eprintln!();
            eprintln!("{}", colorize(section_style(), &line));
        }
    }

    pub(crate) fn print_lines(self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }
}

/// Wraps the process runner with a spinner while an installer runs.
#[derive(Debug)]
pub(crate) struct SpinnerRunner {
    style: OutputStyle,
    inner: ProcessRunner,
}

impl SpinnerRunner {
    pub(crate) fn new(style: OutputStyle) -> Self {
        Self {
            style,
            inner: ProcessRunner,
        }
    }
}

impl ScriptRunner for SpinnerRunner {
    fn run(&mut self, invocation: &ScriptInvocation) -> Result<InstallOutput> {
        if self.style == OutputStyle::Plain {
            return self.inner.run(invocation);
        }

        let progress_bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            progress_bar.set_style(style.tick_chars(".oO@* "));
        }
        progress_bar.set_message(spinner_label(invocation));
        progress_bar.enable_steady_tick(Duration::from_millis(80));
        let result = self.inner.run(invocation);
        progress_bar.finish_and_clear();
        result
    }
}

pub(crate) fn current_output_style(requested: Option<OutputStyle>) -> OutputStyle {
    requested.unwrap_or_else(|| {
        if std::io::stderr().is_terminal() {
            OutputStyle::Rich
        } else {
            OutputStyle::Plain
        }
    })
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => match status {
            "warn" => format!("warning: {message}"),
            "err" => format!("error: {message}"),
            _ => message.to_string(),
        },
        OutputStyle::Rich => {
            let badge = match status {
                "ok" => "[OK]",
                "warn" => "[WARN]",
                "err" => "[ERR]",
                _ => "[..]",
            };
            format!("{badge} {message}")
        }
    }
}

pub(crate) fn format_plan_lines(plan: &InstallPlan) -> Vec<String> {
    let mut lines = vec![
        format!(
            "directive: {} {}",
            plan.directive.kind.as_str(),
            plan.directive.value
        ),
        format!("quality_allowed: {}", plan.directive.quality_allowed),
        format!("architecture: {}", plan.architecture),
        format!("runtime: {}", plan.runtime.display_command()),
        format!("sdk: {}", plan.sdk.display_command()),
    ];
    lines.extend(plan.warnings.iter().map(|warning| format!("warning: {warning}")));
    lines
}

/// Status/message pairs summarizing an install run, in print order.
pub(crate) fn format_install_report_lines(report: &InstallReport) -> Vec<(&'static str, String)> {
    let mut lines = Vec::new();
    for sdk in &report.installed {
        let version = sdk.version.as_deref().unwrap_or("(version unknown)");
        lines.push((
            "ok",
            format!(
                "installed .NET SDK {version} ({} {}, {})",
                sdk.directive.kind.as_str(),
                sdk.directive.value,
                sdk.architecture
            ),
        ));
        lines.extend(sdk.warnings.iter().map(|warning| ("warn", warning.clone())));
    }

    lines.push(match &report.reported_version {
        ReportedVersion::Version(version) => ("ok", format!("sdk-version: {version}")),
        ReportedVersion::Unavailable => (
            "warn",
            "installed .NET SDK version is unknown; sdk-version is not set".to_string(),
        ),
        ReportedVersion::NothingInstalled => (
            "info",
            "no .NET SDK was installed; sdk-version is not set".to_string(),
        ),
    });
    lines
}

fn spinner_label(invocation: &ScriptInvocation) -> &'static str {
    let command = invocation.display_command();
    if command.contains("--runtime") || command.contains("-Runtime") {
        "installing runtime"
    } else {
        "installing sdk"
    }
}

fn render_section_header(style: OutputStyle, title: &str) -> Option<String> {
    match style {
        OutputStyle::Plain => None,
        OutputStyle::Rich => Some(format!("== {title} ==")),
    }
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

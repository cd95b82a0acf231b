use std::path::{Path, PathBuf};

use sdkup_core::{ARCH_ARM64, ARCH_X64};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Posix,
    PowerShell,
}

/// Environment changes downstream tools need to find the installed SDKs.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EnvironmentExports {
    pub path_entries: Vec<PathBuf>,
    pub variables: Vec<(String, String)>,
}

impl EnvironmentExports {
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

pub fn build_environment_exports(
    install_dir: &Path,
    installed_arches: &[String],
) -> EnvironmentExports {
    let root = install_dir.display().to_string();
    let mut exports = EnvironmentExports {
        path_entries: vec![install_dir.to_path_buf()],
        variables: vec![("DOTNET_ROOT".to_string(), root.clone())],
    };

    for arch in installed_arches {
        let key = match arch.as_str() {
            ARCH_X64 => "DOTNET_ROOT_X64",
            ARCH_ARM64 => "DOTNET_ROOT_ARM64",
            _ => continue,
        };
        if exports.variable(key).is_none() {
            exports.variables.push((key.to_string(), root.clone()));
        }
    }

    exports
}

pub fn render_exports(exports: &EnvironmentExports, shell: ShellKind) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &exports.path_entries {
        let entry = entry.display().to_string();
        lines.push(match shell {
            ShellKind::Posix => format!("export PATH=\"{}:$PATH\"", escape_posix(&entry)),
            ShellKind::PowerShell => {
                format!("$env:PATH = \"{};\" + $env:PATH", escape_powershell(&entry))
            }
        });
    }
    for (key, value) in &exports.variables {
        lines.push(match shell {
            ShellKind::Posix => format!("export {key}=\"{}\"", escape_posix(value)),
            ShellKind::PowerShell => format!("$env:{key} = \"{}\"", escape_powershell(value)),
        });
    }
    lines
}

fn escape_posix(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn escape_powershell(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '$' | '`') {
            escaped.push('`');
        }
        escaped.push(ch);
    }
    escaped
}

mod context;
mod exports;
mod flow;
mod install_dir;
mod platform;
mod runner;
mod script;
mod version_output;

pub use context::{default_script_path, SetupContext, INSTALL_SCRIPT_ENV};
pub use exports::{build_environment_exports, render_exports, EnvironmentExports, ShellKind};
pub use flow::{install_sdk, plan_install, InstallPlan, InstalledSdk};
pub use install_dir::{
    default_install_dir, default_install_dir_with, install_dir_from_override, resolve_install_dir,
    INSTALL_DIR_ENV,
};
pub use platform::{
    effective_architecture, ensure_architecture_installable, is_arch_supported,
    is_emulation_layer_active, probe_rosetta,
};
pub use runner::{InstallOutput, ProcessRunner, ScriptRunner};
pub use script::{quality_ignored_warning, FlagVocabulary, InstallScript, ScriptInvocation};
pub use version_output::{parse_installed_version, select_reported_version, ReportedVersion};

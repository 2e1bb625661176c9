//! Sandboxed `dotnet restore`
//!
//! Runs the restore inside the Freedesktop SDK with the .NET SDK extension
//! mounted, directing every downloaded package into the scratch directory.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, info};

use crate::{config::Config, interrupt::Interrupt, Error, Result};

pub struct Restorer<'a> {
    config: &'a Config,
    program: PathBuf,
    interrupt: Interrupt,
}

impl<'a> Restorer<'a> {
    /// Resolve the sandbox launcher on `PATH`.
    pub fn new(config: &'a Config, interrupt: Interrupt) -> Result<Self> {
        let program = which::which(&config.flatpak).map_err(|_| Error::ToolNotFound {
            program: config.flatpak.clone(),
        })?;
        debug!("Using sandbox launcher {}", program.display());

        Ok(Self {
            config,
            program,
            interrupt,
        })
    }

    /// Shell line executed inside the sandbox; the restore arguments
    /// arrive as positional parameters.
    fn restore_script(&self) -> String {
        format!(
            r#"PATH="${{PATH}}:/usr/lib/sdk/dotnet{0}/bin" LD_LIBRARY_PATH="$LD_LIBRARY_PATH:/usr/lib/sdk/dotnet{0}/lib" exec dotnet restore "$@""#,
            self.config.dotnet
        )
    }

    pub fn sandbox_args(&self, packages: &Path, project: &Path) -> Vec<OsString> {
        let config = self.config;
        let mut args: Vec<OsString> = vec![
            "run".into(),
            "--env=DOTNET_CLI_TELEMETRY_OPTOUT=true".into(),
            "--env=DOTNET_SKIP_FIRST_TIME_EXPERIENCE=true".into(),
            "--command=sh".into(),
            format!("--runtime=org.freedesktop.Sdk//{}", config.freedesktop).into(),
            "--share=network".into(),
            "--filesystem=host".into(),
            format!(
                "org.freedesktop.Sdk.Extension.dotnet{}//{}",
                config.dotnet, config.freedesktop
            )
            .into(),
            "-c".into(),
            self.restore_script().into(),
            "--".into(),
            "--packages".into(),
            packages.as_os_str().to_os_string(),
            project.as_os_str().to_os_string(),
        ];

        if let Some(ref runtime) = config.runtime {
            args.push("-r".into());
            args.push(runtime.into());
        }

        args
    }

    /// Restore one project into `packages`, blocking until the sandbox exits.
    ///
    /// An interrupt received while the sandbox ran wins over its exit status.
    pub fn restore(&self, packages: &Path, project: &Path) -> Result<()> {
        let args = self.sandbox_args(packages, project);
        info!("Restoring {}", project.display());
        debug!("{} {:?}", self.program.display(), args);

        let status = Command::new(&self.program).args(&args).status()?;
        self.interrupt.check()?;
        if !status.success() {
            return Err(Error::RestoreFailed {
                project: project.display().to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restorer(config: &Config) -> Restorer<'_> {
        Restorer {
            config,
            program: PathBuf::from("flatpak"),
            interrupt: Interrupt::new(),
        }
    }

    fn to_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_sandbox_args_default_versions() {
        let config = Config::new("out.json", vec![PathBuf::from("App.csproj")]);
        let args = to_strings(
            restorer(&config).sandbox_args(Path::new("/tmp/scratch"), Path::new("App.csproj")),
        );

        assert_eq!(
            args,
            vec![
                "run",
                "--env=DOTNET_CLI_TELEMETRY_OPTOUT=true",
                "--env=DOTNET_SKIP_FIRST_TIME_EXPERIENCE=true",
                "--command=sh",
                "--runtime=org.freedesktop.Sdk//23.08",
                "--share=network",
                "--filesystem=host",
                "org.freedesktop.Sdk.Extension.dotnet7//23.08",
                "-c",
                r#"PATH="${PATH}:/usr/lib/sdk/dotnet7/bin" LD_LIBRARY_PATH="$LD_LIBRARY_PATH:/usr/lib/sdk/dotnet7/lib" exec dotnet restore "$@""#,
                "--",
                "--packages",
                "/tmp/scratch",
                "App.csproj",
            ]
        );
    }

    #[test]
    fn test_sandbox_args_with_runtime_and_versions() {
        let mut config = Config::new("out.json", vec![PathBuf::from("App.csproj")]);
        config.runtime = Some("linux-x64".to_string());
        config.dotnet = 8;
        config.freedesktop = "24.08".to_string();

        let args = to_strings(
            restorer(&config).sandbox_args(Path::new("/tmp/scratch"), Path::new("App.csproj")),
        );

        assert!(args.contains(&"--runtime=org.freedesktop.Sdk//24.08".to_string()));
        assert!(args.contains(&"org.freedesktop.Sdk.Extension.dotnet8//24.08".to_string()));
        assert!(args[9].contains("/usr/lib/sdk/dotnet8/bin"));
        assert!(args[9].contains("/usr/lib/sdk/dotnet8/lib"));
        assert_eq!(&args[args.len() - 2..], ["-r", "linux-x64"]);
    }

    #[test]
    fn test_missing_launcher() {
        let mut config = Config::new("out.json", vec![PathBuf::from("App.csproj")]);
        config.flatpak = "flatpak-launcher-that-does-not-exist".to_string();

        match Restorer::new(&config, Interrupt::new()) {
            Err(Error::ToolNotFound { program }) => {
                assert_eq!(program, "flatpak-launcher-that-does-not-exist")
            }
            _ => panic!("expected ToolNotFound"),
        }
    }

    #[test]
    fn test_restore_failure_reports_status() {
        let mut config = Config::new("out.json", vec![PathBuf::from("App.csproj")]);
        config.flatpak = "false".to_string();
        let restorer = Restorer::new(&config, Interrupt::new()).unwrap();

        match restorer.restore(Path::new("/tmp/scratch"), Path::new("App.csproj")) {
            Err(Error::RestoreFailed { project, code }) => {
                assert_eq!(project, "App.csproj");
                assert_eq!(code, Some(1));
            }
            _ => panic!("expected RestoreFailed"),
        }
    }

    #[test]
    fn test_interrupt_during_restore() {
        let mut config = Config::new("out.json", vec![PathBuf::from("App.csproj")]);
        config.flatpak = "false".to_string();
        let interrupt = Interrupt::new();
        let restorer = Restorer::new(&config, interrupt.clone()).unwrap();

        interrupt.trigger();
        assert!(matches!(
            restorer.restore(Path::new("/tmp/scratch"), Path::new("App.csproj")),
            Err(Error::Interrupted)
        ));
    }
}

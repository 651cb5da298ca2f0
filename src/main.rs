use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::Level;

use git_changerelease::config::{self, CONFIG_FILE_NAME};
use git_changerelease::git::{Git2Repository, Repository};
use git_changerelease::release::{
    run_release, ArtifactEditor, ExternalEditor, Overrides, ReleaseOptions, ReleaseOutcome,
};
use git_changerelease::{telemetry, ui, ChangeReleaseError};

#[derive(clap::Parser)]
#[command(
    name = "git-changerelease",
    version,
    about = "Propose the next version from the commit log, confirm it in the changelog, commit and tag"
)]
struct Args {
    #[arg(
        long,
        default_value = "History.md",
        help = "Changelog file, relative to the repository root"
    )]
    changelog: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write the default configuration file and exit")]
    create_config: bool,

    #[arg(long, help = "Use the proposed version without opening $EDITOR")]
    no_edit: bool,

    #[arg(long, value_name = "ID", help = "Prerelease identifier, e.g. rc.1")]
    pre_release: Option<String>,

    #[arg(long, value_name = "ID", help = "Build metadata, e.g. build.42")]
    release_meta: Option<String>,

    #[arg(
        long,
        default_value = "error",
        help = "Diagnostic log level when RUST_LOG is unset"
    )]
    log_level: Level,
}

fn main() -> ExitCode {
    let args = Args::parse();
    telemetry::init_tracing(args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ChangeReleaseError>() {
                Some(err) => ui::display_error(err.stage(), &format!("{:#}", e)),
                None => ui::display_error("setup", &format!("{:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let repo = Git2Repository::open(".").context("not inside a git repository")?;
    let workdir = repo.workdir()?;

    if args.create_config {
        let path = args
            .config
            .unwrap_or_else(|| workdir.join(CONFIG_FILE_NAME));
        if path.exists() {
            bail!("{} already exists, not overwriting it", path.display());
        }
        config::write_default_config(&path)?;
        ui::display_success(&format!("Wrote default configuration to {}", path.display()));
        return Ok(());
    }

    let config = config::load_config(args.config.as_deref(), Some(&workdir))?;
    config.validate()?;

    // Checked up front so a missing $EDITOR fails before anything is written
    let editor = if args.no_edit {
        None
    } else {
        Some(ExternalEditor::from_env(workdir.join(&args.changelog))?)
    };

    let options = ReleaseOptions::new(&args.changelog, chrono::Local::now().date_naive())
        .with_overrides(Overrides {
            prerelease: args.pre_release.unwrap_or_default(),
            metadata: args.release_meta.unwrap_or_default(),
        });

    ui::display_status("Analysing commits since the latest tag...");
    let outcome = run_release(
        &repo,
        &config,
        &options,
        editor.as_ref().map(|e| e as &dyn ArtifactEditor),
    )?;

    match outcome {
        ReleaseOutcome::Released(report) => {
            for warning in &report.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_release_summary(&report);
        }
        ReleaseOutcome::NoRelease(reason) => {
            ui::display_boundary_warning(&reason.warning());
        }
    }

    Ok(())
}

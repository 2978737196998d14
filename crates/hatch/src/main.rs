use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use hatch_core::{
    Browser, Clock, GitCli, Outcome, SystemClock, clone_project, copy_project, create_project,
};

mod config_file;
mod input;
mod logging;
mod output;
mod shell;
mod theme;
mod tui;
mod view;

use output::ColorMode;

const USAGE: &str = "usage: hatch [name] | hatch <source> <name> | hatch --clone <url> [name]";

const AFTER_HELP: &str = "\
Usage:
  hatch                    Browse projects interactively
  hatch <name>             Create <YYYY-MM-DD>-<name> and open it
  hatch <source> <name>    Copy <source> into a new project
  hatch --clone <url> [name]
                           Clone a git repository into a new project

Actions in browser:
  type                     Filter projects (fuzzy)
  Up/Down, Ctrl+P/Ctrl+N   Move
  Enter                    Open project, or create from the filter
  Ctrl+A                   Archive project
  Ctrl+R                   Remove project
  Esc, Ctrl+C              Quit

Shell integration (required for automatic cd):
  eval \"$(hatch --init zsh)\"      # ~/.zshrc
  eval \"$(hatch --init bash)\"     # ~/.bashrc
  hatch --init fish | source      # ~/.config/fish/config.fish

Environment:
  HATCHERY_HOME   Root directory (default ~/hatchery)
  HATCH_THEME     Browser theme: default or mono
  HATCH_LOG       Log filter, written to <cache dir>/hatch/hatch.log";

/// hatch incubates short-lived projects in ~/hatchery.
#[derive(Parser, Debug)]
#[command(name = "hatch", version, about, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// Project name, or a source directory followed by a project name
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Clone a git repository into a new project
    #[arg(long, value_name = "URL")]
    clone: Option<String>,

    /// Print shell integration for zsh, bash or fish
    #[arg(long, value_name = "SHELL")]
    init: Option<String>,

    /// Browser theme: default or mono
    #[arg(long)]
    theme: Option<String>,

    /// File that receives the resulting directory (used by the shell hook)
    #[arg(long, value_name = "PATH", hide = true)]
    cwd_file: Option<String>,
}

/// What one invocation asked for.
#[derive(Debug, PartialEq, Eq)]
enum Request {
    Init(String),
    Browse,
    Create(String),
    Copy { source: String, name: String },
    Clone { url: String, name: Option<String> },
}

impl Args {
    fn request(&self) -> anyhow::Result<Request> {
        if let Some(shell) = &self.init {
            return Ok(Request::Init(shell.clone()));
        }

        if let Some(url) = &self.clone {
            return match self.args.as_slice() {
                [] => Ok(Request::Clone {
                    url: url.clone(),
                    name: None,
                }),
                [name] => Ok(Request::Clone {
                    url: url.clone(),
                    name: Some(name.clone()),
                }),
                _ => bail!("too many arguments\n{USAGE}"),
            };
        }

        match self.args.as_slice() {
            [] => Ok(Request::Browse),
            [name] => Ok(Request::Create(name.clone())),
            [source, name] => Ok(Request::Copy {
                source: source.clone(),
                name: name.clone(),
            }),
            _ => bail!("too many arguments\n{USAGE}"),
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = logging::init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "command failed");
            eprintln!("{}", output::error_line(&err, ColorMode::detect(&io::stderr())));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let request = args.request()?;
    let config = config_file::load_config();
    let root_env = std::env::var(config_file::ROOT_ENV).ok();
    let root = || config_file::resolve_root(root_env.as_deref(), &config);
    tracing::debug!(?request, "starting");

    let now = SystemClock.now();
    let (label, path) = match request {
        Request::Init(shell) => {
            print!("{}", shell::shell_init(&shell)?);
            return Ok(());
        }
        Request::Browse => {
            let theme_env = std::env::var(config_file::THEME_ENV).ok();
            let theme_name =
                config_file::resolve_theme(args.theme.as_deref(), theme_env.as_deref(), &config);
            match browse(root()?, &theme::Theme::from_name(&theme_name))? {
                Some(path) => ("Opened", path),
                None => return Ok(()),
            }
        }
        Request::Create(name) => ("Created", create_project(&root()?, &name, &now)?),
        Request::Copy { source, name } => (
            "Copied into",
            copy_project(&root()?, &source, &name, &now)?,
        ),
        Request::Clone { url, name } => (
            "Cloned into",
            clone_project(&root()?, &url, name.as_deref(), &now, &GitCli::default())?,
        ),
    };

    finish(args, label, &path)
}

/// Run the interactive browser. `None` means the user left without picking.
fn browse(root: PathBuf, theme: &theme::Theme) -> anyhow::Result<Option<PathBuf>> {
    let browser = Browser::open(root, Box::new(SystemClock))?;
    match tui::run(browser, theme)? {
        Outcome::Selected(path) => Ok(Some(path)),
        Outcome::Cancelled => Ok(None),
        Outcome::Failed(err) => Err(err.into()),
    }
}

fn finish(args: &Args, label: &str, path: &Path) -> anyhow::Result<()> {
    if let Some(cwd_file) = &args.cwd_file {
        shell::write_cwd(cwd_file, path)?;
    }
    println!(
        "{}",
        output::success_line(label, path, ColorMode::detect(&io::stdout()))
    );
    Ok(())
}

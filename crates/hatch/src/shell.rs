//! Shell integration: the wrapper function that lets `hatch` change the
//! caller's working directory, and the file handoff it relies on.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, bail};

const POSIX_HOOK: &str = r#"hatch() {
  local _hatch_cwd_file _hatch_status _hatch_target
  _hatch_cwd_file="$(mktemp "${TMPDIR:-/tmp}/hatch-cwd.XXXXXX")" || return 1
  command hatch --cwd-file "$_hatch_cwd_file" "$@"
  _hatch_status=$?
  if [ $_hatch_status -eq 0 ] && [ -s "$_hatch_cwd_file" ]; then
    _hatch_target="$(cat "$_hatch_cwd_file")"
    if [ -d "$_hatch_target" ]; then
      cd "$_hatch_target" || _hatch_status=$?
    fi
  fi
  rm -f "$_hatch_cwd_file"
  return $_hatch_status
}
"#;

const FISH_HOOK: &str = r#"function hatch
    set -l _hatch_cwd_file (mktemp (string join '' (set -q TMPDIR; and echo $TMPDIR; or echo /tmp) '/hatch-cwd.XXXXXX'))
    or return 1
    command hatch --cwd-file $_hatch_cwd_file $argv
    set -l _hatch_status $status
    if test $_hatch_status -eq 0; and test -s $_hatch_cwd_file
        set -l _hatch_target (cat $_hatch_cwd_file)
        if test -d "$_hatch_target"
            cd $_hatch_target
        end
    end
    rm -f $_hatch_cwd_file
    return $_hatch_status
end
"#;

/// Shell code to `eval` for `hatch --init <shell>`.
pub fn shell_init(shell: &str) -> anyhow::Result<&'static str> {
    match shell.trim().to_ascii_lowercase().as_str() {
        "zsh" | "bash" => Ok(POSIX_HOOK),
        "fish" => Ok(FISH_HOOK),
        _ => bail!("unsupported shell {shell:?} (use zsh, bash, or fish)"),
    }
}

/// Hand `target` to the shell hook by writing it to `cwd_file`.
///
/// An empty `cwd_file` means no hook is listening and nothing is written.
pub fn write_cwd(cwd_file: &str, target: &Path) -> anyhow::Result<()> {
    let cwd_file = cwd_file.trim();
    if cwd_file.is_empty() {
        return Ok(());
    }

    let absolute = std::path::absolute(target)
        .with_context(|| format!("resolve {}", target.display()))?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options
        .open(cwd_file)
        .with_context(|| format!("open cwd file {cwd_file}"))?;
    file.write_all(absolute.as_os_str().as_encoded_bytes())
        .with_context(|| format!("write cwd file {cwd_file}"))?;
    tracing::debug!(cwd_file, target = %absolute.display(), "wrote cwd handoff");
    Ok(())
}

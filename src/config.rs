//! Startup configuration: whether the shell runs in POSIX-conformant
//! mode, which narrows job-status output (§4.6/§4.7) and suppresses a
//! few GNU-ish conveniences in the CLI demo.
//!
//! Parsing follows the `.rushrc` KEY=value style of the teacher's daemon
//! config (`src/daemon/config.rs`): comments and blank lines skipped, an
//! optional `export ` prefix stripped, values unquoted.

use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub posixly_correct: bool,
}

impl Config {
    /// Resolves posix mode from, in order: the `POSIXLY_CORRECT`
    /// environment variable (any value, including empty, counts as set),
    /// then a `set -o posix` / `set +o posix` directive in `~/.joshellrc`.
    pub fn load() -> Self {
        if std::env::var_os("POSIXLY_CORRECT").is_some() {
            return Self { posixly_correct: true };
        }
        Self::from_file(&rc_path()).unwrap_or_default()
    }

    fn from_file(path: &PathBuf) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        Some(Self::parse(&content))
    }

    fn parse(content: &str) -> Self {
        let mut config = Config::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line {
                "set -o posix" => config.posixly_correct = true,
                "set +o posix" => config.posixly_correct = false,
                _ => {}
            }
        }
        config
    }
}

fn rc_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".joshellrc")
}

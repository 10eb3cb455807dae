use std::path::PathBuf;

use chatpdf_engine::DEFAULT_BASE_URL;
use clap::Parser;

use super::logging::LogDestination;

/// Chat with your documents from the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "chatpdf", version, about)]
pub struct Args {
    /// Backend base URL.
    #[arg(long, env = "CHATPDF_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Session token from an external identity provider; skips sign-in.
    #[arg(long, env = "CHATPDF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory holding the saved session; defaults to the working directory.
    #[arg(long, env = "CHATPDF_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Skip the warm-up ping on start.
    #[arg(long)]
    pub no_wake: bool,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[arg(long, default_value = "./chatpdf.log")]
    pub log_file: PathBuf,
}

impl Args {
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hosted_backend() {
        let args = Args::try_parse_from(["chatpdf"]).unwrap();
        assert_eq!(args.api_url, DEFAULT_BASE_URL);
        assert_eq!(args.timeout_secs, 120);
        assert_eq!(args.log, LogDestination::File);
        assert!(!args.no_wake);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "chatpdf",
            "--api-url",
            "http://localhost:3000",
            "--state-dir",
            "/tmp/chatpdf",
            "--log",
            "off",
            "--no-wake",
        ])
        .unwrap();
        assert_eq!(args.api_url, "http://localhost:3000");
        assert_eq!(args.state_dir(), PathBuf::from("/tmp/chatpdf"));
        assert_eq!(args.log, LogDestination::Off);
        assert!(args.no_wake);
    }
}

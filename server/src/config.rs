//! Command line and environment configuration of the server.

use clap::Parser;
use std::path::PathBuf;

/// Prefix of the temporary directories holding export files.
pub const DEFAULT_EXPORT_PREFIX: &str = "ner_export_";

#[derive(Debug, Clone, Parser)]
#[command(name = "nerlabel-server")]
#[command(about = "Records NER annotations and exports them as BIO labeled datasets")]
#[command(version)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory of the annotation front-end, served at `/`
    #[arg(long, env = "NERLABEL_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Prefix of the temporary export directories
    #[arg(long, default_value = DEFAULT_EXPORT_PREFIX)]
    pub export_prefix: String,

    /// Do not remove leftover export directories on startup
    #[arg(long)]
    pub skip_sweep: bool,
}

impl ServerArgs {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        ServerArgs::command().debug_assert();
    }

    #[test]
    fn test_explicit_arguments() {
        let args = ServerArgs::try_parse_from([
            "nerlabel-server",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--static-dir",
            "dist",
            "--skip-sweep",
        ])
        .unwrap();
        assert_eq!(args.address(), "127.0.0.1:8080");
        assert_eq!(args.static_dir, Some(PathBuf::from("dist")));
        assert!(args.skip_sweep);
        assert_eq!(args.export_prefix, DEFAULT_EXPORT_PREFIX);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let res = ServerArgs::try_parse_from(["nerlabel-server", "--port", "70000"]);
        assert!(res.is_err());
    }
}

//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "digital-timer")]
#[command(about = "A state-managed HTTP server exposing a start/pause/reset countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Enable verbose logging (logs every tick)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["digital-timer"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn verbose_switches_to_debug() {
        let config = Config::try_parse_from([
            "digital-timer",
            "-v",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.log_level(), "debug");
    }
}

//! Command-line argument parsing

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "docker-tag-exists")]
#[command(about = "Check whether an image tag exists in a Docker registry without pulling it")]
#[command(version, author)]
pub struct Args {
    /// Image reference to check
    #[arg(
        value_name = "IMAGE",
        help = "Image reference: 'image:tag' or 'registry/namespace/image:tag'"
    )]
    pub image: String,

    /// Registry username
    #[arg(long = "user", short = 'u', help = "Username for registry authentication")]
    pub username: Option<String>,

    /// Registry password
    #[arg(long = "pass", short = 'p', help = "Password for registry authentication")]
    pub password: Option<String>,

    /// Skip TLS verification
    #[arg(
        long = "skip-tls",
        short = 'k',
        help = "Skip TLS certificate verification"
    )]
    pub skip_tls: bool,

    /// Use plain HTTP
    #[arg(long = "plain-http", help = "Talk plain HTTP to the registry (local registries)")]
    pub plain_http: bool,

    /// Timeout in seconds for network operations
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "30",
        help = "Timeout for network operations in seconds"
    )]
    pub timeout: u64,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    /// Quiet output
    #[arg(long = "quiet", short = 'q', help = "Only print the existence result")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate arguments
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Fill missing credentials from environment variables
    pub fn from_env(mut self) -> Self {
        if self.username.is_none() {
            self.username = std::env::var("DOCKER_TAG_USERNAME").ok();
        }

        if self.password.is_none() {
            self.password = std::env::var("DOCKER_TAG_PASSWORD").ok();
        }

        self
    }
}

//! Runner wiring the reference parser into the registry client

use crate::cli::args::Args;
use crate::config::AuthConfig;
use crate::error::{CheckError, Result};
use crate::image::ImageReference;
use crate::output::OutputManager;
use crate::registry::{RegistryClient, TagExistence};
use std::time::Duration;

pub struct Runner {
    args: Args,
    output: OutputManager,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            OutputManager::new_quiet()
        } else {
            OutputManager::new(args.verbose)
        };

        Self { args, output }
    }

    /// Run the existence check and print `exist` or `noexist` to stdout.
    pub async fn run(&self) -> Result<TagExistence> {
        self.args.validate().map_err(CheckError::Argument)?;

        let reference = ImageReference::parse(&self.args.image)?;
        self.output.debug(&format!("Registry: {}", reference.host()));
        self.output
            .debug(&format!("Repository: {}", reference.repository));
        self.output.debug(&format!("Tag: {}", reference.tag));

        let auth = AuthConfig::new(self.args.username.clone(), self.args.password.clone());
        if auth.has_auth() {
            self.output.step("Using provided credentials");
        } else {
            if self.args.username.is_some() || self.args.password.is_some() {
                self.output.warning(
                    "Incomplete credentials ignored - both --user and --pass must be non-empty",
                );
            }
            self.output
                .step("No credentials provided - attempting anonymous access");
        }

        let client = RegistryClient::builder()
            .with_skip_tls(self.args.skip_tls)
            .with_plain_http(self.args.plain_http)
            .with_timeout(Duration::from_secs(self.args.timeout))
            .with_output(self.output.clone())
            .build()?;

        let existence = client.check_tag_exists(&reference, &auth).await?;
        match existence {
            TagExistence::Exists => println!("exist"),
            TagExistence::Missing => println!("noexist"),
        }
        Ok(existence)
    }
}

use crate::api::analytics_admin::AnalyticsAdminClient;
use crate::api::client::build_http_client;
use crate::api::tagmanager::TagManagerClient;
use crate::cli::main_types::Cli;
use crate::core::auth::{ServiceAccountTokenProvider, StaticTokenProvider, TokenProvider};
use crate::core::models::AuditReport;
use crate::core::services::AuditService;
use crate::display::{format_json_report, format_text_report};
use crate::error::{AppError, AuthError, CliError};
use crate::storage::config::Config;
use crate::storage::credentials::get_credentials;
use crate::storage::report_store::save_report;
use crate::utils::logging::Logger;
use crate::utils::validation::validate_max_concurrency;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    logger: Logger,
}

impl Dispatcher {
    pub fn new(config: Config, logger: Logger) -> Self {
        Self { config, logger }
    }

    /// Run the audit and present or save the report
    pub async fn dispatch(&self, cli: &Cli) -> Result<(), AppError> {
        self.config.validate()?;
        let max_concurrency = self.max_concurrency(cli.concurrency)?;
        self.logger
            .verbose(&format!("Using max concurrency {}", max_concurrency));

        let token_provider = self.token_provider(cli.access_token.as_deref()).await?;
        let tag_manager = TagManagerClient::new(
            self.config.tagmanager_base_url.clone(),
            Arc::clone(&token_provider),
        )?;
        let analytics = AnalyticsAdminClient::new(
            self.config.analytics_admin_base_url.clone(),
            token_provider,
        )?;
        self.logger.verbose(&format!(
            "Tag Manager API: {}, Analytics Admin API: {}",
            tag_manager.base_url(),
            analytics.base_url()
        ));

        let report = AuditService::new(Arc::new(tag_manager), Arc::new(analytics), self.logger)
            .with_max_concurrency(max_concurrency)
            .run()
            .await?;

        self.present(&report, cli)
    }

    /// `--concurrency` wins over `max_concurrency` from the config file
    fn max_concurrency(&self, requested: Option<usize>) -> Result<usize, AppError> {
        match requested {
            Some(value) => Ok(validate_max_concurrency(value)?),
            None => Ok(self.config.max_concurrency()?),
        }
    }

    async fn token_provider(
        &self,
        access_token: Option<&str>,
    ) -> Result<Arc<dyn TokenProvider>, AppError> {
        if let Some(token) = access_token {
            if token.trim().is_empty() {
                return Err(CliError::InvalidArguments(
                    "--access-token must not be empty".to_string(),
                )
                .into());
            }
            self.logger.verbose("Using access token from the command line");
            return Ok(Arc::new(StaticTokenProvider::new(token)));
        }

        let credentials_path = self.config.credentials_path()?;
        self.logger.verbose(&format!(
            "Loading service account key from {}",
            credentials_path.display()
        ));
        let credentials =
            get_credentials(&credentials_path, &self.logger).ok_or_else(|| {
                AuthError::InvalidKey(format!(
                    "unable to load service account key from '{}'",
                    credentials_path.display()
                ))
            })?;

        let provider = ServiceAccountTokenProvider::new(build_http_client()?, credentials);
        provider.authorize().await?;
        self.logger.verbose(&format!(
            "Authenticated as {}",
            provider.credentials().client_email()
        ));
        Ok(Arc::new(provider))
    }

    fn present(&self, report: &AuditReport, cli: &Cli) -> Result<(), AppError> {
        if let Some(directory) = &cli.output {
            let path = save_report(report, directory, cli.json)?;
            self.logger
                .status(&format!("Report saved to {}", path.display()));
            return Ok(());
        }

        let rendered = if cli.json {
            format_json_report(report)?
        } else {
            format_text_report(report)?
        };
        println!("{}", rendered);
        Ok(())
    }
}

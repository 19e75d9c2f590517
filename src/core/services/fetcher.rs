//! Traversal of the GTM and GA4 resource trees.
//!
//! Listing order is kept everywhere. Per-container live version lookups and
//! per-property data stream listings go through an in-order pipeline bounded
//! by `max_concurrency`.

use crate::api::models::{
    AnalyticsAccount, AnalyticsProperty, ContainerVersion, TagManagerAccount, TagManagerContainer,
};
use crate::core::models::{GaAccount, GaDataStream, GaProperty, GtmAccount, GtmContainer};
use crate::core::services::traits::{AnalyticsAdminSource, TagManagerSource};
use crate::display::diagnostics::{DEFAULT_MAX_DEPTH, describe};
use crate::error::ApiError;
use crate::utils::error_helpers::convert_json_error;
use crate::utils::logging::Logger;
use futures::stream::{self, StreamExt, TryStreamExt};

pub async fn build_gtm_accounts(
    source: &dyn TagManagerSource,
    logger: &Logger,
    max_concurrency: usize,
) -> Result<Vec<GtmAccount>, ApiError> {
    let raw_accounts = source.list_accounts().await?;
    logger.verbose(&format!("Found {} GTM accounts", raw_accounts.len()));

    let mut accounts = Vec::with_capacity(raw_accounts.len());
    for raw in &raw_accounts {
        accounts.push(build_gtm_account(source, raw, logger, max_concurrency).await?);
    }
    Ok(accounts)
}

async fn build_gtm_account(
    source: &dyn TagManagerSource,
    raw: &TagManagerAccount,
    logger: &Logger,
    max_concurrency: usize,
) -> Result<GtmAccount, ApiError> {
    logger.status(&format!(
        "Fetching GTM account: {} (ID: {})",
        raw.name, raw.account_id
    ));

    let mut account = GtmAccount::from_api(raw);
    let raw_containers = source.list_containers(&raw.path).await?;
    logger.verbose(&format!(
        "Account {} has {} containers",
        raw.account_id,
        raw_containers.len()
    ));

    account.containers = stream::iter(raw_containers.iter())
        .map(|container| build_gtm_container(source, container, logger))
        .buffered(max_concurrency.max(1))
        .try_collect()
        .await?;

    Ok(account)
}

async fn build_gtm_container(
    source: &dyn TagManagerSource,
    raw: &TagManagerContainer,
    logger: &Logger,
) -> Result<GtmContainer, ApiError> {
    let container = GtmContainer::from_api(raw);

    match source.live_version(&raw.path).await {
        Ok(payload) => {
            if logger.is_verbose() {
                logger.verbose(&format!(
                    "Live version of {} ({}):\n{}",
                    raw.name,
                    raw.public_id,
                    describe(&payload, DEFAULT_MAX_DEPTH)
                ));
            }
            let version: ContainerVersion = serde_json::from_value(payload)
                .map_err(|e| convert_json_error(e, &format!("{}/versions:live", raw.path)))?;
            Ok(container.with_live_version(version))
        }
        Err(err) if err.is_not_found() => {
            logger.warning(&format!(
                "No live version published for container {} ({})",
                raw.name, raw.public_id
            ));
            Ok(container.without_live_version())
        }
        Err(err) => Err(err),
    }
}

pub async fn build_ga_accounts(
    source: &dyn AnalyticsAdminSource,
    logger: &Logger,
    max_concurrency: usize,
) -> Result<Vec<GaAccount>, ApiError> {
    let raw_accounts = source.list_accounts().await?;
    logger.verbose(&format!("Found {} GA accounts", raw_accounts.len()));

    let mut accounts = Vec::with_capacity(raw_accounts.len());
    for raw in &raw_accounts {
        accounts.push(build_ga_account(source, raw, logger, max_concurrency).await?);
    }
    Ok(accounts)
}

async fn build_ga_account(
    source: &dyn AnalyticsAdminSource,
    raw: &AnalyticsAccount,
    logger: &Logger,
    max_concurrency: usize,
) -> Result<GaAccount, ApiError> {
    let mut account = GaAccount::from_api(raw)?;
    logger.status(&format!(
        "Fetching GA account: {} (ID: {})",
        account.display_name, account.account_id
    ));

    let raw_properties = source.list_properties(&raw.name).await?;
    logger.verbose(&format!(
        "Account {} has {} properties",
        account.account_id,
        raw_properties.len()
    ));

    account.properties = stream::iter(raw_properties.iter())
        .map(|property| build_ga_property(source, property, logger))
        .buffered(max_concurrency.max(1))
        .try_collect()
        .await?;

    Ok(account)
}

async fn build_ga_property(
    source: &dyn AnalyticsAdminSource,
    raw: &AnalyticsProperty,
    logger: &Logger,
) -> Result<GaProperty, ApiError> {
    let mut property = GaProperty::from_api(raw)?;
    let streams = source.list_data_streams(&raw.name).await?;
    logger.verbose(&format!(
        "Property {} has {} data streams",
        property.property_id,
        streams.len()
    ));

    property.data_streams = streams.into_iter().map(GaDataStream::from_api).collect();
    Ok(property)
}

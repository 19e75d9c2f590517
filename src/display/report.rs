//! Text and JSON renderings of an audit report.

use crate::core::models::{AuditReport, AuditSummary, GaAccount, GtmAccount, GtmContainer};
use crate::error::DisplayError;
use crate::utils::text::rule;
use std::fmt::Write;

const SECTION_RULE_WIDTH: usize = 40;

/// Human-readable report, GTM section first, then GA4, then the summary.
pub fn format_text_report(report: &AuditReport) -> Result<String, DisplayError> {
    let mut out = String::new();
    write_text_report(&mut out, report).map_err(|e| DisplayError::Format(e.to_string()))?;
    Ok(out)
}

/// Pretty JSON with the computed `summary`.
pub fn format_json_report(report: &AuditReport) -> Result<String, DisplayError> {
    serde_json::to_string_pretty(report).map_err(|e| DisplayError::Serialize(e.to_string()))
}

fn write_text_report(out: &mut String, report: &AuditReport) -> std::fmt::Result {
    writeln!(out, "=== Google Tag Manager ===")?;
    if report.gtm_accounts.is_empty() {
        writeln!(
            out,
            "No GTM accounts found or accessible by the service account."
        )?;
    }
    for account in &report.gtm_accounts {
        write_gtm_account(out, account)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", rule('=', SECTION_RULE_WIDTH))?;
    writeln!(out)?;

    writeln!(out, "=== Google Analytics (GA4) ===")?;
    if report.ga_accounts.is_empty() {
        writeln!(
            out,
            "No GA accounts found or accessible by the service account."
        )?;
    }
    for account in &report.ga_accounts {
        write_ga_account(out, account)?;
    }

    writeln!(out)?;
    write_summary(out, &report.summary())
}

fn write_gtm_account(out: &mut String, account: &GtmAccount) -> std::fmt::Result {
    writeln!(
        out,
        "[GTM Account] {} (ID: {})",
        account.name, account.account_id
    )?;
    if account.containers.is_empty() {
        writeln!(out, "  - No containers found.")?;
    }
    for container in &account.containers {
        write_gtm_container(out, container)?;
    }
    Ok(())
}

fn write_gtm_container(out: &mut String, container: &GtmContainer) -> std::fmt::Result {
    writeln!(
        out,
        "  - [Container] {} (Public ID: {}, Container ID: {})",
        container.name, container.public_id, container.container_id
    )?;

    if let Some(error) = &container.error {
        writeln!(out, "    ⚠️ {}", error)?;
    } else if let Some(version_id) = &container.live_version_id {
        writeln!(out, "    Live version: {}", version_id)?;
    }

    if !container.is_degraded() {
        let linked = container.linked_measurement_ids();
        if linked.is_empty() {
            writeln!(
                out,
                "    - No GA4 Configuration Tags found in Live version."
            )?;
        }
        for measurement_id in &linked {
            writeln!(out, "    - Links to GA4 Measurement ID: {}", measurement_id)?;
        }

        let histogram = container.tag_type_histogram();
        if !histogram.is_empty() {
            writeln!(out, "    Tag types:")?;
            for (tag_type, count) in &histogram {
                writeln!(out, "      {}: {}", tag_type, count)?;
            }
        }
    }

    writeln!(
        out,
        "    Tags: {}, Triggers: {}, Variables: {}",
        container.tags.len(),
        container.triggers.len(),
        container.variables.len()
    )
}

fn write_ga_account(out: &mut String, account: &GaAccount) -> std::fmt::Result {
    writeln!(
        out,
        "[GA Account] {} (ID: {})",
        account.display_name, account.account_id
    )?;
    if account.properties.is_empty() {
        writeln!(out, "  - No properties found.")?;
    }
    for property in &account.properties {
        writeln!(
            out,
            "  - [Property] {} (ID: {})",
            property.display_name, property.property_id
        )?;
        writeln!(
            out,
            "    (Timezone: {}, Currency: {})",
            property.time_zone, property.currency_code
        )?;
        if property.data_streams.is_empty() {
            writeln!(out, "    - No data streams found.")?;
        }
        for stream in &property.data_streams {
            if let Some(id) = &stream.measurement_id {
                writeln!(
                    out,
                    "    - [Stream] {} ({}) - ID: {}",
                    stream.display_name, stream.stream_type, id
                )?;
            }
        }
    }
    Ok(())
}

fn write_summary(out: &mut String, summary: &AuditSummary) -> std::fmt::Result {
    writeln!(out, "=== Summary ===")?;
    writeln!(out, "GTM accounts:    {}", summary.gtm_accounts)?;
    writeln!(out, "GTM containers:  {}", summary.gtm_containers)?;
    writeln!(out, "GTM tags:        {}", summary.gtm_tags)?;
    writeln!(out, "GTM triggers:    {}", summary.gtm_triggers)?;
    writeln!(out, "GTM variables:   {}", summary.gtm_variables)?;
    writeln!(out, "GA accounts:     {}", summary.ga_accounts)?;
    writeln!(out, "GA properties:   {}", summary.ga_properties)?;
    writeln!(out, "GA data streams: {}", summary.ga_data_streams)
}

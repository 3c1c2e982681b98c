//! Command handlers: wire config, reference data, and the API client into
//! the report pipeline, run it as a single background job, and surface
//! one terminal error on failure.

use chrono::NaiveDate;
use kurir_api::{ApiError, TaskClient};
use kurir_core::{load_hubs, AppConfig, DriverRecord, DriverStore, HubConfig};
use kurir_report::{
    delivered_report, pending_so_report, ro_vs_real_report, write_report, DriverResolver,
    ReportJob,
};

/// Everything a single run needs, resolved up front so a configuration
/// problem fails before any network call.
pub struct RunContext {
    pub config: AppConfig,
    pub hub: HubConfig,
    pub client: TaskClient,
    pub store: DriverStore,
}

/// Builds the run context: hub mapping, API client, driver reference.
///
/// `location` overrides the configured location code when present.
pub fn build_context(config: AppConfig, location: Option<String>) -> anyhow::Result<RunContext> {
    let hubs = load_hubs(&config.hubs_path)?;
    let code = location.unwrap_or_else(|| config.location_code.clone());
    let hub = hubs.resolve(&code)?.clone();
    let client = TaskClient::with_base_url(
        &config.api_token,
        config.request_timeout_secs,
        config.task_limit,
        &config.api_base_url,
    )?;
    let store = DriverStore::load(&config.drivers_path)?;
    Ok(RunContext {
        config,
        hub,
        client,
        store,
    })
}

/// The date rendered day-month-year, as it appears in report titles.
fn date_label(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

pub async fn run_delivered(ctx: RunContext, date: NaiveDate) -> anyhow::Result<()> {
    tracing::info!(%date, hub = %ctx.hub.hub_id, "generating Total Delivered report");
    let label = date_label(date);
    let job = ReportJob::spawn(async move {
        let tasks = ctx.client.list_tasks(date, &ctx.hub.hub_id).await?;
        let resolver = DriverResolver::new(&ctx.store);
        let seed: Vec<DriverRecord> = ctx
            .store
            .for_hub(&ctx.hub.hub_id)
            .into_iter()
            .cloned()
            .collect();
        let seed_refs: Vec<&DriverRecord> = seed.iter().collect();
        let report = delivered_report(&label, &tasks, &resolver, &seed_refs);
        let dir = write_report(&report, &ctx.config.output_dir, ctx.config.open_after_write)?;
        Ok(dir)
    });

    let dir = job.join().await?;
    tracing::info!(path = %dir.display(), "report ready");
    Ok(())
}

pub async fn run_pending_so(ctx: RunContext, date: NaiveDate) -> anyhow::Result<()> {
    tracing::info!(%date, hub = %ctx.hub.hub_id, "generating Hasil Pending SO report");
    let label = date_label(date);
    let job = ReportJob::spawn(async move {
        let tasks = ctx.client.list_tasks(date, &ctx.hub.hub_id).await?;
        let resolver = DriverResolver::new(&ctx.store);
        let report = pending_so_report(&label, &tasks, &resolver);
        let dir = write_report(&report, &ctx.config.output_dir, ctx.config.open_after_write)?;
        Ok(dir)
    });

    let dir = job.join().await?;
    tracing::info!(path = %dir.display(), "report ready");
    Ok(())
}

pub async fn run_ro_vs_real(ctx: RunContext, date: NaiveDate) -> anyhow::Result<()> {
    tracing::info!(%date, hub = %ctx.hub.hub_id, "generating Hasil RO vs Real report");
    let label = date_label(date);
    let job = ReportJob::spawn(async move {
        let tasks = ctx.client.list_tasks(date, &ctx.hub.hub_id).await?;
        // The utilization sheet is decoration; a day without routing
        // results still gets its reconciliation sheet.
        let route_results = match ctx.client.list_route_results(date, &ctx.hub.hub_id).await {
            Ok(results) => results,
            Err(ApiError::EmptyResult { context }) => {
                tracing::warn!(%context, "no routing results, utilization sheet will be empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        let resolver = DriverResolver::new(&ctx.store);
        let report = ro_vs_real_report(&label, tasks, &route_results, &resolver);
        let dir = write_report(&report, &ctx.config.output_dir, ctx.config.open_after_write)?;
        Ok(dir)
    });

    let dir = job.join().await?;
    tracing::info!(path = %dir.display(), "report ready");
    Ok(())
}

/// Refreshes the driver reference file for the active hub from the
/// routing API. Records for other hubs are left untouched.
pub async fn run_sync_drivers(ctx: RunContext, date: NaiveDate) -> anyhow::Result<()> {
    tracing::info!(%date, hub = %ctx.hub.hub_id, "syncing driver reference");
    let results = ctx.client.list_route_results(date, &ctx.hub.hub_id).await?;

    let updates: Vec<DriverRecord> = results
        .iter()
        .map(|r| DriverRecord {
            assignee_id: r.assignee_id.clone(),
            name: r.driver_name.clone(),
            plate: r.vehicle_plate.clone(),
            hub_id: ctx.hub.hub_id.clone(),
        })
        .collect();

    let mut store = ctx.store;
    store.merge_hub(&ctx.hub.hub_id, updates);
    store.save(&ctx.config.drivers_path)?;
    tracing::info!(
        drivers = store.for_hub(&ctx.hub.hub_id).len(),
        path = %ctx.config.drivers_path.display(),
        "driver reference refreshed"
    );
    Ok(())
}

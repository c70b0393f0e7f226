use crate::catalog::CatalogQuery;
use crate::cli::OutputFormat;
use crate::config::{self, CatalogConfig};
use crate::formatting::FormattingConfig;
use crate::io::{create_writer, CatalogData, FileRecordSource};
use crate::sort::{SortDirection, SortField, SortSpec};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ListConfig {
    pub data: PathBuf,
    pub search: Option<String>,
    pub make: Option<String>,
    pub features: Vec<String>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    pub format: OutputFormat,
}

/// Command-line choices win; anything unset falls back to `[display]`.
pub fn resolve_sort_spec(config: &ListConfig, settings: &CatalogConfig) -> SortSpec {
    let default = settings.default_sort_spec();
    SortSpec::new(
        config
            .sort
            .as_deref()
            .map_or(default.field, SortField::parse),
        config.direction.unwrap_or(default.direction),
    )
}

/// Translate command-line intents into a query over `data`.
pub fn build_query(
    config: &ListConfig,
    settings: &CatalogConfig,
    data: &CatalogData,
) -> Result<CatalogQuery> {
    let mut query = CatalogQuery::new();

    if let Some(search) = &config.search {
        query.set_search_term(search.as_str());
    }

    if let Some(key) = &config.make {
        let scope = data.find_make(key).cloned().with_context(|| {
            let known: Vec<&str> = data.makes.iter().map(|m| m.name.as_str()).collect();
            format!("Unknown manufacturer '{key}'. Known: {}", known.join(", "))
        })?;
        query.set_manufacturer_scope(Some(scope));
    }

    query.set_feature_selections(
        config
            .features
            .iter()
            .map(|spec| data.features.select_spec(spec))
            .collect(),
    );
    query.set_sort_spec(resolve_sort_spec(config, settings));
    Ok(query)
}

pub fn list_vehicles(config: ListConfig) -> Result<()> {
    let settings = config::load_config();
    let source = FileRecordSource::new(&config.data);
    let data = CatalogData::load(&source)
        .with_context(|| format!("Failed to load catalog from {}", config.data.display()))?;

    let query = build_query(&config, &settings, &data)?;
    let records = query.apply(&data.vehicles);
    tracing::info!(
        shown = records.len(),
        total = data.vehicles.len(),
        "Listing vehicles"
    );

    let formatting = FormattingConfig::from_env(settings.color_mode());
    let mut writer = create_writer(config.format, std::io::stdout().lock(), formatting);
    writer.write_list(&records, query.sort_spec())
}

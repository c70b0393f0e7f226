use crate::cli::OutputFormat;
use crate::compare::{
    resolve_comparison, AddOutcome, CompareEvent, CompareOutcome, CompareSelection,
    ComparisonLoader, MatrixState, Viewport, MIN_COMPARE,
};
use crate::config;
use crate::core::VehicleId;
use crate::formatting::{formatter_for, FormattingConfig};
use crate::io::{create_writer, CatalogData, FileDetailResolver, FileRecordSource};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::path::PathBuf;

pub struct CompareArgs {
    pub data: PathBuf,
    pub ids: Vec<VehicleId>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

/// Why a requested id did not make it into the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declined {
    Unknown(VehicleId),
    Duplicate(VehicleId),
    AtCapacity { id: VehicleId, capacity: usize },
    Inactive(VehicleId),
}

impl std::fmt::Display for Declined {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Declined::Unknown(id) => write!(f, "Vehicle {id} is not in the catalog"),
            Declined::Duplicate(id) => write!(f, "Vehicle {id} is already selected"),
            Declined::AtCapacity { id, capacity } => write!(
                f,
                "Vehicle {id} skipped: this viewport compares at most {capacity}"
            ),
            Declined::Inactive(id) => {
                write!(f, "Vehicle {id} skipped: compare mode is not active")
            }
        }
    }
}

/// Feed `ids` into `selection` one at a time, as a user tapping cards would.
pub fn select_vehicles(
    selection: &mut CompareSelection,
    data: &CatalogData,
    ids: &[VehicleId],
) -> Vec<Declined> {
    selection.enter_compare_mode();
    ids.iter()
        .filter_map(|&id| {
            let Some(record) = data.vehicle(id) else {
                return Some(Declined::Unknown(id));
            };
            let outcome = selection.add_car(record);
            declined_for(outcome, id, selection.capacity())
        })
        .collect()
}

fn declined_for(outcome: AddOutcome, id: VehicleId, capacity: usize) -> Option<Declined> {
    match outcome {
        AddOutcome::Added => None,
        AddOutcome::Duplicate => Some(Declined::Duplicate(id)),
        AddOutcome::AtCapacity => Some(Declined::AtCapacity { id, capacity }),
        AddOutcome::Inactive => Some(Declined::Inactive(id)),
    }
}

pub fn compare_vehicles(args: CompareArgs) -> Result<()> {
    let settings = config::load_config();
    let source = FileRecordSource::new(&args.data);
    let data = CatalogData::load(&source)
        .with_context(|| format!("Failed to load catalog from {}", args.data.display()))?;
    let resolver = FileDetailResolver::from_source(&source)
        .with_context(|| format!("Failed to load details from {}", args.data.display()))?;

    let formatting = FormattingConfig::from_env(settings.color_mode());
    let formatter = formatter_for(formatting);

    let mut selection =
        CompareSelection::new(settings.capacity_policy(), Viewport::new(args.width, args.height));
    for declined in select_vehicles(&mut selection, &data, &args.ids) {
        eprintln!("{}", formatter.warning(&declined.to_string()));
    }

    let ids = match selection.handle(CompareEvent::OpenComparison) {
        CompareOutcome::Open(Some(ids)) => ids,
        _ => anyhow::bail!(
            "Select at least {} vehicles to compare ({} selected)",
            MIN_COMPARE,
            selection.len()
        ),
    };
    tracing::info!(?ids, capacity = selection.capacity(), "Opening comparison");

    let loader = Mutex::new(ComparisonLoader::default());
    let selection = Mutex::new(selection);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(resolve_comparison(&loader, &selection, &resolver));

    match loader.into_inner().state() {
        MatrixState::Ready(matrix) => {
            let mut writer = create_writer(args.format, std::io::stdout().lock(), formatting);
            writer.write_matrix(matrix)
        }
        MatrixState::Failed(err) => {
            Err(anyhow::Error::new(err.clone()).context("Could not build comparison"))
        }
        MatrixState::Idle | MatrixState::Loading { .. } => {
            anyhow::bail!("Comparison did not complete")
        }
    }
}

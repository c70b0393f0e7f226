//! Record sources: where vehicle, manufacturer, feature and detail
//! collections come from.
//!
//! The engine itself never performs I/O. Commands load collections through
//! a [`RecordSource`] and hand plain slices to the filters and sorter.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::compare::DetailResolver;
use crate::core::{
    CatalogError, DetailRecord, FeatureCategory, ManufacturerScope, Result, VehicleId,
    VehicleRecord,
};
use crate::filter::FeatureCatalog;

pub const VEHICLES: &str = "vehicles";
pub const MAKES: &str = "makes";
pub const FEATURES: &str = "features";
pub const DETAILS: &str = "details";

/// Collaborator providing named record collections.
pub trait RecordSource: Send + Sync {
    fn fetch_collection<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>>;
}

/// Reads `<root>/<resource>.json`, each file holding a JSON array.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    root: PathBuf,
}

impl FileRecordSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, resource: &str) -> PathBuf {
        self.root.join(format!("{resource}.json"))
    }
}

impl RecordSource for FileRecordSource {
    fn fetch_collection<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        let path = self.path_for(resource);
        let contents =
            std::fs::read_to_string(&path).map_err(|e| CatalogError::io_at(&path, e))?;
        let records: Vec<T> = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::source(resource, e.to_string()))?;
        tracing::debug!(resource, count = records.len(), path = %path.display(), "Loaded collection");
        Ok(records)
    }
}

/// Everything the list view needs, loaded once.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub vehicles: Vec<VehicleRecord>,
    pub makes: Vec<ManufacturerScope>,
    pub features: FeatureCatalog,
}

impl CatalogData {
    /// Load vehicles, plus makes and features when the source has them.
    ///
    /// Only `vehicles` is required; a missing makes or features file leaves
    /// that collection empty.
    pub fn load<S: RecordSource>(source: &S) -> Result<Self> {
        let vehicles = source.fetch_collection::<VehicleRecord>(VEHICLES)?;
        let makes = optional_collection::<_, ManufacturerScope>(source, MAKES)?;
        let categories = optional_collection::<_, FeatureCategory>(source, FEATURES)?;
        Ok(Self {
            vehicles,
            makes,
            features: FeatureCatalog::new(categories),
        })
    }

    /// Manufacturer scope by name or slug, case-insensitively.
    pub fn find_make(&self, key: &str) -> Option<&ManufacturerScope> {
        self.makes.iter().find(|make| make.matches_key(key))
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&VehicleRecord> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}

fn optional_collection<S: RecordSource, T: DeserializeOwned>(
    source: &S,
    resource: &str,
) -> Result<Vec<T>> {
    match source.fetch_collection(resource) {
        Ok(records) => Ok(records),
        Err(CatalogError::Io { source: err, .. })
            if err.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::debug!(resource, "Optional collection not present");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Detail resolver over an in-memory detail collection.
#[derive(Debug, Clone, Default)]
pub struct FileDetailResolver {
    details: Vec<DetailRecord>,
}

impl FileDetailResolver {
    pub fn new(details: Vec<DetailRecord>) -> Self {
        Self { details }
    }

    pub fn from_source<S: RecordSource>(source: &S) -> Result<Self> {
        Ok(Self::new(source.fetch_collection(DETAILS)?))
    }
}

impl DetailResolver for FileDetailResolver {
    async fn fetch_details(&self, ids: &[VehicleId]) -> Result<Vec<DetailRecord>> {
        let found: Vec<DetailRecord> = ids
            .iter()
            .filter_map(|id| self.details.iter().find(|d| d.id == *id).cloned())
            .collect();
        if found.is_empty() && !ids.is_empty() {
            return Err(CatalogError::detail(format!(
                "no detail records for ids {ids:?}"
            )));
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    fn write(dir: &TempDir, resource: &str, contents: &str) {
        std::fs::write(dir.path().join(format!("{resource}.json")), contents).unwrap();
    }

    #[test]
    fn test_loads_vehicles_without_optional_files() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            VEHICLES,
            r#"[{"id": 1, "makeName": "Tesla", "model": "Model 3", "currentPrice": 40000}]"#,
        );

        let data = CatalogData::load(&FileRecordSource::new(dir.path())).unwrap();
        assert_eq!(data.vehicles.len(), 1);
        assert!(data.makes.is_empty());
        assert!(data.features.categories().is_empty());
    }

    #[test]
    fn test_missing_vehicles_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = CatalogData::load(&FileRecordSource::new(dir.path())).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_malformed_json_names_resource() {
        let dir = TempDir::new().unwrap();
        write(&dir, VEHICLES, "[{");
        let err = CatalogData::load(&FileRecordSource::new(dir.path())).unwrap_err();
        match err {
            CatalogError::Source { resource, .. } => assert_eq!(resource, "vehicles"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_find_make_by_slug() {
        let dir = TempDir::new().unwrap();
        write(&dir, VEHICLES, "[]");
        write(
            &dir,
            MAKES,
            indoc! {r#"
                [{"name": "Tesla", "slug": "tesla", "carIdList": [2, 3]}]
            "#},
        );
        let data = CatalogData::load(&FileRecordSource::new(dir.path())).unwrap();
        let make = data.find_make("TESLA").unwrap();
        assert!(make.contains(3));
        assert!(data.find_make("rivian").is_none());
    }

    #[tokio::test]
    async fn test_resolver_skips_unknown_ids() {
        let resolver = FileDetailResolver::new(vec![
            DetailRecord {
                id: 1,
                ..Default::default()
            },
            DetailRecord {
                id: 2,
                ..Default::default()
            },
        ]);
        let found = resolver.fetch_details(&[2, 42, 1]).await.unwrap();
        let ids: Vec<u32> = found.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_resolver_fails_when_nothing_matches() {
        let resolver = FileDetailResolver::default();
        let err = resolver.fetch_details(&[7]).await.unwrap_err();
        assert!(matches!(err, CatalogError::Detail(_)));
    }
}

//! Binary cache of a parsed course table, so repeated runs skip the spreadsheet.
//!
//! The cache records which table it came from (path, size and modification
//! time). A cache whose stamp does not match the table being asked for is
//! treated as absent and rebuilt.

use crate::course::{Catalog, Course};
use crate::error::CoverError;
use crate::load::read_catalog;
use savefile::{load_file, save_file};
use savefile_derive::Savefile;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::{debug, info, warn};

/// Bump when the cached layout changes.
const CACHE_VERSION: u32 = 2;

#[derive(Savefile)]
struct CachedCatalog {
    source: SourceStamp,
    categories: Vec<String>,
    rows: Vec<CachedCourse>,
}

#[derive(Savefile)]
struct CachedCourse {
    code: String,
    title: String,
    /// Aligned with `CachedCatalog::categories`.
    coverage: Vec<u32>,
}

#[derive(Savefile, Debug, Clone, PartialEq, Eq)]
struct SourceStamp {
    path: String,
    len: u64,
    modified_nanos: u64,
}

impl SourceStamp {
    fn of(source: &Path) -> Result<Self, CoverError> {
        let meta = std::fs::metadata(source)?;
        let modified_nanos = meta
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Ok(Self {
            path: std::fs::canonicalize(source)?.to_string_lossy().into_owned(),
            len: meta.len(),
            modified_nanos,
        })
    }
}

/// Write `catalog`, parsed from `source`, to the cache at `path`.
pub fn save_catalog(path: impl AsRef<Path>, source: impl AsRef<Path>, catalog: &Catalog) -> Result<(), CoverError> {
    let cached = CachedCatalog {
        source: SourceStamp::of(source.as_ref())?,
        categories: catalog.categories.clone(),
        rows: catalog
            .courses
            .iter()
            .map(|course| CachedCourse {
                code: course.code.to_string(),
                title: course.title.clone(),
                coverage: catalog.categories.iter().map(|c| course.coverage_of(c)).collect(),
            })
            .collect(),
    };
    save_file(path.as_ref(), CACHE_VERSION, &cached)?;
    debug!(path = %path.as_ref().display(), courses = catalog.len(), "wrote catalog cache");
    Ok(())
}

/// Load the cache at `path` if it was built from `source` as it is now.
///
/// `Ok(None)` means the cache belongs to another table or to an older
/// version of this one.
pub fn load_catalog(path: impl AsRef<Path>, source: impl AsRef<Path>) -> Result<Option<Catalog>, CoverError> {
    let cached: CachedCatalog = load_file(path.as_ref(), CACHE_VERSION)?;
    let current = SourceStamp::of(source.as_ref())?;
    if cached.source != current {
        debug!(cached = ?cached.source, ?current, "catalog cache is stale");
        return Ok(None);
    }

    let courses = cached
        .rows
        .into_iter()
        .map(|row| {
            let mut course = Course::new(row.code.as_str(), row.title);
            for (category, count) in cached.categories.iter().zip(row.coverage) {
                if count > 0 {
                    course.coverage.insert(category.clone(), count);
                }
            }
            course
        })
        .collect();
    Ok(Some(Catalog::new(cached.categories, courses)))
}

/// Read the course table at `data`, going through the cache when one is given.
///
/// An unreadable or stale cache is rebuilt from the table.
pub fn cached_catalog(data: impl AsRef<Path>, cache: Option<&Path>) -> Result<Catalog, CoverError> {
    let data = data.as_ref();
    let Some(cache) = cache else {
        return read_catalog(data);
    };

    if cache.exists() {
        match load_catalog(cache, data) {
            Ok(Some(catalog)) => {
                debug!(path = %cache.display(), courses = catalog.len(), "using catalog cache");
                return Ok(catalog);
            }
            Ok(None) => info!(path = %cache.display(), "course table changed, rebuilding cache"),
            Err(err) => warn!(path = %cache.display(), %err, "unreadable catalog cache, rebuilding"),
        }
    }

    let catalog = read_catalog(data)?;
    save_catalog(cache, data, &catalog)?;
    Ok(catalog)
}

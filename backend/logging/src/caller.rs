//! Call-site resolution.
//!
//! Public logging methods are `#[track_caller]`, so the location handed to the
//! resolver is already the first frame outside the facade. The resolver only has to
//! recognise calls that originate inside this crate (the archiver's own alerts) and
//! hide them.

use std::path::{Path, PathBuf};
use std::panic::Location;
use std::sync::OnceLock;

use rotalog_core::{CallSite, CallerResolver};

/// Source directory of this crate, discovered from the resolver's own location.
static OWN_DIR: OnceLock<PathBuf> = OnceLock::new();

fn own_dir() -> &'static Path {
    OWN_DIR.get_or_init(|| {
        let here = Location::caller();
        Path::new(here.file())
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    })
}

/// Reports the caller's file name and line, skipping call sites inside the logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackedCallerResolver;

impl CallerResolver for TrackedCallerResolver {
    fn resolve(&self, site: &'static Location<'static>) -> Option<CallSite> {
        let file = Path::new(site.file());
        let own = own_dir();
        if !own.as_os_str().is_empty() && file.starts_with(own) {
            return None;
        }
        let name = file.file_name()?.to_string_lossy().into_owned();
        Some(CallSite {
            file: name,
            line: site.line(),
        })
    }
}

/// Never reports a location.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallerResolver;

impl CallerResolver for NoCallerResolver {
    fn resolve(&self, _site: &'static Location<'static>) -> Option<CallSite> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_directory_is_this_source_tree() {
        assert!(own_dir().ends_with("src"));
        assert!(Path::new(file!()).starts_with(own_dir()));
    }

    #[test]
    fn calls_from_inside_the_crate_are_hidden() {
        assert_eq!(TrackedCallerResolver.resolve(Location::caller()), None);
    }

    #[test]
    fn disabled_resolver_reports_nothing() {
        assert_eq!(NoCallerResolver.resolve(Location::caller()), None);
    }
}

//! Catalog command implementation
//!
//! Lists manifest entries in the active mode, then reports `dashboard_loaded`.

use crate::catalog::CatalogFilter;
use crate::cli::CatalogArgs;
use crate::error::Result;
use crate::manifest::load;
use crate::telemetry::DASHBOARD_LOADED;
use crate::ui::display;

use super::helpers::UserContext;

/// Run catalog command
pub fn run(manifest_source: &str, args: CatalogArgs) -> Result<()> {
    let manifest = load::load(manifest_source)?;
    let user = UserContext::load();
    let mode = user.mode(args.mode);

    let filter = CatalogFilter {
        query: args.query,
        class: args.class,
        status: args.status,
    };
    let shown = filter.apply(&manifest.entries, mode);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!(
            "{}",
            display::catalog_header(mode, shown.len(), manifest.entries.len())
        );
        if shown.is_empty() {
            println!("No matching entries.");
        }
        for entry in &shown {
            println!();
            print!("{}", display::entry_card(entry, mode));
        }
    }

    user.emitter(&manifest, false)
        .emit(DASHBOARD_LOADED, &[], mode);
    Ok(())
}

//! Resolve command implementation

use serde::Serialize;

use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::manifest::load;
use crate::session::Session;
use crate::ui::display;

use super::helpers::UserContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveReport<'a> {
    selected: Vec<&'a str>,
    loadout: Vec<&'a str>,
    auto_added: usize,
}

/// Run resolve command
pub fn run(manifest_source: &str, args: ResolveArgs) -> Result<()> {
    let manifest = load::load(manifest_source)?;
    let user = UserContext::load();
    let mode = user.mode(args.mode);

    let index = manifest.index();
    let mut session = Session::new(user.preferences.telemetry_opt_out).with_mode(mode);
    for id in &args.ids {
        session = session.with_tool(&index, id)?;
    }

    let loadout = session.loadout(&manifest);
    let summary = session.checkout_summary(&loadout);

    if args.json {
        let report = ResolveReport {
            selected: session.cart.iter().collect(),
            loadout: loadout.iter().map(|e| e.id.as_str()).collect(),
            auto_added: summary.auto_added,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", display::loadout_list(&loadout, &session.cart, mode));
        print!("{}", display::summary_line(&summary));
    }
    Ok(())
}

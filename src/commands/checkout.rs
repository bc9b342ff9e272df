//! Checkout command implementation
//!
//! Builds the session from the given ids (or an interactive pick), shows the loadout
//! and its summary, offers removals on a terminal, and requires approval before the
//! installer is written and `installer_generated` is reported. When the installer
//! goes to stdout every other line goes to stderr so the script can be piped.

use std::path::Path;

use tracing::debug;

use crate::cli::CheckoutArgs;
use crate::config::write_atomic;
use crate::error::{ArmoryError, Result};
use crate::manifest::{Manifest, load};
use crate::script::{self, DialectKind};
use crate::session::Session;
use crate::telemetry::INSTALLER_GENERATED;
use crate::ui::{display, prompt};

use super::helpers::UserContext;

/// `--out` value selecting stdout
pub const STDOUT_TARGET: &str = "-";

/// Run checkout command
pub fn run(manifest_source: &str, args: CheckoutArgs) -> Result<()> {
    let manifest = load::load(manifest_source)?;
    let user = UserContext::load();
    let mode = user.mode(args.mode);
    let dialect = args.dialect.unwrap_or_else(DialectKind::platform_default);
    let to_stdout = args.out.as_deref() == Some(STDOUT_TARGET);
    let interactive = prompt::is_interactive();

    let say = |text: &str| {
        if to_stdout {
            eprint!("{text}");
        } else {
            print!("{text}");
        }
    };

    let ids = if args.ids.is_empty() && interactive {
        let entries: Vec<_> = manifest.entries.iter().collect();
        prompt::select_tools(&entries, mode)?
    } else {
        args.ids.clone()
    };
    if ids.is_empty() {
        return Err(ArmoryError::EmptyCart);
    }

    let opt_out = user.preferences.telemetry_opt_out || args.no_telemetry;
    let mut session = select(&manifest, Session::new(opt_out).with_mode(mode), &ids)?;

    let mut loadout = session.loadout(&manifest);
    say(&display::loadout_list(&loadout, &session.cart, mode));
    say(&display::summary_line(&session.checkout_summary(&loadout)));

    if interactive && !args.yes {
        let before = session.cart.len();
        session = offer_removals(&manifest, session)?;
        if session.cart.len() != before {
            loadout = session.loadout(&manifest);
            say(&display::loadout_list(&loadout, &session.cart, mode));
            say(&display::summary_line(&session.checkout_summary(&loadout)));
        }
    }

    let approved = if args.yes {
        true
    } else if interactive {
        prompt::confirm_loadout()?
    } else {
        false
    };
    let session = session.approved(approved);

    if loadout.is_empty() {
        return Err(ArmoryError::EmptyLoadout);
    }
    if !session.can_checkout(&loadout) {
        return Err(ArmoryError::ApprovalRequired);
    }

    let installer = script::generate(&loadout, &manifest, dialect, session.mode)?;

    if to_stdout {
        print!("{installer}");
    } else {
        let target = args
            .out
            .clone()
            .unwrap_or_else(|| dialect.default_file_name());
        write_installer(Path::new(&target), &installer, dialect)?;
        say(&display::written_line(&target, loadout.len()));
    }

    let tool_ids: Vec<String> = loadout.iter().map(|e| e.id.clone()).collect();
    user.emitter(&manifest, session.telemetry_opt_out)
        .emit(INSTALLER_GENERATED, &tool_ids, session.mode);
    Ok(())
}

/// Add every id to the cart, failing on the first unknown or inactive one
fn select(manifest: &Manifest, session: Session, ids: &[String]) -> Result<Session> {
    let index = manifest.index();
    ids.iter().try_fold(session, |session, id| session.with_tool(&index, id))
}

/// Let the user drop cart entries before approval
fn offer_removals(manifest: &Manifest, session: Session) -> Result<Session> {
    let index = manifest.index();
    let cart_entries: Vec<_> = session
        .cart
        .iter()
        .filter_map(|id| index.get(id))
        .collect();
    let removed = prompt::remove_tools(&cart_entries, session.mode)?;

    let session = removed
        .iter()
        .fold(session, |session, id| session.without_tool(id));
    if session.cart.is_empty() {
        return Err(ArmoryError::EmptyCart);
    }
    Ok(session)
}

fn write_installer(path: &Path, installer: &str, dialect: DialectKind) -> Result<()> {
    write_atomic(path, installer)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = match dialect {
            DialectKind::Bash => 0o755,
            DialectKind::PowerShell => 0o644,
        };
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
            crate::error::fs::write_failed(path.display().to_string(), e.to_string())
        })?;
    }

    debug!("Wrote {} installer to {}", dialect, path.display());
    Ok(())
}

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use roster_reader::{
    AnalysisView, LoaderConfig, RosterStore, SchemaVariant, load_member_file, run_view,
};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(file) = args.next() else {
        bail!("usage: roster-reader <roster file> [view] [--full-list]");
    };

    let mut variant = SchemaVariant::StaffDependent;
    let mut view = None;
    for arg in args {
        if arg == "--full-list" {
            variant = SchemaVariant::FullList;
        } else {
            view = Some(AnalysisView::from_str(&arg)?);
        }
    }

    let path = Path::new(&file);
    info!("loading roster from {} ({} schema)", path.display(), variant.name());

    let outcome = load_member_file(path, variant, &LoaderConfig::default())
        .with_context(|| format!("failed to load roster from {}", path.display()))?;
    for warning in &outcome.warnings {
        warn!("{warning}");
    }

    let mut store = RosterStore::new();
    let table = store.publish_members(outcome);
    info!("normalized {} records", table.records.len());

    let views: Vec<AnalysisView> = match view {
        Some(view) => vec![view],
        None => AnalysisView::ALL.to_vec(),
    };
    for view in views {
        let report = run_view(view, &table.records);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

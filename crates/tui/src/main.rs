mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use treescope_core::presenters::{HierarchyPresenter, PropertiesPresenter, ViewerPresenter};
use treescope_protocol::{HierarchyOptions, OptionState, PropertiesOptions};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: treescope <trace.json>");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let data = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let trace = treescope_core::parsers::parse_auto(&data)
        .with_context(|| format!("parsing {}", path.display()))?;

    let hierarchy = HierarchyPresenter::new(vec![]).with_options(HierarchyOptions {
        show_diff: OptionState::enabled(),
        ..HierarchyOptions::default()
    });
    let properties = PropertiesPresenter::new(vec![]).with_options(PropertiesOptions {
        show_diff: OptionState::enabled(),
        ..PropertiesOptions::default()
    });
    let viewer = ViewerPresenter::new(hierarchy).with_properties(properties);

    renderer::run(&trace, viewer)?;
    Ok(())
}

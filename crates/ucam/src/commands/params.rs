//! Parameter tree command handlers.

use serde_json::{Map, Value};
use ucam_core::{Camera, DeviceInfo, ParamNode};

use crate::cli::{GlobalOpts, ParamsArgs, ParamsCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    camera: &Camera,
    args: ParamsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = camera.params();

    let out = match args.command {
        ParamsCommand::Groups => {
            let tree = store.fetch_all().await?;
            let groups = tree.groups();
            output::render(global.output, &groups, |g| g.join("\n"))?
        }

        ParamsCommand::Get { path } => {
            let tree = store.fetch_all().await?;
            let node = tree.lookup(&path)?;
            output::render(global.output, node, |node| match node {
                ParamNode::Leaf(value) => output::value_text(value),
                ParamNode::Node(_) => {
                    let prefix = format!("{path}.");
                    output::assignments(
                        tree.flatten()
                            .into_iter()
                            .filter(|(p, _)| p.starts_with(&prefix)),
                    )
                }
            })?
        }

        ParamsCommand::Search { text } => {
            let tree = store.fetch_all().await?;
            let matches = to_map(tree.search(&text));
            if matches.is_empty() && !global.quiet {
                eprintln!("No parameters match '{text}'");
            }
            output::render(global.output, &matches, render_map)?
        }

        ParamsCommand::Flatten => {
            let tree = store.fetch_all().await?;
            let flat = to_map(tree.flatten());
            output::render(global.output, &flat, render_map)?
        }

        ParamsCommand::Group { group } => {
            let tree = store.fetch_group(&group).await?;
            output::render(global.output, tree.node(), |_| {
                output::assignments(tree.flatten())
            })?
        }

        ParamsCommand::Info => {
            let info = store.device_info().await?;
            output::render(global.output, &info, render_info)?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

/// Ordered `path -> value` object for structured output.
fn to_map(pairs: Vec<(String, &Value)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(path, value)| (path, value.clone()))
        .collect()
}

fn render_map(map: &Map<String, Value>) -> String {
    output::assignments(map.iter().map(|(path, value)| (path.clone(), value)))
}

fn render_info(info: &DeviceInfo) -> String {
    output::detail(&[
        ("Brand", info.brand.clone()),
        ("Product", info.product_name.clone()),
        ("Number", info.product_number.clone()),
        ("Short name", info.product_short_name.clone()),
        ("Type", info.product_type.clone()),
        ("Variant", info.product_variant.clone()),
        ("Web", info.web_url.clone()),
    ])
}

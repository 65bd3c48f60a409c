use crate::cli::ParseArgs;
use anyhow::{Context, Result};
use harvest_core::{
    encode_result, Extractor, FactDisplay, FactSource, Link, LinkStatus, Operation,
};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tracing::{info, warn};

/// Operation as stored on disk: identity plus its seed facts
#[derive(Debug, Deserialize)]
struct OperationFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    source: Option<FactSource>,
}

fn load_operation(path: &Path) -> Result<Operation> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading operation {}", path.display()))?;
    let file: OperationFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing operation {}", path.display()))?;
    let op = Operation::new(file.id, file.name);
    Ok(match file.source {
        Some(source) => op.with_source(source),
        None => op,
    })
}

fn load_link(path: &Path) -> Result<Link> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading link {}", path.display()))?;
    Link::from_json(&raw).with_context(|| format!("parsing link {}", path.display()))
}

fn encoded_result(args: &ParseArgs) -> Result<String> {
    match (&args.result, &args.raw) {
        (Some(result), _) => Ok(result.clone()),
        (None, Some(path)) => {
            let output = std::fs::read_to_string(path)
                .with_context(|| format!("reading output {}", path.display()))?;
            Ok(encode_result(&output))
        }
        (None, None) => anyhow::bail!("one of --result or --raw is required"),
    }
}

pub async fn run(args: ParseArgs, extractor: &Extractor) -> Result<()> {
    let mut link = load_link(&args.link)?;
    let result = encoded_result(&args)?;
    let operation = args.operation.as_deref().map(load_operation).transpose()?;

    if args.force_success {
        link.status = LinkStatus::Success;
    } else if !link.status.is_success() {
        warn!("link status is {}, nothing will be extracted", link.status);
    }
    if link.id.is_none() {
        link.apply_id("cli");
    }

    let summary = link.parse(extractor, operation.as_ref(), &result).await;
    info!(
        "parsed {} descriptor(s): {} relationships, {} new facts, {} failure(s)",
        summary.descriptors_run,
        summary.relationships_found,
        summary.facts_added,
        summary.failures.len()
    );

    let pool = match &operation {
        Some(op) => op
            .all_facts()?
            .iter()
            .map(FactDisplay::from)
            .collect::<Vec<_>>(),
        None => Vec::new(),
    };
    let failures: Vec<_> = summary
        .failures
        .iter()
        .map(|f| json!({ "module": f.module, "error": f.error }))
        .collect();

    let report = json!({
        "skipped": summary.skipped,
        "relationships_found": summary.relationships_found,
        "facts_added": summary.facts_added,
        "failures": failures,
        "relationships": link.relationships(),
        "link": link.display(),
        "pool": pool,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

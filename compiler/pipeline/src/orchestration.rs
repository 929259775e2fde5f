//! Pipeline orchestration for the main entry points.
//!
//! A run loads the model, cleans and validates it, stamps the checksum into the
//! emit options and then renders every artifact. A failing artifact is logged
//! and recorded; the remaining artifacts are still written.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use analysis::{model_checksum, resolve_order};
use codegen::all_generators;
use ir::{Node, TypedNode};
use tracing::{error, info};

use crate::model_compiler::{load_model, LspCompiler};
use crate::report::{ArtifactFailure, GenerationReport};
use crate::{GenerationContext, Result};

/// Run the full generation for one context.
///
/// Returns `Err` only when the model cannot be loaded, cleaned or the output
/// directory cannot be created. Per-artifact failures land in the report.
pub fn run(ctx: &GenerationContext) -> Result<GenerationReport> {
    let model = load_model(&ctx.model_path, ctx.schema)?;
    let compiled =
        LspCompiler::new(ctx.cleanup_rules.clone(), ctx.strict).run_compiler_passes(model)?;
    let model = compiled.model;

    let checksum = model_checksum(&model).map_err(analysis::PhaseError::from)?;
    info!("Model checksum: {}", checksum);

    let mut emit = ctx.emit.clone();
    emit.checksum = Some(checksum.clone());

    fs::create_dir_all(&ctx.output_dir)?;

    let mut report = GenerationReport {
        checksum,
        warnings: compiled.diagnostics.warnings,
        ..GenerationReport::default()
    };

    for generator in all_generators(&emit) {
        let artifact = generator.artifact().to_string();
        let path = ctx.artifact_path(&artifact);

        let outcome = generator
            .generate(&model)
            .map_err(|e| e.to_string())
            .and_then(|text| write_artifact(&path, &text).map_err(|e| e.to_string()));

        match outcome {
            Ok(()) => {
                info!("Wrote {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                error!("Failed to generate {}: {}", artifact, e);
                report.failed.push(ArtifactFailure { artifact, error: e });
            }
        }
    }

    Ok(report)
}

/// Write one artifact, replacing any previous content.
pub fn write_artifact(path: &Path, contents: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}

/// Names of the aliases and structures in the order they would be declared.
pub fn emission_order(ctx: &GenerationContext) -> Result<Vec<String>> {
    let model = load_model(&ctx.model_path, ctx.schema)?;
    let model =
        LspCompiler::new(ctx.cleanup_rules.clone(), ctx.strict).run_compiler_passes(model)?.model;

    let nodes: Vec<Node> = model
        .type_aliases
        .into_iter()
        .map(Node::Alias)
        .chain(model.interfaces.into_iter().map(Node::Interface))
        .collect();

    let ordered = resolve_order(nodes).map_err(analysis::PhaseError::from)?;
    Ok(ordered.iter().map(|node| node.name().to_string()).collect())
}

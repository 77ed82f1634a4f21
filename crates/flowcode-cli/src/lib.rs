//! Flowcode CLI library
//!
//! This module contains the core CLI logic for the Flowcode flowchart tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{borrow::Cow, fs};

use log::{info, warn};

use flowcode::{FlowcodeError, FlowchartBuilder};

/// Run the Flowcode CLI application
///
/// This function processes the input file through the Flowcode pipeline
/// and writes the resulting SVG to the output file. Repair warnings are
/// logged; with `--fix` the repaired text is parsed instead of the input.
///
/// # Errors
///
/// Returns `FlowcodeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), FlowcodeError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        fix = args.fix;
        "Processing source"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = FlowchartBuilder::new(app_config);
    let analysis = builder.analyze(&source);
    if analysis.has_issues() {
        for report in error_adapter::render_diagnostics(analysis.diagnostics(), &source) {
            warn!("{report}");
        }
    }

    let source = if args.fix && analysis.has_issues() {
        info!(fixes_count = analysis.diagnostics().len(); "Applying source repairs");
        Cow::Owned(analysis.into_fixed())
    } else {
        Cow::Borrowed(source.as_str())
    };

    let program = builder.parse(&source)?;
    let scene = builder.layout(&program)?;
    builder.write_svg(&scene, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

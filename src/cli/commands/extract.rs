//! Extract Command
//!
//! Text extraction without any model call: resolves the input and writes
//! each source's extracted text verbatim, using the `.doc-gpt.txt` suffix
//! convention for derived filenames.

use std::path::PathBuf;

use console::style;

use crate::constants::output as output_const;
use crate::types::Result;
use crate::{extract, output, resolve};

pub async fn run(input: &str, target: Option<PathBuf>) -> Result<()> {
    let sources = resolve::resolve(input);
    if sources.is_empty() {
        eprintln!("{}", style("No valid files found.").yellow());
        return Ok(());
    }

    for source in sources {
        let text = extract::extract(&source).await;
        let path = output::write(
            &text,
            target.as_deref(),
            &source,
            output_const::EXTRACTED_SUFFIX,
        )?;
        println!("Extracted {} -> {}", source, path.display());
    }

    Ok(())
}

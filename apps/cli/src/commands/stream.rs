use crate::cli::StreamArgs;
use anyhow::Context;
use genu::features::streaming::decode_stream;
use std::io::Write;
use tracing::debug;

pub(super) async fn stream(args: &StreamArgs) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    let mut write_error = None;
    let on_delta = |delta: String| {
        if write_error.is_none() {
            write_error = stdout.write_all(delta.as_bytes()).err();
        }
    };

    let emitted = match &args.file {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            decode_stream(file, on_delta).await?
        },
        None => decode_stream(tokio::io::stdin(), on_delta).await?,
    };

    if let Some(err) = write_error {
        return Err(err).context("Failed to write to stdout");
    }
    writeln!(stdout)?;
    stdout.flush()?;
    debug!(deltas = emitted, "Stream decoded");
    Ok(())
}

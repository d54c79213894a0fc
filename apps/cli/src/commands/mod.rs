mod arn;
mod stream;
mod synth;

use crate::cli::Commands;

pub(crate) async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Synth(args) => synth::synth(&args),
        Commands::Plan(args) => synth::plan(&args),
        Commands::Arn(args) => arn::arn(&args),
        Commands::Stream(args) => stream::stream(&args).await,
    }
}

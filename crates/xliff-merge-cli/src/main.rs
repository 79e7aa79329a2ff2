use clap::Parser;
use miette::Result as MietteResult;
use xliff_merge_cli::commands::{SyncArgs, run_sync};

#[derive(Parser)]
#[command(name = "xliff-merge")]
#[command(about = "Sync XLIFF 2.0 locale catalogs with the source catalog")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    xliff_merge_cli::utils::ui::init_logging();

    run_sync(cli.sync).map_err(miette::Report::new)
}

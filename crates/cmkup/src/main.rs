use clap::Parser;

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    let app = cli::app::App::parse();
    logging::init(app.verbose);
    cli::run(app)
}

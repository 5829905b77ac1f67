use clap::Parser;
use tcgen::{
    cli::Cli, config::Config, logging::init_logging, output::OutputWriter, recipes::RECIPES,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color);

    let config = Config::from_cli(cli)?;

    log::debug!("Configuration: {:?}", config);

    let writer = OutputWriter::new(config.output_format, config.output.clone(), config.no_color);

    if config.list_recipes {
        writer.write_recipe_list(RECIPES)?;
        return Ok(());
    }

    let session = config.session()?;

    if config.list_options {
        writer.write_option_list(session.schema())?;
        return Ok(());
    }

    log::debug!(
        "Compiling {} options and {} input entries",
        session.options().iter().count(),
        session.inputs().len()
    );

    // Lints never block the command; they only point at likely mistakes
    for lint in session.lints() {
        log::warn!("{}", lint);
    }

    if config.explain {
        writer.write_explain(&session.contributions())?;
    }

    writer.write(&session.command())?;

    Ok(())
}

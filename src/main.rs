use ilokalama::app::App;
use ilokalama::cli::Opt;

use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io;
use structopt::StructOpt;
use structopt_flags::LogLevel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt: Opt = Opt::from_args();

    if let Some(shell) = opt.completions {
        Opt::clap().gen_completions_to("ilokalama", shell, &mut io::stdout());
        return Ok(());
    }

    // Frames go to stdout, so logs stay on stderr
    TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let config = opt.to_app_config()?;

    App::new(config).run()
}

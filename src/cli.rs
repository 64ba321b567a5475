use crate::config::Settings;
use crate::grid::Size;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;
use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

fn load_config(s: &str) -> Result<Settings, String> {
    let path = PathBuf::from(s);
    let file = File::open(path).map_err(|e| format!("Failed to open config file: {}", e))?;
    let reader = BufReader::new(file);
    let settings = serde_json::from_reader(reader)
        .map_err(|e| format!("Failed to parse config file: {}", e))?;
    Ok(settings)
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let seconds = s
        .parse::<f32>()
        .map_err(|_| format!("invalid duration: {}", s))?;

    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("duration must be positive: {}", s));
    }

    Duration::try_from_secs_f32(seconds).map_err(|e| format!("invalid duration {}: {}", s, e))
}

#[derive(Debug)]
pub struct AppConfig {
    pub size: Size,
    pub step: Duration,
    pub fps: u32,
    pub ticks: Option<u64>,
    pub settings: Settings,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "ilokalama",
    about = "Route pulses across a board of signal modules"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(
        parse(try_from_str),
        short,
        long,
        default_value = "20x12",
        help = "Board size in modules"
    )]
    size: Size,

    #[structopt(
        parse(try_from_str = parse_seconds),
        long,
        default_value = "0.2",
        help = "Seconds per beat"
    )]
    step: Duration,

    #[structopt(long, default_value = "25", help = "Loop iterations per second")]
    fps: u32,

    #[structopt(parse(try_from_str = load_config), short, long, help = "JSON settings file")]
    config: Option<Settings>,

    #[structopt(short, long, help = "Stop after n beats")]
    ticks: Option<u64>,

    #[structopt(long, possible_values= &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    pub fn to_app_config(self) -> Result<AppConfig, &'static str> {
        if self.fps == 0 {
            return Err("fps must be at least 1");
        }

        Ok(AppConfig {
            size: self.size,
            step: self.step,
            fps: self.fps,
            ticks: self.ticks,
            settings: self.config.unwrap_or_default(),
        })
    }
}

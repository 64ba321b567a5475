use crate::cli::AppConfig;
use crate::editor::InputEvent;
use crate::engine::{Control, Engine};
use crate::render::{RenderEvent, Renderer, TextRenderer};

use log::{debug, info};
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Turns one line typed by the operator into input events.
///
/// `:quit`, `:undo` and `:cancel` are control words; anything else is typed
/// into the command line and confirmed.
pub fn line_events(line: &str) -> Vec<InputEvent> {
    match line {
        ":quit" => vec![InputEvent::Exit],
        ":undo" => vec![InputEvent::Undo],
        ":cancel" => vec![InputEvent::Cancel],
        text => text
            .chars()
            .map(InputEvent::Char)
            .chain(std::iter::once(InputEvent::Confirm))
            .collect(),
    }
}

fn spawn_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };

            if sender.send(line).is_err() {
                break;
            }
        }
    });

    receiver
}

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let AppConfig {
            size,
            step,
            fps,
            ticks,
            settings,
        } = self.config;

        let mut engine = Engine::new(size, step, settings);
        let mut renderer = TextRenderer::new(io::stdout());
        let frame_budget = Duration::from_secs_f64(1.0 / f64::from(fps));
        let input = spawn_reader();
        let mut input_open = true;
        let mut last = Instant::now();

        renderer.handle_event(&RenderEvent::Started)?;
        renderer.draw(&engine.frame())?;

        'main: loop {
            let mut dirty = false;

            // Drain operator input before the tick check
            while input_open {
                match input.try_recv() {
                    Ok(line) => {
                        for event in line_events(&line) {
                            if engine.handle_event(event) == Control::Exit {
                                break 'main;
                            }
                        }

                        dirty = true;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        debug!("input closed");
                        input_open = false;

                        // Without a beat limit nothing else can end the loop
                        if ticks.is_none() {
                            break 'main;
                        }
                    }
                }
            }

            let now = Instant::now();

            if engine.update(now - last) {
                renderer.handle_event(&RenderEvent::Tick(engine.beats() - 1))?;
                dirty = true;
            }

            last = now;

            if dirty {
                renderer.draw(&engine.frame())?;
            }

            if renderer.should_quit() || ticks.map_or(false, |limit| engine.beats() >= limit) {
                break;
            }

            thread::sleep(frame_budget);
        }

        renderer.handle_event(&RenderEvent::Stopped)?;

        info!("stopped after {} beats", engine.beats());
        Ok(())
    }
}
